//! Symbol and type value objects.
//!
//! These mirror what a host binder knows about a name: just enough for the
//! rules to prove a transformation safe. They carry no references back
//! into host state.

use serde::Serialize;
use std::fmt;

/// Stable identity of a symbol within one semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(pub u32);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sym_{}", self.0)
    }
}

/// What kind of program element a symbol names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SymbolKind {
    Local,
    Field,
    Property,
    Method,
    Event,
}

/// A resolved symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
    /// Binding succeeded but the symbol's type is an error type. Rules
    /// treat error-typed symbols as unresolved.
    pub is_error: bool,
}

impl Symbol {
    pub fn new(id: SymbolId, name: impl Into<String>, kind: SymbolKind) -> Self {
        Symbol {
            id,
            name: name.into(),
            kind,
            is_error: false,
        }
    }

    pub fn error(id: SymbolId, name: impl Into<String>, kind: SymbolKind) -> Self {
        Symbol {
            is_error: true,
            ..Symbol::new(id, name, kind)
        }
    }
}

/// Coarse classification of a resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeFlavor {
    /// Built-in numeric/bool/char types.
    Primitive,
    /// The string type.
    String,
    /// An enumeration type.
    Enum,
    /// A user-defined value type.
    Struct,
    /// A nullable value type (`T?` over a value type).
    NullableValue,
    /// A class reference type.
    Class,
    /// An interface reference type.
    Interface,
    /// A delegate reference type (event handlers live here).
    Delegate,
    /// Binding produced an error type.
    Error,
}

/// A resolved type: display name plus classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    pub name: String,
    pub flavor: TypeFlavor,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>, flavor: TypeFlavor) -> Self {
        TypeInfo {
            name: name.into(),
            flavor,
        }
    }

    /// Reference types may be replaced by a null literal; value types and
    /// nullable value types may not (the semantics would change).
    pub fn is_reference_type(&self) -> bool {
        matches!(
            self.flavor,
            TypeFlavor::Class | TypeFlavor::Interface | TypeFlavor::Delegate | TypeFlavor::String
        )
    }

    /// Whether values of this type can be compile-time constants:
    /// primitive-like, string-like, and enumeration types only.
    pub fn supports_constant_value(&self) -> bool {
        matches!(
            self.flavor,
            TypeFlavor::Primitive | TypeFlavor::String | TypeFlavor::Enum
        )
    }

    pub fn is_error(&self) -> bool {
        self.flavor == TypeFlavor::Error
    }
}
