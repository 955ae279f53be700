//! Symbol definitions.

use std::rc::Rc;

use crate::ty::TypeRef;

/// Shared handle to a symbol. The node that introduced a binding keeps one,
/// and so does every reference resolved to it.
pub type SymbolRef = Rc<Symbol>;

/// The kind of symbol.
#[derive(Debug, Clone)]
pub enum SymbolKind {
    /// A local variable, parameter or loop variable.
    Variable {
        /// Declared type, or the initializer's type when none was written.
        ty: Option<TypeRef>,
    },
    /// A function.
    Function {
        /// Signature built from the declaration as written.
        signature: TypeRef,
    },
    /// A struct type.
    Struct {
        ty: TypeRef,
    },
    /// A struct field. Fields are looked up through their struct type, so
    /// the resolver never creates these.
    Field {
        ty: TypeRef,
    },
}

/// A declared symbol.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn variable(name: impl Into<String>, ty: Option<TypeRef>) -> SymbolRef {
        Rc::new(Symbol {
            name: name.into(),
            kind: SymbolKind::Variable { ty },
        })
    }

    pub fn function(name: impl Into<String>, signature: TypeRef) -> SymbolRef {
        Rc::new(Symbol {
            name: name.into(),
            kind: SymbolKind::Function { signature },
        })
    }

    pub fn structure(name: impl Into<String>, ty: TypeRef) -> SymbolRef {
        Rc::new(Symbol {
            name: name.into(),
            kind: SymbolKind::Struct { ty },
        })
    }

    /// The type this symbol carries, if any.
    pub fn ty(&self) -> Option<&TypeRef> {
        match &self.kind {
            SymbolKind::Variable { ty } => ty.as_ref(),
            SymbolKind::Function { signature } => Some(signature),
            SymbolKind::Struct { ty } | SymbolKind::Field { ty } => Some(ty),
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, SymbolKind::Struct { .. })
    }
}
