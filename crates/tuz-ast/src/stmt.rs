//! Statement AST nodes.

use crate::expr::Expr;
use crate::symbol::SymbolRef;
use crate::ty::TypeRef;
use crate::Location;

/// A statement in the AST.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stmt {
    pub kind: StmtKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loc: Location,
}

impl Stmt {
    pub fn new(kind: StmtKind, loc: Location) -> Self {
        Self { kind, loc }
    }
}

/// The kind of statement.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StmtKind {
    /// Expression statement
    Expr(Expr),
    /// Let binding
    Let {
        name: String,
        ty: Option<TypeRef>,
        init: Option<Expr>,
        #[cfg_attr(feature = "serde", serde(default))]
        mutable: bool,
        #[cfg_attr(feature = "serde", serde(skip))]
        symbol: Option<SymbolRef>,
    },
    /// Assignment
    Assign {
        target: Expr,
        value: Expr,
    },
    /// Braced block
    Block(Vec<Stmt>),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    /// Range loop: `for var = start, end { ... }`
    For {
        var: String,
        start: Expr,
        end: Expr,
        body: Box<Stmt>,
        #[cfg_attr(feature = "serde", serde(skip))]
        symbol: Option<SymbolRef>,
    },
    /// Return statement
    Return(Option<Expr>),
}
