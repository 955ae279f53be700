// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declaration AST nodes.

use crate::expr::Expr;
use crate::stmt::Stmt;
use crate::symbol::SymbolRef;
use crate::ty::TypeRef;
use crate::Location;

/// A top-level declaration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decl {
    pub kind: DeclKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loc: Location,
}

impl Decl {
    pub fn new(kind: DeclKind, loc: Location) -> Self {
        Self { kind, loc }
    }

    pub fn name(&self) -> &str {
        match &self.kind {
            DeclKind::Fn(f) => &f.name,
            DeclKind::Struct(s) => &s.name,
            DeclKind::Global(g) => &g.name,
        }
    }
}

/// The kind of declaration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclKind {
    /// Function declaration
    Fn(FnDecl),
    /// Struct declaration
    Struct(StructDecl),
    /// Global variable
    Global(GlobalDecl),
}

/// A function declaration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FnDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub ret_ty: TypeRef,
    /// Block statement; `None` for extern functions.
    pub body: Option<Stmt>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_extern: bool,
}

/// A function parameter.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub symbol: Option<SymbolRef>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            symbol: None,
        }
    }
}

/// A struct declaration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<Field>,
}

/// A struct field as written.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
}

/// A global variable declaration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalDecl {
    pub name: String,
    pub ty: TypeRef,
    pub init: Option<Expr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mutable: bool,
}
