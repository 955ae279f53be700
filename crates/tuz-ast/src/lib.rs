// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the tuz language.
//!
//! This crate defines the syntax tree handed over by the parser, the type
//! and symbol model the resolver annotates it with, and the `Scope`
//! environment those symbols live in.

pub mod span;
pub mod ty;
pub mod symbol;
pub mod scope;
pub mod expr;
pub mod stmt;
pub mod decl;

pub use span::{LineMap, Location};
pub use ty::{Primitive, StructField, StructType, Type, TypeRef};
pub use symbol::{Symbol, SymbolKind, SymbolRef};
pub use scope::{Scope, ScopeId};

use decl::Decl;

/// A parsed compilation unit.
///
/// `scope` is the nominal root scope. The resolver never declares into it;
/// top-level names go into a working scope pushed on top of it.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub declarations: Vec<Decl>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub scope: Scope,
}

impl Program {
    pub fn new(declarations: Vec<Decl>) -> Self {
        Self {
            declarations,
            scope: Scope::root(),
        }
    }
}
