// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Resolution error types.

use thiserror::Error;
use tuz_ast::Location;

/// A name resolution error.
#[derive(Debug, Clone, Error)]
#[error("{kind}")]
pub struct ResolveError {
    pub kind: ResolveErrorKind,
    pub loc: Location,
}

impl ResolveError {
    pub fn unknown_identifier(name: String, loc: Location) -> Self {
        Self {
            kind: ResolveErrorKind::UnknownIdentifier { name },
            loc,
        }
    }

    pub fn already_declared(name: String, loc: Location) -> Self {
        Self {
            kind: ResolveErrorKind::AlreadyDeclared { name },
            loc,
        }
    }

    pub fn unresolved_type(name: String, loc: Location) -> Self {
        Self {
            kind: ResolveErrorKind::UnresolvedType { name },
            loc,
        }
    }

    pub fn unknown_field_base(loc: Location) -> Self {
        Self {
            kind: ResolveErrorKind::FieldAccessOnUnknownType,
            loc,
        }
    }

    pub fn not_a_struct(ty: String, loc: Location) -> Self {
        Self {
            kind: ResolveErrorKind::FieldAccessOnNonStruct { ty },
            loc,
        }
    }

    pub fn unknown_field(field: String, struct_name: String, loc: Location) -> Self {
        Self {
            kind: ResolveErrorKind::UnknownField { field, struct_name },
            loc,
        }
    }

    pub fn internal(message: impl Into<String>, loc: Location) -> Self {
        Self {
            kind: ResolveErrorKind::Internal {
                message: message.into(),
            },
            loc,
        }
    }

    /// Internal errors mean the resolver itself is broken, not the program.
    pub fn is_internal(&self) -> bool {
        matches!(self.kind, ResolveErrorKind::Internal { .. })
    }
}

/// The kind of resolution error.
#[derive(Debug, Clone, Error)]
pub enum ResolveErrorKind {
    #[error("unknown identifier: {name}")]
    UnknownIdentifier { name: String },

    #[error("variable already declared: {name}")]
    AlreadyDeclared { name: String },

    #[error("failed to resolve type: {name}")]
    UnresolvedType { name: String },

    #[error("field access on unknown type")]
    FieldAccessOnUnknownType,

    #[error("field access on non-struct type: {ty}")]
    FieldAccessOnNonStruct { ty: String },

    #[error("unknown field '{field}' in struct {struct_name}")]
    UnknownField { field: String, struct_name: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}
