// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Name resolution for the tuz language.
//!
//! Binds every identifier in the syntax tree to its declaration, replaces
//! by-name type references with the struct types they denote, and records
//! the results directly on the tree for code generation.

mod error;
mod guard;
mod resolver;
mod scope;

pub use error::{ResolveError, ResolveErrorKind};
pub use guard::ScopeGuard;
pub use resolver::Resolver;
pub use scope::ScopeStack;

use tuz_ast::Program;

/// Resolve a whole program in place. Stops at the first error.
pub fn resolve(program: &mut Program) -> Result<(), ResolveError> {
    let Program { declarations, scope } = program;
    let mut resolver = Resolver::new(scope);
    resolver.resolve(declarations)
}
