// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Scope stack for name resolution.

use tracing::trace;
use tuz_ast::{Location, Scope, ScopeId, SymbolRef};

use crate::error::ResolveError;

/// The nominal root scope owned by the program.
const ROOT: ScopeId = ScopeId(0);

/// LIFO stack of scopes layered over the program's root scope.
///
/// The scope at stack index `i` has id `i + 1`; id 0 is the root, which is
/// never on the stack and never receives declarations.
#[derive(Debug)]
pub struct ScopeStack<'p> {
    root: &'p Scope,
    scopes: Vec<Scope>,
}

impl<'p> ScopeStack<'p> {
    /// Create a stack holding one working scope whose parent is `root`.
    pub fn new(root: &'p Scope) -> Self {
        let mut stack = Self {
            root,
            scopes: Vec::new(),
        };
        stack.push();
        stack
    }

    /// Push a new scope and make it current.
    pub fn push(&mut self) -> ScopeId {
        let parent = self.current_id();
        self.scopes.push(Scope::with_parent(parent));
        let id = self.current_id();
        trace!(depth = self.scopes.len(), "push scope");
        id
    }

    /// Pop the current scope. The working scope at the bottom can't be popped.
    pub fn pop(&mut self) -> Result<Scope, ResolveError> {
        if self.scopes.len() <= 1 {
            return Err(ResolveError::internal(
                "cannot pop global scope",
                Location::default(),
            ));
        }
        let scope = self.scopes.pop();
        trace!(depth = self.scopes.len(), "pop scope");
        scope.ok_or_else(|| ResolveError::internal("scope stack is empty", Location::default()))
    }

    /// Number of scopes on the stack.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn current_id(&self) -> ScopeId {
        ScopeId(self.scopes.len() as u32)
    }

    pub fn current(&self) -> &Scope {
        self.scopes.last().unwrap_or(self.root)
    }

    /// Declare a symbol in the current scope.
    pub fn declare(&mut self, symbol: SymbolRef) {
        let top = self.scopes.len() - 1;
        self.scopes[top].declare(symbol);
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        if id == ROOT {
            Some(self.root)
        } else {
            self.scopes.get(id.0 as usize - 1)
        }
    }

    /// Look up a name from the current scope outward to the root.
    /// Returns the first binding of the innermost scope that has one.
    pub fn lookup(&self, name: &str) -> Option<&SymbolRef> {
        let mut scope_id = Some(self.current_id());
        while let Some(id) = scope_id {
            let scope = self.get(id)?;
            if let Some(symbol) = scope.lookup_first_local(name) {
                return Some(symbol);
            }
            scope_id = scope.parent;
        }
        None
    }
}
