// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Name-to-symbol environments.

use std::collections::HashMap;

use crate::symbol::SymbolRef;

/// Unique identifier for a scope: its depth on the resolver's scope stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

/// A single lexical scope.
///
/// A name maps to every symbol declared under it here, in declaration
/// order. Lookups only ever see the first.
#[derive(Debug, Default)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    bindings: HashMap<String, Vec<SymbolRef>>,
}

impl Scope {
    /// A scope with no parent.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: ScopeId) -> Self {
        Self {
            parent: Some(parent),
            bindings: HashMap::new(),
        }
    }

    /// Add a binding. Earlier bindings for the same name stay in front.
    pub fn declare(&mut self, symbol: SymbolRef) {
        self.bindings
            .entry(symbol.name.clone())
            .or_default()
            .push(symbol);
    }

    /// All bindings for `name` in this scope only.
    pub fn lookup_local(&self, name: &str) -> Option<&[SymbolRef]> {
        self.bindings.get(name).map(Vec::as_slice)
    }

    pub fn lookup_first_local(&self, name: &str) -> Option<&SymbolRef> {
        self.lookup_local(name).and_then(|syms| syms.first())
    }

    pub fn contains_local(&self, name: &str) -> bool {
        self.lookup_first_local(name).is_some()
    }

    /// Number of distinct names bound here.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;
    use crate::ty::Type;
    use std::rc::Rc;

    #[test]
    fn first_declared_wins() {
        let mut scope = Scope::root();
        let first = Symbol::variable("x", Some(Type::int32()));
        let second = Symbol::variable("x", Some(Type::boolean()));
        scope.declare(Rc::clone(&first));
        scope.declare(second);

        assert_eq!(scope.lookup_local("x").map(|s| s.len()), Some(2));
        assert!(Rc::ptr_eq(scope.lookup_first_local("x").unwrap(), &first));
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn missing_name() {
        let scope = Scope::with_parent(ScopeId(0));
        assert!(scope.lookup_local("y").is_none());
        assert!(!scope.contains_local("y"));
        assert!(scope.is_empty());
        assert_eq!(scope.parent, Some(ScopeId(0)));
    }
}
