// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Scope guard tying a scope push to its pop.

use std::ops::{Deref, DerefMut};

use tracing::error;

use crate::resolver::Resolver;

/// Pushes a scope on creation and pops it when dropped, including when an
/// error is propagating out of the guarded region.
///
/// Derefs to the resolver so resolution continues through the guard.
pub struct ScopeGuard<'r, 'p> {
    resolver: &'r mut Resolver<'p>,
}

impl<'r, 'p> ScopeGuard<'r, 'p> {
    pub fn new(resolver: &'r mut Resolver<'p>) -> Self {
        resolver.push_scope();
        Self { resolver }
    }
}

impl<'p> Deref for ScopeGuard<'_, 'p> {
    type Target = Resolver<'p>;

    fn deref(&self) -> &Self::Target {
        self.resolver
    }
}

impl<'p> DerefMut for ScopeGuard<'_, 'p> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.resolver
    }
}

impl Drop for ScopeGuard<'_, '_> {
    fn drop(&mut self) {
        // The guard pushed a scope, so there is always one above the working scope.
        if let Err(e) = self.resolver.pop_scope() {
            error!(error = %e, "scope guard could not restore the scope stack");
        }
    }
}
