// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The name resolver implementation.

use std::rc::Rc;

use tracing::{debug, trace};
use tuz_ast::decl::{Decl, DeclKind, FnDecl, GlobalDecl, StructDecl};
use tuz_ast::expr::{Expr, ExprKind};
use tuz_ast::stmt::{Stmt, StmtKind};
use tuz_ast::{Location, Scope, StructType, Symbol, SymbolKind, SymbolRef, Type, TypeRef};

use crate::error::ResolveError;
use crate::guard::ScopeGuard;
use crate::scope::ScopeStack;

pub struct Resolver<'p> {
    scopes: ScopeStack<'p>,
}

impl<'p> Resolver<'p> {
    /// Create a resolver layered over the program's root scope. A working
    /// scope is pushed immediately and receives all top-level declarations.
    pub fn new(root: &'p Scope) -> Self {
        Self {
            scopes: ScopeStack::new(root),
        }
    }

    /// Resolve every declaration in place.
    pub fn resolve(&mut self, decls: &mut [Decl]) -> Result<(), ResolveError> {
        self.declare_structs(decls)?;
        self.declare_functions(decls);

        for decl in decls.iter_mut() {
            trace!(name = decl.name(), "resolve declaration");
            self.resolve_decl(decl)?;
        }
        Ok(())
    }

    // =========================================================================
    // Scope Management
    // =========================================================================

    pub fn push_scope(&mut self) {
        self.scopes.push();
    }

    /// Fails with an internal error when only the working scope is left.
    pub fn pop_scope(&mut self) -> Result<(), ResolveError> {
        self.scopes.pop().map(|_| ())
    }

    pub fn depth(&self) -> usize {
        self.scopes.depth()
    }

    pub fn current_scope(&self) -> &Scope {
        self.scopes.current()
    }

    pub fn declare(&mut self, symbol: SymbolRef) {
        self.scopes.declare(symbol);
    }

    pub fn lookup(&self, name: &str) -> Option<&SymbolRef> {
        self.scopes.lookup(name)
    }

    // =========================================================================
    // Type Resolution
    // =========================================================================

    /// Replace a by-name type with the struct it names.
    ///
    /// Names bound to something other than a struct come back unchanged.
    /// Pointers are resolved through their pointee; every other type is
    /// returned as is.
    pub fn resolve_type(&self, ty: &TypeRef, loc: Location) -> Result<TypeRef, ResolveError> {
        match &**ty {
            Type::Named(name) => {
                let symbol = self
                    .scopes
                    .lookup(name)
                    .ok_or_else(|| ResolveError::unresolved_type(name.clone(), loc))?;
                match &symbol.kind {
                    SymbolKind::Struct { ty: struct_ty } => Ok(Rc::clone(struct_ty)),
                    _ => Ok(Rc::clone(ty)),
                }
            }
            Type::Pointer(pointee) => {
                let resolved = self.resolve_type(pointee, loc)?;
                if Rc::ptr_eq(&resolved, pointee) {
                    Ok(Rc::clone(ty))
                } else {
                    Ok(Type::pointer(resolved))
                }
            }
            _ => Ok(Rc::clone(ty)),
        }
    }

    /// Resolve `ty` and store the result back in place.
    fn resolve_type_in_place(&self, ty: &mut TypeRef, loc: Location) -> Result<TypeRef, ResolveError> {
        let resolved = self.resolve_type(ty, loc)?;
        *ty = Rc::clone(&resolved);
        Ok(resolved)
    }

    // =========================================================================
    // Pre-passes: Declaration Collection
    // =========================================================================

    /// Bind every struct name first, then fill in field lists, so structs
    /// can name each other in any order.
    fn declare_structs(&mut self, decls: &[Decl]) -> Result<(), ResolveError> {
        let mut count = 0;
        for decl in decls {
            if let DeclKind::Struct(s) = &decl.kind {
                let ty = Rc::new(Type::Struct(StructType::new(s.name.clone())));
                self.scopes.declare(Symbol::structure(s.name.clone(), ty));
                count += 1;
            }
        }
        debug!(count, "declared struct names");

        for decl in decls {
            if let DeclKind::Struct(s) = &decl.kind {
                self.fill_struct_fields(s, decl.loc)?;
            }
        }
        Ok(())
    }

    fn fill_struct_fields(&self, s: &StructDecl, loc: Location) -> Result<(), ResolveError> {
        let symbol = self.scopes.lookup(&s.name).ok_or_else(|| {
            ResolveError::internal(format!("struct not found after declaration: {}", s.name), loc)
        })?;

        if let SymbolKind::Struct { ty } = &symbol.kind {
            if let Type::Struct(struct_ty) = &**ty {
                for field in &s.fields {
                    let resolved = self.resolve_type(&field.ty, loc)?;
                    struct_ty.push_field(field.name.clone(), resolved);
                }
            }
        }
        Ok(())
    }

    /// Bind every function signature before any body is walked. Parameter
    /// and return types are taken as written.
    fn declare_functions(&mut self, decls: &[Decl]) {
        let mut count = 0;
        for decl in decls {
            if let DeclKind::Fn(f) = &decl.kind {
                let params = f.params.iter().map(|p| Rc::clone(&p.ty)).collect();
                let signature = Type::function(params, Rc::clone(&f.ret_ty));
                self.scopes.declare(Symbol::function(f.name.clone(), signature));
                count += 1;
            }
        }
        debug!(count, "declared function signatures");
    }

    // =========================================================================
    // Declaration Resolution
    // =========================================================================

    fn resolve_decl(&mut self, decl: &mut Decl) -> Result<(), ResolveError> {
        let loc = decl.loc;
        match &mut decl.kind {
            DeclKind::Fn(fn_decl) => self.resolve_function(fn_decl, loc),
            DeclKind::Struct(struct_decl) => {
                // Field lists were already filled by the pre-pass; this only
                // rewrites the declaration's own field types.
                for field in &mut struct_decl.fields {
                    self.resolve_type_in_place(&mut field.ty, loc)?;
                }
                Ok(())
            }
            DeclKind::Global(global) => self.resolve_global(global, loc),
        }
    }

    fn resolve_function(&mut self, fn_decl: &mut FnDecl, loc: Location) -> Result<(), ResolveError> {
        let mut scope = ScopeGuard::new(self);

        for param in &mut fn_decl.params {
            let ty = scope.resolve_type_in_place(&mut param.ty, loc)?;
            let symbol = Symbol::variable(param.name.clone(), Some(ty));
            param.symbol = Some(Rc::clone(&symbol));
            scope.declare(symbol);
        }

        scope.resolve_type_in_place(&mut fn_decl.ret_ty, loc)?;

        if let Some(body) = &mut fn_decl.body {
            scope.resolve_stmt(body)?;
        }
        Ok(())
    }

    /// Globals only get their type resolved; the name is not bound and the
    /// initializer is left alone.
    fn resolve_global(&mut self, global: &mut GlobalDecl, loc: Location) -> Result<(), ResolveError> {
        self.resolve_type_in_place(&mut global.ty, loc)?;
        Ok(())
    }

    // =========================================================================
    // Statement Resolution
    // =========================================================================

    fn resolve_stmt(&mut self, stmt: &mut Stmt) -> Result<(), ResolveError> {
        let loc = stmt.loc;
        match &mut stmt.kind {
            StmtKind::Expr(expr) => self.resolve_expr(expr),
            StmtKind::Let { name, ty, init, symbol, .. } => {
                // The initializer runs before the new name is bound, so a
                // self-reference sees the outer binding.
                if let Some(init_expr) = init.as_mut() {
                    self.resolve_expr(init_expr)?;
                }

                let var_ty = match ty {
                    Some(declared) => Some(self.resolve_type_in_place(declared, loc)?),
                    None => init.as_ref().and_then(|e| e.ty.clone()),
                };

                if self.scopes.current().contains_local(name) {
                    return Err(ResolveError::already_declared(name.clone(), loc));
                }

                let sym = Symbol::variable(name.clone(), var_ty);
                *symbol = Some(Rc::clone(&sym));
                self.scopes.declare(sym);
                Ok(())
            }
            StmtKind::Assign { target, value } => {
                self.resolve_expr(target)?;
                self.resolve_expr(value)
            }
            StmtKind::Block(stmts) => {
                let mut scope = ScopeGuard::new(self);
                for s in stmts {
                    scope.resolve_stmt(s)?;
                }
                Ok(())
            }
            // Conditions are not visited.
            StmtKind::If { then_branch, else_branch, .. } => {
                self.resolve_stmt(then_branch)?;
                if let Some(else_branch) = else_branch.as_mut() {
                    self.resolve_stmt(else_branch)?;
                }
                Ok(())
            }
            StmtKind::While { body, .. } => self.resolve_stmt(body),
            // Range bounds are not visited.
            StmtKind::For { var, body, symbol, .. } => {
                let mut scope = ScopeGuard::new(self);

                if scope.current_scope().contains_local(var) {
                    return Err(ResolveError::already_declared(var.clone(), loc));
                }

                let sym = Symbol::variable(var.clone(), Some(Type::int32()));
                *symbol = Some(Rc::clone(&sym));
                scope.declare(sym);

                scope.resolve_stmt(body)
            }
            StmtKind::Return(_) => Ok(()),
        }
    }

    // =========================================================================
    // Expression Resolution
    // =========================================================================

    fn resolve_expr(&mut self, expr: &mut Expr) -> Result<(), ResolveError> {
        let loc = expr.loc;
        match &mut expr.kind {
            ExprKind::Int(_) => expr.ty = Some(Type::int32()),
            ExprKind::Float(_) => expr.ty = Some(Type::float32()),
            ExprKind::Bool(_) => expr.ty = Some(Type::boolean()),
            ExprKind::String(_) => {}
            ExprKind::Variable { name, symbol } => {
                let sym = self
                    .scopes
                    .lookup(name)
                    .cloned()
                    .ok_or_else(|| ResolveError::unknown_identifier(name.clone(), loc))?;

                expr.ty = match &sym.kind {
                    SymbolKind::Variable { ty } => ty.clone(),
                    SymbolKind::Function { signature } => Some(Rc::clone(signature)),
                    SymbolKind::Struct { .. } | SymbolKind::Field { .. } => None,
                };
                *symbol = Some(sym);
            }
            ExprKind::Binary { left, right, .. } => {
                self.resolve_expr(left)?;
                self.resolve_expr(right)?;
            }
            ExprKind::Unary { operand, .. } => self.resolve_expr(operand)?,
            ExprKind::Call { callee, args } => {
                self.resolve_expr(callee)?;
                for arg in args {
                    self.resolve_expr(arg)?;
                }
            }
            ExprKind::Index { object, index } => {
                self.resolve_expr(object)?;
                self.resolve_expr(index)?;
            }
            ExprKind::Field { object, field } => {
                self.resolve_expr(object)?;
                expr.ty = Some(Self::field_type(object, field, loc)?);
            }
            ExprKind::Cast { target, expr: inner } => {
                self.resolve_type_in_place(target, loc)?;
                self.resolve_expr(inner)?;
            }
        }
        Ok(())
    }

    /// Type of `object.field`, looking through one level of pointer.
    fn field_type(object: &Expr, field: &str, loc: Location) -> Result<TypeRef, ResolveError> {
        let mut base = object
            .ty
            .clone()
            .ok_or_else(|| ResolveError::unknown_field_base(loc))?;

        if let Type::Pointer(pointee) = &*base {
            base = Rc::clone(pointee);
        }

        let Some(struct_ty) = base.as_struct() else {
            return Err(ResolveError::not_a_struct(base.to_string(), loc));
        };

        struct_ty
            .field_type(field)
            .ok_or_else(|| ResolveError::unknown_field(field.to_string(), struct_ty.name.clone(), loc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tuz_ast::decl::{Field, Param};

    fn loc() -> Location {
        Location::new(1, 1)
    }

    fn struct_decl(name: &str, fields: &[(&str, TypeRef)]) -> Decl {
        Decl::new(
            DeclKind::Struct(StructDecl {
                name: name.to_string(),
                fields: fields
                    .iter()
                    .map(|(n, t)| Field { name: n.to_string(), ty: Rc::clone(t) })
                    .collect(),
            }),
            loc(),
        )
    }

    #[test]
    fn resolve_type_passes_primitives_through() {
        let root = Scope::root();
        let resolver = Resolver::new(&root);
        let int = Type::int32();
        let resolved = resolver.resolve_type(&int, loc()).unwrap();
        assert!(Rc::ptr_eq(&int, &resolved));
    }

    #[test]
    fn resolve_type_unknown_name() {
        let root = Scope::root();
        let resolver = Resolver::new(&root);
        let err = resolver.resolve_type(&Type::named("Ghost"), loc()).unwrap_err();
        assert!(matches!(err.kind, crate::ResolveErrorKind::UnresolvedType { ref name } if name == "Ghost"));
    }

    #[test]
    fn resolve_type_non_struct_symbol_is_unchanged() {
        let root = Scope::root();
        let mut resolver = Resolver::new(&root);
        resolver.declare(Symbol::variable("v", Some(Type::int32())));
        let named = Type::named("v");
        let resolved = resolver.resolve_type(&named, loc()).unwrap();
        assert!(Rc::ptr_eq(&named, &resolved));
    }

    #[test]
    fn resolve_type_returns_canonical_struct() {
        let root = Scope::root();
        let mut resolver = Resolver::new(&root);
        let mut decls = vec![struct_decl("Point", &[("x", Type::int32())])];
        resolver.resolve(&mut decls).unwrap();

        let a = resolver.resolve_type(&Type::named("Point"), loc()).unwrap();
        let b = resolver.resolve_type(&Type::named("Point"), loc()).unwrap();
        assert!(Type::same_struct(&a, &b));

        let ptr = resolver.resolve_type(&Type::pointer(Type::named("Point")), loc()).unwrap();
        match &*ptr {
            Type::Pointer(pointee) => assert!(Type::same_struct(pointee, &a)),
            other => panic!("expected pointer, got {}", other),
        }
    }

    #[test]
    fn struct_fields_resolve_in_either_order() {
        let root = Scope::root();
        let mut resolver = Resolver::new(&root);
        let mut decls = vec![
            struct_decl("A", &[("b", Type::named("B"))]),
            struct_decl("B", &[("v", Type::int32())]),
        ];
        resolver.resolve(&mut decls).unwrap();

        let a = resolver.resolve_type(&Type::named("A"), loc()).unwrap();
        let b = resolver.resolve_type(&Type::named("B"), loc()).unwrap();
        let field = a.as_struct().unwrap().field_type("b").unwrap();
        assert!(Type::same_struct(&field, &b));
    }

    #[test]
    fn function_signature_keeps_written_types() {
        let root = Scope::root();
        let mut resolver = Resolver::new(&root);
        let mut decls = vec![
            struct_decl("P", &[]),
            Decl::new(
                DeclKind::Fn(FnDecl {
                    name: "make".to_string(),
                    params: vec![Param::new("seed", Type::named("P"))],
                    ret_ty: Type::named("P"),
                    body: None,
                    is_extern: true,
                }),
                loc(),
            ),
        ];
        resolver.resolve(&mut decls).unwrap();

        let sym = resolver.lookup("make").unwrap();
        match &**sym.ty().unwrap() {
            Type::Function { params, ret } => {
                assert!(params[0].is_named());
                assert!(ret.is_named());
            }
            other => panic!("expected function type, got {}", other),
        }

        // The declaration itself now carries resolved types.
        let DeclKind::Fn(f) = &decls[1].kind else { unreachable!() };
        assert!(f.ret_ty.as_struct().is_some());
        assert!(f.params[0].ty.as_struct().is_some());
        assert!(f.params[0].symbol.is_some());
    }

    #[test]
    fn pop_below_working_scope_is_internal() {
        let root = Scope::root();
        let mut resolver = Resolver::new(&root);
        let err = resolver.pop_scope().unwrap_err();
        assert!(err.is_internal());
        assert_eq!(resolver.depth(), 1);
    }
}
