// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Tree builders for resolver tests. Every node is placed on its own line
//! so error locations can be checked.

#![allow(dead_code)]

use std::cell::Cell;

use tuz_ast::decl::{Decl, DeclKind, Field, FnDecl, GlobalDecl, Param, StructDecl};
use tuz_ast::expr::{BinOp, Expr, ExprKind, UnaryOp};
use tuz_ast::stmt::{Stmt, StmtKind};
use tuz_ast::{Location, Program, TypeRef};

thread_local! {
    static LINE: Cell<u32> = const { Cell::new(0) };
}

fn next_loc() -> Location {
    LINE.with(|l| {
        l.set(l.get() + 1);
        Location::new(l.get(), 1)
    })
}

// === Expressions ===

pub fn int(v: i64) -> Expr {
    Expr::new(ExprKind::Int(v), next_loc())
}

pub fn float(v: f64) -> Expr {
    Expr::new(ExprKind::Float(v), next_loc())
}

pub fn boolean(v: bool) -> Expr {
    Expr::new(ExprKind::Bool(v), next_loc())
}

pub fn string(s: &str) -> Expr {
    Expr::new(ExprKind::String(s.to_string()), next_loc())
}

pub fn var(name: &str) -> Expr {
    Expr::new(
        ExprKind::Variable {
            name: name.to_string(),
            symbol: None,
        },
        next_loc(),
    )
}

pub fn add(left: Expr, right: Expr) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op: BinOp::Add,
            left: Box::new(left),
            right: Box::new(right),
        },
        next_loc(),
    )
}

pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        next_loc(),
    )
}

pub fn call(callee: &str, args: Vec<Expr>) -> Expr {
    Expr::new(
        ExprKind::Call {
            callee: Box::new(var(callee)),
            args,
        },
        next_loc(),
    )
}

pub fn index(object: Expr, idx: Expr) -> Expr {
    Expr::new(
        ExprKind::Index {
            object: Box::new(object),
            index: Box::new(idx),
        },
        next_loc(),
    )
}

pub fn field(object: Expr, name: &str) -> Expr {
    Expr::new(
        ExprKind::Field {
            object: Box::new(object),
            field: name.to_string(),
        },
        next_loc(),
    )
}

pub fn cast(target: TypeRef, expr: Expr) -> Expr {
    Expr::new(
        ExprKind::Cast {
            target,
            expr: Box::new(expr),
        },
        next_loc(),
    )
}

// === Statements ===

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::new(StmtKind::Expr(expr), next_loc())
}

pub fn let_(name: &str, ty: Option<TypeRef>, init: Expr) -> Stmt {
    Stmt::new(
        StmtKind::Let {
            name: name.to_string(),
            ty,
            init: Some(init),
            mutable: false,
            symbol: None,
        },
        next_loc(),
    )
}

pub fn assign(target: Expr, value: Expr) -> Stmt {
    Stmt::new(StmtKind::Assign { target, value }, next_loc())
}

pub fn block(stmts: Vec<Stmt>) -> Stmt {
    Stmt::new(StmtKind::Block(stmts), next_loc())
}

pub fn if_(cond: Expr, then_branch: Vec<Stmt>, else_branch: Option<Vec<Stmt>>) -> Stmt {
    Stmt::new(
        StmtKind::If {
            cond,
            then_branch: Box::new(block(then_branch)),
            else_branch: else_branch.map(|b| Box::new(block(b))),
        },
        next_loc(),
    )
}

pub fn while_(cond: Expr, body: Vec<Stmt>) -> Stmt {
    Stmt::new(
        StmtKind::While {
            cond,
            body: Box::new(block(body)),
        },
        next_loc(),
    )
}

pub fn for_(var: &str, start: Expr, end: Expr, body: Vec<Stmt>) -> Stmt {
    Stmt::new(
        StmtKind::For {
            var: var.to_string(),
            start,
            end,
            body: Box::new(block(body)),
            symbol: None,
        },
        next_loc(),
    )
}

pub fn ret(value: Option<Expr>) -> Stmt {
    Stmt::new(StmtKind::Return(value), next_loc())
}

// === Declarations ===

pub fn func(name: &str, params: Vec<(&str, TypeRef)>, ret_ty: TypeRef, body: Vec<Stmt>) -> Decl {
    Decl::new(
        DeclKind::Fn(FnDecl {
            name: name.to_string(),
            params: params.into_iter().map(|(n, t)| Param::new(n, t)).collect(),
            ret_ty,
            body: Some(block(body)),
            is_extern: false,
        }),
        next_loc(),
    )
}

pub fn extern_fn(name: &str, params: Vec<(&str, TypeRef)>, ret_ty: TypeRef) -> Decl {
    Decl::new(
        DeclKind::Fn(FnDecl {
            name: name.to_string(),
            params: params.into_iter().map(|(n, t)| Param::new(n, t)).collect(),
            ret_ty,
            body: None,
            is_extern: true,
        }),
        next_loc(),
    )
}

pub fn structure(name: &str, fields: Vec<(&str, TypeRef)>) -> Decl {
    Decl::new(
        DeclKind::Struct(StructDecl {
            name: name.to_string(),
            fields: fields
                .into_iter()
                .map(|(n, ty)| Field { name: n.to_string(), ty })
                .collect(),
        }),
        next_loc(),
    )
}

pub fn global(name: &str, ty: TypeRef, init: Option<Expr>) -> Decl {
    Decl::new(
        DeclKind::Global(GlobalDecl {
            name: name.to_string(),
            ty,
            init,
            mutable: false,
        }),
        next_loc(),
    )
}

pub fn program(decls: Vec<Decl>) -> Program {
    Program::new(decls)
}

// === Inspection ===

/// Statements of the body block of the function declared at `idx`.
pub fn body(program: &Program, idx: usize) -> &[Stmt] {
    let DeclKind::Fn(f) = &program.declarations[idx].kind else {
        panic!("declaration {} is not a function", idx);
    };
    match f.body.as_ref().map(|b| &b.kind) {
        Some(StmtKind::Block(stmts)) => stmts,
        other => panic!("function body is not a block: {:?}", other),
    }
}

/// Initializer of a `let` statement.
pub fn let_init(stmt: &Stmt) -> &Expr {
    match &stmt.kind {
        StmtKind::Let { init: Some(init), .. } => init,
        other => panic!("expected let with initializer, got {:?}", other),
    }
}

pub fn let_symbol(stmt: &Stmt) -> &tuz_ast::SymbolRef {
    match &stmt.kind {
        StmtKind::Let { symbol: Some(sym), .. } => sym,
        other => panic!("expected resolved let, got {:?}", other),
    }
}

pub fn inner_block(stmt: &Stmt) -> &[Stmt] {
    match &stmt.kind {
        StmtKind::Block(stmts) => stmts,
        other => panic!("expected block, got {:?}", other),
    }
}
