// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Human-readable summary of a resolved program.
//!
//! Lists struct layouts, function signatures and every local binding with
//! the type the resolver gave it.

use tuz_ast::decl::{DeclKind, FnDecl, GlobalDecl, StructDecl};
use tuz_ast::stmt::{Stmt, StmtKind};
use tuz_ast::{Location, SymbolRef, TypeRef};

use crate::output;

pub fn render(program: &tuz_ast::Program) -> String {
    let mut out = String::new();
    for decl in &program.declarations {
        match &decl.kind {
            DeclKind::Struct(s) => render_struct(&mut out, s),
            DeclKind::Fn(f) => render_fn(&mut out, f),
            DeclKind::Global(g) => render_global(&mut out, g),
        }
    }
    out
}

fn render_struct(out: &mut String, s: &StructDecl) {
    out.push_str(&format!("{} {} {{\n", output::keyword("struct"), s.name));
    for field in &s.fields {
        out.push_str(&format!("    {}: {}\n", field.name, ty_str(&field.ty)));
    }
    out.push_str("}\n");
}

fn render_fn(out: &mut String, f: &FnDecl) {
    let params: Vec<String> = f
        .params
        .iter()
        .map(|p| format!("{}: {}", p.name, ty_str(&p.ty)))
        .collect();

    if f.is_extern {
        out.push_str(&format!("{} ", output::keyword("extern")));
    }
    out.push_str(&format!(
        "{} {}({}) -> {}\n",
        output::keyword("fn"),
        f.name,
        params.join(", "),
        ty_str(&f.ret_ty)
    ));

    if let Some(body) = &f.body {
        render_bindings(out, body, 1);
    }
}

fn render_global(out: &mut String, g: &GlobalDecl) {
    out.push_str(&format!(
        "{} {}: {}\n",
        output::keyword("global"),
        g.name,
        ty_str(&g.ty)
    ));
}

fn render_bindings(out: &mut String, stmt: &Stmt, depth: usize) {
    match &stmt.kind {
        StmtKind::Let { symbol, .. } => binding_line(out, "let", symbol.as_ref(), stmt.loc, depth),
        StmtKind::Block(stmts) => {
            for s in stmts {
                render_bindings(out, s, depth);
            }
        }
        StmtKind::If { then_branch, else_branch, .. } => {
            render_bindings(out, then_branch, depth + 1);
            if let Some(else_branch) = else_branch {
                render_bindings(out, else_branch, depth + 1);
            }
        }
        StmtKind::While { body, .. } => render_bindings(out, body, depth + 1),
        StmtKind::For { symbol, body, .. } => {
            binding_line(out, "for", symbol.as_ref(), stmt.loc, depth);
            render_bindings(out, body, depth + 1);
        }
        StmtKind::Expr(_) | StmtKind::Assign { .. } | StmtKind::Return(_) => {}
    }
}

fn binding_line(out: &mut String, kw: &str, symbol: Option<&SymbolRef>, loc: Location, depth: usize) {
    // Unresolved bindings only appear if resolution was skipped.
    let Some(symbol) = symbol else { return };
    let ty = symbol.ty().map(ty_str).unwrap_or_else(|| "?".to_string());
    out.push_str(&format!(
        "{}{} {}: {}  {}\n",
        "    ".repeat(depth),
        output::keyword(kw),
        symbol.name,
        ty,
        output::dimmed(&format!("({})", loc))
    ));
}

fn ty_str(ty: &TypeRef) -> String {
    output::type_name(&ty.to_string()).to_string()
}
