//! `--emit tokens` and `--emit ast` rendering. The IR, symbol table and VM
//! state printers live with the crates that own that data
//! (`spadec_ir::print_ir`, `SymbolTables::dump`, `spadec_vm::print_vm_state`).

use spadec_lex::Token;
use spadec_par::{Expr, Program, Stmt};
use std::fmt::Write as _;

/// One `KIND lexeme` line per token.
pub fn print_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(out, "{} {:?}", token.kind, token.lexeme);
    }
    out
}

/// An indented tree, one node per line.
pub fn print_program(program: &Program) -> String {
    let mut out = String::new();
    for stmt in program {
        print_stmt(stmt, 0, &mut out);
    }
    out
}

fn print_stmt(stmt: &Stmt, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match stmt {
        Stmt::VariableDeclaration(decl) => {
            let _ = writeln!(out, "{indent}VariableDeclaration {} {}", decl.type_kind.name(), decl.name);
            if let Some(init) = &decl.init {
                print_expr(init, depth + 1, out);
            }
        },
        Stmt::Assignment(assign) => {
            let _ = writeln!(out, "{indent}Assignment {}", assign.name);
            print_expr(&assign.value, depth + 1, out);
        },
        Stmt::FunctionDeclaration(func) => {
            let _ = writeln!(
                out,
                "{indent}FunctionDeclaration {} {} ({} params)",
                func.return_type.name(),
                func.name,
                func.params.len()
            );
            for param in &func.params {
                let _ = writeln!(out, "{indent}  Parameter {} {}", param.type_kind.name(), param.name);
            }
        },
    }
}

fn print_expr(expr: &Expr, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match expr {
        Expr::Number(n) => {
            let _ = writeln!(out, "{indent}Number {n}");
        },
        Expr::Boolean(b) => {
            let _ = writeln!(out, "{indent}Boolean {b}");
        },
        Expr::StringLiteral(s) => {
            let _ = writeln!(out, "{indent}StringLiteral {s:?}");
        },
        Expr::Identifier(name) => {
            let _ = writeln!(out, "{indent}Identifier {name}");
        },
        Expr::Null => {
            let _ = writeln!(out, "{indent}Null");
        },
        Expr::Binary(bin) => {
            let _ = writeln!(out, "{indent}BinaryOperation {:?}", bin.op);
            print_expr(&bin.left, depth + 1, out);
            print_expr(&bin.right, depth + 1, out);
        },
        Expr::Unary(un) => {
            let _ = writeln!(out, "{indent}UnaryOperation {:?}", un.op);
            print_expr(&un.operand, depth + 1, out);
        },
        Expr::FunctionCall(call) => {
            let _ = writeln!(out, "{indent}FunctionCall {}", call.callee);
            for arg in &call.args {
                print_expr(arg, depth + 1, out);
            }
        },
    }
}
