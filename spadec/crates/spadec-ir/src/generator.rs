//! AST-to-IR lowering.
//!
//! Walks the parsed [`Program`] in post-order, consulting the symbol
//! table built by semantic analysis to disambiguate string concatenation
//! from numeric addition. Function declarations never emit anything —
//! their bodies are always empty — and a function call, which the
//! language has no invocation instructions for, lowers to a single
//! placeholder push so the expression still leaves exactly one value on
//! the stack for its consumer.

use spadec_par::ast::{BinOp, Expr, Program, Stmt, UnOp};
use spadec_sem::{ScopeId, SymbolTables};

use crate::builder::Builder;
use crate::instruction::{Instruction, IrProgram};

/// Generates IR for every statement in `program`, in order. The caller
/// (the driver) appends a final `HALT`.
pub fn generate(program: &Program, tables: &SymbolTables) -> IrProgram {
    let mut builder = Builder::new();
    let scope = tables.global();
    for stmt in program {
        generate_stmt(&mut builder, scope, stmt, tables);
    }
    builder.build()
}

fn generate_stmt(builder: &mut Builder, scope: ScopeId, stmt: &Stmt, tables: &SymbolTables) {
    match stmt {
        Stmt::VariableDeclaration(decl) => {
            if let Some(init) = &decl.init {
                generate_expr(builder, scope, init, tables);
                builder.emit(Instruction::StoreVar(decl.name.clone()));
            }
        },
        Stmt::Assignment(assign) => {
            if tables.lookup(scope, &assign.name).is_some() {
                generate_expr(builder, scope, &assign.value, tables);
                builder.emit(Instruction::StoreVar(assign.name.clone()));
            }
        },
        // Bodies are always empty; nothing to lower.
        Stmt::FunctionDeclaration(_) => {},
    }
}

fn generate_expr(builder: &mut Builder, scope: ScopeId, expr: &Expr, tables: &SymbolTables) {
    match expr {
        Expr::Number(n) => builder.emit(Instruction::PushConst(*n)),
        Expr::Boolean(b) => builder.emit(Instruction::PushConst(if *b { 1 } else { 0 })),
        Expr::StringLiteral(s) => builder.emit(Instruction::PushStringLit(s.clone())),
        Expr::Identifier(name) => builder.emit(Instruction::PushVar(name.clone())),
        Expr::Null => {
            // Forbidden from reaching IR generation by the semantic
            // analyzer (E_SEMANTIC_NULL_IN_EXPR); a well-typed program
            // never hands this case to the generator.
            log::debug!("generate_expr reached Expr::Null after a failed analysis");
        },
        Expr::Binary(bin) => {
            generate_expr(builder, scope, &bin.left, tables);
            generate_expr(builder, scope, &bin.right, tables);
            let opcode = match bin.op {
                BinOp::Add
                    if is_string_producing(&bin.left, scope, tables)
                        || is_string_producing(&bin.right, scope, tables) =>
                {
                    Instruction::Concat
                },
                BinOp::Add => Instruction::Add,
                BinOp::Sub => Instruction::Sub,
                BinOp::Mul => Instruction::Mul,
                BinOp::Div => Instruction::Div,
                BinOp::Mod => Instruction::Mod,
                BinOp::Pow => Instruction::Pow,
                BinOp::Eq => Instruction::Eq,
                BinOp::Ne => Instruction::Ne,
                BinOp::Lt => Instruction::Lt,
                BinOp::Gt => Instruction::Gt,
                BinOp::Le => Instruction::Le,
                BinOp::Ge => Instruction::Ge,
                BinOp::And => Instruction::And,
                BinOp::Or => Instruction::Or,
            };
            builder.emit(opcode);
        },
        Expr::Unary(un) => {
            generate_expr(builder, scope, &un.operand, tables);
            builder.emit(match un.op {
                UnOp::Neg => Instruction::Neg,
                UnOp::Not => Instruction::Not,
            });
        },
        Expr::FunctionCall(call) => {
            log::debug!("lowering call to `{}` as an unexecuted placeholder", call.callee);
            builder.emit(Instruction::PushConst(0));
        },
    }
}

/// Classifies `expr` as string-producing: a string literal, an
/// identifier bound to a `string` symbol, or a `+` whose left or right
/// operand classifies as string.
fn is_string_producing(expr: &Expr, scope: ScopeId, tables: &SymbolTables) -> bool {
    match expr {
        Expr::StringLiteral(_) => true,
        Expr::Identifier(name) => tables
            .lookup(scope, name)
            .map(|info| info.type_kind == spadec_par::ast::TypeKind::String)
            .unwrap_or(false),
        Expr::Binary(bin) if bin.op == BinOp::Add => {
            is_string_producing(&bin.left, scope, tables) || is_string_producing(&bin.right, scope, tables)
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spadec_lex::lex;
    use spadec_par::Parser;
    use spadec_util::diagnostic::Handler;

    fn generate_source(source: &str) -> IrProgram {
        let handler = Handler::new();
        let tokens = lex(source, &handler);
        let mut parser = Parser::new(tokens, &handler);
        let program = parser.parse_program();
        let tables = spadec_sem::analyze(&program, &handler);
        generate(&program, &tables)
    }

    #[test]
    fn number_declaration_emits_push_then_store() {
        let ir = generate_source("int x = 1;");
        assert_eq!(
            ir,
            vec![Instruction::PushConst(1), Instruction::StoreVar("x".to_string())]
        );
    }

    #[test]
    fn addition_of_two_ints_emits_add() {
        let ir = generate_source("int x = 1 + 2;");
        assert!(ir.contains(&Instruction::Add));
        assert!(!ir.contains(&Instruction::Concat));
    }

    #[test]
    fn addition_involving_a_string_emits_concat() {
        let ir = generate_source("string s = \"a\" + \"b\";");
        assert!(ir.contains(&Instruction::Concat));
        assert!(!ir.contains(&Instruction::Add));
    }

    #[test]
    fn addition_of_string_variable_and_literal_emits_concat() {
        let ir = generate_source("string s = \"hi\";\nstring t = s + \" there\";");
        assert!(ir.contains(&Instruction::Concat));
    }

    #[test]
    fn assignment_to_existing_variable_emits_store() {
        let ir = generate_source("int x = 1;\nx = 2;");
        assert_eq!(
            ir.iter().filter(|i| matches!(i, Instruction::StoreVar(n) if n == "x")).count(),
            2
        );
    }

    #[test]
    fn right_associative_power_emits_operands_then_pow_innermost_first() {
        let ir = generate_source("int x = 2 ** 3 ** 2;");
        assert_eq!(
            ir,
            vec![
                Instruction::PushConst(2),
                Instruction::PushConst(3),
                Instruction::PushConst(2),
                Instruction::Pow,
                Instruction::Pow,
                Instruction::StoreVar("x".to_string()),
            ]
        );
    }

    #[test]
    fn function_declaration_emits_nothing() {
        let ir = generate_source("void task noop() {};");
        assert!(ir.is_empty());
    }
}
