//! The semantic analyzer: a single bottom-up walk that populates the
//! symbol table while computing and checking expression types.

use spadec_par::ast::{
    Assignment, BinOp, Expr, FunctionCall, FunctionDeclaration, Program, Stmt, TypeKind, UnOp,
    VariableDeclaration,
};
use spadec_util::diagnostic::{DiagnosticBuilder, DiagnosticCode, Handler};
use spadec_util::span::Span;

use crate::scope::{AddError, ScopeId, SymbolTables};

/// Walks a [`Program`], populating a [`SymbolTables`] and checking every
/// expression's type against the rules in [`Self::binary_result_type`].
pub struct SemanticAnalyzer<'a> {
    tables: SymbolTables,
    handler: &'a Handler,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Self {
            tables: SymbolTables::new(),
            handler,
        }
    }

    pub fn into_tables(self) -> SymbolTables {
        self.tables
    }

    pub fn tables(&self) -> &SymbolTables {
        &self.tables
    }

    /// Analyzes every statement in `program` against the global scope.
    pub fn analyze(&mut self, program: &Program) {
        let global = self.tables.global();
        for stmt in program {
            self.analyze_stmt(global, stmt);
        }
    }

    fn analyze_stmt(&mut self, scope: ScopeId, stmt: &Stmt) {
        match stmt {
            Stmt::VariableDeclaration(decl) => self.analyze_variable_declaration(scope, decl),
            Stmt::Assignment(assign) => self.analyze_assignment(scope, assign),
            Stmt::FunctionDeclaration(func) => self.analyze_function_declaration(scope, func),
        }
    }

    fn analyze_variable_declaration(&mut self, scope: ScopeId, decl: &VariableDeclaration) {
        if let Some(init) = &decl.init {
            if let Some(init_type) = self.expr_type(scope, init) {
                if init_type != decl.type_kind {
                    self.error(
                        format!(
                            "cannot initialize `{}` of type `{}` with a value of type `{}`",
                            decl.name,
                            decl.type_kind.name(),
                            init_type.name()
                        ),
                        DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                        decl.span,
                    );
                }
            }
        }

        match self.tables.add_variable(scope, &decl.name, decl.type_kind) {
            Ok(()) => {},
            Err(AddError::AlreadyDeclared) => self.error(
                format!("`{}` is already declared in this scope", decl.name),
                DiagnosticCode::E_SEMANTIC_REDECLARED,
                decl.span,
            ),
            Err(AddError::ScopeFull) => self.error(
                "scope has reached its 1024-symbol limit".to_string(),
                DiagnosticCode::E_SEMANTIC_SCOPE_FULL,
                decl.span,
            ),
        }
    }

    fn analyze_assignment(&mut self, scope: ScopeId, assign: &Assignment) {
        let declared = match self.tables.lookup(scope, &assign.name) {
            Some(info) => info.type_kind,
            None => {
                self.error(
                    format!("undefined variable `{}`", assign.name),
                    DiagnosticCode::E_SEMANTIC_UNDEFINED_VAR,
                    assign.span,
                );
                return;
            },
        };

        if let Some(value_type) = self.expr_type(scope, &assign.value) {
            if value_type != declared {
                self.error(
                    format!(
                        "cannot assign a value of type `{}` to `{}` of type `{}`",
                        value_type.name(),
                        assign.name,
                        declared.name()
                    ),
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    assign.span,
                );
            }
        }
    }

    fn analyze_function_declaration(&mut self, scope: ScopeId, func: &FunctionDeclaration) {
        match self
            .tables
            .add_function(scope, &func.name, func.return_type, &func.params)
        {
            Ok(inner_scope) => {
                for param in &func.params {
                    // Parameters are already registered by `add_function`;
                    // this just re-validates duplicate parameter names.
                    if self
                        .tables
                        .lookup(inner_scope, &param.name)
                        .map(|info| info.type_kind)
                        != Some(param.type_kind)
                    {
                        self.error(
                            format!("parameter `{}` has an inconsistent type", param.name),
                            DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                            func.span,
                        );
                    }
                }
            },
            Err(AddError::AlreadyDeclared) => self.error(
                format!("`{}` is already declared in this scope", func.name),
                DiagnosticCode::E_SEMANTIC_REDECLARED,
                func.span,
            ),
            Err(AddError::ScopeFull) => self.error(
                "scope has reached its 1024-symbol limit".to_string(),
                DiagnosticCode::E_SEMANTIC_SCOPE_FULL,
                func.span,
            ),
        }
    }

    /// Computes an expression's type, reporting and returning `None` on
    /// any error so callers don't cascade a diagnostic on top of another.
    fn expr_type(&mut self, scope: ScopeId, expr: &Expr) -> Option<TypeKind> {
        match expr {
            Expr::Number(_) => Some(TypeKind::Int),
            Expr::Boolean(_) => Some(TypeKind::Bool),
            Expr::StringLiteral(_) => Some(TypeKind::String),
            Expr::Null => {
                self.error(
                    "`null` cannot appear inside an expression".to_string(),
                    DiagnosticCode::E_SEMANTIC_NULL_IN_EXPR,
                    Span::DUMMY,
                );
                None
            },
            Expr::Identifier(name) => match self.tables.lookup(scope, name) {
                Some(info) => Some(info.type_kind),
                None => {
                    self.error(
                        format!("undefined variable `{}`", name),
                        DiagnosticCode::E_SEMANTIC_UNDEFINED_VAR,
                        Span::DUMMY,
                    );
                    None
                },
            },
            Expr::Unary(u) => {
                let operand = self.expr_type(scope, &u.operand);
                self.unary_result_type(u.op, operand, u.span)
            },
            Expr::Binary(b) => {
                let left = self.expr_type(scope, &b.left);
                let right = self.expr_type(scope, &b.right);
                self.binary_result_type(b.op, left, right, b.span)
            },
            Expr::FunctionCall(call) => self.function_call_type(scope, call),
        }
    }

    fn function_call_type(&mut self, scope: ScopeId, call: &FunctionCall) -> Option<TypeKind> {
        let mut arg_types = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            arg_types.push(self.expr_type(scope, arg)?);
        }

        match self.tables.lookup_function(scope, &call.callee, &arg_types) {
            Some(info) => Some(info.type_kind),
            None => {
                let exists_with_different_signature =
                    self.tables.lookup(scope, &call.callee).is_some();
                if exists_with_different_signature {
                    self.error(
                        format!(
                            "no overload of `{}` matches the given argument types",
                            call.callee
                        ),
                        DiagnosticCode::E_SEMANTIC_ARITY_MISMATCH,
                        call.span,
                    );
                } else {
                    self.error(
                        format!("undefined function `{}`", call.callee),
                        DiagnosticCode::E_SEMANTIC_UNDEFINED_FN,
                        call.span,
                    );
                }
                None
            },
        }
    }

    fn unary_result_type(
        &mut self,
        op: UnOp,
        operand: Option<TypeKind>,
        span: Span,
    ) -> Option<TypeKind> {
        let operand = operand?;
        match (op, operand) {
            (UnOp::Neg, TypeKind::Int) => Some(TypeKind::Int),
            (UnOp::Not, TypeKind::Bool) => Some(TypeKind::Bool),
            _ => {
                self.error(
                    format!("operator cannot be applied to a value of type `{}`", operand.name()),
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    span,
                );
                None
            },
        }
    }

    /// The binary operator type rules:
    ///
    /// | Operator class | Operand rule | Result |
    /// |---|---|---|
    /// | `+ - * / % **` | both `int` | `int` |
    /// | `+` | either operand `string` | `string` |
    /// | `< > <= >= == !=` | both operands same type | `bool` |
    /// | `&& \|\|` | both `bool` | `bool` |
    fn binary_result_type(
        &mut self,
        op: BinOp,
        left: Option<TypeKind>,
        right: Option<TypeKind>,
        span: Span,
    ) -> Option<TypeKind> {
        let (left, right) = (left?, right?);

        let result = match op {
            BinOp::Add if left == TypeKind::String || right == TypeKind::String => {
                Some(TypeKind::String)
            },
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::Pow
                if left == TypeKind::Int && right == TypeKind::Int =>
            {
                Some(TypeKind::Int)
            },
            BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge | BinOp::Eq | BinOp::Ne
                if left == right =>
            {
                Some(TypeKind::Bool)
            },
            BinOp::And | BinOp::Or if left == TypeKind::Bool && right == TypeKind::Bool => {
                Some(TypeKind::Bool)
            },
            _ => None,
        };

        if result.is_none() {
            self.error(
                format!(
                    "operator cannot be applied to operands of type `{}` and `{}`",
                    left.name(),
                    right.name()
                ),
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                span,
            );
        }
        result
    }

    fn error(&self, message: String, code: DiagnosticCode, span: Span) {
        DiagnosticBuilder::error(message)
            .code(code)
            .span(span)
            .emit(self.handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spadec_lex::lex;
    use spadec_par::Parser;

    fn analyze(source: &str) -> Handler {
        let lex_handler = Handler::new();
        let tokens = lex(source, &lex_handler);
        let mut parser = Parser::new(tokens, &lex_handler);
        let program = parser.parse_program();

        let sem_handler = Handler::new();
        let mut analyzer = SemanticAnalyzer::new(&sem_handler);
        analyzer.analyze(&program);
        sem_handler
    }

    #[test]
    fn accepts_well_typed_variable_declaration() {
        assert!(!analyze("int x = 1 + 2;").has_errors());
    }

    #[test]
    fn rejects_type_mismatched_initializer() {
        assert!(analyze("int x = true;").has_errors());
    }

    #[test]
    fn string_literal_initializes_a_string_variable() {
        assert!(!analyze("string s = \"hi\";").has_errors());
    }

    #[test]
    fn plus_concatenates_when_either_side_is_a_string() {
        assert!(!analyze("string s = \"hi\" + \"there\";").has_errors());
    }

    #[test]
    fn rejects_redeclaration_in_the_same_scope() {
        assert!(analyze("int x; int x;").has_errors());
    }

    #[test]
    fn rejects_undefined_variable_use() {
        assert!(analyze("x = 1;").has_errors());
    }

    #[test]
    fn rejects_arithmetic_between_bool_and_int() {
        assert!(analyze("int x = true + 1;").has_errors());
    }

    #[test]
    fn accepts_comparison_between_same_types() {
        assert!(!analyze("bool b = 1 < 2;").has_errors());
    }

    #[test]
    fn rejects_logical_and_on_non_bool_operands() {
        assert!(analyze("bool b = 1 && 2;").has_errors());
    }

    #[test]
    fn function_declaration_registers_parameters_in_its_own_scope() {
        assert!(!analyze("int task add(int a, int b) {};").has_errors());
    }

    #[test]
    fn null_used_in_an_expression_is_rejected() {
        assert!(analyze("int x = 1 + null;").has_errors());
    }
}
