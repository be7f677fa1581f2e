//! Statement-level parsing: variable declarations, function declarations,
//! and assignments.

use spadec_lex::TokenKind;

use crate::ast::{Assignment, FunctionDeclaration, Parameter, Stmt, VariableDeclaration};
use crate::Parser;

impl<'a> Parser<'a> {
    /// Dispatches on a one- or two-token lookahead: a leading type keyword
    /// routes to a function or variable declaration depending on whether
    /// `task` follows the type; a leading identifier routes to an
    /// assignment.
    pub fn parse_statement(&mut self) -> Option<Stmt> {
        if self.type_kind_from_current().is_some() {
            if self.peek_kind(1) == TokenKind::Task {
                self.parse_function_declaration()
            } else {
                self.parse_variable_declaration()
            }
        } else if self.current_kind() == TokenKind::Identifier {
            self.parse_assignment()
        } else {
            self.error(format!("expected a statement, found {}", self.current_kind()));
            None
        }
    }

    /// `variable_decl := type IDENT ('=' expression)? ';'`
    fn parse_variable_declaration(&mut self) -> Option<Stmt> {
        let start = self.current_span();
        let type_kind = self.type_kind_from_current()?;
        self.advance();

        let name_token = self.expect(TokenKind::Identifier)?;
        let name = name_token.lexeme;

        let init = if self.current_kind() == TokenKind::Assign {
            self.advance();
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect(TokenKind::Semicolon)?;

        Some(Stmt::VariableDeclaration(VariableDeclaration {
            type_kind,
            name,
            init,
            span: start,
        }))
    }

    /// `function_decl := type 'task' IDENT '(' parameter_list? ')' '{' '}' ';'`
    ///
    /// The body is currently required to be empty — Spade functions are
    /// declared, not yet defined with a body.
    fn parse_function_declaration(&mut self) -> Option<Stmt> {
        let start = self.current_span();
        let return_type = self.type_kind_from_current()?;
        self.advance();
        self.expect(TokenKind::Task)?;

        let name_token = self.expect(TokenKind::Identifier)?;
        let name = name_token.lexeme;

        self.expect(TokenKind::LParen)?;
        let params = if self.current_kind() == TokenKind::RParen {
            Vec::new()
        } else {
            self.parse_parameter_list()?
        };
        self.expect(TokenKind::RParen)?;

        self.expect(TokenKind::LBrace)?;
        self.expect(TokenKind::RBrace)?;
        self.expect(TokenKind::Semicolon)?;

        Some(Stmt::FunctionDeclaration(FunctionDeclaration {
            return_type,
            name,
            params,
            span: start,
        }))
    }

    /// `parameter_list := type IDENT (',' type IDENT)*`
    fn parse_parameter_list(&mut self) -> Option<Vec<Parameter>> {
        let mut params = Vec::new();

        loop {
            let type_kind = self.type_kind_from_current().or_else(|| {
                self.error(format!(
                    "expected a parameter type, found {}",
                    self.current_kind()
                ));
                None
            })?;
            self.advance();
            let name = self.expect(TokenKind::Identifier)?.lexeme;
            params.push(Parameter { type_kind, name });

            if self.current_kind() == TokenKind::Comma {
                self.advance();
            } else {
                break;
            }
        }

        Some(params)
    }

    /// `assignment := IDENT '=' expression ';'`
    fn parse_assignment(&mut self) -> Option<Stmt> {
        let start = self.current_span();
        let name = self.expect(TokenKind::Identifier)?.lexeme;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;

        Some(Stmt::Assignment(Assignment {
            name,
            value,
            span: start,
        }))
    }
}

#[cfg(test)]
mod tests {
    use spadec_util::diagnostic::Handler;

    use crate::ast::{Stmt, TypeKind};
    use crate::Parser;

    fn parse(source: &str) -> (Vec<Stmt>, Handler) {
        let handler = Handler::new();
        let tokens = spadec_lex::lex(source, &handler);
        let program = Parser::new(tokens, &handler).parse_program();
        (program, handler)
    }

    #[test]
    fn parses_variable_declaration_without_initializer() {
        let (program, handler) = parse("int x;");
        assert!(!handler.has_errors());
        match &program[0] {
            Stmt::VariableDeclaration(decl) => {
                assert_eq!(decl.type_kind, TypeKind::Int);
                assert_eq!(decl.name, "x");
                assert!(decl.init.is_none());
            },
            other => panic!("expected variable declaration, got {:?}", other),
        }
    }

    #[test]
    fn parses_variable_declaration_with_initializer() {
        let (program, handler) = parse("int x = 1 + 2;");
        assert!(!handler.has_errors());
        assert!(matches!(&program[0], Stmt::VariableDeclaration(d) if d.init.is_some()));
    }

    #[test]
    fn parses_assignment() {
        let (program, handler) = parse("x = 5;");
        assert!(!handler.has_errors());
        match &program[0] {
            Stmt::Assignment(a) => assert_eq!(a.name, "x"),
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn parses_empty_function_declaration() {
        let (program, handler) = parse("int task add(int a, int b) {};");
        assert!(!handler.has_errors());
        match &program[0] {
            Stmt::FunctionDeclaration(f) => {
                assert_eq!(f.name, "add");
                assert_eq!(f.params.len(), 2);
            },
            other => panic!("expected function declaration, got {:?}", other),
        }
    }

    #[test]
    fn parses_function_declaration_with_no_parameters() {
        let (program, handler) = parse("void task noop() {};");
        assert!(!handler.has_errors());
        assert!(matches!(&program[0], Stmt::FunctionDeclaration(f) if f.params.is_empty()));
    }
}
