//! Recursive-descent parser for the Spade language.
//!
//! Converts a token stream from `spadec_lex` into a [`ast::Program`]: an
//! ordered sequence of statements. `statement` dispatches on a lookahead of
//! one or two tokens (see [`Parser::parse_statement`]); expressions are
//! parsed by a ladder of one function per precedence level in `expr`.
//!
//! On any unexpected token the parser emits a diagnostic and returns
//! `None`, never a partially built node — callers that get `None` back
//! should assume nothing was allocated worth tearing down, since failed
//! productions never link a partial child into their parent.

pub mod ast;
mod expr;
mod stmt;

pub use ast::{BinOp, Expr, Program, Stmt, TypeKind, UnOp};

use spadec_lex::{Token, TokenKind};
use spadec_util::diagnostic::{DiagnosticBuilder, DiagnosticCode, Handler};
use spadec_util::span::Span;

/// Recursive-descent parser over a finished token stream.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, handler: &'a Handler) -> Self {
        Self {
            tokens,
            position: 0,
            handler,
        }
    }

    /// Parses the whole token stream into a [`Program`].
    ///
    /// Stops at the first statement that fails to parse; the caller should
    /// check `handler.has_errors()` to tell a clean empty program from a
    /// partial one cut short by a diagnostic.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while !self.at_eof() {
            match self.parse_statement() {
                Some(stmt) => statements.push(stmt),
                None => break,
            }
        }
        statements
    }

    // -- token stream helpers -------------------------------------------

    fn current(&self) -> &Token {
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn current_span(&self) -> Span {
        self.current().span
    }

    fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.position + offset)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn at_eof(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Consumes and returns the current token.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    /// Consumes the current token if it matches `kind`, reporting a
    /// diagnostic and returning `None` otherwise.
    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.current_kind() == kind {
            Some(self.advance())
        } else {
            self.error(format!(
                "expected {}, found {}",
                kind,
                self.current_kind()
            ));
            None
        }
    }

    fn error(&mut self, message: String) {
        DiagnosticBuilder::error(message)
            .code(DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN)
            .span(self.current_span())
            .emit(self.handler);
    }

    fn type_kind_from_current(&self) -> Option<TypeKind> {
        match self.current_kind() {
            TokenKind::Int => Some(TypeKind::Int),
            TokenKind::Long => Some(TypeKind::Long),
            TokenKind::Float => Some(TypeKind::Float),
            TokenKind::Double => Some(TypeKind::Double),
            TokenKind::KwString => Some(TypeKind::String),
            TokenKind::Bool => Some(TypeKind::Bool),
            TokenKind::Void => Some(TypeKind::Void),
            _ => None,
        }
    }
}
