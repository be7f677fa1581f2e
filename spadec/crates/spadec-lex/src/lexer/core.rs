//! Core lexer implementation: the `Lexer` struct and its per-token dispatch.

use spadec_util::diagnostic::{DiagnosticBuilder, Handler};
use spadec_util::span::Span;

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Lexer for the Spade language.
///
/// Transforms source text into a stream of [`Token`]s, skipping whitespace
/// and line comments along the way. Errors (an unopenable character, an
/// unterminated string) are reported through the [`Handler`] rather than
/// aborting the scan; the lexer always keeps producing tokens.
pub struct Lexer<'a> {
    pub cursor: Cursor<'a>,
    pub handler: &'a Handler,
    pub token_start: usize,
    token_start_line: u32,
    token_start_column: u32,
    emitted_eof: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
            emitted_eof: false,
        }
    }

    /// Returns the next token, or a `TokenKind::Eof` token once the source
    /// is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Token::eof(self.current_span());
        }

        match self.cursor.current_char() {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),
            '+' => self.lex_plus(),
            '-' => self.lex_minus(),
            '*' => self.lex_star(),
            '/' => self.lex_slash(),
            '%' => self.single(TokenKind::Percent),
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '&' => self.lex_ampersand(),
            '|' => self.lex_pipe(),
            '"' => self.lex_string(),
            c if c.is_ascii_alphabetic() || c == '_' => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            c => {
                self.report_error(format!("unexpected character '{}'", c));
                self.cursor.advance();
                self.make_token(TokenKind::Unknown)
            },
        }
    }

    /// Consumes the current character and emits a single-character token.
    fn single(&mut self, kind: TokenKind) -> Token {
        self.cursor.advance();
        self.make_token(kind)
    }

    /// Builds a token of `kind` whose lexeme is the text consumed since
    /// `token_start`, spanning from `token_start` to the cursor's current
    /// position.
    pub fn make_token(&self, kind: TokenKind) -> Token {
        let lexeme = self.cursor.slice_from(self.token_start);
        Token::new(kind, lexeme, self.current_span())
    }

    pub(crate) fn current_span(&self) -> Span {
        Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        )
    }

    /// Reports a lexical error at the current token's span.
    pub fn report_error(&mut self, message: String) {
        DiagnosticBuilder::error(message)
            .span(self.current_span())
            .emit(self.handler);
    }

    /// Reports a lexical error at the current token's span, tagged with a
    /// specific diagnostic code.
    pub fn report_error_with_code(
        &mut self,
        message: String,
        code: spadec_util::diagnostic::DiagnosticCode,
    ) {
        DiagnosticBuilder::error(message)
            .code(code)
            .span(self.current_span())
            .emit(self.handler);
    }

    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    pub fn column(&self) -> u32 {
        self.cursor.column()
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted_eof {
            return None;
        }
        let token = self.next_token();
        if token.kind.is_eof() {
            self.emitted_eof = true;
        }
        Some(token)
    }
}
