//! Operator and punctuation lexing.
//!
//! Each method here consumes the leading character, then attempts a
//! one-byte lookahead against the two-character operator set
//! `{==, !=, <=, >=, &&, ||, ->, **}` before falling back to the
//! single-character operator. Characters that don't complete a known
//! two-character operator are left for the next token.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// `+` only; Spade has no `+=`.
    pub fn lex_plus(&mut self) -> Token {
        self.cursor.advance();
        self.make_token(TokenKind::Plus)
    }

    /// `-` or `->`.
    pub fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('>') {
            self.make_token(TokenKind::Arrow)
        } else {
            self.make_token(TokenKind::Minus)
        }
    }

    /// `*` or `**`.
    pub fn lex_star(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('*') {
            self.make_token(TokenKind::StarStar)
        } else {
            self.make_token(TokenKind::Star)
        }
    }

    /// `/`. Line comments are consumed by `skip_whitespace_and_comments`
    /// before dispatch ever reaches this method, so a lone `/` here is
    /// always the division operator.
    pub fn lex_slash(&mut self) -> Token {
        self.cursor.advance();
        self.make_token(TokenKind::Slash)
    }

    /// `=` or `==`.
    pub fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.make_token(TokenKind::EqEq)
        } else {
            self.make_token(TokenKind::Assign)
        }
    }

    /// `!` or `!=`.
    pub fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.make_token(TokenKind::NotEq)
        } else {
            self.make_token(TokenKind::Bang)
        }
    }

    /// `<` or `<=`.
    pub fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.make_token(TokenKind::LtEq)
        } else {
            self.make_token(TokenKind::Lt)
        }
    }

    /// `>` or `>=`.
    pub fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.make_token(TokenKind::GtEq)
        } else {
            self.make_token(TokenKind::Gt)
        }
    }

    /// `&&` only; a lone `&` is not an operator in Spade.
    pub fn lex_ampersand(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('&') {
            self.make_token(TokenKind::AndAnd)
        } else {
            self.report_error("unexpected character '&'".to_string());
            self.make_token(TokenKind::Unknown)
        }
    }

    /// `||` only; a lone `|` is not an operator in Spade.
    pub fn lex_pipe(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('|') {
            self.make_token(TokenKind::OrOr)
        } else {
            self.report_error("unexpected character '|'".to_string());
            self.make_token(TokenKind::Unknown)
        }
    }
}
