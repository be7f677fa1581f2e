//! Identifier and keyword lexing.

use crate::token::TokenKind;
use crate::Lexer;
use crate::Token;

impl<'a> Lexer<'a> {
    /// Consumes the maximal `[A-Za-z0-9_]*` run and resolves it against the
    /// keyword table, falling back to a plain identifier.
    pub fn lex_identifier(&mut self) -> Token {
        while {
            let c = self.cursor.current_char();
            c.is_ascii_alphanumeric() || c == '_'
        } {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        let kind = TokenKind::keyword_from_str(text).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spadec_util::diagnostic::Handler;

    fn lex_ident(source: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &handler);
        lexer.lex_identifier()
    }

    #[test]
    fn test_simple_identifier() {
        let token = lex_ident("foo");
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.lexeme, "foo");
    }

    #[test]
    fn test_identifier_with_digits_and_underscore() {
        let token = lex_ident("foo_bar_123");
        assert_eq!(token.kind, TokenKind::Identifier);
    }

    #[test]
    fn test_type_keywords() {
        assert_eq!(lex_ident("int").kind, TokenKind::Int);
        assert_eq!(lex_ident("string").kind, TokenKind::KwString);
        assert_eq!(lex_ident("void").kind, TokenKind::Void);
    }

    #[test]
    fn test_control_keywords() {
        assert_eq!(lex_ident("if").kind, TokenKind::If);
        assert_eq!(lex_ident("else").kind, TokenKind::Else);
        assert_eq!(lex_ident("while").kind, TokenKind::While);
        assert_eq!(lex_ident("for").kind, TokenKind::For);
        assert_eq!(lex_ident("return").kind, TokenKind::Return);
        assert_eq!(lex_ident("task").kind, TokenKind::Task);
    }

    #[test]
    fn test_literal_keywords() {
        assert_eq!(lex_ident("true").kind, TokenKind::True);
        assert_eq!(lex_ident("false").kind, TokenKind::False);
        assert_eq!(lex_ident("null").kind, TokenKind::Null);
    }

    #[test]
    fn test_word_operator_aliases() {
        assert_eq!(lex_ident("and").kind, TokenKind::AndAnd);
        assert_eq!(lex_ident("or").kind, TokenKind::OrOr);
    }
}
