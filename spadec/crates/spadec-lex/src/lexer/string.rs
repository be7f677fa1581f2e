//! String literal lexing.
//!
//! Spade string literals have no escape sequences: the lexer consumes every
//! byte up to the matching closing `"` verbatim.

use spadec_util::diagnostic::DiagnosticCode;

use crate::token::TokenKind;
use crate::Lexer;
use crate::Token;

impl<'a> Lexer<'a> {
    /// Consumes a string literal starting at the opening `"`.
    pub fn lex_string(&mut self) -> Token {
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                self.report_error_with_code(
                    "unterminated string literal".to_string(),
                    DiagnosticCode::E_LEXER_UNTERMINATED_STRING,
                );
                break;
            }

            if self.cursor.current_char() == '"' {
                self.cursor.advance();
                break;
            }

            self.cursor.advance();
        }

        self.make_token(TokenKind::StringLiteral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spadec_util::diagnostic::Handler;

    fn lex_str(source: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &handler);
        lexer.lex_string()
    }

    #[test]
    fn test_simple_string() {
        let token = lex_str("\"hello\"");
        assert_eq!(token.kind, TokenKind::StringLiteral);
        assert_eq!(token.lexeme, "\"hello\"");
    }

    #[test]
    fn test_string_has_no_escape_processing() {
        let token = lex_str("\"hello\\nworld\"");
        assert_eq!(token.lexeme, "\"hello\\nworld\"");
    }

    #[test]
    fn test_unterminated_string_reports_error() {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new("\"hello", &handler);
        let token = lexer.lex_string();
        assert_eq!(token.kind, TokenKind::StringLiteral);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_empty_string() {
        let token = lex_str("\"\"");
        assert_eq!(token.lexeme, "\"\"");
    }
}
