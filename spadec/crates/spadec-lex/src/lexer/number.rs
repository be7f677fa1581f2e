//! Number literal lexing.
//!
//! Spade integer literals are decimal digit runs only: no hex, octal, or
//! binary prefixes, and no decimal point or exponent despite `float` and
//! `double` existing as type keywords. The lexeme is kept as the original
//! digit text; the parser is responsible for turning it into a value.

use spadec_util::diagnostic::DiagnosticCode;

use crate::token::TokenKind;
use crate::Lexer;
use crate::Token;

impl<'a> Lexer<'a> {
    /// Consumes a maximal run of decimal digits.
    ///
    /// A run that doesn't fit in a 32-bit signed integer is still emitted
    /// as a `Number` token (so the parser sees a complete stream) but is
    /// reported as an `E_LEXER_INVALID_NUMBER` diagnostic.
    pub fn lex_number(&mut self) -> Token {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        if text.parse::<i32>().is_err() {
            self.report_error_with_code(
                format!("integer literal '{}' does not fit in 32 bits", text),
                DiagnosticCode::E_LEXER_INVALID_NUMBER,
            );
        }

        self.make_token(TokenKind::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spadec_util::diagnostic::Handler;

    fn lex_num(source: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &handler);
        lexer.lex_number()
    }

    #[test]
    fn test_decimal_integer() {
        let token = lex_num("42");
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(token.lexeme, "42");
    }

    #[test]
    fn test_zero() {
        assert_eq!(lex_num("0").lexeme, "0");
    }

    #[test]
    fn test_multi_digit_run() {
        assert_eq!(lex_num("123456").lexeme, "123456");
    }

    #[test]
    fn test_overflowing_literal_reports_error_but_still_emits_token() {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new("99999999999", &handler);
        let token = lexer.lex_number();
        assert_eq!(token.kind, TokenKind::Number);
        assert!(handler.has_errors());
    }
}
