//! Lexer for the Spade language.
//!
//! Converts source text into a flat stream of [`token::Token`]s. The lexer
//! classifies each non-whitespace byte: letters and underscores start an
//! identifier or keyword, digits start a number literal, `"` starts a string
//! literal, `//` starts a line comment, and punctuation bytes are matched
//! against a small set of one- and two-character operators.
//!
//! Malformed input never stops the lexer outright; it reports a diagnostic
//! through the supplied [`spadec_util::diagnostic::Handler`] and keeps
//! producing tokens so the parser still sees a complete (if partially
//! invalid) stream.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};

/// Lexes an entire source string into a vector of tokens, always terminated
/// by a single [`TokenKind::Eof`] token.
pub fn lex(source: &str, handler: &spadec_util::diagnostic::Handler) -> Vec<Token> {
    Lexer::new(source, handler).collect()
}
