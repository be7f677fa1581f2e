//! Lexer implementation, split into small focused components:
//! - `core` - the `Lexer` struct and per-token dispatch
//! - `identifier` - identifier and keyword scanning
//! - `number` - integer literal scanning
//! - `string` - string literal scanning
//! - `operator` - operator and punctuation scanning
//! - `comment` - whitespace and line comment skipping

mod comment;
mod core;
mod identifier;
mod number;
mod operator;
mod string;

pub use core::Lexer;
