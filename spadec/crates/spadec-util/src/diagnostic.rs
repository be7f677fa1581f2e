//! Diagnostic types for reporting lexer, parser, semantic, and VM errors.
//!
//! A [`Diagnostic`] carries a severity [`Level`], a message, a [`Span`]
//! pointing at the offending source text, and an optional [`DiagnosticCode`].
//! [`DiagnosticBuilder`] gives a fluent way to attach notes and help text
//! before handing the diagnostic to a [`Handler`], which collects everything
//! reported during one compilation and answers "did this fail".
//!
//! # Examples
//!
//! ```
//! use spadec_util::diagnostic::{Handler, DiagnosticBuilder, DiagnosticCode};
//! use spadec_util::span::Span;
//!
//! let handler = Handler::new();
//! DiagnosticBuilder::error("undefined variable `x`")
//!     .code(DiagnosticCode::E_SEMANTIC_UNDEFINED_VAR)
//!     .span(Span::DUMMY)
//!     .help("did you mean to declare it first?")
//!     .emit(&handler);
//!
//! assert!(handler.has_errors());
//! ```

use crate::span::Span;
use std::cell::RefCell;
use std::fmt;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Prevents compilation from producing output.
    Error,
    /// Does not prevent compilation.
    Warning,
    /// Additional context attached to another diagnostic.
    Note,
    /// A suggested fix.
    Help,
}

impl Level {
    pub const fn is_error(&self) -> bool {
        matches!(self, Level::Error)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
            Level::Help => "help",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A unique code identifying a class of diagnostic, e.g. `E1001`.
///
/// Codes are grouped by pipeline stage: `E1xxx` lexer, `E2xxx` parser,
/// `E3xxx` semantic analysis, `E4xxx` VM.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    pub prefix: &'static str,
    pub number: u32,
}

impl DiagnosticCode {
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    pub const E_LEXER_UNEXPECTED_CHAR: Self = Self::new("E", 1001);
    pub const E_LEXER_UNTERMINATED_STRING: Self = Self::new("E", 1002);
    pub const E_LEXER_INVALID_NUMBER: Self = Self::new("E", 1003);

    pub const E_PARSER_UNEXPECTED_TOKEN: Self = Self::new("E", 2001);
    pub const E_PARSER_EXPECTED_TOKEN: Self = Self::new("E", 2002);
    pub const E_PARSER_UNEXPECTED_EOF: Self = Self::new("E", 2003);

    pub const E_SEMANTIC_TYPE_MISMATCH: Self = Self::new("E", 3001);
    pub const E_SEMANTIC_UNDEFINED_VAR: Self = Self::new("E", 3002);
    pub const E_SEMANTIC_UNDEFINED_FN: Self = Self::new("E", 3003);
    pub const E_SEMANTIC_REDECLARED: Self = Self::new("E", 3004);
    pub const E_SEMANTIC_ARITY_MISMATCH: Self = Self::new("E", 3005);
    pub const E_SEMANTIC_SCOPE_FULL: Self = Self::new("E", 3006);
    pub const E_SEMANTIC_NULL_IN_EXPR: Self = Self::new("E", 3007);

    pub const E_VM_STACK_OVERFLOW: Self = Self::new("E", 4001);
    pub const E_VM_STACK_UNDERFLOW: Self = Self::new("E", 4002);
    pub const E_VM_DIVISION_BY_ZERO: Self = Self::new("E", 4003);
    pub const E_VM_VARIABLE_NOT_FOUND: Self = Self::new("E", 4004);
    pub const E_VM_INVALID_INSTRUCTION: Self = Self::new("E", 4005);
    pub const E_VM_POWER_OVERFLOW: Self = Self::new("E", 4006);
    pub const E_VM_INDEX_OUT_OF_BOUNDS: Self = Self::new("E", 4007);
    pub const E_VM_OUT_OF_MEMORY: Self = Self::new("E", 4008);
}

impl fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single diagnostic message with severity and location.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub code: Option<DiagnosticCode>,
    pub notes: Vec<String>,
    pub helps: Vec<String>,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(
                f,
                "{}[{}] at {}:{}: {}",
                self.level, code, self.span.line, self.span.column, self.message
            ),
            None => write!(
                f,
                "{} at {}:{}: {}",
                self.level, self.span.line, self.span.column, self.message
            ),
        }
    }
}

/// Fluent builder for constructing a [`Diagnostic`].
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Span,
    code: Option<DiagnosticCode>,
    notes: Vec<String>,
    helps: Vec<String>,
}

impl DiagnosticBuilder {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            span: Span::DUMMY,
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            span: self.span,
            code: self.code,
            notes: self.notes,
            helps: self.helps,
        }
    }

    pub fn emit(self, handler: &Handler) {
        handler.emit(self.build());
    }
}

/// Collects diagnostics reported during one compilation.
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.level.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level.is_error())
            .count()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_tracks_errors() {
        let handler = Handler::new();
        assert!(!handler.has_errors());
        DiagnosticBuilder::error("bad token").span(Span::DUMMY).emit(&handler);
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn warnings_do_not_count_as_errors() {
        let handler = Handler::new();
        DiagnosticBuilder::warning("unused variable").span(Span::DUMMY).emit(&handler);
        assert!(!handler.has_errors());
    }

    #[test]
    fn builder_attaches_code_notes_and_help() {
        let diag = DiagnosticBuilder::error("type mismatch")
            .code(DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH)
            .note("expected number")
            .help("convert the value first")
            .span(Span::DUMMY)
            .build();

        assert_eq!(diag.code.unwrap().as_str(), "E3001");
        assert_eq!(diag.notes, vec!["expected number"]);
        assert_eq!(diag.helps, vec!["convert the value first"]);
    }

    #[test]
    fn clear_resets_handler_state() {
        let handler = Handler::new();
        DiagnosticBuilder::error("x").span(Span::DUMMY).emit(&handler);
        handler.clear();
        assert!(!handler.has_errors());
        assert_eq!(handler.error_count(), 0);
    }
}
