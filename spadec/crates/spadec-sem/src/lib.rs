//! spadec-sem - semantic analysis and type checking for Spade.
//!
//! A single bottom-up walk over the parsed [`spadec_par::ast::Program`]
//! that populates a [`SymbolTables`] and checks every expression's type
//! against the rules documented on [`SemanticAnalyzer`].

mod analysis;
mod scope;

pub use analysis::SemanticAnalyzer;
pub use scope::{AddError, ScopeId, SymbolInfo, SymbolTables, MAX_SYMBOLS_PER_SCOPE};

use spadec_par::ast::Program;
use spadec_util::diagnostic::Handler;

/// Runs semantic analysis over `program`, returning the populated symbol
/// tables. Check `handler.has_errors()` to tell a clean program from one
/// that failed type checking.
pub fn analyze(program: &Program, handler: &Handler) -> SymbolTables {
    let mut analyzer = SemanticAnalyzer::new(handler);
    analyzer.analyze(program);
    analyzer.into_tables()
}
