//! spadec-util - core utilities shared across the Spade compilation pipeline.
//!
//! This crate provides the foundation types used by every other stage of the
//! pipeline: a per-compilation string interner (`Symbol`/`StringTable`), source
//! location tracking (`Span`, see the `span` module), and the diagnostic types
//! used to report errors to the user (see the `diagnostic` module).
//!
//! Unlike a multi-threaded compiler frontend, a Spade compilation runs on a
//! single thread from start to finish, so the interner below is owned by the
//! `Session` driving one compilation rather than shared as a global static.

pub mod diagnostic;
pub mod error;
pub mod span;

pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;

use std::fmt;

/// An interned string identifier.
///
/// A `Symbol` is a compact (4-byte) handle to a string owned by a
/// [`StringTable`]. Two symbols from the same table compare equal iff the
/// strings they were interned from are equal, so comparing symbols is an
/// O(1) integer comparison instead of a string comparison.
///
/// `Symbol` values from different `StringTable`s must never be compared or
/// mixed; nothing enforces this at the type level, matching the compact
/// representation a compiler wants here.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    index: u32,
}

impl Symbol {
    /// Get the raw index value. Useful for serialization or debugging.
    pub fn as_u32(&self) -> u32 {
        self.index
    }

    /// Create a symbol from a raw index.
    ///
    /// The index must correspond to a valid entry in the `StringTable` that
    /// will be used to resolve it; otherwise `StringTable::get` returns
    /// `None`.
    pub fn from_u32(index: u32) -> Self {
        Self { index }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.index)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// A per-compilation string interner.
///
/// Strings are appended to an owned `Vec<String>`; the index into that
/// vector is the `Symbol`'s payload. A `FxHashMap` from string to index
/// avoids a linear scan when interning a string that may already be known.
///
/// The table is owned by a single `Session` and dropped with it at the end
/// of compilation, so there is no need for reference counting, arenas, or
/// `'static` leaking to keep interned strings alive.
#[derive(Debug, Default)]
pub struct StringTable {
    index: FxHashMap<String, u32>,
    strings: Vec<String>,
}

impl StringTable {
    /// Create a new, empty string table.
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            strings: Vec::new(),
        }
    }

    /// Intern a string, returning its symbol.
    ///
    /// If `string` has already been interned, the existing symbol is
    /// returned; otherwise a new slot is appended.
    pub fn intern(&mut self, string: &str) -> Symbol {
        if let Some(&index) = self.index.get(string) {
            return Symbol { index };
        }

        let index = self.strings.len() as u32;
        self.strings.push(string.to_owned());
        self.index.insert(string.to_owned(), index);
        Symbol { index }
    }

    /// Resolve a symbol back to its string.
    ///
    /// Returns `None` if the symbol was not produced by this table.
    pub fn get(&self, symbol: Symbol) -> Option<&str> {
        self.strings.get(symbol.index as usize).map(String::as_str)
    }

    /// Look up the symbol for a string that may already be interned,
    /// without interning it if it isn't.
    pub fn get_symbol(&self, string: &str) -> Option<Symbol> {
        self.index.get(string).map(|&index| Symbol { index })
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_string_returns_same_symbol() {
        let mut table = StringTable::new();
        let a = table.intern("hello");
        let b = table.intern("hello");
        assert_eq!(a, b);
    }

    #[test]
    fn interning_distinct_strings_returns_distinct_symbols() {
        let mut table = StringTable::new();
        let a = table.intern("hello");
        let b = table.intern("world");
        assert_ne!(a, b);
    }

    #[test]
    fn get_resolves_back_to_original_string() {
        let mut table = StringTable::new();
        let sym = table.intern("variable_name");
        assert_eq!(table.get(sym), Some("variable_name"));
    }

    #[test]
    fn unknown_symbol_resolves_to_none() {
        let table = StringTable::new();
        assert_eq!(table.get(Symbol::from_u32(42)), None);
    }

    #[test]
    fn get_symbol_finds_already_interned_strings_without_inserting() {
        let mut table = StringTable::new();
        let sym = table.intern("hello");
        assert_eq!(table.get_symbol("hello"), Some(sym));
        assert_eq!(table.get_symbol("missing"), None);
        assert_eq!(table.len(), 1);
    }
}
