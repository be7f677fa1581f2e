//! Symbol tables (scopes).
//!
//! A scope is an insertion-ordered mapping from name to [`SymbolInfo`],
//! with a parent pointer (`None` for the global scope). Scopes live in an
//! arena (`Vec<Scope>`) indexed by [`ScopeId`]; a function symbol's inner
//! scope is just another arena entry referenced by `SymbolInfo::inner_scope`,
//! so it lives exactly as long as the arena itself.

use indexmap::IndexMap;
use spadec_par::ast::{Parameter, TypeKind};
use spadec_util::{StringTable, Symbol};
use std::fmt::Write as _;

/// Maximum number of symbols a single scope may hold, matching the
/// reference array-backed table.
pub const MAX_SYMBOLS_PER_SCOPE: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// A declared name: a variable's type, or a function's signature and
/// inner (parameter) scope.
#[derive(Clone, Debug)]
pub struct SymbolInfo {
    pub name: Symbol,
    pub type_kind: TypeKind,
    pub params: Option<Vec<(Symbol, TypeKind)>>,
    pub inner_scope: Option<ScopeId>,
}

impl SymbolInfo {
    pub fn is_function(&self) -> bool {
        self.params.is_some()
    }
}

#[derive(Debug, Default)]
struct Scope {
    symbols: IndexMap<Symbol, SymbolInfo>,
    parent: Option<ScopeId>,
}

/// Outcome of a failed `add_variable`/`add_function` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddError {
    AlreadyDeclared,
    ScopeFull,
}

/// Owns every scope created during one analysis, plus the string interner
/// backing the `Symbol`s used as scope keys.
pub struct SymbolTables {
    strings: StringTable,
    scopes: Vec<Scope>,
}

impl SymbolTables {
    pub fn new() -> Self {
        Self {
            strings: StringTable::new(),
            scopes: vec![Scope::default()],
        }
    }

    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn intern(&mut self, name: &str) -> Symbol {
        self.strings.intern(name)
    }

    pub fn resolve_name(&self, symbol: Symbol) -> &str {
        self.strings.get(symbol).unwrap_or("<unknown>")
    }

    /// Declares a variable in `scope`. Fails if the name is already bound
    /// in `scope` (not counting parents) or the scope is at capacity.
    pub fn add_variable(
        &mut self,
        scope: ScopeId,
        name: &str,
        type_kind: TypeKind,
    ) -> Result<(), AddError> {
        let symbol = self.intern(name);
        let rib = &mut self.scopes[scope.0];

        if rib.symbols.contains_key(&symbol) {
            return Err(AddError::AlreadyDeclared);
        }
        if rib.symbols.len() >= MAX_SYMBOLS_PER_SCOPE {
            return Err(AddError::ScopeFull);
        }

        rib.symbols.insert(
            symbol,
            SymbolInfo {
                name: symbol,
                type_kind,
                params: None,
                inner_scope: None,
            },
        );
        Ok(())
    }

    /// Declares a function in `scope`, creating a new inner scope parented
    /// to `scope` and populating it with the function's parameters.
    pub fn add_function(
        &mut self,
        scope: ScopeId,
        name: &str,
        return_type: TypeKind,
        params: &[Parameter],
    ) -> Result<ScopeId, AddError> {
        let symbol = self.intern(name);
        {
            let rib = &self.scopes[scope.0];
            if rib.symbols.contains_key(&symbol) {
                return Err(AddError::AlreadyDeclared);
            }
            if rib.symbols.len() >= MAX_SYMBOLS_PER_SCOPE {
                return Err(AddError::ScopeFull);
            }
        }

        let inner_id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            symbols: IndexMap::new(),
            parent: Some(scope),
        });

        let mut param_syms = Vec::with_capacity(params.len());
        for param in params {
            let param_symbol = self.intern(&param.name);
            param_syms.push((param_symbol, param.type_kind));
            self.scopes[inner_id.0].symbols.insert(
                param_symbol,
                SymbolInfo {
                    name: param_symbol,
                    type_kind: param.type_kind,
                    params: None,
                    inner_scope: None,
                },
            );
        }

        self.scopes[scope.0].symbols.insert(
            symbol,
            SymbolInfo {
                name: symbol,
                type_kind: return_type,
                params: Some(param_syms),
                inner_scope: Some(inner_id),
            },
        );

        Ok(inner_id)
    }

    /// Looks up `name` in `scope`, recursing into parents on a miss.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&SymbolInfo> {
        let symbol = self.strings.get_symbol(name)?;
        let mut current = Some(scope);
        while let Some(id) = current {
            let rib = &self.scopes[id.0];
            if let Some(info) = rib.symbols.get(&symbol) {
                return Some(info);
            }
            current = rib.parent;
        }
        None
    }

    /// Looks up a function named `name` whose parameter types exactly
    /// match `arg_types` (same arity, same types in order), recursing into
    /// parents on a miss. No implicit conversions are attempted.
    pub fn lookup_function(
        &self,
        scope: ScopeId,
        name: &str,
        arg_types: &[TypeKind],
    ) -> Option<&SymbolInfo> {
        let symbol = self.strings.get_symbol(name)?;
        let mut current = Some(scope);
        while let Some(id) = current {
            let rib = &self.scopes[id.0];
            if let Some(info) = rib.symbols.get(&symbol) {
                if let Some(params) = &info.params {
                    let matches = params.len() == arg_types.len()
                        && params
                            .iter()
                            .zip(arg_types.iter())
                            .all(|((_, declared), arg)| declared == arg);
                    if matches {
                        return Some(info);
                    }
                }
            }
            current = rib.parent;
        }
        None
    }

    /// Renders every scope as `name: type` lines, indenting a function's
    /// parameter scope one level under its declaration.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_scope(self.global(), 0, &mut out);
        out
    }

    fn dump_scope(&self, scope: ScopeId, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        for (symbol, info) in &self.scopes[scope.0].symbols {
            let name = self.resolve_name(*symbol);
            let _ = writeln!(out, "{}{}: {}", indent, name, info.type_kind.name());
            if let Some(inner) = info.inner_scope {
                self.dump_scope(inner, depth + 1, out);
            }
        }
    }
}

impl Default for SymbolTables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_and_looks_up_a_variable() {
        let mut tables = SymbolTables::new();
        let global = tables.global();
        tables.add_variable(global, "x", TypeKind::Int).unwrap();
        let info = tables.lookup(global, "x").unwrap();
        assert_eq!(info.type_kind, TypeKind::Int);
    }

    #[test]
    fn redeclaring_a_name_in_the_same_scope_fails() {
        let mut tables = SymbolTables::new();
        let global = tables.global();
        tables.add_variable(global, "x", TypeKind::Int).unwrap();
        let err = tables.add_variable(global, "x", TypeKind::Bool).unwrap_err();
        assert_eq!(err, AddError::AlreadyDeclared);
    }

    #[test]
    fn lookup_recurses_into_parent_scope() {
        let mut tables = SymbolTables::new();
        let global = tables.global();
        tables.add_variable(global, "g", TypeKind::Int).unwrap();
        let inner = tables
            .add_function(global, "f", TypeKind::Void, &[])
            .unwrap();
        assert!(tables.lookup(inner, "g").is_some());
    }

    #[test]
    fn function_parameters_are_visible_in_inner_scope() {
        let mut tables = SymbolTables::new();
        let global = tables.global();
        let params = vec![Parameter {
            type_kind: TypeKind::Int,
            name: "a".to_string(),
        }];
        let inner = tables
            .add_function(global, "f", TypeKind::Int, &params)
            .unwrap();
        assert!(tables.lookup(inner, "a").is_some());
        assert!(tables.lookup(global, "a").is_none());
    }

    #[test]
    fn overload_lookup_matches_arity_and_types_exactly() {
        let mut tables = SymbolTables::new();
        let global = tables.global();
        let params = vec![Parameter {
            type_kind: TypeKind::Int,
            name: "a".to_string(),
        }];
        tables
            .add_function(global, "f", TypeKind::Int, &params)
            .unwrap();

        assert!(tables
            .lookup_function(global, "f", &[TypeKind::Int])
            .is_some());
        assert!(tables
            .lookup_function(global, "f", &[TypeKind::Bool])
            .is_none());
        assert!(tables
            .lookup_function(global, "f", &[TypeKind::Int, TypeKind::Int])
            .is_none());
    }

    #[test]
    fn dump_indents_a_function_scope_under_its_declaration() {
        let mut tables = SymbolTables::new();
        let global = tables.global();
        tables.add_variable(global, "x", TypeKind::Int).unwrap();
        let params = vec![Parameter {
            type_kind: TypeKind::Bool,
            name: "flag".to_string(),
        }];
        tables
            .add_function(global, "f", TypeKind::Void, &params)
            .unwrap();

        let dump = tables.dump();
        assert_eq!(dump, "x: int\nf: void\n  flag: bool\n");
    }
}
