//! Semantic analysis for C-Minus
//!
//! Two traversal passes over the syntax tree: the symbol-table builder
//! constructs scopes and symbol records and resolves every name, then the
//! type checker re-enters those scopes to infer and validate types. Both
//! passes annotate the tree in place and collect their diagnostics on an
//! [`AnalysisSession`].

mod builder;
mod checker;
mod dump;
mod scope;
mod traverse;

pub use builder::{build_symbol_table, SymbolTableBuilder};
pub use checker::{type_check, TypeChecker};
pub use dump::dump_symbol_table;
pub use scope::{Scope, ScopeId, SymbolKind, SymbolRecord, SymbolTable, GLOBAL_SCOPE, TABLE_SIZE};
pub use traverse::{traverse, Visitor};

use crate::errors::{CminusError, CminusResult};
use crate::syntax::SyntaxTree;

/// State of one analysis run: the symbol table under construction and every
/// diagnostic reported so far
///
/// Sessions are independent of each other; analyzing two trees with two
/// sessions shares nothing.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    pub table: SymbolTable,
    pub diagnostics: Vec<CminusError>,
}

impl AnalysisSession {
    /// Create a fresh session
    pub fn new() -> Self {
        Self {
            table: SymbolTable::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Record a symbol error
    pub(crate) fn symbol_error(&mut self, message: impl Into<String>, lineno: usize) {
        self.diagnostics.push(CminusError::symbol(message, lineno));
    }

    /// Record a type error
    pub(crate) fn type_error(&mut self, message: impl Into<String>, lineno: usize) {
        self.diagnostics.push(CminusError::type_error(message, lineno));
    }

    /// Check whether any semantic error was reported
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Convert the session into a fail-fast result: the populated table on
    /// success, the first diagnostic otherwise
    pub fn finish(mut self) -> CminusResult<SymbolTable> {
        if !self.diagnostics.is_empty() {
            return Err(self.diagnostics.remove(0));
        }
        Ok(self.table)
    }
}

/// Run both analysis passes over the tree
///
/// The tree comes back fully annotated: expression types set and every
/// compound statement holding a reference to its scope. All diagnostics are
/// on the returned session; callers check [`AnalysisSession::has_errors`]
/// before moving on to code generation.
pub fn analyze(tree: &mut SyntaxTree) -> AnalysisSession {
    let mut session = AnalysisSession::new();
    build_symbol_table(&mut session, tree);
    type_check(&mut session, tree);
    session
}
