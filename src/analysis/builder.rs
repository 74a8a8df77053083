//! Symbol-table builder pass
//!
//! First traversal over the tree: creates a scope per compound statement,
//! registers declarations, resolves every identifier and call to a record
//! (or reports it undeclared), and attaches each compound statement's scope
//! to its node so the type checker can re-enter it.

use crate::analysis::scope::{SymbolKind, SymbolTable, GLOBAL_SCOPE};
use crate::analysis::traverse::{traverse, Visitor};
use crate::analysis::AnalysisSession;
use crate::syntax::{DeclKind, ExpKind, ExpType, NodeId, NodeKind, ParamKind, StmtKind, SyntaxTree};

/// Visitor that populates the symbol table
///
/// A function declaration pushes the scope its parameters land in;
/// `preserve_scope` then keeps the function's body from opening a second
/// scope, fusing parameters and body into one namespace. `location` counts
/// scope entries and exits, assigning each declaration the slot of its
/// nesting level.
pub struct SymbolTableBuilder<'s> {
    session: &'s mut AnalysisSession,
    current_function: Option<String>,
    preserve_scope: bool,
    location: i32,
}

impl<'s> SymbolTableBuilder<'s> {
    /// Create a builder recording into `session`
    pub fn new(session: &'s mut AnalysisSession) -> Self {
        Self {
            session,
            current_function: None,
            preserve_scope: false,
            location: 0,
        }
    }

    /// Name block scopes after the enclosing function
    fn scope_name(&self) -> String {
        self.current_function
            .clone()
            .unwrap_or_else(|| GLOBAL_SCOPE.to_string())
    }

    fn declare_function(&mut self, id: NodeId, name: String, lineno: usize) {
        self.current_function = Some(name.clone());

        if self.session.table.lookup_local(&name) {
            let replaceable = self
                .session
                .table
                .lookup_record(&name)
                .map(|record| record.builtin)
                .unwrap_or(false);
            if replaceable {
                // A program may redefine `input`/`output`; the user
                // declaration takes the builtin's place.
                self.session.table.remove_local(&name);
            } else {
                self.session
                    .symbol_error("function already declared for current scope", lineno);
                return;
            }
        }

        self.session
            .table
            .insert(&name, SymbolKind::Function, lineno, self.location, id);
        let scope = self.session.table.create_scope(name);
        self.session.table.push(scope);
        self.location += 1;
        self.preserve_scope = true;
    }

    fn declare_variable(
        &mut self,
        name: &str,
        kind: SymbolKind,
        ty: ExpType,
        lineno: usize,
        id: NodeId,
    ) {
        if ty.is_void() {
            self.session
                .symbol_error("variable should have non-void type", lineno);
            return;
        }
        if self.session.table.lookup_local(name) {
            self.session
                .symbol_error("symbol already declared for current scope", lineno);
        } else {
            self.session
                .table
                .insert(name, kind, lineno, self.location, id);
        }
    }

    fn declare_parameter(&mut self, name: &str, kind: SymbolKind, lineno: usize, id: NodeId) {
        if self.session.table.lookup_local(name) {
            self.session
                .symbol_error("symbol already declared for current scope", lineno);
        } else {
            self.session
                .table
                .insert(name, kind, lineno, self.location, id);
        }
    }

    /// Resolve an identifier, array, or call use; undeclared names get a
    /// recovery record so the type checker still finds a definition
    fn resolve_use(&mut self, tree: &mut SyntaxTree, name: &str, lineno: usize, id: NodeId) {
        if self.session.table.lookup(name).is_none() {
            self.session.symbol_error("using undeclared symbol", lineno);
            tree.node_mut(id).ty = ExpType::Error;
            self.session
                .table
                .insert(name, SymbolKind::Unresolved, lineno, self.location, id);
        } else {
            self.session.table.add_line(name, lineno);
        }
    }
}

impl Visitor for SymbolTableBuilder<'_> {
    fn enter(&mut self, tree: &mut SyntaxTree, id: NodeId) {
        let lineno = tree.node(id).lineno;
        let ty = tree.node(id).ty;

        match &tree.node(id).kind {
            NodeKind::Stmt(StmtKind::Compound) => {
                if self.preserve_scope {
                    // The enclosing function declaration already pushed the
                    // scope holding its parameters; the body shares it.
                    self.preserve_scope = false;
                } else {
                    let scope = self.session.table.create_scope(self.scope_name());
                    self.session.table.push(scope);
                    self.location += 1;
                }
                let top = self.session.table.top();
                tree.node_mut(id).scope = Some(top);
            }
            NodeKind::Decl(DeclKind::Fun { name }) => {
                let name = name.clone();
                self.declare_function(id, name, lineno);
            }
            NodeKind::Decl(DeclKind::Var { name }) => {
                let name = name.clone();
                self.declare_variable(&name, SymbolKind::Variable, ty, lineno, id);
            }
            NodeKind::Decl(DeclKind::VarArray { name, .. }) => {
                let name = name.clone();
                self.declare_variable(&name, SymbolKind::Array, ty, lineno, id);
            }
            NodeKind::Exp(
                ExpKind::Id { name } | ExpKind::IdArray { name } | ExpKind::Call { name },
            ) => {
                let name = name.clone();
                self.resolve_use(tree, &name, lineno, id);
            }
            NodeKind::Exp(_) => {}
            NodeKind::Param(ParamKind::Single { name: None }) => {
                // The bare (void) marker of a no-argument signature
                if ty != ExpType::Void {
                    self.session
                        .symbol_error("parameters except (void) must have name", lineno);
                }
            }
            NodeKind::Param(ParamKind::Single { name: Some(name) }) => {
                let name = name.clone();
                self.declare_parameter(&name, SymbolKind::Variable, lineno, id);
            }
            NodeKind::Param(ParamKind::Array { name }) => {
                let name = name.clone();
                self.declare_parameter(&name, SymbolKind::Array, lineno, id);
            }
            NodeKind::Stmt(_) => {}
        }
    }

    fn exit(&mut self, tree: &mut SyntaxTree, id: NodeId) {
        if matches!(tree.node(id).kind, NodeKind::Stmt(StmtKind::Compound)) {
            self.session.table.pop();
            self.location -= 1;
        }
    }
}

/// Synthesize `int input(void)` and `void output(int arg)` into the global
/// scope; both carry line 0 and an empty body
fn register_builtins(session: &mut AnalysisSession, tree: &mut SyntaxTree) {
    let param = tree.param(None, ExpType::Void, 0);
    let body = tree.compound(None, None, 0);
    let input = tree.fun_decl("input", ExpType::Integer, Some(param), body, 0);
    session
        .table
        .insert("input", SymbolKind::Function, 0, 0, input);
    session.table.mark_builtin("input");

    let param = tree.param(Some("arg"), ExpType::Integer, 0);
    let body = tree.compound(None, None, 0);
    let output = tree.fun_decl("output", ExpType::Void, Some(param), body, 0);
    session
        .table
        .insert("output", SymbolKind::Function, 0, 0, output);
    session.table.mark_builtin("output");
}

/// Build the symbol table for a whole program
///
/// Starts from a fresh table, registers the builtins in a new global scope,
/// runs the builder pass over the tree, and pops the global scope, leaving
/// the stack empty and the scope registry fully populated.
pub fn build_symbol_table(session: &mut AnalysisSession, tree: &mut SyntaxTree) {
    session.table = SymbolTable::new();
    let global = session.table.create_scope(GLOBAL_SCOPE);
    session.table.push(global);
    register_builtins(session, tree);

    let root = tree.root();
    let mut builder = SymbolTableBuilder::new(session);
    traverse(&mut builder, tree, root);

    session.table.pop();
}
