//! Type-checking pass
//!
//! Second traversal over the tree: re-enters the scopes the builder pass
//! attached to compound statements, infers expression types bottom-up, and
//! validates statement, declaration, and signature constraints. Every
//! comparison goes through [`ExpType::unifies_with`] so an expression that
//! already produced a diagnostic (typed `Error`) does not spawn secondary
//! ones.

use crate::analysis::scope::SymbolKind;
use crate::analysis::traverse::{traverse, Visitor};
use crate::analysis::AnalysisSession;
use crate::syntax::{DeclKind, ExpKind, ExpType, NodeId, NodeKind, ParamKind, StmtKind, SyntaxTree};

const COUNT_MISMATCH: &str = "invalid function call (# of arguments does not match)";

/// Return-checking state for the function currently being walked
struct FunctionContext {
    return_type: ExpType,
    /// Whether a well-typed return was seen; pre-satisfied for void
    /// functions, which need no return statement
    has_returned: bool,
}

/// Visitor that infers and validates types using the populated symbol table
pub struct TypeChecker<'s> {
    session: &'s mut AnalysisSession,
    functions: Vec<FunctionContext>,
}

impl<'s> TypeChecker<'s> {
    /// Create a checker reading and reporting through `session`
    pub fn new(session: &'s mut AnalysisSession) -> Self {
        Self {
            session,
            functions: Vec::new(),
        }
    }

    /// Resolve a use to its record, if the builder left a real one
    ///
    /// Returns `None` both for missing records (defensive; the builder
    /// registers every use) and for `Unresolved` recovery records, typing
    /// the node `Error` in the latter case so no further checks fire.
    fn resolve(&mut self, tree: &mut SyntaxTree, id: NodeId, name: &str) -> Option<(SymbolKind, NodeId)> {
        let record = self.session.table.lookup_record(name)?;
        let (kind, decl) = (record.kind, record.decl);
        if kind == SymbolKind::Unresolved {
            tree.node_mut(id).ty = ExpType::Error;
            return None;
        }
        Some((kind, decl))
    }

    fn check_id(&mut self, tree: &mut SyntaxTree, id: NodeId, name: &str) {
        if let Some((_, decl)) = self.resolve(tree, id, name) {
            let decl_ty = tree.node(decl).ty;
            tree.node_mut(id).ty = decl_ty;
        }
    }

    fn check_array_id(&mut self, tree: &mut SyntaxTree, id: NodeId, name: &str) {
        let Some((kind, _)) = self.resolve(tree, id, name) else {
            return;
        };
        let lineno = tree.node(id).lineno;

        if kind != SymbolKind::Array {
            self.session.type_error("expected array symbol", lineno);
            tree.node_mut(id).ty = ExpType::Error;
            return;
        }

        let index = tree.node(id).children[0].expect("array use has an index");
        let index_ty = tree.node(index).ty;
        if index_ty.unifies_with(ExpType::Integer) {
            tree.node_mut(id).ty = ExpType::Integer;
        } else {
            self.session.type_error(
                format!("expected integer type index, got {index_ty} type index"),
                lineno,
            );
            tree.node_mut(id).ty = ExpType::Error;
        }
    }

    fn check_call(&mut self, tree: &mut SyntaxTree, id: NodeId, name: &str) {
        let Some((kind, decl)) = self.resolve(tree, id, name) else {
            return;
        };
        let lineno = tree.node(id).lineno;

        if kind != SymbolKind::Function {
            self.session.type_error("expected function symbol", lineno);
            tree.node_mut(id).ty = ExpType::Error;
            return;
        }

        self.check_call_args(tree, id, decl, lineno);
        let return_type = tree.node(decl).ty;
        tree.node_mut(id).ty = return_type;
    }

    /// Match actual arguments against the formal parameter list
    fn check_call_args(&mut self, tree: &SyntaxTree, id: NodeId, decl: NodeId, lineno: usize) {
        let mut arg = tree.node(id).children[0];
        let mut param = tree.node(decl).children[0];

        if arg.is_none() {
            // valid only against an empty list or the (void) marker
            match param {
                None => {}
                Some(p) if is_void_marker(tree, p) => {}
                Some(_) => self.session.type_error(COUNT_MISMATCH, lineno),
            }
            return;
        }

        while let Some(a) = arg {
            let Some(p) = param else {
                self.session.type_error(COUNT_MISMATCH, lineno);
                return;
            };
            let arg_ty = tree.node(a).ty;
            let param_ty = tree.node(p).ty;

            if !arg_ty.unifies_with(param_ty) {
                self.session
                    .type_error("invalid function call (argument type mismatched)", lineno);
                return;
            }
            if arg_ty == ExpType::Void {
                self.session.type_error(
                    "void value cannot be passed as an argument",
                    tree.node(a).lineno,
                );
                return;
            }

            arg = tree.node(a).sibling;
            param = tree.node(p).sibling;
        }

        if param.is_some() {
            self.session.type_error(COUNT_MISMATCH, lineno);
        }
    }

    fn check_assign(&mut self, tree: &mut SyntaxTree, id: NodeId) {
        let target = tree.node(id).children[0].expect("assignment target");
        let value = tree.node(id).children[1].expect("assignment value");
        let target_ty = tree.node(target).ty;
        let value_ty = tree.node(value).ty;

        if target_ty.unifies_with(ExpType::Integer) && value_ty.unifies_with(ExpType::Integer) {
            tree.node_mut(id).ty = target_ty;
        } else {
            self.session
                .type_error("type conflict in assignment", tree.node(target).lineno);
            tree.node_mut(id).ty = ExpType::Error;
        }
    }

    fn check_binary(&mut self, tree: &mut SyntaxTree, id: NodeId, message: &str) {
        let left = tree.node(id).children[0].expect("binary left operand");
        let right = tree.node(id).children[1].expect("binary right operand");
        let left_ty = tree.node(left).ty;
        let right_ty = tree.node(right).ty;

        if left_ty.unifies_with(ExpType::Integer) && right_ty.unifies_with(ExpType::Integer) {
            tree.node_mut(id).ty = ExpType::Integer;
        } else {
            self.session.type_error(message, tree.node(id).lineno);
            tree.node_mut(id).ty = ExpType::Error;
        }
    }

    fn check_condition(&mut self, tree: &SyntaxTree, id: NodeId, message: &str) {
        let condition = tree.node(id).children[0].expect("condition expression");
        if !tree.node(condition).ty.unifies_with(ExpType::Integer) {
            self.session
                .type_error(message, tree.node(condition).lineno);
        }
    }

    fn check_return(&mut self, tree: &SyntaxTree, id: NodeId) {
        let Some(return_type) = self.functions.last().map(|c| c.return_type) else {
            return;
        };
        let value = tree.node(id).children[0];
        let lineno = tree.node(id).lineno;

        let satisfied = match return_type {
            ExpType::Void => {
                if value.is_some_and(|v| !tree.node(v).ty.unifies_with(ExpType::Void)) {
                    self.session.type_error(
                        "invalid return type (non-void return value in void type function)",
                        lineno,
                    );
                    false
                } else {
                    true
                }
            }
            ExpType::Integer => {
                if value.is_some_and(|v| tree.node(v).ty.unifies_with(ExpType::Integer)) {
                    true
                } else {
                    self.session.type_error(
                        "invalid return type (return value should be Integer)",
                        lineno,
                    );
                    false
                }
            }
            _ => false,
        };

        if let Some(context) = self.functions.last_mut() {
            context.has_returned = satisfied;
        }
    }
}

fn is_void_marker(tree: &SyntaxTree, param: NodeId) -> bool {
    matches!(
        &tree.node(param).kind,
        NodeKind::Param(ParamKind::Single { name: None })
    ) && tree.node(param).ty == ExpType::Void
}

impl Visitor for TypeChecker<'_> {
    fn enter(&mut self, tree: &mut SyntaxTree, id: NodeId) {
        match &tree.node(id).kind {
            NodeKind::Stmt(StmtKind::Compound) => {
                let scope = tree
                    .node(id)
                    .scope
                    .expect("compound scope attached by the builder pass");
                self.session.table.push(scope);
            }
            NodeKind::Decl(DeclKind::Fun { .. }) => {
                let return_type = tree.node(id).ty;
                self.functions.push(FunctionContext {
                    return_type,
                    has_returned: return_type == ExpType::Void,
                });
            }
            _ => {}
        }
    }

    fn exit(&mut self, tree: &mut SyntaxTree, id: NodeId) {
        let lineno = tree.node(id).lineno;
        let ty = tree.node(id).ty;

        match &tree.node(id).kind {
            NodeKind::Exp(exp) => match exp {
                ExpKind::Const(_) => tree.node_mut(id).ty = ExpType::Integer,
                ExpKind::Id { name } => {
                    let name = name.clone();
                    self.check_id(tree, id, &name);
                }
                ExpKind::IdArray { name } => {
                    let name = name.clone();
                    self.check_array_id(tree, id, &name);
                }
                ExpKind::Call { name } => {
                    let name = name.clone();
                    self.check_call(tree, id, &name);
                }
                ExpKind::Assign => self.check_assign(tree, id),
                ExpKind::Arith(_) => {
                    self.check_binary(tree, id, "operand of Op should be Integer type")
                }
                ExpKind::Rel(_) => {
                    self.check_binary(tree, id, "operand of Relop should be Integer type")
                }
            },
            NodeKind::Stmt(stmt) => match stmt {
                StmtKind::Compound => self.session.table.pop(),
                StmtKind::If => self.check_condition(
                    tree,
                    id,
                    "invalid expression (if-condition must be Integer type)",
                ),
                StmtKind::While => self.check_condition(
                    tree,
                    id,
                    "invalid expression (while-condition must be Integer type)",
                ),
                StmtKind::Return => self.check_return(tree, id),
            },
            NodeKind::Decl(DeclKind::Var { .. } | DeclKind::VarArray { .. }) => {
                if ty.is_void() {
                    self.session.type_error(
                        "declaration of void or void array type variable is invalid",
                        lineno,
                    );
                }
            }
            NodeKind::Decl(DeclKind::Fun { .. }) => {
                let context = self
                    .functions
                    .pop()
                    .expect("function context pushed on entry");
                if !context.has_returned {
                    self.session.type_error(
                        "return statement is missing or not properly stated in this function",
                        lineno,
                    );
                }
            }
            NodeKind::Param(ParamKind::Single { .. }) => {
                if ty == ExpType::Void && tree.node(id).sibling.is_some() {
                    self.session
                        .type_error("Void type Parameter is invalid", lineno);
                }
            }
            NodeKind::Param(ParamKind::Array { .. }) => {
                if ty == ExpType::VoidArray {
                    self.session
                        .type_error("Void Array type parameter is invalid", lineno);
                }
            }
        }
    }
}

/// Type-check a whole program against its populated symbol table
///
/// Pushes the global scope, walks the tree re-entering the scopes the
/// builder attached, and pops it; the scope structure itself is never
/// modified.
pub fn type_check(session: &mut AnalysisSession, tree: &mut SyntaxTree) {
    let global = session.table.global();
    session.table.push(global);

    let root = tree.root();
    let mut checker = TypeChecker::new(session);
    traverse(&mut checker, tree, root);

    session.table.pop();
}
