//! Syntax-tree interface for the C-Minus semantic analyzer
//!
//! The parser lives outside this crate; these types define the tree shape
//! it must produce and the constructors it builds nodes with.

mod tree;
mod types;

pub use tree::{
    ArithOp, DeclKind, ExpKind, NodeId, NodeKind, ParamKind, RelOp, StmtKind, SyntaxTree,
    TreeNode, MAX_CHILDREN,
};
pub use types::ExpType;
