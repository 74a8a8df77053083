//! Semantic analysis for the C-Minus language
//!
//! This crate implements the semantic-analysis phase of a C-Minus compiler:
//! it consumes an already-built abstract syntax tree, constructs a
//! scope-aware symbol table, and type-checks the whole program, annotating
//! the tree in place. Lexing, parsing, and code generation live in the
//! surrounding driver; the [`syntax`] module defines the tree shape and the
//! constructors the parser uses to build it.

pub mod errors;
pub mod syntax;
pub mod analysis;

// Re-export commonly used types
pub use errors::{CminusError, CminusResult};
pub use syntax::{ExpType, NodeId, SyntaxTree};
pub use analysis::{analyze, AnalysisSession, SymbolTable};
