//! Error handling for the C-Minus semantic analyzer
//!
//! Provides the diagnostic type collected by the analysis passes. Every
//! semantic error is non-fatal: the passes record it and keep walking the
//! tree so the caller sees as many diagnostics as possible.

mod diagnostic;

use thiserror::Error;

pub use diagnostic::{format_error, line_span, print_error, print_errors};

/// A semantic diagnostic, tied to the source line of the offending node
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CminusError {
    /// Name-resolution error from the symbol-table builder pass
    #[error("Symbol error at line {lineno}: {message}")]
    Symbol { message: String, lineno: usize },

    /// Type error from the type-checking pass
    #[error("Type error at line {lineno}: {message}")]
    Type { message: String, lineno: usize },
}

impl CminusError {
    /// Create a symbol error
    pub fn symbol(message: impl Into<String>, lineno: usize) -> Self {
        CminusError::Symbol {
            message: message.into(),
            lineno,
        }
    }

    /// Create a type error
    pub fn type_error(message: impl Into<String>, lineno: usize) -> Self {
        CminusError::Type {
            message: message.into(),
            lineno,
        }
    }

    /// Get the source line this diagnostic points at
    pub fn lineno(&self) -> usize {
        match self {
            CminusError::Symbol { lineno, .. } => *lineno,
            CminusError::Type { lineno, .. } => *lineno,
        }
    }

    /// Get the diagnostic message without the kind/line prefix
    pub fn message(&self) -> &str {
        match self {
            CminusError::Symbol { message, .. } => message,
            CminusError::Type { message, .. } => message,
        }
    }
}

/// Result type alias for C-Minus operations
pub type CminusResult<T> = Result<T, CminusError>;
