//! Expression types inferred and checked by the analysis passes

use std::fmt;

/// The type of a C-Minus expression or declaration
///
/// `Error` is the recovery sentinel: it is assigned wherever analysis could
/// not produce a real type, and it unifies with everything so that one
/// faulty expression does not cascade into secondary diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpType {
    Void,
    Integer,
    IntegerArray,
    VoidArray,
    /// Recovery sentinel, compatible with every type
    Error,
}

impl ExpType {
    /// Check if this is void or a void array
    pub fn is_void(self) -> bool {
        matches!(self, ExpType::Void | ExpType::VoidArray)
    }

    /// Check if this is an array type
    pub fn is_array(self) -> bool {
        matches!(self, ExpType::IntegerArray | ExpType::VoidArray)
    }

    /// Check if this is the recovery sentinel
    pub fn is_error(self) -> bool {
        matches!(self, ExpType::Error)
    }

    /// Check if a value of this type can be used where `other` is expected
    ///
    /// `Error` unifies with everything so diagnostics already reported for a
    /// subexpression are not repeated at every enclosing node.
    pub fn unifies_with(self, other: ExpType) -> bool {
        self == other || self.is_error() || other.is_error()
    }
}

impl fmt::Display for ExpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpType::Void => write!(f, "Void"),
            ExpType::Integer => write!(f, "Integer"),
            ExpType::IntegerArray => write!(f, "IntegerArray"),
            ExpType::VoidArray => write!(f, "VoidArray"),
            ExpType::Error => write!(f, "TypeError"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unifies_with() {
        assert!(ExpType::Integer.unifies_with(ExpType::Integer));
        assert!(!ExpType::Integer.unifies_with(ExpType::Void));
        assert!(!ExpType::IntegerArray.unifies_with(ExpType::Integer));
        assert!(ExpType::Error.unifies_with(ExpType::Integer));
        assert!(ExpType::Void.unifies_with(ExpType::Error));
    }

    #[test]
    fn test_predicates() {
        assert!(ExpType::Void.is_void());
        assert!(ExpType::VoidArray.is_void());
        assert!(!ExpType::Integer.is_void());
        assert!(ExpType::IntegerArray.is_array());
        assert!(!ExpType::Integer.is_array());
    }
}
