// ============================================================================
// Numeric Errors
// Error types for decimal money arithmetic
// ============================================================================

use std::fmt;

/// Errors that can occur during checked decimal arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumericError {
    /// Result exceeded the representable decimal range
    Overflow,
    /// Result fell below the representable decimal range
    Underflow,
    /// Attempted division by zero
    DivisionByZero,
    /// Input string or value is invalid
    InvalidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum value")
            },
            NumericError::Underflow => {
                write!(f, "arithmetic underflow: result below minimum value")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_fault() {
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
        assert!(NumericError::InvalidInput.to_string().starts_with("invalid input"));
    }

    #[test]
    fn test_errors_box_as_std_error() {
        let boxed: Box<dyn std::error::Error> = Box::new(NumericError::Underflow);
        assert!(boxed.to_string().contains("underflow"));
    }
}
