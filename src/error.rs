//! Error types for the calculators.
//!
//! Every calculator validates its input before computing. Once an input is
//! accepted the formulas are total, so the only faults left are arithmetic
//! overflow on absurd magnitudes.

use crate::numeric::NumericError;
use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type CalcResult<T> = std::result::Result<T, CalcError>;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CalcError {
    /// A required field is missing, non-numeric or out of its domain.
    #[error("invalid input for `{field}`: {message}")]
    InvalidInput { field: String, message: String },

    /// Decimal arithmetic fault (overflow on extreme magnitudes).
    #[error("numeric error: {0}")]
    Numeric(#[from] NumericError),

    /// Calculator configuration is inconsistent.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Unit code not known in the requested category.
    #[error("unknown {category} unit `{code}`")]
    UnknownUnit { category: &'static str, code: String },

    /// Conversion between units of different categories.
    #[error("cannot convert {from} to {to}: different unit categories")]
    UnitMismatch { from: &'static str, to: &'static str },
}

impl CalcError {
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// True for the validation class of errors the form layer should surface
    /// to the user.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::UnknownUnit { .. } | Self::UnitMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_field() {
        let err = CalcError::invalid_input("principal", "must not be negative");
        assert_eq!(
            err.to_string(),
            "invalid input for `principal`: must not be negative"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_numeric_error_converts() {
        let err: CalcError = NumericError::Overflow.into();
        assert!(matches!(err, CalcError::Numeric(NumericError::Overflow)));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_unit_errors_display() {
        let err = CalcError::UnitMismatch {
            from: "m",
            to: "kg",
        };
        assert!(err.to_string().contains("different unit categories"));

        let err = CalcError::UnknownUnit {
            category: "length",
            code: "parsec".into(),
        };
        assert_eq!(err.to_string(), "unknown length unit `parsec`");
    }
}
