//! Error types for masked input fields

use thiserror::Error;

/// Result type for field operations
pub type Result<T> = std::result::Result<T, FieldError>;

/// Contract violations reported to the integrator.
///
/// Formatting never fails and validation failures are data, so neither shows up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Field registered without a name
    #[error("field name must not be empty")]
    MissingName,

    /// Another live field already owns this name
    #[error("duplicate field name: {name}")]
    DuplicateName { name: String },

    /// Currency marks that would make money formatting unstable
    #[error("invalid currency option '{option}': {reason}")]
    InvalidCurrency {
        option: &'static str,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldError::DuplicateName {
            name: "amount".into(),
        };
        assert_eq!(err.to_string(), "duplicate field name: amount");
    }

    #[test]
    fn test_missing_name_display() {
        assert_eq!(
            FieldError::MissingName.to_string(),
            "field name must not be empty"
        );
    }

    #[test]
    fn test_invalid_currency_display() {
        let err = FieldError::InvalidCurrency {
            option: "unit",
            reason: "must not contain digits",
        };
        assert!(err.to_string().contains("unit"));
        assert!(err.to_string().contains("must not contain digits"));
    }
}
