//! Validation errors shared by the value objects.

use std::fmt;

/// Rejection of a field value during value-object validation.
///
/// Carries the offending field name so HTTP responses can point the
/// client at what to fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field failed its constraint.
    InvalidValue {
        /// Field name as it appears on the wire.
        field: String,
        /// What the constraint expects.
        message: String,
    },
}

impl DomainError {
    /// Shorthand for [`DomainError::InvalidValue`].
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, message } => {
                write!(f, "invalid {field}: {message}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
