//! Coercion-specific error types
//!
//! Coercion failures are returned as values rather than raised, so callers
//! such as the entity matcher can tell a malformed payload apart from a
//! failure they are not prepared to handle.

use crate::core::DataType;
use thiserror::Error;

pub type CoerceResult<T> = Result<T, CoerceError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    /// The raw value has the right shape but its content does not parse.
    #[error("Cannot convert '{value}' to {data_type}: {reason}")]
    Format {
        data_type: DataType,
        value: String,
        reason: String,
    },

    /// The raw value is of a JSON kind the target type cannot be built from.
    #[error("Cannot convert JSON {found} to {data_type}")]
    WrongType {
        data_type: DataType,
        found: &'static str,
    },

    /// Any other refusal raised by a custom column descriptor.
    #[error("{0}")]
    Rejected(String),
}

impl CoerceError {
    pub fn format(data_type: DataType, value: impl Into<String>, reason: impl ToString) -> Self {
        Self::Format {
            data_type,
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Format and wrong-type failures are treated alike: the payload simply
    /// does not describe a value of the column's type.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Format { .. } | Self::WrongType { .. })
    }
}
