use thiserror::Error;

use crate::convert::CoerceError;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Entity '{entity}' has no attribute '{attribute}'")]
    AttributeNotFound { entity: String, attribute: String },

    #[error("Column '{0}' not found in table '{1}'")]
    ColumnNotFound(String, String),

    #[error("Coercion error: {0}")]
    Coercion(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl FormError {
    pub fn attribute_not_found(entity: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::AttributeNotFound {
            entity: entity.into(),
            attribute: attribute.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;

impl From<CoerceError> for FormError {
    fn from(err: CoerceError) -> Self {
        Self::Coercion(err.to_string())
    }
}
