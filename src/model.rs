//! Capabilities consumed from the model layer.

use crate::core::{Result, Table, Value};

/// A loaded model instance whose attributes can be read by name.
pub trait Entity {
    /// Returns the current value of the attribute `name`.
    ///
    /// Unknown names fail with [`FormError::AttributeNotFound`](crate::FormError::AttributeNotFound).
    fn attribute(&self, name: &str) -> Result<Value>;
}

/// Class-level metadata of a model.
pub trait Model: Entity {
    fn table() -> Table
    where
        Self: Sized;

    /// Translation metadata for models with translatable columns.
    fn translations() -> Option<Translations>
    where
        Self: Sized,
    {
        None
    }
}

/// Where the translated columns of a model live.
#[derive(Debug, Clone)]
pub struct Translations {
    /// Builds the translation model's table.
    pub table: fn() -> Table,
    /// Names of the translated columns, in declaration order.
    pub columns: Vec<String>,
}

impl Translations {
    pub fn new<I, S>(table: fn() -> Table, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn of<M: Model>(columns: &[&str]) -> Self {
        Self::new(M::table, columns.iter().copied())
    }
}
