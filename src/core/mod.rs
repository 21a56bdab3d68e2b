pub mod error;
pub mod types;
pub mod value;

pub use error::{FormError, Result};
pub use types::{Column, Table};
pub use value::{ColumnValue, DataType, Value};
