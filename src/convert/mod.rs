//! Raw payload coercion
//!
//! Turns untyped form payload values (`serde_json::Value`, usually strings
//! straight from a form submission) into typed [`Value`](crate::core::Value)s
//! according to a column's [`DataType`](crate::core::DataType).
//!
//! # Architecture
//!
//! - `converter.rs` - per-type conversion rules and the `ColumnDescriptor` seam
//! - `config.rs` - formats and switches used by the conversion rules
//! - `error.rs` - typed coercion outcome

mod config;
mod converter;
mod error;

pub use config::CoercionConfig;
pub use converter::{ColumnDescriptor, FormData, RawToValueConverter, RawValue, json_kind};
pub use error::{CoerceError, CoerceResult};
