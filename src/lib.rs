// ============================================================================
// memoform - form binding helpers
// ============================================================================

//! Helpers for binding submitted forms to loaded models.
//!
//! The two pieces with real behavior are [`HierarchyMap`], an ordered map
//! whose containment test follows class inheritance, and [`find_entity`],
//! which pairs a submitted payload with the loaded entity sharing its
//! primary key. Everything else is coercion and small utilities around
//! [`Column`], [`DataType`] and [`Value`].
//!
//! # Examples
//!
//! ```
//! use memoform::{Model, find_model_entity};
//! use serde_json::json;
//!
//! #[derive(Model)]
//! #[model(table = "tags")]
//! struct Tag {
//!     #[column(primary_key)]
//!     id: i64,
//!     label: String,
//! }
//!
//! # fn main() -> memoform::Result<()> {
//! let tags = vec![
//!     Tag { id: 1, label: "rust".into() },
//!     Tag { id: 2, label: "forms".into() },
//! ];
//! let data = json!({"id": "2", "label": "renamed"});
//!
//! let found = find_model_entity(&tags, data.as_object().unwrap())?;
//! assert_eq!(found.map(|tag| tag.label.as_str()), Some("forms"));
//! # Ok(())
//! # }
//! ```

extern crate self as memoform;

pub mod convert;
pub mod core;
pub mod hierarchy;
pub mod matcher;
pub mod model;
pub mod prelude;
pub mod utils;

// Re-export main types for convenience
pub use crate::convert::{CoerceError, CoerceResult, CoercionConfig, ColumnDescriptor, FormData, RawValue};
pub use crate::core::{Column, ColumnValue, DataType, FormError, Result, Table, Value};
pub use crate::hierarchy::{Class, ClassQuery, ClassRef, HierarchyMap, Instance};
pub use crate::matcher::{EntityMatcher, find_entity, find_model_entity};
pub use crate::model::{Entity, Model, Translations};

// Derive macros share their names with the traits they implement
pub use memoform_derive::{Class, Model};
