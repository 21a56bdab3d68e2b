//! Everything a form layer usually needs, in one import.
//!
//! ```
//! use memoform::prelude::*;
//! ```

pub use crate::convert::{CoercionConfig, ColumnDescriptor, FormData};
pub use crate::core::{Column, DataType, FormError, Table, Value};
pub use crate::hierarchy::{ClassRef, HierarchyMap, Instance};
pub use crate::matcher::{EntityMatcher, find_entity, find_model_entity};
pub use crate::model::{Entity, Translations};
pub use crate::{Class, Model};
pub use crate::utils::{
    flatten, is_date_column, is_integer_column, is_numerical_column, is_scalar, null_or_int,
    null_or_unicode, primary_keys, strip_string, translated_attributes,
};
