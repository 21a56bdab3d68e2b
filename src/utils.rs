//! Small helpers used when binding forms to models.

use serde_json::Value as JsonValue;

use crate::convert::{CoerceError, CoerceResult, CoercionConfig, RawToValueConverter, RawValue};
use crate::core::{Column, DataType, Result, Table};
use crate::model::Model;

/// Trims string values; anything else is returned unchanged.
pub fn strip_string(value: RawValue) -> RawValue {
    match value {
        JsonValue::String(s) => JsonValue::String(s.trim().to_string()),
        other => other,
    }
}

pub fn is_scalar(value: &RawValue) -> bool {
    matches!(
        value,
        JsonValue::Null | JsonValue::String(_) | JsonValue::Number(_) | JsonValue::Bool(_)
    )
}

/// Text form of `value`, or `None` when that text would be empty.
pub fn null_or_unicode(value: &RawValue) -> Option<String> {
    let text = match value {
        JsonValue::Null => return None,
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.is_empty() { None } else { Some(text) }
}

/// Integer form of `value`.
///
/// Values of a kind that has no integer form (null, arrays, objects) give
/// `Ok(None)`; malformed strings are an error.
pub fn null_or_int(value: &RawValue) -> CoerceResult<Option<i64>> {
    match RawToValueConverter::convert(value, DataType::Integer, &CoercionConfig::default()) {
        Ok(coerced) => Ok(coerced.as_i64()),
        Err(CoerceError::WrongType { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Flattens arbitrarily nested arrays into a single list of leaves.
pub fn flatten(value: RawValue) -> Vec<RawValue> {
    let mut result = Vec::new();
    flatten_into(value, &mut result);
    result
}

fn flatten_into(value: RawValue, result: &mut Vec<RawValue>) {
    match value {
        JsonValue::Array(items) => {
            for item in items {
                flatten_into(item, result);
            }
        }
        other => result.push(other),
    }
}

pub fn is_integer_column(column: &Column) -> bool {
    column.data_type.is_integer()
}

pub fn is_numerical_column(column: &Column) -> bool {
    column.data_type.is_numerical()
}

pub fn is_date_column(column: &Column) -> bool {
    column.data_type.is_date()
}

pub fn table<M: Model>() -> Table {
    M::table()
}

pub fn primary_keys(table: &Table) -> impl Iterator<Item = &Column> {
    table.primary_keys()
}

/// Columns of `M`'s translation table that hold its translated attributes.
///
/// Models without translations have none.
pub fn translated_attributes<M: Model>() -> Result<Vec<Column>> {
    let Some(translations) = M::translations() else {
        return Ok(Vec::new());
    };

    let translation_table = (translations.table)();
    translations
        .columns
        .iter()
        .map(|name| translation_table.column(name).cloned())
        .collect()
}
