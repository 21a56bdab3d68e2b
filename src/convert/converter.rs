//! Raw value to typed `Value` conversion

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value as JsonValue;

use super::config::CoercionConfig;
use super::error::{CoerceError, CoerceResult};
use crate::core::value::float_to_i64;
use crate::core::{Column, DataType, Value};

/// A single untyped payload value.
pub type RawValue = JsonValue;

/// Submitted form data, keyed by field name.
pub type FormData = serde_json::Map<String, JsonValue>;

/// Name of the JSON kind of `value`, as used in error messages.
pub fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Something that names a model attribute and knows how to build its
/// typed value from raw payload input.
pub trait ColumnDescriptor {
    fn name(&self) -> &str;

    fn coerce(&self, raw: &RawValue, config: &CoercionConfig) -> CoerceResult<Value>;
}

impl ColumnDescriptor for Column {
    fn name(&self) -> &str {
        &self.name
    }

    fn coerce(&self, raw: &RawValue, config: &CoercionConfig) -> CoerceResult<Value> {
        RawToValueConverter::convert(raw, self.data_type, config)
    }
}

impl<T: ColumnDescriptor + ?Sized> ColumnDescriptor for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn coerce(&self, raw: &RawValue, config: &CoercionConfig) -> CoerceResult<Value> {
        (**self).coerce(raw, config)
    }
}

/// Converts raw payload values to typed values
pub struct RawToValueConverter;

impl RawToValueConverter {
    /// Convert a single raw value to the representation of `data_type`
    pub fn convert(
        raw: &RawValue,
        data_type: DataType,
        config: &CoercionConfig,
    ) -> CoerceResult<Value> {
        match data_type {
            DataType::SmallInteger | DataType::Integer | DataType::BigInteger => {
                Self::to_integer(raw, data_type)
            }
            DataType::Float | DataType::Numeric => Self::to_float(raw, data_type),
            DataType::Text => Self::to_text(raw, config),
            DataType::Boolean => Self::to_boolean(raw),
            DataType::Date => {
                let s = Self::expect_string(raw, data_type)?;
                NaiveDate::parse_from_str(s.trim(), &config.date_format)
                    .map(Value::Date)
                    .map_err(|e| CoerceError::format(data_type, s, e))
            }
            DataType::Time => {
                let s = Self::expect_string(raw, data_type)?;
                NaiveTime::parse_from_str(s.trim(), &config.time_format)
                    .map(Value::Time)
                    .map_err(|e| CoerceError::format(data_type, s, e))
            }
            DataType::Timestamp => {
                let s = Self::expect_string(raw, data_type)?;
                Self::to_timestamp(s.trim(), config)
                    .map(Value::Timestamp)
                    .map_err(|e| CoerceError::format(data_type, s, e))
            }
            DataType::Uuid => {
                let s = Self::expect_string(raw, data_type)?;
                uuid::Uuid::parse_str(s.trim())
                    .map(Value::Uuid)
                    .map_err(|e| CoerceError::format(data_type, s, e))
            }
            DataType::Json => Ok(Value::Json(raw.clone())),
        }
    }

    fn wrong_type(raw: &RawValue, data_type: DataType) -> CoerceError {
        CoerceError::WrongType {
            data_type,
            found: json_kind(raw),
        }
    }

    fn expect_string(raw: &RawValue, data_type: DataType) -> CoerceResult<&str> {
        raw.as_str().ok_or_else(|| Self::wrong_type(raw, data_type))
    }

    fn to_integer(raw: &RawValue, data_type: DataType) -> CoerceResult<Value> {
        match raw {
            JsonValue::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| CoerceError::format(data_type, s.as_str(), e)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(Value::Integer(i));
                }
                // Fractions truncate toward zero; only out-of-range input fails
                n.as_f64()
                    .and_then(float_to_i64)
                    .map(Value::Integer)
                    .ok_or_else(|| CoerceError::format(data_type, n.to_string(), "out of range"))
            }
            JsonValue::Bool(b) => Ok(Value::Integer(i64::from(*b))),
            _ => Err(Self::wrong_type(raw, data_type)),
        }
    }

    fn to_float(raw: &RawValue, data_type: DataType) -> CoerceResult<Value> {
        match raw {
            JsonValue::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| CoerceError::format(data_type, s.as_str(), e)),
            JsonValue::Number(n) => n
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| CoerceError::format(data_type, n.to_string(), "not representable")),
            JsonValue::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
            _ => Err(Self::wrong_type(raw, data_type)),
        }
    }

    fn to_text(raw: &RawValue, config: &CoercionConfig) -> CoerceResult<Value> {
        match raw {
            JsonValue::Null => Err(Self::wrong_type(raw, DataType::Text)),
            JsonValue::String(s) if config.trim_text => Ok(Value::Text(s.trim().to_string())),
            JsonValue::String(s) => Ok(Value::Text(s.clone())),
            // Scalars and nested documents keep their JSON spelling
            other => Ok(Value::Text(other.to_string())),
        }
    }

    fn to_boolean(raw: &RawValue) -> CoerceResult<Value> {
        match raw {
            JsonValue::Bool(b) => Ok(Value::Boolean(*b)),
            JsonValue::Number(n) => Ok(Value::Boolean(n.as_f64().is_some_and(|f| f != 0.0))),
            JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "y" | "on" | "1" => Ok(Value::Boolean(true)),
                "false" | "f" | "no" | "n" | "off" | "0" => Ok(Value::Boolean(false)),
                _ => Err(CoerceError::format(
                    DataType::Boolean,
                    s.as_str(),
                    "expected a boolean literal",
                )),
            },
            _ => Err(Self::wrong_type(raw, DataType::Boolean)),
        }
    }

    fn to_timestamp(s: &str, config: &CoercionConfig) -> Result<DateTime<Utc>, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Ok(dt.with_timezone(&Utc)),
            Err(_) => NaiveDateTime::parse_from_str(s, &config.datetime_format).map(|dt| dt.and_utc()),
        }
    }
}
