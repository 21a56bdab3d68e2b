use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Typed attribute value as exposed by model instances and produced by coercion.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
    Json(serde_json::Value),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Float(f) => float_to_i64(*f),
            _ => None,
        }
    }
}

/// `f` truncated toward zero, when that fits an `i64`.
///
/// The upper bound is exclusive: `i64::MAX as f64` rounds up to 2^63.
pub(crate) fn float_to_i64(f: f64) -> Option<i64> {
    let t = f.trunc();
    if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

/// Exact equality. Floats compare with IEEE semantics, so `NaN` equals
/// nothing; an integer equals a float only when the float is integral and
/// converts to exactly that integer.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Integer(i), Self::Float(f)) | (Self::Float(f), Self::Integer(i)) => {
                f.fract() == 0.0 && float_to_i64(*f) == Some(*i)
            }
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::Uuid(a), Self::Uuid(b)) => a == b,
            (Self::Json(a), Self::Json(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(fl) => {
                if fl.is_nan() {
                    write!(f, "NaN")
                } else if fl.is_infinite() {
                    if *fl > 0.0 {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else {
                    write!(f, "{}", fl)
                }
            }
            Self::Text(s) => write!(f, "{}", s),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Time(t) => write!(f, "{}", t),
            Self::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
            Self::Uuid(u) => write!(f, "{}", u),
            Self::Json(j) => write!(f, "{}", j),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

/// Column type of a model attribute.
///
/// Mirrors the usual ORM column types closely enough for form binding:
/// the integer family, the numeric family and the date family are the
/// groups the classification predicates care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    SmallInteger,
    Integer,
    BigInteger,
    Float,
    Numeric,
    Text,
    Boolean,
    Date,
    Time,
    Timestamp,
    Uuid,
    Json,
}

impl DataType {
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::SmallInteger | Self::Integer | Self::BigInteger)
    }

    pub fn is_numerical(&self) -> bool {
        self.is_integer() || matches!(self, Self::Float | Self::Numeric)
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date | Self::Timestamp)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SmallInteger => write!(f, "SMALLINT"),
            Self::Integer => write!(f, "INTEGER"),
            Self::BigInteger => write!(f, "BIGINT"),
            Self::Float => write!(f, "FLOAT"),
            Self::Numeric => write!(f, "NUMERIC"),
            Self::Text => write!(f, "TEXT"),
            Self::Boolean => write!(f, "BOOLEAN"),
            Self::Date => write!(f, "DATE"),
            Self::Time => write!(f, "TIME"),
            Self::Timestamp => write!(f, "TIMESTAMP"),
            Self::Uuid => write!(f, "UUID"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

/// Rust field types that can back a model column.
///
/// `#[derive(Model)]` uses this to infer each column's [`DataType`] and to
/// read attribute values by name.
pub trait ColumnValue {
    fn data_type() -> DataType
    where
        Self: Sized;

    fn nullable() -> bool
    where
        Self: Sized,
    {
        false
    }

    fn to_value(&self) -> Value;
}

macro_rules! integer_column_value {
    ($($ty:ty => $data_type:ident),* $(,)?) => {
        $(
            impl ColumnValue for $ty {
                fn data_type() -> DataType {
                    DataType::$data_type
                }

                fn to_value(&self) -> Value {
                    Value::Integer(i64::from(*self))
                }
            }
        )*
    };
}

integer_column_value! {
    i8 => SmallInteger,
    i16 => SmallInteger,
    u8 => SmallInteger,
    i32 => Integer,
    u16 => Integer,
    i64 => BigInteger,
    u32 => BigInteger,
}

impl ColumnValue for f32 {
    fn data_type() -> DataType {
        DataType::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl ColumnValue for f64 {
    fn data_type() -> DataType {
        DataType::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ColumnValue for bool {
    fn data_type() -> DataType {
        DataType::Boolean
    }

    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }
}

impl ColumnValue for String {
    fn data_type() -> DataType {
        DataType::Text
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ColumnValue for NaiveDate {
    fn data_type() -> DataType {
        DataType::Date
    }

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }
}

impl ColumnValue for NaiveTime {
    fn data_type() -> DataType {
        DataType::Time
    }

    fn to_value(&self) -> Value {
        Value::Time(*self)
    }
}

impl ColumnValue for NaiveDateTime {
    fn data_type() -> DataType {
        DataType::Timestamp
    }

    fn to_value(&self) -> Value {
        Value::Timestamp(self.and_utc())
    }
}

impl ColumnValue for DateTime<Utc> {
    fn data_type() -> DataType {
        DataType::Timestamp
    }

    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }
}

impl ColumnValue for Uuid {
    fn data_type() -> DataType {
        DataType::Uuid
    }

    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }
}

impl ColumnValue for serde_json::Value {
    fn data_type() -> DataType {
        DataType::Json
    }

    fn to_value(&self) -> Value {
        Value::Json(self.clone())
    }
}

impl<T: ColumnValue> ColumnValue for Option<T> {
    fn data_type() -> DataType {
        T::data_type()
    }

    fn nullable() -> bool {
        true
    }

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}
