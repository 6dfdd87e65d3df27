// ABOUTME: SQL value model shared by parameter sources, binders, and template contexts
// ABOUTME: Conversions from Rust scalars and chrono types plus a JSON projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

use crate::errors::AppError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde_json::{Number, Value};

/// A single bindable SQL value
///
/// `Timestamp` is the only zone-aware variant; the temporal normalizer rewrites it
/// into `DateTime` before binding.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL `NULL`
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text
    Text(String),
    /// Binary data
    Bytes(Vec<u8>),
    /// Calendar date without zone
    Date(NaiveDate),
    /// Time of day without zone
    Time(NaiveTime),
    /// Date-time without zone
    DateTime(NaiveDateTime),
    /// Date-time carrying an offset
    Timestamp(DateTime<FixedOffset>),
    /// Sequence of values, flattened when used as positional arguments
    Seq(Vec<SqlValue>),
}

impl SqlValue {
    /// Whether this value is SQL `NULL`
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, used in log fields
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::DateTime(_) => "datetime",
            Self::Timestamp(_) => "timestamp",
            Self::Seq(_) => "seq",
        }
    }

    /// Project the value into JSON for template rendering
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::Number((*i).into()),
            Self::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::Text(s) => Value::String(s.clone()),
            Self::Bytes(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
            Self::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            Self::Time(t) => Value::String(t.format("%H:%M:%S%.f").to_string()),
            Self::DateTime(dt) => Value::String(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
            Self::Timestamp(ts) => Value::String(ts.to_rfc3339()),
            Self::Seq(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SqlValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

// SQLite integers are signed 64-bit, so wider unsigned values convert fallibly
macro_rules! impl_try_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<$ty> for SqlValue {
                type Error = AppError;

                fn try_from(value: $ty) -> Result<Self, Self::Error> {
                    i64::try_from(value).map(Self::Int).map_err(|_| {
                        AppError::invalid_argument(format!(
                            "{value} does not fit a signed 64-bit SQL integer"
                        ))
                    })
                }
            }
        )*
    };
}

impl_try_from_unsigned!(u64, usize);

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for SqlValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for SqlValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveTime> for SqlValue {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for SqlValue {
    fn from(value: DateTime<Tz>) -> Self {
        Self::Timestamp(value.fixed_offset())
    }
}

impl<T: Into<Self>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Self> for SqlValue {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::Seq(iter.into_iter().collect())
    }
}
