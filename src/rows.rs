// ABOUTME: Generic row type mapping any result set row into a JSON object
// ABOUTME: Used where no typed FromRow struct exists, such as the command line tool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

use serde::Serialize;
use serde_json::{Map, Number, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, FromRow, Row, TypeInfo, ValueRef};

/// One result row as column name to JSON value
///
/// Columns are decoded by their storage class: integers and reals become numbers,
/// blobs become arrays of bytes, everything else is text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JsonRow(Map<String, Value>);

impl JsonRow {
    /// Value of `column`, if present
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Number of columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no columns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The underlying JSON object
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl<'r> FromRow<'r, SqliteRow> for JsonRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let mut columns = Map::new();
        for column in row.columns() {
            let index = column.ordinal();
            let raw = row.try_get_raw(index)?;
            let value = if raw.is_null() {
                Value::Null
            } else {
                let type_info = raw.type_info();
                match type_info.name() {
                    "INTEGER" => Value::from(row.try_get_unchecked::<i64, _>(index)?),
                    "REAL" => Number::from_f64(row.try_get_unchecked::<f64, _>(index)?)
                        .map_or(Value::Null, Value::Number),
                    "BLOB" => Value::from(row.try_get_unchecked::<Vec<u8>, _>(index)?),
                    _ => Value::String(row.try_get_unchecked::<String, _>(index)?),
                }
            };
            columns.insert(column.name().to_owned(), value);
        }
        Ok(Self(columns))
    }
}
