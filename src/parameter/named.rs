// ABOUTME: Expansion of :name placeholders into positional ? markers
// ABOUTME: Skips quoted literals, comments, and :: casts while scanning SQL text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

//! Named placeholder expansion
//!
//! The driver only understands positional markers, so named SQL is rewritten before
//! execution. Sequence values expand to one marker per element, which lets a single
//! `:ids` fill an `IN (...)` list; nested sequences become parenthesized groups.

use super::{BoundStatement, ParameterSource};
use sqltemplate_core::{AppError, AppResult, BindingError, SqlValue};

/// A `:name` occurrence in SQL text
#[derive(Debug, Clone, PartialEq, Eq)]
struct Placeholder {
    name: String,
    start: usize,
    end: usize,
}

/// SQL text with its named placeholders located
#[derive(Debug, Clone)]
pub struct ParsedSql<'s> {
    sql: &'s str,
    placeholders: Vec<Placeholder>,
    parameter_count: usize,
}

impl<'s> ParsedSql<'s> {
    /// Scan `sql` for named placeholders and positional markers
    #[must_use]
    pub fn parse(sql: &'s str) -> Self {
        let bytes = sql.as_bytes();
        let mut placeholders: Vec<Placeholder> = Vec::new();
        let mut parameter_count = 0;
        let mut i = 0;

        while i < bytes.len() {
            match (bytes[i], bytes.get(i + 1).copied()) {
                (quote @ (b'\'' | b'"'), _) => {
                    i += 1;
                    while i < bytes.len() && bytes[i] != quote {
                        i += 1;
                    }
                    i += 1;
                }
                (b'-', Some(b'-')) => {
                    while i < bytes.len() && bytes[i] != b'\n' {
                        i += 1;
                    }
                }
                (b'/', Some(b'*')) => {
                    i += 2;
                    while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                        i += 1;
                    }
                    i += 2;
                }
                (b':', Some(b':')) => i += 2,
                (b'?', _) => {
                    let start = i + 1;
                    i += 1;
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        i += 1;
                    }
                    // ?NNN sets the index, a bare ? takes the next one
                    parameter_count = sql[start..i]
                        .parse::<usize>()
                        .map_or(parameter_count + 1, |n| parameter_count.max(n));
                }
                (b':', Some(next)) if is_name_byte(next) => {
                    let start = i;
                    i += 1;
                    while i < bytes.len() && is_name_byte(bytes[i]) {
                        i += 1;
                    }
                    let name = &sql[start + 1..i];
                    if !placeholders.iter().any(|p| p.name == name) {
                        parameter_count += 1;
                    }
                    placeholders.push(Placeholder {
                        name: name.to_owned(),
                        start,
                        end: i,
                    });
                }
                _ => i += 1,
            }
        }

        Self {
            sql,
            placeholders,
            parameter_count,
        }
    }

    /// Placeholder names in order of appearance, repeats included
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.placeholders.iter().map(|p| p.name.as_str())
    }

    /// Whether any named placeholder was found
    #[must_use]
    pub fn has_placeholders(&self) -> bool {
        !self.placeholders.is_empty()
    }

    /// Number of values the driver binds for this SQL as written
    ///
    /// Follows SQLite numbering: `?NNN` claims index `NNN`, a bare `?` takes the
    /// next free index, and each distinct `:name` takes one index.
    #[must_use]
    pub const fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    /// Rewrite into positional SQL, resolving every name against `source`
    ///
    /// # Errors
    ///
    /// Returns a missing-parameter error for a name the source does not know, and
    /// propagates errors raised while reading a value.
    pub fn expand(&self, source: &dyn ParameterSource) -> AppResult<BoundStatement> {
        let mut sql = String::with_capacity(self.sql.len());
        let mut values = Vec::with_capacity(self.placeholders.len());
        let mut last = 0;

        for placeholder in &self.placeholders {
            if !source.has_value(&placeholder.name) {
                return Err(BindingError::missing_parameter(&placeholder.name).into());
            }
            sql.push_str(&self.sql[last..placeholder.start]);
            let value = source.value(&placeholder.name)?;
            push_markers(&mut sql, &mut values, value, &placeholder.name)?;
            last = placeholder.end;
        }
        sql.push_str(&self.sql[last..]);

        Ok(BoundStatement { sql, values })
    }
}

fn push_markers(
    sql: &mut String,
    values: &mut Vec<SqlValue>,
    value: SqlValue,
    name: &str,
) -> AppResult<()> {
    let SqlValue::Seq(items) = value else {
        sql.push('?');
        values.push(value);
        return Ok(());
    };

    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            sql.push_str(", ");
        }
        match item {
            SqlValue::Seq(group) => {
                if group.iter().any(|v| matches!(v, SqlValue::Seq(_))) {
                    return Err(AppError::invalid_argument(format!(
                        "parameter '{name}' nests sequences more than two levels deep"
                    )));
                }
                sql.push('(');
                sql.push_str(&vec!["?"; group.len()].join(", "));
                sql.push(')');
                values.extend(group);
            }
            scalar => {
                sql.push('?');
                values.push(scalar);
            }
        }
    }
    Ok(())
}

const fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
