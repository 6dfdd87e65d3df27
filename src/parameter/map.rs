// ABOUTME: Named parameter source over a string-keyed map of values
// ABOUTME: Values are normalized once when the source is built
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

use super::ParameterSource;
use sqltemplate_core::{AppResult, ReferenceZone, SqlValue};
use std::collections::HashMap;

/// [`ParameterSource`] holding its values in a map
#[derive(Debug, Clone, Default)]
pub struct MapParameterSource {
    values: HashMap<String, SqlValue>,
}

impl MapParameterSource {
    /// Build a source from key/value pairs
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>, zone: ReferenceZone) -> Self
    where
        K: Into<String>,
        V: Into<SqlValue>,
    {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.into(), zone.normalize(v.into())))
                .collect(),
        }
    }

    /// Add or replace one value
    pub fn insert(&mut self, key: impl Into<String>, value: SqlValue, zone: ReferenceZone) {
        self.values.insert(key.into(), zone.normalize(value));
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ParameterSource for MapParameterSource {
    fn has_value(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    fn value(&self, name: &str) -> AppResult<SqlValue> {
        Ok(self.values.get(name).cloned().unwrap_or(SqlValue::Null))
    }

    fn parameter_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn test_map_lookup() {
        let source = MapParameterSource::new(
            [("deptno", SqlValue::from(30)), ("job", SqlValue::from("SALESMAN"))],
            ReferenceZone::Utc,
        );

        assert_eq!(source.len(), 2);
        assert!(source.has_value("job"));
        assert!(!source.has_value("mgr"));
        assert_eq!(source.value("deptno").unwrap(), SqlValue::Int(30));
        assert_eq!(source.value("mgr").unwrap(), SqlValue::Null);
        assert_eq!(source.parameter_names(), vec!["deptno", "job"]);
    }

    #[test]
    fn test_map_values_are_normalized() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let instant = offset.with_ymd_and_hms(2024, 5, 1, 1, 0, 0).unwrap();
        let mut source = MapParameterSource::default();
        source.insert("since", instant.into(), ReferenceZone::Utc);

        let SqlValue::DateTime(naive) = source.value("since").unwrap() else {
            panic!("expected a naive date-time");
        };
        assert_eq!(naive.to_string(), "2024-05-01 00:00:00");
    }
}
