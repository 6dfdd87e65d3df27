// ABOUTME: Named parameter source backed by the properties and public fields of one bean
// ABOUTME: Resolves accessors first, then fields, normalizing zone-aware date-times
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

use super::ParameterSource;
use crate::introspect::{Bean, BeanMetadata, FieldAccess};
use sqltemplate_core::{AppResult, BindingError, ReferenceZone, SqlValue};
use std::sync::Arc;

/// [`ParameterSource`] that obtains values from a bean
///
/// The set of known names is fixed by the type's metadata; values are read from the
/// bean on every lookup.
pub struct BeanParameterSource<'a, T> {
    bean: &'a T,
    metadata: Arc<BeanMetadata<T>>,
    zone: ReferenceZone,
}

impl<'a, T: Bean> BeanParameterSource<'a, T> {
    /// Create a source, introspecting `T` directly
    #[must_use]
    pub fn new(bean: &'a T, zone: ReferenceZone) -> Self {
        Self::with_metadata(bean, Arc::new(BeanMetadata::introspect()), zone)
    }

    /// Create a source from previously introspected metadata
    #[must_use]
    pub const fn with_metadata(
        bean: &'a T,
        metadata: Arc<BeanMetadata<T>>,
        zone: ReferenceZone,
    ) -> Self {
        Self {
            bean,
            metadata,
            zone,
        }
    }
}

impl<T: Bean> ParameterSource for BeanParameterSource<'_, T> {
    fn has_value(&self, name: &str) -> bool {
        self.metadata.property(name).is_some() || self.metadata.field(name).is_some()
    }

    fn value(&self, name: &str) -> AppResult<SqlValue> {
        let value = if let Some(read) = self.metadata.property(name) {
            read(self.bean)
        } else {
            match self.metadata.field(name) {
                Some(FieldAccess::Public(read)) => read(self.bean),
                Some(FieldAccess::Restricted) => {
                    return Err(
                        BindingError::inaccessible_field(self.metadata.type_name(), name).into(),
                    );
                }
                None => SqlValue::Null,
            }
        };

        if value.is_null() {
            return Ok(value);
        }
        Ok(self.zone.normalize(value))
    }

    fn parameter_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.metadata.property_names().collect();
        for field in self.metadata.field_names() {
            if !names.contains(&field) {
                names.push(field);
            }
        }
        names.sort_unstable();
        names
    }
}
