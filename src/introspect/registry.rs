// ABOUTME: Concurrent type-level cache of bean introspection results
// ABOUTME: Populated at most effectively once per type, shared read-mostly across calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

use super::{Bean, BeanMetadata};
use dashmap::DashMap;
use std::any::{type_name, Any, TypeId};
use std::sync::Arc;
use tracing::debug;

type Entry = Arc<dyn Any + Send + Sync>;

/// Registry of [`BeanMetadata`] keyed by `TypeId`
///
/// Cloning shares the underlying map. Entries are never replaced once inserted;
/// two threads introspecting the same type concurrently both compute metadata and
/// the first insert wins.
#[derive(Clone, Default)]
pub struct DescriptorRegistry {
    entries: Arc<DashMap<TypeId, Entry>>,
}

impl DescriptorRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata for `T`, introspecting it on first use
    #[must_use]
    pub fn metadata<T: Bean>(&self) -> Arc<BeanMetadata<T>> {
        let key = TypeId::of::<T>();

        let cached = self.entries.get(&key).map(|entry| Arc::clone(entry.value()));
        if let Some(metadata) = cached.and_then(|entry| entry.downcast::<BeanMetadata<T>>().ok()) {
            return metadata;
        }

        // Introspect without holding a shard lock
        let fresh: Entry = Arc::new(BeanMetadata::<T>::introspect());
        let stored = Arc::clone(self.entries.entry(key).or_insert(fresh).value());
        debug!(
            bean.type = type_name::<T>(),
            registry.size = self.entries.len(),
            "Registered bean metadata"
        );

        stored
            .downcast::<BeanMetadata<T>>()
            .unwrap_or_else(|_| Arc::new(BeanMetadata::<T>::introspect()))
    }

    /// Number of introspected types
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no type has been introspected yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
