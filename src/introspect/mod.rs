// ABOUTME: Field introspection for bean types via explicit descriptor registration
// ABOUTME: Derives the readable accessor-property set and public-field handles per type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

//! # Field Introspector
//!
//! Bean types describe themselves once through [`Bean::describe`]: accessor-style
//! properties (computed or private state exposed by a getter) and public fields
//! (plain data read directly). [`BeanMetadata`] is the introspection result that
//! parameter sources consult by name.
//!
//! Every bean also carries an implicit readable `class` property whose value is the
//! type name. The accessor set is only populated when the type declares more than
//! that single descriptor, so types described purely by public fields expose no
//! accessor names at all.

/// Type-level metadata cache
pub mod registry;

pub use registry::DescriptorRegistry;

use sqltemplate_core::constants::binding::CLASS_PROPERTY;
use sqltemplate_core::SqlValue;
use std::any::type_name;
use std::collections::HashMap;

/// Reads one named value out of a bean
pub type Reader<T> = fn(&T) -> SqlValue;

/// How a public field handle can be read
pub enum FieldAccess<T> {
    /// The field can be read directly
    Public(Reader<T>),
    /// The field is declared but reading it is not permitted
    Restricted,
}

impl<T> Clone for FieldAccess<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldAccess<T> {}

/// A type whose named properties can bind SQL parameters
///
/// ```rust
/// use sqltemplate::introspect::{Bean, BeanDescriptorBuilder};
///
/// struct Dept {
///     deptno: i64,
///     dname: String,
/// }
///
/// impl Bean for Dept {
///     fn describe(builder: BeanDescriptorBuilder<Self>) -> BeanDescriptorBuilder<Self> {
///         builder
///             .field("deptno", |d| d.deptno.into())
///             .field("dname", |d| d.dname.as_str().into())
///     }
/// }
/// ```
pub trait Bean: Sized + 'static {
    /// Register the readable properties and public fields of this type
    fn describe(builder: BeanDescriptorBuilder<Self>) -> BeanDescriptorBuilder<Self>;
}

/// Collects property and field descriptors for one bean type
pub struct BeanDescriptorBuilder<T> {
    accessors: Vec<(&'static str, Option<Reader<T>>)>,
    fields: Vec<(&'static str, FieldAccess<T>)>,
}

impl<T: Bean> BeanDescriptorBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            accessors: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Register a readable accessor-based property
    #[must_use]
    pub fn accessor(mut self, name: &'static str, read: Reader<T>) -> Self {
        self.accessors.push((name, Some(read)));
        self
    }

    /// Register a property that has a setter but no getter
    #[must_use]
    pub fn write_only(mut self, name: &'static str) -> Self {
        self.accessors.push((name, None));
        self
    }

    /// Register a directly readable public field
    #[must_use]
    pub fn field(mut self, name: &'static str, read: Reader<T>) -> Self {
        self.fields.push((name, FieldAccess::Public(read)));
        self
    }

    /// Register a public field whose declaring type does not permit reads
    #[must_use]
    pub fn restricted_field(mut self, name: &'static str) -> Self {
        self.fields.push((name, FieldAccess::Restricted));
        self
    }
}

/// Introspection result for one bean type
pub struct BeanMetadata<T> {
    type_name: &'static str,
    properties: HashMap<&'static str, Reader<T>>,
    fields: HashMap<&'static str, FieldAccess<T>>,
}

impl<T: Bean> BeanMetadata<T> {
    /// Introspect `T` from its registered descriptors
    #[must_use]
    pub fn introspect() -> Self {
        let builder = T::describe(BeanDescriptorBuilder::new());

        // The implicit class descriptor always counts
        let descriptor_count = builder.accessors.len() + 1;
        let mut properties = HashMap::new();
        if descriptor_count > 1 {
            properties.insert(CLASS_PROPERTY, class_of::<T> as Reader<T>);
            for (name, read) in builder.accessors {
                if let Some(read) = read {
                    properties.insert(name, read);
                }
            }
        }

        Self {
            type_name: type_name::<T>(),
            properties,
            fields: builder.fields.into_iter().collect(),
        }
    }

    /// Fully qualified type name
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Accessor for a readable property
    #[must_use]
    pub fn property(&self, name: &str) -> Option<Reader<T>> {
        self.properties.get(name).copied()
    }

    /// Handle for a public field
    #[must_use]
    pub fn field(&self, name: &str) -> Option<FieldAccess<T>> {
        self.fields.get(name).copied()
    }

    /// Names of readable accessor properties
    pub fn property_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.keys().copied()
    }

    /// Names of public fields
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }
}

fn class_of<T>(_: &T) -> SqlValue {
    SqlValue::Text(type_name::<T>().to_owned())
}
