// ABOUTME: Parameter sources and the argument-shape dispatch used by SqlTemplate
// ABOUTME: Resolves positional, map, and bean arguments into bound SQL statements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

//! # Parameter binding
//!
//! Every call site hands an argument to [`IntoParams`], which classifies it exactly
//! once into [`Params`]:
//!
//! - positional values (`()`, tuples, `Vec`, arrays) bind `?` markers in order;
//! - a simple scalar binds as a single positional value, or as its elements when
//!   it is itself a sequence;
//! - a string-keyed map binds `:name` markers through a [`MapParameterSource`];
//! - a reference to a [`Bean`] binds `:name` markers through a
//!   [`BeanParameterSource`].

/// Bean-backed parameter source
pub mod bean;
/// Map-backed parameter source
pub mod map;
/// Named placeholder expansion
pub mod named;

pub use bean::BeanParameterSource;
pub use map::MapParameterSource;
pub use named::ParsedSql;

use crate::introspect::{Bean, DescriptorRegistry};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde_json::{Map, Value};
use sqltemplate_core::constants::binding::ARGS_CONTEXT_KEY;
use sqltemplate_core::{AppError, AppResult, BindingError, ReferenceZone, SqlValue};
use std::collections::HashMap;
use std::fmt;

/// Name-addressable view over a set of parameter values
pub trait ParameterSource {
    /// Whether `name` is known to this source, regardless of its value
    fn has_value(&self, name: &str) -> bool;

    /// Current value for `name`; unknown names yield `SqlValue::Null`
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error when a known name cannot be read.
    fn value(&self, name: &str) -> AppResult<SqlValue>;

    /// All known names, sorted
    fn parameter_names(&self) -> Vec<&str>;

    /// JSON object of every readable name, used as a template context
    fn to_context(&self) -> Value {
        let object: Map<String, Value> = self
            .parameter_names()
            .into_iter()
            .filter_map(|name| {
                self.value(name)
                    .ok()
                    .map(|value| (name.to_owned(), value.to_json()))
            })
            .collect();
        Value::Object(object)
    }
}

/// How a statement binds its values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `?` markers bound in order
    Positional,
    /// `:name` markers resolved through a parameter source
    Named,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional => f.write_str("positional"),
            Self::Named => f.write_str("named"),
        }
    }
}

/// SQL ready for the driver: positional markers and their values in order
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    /// SQL with `?` markers only
    pub sql: String,
    /// Values for each marker, already normalized
    pub values: Vec<SqlValue>,
}

/// A call argument classified by shape
pub enum Params<'a> {
    /// Positional values
    Positional(Vec<SqlValue>),
    /// Named values held in a map
    Map(MapParameterSource),
    /// Named values read from a bean
    Bean(Box<dyn ParameterSource + 'a>),
}

impl Params<'_> {
    /// Binding strategy for this argument
    #[must_use]
    pub const fn kind(&self) -> BindingKind {
        match self {
            Self::Positional(_) => BindingKind::Positional,
            Self::Map(_) | Self::Bean(_) => BindingKind::Named,
        }
    }

    /// The named source, if this argument binds by name
    #[must_use]
    pub fn source(&self) -> Option<&dyn ParameterSource> {
        match self {
            Self::Positional(_) => None,
            Self::Map(map) => Some(map),
            Self::Bean(bean) => Some(bean.as_ref()),
        }
    }

    /// Context handed to template engines
    ///
    /// Named arguments expose their names directly; positional arguments appear as
    /// an `args` array.
    #[must_use]
    pub fn template_context(&self) -> Value {
        match self {
            Self::Positional(values) => {
                let mut object = Map::new();
                object.insert(
                    ARGS_CONTEXT_KEY.to_owned(),
                    Value::Array(values.iter().map(SqlValue::to_json).collect()),
                );
                Value::Object(object)
            }
            Self::Map(map) => map.to_context(),
            Self::Bean(bean) => bean.to_context(),
        }
    }

    /// Bind rendered SQL against this argument
    ///
    /// # Errors
    ///
    /// Named arguments fail when the SQL references an unknown name. Positional
    /// arguments fail when a value is itself a sequence, or when the number of
    /// values differs from the number of parameters the SQL declares.
    pub fn bind(&self, sql: String) -> AppResult<BoundStatement> {
        match self {
            Self::Positional(values) => {
                if let Some(index) = values.iter().position(|v| matches!(v, SqlValue::Seq(_))) {
                    return Err(AppError::invalid_argument(format!(
                        "positional argument {index} is a sequence and cannot bind a single marker"
                    )));
                }
                let expected = ParsedSql::parse(&sql).parameter_count();
                if expected != values.len() {
                    return Err(BindingError::ParameterCount {
                        expected,
                        actual: values.len(),
                    }
                    .into());
                }
                Ok(BoundStatement {
                    sql,
                    values: values.clone(),
                })
            }
            Self::Map(map) => ParsedSql::parse(&sql).expand(map),
            Self::Bean(bean) => ParsedSql::parse(&sql).expand(bean.as_ref()),
        }
    }
}

impl fmt::Debug for Params<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional(values) => f.debug_tuple("Positional").field(values).finish(),
            Self::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Self::Bean(bean) => f
                .debug_tuple("Bean")
                .field(&bean.parameter_names())
                .finish(),
        }
    }
}

/// Builds [`Params`] with a shared reference zone and descriptor registry
#[derive(Clone, Default)]
pub struct ParameterBuilder {
    zone: ReferenceZone,
    registry: DescriptorRegistry,
}

impl ParameterBuilder {
    /// Builder using `zone` and a fresh registry
    #[must_use]
    pub fn new(zone: ReferenceZone) -> Self {
        Self::with_registry(zone, DescriptorRegistry::new())
    }

    /// Builder sharing an existing registry
    #[must_use]
    pub const fn with_registry(zone: ReferenceZone, registry: DescriptorRegistry) -> Self {
        Self { zone, registry }
    }

    /// Reference zone applied to zone-aware values
    #[must_use]
    pub const fn zone(&self) -> ReferenceZone {
        self.zone
    }

    /// Registry of introspected bean types
    #[must_use]
    pub const fn registry(&self) -> &DescriptorRegistry {
        &self.registry
    }

    /// Positional arguments
    pub fn by_args<'a>(&self, args: impl IntoIterator<Item = SqlValue>) -> Params<'a> {
        Params::Positional(args.into_iter().map(|v| self.zone.normalize(v)).collect())
    }

    /// A single simple value: one positional argument, or its elements
    #[must_use]
    pub fn by_value<'a>(&self, value: SqlValue) -> Params<'a> {
        match value {
            SqlValue::Seq(items) => self.by_args(items),
            single => self.by_args([single]),
        }
    }

    /// Named arguments from key/value pairs
    pub fn by_map<'a, K, V>(&self, entries: impl IntoIterator<Item = (K, V)>) -> Params<'a>
    where
        K: Into<String>,
        V: Into<SqlValue>,
    {
        Params::Map(MapParameterSource::new(entries, self.zone))
    }

    /// Named arguments read from a bean
    #[must_use]
    pub fn by_bean<'a, T: Bean>(&self, bean: &'a T) -> Params<'a> {
        let metadata = self.registry.metadata::<T>();
        Params::Bean(Box::new(BeanParameterSource::with_metadata(
            bean, metadata, self.zone,
        )))
    }
}

/// Conversion of a call argument into classified [`Params`]
pub trait IntoParams<'a> {
    /// Classify `self` using `builder`'s zone and registry
    fn into_params(self, builder: &ParameterBuilder) -> Params<'a>;
}

impl<'a> IntoParams<'a> for Params<'a> {
    fn into_params(self, _builder: &ParameterBuilder) -> Params<'a> {
        self
    }
}

impl<'a, T: Bean> IntoParams<'a> for &'a T {
    fn into_params(self, builder: &ParameterBuilder) -> Params<'a> {
        builder.by_bean(self)
    }
}

impl<'a> IntoParams<'a> for () {
    fn into_params(self, builder: &ParameterBuilder) -> Params<'a> {
        builder.by_args([])
    }
}

macro_rules! impl_into_params_for_simple {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'a> IntoParams<'a> for $ty {
                fn into_params(self, builder: &ParameterBuilder) -> Params<'a> {
                    builder.by_value(self.into())
                }
            }
        )*
    };
}

// u64 and usize are left out: convert them with `SqlValue::try_from` first
impl_into_params_for_simple!(
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    bool,
    String,
    &String,
    &str,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    SqlValue,
);

impl<'a, Tz: TimeZone> IntoParams<'a> for DateTime<Tz> {
    fn into_params(self, builder: &ParameterBuilder) -> Params<'a> {
        builder.by_value(self.into())
    }
}

impl<'a, T: Into<SqlValue>> IntoParams<'a> for Option<T> {
    fn into_params(self, builder: &ParameterBuilder) -> Params<'a> {
        builder.by_value(self.into())
    }
}

impl<'a, T: Into<SqlValue>> IntoParams<'a> for Vec<T> {
    fn into_params(self, builder: &ParameterBuilder) -> Params<'a> {
        builder.by_args(self.into_iter().map(Into::into))
    }
}

impl<'a, T: Into<SqlValue>, const N: usize> IntoParams<'a> for [T; N] {
    fn into_params(self, builder: &ParameterBuilder) -> Params<'a> {
        builder.by_args(self.into_iter().map(Into::into))
    }
}

impl<'a, K: Into<String>, V: Into<SqlValue>, S> IntoParams<'a> for HashMap<K, V, S> {
    fn into_params(self, builder: &ParameterBuilder) -> Params<'a> {
        builder.by_map(self)
    }
}

macro_rules! impl_into_params_for_tuple {
    ($($name:ident),+) => {
        impl<'a, $($name: Into<SqlValue>),+> IntoParams<'a> for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_params(self, builder: &ParameterBuilder) -> Params<'a> {
                let ($($name,)+) = self;
                builder.by_args([$($name.into()),+])
            }
        }
    };
}

impl_into_params_for_tuple!(A);
impl_into_params_for_tuple!(A, B);
impl_into_params_for_tuple!(A, B, C);
impl_into_params_for_tuple!(A, B, C, D);
impl_into_params_for_tuple!(A, B, C, D, E);
impl_into_params_for_tuple!(A, B, C, D, E, F);
