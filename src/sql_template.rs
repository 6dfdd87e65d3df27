// ABOUTME: SqlTemplate facade rendering a template, binding arguments by shape, and executing it
// ABOUTME: Provides list, single-object, update, and fluent map query operations over SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

//! # `SqlTemplate`
//!
//! Each call resolves a template identifier to SQL, classifies its argument once,
//! and binds accordingly:
//!
//! | Argument | Binding |
//! |----------|---------|
//! | none (`()`) | positional, no values |
//! | tuple, `Vec`, array | positional |
//! | scalar or [`SqlValue`] | positional, one value or the elements of a sequence |
//! | `HashMap` | named, by key |
//! | `&T` where `T: Bean` | named, by property or public field |
//!
//! All statement preparation is synchronous; only driver calls are awaited.

use crate::config::SqlTemplateConfig;
use crate::database;
use crate::introspect::DescriptorRegistry;
use crate::parameter::{BoundStatement, IntoParams, MapParameterSource, ParameterBuilder, Params};
use crate::template::{TemplateEngine, TemplateLoader, TextFileEngine};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Sqlite, SqlitePool};
use sqltemplate_core::{AppError, AppResult, BindingError, ReferenceZone, SqlValue};
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Bind every value of a statement onto a `sqlx` query or `query_as`
macro_rules! bind_values {
    ($query:expr, $values:expr) => {{
        let mut query = $query;
        for value in $values {
            query = match value {
                // Sequences are expanded or rejected before reaching the driver
                SqlValue::Null | SqlValue::Seq(_) => query.bind(None::<String>),
                SqlValue::Bool(v) => query.bind(v),
                SqlValue::Int(v) => query.bind(v),
                SqlValue::Float(v) => query.bind(v),
                SqlValue::Text(v) => query.bind(v),
                SqlValue::Bytes(v) => query.bind(v),
                SqlValue::Date(v) => query.bind(v),
                SqlValue::Time(v) => query.bind(v),
                SqlValue::DateTime(v) => query.bind(v),
                SqlValue::Timestamp(v) => query.bind(v),
            };
        }
        query
    }};
}

/// Template-driven query executor
#[derive(Clone)]
pub struct SqlTemplate {
    pool: SqlitePool,
    engine: Arc<dyn TemplateEngine>,
    parameters: ParameterBuilder,
}

impl SqlTemplate {
    /// Executor reading plain SQL files below `template_root`
    pub fn new(pool: SqlitePool, template_root: impl Into<PathBuf>) -> Self {
        Self::with_engine(pool, TextFileEngine::new(TemplateLoader::new(template_root)))
    }

    /// Executor using `engine`
    pub fn with_engine(pool: SqlitePool, engine: impl TemplateEngine + 'static) -> Self {
        Self::from_parts(pool, Arc::new(engine), ParameterBuilder::default())
    }

    /// Executor from an already shared engine and parameter builder
    #[must_use]
    pub fn from_parts(
        pool: SqlitePool,
        engine: Arc<dyn TemplateEngine>,
        parameters: ParameterBuilder,
    ) -> Self {
        Self {
            pool,
            engine,
            parameters,
        }
    }

    /// Connect using `config`: pool, engine, and reference zone
    ///
    /// # Errors
    ///
    /// Returns a database error if the pool cannot be opened
    pub async fn connect(config: &SqlTemplateConfig) -> AppResult<Self> {
        let pool = database::connect(&config.database).await?;
        Ok(Self::from_parts(
            pool,
            Arc::from(config.build_engine()),
            ParameterBuilder::new(config.zone),
        ))
    }

    /// Same executor observing zone-aware values in `zone`
    ///
    /// The descriptor registry stays shared with `self`.
    #[must_use]
    pub fn with_zone(mut self, zone: ReferenceZone) -> Self {
        let registry: DescriptorRegistry = self.parameters.registry().clone();
        self.parameters = ParameterBuilder::with_registry(zone, registry);
        self
    }

    /// Same executor using `parameters` to classify arguments
    #[must_use]
    pub fn with_parameter_builder(mut self, parameters: ParameterBuilder) -> Self {
        self.parameters = parameters;
        self
    }

    /// Underlying connection pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Parameter builder used for every call
    #[must_use]
    pub const fn parameters(&self) -> &ParameterBuilder {
        &self.parameters
    }

    /// Render `template` and bind `args` without executing anything
    ///
    /// # Errors
    ///
    /// Returns template errors from rendering and binding errors for arguments
    /// that do not satisfy the rendered SQL.
    pub fn prepare<'a>(
        &self,
        template: &str,
        args: impl IntoParams<'a>,
    ) -> AppResult<BoundStatement> {
        let params = args.into_params(&self.parameters);
        let sql = self.engine.render(template, &params)?;
        let bound = params.bind(sql).map_err(|e| e.with_template(template))?;
        debug!(
            template,
            binding = %params.kind(),
            values = bound.values.len(),
            "Prepared statement"
        );
        Ok(bound)
    }

    /// All rows produced by `template`
    ///
    /// # Errors
    ///
    /// Returns template, binding, or database errors
    pub async fn for_list<'a, R>(
        &self,
        template: &str,
        args: impl IntoParams<'a>,
    ) -> AppResult<Vec<R>>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let bound = self.prepare(template, args)?;
        self.fetch_all(template, bound).await
    }

    /// The single row produced by `template`, if any
    ///
    /// # Errors
    ///
    /// Returns an incorrect-result-size error when more than one row comes back,
    /// as well as template, binding, or database errors
    pub async fn for_object<'a, R>(
        &self,
        template: &str,
        args: impl IntoParams<'a>,
    ) -> AppResult<Option<R>>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let rows = self.for_list(template, args).await?;
        single_result(rows).map_err(|e| e.with_template(template))
    }

    /// Execute `template` and return the number of affected rows
    ///
    /// # Errors
    ///
    /// Returns template, binding, or database errors
    pub async fn update<'a>(&self, template: &str, args: impl IntoParams<'a>) -> AppResult<u64> {
        let BoundStatement { sql, values } = self.prepare(template, args)?;

        let result = bind_values!(sqlx::query::<Sqlite>(&sql), values)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from(e).with_template(template))?;
        debug!(template, rows_affected = result.rows_affected(), "Executed update");
        Ok(result.rows_affected())
    }

    /// Start a query whose named arguments are added one by one
    #[must_use]
    pub fn query<R>(&self, template: impl Into<String>) -> MapQueryBuilder<'_, R> {
        MapQueryBuilder {
            executor: self,
            template: template.into(),
            params: MapParameterSource::default(),
            row: PhantomData,
        }
    }

    async fn fetch_all<R>(&self, template: &str, bound: BoundStatement) -> AppResult<Vec<R>>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let BoundStatement { sql, values } = bound;

        let rows = bind_values!(sqlx::query_as::<Sqlite, R>(&sql), values)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from(e).with_template(template))?;
        debug!(template, rows = rows.len(), "Fetched rows");
        Ok(rows)
    }
}

/// Fluent builder for a named-parameter query
///
/// ```rust,no_run
/// # use sqltemplate::{JsonRow, SqlTemplate};
/// # async fn run(sql: &SqlTemplate) -> sqltemplate::AppResult<()> {
/// let rows: Vec<JsonRow> = sql
///     .query("emp/selectByArgs.sql")
///     .add("deptno", 30)
///     .add("job", "SALESMAN")
///     .for_list()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct MapQueryBuilder<'t, R> {
    executor: &'t SqlTemplate,
    template: String,
    params: MapParameterSource,
    row: PhantomData<fn() -> R>,
}

impl<R> MapQueryBuilder<'_, R>
where
    R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    /// Add or replace one named argument
    #[must_use]
    pub fn add(mut self, key: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        let zone = self.executor.parameters.zone();
        self.params.insert(key, value.into(), zone);
        self
    }

    /// All rows produced by the query
    ///
    /// # Errors
    ///
    /// Returns template, binding, or database errors
    pub async fn for_list(self) -> AppResult<Vec<R>> {
        let Self {
            executor,
            template,
            params,
            ..
        } = self;
        executor.for_list(&template, Params::Map(params)).await
    }

    /// The single row produced by the query, if any
    ///
    /// # Errors
    ///
    /// Returns an incorrect-result-size error when more than one row comes back,
    /// as well as template, binding, or database errors
    pub async fn for_object(self) -> AppResult<Option<R>> {
        let Self {
            executor,
            template,
            params,
            ..
        } = self;
        executor.for_object(&template, Params::Map(params)).await
    }
}

fn single_result<R>(mut rows: Vec<R>) -> AppResult<Option<R>> {
    match rows.len() {
        0 | 1 => Ok(rows.pop()),
        actual => Err(BindingError::IncorrectResultSize {
            expected: 1,
            actual,
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqltemplate_core::ErrorCode;

    #[test]
    fn test_single_result_sizes() {
        assert_eq!(single_result::<i64>(vec![]).unwrap(), None);
        assert_eq!(single_result(vec![7839]).unwrap(), Some(7839));

        let error = single_result(vec![1, 2, 3]).unwrap_err();
        assert_eq!(error.code, ErrorCode::IncorrectResultSize);
        assert_eq!(error.context.details["expected"], 1);
        assert_eq!(error.context.details["actual"], 3);
    }
}
