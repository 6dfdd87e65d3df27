// ABOUTME: Main library entry point for the SqlTemplate binding layer
// ABOUTME: Renders SQL templates and binds positional, map, and bean arguments over SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

#![deny(unsafe_code)]

//! # SqlTemplate
//!
//! Keeps SQL in template files and executes it with arguments of any shape.
//!
//! ## Features
//!
//! - **Template engines**: plain SQL files, or Handlebars for conditional fragments
//! - **Argument dispatch**: positional values, maps, and beans bind by shape
//! - **Bean introspection**: accessor properties and public fields, cached per type
//! - **Temporal normalization**: zone-aware date-times are observed in one
//!   reference zone before binding
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sqltemplate::{AppResult, JsonRow, SqlTemplate, SqlTemplateConfig};
//! use std::collections::HashMap;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = SqlTemplateConfig::from_env()?;
//!     let sql = SqlTemplate::connect(&config).await?;
//!
//!     let mut args = HashMap::new();
//!     args.insert("deptno", 30);
//!     let rows: Vec<JsonRow> = sql.for_list("emp/selectByArgs.sql", args).await?;
//!     println!("{} employees", rows.len());
//!
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;
/// Connection pool construction
pub mod database;
/// Bean field introspection
pub mod introspect;
/// Structured logging setup
pub mod logging;
/// Parameter sources and argument classification
pub mod parameter;
/// Generic JSON row mapping
pub mod rows;
/// Template executor facade
pub mod sql_template;
/// Template engines and loading
pub mod template;

pub use config::SqlTemplateConfig;
pub use introspect::{Bean, BeanDescriptorBuilder, DescriptorRegistry};
pub use parameter::{
    BeanParameterSource, BoundStatement, IntoParams, MapParameterSource, ParameterBuilder,
    ParameterSource, Params,
};
pub use rows::JsonRow;
pub use sql_template::{MapQueryBuilder, SqlTemplate};
pub use sqltemplate_core::{
    AppError, AppResult, BindingError, ErrorCode, ReferenceZone, SqlValue,
};
pub use template::{EngineKind, HandlebarsEngine, TemplateEngine, TemplateLoader, TextFileEngine};
