// ABOUTME: SQLite connection pool construction from database configuration
// ABOUTME: In-memory databases are pinned to a single long-lived connection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

//! # Database access
//!
//! Each connection to `sqlite::memory:` opens its own empty database, so an
//! in-memory pool keeps exactly one connection that never idles out.

use crate::config::{DatabaseConfig, DatabaseUrl};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use sqltemplate_core::AppResult;
use std::str::FromStr;
use tracing::info;

/// Open a connection pool for `config`
///
/// File databases are created when missing.
///
/// # Errors
///
/// Returns a database error if the URL is malformed or the first connection fails
pub async fn connect(config: &DatabaseConfig) -> AppResult<SqlitePool> {
    let options =
        SqliteConnectOptions::from_str(&config.url.to_connection_string())?.create_if_missing(true);

    let pool = if config.url.is_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?
    };

    info!(
        database = %config.url,
        max_connections = if config.url.is_memory() { 1 } else { config.max_connections },
        "Database pool ready"
    );
    Ok(pool)
}

/// Open an in-memory database pool
///
/// # Errors
///
/// Returns a database error if the connection fails
pub async fn connect_memory() -> AppResult<SqlitePool> {
    connect(&DatabaseConfig {
        url: DatabaseUrl::Memory,
        ..DatabaseConfig::default()
    })
    .await
}
