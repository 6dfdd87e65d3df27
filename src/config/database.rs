// ABOUTME: Database configuration types for SQLite connections
// ABOUTME: Parses DATABASE_URL and connection pool limits from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

use super::env_var_or;
use serde::{Deserialize, Serialize};
use sqltemplate_core::constants::{defaults, env_config};
use sqltemplate_core::{AppError, AppResult};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite`
    #[default]
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns a configuration error for URLs naming a database other than `SQLite`
    pub fn parse_url(s: &str) -> AppResult<Self> {
        if let Some(rest) = s.strip_prefix("sqlite:") {
            let path = rest.strip_prefix("//").unwrap_or(rest);
            if path == ":memory:" || path.is_empty() {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path),
                })
            }
        } else if s.contains("://") {
            Err(AppError::config_invalid(
                env_config::DATABASE_URL,
                s,
                "only sqlite databases are supported",
            ))
        } else {
            // Bare path: treat as SQLite file
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => defaults::DATABASE_URL.into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Maximum number of pooled connections for file databases
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::Memory,
            max_connections: defaults::MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// Load database configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if database environment variables are invalid
    pub fn from_env() -> AppResult<Self> {
        let url = env_var_or(env_config::DATABASE_URL, defaults::DATABASE_URL);
        let max_connections = env_var_or(
            env_config::MAX_CONNECTIONS,
            &defaults::MAX_CONNECTIONS.to_string(),
        );

        Ok(Self {
            url: DatabaseUrl::parse_url(&url)?,
            max_connections: parse_max_connections(&max_connections)?,
        })
    }
}

fn parse_max_connections(value: &str) -> AppResult<u32> {
    match value.trim().parse::<u32>() {
        Ok(0) => Err(AppError::config_invalid(
            env_config::MAX_CONNECTIONS,
            value,
            "must be at least 1",
        )),
        Ok(n) => Ok(n),
        Err(e) => Err(AppError::config_invalid(env_config::MAX_CONNECTIONS, value, e)),
    }
}
