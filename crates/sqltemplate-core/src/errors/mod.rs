// ABOUTME: Unified error handling for template resolution, binding, and execution
// ABOUTME: Defines ErrorCode, AppError with chained sources, and the AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

//! # Unified Error Handling System
//!
//! All fallible operations in the workspace return [`AppResult`]. Errors carry a
//! stable [`ErrorCode`], a human-readable message, optional context (which template
//! was being resolved, structured details) and the original cause as `source`.
//!
//! Nothing in this layer retries: errors propagate to the caller as soon as they
//! are observed.

/// Binding-specific error types (missing placeholders, restricted fields, result size)
pub mod binding;

pub use binding::BindingError;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// Standard error codes used throughout the workspace
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Template resolution (1000-1999)
    /// Template file could not be read
    #[serde(rename = "TEMPLATE_IO")]
    TemplateIo = 1000,
    /// Template text could not be rendered
    #[serde(rename = "TEMPLATE_RENDER")]
    TemplateRender = 1001,

    // Parameter binding (2000-2999)
    /// Argument cannot be used for binding (restricted field, bad path)
    #[serde(rename = "INVALID_ARGUMENT")]
    InvalidArgument = 2000,
    /// SQL references a placeholder the parameter source does not know
    #[serde(rename = "MISSING_PARAMETER")]
    MissingParameter = 2001,

    // Execution (3000-3999)
    /// Single-result query returned more than one row
    #[serde(rename = "INCORRECT_RESULT_SIZE")]
    IncorrectResultSize = 3000,
    /// Underlying database driver failure
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 3001,

    // Configuration (6000-6999)
    /// Configuration error encountered
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    /// Configuration value is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6001,

    // Internal (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
}

impl ErrorCode {
    /// Get a short description of this error class
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::TemplateIo => "Failed to read SQL template",
            Self::TemplateRender => "Failed to render SQL template",
            Self::InvalidArgument => "Invalid argument for parameter binding",
            Self::MissingParameter => "No value supplied for SQL parameter",
            Self::IncorrectResultSize => "Incorrect result size",
            Self::DatabaseError => "Database operation failed",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
        }
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Template identifier being resolved or executed
    pub template: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            template: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the workspace
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Attach the template identifier the error relates to
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.context.template = Some(template.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Template I/O failure, keeping the `io::Error` as source
    pub fn template_io(template: impl Into<String>, error: io::Error) -> Self {
        let template = template.into();
        Self::new(
            ErrorCode::TemplateIo,
            format!("cannot read template '{template}': {error}"),
        )
        .with_template(template)
        .with_source(error)
    }

    /// Template rendering failure
    pub fn template_render(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TemplateRender, message).with_template(template)
    }

    /// Invalid binding argument
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    /// Database error without a driver cause
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Invalid configuration value
    pub fn config_invalid(key: &str, value: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ConfigInvalid,
            format!("invalid value '{value}' for {key}: {reason}"),
        )
        .with_details(serde_json::json!({ "key": key, "value": value }))
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Returns the driver error if this error wraps one
    #[cfg(feature = "database-errors")]
    #[must_use]
    pub fn database_cause(&self) -> Option<&sqlx::Error> {
        self.source
            .as_deref()
            .and_then(|source| source.downcast_ref::<sqlx::Error>())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Driver failures pass through untranslated; the original error stays reachable
/// through `source` and [`AppError::database_cause`].
#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        Self::new(ErrorCode::DatabaseError, error.to_string()).with_source(error)
    }
}
