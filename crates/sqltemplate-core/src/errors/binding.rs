// ABOUTME: Binding error types raised while turning arguments into SQL parameters
// ABOUTME: Structured errors that convert into the main AppError system
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

use super::{AppError, ErrorCode};

/// Errors raised while resolving parameters or collecting results
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// SQL references a named placeholder the source cannot resolve
    #[error("No value supplied for the SQL parameter '{name}'")]
    MissingParameter {
        /// Placeholder name without the leading colon
        name: String,
    },

    /// Positional values do not match the parameters the SQL declares
    #[error("SQL declares {expected} positional parameters but {actual} values were supplied")]
    ParameterCount {
        /// Parameters declared by the SQL
        expected: usize,
        /// Values supplied by the caller
        actual: usize,
    },

    /// A registered public field cannot be read
    #[error("Field '{field}' of {type_name} is not accessible")]
    InaccessibleField {
        /// Declared type of the bean
        type_name: &'static str,
        /// Field name
        field: String,
    },

    /// A single-row query produced more than one row
    #[error("Incorrect result size: expected {expected}, actual {actual}")]
    IncorrectResultSize {
        /// Expected row count
        expected: usize,
        /// Actual row count
        actual: usize,
    },
}

impl BindingError {
    /// Create a "missing parameter" error
    #[must_use]
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Create an "inaccessible field" error
    #[must_use]
    pub fn inaccessible_field(type_name: &'static str, field: impl Into<String>) -> Self {
        Self::InaccessibleField {
            type_name,
            field: field.into(),
        }
    }

    /// Error code for this binding error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MissingParameter { .. } => ErrorCode::MissingParameter,
            Self::ParameterCount { expected, actual } if *actual < *expected => {
                ErrorCode::MissingParameter
            }
            Self::ParameterCount { .. } | Self::InaccessibleField { .. } => {
                ErrorCode::InvalidArgument
            }
            Self::IncorrectResultSize { .. } => ErrorCode::IncorrectResultSize,
        }
    }
}

impl From<BindingError> for AppError {
    fn from(error: BindingError) -> Self {
        let details = match &error {
            BindingError::MissingParameter { name } => serde_json::json!({ "parameter": name }),
            BindingError::ParameterCount { expected, actual } => {
                serde_json::json!({ "expected": expected, "actual": actual })
            }
            BindingError::InaccessibleField { type_name, field } => {
                serde_json::json!({ "type": type_name, "field": field })
            }
            BindingError::IncorrectResultSize { expected, actual } => {
                serde_json::json!({ "expected": expected, "actual": actual })
            }
        };
        Self::new(error.code(), error.to_string())
            .with_details(details)
            .with_source(error)
    }
}
