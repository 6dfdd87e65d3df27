// ABOUTME: Core types and constants for the SqlTemplate binding layer
// ABOUTME: Foundation crate with error handling, SQL values, and temporal normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

#![deny(unsafe_code)]

//! # SqlTemplate Core
//!
//! Foundation crate providing shared types for binding SQL templates to values.
//! It has no database driver dependency unless the `database-errors` feature is on.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `BindingError`
//! - **value**: `SqlValue`, the bindable value model
//! - **temporal**: `ReferenceZone` and normalization of zone-aware date-times
//! - **constants**: Environment variable names and defaults

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Bindable SQL values
pub mod value;

/// Zone-aware date-time normalization
pub mod temporal;

pub use errors::{AppError, AppResult, BindingError, ErrorCode};
pub use temporal::ReferenceZone;
pub use value::SqlValue;
