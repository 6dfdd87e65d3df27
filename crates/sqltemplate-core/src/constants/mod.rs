// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Environment variable names and defaults for the SqlTemplate workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

//! Constants grouped by domain

/// Environment variable names read by configuration loaders
pub mod env_config {
    /// Database connection URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Root directory of SQL template files
    pub const TEMPLATE_DIR: &str = "SQLTEMPLATE_DIR";
    /// Template engine selection (`text` or `handlebars`)
    pub const TEMPLATE_ENGINE: &str = "SQLTEMPLATE_ENGINE";
    /// Cache raw template text after first load
    pub const TEMPLATE_CACHE: &str = "SQLTEMPLATE_CACHE";
    /// Reference zone for zone-aware date-times
    pub const REFERENCE_ZONE: &str = "SQLTEMPLATE_ZONE";
    /// Maximum pooled connections
    pub const MAX_CONNECTIONS: &str = "SQLTEMPLATE_MAX_CONNECTIONS";
}

/// Default configuration values
pub mod defaults {
    /// In-memory `SQLite`
    pub const DATABASE_URL: &str = "sqlite::memory:";
    /// Template root relative to the working directory
    pub const TEMPLATE_DIR: &str = "./sql";
    /// Maximum pooled connections for file databases
    pub const MAX_CONNECTIONS: u32 = 5;
}

/// Binding-related constants
pub mod binding {
    /// Implicit property every bean exposes, holding its type name
    pub const CLASS_PROPERTY: &str = "class";
    /// Template context key holding positional arguments
    pub const ARGS_CONTEXT_KEY: &str = "args";
}

/// Service names for structured logging
pub mod service_names {
    /// Command line tool
    pub const SQLTEMPLATE_CLI: &str = "sqltemplate";
}
