// ABOUTME: Environment-only configuration for templates, reference zone, and database access
// ABOUTME: Loads SqlTemplateConfig from SQLTEMPLATE_* variables and DATABASE_URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

//! Configuration module
//!
//! All settings come from environment variables; there is no configuration file.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DATABASE_URL` | `sqlite::memory:` |
//! | `SQLTEMPLATE_DIR` | `./sql` |
//! | `SQLTEMPLATE_ENGINE` | `text` |
//! | `SQLTEMPLATE_CACHE` | `false` |
//! | `SQLTEMPLATE_ZONE` | `local` |
//! | `SQLTEMPLATE_MAX_CONNECTIONS` | `5` |

/// Database connection configuration
pub mod database;

pub use database::{DatabaseConfig, DatabaseUrl};

use crate::template::{EngineKind, TemplateEngine, TemplateLoader};
use sqltemplate_core::constants::{defaults, env_config};
use sqltemplate_core::{AppError, AppResult, ReferenceZone};
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Complete configuration of a [`crate::SqlTemplate`]
#[derive(Debug, Clone)]
pub struct SqlTemplateConfig {
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Root directory template identifiers are resolved against
    pub template_dir: PathBuf,
    /// Engine used to render templates
    pub engine: EngineKind,
    /// Keep raw template text after first load
    pub cache_templates: bool,
    /// Zone that zone-aware date-times are observed in
    pub zone: ReferenceZone,
}

impl Default for SqlTemplateConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            template_dir: PathBuf::from(defaults::TEMPLATE_DIR),
            engine: EngineKind::default(),
            cache_templates: false,
            zone: ReferenceZone::default(),
        }
    }
}

impl SqlTemplateConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a variable is set to an invalid value
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            database: DatabaseConfig::from_env()?,
            template_dir: PathBuf::from(env_var_or(
                env_config::TEMPLATE_DIR,
                defaults::TEMPLATE_DIR,
            )),
            engine: env::var(env_config::TEMPLATE_ENGINE)
                .ok()
                .map(|v| v.parse::<EngineKind>())
                .transpose()?
                .unwrap_or_default(),
            cache_templates: env::var(env_config::TEMPLATE_CACHE)
                .ok()
                .map(|v| parse_bool(env_config::TEMPLATE_CACHE, &v))
                .transpose()?
                .unwrap_or(false),
            zone: env::var(env_config::REFERENCE_ZONE)
                .ok()
                .map(|v| v.parse::<ReferenceZone>())
                .transpose()?
                .unwrap_or_default(),
        };

        info!(
            database = %config.database.url,
            template.dir = %config.template_dir.display(),
            template.engine = %config.engine,
            template.cache = config.cache_templates,
            zone = %config.zone,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Template loader for the configured directory and cache setting
    #[must_use]
    pub fn template_loader(&self) -> TemplateLoader {
        if self.cache_templates {
            TemplateLoader::cached(&self.template_dir)
        } else {
            TemplateLoader::new(&self.template_dir)
        }
    }

    /// Engine of the configured kind
    #[must_use]
    pub fn build_engine(&self) -> Box<dyn TemplateEngine> {
        self.engine.build(self.template_loader())
    }
}

/// Get environment variable or default value
pub(crate) fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_bool(key: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::config_invalid(key, value, "expected a boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqltemplate_core::ErrorCode;

    #[test]
    fn test_parse_bool_variants() {
        assert!(parse_bool("K", "true").unwrap());
        assert!(parse_bool("K", "1").unwrap());
        assert!(!parse_bool("K", "Off").unwrap());
        assert_eq!(parse_bool("K", "maybe").unwrap_err().code, ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_default_config() {
        let config = SqlTemplateConfig::default();
        assert!(config.database.url.is_memory());
        assert_eq!(config.template_dir, PathBuf::from("./sql"));
        assert_eq!(config.engine, EngineKind::Text);
        assert!(!config.template_loader().is_cached());
    }
}
