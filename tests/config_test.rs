// ABOUTME: Tests for environment-based configuration loading
// ABOUTME: Runs serially since every test mutates process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use anyhow::Result;
use chrono::FixedOffset;
use common::{init_test_logging, template_dir, Emp};
use serial_test::serial;
use sqltemplate::config::DatabaseUrl;
use sqltemplate::{EngineKind, ErrorCode, ReferenceZone, SqlTemplate, SqlTemplateConfig};
use std::env;
use tempfile::TempDir;

const VARS: [&str; 6] = [
    "DATABASE_URL",
    "SQLTEMPLATE_DIR",
    "SQLTEMPLATE_ENGINE",
    "SQLTEMPLATE_CACHE",
    "SQLTEMPLATE_ZONE",
    "SQLTEMPLATE_MAX_CONNECTIONS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() -> Result<()> {
    clear_env();

    let config = SqlTemplateConfig::from_env()?;

    assert_eq!(config.database.url, DatabaseUrl::Memory);
    assert_eq!(config.database.max_connections, 5);
    assert_eq!(config.engine, EngineKind::Text);
    assert!(!config.cache_templates);
    assert_eq!(config.zone, ReferenceZone::Local);
    Ok(())
}

#[test]
#[serial]
fn test_environment_overrides() -> Result<()> {
    clear_env();
    env::set_var("DATABASE_URL", "sqlite:./scott.db");
    env::set_var("SQLTEMPLATE_DIR", "/srv/sql");
    env::set_var("SQLTEMPLATE_ENGINE", "handlebars");
    env::set_var("SQLTEMPLATE_CACHE", "true");
    env::set_var("SQLTEMPLATE_ZONE", "+09:00");
    env::set_var("SQLTEMPLATE_MAX_CONNECTIONS", "8");

    let config = SqlTemplateConfig::from_env()?;
    clear_env();

    assert!(!config.database.url.is_memory());
    assert_eq!(config.database.max_connections, 8);
    assert_eq!(config.template_dir.to_str(), Some("/srv/sql"));
    assert_eq!(config.engine, EngineKind::Handlebars);
    assert!(config.template_loader().is_cached());
    assert_eq!(
        config.zone,
        ReferenceZone::Fixed(FixedOffset::east_opt(9 * 3600).unwrap())
    );
    Ok(())
}

#[test]
#[serial]
fn test_invalid_values_are_config_errors() {
    clear_env();

    env::set_var("SQLTEMPLATE_ZONE", "Mars/Olympus");
    let error = SqlTemplateConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert_eq!(error.context.details["key"], "SQLTEMPLATE_ZONE");
    clear_env();

    env::set_var("SQLTEMPLATE_CACHE", "sometimes");
    assert_eq!(
        SqlTemplateConfig::from_env().unwrap_err().code,
        ErrorCode::ConfigInvalid
    );
    clear_env();

    env::set_var("SQLTEMPLATE_ENGINE", "velocity");
    assert_eq!(
        SqlTemplateConfig::from_env().unwrap_err().code,
        ErrorCode::ConfigError
    );
    clear_env();
}

#[tokio::test]
#[serial]
async fn test_connect_from_environment() -> Result<()> {
    init_test_logging();
    clear_env();
    let dir = TempDir::new()?;
    let db_path = dir.path().join("scott.db");
    env::set_var("DATABASE_URL", format!("sqlite:{}", db_path.display()));
    env::set_var("SQLTEMPLATE_DIR", template_dir());

    let config = SqlTemplateConfig::from_env()?;
    clear_env();
    let sql = SqlTemplate::connect(&config).await?;

    sqlx::query(
        "CREATE TABLE emp (empno INTEGER PRIMARY KEY, ename TEXT NOT NULL, job TEXT NOT NULL, \
         mgr INTEGER, hiredate DATE NOT NULL, sal REAL NOT NULL, comm REAL, deptno INTEGER NOT NULL)",
    )
    .execute(sql.pool())
    .await?;
    sqlx::query("INSERT INTO emp VALUES (7839, 'KING', 'PRESIDENT', NULL, '1981-11-17', 5000, NULL, 10)")
        .execute(sql.pool())
        .await?;

    let rows: Vec<Emp> = sql.for_list("emp/selectAll.sql", ()).await?;
    assert_eq!(rows.len(), 1);
    assert!(db_path.exists());
    Ok(())
}
