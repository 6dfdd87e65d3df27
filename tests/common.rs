// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging, the EMP table in in-memory SQLite, and template executors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `sqltemplate`

use anyhow::Result;
use chrono::NaiveDate;
use sqltemplate::database::connect_memory;
use sqltemplate::{HandlebarsEngine, SqlTemplate, TemplateLoader};
use sqlx::{FromRow, SqlitePool};
use std::env;
use std::path::PathBuf;
use std::sync::Once;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Row of the EMP table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Emp {
    pub empno: i64,
    pub ename: String,
    pub job: String,
    pub mgr: Option<i64>,
    pub hiredate: NaiveDate,
    pub sal: f64,
    pub comm: Option<f64>,
    pub deptno: i64,
}

const EMP_DDL: &str = "CREATE TABLE emp (
    empno INTEGER PRIMARY KEY,
    ename TEXT NOT NULL,
    job TEXT NOT NULL,
    mgr INTEGER,
    hiredate DATE NOT NULL,
    sal REAL NOT NULL,
    comm REAL,
    deptno INTEGER NOT NULL
)";

const EMP_ROWS: &str = "INSERT INTO emp VALUES
    (7369, 'SMITH', 'CLERK', 7902, '1980-12-17', 800, NULL, 20),
    (7499, 'ALLEN', 'SALESMAN', 7698, '1981-02-20', 1600, 300, 30),
    (7521, 'WARD', 'SALESMAN', 7698, '1981-02-22', 1250, 500, 30),
    (7566, 'JONES', 'MANAGER', 7839, '1981-04-02', 2975, NULL, 20),
    (7654, 'MARTIN', 'SALESMAN', 7698, '1981-09-28', 1250, 1400, 30),
    (7698, 'BLAKE', 'MANAGER', 7839, '1981-05-01', 2850, NULL, 30),
    (7782, 'CLARK', 'MANAGER', 7839, '1981-06-09', 2450, NULL, 10),
    (7788, 'SCOTT', 'ANALYST', 7566, '1987-04-19', 3000, NULL, 20),
    (7839, 'KING', 'PRESIDENT', NULL, '1981-11-17', 5000, NULL, 10),
    (7844, 'TURNER', 'SALESMAN', 7698, '1981-09-08', 1500, 0, 30),
    (7876, 'ADAMS', 'CLERK', 7788, '1987-05-23', 1100, NULL, 20),
    (7900, 'JAMES', 'CLERK', 7698, '1981-12-03', 950, NULL, 30),
    (7902, 'FORD', 'ANALYST', 7566, '1981-12-03', 3000, NULL, 20),
    (7934, 'MILLER', 'CLERK', 7782, '1982-01-23', 1300, NULL, 10)";

/// Number of rows in the EMP fixture
pub const EMP_COUNT: usize = 14;

/// Directory holding the test SQL templates
pub fn template_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("sql")
}

/// In-memory database with the EMP table loaded
pub async fn create_emp_database() -> Result<SqlitePool> {
    init_test_logging();
    let pool = connect_memory().await?;
    sqlx::query(EMP_DDL).execute(&pool).await?;
    sqlx::query(EMP_ROWS).execute(&pool).await?;
    Ok(pool)
}

/// Executor over plain SQL template files
pub async fn text_template() -> Result<SqlTemplate> {
    let pool = create_emp_database().await?;
    Ok(SqlTemplate::new(pool, template_dir()))
}

/// Executor rendering templates with Handlebars
pub async fn handlebars_template() -> Result<SqlTemplate> {
    let pool = create_emp_database().await?;
    let engine = HandlebarsEngine::new(TemplateLoader::cached(template_dir()));
    Ok(SqlTemplate::with_engine(pool, engine))
}

/// Employee numbers of `rows`, in order
pub fn empnos(rows: &[Emp]) -> Vec<i64> {
    rows.iter().map(|e| e.empno).collect()
}
