// ABOUTME: Command-line tool running SQL templates against a SQLite database
// ABOUTME: Prints query rows as JSON lines and update counts as plain numbers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors
//!
//! Usage:
//! ```bash
//! # Named arguments bind :name placeholders
//! sqltemplate query emp/selectByArgs.sql --param deptno=30 --param job=SALESMAN
//!
//! # Positional arguments bind ? placeholders in order
//! sqltemplate query emp/selectByEmpno.sql --arg 7839 --single
//!
//! # Updates print the number of affected rows
//! sqltemplate update emp/raise.sql --param deptno=20 --param pct=10
//! ```

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use sqltemplate::config::DatabaseUrl;
use sqltemplate::logging::LoggingConfig;
use sqltemplate::{
    EngineKind, IntoParams, JsonRow, ParameterBuilder, Params, ReferenceZone, SqlTemplate,
    SqlTemplateConfig, SqlValue,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "sqltemplate",
    about = "Run SQL templates",
    long_about = "Renders a SQL template, binds the given arguments, and executes it against a SQLite database."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Template root directory override
    #[arg(long, global = true)]
    template_dir: Option<PathBuf>,

    /// Template engine override (text, handlebars)
    #[arg(long, global = true)]
    engine: Option<EngineKind>,

    /// Reference zone override (local, utc, +HH:MM)
    #[arg(long, global = true)]
    zone: Option<ReferenceZone>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run a query and print each row as a JSON line
    Query {
        /// Template identifier relative to the template root
        template: String,

        #[command(flatten)]
        args: CallArgs,

        /// Expect at most one row
        #[arg(long)]
        single: bool,
    },

    /// Run a statement and print the number of affected rows
    Update {
        /// Template identifier relative to the template root
        template: String,

        #[command(flatten)]
        args: CallArgs,
    },
}

#[derive(Args)]
struct CallArgs {
    /// Named argument as key=value (repeatable)
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<(String, SqlValue)>,

    /// Positional argument (repeatable)
    #[arg(long = "arg", value_parser = parse_literal)]
    args: Vec<SqlValue>,
}

impl CallArgs {
    fn validate(&self) -> Result<()> {
        if !self.params.is_empty() && !self.args.is_empty() {
            bail!("--param and --arg cannot be combined in one call");
        }
        Ok(())
    }
}

impl<'a> IntoParams<'a> for CallArgs {
    fn into_params(self, builder: &ParameterBuilder) -> Params<'a> {
        if self.params.is_empty() {
            builder.by_args(self.args)
        } else {
            builder.by_map(self.params)
        }
    }
}

/// Parse a command line literal: `null`, booleans, integers, floats, else text
///
/// Surrounding double quotes force text.
fn parse_literal(raw: &str) -> Result<SqlValue, String> {
    if let Some(text) = raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        return Ok(SqlValue::Text(text.to_owned()));
    }
    if raw.eq_ignore_ascii_case("null") {
        return Ok(SqlValue::Null);
    }
    if let Ok(flag) = raw.parse::<bool>() {
        return Ok(SqlValue::Bool(flag));
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Ok(SqlValue::Int(int));
    }
    if let Ok(float) = raw.parse::<f64>() {
        if float.is_finite() {
            return Ok(SqlValue::Float(float));
        }
    }
    Ok(SqlValue::Text(raw.to_owned()))
}

fn parse_param(raw: &str) -> Result<(String, SqlValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty parameter name in '{raw}'"));
    }
    Ok((key.to_owned(), parse_literal(value)?))
}

fn apply_overrides(cli: &Cli, config: &mut SqlTemplateConfig) -> Result<()> {
    if let Some(url) = &cli.database_url {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }
    if let Some(dir) = &cli.template_dir {
        config.template_dir.clone_from(dir);
    }
    if let Some(engine) = cli.engine {
        config.engine = engine;
    }
    if let Some(zone) = cli.zone {
        config.zone = zone;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let mut config = SqlTemplateConfig::from_env()?;
    apply_overrides(&cli, &mut config)?;
    let sql = SqlTemplate::connect(&config).await?;

    match cli.command {
        Command::Query {
            template,
            args,
            single,
        } => {
            args.validate()?;
            let rows: Vec<JsonRow> = if single {
                let row: Option<JsonRow> = sql.for_object(&template, args).await?;
                row.into_iter().collect()
            } else {
                sql.for_list(&template, args).await?
            };
            for row in &rows {
                println!("{}", serde_json::to_string(row)?);
            }
            info!(template = %template, rows = rows.len(), "Query complete");
        }
        Command::Update { template, args } => {
            args.validate()?;
            let affected = sql.update(&template, args).await?;
            println!("{affected}");
        }
    }

    Ok(())
}
