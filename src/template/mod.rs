// ABOUTME: Template engines that turn a template identifier plus arguments into SQL text
// ABOUTME: Plain text files are used verbatim, Handlebars files are rendered against the arguments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

//! # Template engines
//!
//! A template identifier is a path relative to the template root. Engines return
//! SQL text that still carries `?` or `:name` placeholders; binding happens after
//! rendering.

/// Handlebars rendering engine
pub mod handlebars_engine;
/// Template file loading and caching
pub mod loader;
/// Verbatim text file engine
pub mod text;

pub use handlebars_engine::HandlebarsEngine;
pub use loader::TemplateLoader;
pub use text::TextFileEngine;

use crate::parameter::Params;
use sqltemplate_core::{AppError, AppResult};
use std::fmt;
use std::str::FromStr;

/// Produces SQL text for a template identifier
pub trait TemplateEngine: Send + Sync {
    /// Render `name` against the call arguments
    ///
    /// # Errors
    ///
    /// Returns a template I/O error when the template cannot be read and a
    /// template render error when it cannot be evaluated.
    fn render(&self, name: &str, params: &Params<'_>) -> AppResult<String>;
}

/// Available engine implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    /// [`TextFileEngine`]
    #[default]
    Text,
    /// [`HandlebarsEngine`]
    Handlebars,
}

impl EngineKind {
    /// Build an engine of this kind over `loader`
    #[must_use]
    pub fn build(self, loader: TemplateLoader) -> Box<dyn TemplateEngine> {
        match self {
            Self::Text => Box::new(TextFileEngine::new(loader)),
            Self::Handlebars => Box::new(HandlebarsEngine::new(loader)),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Handlebars => f.write_str("handlebars"),
        }
    }
}

impl FromStr for EngineKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "text_file" => Ok(Self::Text),
            "handlebars" | "hbs" => Ok(Self::Handlebars),
            other => Err(AppError::config(format!(
                "unknown template engine '{other}', expected 'text' or 'handlebars'"
            ))),
        }
    }
}
