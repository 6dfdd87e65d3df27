// ABOUTME: Template engine that uses the template file content verbatim as SQL
// ABOUTME: Arguments play no part in rendering, only in binding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

use super::{TemplateEngine, TemplateLoader};
use crate::parameter::Params;
use sqltemplate_core::AppResult;

/// Engine returning the file text unchanged
#[derive(Debug)]
pub struct TextFileEngine {
    loader: TemplateLoader,
}

impl TextFileEngine {
    /// Engine reading through `loader`
    #[must_use]
    pub const fn new(loader: TemplateLoader) -> Self {
        Self { loader }
    }
}

impl TemplateEngine for TextFileEngine {
    fn render(&self, name: &str, _params: &Params<'_>) -> AppResult<String> {
        Ok(self.loader.load(name)?.to_string())
    }
}
