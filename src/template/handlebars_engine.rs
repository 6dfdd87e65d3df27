// ABOUTME: Template engine rendering SQL files as Handlebars templates
// ABOUTME: The render context is built from the call arguments, HTML escaping is off
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

use super::{TemplateEngine, TemplateLoader};
use crate::parameter::Params;
use handlebars::{handlebars_helper, no_escape, Handlebars};
use sqltemplate_core::{AppError, AppResult};
use tracing::debug;

/// Engine rendering templates with Handlebars
///
/// Named arguments are visible by name, positional arguments as `args`. Gate
/// optional predicates with `{{#if (defined name)}}`: the helper is true for any
/// present, non-null value, so `0`, `""` and `false` keep their predicate while
/// absent or null arguments drop it. A plain `{{#if name}}` tests truthiness.
pub struct HandlebarsEngine {
    loader: TemplateLoader,
    handlebars: Handlebars<'static>,
}

handlebars_helper!(defined: |value: Json| !value.is_null());

impl HandlebarsEngine {
    /// Engine reading through `loader`
    #[must_use]
    pub fn new(loader: TemplateLoader) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(no_escape);
        handlebars.set_strict_mode(false);
        handlebars.register_helper("defined", Box::new(defined));

        Self { loader, handlebars }
    }
}

impl TemplateEngine for HandlebarsEngine {
    fn render(&self, name: &str, params: &Params<'_>) -> AppResult<String> {
        let text = self.loader.load(name)?;
        let context = params.template_context();

        let sql = self
            .handlebars
            .render_template(&text, &context)
            .map_err(|e| AppError::template_render(name, e.to_string()))?;
        debug!(template = name, binding = %params.kind(), "Rendered handlebars template");
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::ParameterBuilder;
    use sqltemplate_core::{ErrorCode, SqlValue};
    use std::fs;
    use tempfile::TempDir;

    const SELECT_BY_ARGS: &str = "SELECT * FROM emp\n\
        WHERE 1 = 1\n\
        {{#if (defined deptno)}}AND deptno = :deptno\n{{/if}}\
        {{#if (defined job)}}AND job = :job\n{{/if}}\
        ORDER BY empno";

    fn engine_with(name: &str, text: &str) -> (TempDir, HandlebarsEngine) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(name), text).unwrap();
        let engine = HandlebarsEngine::new(TemplateLoader::new(dir.path()));
        (dir, engine)
    }

    #[test]
    fn test_optional_predicates_follow_arguments() {
        let (_dir, engine) = engine_with("selectByArgs.sql", SELECT_BY_ARGS);
        let builder = ParameterBuilder::default();

        let both = builder.by_map([("deptno", SqlValue::from(30)), ("job", "SALESMAN".into())]);
        let sql = engine.render("selectByArgs.sql", &both).unwrap();
        assert!(sql.contains("AND deptno = :deptno"));
        assert!(sql.contains("AND job = :job"));

        let none = builder.by_map(Vec::<(&str, SqlValue)>::new());
        let sql = engine.render("selectByArgs.sql", &none).unwrap();
        assert!(!sql.contains("AND"));
        assert!(sql.ends_with("ORDER BY empno"));
    }

    #[test]
    fn test_falsy_values_keep_their_predicate() {
        let (_dir, engine) = engine_with("selectByArgs.sql", SELECT_BY_ARGS);
        let builder = ParameterBuilder::default();

        let zero = builder.by_map([("deptno", SqlValue::from(0)), ("job", "".into())]);
        let sql = engine.render("selectByArgs.sql", &zero).unwrap();
        assert!(sql.contains("AND deptno = :deptno"));
        assert!(sql.contains("AND job = :job"));

        let null = builder.by_map([("deptno", SqlValue::Null)]);
        let sql = engine.render("selectByArgs.sql", &null).unwrap();
        assert!(!sql.contains("AND"));
    }

    #[test]
    fn test_values_are_not_html_escaped() {
        let (_dir, engine) = engine_with("order.sql", "SELECT * FROM emp ORDER BY {{column}}");
        let params = ParameterBuilder::default().by_map([("column", "sal > 0 & 'x'")]);

        let sql = engine.render("order.sql", &params).unwrap();
        assert_eq!(sql, "SELECT * FROM emp ORDER BY sal > 0 & 'x'");
    }

    #[test]
    fn test_positional_arguments_are_exposed_as_args() {
        let (_dir, engine) = engine_with("limit.sql", "SELECT * FROM emp LIMIT {{args.[0]}}");
        let params = ParameterBuilder::default().by_args([SqlValue::from(5)]);

        assert_eq!(
            engine.render("limit.sql", &params).unwrap(),
            "SELECT * FROM emp LIMIT 5"
        );
    }

    #[test]
    fn test_malformed_template_is_render_error() {
        let (_dir, engine) = engine_with("broken.sql", "SELECT {{#if x}} FROM emp");
        let params = ParameterBuilder::default().by_args([]);

        let error = engine.render("broken.sql", &params).unwrap_err();
        assert_eq!(error.code, ErrorCode::TemplateRender);
        assert_eq!(error.context.template.as_deref(), Some("broken.sql"));
    }
}
