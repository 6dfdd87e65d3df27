// ABOUTME: Resolves template identifiers below a root directory and reads their text
// ABOUTME: Optionally keeps raw template text in a concurrent per-identifier cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

use dashmap::DashMap;
use sqltemplate_core::{AppError, AppResult};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Reads template files relative to a root directory
#[derive(Debug)]
pub struct TemplateLoader {
    root: PathBuf,
    cache: Option<DashMap<String, Arc<str>>>,
}

impl TemplateLoader {
    /// Loader reading from `root` on every call
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: None,
        }
    }

    /// Loader that keeps template text after the first read
    pub fn cached(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Some(DashMap::new()),
        }
    }

    /// Template root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether template text is cached
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Path of `name` below the root
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error for empty or absolute identifiers and for
    /// identifiers that would leave the root through `..`.
    pub fn resolve(&self, name: &str) -> AppResult<PathBuf> {
        let relative = Path::new(name);
        let escapes = relative.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if name.trim().is_empty() || escapes {
            return Err(
                AppError::invalid_argument(format!("invalid template identifier '{name}'"))
                    .with_template(name),
            );
        }
        Ok(self.root.join(relative))
    }

    /// Raw text of `name`
    ///
    /// # Errors
    ///
    /// Returns a template I/O error when the file cannot be read.
    pub fn load(&self, name: &str) -> AppResult<Arc<str>> {
        if let Some(text) = self
            .cache
            .as_ref()
            .and_then(|cache| cache.get(name).map(|entry| Arc::clone(entry.value())))
        {
            return Ok(text);
        }

        let path = self.resolve(name)?;
        let text: Arc<str> = fs::read_to_string(&path)
            .map_err(|e| AppError::template_io(name, e))?
            .into();
        debug!(template = name, path = %path.display(), bytes = text.len(), "Loaded template");

        if let Some(cache) = &self.cache {
            cache.insert(name.to_owned(), Arc::clone(&text));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqltemplate_core::ErrorCode;
    use tempfile::TempDir;

    fn root_with(name: &str, text: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, text).unwrap();
        dir
    }

    #[test]
    fn test_load_relative_to_root() {
        let dir = root_with("emp/selectAll.sql", "SELECT * FROM emp");
        let loader = TemplateLoader::new(dir.path());

        assert_eq!(&*loader.load("emp/selectAll.sql").unwrap(), "SELECT * FROM emp");
    }

    #[test]
    fn test_missing_template_is_io_error() {
        let dir = TempDir::new().unwrap();
        let loader = TemplateLoader::new(dir.path());

        let error = loader.load("missing.sql").unwrap_err();
        assert_eq!(error.code, ErrorCode::TemplateIo);
        assert_eq!(error.context.template.as_deref(), Some("missing.sql"));
        assert!(error.source.is_some());
    }

    #[test]
    fn test_escaping_identifiers_are_rejected() {
        let loader = TemplateLoader::new("/srv/sql");

        for name in ["../etc/passwd", "/etc/passwd", "a/../../b.sql", ""] {
            let error = loader.resolve(name).unwrap_err();
            assert_eq!(error.code, ErrorCode::InvalidArgument, "{name}");
        }
        assert_eq!(
            loader.resolve("emp/a.sql").unwrap(),
            PathBuf::from("/srv/sql/emp/a.sql")
        );
    }

    #[test]
    fn test_cached_loader_keeps_first_read() {
        let dir = root_with("count.sql", "SELECT count(*) FROM emp");
        let loader = TemplateLoader::cached(dir.path());
        assert!(loader.is_cached());

        let first = loader.load("count.sql").unwrap();
        fs::write(dir.path().join("count.sql"), "SELECT 1").unwrap();
        let second = loader.load("count.sql").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(&*second, "SELECT count(*) FROM emp");
    }

    #[test]
    fn test_uncached_loader_rereads() {
        let dir = root_with("count.sql", "SELECT count(*) FROM emp");
        let loader = TemplateLoader::new(dir.path());

        loader.load("count.sql").unwrap();
        fs::write(dir.path().join("count.sql"), "SELECT 1").unwrap();
        assert_eq!(&*loader.load("count.sql").unwrap(), "SELECT 1");
    }
}
