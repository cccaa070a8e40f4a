//! Pipeline configuration.
//!
//! All knobs a pipeline instance can carry, with the defaults it falls back
//! to when a field is not set. The configuration is consumed by
//! [`Pipeline::new`](crate::Pipeline::new) and fixed for the lifetime of
//! that instance.

use std::fmt;
use std::path::PathBuf;

use crate::delimiters::Delimiters;

/// A caller-supplied text transformation stage, appended after the standard
/// stages in the order supplied.
pub type Callback = Box<dyn Fn(String) -> String + Send + Sync>;

/// Configuration for one pipeline instance.
///
/// Ordered maps are kept as vectors of pairs: alias lookup and replacement
/// both apply entries in insertion order, and the first matching alias wins.
#[derive(Default)]
pub struct PipelineConfig {
    /// Alias key to base filesystem path, in lookup order.
    pub alias: Vec<(String, String)>,
    /// Directive key to literal replacement value, in application order.
    pub replace: Vec<(String, String)>,
    /// Extra stages run after the standard stages.
    pub callbacks: Vec<Callback>,
    /// Patterns tested against unit identifiers; first match excludes the
    /// unit from transformation entirely.
    pub exclude: Vec<String>,
    /// Files rewritten in place by the end-of-build hook.
    pub replace_files: Vec<PathBuf>,
    /// Directive delimiters, default `#\{` / `\}%`.
    pub delimiters: Delimiters,
}

impl PipelineConfig {
    /// Start from an all-default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an alias mapping a symbolic key to a base path.
    pub fn alias(mut self, key: impl Into<String>, base: impl Into<String>) -> Self {
        self.alias.push((key.into(), base.into()));
        self
    }

    /// Register a literal key/value replacement.
    pub fn replace(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.replace.push((key.into(), value.into()));
        self
    }

    /// Append a caller-supplied stage to the end of the pipeline.
    pub fn callback(mut self, stage: impl Fn(String) -> String + Send + Sync + 'static) -> Self {
        self.callbacks.push(Box::new(stage));
        self
    }

    /// Add an exclusion pattern tested against unit identifiers.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    /// Register a file target for the end-of-build rewrite.
    pub fn replace_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.replace_files.push(path.into());
        self
    }

    /// Override the directive delimiters.
    pub fn delimiters(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.delimiters = Delimiters::new(open, close);
        self
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("alias", &self.alias)
            .field("replace", &self.replace)
            .field("callbacks", &self.callbacks.len())
            .field("exclude", &self.exclude)
            .field("replace_files", &self.replace_files)
            .field("delimiters", &self.delimiters)
            .finish()
    }
}
