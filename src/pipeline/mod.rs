//! The substitution pipeline: stage composition and the per-unit hook.
//!
//! A [`Pipeline`] is built once from a [`PipelineConfig`] and is immutable
//! afterwards. Construction compiles every directive pattern and decides
//! which stages are enabled (alias resolution iff the alias map is
//! non-empty, replacement iff the replace map is non-empty, cleanup always,
//! then the caller's stages in supplied order). Transformation is a pure
//! function of the input text and that fixed configuration, so a `Pipeline`
//! can be shared freely across threads.

mod alias;
mod cleanup;
mod exclude;
mod replace;

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use crate::config::{Callback, PipelineConfig};
use crate::delimiters::Delimiters;
use crate::error::ConfigError;

use alias::AliasResolver;
use cleanup::CleanupPass;
use exclude::ExclusionFilter;
use replace::ReplaceEngine;

/// One named stage in the pipeline.
enum Stage {
    Alias(AliasResolver),
    Replace(ReplaceEngine),
    Cleanup(CleanupPass),
    Callback(Callback),
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::Alias(_) => "resolve-alias",
            Stage::Replace(_) => "replace",
            Stage::Cleanup(_) => "cleanup",
            Stage::Callback(_) => "callback",
        }
    }
}

/// A fixed configuration plus the ordered stage list derived from it.
pub struct Pipeline {
    delimiters: Delimiters,
    stages: Vec<Stage>,
    excludes: ExclusionFilter,
    replace_files: Vec<PathBuf>,
}

impl Pipeline {
    /// Build a pipeline from `config`, compiling every directive pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the delimiter fragments or an exclusion
    /// pattern fail to compile. This is the only fallible operation on a
    /// pipeline.
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        let PipelineConfig {
            alias,
            replace,
            callbacks,
            exclude,
            replace_files,
            delimiters,
        } = config;

        let excludes = ExclusionFilter::new(&exclude)?;

        let mut stages = Vec::new();
        if !alias.is_empty() {
            stages.push(Stage::Alias(AliasResolver::new(&delimiters, alias)?));
        }
        if !replace.is_empty() {
            stages.push(Stage::Replace(ReplaceEngine::new(&delimiters, &replace)?));
        }
        stages.push(Stage::Cleanup(CleanupPass::new(&delimiters)?));
        stages.extend(callbacks.into_iter().map(Stage::Callback));

        let pipeline = Self {
            delimiters,
            stages,
            excludes,
            replace_files,
        };
        debug!(stages = ?pipeline.stage_names(), "pipeline constructed");
        Ok(pipeline)
    }

    /// The name hosts register this plugin under.
    pub fn name(&self) -> &'static str {
        "stencil"
    }

    /// The delimiters this instance was built with.
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// File targets registered for the end-of-build rewrite.
    pub fn replace_files(&self) -> &[PathBuf] {
        &self.replace_files
    }

    /// Names of the enabled stages, in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::name).collect()
    }

    /// Thread `text` through every enabled stage, in order.
    pub fn transform(&self, text: &str) -> String {
        let mut text = text.to_string();
        for stage in &self.stages {
            text = match stage {
                Stage::Alias(resolver) => resolver.apply(&text),
                Stage::Replace(engine) => engine.apply(&text),
                Stage::Cleanup(pass) => pass.apply(&text),
                Stage::Callback(callback) => callback(text),
            };
        }
        text
    }

    /// Per-unit hook: transform `text` unless `id` matches an exclusion
    /// pattern.
    ///
    /// Returns `None` when the unit is excluded, so hosts can distinguish
    /// "not transformed" from "transformed to the same text". No stage runs
    /// for an excluded unit.
    pub fn transform_unit(&self, text: &str, id: &str) -> Option<String> {
        if self.excludes.is_excluded(id) {
            debug!(id, "unit excluded from transformation");
            return None;
        }
        Some(self.transform(text))
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("delimiters", &self.delimiters)
            .field("stages", &self.stage_names())
            .field("replace_files", &self.replace_files)
            .finish()
    }
}
