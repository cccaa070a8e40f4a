//! # Stencil
//!
//! A directive-driven text substitution pipeline for build hooks. Source
//! text is scanned for delimiter-wrapped directives (`#{VERSION}%` by
//! default), which are resolved against caller-supplied lookup tables:
//! path aliases and literal replacements. Whatever remains unresolved is
//! stripped, so no directive syntax survives into the output.
//!
//! ## Usage
//!
//! ```
//! use stencil::{Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::new(
//!     PipelineConfig::new()
//!         .alias("@", "/project/src")
//!         .replace("VERSION", "1.2.3"),
//! )
//! .unwrap();
//!
//! assert_eq!(pipeline.transform("v#{VERSION}%"), "v1.2.3");
//! ```
//!
//! Hosts integrate through two hooks: the per-unit hook
//! [`Pipeline::transform_unit`], which skips units matching an exclusion
//! pattern, and the end-of-build hook
//! [`BatchProcessor::rewrite_files`](batch::BatchProcessor::rewrite_files),
//! which rewrites a fixed list of files in place.
//!
//! ## Modules
//!
//! - `abstractions` - Trait-based abstraction for on-disk file access
//! - `batch` - End-of-build batch rewriting with per-target outcomes
//! - `config` - Pipeline configuration with builder-style construction
//! - `delimiters` - Directive delimiter configuration
//! - `error` - Typed construction errors
//! - `pipeline` - Stage composition, transformation and the per-unit hook

pub mod abstractions;
pub mod batch;
pub mod config;
pub mod delimiters;
pub mod error;
pub mod pipeline;

pub use abstractions::{FileStore, MockFileStore, RealFileStore};
pub use batch::{BatchProcessor, BatchReport, TargetOutcome, TargetReport};
pub use config::{Callback, PipelineConfig};
pub use delimiters::Delimiters;
pub use error::ConfigError;
pub use pipeline::Pipeline;
