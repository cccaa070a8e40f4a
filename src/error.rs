//! Typed errors surfaced at pipeline construction.
//!
//! Construction is the only seam where this crate reports errors to the
//! caller: once a [`Pipeline`](crate::Pipeline) is built, transformation is
//! infallible and batch processing converts every failure into a logged
//! diagnostic plus a recorded per-target outcome.

use thiserror::Error;

/// Errors raised while compiling a pipeline's configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The delimiter fragments do not form a valid directive pattern.
    #[error("invalid delimiter fragments `{open}` / `{close}`")]
    InvalidDelimiters {
        open: String,
        close: String,
        #[source]
        source: regex::Error,
    },

    /// An exclusion pattern failed to compile.
    #[error("invalid exclude pattern `{pattern}`")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
