//! Abstraction layers for external dependencies
//!
//! This module provides a trait-based abstraction for on-disk file access
//! to enable better testing and dependency injection.

pub mod fs;

pub use fs::{FileStore, MockFileStore, RealFileStore};
