//! Identifier-based exclusion.

use regex::Regex;

use crate::error::ConfigError;

/// Ordered exclusion patterns tested against a unit identifier.
///
/// Patterns are tested in the order supplied and the first match wins; an
/// excluded unit never enters the pipeline.
#[derive(Debug)]
pub(crate) struct ExclusionFilter {
    patterns: Vec<Regex>,
}

impl ExclusionFilter {
    pub(crate) fn new(patterns: &[String]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                Regex::new(&format!("(?i){pattern}")).map_err(|source| {
                    ConfigError::InvalidExcludePattern {
                        pattern: pattern.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { patterns })
    }

    pub(crate) fn is_excluded(&self, id: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(id))
    }
}
