//! Literal key/value replacement.

use regex::{NoExpand, Regex};

use crate::delimiters::Delimiters;
use crate::error::ConfigError;

/// Substitutes `#{KEY}%` directives with literal values, in map order.
///
/// Values are inserted as-is and never re-scanned, so a value containing
/// directive syntax or `$` capture references stays literal.
pub(crate) struct ReplaceEngine {
    rules: Vec<(Regex, String)>,
}

impl ReplaceEngine {
    pub(crate) fn new(
        delimiters: &Delimiters,
        replace: &[(String, String)],
    ) -> Result<Self, ConfigError> {
        let rules = replace
            .iter()
            .map(|(key, value)| {
                let pattern = format!(
                    "(?i){}",
                    delimiters.directive_pattern(&regex::escape(key))
                );
                let re = Regex::new(&pattern).map_err(|source| ConfigError::InvalidDelimiters {
                    open: delimiters.open().to_string(),
                    close: delimiters.close().to_string(),
                    source,
                })?;
                Ok((re, value.clone()))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { rules })
    }

    /// Apply every replacement rule to `text`, in order.
    pub(crate) fn apply(&self, text: &str) -> String {
        let mut text = text.to_string();
        for (re, value) in &self.rules {
            text = re.replace_all(&text, NoExpand(value)).into_owned();
        }
        text
    }
}
