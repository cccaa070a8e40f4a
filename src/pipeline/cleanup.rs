//! Final cleanup of unresolved directives.

use regex::Regex;

use crate::delimiters::Delimiters;
use crate::error::ConfigError;

/// Removes every remaining open…close span so no directive syntax survives
/// into the output.
///
/// The span match is greedy within a line: two leftover directives on the
/// same line are consumed as one span, literal content between them
/// included. Known limitation of the directive grammar, not narrowed here.
pub(crate) struct CleanupPass {
    span_re: Regex,
}

impl CleanupPass {
    pub(crate) fn new(delimiters: &Delimiters) -> Result<Self, ConfigError> {
        let pattern = format!("{}.*{}", delimiters.open(), delimiters.close());
        let span_re = Regex::new(&pattern).map_err(|source| ConfigError::InvalidDelimiters {
            open: delimiters.open().to_string(),
            close: delimiters.close().to_string(),
            source,
        })?;
        Ok(Self { span_re })
    }

    pub(crate) fn apply(&self, text: &str) -> String {
        self.span_re.replace_all(text, "").into_owned()
    }
}
