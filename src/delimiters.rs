//! Directive delimiter configuration.
//!
//! A directive is a span of text framed by an open and a close fragment,
//! e.g. `#{VERSION}%` with the defaults. The fragments are regex fragments
//! (metacharacters escaped), fixed per pipeline instance at construction so
//! a single transform call is deterministic.

/// Default open fragment, matching the literal `#{`.
pub const DEFAULT_OPEN: &str = r"#\{";

/// Default close fragment, matching the literal `}%`.
pub const DEFAULT_CLOSE: &str = r"\}%";

/// The open/close regex fragments framing every directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    open: String,
    close: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open: DEFAULT_OPEN.to_string(),
            close: DEFAULT_CLOSE.to_string(),
        }
    }
}

impl Delimiters {
    /// Create delimiters from custom open/close regex fragments.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// The open fragment.
    pub fn open(&self) -> &str {
        &self.open
    }

    /// The close fragment.
    pub fn close(&self) -> &str {
        &self.close
    }

    /// Regex pattern matching a directive whose body is `body`.
    ///
    /// `body` is embedded verbatim; callers escape it when it must match
    /// literally.
    pub fn directive_pattern(&self, body: &str) -> String {
        format!("{}{}{}", self.open, body, self.close)
    }
}
