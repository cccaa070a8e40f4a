//! Alias directive resolution.
//!
//! Two grammars are supported for compatibility, and they intentionally
//! differ on a miss:
//!
//! - block form `#{resolve-alias}%<fragment>#{/end}%` — the first alias key
//!   that path-prefixes the fragment wins; no match drops the whole block to
//!   empty text.
//! - parametrized form `#{resolve-alias key="ALIAS" path="SUB"}%` — an
//!   unknown alias leaves the directive text unchanged.
//!
//! The block regex keeps the legacy greedy span between the opening
//! directive and the closing `/end` marker: with more than one block-form
//! directive on the same line it will span from the first opener to the
//! last closer, consuming the literal content between them. Use at most one
//! block-form directive per text.

use regex::Regex;

use crate::delimiters::Delimiters;
use crate::error::ConfigError;

/// Directive name introducing both alias grammars.
const ALIAS_KEY: &str = "resolve-alias";

/// Directive name closing a block-form span.
const END_KEY: &str = "/end";

/// Resolves alias directives against an ordered alias map.
pub(crate) struct AliasResolver {
    aliases: Vec<(String, String)>,
    /// Cheap presence test run before either full pattern.
    marker_re: Regex,
    block_re: Regex,
    param_re: Regex,
}

impl AliasResolver {
    pub(crate) fn new(
        delimiters: &Delimiters,
        aliases: Vec<(String, String)>,
    ) -> Result<Self, ConfigError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|source| ConfigError::InvalidDelimiters {
                open: delimiters.open().to_string(),
                close: delimiters.close().to_string(),
                source,
            })
        };

        let marker_re = compile(&format!("(?i){}{}", delimiters.open(), ALIAS_KEY))?;
        let block_re = compile(&format!(
            "(?i){}(.*){}",
            delimiters.directive_pattern(ALIAS_KEY),
            delimiters.directive_pattern(END_KEY),
        ))?;
        let param_re = compile(&format!(
            r#"(?i){}\s*{}\s+key="([^"]+)"\s+path="([^"]*)"\s*{}"#,
            delimiters.open(),
            ALIAS_KEY,
            delimiters.close(),
        ))?;

        Ok(Self {
            aliases,
            marker_re,
            block_re,
            param_re,
        })
    }

    /// Resolve every alias directive in `text`.
    pub(crate) fn apply(&self, text: &str) -> String {
        if !self.marker_re.is_match(text) {
            return text.to_string();
        }
        let text = self.resolve_blocks(text);
        self.resolve_params(&text)
    }

    fn resolve_blocks(&self, text: &str) -> String {
        self.block_re
            .replace_all(text, |caps: &regex::Captures<'_>| {
                match self.match_prefix(&caps[1]) {
                    Some((base, rest)) => escape_separators(&join_normalized(base, rest)),
                    // Alias not found: drop the block.
                    None => String::new(),
                }
            })
            .into_owned()
    }

    fn resolve_params(&self, text: &str) -> String {
        self.param_re
            .replace_all(text, |caps: &regex::Captures<'_>| {
                match self.lookup(&caps[1]) {
                    Some(base) => escape_separators(&join_normalized(base, &caps[2])),
                    // Alias not found: leave the directive as-is.
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Find the first alias key that path-prefixes `fragment`, returning its
    /// base path and the remainder after `key/`.
    fn match_prefix<'a>(&self, fragment: &'a str) -> Option<(&str, &'a str)> {
        self.aliases.iter().find_map(|(key, base)| {
            fragment
                .strip_prefix(key.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .map(|rest| (base.as_str(), rest))
        })
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(alias, _)| alias == key)
            .map(|(_, base)| base.as_str())
    }
}

/// Lexically join `base` and `sub`, then normalize: resolve `.` and `..`
/// components and collapse separators, without touching the filesystem.
pub(crate) fn join_normalized(base: &str, sub: &str) -> String {
    use std::path::{Component, Path, PathBuf};

    let joined = Path::new(base).join(sub);
    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let keep = matches!(
                    normalized.components().next_back(),
                    Some(Component::ParentDir) | None
                );
                if keep && !normalized.has_root() {
                    normalized.push("..");
                } else {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized.to_string_lossy().into_owned()
}

/// Escape platform path separators so the joined path embeds safely in the
/// surrounding text.
fn escape_separators(path: &str) -> String {
    path.replace('\\', "\\\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(aliases: &[(&str, &str)]) -> AliasResolver {
        let aliases = aliases
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AliasResolver::new(&Delimiters::default(), aliases).unwrap()
    }

    #[test]
    fn test_parametrized_hit_joins_and_normalizes() {
        let resolver = resolver(&[("@", "/project/src")]);
        let out =
            resolver.apply(r##"import a from "#{resolve-alias key="@" path="utils/a.js"}%";"##);
        assert_eq!(out, r#"import a from "/project/src/utils/a.js";"#);
    }

    #[test]
    fn test_parametrized_miss_leaves_directive_unchanged() {
        let resolver = resolver(&[("@", "/project/src")]);
        let input = r#"#{resolve-alias key="unknown" path="utils/a.js"}%"#;
        assert_eq!(resolver.apply(input), input);
    }

    #[test]
    fn test_parametrized_multiple_occurrences_resolve_independently() {
        let resolver = resolver(&[("@", "/project/src"), ("@lib", "/project/lib")]);
        let input = concat!(
            r#"#{resolve-alias key="@" path="a.js"}% "#,
            r#"#{resolve-alias key="@lib" path="b.js"}%"#,
        );
        assert_eq!(resolver.apply(input), "/project/src/a.js /project/lib/b.js");
    }

    #[test]
    fn test_block_hit_strips_prefix_and_joins() {
        let resolver = resolver(&[("@", "/project/src")]);
        let out = resolver.apply("#{resolve-alias}%@/utils/a.js#{/end}%");
        assert_eq!(out, "/project/src/utils/a.js");
    }

    #[test]
    fn test_block_miss_drops_block() {
        let resolver = resolver(&[("@", "/project/src")]);
        let out = resolver.apply("before #{resolve-alias}%/unknown/path#{/end}% after");
        assert_eq!(out, "before  after");
    }

    #[test]
    fn test_block_first_matching_alias_wins() {
        let resolver = resolver(&[("@", "/first"), ("@", "/second")]);
        let out = resolver.apply("#{resolve-alias}%@/x.js#{/end}%");
        assert_eq!(out, "/first/x.js");
    }

    #[test]
    fn test_text_without_marker_passes_through() {
        let resolver = resolver(&[("@", "/project/src")]);
        assert_eq!(resolver.apply("no directives here"), "no directives here");
    }

    #[test]
    fn test_malformed_parameters_pass_through() {
        let resolver = resolver(&[("@", "/project/src")]);
        let input = r#"#{resolve-alias path="a.js" key="@"}%"#;
        assert_eq!(resolver.apply(input), input);
    }

    #[test]
    fn test_join_normalized_resolves_dots() {
        assert_eq!(
            join_normalized("/project/src", "utils/../lib/./a.js"),
            "/project/lib/a.js"
        );
        assert_eq!(join_normalized("/project/src", "a.js"), "/project/src/a.js");
    }

    #[test]
    fn test_join_normalized_keeps_relative_parents() {
        assert_eq!(join_normalized("..", "../a.js"), "../../a.js");
        assert_eq!(join_normalized("/", "../a.js"), "/a.js");
    }
}
