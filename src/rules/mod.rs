//! Ignore-rule resolution.
//!
//! The effective rule set is the union of the root `.gitignore`, the built-in list
//! and any extra patterns from the configuration. A path is excluded as soon as any
//! rule matches it, so rule order never changes the outcome and there is no
//! re-include semantics: `!pattern` lines are recorded as unsupported and skipped.

mod builtin;
mod pattern;

pub use builtin::BUILTIN_PATTERNS;

use pattern::{compile, Compiled, Matcher};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Where a rule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSource {
    GitIgnore,
    BuiltIn,
    Extra,
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RuleSource::GitIgnore => ".gitignore",
            RuleSource::BuiltIn => "built-in",
            RuleSource::Extra => "extra",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pattern: String,
    source: RuleSource,
    matcher: Matcher,
}

impl IgnoreRule {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn source(&self) -> RuleSource {
        self.source
    }
}

/// A pattern line that did not become a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedPattern {
    pub pattern: String,
    pub source: RuleSource,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct IgnoreRuleSet {
    rules: Vec<IgnoreRule>,
    unsupported: Vec<UnsupportedPattern>,
    seen: HashSet<String>,
}

impl IgnoreRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule set holding only the built-in patterns.
    pub fn builtin() -> Self {
        let mut set = Self::new();
        set.extend(BUILTIN_PATTERNS.iter().copied(), RuleSource::BuiltIn);
        set
    }

    /// Build the effective rules for `root`: its `.gitignore` (if readable), the
    /// built-in list and `extra`. A missing or unreadable ignore file is not an error.
    pub fn resolve(root: &Path, extra: &[String]) -> Self {
        let mut set = Self::new();

        let ignore_path = root.join(IGNORE_FILE_NAME);
        match fs::read(&ignore_path) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                set.extend(content.lines(), RuleSource::GitIgnore);
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No ignore file at {}", ignore_path.display());
            }
            Err(err) => {
                tracing::warn!(
                    "Could not read {}: {}; continuing with built-in rules",
                    ignore_path.display(),
                    err
                );
            }
        }

        set.extend(BUILTIN_PATTERNS.iter().copied(), RuleSource::BuiltIn);
        set.extend(extra.iter().map(String::as_str), RuleSource::Extra);

        tracing::debug!(
            "Resolved {} ignore rules ({} from {})",
            set.len(),
            set.count_from(RuleSource::GitIgnore),
            IGNORE_FILE_NAME
        );
        set
    }

    /// Add pattern lines from one source. Duplicate patterns are kept once.
    pub fn extend<'a, I>(&mut self, lines: I, source: RuleSource)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for line in lines {
            let trimmed = line.trim();
            match compile(trimmed) {
                Compiled::Rule(matcher) => {
                    if self.seen.insert(trimmed.to_string()) {
                        self.rules.push(IgnoreRule {
                            pattern: trimmed.to_string(),
                            source,
                            matcher,
                        });
                    }
                }
                Compiled::Empty => {}
                Compiled::Negation => {
                    tracing::debug!("Negation pattern '{}' from {} has no effect", trimmed, source);
                    self.unsupported.push(UnsupportedPattern {
                        pattern: trimmed.to_string(),
                        source,
                        reason: "negation patterns are not supported".to_string(),
                    });
                }
                Compiled::Invalid(reason) => {
                    tracing::warn!("Ignoring invalid pattern '{}' from {}: {}", trimmed, source, reason);
                    self.unsupported.push(UnsupportedPattern {
                        pattern: trimmed.to_string(),
                        source,
                        reason,
                    });
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    pub fn unsupported(&self) -> &[UnsupportedPattern] {
        &self.unsupported
    }

    pub fn count_from(&self, source: RuleSource) -> usize {
        self.rules.iter().filter(|r| r.source == source).count()
    }

    /// First rule excluding the entry itself, ignoring its ancestors. The walker uses
    /// this because excluded ancestors are pruned before their children are seen.
    pub fn match_entry(&self, relative_path: &str, is_dir: bool) -> Option<&IgnoreRule> {
        let name = relative_path.rsplit('/').next().unwrap_or(relative_path);
        self.rules.iter().find(|rule| rule.matcher.is_match(relative_path, name, is_dir))
    }

    /// First rule excluding the path or any of its ancestor directories.
    #[cfg(test)]
    fn matching_rule(&self, relative_path: &str, is_dir: bool) -> Option<&IgnoreRule> {
        let mut end = 0;
        let components: Vec<&str> = relative_path.split('/').collect();
        let last = components.len().saturating_sub(1);

        for (idx, name) in components.iter().enumerate() {
            if idx > 0 {
                end += 1;
            }
            end += name.len();
            let prefix = &relative_path[..end];
            let component_is_dir = idx < last || is_dir;
            if let Some(rule) =
                self.rules.iter().find(|rule| rule.matcher.is_match(prefix, name, component_is_dir))
            {
                return Some(rule);
            }
        }
        None
    }

    #[cfg(test)]
    fn is_ignored(&self, relative_path: &str, is_dir: bool) -> bool {
        self.matching_rule(relative_path, is_dir).is_some()
    }
}
