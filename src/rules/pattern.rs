//! Compilation of a single ignore-file line into a matcher.

use globset::{GlobBuilder, GlobMatcher};

/// How a compiled rule is applied to a path.
#[derive(Debug, Clone)]
pub(crate) enum Matcher {
    /// Matches any path component by name (`node_modules`, `*.log`).
    Component(GlobMatcher),
    /// Matches directory components by name only (`build/`, `venv/**`).
    DirComponent(GlobMatcher),
    /// Matches a root-relative path (`/config.local`, `src/gen/*.rs`).
    Path(GlobMatcher),
    /// Matches a root-relative directory path (`docs/_build/`).
    DirPath(GlobMatcher),
}

impl Matcher {
    /// Test one path component. `prefix` is the root-relative path up to and including
    /// `name`; `is_dir` says whether that component is a directory.
    pub(crate) fn is_match(&self, prefix: &str, name: &str, is_dir: bool) -> bool {
        match self {
            Matcher::Component(glob) => glob.is_match(name),
            Matcher::DirComponent(glob) => is_dir && glob.is_match(name),
            Matcher::Path(glob) => glob.is_match(prefix),
            Matcher::DirPath(glob) => is_dir && glob.is_match(prefix),
        }
    }
}

/// Result of reading one pattern line.
#[derive(Debug)]
pub(crate) enum Compiled {
    Rule(Matcher),
    /// Blank line or comment.
    Empty,
    /// A `!pattern` re-include. Not supported; the line has no effect.
    Negation,
    Invalid(String),
}

/// Compile one line of `.gitignore` syntax.
///
/// Supported forms: exact names, `*`/`?`/`[..]`/`**` globs, a trailing `/` (or
/// `/*`, `/**`) for directory-only rules, a leading `/` or an inner `/` to anchor the
/// pattern at the root, and `**/` prefixes.
pub(crate) fn compile(line: &str) -> Compiled {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Compiled::Empty;
    }
    if line.starts_with('!') {
        return Compiled::Negation;
    }

    let mut pattern = line;
    let mut dir_only = false;
    if let Some(stripped) = pattern.strip_suffix("/**").or_else(|| pattern.strip_suffix("/*")) {
        pattern = stripped;
        dir_only = true;
    }
    if let Some(stripped) = pattern.strip_suffix('/') {
        pattern = stripped;
        dir_only = true;
    }

    let mut anchored = false;
    if let Some(stripped) = pattern.strip_prefix('/') {
        pattern = stripped;
        anchored = true;
    }
    let mut any_depth = false;
    while let Some(stripped) = pattern.strip_prefix("**/") {
        pattern = stripped;
        any_depth = true;
    }
    if pattern.is_empty() || pattern == "**" {
        return Compiled::Invalid(format!("pattern '{line}' matches everything"));
    }

    // A bare name already matches at every depth; a multi-segment path keeps its
    // `**/` so the glob floats below the root.
    let source = if any_depth && pattern.contains('/') {
        format!("**/{pattern}")
    } else {
        pattern.to_string()
    };
    let glob = match GlobBuilder::new(&source).literal_separator(true).build() {
        Ok(glob) => glob.compile_matcher(),
        Err(err) => return Compiled::Invalid(err.to_string()),
    };

    let rooted = anchored || pattern.contains('/');
    let matcher = match (dir_only, rooted) {
        (false, false) => Matcher::Component(glob),
        (true, false) => Matcher::DirComponent(glob),
        (false, true) => Matcher::Path(glob),
        (true, true) => Matcher::DirPath(glob),
    };
    Compiled::Rule(matcher)
}
