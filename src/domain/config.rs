//! Run configuration.

use crate::error::RunError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_TARGET_PARTS: usize = 50;
pub const DEFAULT_MAX_DOCUMENT_SIZE: u64 = 512_000;
pub const DEFAULT_SYNTAX_THEME: &str = "github";

/// Theme names accepted for `syntax_theme`. The theme is cosmetic: it is recorded in
/// the documents but never changes how content is selected or split.
pub const SYNTAX_THEMES: &[&str] = &[
    "github",
    "monokai",
    "solarized-light",
    "solarized-dark",
    "vs",
    "vs-dark",
    "atom-one-light",
    "atom-one-dark",
    "default",
    "colorful",
    "emacs",
    "friendly",
    "vim",
];

/// How file contents are embedded in a part document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Fenced Markdown code blocks.
    #[default]
    Markdown,
    /// `<file path=".." language="..">` tags, friendlier to retrieval pipelines.
    Xml,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Markdown => "markdown",
            DocumentFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(DocumentFormat::Markdown),
            "xml" => Ok(DocumentFormat::Xml),
            other => Err(format!("Invalid document format '{other}' (expected markdown or xml)")),
        }
    }
}

/// Immutable settings for a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of part documents to aim for.
    pub target_parts: usize,
    /// Byte cap on the summed source size of one part. `None` disables the cap.
    pub max_document_size: Option<u64>,
    /// Base directory for the output folder. Defaults to the parent of the root.
    pub output_dir: Option<PathBuf>,
    /// Output folder name. Defaults to a timestamped name.
    pub folder_name: Option<String>,
    pub syntax_theme: String,
    pub line_numbers: bool,
    /// Surface full detail for every recovered error instead of counts only.
    pub verbose: bool,
    pub format: DocumentFormat,
    /// Start each part with a tree of the whole file set.
    pub include_tree: bool,
    /// Additional ignore patterns on top of `.gitignore` and the built-in list.
    pub extra_ignores: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target_parts: DEFAULT_TARGET_PARTS,
            max_document_size: Some(DEFAULT_MAX_DOCUMENT_SIZE),
            output_dir: None,
            folder_name: None,
            syntax_theme: DEFAULT_SYNTAX_THEME.to_string(),
            line_numbers: true,
            verbose: false,
            format: DocumentFormat::Markdown,
            include_tree: true,
            extra_ignores: Vec::new(),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), RunError> {
        if self.target_parts == 0 {
            return Err(RunError::InvalidConfig(
                "target_parts must be a positive integer".to_string(),
            ));
        }
        if self.max_document_size == Some(0) {
            return Err(RunError::InvalidConfig(
                "max_document_size must be positive (omit it to disable the cap)".to_string(),
            ));
        }
        if !SYNTAX_THEMES.contains(&self.syntax_theme.as_str()) {
            return Err(RunError::InvalidConfig(format!(
                "unknown syntax theme '{}' (expected one of: {})",
                self.syntax_theme,
                SYNTAX_THEMES.join(", ")
            )));
        }
        if let Some(name) = self.folder_name.as_deref() {
            if name.trim().is_empty() || name.contains(['/', '\\']) {
                return Err(RunError::InvalidConfig(format!(
                    "folder_name must be a single non-empty path segment, got '{name}'"
                )));
            }
        }
        Ok(())
    }

    pub fn is_default_theme(&self) -> bool {
        self.syntax_theme == DEFAULT_SYNTAX_THEME
    }

    /// Line numbers are cosmetic Markdown text, so XML output never carries them.
    pub fn effective_line_numbers(&self) -> bool {
        self.line_numbers && self.format == DocumentFormat::Markdown
    }

    /// `<source-basename>_consolidated_<N>files_<timestamp>` unless overridden.
    pub fn folder_name_for(&self, root: &Path, now: DateTime<Local>) -> String {
        if let Some(name) = self.folder_name.as_deref() {
            return name.to_string();
        }
        let base = root
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("codebase");
        format!(
            "{}_consolidated_{}files_{}",
            base,
            self.target_parts,
            now.format("%Y%m%d_%H%M%S")
        )
    }

    /// Full path of the output folder for a run over `root` (expected canonical).
    pub fn output_path_for(&self, root: &Path, now: DateTime<Local>) -> PathBuf {
        let base = match self.output_dir.as_deref() {
            Some(dir) => dir.to_path_buf(),
            None => root.parent().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
        };
        base.join(self.folder_name_for(root, now))
    }
}
