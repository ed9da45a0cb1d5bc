//! Config file loading

use crate::domain::DocumentFormat;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the table that may wrap the settings, e.g. `[consolidator]`.
const NESTED_SECTION: &str = "consolidator";

const CANDIDATES: &[&str] =
    &["consolidator.toml", ".consolidator.toml", "consolidator.yml", "consolidator.yaml"];

/// Settings read from a config file. Every field is optional; unset fields fall
/// back to the CLI or the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    #[serde(alias = "num_files", alias = "parts")]
    pub target_parts: Option<usize>,
    /// `0` disables the per-part size cap.
    #[serde(alias = "max_size")]
    pub max_document_size: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub folder_name: Option<String>,
    #[serde(alias = "theme")]
    pub syntax_theme: Option<String>,
    pub line_numbers: Option<bool>,
    pub format: Option<DocumentFormat>,
    #[serde(alias = "tree")]
    pub include_tree: Option<bool>,
    pub verbose: Option<bool>,
    /// Extra ignore patterns; a comma-separated string or a list.
    #[serde(alias = "exclude_globs")]
    pub exclude: Option<PatternList>,
}

impl FileConfig {
    pub fn exclude_patterns(&self) -> Vec<String> {
        self.exclude.as_ref().map(PatternList::to_vec).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PatternList {
    One(String),
    Many(Vec<String>),
}

impl PatternList {
    pub fn to_vec(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            PatternList::One(value) => value.split(',').collect(),
            PatternList::Many(values) => values.iter().map(String::as_str).collect(),
        };
        raw.into_iter().map(str::trim).filter(|p| !p.is_empty()).map(str::to_string).collect()
    }
}

/// A loaded config together with the file it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: FileConfig,
    pub source: Option<PathBuf>,
}

/// Load the config for `root`: the explicit `config_path` if given, otherwise the
/// first candidate file found at the root.
///
/// An explicit file that cannot be read or parsed is an error. An auto-discovered
/// one is warned about and ignored.
pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<LoadedConfig> {
    let explicit = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(root),
    };

    let Some(config_file) = discovered else {
        return Ok(LoadedConfig::default());
    };

    match read_config_file(&config_file) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(LoadedConfig { config, source: Some(config_file) })
        }
        Err(err) if explicit => Err(err),
        Err(err) => {
            tracing::warn!("Ignoring config {}: {:#}", config_file.display(), err);
            Ok(LoadedConfig::default())
        }
    }
}

fn read_config_file(config_file: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "toml" => parse_toml_config(&content, config_file),
        "yaml" | "yml" => parse_yaml_config(&content, config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    }
}

/// Parse TOML, honouring a nested `[consolidator]` table.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<FileConfig> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(NESTED_SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

fn parse_yaml_config(content: &str, config_file: &Path) -> Result<FileConfig> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    // An empty document parses as null.
    if raw.is_null() {
        return Ok(FileConfig::default());
    }

    let config_val = match raw.get(NESTED_SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(root: &Path) -> Option<PathBuf> {
    CANDIDATES.iter().map(|candidate| root.join(candidate)).find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let loaded = load_config(tmp.path(), None).expect("config");
        assert_eq!(loaded, LoadedConfig::default());
    }

    #[test]
    fn test_load_toml_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("consolidator.toml"),
            "target_parts = 12\nmax_size = 0\ntheme = 'monokai'\nformat = 'xml'\nline_numbers = false\n",
        )
        .expect("write");

        let loaded = load_config(tmp.path(), None).expect("config");
        let cfg = loaded.config;
        assert_eq!(cfg.target_parts, Some(12));
        assert_eq!(cfg.max_document_size, Some(0));
        assert_eq!(cfg.syntax_theme.as_deref(), Some("monokai"));
        assert_eq!(cfg.format, Some(DocumentFormat::Xml));
        assert_eq!(cfg.line_numbers, Some(false));
        assert!(loaded.source.is_some_and(|p| p.ends_with("consolidator.toml")));
    }

    #[test]
    fn test_nested_toml_section() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join(".consolidator.toml"),
            "[consolidator]\nnum_files = 3\nexclude = \"*.snap, fixtures/\"\n",
        )
        .expect("write");

        let cfg = load_config(tmp.path(), None).expect("config").config;
        assert_eq!(cfg.target_parts, Some(3));
        assert_eq!(cfg.exclude_patterns(), vec!["*.snap", "fixtures/"]);
    }

    #[test]
    fn test_yaml_config_with_list() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("consolidator.yml"),
            "consolidator:\n  target_parts: 8\n  exclude:\n    - '*.gen.go'\n    - ' docs/ '\n",
        )
        .expect("write");

        let cfg = load_config(tmp.path(), None).expect("config").config;
        assert_eq!(cfg.target_parts, Some(8));
        assert_eq!(cfg.exclude_patterns(), vec!["*.gen.go", "docs/"]);
    }

    #[test]
    fn test_explicit_config_invalid_type_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "target_parts = \"many\"\n").expect("write");

        assert!(load_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_missing_file_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        assert!(load_config(tmp.path(), Some(&tmp.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_explicit_unsupported_extension_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.json");
        fs::write(&path, "{}").expect("write");
        assert!(load_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_auto_discovered_invalid_config_returns_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("consolidator.toml"), "exclude = 123\n").expect("write");

        let loaded = load_config(tmp.path(), None).expect("should not error on auto-discovery");
        assert_eq!(loaded, LoadedConfig::default());
    }
}
