//! Shared CLI utilities.

use anyhow::Result;
use codebase_consolidator::config::{load_config, merge_cli_with_config, CliOverrides};
use codebase_consolidator::RunConfig;
use std::path::Path;

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace and
/// discarding empty segments. Returns an empty list when `value` is `None`.
pub fn parse_csv(value: &Option<String>) -> Vec<String> {
    value
        .as_ref()
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| part.to_string())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default()
}

/// clap value parser for counts that must be at least 1.
pub fn parse_positive(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a positive integer", value)),
    }
}

/// Config file at `root` (or `config_path`) merged under the CLI values.
pub fn resolve_run_config(
    root: &Path,
    config_path: Option<&Path>,
    overrides: CliOverrides,
) -> Result<RunConfig> {
    let loaded = load_config(root, config_path)?;
    if let Some(source) = &loaded.source {
        tracing::info!("Using config file {}", source.display());
    }
    Ok(merge_cli_with_config(loaded.config, overrides))
}
