//! CLI / config-file merging.
//!
//! Precedence: CLI flags (and their `CONSOLIDATOR_*` environment fallbacks, which
//! clap resolves before we see them) > config file > defaults.

use crate::config::loader::FileConfig;
use crate::domain::{DocumentFormat, RunConfig};
use std::path::PathBuf;

/// Values given on the command line. `None`/`false` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub target_parts: Option<usize>,
    /// `Some(0)` disables the size cap.
    pub max_document_size: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub folder_name: Option<String>,
    pub syntax_theme: Option<String>,
    pub no_line_numbers: bool,
    pub xml: bool,
    pub no_tree: bool,
    pub verbose: bool,
    pub exclude: Vec<String>,
}

pub fn merge_cli_with_config(file: FileConfig, cli: CliOverrides) -> RunConfig {
    let defaults = RunConfig::default();
    let exclude_from_file = file.exclude_patterns();

    let max_document_size = match cli.max_document_size.or(file.max_document_size) {
        Some(0) => None,
        Some(cap) => Some(cap),
        None => defaults.max_document_size,
    };

    let format = if cli.xml { DocumentFormat::Xml } else { file.format.unwrap_or(defaults.format) };

    let mut extra_ignores = exclude_from_file;
    for pattern in cli.exclude {
        if !extra_ignores.contains(&pattern) {
            extra_ignores.push(pattern);
        }
    }

    RunConfig {
        target_parts: cli.target_parts.or(file.target_parts).unwrap_or(defaults.target_parts),
        max_document_size,
        output_dir: cli.output_dir.or(file.output_dir),
        folder_name: cli.folder_name.or(file.folder_name),
        syntax_theme: cli.syntax_theme.or(file.syntax_theme).unwrap_or(defaults.syntax_theme),
        line_numbers: !cli.no_line_numbers && file.line_numbers.unwrap_or(defaults.line_numbers),
        verbose: cli.verbose || file.verbose.unwrap_or(defaults.verbose),
        format,
        include_tree: !cli.no_tree && file.include_tree.unwrap_or(defaults.include_tree),
        extra_ignores,
    }
}
