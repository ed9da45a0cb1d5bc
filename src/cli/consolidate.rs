//! Consolidate command implementation

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::Args;
use codebase_consolidator::config::CliOverrides;
use codebase_consolidator::domain::SYNTAX_THEMES;
use codebase_consolidator::utils::{format_size, format_with_commas};
use codebase_consolidator::{spawn_run, Manifest, RunEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use super::output::Output;
use super::utils::{parse_csv, parse_positive, resolve_run_config};

#[derive(Args)]
pub struct ConsolidateArgs {
    /// Directory to consolidate
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Number of part documents to aim for [default: 50]
    #[arg(short = 'n', long, alias = "parts", value_name = "N", value_parser = parse_positive, env = "CONSOLIDATOR_NUM_FILES")]
    pub num_files: Option<usize>,

    /// Directory in which the output folder is created [default: next to PATH]
    #[arg(short = 'o', long, value_name = "DIR", env = "CONSOLIDATOR_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Name of the output folder [default: <name>_consolidated_<N>files_<timestamp>]
    #[arg(long, value_name = "NAME")]
    pub folder_name: Option<String>,

    /// Maximum summed source size of one part in bytes; 0 disables the limit [default: 512000]
    #[arg(long, value_name = "BYTES", env = "CONSOLIDATOR_MAX_SIZE")]
    pub max_size: Option<u64>,

    /// Syntax theme recorded in the documents
    #[arg(long, value_name = "THEME", value_parser = PossibleValuesParser::new(SYNTAX_THEMES.iter().copied()), env = "CONSOLIDATOR_THEME")]
    pub theme: Option<String>,

    /// Do not prefix code lines with line numbers
    #[arg(long)]
    pub no_line_numbers: bool,

    /// Wrap files in <file> tags instead of fenced code blocks
    #[arg(long)]
    pub xml: bool,

    /// Leave the file tree out of each part
    #[arg(long)]
    pub no_tree: bool,

    /// Extra ignore patterns (comma-separated, gitignore syntax)
    #[arg(short = 'e', long, value_name = "PATTERNS")]
    pub exclude: Option<String>,

    /// Config file (TOML or YAML) [default: consolidator.toml etc. in PATH]
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the run manifest as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ConsolidateArgs, verbose: bool) -> Result<()> {
    let overrides = CliOverrides {
        target_parts: args.num_files,
        max_document_size: args.max_size,
        output_dir: args.output_dir.clone(),
        folder_name: args.folder_name.clone(),
        syntax_theme: args.theme.clone(),
        no_line_numbers: args.no_line_numbers,
        xml: args.xml,
        no_tree: args.no_tree,
        verbose,
        exclude: parse_csv(&args.exclude),
    };
    let config = resolve_run_config(&args.path, args.config.as_deref(), overrides)?;
    let verbose = config.verbose;

    let out = Output::new(args.json);
    let spinner = progress_spinner(args.json);
    spinner.set_message(format!("Scanning {}", args.path.display()));

    let handle = spawn_run(&args.path, config).context("Failed to start the consolidation worker")?;

    let mut skipped = 0usize;
    let mut failure = None;
    let mut manifest: Option<Manifest> = None;

    for event in handle.events().iter() {
        match event {
            RunEvent::Started { root } => {
                spinner.set_message(format!("Scanning {}", root.display()));
            }
            RunEvent::RulesResolved { total, from_gitignore, unsupported } => {
                tracing::debug!("{total} ignore rules ({from_gitignore} from .gitignore)");
                if unsupported > 0 {
                    spinner.suspend(|| {
                        out.warning(&format!("{unsupported} ignore pattern(s) not supported and skipped"))
                    });
                }
            }
            RunEvent::EntrySkipped(record) => {
                skipped += 1;
                if verbose {
                    spinner.suspend(|| out.warning(&format!("Skipped {}: {}", record.path, record.reason)));
                }
            }
            RunEvent::WalkCompleted { files, total_bytes, .. } => {
                spinner.set_message(format!(
                    "Found {} files ({})",
                    format_with_commas(files as u64),
                    format_size(total_bytes)
                ));
            }
            RunEvent::OversizedFile { path, size, cap } => {
                spinner.suspend(|| {
                    out.warning(&format!(
                        "{} is {} (limit {}); it gets a part of its own",
                        path,
                        format_size(size),
                        format_size(cap)
                    ))
                });
            }
            RunEvent::PartitionCompleted { bucket_sizes } => {
                spinner.set_message(format!("Writing {} parts", bucket_sizes.len()));
            }
            RunEvent::DocumentWritten { path, files, .. } => {
                let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                spinner.set_message(format!("Created {name} ({files} files)"));
            }
            RunEvent::DocumentFailed { document, error } => {
                spinner.suspend(|| out.warning(&format!("Failed to write {document}: {error}")));
            }
            RunEvent::IndexWritten { .. } => {}
            RunEvent::Completed(done) => manifest = Some(done),
            RunEvent::Failed(message) => failure = Some(message),
        }
    }
    spinner.finish_and_clear();

    // The worker's own result carries the typed error; events only carry its text.
    let joined = handle.join();
    if let Some(message) = failure {
        return Err(match joined {
            Err(err) => anyhow::Error::new(err),
            Ok(_) => anyhow::anyhow!(message),
        });
    }
    let manifest = match manifest {
        Some(manifest) => manifest,
        None => joined?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
        return Ok(());
    }

    print_summary(&out, &manifest, skipped, verbose);
    Ok(())
}

fn progress_spinner(hidden: bool) -> ProgressBar {
    if hidden || !console::Term::stderr().is_term() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn print_summary(out: &Output, manifest: &Manifest, skipped: usize, verbose: bool) {
    out.section("Consolidation complete");
    out.line(&format!("  Source:          {}", manifest.root.display()));
    out.line(&format!("  Output:          {}", manifest.output_dir.display()));
    out.line(&format!("  Files processed: {}", format_with_commas(manifest.files_processed as u64)));
    out.line(&format!("  Total size:      {}", format_size(manifest.total_bytes)));
    out.line(&format!("  Parts written:   {}", manifest.documents.len()));

    let failed = manifest.failed_parts();
    if !failed.is_empty() {
        let list = failed.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ");
        out.warning(&format!("Parts that failed to write: {list}"));
    }
    if manifest.index_path.is_none() {
        out.warning("The README.md index could not be written");
    }
    if skipped > 0 && !verbose {
        out.info(&format!("{skipped} files skipped (use --verbose for details)"));
    }

    match &manifest.index_path {
        Some(index) => out.success(&format!("Start at {}", index.display())),
        None => out.success("Done"),
    }
}
