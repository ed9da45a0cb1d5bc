//! Preview command implementation

use anyhow::Result;
use clap::Args;
use codebase_consolidator::config::CliOverrides;
use codebase_consolidator::partition::Partitioner;
use codebase_consolidator::render::part_file_name;
use codebase_consolidator::rules::{IgnoreRuleSet, RuleSource};
use codebase_consolidator::scan::{render_file_tree, TreeWalker};
use codebase_consolidator::utils::{format_size, format_with_commas};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::utils::{parse_csv, parse_positive, resolve_run_config};

#[derive(Args)]
pub struct PreviewArgs {
    /// Directory to inspect
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Number of part documents to plan for [default: 50]
    #[arg(short = 'n', long, alias = "parts", value_name = "N", value_parser = parse_positive, env = "CONSOLIDATOR_NUM_FILES")]
    pub num_files: Option<usize>,

    /// Maximum summed source size of one part in bytes; 0 disables the limit
    #[arg(long, value_name = "BYTES", env = "CONSOLIDATOR_MAX_SIZE")]
    pub max_size: Option<u64>,

    /// Extra ignore patterns (comma-separated, gitignore syntax)
    #[arg(short = 'e', long, value_name = "PATTERNS")]
    pub exclude: Option<String>,

    /// Config file (TOML or YAML)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Leave out the file tree
    #[arg(long)]
    pub no_tree: bool,
}

pub fn run(args: PreviewArgs, verbose: bool) -> Result<()> {
    let root = args.path.canonicalize()?;
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let overrides = CliOverrides {
        target_parts: args.num_files,
        max_document_size: args.max_size,
        no_tree: args.no_tree,
        verbose,
        exclude: parse_csv(&args.exclude),
        ..CliOverrides::default()
    };
    let config = resolve_run_config(&root, args.config.as_deref(), overrides)?;
    config.validate()?;

    let rules = IgnoreRuleSet::resolve(&root, &config.extra_ignores);
    let outcome = TreeWalker::new(&root, &rules).walk()?;
    let files = &outcome.files;
    let stats = &outcome.stats;

    let root_name = root.file_name().and_then(|n| n.to_str()).unwrap_or(".");
    println!("Directory: {}", root_name);

    println!("Ignore rules: {} ({} from .gitignore)", rules.len(), rules.count_from(RuleSource::GitIgnore));
    for unsupported in rules.unsupported() {
        println!("  not applied: {} ({})", unsupported.pattern, unsupported.reason);
    }

    let mut languages: BTreeMap<&str, usize> = BTreeMap::new();
    for file in files {
        *languages.entry(file.language).or_default() += 1;
    }
    if !languages.is_empty() {
        let mut langs: Vec<_> = languages.into_iter().collect();
        langs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        println!("Languages detected:");
        for (lang, count) in langs {
            println!("  {}: {} files", lang, count);
        }
    }

    println!("Statistics:");
    println!("  Files seen: {}", stats.files_seen);
    println!("  Files included: {}", files.len());
    println!("  Files skipped (ignore rules): {}", stats.files_ignored);
    println!("  Files skipped (binary): {}", stats.files_binary);
    println!("  Entries unreadable: {}", stats.entries_unreadable);
    println!("  Symlinks not followed: {}", stats.symlinks_skipped);
    println!("  Total bytes: {}", format_with_commas(files.total_bytes()));

    if verbose {
        for record in &outcome.skipped {
            println!("  skipped {}: {}", record.path, record.reason);
        }
    }

    let partitioner = Partitioner::new(config.target_parts).with_cap(config.max_document_size);
    let partition = partitioner.partition(files);
    println!("Planned parts: {} (target {})", partition.len(), config.target_parts);
    for (idx, bucket) in partition.buckets.iter().enumerate() {
        let marker = if bucket.is_oversized() { " [oversized]" } else { "" };
        println!(
            "  {}: {} files, {}{}",
            part_file_name(idx + 1),
            bucket.len(),
            format_size(bucket.total_bytes()),
            marker
        );
    }

    if config.include_tree {
        println!("\n{}", render_file_tree(root_name, files));
    }

    Ok(())
}
