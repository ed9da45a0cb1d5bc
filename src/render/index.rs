//! The `README.md` index that ties the part documents together.

use crate::domain::{DocumentFormat, PartSummary, RunConfig, SkipRecord};
use crate::render::markdown::{enabled_label, format_label};
use crate::render::RenderContext;
use crate::utils::{format_size, format_with_commas};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// How many file names the parts table lists before summarising the rest.
const SAMPLE_PATHS: usize = 3;

/// Run totals shown in the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexTotals {
    pub files_processed: usize,
    pub total_bytes: u64,
}

pub fn write_index(
    path: &Path,
    ctx: &RenderContext<'_>,
    parts: &[PartSummary],
    totals: IndexTotals,
    skipped: &[SkipRecord],
) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(render_index(ctx, parts, totals, skipped).as_bytes())?;
    writer.flush()
}

pub fn render_index(
    ctx: &RenderContext<'_>,
    parts: &[PartSummary],
    totals: IndexTotals,
    skipped: &[SkipRecord],
) -> String {
    let config = ctx.config;
    let mut out = String::new();

    out.push_str("# 📚 Consolidated Codebase\n\n");
    out.push_str(&format!("**Source Directory:** `{}`  \n", ctx.root.display()));
    out.push_str(&format!("**Generated:** {}  \n", ctx.generated_label()));
    out.push_str(&format!("**Total Files Processed:** {}  \n", format_with_commas(totals.files_processed as u64)));
    out.push_str(&format!("**Total Size:** {}  \n", format_size(totals.total_bytes)));
    out.push_str(&format!("**Target Output Files:** {}  \n", config.target_parts));
    out.push_str(&format!("**Actual Output Files:** {}  \n\n", parts.len()));

    out.push_str("## 🎨 Formatting Options\n\n");
    out.push_str(&format!("- **Syntax Theme:** `{}`\n", config.syntax_theme));
    out.push_str(&format!("- **Line Numbers:** {}\n", enabled_label(config.effective_line_numbers())));
    out.push_str(&format!("- **Format:** {}\n", format_label(config.format)));
    out.push_str(&format!(
        "- **File Tree:** {}\n",
        if config.include_tree { "Included" } else { "Excluded" }
    ));
    match config.max_document_size {
        Some(cap) => out.push_str(&format!("- **Part Size Limit:** {}\n\n", format_size(cap))),
        None => out.push_str("- **Part Size Limit:** none\n\n"),
    }

    out.push_str("## 📋 File Structure\n\n");
    if parts.is_empty() {
        out.push_str("_No files were processed._\n");
    } else {
        out.push_str("| Part | Files | Size | Description |\n");
        out.push_str("|------|-------|------|-------------|\n");
        for part in parts {
            out.push_str(&format!(
                "| [Part {}](./{}) | {} | {} | {} |\n",
                part.number,
                part.file_name,
                part.file_count,
                format_size(part.total_bytes),
                describe_part(part)
            ));
        }
    }

    let failed: Vec<&PartSummary> = parts.iter().filter(|p| !p.is_written()).collect();
    if !failed.is_empty() {
        out.push_str("\n## ⚠️ Failed Parts\n\n");
        for part in failed {
            out.push_str(&format!(
                "- Part {} (`{}`): {}\n",
                part.number,
                part.file_name,
                part.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    if !skipped.is_empty() {
        out.push_str("\n## ⏭️ Skipped Entries\n\n");
        out.push_str(&format!("{} entries could not be read and were skipped.\n", skipped.len()));
        if config.verbose {
            out.push('\n');
            for record in skipped {
                out.push_str(&format!("- `{}`: {}\n", record.path, record.reason));
            }
        }
    }

    out.push_str("\n## 🚀 Usage\n\n");
    out.push_str("Each part document holds a table of contents followed by one section per file,\n");
    out.push_str("with its path, size, language and last-modified time above the content.\n\n");
    out.push_str("**Command used:**\n```bash\n");
    out.push_str(&usage_command(ctx.root, config));
    out.push_str("\n```\n");
    out
}

fn describe_part(part: &PartSummary) -> String {
    let mut description = part
        .sample_paths
        .iter()
        .take(SAMPLE_PATHS)
        .map(|p| format!("`{}`", p))
        .collect::<Vec<_>>()
        .join(", ");
    if part.file_count > SAMPLE_PATHS {
        description.push_str(&format!(" and {} more...", part.file_count - SAMPLE_PATHS));
    }
    description
}

/// Command line that reproduces the run's formatting choices.
pub fn usage_command(root: &Path, config: &RunConfig) -> String {
    let mut parts = vec![
        "codebase-consolidator consolidate".to_string(),
        quote(&root.display().to_string()),
        format!("-n {}", config.target_parts),
    ];
    match config.max_document_size {
        Some(cap) => parts.push(format!("--max-size {}", cap)),
        None => parts.push("--max-size 0".to_string()),
    }
    if !config.is_default_theme() {
        parts.push(format!("--theme {}", config.syntax_theme));
    }
    if !config.line_numbers {
        parts.push("--no-line-numbers".to_string());
    }
    if config.format == DocumentFormat::Xml {
        parts.push("--xml".to_string());
    }
    if !config.include_tree {
        parts.push("--no-tree".to_string());
    }
    for pattern in &config.extra_ignores {
        parts.push(format!("-e {}", quote(pattern)));
    }
    parts.join(" ")
}

fn quote(value: &str) -> String {
    if !value.is_empty()
        && value.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | ':'))
    {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
