//! Part document rendering.

use crate::domain::DocumentFormat;
use crate::render::{DocumentEntry, OutputDocument, RenderContext};
use crate::utils::{format_size, format_with_commas};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write `document` to `path`. The handle is flushed and closed on every exit path;
/// a failure part way through leaves a partial file behind and returns the error.
pub fn write_part(path: &Path, document: &OutputDocument, ctx: &RenderContext<'_>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_part_to(&mut writer, document, ctx)?;
    writer.flush()
}

pub fn write_part_to<W: Write>(
    writer: &mut W,
    document: &OutputDocument,
    ctx: &RenderContext<'_>,
) -> io::Result<()> {
    writer.write_all(render_header(document, ctx).as_bytes())?;
    writer.write_all(render_toc(document).as_bytes())?;
    for entry in &document.entries {
        writer.write_all(render_entry(entry, ctx).as_bytes())?;
    }
    Ok(())
}

fn render_header(document: &OutputDocument, ctx: &RenderContext<'_>) -> String {
    let config = ctx.config;
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", document.title));
    out.push_str(&format!("**Source:** `{}`  \n", ctx.root.display()));
    out.push_str(&format!("**Generated:** {}  \n", ctx.generated_label()));
    out.push_str(&format!("**Files in this part:** {}  \n", document.entries.len()));
    out.push_str(&format!("**Part Size:** {}  \n", format_size(document.total_bytes())));
    out.push_str(&format!("**Syntax Theme:** {}  \n", config.syntax_theme));
    out.push_str(&format!("**Line Numbers:** {}  \n", enabled_label(config.effective_line_numbers())));
    out.push_str(&format!("**Format:** {}  \n\n", format_label(config.format)));

    if let Some(tree) = ctx.file_tree.as_deref() {
        out.push_str("## 🌳 File Tree\n\n");
        out.push_str("```text\n");
        out.push_str(tree);
        out.push_str("\n```\n\n---\n\n");
    }
    out
}

fn render_toc(document: &OutputDocument) -> String {
    let mut out = String::from("## Table of Contents\n\n");
    for (idx, entry) in document.entries.iter().enumerate() {
        out.push_str(&format!("{}. [{}](#{})\n", idx + 1, entry.relative_path, entry.anchor));
    }
    out.push_str("\n---\n\n");
    out
}

fn render_entry(entry: &DocumentEntry, ctx: &RenderContext<'_>) -> String {
    let modified = entry
        .modified
        .map(|m| m.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let mut out = String::new();
    out.push_str(&format!("<a id=\"{}\"></a>\n\n", entry.anchor));
    out.push_str(&format!("## {} {{#{}}}\n\n", entry.relative_path, entry.anchor));
    out.push_str(&format!("**File Path:** `{}`  \n", entry.relative_path));
    out.push_str(&format!(
        "**File Size:** {} ({} bytes)  \n",
        format_size(entry.size_bytes),
        format_with_commas(entry.size_bytes)
    ));
    out.push_str(&format!("**Language:** {}  \n", entry.language));
    out.push_str(&format!("**Last Modified:** {}\n\n", modified));
    out.push_str(&format_code_block(&entry.content, entry.language, &entry.relative_path, ctx));
    out.push_str("\n\n---\n\n");
    out
}

/// Embed one file's content as a fenced block or an XML `<file>` element.
pub fn format_code_block(
    content: &str,
    language: &str,
    relative_path: &str,
    ctx: &RenderContext<'_>,
) -> String {
    let config = ctx.config;
    let mut body = if config.effective_line_numbers() { number_lines(content) } else { content.to_string() };
    if !body.ends_with('\n') {
        body.push('\n');
    }

    match config.format {
        DocumentFormat::Xml => format!(
            "<file path=\"{}\" language=\"{}\">\n{}</file>",
            escape_attr(relative_path),
            escape_attr(language),
            body
        ),
        DocumentFormat::Markdown => {
            let fence = "`".repeat(fence_len(&body));
            let theme = if config.is_default_theme() {
                String::new()
            } else {
                format!("<!-- Syntax theme: {} -->\n", config.syntax_theme)
            };
            format!("{theme}{fence}{language}\n{body}{fence}")
        }
    }
}

/// Prefix each line with its 1-based number as `   7 | line`.
pub fn number_lines(content: &str) -> String {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| format!("{:4} | {}", idx + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One backtick longer than the longest run inside the content, and at least three.
fn fence_len(content: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in content.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    (longest + 1).max(3)
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;").replace('>', "&gt;")
}

pub(crate) fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "Enabled"
    } else {
        "Disabled"
    }
}

pub(crate) fn format_label(format: DocumentFormat) -> &'static str {
    match format {
        DocumentFormat::Markdown => "Markdown Code Blocks",
        DocumentFormat::Xml => "XML Tags",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RunConfig;
    use chrono::TimeZone;
    use chrono::Local;

    fn ctx(config: &RunConfig) -> RenderContext<'_> {
        RenderContext {
            root: Path::new("/work/demo"),
            config,
            generated_at: Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            total_parts: 1,
            file_tree: None,
        }
    }

    fn entry(path: &str, content: &str) -> DocumentEntry {
        DocumentEntry {
            anchor: crate::render::anchor_id(path),
            relative_path: path.to_string(),
            size_bytes: content.len() as u64,
            modified: None,
            language: "python",
            content: content.to_string(),
        }
    }

    fn rendered(document: &OutputDocument, ctx: &RenderContext<'_>) -> String {
        let mut buf = Vec::new();
        write_part_to(&mut buf, document, ctx).expect("render into memory");
        String::from_utf8(buf).expect("utf-8 output")
    }

    fn document(entries: Vec<DocumentEntry>) -> OutputDocument {
        OutputDocument {
            number: 1,
            title: "Codebase Part 1 of 1".to_string(),
            file_name: "codebase_part_001.md".to_string(),
            entries,
        }
    }

    #[test]
    fn test_line_numbers_restart_per_block() {
        let config = RunConfig::default();
        let block = format_code_block("a = 1\nb = 2\n", "python", "x.py", &ctx(&config));
        assert_eq!(block, "```python\n   1 | a = 1\n   2 | b = 2\n```");
    }

    #[test]
    fn test_plain_block_without_line_numbers() {
        let config = RunConfig { line_numbers: false, ..RunConfig::default() };
        let block = format_code_block("print('hi')", "python", "x.py", &ctx(&config));
        assert_eq!(block, "```python\nprint('hi')\n```");
    }

    #[test]
    fn test_theme_comment_only_for_non_default_theme() {
        let config = RunConfig { syntax_theme: "monokai".to_string(), ..RunConfig::default() };
        let block = format_code_block("x", "text", "x.txt", &ctx(&config));
        assert!(block.starts_with("<!-- Syntax theme: monokai -->\n```text\n"));

        let config = RunConfig::default();
        let block = format_code_block("x", "text", "x.txt", &ctx(&config));
        assert!(!block.contains("Syntax theme"));
    }

    #[test]
    fn test_fence_grows_past_embedded_backticks() {
        let config = RunConfig { line_numbers: false, ..RunConfig::default() };
        let block = format_code_block("```rust\nfn x() {}\n```\n", "markdown", "README.md", &ctx(&config));
        assert!(block.starts_with("````markdown\n"));
        assert!(block.ends_with("\n````"));
    }

    #[test]
    fn test_xml_mode_skips_line_numbers_and_escapes_path() {
        let config = RunConfig { format: DocumentFormat::Xml, ..RunConfig::default() };
        let block = format_code_block("a\nb\n", "python", "q\"a.py", &ctx(&config));
        assert_eq!(block, "<file path=\"q&quot;a.py\" language=\"python\">\na\nb\n</file>");
    }

    #[test]
    fn test_toc_links_every_entry_in_order() {
        let config = RunConfig::default();
        let doc = document(vec![entry("a.py", "1"), entry("pkg/b_c.py", "2")]);
        let out = rendered(&doc, &ctx(&config));

        assert!(out.starts_with("# Codebase Part 1 of 1\n\n"));
        assert!(out.contains("1. [a.py](#a-py)\n2. [pkg/b_c.py](#pkg-b-c-py)\n"));
        assert!(out.contains("<a id=\"pkg-b-c-py\"></a>\n\n## pkg/b_c.py {#pkg-b-c-py}"));
        assert!(out.contains("**Files in this part:** 2"));
        assert!(out.contains("**Generated:** 2024-05-01 09:30:00"));
        assert!(out.contains("**Last Modified:** unknown"));
        assert!(!out.contains("File Tree"));
    }

    #[test]
    fn test_file_tree_section_when_present() {
        let config = RunConfig::default();
        let mut context = ctx(&config);
        context.file_tree = Some("demo/\n└── a.py".to_string());
        let out = rendered(&document(vec![entry("a.py", "")]), &context);
        assert!(out.contains("## 🌳 File Tree\n\n```text\ndemo/\n└── a.py\n```"));
    }

    #[test]
    fn test_write_part_matches_in_memory_rendering() {
        let tmp = tempfile::TempDir::new().expect("tmp");
        let path = tmp.path().join("codebase_part_001.md");
        let config = RunConfig::default();
        let doc = document(vec![entry("a.py", "x = 1\n")]);

        write_part(&path, &doc, &ctx(&config)).expect("write");
        let written = std::fs::read_to_string(&path).expect("read");
        similar_asserts::assert_eq!(written, rendered(&doc, &ctx(&config)));
    }
}
