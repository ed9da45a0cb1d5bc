//! codebase-consolidator: repackage a source tree into size-balanced Markdown documents
//!
//! Scans a directory, skips ignored and binary files, and writes the rest as a
//! handful of navigable part documents plus a README index.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
