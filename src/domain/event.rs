//! Progress events and the run manifest.

use serde::Serialize;
use std::path::PathBuf;

/// An entry that was left out of the run because of a recoverable error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipRecord {
    pub path: String,
    pub reason: String,
}

impl SkipRecord {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { path: path.into(), reason: reason.into() }
    }
}

/// Outcome of rendering one non-empty bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartSummary {
    /// 1-based part number.
    pub number: usize,
    pub file_name: String,
    pub file_count: usize,
    pub total_bytes: u64,
    /// First few relative paths, for the index table.
    pub sample_paths: Vec<String>,
    /// Set when the document could not be written.
    pub error: Option<String>,
}

impl PartSummary {
    pub fn is_written(&self) -> bool {
        self.error.is_none()
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub root: PathBuf,
    pub output_dir: PathBuf,
    /// `None` when the index document itself failed to write.
    pub index_path: Option<PathBuf>,
    /// Part documents that were written, in part order.
    pub documents: Vec<PathBuf>,
    pub parts: Vec<PartSummary>,
    pub files_processed: usize,
    pub total_bytes: u64,
    pub skipped: Vec<SkipRecord>,
}

impl Manifest {
    pub fn failed_parts(&self) -> Vec<usize> {
        self.parts.iter().filter(|p| !p.is_written()).map(|p| p.number).collect()
    }
}

/// Ordered progress stream emitted by the run coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Started { root: PathBuf },
    RulesResolved { total: usize, from_gitignore: usize, unsupported: usize },
    EntrySkipped(SkipRecord),
    WalkCompleted { files: usize, total_bytes: u64, skipped: usize },
    OversizedFile { path: String, size: u64, cap: u64 },
    PartitionCompleted { bucket_sizes: Vec<u64> },
    DocumentWritten { path: PathBuf, files: usize, bytes: u64 },
    DocumentFailed { document: String, error: String },
    IndexWritten { path: PathBuf },
    /// Terminal event on the worker channel for a successful run.
    Completed(Manifest),
    /// Terminal event on the worker channel for a fatal failure.
    Failed(String),
}

impl RunEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunEvent::Completed(_) | RunEvent::Failed(_))
    }
}
