//! Rendered form of a bucket, before it is serialised.

use crate::domain::{FileDescriptor, RunConfig, SkipRecord};
use crate::partition::Bucket;
use crate::render::anchor_id;
use crate::utils::read_file_safe;
use chrono::{DateTime, Local};
use std::path::Path;

pub const INDEX_FILE_NAME: &str = "README.md";

/// `codebase_part_007.md` for part 7.
pub fn part_file_name(number: usize) -> String {
    format!("codebase_part_{:03}.md", number)
}

/// Run-wide values every document needs.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub root: &'a Path,
    pub config: &'a RunConfig,
    pub generated_at: DateTime<Local>,
    /// Number of part documents in this run.
    pub total_parts: usize,
    /// Tree of the whole file set, when enabled.
    pub file_tree: Option<String>,
}

impl RenderContext<'_> {
    pub fn generated_label(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub anchor: String,
    pub relative_path: String,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Local>>,
    pub language: &'static str,
    pub content: String,
}

impl DocumentEntry {
    pub fn new(file: &FileDescriptor, content: String) -> Self {
        Self {
            anchor: anchor_id(&file.relative_path),
            relative_path: file.relative_path.clone(),
            size_bytes: file.size_bytes,
            modified: file.modified,
            language: file.language,
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    /// 1-based part number.
    pub number: usize,
    pub title: String,
    pub file_name: String,
    pub entries: Vec<DocumentEntry>,
}

impl OutputDocument {
    /// Load the contents of every file in `bucket`. Files that can no longer be read
    /// are left out of the document and returned as skips.
    pub fn load(number: usize, total_parts: usize, bucket: &Bucket<'_>) -> (Self, Vec<SkipRecord>) {
        let mut entries = Vec::with_capacity(bucket.len());
        let mut skipped = Vec::new();

        for file in bucket.files() {
            match read_file_safe(&file.path) {
                Ok(decoded) => {
                    if decoded.lossy {
                        tracing::debug!(
                            "{} decoded as {} with replacement characters",
                            file.relative_path,
                            decoded.encoding
                        );
                    }
                    entries.push(DocumentEntry::new(file, decoded.content));
                }
                Err(err) => {
                    tracing::warn!("Skipping {}: {:#}", file.relative_path, err);
                    skipped.push(SkipRecord::new(file.relative_path.clone(), format!("{err:#}")));
                }
            }
        }

        let document = Self {
            number,
            title: format!("Codebase Part {} of {}", number, total_parts),
            file_name: part_file_name(number),
            entries,
        };
        (document, skipped)
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size_bytes).sum()
    }
}
