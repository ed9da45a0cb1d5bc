//! File descriptors and the ordered file set produced by a walk.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

/// Content classification from sniffing a bounded prefix of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Text,
    Binary,
}

/// One file discovered by the walker. Never mutated after creation; later stages
/// only hold shared references to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    pub path: PathBuf,
    /// Root-relative path with `/` separators.
    pub relative_path: String,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Local>>,
    pub language: &'static str,
    pub kind: FileKind,
}

/// The files that survived filtering, ordered by relative path.
///
/// Ordering is a flat byte-wise comparison of the `/`-separated relative paths
/// (`a/b.rs` < `a0.rs` < `b.rs`), not directory-first. Partitioning and anchor ids
/// rely on it being identical across runs over an unchanged tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileSet {
    files: Vec<FileDescriptor>,
}

impl FileSet {
    pub fn new(mut files: Vec<FileDescriptor>) -> Self {
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        files.dedup_by(|a, b| a.relative_path == b.relative_path);
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileDescriptor> {
        self.files.iter()
    }

    pub fn as_slice(&self) -> &[FileDescriptor] {
        &self.files
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size_bytes).sum()
    }

    pub fn relative_paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.relative_path.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a FileDescriptor;
    type IntoIter = std::slice::Iter<'a, FileDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

#[cfg(test)]
pub(crate) fn descriptor(relative_path: &str, size_bytes: u64) -> FileDescriptor {
    FileDescriptor {
        path: PathBuf::from("/src").join(relative_path),
        relative_path: relative_path.to_string(),
        size_bytes,
        modified: None,
        language: crate::domain::language_for_path(std::path::Path::new(relative_path)),
        kind: FileKind::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_set_orders_flat_by_relative_path() {
        let set = FileSet::new(vec![
            descriptor("b.rs", 1),
            descriptor("a0.rs", 1),
            descriptor("a/b.rs", 1),
            descriptor("A.rs", 1),
        ]);
        assert_eq!(set.relative_paths(), vec!["A.rs", "a/b.rs", "a0.rs", "b.rs"]);
    }

    #[test]
    fn test_file_set_totals() {
        let set = FileSet::new(vec![descriptor("x.py", 10), descriptor("y.py", 32)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.total_bytes(), 42);
        assert!(!set.is_empty());
    }
}
