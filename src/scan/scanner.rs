//! Tree walker: enumerates candidate files under the root.

use crate::domain::{language_for_path, FileDescriptor, FileKind, FileSet, SkipRecord};
use crate::error::RunError;
use crate::rules::IgnoreRuleSet;
use crate::run::CancelToken;
use crate::utils::{normalize_path, relative_path, sniff_file, DEFAULT_SAMPLE_SIZE};
use chrono::{DateTime, Local};
use ignore::WalkBuilder;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Counters collected during one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    pub dirs_visited: usize,
    pub files_seen: usize,
    pub files_ignored: usize,
    pub files_binary: usize,
    pub entries_unreadable: usize,
    pub symlinks_skipped: usize,
    pub total_bytes: u64,
}

#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    pub files: FileSet,
    /// Entries dropped because of recoverable errors, in discovery order.
    pub skipped: Vec<SkipRecord>,
    pub stats: WalkStats,
}

/// Recursive descent over a root, pruning ignored directories before they are opened.
///
/// Symlinks are never followed. Binary files are dropped whatever the rules say.
pub struct TreeWalker<'a> {
    root: PathBuf,
    rules: &'a IgnoreRuleSet,
    sample_size: usize,
    cancel: Option<CancelToken>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: impl Into<PathBuf>, rules: &'a IgnoreRuleSet) -> Self {
        Self { root: root.into(), rules, sample_size: DEFAULT_SAMPLE_SIZE, cancel: None }
    }

    /// Number of leading bytes inspected for text/binary classification.
    pub fn sample_size(mut self, bytes: usize) -> Self {
        self.sample_size = bytes.max(1);
        self
    }

    /// Stop with [`RunError::Cancelled`] once `token` fires. Checked between directories.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn walk(&self) -> Result<WalkOutcome, RunError> {
        let mut stats = WalkStats::default();
        let mut skipped = Vec::new();
        let mut files = Vec::new();

        // filter_entry needs an owned, 'static view of the rules.
        let dir_rules = Arc::new(self.rules.clone());
        let prune_root = self.root.clone();
        // Entries whose names are not UTF-8 are pruned in filter_entry and recorded here.
        let unnamed: Arc<Mutex<Vec<PathBuf>>> = Arc::default();
        let unnamed_sink = Arc::clone(&unnamed);

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let Some(rel) = relative_path(&prune_root, entry.path()) else {
                    if let Ok(mut pending) = unnamed_sink.lock() {
                        pending.push(entry.path().to_path_buf());
                    }
                    return false;
                };
                if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    return true;
                }
                match dir_rules.match_entry(&rel, true) {
                    Some(rule) => {
                        tracing::debug!(
                            "Pruned {}/ (rule '{}' from {})",
                            rel,
                            rule.pattern(),
                            rule.source()
                        );
                        false
                    }
                    None => true,
                }
            });

        for entry_result in builder.build() {
            record_unnamed(&self.root, &unnamed, &mut skipped, &mut stats);
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(err) => {
                    stats.entries_unreadable += 1;
                    let path = error_path(&err)
                        .and_then(|p| relative_path(&self.root, p))
                        .unwrap_or_else(|| ".".to_string());
                    tracing::warn!("Skipping unreadable entry {}: {}", path, err);
                    skipped.push(SkipRecord::new(path, err.to_string()));
                    continue;
                }
            };

            let Some(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                    tracing::info!("Walk cancelled at {}", entry.path().display());
                    return Err(RunError::Cancelled);
                }
                if entry.depth() > 0 {
                    stats.dirs_visited += 1;
                }
                continue;
            }

            let path = entry.path();
            let Some(rel) = relative_path(&self.root, path) else {
                stats.entries_unreadable += 1;
                let shown = path.to_string_lossy();
                tracing::warn!("Skipping {}: path is not valid UTF-8", shown);
                skipped.push(SkipRecord::new(shown, "path is not valid UTF-8"));
                continue;
            };

            if file_type.is_symlink() {
                stats.symlinks_skipped += 1;
                tracing::debug!("Not following symlink {}", rel);
                continue;
            }
            if !file_type.is_file() {
                continue;
            }

            stats.files_seen += 1;

            if let Some(rule) = self.rules.match_entry(&rel, false) {
                stats.files_ignored += 1;
                tracing::trace!("Ignored {} (rule '{}')", rel, rule.pattern());
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(err) => {
                    stats.entries_unreadable += 1;
                    tracing::warn!("Skipping {}: {}", rel, err);
                    skipped.push(SkipRecord::new(rel, format!("metadata unavailable: {err}")));
                    continue;
                }
            };

            match sniff_file(path, self.sample_size) {
                Ok(FileKind::Text) => {}
                Ok(FileKind::Binary) => {
                    stats.files_binary += 1;
                    tracing::debug!("Skipping binary file {}", rel);
                    continue;
                }
                Err(err) => {
                    stats.entries_unreadable += 1;
                    tracing::warn!("Skipping {}: {}", rel, err);
                    skipped.push(SkipRecord::new(rel, format!("unreadable: {err}")));
                    continue;
                }
            }

            let size_bytes = metadata.len();
            stats.total_bytes += size_bytes;
            files.push(FileDescriptor {
                path: path.to_path_buf(),
                language: language_for_path(path),
                relative_path: normalize_path(&rel),
                size_bytes,
                modified: metadata.modified().ok().map(DateTime::<Local>::from),
                kind: FileKind::Text,
            });
        }

        record_unnamed(&self.root, &unnamed, &mut skipped, &mut stats);

        let files = FileSet::new(files);
        tracing::info!(
            "Walk complete: {} files kept of {} seen ({} ignored, {} binary, {} unreadable)",
            files.len(),
            stats.files_seen,
            stats.files_ignored,
            stats.files_binary,
            stats.entries_unreadable
        );

        Ok(WalkOutcome { files, skipped, stats })
    }
}

/// Move entries pruned for non-UTF-8 names into the skip list.
fn record_unnamed(
    root: &Path,
    pending: &Mutex<Vec<PathBuf>>,
    skipped: &mut Vec<SkipRecord>,
    stats: &mut WalkStats,
) {
    let Ok(mut pending) = pending.lock() else {
        return;
    };
    for path in pending.drain(..) {
        let shown = normalize_path(&path.strip_prefix(root).unwrap_or(path.as_path()).to_string_lossy());
        stats.entries_unreadable += 1;
        tracing::warn!("Skipping {}: path is not valid UTF-8", shown);
        skipped.push(SkipRecord::new(shown, "path is not valid UTF-8"));
    }
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}
