//! Run coordination: rules, walk, partition, render, index.

mod worker;

pub use worker::{spawn_run, CancelToken, RunHandle};

use crate::domain::{Manifest, PartSummary, RunConfig, RunEvent, SkipRecord};
use crate::error::RunError;
use crate::partition::Partitioner;
use crate::render::{
    write_index, write_part, IndexTotals, OutputDocument, RenderContext, INDEX_FILE_NAME,
};
use crate::rules::{IgnoreRuleSet, RuleSource, IGNORE_FILE_NAME};
use crate::scan::{render_file_tree, TreeWalker};
use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// Receiver of progress events. The engine only appends; it never reads back.
pub trait EventSink {
    fn emit(&mut self, event: RunEvent);
}

impl EventSink for Vec<RunEvent> {
    fn emit(&mut self, event: RunEvent) {
        self.push(event);
    }
}

impl EventSink for Sender<RunEvent> {
    fn emit(&mut self, event: RunEvent) {
        // A dropped receiver only means nobody is watching.
        let _ = self.send(event);
    }
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: RunEvent) {}
}

/// Consolidate `root` according to `config`.
///
/// Fails only on invalid configuration, an unusable root, an output directory that
/// cannot be created, or cancellation. Unreadable entries and documents that fail to
/// write are reported through `sink` and recorded in the manifest.
pub fn run(
    root: &Path,
    config: &RunConfig,
    sink: &mut dyn EventSink,
    cancel: &CancelToken,
) -> Result<Manifest, RunError> {
    config.validate()?;
    let root = check_root(root)?;
    tracing::info!("Consolidating {}", root.display());
    sink.emit(RunEvent::Started { root: root.clone() });

    let rules = IgnoreRuleSet::resolve(&root, &config.extra_ignores);
    sink.emit(RunEvent::RulesResolved {
        total: rules.len(),
        from_gitignore: rules.count_from(RuleSource::GitIgnore),
        unsupported: rules.unsupported().len(),
    });
    tracing::info!(
        "Resolved {} ignore rules ({} from {})",
        rules.len(),
        rules.count_from(RuleSource::GitIgnore),
        IGNORE_FILE_NAME
    );

    let outcome = TreeWalker::new(&root, &rules).cancel_token(cancel.clone()).walk()?;
    let mut skipped: Vec<SkipRecord> = outcome.skipped;
    for record in &skipped {
        sink.emit(RunEvent::EntrySkipped(record.clone()));
    }
    let files = outcome.files;
    sink.emit(RunEvent::WalkCompleted {
        files: files.len(),
        total_bytes: files.total_bytes(),
        skipped: skipped.len(),
    });

    let partitioner = Partitioner::new(config.target_parts).with_cap(config.max_document_size);
    let partition = partitioner.partition(&files);
    if let Some(cap) = partitioner.cap() {
        for file in &partition.oversized {
            sink.emit(RunEvent::OversizedFile {
                path: file.relative_path.clone(),
                size: file.size_bytes,
                cap,
            });
        }
    }
    sink.emit(RunEvent::PartitionCompleted { bucket_sizes: partition.bucket_sizes() });
    tracing::info!("Partitioned {} files into {} parts", files.len(), partition.len());

    if cancel.is_cancelled() {
        return Err(RunError::Cancelled);
    }

    let generated_at = Local::now();
    let output_dir = config.output_path_for(&root, generated_at);
    fs::create_dir_all(&output_dir)
        .map_err(|source| RunError::OutputDir { path: output_dir.clone(), source })?;
    tracing::info!("Writing documents to {}", output_dir.display());

    let root_name = root.file_name().and_then(|n| n.to_str()).unwrap_or(".");
    let ctx = RenderContext {
        root: &root,
        config,
        generated_at,
        total_parts: partition.len(),
        file_tree: config.include_tree.then(|| render_file_tree(root_name, &files)),
    };

    let mut parts = Vec::with_capacity(partition.len());
    let mut documents = Vec::new();
    let mut files_processed = 0;
    let mut total_bytes = 0;

    for (idx, bucket) in partition.buckets.iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::info!("Run cancelled before part {}", idx + 1);
            return Err(RunError::Cancelled);
        }

        let (document, unreadable) = OutputDocument::load(idx + 1, ctx.total_parts, bucket);
        for record in unreadable {
            sink.emit(RunEvent::EntrySkipped(record.clone()));
            skipped.push(record);
        }

        let path = output_dir.join(&document.file_name);
        let mut summary = PartSummary {
            number: document.number,
            file_name: document.file_name.clone(),
            file_count: document.entries.len(),
            total_bytes: document.total_bytes(),
            sample_paths: document.entries.iter().take(3).map(|e| e.relative_path.clone()).collect(),
            error: None,
        };

        match write_part(&path, &document, &ctx) {
            Ok(()) => {
                tracing::info!("Created {} ({} files)", document.file_name, summary.file_count);
                files_processed += summary.file_count;
                total_bytes += summary.total_bytes;
                sink.emit(RunEvent::DocumentWritten {
                    path: path.clone(),
                    files: summary.file_count,
                    bytes: summary.total_bytes,
                });
                documents.push(path);
            }
            Err(err) => {
                tracing::warn!("Failed to write {}: {}", document.file_name, err);
                sink.emit(RunEvent::DocumentFailed {
                    document: document.file_name.clone(),
                    error: err.to_string(),
                });
                summary.error = Some(err.to_string());
            }
        }
        parts.push(summary);
    }

    let index_path = output_dir.join(INDEX_FILE_NAME);
    let totals = IndexTotals { files_processed, total_bytes };
    let index_path = match write_index(&index_path, &ctx, &parts, totals, &skipped) {
        Ok(()) => {
            sink.emit(RunEvent::IndexWritten { path: index_path.clone() });
            Some(index_path)
        }
        Err(err) => {
            tracing::warn!("Failed to write {}: {}", INDEX_FILE_NAME, err);
            sink.emit(RunEvent::DocumentFailed {
                document: INDEX_FILE_NAME.to_string(),
                error: err.to_string(),
            });
            None
        }
    };

    if !skipped.is_empty() {
        tracing::warn!("{} entries skipped", skipped.len());
    }

    Ok(Manifest {
        root,
        output_dir,
        index_path,
        documents,
        parts,
        files_processed,
        total_bytes,
        skipped,
    })
}

/// The root must exist and be a directory. Returns its canonical form.
fn check_root(root: &Path) -> Result<PathBuf, RunError> {
    let metadata = match fs::metadata(root) {
        Ok(m) => m,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(RunError::RootNotFound(root.to_path_buf()))
        }
        Err(source) => return Err(RunError::RootUnreadable { path: root.to_path_buf(), source }),
    };
    if !metadata.is_dir() {
        return Err(RunError::RootNotDirectory(root.to_path_buf()));
    }
    fs::canonicalize(root).map_err(|source| RunError::RootUnreadable { path: root.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentFormat;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path().join("proj");
        fs::create_dir(&root).expect("mkdir");
        for (path, content) in files {
            let full = root.join(path);
            fs::create_dir_all(full.parent().expect("parent")).expect("mkdir");
            fs::write(full, content).expect("write");
        }
        (tmp, root)
    }

    fn config_in(tmp: &TempDir) -> RunConfig {
        RunConfig {
            output_dir: Some(tmp.path().join("out")),
            folder_name: Some("result".to_string()),
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_run_emits_steps_in_order() {
        let (tmp, root) = project(&[("a.py", "print(1)\n"), ("b.py", "print(2)\n")]);
        let mut events: Vec<RunEvent> = Vec::new();
        let manifest = run(&root, &config_in(&tmp), &mut events, &CancelToken::new()).expect("run");

        let kinds: Vec<&str> = events
            .iter()
            .map(|e| match e {
                RunEvent::Started { .. } => "started",
                RunEvent::RulesResolved { .. } => "rules",
                RunEvent::WalkCompleted { .. } => "walk",
                RunEvent::PartitionCompleted { .. } => "partition",
                RunEvent::DocumentWritten { .. } => "document",
                RunEvent::IndexWritten { .. } => "index",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["started", "rules", "walk", "partition", "document", "document", "index"]);

        assert_eq!(manifest.files_processed, 2);
        assert_eq!(manifest.documents.len(), 2);
        assert_eq!(manifest.output_dir, tmp.path().join("out").join("result"));
        assert!(manifest.index_path.as_ref().is_some_and(|p| p.ends_with("README.md")));
    }

    #[test]
    fn test_root_not_directory_is_fatal() {
        let (tmp, root) = project(&[("a.py", "")]);
        let err = run(&root.join("a.py"), &config_in(&tmp), &mut NullSink, &CancelToken::new())
            .expect_err("file root");
        assert!(matches!(err, RunError::RootNotDirectory(_)));
        assert!(!tmp.path().join("out").exists());
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let (tmp, root) = project(&[]);
        let config = RunConfig { target_parts: 0, ..config_in(&tmp) };
        let err = run(&root, &config, &mut NullSink, &CancelToken::new()).expect_err("invalid");
        assert!(matches!(err, RunError::InvalidConfig(_)));
    }

    #[test]
    fn test_cancelled_run_writes_nothing() {
        let (tmp, root) = project(&[("a.py", "x")]);
        let token = CancelToken::new();
        token.cancel();
        let err = run(&root, &config_in(&tmp), &mut NullSink, &token).expect_err("cancelled");
        assert!(matches!(err, RunError::Cancelled));
        assert!(!tmp.path().join("out").exists());
    }

    #[test]
    fn test_failed_part_is_recorded_and_run_continues() {
        let (tmp, root) = project(&[("a.py", "a"), ("b.py", "b")]);
        let out = tmp.path().join("out").join("result");
        // A directory where the first part file should go makes that write fail.
        fs::create_dir_all(out.join("codebase_part_001.md")).expect("blocker");

        let mut events: Vec<RunEvent> = Vec::new();
        let manifest = run(&root, &config_in(&tmp), &mut events, &CancelToken::new()).expect("run");

        assert_eq!(manifest.failed_parts(), vec![1]);
        assert_eq!(manifest.documents.len(), 1);
        assert!(events.iter().any(|e| matches!(e, RunEvent::DocumentFailed { document, .. } if document == "codebase_part_001.md")));

        let index = fs::read_to_string(manifest.index_path.expect("index")).expect("read index");
        assert!(index.contains("## ⚠️ Failed Parts"));
    }

    #[test]
    fn test_xml_format_end_to_end() {
        let (tmp, root) = project(&[("app.py", "x = 1\n")]);
        let config = RunConfig { format: DocumentFormat::Xml, ..config_in(&tmp) };
        let manifest = run(&root, &config, &mut NullSink, &CancelToken::new()).expect("run");

        let part = fs::read_to_string(&manifest.documents[0]).expect("read part");
        assert!(part.contains("<file path=\"app.py\" language=\"python\">\nx = 1\n</file>"));
        assert!(part.contains("**Line Numbers:** Disabled"));
    }
}
