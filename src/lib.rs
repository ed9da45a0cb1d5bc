//! codebase-consolidator: repackage a source tree into size-balanced Markdown documents
//!
//! The engine scans a directory, drops ignored paths and binary files, groups the
//! surviving files into a bounded number of roughly equal-weight buckets and renders
//! each bucket as a navigable document plus a `README.md` index.
//!
//! The stages are exposed individually ([`rules`], [`scan`], [`partition`],
//! [`render`]) and sequenced by [`run::run`], which is the only entry point a front
//! end needs.

pub mod config;
pub mod domain;
pub mod error;
pub mod partition;
pub mod render;
pub mod rules;
pub mod run;
pub mod scan;
pub mod utils;

pub use domain::{FileDescriptor, FileKind, FileSet, Manifest, RunConfig, RunEvent};
pub use error::RunError;
pub use run::{run, spawn_run, CancelToken, EventSink, NullSink, RunHandle};
