//! Core data types shared by every stage of a run.

pub mod config;
pub mod event;
pub mod file;
pub mod language;

pub use config::{
    DocumentFormat, RunConfig, DEFAULT_MAX_DOCUMENT_SIZE, DEFAULT_SYNTAX_THEME,
    DEFAULT_TARGET_PARTS, SYNTAX_THEMES,
};
pub use event::{Manifest, PartSummary, RunEvent, SkipRecord};
pub use file::{FileDescriptor, FileKind, FileSet};
pub use language::language_for_path;
