//! Shared helpers: content sniffing, path handling, formatting.

pub mod encoding;
pub mod format;
pub mod paths;

pub use encoding::{read_file_safe, sniff_file, DecodedText, DEFAULT_SAMPLE_SIZE};
pub use format::{format_size, format_with_commas};
pub use paths::{normalize_path, relative_path};
