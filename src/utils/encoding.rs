//! Text/binary sniffing and tolerant file reading.
//!
//! Classification looks at a bounded prefix only:
//! - a NUL byte marks the file as binary, whatever BOM precedes it
//! - UTF-8 (with or without BOM) is text
//! - anything else is handed to chardetng; the guess must decode cleanly and be
//!   mostly printable, otherwise the file is binary

use crate::domain::FileKind;
use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Share of control characters above which a legacy-encoded sample counts as binary.
const MAX_CONTROL_RATIO: f64 = 0.30;

/// Read at most `sample_size` bytes from the start of `path` and classify them.
pub fn sniff_file(path: &Path, sample_size: usize) -> io::Result<FileKind> {
    let mut file = File::open(path)?;
    let mut sample = Vec::with_capacity(sample_size.min(64 * 1024));
    file.by_ref().take(sample_size as u64).read_to_end(&mut sample)?;
    let truncated = sample.len() == sample_size;
    Ok(classify_sample(&sample, truncated))
}

/// Classify a content prefix. `truncated` says whether the prefix was cut at the
/// sample boundary, in which case a multi-byte sequence split by the cut is tolerated.
pub fn classify_sample(sample: &[u8], truncated: bool) -> FileKind {
    if sample.is_empty() {
        return FileKind::Text;
    }

    if sample.contains(&0) {
        return FileKind::Binary;
    }

    match std::str::from_utf8(sample) {
        Ok(_) => return FileKind::Text,
        Err(err) if truncated && err.error_len().is_none() => return FileKind::Text,
        Err(_) => {}
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, !truncated);
    let encoding = detector.guess(None, true);
    if encoding == UTF_8 {
        return FileKind::Binary;
    }

    let Some(decoded) = encoding.decode_without_bom_handling_and_without_replacement(sample)
    else {
        return FileKind::Binary;
    };

    let total = decoded.chars().count().max(1);
    let control = decoded
        .chars()
        .filter(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t' | '\x0c' | '\x1b'))
        .count();
    if (control as f64 / total as f64) > MAX_CONTROL_RATIO {
        FileKind::Binary
    } else {
        FileKind::Text
    }
}

/// Decoded file content together with the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub content: String,
    pub encoding: &'static str,
    /// Whether undecodable sequences were replaced with U+FFFD.
    pub lossy: bool,
}

/// Read a whole file as text.
///
/// BOMs win, then strict UTF-8, then the chardetng guess; invalid sequences are
/// replaced rather than failing, so only I/O errors surface as `Err`.
pub fn read_file_safe(path: &Path) -> Result<DecodedText> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(decode_bytes(&bytes))
}

pub fn decode_bytes(bytes: &[u8]) -> DecodedText {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, had_errors) =
            encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return DecodedText {
            content: decoded.into_owned(),
            encoding: encoding.name(),
            lossy: had_errors,
        };
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return DecodedText { content: text.to_string(), encoding: UTF_8.name(), lossy: false };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (decoded, had_errors) = encoding.decode_without_bom_handling(bytes);
    DecodedText { content: decoded.into_owned(), encoding: encoding.name(), lossy: had_errors }
}
