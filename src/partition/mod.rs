//! Size-balanced partitioning of a file set into part buckets.
//!
//! Files are assigned greedily in file-set order to the bucket with the smallest
//! running byte total. Ties go to the bucket holding fewer files, then to the lowest
//! index, so a set with fewer files than buckets lands one file per bucket even when
//! the files are empty.
//!
//! With a byte cap, a bucket only accepts a file if its total stays within the cap.
//! When no bucket qualifies a new one is appended. A file larger than the cap gets
//! a bucket of its own (an empty one if available) which then accepts nothing else.

use crate::domain::{FileDescriptor, FileSet};

/// An ordered group of borrowed descriptors destined for one part document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket<'a> {
    files: Vec<&'a FileDescriptor>,
    total_bytes: u64,
    sealed: bool,
}

impl<'a> Bucket<'a> {
    pub fn files(&self) -> &[&'a FileDescriptor] {
        &self.files
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether this bucket holds a single file larger than the cap.
    pub fn is_oversized(&self) -> bool {
        self.sealed
    }

    fn push(&mut self, file: &'a FileDescriptor) {
        self.total_bytes += file.size_bytes;
        self.files.push(file);
    }

    fn load(&self) -> (u64, usize) {
        (self.total_bytes, self.files.len())
    }
}

/// Result of partitioning: non-empty buckets in order, plus the oversized files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition<'a> {
    pub buckets: Vec<Bucket<'a>>,
    pub oversized: Vec<&'a FileDescriptor>,
}

impl<'a> Partition<'a> {
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn bucket_sizes(&self) -> Vec<u64> {
        self.buckets.iter().map(Bucket::total_bytes).collect()
    }

    pub fn file_count(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioner {
    target: usize,
    cap: Option<u64>,
}

impl Partitioner {
    /// `target` below 1 is treated as 1.
    pub fn new(target: usize) -> Self {
        Self { target: target.max(1), cap: None }
    }

    pub fn with_cap(mut self, cap: Option<u64>) -> Self {
        self.cap = cap.filter(|c| *c > 0);
        self
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn cap(&self) -> Option<u64> {
        self.cap
    }

    pub fn partition<'a>(&self, files: &'a FileSet) -> Partition<'a> {
        let mut buckets: Vec<Bucket<'a>> = vec![Bucket::default(); self.target];
        let mut oversized = Vec::new();

        for file in files {
            let idx = match self.cap {
                Some(cap) if file.size_bytes > cap => {
                    tracing::warn!(
                        "{} ({} bytes) exceeds the {} byte part limit; placing it alone",
                        file.relative_path,
                        file.size_bytes,
                        cap
                    );
                    oversized.push(file);
                    let idx = first_empty(&buckets).unwrap_or_else(|| append(&mut buckets));
                    buckets[idx].sealed = true;
                    idx
                }
                Some(cap) => least_loaded(&buckets, |b| b.total_bytes + file.size_bytes <= cap)
                    .unwrap_or_else(|| append(&mut buckets)),
                None => least_loaded(&buckets, |_| true).unwrap_or_else(|| append(&mut buckets)),
            };
            buckets[idx].push(file);
        }

        if buckets.len() > self.target {
            tracing::info!(
                "Size limit raised the part count from {} to {}",
                self.target,
                buckets.len()
            );
        }

        buckets.retain(|b| !b.is_empty());
        tracing::debug!(
            "Partitioned {} files into {} buckets (target {})",
            files.len(),
            buckets.len(),
            self.target
        );

        Partition { buckets, oversized }
    }
}

fn least_loaded(buckets: &[Bucket<'_>], accepts: impl Fn(&Bucket<'_>) -> bool) -> Option<usize> {
    buckets
        .iter()
        .enumerate()
        .filter(|(_, b)| !b.sealed && accepts(b))
        .min_by_key(|(idx, b)| (b.load(), *idx))
        .map(|(idx, _)| idx)
}

fn first_empty(buckets: &[Bucket<'_>]) -> Option<usize> {
    buckets.iter().position(|b| b.is_empty() && !b.sealed)
}

fn append(buckets: &mut Vec<Bucket<'_>>) -> usize {
    buckets.push(Bucket::default());
    buckets.len() - 1
}
