//! Tree walking and file-tree rendering

use crate::error::RunError;
use crate::rules::IgnoreRuleSet;
use std::path::Path;

pub mod scanner;
pub mod tree;

pub use scanner::{TreeWalker, WalkOutcome, WalkStats};
pub use tree::render_file_tree;

/// Walk `root` with the effective rules for it and no cancellation.
pub fn walk_repository<P: AsRef<Path>>(root: P, extra_ignores: &[String]) -> Result<WalkOutcome, RunError> {
    let root = root.as_ref();
    let rules = IgnoreRuleSet::resolve(root, extra_ignores);
    TreeWalker::new(root, &rules).walk()
}
