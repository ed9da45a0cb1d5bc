//! Path normalization

use std::path::Path;

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and normalize
    path.replace('\\', "/")
}

/// `path` relative to `root` with `/` separators, or `None` when it lies outside
/// `root` or is not valid UTF-8.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let rel = rel.to_str()?;
    if rel.is_empty() {
        return None;
    }
    Some(normalize_path(rel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        let root = Path::new("/repo");
        assert_eq!(relative_path(root, Path::new("/repo/src/lib.rs")).as_deref(), Some("src/lib.rs"));
        assert_eq!(relative_path(root, Path::new("/repo")), None);
        assert_eq!(relative_path(root, Path::new("/other/x.rs")), None);
    }

    #[test]
    fn test_normalize_path_converts_backslashes() {
        assert_eq!(normalize_path(r"src\app\main.py"), "src/app/main.py");
    }
}
