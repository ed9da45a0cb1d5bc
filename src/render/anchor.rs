//! Stable anchor ids for file sections.

/// Slug for a root-relative path: lower-cased, with path separators, dots,
/// underscores and whitespace each replaced by `-`.
///
/// Depends on nothing but the path, so links into a regenerated document stay valid.
pub fn anchor_id(relative_path: &str) -> String {
    relative_path
        .chars()
        .map(|c| match c {
            '/' | '\\' | '.' | '_' => '-',
            c if c.is_whitespace() => '-',
            c => c,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_id_replaces_separators() {
        assert_eq!(anchor_id("src/main.rs"), "src-main-rs");
        assert_eq!(anchor_id("My_Module/Read Me.MD"), "my-module-read-me-md");
        assert_eq!(anchor_id(r"win\path.txt"), "win-path-txt");
    }

    #[test]
    fn test_anchor_id_is_stable() {
        let path = "pkg/__init__.py";
        assert_eq!(anchor_id(path), anchor_id(path));
        assert_eq!(anchor_id(path), "pkg---init---py");
    }
}
