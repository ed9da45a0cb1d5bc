//! Directory tree rendering for the consolidated documents.

use crate::domain::FileSet;
use std::collections::BTreeMap;

#[derive(Default)]
struct Node {
    dirs: BTreeMap<String, Node>,
    files: Vec<String>,
}

impl Node {
    fn insert(&mut self, relative_path: &str) {
        let mut node = self;
        let mut parts = relative_path.split('/').peekable();
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                node.files.push(part.to_string());
            } else {
                node = node.dirs.entry(part.to_string()).or_default();
            }
        }
    }
}

/// Render the kept files as an indented tree rooted at `root_name`.
///
/// Only directories containing at least one kept file appear. Directories sort
/// before files, each group by name.
pub fn render_file_tree(root_name: &str, files: &FileSet) -> String {
    let mut root = Node::default();
    for file in files {
        root.insert(&file.relative_path);
    }

    let mut lines = vec![format!("{}/", root_name)];
    walk_tree(&root, "", &mut lines);
    lines.join("\n")
}

fn walk_tree(node: &Node, prefix: &str, lines: &mut Vec<String>) {
    let mut files: Vec<&String> = node.files.iter().collect();
    files.sort();

    let total_entries = node.dirs.len() + files.len();
    let mut idx = 0;

    for (name, child) in &node.dirs {
        idx += 1;
        let is_last = idx == total_entries;
        let connector = if is_last { "└── " } else { "├── " };
        lines.push(format!("{}{}{}/", prefix, connector, name));
        let extension = if is_last { "    " } else { "│   " };
        walk_tree(child, &format!("{}{}", prefix, extension), lines);
    }

    for name in files {
        idx += 1;
        let connector = if idx == total_entries { "└── " } else { "├── " };
        lines.push(format!("{}{}{}", prefix, connector, name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::file::descriptor;

    fn file_set(paths: &[&str]) -> FileSet {
        FileSet::new(paths.iter().map(|p| descriptor(p, 1)).collect())
    }

    #[test]
    fn test_tree_lists_dirs_before_files() {
        let files = file_set(&["README.md", "src/main.rs", "src/cli/mod.rs", "Cargo.toml"]);
        let tree = render_file_tree("demo", &files);

        let expected = "\
demo/
├── src/
│   ├── cli/
│   │   └── mod.rs
│   └── main.rs
├── Cargo.toml
└── README.md";
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_tree_for_empty_set_is_just_the_root() {
        assert_eq!(render_file_tree("empty", &FileSet::default()), "empty/");
    }

    #[test]
    fn test_last_directory_uses_blank_indent() {
        let files = file_set(&["a.txt", "z/deep/file.rs"]);
        let tree = render_file_tree("r", &files);
        assert!(tree.contains("└── z/\n    └── deep/\n        └── file.rs"), "{tree}");
    }
}
