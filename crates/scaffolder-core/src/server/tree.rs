//! Depth-limited directory listings for previews

use serde::Serialize;
use std::io;
use std::path::Path;

/// Levels below the listed directory that are expanded
pub const MAX_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Path relative to the root the tree was built against, `/`-separated
    pub path: String,
    /// Size in bytes, files only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

/// List `dir` sorted by name. Paths are reported relative to `root`;
/// directories deeper than [`MAX_DEPTH`] are listed with no children.
pub fn build_tree(root: &Path, dir: &Path) -> io::Result<Vec<TreeNode>> {
    walk(root, dir, 1)
}

fn walk(root: &Path, dir: &Path, depth: usize) -> io::Result<Vec<TreeNode>> {
    let mut entries = std::fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut nodes = Vec::with_capacity(entries.len());
    for entry in entries {
        let path = entry.path();
        let relative = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .to_string_lossy()
            .replace('\\', "/");
        let name = entry.file_name().to_string_lossy().into_owned();

        if entry.file_type()?.is_dir() {
            let children = if depth < MAX_DEPTH {
                walk(root, &path, depth + 1)?
            } else {
                Vec::new()
            };
            nodes.push(TreeNode {
                name,
                kind: NodeKind::Directory,
                path: relative,
                size: None,
                children: Some(children),
            });
        } else {
            nodes.push(TreeNode {
                name,
                kind: NodeKind::File,
                path: relative,
                size: Some(entry.metadata()?.len()),
                children: None,
            });
        }
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_tree_sorted_and_relative() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("web_app");
        std::fs::create_dir_all(project.join("src")).unwrap();
        std::fs::write(project.join("README.md"), "x").unwrap();
        std::fs::write(project.join("src/index.js"), "x").unwrap();
        std::fs::write(project.join(".env.example"), "x").unwrap();

        let tree = build_tree(tmp.path(), &project).unwrap();
        let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec![".env.example", "README.md", "src"]);

        let src = &tree[2];
        assert_eq!(src.kind, NodeKind::Directory);
        assert_eq!(src.path, "web_app/src");
        let children = src.children.as_ref().unwrap();
        assert_eq!(children[0].path, "web_app/src/index.js");
        assert_eq!(children[0].kind, NodeKind::File);
        assert_eq!(children[0].size, Some(1));
        assert_eq!(src.size, None);
    }

    #[test]
    fn test_build_tree_depth_limit() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("a/b/c/d")).unwrap();
        std::fs::write(tmp.path().join("a/b/c/d/deep.txt"), "x").unwrap();

        let tree = build_tree(tmp.path(), tmp.path()).unwrap();
        let b = &tree[0].children.as_ref().unwrap()[0];
        let c = &b.children.as_ref().unwrap()[0];
        assert_eq!(c.path, "a/b/c");
        assert_eq!(c.children.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_node_serialization() {
        let node = TreeNode {
            name: "README.md".into(),
            kind: NodeKind::File,
            path: "web_app/README.md".into(),
            size: Some(42),
            children: None,
        };
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "file");
        assert_eq!(value["size"], 42);
        assert!(value.get("children").is_none());
    }
}
