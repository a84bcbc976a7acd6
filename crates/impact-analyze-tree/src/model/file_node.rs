//! Repository file tree as delivered by the repository listing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether a [`FileNode`] is a file or a folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Folder,
    /// Symlinks, submodules and missing types; never matched.
    #[default]
    #[serde(other)]
    Other,
}

/// Node in a repository's known file tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: FileKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileNode>,
}

impl FileNode {
    /// Create a file node.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FileKind::File,
            children: Vec::new(),
        }
    }

    /// Create a folder node with the given children.
    pub fn folder(name: impl Into<String>, children: Vec<FileNode>) -> Self {
        Self {
            name: name.into(),
            kind: FileKind::Folder,
            children,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == FileKind::Folder
    }

    fn is_file_named(&self, name: &str) -> bool {
        self.kind == FileKind::File && self.name == name
    }

    fn is_folder_named(&self, name: &str) -> bool {
        self.is_folder() && self.name == name
    }
}

/// Parse a listing's file tree node by node.
///
/// Entries that are not objects or carry no string `name` are dropped on
/// their own; the rest of the tree is kept. Returns the nodes and the number
/// of dropped entries.
pub fn parse_file_tree(listing: &Value) -> (Vec<FileNode>, usize) {
    let mut dropped = 0;
    let nodes = parse_nodes(listing, &mut dropped);
    (nodes, dropped)
}

fn parse_nodes(value: &Value, dropped: &mut usize) -> Vec<FileNode> {
    let Some(entries) = value.as_array() else {
        if !value.is_null() {
            *dropped += 1;
        }
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| parse_node(entry, dropped))
        .collect()
}

fn parse_node(entry: &Value, dropped: &mut usize) -> Option<FileNode> {
    let name = entry.get("name").and_then(Value::as_str);
    let Some(name) = name else {
        *dropped += 1;
        return None;
    };
    let kind = entry
        .get("type")
        .and_then(|kind| FileKind::deserialize(kind).ok())
        .unwrap_or_default();
    let children = entry
        .get("children")
        .map(|children| parse_nodes(children, dropped))
        .unwrap_or_default();
    Some(FileNode {
        name: name.to_string(),
        kind,
        children,
    })
}

/// Whether `file_name` lives at the end of `chain` starting at any depth of `nodes`.
///
/// The chain must match consecutive folders; its last folder must directly
/// contain the file. An empty chain matches the file anywhere in the tree.
pub fn contains_path(nodes: &[FileNode], chain: &[&str], file_name: &str) -> bool {
    chain_matches_here(nodes, chain, file_name)
        || nodes
            .iter()
            .filter(|n| n.is_folder())
            .any(|n| contains_path(&n.children, chain, file_name))
}

fn chain_matches_here(nodes: &[FileNode], chain: &[&str], file_name: &str) -> bool {
    match chain.split_first() {
        None => nodes.iter().any(|n| n.is_file_named(file_name)),
        Some((first, rest)) => nodes
            .iter()
            .filter(|n| n.is_folder_named(first))
            .any(|n| chain_matches_here(&n.children, rest, file_name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Vec<FileNode> {
        vec![FileNode::folder(
            "src",
            vec![FileNode::folder(
                "main",
                vec![FileNode::folder(
                    "java",
                    vec![FileNode::folder(
                        "com",
                        vec![FileNode::folder(
                            "acme",
                            vec![
                                FileNode::file("Order.java"),
                                FileNode::folder("util", vec![FileNode::file("Money.java")]),
                            ],
                        )],
                    )],
                )],
            )],
        )]
    }

    #[test]
    fn test_chain_matches_at_any_depth() {
        let tree = sample_tree();
        assert!(contains_path(&tree, &["com", "acme"], "Order.java"));
        assert!(contains_path(&tree, &["acme", "util"], "Money.java"));
        assert!(contains_path(&tree, &["com", "acme", "util"], "Money.java"));
    }

    #[test]
    fn test_chain_must_be_consecutive() {
        let tree = sample_tree();
        assert!(!contains_path(&tree, &["com", "util"], "Money.java"));
        assert!(!contains_path(&tree, &["com", "acme"], "Money.java"));
        assert!(!contains_path(&tree, &["org", "acme"], "Order.java"));
    }

    #[test]
    fn test_empty_chain_matches_anywhere() {
        let tree = sample_tree();
        assert!(contains_path(&tree, &[], "Money.java"));
        assert!(!contains_path(&tree, &[], "Missing.java"));
        assert!(!contains_path(&[], &[], "Money.java"));
    }

    #[test]
    fn test_unknown_kinds_are_kept_but_never_match() {
        let nodes: Vec<FileNode> = serde_json::from_str(
            r#"[{"name":"README","type":"symlink"},{"name":"Cart.java"},{"name":"A.java","type":"file"}]"#,
        )
        .unwrap();
        assert_eq!(nodes[0].kind, FileKind::Other);
        assert_eq!(nodes[1].kind, FileKind::Other);
        assert!(!contains_path(&nodes, &[], "Cart.java"));
        assert!(contains_path(&nodes, &[], "A.java"));
    }

    #[test]
    fn test_parse_file_tree_drops_only_bad_entries() {
        let listing = serde_json::json!([
            { "name": "shop", "type": "folder", "children": [
                { "name": "Cart.java", "type": "file" },
                { "type": "file" },
                7,
                { "name": "link", "type": "symlink" }
            ]},
            { "name": 12, "type": "folder" }
        ]);
        let (nodes, dropped) = parse_file_tree(&listing);
        assert_eq!(dropped, 3);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].children.len(), 2);
        assert!(contains_path(&nodes, &["shop"], "Cart.java"));
    }

    #[test]
    fn test_deserialize_listing() {
        let json = r#"[{"name":"src","type":"folder","children":[{"name":"A.java","type":"file"}]}]"#;
        let nodes: Vec<FileNode> = serde_json::from_str(json).unwrap();
        assert_eq!(
            nodes,
            vec![FileNode::folder("src", vec![FileNode::file("A.java")])]
        );
    }
}
