//! Grouped analyze tree and its flattened rendering form.

use serde::Serialize;
use std::cmp::Ordering;

/// Node in the analyze tree.
///
/// Top-level nodes are repository buckets, inner nodes are package folders
/// and leaves are class files carrying the identifier they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeTreeNode {
    /// Display name (bucket, folder or file name).
    pub name: String,
    /// Path-derived key, unique among siblings.
    pub key: String,
    /// Number of leaf files below this node (1 for a leaf).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Source identifier (leaves only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Other spellings of `identifier` in the input, e.g. `a..B` for `a.B`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AnalyzeTreeNode>,
}

impl AnalyzeTreeNode {
    /// Create a folder (or bucket) node.
    pub fn folder(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            count: None,
            identifier: None,
            aliases: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a leaf file node for `identifier`.
    pub fn leaf(name: impl Into<String>, key: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            count: Some(1),
            identifier: Some(identifier.into()),
            aliases: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Check if this node is a leaf file.
    pub fn is_leaf(&self) -> bool {
        self.identifier.is_some()
    }

    /// Find the child folder named `name`, creating it if needed.
    pub(crate) fn folder_child(&mut self, name: &str) -> &mut AnalyzeTreeNode {
        let position = self
            .children
            .iter()
            .position(|c| !c.is_leaf() && c.name == name);

        let index = match position {
            Some(index) => index,
            None => {
                let key = format!("{}/{}", self.key, name);
                self.children.push(AnalyzeTreeNode::folder(name, key));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    /// Append a leaf file below this node.
    pub(crate) fn push_leaf(&mut self, name: &str, identifier: &str, aliases: &[&str]) {
        let key = format!("{}/{}", self.key, name);
        let mut leaf = AnalyzeTreeNode::leaf(name, key, identifier);
        leaf.aliases = aliases.iter().map(|alias| alias.to_string()).collect();
        self.children.push(leaf);
    }

    /// Sort children recursively (folders first, then alphabetically).
    pub(crate) fn sort_recursive(&mut self) {
        self.children.sort_by(|a, b| match (a.is_leaf(), b.is_leaf()) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => a.name.cmp(&b.name),
        });

        for child in &mut self.children {
            child.sort_recursive();
        }
    }

    /// Fill in leaf counts for this subtree and return the total.
    pub(crate) fn calculate_counts(&mut self) -> usize {
        if self.is_leaf() {
            return 1;
        }

        let total: usize = self
            .children
            .iter_mut()
            .map(|child| child.calculate_counts())
            .sum();
        self.count = Some(total);
        total
    }

    /// Identifiers of every leaf in this subtree, in display order.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_identifiers(&mut out);
        out
    }

    /// Identifiers and their aliases of every leaf in this subtree.
    ///
    /// Together these cover every input string the leaves were built from.
    pub fn inputs(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_inputs(&mut out);
        out
    }

    fn collect_identifiers<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(identifier) = &self.identifier {
            out.push(identifier);
        }
        for child in &self.children {
            child.collect_identifiers(out);
        }
    }

    fn collect_inputs<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(identifier) = &self.identifier {
            out.push(identifier);
            out.extend(self.aliases.iter().map(String::as_str));
        }
        for child in &self.children {
            child.collect_inputs(out);
        }
    }
}

/// Every key in the forest in depth-first order, e.g. to expand all nodes.
pub fn collect_keys(nodes: &[AnalyzeTreeNode]) -> Vec<String> {
    fn walk(node: &AnalyzeTreeNode, keys: &mut Vec<String>) {
        keys.push(node.key.clone());
        for child in &node.children {
            walk(child, keys);
        }
    }

    let mut keys = Vec::new();
    for node in nodes {
        walk(node, &mut keys);
    }
    keys
}

/// Flatten a forest into a list for text rendering.
pub fn flatten(nodes: &[AnalyzeTreeNode]) -> Vec<FlatAnalyzeEntry> {
    let mut result = Vec::new();
    flatten_siblings(nodes, 0, &[], &mut result);
    result
}

fn flatten_siblings(
    nodes: &[AnalyzeTreeNode],
    depth: usize,
    ancestor_has_next: &[bool],
    result: &mut Vec<FlatAnalyzeEntry>,
) {
    let last_index = nodes.len().saturating_sub(1);
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i == last_index;
        result.push(FlatAnalyzeEntry {
            depth,
            name: node.name.clone(),
            count: node.count,
            is_leaf: node.is_leaf(),
            is_last,
            ancestor_has_next: ancestor_has_next.to_vec(),
        });

        // Top-level buckets draw no guide line for their children
        let mut child_ancestors = ancestor_has_next.to_vec();
        if depth > 0 {
            child_ancestors.push(!is_last);
        }
        flatten_siblings(&node.children, depth + 1, &child_ancestors, result);
    }
}

/// A flattened analyze tree entry for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatAnalyzeEntry {
    /// Nesting depth (0 = bucket).
    pub depth: usize,
    pub name: String,
    pub count: Option<usize>,
    pub is_leaf: bool,
    /// Whether this is the last item in its parent.
    pub is_last: bool,
    /// For each ancestor level, whether that ancestor has more siblings below.
    pub ancestor_has_next: Vec<bool>,
}

impl FlatAnalyzeEntry {
    /// Get the tree prefix with guide lines.
    /// - Bucket: ""
    /// - Child of a bucket: "├─ " or "└─ "
    /// - Nested below a non-last folder: "│  ├─ "
    pub fn tree_prefix(&self) -> String {
        if self.depth == 0 {
            return String::new();
        }

        let mut prefix = String::new();
        for &has_next in &self.ancestor_has_next {
            if has_next {
                prefix.push_str("│  ");
            } else {
                prefix.push_str("   ");
            }
        }

        if self.is_last {
            prefix.push_str("└─ ");
        } else {
            prefix.push_str("├─ ");
        }
        prefix
    }

    /// Render the entry as one line of text, e.g. `├─ acme (3)`.
    pub fn render(&self) -> String {
        match (self.is_leaf, self.count) {
            (false, Some(count)) => format!("{}{} ({})", self.tree_prefix(), self.name, count),
            _ => format!("{}{}", self.tree_prefix(), self.name),
        }
    }
}
