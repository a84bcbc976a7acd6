//! Data models for repository file trees and the grouped analyze tree.

mod analyze_node;
mod file_node;

pub use analyze_node::{collect_keys, flatten, AnalyzeTreeNode, FlatAnalyzeEntry};
pub use file_node::{contains_path, parse_file_tree, FileKind, FileNode};
