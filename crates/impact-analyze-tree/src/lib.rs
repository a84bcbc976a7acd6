//! # impact-analyze-tree
//!
//! Groups the flat list of class identifiers returned by the impact analyzer
//! into a per-repository package tree.
//!
//! Each identifier such as `com.acme.billing.Invoice` is resolved against the
//! known file trees of a [`RepositoryCache`]: the first repository containing
//! `com/acme/billing/Invoice.java` (starting at any folder depth) claims it.
//! Unresolved identifiers are collected in a trailing `unknown` bucket.
//!
//! ## Usage
//!
//! ```rust
//! use impact_analyze_tree::{
//!     build_analyze_tree, AnalyzeOptions, FileNode, RepositoryCache, RepositorySnapshot,
//! };
//!
//! let cache = RepositoryCache::new(vec![RepositorySnapshot::new(
//!     "1",
//!     Some("Shop".to_string()),
//!     vec![FileNode::folder("acme", vec![FileNode::file("Order.java")])],
//! )]);
//!
//! let tree = build_analyze_tree(
//!     &["acme.Order".to_string(), "other.Thing".to_string()],
//!     &cache,
//!     &AnalyzeOptions::default(),
//! );
//!
//! assert_eq!(tree[0].name, "Shop");
//! assert_eq!(tree[0].children[0].children[0].key, "repo-1/acme/Order.java");
//! assert_eq!(tree[1].key, "unknown");
//! ```

mod builder;
pub mod model;
mod payload;
mod repository;

pub use builder::{build_analyze_tree, AnalyzeOptions, DEFAULT_EXTENSION, DEFAULT_UNKNOWN_NAME};
pub use model::{collect_keys, flatten, AnalyzeTreeNode, FileKind, FileNode, FlatAnalyzeEntry};
pub use payload::{affected_classes_tree, extract_identifiers, summarize_affected};
pub use repository::{RepositoryCache, RepositorySnapshot};
