//! Read-only snapshot of the known repositories and their file trees.

use crate::model::{contains_path, parse_file_tree, FileNode};
use serde_json::Value;
use std::cmp::Ordering;

/// One repository's known file tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositorySnapshot {
    pub id: String,
    /// Display name, if the listing provided one.
    pub name: Option<String>,
    pub files: Vec<FileNode>,
}

impl RepositorySnapshot {
    pub fn new(id: impl Into<String>, name: Option<String>, files: Vec<FileNode>) -> Self {
        Self {
            id: id.into(),
            name,
            files,
        }
    }

    /// Name shown on the bucket root: the listing name, else `Repo {id}`.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Repo {}", self.id),
        }
    }

    /// Whether this repository holds `file_name` under the folder `chain`.
    pub fn contains(&self, chain: &[&str], file_name: &str) -> bool {
        contains_path(&self.files, chain, file_name)
    }
}

/// Ordered set of repository snapshots searched by the analyze tree builder.
///
/// Snapshots are kept sorted by id so the search order never depends on how
/// the listing was assembled: integer ids first in numeric order, then every
/// other id lexicographically. Duplicate ids keep the first snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepositoryCache {
    snapshots: Vec<RepositorySnapshot>,
}

impl RepositoryCache {
    pub fn new(mut snapshots: Vec<RepositorySnapshot>) -> Self {
        snapshots.sort_by(|a, b| compare_ids(&a.id, &b.id));
        snapshots.dedup_by(|later, earlier| later.id == earlier.id);
        Self { snapshots }
    }

    /// Parse a cached repository listing.
    ///
    /// Accepts `{ "details": { "<id>": { "name": ..., "files": [...] } } }` or
    /// the bare `details` map. Repositories whose file list does not parse are
    /// kept with no files.
    pub fn from_details(listing: &Value) -> Self {
        let details = listing
            .get("details")
            .and_then(Value::as_object)
            .or_else(|| listing.as_object().filter(|map| !map.contains_key("details")));

        let Some(details) = details else {
            log::debug!("Repository listing has no details map");
            return Self::default();
        };

        let snapshots = details
            .iter()
            .map(|(id, detail)| {
                let name = detail
                    .get("name")
                    .and_then(Value::as_str)
                    .filter(|name| !name.trim().is_empty())
                    .map(str::to_string);

                let (files, dropped) = detail
                    .get("files")
                    .map(parse_file_tree)
                    .unwrap_or_default();
                if dropped > 0 {
                    log::warn!(
                        "Ignoring {} unreadable file tree entries of repository {}",
                        dropped,
                        id
                    );
                }

                RepositorySnapshot::new(id.as_str(), name, files)
            })
            .collect();

        Self::new(snapshots)
    }

    pub fn get(&self, id: &str) -> Option<&RepositorySnapshot> {
        self.snapshots.iter().find(|s| s.id == id)
    }

    /// First repository, in cache order, holding the file.
    pub fn find_owner(&self, chain: &[&str], file_name: &str) -> Option<&RepositorySnapshot> {
        self.snapshots.iter().find(|s| s.contains(chain, file_name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RepositorySnapshot> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ids(cache: &RepositoryCache) -> Vec<&str> {
        cache.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_ids_are_sorted_numerically_first() {
        let cache = RepositoryCache::new(vec![
            RepositorySnapshot::new("10", None, vec![]),
            RepositorySnapshot::new("beta", None, vec![]),
            RepositorySnapshot::new("9", None, vec![]),
            RepositorySnapshot::new("alpha", None, vec![]),
            RepositorySnapshot::new("9", Some("dup".into()), vec![]),
        ]);
        assert_eq!(ids(&cache), vec!["9", "10", "alpha", "beta"]);
        assert_eq!(cache.get("9").and_then(|s| s.name.clone()), None);
    }

    #[test]
    fn test_from_details() {
        let listing = json!({
            "data": [{ "id": 2, "name": "Billing" }],
            "details": {
                "2": {
                    "name": "Billing",
                    "files": [{ "name": "Invoice.java", "type": "file" }]
                },
                "1": { "files": "broken" }
            }
        });

        let cache = RepositoryCache::from_details(&listing);
        assert_eq!(ids(&cache), vec!["1", "2"]);
        assert_eq!(cache.get("1").map(|s| s.display_name()), Some("Repo 1".to_string()));
        assert!(cache.get("1").map(|s| s.files.is_empty()).unwrap_or(false));
        assert_eq!(cache.get("2").map(|s| s.display_name()), Some("Billing".to_string()));
        assert!(cache.find_owner(&[], "Invoice.java").is_some());
    }

    #[test]
    fn test_from_details_keeps_tree_around_bad_node() {
        let listing = json!({
            "details": {
                "1": {
                    "name": "Shop",
                    "files": [
                        { "name": "shop", "type": "folder", "children": [
                            { "name": "Cart.java", "type": "file" }
                        ]},
                        { "name": "README", "type": "symlink" },
                        { "type": "file" }
                    ]
                }
            }
        });

        let cache = RepositoryCache::from_details(&listing);
        assert_eq!(cache.get("1").map(|s| s.files.len()), Some(2));
        assert_eq!(
            cache.find_owner(&["shop"], "Cart.java").map(|s| s.id.as_str()),
            Some("1")
        );
    }

    #[test]
    fn test_from_bare_details_map() {
        let listing = json!({ "7": { "files": [] } });
        assert_eq!(ids(&RepositoryCache::from_details(&listing)), vec!["7"]);
    }

    #[test]
    fn test_unrecognized_listing() {
        assert!(RepositoryCache::from_details(&Value::Null).is_empty());
        assert!(RepositoryCache::from_details(&json!({ "details": [] })).is_empty());
        assert!(RepositoryCache::from_details(&json!([1, 2])).is_empty());
    }
}
