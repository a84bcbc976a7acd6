//! Reading analyzer responses.

use crate::model::AnalyzeTreeNode;
use serde_json::{Map, Value};

/// Impacted class identifiers of an analyzer response.
///
/// Reads `impactedModules`, falling back to `affectedClasses`; a bare array is
/// accepted as the list itself. Each list is an array or an object with an
/// `items` array, entries are strings or objects with `moduleName`/`name`.
/// Blank entries are dropped.
pub fn extract_identifiers(response: &Value) -> Vec<String> {
    let list = match response {
        Value::Array(_) => Some(response),
        Value::Object(map) => map
            .get("impactedModules")
            .filter(|v| !v.is_null())
            .or_else(|| map.get("affectedClasses")),
        _ => None,
    };

    let entries = match list {
        Some(Value::Array(entries)) => entries.as_slice(),
        Some(Value::Object(map)) => map
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s.trim()),
            Value::Object(map) => ["moduleName", "name"]
                .iter()
                .filter_map(|field| map.get(*field).and_then(Value::as_str))
                .map(str::trim)
                .find(|s| !s.is_empty()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn affected_list(response: &Value) -> Option<&Value> {
    response
        .get("affectedClasses")
        .filter(|v| !v.is_null())
        .or_else(|| response.get("affected"))
}

/// Convert a nested `affectedClasses` listing into a key/count tree.
///
/// Strings become leaves; objects contribute one node per key whose children
/// come from the key's value. Keys join path segments with `/`. Folder counts
/// are the sum of their children's counts.
///
/// Sibling keys are unique: repeated folders are merged, repeated leaves are
/// dropped and a leaf and folder sharing a name get a `#<n>` suffixed key.
pub fn affected_classes_tree(response: &Value) -> Vec<AnalyzeTreeNode> {
    match affected_list(response) {
        Some(entries) if entries.is_array() => convert(entries, None),
        _ => Vec::new(),
    }
}

fn convert(value: &Value, parent: Option<&str>) -> Vec<AnalyzeTreeNode> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(entries) => {
            unique_siblings(entries.iter().flat_map(|v| convert(v, parent)).collect())
        }
        Value::Object(map) => convert_object(map, parent),
        other => {
            let name = scalar_text(other);
            vec![AnalyzeTreeNode::leaf(name.as_str(), child_key(parent, &name), name.as_str())]
        }
    }
}

fn convert_object(map: &Map<String, Value>, parent: Option<&str>) -> Vec<AnalyzeTreeNode> {
    map.iter()
        .map(|(name, value)| {
            let mut node = AnalyzeTreeNode::folder(name.as_str(), child_key(parent, name));
            node.children = convert(value, Some(node.key.as_str()));
            node.count = Some(node.children.iter().filter_map(|c| c.count).sum());
            node
        })
        .collect()
}

fn unique_siblings(nodes: Vec<AnalyzeTreeNode>) -> Vec<AnalyzeTreeNode> {
    let mut out: Vec<AnalyzeTreeNode> = Vec::with_capacity(nodes.len());
    for mut node in nodes {
        let Some(index) = out.iter().position(|kept| kept.key == node.key) else {
            out.push(node);
            continue;
        };

        let kept = &mut out[index];
        match (kept.is_leaf(), node.is_leaf()) {
            (true, true) => log::debug!("Dropping repeated affected class {}", node.key),
            (false, false) => {
                let mut children = std::mem::take(&mut kept.children);
                children.append(&mut node.children);
                kept.children = unique_siblings(children);
                kept.count = Some(kept.children.iter().filter_map(|c| c.count).sum());
            }
            _ => {
                let key = free_key(&out, &node.key);
                rekey(&mut node, key);
                out.push(node);
            }
        }
    }
    out
}

fn free_key(siblings: &[AnalyzeTreeNode], base: &str) -> String {
    (2..)
        .map(|n| format!("{base}#{n}"))
        .find(|key| siblings.iter().all(|s| &s.key != key))
        .unwrap_or_else(|| base.to_string())
}

fn rekey(node: &mut AnalyzeTreeNode, key: String) {
    let old = std::mem::replace(&mut node.key, key);
    for child in &mut node.children {
        let tail = child
            .key
            .strip_prefix(old.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("/{}", child.name));
        let child_key = format!("{}{}", node.key, tail);
        rekey(child, child_key);
    }
}

fn child_key(parent: Option<&str>, name: &str) -> String {
    match parent {
        Some(parent) => format!("{parent}/{name}"),
        None => name.to_string(),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Human-readable summary of an analyzer response.
///
/// ```text
/// Analyze result for Order.java:
/// Path: /src/com/acme/Order.java
/// Affected classes:
/// - shop/com.acme.Cart
/// ```
pub fn summarize_affected(response: &Value) -> String {
    if response.is_null() {
        return String::new();
    }

    let mut parts = Vec::new();
    let target = ["targetFilename", "file"]
        .iter()
        .find_map(|field| response.get(*field).and_then(Value::as_str))
        .filter(|s| !s.is_empty());
    match target {
        Some(target) => parts.push(format!("Analyze result for {target}:")),
        None => parts.push("Analyze result:".to_string()),
    }
    if let Some(path) = response.get("localFilePath").and_then(Value::as_str) {
        if !path.is_empty() {
            parts.push(format!("Path: {path}"));
        }
    }

    let mut lines = Vec::new();
    if let Some(list) = affected_list(response) {
        flatten_affected(list, "", &mut lines);
    }

    if lines.is_empty() {
        parts.push("(no affected classes listed)".to_string());
    } else {
        parts.push("Affected classes:".to_string());
        parts.extend(lines.into_iter().map(|line| format!("- {line}")));
    }
    parts.join("\n")
}

fn flatten_affected(value: &Value, prefix: &str, lines: &mut Vec<String>) {
    match value {
        Value::Array(entries) => {
            for entry in entries {
                flatten_affected(entry, prefix, lines);
            }
        }
        Value::String(s) => lines.push(format!("{prefix}{s}")),
        Value::Object(map) => {
            for (key, child) in map {
                flatten_affected(child, &format!("{prefix}{key}/"), lines);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::collect_keys;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_extract_identifiers() {
        let response = json!({
            "impactedModules": ["com.acme.Order", { "moduleName": "com.acme.Cart" }, { "name": " x.Y " }, "", 3]
        });
        assert_eq!(
            extract_identifiers(&response),
            vec!["com.acme.Order", "com.acme.Cart", "x.Y"]
        );
    }

    #[test]
    fn test_extract_identifiers_fallbacks() {
        let legacy = json!({ "affectedClasses": { "items": ["a.B"] } });
        assert_eq!(extract_identifiers(&legacy), vec!["a.B"]);

        let bare = json!(["c.D"]);
        assert_eq!(extract_identifiers(&bare), vec!["c.D"]);

        let null_modules = json!({ "impactedModules": null, "affectedClasses": ["e.F"] });
        assert_eq!(extract_identifiers(&null_modules), vec!["e.F"]);

        assert!(extract_identifiers(&json!({ "status": "ok" })).is_empty());
        assert!(extract_identifiers(&Value::Null).is_empty());
    }

    #[test]
    fn test_affected_classes_tree() {
        let response = json!({
            "affectedClasses": [
                "Standalone",
                { "shop": ["com.acme.Cart", { "billing": ["Invoice", "Receipt"] }] },
                { "a": [], "b": "Solo" }
            ]
        });
        let tree = affected_classes_tree(&response);

        assert_eq!(
            collect_keys(&tree),
            vec![
                "Standalone",
                "shop",
                "shop/com.acme.Cart",
                "shop/billing",
                "shop/billing/Invoice",
                "shop/billing/Receipt",
                "a",
                "b",
                "b/Solo",
            ]
        );
        let counts: Vec<_> = tree.iter().map(|n| n.count).collect();
        assert_eq!(counts, vec![Some(1), Some(3), Some(0), Some(1)]);
    }

    #[test]
    fn test_repeated_entries_keep_sibling_keys_unique() {
        let response = json!({
            "affectedClasses": [
                "X",
                "X",
                { "shop": ["Cart"] },
                { "shop": ["Cart", "Order", { "billing": ["Invoice"] }] },
                { "shop": [{ "billing": ["Receipt"] }] }
            ]
        });
        let tree = affected_classes_tree(&response);

        assert_eq!(
            collect_keys(&tree),
            vec![
                "X",
                "shop",
                "shop/Cart",
                "shop/Order",
                "shop/billing",
                "shop/billing/Invoice",
                "shop/billing/Receipt",
            ]
        );
        let counts: Vec<_> = tree.iter().map(|n| n.count).collect();
        assert_eq!(counts, vec![Some(1), Some(4)]);
    }

    #[test]
    fn test_leaf_and_folder_with_same_name() {
        let response = json!({
            "affectedClasses": ["a", { "a": ["X", { "b": ["Y"] }] }, "a"]
        });
        let tree = affected_classes_tree(&response);

        assert_eq!(
            collect_keys(&tree),
            vec!["a", "a#2", "a#2/X", "a#2/b", "a#2/b/Y"]
        );
        assert_eq!(tree[1].name, "a");
        assert_eq!(tree[1].count, Some(2));
    }

    #[test]
    fn test_summarize_affected() {
        let response = json!({
            "targetFilename": "Order.java",
            "localFilePath": "/src/com/acme/Order.java",
            "affectedClasses": [{ "shop": ["com.acme.Cart", { "billing": ["Invoice"] }] }, "Loose"]
        });
        assert_eq!(
            summarize_affected(&response),
            "Analyze result for Order.java:\n\
             Path: /src/com/acme/Order.java\n\
             Affected classes:\n\
             - shop/com.acme.Cart\n\
             - shop/billing/Invoice\n\
             - Loose"
        );
    }

    #[test]
    fn test_summarize_without_classes() {
        assert_eq!(
            summarize_affected(&json!({})),
            "Analyze result:\n(no affected classes listed)"
        );
        assert_eq!(summarize_affected(&Value::Null), "");
    }
}
