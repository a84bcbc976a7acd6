//! Building the impact detail tree from normalized items

use crate::bullets::first_sentences;
use crate::types::{ImpactNodeKind, ImpactReportItem, ImpactTreeNode, ImpactedModule, Severity};

const ASSESSMENT_FALLBACK: &str = "Final assessment";

/// Build one root node per item, in item order.
pub fn build_impact_forest(items: &[ImpactReportItem]) -> Vec<ImpactTreeNode> {
    let forest: Vec<_> = items.iter().map(build_item_tree).collect();
    log::debug!("Built impact forest with {} roots", forest.len());
    forest
}

/// Build the four-level tree of a single item.
///
/// ```text
/// impact-root-{index}
/// ├── impact-root-{index}-change
/// ├── impact-root-{index}-impacts
/// │   └── impact-root-{index}-impacts-m-{ordinal}
/// └── impact-root-{index}-summary
/// ```
pub fn build_item_tree(item: &ImpactReportItem) -> ImpactTreeNode {
    let root_key = format!("impact-root-{}", item.index);
    let severity = Severity::from_score(item.risk_score);

    let mut root = ImpactTreeNode::new(
        root_key.as_str(),
        ImpactNodeKind::Root,
        format!(
            "{}: {} — Risk Score: {}/10",
            severity.label(),
            item.changed_identifier,
            format_score(item.risk_score)
        ),
    );
    root.subtitle = item.summary.clone();
    root.risk_score = item.risk_score;

    let mut change = ImpactTreeNode::new(
        format!("{root_key}-change"),
        ImpactNodeKind::Change,
        format!("1. Analyze Contractual Change — {}", item.changed_identifier),
    );
    change.detail = non_empty(&item.reasoning_text);

    let impacts_key = format!("{root_key}-impacts");
    let mut impacts = ImpactTreeNode::new(
        impacts_key.as_str(),
        ImpactNodeKind::Dependencies,
        format!(
            "2. Trace Direct Dependencies — {} dependents",
            item.impacted_modules.len()
        ),
    );
    impacts.children = item
        .impacted_modules
        .iter()
        .map(|module| module_node(&impacts_key, module))
        .collect();

    let mut summary = ImpactTreeNode::new(
        format!("{root_key}-summary"),
        ImpactNodeKind::Assessment,
        "3. Final Risk Assessment",
    );
    summary.detail = Some(assessment(item));

    root.children = vec![change, impacts, summary];
    root
}

/// Every key of the forest in depth-first order, e.g. to expand all nodes.
pub fn collect_keys(forest: &[ImpactTreeNode]) -> Vec<String> {
    fn walk(node: &ImpactTreeNode, keys: &mut Vec<String>) {
        keys.push(node.key.clone());
        for child in &node.children {
            walk(child, keys);
        }
    }

    let mut keys = Vec::new();
    for node in forest {
        walk(node, &mut keys);
    }
    keys
}

fn module_node(parent_key: &str, module: &ImpactedModule) -> ImpactTreeNode {
    let mut node = ImpactTreeNode::new(
        format!("{parent_key}-m-{}", module.ordinal),
        ImpactNodeKind::Module,
        format!("[{}] {}", module.impact_type.label(), module.module_name),
    );
    node.subtitle = module.action.clone();
    node.detail = non_empty(&module.description);
    node.risk_score = module.risk_score;
    node.impact_type = Some(module.impact_type);
    node
}

fn assessment(item: &ImpactReportItem) -> String {
    item.conclusion
        .clone()
        .or_else(|| item.summary.clone())
        .or_else(|| non_empty(&first_sentences(&item.reasoning_text, 2)))
        .unwrap_or_else(|| ASSESSMENT_FALLBACK.to_string())
}

fn format_score(score: Option<f64>) -> String {
    match score {
        Some(score) => score.to_string(),
        None => "N/A".to_string(),
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImpactType;
    use pretty_assertions::assert_eq;

    fn item(index: usize, score: Option<f64>) -> ImpactReportItem {
        ImpactReportItem {
            index,
            changed_identifier: "OrderService.place".to_string(),
            risk_score: score,
            reasoning_text: "Return type widened. Callers cast. Tests pass.".to_string(),
            summary: None,
            conclusion: None,
            impacted_modules: vec![
                ImpactedModule {
                    ordinal: 0,
                    module_name: "billing".to_string(),
                    impact_type: ImpactType::SyntacticBreak,
                    description: "compile error".to_string(),
                    action: Some("update call site".to_string()),
                    risk_score: Some(9.0),
                },
                ImpactedModule {
                    ordinal: 1,
                    module_name: "reports".to_string(),
                    impact_type: ImpactType::Unknown,
                    description: String::new(),
                    action: None,
                    risk_score: None,
                },
            ],
        }
    }

    #[test]
    fn test_tree_shape_and_keys() {
        let tree = build_item_tree(&item(2, Some(8.0)));
        assert_eq!(
            collect_keys(std::slice::from_ref(&tree)),
            vec![
                "impact-root-2",
                "impact-root-2-change",
                "impact-root-2-impacts",
                "impact-root-2-impacts-m-0",
                "impact-root-2-impacts-m-1",
                "impact-root-2-summary",
            ]
        );
    }

    #[test]
    fn test_titles() {
        let tree = build_item_tree(&item(0, Some(8.0)));
        assert_eq!(
            tree.title,
            "🔥 HIGH RISK: OrderService.place — Risk Score: 8/10"
        );
        assert_eq!(tree.severity(), Severity::Severe);
        assert_eq!(
            tree.children[0].title,
            "1. Analyze Contractual Change — OrderService.place"
        );
        assert_eq!(
            tree.children[1].title,
            "2. Trace Direct Dependencies — 2 dependents"
        );
        assert_eq!(tree.children[1].children[0].title, "[SYNTACTIC_BREAK] billing");
        assert_eq!(tree.children[1].children[1].title, "[UNKNOWN] reports");
        assert_eq!(tree.children[2].title, "3. Final Risk Assessment");

        let unrated = build_item_tree(&item(0, None));
        assert_eq!(
            unrated.title,
            "UNRATED: OrderService.place — Risk Score: N/A/10"
        );

        let fractional = build_item_tree(&item(0, Some(6.5)));
        assert_eq!(
            fractional.title,
            "MEDIUM RISK: OrderService.place — Risk Score: 6.5/10"
        );
    }

    #[test]
    fn test_module_leaf_fields() {
        let tree = build_item_tree(&item(0, Some(3.0)));
        let leaf = tree.find("impact-root-0-impacts-m-0").unwrap();
        assert_eq!(leaf.kind, ImpactNodeKind::Module);
        assert_eq!(leaf.detail.as_deref(), Some("compile error"));
        assert_eq!(leaf.subtitle.as_deref(), Some("update call site"));
        assert_eq!(leaf.impact_type, Some(ImpactType::SyntacticBreak));
        assert_eq!(leaf.risk_score, Some(9.0));
        assert!(leaf.is_leaf());

        let empty = tree.find("impact-root-0-impacts-m-1").unwrap();
        assert_eq!(empty.detail, None);
    }

    #[test]
    fn test_assessment_fallbacks() {
        let mut source = item(0, None);
        let detail = |source: &ImpactReportItem| build_item_tree(source).children[2].detail.clone();

        assert_eq!(
            detail(&source).as_deref(),
            Some("Return type widened. Callers cast.")
        );

        source.summary = Some("Short summary".to_string());
        assert_eq!(detail(&source).as_deref(), Some("Short summary"));

        source.conclusion = Some("Ship it".to_string());
        assert_eq!(detail(&source).as_deref(), Some("Ship it"));

        source.summary = None;
        source.conclusion = None;
        source.reasoning_text = String::new();
        assert_eq!(detail(&source).as_deref(), Some("Final assessment"));
    }

    #[test]
    fn test_module_ordinals_survive_skipped_entries() {
        let mut source = item(0, None);
        source.impacted_modules.remove(0);
        let tree = build_item_tree(&source);
        assert_eq!(tree.children[1].children[0].key, "impact-root-0-impacts-m-1");
        assert_eq!(
            tree.children[1].title,
            "2. Trace Direct Dependencies — 1 dependents"
        );
    }

    #[test]
    fn test_empty_forest() {
        assert!(build_impact_forest(&[]).is_empty());
        assert!(collect_keys(&[]).is_empty());
    }
}
