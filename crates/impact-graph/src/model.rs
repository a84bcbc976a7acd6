//! Graph derived from normalized impact report items.

use impact_report::{ImpactLevel, ImpactReportItem};
use serde::Serialize;
use std::collections::HashMap;

/// A point on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What a graph node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// A changed method or member
    Method,
    /// A downstream module affected by one or more changes
    Module,
}

/// Node of the impact graph together with its simulation state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<ImpactLevel>,
    /// Reasoning for methods, impact description for modules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(skip)]
    pub vx: f64,
    #[serde(skip)]
    pub vy: f64,
    /// Position the node is held at while dragged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<Point>,
}

impl GraphNode {
    fn new(id: String, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            risk_score: None,
            level: None,
            detail: None,
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            pinned: None,
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned.is_some()
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Directed edge from a method node to a module node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub source_id: String,
    pub target_id: String,
    #[serde(skip)]
    pub(crate) source: usize,
    #[serde(skip)]
    pub(crate) target: usize,
}

/// Method/module graph of an impact report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImpactGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl ImpactGraph {
    /// Derive the graph from normalized report items.
    ///
    /// One method node per changed identifier and one module node per
    /// distinct module name; every (item, module) occurrence adds an edge.
    /// A module keeps the attributes of its first occurrence. Its risk falls
    /// back to the item's score, then to zero.
    pub fn from_items(items: &[ImpactReportItem]) -> Self {
        let mut graph = ImpactGraph::default();
        let mut index: HashMap<String, usize> = HashMap::new();

        for item in items {
            let method_id = format!("method:{}", item.changed_identifier);
            let source = match index.get(&method_id) {
                Some(&existing) => {
                    log::debug!("Merging repeated change {} into one node", method_id);
                    existing
                }
                None => {
                    let mut node = GraphNode::new(
                        method_id.clone(),
                        item.changed_identifier.as_str(),
                        NodeKind::Method,
                    );
                    node.risk_score = item.risk_score;
                    node.detail = Some(item.reasoning_text.clone());
                    graph.push_node(&mut index, node)
                }
            };

            for module in &item.impacted_modules {
                let module_id = format!("module:{}", module.module_name);
                let target = match index.get(&module_id) {
                    Some(&existing) => existing,
                    None => {
                        let mut node = GraphNode::new(
                            module_id.clone(),
                            module.module_name.as_str(),
                            NodeKind::Module,
                        );
                        node.risk_score =
                            Some(module.risk_score.or(item.risk_score).unwrap_or(0.0));
                        node.level = Some(module.impact_type.level());
                        node.detail = Some(module.description.clone());
                        graph.push_node(&mut index, node)
                    }
                };

                graph.edges.push(GraphEdge {
                    source_id: method_id.clone(),
                    target_id: module_id,
                    source,
                    target,
                });
            }
        }

        log::debug!(
            "Derived impact graph with {} nodes and {} edges",
            graph.nodes.len(),
            graph.edges.len()
        );
        graph
    }

    fn push_node(&mut self, index: &mut HashMap<String, usize>, node: GraphNode) -> usize {
        let position = self.nodes.len();
        index.insert(node.id.clone(), position);
        self.nodes.push(node);
        position
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Badge shown next to a node, e.g. `Risk 7`; none for unrated nodes.
    pub fn risk_badge(node: &GraphNode) -> Option<String> {
        node.risk_score
            .filter(|score| *score > 0.0)
            .map(|score| format!("Risk {score}"))
    }
}
