//! Main state for the graph layout.

use crate::action::GraphAction;
use crate::event::{GraphEvent, NodePosition};
use crate::model::{ImpactGraph, NodeKind};
use crate::params::LayoutParams;
use crate::simulation::{Simulation, TickOutcome};

/// Layout state driven by [`GraphAction`]s.
///
/// Owns the running simulation plus the inspection state (selected and
/// hovered node). All mutation goes through `&mut self`, so a tick never
/// observes a half-applied drag.
#[derive(Debug, Clone)]
pub struct LayoutState {
    simulation: Simulation,
    params: LayoutParams,
    /// Currently selected module node.
    selected: Option<String>,
    /// Method node whose reasoning is shown.
    hovered: Option<String>,
}

impl LayoutState {
    /// Create a layout with an empty graph on a `width` x `height` canvas.
    pub fn new(width: f64, height: f64, params: LayoutParams) -> Self {
        Self {
            simulation: Simulation::new(ImpactGraph::default(), width, height, params.clone()),
            params,
            selected: None,
            hovered: None,
        }
    }

    /// Start laying out `graph`, keeping the current canvas size.
    ///
    /// Returns the previous simulation, already stopped.
    pub fn load(&mut self, graph: ImpactGraph) -> Simulation {
        let (width, height) = self.simulation.size();
        log::debug!(
            "Loading graph with {} nodes on {}x{} canvas",
            graph.nodes.len(),
            width,
            height
        );

        let next = Simulation::new(graph, width, height, self.params.clone());
        let mut previous = std::mem::replace(&mut self.simulation, next);
        previous.stop();
        self.selected = None;
        self.hovered = None;
        previous
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn graph(&self) -> &ImpactGraph {
        self.simulation.graph()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Current position of every node.
    pub fn positions(&self) -> Vec<NodePosition> {
        self.graph()
            .nodes
            .iter()
            .map(|n| NodePosition {
                id: n.id.clone(),
                x: n.x,
                y: n.y,
            })
            .collect()
    }

    /// Handle an action and return the resulting events.
    pub fn handle_action(&mut self, action: GraphAction) -> Vec<GraphEvent> {
        let mut events = Vec::new();

        match action {
            // === Simulation ===
            GraphAction::Tick => match self.simulation.tick() {
                TickOutcome::Idle => {}
                TickOutcome::Moved => events.push(self.positions_updated()),
                TickOutcome::Rested => {
                    events.push(self.positions_updated());
                    events.push(GraphEvent::Rested);
                }
            },
            GraphAction::Recenter => self.simulation.recenter(),
            GraphAction::Resize { width, height } => self.simulation.resize(width, height),

            // === Dragging ===
            GraphAction::DragStart { node_id } => {
                if !self.simulation.drag_start(&node_id) {
                    log::debug!("Ignoring drag start on {}", node_id);
                }
            }
            GraphAction::DragMove { node_id, x, y } => {
                self.simulation.drag_move(&node_id, x, y);
            }
            GraphAction::DragEnd { node_id } => {
                self.simulation.drag_end(&node_id);
            }

            // === Inspection ===
            GraphAction::Select { node_id } => {
                if let Some(event) = self.select(&node_id) {
                    events.push(event);
                }
            }
            GraphAction::Hover { node_id } => {
                if let Some(event) = self.hover(&node_id) {
                    events.push(event);
                }
            }
            GraphAction::Unhover => {
                if self.hovered.take().is_some() {
                    events.push(GraphEvent::ReasoningCleared);
                }
            }
        }

        events
    }

    fn positions_updated(&self) -> GraphEvent {
        GraphEvent::PositionsUpdated {
            positions: self.positions(),
        }
    }

    fn select(&mut self, node_id: &str) -> Option<GraphEvent> {
        let node = self.simulation.graph().node(node_id)?;
        if node.kind != NodeKind::Module {
            return None;
        }

        let event = GraphEvent::ModuleSelected {
            node_id: node.id.clone(),
            title: node.label.clone(),
            description: node.detail.clone().unwrap_or_default(),
        };
        self.selected = Some(node_id.to_string());
        Some(event)
    }

    fn hover(&mut self, node_id: &str) -> Option<GraphEvent> {
        let node = self.simulation.graph().node(node_id)?;
        if node.kind != NodeKind::Method {
            // Leaving a method for a module hides its reasoning
            return self.hovered.take().map(|_| GraphEvent::ReasoningCleared);
        }

        let event = GraphEvent::ReasoningHovered {
            node_id: node.id.clone(),
            reasoning: node.detail.clone().unwrap_or_default(),
        };
        self.hovered = Some(node_id.to_string());
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimulationStatus;
    use impact_report::normalize_report;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn graph() -> ImpactGraph {
        let items = normalize_report(&json!([
            {
                "changedMember": "Ledger.post",
                "summaryReasoning": "Posting is now async.",
                "actionableImpacts": [
                    { "name": "payroll", "type": "SEMANTIC_RISK", "issue": "reads stale balance" }
                ]
            }
        ]));
        ImpactGraph::from_items(&items)
    }

    fn loaded() -> LayoutState {
        let mut state = LayoutState::new(640.0, 480.0, LayoutParams::default());
        state.load(graph());
        state
    }

    #[test]
    fn test_select_module_emits_details() {
        let mut state = loaded();
        let events = state.handle_action(GraphAction::Select {
            node_id: "module:payroll".to_string(),
        });
        assert_eq!(
            events,
            vec![GraphEvent::ModuleSelected {
                node_id: "module:payroll".to_string(),
                title: "payroll".to_string(),
                description: "reads stale balance".to_string(),
            }]
        );
        assert_eq!(state.selected(), Some("module:payroll"));

        let events = state.handle_action(GraphAction::Select {
            node_id: "method:Ledger.post".to_string(),
        });
        assert!(events.is_empty());
    }

    #[test]
    fn test_hover_shows_and_clears_reasoning() {
        let mut state = loaded();
        let events = state.handle_action(GraphAction::Hover {
            node_id: "method:Ledger.post".to_string(),
        });
        assert_eq!(
            events,
            vec![GraphEvent::ReasoningHovered {
                node_id: "method:Ledger.post".to_string(),
                reasoning: "Posting is now async.".to_string(),
            }]
        );

        assert_eq!(
            state.handle_action(GraphAction::Unhover),
            vec![GraphEvent::ReasoningCleared]
        );
        assert!(state.handle_action(GraphAction::Unhover).is_empty());
    }

    #[test]
    fn test_tick_emits_positions_and_rests_once() {
        let mut state = loaded();
        let mut rested = 0;
        let mut updates = 0;
        for _ in 0..400 {
            for event in state.handle_action(GraphAction::Tick) {
                match event {
                    GraphEvent::PositionsUpdated { positions } => {
                        assert_eq!(positions.len(), 2);
                        updates += 1;
                    }
                    GraphEvent::Rested => rested += 1,
                    other => panic!("unexpected event {other:?}"),
                }
            }
        }
        assert_eq!(rested, 1);
        assert!(updates >= 299);
    }

    #[test]
    fn test_load_stops_previous_simulation() {
        let mut state = loaded();
        let mut previous = state.load(graph());
        assert_eq!(previous.status(), SimulationStatus::Stopped);
        assert_eq!(previous.tick(), TickOutcome::Idle);
        assert_eq!(state.simulation().status(), SimulationStatus::Active);
        assert_eq!(state.simulation().size(), (640.0, 480.0));
    }

    #[test]
    fn test_empty_layout_ignores_actions() {
        let mut state = LayoutState::new(640.0, 480.0, LayoutParams::default());
        assert!(state.handle_action(GraphAction::Tick).is_empty());
        assert!(state
            .handle_action(GraphAction::DragStart {
                node_id: "module:x".to_string()
            })
            .is_empty());
        assert!(state.positions().is_empty());
    }
}
