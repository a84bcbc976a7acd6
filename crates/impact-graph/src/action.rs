//! Graph Layout Actions
//!
//! Tagged actions that the layout state can process. The hosting view maps
//! pointer events, resizes and its frame clock onto these actions and
//! dispatches them to [`crate::LayoutState::handle_action`].

use serde::{Deserialize, Serialize};

/// Actions that can be performed on the graph layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GraphAction {
    // === Simulation ===
    /// Advance the simulation by one frame
    Tick,
    /// Pull the graph back toward the canvas center
    Recenter,
    /// Live canvas dimensions changed
    Resize { width: f64, height: f64 },

    // === Dragging ===
    /// Pointer grabbed a node (pins it where it is)
    DragStart { node_id: String },
    /// Pointer moved while dragging (pins the node at the new position)
    DragMove { node_id: String, x: f64, y: f64 },
    /// Pointer released the node (unpins it)
    DragEnd { node_id: String },

    // === Inspection ===
    /// Node was clicked
    Select { node_id: String },
    /// Pointer entered a node
    Hover { node_id: String },
    /// Pointer left the hovered node
    Unhover,
}

impl GraphAction {
    /// Check if this action is part of a drag gesture
    pub fn is_drag(&self) -> bool {
        matches!(
            self,
            GraphAction::DragStart { .. } | GraphAction::DragMove { .. } | GraphAction::DragEnd { .. }
        )
    }

    /// Check if this action only inspects the graph without moving nodes
    pub fn is_inspection(&self) -> bool {
        matches!(
            self,
            GraphAction::Select { .. } | GraphAction::Hover { .. } | GraphAction::Unhover
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_drag() {
        assert!(GraphAction::DragStart { node_id: "a".into() }.is_drag());
        assert!(GraphAction::DragMove { node_id: "a".into(), x: 1.0, y: 2.0 }.is_drag());
        assert!(GraphAction::DragEnd { node_id: "a".into() }.is_drag());
        assert!(!GraphAction::Tick.is_drag());
    }

    #[test]
    fn test_is_inspection() {
        assert!(GraphAction::Select { node_id: "a".into() }.is_inspection());
        assert!(GraphAction::Unhover.is_inspection());
        assert!(!GraphAction::Recenter.is_inspection());
    }

    #[test]
    fn test_deserialize_scripted_actions() {
        let actions: Vec<GraphAction> = serde_json::from_str(
            r#"[
                { "action": "dragMove", "nodeId": "module:a", "x": 1.5, "y": 2.5 },
                { "action": "resize", "width": 800.0, "height": 600.0 },
                { "action": "unhover" }
            ]"#,
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![
                GraphAction::DragMove { node_id: "module:a".into(), x: 1.5, y: 2.5 },
                GraphAction::Resize { width: 800.0, height: 600.0 },
                GraphAction::Unhover,
            ]
        );
    }
}
