//! Events emitted by the graph layout for the hosting view to handle.

use serde::Serialize;

/// Events emitted by the layout state.
///
/// The layout engine never renders anything itself. It reports what changed
/// and the hosting view redraws or updates its side panels accordingly.
///
/// # Example
///
/// ```ignore
/// for event in layout.handle_action(GraphAction::Tick) {
///     match event {
///         GraphEvent::PositionsUpdated { positions } => redraw(&positions),
///         GraphEvent::ModuleSelected { title, description, .. } => show_details(title, description),
///         GraphEvent::ReasoningHovered { reasoning, .. } => show_tooltip(reasoning),
///         GraphEvent::ReasoningCleared => hide_tooltip(),
///         GraphEvent::Rested => stop_frame_clock(),
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum GraphEvent {
    /// A module node was clicked.
    #[serde(rename_all = "camelCase")]
    ModuleSelected {
        node_id: String,
        /// Module name.
        title: String,
        /// Module impact description (may be empty).
        description: String,
    },

    /// The pointer entered a changed-method node.
    #[serde(rename_all = "camelCase")]
    ReasoningHovered { node_id: String, reasoning: String },

    /// The pointer left the changed-method node.
    ReasoningCleared,

    /// Node positions changed during a tick.
    PositionsUpdated { positions: Vec<NodePosition> },

    /// The simulation's energy decayed below the threshold; no further ticks
    /// move nodes until something reheats it.
    Rested,
}

/// Position of one node after a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePosition {
    pub id: String,
    pub x: f64,
    pub y: f64,
}
