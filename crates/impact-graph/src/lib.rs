//! # impact-graph
//!
//! Force-directed layout of the method/module impact graph.
//!
//! ## Design Principles
//!
//! The engine is **instrumented**: it receives actions and emits events
//! without rendering anything itself. The hosting view maps pointer input,
//! resizes and its frame clock to [`GraphAction`]s, dispatches them to
//! [`LayoutState::handle_action`] and redraws from the returned
//! [`GraphEvent`]s.
//!
//! ## Usage
//!
//! ```rust
//! use impact_graph::{GraphAction, GraphEvent, ImpactGraph, LayoutParams, LayoutState};
//! use impact_report::normalize_report;
//! use serde_json::json;
//!
//! let items = normalize_report(&json!([
//!     { "changedMember": "Cart.total", "actionableImpacts": [{ "name": "checkout" }] }
//! ]));
//!
//! let mut layout = LayoutState::new(800.0, 600.0, LayoutParams::default());
//! layout.load(ImpactGraph::from_items(&items));
//!
//! let events = layout.handle_action(GraphAction::Tick);
//! assert!(matches!(events[0], GraphEvent::PositionsUpdated { .. }));
//! ```

pub mod action;
pub mod event;
mod forces;
pub mod model;
mod params;
mod simulation;
pub mod state;

pub use action::GraphAction;
pub use event::{GraphEvent, NodePosition};
pub use model::{GraphEdge, GraphNode, ImpactGraph, NodeKind, Point};
pub use params::LayoutParams;
pub use simulation::{Simulation, SimulationStatus, TickOutcome};
pub use state::LayoutState;
