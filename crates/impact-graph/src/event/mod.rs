//! Events emitted by the graph layout.

mod graph_event;

pub use graph_event::{GraphEvent, NodePosition};
