//! State management for the graph layout.

mod layout_state;

pub use layout_state::LayoutState;
