//! # impact-diff
//!
//! Line-level diff between two text buffers, used by the compare view to
//! show what changed and to decide whether an impact analysis may run.
//!
//! The engine is a pure function: every call rebuilds its output from the two
//! inputs and keeps no state between calls, so it can run on every keystroke.
//!
//! ## Usage
//!
//! ```rust
//! use impact_diff::{can_analyze, diff_lines, LineKind};
//!
//! let lines = diff_lines(Some("a\nb\nc"), Some("a\nb\nX\nc"));
//! assert_eq!(lines[2].kind, LineKind::Added);
//! assert!(can_analyze("a\nb\nX\nc", &lines));
//! ```

mod engine;
mod model;

pub use engine::{can_analyze, diff_lines, has_changes, modified_text, original_text, split_lines};
pub use model::{DiffLine, DiffStats, LineKind};
