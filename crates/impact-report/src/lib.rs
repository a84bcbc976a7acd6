//! Change-impact report normalization
//!
//! Turns the JSON returned by the external impact analyzer into stable,
//! renderable structures. Two generations of the analyzer payload are
//! accepted (nested `llmReport` vs. flat `actionableImpacts` items); both are
//! reduced to [`ImpactReportItem`]s at the ingestion boundary and every
//! consumer works on those.
//!
//! # Example
//!
//! ```
//! use impact_report::build_impact_model;
//! use serde_json::json;
//!
//! let payload = json!([{
//!     "changedMember": "OrderService.place",
//!     "riskScore": 8,
//!     "actionableImpacts": [{ "moduleName": "billing", "impactType": "SYNTACTIC_BREAK" }]
//! }]);
//! let model = build_impact_model(&payload);
//!
//! assert_eq!(model.forest[0].key, "impact-root-0");
//! assert_eq!(model.forest[0].children.len(), 3);
//! ```

mod bullets;
mod normalize;
mod tree;
mod types;

pub use bullets::{first_sentences, reasoning_bullets};
pub use normalize::{normalize_item, normalize_report};
pub use tree::{build_impact_forest, build_item_tree, collect_keys};
pub use types::*;

use serde::Serialize;

/// Normalized items together with the tree built from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImpactModel {
    pub items: Vec<ImpactReportItem>,
    pub forest: Vec<ImpactTreeNode>,
}

/// Normalize a raw payload and build its impact forest in one step.
///
/// Never fails: unrecognized payloads produce an empty model.
pub fn build_impact_model(payload: &serde_json::Value) -> ImpactModel {
    let items = normalize_report(payload);
    let forest = build_impact_forest(&items);
    ImpactModel { items, forest }
}
