//! Type definitions for normalized impact reports

use serde::Serialize;
use strum::{EnumString, IntoStaticStr};

/// Highest risk score the analyzer reports.
pub const MAX_RISK_SCORE: f64 = 10.0;

/// One analyzed change together with its downstream impact
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReportItem {
    /// Position of the item in the source payload
    pub index: usize,

    /// The changed method or member
    pub changed_identifier: String,

    /// Overall risk in `[0, 10]`, if the analyzer rated it
    pub risk_score: Option<f64>,

    /// Free-form reasoning behind the rating (may be empty)
    pub reasoning_text: String,

    /// Short summary line, when provided
    pub summary: Option<String>,

    /// Explicit closing assessment, when provided
    pub conclusion: Option<String>,

    /// Downstream modules affected by the change
    pub impacted_modules: Vec<ImpactedModule>,
}

/// A downstream module affected by a change
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactedModule {
    /// Position of the module in the item's source list
    pub ordinal: usize,

    pub module_name: String,

    pub impact_type: ImpactType,

    pub description: String,

    /// Recommended follow-up, when provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// Module-specific risk in `[0, 10]`
    pub risk_score: Option<f64>,
}

/// How a downstream module is affected by a change
///
/// Wire names are the analyzer's `SCREAMING_SNAKE_CASE` strings; anything
/// unrecognized maps to [`ImpactType::Unknown`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ImpactType {
    /// Dependent code no longer compiles
    SyntacticBreak,
    /// Dependent code compiles but behaves differently
    SemanticBreak,
    /// Behaviour change is possible
    SemanticRisk,
    /// Failure may surface at runtime
    RuntimeRisk,
    #[default]
    Unknown,
}

impl ImpactType {
    /// Parse an analyzer impact type, tolerating case and `-`/space separators
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().replace(['-', ' '], "_");
        normalized.parse().unwrap_or_default()
    }

    /// Canonical wire name, e.g. `SYNTACTIC_BREAK`
    pub fn label(&self) -> &'static str {
        self.into()
    }

    /// Icon shown next to the module in the detail tree
    pub fn icon(&self) -> &'static str {
        match self {
            ImpactType::SyntacticBreak => "❌",
            ImpactType::SemanticBreak | ImpactType::SemanticRisk => "⚠️",
            ImpactType::RuntimeRisk | ImpactType::Unknown => "📝",
        }
    }

    /// Coarse impact level used for counts and node colouring
    pub fn level(&self) -> ImpactLevel {
        match self {
            ImpactType::SyntacticBreak => ImpactLevel::High,
            ImpactType::SemanticBreak | ImpactType::SemanticRisk | ImpactType::RuntimeRisk => {
                ImpactLevel::Medium
            }
            ImpactType::Unknown => ImpactLevel::Low,
        }
    }
}

/// Coarse impact level of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    High,
    Medium,
    Low,
}

/// Number of impacted modules per [`ImpactLevel`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImpactCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl ImpactCounts {
    /// Count every impacted module of every item by level
    pub fn from_items(items: &[ImpactReportItem]) -> Self {
        items
            .iter()
            .flat_map(|item| &item.impacted_modules)
            .fold(Self::default(), |mut counts, module| {
                match module.impact_type.level() {
                    ImpactLevel::High => counts.high += 1,
                    ImpactLevel::Medium => counts.medium += 1,
                    ImpactLevel::Low => counts.low += 1,
                }
                counts
            })
    }

    pub fn get(&self, level: ImpactLevel) -> usize {
        match level {
            ImpactLevel::High => self.high,
            ImpactLevel::Medium => self.medium,
            ImpactLevel::Low => self.low,
        }
    }
}

/// Risk severity bucket, derived from a score for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// score >= 8
    Severe,
    /// 5 <= score < 8
    Moderate,
    /// 0 < score < 5
    Low,
    /// no score, zero, or not a number
    Neutral,
}

impl Severity {
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            Some(s) if s >= 8.0 => Severity::Severe,
            Some(s) if s >= 5.0 => Severity::Moderate,
            Some(s) if s > 0.0 => Severity::Low,
            _ => Severity::Neutral,
        }
    }

    /// Prefix used in root node titles
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Severe => "🔥 HIGH RISK",
            Severity::Moderate => "MEDIUM RISK",
            Severity::Low => "LOW RISK",
            Severity::Neutral => "UNRATED",
        }
    }
}

/// Role of a node in an impact tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ImpactNodeKind {
    Root,
    Change,
    Dependencies,
    Module,
    Assessment,
}

/// A node of the impact detail tree
///
/// `key` is derived from the node's position in the source payload, never
/// from object identity, so expansion state keyed by it survives a rebuild.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactTreeNode {
    pub key: String,
    pub kind: ImpactNodeKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Narrative shown when the node is selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_type: Option<ImpactType>,
    pub children: Vec<ImpactTreeNode>,
}

impl ImpactTreeNode {
    pub fn new(key: impl Into<String>, kind: ImpactNodeKind, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            title: title.into(),
            subtitle: None,
            detail: None,
            risk_score: None,
            impact_type: None,
            children: Vec::new(),
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::from_score(self.risk_score)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first lookup of a node by key
    pub fn find(&self, key: &str) -> Option<&ImpactTreeNode> {
        if self.key == key {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(key))
    }
}

/// Clamp a raw score into `[0, 10]`; non-finite values are treated as absent
pub fn normalize_score(raw: f64) -> Option<f64> {
    raw.is_finite().then(|| raw.clamp(0.0, MAX_RISK_SCORE))
}
