//! Ingestion of raw analyzer payloads
//!
//! The analyzer renamed and moved fields between releases. Each logical field
//! has an ordered list of candidate source fields; the first one present with a
//! usable value wins. Everything downstream only sees [`ImpactReportItem`].

use crate::types::{normalize_score, ImpactReportItem, ImpactType, ImpactedModule};
use serde_json::{Map, Value};

/// Where a candidate field is looked up
#[derive(Debug, Clone, Copy)]
enum Scope {
    /// The report item itself
    Item,
    /// The nested `llmReport` object (legacy schema), or the item when absent
    Report,
}

type Candidates = &'static [(Scope, &'static str)];

const CHANGED_IDENTIFIER: Candidates = &[(Scope::Item, "changedMember"), (Scope::Item, "changedMethod")];
const RISK_SCORE: Candidates = &[
    (Scope::Item, "riskScore"),
    (Scope::Report, "riskScore"),
    (Scope::Report, "score"),
];
const REASONING: Candidates = &[
    (Scope::Item, "summaryReasoning"),
    (Scope::Report, "reasoning"),
    (Scope::Report, "analysis"),
    (Scope::Report, "reason"),
];
const SUMMARY: Candidates = &[(Scope::Report, "summary"), (Scope::Item, "summary")];
const CONCLUSION: Candidates = &[(Scope::Report, "conclusion"), (Scope::Item, "conclusion")];
const IMPACTED_MODULES: Candidates = &[
    (Scope::Item, "actionableImpacts"),
    (Scope::Report, "impactedModules"),
];

const MODULE_NAME: Candidates = &[(Scope::Item, "moduleName"), (Scope::Item, "name")];
const IMPACT_TYPE: Candidates = &[(Scope::Item, "impactType"), (Scope::Item, "type")];
const DESCRIPTION: Candidates = &[(Scope::Item, "description"), (Scope::Item, "issue")];
const ACTION: Candidates = &[(Scope::Item, "action"), (Scope::Item, "recommendation")];
const MODULE_RISK_SCORE: Candidates = &[(Scope::Item, "riskScore")];

const DEFAULT_IDENTIFIER: &str = "Change";

/// Normalize a raw analyzer payload into report items.
///
/// Accepts a top-level array or an object with an `items` array. Any other
/// shape yields no items. Entries that are not JSON objects are skipped; the
/// remaining items keep their source index.
pub fn normalize_report(payload: &Value) -> Vec<ImpactReportItem> {
    let entries = match payload {
        Value::Array(entries) => entries,
        Value::Object(map) => match map.get("items").and_then(Value::as_array) {
            Some(entries) => entries,
            None => {
                log::warn!("Impact payload object has no `items` array, ignoring it");
                return Vec::new();
            }
        },
        Value::Null => return Vec::new(),
        other => {
            log::warn!("Unrecognized impact payload shape: {}", kind_of(other));
            return Vec::new();
        }
    };

    let items: Vec<_> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| normalize_item(index, entry))
        .collect();

    log::debug!(
        "Normalized {} of {} impact report entries",
        items.len(),
        entries.len()
    );
    items
}

/// Normalize a single payload entry found at `index`.
///
/// Returns `None` when the entry is not a JSON object.
pub fn normalize_item(index: usize, entry: &Value) -> Option<ImpactReportItem> {
    let Some(item) = entry.as_object() else {
        log::warn!(
            "Skipping impact report entry {}: expected an object, got {}",
            index,
            kind_of(entry)
        );
        return None;
    };

    let fields = Fields::new(item);
    let impacted_modules = fields
        .array(IMPACTED_MODULES)
        .map(|modules| {
            modules
                .iter()
                .enumerate()
                .filter_map(|(ordinal, module)| normalize_module(index, ordinal, module))
                .collect()
        })
        .unwrap_or_default();

    Some(ImpactReportItem {
        index,
        changed_identifier: fields
            .text(CHANGED_IDENTIFIER)
            .unwrap_or_else(|| DEFAULT_IDENTIFIER.to_string()),
        risk_score: fields.score(RISK_SCORE),
        reasoning_text: fields.text(REASONING).unwrap_or_default(),
        summary: fields.text(SUMMARY),
        conclusion: fields.text(CONCLUSION),
        impacted_modules,
    })
}

fn normalize_module(index: usize, ordinal: usize, entry: &Value) -> Option<ImpactedModule> {
    let Some(module) = entry.as_object() else {
        log::warn!(
            "Skipping impacted module {} of entry {}: expected an object",
            ordinal,
            index
        );
        return None;
    };

    let fields = Fields::new(module);
    Some(ImpactedModule {
        ordinal,
        module_name: fields
            .text(MODULE_NAME)
            .unwrap_or_else(|| format!("Module {}", ordinal + 1)),
        impact_type: fields
            .text(IMPACT_TYPE)
            .map(|raw| ImpactType::parse(&raw))
            .unwrap_or_default(),
        description: fields.text(DESCRIPTION).unwrap_or_default(),
        action: fields.text(ACTION),
        risk_score: fields.score(MODULE_RISK_SCORE),
    })
}

/// The two lookup scopes of one payload object
#[derive(Clone, Copy)]
struct Fields<'a> {
    item: &'a Map<String, Value>,
    report: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn new(item: &'a Map<String, Value>) -> Self {
        let report = item
            .get("llmReport")
            .and_then(Value::as_object)
            .unwrap_or(item);
        Self { item, report }
    }

    fn values(self, candidates: Candidates) -> impl Iterator<Item = &'a Value> {
        candidates.iter().filter_map(move |(scope, name)| {
            let map = match scope {
                Scope::Item => self.item,
                Scope::Report => self.report,
            };
            map.get(*name)
        })
    }

    fn text(self, candidates: Candidates) -> Option<String> {
        self.values(candidates).find_map(as_text)
    }

    fn score(self, candidates: Candidates) -> Option<f64> {
        self.values(candidates)
            .find_map(as_number)
            .and_then(normalize_score)
    }

    fn array(self, candidates: Candidates) -> Option<&'a Vec<Value>> {
        self.values(candidates).find_map(Value::as_array)
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    value.as_f64()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
