//! Subcommand implementations.
//!
//! Each command reads its inputs, runs one library crate and writes the
//! result to stdout. The `*_output` functions do the pure part and are what
//! the tests exercise.

use anyhow::{Context, Result};
use impact_analyze_tree::{
    affected_classes_tree, build_analyze_tree, extract_identifiers, flatten, summarize_affected,
    AnalyzeOptions, AnalyzeTreeNode, RepositoryCache,
};
use impact_diff::{can_analyze, diff_lines, DiffLine, DiffStats};
use impact_graph::{
    GraphAction, GraphEvent, ImpactGraph, LayoutParams, LayoutState, NodePosition,
    SimulationStatus,
};
use impact_report::{
    build_impact_model, reasoning_bullets, ImpactCounts, ImpactModel, ImpactNodeKind,
    ImpactTreeNode,
};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_json(path: &Path) -> Result<Value> {
    let content = read_text(path)?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("Failed to write output")?;
    writeln!(stdout)?;
    Ok(())
}

fn print_lines(lines: &[String]) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}

// === diff ===

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffOutput {
    pub lines: Vec<DiffLine>,
    pub stats: DiffStats,
    pub can_analyze: bool,
}

/// Diff `original` against `modified`, the modified text being the compare buffer.
pub fn diff_output(original: &str, modified: &str) -> DiffOutput {
    let lines = diff_lines(Some(original), Some(modified));
    DiffOutput {
        stats: DiffStats::from_lines(&lines),
        can_analyze: can_analyze(modified, &lines),
        lines,
    }
}

pub fn diff(original: &Path, modified: &Path, text: bool) -> Result<()> {
    let output = diff_output(&read_text(original)?, &read_text(modified)?);
    log::debug!(
        "Diff: +{} -{} ={}",
        output.stats.added,
        output.stats.removed,
        output.stats.unchanged
    );

    if text {
        let lines: Vec<String> = output
            .lines
            .iter()
            .map(|line| format!("{} {}", line.kind.prefix(), line.text))
            .collect();
        print_lines(&lines)
    } else {
        print_json(&output)
    }
}

// === report ===

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutput {
    #[serde(flatten)]
    pub model: ImpactModel,
    pub counts: ImpactCounts,
}

pub fn report_output(payload: &Value) -> ReportOutput {
    let model = build_impact_model(payload);
    ReportOutput {
        counts: ImpactCounts::from_items(&model.items),
        model,
    }
}

/// Indented outline of an impact forest.
///
/// Change reasoning is split into bullets; other details print as one line.
pub fn report_outline(forest: &[ImpactTreeNode]) -> Vec<String> {
    fn walk(node: &ImpactTreeNode, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        lines.push(format!("{indent}{}", node.title));
        if let Some(subtitle) = &node.subtitle {
            lines.push(format!("{indent}  {subtitle}"));
        }
        if let Some(detail) = &node.detail {
            if node.kind == ImpactNodeKind::Change {
                lines.extend(
                    reasoning_bullets(detail)
                        .into_iter()
                        .map(|bullet| format!("{indent}  • {bullet}")),
                );
            } else {
                lines.push(format!("{indent}  {detail}"));
            }
        }
        for child in &node.children {
            walk(child, depth + 1, lines);
        }
    }

    let mut lines = Vec::new();
    for root in forest {
        walk(root, 0, &mut lines);
    }
    lines
}

pub fn report(payload: &Path, text: bool) -> Result<()> {
    let output = report_output(&read_json(payload)?);
    if output.model.items.is_empty() {
        log::warn!("No impact items found in {}", payload.display());
    }

    if text {
        let counts = output.counts;
        let mut lines = vec![format!(
            "High: {}  Medium: {}  Low: {}",
            counts.high, counts.medium, counts.low
        )];
        lines.extend(report_outline(&output.model.forest));
        print_lines(&lines)
    } else {
        print_json(&output)
    }
}

// === analyze ===

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOutput {
    pub identifiers: Vec<String>,
    pub tree: Vec<AnalyzeTreeNode>,
    pub summary: String,
}

/// Build the affected-class tree of an analyzer response.
///
/// Responses with an identifier list are grouped against `cache`; legacy
/// nested `affectedClasses` objects are converted as they are.
pub fn analyze_output(
    response: &Value,
    cache: &RepositoryCache,
    options: &AnalyzeOptions,
) -> AnalyzeOutput {
    let identifiers = extract_identifiers(response);
    let tree = if identifiers.is_empty() {
        affected_classes_tree(response)
    } else {
        build_analyze_tree(&identifiers, cache, options)
    };
    AnalyzeOutput {
        identifiers,
        tree,
        summary: summarize_affected(response),
    }
}

pub fn analyze(
    payload: &Path,
    repos: Option<&Path>,
    options: &AnalyzeOptions,
    text: bool,
) -> Result<()> {
    let response = read_json(payload)?;
    let cache = match repos {
        Some(path) => RepositoryCache::from_details(&read_json(path)?),
        None => RepositoryCache::default(),
    };
    log::debug!("Resolving against {} cached repositories", cache.len());

    let output = analyze_output(&response, &cache, options);
    if text {
        let mut lines: Vec<String> = flatten(&output.tree).iter().map(|e| e.render()).collect();
        if !output.summary.is_empty() {
            lines.push(String::new());
            lines.extend(output.summary.lines().map(str::to_string));
        }
        print_lines(&lines)
    } else {
        print_json(&output)
    }
}

// === layout ===

pub struct LayoutOptions {
    pub width: f64,
    pub height: f64,
    pub max_ticks: u32,
    pub params: LayoutParams,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOutput {
    pub ticks: u32,
    pub rested: bool,
    /// Events other than position updates, in order.
    pub events: Vec<GraphEvent>,
    pub positions: Vec<NodePosition>,
}

fn load_layout(
    payload: &Value,
    actions: &[GraphAction],
    options: &LayoutOptions,
) -> (LayoutState, Vec<GraphEvent>) {
    let model = build_impact_model(payload);
    let mut state = LayoutState::new(options.width, options.height, options.params.clone());
    state.load(ImpactGraph::from_items(&model.items));

    let events = actions
        .iter()
        .flat_map(|action| state.handle_action(action.clone()))
        .collect();
    (state, events)
}

fn is_running(state: &LayoutState) -> bool {
    state.simulation().status() == SimulationStatus::Active
}

/// Apply `actions`, then tick until the layout rests or `max_ticks` is reached.
pub fn layout_output(
    payload: &Value,
    actions: &[GraphAction],
    options: &LayoutOptions,
) -> LayoutOutput {
    let (mut state, mut events) = load_layout(payload, actions, options);

    let mut ticks = 0;
    while ticks < options.max_ticks && is_running(&state) {
        ticks += 1;
        events.extend(
            state
                .handle_action(GraphAction::Tick)
                .into_iter()
                .filter(|event| !matches!(event, GraphEvent::PositionsUpdated { .. })),
        );
    }

    LayoutOutput {
        ticks,
        rested: !is_running(&state),
        events,
        positions: state.positions(),
    }
}

pub fn read_actions(path: Option<&Path>) -> Result<Vec<GraphAction>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let value = read_json(path)?;
    serde_json::from_value(value)
        .with_context(|| format!("Failed to parse graph actions from {}", path.display()))
}

pub fn layout(payload: &Path, actions: &[GraphAction], options: &LayoutOptions) -> Result<()> {
    let output = layout_output(&read_json(payload)?, actions, options);
    log::debug!("Layout finished after {} ticks (rested: {})", output.ticks, output.rested);
    print_json(&output)
}

/// Write one event as a JSON line and flush it.
fn write_event(out: &mut impl Write, event: &GraphEvent) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string(event)?)?;
    out.flush()?;
    Ok(())
}

/// Stream every event as one JSON line, one tick per frame, until rest.
pub async fn layout_live(
    payload: &Path,
    actions: &[GraphAction],
    options: &LayoutOptions,
    fps: u32,
) -> Result<()> {
    let (mut state, events) = load_layout(&read_json(payload)?, actions, options);

    let emit = |event: &GraphEvent| write_event(&mut std::io::stdout().lock(), event);

    for event in &events {
        emit(event)?;
    }
    emit(&GraphEvent::PositionsUpdated {
        positions: state.positions(),
    })?;

    let mut frames = tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(fps.max(1))));
    let mut ticks = 0;
    while ticks < options.max_ticks && is_running(&state) {
        tokio::select! {
            _ = frames.tick() => {
                ticks += 1;
                for event in state.handle_action(GraphAction::Tick) {
                    emit(&event)?;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted after {} ticks", ticks);
                break;
            }
        }
    }

    log::debug!("Live layout stopped after {} ticks", ticks);
    Ok(())
}
