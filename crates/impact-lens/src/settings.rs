//! Mapping of the loaded config onto the library option types.

use impact_analyze_tree::AnalyzeOptions;
use impact_config::{AnalyzeConfig, AppConfig, LayoutConfig};
use impact_graph::LayoutParams;
use std::path::Path;

/// Load the config from `path` when given, else from the default lookup.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => Ok(AppConfig::from_file(path)?),
        None => Ok(AppConfig::load()),
    }
}

pub fn layout_params(config: &LayoutConfig) -> LayoutParams {
    LayoutParams {
        link_distance: config.link_distance,
        link_strength: config.link_strength,
        charge_strength: config.charge_strength,
        collide_radius: config.collide_radius,
        center_strength: config.center_strength,
        margin: config.margin,
        min_width: config.min_width,
        min_height: config.min_height,
        alpha_min: config.alpha_min,
        alpha_decay: LayoutParams::decay_for(config.alpha_min, config.cooldown_ticks),
        velocity_decay: config.velocity_decay,
        drag_alpha_target: config.drag_alpha_target,
        recenter_alpha_target: config.recenter_alpha_target,
        recenter_ticks: config.recenter_ticks,
    }
}

pub fn analyze_options(config: &AnalyzeConfig) -> AnalyzeOptions {
    AnalyzeOptions {
        extension: config.extension.clone(),
        unknown_name: config.unknown_name.clone(),
    }
}
