//! Application configuration
//!
//! Configuration loaded from `.impact-lens.toml`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Application configuration loaded from `.impact-lens.toml`
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub analyze: AnalyzeConfig,
}

/// `[layout]` section: force layout tuning
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Canvas width used when none is given on the command line
    #[serde(default = "default_width")]
    pub width: f64,

    /// Canvas height used when none is given on the command line
    #[serde(default = "default_height")]
    pub height: f64,

    #[serde(default = "default_link_distance")]
    pub link_distance: f64,

    #[serde(default = "default_link_strength")]
    pub link_strength: f64,

    /// Many-body strength, negative values repel
    #[serde(default = "default_charge_strength")]
    pub charge_strength: f64,

    #[serde(default = "default_collide_radius")]
    pub collide_radius: f64,

    #[serde(default = "default_center_strength")]
    pub center_strength: f64,

    /// Distance nodes keep from the canvas edges
    #[serde(default = "default_margin")]
    pub margin: f64,

    #[serde(default = "default_min_width")]
    pub min_width: f64,

    #[serde(default = "default_min_height")]
    pub min_height: f64,

    #[serde(default = "default_alpha_min")]
    pub alpha_min: f64,

    /// Ticks until a cold start cools down to `alpha_min`
    #[serde(default = "default_cooldown_ticks")]
    pub cooldown_ticks: u32,

    #[serde(default = "default_velocity_decay")]
    pub velocity_decay: f64,

    #[serde(default = "default_drag_alpha_target")]
    pub drag_alpha_target: f64,

    #[serde(default = "default_recenter_alpha_target")]
    pub recenter_alpha_target: f64,

    #[serde(default = "default_recenter_ticks")]
    pub recenter_ticks: u32,
}

/// `[analyze]` section: affected-class tree options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnalyzeConfig {
    /// Extension appended to class names when matching repository files
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Root name of the bucket for classes no repository claims
    #[serde(default = "default_unknown_name")]
    pub unknown_name: String,
}

fn default_width() -> f64 {
    960.0
}

fn default_height() -> f64 {
    640.0
}

fn default_link_distance() -> f64 {
    140.0
}

fn default_link_strength() -> f64 {
    1.0
}

fn default_charge_strength() -> f64 {
    -400.0
}

fn default_collide_radius() -> f64 {
    40.0
}

fn default_center_strength() -> f64 {
    0.05
}

fn default_margin() -> f64 {
    80.0
}

fn default_min_width() -> f64 {
    300.0
}

fn default_min_height() -> f64 {
    200.0
}

fn default_alpha_min() -> f64 {
    0.001
}

fn default_cooldown_ticks() -> u32 {
    300
}

fn default_velocity_decay() -> f64 {
    0.4
}

fn default_drag_alpha_target() -> f64 {
    0.3
}

fn default_recenter_alpha_target() -> f64 {
    0.35
}

fn default_recenter_ticks() -> u32 {
    48
}

fn default_extension() -> String {
    "java".to_string()
}

fn default_unknown_name() -> String {
    "Unknown Project".to_string()
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            link_distance: default_link_distance(),
            link_strength: default_link_strength(),
            charge_strength: default_charge_strength(),
            collide_radius: default_collide_radius(),
            center_strength: default_center_strength(),
            margin: default_margin(),
            min_width: default_min_width(),
            min_height: default_min_height(),
            alpha_min: default_alpha_min(),
            cooldown_ticks: default_cooldown_ticks(),
            velocity_decay: default_velocity_decay(),
            drag_alpha_target: default_drag_alpha_target(),
            recenter_alpha_target: default_recenter_alpha_target(),
            recenter_ticks: default_recenter_ticks(),
        }
    }
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            unknown_name: default_unknown_name(),
        }
    }
}

impl AppConfig {
    /// Load config from the first file found, or use defaults
    pub fn load() -> Self {
        if let Some((path, content)) = crate::load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {}: {}", path.display(), e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Load config from an explicit path
    ///
    /// Unlike [`AppConfig::load`], a missing or invalid file is an error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded app config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.layout.link_distance, 140.0);
        assert_eq!(config.layout.charge_strength, -400.0);
        assert_eq!(config.layout.margin, 80.0);
        assert_eq!(config.layout.cooldown_ticks, 300);
        assert_eq!(config.layout.recenter_ticks, 48);
        assert_eq!(config.analyze.extension, "java");
        assert_eq!(config.analyze.unknown_name, "Unknown Project");
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            [layout]
            link_distance = 200.0
            recenter_ticks = 10

            [analyze]
            extension = "kt"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.layout.link_distance, 200.0);
        assert_eq!(config.layout.recenter_ticks, 10);
        assert_eq!(config.analyze.extension, "kt");
        // Other fields should use defaults
        assert_eq!(config.layout.collide_radius, 40.0);
        assert_eq!(config.analyze.unknown_name, "Unknown Project");
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analyze]\nunknown_name = \"Elsewhere\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.analyze.unknown_name, "Elsewhere");
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            AppConfig::from_file(&missing),
            Err(ConfigError::Read { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\nmargin = \"wide\"").unwrap();
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
