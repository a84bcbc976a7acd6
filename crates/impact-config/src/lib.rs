//! Configuration for impact-lens
//!
//! Layout and analyze-tree tuning loaded from `.impact-lens.toml`.

mod app_config;
mod config_file;
mod error;
pub mod paths;

pub use app_config::{AnalyzeConfig, AppConfig, LayoutConfig};
pub use config_file::{config_candidates, load_config_file};
pub use error::ConfigError;
