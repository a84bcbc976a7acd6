//! Configuration file locations
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/impact-lens/config.toml`
//! - macOS: `~/Library/Application Support/impact-lens/config.toml`
//! - Windows: `%APPDATA%\impact-lens\config.toml`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "impact-lens";

/// Name of the config file looked up in the CWD and the home directory.
pub const LOCAL_CONFIG_FILE: &str = ".impact-lens.toml";

/// Get the application config directory
///
/// The directory is not created; configuration is only ever read.
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

/// Get path to app config file
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get path to local config file (in CWD)
pub fn local_config_path() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(LOCAL_CONFIG_FILE))
}

/// Get path to the config file in the home directory
pub fn home_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(LOCAL_CONFIG_FILE))
}
