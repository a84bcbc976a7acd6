use std::path::PathBuf;

use crate::paths;

/// Config file locations in lookup order
///
/// 1. `.impact-lens.toml` in the current working directory
/// 2. `config.toml` in the platform config directory
/// 3. `.impact-lens.toml` in the home directory
///
/// Locations that cannot be determined on this platform are skipped.
pub fn config_candidates() -> Vec<PathBuf> {
    [
        paths::local_config_path(),
        paths::app_config_path(),
        paths::home_config_path(),
    ]
    .into_iter()
    .filter_map(|path| match path {
        Ok(path) => Some(path),
        Err(e) => {
            log::debug!("Skipping config location: {:#}", e);
            None
        }
    })
    .collect()
}

/// Load the first config file found in [`config_candidates`]
///
/// Returns the path and content if found, None otherwise.
pub fn load_config_file() -> Option<(PathBuf, String)> {
    config_candidates().into_iter().find_map(|path| {
        let content = std::fs::read_to_string(&path).ok()?;
        log::debug!("Loaded config from {}", path.display());
        Some((path, content))
    })
}
