use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::debug;

use crate::error::HirakuError;
use crate::registry::PlayerRegistry;

/// Path to the user player table (XDG on Linux, AppData on Windows).
pub fn config_path() -> PathBuf {
    project_dirs()
        .map(|d| d.config_dir().join("players.toml"))
        .unwrap_or_else(|| PathBuf::from("players.toml"))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "hiraku")
}

/// Build the registry: built-in defaults overlaid by the user file, if one
/// exists. A missing file is not an error; an unreadable or unparsable one is.
pub fn load_registry() -> Result<PlayerRegistry, HirakuError> {
    let mut registry = PlayerRegistry::embedded();

    let path = config_path();
    if path.exists() {
        let raw =
            std::fs::read_to_string(&path).map_err(|e| HirakuError::Config(e.to_string()))?;
        let profiles = PlayerRegistry::profiles_from_toml(&raw)
            .map_err(|e| HirakuError::Config(e.to_string()))?;
        debug!(path = %path.display(), count = profiles.len(), "Merging user player table");
        registry.merge_user(profiles);
    } else {
        debug!("No user player table found, using built-in defaults");
    }

    Ok(registry)
}
