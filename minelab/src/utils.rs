//! Utility functions for data paths and history persistence

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::app::InputHistory;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "minelab", "minelab")
}

/// Get the path to the history file
pub fn history_file_path() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        proj_dirs.data_dir().join("history.json")
    } else {
        PathBuf::from(".minelab-history.json")
    }
}

pub fn log_file_path() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        proj_dirs.data_dir().join("minelab.log")
    } else {
        PathBuf::from("minelab.log")
    }
}

/// Default `config.yaml` location, if the platform has a config directory
pub fn config_file_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.yaml"))
}

/// Load input history from disk; a missing or unreadable file is an empty history
pub fn load_history(path: &Path) -> InputHistory {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Ignoring malformed history file");
            InputHistory::default()
        }),
        Err(_) => InputHistory::default(),
    }
}

/// Save input history to disk
pub fn save_history(path: &Path, history: &InputHistory) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(history)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write history to {}", path.display()))?;
    Ok(())
}
