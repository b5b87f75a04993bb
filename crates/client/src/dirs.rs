//! Platform-specific directory utilities.
//!
//! Provides consistent directory paths across operating systems, following
//! platform conventions for data and cache directories.

use std::path::PathBuf;

use anyhow::Result;

/// Get the platform-specific data directory for Travelog.
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/travelog`
/// - Linux: `~/.local/share/travelog` (or `$XDG_DATA_HOME/travelog`)
/// - Windows: `%APPDATA%\travelog`
/// - Fallback: `./travelog_data`
pub fn data_dir() -> Result<PathBuf> {
    let dir = directories::ProjectDirs::from("", "", "travelog")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./travelog_data"));

    Ok(dir)
}

/// Get the platform-specific log directory for Travelog.
///
/// Follows platform conventions:
/// - macOS: `~/Library/Caches/travelog/logs`
/// - Linux: `~/.cache/travelog/logs` (or `$XDG_CACHE_HOME/travelog/logs`)
/// - Windows: `%LOCALAPPDATA%\travelog\logs`
/// - Fallback: `/tmp/travelog/logs`
pub fn log_dir() -> Result<PathBuf> {
    let base_dir = directories::ProjectDirs::from("", "", "travelog")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/travelog"));

    Ok(base_dir.join("logs"))
}
