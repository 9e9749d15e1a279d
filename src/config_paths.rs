//! Where flickboard looks for its files
//!
//! One directory holds the timing config, an optional layout overriding the
//! built-in qwerty, and the rolling logs. `XDG_CONFIG_HOME` wins over the
//! home directory so tests and sandboxes can redirect everything at once.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "flickboard";

/// The flickboard directory, or `None` when no home directory is known
/// (`%APPDATA%` on Windows)
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// Swipe threshold, repeat timing and lockable modifiers
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// User layout; replaces the embedded one when present and valid
pub fn layout_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("layout.yaml"))
}

/// Daily `flickboard.log.YYYY-MM-DD` files
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn create_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path).map_err(|e| format!("Cannot create {}: {}", path.display(), e))
}

/// The logs directory, created on first use
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No home or config directory".to_string())?;
    create_dir(&logs)?;
    Ok(logs)
}
