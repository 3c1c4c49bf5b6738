//! Centralized configuration paths for intercut
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/intercut/`
//! - Windows: `%APPDATA%\intercut\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "intercut";

/// Prefix of the daily rolling log files
pub const LOG_FILE_PREFIX: &str = "intercut.log";

/// Base config directory for intercut
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/intercut`
///   - Else: `~/.config/intercut`
///
/// Windows:
///   - `%APPDATA%\intercut`
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

/// `~/.config/intercut/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/intercut/keymap.yaml`
pub fn keymap_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("keymap.yaml"))
}

/// `~/.config/intercut/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_app_dir() {
        if let Some(dir) = config_dir() {
            assert!(dir.ends_with(APP_DIR));
            assert_eq!(config_file(), Some(dir.join("config.yaml")));
            assert_eq!(keymap_file(), Some(dir.join("keymap.yaml")));
            assert_eq!(logs_dir(), Some(dir.join("logs")));
        }
    }
}
