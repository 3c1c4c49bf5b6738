//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/intercut/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Column width for soft wrapping and plain-text output (0 = no wrapping)
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,

    /// Directory offered by the save/open dialogs when nothing was saved yet
    #[serde(default)]
    pub default_save_dir: Option<PathBuf>,

    /// Hide suggestions while a scene heading or character cue is empty
    /// (otherwise every known name is offered)
    #[serde(default = "default_true")]
    pub clear_suggestions_on_empty: bool,
}

fn default_wrap_width() -> usize {
    30
}

fn default_true() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            wrap_width: default_wrap_width(),
            default_save_dir: None,
            clear_suggestions_on_empty: true,
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the user config directory
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Where save/open dialogs should start for a screenplay last saved at
    /// `current` (if ever)
    pub fn dialog_path(&self, current: Option<&Path>) -> Option<PathBuf> {
        current
            .map(Path::to_path_buf)
            .or_else(|| self.default_save_dir.clone())
    }
}
