//! Logging setup and focus snapshots for diagnostics
//!
//! Configure the console via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=intercut::update=trace` - module-level filtering
//!
//! Logs are also written to `~/.config/intercut/logs/intercut.log.YYYY-MM-DD`
//! at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{AppModel, ElementKind};

/// Initialize tracing subscriber with console and file logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // try_init: tests and embedders may already have a subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of the focused element for diffing around an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusSnapshot {
    pub scene: usize,
    pub element: Option<usize>,
    pub kind: Option<ElementKind>,
    pub element_count: usize,
    pub cursor: usize,
    pub selection_empty: bool,
}

impl FocusSnapshot {
    pub fn from_model(model: &AppModel) -> Self {
        let scene = model.active_scene();
        let element = model.focused_element();
        Self {
            scene: model.active_scene,
            element: scene.and_then(|s| s.focused_index()),
            kind: element.map(|e| e.kind()),
            element_count: scene.map(|s| s.len()).unwrap_or(0),
            cursor: element.map(|e| e.cursor()).unwrap_or(0),
            selection_empty: element.map(|e| !e.has_selection()).unwrap_or(true),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &FocusSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.scene != other.scene {
            changes.push(format!("scene: {} → {}", self.scene, other.scene));
        }
        if self.element_count != other.element_count {
            changes.push(format!(
                "elements: {} → {}",
                self.element_count, other.element_count
            ));
        }
        if self.element != other.element || self.kind != other.kind {
            changes.push(format!(
                "focus: {:?} {:?} → {:?} {:?}",
                self.element, self.kind, other.element, other.kind
            ));
        }
        if self.cursor != other.cursor {
            changes.push(format!("cursor: {} → {}", self.cursor, other.cursor));
        }
        if self.selection_empty != other.selection_empty {
            let status = if other.selection_empty {
                "cleared"
            } else {
                "active"
            };
            changes.push(format!("selection {}", status));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
