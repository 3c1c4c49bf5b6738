//! intercut - Elm-style screenplay editing core
//!
//! A screenplay is an ordered list of scenes, each an ordered list of typed
//! elements (scene heading, action, character, dialogue, parenthetical).
//! Keystrokes drive element transitions, autocomplete and formatting; the
//! host supplies widgets, dialogs and a clipboard through [`runtime`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod document;
pub mod editable;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use document::{DocumentError, ScreenplayDocument};
pub use messages::Msg;
pub use model::{AppModel, Element, ElementKind, Scene, Screenplay};
pub use runtime::Runtime;
pub use update::update;
