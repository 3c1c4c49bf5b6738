//! Configurable keyboard mapping for screenplay elements
//!
//! Every element kind gets its own immutable shortcut table, built once at
//! startup from the embedded keymap.yaml plus the user's overrides:
//!
//! ```text
//! host key-down → Keystroke → Keymap::for_kind(kind).dispatch() → Command
//!                                                   ↘ default handling (when not suppressed)
//! ```
//!
//! ```ignore
//! let keymap = Keymap::with_bindings(&load_default_keymap());
//! let run_default = keymap
//!     .for_kind(ElementKind::Character)
//!     .dispatch(&stroke, |command| { /* execute */ });
//! ```

mod binding;
mod command;
mod config;
mod defaults;
mod registry;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use defaults::{
    default_bindings, get_default_keymap_yaml, load_default_keymap, merge_bindings,
    merge_user_keymap,
};
pub use registry::{Keymap, Shortcut, ShortcutRegistry};
pub use types::{KeyCode, Keystroke, Modifiers};

#[cfg(test)]
mod tests;
