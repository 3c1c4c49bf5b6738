//! Default keybindings for the screenplay editor
//!
//! The shipped bindings live in keymap.yaml at the crate root and are
//! embedded at compile time. A user keymap is merged on top of them.

use std::path::Path;

use super::binding::Keybinding;
use super::command::Command;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::types::{KeyCode, Keystroke, Modifiers};
use crate::model::ElementKind;

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// The embedded default keymap, for display or for writing a starter file
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge keymaps: embedded defaults, then the user's keymap.yaml
/// from the config directory (if any).
pub fn load_default_keymap() -> Vec<Keybinding> {
    let bindings = embedded_bindings();

    match crate::config_paths::keymap_file() {
        Some(path) if path.exists() => merge_user_keymap(bindings, &path),
        _ => bindings,
    }
}

/// Merge the keymap file at `path` over `base`, keeping `base` when the file
/// can't be read or parsed.
pub fn merge_user_keymap(base: Vec<Keybinding>, path: &Path) -> Vec<Keybinding> {
    match load_keymap_file(path) {
        Ok(user_bindings) => {
            tracing::info!(
                "Merging user keymap from {} ({} bindings)",
                path.display(),
                user_bindings.len()
            );
            merge_bindings(base, user_bindings)
        }
        Err(e) => {
            tracing::warn!("Failed to load user keymap from {}: {}", path.display(), e);
            base
        }
    }
}

fn embedded_bindings() -> Vec<Keybinding> {
    match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::debug!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    }
}

/// Merge user bindings into base bindings
///
/// - Same keystroke and kind restriction: the user binding replaces the base one
/// - `Unbound`: removes base bindings for that keystroke. A kind-restricted
///   `Unbound` only removes that kind's bindings and is kept, so the kind's
///   table also drops an unrestricted binding for the keystroke.
/// - Otherwise the user binding is appended
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| {
                b.keystroke != user_binding.keystroke
                    || (user_binding.kind.is_some() && b.kind != user_binding.kind)
            });
            if user_binding.kind.is_some() {
                result.push(user_binding);
            }
            continue;
        }

        let existing_idx = result
            .iter()
            .position(|b| b.keystroke == user_binding.keystroke && b.kind == user_binding.kind);

        match existing_idx {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded default keybindings, mirroring keymap.yaml
///
/// Uses Cmd on macOS, Ctrl elsewhere for the document commands.
pub fn default_bindings() -> Vec<Keybinding> {
    let cmd = Modifiers::cmd();
    let cmd_shift = cmd | Modifiers::SHIFT;
    let ctrl = Modifiers::CTRL;
    let shift = Modifiers::SHIFT;
    let none = Modifiers::NONE;

    let mut bindings = vec![
        // ====================================================================
        // Structural transitions
        // ====================================================================
        bind(KeyCode::Enter, none, Command::NextElement),
        bind(KeyCode::Backspace, none, Command::RemoveAtStart),
        bind(KeyCode::Tab, none, Command::TabForward),
        bind(KeyCode::Tab, shift, Command::TabBackward),
        // ====================================================================
        // Word-wise deletion
        // ====================================================================
        bind(KeyCode::Backspace, ctrl, Command::DeleteWordLeft),
        bind(KeyCode::Delete, ctrl, Command::DeleteWordRight),
        // ====================================================================
        // Clipboard / selection
        // ====================================================================
        bind(KeyCode::Char('c'), cmd, Command::Copy),
        bind(KeyCode::Char('x'), cmd, Command::Cut),
        bind(KeyCode::Char('a'), cmd, Command::SelectAll),
        // ====================================================================
        // Document
        // ====================================================================
        bind(KeyCode::Char('s'), cmd, Command::SaveFile),
        bind(KeyCode::Char('s'), cmd_shift, Command::SaveFileAs),
        bind(KeyCode::Char('o'), cmd, Command::OpenFile),
        bind(KeyCode::Char('n'), cmd_shift, Command::NewScene),
    ];

    // Suggestion navigation only exists where there are suggestions
    for kind in ElementKind::ALL.into_iter().filter(|k| k.is_suggestive()) {
        bindings.push(bind(KeyCode::Down, none, Command::HighlightNext).for_kind(kind));
        bindings.push(bind(KeyCode::Up, none, Command::HighlightPrevious).for_kind(kind));
        bindings.push(bind(KeyCode::Escape, none, Command::DismissSuggestions).for_kind(kind));
    }

    bindings
}

/// Helper to create a keybinding
fn bind(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl_s() -> Keystroke {
        Keystroke::new(KeyCode::Char('s'), Modifiers::CTRL)
    }

    fn ctrl_o() -> Keystroke {
        Keystroke::new(KeyCode::Char('o'), Modifiers::CTRL)
    }

    fn down() -> Keystroke {
        Keystroke::key(KeyCode::Down)
    }

    #[test]
    fn test_default_bindings_cover_transitions() {
        let bindings = default_bindings();
        for command in [
            Command::NextElement,
            Command::RemoveAtStart,
            Command::TabForward,
            Command::TabBackward,
            Command::DeleteWordLeft,
            Command::DeleteWordRight,
        ] {
            assert!(
                bindings.iter().any(|b| b.command == command),
                "missing {:?}",
                command
            );
        }
    }

    #[test]
    fn test_suggestion_keys_only_on_suggestive_kinds() {
        let bindings = default_bindings();
        let kinds: Vec<_> = bindings
            .iter()
            .filter(|b| b.command == Command::HighlightNext)
            .map(|b| b.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![Some(ElementKind::SceneHeading), Some(ElementKind::Character)]
        );
    }

    #[test]
    fn test_merge_empty_user_returns_base() {
        let base = vec![Keybinding::new(ctrl_s(), Command::SaveFile)];
        let merged = merge_bindings(base, vec![]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].command, Command::SaveFile);
    }

    #[test]
    fn test_merge_overrides_existing() {
        let base = vec![Keybinding::new(ctrl_s(), Command::SaveFile)];
        let user = vec![Keybinding::new(ctrl_s(), Command::SaveFileAs)];

        let merged = merge_bindings(base, user);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].command, Command::SaveFileAs);
    }

    #[test]
    fn test_merge_adds_new_binding() {
        let base = vec![Keybinding::new(ctrl_s(), Command::SaveFile)];
        let user = vec![Keybinding::new(ctrl_o(), Command::OpenFile)];

        let merged = merge_bindings(base, user);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_unbound_removes_binding() {
        let base = vec![
            Keybinding::new(ctrl_s(), Command::SaveFile),
            Keybinding::new(ctrl_o(), Command::OpenFile),
        ];
        let user = vec![Keybinding::new(ctrl_s(), Command::Unbound)];

        let merged = merge_bindings(base, user);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].command, Command::OpenFile);
    }

    #[test]
    fn test_merge_kind_restricted_unbound() {
        let base = vec![
            Keybinding::new(down(), Command::HighlightNext).for_kind(ElementKind::SceneHeading),
            Keybinding::new(down(), Command::HighlightNext).for_kind(ElementKind::Character),
        ];
        let user =
            vec![Keybinding::new(down(), Command::Unbound).for_kind(ElementKind::SceneHeading)];

        let merged = merge_bindings(base, user);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].kind, Some(ElementKind::Character));
        assert_eq!(merged[1].command, Command::Unbound);
    }

    #[test]
    fn test_merge_kind_restricted_adds_not_overrides() {
        let enter = Keystroke::key(KeyCode::Enter);
        let base = vec![Keybinding::new(enter, Command::NextElement)];
        let user = vec![Keybinding::new(enter, Command::NewScene).for_kind(ElementKind::SceneHeading)];

        let merged = merge_bindings(base, user);
        assert_eq!(merged.len(), 2);
    }
}
