//! Shortcut tables: keystroke lookup and dispatch
//!
//! A [`ShortcutRegistry`] is one flat table of exact keystroke matches. The
//! [`Keymap`] holds one registry per element kind, built once from a list of
//! bindings and never mutated while editing.

use std::collections::HashMap;

use super::binding::Keybinding;
use super::command::Command;
use super::types::Keystroke;
use crate::model::ElementKind;

/// What a registered keystroke does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub command: Command,
    /// Skip the default key handling after the command ran
    pub suppress_default: bool,
}

/// Exact-match table from keystroke to command
#[derive(Debug, Clone, Default)]
pub struct ShortcutRegistry {
    shortcuts: HashMap<Keystroke, Shortcut>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self {
            shortcuts: HashMap::new(),
        }
    }

    /// Bind `keystroke` to `command`. A second registration for the same
    /// keystroke silently replaces the first.
    pub fn register(&mut self, keystroke: Keystroke, command: Command, suppress_default: bool) {
        self.shortcuts.insert(
            keystroke,
            Shortcut {
                command,
                suppress_default,
            },
        );
    }

    /// Remove a binding, returning it if there was one
    pub fn unregister(&mut self, keystroke: &Keystroke) -> Option<Shortcut> {
        self.shortcuts.remove(keystroke)
    }

    /// Look up the exact keystroke (key and full modifier set)
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<Shortcut> {
        self.shortcuts.get(keystroke).copied()
    }

    /// Run the bound command (if any) and report whether the default key
    /// handling should still run.
    ///
    /// Unregistered keystrokes always fall through to the default handling.
    pub fn dispatch(&self, keystroke: &Keystroke, on_command: impl FnOnce(Command)) -> bool {
        match self.lookup(keystroke) {
            Some(shortcut) => {
                on_command(shortcut.command);
                !shortcut.suppress_default
            }
            None => true,
        }
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    /// Find the keystroke bound to a command (for display)
    pub fn keystroke_for(&self, command: Command) -> Option<Keystroke> {
        self.shortcuts
            .iter()
            .find(|(_, s)| s.command == command)
            .map(|(k, _)| *k)
    }
}

/// One immutable shortcut table per element kind
#[derive(Debug, Clone)]
pub struct Keymap {
    tables: HashMap<ElementKind, ShortcutRegistry>,
}

impl Keymap {
    /// Build the per-kind tables. Later bindings override earlier ones for
    /// the same keystroke; `Unbound` removes a binding.
    pub fn with_bindings(bindings: &[Keybinding]) -> Self {
        let mut tables = HashMap::new();
        for kind in ElementKind::ALL {
            let mut registry = ShortcutRegistry::new();
            for binding in bindings.iter().filter(|b| b.applies_to(kind)) {
                if binding.command == Command::Unbound {
                    registry.unregister(&binding.keystroke);
                } else {
                    registry.register(binding.keystroke, binding.command, binding.suppress_default);
                }
            }
            tables.insert(kind, registry);
        }
        Self { tables }
    }

    /// The table for one element kind
    pub fn for_kind(&self, kind: ElementKind) -> &ShortcutRegistry {
        &self.tables[&kind]
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::with_bindings(&super::defaults::default_bindings())
    }
}
