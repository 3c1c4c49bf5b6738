//! Keybinding struct representing a mapping from keystroke to command

use super::command::Command;
use super::types::Keystroke;
use crate::model::ElementKind;

/// A single keybinding mapping a keystroke to a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keybinding {
    pub keystroke: Keystroke,
    /// The command to execute
    pub command: Command,
    /// Restrict the binding to one element kind (None = every kind)
    pub kind: Option<ElementKind>,
    /// Skip the default key handling after the command ran
    pub suppress_default: bool,
}

impl Keybinding {
    /// Create a binding for every element kind with the command's default
    /// pass-through policy
    pub fn new(keystroke: Keystroke, command: Command) -> Self {
        Self {
            keystroke,
            command,
            kind: None,
            suppress_default: !command.passes_through_by_default(),
        }
    }

    /// Restrict this binding to one element kind (builder pattern)
    pub fn for_kind(mut self, kind: ElementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Override the pass-through policy (builder pattern)
    pub fn passthrough(mut self, passthrough: bool) -> Self {
        self.suppress_default = !passthrough;
        self
    }

    /// Whether this binding participates in the table for `kind`
    pub fn applies_to(&self, kind: ElementKind) -> bool {
        match self.kind {
            Some(only) => only == kind,
            None => true,
        }
    }
}
