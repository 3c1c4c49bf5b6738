//! Command enum representing every action a key can be bound to
//!
//! Commands are the bridge between key bindings and the update loop:
//! `update` executes a resolved command against the focused element.

use std::str::FromStr;

/// All element commands that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ========================================================================
    // Structural transitions
    // ========================================================================
    /// Commit the element and create the next one (Enter)
    NextElement,
    /// Remove the element when the cursor sits at its start (Backspace)
    RemoveAtStart,
    /// Morph into the kind's tab target (Tab)
    TabForward,
    /// Morph into the kind's shift-tab target (Shift+Tab)
    TabBackward,

    // ========================================================================
    // Word-wise deletion
    // ========================================================================
    /// Delete the word left of the cursor (Ctrl+Backspace)
    DeleteWordLeft,
    /// Delete the word right of the cursor (Ctrl+Delete)
    DeleteWordRight,

    // ========================================================================
    // Suggestions
    // ========================================================================
    HighlightNext,
    HighlightPrevious,
    DismissSuggestions,

    // ========================================================================
    // Clipboard / selection
    // ========================================================================
    Copy,
    Cut,
    SelectAll,

    // ========================================================================
    // Document
    // ========================================================================
    NewScene,
    SaveFile,
    SaveFileAs,
    OpenFile,

    /// Removes a default binding when used in a user keymap
    Unbound,
}

impl Command {
    /// Whether default key handling runs after this command by default.
    ///
    /// Backspace must still delete a character when the cursor is not at the
    /// element boundary, so its command lets the default through.
    pub fn passes_through_by_default(self) -> bool {
        matches!(self, Command::RemoveAtStart)
    }

    /// Whether executing the command may replace or remove elements
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Command::NextElement
                | Command::RemoveAtStart
                | Command::TabForward
                | Command::TabBackward
                | Command::NewScene
        )
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NextElement" => Ok(Command::NextElement),
            "RemoveAtStart" => Ok(Command::RemoveAtStart),
            "TabForward" => Ok(Command::TabForward),
            "TabBackward" => Ok(Command::TabBackward),
            "DeleteWordLeft" => Ok(Command::DeleteWordLeft),
            "DeleteWordRight" => Ok(Command::DeleteWordRight),
            "HighlightNext" => Ok(Command::HighlightNext),
            "HighlightPrevious" => Ok(Command::HighlightPrevious),
            "DismissSuggestions" => Ok(Command::DismissSuggestions),
            "Copy" => Ok(Command::Copy),
            "Cut" => Ok(Command::Cut),
            "SelectAll" => Ok(Command::SelectAll),
            "NewScene" => Ok(Command::NewScene),
            "SaveFile" => Ok(Command::SaveFile),
            "SaveFileAs" => Ok(Command::SaveFileAs),
            "OpenFile" => Ok(Command::OpenFile),
            "Unbound" => Ok(Command::Unbound),
            _ => Err(()),
        }
    }
}
