//! Message types for the Elm-style architecture
//!
//! Every input the editing core accepts arrives as a [`Msg`].

use std::path::PathBuf;

use crate::keymap::Keystroke;
use crate::model::Screenplay;

/// Edits and cursor updates for the focused element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementMsg {
    /// Text typed or pasted at the cursor (replaces the selection)
    InsertText(String),
    /// The host's text control moved the cursor
    SetCursor(usize),
    /// The host's text control changed the selection
    SetSelection { anchor: usize, head: usize },
    /// The host's text control deleted text on its own; carries the
    /// displayed text after the deletion
    DisplayedTextChanged(String),
    /// Pointer click into an element
    Focus { scene: usize, element: usize },
}

/// Pointer drags and scene-level structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneMsg {
    /// Pointer pressed inside an element of the active scene
    DragStart { element: usize, offset: usize },
    /// Pointer moved over an element of the active scene
    DragMove { element: usize, offset: usize },
    /// Pointer released
    DragEnd,
    /// Insert a new scene after the active one
    AddScene,
    /// Delete a scene
    RemoveScene(usize),
}

/// Suggestion list interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionMsg {
    /// Pointer picked the candidate at this index
    Select(usize),
}

/// Load/save flow
#[derive(Debug, Clone, PartialEq)]
pub enum FileMsg {
    /// Save to the known location, or ask for one
    Save,
    /// Always ask for a location
    SaveAs,
    /// Ask for a file to open
    Open,
    /// A location was chosen for saving
    SaveTo(PathBuf),
    /// A file was chosen for loading
    Load(PathBuf),
    /// Save finished
    Saved(PathBuf),
    /// Load finished
    Loaded {
        path: PathBuf,
        screenplay: Box<Screenplay>,
    },
    /// Load or save failed; the reason is shown to the user
    Failed(String),
    /// The file dialog was dismissed
    DialogCancelled,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Key-down on the focused element
    Key(Keystroke),
    Element(ElementMsg),
    Scene(SceneMsg),
    Suggestion(SuggestionMsg),
    File(FileMsg),
}
