//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The [`Runtime`](crate::runtime::Runtime) carries them out.

use std::path::PathBuf;

use crate::document::ScreenplayDocument;

/// Commands returned by update functions
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Run several commands in order
    Batch(Vec<Cmd>),
    /// Scroll the container so an element is visible
    ScrollTo { scene: usize, element: usize },
    /// Write a document snapshot to disk
    SaveFile {
        path: PathBuf,
        document: ScreenplayDocument,
    },
    /// Read and parse a document
    LoadFile { path: PathBuf },
    /// Ask the user where to save
    ShowSaveDialog { default_path: Option<PathBuf> },
    /// Ask the user what to open
    ShowOpenDialog { default_path: Option<PathBuf> },
    /// Put raw text on the clipboard
    SetClipboard(String),
}

impl Cmd {
    /// Combine `cmds`; a single command is returned as is
    pub fn batch(mut cmds: Vec<Cmd>) -> Option<Cmd> {
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(Cmd::Batch(cmds)),
        }
    }
}
