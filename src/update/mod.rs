//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod element;
mod file;
mod keys;
mod scene;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::FocusSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use element::{update_element, update_suggestion};
pub use file::update_file;
pub use keys::{execute_command, update_key};
pub use scene::update_scene;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let result = match msg {
        Msg::Key(stroke) => keys::update_key(model, stroke),
        Msg::Element(m) => element::update_element(model, m),
        Msg::Scene(m) => scene::update_scene(model, m),
        Msg::Suggestion(m) => element::update_suggestion(model, m),
        Msg::File(m) => file::update_file(model, m),
    };

    // Structural edits may leave a scene empty or without focus
    model.ensure_focus();
    result
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after focus state and logs the diff.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = FocusSnapshot::from_model(model);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = FocusSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "focus", %diff, "state changed");
    }

    result
}

/// Display name for a message, without bulky payloads
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::FileMsg;

    match msg {
        Msg::Key(stroke) => format!("Key({})", stroke),
        Msg::Element(m) => format!("Element::{:?}", m),
        Msg::Scene(m) => format!("Scene::{:?}", m),
        Msg::Suggestion(m) => format!("Suggestion::{:?}", m),
        Msg::File(FileMsg::Loaded { path, .. }) => format!("File::Loaded({})", path.display()),
        Msg::File(m) => format!("File::{:?}", m),
    }
}
