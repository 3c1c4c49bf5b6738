//! Element message handlers: host text-control events and suggestion picks

use crate::commands::Cmd;
use crate::messages::{ElementMsg, SuggestionMsg};
use crate::model::AppModel;

/// Handle an event from the focused element's text control
pub fn update_element(model: &mut AppModel, msg: ElementMsg) -> Option<Cmd> {
    match msg {
        ElementMsg::InsertText(text) => {
            // Typing ends a drag spanning other elements
            if let Some(scene) = model.active_scene_mut() {
                scene.collapse_unfocused();
            }
            let changed = model
                .focused_element_mut()
                .is_some_and(|el| el.type_text(&text));
            if changed {
                model.refresh_focused_suggestions();
            }
            None
        }
        ElementMsg::SetCursor(offset) => {
            if let Some(el) = model.focused_element_mut() {
                el.set_cursor(offset);
            }
            None
        }
        ElementMsg::SetSelection { anchor, head } => {
            if let Some(el) = model.focused_element_mut() {
                el.set_selection(anchor, head);
            }
            None
        }
        ElementMsg::DisplayedTextChanged(displayed) => {
            let changed = model
                .focused_element_mut()
                .is_some_and(|el| el.apply_displayed(&displayed));
            if changed {
                model.refresh_focused_suggestions();
            }
            None
        }
        ElementMsg::Focus { scene, element } => {
            if model.focus(scene, element) {
                model.refresh_focused_suggestions();
            } else {
                tracing::warn!("Focus request for missing element {}:{}", scene, element);
            }
            None
        }
    }
}

/// Handle a pointer pick in the focused element's suggestion list
pub fn update_suggestion(model: &mut AppModel, msg: SuggestionMsg) -> Option<Cmd> {
    match msg {
        SuggestionMsg::Select(choice) => {
            let (scene_idx, element_idx) = model.focus_position()?;
            let text = model
                .focused_element()?
                .suggestions()
                .items()
                .get(choice)?
                .clone();
            let (scene, registries) = model.screenplay.scene_and_registries(scene_idx)?;
            let focused = scene.commit_suggestion(element_idx, &text, registries)?;
            Some(Cmd::ScrollTo {
                scene: scene_idx,
                element: focused,
            })
        }
    }
}
