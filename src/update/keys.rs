//! Keystroke interpretation
//!
//! A key-down first goes through the focused element kind's shortcut table.
//! A bound command runs; then, unless the binding suppresses it or the
//! command already consumed the key, the default key handling runs.

use std::rc::Rc;

use super::file;
use crate::commands::Cmd;
use crate::keymap::{Command, KeyCode, Keystroke};
use crate::messages::FileMsg;
use crate::model::AppModel;

/// Result of running a bound command
struct CommandOutcome {
    cmd: Option<Cmd>,
    /// The key was fully handled; skip the default handling even if the
    /// binding passes through (e.g. Backspace removed the element)
    consumed: bool,
}

impl CommandOutcome {
    fn done(cmd: Option<Cmd>) -> Self {
        Self {
            cmd,
            consumed: false,
        }
    }

    fn consumed(cmd: Option<Cmd>) -> Self {
        Self {
            cmd,
            consumed: true,
        }
    }
}

/// Handle a key-down on the focused element
pub fn update_key(model: &mut AppModel, stroke: Keystroke) -> Option<Cmd> {
    let kind = model.focused_element()?.kind();

    let keymap = Rc::clone(&model.keymap);
    let mut outcome = None;
    let run_default = keymap
        .for_kind(kind)
        .dispatch(&stroke, |command| outcome = Some(run_command(model, command)));

    let (cmd, consumed) = match outcome {
        Some(o) => (o.cmd, o.consumed),
        None => (None, false),
    };

    if run_default && !consumed {
        default_key(model, stroke);
    }
    cmd
}

/// Execute a command against the focused element
pub fn execute_command(model: &mut AppModel, command: Command) -> Option<Cmd> {
    run_command(model, command).cmd
}

fn run_command(model: &mut AppModel, command: Command) -> CommandOutcome {
    let Some((scene_idx, element_idx)) = model.focus_position() else {
        return CommandOutcome::done(None);
    };

    match command {
        Command::NextElement => {
            let next = with_scene(model, |scene, registries| {
                scene.enter(element_idx, registries)
            })
            .flatten();
            CommandOutcome::consumed(next.map(|element| Cmd::ScrollTo {
                scene: scene_idx,
                element,
            }))
        }
        Command::RemoveAtStart => {
            let removed = with_scene(model, |scene, registries| {
                scene.backspace_at_start(element_idx, registries)
            })
            .unwrap_or(false);
            if !removed {
                return CommandOutcome::done(None);
            }
            model.ensure_focus();
            let cmd = model
                .focus_position()
                .map(|(scene, element)| Cmd::ScrollTo { scene, element });
            CommandOutcome::consumed(cmd)
        }
        Command::TabForward | Command::TabBackward => {
            let focused = with_scene(model, |scene, registries| {
                if command == Command::TabForward {
                    scene.tab(element_idx, registries)
                } else {
                    scene.shift_tab(element_idx, registries)
                }
            })
            .flatten();
            CommandOutcome::consumed(focused.map(|element| Cmd::ScrollTo {
                scene: scene_idx,
                element,
            }))
        }
        Command::DeleteWordLeft | Command::DeleteWordRight => {
            let changed = model.focused_element_mut().is_some_and(|el| {
                if command == Command::DeleteWordLeft {
                    el.delete_word_left()
                } else {
                    el.delete_word_right()
                }
            });
            if changed {
                model.refresh_focused_suggestions();
            }
            CommandOutcome::consumed(None)
        }
        Command::HighlightNext | Command::HighlightPrevious => {
            let forward = command == Command::HighlightNext;
            let moved = model
                .focused_element_mut()
                .is_some_and(|el| el.suggestions_mut().move_highlight(forward));
            // No open list: the arrow keys move between elements as usual
            if !moved {
                move_focus(model, forward);
            }
            CommandOutcome::consumed(None)
        }
        Command::DismissSuggestions => {
            if let Some(el) = model.focused_element_mut() {
                el.suggestions_mut().clear();
            }
            CommandOutcome::consumed(None)
        }
        Command::Copy | Command::Cut => {
            let text = model
                .active_scene()
                .map(|scene| scene.selected_raw_text())
                .unwrap_or_default();
            if text.is_empty() {
                return CommandOutcome::consumed(None);
            }
            let mut cmds = vec![Cmd::SetClipboard(text)];
            if command == Command::Cut {
                let before = model.focus_position();
                if let Some(scene) = model.active_scene_mut() {
                    scene.delete_selected();
                    scene.clear_selection();
                }
                model.refresh_focused_suggestions();
                // A cut across elements leaves focus where the selection began
                let after = model.focus_position();
                if let Some((scene, element)) = after.filter(|_| after != before) {
                    cmds.push(Cmd::ScrollTo { scene, element });
                }
            }
            CommandOutcome::consumed(Cmd::batch(cmds))
        }
        Command::SelectAll => {
            if let Some(el) = model.focused_element_mut() {
                el.select_all();
            }
            CommandOutcome::consumed(None)
        }
        Command::NewScene => {
            let index = model.screenplay.add_scene(Some(scene_idx));
            model.focus(index, 0);
            CommandOutcome::consumed(Some(Cmd::ScrollTo {
                scene: index,
                element: 0,
            }))
        }
        Command::SaveFile => CommandOutcome::consumed(file::update_file(model, FileMsg::Save)),
        Command::SaveFileAs => {
            CommandOutcome::consumed(file::update_file(model, FileMsg::SaveAs))
        }
        Command::OpenFile => CommandOutcome::consumed(file::update_file(model, FileMsg::Open)),
        Command::Unbound => CommandOutcome::done(None),
    }
}

/// Run `f` on the active scene with the screenplay's registries
fn with_scene<T>(
    model: &mut AppModel,
    f: impl FnOnce(&mut crate::model::Scene, &mut crate::model::Registries) -> T,
) -> Option<T> {
    let active = model.active_scene;
    let (scene, registries) = model.screenplay.scene_and_registries(active)?;
    Some(f(scene, registries))
}

/// Focus the next or previous element of the active scene, if any
fn move_focus(model: &mut AppModel, forward: bool) {
    let Some((scene, element)) = model.focus_position() else {
        return;
    };
    let target = if forward {
        Some(element + 1)
    } else {
        element.checked_sub(1)
    };
    if let Some(target) = target {
        model.focus(scene, target);
    }
}

/// Built-in handling for keys no command claimed
fn default_key(model: &mut AppModel, stroke: Keystroke) {
    let mods = stroke.mods;
    match stroke.key {
        KeyCode::Char(c) if mods.is_typing() => {
            let ch = if mods.shift() {
                c.to_uppercase().collect::<String>()
            } else {
                c.to_string()
            };
            let changed = model
                .focused_element_mut()
                .is_some_and(|el| el.type_text(&ch));
            if changed {
                model.refresh_focused_suggestions();
            }
        }
        KeyCode::Backspace | KeyCode::Delete => {
            let changed = model.focused_element_mut().is_some_and(|el| {
                if stroke.key == KeyCode::Backspace {
                    el.delete_backward()
                } else {
                    el.delete_forward()
                }
            });
            if changed {
                model.refresh_focused_suggestions();
            } else {
                tracing::trace!("{} had nothing to delete", stroke);
            }
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End => {
            if let Some(el) = model.focused_element_mut() {
                let range = el.content_range();
                let cursor = el.cursor();
                let target = match stroke.key {
                    KeyCode::Left => cursor.saturating_sub(1),
                    KeyCode::Right => cursor + 1,
                    KeyCode::Home => range.start,
                    _ => range.end,
                };
                if mods.shift() {
                    let anchor = el.selection().anchor;
                    el.set_selection(anchor, target);
                } else {
                    el.set_cursor(target);
                }
            }
        }
        KeyCode::Up | KeyCode::Down => move_focus(model, stroke.key == KeyCode::Down),
        _ => tracing::trace!("Ignored key {}", stroke),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::Modifiers;
    use crate::model::ElementKind;

    fn type_str(model: &mut AppModel, text: &str) {
        for c in text.chars() {
            update_key(model, Keystroke::key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_uses_default_handling() {
        let mut model = AppModel::default();
        type_str(&mut model, "int. house");
        let el = model.focused_element().unwrap();
        assert_eq!(el.raw_text(), "int. house");
        assert_eq!(el.display_text(), "INT. HOUSE");
    }

    #[test]
    fn test_enter_scrolls_to_inserted_element() {
        let mut model = AppModel::default();
        type_str(&mut model, "int. house");
        let cmd = update_key(&mut model, Keystroke::key(KeyCode::Enter));
        assert_eq!(
            cmd,
            Some(Cmd::ScrollTo {
                scene: 0,
                element: 1
            })
        );
        assert_eq!(
            model.focused_element().map(|e| e.kind()),
            Some(ElementKind::Action)
        );
    }

    #[test]
    fn test_alt_letter_does_not_type() {
        let mut model = AppModel::default();
        update_key(&mut model, Keystroke::new(KeyCode::Char('q'), Modifiers::ALT));
        assert_eq!(model.focused_element().unwrap().raw_text(), "");
    }

    #[test]
    fn test_shift_letter_types_uppercase() {
        let mut model = AppModel::default();
        update_key(
            &mut model,
            Keystroke::new(KeyCode::Char('a'), Modifiers::SHIFT),
        );
        assert_eq!(model.focused_element().unwrap().raw_text(), "A");
    }

    #[test]
    fn test_backspace_in_text_deletes_char_only() {
        let mut model = AppModel::default();
        type_str(&mut model, "ab");
        update_key(&mut model, Keystroke::key(KeyCode::Backspace));
        assert_eq!(model.focused_element().unwrap().raw_text(), "a");
        assert_eq!(model.active_scene().unwrap().len(), 1);
    }

    #[test]
    fn test_backspace_at_start_removes_without_deleting_more() {
        let mut model = AppModel::default();
        type_str(&mut model, "int. house");
        update_key(&mut model, Keystroke::key(KeyCode::Enter));
        assert_eq!(model.focus_position(), Some((0, 1)));

        update_key(&mut model, Keystroke::key(KeyCode::Backspace));
        let scene = model.active_scene().unwrap();
        assert_eq!(scene.len(), 1);
        // focus clamps back onto the heading, whose text is untouched
        assert_eq!(model.focused_element().unwrap().raw_text(), "int. house");
    }

    #[test]
    fn test_arrow_keys_move_and_select() {
        let mut model = AppModel::default();
        type_str(&mut model, "abc");
        update_key(&mut model, Keystroke::key(KeyCode::Home));
        assert_eq!(model.focused_element().unwrap().cursor(), 0);
        update_key(&mut model, Keystroke::new(KeyCode::Right, Modifiers::SHIFT));
        update_key(&mut model, Keystroke::new(KeyCode::Right, Modifiers::SHIFT));
        assert_eq!(model.focused_element().unwrap().raw_selection_text(), "ab");
    }

    #[test]
    fn test_up_down_move_focus_without_suggestions() {
        let mut model = AppModel::default();
        update_key(&mut model, Keystroke::key(KeyCode::Enter));
        assert_eq!(
            model.focused_element().map(|e| e.kind()),
            Some(ElementKind::Action)
        );
        update_key(&mut model, Keystroke::key(KeyCode::Up));
        assert_eq!(model.focus_position(), Some((0, 0)));
        update_key(&mut model, Keystroke::key(KeyCode::Down));
        assert_eq!(model.focus_position(), Some((0, 1)));
        update_key(&mut model, Keystroke::key(KeyCode::Down));
        assert_eq!(model.focus_position(), Some((0, 1)));
    }

    #[test]
    fn test_execute_select_all_then_cut() {
        let mut model = AppModel::default();
        type_str(&mut model, "Exterior");
        execute_command(&mut model, Command::SelectAll);
        let cmd = execute_command(&mut model, Command::Cut);
        assert_eq!(cmd, Some(Cmd::SetClipboard("Exterior".to_string())));
        assert_eq!(model.focused_element().unwrap().raw_text(), "");
    }

    #[test]
    fn test_copy_without_selection_is_silent() {
        let mut model = AppModel::default();
        type_str(&mut model, "abc");
        assert_eq!(execute_command(&mut model, Command::Copy), None);
    }
}
