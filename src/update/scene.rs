//! Scene message handlers: pointer drags and scene structure

use crate::commands::Cmd;
use crate::messages::SceneMsg;
use crate::model::AppModel;

pub fn update_scene(model: &mut AppModel, msg: SceneMsg) -> Option<Cmd> {
    match msg {
        SceneMsg::DragStart { element, offset } => {
            if let Some(scene) = model.active_scene_mut() {
                scene.drag_start(element, offset);
            }
            None
        }
        SceneMsg::DragMove { element, offset } => {
            if let Some(scene) = model.active_scene_mut() {
                scene.drag_move(element, offset);
            }
            None
        }
        SceneMsg::DragEnd => {
            if let Some(scene) = model.active_scene_mut() {
                scene.drag_end();
            }
            None
        }
        SceneMsg::AddScene => {
            let index = model.screenplay.add_scene(Some(model.active_scene));
            model.focus(index, 0);
            Some(Cmd::ScrollTo {
                scene: index,
                element: 0,
            })
        }
        SceneMsg::RemoveScene(index) => {
            model.screenplay.remove_scene(index)?;
            if model.screenplay.scenes().is_empty() {
                model.screenplay.add_scene(None);
            }
            if index < model.active_scene {
                model.active_scene -= 1;
            } else if model.active_scene >= model.screenplay.scenes().len() {
                model.active_scene = model.screenplay.scenes().len() - 1;
            }
            model.ensure_focus();
            let (scene, element) = model.focus_position()?;
            Some(Cmd::ScrollTo { scene, element })
        }
    }
}
