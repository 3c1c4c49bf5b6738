//! Application model - the complete state of the editing session
//!
//! Follows the Elm Architecture: `update` is the only place that mutates an
//! [`AppModel`].

pub mod element;
pub mod scene;
pub mod screenplay;
pub mod suggest;

pub use element::{Element, ElementKind, Transition};
pub use scene::{DragPoint, DragSelection, Scene, DEFAULT_SCENE_COLOR};
pub use screenplay::{Registries, Registry, Screenplay};
pub use suggest::{SuggestionSource, SuggestionState};

use std::rc::Rc;

use crate::config::EditorConfig;
use crate::keymap::Keymap;

/// The complete session state
#[derive(Debug, Clone)]
pub struct AppModel {
    /// The document being edited
    pub screenplay: Screenplay,
    /// Per-kind shortcut tables, built once and shared
    pub keymap: Rc<Keymap>,
    /// Persisted editor configuration
    pub config: EditorConfig,
    /// Index of the scene holding keyboard focus
    pub active_scene: usize,
    /// Last status or error message for the host to show
    pub status: Option<String>,
}

impl AppModel {
    pub fn new(screenplay: Screenplay, config: EditorConfig, keymap: Keymap) -> Self {
        let mut model = Self {
            screenplay: Screenplay::new(),
            keymap: Rc::new(keymap),
            config,
            active_scene: 0,
            status: None,
        };
        model.replace_screenplay(screenplay);
        model
    }

    /// Swap in a whole new document (after load) and focus its start
    pub fn replace_screenplay(&mut self, screenplay: Screenplay) {
        self.screenplay = screenplay;
        self.screenplay.registries.show_all_on_empty = !self.config.clear_suggestions_on_empty;
        if self.screenplay.scenes().is_empty() {
            self.screenplay.add_scene(None);
        }
        self.active_scene = 0;
        self.ensure_focus();
    }

    pub fn active_scene(&self) -> Option<&Scene> {
        self.screenplay.scene(self.active_scene)
    }

    pub fn active_scene_mut(&mut self) -> Option<&mut Scene> {
        self.screenplay.scene_mut(self.active_scene)
    }

    pub fn focused_element(&self) -> Option<&Element> {
        self.active_scene().and_then(Scene::focused)
    }

    pub fn focused_element_mut(&mut self) -> Option<&mut Element> {
        self.active_scene_mut().and_then(Scene::focused_mut)
    }

    /// Scene and element index of the focused element
    pub fn focus_position(&self) -> Option<(usize, usize)> {
        let element = self.active_scene()?.focused_index()?;
        Some((self.active_scene, element))
    }

    /// Move keyboard focus. Returns false for an invalid position.
    pub fn focus(&mut self, scene: usize, element: usize) -> bool {
        let Some(target) = self.screenplay.scene_mut(scene) else {
            return false;
        };
        if !target.set_focus(element) {
            return false;
        }
        if scene != self.active_scene {
            if let Some(previous) = self.active_scene_mut() {
                previous.clear_selection();
            }
            self.active_scene = scene;
        }
        true
    }

    /// Keep the session focusable: an emptied scene gets a placeholder
    /// action, and a scene without focus focuses its first element.
    pub fn ensure_focus(&mut self) {
        if self.active_scene >= self.screenplay.scenes().len() {
            self.active_scene = self.screenplay.scenes().len().saturating_sub(1);
        }
        let Some((scene, registries)) = self.screenplay.scene_and_registries(self.active_scene)
        else {
            return;
        };
        if scene.is_empty() {
            tracing::debug!("Scene {} emptied, inserting placeholder", scene.index);
            scene.insert_element(None, Element::new(ElementKind::Action), registries);
        } else if scene.focused_index().is_none() {
            scene.set_focus(0);
        }
    }

    /// Re-run suggestions for the focused element after its text changed
    pub fn refresh_focused_suggestions(&mut self) {
        let active = self.active_scene;
        if let Some((scene, registries)) = self.screenplay.scene_and_registries(active) {
            if let Some(element) = scene.focused_mut() {
                element.refresh_suggestions(registries);
            }
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(Screenplay::new(), EditorConfig::default(), Keymap::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_model_focuses_heading() {
        let model = AppModel::default();
        assert_eq!(model.focus_position(), Some((0, 0)));
        assert_eq!(
            model.focused_element().map(Element::kind),
            Some(ElementKind::SceneHeading)
        );
    }

    #[test]
    fn test_empty_screenplay_gets_scene() {
        let model = AppModel::new(
            Screenplay::with_scenes(vec![]),
            EditorConfig::default(),
            Keymap::default(),
        );
        assert_eq!(model.screenplay.scenes().len(), 1);
        assert!(model.focused_element().is_some());
    }

    #[test]
    fn test_empty_scene_gets_placeholder() {
        let model = AppModel::new(
            Screenplay::with_scenes(vec![Scene::new()]),
            EditorConfig::default(),
            Keymap::default(),
        );
        assert_eq!(
            model.focused_element().map(Element::kind),
            Some(ElementKind::Action)
        );
    }

    #[test]
    fn test_focus_other_scene() {
        let mut model = AppModel::default();
        model.screenplay.add_scene(Some(0));
        assert!(model.focus(1, 0));
        assert_eq!(model.active_scene, 1);
        assert!(!model.focus(1, 3));
        assert!(!model.focus(4, 0));
        assert_eq!(model.active_scene, 1);
    }

    #[test]
    fn test_config_controls_empty_suggestions() {
        let config = EditorConfig {
            clear_suggestions_on_empty: false,
            ..EditorConfig::default()
        };
        let model = AppModel::new(Screenplay::new(), config, Keymap::default());
        assert!(model.screenplay.registries.show_all_on_empty);
    }
}
