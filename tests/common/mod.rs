//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use intercut::config::EditorConfig;
use intercut::keymap::{KeyCode, Keystroke, Keymap, Modifiers};
use intercut::messages::Msg;
use intercut::model::{AppModel, Element, ElementKind, Scene, Screenplay};
use intercut::update::update;

/// A model holding one scene made of `parts`, focused on the first element
pub fn test_model(parts: &[(ElementKind, &str)]) -> AppModel {
    let scene = Scene::with_elements(
        parts
            .iter()
            .map(|(kind, text)| Element::with_text(*kind, text))
            .collect(),
    );
    AppModel::new(
        Screenplay::with_scenes(vec![scene]),
        EditorConfig::default(),
        Keymap::default(),
    )
}

/// A fresh model: one scene with an empty heading
pub fn empty_model() -> AppModel {
    AppModel::default()
}

pub fn press(model: &mut AppModel, key: KeyCode) {
    update(model, Msg::Key(Keystroke::key(key)));
}

pub fn press_with(model: &mut AppModel, key: KeyCode, mods: Modifiers) {
    update(model, Msg::Key(Keystroke::new(key, mods)));
}

/// Type `text` one keystroke at a time
pub fn type_keys(model: &mut AppModel, text: &str) {
    for c in text.chars() {
        press(model, KeyCode::Char(c));
    }
}

/// Kinds of the active scene's elements, in order
pub fn kinds(model: &AppModel) -> Vec<ElementKind> {
    model
        .active_scene()
        .map(|scene| scene.elements().iter().map(Element::kind).collect())
        .unwrap_or_default()
}

/// Raw texts of the active scene's elements, in order
pub fn raw_texts(model: &AppModel) -> Vec<String> {
    model
        .active_scene()
        .map(|scene| {
            scene
                .elements()
                .iter()
                .map(|el| el.raw_text().to_string())
                .collect()
        })
        .unwrap_or_default()
}

pub fn focused_kind(model: &AppModel) -> Option<ElementKind> {
    model.focused_element().map(Element::kind)
}

/// Every element's index matches its position
pub fn assert_dense_indices(model: &AppModel) {
    for scene in model.screenplay.scenes() {
        for (i, el) in scene.elements().iter().enumerate() {
            assert_eq!(el.index(), i, "element {} of scene {}", i, scene.index);
        }
    }
}
