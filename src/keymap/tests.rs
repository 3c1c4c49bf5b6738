//! Integration tests for the keymap system

use super::*;
use crate::model::ElementKind;

#[test]
fn test_embedded_yaml_parses() {
    let bindings = parse_keymap_yaml(get_default_keymap_yaml())
        .expect("Embedded keymap.yaml should parse successfully");

    assert!(!bindings.is_empty(), "Should have bindings");
    assert!(bindings.iter().any(|b| b.command == Command::NextElement));
    assert!(bindings.iter().any(|b| b.command == Command::SaveFile));
    assert!(bindings.iter().any(|b| b.command == Command::Copy));
}

#[test]
fn test_embedded_yaml_matches_hardcoded_defaults() {
    let embedded = parse_keymap_yaml(get_default_keymap_yaml()).unwrap();
    let hardcoded = default_bindings();
    assert_eq!(embedded.len(), hardcoded.len());
    for binding in &hardcoded {
        assert!(
            embedded.contains(binding),
            "{} -> {:?} missing from keymap.yaml",
            binding.keystroke,
            binding.command
        );
    }
}

#[test]
fn test_load_default_keymap() {
    let bindings = load_default_keymap();
    assert!(!bindings.is_empty(), "Default keymap should not be empty");
}

#[test]
fn test_backspace_lets_default_through() {
    let keymap = Keymap::with_bindings(&default_bindings());
    let backspace = Keystroke::key(KeyCode::Backspace);

    for kind in ElementKind::ALL {
        let mut ran = None;
        let run_default = keymap.for_kind(kind).dispatch(&backspace, |c| ran = Some(c));
        assert!(run_default);
        assert_eq!(ran, Some(Command::RemoveAtStart));
    }
}

#[test]
fn test_modified_backspace_takes_precedence() {
    let keymap = Keymap::with_bindings(&default_bindings());
    let ctrl_backspace = Keystroke::new(KeyCode::Backspace, Modifiers::CTRL);

    let mut ran = None;
    let run_default = keymap
        .for_kind(ElementKind::Dialogue)
        .dispatch(&ctrl_backspace, |c| ran = Some(c));
    assert!(!run_default);
    assert_eq!(ran, Some(Command::DeleteWordLeft));
}

#[test]
fn test_plain_keys_fall_through() {
    let keymap = Keymap::with_bindings(&default_bindings());
    let registry = keymap.for_kind(ElementKind::Action);

    for stroke in [
        Keystroke::key(KeyCode::Char('a')),
        Keystroke::key(KeyCode::Left),
        Keystroke::key(KeyCode::Down),
        Keystroke::new(KeyCode::Backspace, Modifiers::SHIFT),
    ] {
        let mut ran = false;
        assert!(registry.dispatch(&stroke, |_| ran = true));
        assert!(!ran, "{} should not be bound for Action", stroke);
    }
}

#[test]
fn test_suggestion_navigation_per_kind() {
    let keymap = Keymap::with_bindings(&default_bindings());
    let down = Keystroke::key(KeyCode::Down);

    assert_eq!(
        keymap
            .for_kind(ElementKind::Character)
            .lookup(&down)
            .map(|s| s.command),
        Some(Command::HighlightNext)
    );
    assert!(keymap.for_kind(ElementKind::Dialogue).lookup(&down).is_none());
}

#[test]
fn test_save_shortcut_display() {
    let keymap = Keymap::with_bindings(&default_bindings());
    let stroke = keymap
        .for_kind(ElementKind::Action)
        .keystroke_for(Command::SaveFile)
        .unwrap();
    let shown = stroke.to_string();
    assert!(shown.ends_with("+s"), "{}", shown);
    assert_eq!(parse_key_string(&shown).unwrap(), stroke);
}

#[test]
fn test_user_keymap_file_merges() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    std::fs::write(
        &path,
        "bindings:\n  - key: enter\n    command: Unbound\n    kind: Dialogue\n",
    )
    .unwrap();

    let merged = merge_user_keymap(default_bindings(), &path);
    let keymap = Keymap::with_bindings(&merged);
    let enter = Keystroke::key(KeyCode::Enter);

    assert!(keymap.for_kind(ElementKind::Dialogue).lookup(&enter).is_none());
    assert!(keymap.for_kind(ElementKind::Action).lookup(&enter).is_some());
}

#[test]
fn test_broken_user_keymap_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    std::fs::write(&path, "bindings: [").unwrap();

    let merged = merge_user_keymap(default_bindings(), &path);
    assert_eq!(merged, default_bindings());
}
