//! Save/load round-trips through the filesystem and the runtime

mod common;

use std::fs;

use common::{raw_texts, test_model, type_keys};
use intercut::document::{DocumentError, ScreenplayDocument};
use intercut::messages::{FileMsg, Msg};
use intercut::model::ElementKind::*;
use intercut::model::{Element, Scene, Screenplay};
use intercut::runtime::{HeadlessHost, Runtime};
use intercut::AppModel;
use tempfile::TempDir;

fn sample_screenplay() -> Screenplay {
    let first = Scene::with_elements(vec![
        Element::with_text(SceneHeading, "int. diner - night"),
        Element::with_text(Action, "Neon hums."),
        Element::with_text(Character, "Mae"),
        Element::with_text(Parenthetical, "tired"),
        Element::with_text(Dialogue, "Last call."),
    ]);
    let mut second = Scene::with_elements(vec![Element::with_text(SceneHeading, "ext. lot")]);
    second.title = "Parking lot".into();
    second.notes = "Keep it short".into();
    second.color = [0.2, 0.4, 0.6, 1.0];
    second.plot_point = "Midpoint".into();

    let mut screenplay = Screenplay::with_scenes(vec![first, second]);
    screenplay.title = "Night Shift".into();
    screenplay.author = "A. Writer".into();
    screenplay.version = 2;
    screenplay.register_character("Mae");
    screenplay.register_location("INT. DINER - NIGHT");
    screenplay
}

fn assert_same_content(a: &Screenplay, b: &Screenplay) {
    assert_eq!(a.scenes().len(), b.scenes().len());
    for (sa, sb) in a.scenes().iter().zip(b.scenes()) {
        assert_eq!(sa.title, sb.title);
        assert_eq!(sa.notes, sb.notes);
        assert_eq!(sa.color, sb.color);
        assert_eq!(sa.plot_point, sb.plot_point);
        assert_eq!(sa.len(), sb.len());
        for (ea, eb) in sa.elements().iter().zip(sb.elements()) {
            assert_eq!(ea.kind(), eb.kind());
            assert_eq!(ea.raw_text(), eb.raw_text());
            assert_eq!(ea.display_text(), eb.display_text());
        }
    }
    assert_eq!(a.characters(), b.characters());
    assert_eq!(a.locations(), b.locations());
    assert_eq!(a.title, b.title);
    assert_eq!(a.version, b.version);
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("night.json");
    let original = sample_screenplay();

    original.save(&path).unwrap();
    let loaded = Screenplay::load(&path).unwrap();

    assert_same_content(&original, &loaded);
    assert_eq!(loaded.save_to.as_deref(), Some(path.as_path()));
}

#[test]
fn test_yaml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("night.yaml");
    let original = sample_screenplay();

    original.save(&path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("type: Parenthetical"));
    assert!(content.contains("raw_text: tired"));

    assert_same_content(&original, &Screenplay::load(&path).unwrap());
}

#[test]
fn test_saved_file_holds_raw_text_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("raw.json");
    sample_screenplay().save(&path).unwrap();

    let doc = ScreenplayDocument::load(&path).unwrap();
    let texts: Vec<&str> = doc.scenes[0]
        .elements
        .iter()
        .map(|e| e.raw_text.as_str())
        .collect();
    assert_eq!(
        texts,
        vec!["int. diner - night", "Neon hums.", "Mae", "tired", "Last call."]
    );
}

#[test]
fn test_unknown_type_keeps_previous_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{"scenes": [{"elements": [
            {"type": "Action", "raw_text": "fine"},
            {"type": "Transition", "raw_text": "CUT TO:"}
        ]}]}"#,
    )
    .unwrap();

    assert!(matches!(
        Screenplay::load(&path),
        Err(DocumentError::UnknownElementType { scene: 0, element: 1, .. })
    ));

    let mut runtime = Runtime::new(test_model(&[(Action, "current")]), HeadlessHost::default());
    runtime.dispatch(Msg::File(FileMsg::Load(path)));
    assert_eq!(raw_texts(runtime.model()), vec!["current"]);
    let status = runtime.model().status.clone().unwrap();
    assert!(status.contains("Transition"), "{}", status);
}

#[test]
fn test_failed_save_leaves_state_alone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no_such_dir").join("out.json");

    let mut runtime = Runtime::new(AppModel::default(), HeadlessHost::default());
    type_keys_runtime(&mut runtime, "int. office");
    runtime.dispatch(Msg::File(FileMsg::SaveTo(path.clone())));

    assert!(!path.exists());
    assert_eq!(runtime.model().screenplay.save_to, None);
    assert_eq!(raw_texts(runtime.model()), vec!["int. office"]);
    assert!(runtime.model().status.is_some());
}

#[test]
fn test_save_then_save_again_reuses_location() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("draft.yml");

    let host = HeadlessHost {
        save_path: Some(path.clone()),
        ..HeadlessHost::default()
    };
    let mut runtime = Runtime::new(AppModel::default(), host);
    runtime.dispatch(Msg::File(FileMsg::Save));
    assert_eq!(runtime.model().screenplay.save_to.as_deref(), Some(path.as_path()));

    // The dialog would now answer elsewhere; a plain save must not ask
    runtime.host_mut().save_path = Some(dir.path().join("other.yml"));
    type_keys_runtime(&mut runtime, "ext. roof");
    runtime.dispatch(Msg::File(FileMsg::Save));

    assert!(!dir.path().join("other.yml").exists());
    let loaded = Screenplay::load(&path).unwrap();
    assert_eq!(loaded.scenes()[0].elements()[0].raw_text(), "ext. roof");
}

#[test]
fn test_load_replaces_registries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("night.json");
    sample_screenplay().save(&path).unwrap();

    let mut model = test_model(&[(Character, "")]);
    type_keys(&mut model, "zed");
    model.screenplay.register_character("Zed");

    let mut runtime = Runtime::new(model, HeadlessHost::default());
    runtime.dispatch(Msg::File(FileMsg::Load(path)));
    assert_eq!(runtime.model().screenplay.characters(), ["Mae".to_string()]);
    assert_eq!(runtime.model().focus_position(), Some((0, 0)));
}

fn type_keys_runtime(runtime: &mut Runtime<HeadlessHost>, text: &str) {
    use intercut::keymap::{KeyCode, Keystroke};
    for c in text.chars() {
        runtime.dispatch(Msg::Key(Keystroke::key(KeyCode::Char(c))));
    }
}
