//! Runtime - performs commands against the host
//!
//! The editing core never touches the disk, a dialog or a widget directly.
//! [`Runtime`] feeds messages through [`update`], carries out the returned
//! [`Cmd`]s through the host traits below, and feeds their results back in
//! until the queue is empty. File access is synchronous; documents are small.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::commands::Cmd;
use crate::messages::{FileMsg, Msg};
use crate::model::{AppModel, Screenplay};
use crate::update::update;

/// File-selection dialog. `None` means the user cancelled.
pub trait FileDialog {
    fn open_for_save(&mut self, default_path: Option<&Path>) -> Option<PathBuf>;
    fn open_for_load(&mut self, default_path: Option<&Path>) -> Option<PathBuf>;
}

/// The focusable text control showing one element
pub trait ElementWidget {
    fn set_displayed_text(&mut self, text: &str);
    fn set_cursor(&mut self, offset: usize);
    fn set_selection(&mut self, anchor: usize, head: usize);
}

/// Vertical layout of scenes and their element widgets
pub trait Container {
    fn scroll_to(&mut self, scene: usize, element: usize);
    fn widget(&mut self, scene: usize, element: usize) -> Option<&mut dyn ElementWidget>;
}

pub trait Clipboard {
    fn set_text(&mut self, text: String);
}

/// Everything the runtime needs from the host
pub trait Host: FileDialog + Container + Clipboard {}

impl<T: FileDialog + Container + Clipboard> Host for T {}

pub struct Runtime<H: Host> {
    model: AppModel,
    host: H,
}

impl<H: Host> Runtime<H> {
    pub fn new(model: AppModel, host: H) -> Self {
        let mut runtime = Self { model, host };
        runtime.sync_focused_widget();
        runtime
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_parts(self) -> (AppModel, H) {
        (self.model, self.host)
    }

    /// Process `msg` and every message its commands produce
    pub fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            if let Some(cmd) = update(&mut self.model, msg) {
                self.process_cmd(cmd, &mut queue);
            }
        }
        self.sync_focused_widget();
    }

    fn process_cmd(&mut self, cmd: Cmd, queue: &mut VecDeque<Msg>) {
        match cmd {
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd, queue);
                }
            }
            Cmd::ScrollTo { scene, element } => self.host.scroll_to(scene, element),
            Cmd::SetClipboard(text) => self.host.set_text(text),
            Cmd::SaveFile { path, document } => {
                let msg = match document.save(&path) {
                    Ok(()) => {
                        tracing::info!("Saved {}", path.display());
                        FileMsg::Saved(path)
                    }
                    Err(e) => FileMsg::Failed(e.user_message()),
                };
                queue.push_back(Msg::File(msg));
            }
            Cmd::LoadFile { path } => {
                let msg = match Screenplay::load(&path) {
                    Ok(screenplay) => FileMsg::Loaded {
                        path,
                        screenplay: Box::new(screenplay),
                    },
                    Err(e) => FileMsg::Failed(e.user_message()),
                };
                queue.push_back(Msg::File(msg));
            }
            Cmd::ShowSaveDialog { default_path } => {
                let msg = match self.host.open_for_save(default_path.as_deref()) {
                    Some(path) => FileMsg::SaveTo(path),
                    None => FileMsg::DialogCancelled,
                };
                queue.push_back(Msg::File(msg));
            }
            Cmd::ShowOpenDialog { default_path } => {
                let msg = match self.host.open_for_load(default_path.as_deref()) {
                    Some(path) => FileMsg::Load(path),
                    None => FileMsg::DialogCancelled,
                };
                queue.push_back(Msg::File(msg));
            }
        }
    }

    /// Push the focused element's display state into its widget
    fn sync_focused_widget(&mut self) {
        let Some((scene, element)) = self.model.focus_position() else {
            return;
        };
        let Some(el) = self.model.focused_element() else {
            return;
        };
        let Some(widget) = self.host.widget(scene, element) else {
            tracing::trace!("No widget for {}:{}", scene, element);
            return;
        };
        let selection = el.selection();
        widget.set_displayed_text(el.display_text());
        if selection.is_empty() {
            widget.set_cursor(selection.head);
        } else {
            widget.set_selection(selection.anchor, selection.head);
        }
    }
}

/// Widget state mirrored in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorWidget {
    pub displayed: String,
    pub anchor: usize,
    pub head: usize,
}

impl ElementWidget for MirrorWidget {
    fn set_displayed_text(&mut self, text: &str) {
        self.displayed = text.to_string();
    }

    fn set_cursor(&mut self, offset: usize) {
        self.anchor = offset;
        self.head = offset;
    }

    fn set_selection(&mut self, anchor: usize, head: usize) {
        self.anchor = anchor;
        self.head = head;
    }
}

/// A host without a screen, used by the command-line front end and tests.
///
/// Dialogs answer with preset paths, and the focused element is mirrored
/// into a single [`MirrorWidget`].
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    pub save_path: Option<PathBuf>,
    pub load_path: Option<PathBuf>,
    pub clipboard: Option<String>,
    pub scrolled_to: Option<(usize, usize)>,
    pub focused: Option<(usize, usize)>,
    pub widget: MirrorWidget,
}

impl FileDialog for HeadlessHost {
    fn open_for_save(&mut self, _default_path: Option<&Path>) -> Option<PathBuf> {
        self.save_path.clone()
    }

    fn open_for_load(&mut self, _default_path: Option<&Path>) -> Option<PathBuf> {
        self.load_path.clone()
    }
}

impl Container for HeadlessHost {
    fn scroll_to(&mut self, scene: usize, element: usize) {
        self.scrolled_to = Some((scene, element));
    }

    fn widget(&mut self, scene: usize, element: usize) -> Option<&mut dyn ElementWidget> {
        self.focused = Some((scene, element));
        Some(&mut self.widget)
    }
}

impl Clipboard for HeadlessHost {
    fn set_text(&mut self, text: String) {
        self.clipboard = Some(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{KeyCode, Keystroke, Modifiers};
    use crate::messages::ElementMsg;
    use crate::model::ElementKind;

    fn runtime() -> Runtime<HeadlessHost> {
        Runtime::new(AppModel::default(), HeadlessHost::default())
    }

    #[test]
    fn test_widget_follows_typing() {
        let mut rt = runtime();
        rt.dispatch(Msg::Element(ElementMsg::InsertText("ext. dock".into())));
        assert_eq!(rt.host().widget.displayed, "EXT. DOCK");
        assert_eq!(rt.host().widget.head, 9);
    }

    #[test]
    fn test_enter_scrolls_to_new_element() {
        let mut rt = runtime();
        rt.dispatch(Msg::Key(Keystroke::key(KeyCode::Enter)));
        assert_eq!(rt.host().scrolled_to, Some((0, 1)));
        assert_eq!(rt.host().focused, Some((0, 1)));
        assert_eq!(
            rt.model().focused_element().map(|e| e.kind()),
            Some(ElementKind::Action)
        );
    }

    #[test]
    fn test_deleted_paren_is_restored_in_widget() {
        use crate::config::EditorConfig;
        use crate::keymap::Keymap;
        use crate::model::{Element, Scene, Screenplay};

        let scene = Scene::with_elements(vec![Element::with_text(
            ElementKind::Parenthetical,
            "softly",
        )]);
        let model = AppModel::new(
            Screenplay::with_scenes(vec![scene]),
            EditorConfig::default(),
            Keymap::default(),
        );
        let mut rt = Runtime::new(model, HeadlessHost::default());
        rt.dispatch(Msg::Element(ElementMsg::DisplayedTextChanged(
            "(softly".into(),
        )));

        assert_eq!(rt.host().widget.displayed, "(softly)");
        assert_eq!(
            rt.model().focused_element().map(|e| e.raw_text()),
            Some("softly")
        );
    }

    #[test]
    fn test_copy_reaches_clipboard() {
        let mut rt = runtime();
        rt.dispatch(Msg::Element(ElementMsg::InsertText("int. lab".into())));
        rt.dispatch(Msg::Element(ElementMsg::SetSelection { anchor: 5, head: 8 }));
        rt.dispatch(Msg::Key(Keystroke::new(KeyCode::Char('c'), Modifiers::cmd())));
        assert_eq!(rt.host().clipboard.as_deref(), Some("lab"));
        assert_eq!((rt.host().widget.anchor, rt.host().widget.head), (5, 8));
    }

    #[test]
    fn test_cancelled_save_dialog_changes_nothing() {
        let mut rt = runtime();
        rt.dispatch(Msg::File(FileMsg::Save));
        assert_eq!(rt.model().screenplay.save_to, None);
        assert_eq!(rt.model().status, None);
    }

    #[test]
    fn test_save_then_open_through_dialogs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");

        let mut rt = runtime();
        rt.host_mut().save_path = Some(path.clone());
        rt.dispatch(Msg::Element(ElementMsg::InsertText("int. hall".into())));
        rt.dispatch(Msg::File(FileMsg::Save));
        assert_eq!(rt.model().screenplay.save_to, Some(path.clone()));
        assert!(path.exists());

        let mut other = runtime();
        other.host_mut().load_path = Some(path.clone());
        other.dispatch(Msg::File(FileMsg::Open));
        assert_eq!(
            other.model().focused_element().map(|e| e.raw_text()),
            Some("int. hall")
        );
        assert_eq!(other.host().widget.displayed, "INT. HALL");
    }

    #[test]
    fn test_load_failure_keeps_document_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let mut rt = runtime();
        rt.dispatch(Msg::Element(ElementMsg::InsertText("int. cave".into())));
        rt.dispatch(Msg::File(FileMsg::Load(path)));
        assert_eq!(
            rt.model().focused_element().map(|e| e.raw_text()),
            Some("int. cave")
        );
        assert!(rt.model().status.is_some());
    }
}
