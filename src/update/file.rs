//! Load/save flow
//!
//! Update only decides what should happen; the runtime performs the dialog
//! or disk access and reports back with `Saved`, `Loaded` or `Failed`.

use std::path::PathBuf;

use crate::commands::Cmd;
use crate::messages::FileMsg;
use crate::model::AppModel;

pub fn update_file(model: &mut AppModel, msg: FileMsg) -> Option<Cmd> {
    match msg {
        FileMsg::Save => match model.screenplay.save_to.clone() {
            Some(path) => Some(save_cmd(model, path)),
            None => Some(Cmd::ShowSaveDialog {
                default_path: model.config.dialog_path(None),
            }),
        },
        FileMsg::SaveAs => Some(Cmd::ShowSaveDialog {
            default_path: model
                .config
                .dialog_path(model.screenplay.save_to.as_deref()),
        }),
        FileMsg::Open => Some(Cmd::ShowOpenDialog {
            default_path: model
                .config
                .dialog_path(model.screenplay.save_to.as_deref()),
        }),
        FileMsg::SaveTo(path) => Some(save_cmd(model, path)),
        FileMsg::Load(path) => Some(Cmd::LoadFile { path }),
        FileMsg::Saved(path) => {
            model.set_status(format!("Saved {}", path.display()));
            model.screenplay.save_to = Some(path);
            None
        }
        FileMsg::Loaded { path, screenplay } => {
            let mut screenplay = *screenplay;
            screenplay.save_to = Some(path.clone());
            model.replace_screenplay(screenplay);
            model.set_status(format!("Opened {}", path.display()));
            Some(Cmd::ScrollTo {
                scene: 0,
                element: 0,
            })
        }
        FileMsg::Failed(reason) => {
            tracing::warn!("File operation failed: {}", reason);
            model.set_status(reason);
            None
        }
        FileMsg::DialogCancelled => {
            tracing::trace!("File dialog cancelled");
            None
        }
    }
}

/// Snapshot the screenplay for writing to `path`
fn save_cmd(model: &AppModel, path: PathBuf) -> Cmd {
    let mut document = model.screenplay.to_document();
    document.save_to = path.display().to_string();
    Cmd::SaveFile { path, document }
}
