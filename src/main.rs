//! intercut - headless front end for the screenplay editing core

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;

use intercut::cli::{CliArgs, StartupMode};
use intercut::keymap::{load_default_keymap, Keymap};
use intercut::messages::{FileMsg, Msg};
use intercut::model::{AppModel, Screenplay};
use intercut::runtime::{HeadlessHost, Runtime};
use intercut::EditorConfig;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    intercut::tracing::init();

    let startup = args.into_config().map_err(anyhow::Error::msg)?;
    let config = EditorConfig::load();
    let wrap = startup.wrap.unwrap_or(config.wrap_width);
    let keymap = Keymap::with_bindings(&load_default_keymap());

    match startup.mode {
        StartupMode::Create { path, title } => {
            let mut screenplay = Screenplay::new();
            if let Some(title) = title {
                screenplay.title = title;
            }
            match path {
                Some(path) => {
                    let model = AppModel::new(screenplay, config, keymap);
                    save_new(model, &path)?;
                    println!("Created {}", path.display());
                }
                None => print!("{}", screenplay.render_plain(wrap)),
            }
        }
        StartupMode::Check(path) => {
            let model = open(AppModel::new(Screenplay::new(), config, keymap), &path)?;
            let screenplay = &model.screenplay;
            println!(
                "{}: {} scenes, {} elements, {} characters, {} locations",
                path.display(),
                screenplay.scenes().len(),
                screenplay.element_count(),
                screenplay.characters().len(),
                screenplay.locations().len()
            );
        }
        StartupMode::Print(path) => {
            let model = open(AppModel::new(Screenplay::new(), config, keymap), &path)?;
            print!("{}", model.screenplay.render_plain(wrap));
        }
    }

    Ok(())
}

/// Load `path` through the runtime, failing with the reason it reported
fn open(model: AppModel, path: &Path) -> Result<AppModel> {
    let mut runtime = Runtime::new(model, HeadlessHost::default());
    runtime.dispatch(Msg::File(FileMsg::Load(path.to_path_buf())));
    let (model, _) = runtime.into_parts();
    if model.screenplay.save_to.as_deref() != Some(path) {
        bail!(model
            .status
            .unwrap_or_else(|| format!("Could not open {}", path.display())));
    }
    Ok(model)
}

/// Save a fresh screenplay to `path` through the save dialog flow
fn save_new(model: AppModel, path: &Path) -> Result<()> {
    let host = HeadlessHost {
        save_path: Some(path.to_path_buf()),
        ..HeadlessHost::default()
    };
    let mut runtime = Runtime::new(model, host);
    runtime.dispatch(Msg::File(FileMsg::SaveAs));
    let (model, _) = runtime.into_parts();
    if model.screenplay.save_to.as_deref() != Some(path) {
        let reason = model.status.unwrap_or_default();
        return Err(anyhow::anyhow!(reason))
            .with_context(|| format!("Failed to create {}", path.display()));
    }
    Ok(())
}
