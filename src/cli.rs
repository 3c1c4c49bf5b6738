//! Command-line argument parsing for the headless front end
//!
//! Supports:
//! - Creating a new screenplay, optionally saved to a file
//! - Validating a screenplay file
//! - Printing a screenplay as plain text

use clap::Parser;
use std::path::PathBuf;

/// A screenplay editing core
#[derive(Parser, Debug)]
#[command(name = "intercut", version, about = "A screenplay editing core")]
pub struct CliArgs {
    /// Screenplay file (.json, .yaml or .yml)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Create a new screenplay (saved to FILE when given)
    #[arg(short = 'n', long)]
    pub new: bool,

    /// Title for a new screenplay
    #[arg(long, value_name = "TITLE", requires = "new")]
    pub title: Option<String>,

    /// Print the screenplay as plain text
    #[arg(short = 'p', long)]
    pub print: bool,

    /// Wrap width for --print, 0 for none (overrides the config)
    #[arg(long, value_name = "N")]
    pub wrap: Option<usize>,

    /// Validate FILE and report what it contains
    #[arg(short = 'c', long, conflicts_with_all = ["new", "print"])]
    pub check: bool,
}

/// What the binary should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupMode {
    /// Build a fresh screenplay; save it when a path is given, else print it
    Create {
        path: Option<PathBuf>,
        title: Option<String>,
    },
    /// Load and validate a file
    Check(PathBuf),
    /// Load a file and print it
    Print(PathBuf),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub mode: StartupMode,
    /// Wrap width override for printing
    pub wrap: Option<usize>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let mode = if self.new {
            StartupMode::Create {
                path: self.file,
                title: self.title,
            }
        } else {
            let Some(path) = self.file else {
                return Err("No screenplay file given (use --new to start one)".to_string());
            };
            if self.check {
                StartupMode::Check(path)
            } else {
                StartupMode::Print(path)
            }
        };

        Ok(StartupConfig {
            mode,
            wrap: self.wrap,
        })
    }
}
