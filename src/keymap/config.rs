//! YAML configuration parsing for keymaps
//!
//! Parses keymap.yaml files into Keybinding structs.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use super::binding::Keybinding;
use super::command::Command;
use super::types::{KeyCode, Keystroke, Modifiers};
use crate::model::ElementKind;

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub command: String,
    /// Restrict to one element kind, e.g. `Character`
    #[serde(default)]
    pub kind: Option<String>,
    /// Let the default key handling run after the command
    #[serde(default)]
    pub passthrough: Option<bool>,
}

/// Load keybindings from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse keybindings from YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let mut bindings = Vec::with_capacity(config.bindings.len());
    for entry in config.bindings {
        let keystroke = parse_key_string(&entry.key)?;
        let command = Command::from_str(&entry.command)
            .map_err(|_| KeymapError::InvalidCommand(entry.command.clone()))?;

        let mut binding = Keybinding::new(keystroke, command);
        if let Some(kind) = entry.kind {
            let kind = ElementKind::from_str(&kind).map_err(|_| KeymapError::InvalidKind(kind))?;
            binding = binding.for_kind(kind);
        }
        if let Some(passthrough) = entry.passthrough {
            binding = binding.passthrough(passthrough);
        }
        bindings.push(binding);
    }

    Ok(bindings)
}

/// Parse a key string like "cmd+shift+s" into a Keystroke
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in key_str.split('+') {
        let part_lower = part.trim().to_lowercase();
        if let Some(modifier) = Modifiers::from_name(&part_lower) {
            mods = mods | modifier;
            continue;
        }
        if key_part.is_some() {
            return Err(KeymapError::InvalidKey(format!(
                "Multiple keys in binding: {}",
                key_str
            )));
        }
        let key = KeyCode::from_name(&part_lower)
            .ok_or_else(|| KeymapError::InvalidKey(format!("Unknown key: {}", part_lower)))?;
        key_part = Some(key);
    }

    let key = key_part
        .ok_or_else(|| KeymapError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    Ok(Keystroke::new(key, mods))
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidCommand(String),
    InvalidKind(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidCommand(c) => write!(f, "Invalid command: {}", c),
            KeymapError::InvalidKind(k) => write!(f, "Invalid element kind: {}", k),
        }
    }
}

impl std::error::Error for KeymapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        assert_eq!(
            parse_key_string("backspace").unwrap(),
            Keystroke::key(KeyCode::Backspace)
        );
        assert_eq!(
            parse_key_string("a").unwrap(),
            Keystroke::key(KeyCode::Char('a'))
        );
    }

    #[test]
    fn test_parse_modifiers() {
        let stroke = parse_key_string("ctrl+delete").unwrap();
        assert_eq!(stroke, Keystroke::new(KeyCode::Delete, Modifiers::CTRL));

        let stroke = parse_key_string("shift+tab").unwrap();
        assert_eq!(stroke, Keystroke::new(KeyCode::Tab, Modifiers::SHIFT));

        let stroke = parse_key_string("cmd+shift+n").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('n'));
        assert!(stroke.mods.shift());
        assert!(stroke.mods.contains(Modifiers::cmd()));
    }

    #[test]
    fn test_parse_invalid_keys() {
        assert!(matches!(
            parse_key_string("ctrl+"),
            Err(KeymapError::InvalidKey(_))
        ));
        assert!(matches!(
            parse_key_string("a+b"),
            Err(KeymapError::InvalidKey(_))
        ));
        assert!(matches!(
            parse_key_string("hyper"),
            Err(KeymapError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_parse_yaml_with_kind_and_passthrough() {
        let yaml = r#"
bindings:
  - key: enter
    command: NextElement
  - key: down
    command: HighlightNext
    kind: Character
  - key: ctrl+backspace
    command: DeleteWordLeft
    passthrough: true
"#;
        let bindings = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings[0].kind, None);
        assert!(bindings[0].suppress_default);
        assert_eq!(bindings[1].kind, Some(ElementKind::Character));
        assert!(!bindings[2].suppress_default);
    }

    #[test]
    fn test_parse_yaml_errors() {
        let bad_command = "bindings:\n  - key: enter\n    command: Teleport\n";
        assert_eq!(
            parse_keymap_yaml(bad_command),
            Err(KeymapError::InvalidCommand("Teleport".to_string()))
        );

        let bad_kind = "bindings:\n  - key: enter\n    command: NextElement\n    kind: Transition\n";
        assert_eq!(
            parse_keymap_yaml(bad_kind),
            Err(KeymapError::InvalidKind("Transition".to_string()))
        );

        assert!(matches!(
            parse_keymap_yaml("bindings: 12"),
            Err(KeymapError::ParseError(_))
        ));
    }
}
