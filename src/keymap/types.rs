//! Keys as the host reports them and as keymap files spell them
//!
//! `Display` writes the lowercase `mod+key` form that keymap files use, so
//! a keystroke in a log line or status message can be pasted back into
//! `keymap.yaml` as is.

use std::fmt;

/// Held modifier keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(1);
    pub const SHIFT: Modifiers = Modifiers(1 << 1);
    pub const ALT: Modifiers = Modifiers(1 << 2);
    /// Cmd on macOS, Super elsewhere
    pub const META: Modifiers = Modifiers(1 << 3);

    /// Order and spelling used when writing a keystroke
    const NAMES: [(Modifiers, &'static str); 4] = [
        (Modifiers::CTRL, "ctrl"),
        (Modifiers::ALT, "alt"),
        (Modifiers::SHIFT, "shift"),
        (Modifiers::META, "meta"),
    ];

    /// Read one modifier name from a keymap entry. `cmd` means the
    /// platform's shortcut key.
    pub fn from_name(name: &str) -> Option<Modifiers> {
        match name {
            "cmd" => Some(Modifiers::cmd()),
            "ctrl" | "control" => Some(Modifiers::CTRL),
            "shift" => Some(Modifiers::SHIFT),
            "alt" | "option" | "opt" => Some(Modifiers::ALT),
            "meta" | "super" | "win" => Some(Modifiers::META),
            _ => None,
        }
    }

    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn ctrl(self) -> bool {
        self.contains(Modifiers::CTRL)
    }

    pub const fn shift(self) -> bool {
        self.contains(Modifiers::SHIFT)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// A character pressed with these modifiers types text rather than
    /// triggering a shortcut. Only Shift may be held.
    pub const fn is_typing(self) -> bool {
        self.0 & !Modifiers::SHIFT.0 == 0
    }

    /// The shortcut modifier of the platform: Cmd on macOS, Ctrl elsewhere
    pub fn cmd() -> Modifiers {
        if cfg!(target_os = "macos") {
            Modifiers::META
        } else {
            Modifiers::CTRL
        }
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, name) in Modifiers::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// The keys a screenplay element reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key, lowercase for letters
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

impl KeyCode {
    /// Read a key name from a keymap entry. A single character names its
    /// own key.
    pub fn from_name(name: &str) -> Option<KeyCode> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(KeyCode::Char(c.to_ascii_lowercase()));
        }
        let key = match name {
            "enter" | "return" => KeyCode::Enter,
            "escape" | "esc" => KeyCode::Escape,
            "tab" => KeyCode::Tab,
            "backspace" | "back" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "space" => KeyCode::Char(' '),
            "up" | "arrowup" => KeyCode::Up,
            "down" | "arrowdown" => KeyCode::Down,
            "left" | "arrowleft" => KeyCode::Left,
            "right" | "arrowright" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            _ => return None,
        };
        Some(key)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyCode::Char(' ') => "space",
            KeyCode::Char(c) => return write!(f, "{}", c),
            KeyCode::Enter => "enter",
            KeyCode::Escape => "escape",
            KeyCode::Tab => "tab",
            KeyCode::Backspace => "backspace",
            KeyCode::Delete => "delete",
            KeyCode::Up => "up",
            KeyCode::Down => "down",
            KeyCode::Left => "left",
            KeyCode::Right => "right",
            KeyCode::Home => "home",
            KeyCode::End => "end",
        };
        f.write_str(name)
    }
}

/// One key-down: a key with the modifiers held at the time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// The key with nothing held
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            mods: Modifiers::NONE,
        }
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.mods, self.key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_allows_only_shift() {
        assert!(Modifiers::NONE.is_typing());
        assert!(Modifiers::SHIFT.is_typing());
        assert!(!Modifiers::CTRL.is_typing());
        assert!(!(Modifiers::ALT | Modifiers::SHIFT).is_typing());
    }

    #[test]
    fn test_display_uses_keymap_syntax() {
        let stroke = Keystroke::new(KeyCode::Backspace, Modifiers::CTRL);
        assert_eq!(stroke.to_string(), "ctrl+backspace");
        assert_eq!(Keystroke::key(KeyCode::Tab).to_string(), "tab");
        assert_eq!(Keystroke::key(KeyCode::Char(' ')).to_string(), "space");
        let stroke = Keystroke::new(KeyCode::Char('s'), Modifiers::SHIFT | Modifiers::CTRL);
        assert_eq!(stroke.to_string(), "ctrl+shift+s");
    }

    #[test]
    fn test_names_read_back() {
        for key in [KeyCode::Enter, KeyCode::Char('p'), KeyCode::Char(' '), KeyCode::End] {
            assert_eq!(KeyCode::from_name(&key.to_string()), Some(key));
        }
        assert_eq!(Modifiers::from_name("opt"), Some(Modifiers::ALT));
        assert_eq!(Modifiers::from_name("hyper"), None);
    }
}
