//! Display rules for element text.
//!
//! Constraints decide how raw text becomes displayed text and which display
//! offsets may be edited.

use std::ops::Range;

/// Character-for-character transform applied to raw text for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayTransform {
    /// Shown exactly as typed
    Identity,
    /// Shown uppercased
    Uppercase,
}

impl DisplayTransform {
    /// Transform a single character.
    ///
    /// Characters whose uppercase form is more than one char (e.g. `ß`) are
    /// left alone so the transform never changes text length.
    pub fn apply_char(self, ch: char) -> char {
        match self {
            DisplayTransform::Identity => ch,
            DisplayTransform::Uppercase => {
                let mut upper = ch.to_uppercase();
                match (upper.next(), upper.next()) {
                    (Some(single), None) => single,
                    _ => ch,
                }
            }
        }
    }

    /// Transform a whole string
    pub fn apply(self, text: &str) -> String {
        text.chars().map(|c| self.apply_char(c)).collect()
    }
}

/// Per-kind editing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditConstraints {
    /// Case transform from raw to displayed text
    pub transform: DisplayTransform,

    /// Displayed text is wrapped in a protected `(` ... `)` pair
    pub wrap_in_parens: bool,

    /// Allow line breaks inside the element (otherwise they become spaces)
    pub allow_multiline: bool,
}

impl Default for EditConstraints {
    fn default() -> Self {
        Self::plain()
    }
}

impl EditConstraints {
    /// Text shown as typed, line breaks allowed (action)
    pub const fn plain() -> Self {
        Self {
            transform: DisplayTransform::Identity,
            wrap_in_parens: false,
            allow_multiline: true,
        }
    }

    /// Text shown as typed on one line (dialogue)
    pub const fn single_line() -> Self {
        Self {
            transform: DisplayTransform::Identity,
            wrap_in_parens: false,
            allow_multiline: false,
        }
    }

    /// Uppercased single-line text (scene headings, character cues)
    pub const fn uppercase() -> Self {
        Self {
            transform: DisplayTransform::Uppercase,
            wrap_in_parens: false,
            allow_multiline: false,
        }
    }

    /// Parenthetical: single line wrapped in protected parens
    pub const fn parenthetical() -> Self {
        Self {
            transform: DisplayTransform::Identity,
            wrap_in_parens: true,
            allow_multiline: false,
        }
    }

    /// Produce the displayed form of `raw`
    pub fn display(&self, raw: &str) -> String {
        let shown = self.transform.apply(raw);
        if self.wrap_in_parens {
            format!("({})", shown)
        } else {
            shown
        }
    }

    /// Number of protected characters before the editable content
    pub fn lead(&self) -> usize {
        usize::from(self.wrap_in_parens)
    }

    /// Editable range of display offsets for a display of `display_len` chars
    pub fn content_range(&self, display_len: usize) -> Range<usize> {
        if self.wrap_in_parens {
            1..display_len.saturating_sub(1).max(1)
        } else {
            0..display_len
        }
    }

    /// Map a display offset to a raw offset, clamped into the content
    pub fn display_to_raw(&self, display_offset: usize, raw_len: usize) -> usize {
        display_offset.saturating_sub(self.lead()).min(raw_len)
    }

    /// Map a raw offset to a display offset
    pub fn raw_to_display(&self, raw_offset: usize) -> usize {
        raw_offset + self.lead()
    }

    /// Apply the line-break rule to inserted text
    pub fn normalize_insert(&self, text: &str) -> String {
        if self.allow_multiline {
            text.replace("\r\n", "\n")
        } else {
            text.replace("\r\n", " ").replace(['\n', '\r'], " ")
        }
    }
}
