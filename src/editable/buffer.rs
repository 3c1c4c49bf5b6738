//! Raw text buffer for a single screenplay element.
//!
//! `RawText` holds exactly what the user typed, before any display transform
//! (uppercasing, parenthetical wrapping). All offsets are character offsets,
//! never byte offsets.

use std::ops::Range;

use super::constraints::DisplayTransform;

/// Unformatted ground-truth text of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawText {
    text: String,
}

impl RawText {
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Create a RawText from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }

    /// Access the underlying string
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Total length in characters
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get slice of text as String (by character indices, clamped)
    pub fn slice(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start >= end {
            return String::new();
        }
        self.text.chars().skip(start).take(end - start).collect()
    }

    /// Insert `substring` at character `offset`.
    ///
    /// Offsets past the end are a caller bug; debug builds assert on them and
    /// release builds append at the end.
    pub fn insert(&mut self, offset: usize, substring: &str) {
        debug_assert!(
            offset <= self.len_chars(),
            "insert offset {} out of range (len {})",
            offset,
            self.len_chars()
        );
        let byte_offset = self.char_to_byte(offset);
        self.text.insert_str(byte_offset, substring);
    }

    /// Remove text in character range
    pub fn remove(&mut self, range: Range<usize>) {
        let start_byte = self.char_to_byte(range.start);
        let end_byte = self.char_to_byte(range.end);
        if start_byte < end_byte {
            self.text.replace_range(start_byte..end_byte, "");
        }
    }

    /// Clear all content
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Set content, replacing everything
    pub fn set_content(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    /// Excise the span of raw text that an external deletion removed from the
    /// displayed form.
    ///
    /// `new_displayed` is the displayed text after the editor control already
    /// deleted something. The first position where the transformed raw text
    /// disagrees with it marks the start of the cut; the cut length is the
    /// difference in lengths. If the overlap agrees completely the deletion
    /// happened at the tail.
    pub fn reconcile_after_deletion(&mut self, new_displayed: &str, transform: DisplayTransform) {
        let new_chars: Vec<char> = new_displayed.chars().collect();
        if new_chars.is_empty() {
            self.clear();
            return;
        }

        let raw_len = self.len_chars();
        if raw_len <= new_chars.len() {
            return;
        }
        let cut_len = raw_len - new_chars.len();

        let slice_to = self
            .text
            .chars()
            .zip(new_chars.iter())
            .position(|(raw, shown)| transform.apply_char(raw) != *shown)
            .unwrap_or(new_chars.len());

        self.remove(slice_to..slice_to + cut_len);
    }

    /// Convert char offset to byte offset
    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

impl std::fmt::Display for RawText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
