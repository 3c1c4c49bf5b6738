//! Autocomplete suggestions for scene headings and character cues

use crate::util::text::starts_with_ignore_case;

/// Which registry an element draws its suggestions from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionSource {
    Characters,
    Locations,
}

/// Case-insensitive starts-with filter that keeps candidate order
pub fn filter(prefix: &str, candidates: &[String]) -> Vec<String> {
    candidates
        .iter()
        .filter(|c| starts_with_ignore_case(c, prefix))
        .cloned()
        .collect()
}

/// Current suggestion list and highlight for one element
///
/// The presentation layer reads this; it never drives it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionState {
    items: Vec<String>,
    highlighted: Option<usize>,
}

impl SuggestionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-run the filter for `prefix`. An empty prefix clears the list
    /// unless `show_all_on_empty` is set. Drops any highlight.
    pub fn refresh(&mut self, prefix: &str, candidates: &[String], show_all_on_empty: bool) {
        self.highlighted = None;
        if prefix.is_empty() && !show_all_on_empty {
            self.items.clear();
            return;
        }
        self.items = filter(prefix, candidates);
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    /// Text of the highlighted candidate, if any
    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }

    /// Move the highlight by one step with wraparound.
    ///
    /// With nothing highlighted, a forward step picks the first candidate and
    /// a backward step the last. Returns false when there is nothing to
    /// highlight.
    pub fn move_highlight(&mut self, forward: bool) -> bool {
        let len = self.items.len();
        if len == 0 {
            return false;
        }
        self.highlighted = Some(match (self.highlighted, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        });
        true
    }

    /// Hide the list (Escape)
    pub fn clear(&mut self) {
        self.items.clear();
        self.highlighted = None;
    }
}
