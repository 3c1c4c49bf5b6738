//! Screenplay elements and their per-kind rules
//!
//! An [`Element`] is one editable block: a kind tag, the raw text the user
//! typed and the derived displayed text. Everything that differs between
//! kinds lives in small lookup methods on [`ElementKind`].
//!
//! Cursor and selection offsets are character offsets into the displayed
//! text. For a parenthetical that includes the protected opening paren, so
//! its content starts at offset 1.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use super::screenplay::Registries;
use super::suggest::{SuggestionSource, SuggestionState};
use crate::editable::{EditConstraints, RawText, Selection};
use crate::util::{word_end_after, word_start_before, wrap_lines};

/// The five kinds of screenplay element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Parenthetical,
}

impl ElementKind {
    pub const ALL: [ElementKind; 5] = [
        ElementKind::SceneHeading,
        ElementKind::Action,
        ElementKind::Character,
        ElementKind::Dialogue,
        ElementKind::Parenthetical,
    ];

    /// Name used in documents and keymap files
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::SceneHeading => "SceneHeading",
            ElementKind::Action => "Action",
            ElementKind::Character => "Character",
            ElementKind::Dialogue => "Dialogue",
            ElementKind::Parenthetical => "Parenthetical",
        }
    }

    /// Kind of the element Enter creates after this one
    pub fn next_kind(self) -> ElementKind {
        match self {
            ElementKind::SceneHeading => ElementKind::Action,
            ElementKind::Action => ElementKind::Action,
            ElementKind::Character => ElementKind::Dialogue,
            ElementKind::Dialogue => ElementKind::Character,
            ElementKind::Parenthetical => ElementKind::Dialogue,
        }
    }

    /// Morph target for Tab
    pub fn tab_target(self) -> Option<ElementKind> {
        match self {
            ElementKind::Action => Some(ElementKind::Character),
            ElementKind::Dialogue => Some(ElementKind::Parenthetical),
            _ => None,
        }
    }

    /// Morph target for Shift+Tab
    pub fn shift_tab_target(self) -> Option<ElementKind> {
        match self {
            ElementKind::Character => Some(ElementKind::Action),
            ElementKind::Parenthetical => Some(ElementKind::Dialogue),
            ElementKind::Dialogue => Some(ElementKind::Character),
            _ => None,
        }
    }

    pub fn constraints(self) -> EditConstraints {
        match self {
            ElementKind::SceneHeading | ElementKind::Character => EditConstraints::uppercase(),
            ElementKind::Action => EditConstraints::plain(),
            ElementKind::Dialogue => EditConstraints::single_line(),
            ElementKind::Parenthetical => EditConstraints::parenthetical(),
        }
    }

    /// Registry this kind takes suggestions from (and registers into)
    pub fn suggestion_source(self) -> Option<SuggestionSource> {
        match self {
            ElementKind::SceneHeading => Some(SuggestionSource::Locations),
            ElementKind::Character => Some(SuggestionSource::Characters),
            _ => None,
        }
    }

    pub fn is_suggestive(self) -> bool {
        self.suggestion_source().is_some()
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or(())
    }
}

/// What a structural key asks the owning scene to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Insert a new element of this kind after the current one
    Insert(ElementKind),
    /// Replace the current element with one of this kind
    Morph(ElementKind),
    /// Remove the current element
    Remove,
}

/// One editable screenplay element
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    kind: ElementKind,
    raw: RawText,
    display: String,
    index: usize,
    /// Head is the cursor
    selection: Selection,
    suggestions: SuggestionState,
}

impl Element {
    /// Empty element with the cursor at the start of its content
    pub fn new(kind: ElementKind) -> Self {
        Self::with_text(kind, "")
    }

    /// Element holding `raw` with the cursor at the end of its content.
    ///
    /// Line breaks in `raw` become spaces for single-line kinds, so loaded
    /// and morphed text obeys the same rules as typed text.
    pub fn with_text(kind: ElementKind, raw: &str) -> Self {
        let mut element = Self {
            kind,
            raw: RawText::from_text(&kind.constraints().normalize_insert(raw)),
            display: String::new(),
            index: 0,
            selection: Selection::default(),
            suggestions: SuggestionState::new(),
        };
        element.refresh_display();
        element.selection = Selection::collapsed(element.content_range().end);
        element
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn raw_text(&self) -> &str {
        self.raw.as_str()
    }

    pub fn display_text(&self) -> &str {
        &self.display
    }

    /// Position in the owning scene
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn cursor(&self) -> usize {
        self.selection.head
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn suggestions(&self) -> &SuggestionState {
        &self.suggestions
    }

    pub fn suggestions_mut(&mut self) -> &mut SuggestionState {
        &mut self.suggestions
    }

    fn constraints(&self) -> EditConstraints {
        self.kind.constraints()
    }

    /// Display offsets that hold editable content
    pub fn content_range(&self) -> Range<usize> {
        self.constraints()
            .content_range(self.display.chars().count())
    }

    /// Move the cursor (clamped into the content) and drop any selection
    pub fn set_cursor(&mut self, offset: usize) {
        let range = self.content_range();
        self.selection = Selection::collapsed(offset.clamp(range.start, range.end));
    }

    /// Set anchor and head, both clamped into the content
    pub fn set_selection(&mut self, anchor: usize, head: usize) {
        self.selection = Selection::new(anchor, head);
        self.selection.clamp_to(self.content_range());
    }

    pub fn select_all(&mut self) {
        let range = self.content_range();
        self.selection = Selection::new(range.start, range.end);
    }

    pub fn clear_selection(&mut self) {
        self.selection.collapse();
    }

    /// Cursor sits at the first editable offset with nothing selected
    pub fn is_at_start(&self) -> bool {
        self.selection.is_empty() && self.cursor() == self.content_range().start
    }

    fn raw_offset(&self, display_offset: usize) -> usize {
        self.constraints()
            .display_to_raw(display_offset, self.raw.len_chars())
    }

    fn raw_range(&self, range: Range<usize>) -> Range<usize> {
        self.raw_offset(range.start)..self.raw_offset(range.end)
    }

    fn refresh_display(&mut self) {
        self.display = self.constraints().display(self.raw.as_str());
    }

    /// Replace the whole raw text and put the cursor at the end
    pub fn set_raw_text(&mut self, raw: &str) {
        let normalized = self.constraints().normalize_insert(raw);
        self.raw.set_content(&normalized);
        self.refresh_display();
        self.selection = Selection::collapsed(self.content_range().end);
    }

    /// Insert `text` at display `offset`.
    ///
    /// Offsets outside the editable content (before a parenthetical's opening
    /// paren or after its closing one) are rejected. Returns whether the raw
    /// text changed.
    pub fn insert_text(&mut self, text: &str, offset: usize) -> bool {
        let range = self.content_range();
        if offset < range.start || offset > range.end {
            tracing::trace!(
                "Rejected insert at {} outside {:?} ({})",
                offset,
                range,
                self.kind
            );
            return false;
        }

        let normalized = self.constraints().normalize_insert(text);
        if normalized.is_empty() {
            return false;
        }
        let raw_offset = self.raw_offset(offset);
        self.raw.insert(raw_offset, &normalized);
        self.refresh_display();
        self.selection = Selection::collapsed(offset + normalized.chars().count());
        true
    }

    /// Typing: replace the selection (if any) and insert at the cursor
    pub fn type_text(&mut self, text: &str) -> bool {
        let deleted = self.delete_selection();
        self.insert_text(text, self.cursor()) || deleted
    }

    /// Delete the selected content. Returns false when nothing was selected.
    pub fn delete_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let range = self.selection.range();
        let raw_range = self.raw_range(range.clone());
        self.raw.remove(raw_range);
        self.refresh_display();
        self.set_cursor(range.start);
        true
    }

    /// Default Backspace: delete the selection or the character before the
    /// cursor. Protected parens are never deleted.
    pub fn delete_backward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let cursor = self.cursor();
        if cursor <= self.content_range().start {
            tracing::trace!("Backspace at content start of {}", self.kind);
            return false;
        }
        let raw_cursor = self.raw_offset(cursor);
        self.raw.remove(raw_cursor - 1..raw_cursor);
        self.refresh_display();
        self.set_cursor(cursor - 1);
        true
    }

    /// Default Delete: delete the selection or the character after the cursor
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let cursor = self.cursor();
        if cursor >= self.content_range().end {
            return false;
        }
        let raw_cursor = self.raw_offset(cursor);
        self.raw.remove(raw_cursor..raw_cursor + 1);
        self.refresh_display();
        self.set_cursor(cursor);
        true
    }

    /// Ctrl+Backspace: delete the word left of the cursor.
    /// Does nothing while a selection is active.
    pub fn delete_word_left(&mut self) -> bool {
        if self.has_selection() {
            return false;
        }
        let raw_cursor = self.raw_offset(self.cursor());
        let start = word_start_before(self.raw.as_str(), raw_cursor);
        if start >= raw_cursor {
            return false;
        }
        self.raw.remove(start..raw_cursor);
        self.refresh_display();
        self.set_cursor(self.constraints().raw_to_display(start));
        true
    }

    /// Ctrl+Delete: delete the word right of the cursor and the whitespace
    /// after it. Does nothing while a selection is active.
    pub fn delete_word_right(&mut self) -> bool {
        if self.has_selection() {
            return false;
        }
        let cursor = self.cursor();
        let raw_cursor = self.raw_offset(cursor);
        let end = word_end_after(self.raw.as_str(), raw_cursor);
        if end <= raw_cursor {
            return false;
        }
        self.raw.remove(raw_cursor..end);
        self.refresh_display();
        self.set_cursor(cursor);
        true
    }

    /// Bring the raw text in line with a deletion the host's text control
    /// already performed on the displayed text.
    ///
    /// Only shrinking edits are reconciled; insertions must go through
    /// [`Element::insert_text`]. Returns whether the raw text changed.
    pub fn apply_displayed(&mut self, new_displayed: &str) -> bool {
        let content = if self.constraints().wrap_in_parens {
            let inner = new_displayed.strip_prefix('(').unwrap_or(new_displayed);
            inner.strip_suffix(')').unwrap_or(inner)
        } else {
            new_displayed
        };

        let before = self.raw.len_chars();
        self.raw
            .reconcile_after_deletion(content, self.constraints().transform);
        let changed = self.raw.len_chars() != before;
        if changed {
            self.refresh_display();
            let cursor = self.cursor();
            self.set_cursor(cursor);
        }
        changed
    }

    /// Raw (untransformed) text under the selection
    pub fn raw_selection_text(&self) -> String {
        self.raw.slice(self.raw_range(self.selection.range()))
    }

    /// Raw text of a display range, clamped into the content
    pub fn raw_text_in(&self, range: Range<usize>) -> String {
        self.raw.slice(self.raw_range(range))
    }

    /// Displayed text split into visual lines
    pub fn wrapped_lines(&self, width: usize) -> Vec<String> {
        wrap_lines(&self.display, width)
    }

    /// Refresh the suggestion list from the matching registry.
    ///
    /// Run on attach and after every raw-text change.
    pub fn refresh_suggestions(&mut self, registries: &Registries) {
        if let Some(source) = self.kind.suggestion_source() {
            self.suggestions.refresh(
                self.raw.as_str(),
                registries.candidates(source),
                registries.show_all_on_empty,
            );
        }
    }

    /// Enter. A highlighted suggestion is accepted into the raw text first.
    pub fn on_enter(&mut self) -> Transition {
        if let Some(choice) = self.suggestions.highlighted().map(str::to_string) {
            self.set_raw_text(&choice);
            self.suggestions.clear();
        }
        Transition::Insert(self.kind.next_kind())
    }

    pub fn on_tab(&self) -> Option<Transition> {
        self.kind.tab_target().map(Transition::Morph)
    }

    pub fn on_shift_tab(&self) -> Option<Transition> {
        self.kind.shift_tab_target().map(Transition::Morph)
    }

    /// Backspace with the cursor at the start asks for removal
    pub fn on_backspace_at_start(&self) -> Option<Transition> {
        self.is_at_start().then_some(Transition::Remove)
    }

    /// A new element of `target` carrying this element's raw text.
    ///
    /// The cursor lands at the end of the content (inside the closing paren
    /// for a parenthetical) and the index is kept.
    pub fn morph(&self, target: ElementKind) -> Element {
        let mut morphed = Element::with_text(target, self.raw.as_str());
        morphed.index = self.index;
        morphed
    }
}
