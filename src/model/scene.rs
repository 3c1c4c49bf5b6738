//! A scene: an ordered run of elements plus its own metadata
//!
//! The scene owns every structural edit (insert, remove, morph) so element
//! indices stay dense, and it owns the selection that a pointer drag can
//! spread over several elements.

use super::element::{Element, ElementKind, Transition};
use super::screenplay::Registries;

/// Default scene color, opaque white
pub const DEFAULT_SCENE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// One end of a drag: element index and display offset inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DragPoint {
    pub element: usize,
    pub offset: usize,
}

impl DragPoint {
    pub fn new(element: usize, offset: usize) -> Self {
        Self { element, offset }
    }
}

/// A drag selection, kept in the order the pointer moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSelection {
    pub origin: DragPoint,
    pub current: DragPoint,
}

impl DragSelection {
    /// Endpoints ordered by element index, then offset
    pub fn ordered(&self) -> (DragPoint, DragPoint) {
        if self.current < self.origin {
            (self.current, self.origin)
        } else {
            (self.origin, self.current)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub index: usize,
    pub title: String,
    pub notes: String,
    /// RGBA, each component in 0..=1
    pub color: [f32; 4],
    pub plot_point: String,
    elements: Vec<Element>,
    focus: Option<usize>,
    drag: Option<DragSelection>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            index: 0,
            title: String::new(),
            notes: String::new(),
            color: DEFAULT_SCENE_COLOR,
            plot_point: String::new(),
            elements: Vec::new(),
            focus: None,
            drag: None,
        }
    }
}

impl Scene {
    /// A scene with no elements
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh scene holding one empty scene heading
    pub fn with_heading() -> Self {
        Self::with_elements(vec![Element::new(ElementKind::SceneHeading)])
    }

    /// A scene holding `elements` in order, focus on the first
    pub fn with_elements(elements: Vec<Element>) -> Self {
        let mut scene = Self {
            elements,
            ..Self::default()
        };
        scene.reindex();
        scene.focus = (!scene.elements.is_empty()).then_some(0);
        scene
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focus
    }

    pub fn focused(&self) -> Option<&Element> {
        self.focus.and_then(|i| self.elements.get(i))
    }

    pub fn focused_mut(&mut self) -> Option<&mut Element> {
        match self.focus {
            Some(i) => self.elements.get_mut(i),
            None => None,
        }
    }

    /// Focus element `index`. Returns false if there is no such element.
    pub fn set_focus(&mut self, index: usize) -> bool {
        if index < self.elements.len() {
            self.focus = Some(index);
            true
        } else {
            false
        }
    }

    fn reindex(&mut self) {
        for (i, element) in self.elements.iter_mut().enumerate() {
            element.set_index(i);
        }
    }

    /// Insert `element` right after `after` (or at the front), focus it and
    /// bind its suggestions to the registries. Returns its index.
    pub fn insert_element(
        &mut self,
        after: Option<usize>,
        mut element: Element,
        registries: &Registries,
    ) -> usize {
        let position = after
            .map(|a| a + 1)
            .unwrap_or(0)
            .min(self.elements.len());
        element.refresh_suggestions(registries);
        tracing::debug!(
            "Scene {}: insert {} at {}",
            self.index,
            element.kind(),
            position
        );
        self.elements.insert(position, element);
        self.reindex();
        self.focus = Some(position);
        self.drag = None;
        position
    }

    /// Remove element `index`. Focus moves to whatever now occupies that
    /// index (clamped); an emptied scene has no focus.
    pub fn remove_element(&mut self, index: usize) -> Option<Element> {
        if index >= self.elements.len() {
            return None;
        }
        let removed = self.elements.remove(index);
        tracing::debug!(
            "Scene {}: removed {} at {}",
            self.index,
            removed.kind(),
            index
        );
        self.reindex();
        self.focus = if self.elements.is_empty() {
            None
        } else {
            Some(index.min(self.elements.len() - 1))
        };
        self.drag = None;
        Some(removed)
    }

    /// Replace element `index` with a `target` element carrying its raw
    /// text, in a single reindex pass. Returns false for a bad index.
    pub fn transform_element(
        &mut self,
        index: usize,
        target: ElementKind,
        registries: &Registries,
    ) -> bool {
        if index >= self.elements.len() {
            return false;
        }
        let old = self.elements.remove(index);
        let mut new = old.morph(target);
        new.refresh_suggestions(registries);
        tracing::debug!(
            "Scene {}: morph {} -> {} at {}",
            self.index,
            old.kind(),
            target,
            index
        );
        self.elements.insert(index, new);
        self.reindex();
        self.focus = Some(index);
        self.drag = None;
        true
    }

    /// Carry out a transition requested by element `index`.
    ///
    /// Leaving a scene heading or character cue through Enter or a morph
    /// registers its text. Returns the index of the element that ends up
    /// focused, or None when the scene became empty.
    pub fn apply_transition(
        &mut self,
        index: usize,
        transition: Transition,
        registries: &mut Registries,
    ) -> Option<usize> {
        if let (Transition::Insert(_) | Transition::Morph(_), Some(element)) =
            (transition, self.elements.get(index))
        {
            registries.register_from(element);
        }

        match transition {
            Transition::Insert(kind) => {
                Some(self.insert_element(Some(index), Element::new(kind), registries))
            }
            Transition::Morph(kind) => {
                self.transform_element(index, kind, registries);
                Some(index)
            }
            Transition::Remove => {
                self.remove_element(index);
                self.focus
            }
        }
    }

    /// Enter on element `index`
    pub fn enter(&mut self, index: usize, registries: &mut Registries) -> Option<usize> {
        let transition = self.elements.get_mut(index)?.on_enter();
        self.apply_transition(index, transition, registries)
    }

    /// Tab on element `index`. None when the kind has no tab target.
    pub fn tab(&mut self, index: usize, registries: &mut Registries) -> Option<usize> {
        let transition = self.elements.get(index)?.on_tab();
        match transition {
            Some(t) => self.apply_transition(index, t, registries),
            None => {
                tracing::trace!("No tab target at element {}", index);
                None
            }
        }
    }

    /// Shift+Tab on element `index`
    pub fn shift_tab(&mut self, index: usize, registries: &mut Registries) -> Option<usize> {
        let transition = self.elements.get(index)?.on_shift_tab();
        match transition {
            Some(t) => self.apply_transition(index, t, registries),
            None => {
                tracing::trace!("No shift-tab target at element {}", index);
                None
            }
        }
    }

    /// Backspace on element `index`: removes it when the cursor is at its
    /// start. Trailing text in the removed element is discarded.
    pub fn backspace_at_start(&mut self, index: usize, registries: &mut Registries) -> bool {
        let Some(transition) = self.elements.get(index).and_then(|e| e.on_backspace_at_start())
        else {
            return false;
        };
        self.apply_transition(index, transition, registries);
        true
    }

    /// Accept `choice` as the text of element `index` and finish it as if
    /// Enter was pressed.
    pub fn commit_suggestion(
        &mut self,
        index: usize,
        choice: &str,
        registries: &mut Registries,
    ) -> Option<usize> {
        let element = self.elements.get_mut(index)?;
        element.set_raw_text(choice);
        element.suggestions_mut().clear();
        self.enter(index, registries)
    }

    // ========================================================================
    // Multi-element selection
    // ========================================================================

    /// Pointer pressed in element `element` at display `offset`
    pub fn drag_start(&mut self, element: usize, offset: usize) {
        if element >= self.elements.len() {
            return;
        }
        let point = DragPoint::new(element, offset);
        self.drag = Some(DragSelection {
            origin: point,
            current: point,
        });
        self.focus = Some(element);
        self.apply_drag();
    }

    /// Pointer moved to element `element` at display `offset`
    pub fn drag_move(&mut self, element: usize, offset: usize) {
        if element >= self.elements.len() {
            return;
        }
        if let Some(drag) = self.drag.as_mut() {
            drag.current = DragPoint::new(element, offset);
            self.apply_drag();
        }
    }

    /// Pointer released. The selection stays; focus goes to the element the
    /// drag ended in.
    pub fn drag_end(&mut self) {
        if let Some(drag) = self.drag {
            self.focus = Some(drag.current.element);
        }
    }

    pub fn drag_selection(&self) -> Option<DragSelection> {
        self.drag
    }

    /// Drop the drag selection and collapse every element's selection
    pub fn clear_selection(&mut self) {
        self.drag = None;
        for element in &mut self.elements {
            element.clear_selection();
        }
    }

    /// Drop the drag, keeping only the focused element's own selection
    pub fn collapse_unfocused(&mut self) {
        self.drag = None;
        let focus = self.focus;
        for (i, element) in self.elements.iter_mut().enumerate() {
            if Some(i) != focus {
                element.clear_selection();
            }
        }
    }

    /// Spread the drag over the elements, ordered by index so a backward
    /// drag selects the same span as the forward one.
    fn apply_drag(&mut self) {
        let Some(drag) = self.drag else {
            return;
        };
        let (start, end) = drag.ordered();

        for (i, element) in self.elements.iter_mut().enumerate() {
            let content = element.content_range();
            if i < start.element || i > end.element {
                element.clear_selection();
            } else if start.element == end.element {
                let (anchor, head) = if drag.current < drag.origin {
                    (end.offset, start.offset)
                } else {
                    (start.offset, end.offset)
                };
                element.set_selection(anchor, head);
            } else if i == start.element {
                element.set_selection(start.offset, content.end);
            } else if i == end.element {
                element.set_selection(content.start, end.offset);
            } else {
                element.select_all();
            }
        }
    }

    /// Delete the current selection.
    ///
    /// A multi-element selection trims its first and last elements and
    /// removes every element between them. The two trimmed elements stay
    /// separate, and focus lands where the selection began. Returns whether
    /// anything was deleted.
    pub fn delete_selected(&mut self) -> bool {
        let Some(drag) = self.drag.filter(|d| d.origin.element != d.current.element) else {
            self.drag = None;
            return self.focused_mut().is_some_and(Element::delete_selection);
        };
        let (start, end) = drag.ordered();

        let mut changed = self
            .elements
            .get_mut(end.element)
            .is_some_and(Element::delete_selection);
        if end.element > start.element + 1 {
            self.elements.drain(start.element + 1..end.element);
            tracing::debug!(
                "Scene {}: cut elements {}..{}",
                self.index,
                start.element + 1,
                end.element
            );
            self.reindex();
            changed = true;
        }
        if let Some(first) = self.elements.get_mut(start.element) {
            changed |= first.delete_selection();
        }

        self.focus = Some(start.element);
        self.collapse_unfocused();
        changed
    }

    /// Raw text of the current selection. A multi-element selection joins
    /// each element's part with a newline; otherwise the focused element's
    /// selection is used.
    pub fn selected_raw_text(&self) -> String {
        match self.drag {
            Some(drag) if drag.origin.element != drag.current.element => {
                let (start, end) = drag.ordered();
                self.elements[start.element..=end.element]
                    .iter()
                    .map(Element::raw_selection_text)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            _ => self
                .focused()
                .map(Element::raw_selection_text)
                .unwrap_or_default(),
        }
    }
}
