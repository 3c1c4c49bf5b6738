//! The whole screenplay: metadata, name registries and scenes

use std::path::PathBuf;

use super::element::{Element, ElementKind};
use super::scene::Scene;
use super::suggest::SuggestionSource;
use crate::util::text::eq_ignore_case;

/// Ordered set of names, unique ignoring case. The first casing seen wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    names: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list, dropping blanks and case-insensitive duplicates
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for name in names {
            registry.register(name.as_ref());
        }
        registry
    }

    /// Add `name` (trimmed). Returns false for blank names and for names
    /// already present in any casing.
    pub fn register(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| eq_ignore_case(n, name))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The screenplay-wide registries elements draw suggestions from.
///
/// Passed explicitly into every scene operation that needs them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registries {
    pub characters: Registry,
    pub locations: Registry,
    /// Offer every candidate while the element is still empty
    pub show_all_on_empty: bool,
}

impl Registries {
    pub fn candidates(&self, source: SuggestionSource) -> &[String] {
        match source {
            SuggestionSource::Characters => self.characters.names(),
            SuggestionSource::Locations => self.locations.names(),
        }
    }

    /// Register a suggestive element's text in its registry
    pub fn register_from(&mut self, element: &Element) -> bool {
        let registry = match element.kind().suggestion_source() {
            Some(SuggestionSource::Characters) => &mut self.characters,
            Some(SuggestionSource::Locations) => &mut self.locations,
            None => return false,
        };
        let added = registry.register(element.raw_text());
        if added {
            tracing::debug!("Registered {} '{}'", element.kind(), element.raw_text().trim());
        }
        added
    }
}

/// The document being edited
#[derive(Debug, Clone, PartialEq)]
pub struct Screenplay {
    pub title: String,
    pub author: String,
    pub phone: String,
    pub email: String,
    pub version: u32,
    /// Where the last save went (or the file it was loaded from)
    pub save_to: Option<PathBuf>,
    pub registries: Registries,
    scenes: Vec<Scene>,
}

impl Default for Screenplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Screenplay {
    /// A new screenplay with one scene holding an empty scene heading
    pub fn new() -> Self {
        Self::with_scenes(vec![Scene::with_heading()])
    }

    /// A screenplay made of `scenes`, with blank metadata
    pub fn with_scenes(scenes: Vec<Scene>) -> Self {
        let mut screenplay = Self {
            title: String::new(),
            author: String::new(),
            phone: String::new(),
            email: String::new(),
            version: 1,
            save_to: None,
            registries: Registries::default(),
            scenes,
        };
        screenplay.reindex();
        screenplay
    }

    fn reindex(&mut self) {
        for (i, scene) in self.scenes.iter_mut().enumerate() {
            scene.index = i;
        }
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    pub fn scene_mut(&mut self, index: usize) -> Option<&mut Scene> {
        self.scenes.get_mut(index)
    }

    /// A scene together with the registries, for structural edits
    pub fn scene_and_registries(&mut self, index: usize) -> Option<(&mut Scene, &mut Registries)> {
        let scene = self.scenes.get_mut(index)?;
        Some((scene, &mut self.registries))
    }

    /// Insert a new scene with an empty heading after `after` (or first).
    /// Returns its index.
    pub fn add_scene(&mut self, after: Option<usize>) -> usize {
        let position = after
            .map(|a| a + 1)
            .unwrap_or(0)
            .min(self.scenes.len());
        self.scenes.insert(position, Scene::with_heading());
        self.reindex();
        tracing::debug!("Added scene at {}", position);
        position
    }

    pub fn remove_scene(&mut self, index: usize) -> Option<Scene> {
        if index >= self.scenes.len() {
            return None;
        }
        let removed = self.scenes.remove(index);
        self.reindex();
        tracing::debug!("Removed scene {}", index);
        Some(removed)
    }

    pub fn register_character(&mut self, name: &str) -> bool {
        self.registries.characters.register(name)
    }

    pub fn register_location(&mut self, name: &str) -> bool {
        self.registries.locations.register(name)
    }

    pub fn characters(&self) -> &[String] {
        self.registries.characters.names()
    }

    pub fn locations(&self) -> &[String] {
        self.registries.locations.names()
    }

    pub fn element_count(&self) -> usize {
        self.scenes.iter().map(Scene::len).sum()
    }

    /// Plain-text script: each element wrapped to `width` and indented by
    /// kind. Dialogue and parentheticals stay attached to their cue.
    pub fn render_plain(&self, width: usize) -> String {
        let mut out = String::new();
        if !self.title.is_empty() {
            out.push_str(&self.title.to_uppercase());
            out.push('\n');
            if !self.author.is_empty() {
                out.push_str("by ");
                out.push_str(&self.author);
                out.push('\n');
            }
        }

        for scene in &self.scenes {
            for element in scene.elements() {
                let attached = matches!(
                    element.kind(),
                    ElementKind::Dialogue | ElementKind::Parenthetical
                );
                if !out.is_empty() && !attached {
                    out.push('\n');
                }
                let indent = " ".repeat(plain_indent(element.kind()));
                for line in element.wrapped_lines(width) {
                    out.push_str(&indent);
                    out.push_str(line.trim_end());
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// Left margin in columns for the plain-text script
fn plain_indent(kind: ElementKind) -> usize {
    match kind {
        ElementKind::SceneHeading | ElementKind::Action => 0,
        ElementKind::Character => 20,
        ElementKind::Dialogue => 10,
        ElementKind::Parenthetical => 15,
    }
}
