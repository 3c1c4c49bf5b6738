//! Persisted screenplay documents
//!
//! A document stores only `(type, raw_text)` per element; displayed text is
//! always derived again on load. JSON is the default format, `.yaml`/`.yml`
//! files are written and read as YAML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{Element, ElementKind, Registry, Scene, Screenplay, DEFAULT_SCENE_COLOR};

/// Top-level document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenplayDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default = "default_version")]
    pub version: u32,
    /// Empty when the screenplay was never saved
    #[serde(default)]
    pub save_to: String,
    #[serde(default)]
    pub scenes: Vec<SceneDocument>,
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_color")]
    pub color: [f32; 4],
    #[serde(default)]
    pub plot_point: String,
    #[serde(default)]
    pub elements: Vec<ElementDocument>,
}

fn default_color() -> [f32; 4] {
    DEFAULT_SCENE_COLOR
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDocument {
    /// Kind name, e.g. `SceneHeading`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub raw_text: String,
}

/// Errors from loading or saving a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Reading or writing the file failed
    Io { path: PathBuf, message: String },
    /// The file is not a valid document
    Parse(String),
    /// An element's `type` is not one of the five kinds
    UnknownElementType {
        scene: usize,
        element: usize,
        type_name: String,
    },
    /// The document could not be encoded
    Serialize(String),
}

impl DocumentError {
    /// Reason string shown to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { path, message } => format!("Could not access {}: {}", path.display(), message),
            Self::Parse(msg) => format!("Not a screenplay file: {}", msg),
            Self::UnknownElementType {
                scene,
                element,
                type_name,
            } => format!(
                "Unknown element type '{}' (scene {}, element {})",
                type_name,
                scene + 1,
                element + 1
            ),
            Self::Serialize(msg) => format!("Could not encode screenplay: {}", msg),
        }
    }
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "{}: {}", path.display(), message),
            Self::Parse(msg) => write!(f, "parse error: {}", msg),
            Self::UnknownElementType {
                scene,
                element,
                type_name,
            } => write!(
                f,
                "unknown element type '{}' at scene {} element {}",
                type_name, scene, element
            ),
            Self::Serialize(msg) => write!(f, "serialize error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentError {}

/// On-disk encoding, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

impl ScreenplayDocument {
    pub fn parse(content: &str, format: DocumentFormat) -> Result<Self, DocumentError> {
        match format {
            DocumentFormat::Json => {
                serde_json::from_str(content).map_err(|e| DocumentError::Parse(e.to_string()))
            }
            DocumentFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| DocumentError::Parse(e.to_string()))
            }
        }
    }

    pub fn encode(&self, format: DocumentFormat) -> Result<String, DocumentError> {
        match format {
            DocumentFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| DocumentError::Serialize(e.to_string())),
            DocumentFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| DocumentError::Serialize(e.to_string()))
            }
        }
    }

    /// Read and parse a whole document
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path).map_err(|e| DocumentError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content, DocumentFormat::from_path(path))
    }

    /// Encode and write the whole document
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let content = self.encode(DocumentFormat::from_path(path))?;
        fs::write(path, content).map_err(|e| DocumentError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl Screenplay {
    /// Snapshot the screenplay as a document
    pub fn to_document(&self) -> ScreenplayDocument {
        ScreenplayDocument {
            title: self.title.clone(),
            author: self.author.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            locations: self.locations().to_vec(),
            characters: self.characters().to_vec(),
            version: self.version,
            save_to: self
                .save_to
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            scenes: self
                .scenes()
                .iter()
                .map(|scene| SceneDocument {
                    title: scene.title.clone(),
                    notes: scene.notes.clone(),
                    color: scene.color,
                    plot_point: scene.plot_point.clone(),
                    elements: scene
                        .elements()
                        .iter()
                        .map(|el| ElementDocument {
                            kind: el.kind().name().to_string(),
                            raw_text: el.raw_text().to_string(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Rebuild a screenplay from a document. Fails on the first unknown
    /// element type without building anything.
    pub fn from_document(doc: &ScreenplayDocument) -> Result<Self, DocumentError> {
        let mut scenes = Vec::with_capacity(doc.scenes.len());
        for (scene_idx, scene_doc) in doc.scenes.iter().enumerate() {
            let mut elements = Vec::with_capacity(scene_doc.elements.len());
            for (element_idx, el) in scene_doc.elements.iter().enumerate() {
                let kind: ElementKind =
                    el.kind
                        .parse()
                        .map_err(|_| DocumentError::UnknownElementType {
                            scene: scene_idx,
                            element: element_idx,
                            type_name: el.kind.clone(),
                        })?;
                elements.push(Element::with_text(kind, &el.raw_text));
            }

            let mut scene = Scene::with_elements(elements);
            scene.title = scene_doc.title.clone();
            scene.notes = scene_doc.notes.clone();
            scene.color = scene_doc.color.map(|c| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) });
            scene.plot_point = scene_doc.plot_point.clone();
            scenes.push(scene);
        }

        let mut screenplay = Screenplay::with_scenes(scenes);
        screenplay.title = doc.title.clone();
        screenplay.author = doc.author.clone();
        screenplay.phone = doc.phone.clone();
        screenplay.email = doc.email.clone();
        screenplay.version = doc.version;
        screenplay.save_to = (!doc.save_to.is_empty()).then(|| PathBuf::from(&doc.save_to));
        screenplay.registries.characters = Registry::from_names(&doc.characters);
        screenplay.registries.locations = Registry::from_names(&doc.locations);
        Ok(screenplay)
    }

    /// Load a screenplay file
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let doc = ScreenplayDocument::load(path)?;
        let screenplay = Self::from_document(&doc)?;
        tracing::info!(
            "Loaded {} ({} scenes, {} elements)",
            path.display(),
            screenplay.scenes().len(),
            screenplay.element_count()
        );
        Ok(screenplay)
    }

    /// Write the screenplay to `path`. The in-memory screenplay is not
    /// touched, even on success; callers record `save_to` themselves.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let mut doc = self.to_document();
        doc.save_to = path.display().to_string();
        doc.save(path)?;
        tracing::info!("Saved {}", path.display());
        Ok(())
    }
}
