//! Project document format and autosave

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::SceneObject;

use super::SceneState;
use crate::error::{EditorError, EditorResult};

/// Format tag written into every project document
pub const PROJECT_FORMAT_VERSION: &str = "1.0";

fn default_format_version() -> String {
    PROJECT_FORMAT_VERSION.to_string()
}

/// Persisted project: format tag, creation time and the ordered object list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    #[serde(default = "default_format_version")]
    pub version: String,
    /// Unix milliseconds
    #[serde(default)]
    pub timestamp: i64,
    pub objects: Vec<SceneObject>,
}

impl ProjectDocument {
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Self {
            version: default_format_version(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            objects,
        }
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document. A body without an `objects` array is rejected as
    /// invalid; broken JSON or mistyped objects are parse errors.
    pub fn parse(json: &str) -> EditorResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        match value.get("objects") {
            Some(serde_json::Value::Array(_)) => {}
            Some(_) => {
                return Err(EditorError::InvalidDocument(
                    "'objects' is not a list".to_string(),
                ))
            }
            None => {
                return Err(EditorError::InvalidDocument(
                    "missing 'objects' list".to_string(),
                ))
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn save_to(&self, path: &Path) -> EditorResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load_from(path: &Path) -> EditorResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::parse(&json)
    }
}

impl SceneState {
    /// Current scene as a project document
    pub fn to_document(&self) -> ProjectDocument {
        ProjectDocument::new(self.snapshot())
    }

    /// Get autosave file path
    fn autosave_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "mak3d", "mak3d")
            .map(|dirs| dirs.data_dir().join("autosave.json"))
    }

    /// Save scene to autosave file
    pub fn autosave(&self) {
        let Some(path) = Self::autosave_path() else {
            return;
        };
        match self.to_document().save_to(&path) {
            Ok(()) => tracing::debug!("Autosaved {} objects to {}", self.len(), path.display()),
            Err(e) => tracing::warn!("Autosave to {} failed: {e}", path.display()),
        }
    }

    /// Load scene from autosave file
    pub fn load_autosave() -> Option<ProjectDocument> {
        let path = Self::autosave_path()?;
        if !path.exists() {
            return None;
        }
        match ProjectDocument::load_from(&path) {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::warn!("Ignoring unreadable autosave {}: {e}", path.display());
                None
            }
        }
    }
}
