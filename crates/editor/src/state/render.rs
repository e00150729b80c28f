//! Data exchanged with the 3D render collaborator
//!
//! The renderer only reads [`RenderInput`] and reports [`RenderEvent`]s back.
//! It never mutates scene state itself.

use serde::{Deserialize, Serialize};
use shared::{ObjectId, SceneObject};

use super::settings::DisplayFlags;

/// What the renderer draws
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderInput {
    /// Visible objects in layer order
    pub objects: Vec<SceneObject>,
    pub selected_id: Option<ObjectId>,
    pub flags: DisplayFlags,
}

/// Discrete events reported by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RenderEvent {
    /// Pick result; `None` when empty space was clicked
    SelectionChanged { id: Option<ObjectId> },
    /// Gizmo drag finished with the object's final transform
    TransformCommitted {
        id: ObjectId,
        position: [f64; 3],
        rotation: [f64; 3],
        scale: [f64; 3],
    },
}
