pub mod proposal;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use proposal::{parse_added_objects, ProposedObject};

/// Unique identifier of an object in the scene
pub type ObjectId = String;

/// Neutral color used when nothing better is known
pub const NEUTRAL_COLOR: &str = "#cccccc";

fn default_true() -> bool {
    true
}

fn default_scale() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

fn default_color() -> String {
    NEUTRAL_COLOR.to_string()
}

/// Primitive solid kind. Every kind is normalized to a unit bounding volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrimitiveKind {
    Cube,
    Sphere,
    Cylinder,
    Cone,
}

impl PrimitiveKind {
    pub fn all() -> &'static [PrimitiveKind] {
        &[
            PrimitiveKind::Cube,
            PrimitiveKind::Sphere,
            PrimitiveKind::Cylinder,
            PrimitiveKind::Cone,
        ]
    }

    /// Wire name (`CUBE`, `SPHERE`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Cube => "CUBE",
            PrimitiveKind::Sphere => "SPHERE",
            PrimitiveKind::Cylinder => "CYLINDER",
            PrimitiveKind::Cone => "CONE",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown primitive kind '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for PrimitiveKind {
    type Err = UnknownKind;

    /// Case-insensitive match on the wire name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PrimitiveKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownKind(trimmed.to_string()))
    }
}

/// A placeable primitive in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PrimitiveKind,
    /// World position in meters
    pub position: [f64; 3],
    /// Euler angles in radians
    #[serde(default)]
    pub rotation: [f64; 3],
    /// Per-axis scale, 1.0 = unit primitive
    #[serde(default = "default_scale")]
    pub scale: [f64; 3],
    /// Hex RGB
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl SceneObject {
    /// Unit primitive at the origin
    pub fn new(id: impl Into<ObjectId>, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: default_scale(),
            color: default_color(),
            visible: true,
        }
    }

    pub fn with_position(mut self, position: [f64; 3]) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: [f64; 3]) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: [f64; 3]) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Merge the fields set in `patch`. Returns true if anything changed.
    pub fn apply(&mut self, patch: &ObjectPatch) -> bool {
        let before = self.clone();
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
        if let Some(scale) = patch.scale {
            self.scale = scale;
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        *self != before
    }
}

/// Partial attributes for an object update. The id is never patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<PrimitiveKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl ObjectPatch {
    /// Patch produced by a committed gizmo transform
    pub fn transform(position: [f64; 3], rotation: [f64; 3], scale: [f64; 3]) -> Self {
        Self {
            position: Some(position),
            rotation: Some(rotation),
            scale: Some(scale),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// `#rgb` or `#rrggbb`
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Generation request sent to the AI collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub objects: Vec<SceneObject>,
}

/// Generation reply: natural-language text plus a proposed replacement set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub response_message: String,
    #[serde(default)]
    pub added_objects: Vec<ProposedObject>,
}

impl GenerateResponse {
    /// Read a loosely-shaped reply. Never fails: a malformed `addedObjects`
    /// means no objects were produced.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let response_message = value
            .get("responseMessage")
            .or_else(|| value.get("text"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();
        let added_objects = value
            .get("addedObjects")
            .map(parse_added_objects)
            .unwrap_or_default();
        Self {
            response_message,
            added_objects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names() {
        let json = serde_json::to_string(&PrimitiveKind::Cylinder).unwrap();
        assert_eq!(json, r#""CYLINDER""#);
        let back: PrimitiveKind = serde_json::from_str(r#""CONE""#).unwrap();
        assert_eq!(back, PrimitiveKind::Cone);
    }

    #[test]
    fn test_kind_from_str_case_insensitive() {
        assert_eq!("sphere".parse::<PrimitiveKind>(), Ok(PrimitiveKind::Sphere));
        assert_eq!(" Cube ".parse::<PrimitiveKind>(), Ok(PrimitiveKind::Cube));
        assert_eq!(
            "pyramid".parse::<PrimitiveKind>(),
            Err(UnknownKind("pyramid".to_string()))
        );
    }

    #[test]
    fn test_scene_object_uses_type_key() {
        let obj = SceneObject::new("1", "Plate", PrimitiveKind::Cube);
        let json = serde_json::to_value(&obj).unwrap();
        assert_eq!(json["type"], "CUBE");
        assert_eq!(json["visible"], true);
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_scene_object_defaults_when_reading() {
        let json = r#"{"id": "a", "name": "A", "type": "SPHERE", "position": [1, 2, 3]}"#;
        let obj: SceneObject = serde_json::from_str(json).unwrap();
        assert_eq!(obj.rotation, [0.0; 3]);
        assert_eq!(obj.scale, [1.0; 3]);
        assert_eq!(obj.color, NEUTRAL_COLOR);
        assert!(obj.visible);
    }

    #[test]
    fn test_apply_patch_merges_only_given_fields() {
        let mut obj = SceneObject::new("1", "Box", PrimitiveKind::Cube).with_color("#ff0000");
        let changed = obj.apply(&ObjectPatch {
            position: Some([1.0, 0.0, 2.0]),
            ..ObjectPatch::default()
        });
        assert!(changed);
        assert_eq!(obj.position, [1.0, 0.0, 2.0]);
        assert_eq!(obj.color, "#ff0000");
        assert_eq!(obj.name, "Box");
    }

    #[test]
    fn test_apply_empty_patch_is_noop() {
        let mut obj = SceneObject::new("1", "Box", PrimitiveKind::Cube);
        assert!(!obj.apply(&ObjectPatch::default()));
        assert!(ObjectPatch::default().is_empty());
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#A1b2C3"));
        assert!(!is_hex_color("fff"));
        assert!(!is_hex_color("#ggg"));
        assert!(!is_hex_color("#12345"));
    }

    #[test]
    fn test_generate_response_camel_case() {
        let resp = GenerateResponse {
            response_message: "ok".into(),
            added_objects: vec![],
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("responseMessage"));
        assert!(json.contains("addedObjects"));
    }

    #[test]
    fn test_generate_response_from_malformed_value() {
        let value = serde_json::json!({
            "responseMessage": "Here is a tower",
            "addedObjects": "not a list"
        });
        let resp = GenerateResponse::from_value(&value);
        assert_eq!(resp.response_message, "Here is a tower");
        assert!(resp.added_objects.is_empty());
    }
}
