//! Lenient reading of AI-proposed primitives.
//!
//! The generative service returns loosely-typed JSON. Each entry is validated
//! field by field: an unknown kind falls back to a cube, a missing or malformed
//! vector falls back to its neutral value (zero position/rotation, unit scale),
//! a missing or malformed color falls back to [`NEUTRAL_COLOR`]. Entries that
//! are not JSON objects are dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{is_hex_color, ObjectId, PrimitiveKind, SceneObject, NEUTRAL_COLOR};

pub const DEFAULT_PART_NAME: &str = "Part";

/// One primitive proposed by the generator (no id yet)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedObject {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PrimitiveKind,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
    pub color: String,
}

impl ProposedObject {
    pub fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;

        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_PART_NAME)
            .to_string();

        let kind = fields
            .get("type")
            .or_else(|| fields.get("kind"))
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or(PrimitiveKind::Cube);

        let color = fields
            .get("color")
            .and_then(Value::as_str)
            .filter(|c| is_hex_color(c))
            .unwrap_or(NEUTRAL_COLOR)
            .to_string();

        Some(Self {
            name,
            kind,
            position: triple(fields.get("position"), [0.0; 3]),
            rotation: triple(fields.get("rotation"), [0.0; 3]),
            scale: triple(fields.get("scale"), [1.0; 3]),
            color,
        })
    }

    /// Materialize as a visible scene object with the given id
    pub fn into_scene_object(self, id: ObjectId) -> SceneObject {
        SceneObject {
            id,
            name: self.name,
            kind: self.kind,
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
            color: self.color,
            visible: true,
        }
    }
}

/// Parse an `addedObjects` value. Anything but an array yields no objects.
pub fn parse_added_objects(value: &Value) -> Vec<ProposedObject> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(ProposedObject::from_value).collect())
        .unwrap_or_default()
}

/// Exactly three finite numbers, otherwise `fallback`
fn triple(value: Option<&Value>, fallback: [f64; 3]) -> [f64; 3] {
    let Some(items) = value.and_then(Value::as_array) else {
        return fallback;
    };
    if items.len() != 3 {
        return fallback;
    }
    let mut out = [0.0; 3];
    for (slot, item) in out.iter_mut().zip(items) {
        match item.as_f64() {
            Some(v) if v.is_finite() => *slot = v,
            _ => return fallback,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_entry() {
        let value = json!({
            "name": "Front_Left_Wheel",
            "type": "CYLINDER",
            "position": [1.0, 0.5, -2.0],
            "rotation": [0.0, 0.0, 1.57],
            "scale": [0.8, 0.3, 0.8],
            "color": "#222222"
        });
        let obj = ProposedObject::from_value(&value).unwrap();
        assert_eq!(obj.name, "Front_Left_Wheel");
        assert_eq!(obj.kind, PrimitiveKind::Cylinder);
        assert_eq!(obj.position, [1.0, 0.5, -2.0]);
        assert_eq!(obj.rotation, [0.0, 0.0, 1.57]);
        assert_eq!(obj.scale, [0.8, 0.3, 0.8]);
        assert_eq!(obj.color, "#222222");
    }

    #[test]
    fn test_unknown_kind_falls_back_to_cube() {
        let obj = ProposedObject::from_value(&json!({ "type": "TORUS" })).unwrap();
        assert_eq!(obj.kind, PrimitiveKind::Cube);
    }

    #[test]
    fn test_missing_fields_use_neutral_values() {
        let obj = ProposedObject::from_value(&json!({})).unwrap();
        assert_eq!(obj.name, DEFAULT_PART_NAME);
        assert_eq!(obj.position, [0.0; 3]);
        assert_eq!(obj.rotation, [0.0; 3]);
        assert_eq!(obj.scale, [1.0; 3]);
        assert_eq!(obj.color, NEUTRAL_COLOR);
    }

    #[test]
    fn test_malformed_vectors_fall_back() {
        let obj = ProposedObject::from_value(&json!({
            "position": [1.0, 2.0],
            "rotation": "none",
            "scale": [1.0, "big", 2.0],
            "color": "red"
        }))
        .unwrap();
        assert_eq!(obj.position, [0.0; 3]);
        assert_eq!(obj.rotation, [0.0; 3]);
        assert_eq!(obj.scale, [1.0; 3]);
        assert_eq!(obj.color, NEUTRAL_COLOR);
    }

    #[test]
    fn test_parse_added_objects_skips_non_objects() {
        let value = json!([{ "name": "A", "type": "SPHERE" }, 42, null, { "name": "B" }]);
        let objects = parse_added_objects(&value);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].kind, PrimitiveKind::Sphere);
        assert_eq!(objects[1].name, "B");
    }

    #[test]
    fn test_parse_added_objects_non_array() {
        assert!(parse_added_objects(&json!({ "name": "A" })).is_empty());
        assert!(parse_added_objects(&Value::Null).is_empty());
    }

    #[test]
    fn test_into_scene_object_is_visible() {
        let obj = ProposedObject::from_value(&json!({ "name": "Roof", "type": "cone" }))
            .unwrap()
            .into_scene_object("id-1".to_string());
        assert_eq!(obj.id, "id-1");
        assert_eq!(obj.kind, PrimitiveKind::Cone);
        assert!(obj.visible);
    }
}
