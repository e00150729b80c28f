//! Factory functions for test data.
//!
//! Convenient helpers to build `SceneObject`s and proposals for tests and
//! for scripted command sessions.

use shared::*;

// ── Object factories ────────────────────────────────────────────

/// Unit cube at the origin
pub fn unit_cube(id: &str) -> SceneObject {
    SceneObject::new(id, "Cube", PrimitiveKind::Cube)
}

/// Cube with position and scale
pub fn cube_at(id: &str, name: &str, position: [f64; 3], scale: [f64; 3]) -> SceneObject {
    SceneObject::new(id, name, PrimitiveKind::Cube)
        .with_position(position)
        .with_scale(scale)
}

pub fn sphere_at(id: &str, name: &str, position: [f64; 3]) -> SceneObject {
    SceneObject::new(id, name, PrimitiveKind::Sphere).with_position(position)
}

pub fn cylinder_at(id: &str, name: &str, position: [f64; 3]) -> SceneObject {
    SceneObject::new(id, name, PrimitiveKind::Cylinder).with_position(position)
}

pub fn cone_at(id: &str, name: &str, position: [f64; 3]) -> SceneObject {
    SceneObject::new(id, name, PrimitiveKind::Cone).with_position(position)
}

/// One of each primitive kind, spread along X
pub fn all_primitives() -> Vec<SceneObject> {
    vec![
        cube_at("c1", "Cube", [-3.0, 0.0, 0.0], [1.0; 3]),
        sphere_at("sp1", "Sphere", [-1.0, 0.0, 0.0]),
        cylinder_at("cy1", "Cylinder", [1.0, 0.0, 0.0]),
        cone_at("co1", "Cone", [3.0, 0.0, 0.0]),
    ]
}

// ── Proposal factories ──────────────────────────────────────────

pub fn proposed(name: &str, kind: PrimitiveKind, position: [f64; 3]) -> ProposedObject {
    ProposedObject {
        name: name.to_string(),
        kind,
        position,
        rotation: [0.0; 3],
        scale: [1.0; 3],
        color: NEUTRAL_COLOR.to_string(),
    }
}

/// Reply proposing a small tower: base, shaft and roof
pub fn tower_response() -> GenerateResponse {
    GenerateResponse {
        response_message: "A small tower with a pointed roof.".to_string(),
        added_objects: vec![
            proposed("Base", PrimitiveKind::Cube, [0.0, 0.25, 0.0]),
            proposed("Shaft", PrimitiveKind::Cylinder, [0.0, 1.5, 0.0]),
            proposed("Roof", PrimitiveKind::Cone, [0.0, 3.0, 0.0]),
        ],
    }
}
