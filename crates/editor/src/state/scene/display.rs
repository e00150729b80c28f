//! Display helper functions for the layer list

use shared::{PrimitiveKind, SceneObject};

/// Human label for a primitive kind
pub fn kind_label(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Cube => "Cube",
        PrimitiveKind::Sphere => "Sphere",
        PrimitiveKind::Cylinder => "Cylinder",
        PrimitiveKind::Cone => "Cone",
    }
}

/// Get icon for a primitive kind
pub fn kind_icon(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Cube => "[C]",
        PrimitiveKind::Sphere => "[S]",
        PrimitiveKind::Cylinder => "[Y]",
        PrimitiveKind::Cone => "[K]",
    }
}

/// Get display name for an object; hidden objects are marked
pub fn object_display_name(object: &SceneObject) -> String {
    let hidden = if object.visible { "" } else { " (hidden)" };
    format!(
        "{} {} ({}){hidden}",
        kind_icon(object.kind),
        object.name,
        short_id(&object.id)
    )
}

/// Get shortened ID (first 8 characters)
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
