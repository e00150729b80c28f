//! Top-down 2D blueprint of the scene.
//!
//! World X maps to blueprint x and world Z to blueprint y; height is
//! dropped. With the default parameters the world range [-10, 10] fills a
//! 200×200 viewport centred on the origin. The projection is a pure function
//! of the object list: same input, bit-identical output.

pub mod svg;

use serde::Serialize;
use shared::{ObjectId, PrimitiveKind, SceneObject};

/// Offset of the world origin inside the viewport
pub const ORIGIN_OFFSET: f64 = 100.0;
/// Viewport units per world meter
pub const SCALE_FACTOR: f64 = 10.0;
/// Viewport units per unit of object scale
pub const SIZE_FACTOR: f64 = 10.0;
/// Width and height of the viewport
pub const VIEWPORT_SIZE: f64 = 200.0;
/// Radius of the dot marking a cone's apex
pub const APEX_MARKER_RADIUS: f64 = 1.0;
pub const FILL_OPACITY: f64 = 0.2;
pub const STROKE_WIDTH: f64 = 1.5;
/// Stroke used in the compact preview
pub const OUTLINE_COLOR: &str = "#ffffff";

/// How shapes are stroked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeMode {
    /// White outlines (compact panel)
    #[default]
    Outline,
    /// Outline in the object's own color (expanded view)
    Colored,
}

/// Geometry of one projected object
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Outline {
    /// Axis-aligned square
    Square { center: [f64; 2], side: f64 },
    Circle { center: [f64; 2], diameter: f64 },
    /// Circle with a dot at its center (cone seen from above)
    MarkedCircle {
        center: [f64; 2],
        diameter: f64,
        marker_radius: f64,
    },
}

impl Outline {
    pub fn center(&self) -> [f64; 2] {
        match self {
            Outline::Square { center, .. }
            | Outline::Circle { center, .. }
            | Outline::MarkedCircle { center, .. } => *center,
        }
    }

    /// Side of the square or diameter of the circle
    pub fn extent(&self) -> f64 {
        match self {
            Outline::Square { side, .. } => *side,
            Outline::Circle { diameter, .. } | Outline::MarkedCircle { diameter, .. } => {
                *diameter
            }
        }
    }
}

/// A projected object ready for drawing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlueprintShape {
    pub object_id: ObjectId,
    pub name: String,
    pub outline: Outline,
    pub fill: String,
    pub fill_opacity: f64,
    pub stroke: String,
    pub stroke_width: f64,
}

/// Projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub origin_offset: f64,
    pub scale_factor: f64,
    pub size_factor: f64,
    pub stroke: StrokeMode,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            origin_offset: ORIGIN_OFFSET,
            scale_factor: SCALE_FACTOR,
            size_factor: SIZE_FACTOR,
            stroke: StrokeMode::Outline,
        }
    }
}

impl Projection {
    /// Parameters for the full-screen view
    pub fn expanded() -> Self {
        Self {
            stroke: StrokeMode::Colored,
            ..Self::default()
        }
    }

    /// World coordinate to viewport coordinate
    pub fn map_coord(&self, v: f64) -> f64 {
        self.origin_offset + v * self.scale_factor
    }

    /// Project one object; `None` when it is hidden
    pub fn project_object(&self, object: &SceneObject) -> Option<BlueprintShape> {
        if !object.visible {
            return None;
        }

        let [x, _, z] = object.position;
        let center = [self.map_coord(x), self.map_coord(z)];
        let size = object.scale[0].max(object.scale[2]) * self.size_factor;

        let (outline, stroke_width) = match object.kind {
            PrimitiveKind::Cube => (Outline::Square { center, side: size }, STROKE_WIDTH),
            PrimitiveKind::Sphere | PrimitiveKind::Cylinder => (
                Outline::Circle {
                    center,
                    diameter: size,
                },
                STROKE_WIDTH,
            ),
            PrimitiveKind::Cone => (
                Outline::MarkedCircle {
                    center,
                    diameter: size,
                    marker_radius: APEX_MARKER_RADIUS,
                },
                1.0,
            ),
        };

        let stroke = match self.stroke {
            StrokeMode::Outline => OUTLINE_COLOR.to_string(),
            StrokeMode::Colored => object.color.clone(),
        };

        Some(BlueprintShape {
            object_id: object.id.clone(),
            name: object.name.clone(),
            outline,
            fill: object.color.clone(),
            fill_opacity: FILL_OPACITY,
            stroke,
            stroke_width,
        })
    }

    /// Project every visible object, in layer order
    pub fn project(&self, objects: &[SceneObject]) -> Vec<BlueprintShape> {
        objects
            .iter()
            .filter_map(|object| self.project_object(object))
            .collect()
    }
}

/// Project with the default parameters
pub fn project(objects: &[SceneObject]) -> Vec<BlueprintShape> {
    Projection::default().project(objects)
}
