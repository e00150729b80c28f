//! SVG rendering of a projected blueprint

use std::fmt::Write;

use super::{BlueprintShape, Outline, ORIGIN_OFFSET, VIEWPORT_SIZE};

const AXIS_COLOR: &str = "#475569";
const AXIS_WIDTH: f64 = 0.5;

/// Render shapes into a standalone SVG document with the two axis lines
pub fn render_svg(shapes: &[BlueprintShape]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_svg(&mut out, shapes);
    out
}

fn write_svg(out: &mut String, shapes: &[BlueprintShape]) -> std::fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {VIEWPORT_SIZE} {VIEWPORT_SIZE}" fill="none">"#
    )?;
    writeln!(
        out,
        r#"  <line x1="0" y1="{ORIGIN_OFFSET}" x2="{VIEWPORT_SIZE}" y2="{ORIGIN_OFFSET}" stroke="{AXIS_COLOR}" stroke-width="{AXIS_WIDTH}"/>"#
    )?;
    writeln!(
        out,
        r#"  <line x1="{ORIGIN_OFFSET}" y1="0" x2="{ORIGIN_OFFSET}" y2="{VIEWPORT_SIZE}" stroke="{AXIS_COLOR}" stroke-width="{AXIS_WIDTH}"/>"#
    )?;

    for shape in shapes {
        let paint = format!(
            r#"stroke="{}" fill="{}" fill-opacity="{}" stroke-width="{}""#,
            escape(&shape.stroke),
            escape(&shape.fill),
            shape.fill_opacity,
            shape.stroke_width
        );
        writeln!(out, r#"  <g id="{}">"#, escape(&shape.object_id))?;
        writeln!(out, "    <title>{}</title>", escape(&shape.name))?;
        match &shape.outline {
            Outline::Square { center, side } => writeln!(
                out,
                r#"    <rect x="{}" y="{}" width="{side}" height="{side}" {paint}/>"#,
                center[0] - side / 2.0,
                center[1] - side / 2.0,
            )?,
            Outline::Circle { center, diameter } => writeln!(
                out,
                r#"    <circle cx="{}" cy="{}" r="{}" {paint}/>"#,
                center[0],
                center[1],
                diameter / 2.0
            )?,
            Outline::MarkedCircle {
                center,
                diameter,
                marker_radius,
            } => {
                writeln!(
                    out,
                    r#"    <circle cx="{}" cy="{}" r="{}" {paint}/>"#,
                    center[0],
                    center[1],
                    diameter / 2.0
                )?;
                writeln!(
                    out,
                    r#"    <circle cx="{}" cy="{}" r="{marker_radius}" fill="{}"/>"#,
                    center[0],
                    center[1],
                    escape(&shape.stroke)
                )?;
            }
        }
        writeln!(out, "  </g>")?;
    }

    writeln!(out, "</svg>")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
