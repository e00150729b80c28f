use serde::{Deserialize, Serialize};
use shared::SceneObject;

use crate::blueprint::{svg::render_svg, Projection};
use crate::error::EditorResult;
use crate::state::scene::ProjectDocument;

/// Header line of the text blueprint
const BLUEPRINT_HEADER: &str = "MAK3D BLUEPRINT DATA";

/// Export formats offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Re-importable project document (.json)
    Project,
    /// Human-readable list of planar positions (.txt)
    Blueprint,
    /// Top view drawing (.svg)
    BlueprintSvg,
}

impl ExportFormat {
    pub fn all() -> &'static [ExportFormat] {
        &[
            ExportFormat::Project,
            ExportFormat::Blueprint,
            ExportFormat::BlueprintSvg,
        ]
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Project => "json",
            ExportFormat::Blueprint => "txt",
            ExportFormat::BlueprintSvg => "svg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Project => "application/json",
            ExportFormat::Blueprint => "text/plain",
            ExportFormat::BlueprintSvg => "image/svg+xml",
        }
    }
}

/// Finished export, ready to be written or downloaded by the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

/// Build an artifact for `objects` in the given format
pub fn export(format: ExportFormat, objects: &[SceneObject]) -> EditorResult<ExportArtifact> {
    let (file_name, contents) = match format {
        ExportFormat::Project => {
            let doc = ProjectDocument::new(objects.to_vec());
            (
                format!("mak3d_project_{}.json", doc.timestamp),
                doc.to_json()?,
            )
        }
        ExportFormat::Blueprint => ("blueprint.txt".to_string(), blueprint_text(objects)),
        ExportFormat::BlueprintSvg => (
            "blueprint.svg".to_string(),
            render_svg(&Projection::expanded().project(objects)),
        ),
    };
    Ok(ExportArtifact {
        format,
        file_name,
        mime_type: format.mime_type(),
        contents,
    })
}

/// One `name: x=.., z=..` line per visible object. Not meant for re-import.
pub fn blueprint_text(objects: &[SceneObject]) -> String {
    let lines: Vec<String> = objects
        .iter()
        .filter(|o| o.visible)
        .map(|o| format!("{}: x={}, z={}", o.name, o.position[0], o.position[2]))
        .collect();
    format!("{BLUEPRINT_HEADER}\n\n{}", lines.join("\n"))
}
