//! JSON command protocol for scripted sessions and agents.
//!
//! Each command maps onto one editor operation. Commands that would ask the
//! user something carry the answer inline (`confirm`, `name`, `format`).

use serde::{Deserialize, Serialize};
use serde_json::json;
use shared::{ObjectPatch, PrimitiveKind, SceneObject};

use crate::blueprint;
use crate::export::ExportFormat;
use crate::harness::HeadlessEditor;
use crate::state::render::RenderEvent;
use crate::state::scene::{kind_label, new_object_id, object_display_name};
use crate::state::GenerationOutcome;

/// A command an agent can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Add a primitive; omitted fields take the object defaults
    AddObject {
        name: String,
        #[serde(rename = "type")]
        kind: PrimitiveKind,
        #[serde(default)]
        position: [f64; 3],
        #[serde(default)]
        rotation: Option<[f64; 3]>,
        #[serde(default)]
        scale: Option<[f64; 3]>,
        #[serde(default)]
        color: Option<String>,
    },
    /// Merge a partial update into an object
    UpdateObject {
        id: String,
        #[serde(flatten)]
        patch: ObjectPatch,
    },
    ToggleVisibility {
        id: String,
    },
    /// Select an object, or clear with `null`
    Select {
        id: Option<String>,
    },
    ClearSelection,
    /// End of a gizmo drag, as the renderer would report it
    CommitTransform {
        id: String,
        position: [f64; 3],
        rotation: [f64; 3],
        scale: [f64; 3],
    },
    /// Save a version; no name means the prompt was cancelled
    SaveVersion {
        #[serde(default)]
        name: Option<String>,
    },
    RestoreVersion {
        id: String,
        #[serde(default)]
        confirm: bool,
    },
    NewFile {
        #[serde(default)]
        confirm: bool,
        #[serde(default)]
        name: Option<String>,
    },
    /// Load a project document given inline as JSON text
    ImportProject {
        json: String,
    },
    Export {
        format: ExportFormat,
    },
    /// Send a prompt to the generator and wait for the result
    Generate {
        prompt: String,
    },
    /// List all objects
    Inspect,
    ListVersions,
    /// The conversation log
    Transcript,
    /// Projected top view shapes
    Blueprint,
    /// Change display flags; omitted flags keep their value
    SetDisplay {
        #[serde(default)]
        show_grid: Option<bool>,
        #[serde(default)]
        show_shadows: Option<bool>,
        #[serde(default)]
        cinematic_mode: Option<bool>,
    },
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }

    fn from_result<T, E: std::fmt::Display>(
        result: Result<T, E>,
        data: impl FnOnce(T) -> serde_json::Value,
    ) -> Self {
        match result {
            Ok(value) => Self::ok_with_data(data(value)),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Execute a single command on the editor.
pub fn execute_command(editor: &mut HeadlessEditor, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::AddObject {
            name,
            kind,
            position,
            rotation,
            scale,
            color,
        } => {
            let mut object = SceneObject::new(new_object_id(), name, kind).with_position(position);
            if let Some(rotation) = rotation {
                object = object.with_rotation(rotation);
            }
            if let Some(scale) = scale {
                object = object.with_scale(scale);
            }
            if let Some(color) = color {
                object = object.with_color(color);
            }
            let id = editor.state.add_object(object);
            CommandResponse::ok_with_data(json!({ "id": id }))
        }

        AgentCommand::UpdateObject { id, patch } => {
            CommandResponse::from_result(editor.state.update_object(&id, &patch), |()| {
                json!({ "id": id })
            })
        }

        AgentCommand::ToggleVisibility { id } => {
            let result = editor.state.toggle_visibility(&id);
            CommandResponse::from_result(result, |()| {
                json!({ "visible": editor.object(&id).map(|o| o.visible) })
            })
        }

        AgentCommand::Select { id } => {
            editor.state.select(id.as_deref());
            CommandResponse::ok_with_data(json!({ "selected": editor.state.selection.primary() }))
        }

        AgentCommand::ClearSelection => {
            editor.state.selection.clear();
            CommandResponse::ok()
        }

        AgentCommand::CommitTransform {
            id,
            position,
            rotation,
            scale,
        } => {
            let event = RenderEvent::TransformCommitted {
                id,
                position,
                rotation,
                scale,
            };
            CommandResponse::from_result(editor.state.handle_render_event(event), |()| json!({}))
        }

        AgentCommand::SaveVersion { name } => {
            editor.host.clear_answers().answer_name(name.as_deref());
            let id = editor.state.save_version(&mut editor.host);
            CommandResponse::ok_with_data(json!({ "version_id": id }))
        }

        AgentCommand::RestoreVersion { id, confirm } => {
            let result = editor.restore(&id, confirm);
            CommandResponse::from_result(result, |restored| json!({ "restored": restored }))
        }

        AgentCommand::NewFile { confirm, name } => {
            let done = editor.new_file(confirm, name.as_deref());
            CommandResponse::ok_with_data(json!({ "cleared": done }))
        }

        AgentCommand::ImportProject { json } => {
            let result = editor.import_json(&json);
            CommandResponse::from_result(result, |count| json!({ "object_count": count }))
        }

        AgentCommand::Export { format } => {
            editor.host.clear_answers().answer_export(format);
            match editor.state.export(&mut editor.host) {
                Ok(Some(artifact)) => CommandResponse::ok_with_data(json!(artifact)),
                Ok(None) => CommandResponse::err("Export cancelled"),
                Err(e) => CommandResponse::err(e.to_string()),
            }
        }

        AgentCommand::Generate { prompt } => {
            if let Err(e) = editor.state.submit_prompt(&prompt) {
                return CommandResponse::err(e.to_string());
            }
            let outcome = match editor.state.wait_for_generation() {
                Some(GenerationOutcome::Applied { .. }) => "applied",
                Some(GenerationOutcome::ReplyOnly) => "reply_only",
                Some(GenerationOutcome::Failed | GenerationOutcome::Discarded) | None => "failed",
            };
            let reply = editor.state.chat.messages().last().map(|m| m.text.clone());
            CommandResponse::ok_with_data(json!({
                "outcome": outcome,
                "reply": reply,
                "object_count": editor.object_count(),
            }))
        }

        AgentCommand::Inspect => {
            let objects: Vec<serde_json::Value> = editor
                .state
                .scene
                .objects()
                .iter()
                .map(|o| {
                    json!({
                        "id": o.id,
                        "name": o.name,
                        "type": o.kind,
                        "kind": kind_label(o.kind),
                        "label": object_display_name(o),
                        "position": o.position,
                        "visible": o.visible,
                    })
                })
                .collect();
            CommandResponse::ok_with_data(json!({
                "object_count": objects.len(),
                "objects": objects,
                "selected": editor.state.selection.primary(),
                "loading": editor.state.chat.is_loading(),
            }))
        }

        AgentCommand::ListVersions => {
            let versions: Vec<serde_json::Value> = editor
                .state
                .versions
                .newest_first()
                .map(|v| {
                    json!({
                        "id": v.id(),
                        "name": v.name(),
                        "timestamp": v.timestamp().to_rfc3339(),
                        "object_count": v.object_count(),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(json!({ "versions": versions }))
        }

        AgentCommand::Transcript => {
            CommandResponse::ok_with_data(json!({ "messages": editor.state.chat.messages() }))
        }

        AgentCommand::Blueprint => {
            let shapes = blueprint::project(editor.state.scene.objects());
            CommandResponse::ok_with_data(json!({ "shapes": shapes }))
        }

        AgentCommand::SetDisplay {
            show_grid,
            show_shadows,
            cinematic_mode,
        } => {
            let display = &mut editor.state.display;
            if let Some(v) = show_grid {
                display.show_grid = v;
            }
            if let Some(v) = show_shadows {
                display.show_shadows = v;
            }
            if let Some(v) = cinematic_mode {
                display.cinematic_mode = v;
            }
            CommandResponse::ok_with_data(json!(editor.state.display))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(editor: &mut HeadlessEditor, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(editor, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    editor: &mut HeadlessEditor,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(editor, cmd))
        .collect())
}
