pub mod chat;
pub mod generation;
pub mod history;
pub mod host;
pub mod render;
pub mod scene;
pub mod selection;
pub mod settings;

use shared::{ObjectId, ObjectPatch, PrimitiveKind, SceneObject};

use crate::error::{EditorError, EditorResult};
use crate::export::{self, ExportArtifact};
use crate::generator::GenerationDriver;
use chat::ChatState;
pub use generation::{GenerationOutcome, SubmitError};
use history::{VersionId, VersionState};
use host::{Confirm, Host, Notice};
use render::{RenderEvent, RenderInput};
use scene::{ProjectDocument, SceneState};
use selection::SelectionState;
pub use settings::{AppSettings, DisplayFlags};

/// Id of the version seeded at startup
pub const INITIAL_VERSION_ID: &str = "init";
pub const INITIAL_VERSION_NAME: &str = "Initial layout";

/// The scene every fresh editor starts with
pub fn initial_objects() -> Vec<SceneObject> {
    vec![SceneObject::new("1", "Base plate", PrimitiveKind::Cube)
        .with_position([0.0, -0.4, 0.0])
        .with_scale([4.0, 0.2, 4.0])
        .with_color("#475569")]
}

/// Combined application state; every user action goes through here
#[derive(Debug)]
pub struct AppState {
    pub scene: SceneState,
    pub selection: SelectionState,
    pub versions: VersionState,
    pub chat: ChatState,
    pub display: DisplayFlags,
    pub settings: AppSettings,
    pub(crate) generation: Option<GenerationDriver>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

impl AppState {
    /// Fresh editor with the initial layout, recorded as the first version
    pub fn new(settings: AppSettings) -> Self {
        Self::with_objects(settings, initial_objects())
    }

    /// Editor opened on `objects`, which also become the first version
    pub fn with_objects(settings: AppSettings, objects: Vec<SceneObject>) -> Self {
        let scene = SceneState::with_objects(objects);
        let mut versions = VersionState::default();
        versions.bootstrap(INITIAL_VERSION_ID, INITIAL_VERSION_NAME, scene.objects());
        Self {
            scene,
            selection: SelectionState::default(),
            versions,
            chat: ChatState::default(),
            display: settings.display,
            settings,
            generation: None,
        }
    }

    /// Attach the generation collaborator
    pub fn set_generator(&mut self, driver: GenerationDriver) {
        self.generation = Some(driver);
    }

    pub fn has_generator(&self) -> bool {
        self.generation.is_some()
    }

    // ── Scene ─────────────────────────────────────────────────

    /// Append an object and select it
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = self.scene.add(object);
        self.selection.select(id.clone());
        id
    }

    /// Default new cube, dropped just above the ground
    pub fn add_default_cube(&mut self) -> ObjectId {
        let cube = SceneObject::new(scene::new_object_id(), "New cube", PrimitiveKind::Cube)
            .with_position([0.0, 0.5, 0.0])
            .with_color("#cbd5e1");
        self.add_object(cube)
    }

    pub fn update_object(&mut self, id: &str, patch: &ObjectPatch) -> EditorResult<()> {
        if self.scene.update(id, patch) {
            Ok(())
        } else {
            Err(EditorError::UnknownObject(id.to_string()))
        }
    }

    pub fn toggle_visibility(&mut self, id: &str) -> EditorResult<()> {
        if self.scene.toggle_visibility(id) {
            Ok(())
        } else {
            Err(EditorError::UnknownObject(id.to_string()))
        }
    }

    /// Select an existing object; unknown ids clear the selection
    pub fn select(&mut self, id: Option<&str>) {
        match id {
            Some(id) if self.scene.contains(id) => self.selection.select(id.to_string()),
            _ => self.selection.clear(),
        }
    }

    /// Back up a non-empty `objects` list before it is thrown away
    pub(crate) fn backup_before_replace(&mut self, objects: &[SceneObject]) -> Option<VersionId> {
        if objects.is_empty() {
            return None;
        }
        let (id, name) = self.versions.backup(objects);
        self.chat
            .push_system(format!("Previous scene backed up to history: \"{name}\""));
        Some(id)
    }

    /// Destructive replacement with an automatic backup of the current scene
    pub fn replace_scene(&mut self, objects: Vec<SceneObject>) -> Option<VersionId> {
        let current = self.scene.snapshot();
        let backup = self.backup_before_replace(&current);
        self.scene.replace_all(objects);
        self.selection.clear();
        backup
    }

    // ── Files ─────────────────────────────────────────────────

    /// Start over with an empty scene and an empty conversation.
    /// Returns false if the user declined.
    pub fn new_file(&mut self, host: &mut dyn Host) -> bool {
        if self.chat.is_loading() {
            tracing::warn!("Refusing new file while a generation is in progress");
            host.notify(Notice::error("Wait for the current generation to finish."));
            return false;
        }
        if !host.confirm(Confirm::NewFile) {
            return false;
        }
        self.chat.clear();
        self.replace_scene(Vec::new());
        tracing::info!("Started a new project");
        self.save_version(host);
        true
    }

    /// Ask for a name and store the current scene under it
    pub fn save_version(&mut self, host: &mut dyn Host) -> Option<VersionId> {
        let suggested = self.versions.suggested_name();
        let name = host.request_name(&suggested)?;
        self.versions.save(&name, self.scene.objects())
    }

    /// Replace the scene with a stored version after confirmation.
    /// No backup is taken. Returns Ok(false) if the user declined.
    pub fn restore_version(&mut self, version_id: &str, host: &mut dyn Host) -> EditorResult<bool> {
        let version = self
            .versions
            .get(version_id)
            .ok_or_else(|| EditorError::UnknownVersion(version_id.to_string()))?;
        let name = version.name().to_string();
        let objects = version.objects().to_vec();

        if !host.confirm(Confirm::RestoreVersion { name: name.clone() }) {
            return Ok(false);
        }

        self.scene.replace_all(objects);
        self.selection.clear();
        self.chat.push_system(format!("Restored version: {name}"));
        tracing::info!("Restored version '{name}'");
        Ok(true)
    }

    /// Load a project document. Failures are reported to the host and leave
    /// the editor untouched.
    pub fn import_project(&mut self, json: &str, host: &mut dyn Host) -> EditorResult<usize> {
        let doc = match ProjectDocument::parse(json) {
            Ok(doc) => doc,
            Err(e) => {
                let text = match &e {
                    EditorError::InvalidDocument(_) => "Invalid project file format.",
                    _ => "Failed to parse the project file.",
                };
                host.notify(Notice::error(text));
                return Err(e);
            }
        };
        let count = doc.objects.len();
        self.replace_scene(doc.objects);
        host.notify(Notice::info(format!("Project loaded ({count} objects).")));
        Ok(count)
    }

    /// Export in the format the host picks; `None` if it picked nothing
    pub fn export(&self, host: &mut dyn Host) -> EditorResult<Option<ExportArtifact>> {
        let Some(format) = host.choose_export() else {
            return Ok(None);
        };
        export::export(format, self.scene.objects()).map(Some)
    }

    // ── Renderer ──────────────────────────────────────────────

    pub fn render_input(&self) -> RenderInput {
        RenderInput {
            objects: self
                .scene
                .objects()
                .iter()
                .filter(|o| o.visible)
                .cloned()
                .collect(),
            selected_id: self.selection.primary().cloned(),
            flags: self.display,
        }
    }

    pub fn handle_render_event(&mut self, event: RenderEvent) -> EditorResult<()> {
        match event {
            RenderEvent::SelectionChanged { id } => {
                self.select(id.as_deref());
                Ok(())
            }
            RenderEvent::TransformCommitted {
                id,
                position,
                rotation,
                scale,
            } => self.update_object(&id, &ObjectPatch::transform(position, rotation, scale)),
        }
    }

    pub fn toggle_grid(&mut self) {
        self.display.show_grid = !self.display.show_grid;
    }

    pub fn toggle_shadows(&mut self) {
        self.display.show_shadows = !self.display.show_shadows;
    }

    pub fn toggle_cinematic(&mut self) {
        self.display.cinematic_mode = !self.display.cinematic_mode;
    }
}
