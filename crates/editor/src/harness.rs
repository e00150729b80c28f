//! Headless editor for programmatic scene manipulation.
//!
//! Pairs an [`AppState`] with a [`ScriptedHost`] so confirmations and name
//! prompts can be answered ahead of time. Used by the command protocol, the
//! stdin driver and the integration tests.

use std::sync::Arc;

use shared::{ObjectId, PrimitiveKind, SceneObject};

use crate::blueprint::{self, BlueprintShape};
use crate::error::EditorResult;
use crate::generator::{GenerationDriver, Generator};
use crate::state::host::ScriptedHost;
use crate::state::scene::new_object_id;
use crate::state::{AppSettings, AppState};

/// Headless editor: state plus a scripted host
#[derive(Debug)]
pub struct HeadlessEditor {
    pub state: AppState,
    pub host: ScriptedHost,
}

impl HeadlessEditor {
    /// Editor with the initial layout and default settings
    pub fn new() -> Self {
        Self::from_state(AppState::default())
    }

    /// Editor with no objects at all
    pub fn empty() -> Self {
        Self::from_state(AppState::with_objects(AppSettings::default(), Vec::new()))
    }

    pub fn from_state(state: AppState) -> Self {
        Self {
            state,
            host: ScriptedHost::new(),
        }
    }

    /// Attach a generator whose requests run on `runtime`
    pub fn with_generator(
        mut self,
        generator: Arc<dyn Generator>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        self.state
            .set_generator(GenerationDriver::new(generator, runtime));
        self
    }

    // ── Scene manipulation ────────────────────────────────────

    /// Add a unit primitive at `position` and return its id
    pub fn add_primitive(&mut self, name: &str, kind: PrimitiveKind, position: [f64; 3]) -> ObjectId {
        self.state
            .add_object(SceneObject::new(new_object_id(), name, kind).with_position(position))
    }

    pub fn add_cube(&mut self, name: &str, position: [f64; 3]) -> ObjectId {
        self.add_primitive(name, PrimitiveKind::Cube, position)
    }

    pub fn add_sphere(&mut self, name: &str, position: [f64; 3]) -> ObjectId {
        self.add_primitive(name, PrimitiveKind::Sphere, position)
    }

    pub fn add_cylinder(&mut self, name: &str, position: [f64; 3]) -> ObjectId {
        self.add_primitive(name, PrimitiveKind::Cylinder, position)
    }

    pub fn add_cone(&mut self, name: &str, position: [f64; 3]) -> ObjectId {
        self.add_primitive(name, PrimitiveKind::Cone, position)
    }

    /// Flip visibility; false if the id is unknown
    pub fn toggle(&mut self, id: &str) -> bool {
        self.state.toggle_visibility(id).is_ok()
    }

    // ── Versions and files ────────────────────────────────────

    /// Save the scene under `name` without going through a prompt
    pub fn save_version(&mut self, name: &str) -> Option<String> {
        self.host.clear_answers().answer_name(Some(name));
        self.state.save_version(&mut self.host)
    }

    /// Restore a version, answering the confirmation with `confirm`
    pub fn restore(&mut self, version_id: &str, confirm: bool) -> EditorResult<bool> {
        self.host.clear_answers().answer_confirm(confirm);
        self.state.restore_version(version_id, &mut self.host)
    }

    /// New file, answering the confirmation and the follow-up name prompt
    pub fn new_file(&mut self, confirm: bool, version_name: Option<&str>) -> bool {
        self.host.clear_answers().answer_confirm(confirm);
        if confirm {
            self.host.answer_name(version_name);
        }
        self.state.new_file(&mut self.host)
    }

    pub fn import_json(&mut self, json: &str) -> EditorResult<usize> {
        self.state.import_project(json, &mut self.host)
    }

    /// Current scene as a project document
    pub fn export_json(&self) -> EditorResult<String> {
        self.state.scene.to_document().to_json()
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn object_count(&self) -> usize {
        self.state.scene.len()
    }

    pub fn visible_count(&self) -> usize {
        self.state.scene.visible_count()
    }

    pub fn version_count(&self) -> usize {
        self.state.versions.len()
    }

    pub fn message_count(&self) -> usize {
        self.state.chat.messages().len()
    }

    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.state.scene.get(id)
    }

    pub fn blueprint(&self) -> Vec<BlueprintShape> {
        blueprint::project(self.state.scene.objects())
    }
}

impl Default for HeadlessEditor {
    fn default() -> Self {
        Self::new()
    }
}
