//! Scene object store
//!
//! Ordered list of primitives. Append order is also the layer order shown to
//! the user. Objects are only ever removed by replacing the whole list.

mod display;
mod object_ops;
mod persistence;

pub use display::{kind_icon, kind_label, object_display_name, short_id};
pub use persistence::{ProjectDocument, PROJECT_FORMAT_VERSION};

use shared::{ObjectId, SceneObject};

/// Live scene objects
#[derive(Debug, Default)]
pub struct SceneState {
    objects: Vec<SceneObject>,
    /// Monotonically increasing revision, bumped on every mutation
    revision: u64,
}

impl SceneState {
    pub fn with_objects(objects: Vec<SceneObject>) -> Self {
        let mut scene = Self::default();
        scene.replace_all(objects);
        scene
    }

    /// Current revision (increments on every mutation)
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Deep copy of the current list
    pub fn snapshot(&self) -> Vec<SceneObject> {
        self.objects.clone()
    }

    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.objects.iter().filter(|o| o.visible).count()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.objects.iter().map(|o| &o.id)
    }

    pub(crate) fn bump(&mut self) {
        self.revision += 1;
    }
}

pub(crate) fn new_object_id() -> ObjectId {
    uuid::Uuid::new_v4().to_string()
}
