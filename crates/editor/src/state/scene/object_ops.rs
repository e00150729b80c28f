//! Object mutations

use std::collections::HashSet;

use shared::{ObjectId, ObjectPatch, SceneObject};

use super::{new_object_id, SceneState};

impl SceneState {
    /// Append an object. A colliding id is replaced with a fresh one.
    pub fn add(&mut self, mut object: SceneObject) -> ObjectId {
        if object.id.is_empty() || self.contains(&object.id) {
            let fresh = new_object_id();
            tracing::warn!("Object id '{}' already taken, using '{}'", object.id, fresh);
            object.id = fresh;
        }
        let id = object.id.clone();
        self.objects.push(object);
        self.bump();
        id
    }

    /// Merge `patch` into the object with `id`. Returns false if no such object.
    pub fn update(&mut self, id: &str, patch: &ObjectPatch) -> bool {
        let Some(object) = self.get_mut(id) else {
            return false;
        };
        if object.apply(patch) {
            self.bump();
        }
        true
    }

    /// Flip the `visible` flag
    pub fn toggle_visibility(&mut self, id: &str) -> bool {
        match self.get(id).map(|o| !o.visible) {
            Some(visible) => self.set_visible(id, visible),
            None => false,
        }
    }

    /// Set the `visible` flag
    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        let Some(object) = self.get_mut(id) else {
            return false;
        };
        if object.visible != visible {
            object.visible = visible;
            self.bump();
        }
        true
    }

    /// Discard the current list and install `objects`, keeping ids unique
    pub fn replace_all(&mut self, objects: Vec<SceneObject>) {
        let mut seen: HashSet<ObjectId> = HashSet::with_capacity(objects.len());
        let mut installed = Vec::with_capacity(objects.len());
        for mut object in objects {
            if object.id.is_empty() || seen.contains(&object.id) {
                let fresh = new_object_id();
                tracing::warn!("Duplicate object id '{}' re-minted as '{}'", object.id, fresh);
                object.id = fresh;
            }
            seen.insert(object.id.clone());
            installed.push(object);
        }
        self.objects = installed;
        self.bump();
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.replace_all(Vec::new());
    }
}
