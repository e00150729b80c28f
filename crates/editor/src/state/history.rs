//! Version history: append-only ledger of named scene snapshots

use chrono::{DateTime, Local, Utc};
use shared::SceneObject;

pub type VersionId = String;

/// Immutable named snapshot of the scene
#[derive(Debug, Clone, PartialEq)]
pub struct Version {
    id: VersionId,
    name: String,
    timestamp: DateTime<Utc>,
    objects: Vec<SceneObject>,
}

impl Version {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

/// Stored versions, in creation order
#[derive(Debug, Default)]
pub struct VersionState {
    versions: Vec<Version>,
    /// Tie-breaker for ids minted within the same millisecond
    next_seq: u64,
}

impl VersionState {
    /// Save a deep copy of `objects` under `name`. A blank name saves nothing.
    pub fn save(&mut self, name: &str, objects: &[SceneObject]) -> Option<VersionId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let timestamp = Utc::now();
        let id = self.mint_id(&timestamp);
        Some(self.push(id, name.to_string(), timestamp, objects))
    }

    /// Snapshot taken right before a destructive replacement.
    /// Returns the version id and its generated name.
    pub fn backup(&mut self, objects: &[SceneObject]) -> (VersionId, String) {
        let timestamp = Utc::now();
        let name = backup_name(&timestamp.with_timezone(&Local));
        let id = self.mint_id(&timestamp);
        (self.push(id, name.clone(), timestamp, objects), name)
    }

    /// Seed the ledger with a fixed id (initial layout)
    pub(crate) fn bootstrap(&mut self, id: &str, name: &str, objects: &[SceneObject]) {
        self.push(id.to_string(), name.to_string(), Utc::now(), objects);
    }

    fn mint_id(&mut self, timestamp: &DateTime<Utc>) -> VersionId {
        let id = format!("v{}-{}", timestamp.timestamp_millis(), self.next_seq);
        self.next_seq += 1;
        id
    }

    fn push(
        &mut self,
        id: VersionId,
        name: String,
        timestamp: DateTime<Utc>,
        objects: &[SceneObject],
    ) -> VersionId {
        tracing::info!("Saved version '{name}' ({} objects)", objects.len());
        self.versions.push(Version {
            id: id.clone(),
            name,
            timestamp,
            objects: objects.to_vec(),
        });
        id
    }

    pub fn get(&self, id: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.id == id)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn last(&self) -> Option<&Version> {
        self.versions.last()
    }

    /// Creation order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Version> {
        self.versions.iter()
    }

    /// Presentation order, most recent first
    pub fn newest_first(&self) -> impl Iterator<Item = &Version> {
        self.versions.iter().rev()
    }

    /// Name offered when the user saves manually
    pub fn suggested_name(&self) -> String {
        format!("Version {}", self.versions.len() + 1)
    }
}

/// "Pre-generation backup (14:03:27)"
pub fn backup_name(at: &DateTime<Local>) -> String {
    format!("Pre-generation backup ({})", at.format("%H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::PrimitiveKind;
    use std::collections::HashSet;

    fn objects() -> Vec<SceneObject> {
        vec![SceneObject::new("a", "A", PrimitiveKind::Cube)]
    }

    #[test]
    fn test_save_appends_in_creation_order() {
        let mut versions = VersionState::default();
        versions.save("first", &objects());
        versions.save("second", &[]);
        let names: Vec<_> = versions.iter().map(Version::name).collect();
        assert_eq!(names, vec!["first", "second"]);

        let newest: Vec<_> = versions.newest_first().map(Version::name).collect();
        assert_eq!(newest, vec!["second", "first"]);
    }

    #[test]
    fn test_blank_name_is_noop() {
        let mut versions = VersionState::default();
        assert!(versions.save("", &objects()).is_none());
        assert!(versions.save("   ", &objects()).is_none());
        assert!(versions.is_empty());
    }

    #[test]
    fn test_ids_unique_within_same_instant() {
        let mut versions = VersionState::default();
        let ids: HashSet<_> = (0..50)
            .filter_map(|i| versions.save(&format!("v{i}"), &[]))
            .collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_saved_version_is_a_deep_copy() {
        let mut versions = VersionState::default();
        let mut live = objects();
        let id = versions.save("snap", &live).unwrap();

        live[0].position = [5.0, 5.0, 5.0];
        live[0].name = "changed".into();

        let saved = versions.get(&id).unwrap();
        assert_eq!(saved.objects(), objects().as_slice());
    }

    #[test]
    fn test_backup_name_format() {
        let at = Local.with_ymd_and_hms(2026, 3, 1, 14, 3, 27).unwrap();
        assert_eq!(backup_name(&at), "Pre-generation backup (14:03:27)");
    }

    #[test]
    fn test_backup_records_objects() {
        let mut versions = VersionState::default();
        let (id, name) = versions.backup(&objects());
        let saved = versions.get(&id).unwrap();
        assert_eq!(saved.name(), name);
        assert!(name.starts_with("Pre-generation backup ("));
        assert_eq!(saved.object_count(), 1);
    }

    #[test]
    fn test_suggested_name() {
        let mut versions = VersionState::default();
        versions.bootstrap("init", "Initial layout", &objects());
        assert_eq!(versions.suggested_name(), "Version 2");
        assert_eq!(versions.get("init").unwrap().name(), "Initial layout");
    }
}
