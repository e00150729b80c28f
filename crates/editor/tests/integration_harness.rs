//! Integration tests for HeadlessEditor.
//!
//! Drives the editor the way a user would: edits, versions, files and the
//! top view.

use mak3d_editor_lib::blueprint::Outline;
use mak3d_editor_lib::export::ExportFormat;
use mak3d_editor_lib::fixtures;
use mak3d_editor_lib::harness::HeadlessEditor;
use mak3d_editor_lib::state::host::NoticeLevel;
use mak3d_editor_lib::state::render::RenderEvent;
use mak3d_editor_lib::state::INITIAL_VERSION_ID;
use shared::ObjectPatch;

#[test]
fn test_harness_edit_then_restore() {
    let mut h = HeadlessEditor::new();
    let id = h.add_sphere("Ball", [1.0, 1.0, 1.0]);
    h.state
        .update_object(
            &id,
            &ObjectPatch {
                color: Some("#ef4444".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(h.object(&id).unwrap().color, "#ef4444");

    let saved = h.save_version("With ball").unwrap();
    h.add_cube("Crate", [3.0, 0.0, 0.0]);
    assert_eq!(h.object_count(), 3);

    assert!(h.restore(&saved, true).unwrap());
    assert_eq!(h.object_count(), 2);
    assert_eq!(h.object(&id).unwrap().color, "#ef4444");

    assert!(h.restore(INITIAL_VERSION_ID, true).unwrap());
    assert_eq!(h.object_count(), 1);
    // restores never add versions
    assert_eq!(h.version_count(), 2);
}

#[test]
fn test_harness_versions_are_snapshots() {
    let mut h = HeadlessEditor::new();
    let saved = h.save_version("Before move").unwrap();
    h.state
        .handle_render_event(RenderEvent::TransformCommitted {
            id: "1".into(),
            position: [5.0, 0.0, 5.0],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        })
        .unwrap();

    let version = h.state.versions.get(&saved).unwrap();
    assert_eq!(version.objects()[0].position, [0.0, -0.4, 0.0]);
    assert_eq!(h.object("1").unwrap().position, [5.0, 0.0, 5.0]);
}

#[test]
fn test_harness_new_file_flow() {
    let mut h = HeadlessEditor::new();
    h.add_cone("Spire", [0.0, 2.0, 0.0]);

    assert!(!h.new_file(false, None));
    assert_eq!(h.object_count(), 2);

    assert!(h.new_file(true, Some("Fresh start")));
    assert_eq!(h.object_count(), 0);
    assert!(h.state.selection.is_empty());
    let newest = h.state.versions.last().unwrap();
    assert_eq!(newest.name(), "Fresh start");
    assert_eq!(newest.object_count(), 0);

    // the backup holds what was thrown away
    let backup = h.state.versions.iter().nth(1).unwrap();
    assert_eq!(backup.object_count(), 2);
    assert!(backup.name().starts_with("Pre-generation backup ("));
}

#[test]
fn test_harness_new_file_without_name_skips_save() {
    let mut h = HeadlessEditor::new();
    assert!(h.new_file(true, None));
    assert_eq!(h.object_count(), 0);
    // init + backup only
    assert_eq!(h.version_count(), 2);
}

#[test]
fn test_harness_import_export_cycle() {
    let mut h = HeadlessEditor::from_state(mak3d_editor_lib::state::AppState::with_objects(
        Default::default(),
        fixtures::all_primitives(),
    ));
    h.toggle("sp1");
    let json = h.export_json().unwrap();

    let mut other = HeadlessEditor::new();
    assert_eq!(other.import_json(&json).unwrap(), 4);
    let mut expected = fixtures::all_primitives();
    expected[1].visible = false;
    assert_eq!(other.state.scene.objects(), expected.as_slice());
    assert_eq!(other.host.last_notice().unwrap().level, NoticeLevel::Info);
    assert_eq!(other.host.last_notice().unwrap().text, "Project loaded (4 objects).");
}

#[test]
fn test_harness_import_rejects_bad_documents() {
    let mut h = HeadlessEditor::new();
    assert!(h.import_json(r#"{"version": "1.0"}"#).is_err());
    assert!(h.import_json(r#"{"objects": "nope"}"#).is_err());
    assert!(h.import_json("{").is_err());
    assert_eq!(h.object_count(), 1);
    assert_eq!(h.version_count(), 1);
    assert!(h.host.notices.iter().all(|n| n.level == NoticeLevel::Error));
}

#[test]
fn test_harness_blueprint_follows_scene() {
    let mut h = HeadlessEditor::empty();
    let id = h.add_cylinder("Silo", [2.0, 0.0, -1.0]);

    let shapes = h.blueprint();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].object_id, id);
    assert!(matches!(shapes[0].outline, Outline::Circle { .. }));
    assert_eq!(shapes[0].outline.center(), [120.0, 90.0]);

    h.toggle(&id);
    assert!(h.blueprint().is_empty());
}

#[test]
fn test_harness_export_formats() {
    let mut h = HeadlessEditor::new();
    h.host.answer_export(ExportFormat::BlueprintSvg);
    let svg = h.state.export(&mut h.host).unwrap().unwrap();
    assert!(svg.contents.starts_with("<svg"));
    assert!(svg.contents.contains("Base plate"));
}
