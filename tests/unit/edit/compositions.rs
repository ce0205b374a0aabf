use super::*;
use crate::{foundation::core::EntityKind, foundation::error::CompError, model::clip::ClipKind};

fn engine_with_root() -> (Engine, CompositionId) {
    let mut engine = Engine::default();
    let root = engine
        .create_composition(NewComposition::named("Main"))
        .unwrap();
    (engine, root)
}

#[test]
fn first_composition_becomes_root_with_default_tracks() {
    let (engine, root) = engine_with_root();

    assert_eq!(engine.registry().root_id(), Some(&root));
    let comp = engine.composition(&root).unwrap();
    assert_eq!(comp.width, 1920);
    assert_eq!(comp.height, 1080);
    assert_eq!(comp.duration, 60_000.0);
    assert_eq!(comp.frame_rate, 30.0);
    assert!(comp.created_at > 0);

    let tracks = engine.tracks_of(&root);
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].name, "Video 1");
    assert_eq!(tracks[0].kind, TrackKind::Video);
    assert_eq!(tracks[0].height, 60.0);
    assert_eq!(tracks[1].name, "Audio 1");
    assert_eq!(tracks[1].kind, TrackKind::Audio);
    assert_eq!(tracks[1].height, 40.0);

    assert_eq!(engine.history().undo_count(), 1);
    let entry = engine.last_entry().unwrap();
    assert_eq!(entry.op, Operation::CreateComposition);
    assert_eq!(entry.entity_kind(), Some(EntityKind::Composition));
    assert_eq!(entry.entity_id(), Some(root.as_str()));
    assert!(engine.check_integrity().is_empty());
}

#[test]
fn later_parentless_composition_is_not_root() {
    let (mut engine, root) = engine_with_root();
    let other = engine
        .create_composition(NewComposition::named("Other"))
        .unwrap();
    assert_eq!(engine.registry().root_id(), Some(&root));
    assert!(!engine.registry().is_root(&other));
}

#[test]
fn overrides_win_over_defaults() {
    let mut engine = Engine::default();
    let id = engine
        .create_composition(
            NewComposition::named("Small")
                .size(640, 360)
                .duration(5000.0)
                .frame_rate(25.0),
        )
        .unwrap();
    let comp = engine.composition(&id).unwrap();
    assert_eq!((comp.width, comp.height), (640, 360));
    assert_eq!(comp.duration, 5000.0);
    assert_eq!(comp.frame_rate, 25.0);
}

#[test]
fn create_with_parent_nests_in_one_step() {
    let (mut engine, root) = engine_with_root();
    let child = engine
        .create_composition(NewComposition::named("Child").parent(root.clone()))
        .unwrap();

    assert_eq!(engine.composition(&child).unwrap().parent_id, Some(root.clone()));
    assert_eq!(engine.composition(&root).unwrap().nested_ids, [child.clone()]);
    assert_eq!(engine.history().undo_count(), 2);

    assert!(engine.undo());
    assert!(engine.composition(&child).is_none());
    assert!(engine.composition(&root).unwrap().nested_ids.is_empty());
    assert_eq!(engine.registry().track_count(), 2);
    assert!(engine.check_integrity().is_empty());
}

#[test]
fn unknown_parent_is_rejected_without_side_effects() {
    let (mut engine, _) = engine_with_root();
    let err = engine
        .create_composition(NewComposition::named("Lost").parent(CompositionId::new("comp_x")))
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(engine.registry().composition_count(), 1);
    assert_eq!(engine.registry().track_count(), 2);
    assert_eq!(engine.history().undo_count(), 1);
}

#[test]
fn degenerate_settings_are_rejected() {
    let mut engine = Engine::default();
    let err = engine
        .create_composition(NewComposition::named("Empty").size(0, 100))
        .unwrap_err();
    assert!(matches!(err, CompError::Validation(_)));
    assert!(engine.registry().is_empty());
    assert!(engine.registry().root_id().is_none());
    assert!(!engine.can_undo());
}

#[test]
fn update_applies_patch_and_records() {
    let (mut engine, root) = engine_with_root();
    let created = engine.composition(&root).unwrap().updated_at;

    let patch = CompositionPatch {
        name: Some("Renamed".to_string()),
        frame_rate: Some(60.0),
        ..CompositionPatch::default()
    };
    engine.update_composition(&root, &patch).unwrap();

    let comp = engine.composition(&root).unwrap();
    assert_eq!(comp.name, "Renamed");
    assert_eq!(comp.frame_rate, 60.0);
    assert!(comp.updated_at >= created);
    assert_eq!(engine.last_entry().unwrap().op, Operation::UpdateComposition);

    assert!(engine.undo());
    assert_eq!(engine.composition(&root).unwrap().name, "Main");
}

#[test]
fn empty_patch_records_nothing() {
    let (mut engine, root) = engine_with_root();
    engine
        .update_composition(&root, &CompositionPatch::default())
        .unwrap();
    assert_eq!(engine.history().undo_count(), 1);
}

#[test]
fn update_unknown_is_not_found() {
    let mut engine = Engine::default();
    let err = engine
        .update_composition(&CompositionId::new("comp_x"), &CompositionPatch::default())
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn delete_is_recursive_and_undoable() {
    let (mut engine, root) = engine_with_root();
    let child = engine
        .create_composition(NewComposition::named("Child").parent(root.clone()))
        .unwrap();
    let grandchild = engine
        .create_composition(NewComposition::named("Grandchild").parent(child.clone()))
        .unwrap();
    let track = engine.tracks_of(&grandchild)[0].id.clone();
    engine
        .add_clip(&track, "deep", 0.0, 1000.0, ClipKind::Video, None)
        .unwrap();
    assert_eq!(engine.registry().composition_count(), 3);
    assert_eq!(engine.registry().track_count(), 6);

    engine.delete_composition(&root).unwrap();
    assert!(engine.registry().is_empty());
    assert!(engine.registry().root_id().is_none());
    assert_eq!(engine.last_entry().unwrap().entity_id(), Some(root.as_str()));

    assert!(engine.undo());
    assert_eq!(engine.registry().composition_count(), 3);
    assert_eq!(engine.registry().track_count(), 6);
    assert_eq!(engine.registry().clip_count(), 1);
    assert_eq!(engine.registry().root_id(), Some(&root));
    assert!(engine.check_integrity().is_empty());

    assert!(engine.redo());
    assert!(engine.registry().is_empty());
}

#[test]
fn deleting_a_child_unlinks_it_from_the_parent() {
    let (mut engine, root) = engine_with_root();
    let child = engine
        .create_composition(NewComposition::named("Child").parent(root.clone()))
        .unwrap();
    engine.delete_composition(&child).unwrap();
    assert!(engine.composition(&root).unwrap().nested_ids.is_empty());
    assert_eq!(engine.registry().root_id(), Some(&root));
    assert_eq!(engine.registry().track_count(), 2);
    assert!(engine.check_integrity().is_empty());
}

#[test]
fn delete_unknown_is_not_found() {
    let mut engine = Engine::default();
    let err = engine
        .delete_composition(&CompositionId::new("comp_x"))
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(!engine.can_undo());
}
