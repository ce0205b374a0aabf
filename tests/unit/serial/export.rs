use super::*;
use crate::{model::clip::ClipKind, model::composition::NewComposition};

fn project() -> (Engine, CompositionId, CompositionId) {
    let mut engine = Engine::default();
    let root = engine
        .create_composition(NewComposition::named("Main"))
        .unwrap();
    let child = engine
        .create_composition(NewComposition::named("Intro").parent(root.clone()))
        .unwrap();
    let root_video = engine.tracks_of(&root)[0].id.clone();
    let child_video = engine.tracks_of(&child)[0].id.clone();
    engine
        .add_clip(&root_video, "bg", 0.0, 4000.0, ClipKind::Video, None)
        .unwrap();
    engine
        .add_clip(&root_video, "nested", 4000.0, 2000.0, ClipKind::Composition, None)
        .unwrap();
    engine
        .add_clip(&child_video, "title", 0.0, 2000.0, ClipKind::Text, None)
        .unwrap();
    (engine, root, child)
}

#[test]
fn export_collects_the_subtree() {
    let (engine, root, child) = project();
    let tree = engine.export_composition(&root).unwrap();

    assert_eq!(tree.composition.id, root);
    assert_eq!(tree.tracks.len(), 2);
    assert_eq!(tree.clips.len(), 2);
    assert_eq!(tree.nested.len(), 1);
    assert_eq!(tree.nested[0].composition.id, child);
    assert_eq!(tree.nested[0].clips[0].name, "title");

    assert_eq!(tree.composition_count(), 2);
    assert_eq!(tree.track_count(), 4);
    assert_eq!(tree.clip_count(), 3);
    assert_eq!(tree.depth(), 1);
}

#[test]
fn export_of_a_child_excludes_the_parent() {
    let (engine, _, child) = project();
    let tree = engine.export_composition(&child).unwrap();
    assert_eq!(tree.composition_count(), 1);
    assert_eq!(tree.clip_count(), 1);
    assert_eq!(tree.depth(), 0);
}

#[test]
fn unknown_ids_export_nothing() {
    let (engine, _, _) = project();
    let ghost = CompositionId::new("comp_ghost");
    assert!(engine.export_composition(&ghost).is_none());
    assert!(engine.export_json(&ghost).unwrap_err().is_not_found());
}

#[test]
fn json_text_parses_back() {
    let (engine, root, _) = project();
    let json = engine.export_json(&root).unwrap();
    assert!(json.contains("\"nested\""));
    let parsed = ExportedComposition::from_json(&json).unwrap();
    assert_eq!(Some(parsed), engine.export_composition(&root));
}
