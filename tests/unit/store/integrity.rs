use super::*;
use crate::{
    engine::Engine,
    foundation::core::{ClipId, CompositionId, TrackId},
    model::clip::ClipKind,
    model::composition::NewComposition,
};

fn consistent() -> (Registry, CompositionId, CompositionId, TrackId, ClipId) {
    let mut engine = Engine::default();
    let root = engine
        .create_composition(NewComposition::named("Root"))
        .unwrap();
    let child = engine
        .create_composition(NewComposition::named("Child").parent(root.clone()))
        .unwrap();
    let track = engine.tracks_of(&root)[0].id.clone();
    let clip = engine
        .add_clip(&track, "a", 0.0, 1000.0, ClipKind::Video, None)
        .unwrap();
    (engine.registry().clone(), root, child, track, clip)
}

#[test]
fn engine_built_documents_are_consistent() {
    let (registry, ..) = consistent();
    assert!(registry.check_integrity().is_empty());
    assert!(Registry::default().check_integrity().is_empty());
}

#[test]
fn broken_nesting_is_reported_from_both_sides() {
    let (mut registry, root, child, ..) = consistent();
    registry
        .compositions
        .get_mut(&root)
        .unwrap()
        .nested_ids
        .clear();
    let found = registry.check_integrity();
    assert_eq!(
        found,
        [Violation::ParentMismatch {
            parent: root.to_string(),
            child: child.to_string(),
        }]
    );

    registry.compositions.get_mut(&child).unwrap().parent_id = None;
    registry.root = Some(child.clone());
    registry
        .compositions
        .get_mut(&root)
        .unwrap()
        .nested_ids
        .push(child.clone());
    let found = registry.check_integrity();
    assert!(found.contains(&Violation::NestedMismatch {
        parent: root.to_string(),
        child: child.to_string(),
    }));
}

#[test]
fn membership_mismatches_are_reported() {
    let (mut registry, root, _, track, clip) = consistent();

    registry.tracks.get_mut(&track).unwrap().clip_ids.push(clip.clone());
    registry.clips.get_mut(&clip).unwrap().composition_id = CompositionId::new("comp_x");
    let found = registry.check_integrity();
    assert!(found.contains(&Violation::Duplicate {
        owner: track.to_string(),
        member: clip.to_string(),
    }));
    assert!(found.contains(&Violation::ClipComposition {
        clip: clip.to_string(),
        expected: root.to_string(),
        found: "comp_x".to_string(),
    }));

    registry.tracks.get_mut(&track).unwrap().clip_ids.clear();
    registry
        .compositions
        .get_mut(&root)
        .unwrap()
        .track_ids
        .retain(|t| t != &track);
    let found = registry.check_integrity();
    assert!(found.contains(&Violation::OrphanClip {
        clip: clip.to_string(),
        track: track.to_string(),
    }));
    assert!(found.contains(&Violation::OrphanTrack {
        track: track.to_string(),
        composition: root.to_string(),
    }));
}

#[test]
fn dangling_root_is_reported() {
    let (mut registry, ..) = consistent();
    registry.root = Some(CompositionId::new("comp_gone"));
    let found = registry.check_integrity();
    assert_eq!(found, [Violation::BadRoot("comp_gone".to_string())]);
    assert_eq!(
        found[0].to_string(),
        "root 'comp_gone' is missing or has a parent"
    );
}
