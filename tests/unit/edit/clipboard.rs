use super::*;
use crate::{
    foundation::core::AssetId,
    model::clip::{ClipKind, ClipPatch},
    model::composition::NewComposition,
    model::keyframe::Keyframe,
};

fn setup() -> (Engine, TrackId, TrackId) {
    let mut engine = Engine::default();
    let comp = engine
        .create_composition(NewComposition::named("Main"))
        .unwrap();
    let tracks: Vec<TrackId> = engine.tracks_of(&comp).iter().map(|t| t.id.clone()).collect();
    (engine, tracks[0].clone(), tracks[1].clone())
}

#[test]
fn copy_takes_an_owned_snapshot() {
    let (mut engine, video, _) = setup();
    let id = engine
        .add_clip(&video, "a", 0.0, 1000.0, ClipKind::Video, None)
        .unwrap();
    engine.copy_clip(&id).unwrap();

    let rename = ClipPatch {
        name: Some("changed".to_string()),
        ..ClipPatch::default()
    };
    engine.update_clip(&id, &rename).unwrap();

    let item = &engine.clipboard().items()[0];
    assert_eq!(item.source_id, id);
    assert_eq!(item.clip.name, "a");
    assert!(engine.clipboard().has_content());
}

#[test]
fn copy_unknown_clip_fails() {
    let (mut engine, _, _) = setup();
    assert!(engine.copy_clip(&ClipId::new("clip_x")).unwrap_err().is_not_found());
    assert!(!engine.clipboard().has_content());
}

#[test]
fn copy_clips_skips_unknown_and_keeps_old_content_on_miss() {
    let (mut engine, video, _) = setup();
    let a = engine
        .add_clip(&video, "a", 0.0, 1000.0, ClipKind::Video, None)
        .unwrap();
    let b = engine
        .add_clip(&video, "b", 1000.0, 1000.0, ClipKind::Video, None)
        .unwrap();

    assert_eq!(engine.copy_clips(&[a.clone(), ClipId::new("clip_x"), b.clone()]), 2);
    assert_eq!(engine.clipboard().len(), 2);

    assert_eq!(engine.copy_clips(&[ClipId::new("clip_y")]), 0);
    assert_eq!(engine.clipboard().len(), 2);
}

#[test]
fn paste_recreates_clips_as_one_step() {
    let (mut engine, video, audio) = setup();
    let a = engine
        .add_clip(
            &video,
            "a",
            0.0,
            1000.0,
            ClipKind::Image,
            Some(AssetId::new("asset_a")),
        )
        .unwrap();
    let b = engine
        .add_clip(&video, "b", 1000.0, 500.0, ClipKind::Video, None)
        .unwrap();
    let patch = ClipPatch {
        trim_start: Some(100.0),
        keyframes: Some(vec![Keyframe::new("opacity", 0.0, 0.5)]),
        ..ClipPatch::default()
    };
    engine.update_clip(&a, &patch).unwrap();
    engine.copy_clips(&[a.clone(), b.clone()]);
    let before = engine.history().undo_count();

    let pasted = engine.paste_clips(&audio, 4000.0).unwrap();
    assert_eq!(pasted.len(), 2);
    assert_eq!(engine.history().undo_count(), before + 1);
    assert_eq!(engine.last_entry().unwrap().op, Operation::Paste);

    let first = engine.clip(&pasted[0]).unwrap();
    assert_ne!(first.id, a);
    assert_eq!(first.name, "a (Copy)");
    assert_eq!(first.track_id, audio);
    assert_eq!((first.start_time, first.end_time), (4000.0, 5000.0));
    assert_eq!(first.kind, ClipKind::Image);
    assert_eq!(first.asset_id, Some(AssetId::new("asset_a")));
    assert_eq!(first.trim_start, 100.0);
    assert_eq!(first.keyframes.len(), 1);
    let second = engine.clip(&pasted[1]).unwrap();
    assert_eq!((second.start_time, second.end_time), (4000.0, 4500.0));
    assert_eq!(engine.track(&audio).unwrap().clip_ids, pasted);
    assert!(engine.check_integrity().is_empty());

    assert!(engine.undo());
    assert!(pasted.iter().all(|id| engine.clip(id).is_none()));
    assert!(engine.track(&audio).unwrap().clip_ids.is_empty());
    assert!(engine.clip(&a).is_some());
}

#[test]
fn paste_rejects_unknown_track_and_empty_clipboard_is_a_noop() {
    let (mut engine, video, _) = setup();
    let before = engine.history().undo_count();
    assert!(engine.paste_clips(&video, 0.0).unwrap().is_empty());
    assert_eq!(engine.history().undo_count(), before);

    let a = engine
        .add_clip(&video, "a", 0.0, 1000.0, ClipKind::Video, None)
        .unwrap();
    engine.copy_clip(&a).unwrap();
    let err = engine
        .paste_clips(&TrackId::new("track_x"), 0.0)
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(engine.registry().clip_count(), 1);
}

#[test]
fn cut_removes_and_undo_restores() {
    let (mut engine, video, audio) = setup();
    let a = engine
        .add_clip(&video, "a", 0.0, 1000.0, ClipKind::Video, None)
        .unwrap();
    let b = engine
        .add_clip(&video, "b", 1000.0, 1000.0, ClipKind::Video, None)
        .unwrap();

    assert_eq!(engine.cut_clips(&[a.clone(), b.clone()]).unwrap(), 2);
    assert_eq!(engine.registry().clip_count(), 0);
    assert_eq!(engine.last_entry().unwrap().op, Operation::Cut);
    assert_eq!(engine.clipboard().len(), 2);

    let pasted = engine.paste_clips(&audio, 0.0).unwrap();
    assert_eq!(pasted.len(), 2);

    assert!(engine.undo());
    assert!(engine.undo());
    assert_eq!(engine.track(&video).unwrap().clip_ids, [a, b]);
    assert!(engine.check_integrity().is_empty());

    assert_eq!(engine.cut_clips(&[ClipId::new("clip_x")]).unwrap(), 0);
}

#[test]
fn copy_selection_and_clear() {
    let (mut engine, video, _) = setup();
    let a = engine
        .add_clip(&video, "a", 0.0, 1000.0, ClipKind::Video, None)
        .unwrap();
    engine.select_clip(&a, false).unwrap();
    assert_eq!(engine.copy_selection(), 1);
    assert_eq!(engine.clipboard().items()[0].source_id, a);

    engine.clear_clipboard();
    assert!(!engine.clipboard().has_content());
    assert!(engine.clipboard().is_empty());
}
