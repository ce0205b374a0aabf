use super::*;
use crate::model::keyframe::Keyframe;

fn clip(start: f64, end: f64) -> Clip {
    Clip {
        id: ClipId::new("clip_a"),
        name: "A".to_string(),
        track_id: TrackId::new("track_a"),
        composition_id: CompositionId::new("comp_a"),
        start_time: start,
        end_time: end,
        trim_start: 0.0,
        trim_end: end - start,
        kind: ClipKind::Video,
        asset_id: None,
        visual: VisualProps::default(),
        audio: AudioProps::default(),
        effects: Vec::new(),
        keyframes: vec![
            Keyframe::new("opacity", 0.0, 0.0),
            Keyframe::new("opacity", 1000.0, 1.0),
        ],
        selected: false,
        locked: false,
    }
}

#[test]
fn duration_and_ranges() {
    let c = clip(1000.0, 3000.0);
    assert_eq!(c.duration(), 2000.0);
    assert!(c.contains(1000.0));
    assert!(!c.contains(3000.0));
    assert!(c.overlaps(2500.0, 4000.0));
    assert!(!c.overlaps(3000.0, 4000.0));
}

#[test]
fn timeline_sampling_is_clip_local() {
    let c = clip(1000.0, 3000.0);
    assert_eq!(c.sample_at_timeline("opacity", 1500.0), Some(0.5));
    assert_eq!(c.sample("opacity", 1500.0), Some(1.0));
}

#[test]
fn timing_validation() {
    assert!(validate_timing(0.0, 1.0).is_ok());
    assert!(validate_timing(1.0, 1.0).is_err());
    assert!(validate_timing(-1.0, 1.0).is_err());
    assert!(validate_timing(0.0, f64::INFINITY).is_err());
}

#[test]
fn patch_only_touches_set_fields() {
    let mut c = clip(0.0, 10.0);
    let before = c.clone();
    ClipPatch {
        name: Some("B".to_string()),
        asset_id: Some(Some(AssetId::new("asset_x"))),
        ..ClipPatch::default()
    }
    .apply(&mut c);
    assert_eq!(c.name, "B");
    assert_eq!(c.asset_id, Some(AssetId::new("asset_x")));
    assert_eq!(c.start_time, before.start_time);
    assert_eq!(c.keyframes, before.keyframes);

    ClipPatch {
        asset_id: Some(None),
        ..ClipPatch::default()
    }
    .apply(&mut c);
    assert_eq!(c.asset_id, None);
}

#[test]
fn serde_defaults_fill_optional_fields() {
    let json = r#"{
        "id": "clip_x",
        "name": "X",
        "track_id": "track_x",
        "composition_id": "comp_x",
        "start_time": 0.0,
        "end_time": 500.0
    }"#;
    let c: Clip = serde_json::from_str(json).unwrap();
    assert_eq!(c.visual, VisualProps::default());
    assert_eq!(c.audio.volume, 1.0);
    assert_eq!(c.kind, ClipKind::Video);
    assert!(c.effects.is_empty());
}
