use super::*;

#[test]
fn generated_ids_are_prefixed_and_unique() {
    let a = ClipId::generate();
    let b = ClipId::generate();
    assert!(a.as_str().starts_with("clip_"));
    assert_ne!(a, b);
    assert!(CompositionId::generate().as_str().starts_with("comp_"));
    assert!(TrackId::generate().as_str().starts_with("track_"));
}

#[test]
fn ids_serialize_as_plain_strings() {
    let id = TrackId::new("track_a");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"track_a\"");
    let back: TrackId = serde_json::from_str("\"track_a\"").unwrap();
    assert_eq!(back, id);
    assert_eq!(id.to_string(), "track_a");
}

#[test]
fn entity_kind_display() {
    assert_eq!(EntityKind::Composition.to_string(), "composition");
    assert_eq!(EntityKind::Track.to_string(), "track");
    assert_eq!(EntityKind::Clip.to_string(), "clip");
}

#[test]
fn clock_is_after_2020() {
    assert!(now_ms() > 1_577_836_800_000);
}
