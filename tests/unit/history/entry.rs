use super::*;
use crate::foundation::core::TrackId;
use crate::model::track::TrackKind;

fn track(name: &str) -> Track {
    let mut t = Track::new(
        CompositionId::new("comp_a"),
        name,
        TrackKind::Video,
        60.0,
        0,
    );
    t.id = TrackId::new("track_a");
    t
}

fn track_change(previous: Option<Track>, new: Option<Track>) -> EntityChange {
    EntityChange::Track(Change {
        id: "track_a".to_string(),
        previous,
        new,
    })
}

#[test]
fn coalesce_keeps_first_previous_and_last_new() {
    let changes = vec![
        track_change(Some(track("a")), Some(track("b"))),
        EntityChange::Root {
            previous: None,
            new: Some(CompositionId::new("comp_a")),
        },
        track_change(Some(track("b")), Some(track("c"))),
    ];
    let out = coalesce(changes);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0], track_change(Some(track("a")), Some(track("c"))));
}

#[test]
fn coalesce_drops_round_trips() {
    let changes = vec![
        track_change(None, Some(track("a"))),
        track_change(Some(track("a")), None),
        track_change(Some(track("x")), Some(track("x"))),
    ];
    assert!(coalesce(changes).is_empty());
}

#[test]
fn revert_and_replay_are_inverse() {
    let mut registry = Registry::default();
    let entry = HistoryEntry {
        op: Operation::CreateTrack,
        label: "Create track".to_string(),
        subject: Some(EntityRef {
            kind: EntityKind::Track,
            id: "track_a".to_string(),
        }),
        changes: vec![track_change(None, Some(track("a")))],
        timestamp: 0,
    };

    entry.replay(&mut registry);
    assert_eq!(registry.track_count(), 1);
    entry.revert(&mut registry);
    assert_eq!(registry.track_count(), 0);
    assert_eq!(entry.entity_kind(), Some(EntityKind::Track));
    assert_eq!(entry.entity_id(), Some("track_a"));
}

#[test]
fn creation_and_deletion_flags() {
    assert!(track_change(None, Some(track("a"))).is_creation());
    assert!(track_change(Some(track("a")), None).is_deletion());
    let root = EntityChange::Root {
        previous: None,
        new: None,
    };
    assert!(root.entity().is_none());
    assert!(!root.is_creation());
}
