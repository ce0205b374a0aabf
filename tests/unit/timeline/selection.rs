use super::*;

#[test]
fn single_select_replaces() {
    let mut s = SelectionState::default();
    s.select_clip(&ClipId::new("a"), false);
    s.select_clip(&ClipId::new("b"), false);
    assert_eq!(s.clips(), [ClipId::new("b")]);
    assert!(!s.is_multi_select());
}

#[test]
fn multi_select_extends_without_duplicates() {
    let mut s = SelectionState::default();
    s.select_clip(&ClipId::new("a"), false);
    s.select_clip(&ClipId::new("b"), true);
    s.select_clip(&ClipId::new("a"), true);
    assert_eq!(s.clips(), [ClipId::new("a"), ClipId::new("b")]);
    assert!(s.is_multi_select());
}

#[test]
fn lists_are_independent() {
    let mut s = SelectionState::default();
    s.select_clip(&ClipId::new("c"), false);
    s.select_track(&TrackId::new("t"), false);
    s.select_composition(&CompositionId::new("m"), false);
    assert!(s.is_clip_selected(&ClipId::new("c")));
    assert!(s.is_track_selected(&TrackId::new("t")));
    assert!(s.is_composition_selected(&CompositionId::new("m")));

    s.deselect_track(&TrackId::new("t"));
    assert!(s.tracks().is_empty());
    assert_eq!(s.clips().len(), 1);

    s.clear();
    assert!(s.is_empty());
}

#[test]
fn toggle_flips_membership() {
    let mut s = SelectionState::default();
    assert!(s.toggle_clip(&ClipId::new("a")));
    assert!(!s.toggle_clip(&ClipId::new("a")));
    assert!(s.clips().is_empty());
}

#[test]
fn prune_drops_unknown_ids() {
    let mut s = SelectionState::default();
    s.select_clip(&ClipId::new("ghost"), false);
    assert!(s.prune(&Registry::default()));
    assert!(s.is_empty());
    assert!(!s.prune(&Registry::default()));
}
