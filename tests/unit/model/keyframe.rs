use super::*;

#[test]
fn ease_endpoints_are_fixed() {
    for ease in [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
    ] {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?} at 0");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?} at 1");
    }
    assert_eq!(Ease::Hold.apply(0.7), 0.0);
    assert_eq!(Ease::Linear.apply(2.0), 1.0);
}

#[test]
fn samples_hold_outside_keys() {
    let keys = vec![
        Keyframe::new("opacity", 100.0, 0.0),
        Keyframe::new("opacity", 200.0, 1.0),
    ];
    assert_eq!(sample_keyframes(&keys, "opacity", 0.0), Some(0.0));
    assert_eq!(sample_keyframes(&keys, "opacity", 500.0), Some(1.0));
}

#[test]
fn samples_interpolate_between_keys() {
    let keys = vec![
        Keyframe::new("opacity", 200.0, 1.0),
        Keyframe::new("opacity", 0.0, 0.0),
        Keyframe::new("rotation", 0.0, 90.0),
    ];
    let v = sample_keyframes(&keys, "opacity", 100.0).unwrap();
    assert!((v - 0.5).abs() < 1e-12);
    assert_eq!(sample_keyframes(&keys, "rotation", 100.0), Some(90.0));
    assert_eq!(sample_keyframes(&keys, "scale", 100.0), None);
}

#[test]
fn hold_ease_steps() {
    let keys = vec![
        Keyframe::new("x", 0.0, 3.0).with_ease(Ease::Hold),
        Keyframe::new("x", 10.0, 9.0),
    ];
    assert_eq!(sample_keyframes(&keys, "x", 9.9), Some(3.0));
    assert_eq!(sample_keyframes(&keys, "x", 10.0), Some(9.0));
}

#[test]
fn ease_defaults_to_linear_in_json() {
    let k: Keyframe = serde_json::from_str(r#"{"property":"x","time":1.0,"value":2.0}"#).unwrap();
    assert_eq!(k.ease, Ease::Linear);
}
