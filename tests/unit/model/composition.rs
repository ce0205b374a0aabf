use super::*;

fn comp() -> Composition {
    Composition {
        id: CompositionId::new("comp_a"),
        name: "Main".to_string(),
        width: 1920,
        height: 1080,
        duration: 10_000.0,
        frame_rate: 30.0,
        track_ids: Vec::new(),
        parent_id: None,
        nested_ids: Vec::new(),
        current_time: 0.0,
        metadata: BTreeMap::new(),
        created_at: 0,
        updated_at: 0,
    }
}

#[test]
fn frame_count_rounds_up() {
    let mut c = comp();
    assert_eq!(c.frame_count(), 300);
    c.duration = 1010.0;
    assert_eq!(c.frame_count(), 31);
}

#[test]
fn validate_rejects_degenerate_settings() {
    assert!(comp().validate().is_ok());

    let mut c = comp();
    c.width = 0;
    assert!(c.validate().is_err());

    let mut c = comp();
    c.duration = f64::NAN;
    assert!(c.validate().is_err());

    let mut c = comp();
    c.frame_rate = -1.0;
    assert!(c.validate().is_err());
}

#[test]
fn patch_merges_metadata_and_clamps_time() {
    let mut c = comp();
    c.metadata
        .insert("color".to_string(), serde_json::json!("red"));

    let mut patch = CompositionPatch {
        name: Some("Renamed".to_string()),
        current_time: Some(-5.0),
        ..CompositionPatch::default()
    };
    patch
        .metadata
        .insert("color".to_string(), serde_json::Value::Null);
    patch
        .metadata
        .insert("label".to_string(), serde_json::json!(3));
    patch.apply(&mut c);

    assert_eq!(c.name, "Renamed");
    assert_eq!(c.current_time, 0.0);
    assert!(!c.metadata.contains_key("color"));
    assert_eq!(c.metadata["label"], serde_json::json!(3));
}

#[test]
fn builder_sets_overrides() {
    let request = NewComposition::named("Intro")
        .size(640, 360)
        .duration(5000.0)
        .frame_rate(25.0)
        .parent(CompositionId::new("comp_root"));
    assert_eq!(request.width, Some(640));
    assert_eq!(request.height, Some(360));
    assert_eq!(request.duration, Some(5000.0));
    assert_eq!(request.frame_rate, Some(25.0));
    assert_eq!(request.parent, Some(CompositionId::new("comp_root")));
}
