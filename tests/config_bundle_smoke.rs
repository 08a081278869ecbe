use magwell_engine::SlideConfig;

#[test]
fn config_bundle_smoke_parses_and_has_core_invariants() {
    let json = r#"{
        "acceptableName": "Filter",
        "snapDistance": 0.08,
        "unsnapDistance": 0.2,
        "ejectForce": 2.0,
        "attachCue": { "cue": "mag_in", "volume": 0.6 },
        "detachCue": { "cue": "mag_out", "volume": 0.45 }
    }"#;

    let config = SlideConfig::from_bundle_json(json).expect("bundle should parse");

    assert_eq!(config.acceptable_name, "Filter");
    assert_eq!(config.snap_distance, 0.08);
    assert_eq!(config.unsnap_distance, 0.2);
    assert_eq!(config.eject_force, 2.0);
    assert_eq!(config.attach_cue.cue, "mag_in");
    assert_eq!(config.detach_cue.volume, 0.45);

    // Round-trips through the manifest for host UI consumption.
    let manifest = config.manifest_json();
    assert!(manifest.contains("\"snapDistance\":0.08"));
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let config = SlideConfig::from_bundle_json(r#"{ "snapDistance": 0.05 }"#)
        .expect("partial bundle should parse");

    assert_eq!(config.snap_distance, 0.05);
    assert_eq!(config.unsnap_distance, 0.15);
    assert_eq!(config.acceptable_name, "Filter");
    assert_eq!(config.attach_cue.cue, "slide_attach");
}

#[test]
fn default_cue_volume_applies_when_omitted() {
    let config = SlideConfig::from_bundle_json(r#"{ "attachCue": { "cue": "clunk" } }"#)
        .expect("bundle should parse");
    assert_eq!(config.attach_cue.cue, "clunk");
    assert_eq!(config.attach_cue.volume, 0.5);
}

#[test]
fn inverted_hysteresis_band_is_rejected() {
    let err = SlideConfig::from_bundle_json(r#"{ "snapDistance": 0.2, "unsnapDistance": 0.1 }"#)
        .expect_err("inverted band must fail");
    assert!(err.contains("unsnapDistance"));
}

#[test]
fn nonsense_values_are_rejected() {
    assert!(SlideConfig::from_bundle_json(r#"{ "snapDistance": 0.0 }"#).is_err());
    assert!(SlideConfig::from_bundle_json(r#"{ "ejectForce": -1.0 }"#).is_err());
    assert!(SlideConfig::from_bundle_json(r#"{ "acceptableName": "" }"#).is_err());
    assert!(SlideConfig::from_bundle_json("not json").is_err());
}
