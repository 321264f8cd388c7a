use super::*;

#[test]
fn empty_json_yields_defaults() {
    let cfg = DriverConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, DriverConfig::default());
    assert_eq!(cfg.resolution, [1280, 720]);
    assert_eq!(cfg.resolution_scale, 1.5);
    assert_eq!(cfg.fps_capacity, 201);
}

#[test]
fn partial_json_overrides_fields() {
    let json = r##"{ "resolution": [640, 360], "background": "#101010", "debug": true }"##;
    let cfg = DriverConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.resolution, [640, 360]);
    assert_eq!(cfg.background, Color::rgb(16, 16, 16));
    assert!(cfg.debug);
    assert_eq!(cfg.border, Color::WHITE);
}

#[test]
fn invalid_values_are_rejected() {
    for json in [
        r#"{ "resolution": [0, 720] }"#,
        r#"{ "resolution_scale": 0 }"#,
        r#"{ "fps_capacity": 1 }"#,
        r#"{ "background": "nope" }"#,
        r#"{ "unknown": 1 }"#,
    ] {
        assert!(DriverConfig::from_reader(json.as_bytes()).is_err(), "{json}");
    }
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = DriverConfig::from_path("/no/such/motionbox.json").unwrap_err();
    assert!(matches!(err, MotionError::Validation(_)));
}
