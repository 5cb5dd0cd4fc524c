//! Settings file loading and fatal validation rules

use pretty_assertions::assert_eq;

use ergowatch::types::{ConfigError, Settings, Vec3};

fn settings_json(overrides: &[(&str, &str)]) -> String {
    let mut fields = vec![
        ("alert_time", "10.0".to_string()),
        ("neutral_position", "[0.0, 0.0, 0.7]".to_string()),
        ("neutral_radius", "0.1".to_string()),
        ("ipd", "0.063".to_string()),
        ("downscale_factor", "2.0".to_string()),
        ("frame_width", "1280".to_string()),
        ("frame_height", "720".to_string()),
        ("camera_calibration", r#"{ "f": 500.0 }"#.to_string()),
    ];
    for (key, value) in overrides {
        for field in fields.iter_mut() {
            if field.0 == *key {
                field.1 = value.to_string();
            }
        }
    }
    let body: Vec<String> = fields
        .iter()
        .map(|(k, v)| format!("\"{}\": {}", k, v))
        .collect();
    format!("{{ {} }}", body.join(", "))
}

fn parse(json: &str) -> Settings {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_well_formed_settings_validate() {
    let settings = parse(&settings_json(&[]));
    assert_eq!(settings.validate(), Ok(()));

    let calib = settings.calibration();
    assert_eq!(calib.interpupillary_distance_m, 0.063);
    assert_eq!(calib.focal_length_px, 500.0);
    assert_eq!(calib.frame_width_px, 1280.0);
    assert_eq!(calib.frame_height_px, 720.0);
    assert_eq!(calib.downscale_factor, 2.0);

    let zone = settings.neutral_zone();
    assert_eq!(zone.center, Vec3::new(0.0, 0.0, 0.7));
    assert_eq!(zone.radius_m, 0.1);

    assert_eq!(settings.alert().alert_delay_s, 10.0);
}

#[test]
fn test_unknown_fields_are_tolerated() {
    // The capture collaborator keeps its own keys (e.g. camera_id,
    // cascade paths) in the same file
    let json = r#"{
        "camera_id": 0,
        "path_face_cascade": "models/face.xml",
        "alert_time": 10.0,
        "neutral_position": [0.0, 0.0, 0.7],
        "neutral_radius": 0.1,
        "ipd": 0.063,
        "downscale_factor": 1.0,
        "frame_width": 640,
        "frame_height": 480,
        "camera_calibration": { "f": 500.0 }
    }"#;
    let settings = parse(json);
    assert_eq!(settings.validate(), Ok(()));
}

#[test]
fn test_missing_field_fails_parse() {
    let json = r#"{ "alert_time": 10.0 }"#;
    let result: Result<Settings, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

#[test]
fn test_zero_ipd_is_fatal() {
    let settings = parse(&settings_json(&[("ipd", "0.0")]));
    assert_eq!(settings.validate(), Err(ConfigError::IpdNotPositive(0.0)));
}

#[test]
fn test_negative_ipd_is_fatal() {
    let settings = parse(&settings_json(&[("ipd", "-0.063")]));
    assert_eq!(settings.validate(), Err(ConfigError::IpdNotPositive(-0.063)));
}

#[test]
fn test_zero_focal_length_is_fatal() {
    let settings = parse(&settings_json(&[("camera_calibration", r#"{ "f": 0.0 }"#)]));
    assert_eq!(
        settings.validate(),
        Err(ConfigError::FocalLengthNotPositive(0.0))
    );
}

#[test]
fn test_negative_radius_is_fatal() {
    let settings = parse(&settings_json(&[("neutral_radius", "-0.1")]));
    assert_eq!(settings.validate(), Err(ConfigError::RadiusNegative(-0.1)));
}

#[test]
fn test_zero_radius_is_allowed() {
    let settings = parse(&settings_json(&[("neutral_radius", "0.0")]));
    assert_eq!(settings.validate(), Ok(()));
}

#[test]
fn test_downscale_below_one_is_fatal() {
    let settings = parse(&settings_json(&[("downscale_factor", "0.25")]));
    assert_eq!(settings.validate(), Err(ConfigError::DownscaleBelowOne(0.25)));
}

#[test]
fn test_negative_alert_delay_is_fatal() {
    let settings = parse(&settings_json(&[("alert_time", "-5.0")]));
    assert_eq!(settings.validate(), Err(ConfigError::AlertDelayNegative(-5.0)));
}

#[test]
fn test_zero_frame_dimensions_are_fatal() {
    let settings = parse(&settings_json(&[("frame_width", "0")]));
    assert_eq!(
        settings.validate(),
        Err(ConfigError::FrameWidthNotPositive(0.0))
    );

    let settings = parse(&settings_json(&[("frame_height", "0")]));
    assert_eq!(
        settings.validate(),
        Err(ConfigError::FrameHeightNotPositive(0.0))
    );
}

#[test]
fn test_load_reports_missing_file() {
    let result = Settings::load("definitely/not/a/settings.json");
    assert!(matches!(result, Err(ConfigError::Io(_, _))));
}

#[test]
fn test_error_messages_name_the_value() {
    let err = ConfigError::IpdNotPositive(-0.063);
    assert!(err.to_string().contains("-0.063"));
    let err = ConfigError::RadiusNegative(-0.1);
    assert!(err.to_string().contains("-0.1"));
}
