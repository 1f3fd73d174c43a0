use super::*;

#[test]
fn defaults_match_the_vertical_short_format() {
    let cfg = RunConfig::default();
    assert_eq!(cfg.canvas, Canvas::VERTICAL_1080P);
    assert_eq!(cfg.fps, Fps::default());
    assert_eq!(cfg.line_height(), 75.0);
    assert_eq!(cfg.max_text_width(), 980.0);
    assert_eq!(cfg.overlay_alpha, 180);
    assert_eq!(cfg.background_color, Color::rgb(0x1a, 0x1a, 0x1a));
    assert_eq!(cfg.script_path(), PathBuf::from("./script.txt"));
    assert_eq!(cfg.video_path(), PathBuf::from("./output_video.mp4"));
    cfg.validate().unwrap();
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("run.json");
    std::fs::write(
        &p,
        r##"{ "font_size": 64, "text_color": [255, 220, 0], "background_color": "#000000" }"##,
    )
    .unwrap();

    let cfg = RunConfig::from_path(&p).unwrap();
    assert_eq!(cfg.font_size, 64.0);
    assert_eq!(cfg.text_color, Color::rgb(255, 220, 0));
    assert_eq!(cfg.background_color, Color::BLACK);
    assert_eq!(cfg.crossfade_secs, 0.5);
    assert_eq!(cfg.default_query, "technology");
}

#[test]
fn unknown_fields_and_bad_colours_are_config_errors() {
    let dir = tempfile::tempdir().unwrap();

    let p = dir.path().join("typo.json");
    std::fs::write(&p, r#"{ "fontsize": 64 }"#).unwrap();
    assert!(matches!(RunConfig::from_path(&p), Err(ReelError::Config(_))));

    let p = dir.path().join("colour.json");
    std::fs::write(&p, r##"{ "text_color": "#12" }"##).unwrap();
    assert!(matches!(RunConfig::from_path(&p), Err(ReelError::Config(_))));

    assert!(matches!(
        RunConfig::from_path(&dir.path().join("missing.json")),
        Err(ReelError::Config(_))
    ));
}

#[test]
fn validate_rejects_bad_values() {
    let odd = RunConfig {
        canvas: Canvas {
            width: 1081,
            height: 1920,
        },
        ..RunConfig::default()
    };
    assert!(odd.validate().is_err());

    let negative_fade = RunConfig {
        crossfade_secs: -0.5,
        ..RunConfig::default()
    };
    assert!(negative_fade.validate().is_err());

    let no_room = RunConfig {
        margin_px: 540,
        ..RunConfig::default()
    };
    assert!(no_room.validate().is_err());

    let zero_duration = RunConfig {
        target_duration_secs: 0.0,
        ..RunConfig::default()
    };
    assert!(zero_duration.validate().is_err());
}

#[test]
fn round_trips_through_json() {
    let cfg = RunConfig {
        parallel: false,
        ..RunConfig::default()
    };
    let text = serde_json::to_string(&cfg).unwrap();
    let back: RunConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(back, cfg);
}
