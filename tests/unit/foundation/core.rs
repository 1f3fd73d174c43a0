use super::*;

#[test]
fn canvas_validation() {
    assert!(Canvas::new(1080, 1920).is_ok());
    assert!(Canvas::new(0, 1920).is_err());
    assert!(Canvas::new(1081, 1920).is_err());
    assert!(Canvas::new(70_000, 2).is_err());
    assert_eq!(Canvas::VERTICAL_1080P.rgba_len(), 1080 * 1920 * 4);
}

#[test]
fn fps_conversions() {
    let fps = Fps::default();
    assert_eq!((fps.num, fps.den), (24, 1));
    assert_eq!(fps.secs_to_frames_round(42.3), 1015);
    assert!((fps.frames_to_secs(48) - 2.0).abs() < 1e-12);

    let ntsc = Fps::new(30_000, 1001).unwrap();
    assert!((ntsc.as_f64() - 29.97).abs() < 0.001);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(24, 0).is_err());
}

#[test]
fn negative_seconds_round_to_zero_frames() {
    assert_eq!(Fps::default().secs_to_frames_round(-3.0), 0);
}
