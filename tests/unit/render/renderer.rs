use super::*;
use crate::encode::InMemorySink;

fn solid(canvas: Canvas, rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(
        canvas.width,
        canvas.height,
        image::Rgba([rgb[0], rgb[1], rgb[2], 255]),
    )
}

fn small() -> (Canvas, Fps) {
    (Canvas::new(8, 4).unwrap(), Fps::new(10, 1).unwrap())
}

#[test]
fn pushes_frame_count_frames_in_order() {
    let (canvas, fps) = small();
    let frames = vec![solid(canvas, [255, 0, 0]), solid(canvas, [0, 0, 255])];
    let tl = Timeline::build(frames, 2.0, 0.5).unwrap();
    let mut sink = InMemorySink::new();

    let stats = Renderer::new(canvas, fps)
        .render(tl, None, &mut sink)
        .unwrap();

    assert_eq!(stats.frames_total, 20);
    assert_eq!(stats.frames_blended, 5);
    assert!(sink.is_finished());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (8, 4));
    assert!(cfg.audio.is_none());
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, (0..20).collect::<Vec<_>>());
}

#[test]
fn stills_reproduce_clip_pixels_and_fades_blend() {
    let (canvas, fps) = small();
    let red = solid(canvas, [255, 0, 0]);
    let blue = solid(canvas, [0, 0, 255]);
    let tl = Timeline::build(vec![red.clone(), blue.clone()], 2.0, 0.5).unwrap();
    let mut sink = InMemorySink::new();
    Renderer::new(canvas, fps)
        .render(tl, None, &mut sink)
        .unwrap();

    let frames = sink.frames();
    assert_eq!(frames[0].1, red);
    assert_eq!(frames[9].1, red);
    // t = 1.0 starts the fade into the second clip at progress 0.
    assert_eq!(frames[10].1, red);
    let mid = frames[12].1.get_pixel(0, 0).0;
    assert!(mid[0] > 0 && mid[2] > 0);
    assert_eq!(mid[3], 255);
    assert_eq!(frames[15].1, blue);
    assert_eq!(frames[19].1, blue);
}

#[test]
fn wrong_sized_clip_is_a_render_error() {
    let (canvas, fps) = small();
    let tl = Timeline::build(vec![RgbaImage::new(2, 2)], 1.0, 0.0).unwrap();
    let mut sink = InMemorySink::new();
    let err = Renderer::new(canvas, fps)
        .render(tl, None, &mut sink)
        .unwrap_err();
    assert!(matches!(err, ReelError::Render(_)));
}
