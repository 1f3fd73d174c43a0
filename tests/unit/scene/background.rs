use super::*;
use crate::ReelError;

fn canvas() -> Canvas {
    Canvas::new(100, 200).unwrap()
}

const FILL: Color = Color::rgb(0x1a, 0x1a, 0x1a);

struct Solid(image::Rgba<u8>, u32, u32);

impl ImageSource for Solid {
    fn fetch(&self, _query: &str, _canvas: Canvas) -> ReelResult<DynamicImage> {
        Ok(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            self.1, self.2, self.0,
        )))
    }
}

#[test]
fn short_image_is_letterboxed() {
    // 50x25 scales to 100x50, centred on a 100x200 canvas.
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(50, 25, image::Rgba([255, 0, 0, 255])));
    let out = fit_to_canvas(&img, canvas(), FILL).unwrap();
    assert_eq!(out.dimensions(), (100, 200));
    assert_eq!(out.get_pixel(50, 10).0, [0x1a, 0x1a, 0x1a, 255]);
    assert_eq!(out.get_pixel(50, 100).0, [255, 0, 0, 255]);
    assert_eq!(out.get_pixel(50, 190).0, [0x1a, 0x1a, 0x1a, 255]);
}

#[test]
fn tall_image_is_centre_cropped() {
    // 10x40 scales to 100x400; only the middle 200 rows survive.
    let mut src = RgbaImage::from_pixel(10, 40, image::Rgba([0, 0, 255, 255]));
    for y in 0..10 {
        for x in 0..10 {
            src.put_pixel(x, y, image::Rgba([0, 255, 0, 255]));
        }
    }
    let out = fit_to_canvas(&DynamicImage::ImageRgba8(src), canvas(), FILL).unwrap();
    assert_eq!(out.dimensions(), (100, 200));
    assert_eq!(out.get_pixel(50, 100).0, [0, 0, 255, 255]);
    // The green top quarter is cropped away entirely.
    assert!(out.pixels().all(|p| p.0[1] < 200));
}

#[test]
fn output_is_always_opaque() {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(100, 200, image::Rgba([9, 9, 9, 10])));
    let out = fit_to_canvas(&img, canvas(), FILL).unwrap();
    assert!(out.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn fetch_failure_falls_back_to_solid_colour() {
    let out = acquire_background(&NoImages, "moon tides", canvas(), FILL);
    assert!(out.is_fallback());
    assert!(out.reason().unwrap().contains("moon tides"));
    let img = out.into_value();
    assert_eq!(img.dimensions(), (100, 200));
    assert!(img.pixels().all(|p| p.0 == [0x1a, 0x1a, 0x1a, 255]));
}

#[test]
fn fetched_image_is_fitted() {
    let src = Solid(image::Rgba([1, 2, 3, 255]), 300, 600);
    let out = acquire_background(&src, "q", canvas(), FILL);
    assert!(!out.is_fallback());
    assert_eq!(out.value().dimensions(), (100, 200));
}

#[test]
fn no_images_reports_a_service_error() {
    let err = NoImages.fetch("x", canvas()).unwrap_err();
    assert!(matches!(err, ReelError::Service(_)));
}

#[test]
fn degenerate_aspect_is_rejected_before_resizing() {
    // 1x100000 would scale to 100x10_000_000 on a 100x200 canvas.
    let thin = DynamicImage::ImageRgba8(RgbaImage::new(1, 100_000));
    let err = fit_to_canvas(&thin, canvas(), FILL).unwrap_err();
    assert!(matches!(err, ReelError::Render(_)));

    // Exactly four canvas heights is still accepted.
    let tall = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 80, image::Rgba([5, 5, 5, 255])));
    assert_eq!(fit_to_canvas(&tall, canvas(), FILL).unwrap().dimensions(), (100, 200));
}

#[test]
fn unusable_fetched_image_falls_back_to_solid_colour() {
    let src = Solid(image::Rgba([1, 2, 3, 255]), 1, 100_000);
    let out = acquire_background(&src, "q", canvas(), FILL);
    assert!(out.is_fallback());
    assert!(out.into_value().pixels().all(|p| p.0 == [0x1a, 0x1a, 0x1a, 255]));
}
