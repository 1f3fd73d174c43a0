use image::{DynamicImage, GenericImageView as _, RgbaImage, imageops};

use crate::config::Color;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::outcome::Acquired;

/// External image search/generation service.
///
/// Implementations are shared across rendering threads.
pub trait ImageSource: Send + Sync {
    /// Return one image matching `query`. `canvas` is a size hint.
    fn fetch(&self, query: &str, canvas: Canvas) -> ReelResult<DynamicImage>;
}

/// Image source that always fails; every segment gets the solid background.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoImages;

impl ImageSource for NoImages {
    fn fetch(&self, query: &str, _canvas: Canvas) -> ReelResult<DynamicImage> {
        Err(ReelError::service(format!(
            "no image source configured (query '{query}')"
        )))
    }
}

/// Opaque canvas-sized image of one colour.
pub fn solid_background(canvas: Canvas, fill: Color) -> RgbaImage {
    RgbaImage::from_pixel(
        canvas.width,
        canvas.height,
        image::Rgba(fill.opaque().to_rgba8()),
    )
}

/// Tallest scaled image accepted, in canvas heights.
pub const MAX_SCALED_HEIGHT_FACTOR: u64 = 4;

/// Scale `img` to the canvas width (aspect preserved), then centre it vertically on a solid
/// canvas. Short images are letterboxed with `fill`; tall ones are centre-cropped.
///
/// Empty images and images that would scale past [`MAX_SCALED_HEIGHT_FACTOR`] canvas heights
/// are rejected.
pub fn fit_to_canvas(img: &DynamicImage, canvas: Canvas, fill: Color) -> ReelResult<RgbaImage> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(ReelError::render(format!("background image is empty ({w}x{h})")));
    }

    let scaled_h = ((u64::from(canvas.width) * u64::from(h)) / u64::from(w)).max(1);
    let limit = MAX_SCALED_HEIGHT_FACTOR * u64::from(canvas.height);
    if scaled_h > limit {
        return Err(ReelError::render(format!(
            "background image {w}x{h} scales to height {scaled_h}, limit is {limit}"
        )));
    }
    let scaled_h = u32::try_from(scaled_h)
        .map_err(|_| ReelError::render(format!("scaled height {scaled_h} out of range")))?;
    let resized = imageops::resize(
        &img.to_rgba8(),
        canvas.width,
        scaled_h,
        imageops::FilterType::Lanczos3,
    );

    let mut out = solid_background(canvas, fill);
    // Negative offsets crop the overflow evenly from top and bottom.
    let y = (i64::from(canvas.height) - i64::from(scaled_h)) / 2;
    imageops::overlay(&mut out, &resized, 0, y);
    for px in out.pixels_mut() {
        px.0[3] = 255;
    }
    Ok(out)
}

/// Fetch and fit a background for `query`, degrading to a solid fill on any failure.
pub fn acquire_background(
    source: &dyn ImageSource,
    query: &str,
    canvas: Canvas,
    fill: Color,
) -> Acquired<RgbaImage> {
    match source
        .fetch(query, canvas)
        .and_then(|img| fit_to_canvas(&img, canvas, fill))
    {
        Ok(img) => Acquired::Fetched(img),
        Err(e) => {
            tracing::warn!(query, error = %e, "couldn't fetch background image, using solid color");
            Acquired::fallback(solid_background(canvas, fill), e.to_string())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/background.rs"]
mod tests;
