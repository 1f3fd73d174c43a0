use image::RgbaImage;

use crate::config::Color;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::composite::over_in_place;
use crate::scene::font::{CaptionFont, TextBrushRgba8, TextLayoutEngine};
use crate::scene::text::{CaptionLayout, CaptionMetrics, layout_caption};

/// One-pixel black outline drawn under every caption line.
const SHADOW_OFFSETS: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, 1.0), (1.0, -1.0), (-1.0, 1.0)];

/// Caption styling shared by every scene of a run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CaptionStyle {
    pub(crate) metrics: CaptionMetrics,
    pub(crate) font_size: f32,
    pub(crate) text_color: Color,
    pub(crate) overlay_alpha: u8,
}

/// Draws the dimming overlay and caption text onto scene backgrounds.
///
/// Holds Parley contexts, so each rendering thread owns its own painter.
pub(crate) struct CaptionPainter {
    engine: Option<(TextLayoutEngine, vello_cpu::peniko::FontData)>,
    style: CaptionStyle,
}

impl CaptionPainter {
    /// `font == None` paints the overlay only.
    pub(crate) fn new(font: Option<&CaptionFont>, style: CaptionStyle) -> ReelResult<Self> {
        let Some(font) = font else {
            return Ok(Self::without_text(style));
        };
        let engine = TextLayoutEngine::new(font, style.font_size)?;
        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes.as_ref().clone()),
            0,
        );
        Ok(Self {
            engine: Some((engine, data)),
            style,
        })
    }

    pub(crate) fn without_text(style: CaptionStyle) -> Self {
        Self {
            engine: None,
            style,
        }
    }

    pub(crate) fn draws_text(&self) -> bool {
        self.engine.is_some()
    }

    /// Lay out `text` for the configured canvas.
    pub(crate) fn layout(&mut self, text: &str) -> Option<CaptionLayout> {
        let (engine, _) = self.engine.as_mut()?;
        Some(layout_caption(text, self.style.metrics, engine))
    }

    /// Composite the overlay and caption over an opaque, canvas-sized `background`.
    #[tracing::instrument(skip_all, fields(chars = text.len()))]
    pub(crate) fn paint(&mut self, background: &mut RgbaImage, text: &str) -> ReelResult<()> {
        let canvas = self.style.metrics.canvas;
        if background.dimensions() != (canvas.width, canvas.height) {
            return Err(ReelError::render(format!(
                "background is {}x{}, expected {}x{}",
                background.width(),
                background.height(),
                canvas.width,
                canvas.height
            )));
        }
        let w = u16::try_from(canvas.width)
            .map_err(|_| ReelError::render("canvas width exceeds u16"))?;
        let h = u16::try_from(canvas.height)
            .map_err(|_| ReelError::render("canvas height exceeds u16"))?;

        let layout = self.layout(text);

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            0,
            0,
            0,
            self.style.overlay_alpha,
        ));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));

        if let (Some(layout), Some((engine, font))) = (layout, self.engine.as_mut()) {
            let fg = self.style.text_color;
            let fg = TextBrushRgba8 {
                r: fg.r,
                g: fg.g,
                b: fg.b,
                a: fg.a,
            };
            let shadow = TextBrushRgba8 {
                r: 0,
                g: 0,
                b: 0,
                a: 255,
            };
            for line in &layout.lines {
                let origin = (f64::from(line.x), f64::from(line.y));
                for (dx, dy) in SHADOW_OFFSETS {
                    let shaped = engine.layout_line(&line.text, shadow);
                    fill_layout(&mut ctx, font, &shaped, (origin.0 + dx, origin.1 + dy));
                }
                let shaped = engine.layout_line(&line.text, fg);
                fill_layout(&mut ctx, font, &shaped, origin);
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        // The background is opaque, so its straight bytes are already premultiplied.
        over_in_place(background.as_mut(), pixmap.data_as_u8_slice(), 1.0)?;
        for px in background.pixels_mut() {
            px.0[3] = 255;
        }
        Ok(())
    }
}

fn fill_layout(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    layout: &parley::Layout<TextBrushRgba8>,
    origin: (f64, f64),
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate(origin));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

/// Save an opaque scene image as an RGB PNG.
pub(crate) fn save_png(img: &RgbaImage, path: &std::path::Path) -> ReelResult<()> {
    let rgb = image::DynamicImage::ImageRgba8(img.clone()).into_rgb8();
    rgb.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| ReelError::render(format!("failed to write '{}': {e}", path.display())))
}
