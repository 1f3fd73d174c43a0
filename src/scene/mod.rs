//! Per-line scene images: background, dimming overlay and caption.

mod background;
mod font;
mod keywords;
mod raster;
mod text;
mod unsplash;

pub use background::{ImageSource, NoImages, acquire_background, fit_to_canvas, solid_background};
pub use font::{CaptionFont, load_caption_font};
pub use keywords::{MAX_QUERY_WORDS, image_query};
pub use text::{
    CaptionLayout, CaptionMetrics, PositionedLine, TextMeasure, layout_caption, wrap_words,
};
pub use unsplash::UnsplashSource;

use std::path::{Path, PathBuf};

use image::RgbaImage;
use rayon::prelude::*;

use crate::config::RunConfig;
use crate::foundation::artifact::TempArtifact;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::script::{Script, ScriptLine};
use raster::{CaptionPainter, CaptionStyle, save_png};

/// One rendered scene image, stored as a transient PNG.
///
/// The file is deleted when the frame is discarded or dropped.
#[derive(Debug)]
pub struct Frame {
    index: usize,
    file: TempArtifact,
    canvas: Canvas,
    background_fallback: bool,
    caption_drawn: bool,
}

impl Frame {
    /// Zero-based segment index.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// `true` when the background is the solid fallback colour.
    pub fn background_fallback(&self) -> bool {
        self.background_fallback
    }

    pub fn caption_drawn(&self) -> bool {
        self.caption_drawn
    }

    /// Decode the stored image.
    pub fn load_rgba8(&self) -> ReelResult<RgbaImage> {
        let img = image::open(self.path()).map_err(|e| {
            ReelError::render(format!(
                "failed to read frame '{}': {e}",
                self.path().display()
            ))
        })?;
        Ok(img.into_rgba8())
    }

    pub fn discard(self) -> ReelResult<()> {
        self.file.discard()
    }
}

/// Turns script lines into [`Frame`]s.
pub struct SceneComposer<'a> {
    config: &'a RunConfig,
    images: &'a dyn ImageSource,
    font: Option<CaptionFont>,
    workdir: PathBuf,
}

impl<'a> SceneComposer<'a> {
    /// `font == None` renders frames without captions.
    pub fn new(
        config: &'a RunConfig,
        images: &'a dyn ImageSource,
        font: Option<CaptionFont>,
        workdir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            images,
            font,
            workdir: workdir.into(),
        }
    }

    fn style(&self) -> CaptionStyle {
        CaptionStyle {
            metrics: CaptionMetrics {
                canvas: self.config.canvas,
                line_height: self.config.line_height(),
                max_width: self.config.max_text_width(),
            },
            font_size: self.config.font_size,
            text_color: self.config.text_color,
            overlay_alpha: self.config.overlay_alpha,
        }
    }

    fn painter(&self) -> CaptionPainter {
        match CaptionPainter::new(self.font.as_ref(), self.style()) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "caption font unusable, rendering without captions");
                CaptionPainter::without_text(self.style())
            }
        }
    }

    /// Render the frame for `line`, the `index`-th (zero-based) of `total` lines.
    ///
    /// Fetch and caption problems degrade to a plain background; only failing to write the
    /// image file is an error.
    pub fn render(&self, line: &ScriptLine, index: usize, total: usize) -> ReelResult<Frame> {
        let mut painter = self.painter();
        self.render_with(&mut painter, line, index, total)
    }

    #[tracing::instrument(skip(self, painter, line, total), fields(segment = index + 1))]
    fn render_with(
        &self,
        painter: &mut CaptionPainter,
        line: &ScriptLine,
        index: usize,
        total: usize,
    ) -> ReelResult<Frame> {
        tracing::info!("processing segment {}/{}", index + 1, total);
        let cfg = self.config;

        let query = image_query(line.text(), &cfg.default_query);
        let background = acquire_background(
            self.images,
            &query,
            cfg.canvas,
            cfg.background_color,
        );
        let mut background_fallback = background.is_fallback();
        let mut img = background.into_value();

        let mut caption_drawn = painter.draws_text();
        if let Err(e) = painter.paint(&mut img, line.text()) {
            tracing::warn!(error = %e, "scene compose failed, retrying on solid background");
            background_fallback = true;
            img = solid_background(cfg.canvas, cfg.background_color);
            if let Err(e) = painter.paint(&mut img, line.text()) {
                tracing::warn!(error = %e, "caption drawing failed, emitting plain background");
                img = solid_background(cfg.canvas, cfg.background_color);
                caption_drawn = false;
            }
        }

        let path = self.workdir.join(format!("scene_{}.png", index + 1));
        let file = TempArtifact::new(&path);
        save_png(&img, &path)?;

        Ok(Frame {
            index,
            file,
            canvas: cfg.canvas,
            background_fallback,
            caption_drawn,
        })
    }

    /// Render one frame per script line, in script order.
    pub fn render_all(&self, script: &Script) -> ReelResult<Vec<Frame>> {
        let total = script.len();
        let lines = script.lines();

        if !self.config.parallel {
            let mut painter = self.painter();
            return lines
                .iter()
                .enumerate()
                .map(|(i, line)| self.render_with(&mut painter, line, i, total))
                .collect();
        }

        let rendered = lines
            .par_iter()
            .enumerate()
            .map_init(
                || self.painter(),
                |painter, (i, line)| self.render_with(painter, line, i, total),
            )
            .collect::<Vec<_>>();

        let mut frames = Vec::with_capacity(rendered.len());
        for item in rendered {
            frames.push(item?);
        }
        Ok(frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/composer.rs"]
mod tests;
