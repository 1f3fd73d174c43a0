//! Timeline sampling and frame output.

pub mod composite;

use image::RgbaImage;

use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::Frame;
use crate::speech::AudioAsset;
use crate::timeline::{Sample, Timeline};

/// Anything the renderer can pull canvas-sized pixels from.
pub trait FrameSource {
    fn load_rgba8(&self) -> ReelResult<RgbaImage>;

    /// Release the underlying storage after a successful render.
    fn release(self) -> ReelResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

impl FrameSource for Frame {
    fn load_rgba8(&self) -> ReelResult<RgbaImage> {
        Frame::load_rgba8(self)
    }

    fn release(self) -> ReelResult<()> {
        self.discard()
    }
}

impl FrameSource for RgbaImage {
    fn load_rgba8(&self) -> ReelResult<RgbaImage> {
        Ok(self.clone())
    }
}

/// Render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
    /// Frames that blended two clips.
    pub frames_blended: u64,
}

/// Streams a timeline into a [`FrameSink`] at a fixed frame rate.
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    canvas: Canvas,
    fps: Fps,
}

impl Renderer {
    pub fn new(canvas: Canvas, fps: Fps) -> Self {
        Self { canvas, fps }
    }

    /// Push every output frame of `timeline` to `sink`, with `audio` as the sound track.
    ///
    /// Frames are released only when the sink finishes successfully; on error they are
    /// dropped with the timeline.
    #[tracing::instrument(skip_all, fields(clips = timeline.len()))]
    pub fn render<F: FrameSource>(
        &self,
        timeline: Timeline<F>,
        audio: Option<&AudioAsset>,
        sink: &mut dyn FrameSink,
    ) -> ReelResult<RenderStats> {
        let frame_count = timeline.frame_count(self.fps);
        sink.begin(SinkConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            fps: self.fps,
            audio: audio.map(|a| AudioInputConfig {
                path: a.path().to_path_buf(),
            }),
        })?;

        let mut cache = ClipCache::default();
        let mut blended = vec![0u8; self.canvas.rgba_len()];
        let mut stats = RenderStats::default();

        for k in 0..frame_count {
            let t = self.fps.frames_to_secs(k);
            match timeline.sample(t) {
                Sample::Still(i) => {
                    let img = cache.get(&timeline, i, self.canvas)?;
                    sink.push_frame(k, img)?;
                }
                Sample::Crossfade { from, to, progress } => {
                    let (a, b) = cache.pair(&timeline, from, to, self.canvas)?;
                    composite::crossfade_into(&mut blended, a.as_raw(), b.as_raw(), progress as f32)?;
                    let img = RgbaImage::from_raw(self.canvas.width, self.canvas.height, blended)
                        .ok_or_else(|| ReelError::render("blend buffer has wrong size"))?;
                    sink.push_frame(k, &img)?;
                    blended = img.into_raw();
                    stats.frames_blended += 1;
                }
            }
            stats.frames_total += 1;
        }
        sink.end()?;

        for frame in timeline.into_frames() {
            frame.release()?;
        }
        tracing::info!(
            frames = stats.frames_total,
            blended = stats.frames_blended,
            "render finished"
        );
        Ok(stats)
    }
}

/// Decoded clip pixels. Sampling only moves forward, so at most two clips are kept.
#[derive(Default)]
struct ClipCache {
    slots: Vec<(usize, RgbaImage)>,
}

impl ClipCache {
    fn load<F: FrameSource>(
        &mut self,
        timeline: &Timeline<F>,
        i: usize,
        canvas: Canvas,
    ) -> ReelResult<usize> {
        if let Some(pos) = self.slots.iter().position(|(idx, _)| *idx == i) {
            return Ok(pos);
        }
        let clip = timeline
            .clips()
            .get(i)
            .ok_or_else(|| ReelError::render(format!("clip {i} out of range")))?;
        let img = clip.frame.load_rgba8()?;
        if img.dimensions() != (canvas.width, canvas.height) {
            return Err(ReelError::render(format!(
                "clip {i} is {}x{}, expected {}x{}",
                img.width(),
                img.height(),
                canvas.width,
                canvas.height
            )));
        }
        // Evict everything older than the previous clip.
        self.slots.retain(|(idx, _)| *idx + 1 >= i);
        self.slots.push((i, img));
        Ok(self.slots.len() - 1)
    }

    fn get<F: FrameSource>(
        &mut self,
        timeline: &Timeline<F>,
        i: usize,
        canvas: Canvas,
    ) -> ReelResult<&RgbaImage> {
        let pos = self.load(timeline, i, canvas)?;
        Ok(&self.slots[pos].1)
    }

    fn pair<F: FrameSource>(
        &mut self,
        timeline: &Timeline<F>,
        a: usize,
        b: usize,
        canvas: Canvas,
    ) -> ReelResult<(&RgbaImage, &RgbaImage)> {
        self.load(timeline, a, canvas)?;
        self.load(timeline, b, canvas)?;
        let find = |i: usize| {
            self.slots
                .iter()
                .find(|(idx, _)| *idx == i)
                .map(|(_, img)| img)
                .ok_or_else(|| ReelError::render(format!("clip {i} missing from cache")))
        };
        Ok((find(a)?, find(b)?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
