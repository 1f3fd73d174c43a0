//! Segment timing: one clip per frame, spread uniformly over the narration.

use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};

/// A frame with its display window and transition flags.
#[derive(Debug)]
pub struct TimedClip<F> {
    pub frame: F,
    pub start_secs: f64,
    pub duration_secs: f64,
    /// The window opens with a blend from the previous clip.
    pub crossfade_in: bool,
    /// The next clip blends out of this one. Always equal to the next clip's `crossfade_in`.
    pub crossfade_out: bool,
}

/// What the output shows at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sample {
    Still(usize),
    /// Blend from clip `from` into clip `to`; `progress` is in `[0, 1)`.
    Crossfade { from: usize, to: usize, progress: f64 },
}

/// Ordered clips whose display durations sum to the narration length.
///
/// Crossfades overlap adjacent windows and never add time: the fade into clip `i` occupies the
/// first `min(crossfade, segment)` seconds of clip `i`'s own window.
#[derive(Debug)]
pub struct Timeline<F> {
    clips: Vec<TimedClip<F>>,
    total_secs: f64,
    crossfade_secs: f64,
}

impl<F> Timeline<F> {
    /// Give every frame `total_secs / frames.len()` seconds, in order.
    pub fn build(frames: Vec<F>, total_secs: f64, crossfade_secs: f64) -> ReelResult<Self> {
        if frames.is_empty() {
            return Err(ReelError::validation("timeline needs at least one frame"));
        }
        if !total_secs.is_finite() || total_secs <= 0.0 {
            return Err(ReelError::validation(format!(
                "total duration must be finite and > 0 (got {total_secs})"
            )));
        }
        if !crossfade_secs.is_finite() || crossfade_secs < 0.0 {
            return Err(ReelError::validation(format!(
                "crossfade must be finite and >= 0 (got {crossfade_secs})"
            )));
        }

        let n = frames.len();
        let segment = total_secs / n as f64;
        let clips = frames
            .into_iter()
            .enumerate()
            .map(|(i, frame)| TimedClip {
                frame,
                start_secs: total_secs * i as f64 / n as f64,
                duration_secs: segment,
                crossfade_in: i > 0,
                crossfade_out: i + 1 < n,
            })
            .collect();

        tracing::debug!(clips = n, segment_secs = segment, "timeline built");
        Ok(Self {
            clips,
            total_secs,
            crossfade_secs,
        })
    }

    pub fn clips(&self) -> &[TimedClip<F>] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn total_secs(&self) -> f64 {
        self.total_secs
    }

    pub fn crossfade_secs(&self) -> f64 {
        self.crossfade_secs
    }

    /// Uniform display duration of every clip.
    pub fn segment_secs(&self) -> f64 {
        self.total_secs / self.clips.len() as f64
    }

    /// Length of each fade, capped to one segment.
    pub fn effective_crossfade_secs(&self) -> f64 {
        self.crossfade_secs.min(self.segment_secs())
    }

    /// Output frames needed to cover the whole narration at `fps`.
    pub fn frame_count(&self, fps: Fps) -> u64 {
        fps.secs_to_frames_round(self.total_secs).max(1)
    }

    /// Resolve time `t` (seconds) to a still or a crossfade. Out-of-range times clamp.
    pub fn sample(&self, t: f64) -> Sample {
        let n = self.clips.len();
        let segment = self.segment_secs();
        let t = if t.is_finite() { t.max(0.0) } else { 0.0 };

        let i = ((t / segment).floor() as usize).min(n - 1);
        let local = t - self.clips[i].start_secs;
        let fade = self.effective_crossfade_secs();

        let blends = i
            .checked_sub(1)
            .filter(|&prev| self.clips[prev].crossfade_out && self.clips[i].crossfade_in);
        if let Some(from) = blends
            && fade > 0.0
            && local < fade
        {
            let progress = (local.max(0.0) / fade).clamp(0.0, 1.0);
            if progress < 1.0 {
                return Sample::Crossfade { from, to: i, progress };
            }
        }
        Sample::Still(i)
    }

    pub fn into_frames(self) -> Vec<F> {
        self.clips.into_iter().map(|c| c.frame).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/timeline.rs"]
mod tests;
