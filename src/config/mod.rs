//! Run configuration.
//!
//! A [`RunConfig`] is built once per run (defaults, then an optional JSON file, then CLI
//! overrides), validated, and passed by reference to every component. Nothing mutates it after
//! construction.

mod color;

pub use color::Color;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};

/// Immutable settings for one pipeline run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Output resolution shared by every frame and the encoded video.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Caption font file. Falls back to well-known system fonts when unreadable.
    pub font_path: PathBuf,
    /// Caption font size in pixels.
    pub font_size: f32,
    /// Multiplier applied to `font_size` to get the caption line height.
    pub line_spacing: f32,
    /// Horizontal caption margin on each side, in pixels.
    pub margin_px: u32,
    pub text_color: Color,
    /// Solid background used for letterboxing and when no image can be fetched.
    pub background_color: Color,
    /// Alpha (0–255) of the black overlay drawn between background and caption.
    pub overlay_alpha: u8,
    /// Spoken length the script generator is asked to aim for.
    pub target_duration_secs: f64,
    /// Crossfade length between consecutive segments.
    pub crossfade_secs: f64,
    /// Speech language code.
    pub language: String,
    pub slow_speech: bool,
    /// Image query used when a line has no usable keywords.
    pub default_query: String,
    pub gemini_model: String,
    /// Per-request timeout for every HTTP call.
    pub http_timeout_secs: u64,
    /// Render scene frames on the rayon pool.
    pub parallel: bool,
    /// Directory receiving the script file and the final video.
    pub out_dir: PathBuf,
    pub script_file: String,
    pub video_file: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::VERTICAL_1080P,
            fps: Fps::default(),
            font_path: PathBuf::from("arial.ttf"),
            font_size: 50.0,
            line_spacing: 1.5,
            margin_px: 50,
            text_color: Color::WHITE,
            background_color: Color::rgb(0x1a, 0x1a, 0x1a),
            overlay_alpha: 180,
            target_duration_secs: 60.0,
            crossfade_secs: 0.5,
            language: "en".to_owned(),
            slow_speech: false,
            default_query: "technology".to_owned(),
            gemini_model: "gemini-1.5-pro".to_owned(),
            http_timeout_secs: 30,
            parallel: true,
            out_dir: PathBuf::from("."),
            script_file: "script.txt".to_owned(),
            video_file: "output_video.mp4".to_owned(),
        }
    }
}

impl RunConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let f = std::fs::File::open(path).map_err(|e| {
            ReelError::config(format!("failed to open config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(std::io::BufReader::new(f)).map_err(|e| {
            ReelError::config(format!("failed to parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ReelResult<()> {
        self.canvas
            .validate()
            .map_err(|e| ReelError::config(e.to_string()))?;
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(ReelError::config("fps must be non-zero"));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ReelError::config("font_size must be finite and > 0"));
        }
        if !self.line_spacing.is_finite() || self.line_spacing <= 0.0 {
            return Err(ReelError::config("line_spacing must be finite and > 0"));
        }
        if self.margin_px.saturating_mul(2) >= self.canvas.width {
            return Err(ReelError::config("margin_px leaves no room for captions"));
        }
        if !self.target_duration_secs.is_finite() || self.target_duration_secs <= 0.0 {
            return Err(ReelError::config(
                "target_duration_secs must be finite and > 0",
            ));
        }
        if !self.crossfade_secs.is_finite() || self.crossfade_secs < 0.0 {
            return Err(ReelError::config("crossfade_secs must be finite and >= 0"));
        }
        if self.language.trim().is_empty() {
            return Err(ReelError::config("language must be non-empty"));
        }
        if self.default_query.trim().is_empty() {
            return Err(ReelError::config("default_query must be non-empty"));
        }
        if self.http_timeout_secs == 0 {
            return Err(ReelError::config("http_timeout_secs must be > 0"));
        }
        if self.script_file.trim().is_empty() || self.video_file.trim().is_empty() {
            return Err(ReelError::config("output file names must be non-empty"));
        }
        Ok(())
    }

    /// Caption line height in pixels.
    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_spacing
    }

    /// Widest caption line allowed, in pixels.
    pub fn max_text_width(&self) -> f32 {
        self.canvas.width.saturating_sub(self.margin_px * 2) as f32
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn script_path(&self) -> PathBuf {
        self.out_dir.join(&self.script_file)
    }

    pub fn video_path(&self) -> PathBuf {
        self.out_dir.join(&self.video_file)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/run_config.rs"]
mod tests;
