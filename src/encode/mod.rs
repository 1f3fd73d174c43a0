//! Encoding sinks.
//!
//! Sinks consume rendered frames in timeline order and are driven by the renderer.

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;

pub use ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
