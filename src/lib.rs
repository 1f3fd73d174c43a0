//! reelcast turns a topic into a short, narrated, captioned vertical video.
//!
//! A run goes through five stages, each behind a small component:
//!
//! - [`ScriptSource`] asks a [`TextGenerator`] for short spoken lines (template fallback)
//! - [`Narrator`] speaks the whole script into one audio file and probes its length
//! - [`SceneComposer`] renders one captioned background image per line
//! - [`Timeline`] spreads the images uniformly over the narration with crossfades
//! - [`Renderer`] samples the timeline and streams frames plus audio into a [`FrameSink`]
//!
//! [`Pipeline`] wires them together for one [`RunConfig`].
#![forbid(unsafe_code)]

pub mod config;
pub mod encode;
mod foundation;
pub mod net;
pub mod pipeline;
pub mod render;
pub mod scene;
pub mod script;
pub mod speech;
pub mod timeline;

pub use crate::foundation::artifact::TempArtifact;
pub use crate::foundation::core::{Canvas, Fps};
pub use crate::foundation::error::{ReelError, ReelResult};
pub use crate::foundation::outcome::Acquired;

pub use crate::config::{Color, RunConfig};
pub use crate::encode::{FfmpegSink, FfmpegSinkOpts, FrameSink, InMemorySink, SinkConfig};
pub use crate::pipeline::{Pipeline, RunReport, Services, Stage};
pub use crate::render::{FrameSource, RenderStats, Renderer};
pub use crate::scene::{Frame, ImageSource, SceneComposer};
pub use crate::script::{Script, ScriptLine, ScriptSource, TextGenerator};
pub use crate::speech::{AudioAsset, AudioProbe, Narrator, SpeechSynthesizer};
pub use crate::timeline::{Sample, TimedClip, Timeline};
