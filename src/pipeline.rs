//! One end-to-end run: topic in, MP4 out.

use std::path::{Path, PathBuf};

use crate::config::RunConfig;
use crate::encode::{FfmpegSink, FfmpegSinkOpts, FrameSink, ffmpeg::TEMP_AUDIO_FILE};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::{RenderStats, Renderer};
use crate::scene::{ImageSource, SceneComposer, load_caption_font};
use crate::script::{ScriptSource, TextGenerator};
use crate::speech::{AudioProbe, Narrator, SpeechSynthesizer};
use crate::timeline::Timeline;

/// Narration file name inside the run workspace.
const AUDIO_FILE: &str = "output_audio.mp3";

/// Progress milestones reported during a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Script,
    Audio,
    Scenes,
    Video,
}

impl Stage {
    pub fn message(self) -> &'static str {
        match self {
            Stage::Script => "Generating script segments...",
            Stage::Audio => "Generating audio...",
            Stage::Scenes => "Creating scene images...",
            Stage::Video => "Creating video...",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// External collaborators of a run.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub text: &'a dyn TextGenerator,
    pub speech: &'a dyn SpeechSynthesizer,
    pub probe: &'a dyn AudioProbe,
    pub images: &'a dyn ImageSource,
}

/// Summary of a finished run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub video_path: PathBuf,
    pub script_path: PathBuf,
    /// Narration (and video) length in seconds.
    pub duration_secs: f64,
    pub segments: usize,
    pub script_fallback: bool,
    pub font_fallback: bool,
    /// Segments rendered on the solid fallback background.
    pub background_fallbacks: usize,
    /// Segments whose caption was drawn.
    pub captions_drawn: usize,
    pub render: RenderStats,
}

pub struct Pipeline<'a> {
    config: &'a RunConfig,
    services: Services<'a>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a RunConfig, services: Services<'a>) -> Self {
        Self { config, services }
    }

    /// Run end to end and encode `config.video_path()` with the system `ffmpeg`.
    pub fn run(&self, topic: &str, progress: &mut dyn FnMut(Stage)) -> ReelResult<RunReport> {
        let workspace = self.workspace()?;
        let mut sink = FfmpegSink::new(FfmpegSinkOpts {
            temp_audio_path: Some(workspace.path().join(TEMP_AUDIO_FILE)),
            ..FfmpegSinkOpts::new(self.config.video_path())
        });
        self.run_in(topic, workspace.path(), &mut sink, progress)
    }

    /// Run end to end, streaming frames into `sink` instead of `ffmpeg`.
    pub fn run_with_sink(
        &self,
        topic: &str,
        sink: &mut dyn FrameSink,
        progress: &mut dyn FnMut(Stage),
    ) -> ReelResult<RunReport> {
        let workspace = self.workspace()?;
        self.run_in(topic, workspace.path(), sink, progress)
    }

    fn workspace(&self) -> ReelResult<tempfile::TempDir> {
        use anyhow::Context as _;
        std::fs::create_dir_all(&self.config.out_dir).with_context(|| {
            format!(
                "failed to create output directory '{}'",
                self.config.out_dir.display()
            )
        })?;
        let dir = tempfile::Builder::new()
            .prefix("reelcast-")
            .tempdir_in(&self.config.out_dir)
            .context("failed to create run workspace")?;
        Ok(dir)
    }

    #[tracing::instrument(skip(self, workspace, sink, progress))]
    fn run_in(
        &self,
        topic: &str,
        workspace: &Path,
        sink: &mut dyn FrameSink,
        progress: &mut dyn FnMut(Stage),
    ) -> ReelResult<RunReport> {
        let cfg = self.config;
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ReelError::validation("topic must be non-empty"));
        }

        progress(Stage::Script);
        let script = ScriptSource::new(self.services.text).generate(topic, cfg.target_duration_secs);
        let script_fallback = script.is_fallback();
        let script = script.into_value();
        let script_path = cfg.script_path();
        script.write_numbered(&script_path)?;

        progress(Stage::Audio);
        let audio = Narrator::new(self.services.speech, self.services.probe)
            .synthesize(&script, &workspace.join(AUDIO_FILE))?;

        progress(Stage::Scenes);
        let font = load_caption_font(&cfg.font_path);
        let font_fallback = font.is_fallback();
        if let Some(f) = font.value() {
            tracing::info!(font = %f.source().display(), "caption font loaded");
        }
        let composer = SceneComposer::new(cfg, self.services.images, font.into_value(), workspace);
        let frames = composer.render_all(&script)?;
        let background_fallbacks = frames.iter().filter(|f| f.background_fallback()).count();
        let captions_drawn = frames.iter().filter(|f| f.caption_drawn()).count();
        let segments = frames.len();

        progress(Stage::Video);
        let duration_secs = audio.duration_secs();
        let timeline = Timeline::build(frames, duration_secs, cfg.crossfade_secs)?;
        let render = Renderer::new(cfg.canvas, cfg.fps).render(timeline, Some(&audio), sink)?;
        audio.discard()?;

        Ok(RunReport {
            video_path: cfg.video_path(),
            script_path,
            duration_secs,
            segments,
            script_fallback,
            font_fallback,
            background_fallbacks,
            captions_drawn,
            render,
        })
    }
}
