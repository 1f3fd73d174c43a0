//! Narration synthesis.

mod gtts;
mod probe;

pub use gtts::{GoogleTranslateTts, split_tts_chunks};
pub use probe::FfprobeProbe;

use std::path::{Path, PathBuf};

use crate::foundation::artifact::TempArtifact;
use crate::foundation::error::{ReelError, ReelResult};
use crate::script::Script;

/// External text-to-speech service.
pub trait SpeechSynthesizer {
    /// Synthesize `text` and write a compressed audio file to `out_path`.
    fn synthesize(&self, text: &str, out_path: &Path) -> ReelResult<()>;
}

/// Reads the playable duration of an audio file.
pub trait AudioProbe {
    fn duration_secs(&self, path: &Path) -> ReelResult<f64>;
}

/// Synthesized narration track. The file is deleted when the asset is dropped.
#[derive(Debug)]
pub struct AudioAsset {
    file: TempArtifact,
    duration_secs: f64,
}

impl AudioAsset {
    pub fn new(file: TempArtifact, duration_secs: f64) -> ReelResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(ReelError::validation(format!(
                "audio duration must be finite and > 0 (got {duration_secs})"
            )));
        }
        Ok(Self {
            file,
            duration_secs,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Delete the audio file now.
    pub fn discard(self) -> ReelResult<()> {
        self.file.discard()
    }

    /// Keep the audio file on disk and return its path.
    pub fn persist(self) -> PathBuf {
        self.file.persist()
    }
}

/// Turns a script into one narration track.
pub struct Narrator<'a> {
    synth: &'a dyn SpeechSynthesizer,
    probe: &'a dyn AudioProbe,
}

impl<'a> Narrator<'a> {
    pub fn new(synth: &'a dyn SpeechSynthesizer, probe: &'a dyn AudioProbe) -> Self {
        Self { synth, probe }
    }

    /// Speak the whole script (lines joined in order) into `out_path`.
    ///
    /// The duration is probed from the written file. Every failure is fatal to the run and
    /// reported as [`ReelError::Synthesis`]; a partially written file is removed.
    #[tracing::instrument(skip(self, script))]
    pub fn synthesize(&self, script: &Script, out_path: &Path) -> ReelResult<AudioAsset> {
        let file = TempArtifact::new(out_path);
        let text = script.full_text();

        self.synth
            .synthesize(&text, file.path())
            .map_err(|e| ReelError::synthesis(e.to_string()))?;
        let duration = self
            .probe
            .duration_secs(file.path())
            .map_err(|e| ReelError::synthesis(format!("could not read narration duration: {e}")))?;

        tracing::info!(duration_secs = duration, "narration synthesized");
        AudioAsset::new(file, duration).map_err(|e| ReelError::synthesis(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/speech/narrator.rs"]
mod tests;
