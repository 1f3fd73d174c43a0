use super::*;
use crate::script::Script;

struct WriteBytes;

impl SpeechSynthesizer for WriteBytes {
    fn synthesize(&self, text: &str, out_path: &Path) -> ReelResult<()> {
        std::fs::write(out_path, text.as_bytes()).map_err(|e| ReelError::synthesis(e.to_string()))
    }
}

struct Failing;

impl SpeechSynthesizer for Failing {
    fn synthesize(&self, _text: &str, _out_path: &Path) -> ReelResult<()> {
        Err(ReelError::service("tts endpoint returned 429"))
    }
}

struct FixedProbe(f64);

impl AudioProbe for FixedProbe {
    fn duration_secs(&self, _path: &Path) -> ReelResult<f64> {
        Ok(self.0)
    }
}

fn script() -> Script {
    Script::from_texts(["Tides rise.", "Tides fall."]).unwrap()
}

#[test]
fn speaks_joined_text_and_probes_duration() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("narration.mp3");
    let audio = Narrator::new(&WriteBytes, &FixedProbe(42.3))
        .synthesize(&script(), &out)
        .unwrap();

    assert_eq!(audio.duration_secs(), 42.3);
    assert_eq!(audio.path(), out.as_path());
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "Tides rise. Tides fall."
    );

    audio.discard().unwrap();
    assert!(!out.exists());
}

#[test]
fn synthesis_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = Narrator::new(&Failing, &FixedProbe(1.0))
        .synthesize(&script(), &dir.path().join("a.mp3"))
        .unwrap_err();
    assert!(matches!(err, ReelError::Synthesis(_)));
    assert!(err.to_string().starts_with("speech synthesis failed:"));
}

#[test]
fn zero_duration_is_fatal_and_file_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("a.mp3");
    let err = Narrator::new(&WriteBytes, &FixedProbe(0.0))
        .synthesize(&script(), &out)
        .unwrap_err();
    assert!(matches!(err, ReelError::Synthesis(_)));
    assert!(!out.exists());
}

#[test]
fn persist_keeps_audio() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("keep.mp3");
    let audio = Narrator::new(&WriteBytes, &FixedProbe(3.0))
        .synthesize(&script(), &out)
        .unwrap();
    assert_eq!(audio.persist(), out);
    assert!(out.exists());
}
