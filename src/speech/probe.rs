use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};
use crate::speech::AudioProbe;

/// Duration probe backed by the system `ffprobe`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfprobeProbe;

impl AudioProbe for FfprobeProbe {
    fn duration_secs(&self, path: &Path) -> ReelResult<f64> {
        let out = std::process::Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-print_format",
                "json",
            ])
            .arg(path)
            .output()
            .map_err(|e| ReelError::synthesis(format!("failed to run ffprobe: {e}")))?;
        if !out.status.success() {
            return Err(ReelError::synthesis(format!(
                "ffprobe failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }
        parse_probe_duration(&out.stdout)
    }
}

fn parse_probe_duration(stdout: &[u8]) -> ReelResult<f64> {
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        format: Option<ProbeFormat>,
    }

    let parsed: ProbeOut = serde_json::from_slice(stdout)
        .map_err(|e| ReelError::synthesis(format!("ffprobe json parse failed: {e}")))?;
    let raw = parsed
        .format
        .and_then(|f| f.duration)
        .ok_or_else(|| ReelError::synthesis("ffprobe reported no duration"))?;
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ReelError::synthesis(format!("ffprobe duration '{raw}' is not a number")))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ReelError::synthesis(format!(
            "audio has no playable duration ({secs})"
        )));
    }
    Ok(secs)
}
