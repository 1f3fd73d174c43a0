use super::*;
use reelcast::{ReelError, RenderStats};

fn finished() -> RunReport {
    RunReport {
        video_path: PathBuf::from("out/output_video.mp4"),
        script_path: PathBuf::from("out/script.txt"),
        duration_secs: 12.04,
        segments: 4,
        script_fallback: true,
        font_fallback: false,
        background_fallbacks: 0,
        captions_drawn: 4,
        render: RenderStats::default(),
    }
}

#[test]
fn failed_run_exits_non_zero() {
    let mut out = Vec::new();
    let code = report(&Err(ReelError::synthesis("tts endpoint unreachable")), &mut out).unwrap();
    assert_eq!(code, 1);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("An error occurred: "));
    assert!(text.contains("tts endpoint unreachable"));
}

#[test]
fn finished_run_exits_zero_with_summary() {
    let mut out = Vec::new();
    let code = report(&Ok(finished()), &mut out).unwrap();
    assert_eq!(code, 0);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("used the template script"));
    assert!(text.contains("Video created successfully: out/output_video.mp4"));
    assert!(text.contains("Total duration: 12.0 seconds"));
    assert!(text.contains("Segments: 4"));
}
