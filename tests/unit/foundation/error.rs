use super::*;

#[test]
fn display_prefix_names_the_stage() {
    assert_eq!(
        ReelError::synthesis("quota exceeded").to_string(),
        "speech synthesis failed: quota exceeded"
    );
    assert_eq!(
        ReelError::encode("ffmpeg exited").to_string(),
        "video encoding failed: ffmpeg exited"
    );
    assert_eq!(
        ReelError::credentials("UNSPLASH_ACCESS_KEY").to_string(),
        "missing credentials: UNSPLASH_ACCESS_KEY"
    );
    assert!(ReelError::config("x").to_string().starts_with("configuration error:"));
    assert!(ReelError::validation("x").to_string().starts_with("validation error:"));
}

#[test]
fn anyhow_errors_pass_through_transparently() {
    let e: ReelError = anyhow::anyhow!("disk full").into();
    assert!(matches!(e, ReelError::Other(_)));
    assert_eq!(e.to_string(), "disk full");
}
