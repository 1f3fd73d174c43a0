use super::*;

#[test]
fn drop_deletes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("scene_1.png");
    std::fs::write(&p, b"x").unwrap();
    {
        let a = TempArtifact::new(&p);
        assert_eq!(a.path(), p.as_path());
    }
    assert!(!p.exists());
}

#[test]
fn discard_tolerates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let a = TempArtifact::new(dir.path().join("never-written.mp3"));
    a.discard().unwrap();
}

#[test]
fn persist_keeps_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("keep.txt");
    std::fs::write(&p, b"x").unwrap();
    let kept = TempArtifact::new(&p).persist();
    assert_eq!(kept, p);
    assert!(p.exists());
}

#[test]
fn ensure_parent_dir_creates_nested_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("a/b/out.mp4");
    ensure_parent_dir(&p).unwrap();
    assert!(dir.path().join("a/b").is_dir());
    ensure_parent_dir(Path::new("bare.mp4")).unwrap();
}
