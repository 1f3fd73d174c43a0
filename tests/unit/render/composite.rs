use super::*;

#[test]
fn over_opaque_src_replaces_dst() {
    assert_eq!(over([10, 20, 30, 255], [200, 100, 50, 255], 1.0), [200, 100, 50, 255]);
}

#[test]
fn over_zero_opacity_keeps_dst() {
    let dst = [1, 2, 3, 255];
    assert_eq!(over(dst, [200, 200, 200, 255], 0.0), dst);
    assert_eq!(over(dst, [0, 0, 0, 0], 1.0), dst);
}

#[test]
fn over_translucent_black_darkens() {
    // 180/255 black over white leaves roughly 75/255 of the white.
    let out = over([255, 255, 255, 255], [0, 0, 0, 180], 1.0);
    assert_eq!(out, [75, 75, 75, 255]);
}

#[test]
fn crossfade_endpoints_and_midpoint() {
    let a = [200, 0, 0, 255];
    let b = [0, 0, 200, 255];
    assert_eq!(crossfade(a, b, 0.0), a);
    assert_eq!(crossfade(a, b, 1.0), b);
    let mid = crossfade(a, b, 0.5);
    assert!((99..=101).contains(&mid[0]));
    assert!((99..=101).contains(&mid[2]));
    assert_eq!(mid[3], 255);
}

#[test]
fn in_place_ops_reject_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
    assert!(crossfade_into(&mut dst, &[0u8; 8], &[0u8; 12], 0.5).is_err());
    assert!(crossfade_into(&mut vec![0u8; 6], &[0u8; 6], &[0u8; 6], 0.5).is_err());
}

#[test]
fn crossfade_into_writes_every_pixel() {
    let a = [255u8, 0, 0, 255].repeat(3);
    let b = [0u8, 255, 0, 255].repeat(3);
    let mut dst = vec![0u8; 12];
    crossfade_into(&mut dst, &a, &b, 1.0).unwrap();
    assert_eq!(dst, b);
}
