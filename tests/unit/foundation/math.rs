use super::*;

#[test]
fn mul_div255_is_rounded() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 128), 128);
    assert_eq!(mul_div255_u8(1, 127), 0);
}

#[test]
fn unit_scale_clamps() {
    assert_eq!(unit_to_u8_scale(-1.0), 0);
    assert_eq!(unit_to_u8_scale(0.5), 128);
    assert_eq!(unit_to_u8_scale(2.0), 255);
}
