use super::*;

#[test]
fn transparent_source_keeps_destination() {
    assert_eq!(over_opaque([10, 20, 30, 255], [255, 255, 255, 0]), [10, 20, 30, 255]);
}

#[test]
fn opaque_source_replaces_destination() {
    assert_eq!(over_opaque([0, 0, 0, 255], [255, 0, 0, 255]), [255, 0, 0, 255]);
}

#[test]
fn half_covered_black_ink_on_white_is_mid_grey() {
    // Premultiplied black at alpha 128 keeps 127/255 of the white below.
    assert_eq!(over_opaque([255, 255, 255, 255], [0, 0, 0, 128]), [127, 127, 127, 255]);
}

#[test]
fn partial_coverage_adds_premultiplied_source() {
    let out = over_opaque([255, 255, 255, 255], [0, 0, 64, 128]);
    assert_eq!(out, [127, 127, 64 + 127, 255]);
}
