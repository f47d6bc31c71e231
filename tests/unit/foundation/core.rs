use super::*;

#[test]
fn hex_round_trips_with_or_without_hash() {
    assert_eq!(Rgb8::from_hex("#1e1e2e").unwrap(), Rgb8::new(30, 30, 46));
    assert_eq!(Rgb8::from_hex("FFFFFF").unwrap(), Rgb8::WHITE);
    assert_eq!(Rgb8::new(30, 30, 46).to_hex(), "#1e1e2e");
}

#[test]
fn malformed_hex_is_rejected() {
    for bad in ["", "#fff", "#12345g", "#ééé", "#1234567"] {
        assert!(Rgb8::from_hex(bad).is_err(), "{bad}");
    }
}

#[test]
fn bounded_region_has_rect_and_pixel_size() {
    let cover = Region::sized(104.0, 104.0, 1072.0, 1072.0);
    assert_eq!(cover.rect(), Some(Rect::new(104.0, 104.0, 1176.0, 1176.0)));
    assert_eq!(cover.pixel_size().unwrap(), (1072, 1072));
}

#[test]
fn text_region_has_no_fixed_size() {
    let heading = Region::at(104.0, 1320.0).with_width(860.0);
    assert_eq!(heading.max_width, Some(860.0));
    assert!(heading.rect().is_none());
    assert!(heading.pixel_size().is_err());
}

#[test]
fn sub_pixel_region_is_rejected() {
    assert!(Region::sized(0.0, 0.0, 0.4, 10.0).pixel_size().is_err());
}
