use super::*;

#[test]
fn default_layout_is_valid() {
    PosterLayout::default().validate().unwrap();
}

#[test]
fn overlapping_slots_are_rejected() {
    let layout = PosterLayout {
        code: Region::sized(104.0, 1000.0, 400.0, 100.0),
        ..PosterLayout::default()
    };
    let err = layout.validate().unwrap_err().to_string();
    assert!(err.contains("cover slot overlaps code slot"), "{err}");
}

#[test]
fn slot_outside_canvas_is_rejected() {
    let layout = PosterLayout {
        accent_strip: Region::sized(0.0, 1900.0, 1280.0, 40.0),
        ..PosterLayout::default()
    };
    assert!(layout.validate().is_err());
}

#[test]
fn heading_min_size_must_not_exceed_nominal() {
    let layout = PosterLayout {
        heading_min_size_px: 90.0,
        ..PosterLayout::default()
    };
    assert!(layout.validate().is_err());
}

#[test]
fn partial_json_keeps_defaults() {
    let layout: PosterLayout = serde_json::from_str(r#"{ "palette_swatches": 4 }"#).unwrap();
    assert_eq!(layout.palette_swatches, 4);
    assert_eq!(layout.canvas_width, 1280);
    assert_eq!(layout.tracks.max_lines, 5);
}
