use super::*;
use crate::test_support::BoxTypesetter;

const EPS: f64 = 1e-9;

fn regular(size: f32) -> TextStyle {
    TextStyle::new(FontWeight::Regular, size, Rgb8::BLACK)
}

#[test]
fn anchors_parse_from_two_letters() {
    assert_eq!("ls".parse::<Anchor>().unwrap(), Anchor::LEFT_BASELINE);
    assert_eq!("rt".parse::<Anchor>().unwrap(), Anchor::RIGHT_TOP);
    assert_eq!(
        "mb".parse::<Anchor>().unwrap(),
        Anchor::new(HAlign::Middle, VAlign::Bottom)
    );
    assert!("xs".parse::<Anchor>().is_err());
    assert!("lx".parse::<Anchor>().is_err());
    assert!("l".parse::<Anchor>().is_err());
}

#[test]
fn left_baseline_puts_baseline_on_origin() {
    let block = layout_text(
        &BoxTypesetter,
        Point::new(104.0, 1320.0),
        "abcd",
        regular(10.0),
        Anchor::LEFT_BASELINE,
        0.0,
    )
    .unwrap();
    let line = &block.lines[0];
    assert_eq!(line.x, 104.0);
    assert_eq!(line.baseline, 1320.0);
    assert_eq!(line.width, 20.0);
    assert!((block.bounds.y0 - 1312.0).abs() < EPS);
    assert!((block.bounds.y1 - 1322.0).abs() < EPS);
    assert!(!block.truncated);
}

#[test]
fn right_top_aligns_each_line_to_the_right_edge() {
    let block = layout_text(
        &BoxTypesetter,
        Point::new(1176.0, 1768.0),
        "June 09, 2017\nLabel",
        regular(10.0),
        Anchor::RIGHT_TOP,
        4.0,
    )
    .unwrap();
    assert_eq!(block.lines.len(), 2);
    for line in &block.lines {
        assert!((line.x + line.width - 1176.0).abs() < EPS);
    }
    assert!((block.lines[0].baseline - 1776.0).abs() < EPS);
    // ascent + descent + spacing
    assert!((block.lines[1].baseline - block.lines[0].baseline - 14.0).abs() < EPS);
    assert!((block.bounds.y0 - 1768.0).abs() < EPS);
    assert!((block.bounds.x1 - 1176.0).abs() < EPS);
    assert!((block.bounds.width() - 65.0).abs() < EPS);
}

#[test]
fn baseline_anchor_on_multiline_uses_last_line() {
    let block = layout_text(
        &BoxTypesetter,
        Point::new(0.0, 100.0),
        "a\nb\nc",
        regular(10.0),
        Anchor::LEFT_BASELINE,
        2.0,
    )
    .unwrap();
    assert!((block.lines[2].baseline - 100.0).abs() < EPS);
    assert!((block.lines[0].baseline - 76.0).abs() < EPS);
}

#[test]
fn middle_and_bottom_anchors_use_whole_block() {
    let mid = layout_text(
        &BoxTypesetter,
        Point::new(50.0, 50.0),
        "ab\nab",
        regular(10.0),
        Anchor::new(HAlign::Middle, VAlign::Middle),
        0.0,
    )
    .unwrap();
    assert!((mid.bounds.center().x - 50.0).abs() < EPS);
    assert!((mid.bounds.center().y - 50.0).abs() < EPS);

    let bottom = layout_text(
        &BoxTypesetter,
        Point::new(0.0, 50.0),
        "ab\nab",
        regular(10.0),
        Anchor::new(HAlign::Left, VAlign::Bottom),
        0.0,
    )
    .unwrap();
    assert!((bottom.bounds.y1 - 50.0).abs() < EPS);
}

#[test]
fn heading_is_uppercased_and_bold() {
    let block = layout_heading(
        &BoxTypesetter,
        Point::new(104.0, 1320.0),
        860.0,
        "Apocalypse",
        Rgb8::BLACK,
        74.0,
        56.0,
    )
    .unwrap();
    assert_eq!(block.text(), "APOCALYPSE");
    assert_eq!(block.weight, FontWeight::Bold);
    assert_eq!(block.size_px, 74.0);
    assert!(!block.truncated);
}

#[test]
fn heading_shrinks_before_truncating() {
    // 10 chars: 10 * 0.5 * 20 = 100 px at size 20, 90 px at 18.
    let block = layout_heading(
        &BoxTypesetter,
        Point::ZERO,
        90.0,
        "abcdefghij",
        Rgb8::BLACK,
        20.0,
        10.0,
    )
    .unwrap();
    assert_eq!(block.size_px, 18.0);
    assert_eq!(block.text(), "ABCDEFGHIJ");
    assert!(!block.truncated);
}

#[test]
fn overlong_heading_is_truncated_with_ellipsis() {
    let title = "a very long title that can never fit the heading region";
    let block = layout_heading(
        &BoxTypesetter,
        Point::ZERO,
        100.0,
        title,
        Rgb8::BLACK,
        20.0,
        20.0,
    )
    .unwrap();
    assert!(block.truncated);
    let text = block.text();
    assert!(text.ends_with(ELLIPSIS), "{text}");
    assert!(title.to_uppercase().starts_with(text.trim_end_matches(ELLIPSIS)));
    assert!(block.bounds.width() <= 100.0);
    // 10 chars fit at 10 px per char.
    assert_eq!(text.chars().count(), 10);
}

#[test]
fn truncation_drops_trailing_space_before_ellipsis() {
    let cut = truncate_to_width(&BoxTypesetter, "AB CD", FontWeight::Bold, 10.0, 20.0).unwrap();
    assert_eq!(cut, "AB…");
}
