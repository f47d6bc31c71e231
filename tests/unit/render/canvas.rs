use super::*;

#[test]
fn fill_rect_is_clipped_to_canvas() {
    let mut canvas = Canvas::new(4, 4, Rgb8::WHITE);
    canvas.fill_rect(Rect::new(2.0, 2.0, 10.0, 10.0), Rgb8::new(255, 0, 0));
    assert_eq!(canvas.pixel(1, 1), Rgb8::WHITE);
    assert_eq!(canvas.pixel(3, 3), Rgb8::new(255, 0, 0));
}

#[test]
fn composite_skips_transparent_and_clips_offscreen() {
    let mut canvas = Canvas::new(3, 1, Rgb8::WHITE);
    let layer = PremulLayer::new(2, 1, vec![0, 0, 255, 255, 0, 0, 0, 0]).unwrap();
    canvas.composite(&layer, 2, 0);
    canvas.composite(&layer, -1, 0);
    assert_eq!(canvas.pixel(2, 0), Rgb8::new(0, 0, 255));
    assert_eq!(canvas.pixel(0, 0), Rgb8::WHITE);
    assert_eq!(canvas.pixel(1, 0), Rgb8::WHITE);
}

#[test]
fn layer_length_mismatch_is_rejected() {
    assert!(PremulLayer::new(2, 2, vec![0; 4]).is_err());
}

#[test]
fn template_transparency_flattens_onto_white() {
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 0]));
    let canvas = Canvas::from_template(image::DynamicImage::ImageRgba8(img));
    assert_eq!(canvas.pixel(0, 0), Rgb8::WHITE);
}

#[test]
fn encoded_png_decodes_to_same_pixels() {
    let mut canvas = Canvas::new(2, 2, Rgb8::new(10, 20, 30));
    canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgb8::new(200, 100, 50));
    let bytes = canvas.encode_png().unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(decoded.get_pixel(0, 0).0, [200, 100, 50]);
    assert_eq!(decoded.get_pixel(1, 1).0, [10, 20, 30]);
}
