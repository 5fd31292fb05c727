use super::*;

#[test]
fn pixmap_rejects_length_mismatch() {
    let err = premul_bytes_to_pixmap(&[0u8; 12], 2, 2).unwrap_err();
    assert!(matches!(err, GridError::Render(_)));
}

#[test]
fn pixmap_rejects_oversized_dimensions() {
    assert!(premul_bytes_to_pixmap(&[], 70_000, 0).is_err());
}

#[test]
fn pixmap_keeps_pixels_in_order() {
    let px = [10u8, 20, 30, 255, 0, 0, 0, 0];
    let pixmap = premul_bytes_to_pixmap(&px, 2, 1).unwrap();
    assert_eq!(pixmap.width(), 2);
    assert_eq!(pixmap.height(), 1);
    assert_eq!(pixmap.data_as_u8_slice(), &px);
}

#[test]
fn gradient_runs_corner_to_corner() {
    let start = Rgba8::opaque(0, 0, 0);
    let end = Rgba8::opaque(255, 255, 255);
    let px = diagonal_gradient_premul(3, 3, start, end);
    assert_eq!(&px[0..4], &[0, 0, 0, 255]);
    let last = px.len() - 4;
    assert_eq!(&px[last..], &[255, 255, 255, 255]);
    // Centre texel sits halfway.
    let centre = (3 + 1) * 4;
    assert_eq!(px[centre], 128);
}

#[test]
fn transparent_gradient_stop_is_premultiplied() {
    let start = Rgba8::new(0, 0, 0, 0);
    let end = Rgba8::new(200, 100, 0, 255);
    let px = diagonal_gradient_premul(2, 1, start, end);
    assert_eq!(&px[0..4], &[0, 0, 0, 0]);
}

#[test]
fn rounded_rect_radius_is_capped() {
    let r = Rect::new(0.0, 0.0, 10.0, 40.0);
    let path = rounded_rect_path(r, 100.0);
    use vello_cpu::kurbo::Shape as _;
    let bb = path.bounding_box();
    assert!((bb.width() - 10.0).abs() < 1e-6);
    assert!((bb.height() - 40.0).abs() < 1e-6);
}
