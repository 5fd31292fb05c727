use super::*;

fn solid(w: u32, h: u32, px: [u8; 4], premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied,
    }
}

#[test]
fn preview_preserves_aspect_and_never_upscales() {
    assert_eq!(preview_size(1080, 1080, [800, 800]), (800, 800));
    assert_eq!(preview_size(1920, 1080, [800, 800]), (800, 450));
    assert_eq!(preview_size(1080, 1920, [800, 800]), (450, 800));
    assert_eq!(preview_size(100, 50, [800, 800]), (100, 50));
    assert_eq!(preview_size(10_000, 1, [100, 100]), (100, 1));
}

#[test]
fn png_round_trips_straight_pixels() {
    let frame = solid(3, 2, [128, 64, 0, 128], true);
    let png = frame.to_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    let p = decoded.get_pixel(1, 1).0;
    assert_eq!(p[3], 128);
    assert!(p[0] >= 254, "{p:?}");
}

#[test]
fn preview_resizes_and_unpremultiplies() {
    let frame = solid(40, 20, [0, 0, 255, 255], true);
    let small = frame.preview([10, 10]).unwrap();
    assert_eq!((small.width, small.height), (10, 5));
    assert!(!small.premultiplied);
    assert_eq!(small.pixel(5, 2), Some([0, 0, 255, 255]));
    assert_eq!(small.pixel(10, 0), None);
}
