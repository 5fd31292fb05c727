use super::*;

fn px(rgba: [u8; 4]) -> Vec<u8> {
    rgba.to_vec()
}

#[test]
fn filter_ids_parse_and_display() {
    for id in FilterId::ALL {
        assert_eq!(id.to_string().parse::<FilterId>().unwrap(), id);
    }
    assert_eq!("  Sepia ".parse::<FilterId>().unwrap(), FilterId::Sepia);
    assert!("lomo".parse::<FilterId>().is_err());
}

#[test]
fn none_resolves_to_identity() {
    assert!(BuiltinFilters.resolve(FilterId::None).is_identity());
    for id in FilterId::ALL.into_iter().skip(1) {
        assert!(!BuiltinFilters.resolve(id).is_identity(), "{id}");
    }
}

#[test]
fn full_grayscale_equalizes_channels() {
    let mut p = px([200, 40, 90, 255]);
    apply_color_op(&mut p, FilterOp::Grayscale(1.0));
    assert!(p[0].abs_diff(p[1]) <= 1 && p[1].abs_diff(p[2]) <= 1, "{p:?}");
    assert_eq!(p[3], 255);
}

#[test]
fn brightness_and_contrast_follow_css() {
    let mut p = px([100, 200, 0, 77]);
    apply_color_op(&mut p, FilterOp::Brightness(2.0));
    assert_eq!(p, vec![200, 255, 0, 77]);

    let mut p = px([128, 0, 255, 255]);
    apply_color_op(&mut p, FilterOp::Contrast(0.0));
    assert_eq!(p, vec![128, 128, 128, 255]);
}

#[test]
fn identity_amounts_leave_pixels_alone() {
    let original = px([12, 150, 240, 255]);
    for op in [
        FilterOp::Saturate(1.0),
        FilterOp::HueRotate(0.0),
        FilterOp::Sepia(0.0),
        FilterOp::Grayscale(0.0),
    ] {
        let mut p = original.clone();
        apply_color_op(&mut p, op);
        for (a, b) in p.iter().zip(&original) {
            assert!(a.abs_diff(*b) <= 1, "{op:?}: {p:?}");
        }
    }
}

#[test]
fn apply_filter_keeps_dimensions_and_alpha() {
    let img = DecodedImage::from_rgba8(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
    let out = apply_filter(&img, &BuiltinFilters.resolve(FilterId::Sepia), 1.0).unwrap();
    assert_eq!((out.width, out.height), (2, 1));
    assert_eq!(out.rgba8[3], 255);
    assert_eq!(out.rgba8[7], 128);
    assert_ne!(&out.rgba8[..3], &[255, 0, 0]);
}

#[test]
fn blur_only_chain_smooths_edges() {
    let mut data = Vec::new();
    for x in 0..8 {
        let v = if x < 4 { 0 } else { 255 };
        data.extend_from_slice(&[v, v, v, 255]);
    }
    let img = DecodedImage::from_rgba8(8, 1, data).unwrap();
    let out = apply_filter(&img, &FilterChain::new(vec![FilterOp::Blur(1.0)]), 1.0).unwrap();
    let mid = out.rgba8[3 * 4];
    assert!(mid > 0 && mid < 255, "mid={mid}");
}

#[test]
fn chains_serialize_with_op_tags() {
    let chain = FilterChain::new(vec![FilterOp::HueRotate(90.0)]);
    let v = serde_json::to_value(&chain).unwrap();
    assert_eq!(v["ops"][0]["op"], "hue_rotate");
    assert_eq!(v["ops"][0]["amount"], 90.0);
}
