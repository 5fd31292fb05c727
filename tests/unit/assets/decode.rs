use super::*;

#[test]
fn decode_png_keeps_straight_alpha() {
    let png = encode_png(1, 1, &[100, 50, 200, 128]).unwrap();
    let img = decode_image(&png).unwrap();
    assert_eq!((img.width, img.height), (1, 1));
    assert_eq!(img.rgba8.as_slice(), &[100, 50, 200, 128]);
    assert_eq!(
        img.to_premul(),
        vec![
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}

#[test]
fn garbage_bytes_are_decode_errors() {
    let err = decode_image(b"not an image").unwrap_err();
    assert!(matches!(err, GridError::Decode(_)));
}

#[test]
fn from_rgba8_checks_length() {
    assert!(DecodedImage::from_rgba8(2, 2, vec![0; 16]).is_ok());
    assert!(DecodedImage::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(DecodedImage::from_rgba8(0, 2, vec![]).is_err());
}
