use std::{io::Cursor, sync::Arc};

use anyhow::Context;

use crate::{
    foundation::error::{GridError, GridResult},
    foundation::math::premultiply_rgba8_in_place,
};

/// Decoded raster image in straight (non-premultiplied) RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major straight RGBA8 pixels.
    pub rgba8: Arc<Vec<u8>>,
}

impl DecodedImage {
    /// Wrap raw straight RGBA8 pixels, checking the buffer length.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::decode("image has zero width or height"));
        }
        if rgba8.len() != width as usize * height as usize * 4 {
            return Err(GridError::decode(format!(
                "rgba8 buffer length {} does not match {width}x{height}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Copy of the pixels with color channels multiplied by alpha.
    pub fn to_premul(&self) -> Vec<u8> {
        let mut out = self.rgba8.as_ref().clone();
        premultiply_rgba8_in_place(&mut out);
        out
    }
}

/// Decode any format supported by `image` into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> GridResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| GridError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    DecodedImage::from_rgba8(width, height, rgba.into_raw())
}

/// Encode straight RGBA8 pixels as PNG.
pub fn encode_png(width: u32, height: u32, rgba8: &[u8]) -> GridResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(width, height, rgba8.to_vec())
        .ok_or_else(|| GridError::render("png source buffer does not match dimensions"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
