use crate::{
    assets::decode::encode_png,
    foundation::core::OutputSize,
    foundation::error::{GridError, GridResult},
    foundation::math::unpremultiply_rgba8_in_place,
};

/// A rendered collage in row-major RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn size(&self) -> OutputSize {
        OutputSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel at `(x, y)` as stored.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixels.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    /// Lossless, full-resolution PNG bytes.
    pub fn to_png(&self) -> GridResult<Vec<u8>> {
        encode_png(self.width, self.height, &self.to_straight_rgba8())
    }

    /// Largest size that fits `bounds` with the frame's aspect ratio; never upscales.
    pub fn preview_size(&self, bounds: [u32; 2]) -> (u32, u32) {
        preview_size(self.width, self.height, bounds)
    }

    /// Downscaled straight-alpha copy for on-screen display.
    pub fn preview(&self, bounds: [u32; 2]) -> GridResult<FrameRGBA> {
        let (w, h) = self.preview_size(bounds);
        let src = image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| GridError::render("frame buffer does not match its dimensions"))?;
        let data = if (w, h) == (self.width, self.height) {
            src.into_raw()
        } else {
            image::imageops::resize(&src, w, h, image::imageops::FilterType::Triangle).into_raw()
        };
        Ok(FrameRGBA {
            width: w,
            height: h,
            data,
            premultiplied: false,
        })
    }
}

pub fn preview_size(width: u32, height: u32, bounds: [u32; 2]) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let sx = f64::from(bounds[0]) / f64::from(width);
    let sy = f64::from(bounds[1]) / f64::from(height);
    let s = sx.min(sy).min(1.0);
    let w = ((f64::from(width) * s).round() as u32).max(1);
    let h = ((f64::from(height) * s).round() as u32).max(1);
    (w, h)
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
