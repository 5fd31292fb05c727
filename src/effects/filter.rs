use std::{fmt, str::FromStr};

use crate::{
    assets::decode::DecodedImage,
    effects::blur::gaussian_blur_premul,
    foundation::error::{GridError, GridResult},
    foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
};

/// Named color/blur treatment applied to every photo of a collage.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FilterId {
    /// No filter.
    #[default]
    None,
    Grayscale,
    Sepia,
    Vintage,
    Warm,
    Cool,
    Vivid,
    Dramatic,
    Fade,
    Noir,
    Dreamy,
}

impl FilterId {
    /// Every filter, in catalog order.
    pub const ALL: [FilterId; 11] = [
        Self::None,
        Self::Grayscale,
        Self::Sepia,
        Self::Vintage,
        Self::Warm,
        Self::Cool,
        Self::Vivid,
        Self::Dramatic,
        Self::Fade,
        Self::Noir,
        Self::Dreamy,
    ];

    /// Stable lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Vintage => "vintage",
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Vivid => "vivid",
            Self::Dramatic => "dramatic",
            Self::Fade => "fade",
            Self::Noir => "noir",
            Self::Dreamy => "dreamy",
        }
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterId {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| GridError::validation(format!("unknown filter '{key}'")))
    }
}

/// One primitive with CSS filter-function semantics.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", content = "amount", rename_all = "snake_case")]
pub enum FilterOp {
    /// Linear multiplier, 1.0 = unchanged.
    Brightness(f32),
    /// Contrast around mid-gray, 1.0 = unchanged.
    Contrast(f32),
    /// Saturation, 0.0 = gray, 1.0 = unchanged.
    Saturate(f32),
    /// Hue rotation in degrees.
    HueRotate(f32),
    /// Grayscale amount in `[0, 1]`.
    Grayscale(f32),
    /// Sepia amount in `[0, 1]`.
    Sepia(f32),
    /// Gaussian standard deviation in output-canvas pixels.
    Blur(f32),
}

/// Ordered composition of primitives.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterChain {
    /// Primitives, applied first to last.
    pub ops: Vec<FilterOp>,
}

impl FilterChain {
    /// Chain from a list of primitives.
    pub fn new(ops: impl Into<Vec<FilterOp>>) -> Self {
        Self { ops: ops.into() }
    }

    /// True when applying the chain cannot change any pixel.
    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(|op| match *op {
            FilterOp::Brightness(v) | FilterOp::Contrast(v) | FilterOp::Saturate(v) => v == 1.0,
            FilterOp::HueRotate(v) => v.rem_euclid(360.0) == 0.0,
            FilterOp::Grayscale(v) | FilterOp::Sepia(v) | FilterOp::Blur(v) => v <= 0.0,
        })
    }
}

/// Resolves a [`FilterId`] to the primitives it stands for.
pub trait FilterCatalog {
    /// Primitives for `id`.
    fn resolve(&self, id: FilterId) -> FilterChain;
}

/// The stock filter set.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinFilters;

impl FilterCatalog for BuiltinFilters {
    fn resolve(&self, id: FilterId) -> FilterChain {
        use FilterOp::*;
        let ops = match id {
            FilterId::None => vec![],
            FilterId::Grayscale => vec![Grayscale(1.0)],
            FilterId::Sepia => vec![Sepia(1.0)],
            FilterId::Vintage => vec![Sepia(0.5), Contrast(1.2), Brightness(0.9)],
            FilterId::Warm => vec![Sepia(0.3), Saturate(1.3), HueRotate(-10.0)],
            FilterId::Cool => vec![Saturate(0.9), HueRotate(15.0), Brightness(1.05)],
            FilterId::Vivid => vec![Saturate(1.5), Contrast(1.1)],
            FilterId::Dramatic => vec![Contrast(1.4), Brightness(0.9), Saturate(1.2)],
            FilterId::Fade => vec![Contrast(0.85), Brightness(1.1), Saturate(0.8)],
            FilterId::Noir => vec![Grayscale(1.0), Contrast(1.3)],
            FilterId::Dreamy => vec![Brightness(1.1), Saturate(0.9), Blur(1.0)],
        };
        FilterChain::new(ops)
    }
}

type Matrix3 = [[f32; 3]; 3];

/// Apply `chain` to a decoded image.
///
/// `source_px_per_output_px` converts blur radii from canvas pixels into source pixels,
/// since the image is filtered before it is scaled into its cell.
pub fn apply_filter(
    image: &DecodedImage,
    chain: &FilterChain,
    source_px_per_output_px: f64,
) -> GridResult<DecodedImage> {
    if chain.is_identity() {
        return Ok(image.clone());
    }

    let mut px = image.rgba8.as_ref().clone();
    for op in &chain.ops {
        match *op {
            FilterOp::Blur(sigma) => {
                let sigma_src = (f64::from(sigma) * source_px_per_output_px) as f32;
                premultiply_rgba8_in_place(&mut px);
                px = gaussian_blur_premul(&px, image.width, image.height, sigma_src)?;
                unpremultiply_rgba8_in_place(&mut px);
            }
            color => apply_color_op(&mut px, color),
        }
    }
    DecodedImage::from_rgba8(image.width, image.height, px)
}

/// Apply one color primitive to straight RGBA8 pixels. Alpha is left untouched.
pub fn apply_color_op(rgba: &mut [u8], op: FilterOp) {
    enum Kind {
        Linear { slope: f32, intercept: f32 },
        Matrix(Matrix3),
    }

    let kind = match op {
        FilterOp::Brightness(v) => Kind::Linear {
            slope: v.max(0.0),
            intercept: 0.0,
        },
        FilterOp::Contrast(v) => {
            let v = v.max(0.0);
            Kind::Linear {
                slope: v,
                intercept: 0.5 - 0.5 * v,
            }
        }
        FilterOp::Saturate(v) => Kind::Matrix(saturate_matrix(v.max(0.0))),
        FilterOp::HueRotate(deg) => Kind::Matrix(hue_rotate_matrix(deg)),
        FilterOp::Grayscale(v) => Kind::Matrix(grayscale_matrix(v.clamp(0.0, 1.0))),
        FilterOp::Sepia(v) => Kind::Matrix(sepia_matrix(v.clamp(0.0, 1.0))),
        FilterOp::Blur(_) => return,
    };

    for px in rgba.chunks_exact_mut(4) {
        let c = [
            f32::from(px[0]) / 255.0,
            f32::from(px[1]) / 255.0,
            f32::from(px[2]) / 255.0,
        ];
        let out = match &kind {
            Kind::Linear { slope, intercept } => c.map(|v| v * slope + intercept),
            Kind::Matrix(m) => [
                m[0][0] * c[0] + m[0][1] * c[1] + m[0][2] * c[2],
                m[1][0] * c[0] + m[1][1] * c[1] + m[1][2] * c[2],
                m[2][0] * c[0] + m[2][1] * c[1] + m[2][2] * c[2],
            ],
        };
        for (dst, v) in px[..3].iter_mut().zip(out) {
            *dst = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
    }
}

fn saturate_matrix(s: f32) -> Matrix3 {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn grayscale_matrix(amount: f32) -> Matrix3 {
    let g = 1.0 - amount;
    [
        [0.2126 + 0.7874 * g, 0.7152 - 0.7152 * g, 0.0722 - 0.0722 * g],
        [0.2126 - 0.2126 * g, 0.7152 + 0.2848 * g, 0.0722 - 0.0722 * g],
        [0.2126 - 0.2126 * g, 0.7152 - 0.7152 * g, 0.0722 + 0.9278 * g],
    ]
}

fn sepia_matrix(amount: f32) -> Matrix3 {
    let g = 1.0 - amount;
    [
        [0.393 + 0.607 * g, 0.769 - 0.769 * g, 0.189 - 0.189 * g],
        [0.349 - 0.349 * g, 0.686 + 0.314 * g, 0.168 - 0.168 * g],
        [0.272 - 0.272 * g, 0.534 - 0.534 * g, 0.131 + 0.869 * g],
    ]
}

fn hue_rotate_matrix(deg: f32) -> Matrix3 {
    let (sin, cos) = deg.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
