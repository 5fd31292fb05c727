use std::sync::Arc;

use kurbo::Shape;

use crate::{
    foundation::core::{Point, Rect, Rgba8},
    foundation::error::{GridError, GridResult},
};

/// Gradients are rasterized at this size and stretched; bilinear sampling keeps them smooth.
const GRADIENT_TEXELS: u32 = 128;

pub(crate) fn color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

pub(crate) fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

pub(crate) fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub(crate) fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Rounded rectangle outline; the radius is capped at half the shorter side.
pub(crate) fn rounded_rect_path(r: Rect, radius: f64) -> vello_cpu::kurbo::BezPath {
    let max_r = (r.width().min(r.height()) * 0.5).max(0.0);
    let radius = radius.clamp(0.0, max_r);
    bezpath_to_cpu(&kurbo::RoundedRect::from_rect(r, radius).to_path(0.1))
}

pub(crate) fn rect_path(r: Rect) -> vello_cpu::kurbo::BezPath {
    bezpath_to_cpu(&r.to_path(0.1))
}

pub(crate) fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> GridResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| GridError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| GridError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(GridError::render("premultiplied image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

/// Wrap premultiplied pixels as an image paint of `width`x`height` user-space units.
pub(crate) fn image_paint(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> GridResult<vello_cpu::Image> {
    let pixmap = premul_bytes_to_pixmap(rgba8_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

/// Premultiplied texels of a top-left to bottom-right gradient.
pub(crate) fn diagonal_gradient_premul(width: u32, height: u32, start: Rgba8, end: Rgba8) -> Vec<u8> {
    let mut out = Vec::with_capacity(width as usize * height as usize * 4);
    let span_x = f64::from(width.saturating_sub(1).max(1));
    let span_y = f64::from(height.saturating_sub(1).max(1));
    for y in 0..height {
        for x in 0..width {
            let t = (f64::from(x) / span_x + f64::from(y) / span_y) * 0.5;
            out.extend_from_slice(&start.lerp(end, t).to_premul());
        }
    }
    out
}

/// Fill `rect` with a diagonal gradient from `start` (top-left) to `end` (bottom-right).
pub(crate) fn fill_diagonal_gradient(
    ctx: &mut vello_cpu::RenderContext,
    rect: Rect,
    start: Rgba8,
    end: Rgba8,
) -> GridResult<()> {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return Ok(());
    }
    let n = GRADIENT_TEXELS;
    let texels = diagonal_gradient_premul(n, n, start, end);
    let paint = image_paint(&texels, n, n)?;

    let xform = kurbo::Affine::translate(rect.origin().to_vec2())
        * kurbo::Affine::scale_non_uniform(rect.width() / f64::from(n), rect.height() / f64::from(n));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(xform));
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(n), f64::from(n)));
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
