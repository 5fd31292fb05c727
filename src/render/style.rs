use crate::{
    assets::decode::DecodedImage,
    config::EditorConfig,
    effects::filter::{FilterChain, apply_filter},
    foundation::core::{Point, Rect, Rgba8, Vec2},
    foundation::error::GridResult,
    interaction::transform::ImageTransform,
    layout::model::LayoutStyle,
    render::paint::{
        affine_to_cpu, color, fill_diagonal_gradient, image_paint, rect_path, rect_to_cpu,
        rounded_rect_path,
    },
    render::text::{TextAnchor, TextRasterizer, draw_text},
};

/// Corner radius of `grid` cells at full output resolution.
pub const GRID_CORNER_RADIUS: f64 = 8.0;
/// `creative` corner radius as a fraction of the cell's shorter side.
pub const CREATIVE_RADIUS_FRACTION: f64 = 0.10;
/// `framed` margin as a fraction of the cell's shorter side.
pub const FRAME_MARGIN_FRACTION: f64 = 0.10;
/// Alpha of the far corner of the `masked` overlay (~10% black).
pub const MASK_OVERLAY_ALPHA: u8 = 26;
pub const SELECTION_STROKE_WIDTH: f64 = 4.0;

const PLACEHOLDER_STROKE_WIDTH: f64 = 2.0;
const PLACEHOLDER_DASH: [f64; 2] = [8.0, 6.0];

/// Everything needed to draw one occupied cell.
#[derive(Clone, Copy, Debug)]
pub struct StyledImage<'a> {
    pub rect: Rect,
    pub image: &'a DecodedImage,
    pub style: LayoutStyle,
    pub filter: &'a FilterChain,
    pub transform: ImageTransform,
    /// Placement offset of the `framed` box; ignored by other styles.
    pub jitter: Vec2,
}

/// Where a cover-fitted image lands: uniform scale from source pixels and the top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverPlacement {
    pub scale: f64,
    pub origin: Point,
}

impl CoverPlacement {
    /// Canvas-space rectangle covered by the scaled image.
    pub fn bounds(&self, image_w: u32, image_h: u32) -> Rect {
        Rect::from_origin_size(
            self.origin,
            (
                f64::from(image_w) * self.scale,
                f64::from(image_h) * self.scale,
            ),
        )
    }
}

/// Cover-fit `image_w`x`image_h` into `rect`, zoomed by `t.scale`, centred, then nudged by
/// `(t.x, t.y)`.
pub fn cover_placement(image_w: u32, image_h: u32, rect: Rect, t: ImageTransform) -> CoverPlacement {
    let iw = f64::from(image_w.max(1));
    let ih = f64::from(image_h.max(1));
    let cover = (rect.width() / iw).max(rect.height() / ih);
    let scale = cover * t.scale;
    let origin = Point::new(
        rect.x0 + (rect.width() - iw * scale) * 0.5 + t.x,
        rect.y0 + (rect.height() - ih * scale) * 0.5 + t.y,
    );
    CoverPlacement { scale, origin }
}

/// Corner radius of the clip shape for `style` in `rect`.
pub fn corner_radius(style: LayoutStyle, rect: Rect) -> f64 {
    match style {
        LayoutStyle::Grid => GRID_CORNER_RADIUS,
        LayoutStyle::Creative => rect.width().min(rect.height()) * CREATIVE_RADIUS_FRACTION,
        LayoutStyle::Framed | LayoutStyle::Masked => 0.0,
    }
}

/// Photo area inside a `framed` box.
pub fn frame_inset(frame: Rect) -> Rect {
    let m = frame.width().min(frame.height()) * FRAME_MARGIN_FRACTION;
    Rect::new(frame.x0 + m, frame.y0 + m, frame.x1 - m, frame.y1 - m)
}

/// Outline used for the selection indicator.
pub fn outline_radius(style: LayoutStyle, rect: Rect) -> f64 {
    corner_radius(style, rect).max(GRID_CORNER_RADIUS)
}

/// Draw one occupied cell in its style.
pub fn draw_styled_image(
    ctx: &mut vello_cpu::RenderContext,
    item: &StyledImage<'_>,
    cfg: &EditorConfig,
) -> GridResult<()> {
    match item.style {
        LayoutStyle::Grid | LayoutStyle::Creative => {
            let clip = rounded_rect_path(item.rect, corner_radius(item.style, item.rect));
            draw_clipped_photo(ctx, item, item.rect, &clip)
        }
        LayoutStyle::Framed => draw_framed(ctx, item, cfg),
        LayoutStyle::Masked => {
            draw_clipped_photo(ctx, item, item.rect, &rect_path(item.rect))?;
            fill_diagonal_gradient(
                ctx,
                item.rect,
                Rgba8::new(0, 0, 0, 0),
                Rgba8::new(0, 0, 0, MASK_OVERLAY_ALPHA),
            )
        }
    }
}

fn draw_framed(
    ctx: &mut vello_cpu::RenderContext,
    item: &StyledImage<'_>,
    cfg: &EditorConfig,
) -> GridResult<()> {
    let frame = item.rect + item.jitter;
    draw_drop_shadow(ctx, frame, cfg);

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color(cfg.frame_color));
    ctx.fill_rect(&rect_to_cpu(frame));

    let photo = frame_inset(frame);
    draw_clipped_photo(ctx, item, photo, &rect_path(photo))
}

/// Soft shadow approximated by stacked translucent rounded rects, offset downwards.
fn draw_drop_shadow(ctx: &mut vello_cpu::RenderContext, frame: Rect, cfg: &EditorConfig) {
    const LAYERS: u32 = 4;
    let reach = (frame.width().min(frame.height()) * 0.03).clamp(2.0, 16.0);
    let per_layer = u16::from(cfg.shadow_color.a) / LAYERS as u16;
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    for i in (1..=LAYERS).rev() {
        let spread = reach * f64::from(i) / f64::from(LAYERS);
        let r = (frame + Vec2::new(0.0, reach * 0.5)).inflate(spread, spread);
        ctx.set_paint(color(cfg.shadow_color.with_alpha(per_layer as u8)));
        ctx.fill_path(&rounded_rect_path(r, spread));
    }
}

/// Filter the source, clip to `clip`, and paint it cover-fitted into `target`.
fn draw_clipped_photo(
    ctx: &mut vello_cpu::RenderContext,
    item: &StyledImage<'_>,
    target: Rect,
    clip: &vello_cpu::kurbo::BezPath,
) -> GridResult<()> {
    let place = cover_placement(item.image.width, item.image.height, target, item.transform);
    let source = fit_source(item.image, place.scale)?;
    let sx = place.scale * f64::from(item.image.width) / f64::from(source.width);
    let sy = place.scale * f64::from(item.image.height) / f64::from(source.height);

    let filtered = apply_filter(&source, item.filter, 1.0 / sx.max(1e-6))?;
    let paint = image_paint(&filtered.to_premul(), filtered.width, filtered.height)?;

    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.push_clip_layer(clip);
    let xform = kurbo::Affine::translate(place.origin.to_vec2()) * kurbo::Affine::scale_non_uniform(sx, sy);
    ctx.set_transform(affine_to_cpu(xform));
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(filtered.width),
        f64::from(filtered.height),
    ));
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.pop_layer();
    Ok(())
}

/// Downsample sources far larger than their on-canvas footprint (or beyond 16-bit dimensions)
/// so filtering and sampling stay proportional to the output.
fn fit_source(image: &DecodedImage, scale: f64) -> GridResult<DecodedImage> {
    let limit = f64::from(u16::MAX);
    let target_w = (f64::from(image.width) * scale * 2.0).ceil().clamp(1.0, limit);
    let target_h = (f64::from(image.height) * scale * 2.0).ceil().clamp(1.0, limit);
    if target_w >= f64::from(image.width) && target_h >= f64::from(image.height) {
        return Ok(image.clone());
    }
    let (w, h) = (
        (target_w as u32).min(image.width),
        (target_h as u32).min(image.height),
    );
    let Some(src) =
        image::RgbaImage::from_raw(image.width, image.height, image.rgba8.as_ref().clone())
    else {
        return Ok(image.clone());
    };
    let resized = image::imageops::resize(&src, w, h, image::imageops::FilterType::Triangle);
    DecodedImage::from_rgba8(w, h, resized.into_raw())
}

/// Accent outline around the cell's rounded bound, drawn over whatever is already there.
pub fn draw_selection_outline(
    ctx: &mut vello_cpu::RenderContext,
    rect: Rect,
    style: LayoutStyle,
    cfg: &EditorConfig,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(SELECTION_STROKE_WIDTH));
    ctx.set_paint(color(cfg.accent));
    ctx.stroke_path(&rounded_rect_path(rect, outline_radius(style, rect)));
}

/// Label drawn in an empty slot (1-based).
pub fn placeholder_label(slot: usize) -> String {
    format!("Image {}", slot + 1)
}

/// Dashed, translucent empty-slot marker with a centred "Image {n}" label.
pub fn draw_placeholder(
    ctx: &mut vello_cpu::RenderContext,
    rect: Rect,
    slot: usize,
    cfg: &EditorConfig,
    text: &TextRasterizer,
) -> GridResult<()> {
    let path = rounded_rect_path(rect, GRID_CORNER_RADIUS);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color(cfg.placeholder_fill));
    ctx.fill_path(&path);

    ctx.set_stroke(
        vello_cpu::kurbo::Stroke::new(PLACEHOLDER_STROKE_WIDTH).with_dashes(0.0, PLACEHOLDER_DASH),
    );
    ctx.set_paint(color(cfg.placeholder_border));
    ctx.stroke_path(&path);

    let font_size = (rect.width().min(rect.height()) * 0.08).clamp(10.0, 48.0);
    if let Some(bmp) = text.rasterize(
        &placeholder_label(slot),
        font_size,
        cfg.placeholder_text,
        TextAnchor::Middle,
    )? {
        let c = rect.center();
        draw_text(ctx, &bmp, Point::new(c.x, c.y + font_size * 0.35))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/style.rs"]
mod tests;
