use std::{path::Path, sync::Arc};

use crate::{
    foundation::core::Rgba8,
    foundation::error::{GridError, GridResult},
};

/// Horizontal anchoring of a rasterized label relative to its pen position.
/// Largest text bitmap side; paint pixmaps are 16-bit.
pub const MAX_TEXT_EXTENT: f64 = u16::MAX as f64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Premultiplied RGBA8 bitmap of a single text line.
#[derive(Clone, Debug)]
pub struct TextBitmap {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Vec<u8>,
    /// Pen x inside the bitmap; the anchor point lands here.
    pub anchor_x: f64,
    /// Baseline y inside the bitmap.
    pub baseline_y: f64,
}

/// Single-line text rasterizer backed by `usvg`/`resvg`.
#[derive(Clone)]
pub struct TextRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for TextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer")
            .field("faces", &self.fontdb.len())
            .finish()
    }
}

impl TextRasterizer {
    /// System fonts plus every `.ttf`/`.otf`/`.ttc` file in `extra_dirs`.
    pub fn new(extra_dirs: &[impl AsRef<Path>]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in extra_dirs {
            load_fonts_from_dir(&mut db, dir.as_ref());
        }
        tracing::debug!(faces = db.len(), "font database ready");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// A rasterizer with no fonts; every label comes back empty.
    pub fn empty() -> Self {
        Self {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
        }
    }

    pub fn has_fonts(&self) -> bool {
        !self.fontdb.is_empty()
    }

    /// Rasterize `text` at `font_size` px. Returns `Ok(None)` for empty text, when no font is
    /// available, or when the bitmap would exceed `MAX_TEXT_EXTENT` on either side.
    pub fn rasterize(
        &self,
        text: &str,
        font_size: f64,
        fill: Rgba8,
        anchor: TextAnchor,
    ) -> GridResult<Option<TextBitmap>> {
        if text.trim().is_empty() || !self.has_fonts() || font_size.is_nan() || font_size <= 0.0 {
            return Ok(None);
        }

        // One em per char covers CJK and other full-width glyphs.
        let chars = text.chars().count() as f64;
        let width = (chars * font_size + font_size).ceil().max(1.0);
        let height = (font_size * 1.5).ceil().max(1.0);
        if width > MAX_TEXT_EXTENT || height > MAX_TEXT_EXTENT {
            tracing::warn!(chars, font_size, "text too large to rasterize, skipping");
            return Ok(None);
        }
        let anchor_x = match anchor {
            TextAnchor::Start => font_size * 0.5,
            TextAnchor::Middle => width * 0.5,
            TextAnchor::End => width - font_size * 0.5,
        };
        let baseline_y = font_size * 1.1;

        let svg = format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}">"#,
                r#"<text x="{x}" y="{y}" font-family="sans-serif" font-size="{size}" "#,
                r#"text-anchor="{anchor}" fill="rgb({r},{g},{b})" fill-opacity="{opacity}">{text}</text>"#,
                "</svg>"
            ),
            w = width,
            h = height,
            x = anchor_x,
            y = baseline_y,
            size = font_size,
            anchor = anchor.as_svg(),
            r = fill.r,
            g = fill.g,
            b = fill.b,
            opacity = f64::from(fill.a) / 255.0,
            text = escape_xml(text),
        );

        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts)
            .map_err(|e| GridError::render(format!("parse text svg: {e}")))?;

        let (w, h) = (width as u32, height as u32);
        let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
            .ok_or_else(|| GridError::render("failed to allocate text pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        Ok(Some(TextBitmap {
            width: w,
            height: h,
            rgba8_premul: pixmap.data().to_vec(),
            anchor_x,
            baseline_y,
        }))
    }
}

/// Draw `bmp` so its anchor point and baseline land on `pen` (canvas space).
pub(crate) fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    bmp: &TextBitmap,
    pen: crate::foundation::core::Point,
) -> GridResult<()> {
    use crate::render::paint::{affine_to_cpu, image_paint};

    let paint = image_paint(&bmp.rgba8_premul, bmp.width, bmp.height)?;
    let origin = kurbo::Vec2::new(pen.x - bmp.anchor_x, pen.y - bmp.baseline_y);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(kurbo::Affine::translate(origin)));
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(bmp.width),
        f64::from(bmp.height),
    ));
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    Ok(())
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(err) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %err, "skipping unreadable font");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
