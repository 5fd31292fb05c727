use crate::{
    foundation::core::{OutputSize, Point, Rect},
    foundation::error::{GridError, GridResult},
    layout::model::{LayoutStyle, MAX_GRID_SLOTS},
};

/// Padding around the grid as a fraction of the shorter canvas side.
pub const PADDING_FRACTION: f64 = 0.02;

/// Derive pixel dimensions from an aspect ratio and the length of the longer side.
///
/// Landscape and square ratios pin the width to `resolution`; portrait ratios pin the height.
/// The other side is rounded to the nearest pixel and never drops below 1.
pub fn compute_output_size(aspect_w: u32, aspect_h: u32, resolution: u32) -> GridResult<OutputSize> {
    if aspect_w == 0 || aspect_h == 0 {
        return Err(GridError::configuration(format!(
            "aspect ratio terms must be positive (got {aspect_w}:{aspect_h})"
        )));
    }
    if resolution == 0 {
        return Err(GridError::configuration("resolution must be positive"));
    }

    let r = f64::from(resolution);
    let (width, height) = if aspect_w >= aspect_h {
        let h = (r * f64::from(aspect_h) / f64::from(aspect_w)).round();
        (resolution, (h as u32).max(1))
    } else {
        let w = (r * f64::from(aspect_w) / f64::from(aspect_h)).round();
        ((w as u32).max(1), resolution)
    };
    Ok(OutputSize { width, height })
}

/// Outer padding for a canvas of `size`.
pub fn grid_padding(size: OutputSize) -> f64 {
    size.min_side() * PADDING_FRACTION
}

/// Gap between neighbouring cells; framed cells need room for the border shadow.
pub fn cell_gap(padding: f64, style: LayoutStyle) -> f64 {
    match style {
        LayoutStyle::Framed => padding * 2.0,
        LayoutStyle::Grid | LayoutStyle::Masked | LayoutStyle::Creative => padding * 0.5,
    }
}

/// Uniform cell rectangles in row-major order.
///
/// Empty grids and grids with more than `MAX_GRID_SLOTS` cells yield no cells.
pub fn compute_cell_rects(size: OutputSize, rows: u32, cols: u32, style: LayoutStyle) -> Vec<Rect> {
    if rows == 0 || cols == 0 || u64::from(rows) * u64::from(cols) > MAX_GRID_SLOTS {
        return Vec::new();
    }

    let padding = grid_padding(size);
    let gap = cell_gap(padding, style);
    let avail_w = (f64::from(size.width) - padding * 2.0).max(0.0);
    let avail_h = (f64::from(size.height) - padding * 2.0).max(0.0);
    let cell_w = ((avail_w - gap * f64::from(cols - 1)) / f64::from(cols)).max(0.0);
    let cell_h = ((avail_h - gap * f64::from(rows - 1)) / f64::from(rows)).max(0.0);

    let mut out = Vec::with_capacity(rows as usize * cols as usize);
    for row in 0..rows {
        for col in 0..cols {
            let x0 = padding + f64::from(col) * (cell_w + gap);
            let y0 = padding + f64::from(row) * (cell_h + gap);
            out.push(Rect::new(x0, y0, x0 + cell_w, y0 + cell_h));
        }
    }
    out
}

/// Index of the cell containing `p` (canvas space), if any. Gaps and padding match nothing.
pub fn cell_at(cells: &[Rect], p: Point) -> Option<usize> {
    cells
        .iter()
        .position(|r| p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
