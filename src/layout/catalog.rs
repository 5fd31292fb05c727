use crate::layout::model::{Layout, LayoutStyle};

/// Chooses a layout for a given number of images.
pub trait LayoutRecommender {
    /// Recommend a layout for `image_count` images.
    fn recommend(&self, image_count: usize) -> Layout;
}

/// Picks the smallest grid that comfortably fits the image count.
#[derive(Clone, Copy, Debug, Default)]
pub struct CountRecommender {
    /// Style applied to recommended layouts.
    pub style: LayoutStyle,
}

impl CountRecommender {
    /// Grid shape `(rows, cols)` for `image_count` images.
    pub fn shape_for(image_count: usize) -> (u32, u32) {
        match image_count {
            0 | 1 => (1, 1),
            2 => (1, 2),
            3 => (1, 3),
            4 => (2, 2),
            5 | 6 => (2, 3),
            7..=9 => (3, 3),
            n => {
                let cols = (n as f64).sqrt().ceil() as usize;
                let rows = n.div_ceil(cols);
                (rows as u32, cols as u32)
            }
        }
    }
}

impl LayoutRecommender for CountRecommender {
    fn recommend(&self, image_count: usize) -> Layout {
        let (rows, cols) = Self::shape_for(image_count);
        template_layout(rows, cols, self.style)
    }
}

fn template_layout(rows: u32, cols: u32, style: LayoutStyle) -> Layout {
    let name = match (rows, cols, style) {
        (1, 1, _) => "Single".to_string(),
        (1, 2, _) => "Side by Side".to_string(),
        (2, 1, _) => "Stacked".to_string(),
        (1, 3, _) => "Triptych".to_string(),
        (2, 2, LayoutStyle::Framed) => "Polaroid Wall".to_string(),
        (2, 2, _) => "Classic Grid".to_string(),
        (2, 3, _) => "Six Pack".to_string(),
        (3, 3, _) => "Nine Grid".to_string(),
        (r, c, _) => format!("{r}x{c} Grid"),
    };
    Layout {
        id: format!("{}-{rows}x{cols}", style.as_str()),
        name,
        description: format!("{rows} row(s) by {cols} column(s), {style} style"),
        rows,
        cols,
        style,
    }
}

/// Built-in layout templates.
pub fn templates() -> Vec<Layout> {
    const SHAPES: [(u32, u32); 8] = [(1, 1), (1, 2), (2, 1), (1, 3), (2, 2), (2, 3), (3, 2), (3, 3)];
    let mut out = Vec::with_capacity(SHAPES.len() * LayoutStyle::ALL.len());
    for style in LayoutStyle::ALL {
        for (rows, cols) in SHAPES {
            out.push(template_layout(rows, cols, style));
        }
    }
    out
}

/// Look up a built-in template by id, e.g. `framed-2x2`.
pub fn find_template(id: &str) -> Option<Layout> {
    let id = id.trim().to_ascii_lowercase();
    templates().into_iter().find(|l| l.id == id)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/catalog.rs"]
mod tests;
