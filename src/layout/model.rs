use std::{fmt, str::FromStr};

use crate::{
    foundation::core::OutputSize,
    foundation::error::{GridError, GridResult},
    layout::geometry::compute_output_size,
};

/// Visual treatment applied to every cell of a layout.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStyle {
    /// Rounded cells, no decoration.
    #[default]
    Grid,
    /// Photo inset inside a solid frame with a drop shadow.
    Framed,
    /// Rectangular cells with a diagonal darkening overlay.
    Masked,
    /// Generously rounded cells.
    Creative,
}

impl LayoutStyle {
    /// All styles, in catalog order.
    pub const ALL: [LayoutStyle; 4] = [Self::Grid, Self::Framed, Self::Masked, Self::Creative];

    /// Stable lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Framed => "framed",
            Self::Masked => "masked",
            Self::Creative => "creative",
        }
    }
}

impl fmt::Display for LayoutStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutStyle {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(Self::Grid),
            "framed" => Ok(Self::Framed),
            "masked" => Ok(Self::Masked),
            "creative" => Ok(Self::Creative),
            other => Err(GridError::validation(format!(
                "unknown layout style '{other}'"
            ))),
        }
    }
}

/// A named rows x cols grid plus a rendering style.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Layout {
    /// Stable identifier.
    pub id: String,
    /// Human-readable name, also used in export file names.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Row count, >= 1.
    pub rows: u32,
    /// Column count, >= 1.
    pub cols: u32,
    /// Rendering style.
    #[serde(default)]
    pub style: LayoutStyle,
}

/// Upper bound on `rows * cols` for any layout.
pub const MAX_GRID_SLOTS: u64 = 1024;

impl Layout {
    /// Build a layout, rejecting empty and oversized grids.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rows: u32,
        cols: u32,
        style: LayoutStyle,
    ) -> GridResult<Self> {
        let out = Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            rows,
            cols,
            style,
        };
        out.validate()?;
        Ok(out)
    }

    /// Ad-hoc layout named after its grid shape, e.g. `2x3`.
    pub fn grid(rows: u32, cols: u32, style: LayoutStyle) -> GridResult<Self> {
        let name = format!("{rows}x{cols}");
        Self::new(format!("{style}-{name}"), name, rows, cols, style)
    }

    /// Builder-style description setter.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Same grid drawn in another style; the id follows the style.
    pub fn with_style(mut self, style: LayoutStyle) -> Self {
        if style != self.style {
            self.id = format!("{style}-{}x{}", self.rows, self.cols);
            self.style = style;
        }
        self
    }

    /// Check `rows >= 1`, `cols >= 1` and `rows * cols <= MAX_GRID_SLOTS`.
    pub fn validate(&self) -> GridResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::validation(format!(
                "layout '{}' must have at least one row and one column (got {}x{})",
                self.id, self.rows, self.cols
            )));
        }
        let slots = u64::from(self.rows) * u64::from(self.cols);
        if slots > MAX_GRID_SLOTS {
            return Err(GridError::validation(format!(
                "layout '{}' has {slots} cells ({}x{}); at most {MAX_GRID_SLOTS} are supported",
                self.id, self.rows, self.cols
            )));
        }
        Ok(())
    }

    /// Number of cells.
    pub fn slot_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Cells still free for `image_count` images.
    pub fn slots_remaining(&self, image_count: usize) -> usize {
        self.slot_count().saturating_sub(image_count)
    }
}

/// Aspect ratio as two positive integers, written `W:H`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AspectRatio {
    /// Horizontal term.
    pub width: u32,
    /// Vertical term.
    pub height: u32,
}

impl AspectRatio {
    /// Square `1:1`.
    pub const SQUARE: AspectRatio = AspectRatio {
        width: 1,
        height: 1,
    };

    /// Build a ratio; both terms must be positive.
    pub fn new(width: u32, height: u32) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::configuration(format!(
                "aspect ratio terms must be positive (got {width}:{height})"
            )));
        }
        Ok(Self { width, height })
    }

    /// File-name friendly form, `W x H` joined with `x`.
    pub fn file_token(self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::SQUARE
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((w, h)) = s.trim().split_once(':') else {
            return Err(GridError::configuration(format!(
                "aspect ratio must look like 'W:H' (got '{s}')"
            )));
        };
        let parse = |v: &str| -> GridResult<u32> {
            v.trim().parse::<u32>().map_err(|_| {
                GridError::configuration(format!(
                    "aspect ratio term '{v}' is not a positive integer"
                ))
            })
        };
        Self::new(parse(w)?, parse(h)?)
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AspectRatio> for String {
    fn from(value: AspectRatio) -> Self {
        value.to_string()
    }
}

/// Requested output: aspect ratio plus the length of the longer side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutputSpec {
    /// Target aspect ratio.
    pub aspect: AspectRatio,
    /// Length in pixels of the longer side.
    pub resolution: u32,
}

impl OutputSpec {
    /// Pair an aspect ratio with a resolution.
    pub fn new(aspect: AspectRatio, resolution: u32) -> Self {
        Self { aspect, resolution }
    }

    /// Derived pixel dimensions.
    pub fn output_size(&self) -> GridResult<OutputSize> {
        compute_output_size(self.aspect.width, self.aspect.height, self.resolution)
    }
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self {
            aspect: AspectRatio::SQUARE,
            resolution: 1080,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/model.rs"]
mod tests;
