use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::core::Rgba8,
    foundation::error::{GridError, GridResult},
};

/// Hard ceiling for `max_resolution`; raster surfaces are addressed with 16-bit dimensions.
pub const RESOLUTION_CEILING: u32 = 16_384;

/// Editor-wide appearance and output settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Text stamped in the bottom-right corner of non-empty collages.
    pub watermark: String,
    /// Watermark text color.
    pub watermark_color: Rgba8,
    /// Selection outline color.
    pub accent: Rgba8,
    /// Background gradient, top-left stop.
    pub background_start: Rgba8,
    /// Background gradient, bottom-right stop.
    pub background_end: Rgba8,
    /// Border color of the `framed` style.
    pub frame_color: Rgba8,
    /// Drop shadow color of the `framed` style.
    pub shadow_color: Rgba8,
    /// Empty-slot fill.
    pub placeholder_fill: Rgba8,
    /// Empty-slot dashed border.
    pub placeholder_border: Rgba8,
    /// Empty-slot label color.
    pub placeholder_text: Rgba8,
    /// Seed for the `framed` placement jitter; `None` disables jitter.
    pub frame_jitter_seed: Option<u64>,
    /// First component of exported file names.
    pub export_prefix: String,
    /// Bounding box for on-screen previews, `[width, height]`.
    pub preview_box: [u32; 2],
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` fonts.
    pub font_dirs: Vec<PathBuf>,
    /// Largest accepted output dimension.
    pub max_resolution: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            watermark: "Made with photogrid".to_string(),
            watermark_color: Rgba8::new(255, 255, 255, 200),
            accent: Rgba8::opaque(59, 130, 246),
            background_start: Rgba8::opaque(238, 242, 255),
            background_end: Rgba8::opaque(253, 242, 248),
            frame_color: Rgba8::opaque(255, 255, 255),
            shadow_color: Rgba8::new(0, 0, 0, 64),
            placeholder_fill: Rgba8::new(255, 255, 255, 102),
            placeholder_border: Rgba8::new(148, 163, 184, 255),
            placeholder_text: Rgba8::new(100, 116, 139, 255),
            frame_jitter_seed: Some(0x5EED),
            export_prefix: "collage".to_string(),
            preview_box: [800, 800],
            font_dirs: Vec::new(),
            max_resolution: 8192,
        }
    }
}

impl EditorConfig {
    /// Load a JSON config; missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> GridResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| GridError::serde(format!("config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `PHOTOGRID_*` environment overrides.
    pub fn with_env_overrides(self) -> GridResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup (the environment, in production).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> GridResult<Self> {
        if let Some(v) = lookup("PHOTOGRID_WATERMARK") {
            self.watermark = v;
        }
        if let Some(v) = lookup("PHOTOGRID_EXPORT_PREFIX") {
            self.export_prefix = v;
        }
        if let Some(v) = lookup("PHOTOGRID_JITTER_SEED") {
            self.frame_jitter_seed = match v.trim() {
                "off" | "none" | "" => None,
                s => Some(s.parse::<u64>().map_err(|_| {
                    GridError::configuration(format!("PHOTOGRID_JITTER_SEED '{s}' is not a u64"))
                })?),
            };
        }
        if let Some(v) = lookup("PHOTOGRID_MAX_RESOLUTION") {
            self.max_resolution = v.trim().parse::<u32>().map_err(|_| {
                GridError::configuration(format!("PHOTOGRID_MAX_RESOLUTION '{v}' is not a u32"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> GridResult<()> {
        if self.export_prefix.trim().is_empty() {
            return Err(GridError::configuration("export_prefix must be non-empty"));
        }
        if self.max_resolution == 0 || self.max_resolution > RESOLUTION_CEILING {
            return Err(GridError::configuration(format!(
                "max_resolution must be in 1..={RESOLUTION_CEILING} (got {})",
                self.max_resolution
            )));
        }
        if self.preview_box.contains(&0) {
            return Err(GridError::configuration("preview_box dimensions must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
