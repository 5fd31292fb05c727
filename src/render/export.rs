use std::path::Path;

use anyhow::Context;

use crate::{
    effects::filter::FilterId,
    foundation::error::GridResult,
    layout::model::AspectRatio,
    render::frame::FrameRGBA,
};

/// `{prefix}-{layout}-{W}x{H}-{YYYY-MM-DD}[-{filter}].png`
pub fn export_file_name(
    prefix: &str,
    layout_name: &str,
    aspect: AspectRatio,
    date: chrono::NaiveDate,
    filter: FilterId,
) -> String {
    let mut name = format!(
        "{}-{}-{}-{}",
        sanitize(prefix),
        sanitize(layout_name),
        aspect.file_token(),
        date.format("%Y-%m-%d")
    );
    if filter != FilterId::None {
        name.push('-');
        name.push_str(filter.as_str());
    }
    name.push_str(".png");
    name
}

fn sanitize(s: &str) -> String {
    s.replace(['/', '\\'], "-")
}

/// Encode `frame` as PNG and write it to `path`, creating parent directories.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn write_png(frame: &FrameRGBA, path: &Path) -> GridResult<()> {
    let bytes = frame.to_png()?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    std::fs::write(path, &bytes).with_context(|| format!("write png '{}'", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote png");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
