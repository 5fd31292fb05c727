//! photogrid is a photo-collage composition engine.
//!
//! It maps an ordered list of images onto a rows×cols grid, draws each cell in one of four
//! visual styles with a color filter and a per-image pan/zoom, and rasterizes the result on the
//! CPU for preview or lossless PNG export.
//!
//! # Pipeline overview
//!
//! 1. **Geometry**: `OutputSpec -> OutputSize`, then `OutputSize + Layout -> cell rects`
//! 2. **Load**: decode up to `rows × cols` images in parallel, failures become empty slots
//! 3. **Draw**: background gradient, styled images or placeholders, selection outline, watermark
//! 4. **Commit**: only the newest render generation replaces the output frame
//!
//! Direct manipulation (reorder, drag-to-pan, slider edits) lives in
//! [`InteractionController`]; [`EditorSession`] ties it to the [`Compositor`] and redraws at
//! most once per input event.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod effects;
mod foundation;
mod interaction;
mod layout;
mod presets;
mod render;
mod session;

pub use assets::decode::{DecodedImage, decode_image, encode_png};
pub use assets::loader::{LoadedImages, load_images};
pub use assets::source::{ImageSource, decode_data_uri};
pub use config::{EditorConfig, RESOLUTION_CEILING};
pub use effects::blur::{MAX_BLUR_RADIUS, gaussian_blur_premul, radius_for_sigma};
pub use effects::filter::{
    BuiltinFilters, FilterCatalog, FilterChain, FilterId, FilterOp, apply_color_op, apply_filter,
};
pub use foundation::core::{OutputSize, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{GridError, GridResult};
pub use interaction::controller::{
    DRAG_SENSITIVITY, DragState, HitTarget, InteractionController, PointerEvent, PointerPhase,
    PointerSource,
};
pub use interaction::transform::{
    ImageTransform, PAN_LIMIT, SCALE_MAX, SCALE_MIN, TransformTable, clamp_pan, clamp_scale,
    move_item,
};
pub use interaction::viewport::{Viewport, ViewportTracker};
pub use layout::catalog::{CountRecommender, LayoutRecommender, find_template, templates};
pub use layout::geometry::{
    PADDING_FRACTION, cell_at, cell_gap, compute_cell_rects, compute_output_size, grid_padding,
};
pub use layout::model::{AspectRatio, Layout, LayoutStyle, MAX_GRID_SLOTS, OutputSpec};
pub use presets::store::{Preset, PresetSnapshot, PresetStore};
pub use render::compositor::{
    Compositor, LoadedPass, RenderPass, RenderReport, RenderRequest, checked_output_size,
    draw_collage,
};
pub use render::export::{export_file_name, write_png};
pub use render::frame::{FrameRGBA, preview_size};
pub use render::style::{
    CREATIVE_RADIUS_FRACTION, CoverPlacement, FRAME_MARGIN_FRACTION, GRID_CORNER_RADIUS,
    MASK_OVERLAY_ALPHA, SELECTION_STROKE_WIDTH, StyledImage, corner_radius, cover_placement,
    draw_placeholder, draw_selection_outline, draw_styled_image, frame_inset, outline_radius,
    placeholder_label,
};
pub use render::text::{MAX_TEXT_EXTENT, TextAnchor, TextBitmap, TextRasterizer};
pub use session::editor::EditorSession;
