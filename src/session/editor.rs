use crate::{
    assets::source::ImageSource,
    config::EditorConfig,
    effects::filter::FilterId,
    foundation::error::{GridError, GridResult},
    interaction::controller::{HitTarget, InteractionController, PointerEvent},
    interaction::transform::ImageTransform,
    interaction::viewport::Viewport,
    layout::catalog::{CountRecommender, LayoutRecommender},
    layout::geometry::compute_cell_rects,
    layout::model::{Layout, OutputSpec},
    presets::store::PresetSnapshot,
    render::compositor::{Compositor, RenderReport, RenderRequest, checked_output_size},
    render::export::export_file_name,
    render::frame::FrameRGBA,
};

/// Editor state for one collage: images, layout, output, filter and interaction.
///
/// Mutators only mark the session dirty; [`EditorSession::end_event`] performs the single redraw
/// owed for everything that changed during the event.
pub struct EditorSession {
    images: Vec<ImageSource>,
    layout: Layout,
    output: OutputSpec,
    filter: FilterId,
    controller: InteractionController,
    compositor: Compositor,
    recommender: Box<dyn LayoutRecommender>,
    dirty: bool,
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("images", &self.images.len())
            .field("layout", &self.layout.id)
            .field("output", &self.output)
            .field("filter", &self.filter)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_parts(Compositor::new(config), Box::new(CountRecommender::default()))
    }

    pub fn with_parts(compositor: Compositor, recommender: Box<dyn LayoutRecommender>) -> Self {
        let layout = recommender.recommend(0);
        Self {
            images: Vec::new(),
            layout,
            output: OutputSpec::default(),
            filter: FilterId::None,
            controller: InteractionController::new(0),
            compositor,
            recommender,
            dirty: true,
        }
    }

    pub fn images(&self) -> &[ImageSource] {
        &self.images
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn output(&self) -> OutputSpec {
        self.output
    }

    pub fn filter(&self) -> FilterId {
        self.filter
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Latest committed frame.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.compositor.output()
    }

    /// Latest committed frame scaled to fit the configured preview box.
    pub fn preview(&self) -> GridResult<Option<FrameRGBA>> {
        self.frame()
            .map(|frame| frame.preview(self.compositor.config().preview_box))
            .transpose()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Empty slots left in the current layout.
    pub fn slots_remaining(&self) -> usize {
        self.layout.slots_remaining(self.images.len())
    }

    fn mark(&mut self, changed: bool) -> bool {
        self.dirty |= changed;
        changed
    }

    fn images_changed(&mut self) {
        self.controller.sync_image_count(self.images.len());
        self.dirty = true;
    }

    pub fn append_images(&mut self, sources: impl IntoIterator<Item = ImageSource>) {
        let before = self.images.len();
        self.images.extend(sources);
        if self.images.len() != before {
            self.images_changed();
        }
    }

    /// Replace the whole sequence; optionally let the recommender pick a fitting layout.
    pub fn replace_images(&mut self, sources: Vec<ImageSource>, recommend_layout: bool) {
        self.images = sources;
        if recommend_layout {
            self.layout = self.recommender.recommend(self.images.len());
        }
        self.images_changed();
    }

    pub fn truncate_images(&mut self, len: usize) {
        if len < self.images.len() {
            self.images.truncate(len);
            self.images_changed();
        }
    }

    pub fn set_layout(&mut self, layout: Layout) -> GridResult<()> {
        layout.validate()?;
        if layout != self.layout {
            self.layout = layout;
            self.dirty = true;
        }
        Ok(())
    }

    pub fn set_output(&mut self, output: OutputSpec) -> GridResult<()> {
        checked_output_size(&output, self.compositor.config())?;
        if output != self.output {
            self.output = output;
            self.dirty = true;
        }
        Ok(())
    }

    pub fn set_filter(&mut self, filter: FilterId) {
        if filter != self.filter {
            self.filter = filter;
            self.dirty = true;
        }
    }

    /// Current layout, aspect ratio, resolution and filter.
    pub fn snapshot(&self) -> PresetSnapshot {
        PresetSnapshot {
            layout: self.layout.clone(),
            aspect_ratio: self.output.aspect,
            resolution: self.output.resolution,
            filter: self.filter,
        }
    }

    /// Apply all four preset fields or none of them.
    pub fn apply_preset(&mut self, snapshot: &PresetSnapshot) -> GridResult<()> {
        snapshot.layout.validate()?;
        let output = snapshot.output();
        checked_output_size(&output, self.compositor.config())?;

        self.layout = snapshot.layout.clone();
        self.output = output;
        self.filter = snapshot.filter;
        self.dirty = true;
        Ok(())
    }

    pub fn begin_thumbnail_drag(&mut self, source: usize) -> bool {
        self.controller.begin_thumbnail_drag(source)
    }

    pub fn drop_thumbnail(&mut self, target: usize) -> bool {
        let moved = self.controller.drop_thumbnail(&mut self.images, target);
        self.mark(moved)
    }

    pub fn end_thumbnail_drag(&mut self) {
        self.controller.end_thumbnail_drag();
    }

    pub fn select(&mut self, index: Option<usize>) -> bool {
        let changed = self.controller.select(index);
        self.mark(changed)
    }

    /// Route a pointer or touch event against the current cell geometry.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> GridResult<bool> {
        let size = checked_output_size(&self.output, self.compositor.config())?;
        let cells = compute_cell_rects(size, self.layout.rows, self.layout.cols, self.layout.style);
        let unavailable = self
            .compositor
            .last_report()
            .map(|r| r.failed_slots.as_slice())
            .unwrap_or_default();
        let target = HitTarget {
            cells: &cells,
            size,
            unavailable,
        };
        let changed = self.controller.handle_pointer(event, &target);
        Ok(self.mark(changed))
    }

    pub fn set_transform(&mut self, index: usize, t: ImageTransform) -> bool {
        let changed = self.controller.set_transform(index, t);
        self.mark(changed)
    }

    pub fn set_selected_x(&mut self, x: f64) -> bool {
        let changed = self.controller.set_selected_x(x);
        self.mark(changed)
    }

    pub fn set_selected_y(&mut self, y: f64) -> bool {
        let changed = self.controller.set_selected_y(y);
        self.mark(changed)
    }

    pub fn set_selected_scale(&mut self, scale: f64) -> bool {
        let changed = self.controller.set_selected_scale(scale);
        self.mark(changed)
    }

    pub fn reset_selected(&mut self) -> bool {
        let changed = self.controller.reset_selected();
        self.mark(changed)
    }

    /// Start tracking where the canvas is displayed. Viewport changes never redraw.
    pub fn subscribe_viewport(&mut self, viewport: Viewport) {
        self.controller.viewport_mut().subscribe(viewport);
    }

    pub fn unsubscribe_viewport(&mut self) {
        self.controller.viewport_mut().unsubscribe();
    }

    pub fn on_viewport_resize(&mut self, viewport: Viewport) {
        self.controller.viewport_mut().on_resize(viewport);
    }

    pub fn on_viewport_scroll(&mut self, viewport: Viewport) {
        self.controller.viewport_mut().on_scroll(viewport);
    }

    /// The request a redraw would render right now.
    pub fn request(&self) -> RenderRequest {
        RenderRequest {
            images: self.images.clone(),
            layout: self.layout.clone(),
            output: self.output,
            filter: self.filter,
            transforms: self.controller.transforms().as_slice().to_vec(),
            selected: self.controller.selected(),
        }
    }

    /// Close the current event: redraw once if anything changed.
    pub fn end_event(&mut self) -> GridResult<Option<RenderReport>> {
        if !self.dirty {
            return Ok(None);
        }
        let report = self.compositor.render(self.request())?;
        self.dirty = false;
        tracing::debug!(generation = report.generation, "session redrawn");
        Ok(Some(report))
    }

    /// Exporting needs at least one image.
    pub fn can_export(&self) -> bool {
        !self.images.is_empty()
    }

    /// Full-resolution PNG of the current state.
    pub fn export_png(&mut self) -> GridResult<Vec<u8>> {
        if !self.can_export() {
            return Err(GridError::validation("nothing to export: add at least one image"));
        }
        self.end_event()?;
        let frame = self
            .compositor
            .output()
            .ok_or_else(|| GridError::render("no frame has been rendered"))?;
        frame.to_png()
    }

    pub fn export_file_name(&self, date: chrono::NaiveDate) -> String {
        export_file_name(
            &self.compositor.config().export_prefix,
            &self.layout.name,
            self.output.aspect,
            date,
            self.filter,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
