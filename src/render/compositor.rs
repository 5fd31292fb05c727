use crate::{
    assets::loader::{LoadedImages, load_images},
    assets::source::ImageSource,
    config::EditorConfig,
    effects::filter::{BuiltinFilters, FilterCatalog, FilterId},
    foundation::core::{OutputSize, Point, Vec2},
    foundation::error::{GridError, GridResult},
    foundation::math::jitter_unit,
    interaction::transform::ImageTransform,
    layout::geometry::{compute_cell_rects, grid_padding},
    layout::model::{Layout, LayoutStyle, OutputSpec},
    render::frame::FrameRGBA,
    render::paint::fill_diagonal_gradient,
    render::style::{StyledImage, draw_placeholder, draw_selection_outline, draw_styled_image},
    render::text::{TextAnchor, TextRasterizer, draw_text},
};

/// Inputs of one full redraw.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    pub images: Vec<ImageSource>,
    pub layout: Layout,
    pub output: OutputSpec,
    pub filter: FilterId,
    /// One entry per image index.
    pub transforms: Vec<ImageTransform>,
    pub selected: Option<usize>,
}

impl RenderRequest {
    /// Request with default transforms and no selection.
    pub fn new(images: Vec<ImageSource>, layout: Layout, output: OutputSpec) -> Self {
        let transforms = vec![ImageTransform::default(); images.len()];
        Self {
            images,
            layout,
            output,
            filter: FilterId::None,
            transforms,
            selected: None,
        }
    }

    pub fn with_filter(mut self, filter: FilterId) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_transforms(mut self, transforms: Vec<ImageTransform>) -> Self {
        self.transforms = transforms;
        self
    }

    pub fn with_selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }
}

/// What a committed draw contained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderReport {
    pub generation: u64,
    pub size: OutputSize,
    /// Slots that received an image, row-major.
    pub drawn_slots: Vec<usize>,
    /// Slots drawn as "Image {n}" placeholders.
    pub placeholder_slots: Vec<usize>,
    /// Slots whose image failed to load (also placeholders).
    pub failed_slots: Vec<usize>,
    pub watermark: bool,
}

/// A begun render, tagged with its generation. Loading may happen on any thread.
#[derive(Debug)]
pub struct RenderPass {
    generation: u64,
    request: RenderRequest,
}

impl RenderPass {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &RenderRequest {
        &self.request
    }

    /// Decode every image the layout can show and wait for all of them.
    pub fn load(self) -> LoadedPass {
        let images = load_images(&self.request.images, self.request.layout.slot_count());
        LoadedPass {
            generation: self.generation,
            request: self.request,
            images,
        }
    }
}

/// A render pass whose image loads have all finished.
#[derive(Debug)]
pub struct LoadedPass {
    generation: u64,
    request: RenderRequest,
    images: LoadedImages,
}

impl LoadedPass {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Owns the output frame and the generation counter that orders redraws.
pub struct Compositor {
    config: EditorConfig,
    filters: Box<dyn FilterCatalog>,
    text: TextRasterizer,
    latest_generation: u64,
    output: Option<FrameRGBA>,
    report: Option<RenderReport>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("latest_generation", &self.latest_generation)
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}

impl Compositor {
    /// Compositor with the stock filters and system fonts plus `config.font_dirs`.
    pub fn new(config: EditorConfig) -> Self {
        let text = TextRasterizer::new(&config.font_dirs);
        Self::with_parts(config, Box::new(BuiltinFilters), text)
    }

    pub fn with_parts(
        config: EditorConfig,
        filters: Box<dyn FilterCatalog>,
        text: TextRasterizer,
    ) -> Self {
        Self {
            config,
            filters,
            text,
            latest_generation: 0,
            output: None,
            report: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Generation of the most recently begun pass (0 before the first).
    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /// Latest committed frame.
    pub fn output(&self) -> Option<&FrameRGBA> {
        self.output.as_ref()
    }

    pub fn last_report(&self) -> Option<&RenderReport> {
        self.report.as_ref()
    }

    /// Start a pass; every earlier pass becomes stale.
    pub fn begin(&mut self, request: RenderRequest) -> RenderPass {
        self.latest_generation += 1;
        RenderPass {
            generation: self.latest_generation,
            request,
        }
    }

    /// Draw and commit a loaded pass. Stale passes are dropped and yield `Ok(None)`.
    #[tracing::instrument(skip(self, pass), fields(generation = pass.generation))]
    pub fn complete(&mut self, pass: LoadedPass) -> GridResult<Option<RenderReport>> {
        if pass.generation != self.latest_generation {
            tracing::debug!(
                latest = self.latest_generation,
                "discarding stale render pass"
            );
            return Ok(None);
        }

        let (frame, mut report) = draw_collage(
            &pass.request,
            &pass.images,
            self.filters.as_ref(),
            &self.config,
            &self.text,
        )?;
        report.generation = pass.generation;
        self.output = Some(frame);
        self.report = Some(report.clone());
        Ok(Some(report))
    }

    /// Begin, load and complete in one go.
    pub fn render(&mut self, request: RenderRequest) -> GridResult<RenderReport> {
        let pass = self.begin(request).load();
        self.complete(pass)?
            .ok_or_else(|| GridError::render("render pass superseded before completion"))
    }
}

/// Resolve and check the canvas size against the configured ceiling.
pub fn checked_output_size(output: &OutputSpec, cfg: &EditorConfig) -> GridResult<OutputSize> {
    let size = output.output_size()?;
    let limit = cfg.max_resolution.min(u32::from(u16::MAX));
    if size.width > limit || size.height > limit {
        return Err(GridError::configuration(format!(
            "output size {}x{} exceeds the maximum dimension {limit}",
            size.width, size.height
        )));
    }
    Ok(size)
}

/// Full redraw of a collage from already-loaded images. The returned report has generation 0.
#[tracing::instrument(skip_all, fields(layout = %request.layout.id, images = request.images.len()))]
pub fn draw_collage(
    request: &RenderRequest,
    images: &LoadedImages,
    filters: &dyn FilterCatalog,
    cfg: &EditorConfig,
    text: &TextRasterizer,
) -> GridResult<(FrameRGBA, RenderReport)> {
    let size = checked_output_size(&request.output, cfg)?;
    let (w16, h16) = (size.width as u16, size.height as u16);
    let mut ctx = vello_cpu::RenderContext::new(w16, h16);

    fill_diagonal_gradient(
        &mut ctx,
        size.rect(),
        cfg.background_start,
        cfg.background_end,
    )?;

    let layout = &request.layout;
    let cells = compute_cell_rects(size, layout.rows, layout.cols, layout.style);
    let padding = grid_padding(size);
    let chain = filters.resolve(request.filter);

    let mut report = RenderReport {
        generation: 0,
        size,
        drawn_slots: Vec::new(),
        placeholder_slots: Vec::new(),
        failed_slots: images.failed.clone(),
        watermark: false,
    };

    for (slot, rect) in cells.iter().copied().enumerate() {
        let image = images.get(slot);
        let transform = request.transforms.get(slot).copied();
        let (Some(image), Some(transform)) = (image, transform) else {
            draw_placeholder(&mut ctx, rect, slot, cfg, text)?;
            report.placeholder_slots.push(slot);
            continue;
        };

        let jitter = match (layout.style, cfg.frame_jitter_seed) {
            (LayoutStyle::Framed, Some(seed)) => {
                let (jx, jy) = jitter_unit(seed, slot);
                Vec2::new(jx, jy) * (padding * 0.5)
            }
            _ => Vec2::ZERO,
        };
        let item = StyledImage {
            rect,
            image,
            style: layout.style,
            filter: &chain,
            transform: transform.normalized(),
            jitter,
        };
        draw_styled_image(&mut ctx, &item, cfg)?;
        if request.selected == Some(slot) {
            draw_selection_outline(&mut ctx, rect, layout.style, cfg);
        }
        report.drawn_slots.push(slot);
    }

    if !report.drawn_slots.is_empty() && !cfg.watermark.trim().is_empty() {
        let font_size = (size.min_side() * 0.025).clamp(10.0, 64.0);
        if let Some(bmp) =
            text.rasterize(&cfg.watermark, font_size, cfg.watermark_color, TextAnchor::End)?
        {
            let pen = Point::new(
                f64::from(size.width) - padding,
                f64::from(size.height) - padding,
            );
            draw_text(&mut ctx, &bmp, pen)?;
        }
        report.watermark = true;
    }

    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    tracing::debug!(
        drawn = report.drawn_slots.len(),
        placeholders = report.placeholder_slots.len(),
        failed = report.failed_slots.len(),
        "collage drawn"
    );

    Ok((
        FrameRGBA {
            width: size.width,
            height: size.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        },
        report,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
