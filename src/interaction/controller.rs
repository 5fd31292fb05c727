use crate::{
    foundation::core::{OutputSize, Point, Rect},
    interaction::transform::{ImageTransform, TransformTable, clamp_pan, move_item},
    interaction::viewport::{Viewport, ViewportTracker},
    layout::geometry::cell_at,
};

/// Canvas pan per screen pixel dragged.
pub const DRAG_SENSITIVITY: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Leave,
    Cancel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

/// A pointer or primary-touch event in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    #[serde(default)]
    pub source: PointerSource,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            source: PointerSource::Mouse,
            x,
            y,
        }
    }

    pub fn touch(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            source: PointerSource::Touch,
            ..Self::new(phase, x, y)
        }
    }

    fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// The single active gesture, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// A thumbnail in the reorder list is being dragged.
    DraggingThumbnail { source: usize },
    /// A photo on the canvas is being nudged.
    DraggingOnCanvas {
        target: usize,
        start: Point,
        origin: ImageTransform,
    },
}

/// Geometry of the current render, used to resolve which image a gesture targets.
#[derive(Clone, Copy, Debug)]
pub struct HitTarget<'a> {
    /// Cell rectangles in canvas space, row-major.
    pub cells: &'a [Rect],
    /// Logical canvas size.
    pub size: OutputSize,
    /// Slots shown as placeholders even though an image is assigned (failed decodes).
    pub unavailable: &'a [usize],
}

/// Owns per-image transforms, the selection and the drag state machine.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    transforms: TransformTable,
    drag: DragState,
    selected: Option<usize>,
    viewport: ViewportTracker,
}

impl InteractionController {
    pub fn new(image_count: usize) -> Self {
        Self {
            transforms: TransformTable::with_len(image_count),
            ..Self::default()
        }
    }

    pub fn state(&self) -> DragState {
        self.drag
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn transforms(&self) -> &TransformTable {
        &self.transforms
    }

    pub fn image_count(&self) -> usize {
        self.transforms.len()
    }

    pub fn viewport(&self) -> &ViewportTracker {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportTracker {
        &mut self.viewport
    }

    /// Reconcile state after the image sequence changed length.
    ///
    /// Transforms are kept by index; a selection or gesture pointing past the end is dropped.
    pub fn sync_image_count(&mut self, len: usize) {
        self.transforms.reconcile(len);
        if self.selected.is_some_and(|i| i >= len) {
            self.selected = None;
        }
        let stale = match self.drag {
            DragState::Idle => false,
            DragState::DraggingThumbnail { source } => source >= len,
            DragState::DraggingOnCanvas { target, .. } => target >= len,
        };
        if stale {
            self.drag = DragState::Idle;
        }
    }

    /// Change the selection; out-of-range indices clear it. Returns whether it changed.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        let index = index.filter(|&i| i < self.image_count());
        let changed = self.selected != index;
        self.selected = index;
        changed
    }

    /// Resolve a screen point to the index of the image under it.
    pub fn hit_test(&self, screen: Point, target: &HitTarget<'_>) -> Option<usize> {
        let viewport = self
            .viewport
            .current()
            .unwrap_or_else(|| Viewport::native(target.size));
        let p = viewport.screen_to_canvas(screen, target.size)?;
        cell_at(target.cells, p)
            .filter(|&k| k < self.image_count() && !target.unavailable.contains(&k))
    }

    pub fn begin_thumbnail_drag(&mut self, source: usize) -> bool {
        if self.drag != DragState::Idle || source >= self.image_count() {
            return false;
        }
        self.drag = DragState::DraggingThumbnail { source };
        true
    }

    /// Finish a thumbnail drag over position `target`, reordering `items` and the transforms.
    ///
    /// Returns whether anything moved. The source index is revalidated against `items`, so a
    /// list that shrank during the drag skips the reorder.
    pub fn drop_thumbnail<T>(&mut self, items: &mut Vec<T>, target: usize) -> bool {
        let DragState::DraggingThumbnail { source } = self.drag else {
            return false;
        };
        self.drag = DragState::Idle;

        if source >= items.len() || source == target {
            return false;
        }
        let mut order: Vec<usize> = (0..items.len()).collect();
        move_item(&mut order, source, target);
        move_item(items, source, target);
        self.transforms.reconcile(items.len());
        self.transforms.move_entry(source, target);
        self.selected = self
            .selected
            .and_then(|old| order.iter().position(|&i| i == old));
        true
    }

    /// Abandon a thumbnail drag without dropping.
    pub fn end_thumbnail_drag(&mut self) {
        if matches!(self.drag, DragState::DraggingThumbnail { .. }) {
            self.drag = DragState::Idle;
        }
    }

    /// Start nudging the image under `screen`. Ignored while another gesture is active.
    pub fn pointer_down(&mut self, screen: Point, target: &HitTarget<'_>) -> bool {
        if self.drag != DragState::Idle {
            return false;
        }
        let Some(k) = self.hit_test(screen, target) else {
            return false;
        };
        let origin = self.transforms.get(k).unwrap_or_default();
        self.selected = Some(k);
        self.drag = DragState::DraggingOnCanvas {
            target: k,
            start: screen,
            origin,
        };
        true
    }

    /// Update the dragged image's pan from the total pointer travel. Returns whether it changed.
    pub fn pointer_move(&mut self, screen: Point) -> bool {
        let DragState::DraggingOnCanvas {
            target,
            start,
            origin,
        } = self.drag
        else {
            return false;
        };
        let next = ImageTransform {
            x: clamp_pan(origin.x + (screen.x - start.x) * DRAG_SENSITIVITY),
            y: clamp_pan(origin.y + (screen.y - start.y) * DRAG_SENSITIVITY),
            scale: self.transforms.get(target).map_or(origin.scale, |t| t.scale),
        };
        self.transforms.set(target, next)
    }

    /// End any canvas gesture (pointer up, leave or cancel).
    pub fn pointer_up(&mut self) -> bool {
        if matches!(self.drag, DragState::DraggingOnCanvas { .. }) {
            self.drag = DragState::Idle;
            return true;
        }
        false
    }

    /// Route a pointer or touch event. Returns whether visible state changed.
    pub fn handle_pointer(&mut self, event: &PointerEvent, target: &HitTarget<'_>) -> bool {
        match event.phase {
            PointerPhase::Down => self.pointer_down(event.point(), target),
            PointerPhase::Move => self.pointer_move(event.point()),
            PointerPhase::Up | PointerPhase::Leave | PointerPhase::Cancel => {
                self.pointer_up();
                false
            }
        }
    }

    /// Write a transform directly, bypassing the gesture state machine.
    pub fn set_transform(&mut self, index: usize, t: ImageTransform) -> bool {
        self.transforms.set(index, t)
    }

    /// Slider edit of the selected image's horizontal pan.
    pub fn set_selected_x(&mut self, x: f64) -> bool {
        self.edit_selected(|t| t.x = x)
    }

    /// Slider edit of the selected image's vertical pan.
    pub fn set_selected_y(&mut self, y: f64) -> bool {
        self.edit_selected(|t| t.y = y)
    }

    /// Slider edit of the selected image's zoom.
    pub fn set_selected_scale(&mut self, scale: f64) -> bool {
        self.edit_selected(|t| t.scale = scale)
    }

    /// Restore the selected image's transform to the default.
    pub fn reset_selected(&mut self) -> bool {
        match self.selected {
            Some(i) => self.transforms.reset(i),
            None => false,
        }
    }

    fn edit_selected(&mut self, edit: impl FnOnce(&mut ImageTransform)) -> bool {
        let Some(i) = self.selected else {
            return false;
        };
        let Some(mut t) = self.transforms.get(i) else {
            return false;
        };
        edit(&mut t);
        self.transforms.set(i, t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/controller.rs"]
mod tests;
