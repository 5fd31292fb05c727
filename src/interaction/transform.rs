/// Largest pan offset in either axis, in output-canvas pixels.
pub const PAN_LIMIT: f64 = 100.0;
/// Smallest zoom factor on top of cover-fit.
pub const SCALE_MIN: f64 = 0.5;
/// Largest zoom factor on top of cover-fit.
pub const SCALE_MAX: f64 = 2.0;

/// Per-image pan and zoom applied on top of cover-fit scaling.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageTransform {
    /// Horizontal nudge, clamped to `[-PAN_LIMIT, PAN_LIMIT]`.
    pub x: f64,
    /// Vertical nudge, clamped to `[-PAN_LIMIT, PAN_LIMIT]`.
    pub y: f64,
    /// Zoom factor, clamped to `[SCALE_MIN, SCALE_MAX]`.
    pub scale: f64,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl ImageTransform {
    /// Build a transform with every component clamped into range.
    pub fn clamped(x: f64, y: f64, scale: f64) -> Self {
        Self {
            x: clamp_pan(x),
            y: clamp_pan(y),
            scale: clamp_scale(scale),
        }
    }

    /// Re-clamp an arbitrary value, e.g. one read from a preset file.
    pub fn normalized(self) -> Self {
        Self::clamped(self.x, self.y, self.scale)
    }
}

/// Clamp a pan offset; NaN collapses to 0.
pub fn clamp_pan(v: f64) -> f64 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(-PAN_LIMIT, PAN_LIMIT)
}

/// Clamp a zoom factor; NaN collapses to 1.
pub fn clamp_scale(v: f64) -> f64 {
    if v.is_nan() {
        return 1.0;
    }
    v.clamp(SCALE_MIN, SCALE_MAX)
}

/// Transforms indexed by image position.
///
/// Entry `i` always describes the image currently at position `i`; reconciliation keeps
/// existing entries, appends defaults on growth and truncates on shrinkage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformTable {
    entries: Vec<ImageTransform>,
}

impl TransformTable {
    /// Table with `len` default entries.
    pub fn with_len(len: usize) -> Self {
        Self {
            entries: vec![ImageTransform::default(); len],
        }
    }

    /// Grow or shrink to `len` without touching surviving entries.
    pub fn reconcile(&mut self, len: usize) {
        self.entries.resize(len, ImageTransform::default());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<ImageTransform> {
        self.entries.get(index).copied()
    }

    pub fn as_slice(&self) -> &[ImageTransform] {
        &self.entries
    }

    /// Store a clamped copy of `t`; returns whether the entry changed.
    pub fn set(&mut self, index: usize, t: ImageTransform) -> bool {
        let Some(slot) = self.entries.get_mut(index) else {
            return false;
        };
        let t = t.normalized();
        if *slot == t {
            return false;
        }
        *slot = t;
        true
    }

    /// Restore the default transform at `index`.
    pub fn reset(&mut self, index: usize) -> bool {
        self.set(index, ImageTransform::default())
    }

    /// Move the entry at `from` to `to` with splice-and-insert semantics.
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.entries, from, to)
    }
}

/// Remove the item at `from` and insert it at `to` (indices after removal).
///
/// Returns `false` without touching `items` when `from` is out of bounds or equals `to`.
/// A `to` past the end appends.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || from == to {
        return false;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
    true
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/transform.rs"]
mod tests;
