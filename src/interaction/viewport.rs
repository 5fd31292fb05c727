use crate::foundation::core::{OutputSize, Point};

/// On-screen placement of the displayed canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Screen x of the canvas' left edge.
    pub left: f64,
    /// Screen y of the canvas' top edge.
    pub top: f64,
    /// Displayed width in screen pixels.
    pub displayed_width: f64,
    /// Displayed height in screen pixels.
    pub displayed_height: f64,
}

impl Viewport {
    /// Canvas displayed at its native size with its origin at the screen origin.
    pub fn native(size: OutputSize) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            displayed_width: f64::from(size.width),
            displayed_height: f64::from(size.height),
        }
    }

    /// Displayed-to-logical ratio per axis (`displayed / logical`).
    pub fn scale_factors(&self, size: OutputSize) -> (f64, f64) {
        (
            self.displayed_width / f64::from(size.width),
            self.displayed_height / f64::from(size.height),
        )
    }

    /// Map a screen point into canvas space; `None` when it falls outside the canvas.
    pub fn screen_to_canvas(&self, screen: Point, size: OutputSize) -> Option<Point> {
        let (sx, sy) = self.scale_factors(size);
        if !(sx.is_finite() && sy.is_finite()) || sx <= 0.0 || sy <= 0.0 {
            return None;
        }
        let p = Point::new((screen.x - self.left) / sx, (screen.y - self.top) / sy);
        let inside = p.x >= 0.0
            && p.y >= 0.0
            && p.x <= f64::from(size.width)
            && p.y <= f64::from(size.height);
        inside.then_some(p)
    }
}

/// Keeps the current [`Viewport`] up to date while subscribed to layout changes.
///
/// Resize and scroll notifications only recompute hit-testing geometry; they never
/// trigger a redraw.
#[derive(Clone, Debug, Default)]
pub struct ViewportTracker {
    current: Option<Viewport>,
    subscribed: bool,
}

impl ViewportTracker {
    /// Start accepting geometry updates, seeded with the mount-time placement.
    pub fn subscribe(&mut self, initial: Viewport) {
        self.subscribed = true;
        self.current = Some(initial);
    }

    /// Stop accepting updates and forget the last placement.
    pub fn unsubscribe(&mut self) {
        self.subscribed = false;
        self.current = None;
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Window resize notification.
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.update(viewport);
    }

    /// Scroll notification.
    pub fn on_scroll(&mut self, viewport: Viewport) {
        self.update(viewport);
    }

    pub fn current(&self) -> Option<Viewport> {
        self.current
    }

    fn update(&mut self, viewport: Viewport) {
        if self.subscribed {
            self.current = Some(viewport);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/viewport.rs"]
mod tests;
