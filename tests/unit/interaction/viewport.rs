use super::*;

const SIZE: OutputSize = OutputSize {
    width: 1000,
    height: 500,
};

#[test]
fn scaled_viewport_maps_back_to_canvas() {
    let vp = Viewport {
        left: 20.0,
        top: 10.0,
        displayed_width: 500.0,
        displayed_height: 250.0,
    };
    assert_eq!(vp.scale_factors(SIZE), (0.5, 0.5));
    assert_eq!(
        vp.screen_to_canvas(Point::new(270.0, 135.0), SIZE),
        Some(Point::new(500.0, 250.0))
    );
}

#[test]
fn points_outside_the_canvas_do_not_map() {
    let vp = Viewport::native(SIZE);
    assert!(vp.screen_to_canvas(Point::new(-1.0, 10.0), SIZE).is_none());
    assert!(vp.screen_to_canvas(Point::new(10.0, 501.0), SIZE).is_none());
    let collapsed = Viewport {
        displayed_width: 0.0,
        ..vp
    };
    assert!(collapsed.screen_to_canvas(Point::new(0.0, 0.0), SIZE).is_none());
}

#[test]
fn tracker_ignores_updates_while_unsubscribed() {
    let mut tracker = ViewportTracker::default();
    tracker.on_resize(Viewport::native(SIZE));
    assert!(tracker.current().is_none());

    tracker.subscribe(Viewport::native(SIZE));
    let moved = Viewport {
        top: 300.0,
        ..Viewport::native(SIZE)
    };
    tracker.on_scroll(moved);
    assert_eq!(tracker.current(), Some(moved));

    tracker.unsubscribe();
    tracker.on_resize(Viewport::native(SIZE));
    assert!(tracker.current().is_none());
    assert!(!tracker.is_subscribed());
}
