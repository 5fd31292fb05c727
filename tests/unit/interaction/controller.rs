use super::*;
use crate::layout::{geometry::compute_cell_rects, model::LayoutStyle};

const SIZE: OutputSize = OutputSize {
    width: 1000,
    height: 1000,
};

fn cells_2x2() -> Vec<Rect> {
    compute_cell_rects(SIZE, 2, 2, LayoutStyle::Grid)
}

#[test]
fn reorder_moves_images_and_transforms_together() {
    let mut images = vec!["A", "B", "C"];
    let mut ctl = InteractionController::new(3);
    ctl.set_transform(0, ImageTransform::clamped(10.0, 0.0, 1.0));
    ctl.set_transform(1, ImageTransform::clamped(20.0, 0.0, 1.0));
    ctl.set_transform(2, ImageTransform::clamped(30.0, 0.0, 1.0));
    ctl.select(Some(0));

    assert!(ctl.begin_thumbnail_drag(0));
    assert!(ctl.drop_thumbnail(&mut images, 2));
    assert_eq!(images, vec!["B", "C", "A"]);
    let xs: Vec<f64> = ctl.transforms().as_slice().iter().map(|t| t.x).collect();
    assert_eq!(xs, vec![20.0, 30.0, 10.0]);
    assert_eq!(ctl.selected(), Some(2));
    assert_eq!(ctl.state(), DragState::Idle);
}

#[test]
fn drop_on_self_or_without_drag_is_a_noop() {
    let mut images = vec![1, 2, 3];
    let mut ctl = InteractionController::new(3);
    assert!(!ctl.drop_thumbnail(&mut images, 1));

    assert!(ctl.begin_thumbnail_drag(1));
    assert!(!ctl.drop_thumbnail(&mut images, 1));
    assert_eq!(images, vec![1, 2, 3]);
    assert_eq!(ctl.state(), DragState::Idle);

    assert!(ctl.begin_thumbnail_drag(2));
    ctl.end_thumbnail_drag();
    assert_eq!(ctl.state(), DragState::Idle);
}

#[test]
fn stale_thumbnail_source_is_skipped() {
    let mut images = vec![1, 2, 3];
    let mut ctl = InteractionController::new(3);
    assert!(ctl.begin_thumbnail_drag(2));
    images.truncate(2);
    assert!(!ctl.drop_thumbnail(&mut images, 0));
    assert_eq!(images, vec![1, 2]);
}

#[test]
fn canvas_drag_pans_with_half_sensitivity_and_clamps() {
    let cells = cells_2x2();
    let target = HitTarget {
        cells: &cells,
        size: SIZE,
        unavailable: &[],
    };
    let mut ctl = InteractionController::new(4);
    let start = cells[3].center();

    assert!(ctl.pointer_down(start, &target));
    assert_eq!(ctl.selected(), Some(3));
    assert!(ctl.pointer_move(Point::new(start.x + 40.0, start.y - 20.0)));
    let t = ctl.transforms().get(3).unwrap();
    assert_eq!((t.x, t.y, t.scale), (20.0, -10.0, 1.0));

    ctl.pointer_move(Point::new(start.x + 1000.0, start.y + 1000.0));
    let t = ctl.transforms().get(3).unwrap();
    assert_eq!((t.x, t.y), (100.0, 100.0));

    assert!(ctl.pointer_up());
    assert_eq!(ctl.state(), DragState::Idle);
    assert!(!ctl.pointer_move(start));
}

#[test]
fn second_pointer_down_is_ignored_while_dragging() {
    let cells = cells_2x2();
    let target = HitTarget {
        cells: &cells,
        size: SIZE,
        unavailable: &[],
    };
    let mut ctl = InteractionController::new(4);
    assert!(ctl.handle_pointer(
        &PointerEvent::touch(PointerPhase::Down, cells[0].center().x, cells[0].center().y),
        &target
    ));
    assert!(!ctl.handle_pointer(
        &PointerEvent::touch(PointerPhase::Down, cells[1].center().x, cells[1].center().y),
        &target
    ));
    assert_eq!(ctl.selected(), Some(0));
    ctl.handle_pointer(&PointerEvent::touch(PointerPhase::Cancel, 0.0, 0.0), &target);
    assert_eq!(ctl.state(), DragState::Idle);
}

#[test]
fn hit_test_misses_empty_cells_gaps_and_outside() {
    let cells = cells_2x2();
    let target = HitTarget {
        cells: &cells,
        size: SIZE,
        unavailable: &[],
    };
    let ctl = InteractionController::new(2);
    assert_eq!(ctl.hit_test(cells[1].center(), &target), Some(1));
    assert_eq!(ctl.hit_test(cells[2].center(), &target), None);
    assert_eq!(ctl.hit_test(Point::new(500.0, 200.0), &target), None);
    assert_eq!(ctl.hit_test(Point::new(-5.0, 200.0), &target), None);
}

#[test]
fn hit_test_uses_displayed_scale() {
    let cells = cells_2x2();
    let target = HitTarget {
        cells: &cells,
        size: SIZE,
        unavailable: &[],
    };
    let mut ctl = InteractionController::new(4);
    ctl.viewport_mut().subscribe(Viewport {
        left: 100.0,
        top: 50.0,
        displayed_width: 500.0,
        displayed_height: 500.0,
    });
    for (i, cell) in cells.iter().enumerate() {
        let c = cell.center();
        let screen = Point::new(100.0 + c.x * 0.5, 50.0 + c.y * 0.5);
        assert_eq!(ctl.hit_test(screen, &target), Some(i));
    }
}

#[test]
fn slider_edits_target_selection_and_clamp() {
    let mut ctl = InteractionController::new(2);
    assert!(!ctl.set_selected_scale(1.5));
    ctl.select(Some(1));
    assert!(ctl.set_selected_scale(3.0));
    assert!(ctl.set_selected_x(-250.0));
    assert!(ctl.set_selected_y(12.5));
    assert_eq!(
        ctl.transforms().get(1).unwrap(),
        ImageTransform {
            x: -100.0,
            y: 12.5,
            scale: 2.0
        }
    );
    assert!(ctl.reset_selected());
    assert!(!ctl.reset_selected());
    assert_eq!(ctl.transforms().get(1).unwrap(), ImageTransform::default());
}

#[test]
fn shrinking_clears_out_of_range_selection() {
    let mut ctl = InteractionController::new(3);
    ctl.select(Some(2));
    ctl.sync_image_count(2);
    assert_eq!(ctl.selected(), None);
    assert_eq!(ctl.transforms().len(), 2);
    assert!(!ctl.select(Some(5)));
}

#[test]
fn hit_test_skips_slots_whose_image_failed() {
    let cells = cells_2x2();
    let failed = [1];
    let target = HitTarget {
        cells: &cells,
        size: SIZE,
        unavailable: &failed,
    };
    let mut ctl = InteractionController::new(3);
    assert_eq!(ctl.hit_test(cells[0].center(), &target), Some(0));
    assert_eq!(ctl.hit_test(cells[1].center(), &target), None);
    assert!(!ctl.pointer_down(cells[1].center(), &target));
    assert_eq!(ctl.selected(), None);
    assert_eq!(ctl.state(), DragState::Idle);
}
