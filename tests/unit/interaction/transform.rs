use super::*;

#[test]
fn clamping_bounds_every_component() {
    for v in [-1e9, -100.5, -3.0, 0.0, 42.0, 100.0, 250.0, f64::INFINITY, f64::NEG_INFINITY] {
        let t = ImageTransform::clamped(v, v, v);
        assert!((-PAN_LIMIT..=PAN_LIMIT).contains(&t.x));
        assert!((-PAN_LIMIT..=PAN_LIMIT).contains(&t.y));
        assert!((SCALE_MIN..=SCALE_MAX).contains(&t.scale));
    }
    assert_eq!(ImageTransform::clamped(f64::NAN, 5.0, f64::NAN), ImageTransform {
        x: 0.0,
        y: 5.0,
        scale: 1.0
    });
}

#[test]
fn scale_three_clamps_to_two() {
    let mut table = TransformTable::with_len(1);
    table.set(0, ImageTransform {
        scale: 3.0,
        ..ImageTransform::default()
    });
    assert_eq!(table.get(0).unwrap().scale, 2.0);
}

#[test]
fn reconcile_keeps_existing_entries() {
    let mut table = TransformTable::with_len(2);
    table.set(1, ImageTransform::clamped(10.0, -10.0, 1.5));
    table.reconcile(4);
    assert_eq!(table.len(), 4);
    assert_eq!(table.get(1).unwrap(), ImageTransform::clamped(10.0, -10.0, 1.5));
    assert_eq!(table.get(3).unwrap(), ImageTransform::default());
    table.reconcile(1);
    assert_eq!(table.len(), 1);
    assert!(table.get(1).is_none());
}

#[test]
fn reset_is_idempotent() {
    let mut table = TransformTable::with_len(1);
    table.set(0, ImageTransform::clamped(50.0, 20.0, 0.7));
    assert!(table.reset(0));
    let once = table.clone();
    assert!(!table.reset(0));
    assert_eq!(table, once);
    assert_eq!(table.get(0).unwrap(), ImageTransform::default());
}

#[test]
fn move_item_splices_then_inserts() {
    let mut v = vec!['A', 'B', 'C'];
    assert!(move_item(&mut v, 0, 2));
    assert_eq!(v, vec!['B', 'C', 'A']);

    let mut v = vec!['A', 'B', 'C', 'D'];
    assert!(move_item(&mut v, 3, 1));
    assert_eq!(v, vec!['A', 'D', 'B', 'C']);

    let mut v = vec!['A', 'B'];
    assert!(!move_item(&mut v, 1, 1));
    assert!(!move_item(&mut v, 5, 0));
    assert!(move_item(&mut v, 0, 99));
    assert_eq!(v, vec!['B', 'A']);
}

#[test]
fn move_item_is_a_permutation() {
    for len in 1..6usize {
        for from in 0..len {
            for to in 0..len {
                let mut v: Vec<usize> = (0..len).collect();
                move_item(&mut v, from, to);
                let mut sorted = v.clone();
                sorted.sort();
                assert_eq!(sorted, (0..len).collect::<Vec<_>>());
            }
        }
    }
}
