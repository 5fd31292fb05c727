use super::*;

#[test]
fn recommendation_fits_every_image() {
    let rec = CountRecommender::default();
    for n in 0..40usize {
        let layout = rec.recommend(n);
        assert!(layout.validate().is_ok());
        assert!(layout.slot_count() >= n.max(1), "n={n}");
    }
}

#[test]
fn small_counts_use_known_shapes() {
    assert_eq!(CountRecommender::shape_for(1), (1, 1));
    assert_eq!(CountRecommender::shape_for(2), (1, 2));
    assert_eq!(CountRecommender::shape_for(4), (2, 2));
    assert_eq!(CountRecommender::shape_for(6), (2, 3));
    assert_eq!(CountRecommender::shape_for(9), (3, 3));
    assert_eq!(CountRecommender::shape_for(10), (3, 4));
}

#[test]
fn recommender_style_is_applied() {
    let rec = CountRecommender {
        style: LayoutStyle::Framed,
    };
    let l = rec.recommend(4);
    assert_eq!(l.style, LayoutStyle::Framed);
    assert_eq!(l.id, "framed-2x2");
}

#[test]
fn templates_have_unique_ids_and_resolve() {
    let all = templates();
    let mut ids: Vec<_> = all.iter().map(|l| l.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), all.len());
    let found = find_template("Grid-2x2").unwrap();
    assert_eq!((found.rows, found.cols, found.style), (2, 2, LayoutStyle::Grid));
    assert!(find_template("grid-9x9").is_none());
}
