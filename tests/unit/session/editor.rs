use std::sync::Arc;

use super::*;
use crate::{
    effects::filter::BuiltinFilters,
    interaction::controller::PointerPhase,
    layout::model::{AspectRatio, LayoutStyle},
    render::text::TextRasterizer,
};

fn png(rgba: [u8; 4]) -> ImageSource {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    ImageSource::Bytes(Arc::new(buf))
}

fn session() -> EditorSession {
    let compositor = Compositor::with_parts(
        EditorConfig::default(),
        Box::new(BuiltinFilters),
        TextRasterizer::empty(),
    );
    let mut s = EditorSession::with_parts(compositor, Box::new(CountRecommender::default()));
    s.set_output(OutputSpec::new(AspectRatio::SQUARE, 100)).unwrap();
    s
}

#[test]
fn many_mutations_in_one_event_redraw_once() {
    let mut s = session();
    s.end_event().unwrap();
    let before = s.compositor().latest_generation();

    s.append_images([png([255, 0, 0, 255]), png([0, 255, 0, 255])]);
    s.set_filter(FilterId::Sepia);
    s.set_layout(Layout::grid(1, 2, LayoutStyle::Creative).unwrap())
        .unwrap();
    let report = s.end_event().unwrap().unwrap();
    assert_eq!(s.compositor().latest_generation(), before + 1);
    assert_eq!(report.drawn_slots, vec![0, 1]);

    assert!(s.end_event().unwrap().is_none());
}

#[test]
fn unchanged_setters_do_not_mark_dirty() {
    let mut s = session();
    s.end_event().unwrap();
    s.set_filter(FilterId::None);
    s.set_output(OutputSpec::new(AspectRatio::SQUARE, 100)).unwrap();
    assert!(!s.reset_selected());
    assert!(!s.is_dirty());
}

#[test]
fn replace_can_re_recommend_layout() {
    let mut s = session();
    s.replace_images(vec![png([0, 0, 0, 255]); 5], true);
    assert_eq!((s.layout().rows, s.layout().cols), (2, 3));
    assert_eq!(s.slots_remaining(), 1);

    s.replace_images(vec![png([0, 0, 0, 255]); 2], false);
    assert_eq!((s.layout().rows, s.layout().cols), (2, 3));
    assert_eq!(s.controller().transforms().len(), 2);
}

#[test]
fn truncate_drops_transforms_and_selection() {
    let mut s = session();
    s.append_images(vec![png([0, 0, 0, 255]); 3]);
    s.set_transform(2, ImageTransform::clamped(10.0, 0.0, 1.0));
    s.select(Some(2));
    s.truncate_images(2);
    assert_eq!(s.controller().transforms().len(), 2);
    assert_eq!(s.controller().selected(), None);
}

#[test]
fn reorder_moves_images_and_marks_dirty() {
    let mut s = session();
    s.append_images(["a.png", "b.png", "c.png"].map(ImageSource::parse));

    assert!(s.begin_thumbnail_drag(0));
    assert!(s.drop_thumbnail(2));
    assert!(s.is_dirty());
    let labels: Vec<String> = s.images().iter().map(ImageSource::label).collect();
    assert_eq!(labels, vec!["b.png", "c.png", "a.png"]);
}

#[test]
fn pointer_drag_nudges_selected_image() {
    let mut s = session();
    s.append_images([png([0, 0, 0, 255])]);
    s.end_event().unwrap();

    assert!(s.handle_pointer(&PointerEvent::new(PointerPhase::Down, 50.0, 50.0)).unwrap());
    assert!(s.handle_pointer(&PointerEvent::touch(PointerPhase::Move, 70.0, 40.0)).unwrap());
    s.handle_pointer(&PointerEvent::new(PointerPhase::Up, 70.0, 40.0)).unwrap();

    let t = s.controller().transforms().get(0).unwrap();
    assert_eq!((t.x, t.y, t.scale), (10.0, -5.0, 1.0));
    assert_eq!(s.request().selected, Some(0));
}

#[test]
fn viewport_changes_do_not_redraw() {
    let mut s = session();
    s.end_event().unwrap();
    s.subscribe_viewport(Viewport {
        left: 0.0,
        top: 0.0,
        displayed_width: 50.0,
        displayed_height: 50.0,
    });
    s.on_viewport_scroll(Viewport {
        left: 0.0,
        top: -20.0,
        displayed_width: 50.0,
        displayed_height: 50.0,
    });
    assert!(!s.is_dirty());
}

#[test]
fn preset_applies_atomically() {
    let mut s = session();
    s.end_event().unwrap();
    let good = PresetSnapshot {
        layout: Layout::grid(3, 3, LayoutStyle::Masked).unwrap(),
        aspect_ratio: "3:2".parse().unwrap(),
        resolution: 300,
        filter: FilterId::Noir,
    };
    s.apply_preset(&good).unwrap();
    assert_eq!(s.snapshot(), good);

    let mut bad = good.clone();
    bad.layout = Layout::grid(1, 1, LayoutStyle::Grid).unwrap();
    bad.resolution = 1_000_000;
    assert!(s.apply_preset(&bad).is_err());
    assert_eq!(s.snapshot(), good);
}

#[test]
fn export_requires_images() {
    let mut s = session();
    assert!(!s.can_export());
    assert!(matches!(s.export_png().unwrap_err(), GridError::Validation(_)));

    s.append_images([png([9, 9, 9, 255])]);
    let bytes = s.export_png().unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (100, 100));
    assert!(!s.is_dirty());
}

#[test]
fn export_name_uses_session_state() {
    let mut s = session();
    s.set_layout(Layout::grid(2, 2, LayoutStyle::Grid).unwrap()).unwrap();
    s.set_filter(FilterId::Cool);
    let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    assert_eq!(s.export_file_name(date), "collage-2x2-1x1-2025-01-02-cool.png");
}

#[test]
fn preview_fits_the_configured_box() {
    let config = EditorConfig {
        preview_box: [40, 30],
        ..EditorConfig::default()
    };
    let compositor =
        Compositor::with_parts(config, Box::new(BuiltinFilters), TextRasterizer::empty());
    let mut s = EditorSession::with_parts(compositor, Box::new(CountRecommender::default()));
    s.set_output(OutputSpec::new(AspectRatio::new(2, 1).unwrap(), 200))
        .unwrap();
    assert!(s.preview().unwrap().is_none());

    s.append_images([png([0, 0, 255, 255])]);
    s.end_event().unwrap();
    let frame = s.frame().unwrap();
    assert_eq!((frame.width, frame.height), (200, 100));
    let preview = s.preview().unwrap().unwrap();
    assert_eq!((preview.width, preview.height), (40, 20));
    assert!(!preview.premultiplied);
}

#[test]
fn pointer_over_a_failed_image_selects_nothing() {
    let mut s = session();
    s.set_layout(Layout::grid(1, 2, LayoutStyle::Grid).unwrap())
        .unwrap();
    s.append_images([
        png([0, 0, 0, 255]),
        ImageSource::Bytes(Arc::new(b"not an image".to_vec())),
    ]);
    let report = s.end_event().unwrap().unwrap();
    assert_eq!(report.failed_slots, vec![1]);

    assert!(!s.handle_pointer(&PointerEvent::new(PointerPhase::Down, 75.0, 50.0)).unwrap());
    assert_eq!(s.request().selected, None);
    assert!(s.handle_pointer(&PointerEvent::new(PointerPhase::Down, 25.0, 50.0)).unwrap());
    assert_eq!(s.request().selected, Some(0));
}
