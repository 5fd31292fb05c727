use super::*;

fn date() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
}

#[test]
fn file_name_without_filter() {
    let aspect: AspectRatio = "16:9".parse().unwrap();
    assert_eq!(
        export_file_name("collage", "Classic Grid", aspect, date(), FilterId::None),
        "collage-Classic Grid-16x9-2024-03-09.png"
    );
}

#[test]
fn file_name_with_filter_suffix() {
    assert_eq!(
        export_file_name("collage", "2x2", AspectRatio::SQUARE, date(), FilterId::Vintage),
        "collage-2x2-1x1-2024-03-09-vintage.png"
    );
}

#[test]
fn path_separators_are_replaced() {
    let name = export_file_name("a/b", "x\\y", AspectRatio::SQUARE, date(), FilterId::None);
    assert_eq!(name, "a-b-x-y-1x1-2024-03-09.png");
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("photogrid_export_{}", std::process::id()));
    let path = dir.join("nested").join("out.png");
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: [0, 0, 0, 255].repeat(4),
        premultiplied: true,
    };
    write_png(&frame, &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
    let _ = std::fs::remove_dir_all(&dir);
}
