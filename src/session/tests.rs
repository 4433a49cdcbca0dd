use super::*;
use crate::config::{StorageCompression, StorageConfig};
use crate::draw::{BLACK, BLUE, Ellipse, Line, Polygon, RED, Rectangle, Shape, Style, TRANSPARENT};
use crate::error::DrawError;
use crate::plugins::Trapezoid;
use crate::registry::ShapeRegistry;
use crate::util::{Point, Rect};
use std::fs;

fn drawing() -> Vec<Box<dyn Shape>> {
    vec![
        Box::new(Rectangle::new(
            Rect::new(10.0, 10.0, 50.0, 30.0),
            Style::new(RED, BLUE, 2.0).unwrap(),
        )),
        Box::new(Polygon::new(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 10.0)],
            Style::new(BLACK, TRANSPARENT, 1.0).unwrap(),
        )),
        Box::new(Line::new(
            Point::new(40.0, 5.0),
            Point::new(2.0, 7.5),
            Style::default(),
        )),
        Box::new(Ellipse::new(Rect::new(1.0, 1.0, 3.0, 2.0), Style::default())),
    ]
}

fn views(shapes: &[Box<dyn Shape>]) -> impl Iterator<Item = &dyn Shape> {
    shapes.iter().map(|s| s.as_ref())
}

fn assert_same(left: &[Box<dyn Shape>], right: &[Box<dyn Shape>]) {
    assert_eq!(left.len(), right.len());
    for (a, b) in left.iter().zip(right) {
        assert!(a.as_ref() == b.as_ref(), "{a:?} != {b:?}");
    }
}

#[test]
fn save_then_load_reproduces_drawing() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("drawing.json");
    let shapes = drawing();
    let options = StorageOptions::default();

    let saved = save_drawing(&path, views(&shapes), &options).unwrap();
    assert_eq!(saved.shapes, 4);
    assert!(!saved.compressed);

    let loaded = load_drawing(&path, &ShapeRegistry::with_builtins(), &options).unwrap();
    assert_eq!(loaded.skipped, 0);
    assert_eq!(loaded.truncated, 0);
    assert_same(&loaded.shapes, &shapes);
}

#[test]
fn saved_file_uses_record_field_names() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("drawing.json");
    save_drawing(&path, views(&drawing()), &StorageOptions::default()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    for field in [
        "\"TypeName\"",
        "\"StrokeColor\"",
        "\"FillColor\"",
        "\"StrokeThickness\"",
        "\"BoundsX\"",
        "\"BoundsHeight\"",
        "\"Points\"",
    ] {
        assert!(text.contains(field), "missing {field}");
    }
    assert!(text.contains("\"#FFFF0000\""));
}

#[test]
fn compressed_files_round_trip() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("drawing.json");
    let options = StorageOptions {
        compression: CompressionMode::On,
        ..StorageOptions::default()
    };
    let shapes = drawing();

    let saved = save_drawing(&path, views(&shapes), &options).unwrap();
    assert!(saved.compressed);
    let raw = fs::read(&path).unwrap();
    assert_eq!(&raw[..2], &[0x1f, 0x8b]);

    let loaded = load_drawing(&path, &ShapeRegistry::with_builtins(), &options).unwrap();
    assert!(loaded.compressed);
    assert_same(&loaded.shapes, &shapes);
}

#[test]
fn auto_compression_respects_threshold() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("drawing.json");
    let mut options = StorageOptions {
        compression: CompressionMode::Auto,
        auto_compress_threshold_bytes: 1,
        ..StorageOptions::default()
    };
    assert!(save_drawing(&path, views(&drawing()), &options).unwrap().compressed);

    options.auto_compress_threshold_bytes = u64::MAX;
    assert!(!save_drawing(&path, views(&drawing()), &options).unwrap().compressed);
}

#[test]
fn second_save_rotates_backup() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("drawing.json");
    let options = StorageOptions::default();
    let shapes = drawing();

    save_drawing(&path, views(&shapes[..1]), &options).unwrap();
    save_drawing(&path, views(&shapes), &options).unwrap();

    let backup = StorageOptions::backup_file_path(&path);
    assert_eq!(backup.file_name().unwrap(), "drawing.json.bak");
    let registry = ShapeRegistry::with_builtins();
    let previous = load_drawing(&backup, &registry, &options).unwrap();
    assert_eq!(previous.shapes.len(), 1);
    assert_eq!(load_drawing(&path, &registry, &options).unwrap().shapes.len(), 4);
}

#[test]
fn no_backup_when_disabled() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("drawing.json");
    let options = StorageOptions {
        keep_backup: false,
        ..StorageOptions::default()
    };
    save_drawing(&path, views(&drawing()), &options).unwrap();
    save_drawing(&path, views(&drawing()), &options).unwrap();
    assert!(!StorageOptions::backup_file_path(&path).exists());
}

#[test]
fn load_truncates_to_shape_limit() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("drawing.json");
    save_drawing(&path, views(&drawing()), &StorageOptions::default()).unwrap();

    let options = StorageOptions {
        max_shapes: 3,
        ..StorageOptions::default()
    };
    let loaded = load_drawing(&path, &ShapeRegistry::with_builtins(), &options).unwrap();
    assert_eq!(loaded.shapes.len(), 3);
    assert_eq!(loaded.truncated, 1);
}

#[test]
fn oversized_files_are_refused() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("drawing.json");
    save_drawing(&path, views(&drawing()), &StorageOptions::default()).unwrap();

    let options = StorageOptions {
        max_file_size_bytes: 16,
        ..StorageOptions::default()
    };
    assert!(matches!(
        load_drawing(&path, &ShapeRegistry::with_builtins(), &options),
        Err(DrawError::TooLarge { limit: 16, .. })
    ));
    assert!(matches!(
        save_drawing(&path, views(&drawing()), &options),
        Err(DrawError::TooLarge { .. })
    ));
}

#[test]
fn gzip_payload_counts_against_size_limit() {
    use flate2::{Compression, write::GzEncoder};
    use std::io::Write;

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("bomb.json");
    let mut json = vec![b'['];
    json.resize(2 * 1024 * 1024, b' ');
    json.push(b']');
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json).unwrap();
    fs::write(&path, encoder.finish().unwrap()).unwrap();

    let options = StorageOptions {
        max_file_size_bytes: 1024 * 1024,
        ..StorageOptions::default()
    };
    assert!(fs::metadata(&path).unwrap().len() < options.max_file_size_bytes);
    assert!(matches!(
        load_drawing(&path, &ShapeRegistry::with_builtins(), &options),
        Err(DrawError::TooLarge {
            limit: 1_048_576,
            ..
        })
    ));
    assert!(matches!(
        inspect_drawing(&path, &options),
        Err(DrawError::TooLarge { .. })
    ));

    let roomy = StorageOptions {
        max_file_size_bytes: 4 * 1024 * 1024,
        ..StorageOptions::default()
    };
    let loaded = load_drawing(&path, &ShapeRegistry::with_builtins(), &roomy).unwrap();
    assert!(loaded.compressed);
    assert!(loaded.shapes.is_empty());
}

#[test]
fn failed_temp_write_leaves_no_partial_file() {
    let temp = tempfile::tempdir().unwrap();
    let tmp_path = temp.path().join("drawing.json.tmp");

    let result = super::storage::write_temp(&tmp_path, |file| {
        std::io::Write::write_all(file, b"[")?;
        Err(std::io::Error::other("disk full"))
    });
    assert!(matches!(result, Err(DrawError::Io { .. })));
    assert!(!tmp_path.exists());

    super::storage::write_temp(&tmp_path, |file| std::io::Write::write_all(file, b"[]")).unwrap();
    assert_eq!(fs::read_to_string(&tmp_path).unwrap(), "[]");
}

#[test]
fn missing_file_is_an_io_failure() {
    let temp = tempfile::tempdir().unwrap();
    let result = load_drawing(
        &temp.path().join("absent.json"),
        &ShapeRegistry::with_builtins(),
        &StorageOptions::default(),
    );
    assert!(matches!(result, Err(DrawError::Io { .. })));
}

#[test]
fn garbage_is_malformed() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("drawing.json");
    fs::write(&path, b"{ not a drawing").unwrap();
    let result = load_drawing(&path, &ShapeRegistry::with_builtins(), &StorageOptions::default());
    assert!(matches!(result, Err(DrawError::Malformed { .. })));
}

#[test]
fn plugin_shapes_need_the_plugin_to_load() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("drawing.json");
    let mut shapes = drawing();
    shapes.push(Box::new(Trapezoid::new(
        Point::new(20.0, 20.0),
        Point::new(30.0, 10.0),
        Style::default(),
    )));
    let options = StorageOptions::default();
    save_drawing(&path, views(&shapes), &options).unwrap();

    let builtins_only = load_drawing(&path, &ShapeRegistry::with_builtins(), &options).unwrap();
    assert_eq!(builtins_only.skipped, 1);
    assert_eq!(builtins_only.shapes.len(), 4);

    let mut registry = ShapeRegistry::with_builtins();
    registry.accept_plugins(crate::plugins::available());
    let with_plugin = load_drawing(&path, &registry, &options).unwrap();
    assert_eq!(with_plugin.skipped, 0);
    assert_same(&with_plugin.shapes, &shapes);
}

#[test]
fn inspect_counts_records_per_kind() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("drawing.json");
    let options = StorageOptions::default();

    let before = inspect_drawing(&path, &options).unwrap();
    assert!(!before.exists);
    assert_eq!(before.record_count, 0);

    save_drawing(&path, views(&drawing()), &options).unwrap();
    let after = inspect_drawing(&path, &options).unwrap();
    assert!(after.exists);
    assert_eq!(after.record_count, 4);
    assert_eq!(after.kinds.get("Polygon"), Some(&1));
    assert!(after.size_bytes.unwrap_or_default() > 0);
}

#[test]
fn options_from_config_converts_units() {
    let cfg = StorageConfig {
        compress: StorageCompression::On,
        auto_compress_threshold_kb: 4,
        max_file_size_mb: 2,
        max_shapes: 50,
        keep_backup: false,
    };
    let options = options_from_config(&cfg);
    assert_eq!(options.compression, CompressionMode::On);
    assert_eq!(options.auto_compress_threshold_bytes, 4 * 1024);
    assert_eq!(options.max_file_size_bytes, 2 * 1024 * 1024);
    assert_eq!(options.max_shapes, 50);
    assert!(!options.keep_backup);
}

#[test]
fn sibling_paths_append_suffix() {
    let path = std::path::Path::new("/tmp/art/picture.json");
    assert_eq!(
        StorageOptions::lock_file_path(path),
        std::path::PathBuf::from("/tmp/art/picture.json.lock")
    );
}
