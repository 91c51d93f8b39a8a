//! Dataset round-trip and region access tests.

use subpix_core::{GeoReference, Image, Size};
use subpix_io::{load_image, save_image, Dataset, IoError};
use tempfile::TempDir;

fn sample_image(size: Size) -> Image {
    let data = (0..size.cell_count()).map(|v| v as f64 * 0.5).collect();
    Image::from_data(size, data).unwrap()
}

fn sample_geo() -> GeoReference {
    GeoReference::new([500_000.0, 10.0, 0.0, 4_600_000.0, 0.0, -10.0], "EPSG:32631")
}

#[test]
fn test_save_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roundtrip.spxr");

    let image = sample_image(Size::new(37, 53));
    save_image(&path, &image, &sample_geo()).unwrap();

    let (loaded, geo) = load_image(&path).unwrap();
    assert_eq!(loaded, image);
    assert!(geo.is_initialized);
    assert_eq!(geo.transform, sample_geo().transform);
    assert_eq!(geo.projection, "EPSG:32631");
}

#[test]
fn test_partial_region_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.spxr");
    let image = sample_image(Size::new(16, 16));
    save_image(&path, &image, &GeoReference::default()).unwrap();

    let mut dataset = Dataset::open(&path).unwrap();
    let region = dataset.read_region(4, 2, 8, 3).unwrap();
    assert_eq!(region.len(), 24);
    for r in 0..3 {
        for c in 0..8 {
            assert_eq!(region[r * 8 + c], image.get(2 + r, 4 + c));
        }
    }
}

#[test]
fn test_out_of_order_region_writes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("unordered.spxr");

    let mut dataset = Dataset::create(
        &path,
        Size::new(8, 8),
        1,
        GeoReference::default(),
    )
    .unwrap();
    dataset.write_region(4, 4, 4, 4, &vec![2.0; 16]).unwrap();
    dataset.write_region(0, 0, 4, 4, &vec![1.0; 16]).unwrap();
    drop(dataset);

    let (image, _) = load_image(&path).unwrap();
    assert_eq!(image.get(0, 0), 1.0);
    assert_eq!(image.get(7, 7), 2.0);
    // untouched quadrants stay zero-filled
    assert_eq!(image.get(0, 7), 0.0);
    assert_eq!(image.get(7, 0), 0.0);
}

#[test]
fn test_region_bounds_checked() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bounds.spxr");
    save_image(&path, &sample_image(Size::new(8, 8)), &GeoReference::default()).unwrap();

    let mut dataset = Dataset::open(&path).unwrap();
    assert!(matches!(
        dataset.read_region(4, 4, 8, 8),
        Err(IoError::InvalidRegion { .. })
    ));
}

#[test]
fn test_open_rejects_foreign_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("foreign.bin");
    std::fs::write(&path, b"definitely not a raster").unwrap();
    assert!(matches!(
        Dataset::open(&path),
        Err(IoError::InvalidFile(_))
    ));
}

#[test]
fn test_create_rejects_empty_size() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.spxr");
    assert!(Dataset::create(&path, Size::new(0, 16), 1, GeoReference::default()).is_err());
}
