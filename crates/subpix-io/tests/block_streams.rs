//! Block schedule and shifted output sizing tests.

use subpix_core::{GeoReference, Image, Padding, Size, StreamBlock};
use subpix_io::{load_image, save_image, BlockInputStream, IoError, ShiftedOutputStream};
use tempfile::TempDir;

fn write_raster(dir: &TempDir, name: &str, size: Size) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let data = (0..size.cell_count()).map(|v| v as f64).collect();
    let image = Image::from_data(size, data).unwrap();
    save_image(&path, &image, &GeoReference::default()).unwrap();
    path
}

#[test]
fn test_block_schedule_covers_raster_with_overlap() {
    let dir = TempDir::new().unwrap();
    let path = write_raster(&dir, "input.spxr", Size::new(100, 100));

    let mut stream = BlockInputStream::new(&path, Size::new(40, 40), 10.0, 10.0).unwrap();
    let mut blocks = Vec::new();
    while !stream.is_at_end() {
        blocks.push(stream.read().unwrap());
    }

    // stride 30 on both axes: origins 0, 30, 60 then the wrap position
    let origins: Vec<(usize, usize)> = blocks.iter().map(|b| (b.row_idx, b.col_idx)).collect();
    let expected_starts = [0, 30, 60];
    let mut expected = Vec::new();
    for &r in &expected_starts {
        for &c in &expected_starts {
            expected.push((r, c));
        }
    }
    assert_eq!(origins, expected);

    // interior blocks keep the nominal size, edge blocks are clipped
    assert_eq!(blocks[0].image.size(), Size::new(40, 40));
    assert_eq!(blocks[2].image.size(), Size::new(40, 40));
    let last = blocks.last().unwrap();
    assert_eq!(last.image.size(), Size::new(40, 40));

    // every block content matches the source window
    let (source, _) = load_image(&path).unwrap();
    for block in &blocks {
        let size = block.image.size();
        for i in 0..size.row {
            for j in 0..size.col {
                assert_eq!(
                    block.image.get(i, j),
                    source.get(block.row_idx + i, block.col_idx + j)
                );
            }
        }
    }
}

#[test]
fn test_block_schedule_clips_edges() {
    let dir = TempDir::new().unwrap();
    let path = write_raster(&dir, "input.spxr", Size::new(50, 70));

    let mut stream = BlockInputStream::new(&path, Size::new(32, 32), 5.5, 5.5).unwrap();
    let mut blocks = Vec::new();
    while !stream.is_at_end() {
        blocks.push(stream.read().unwrap());
    }

    // stride 26: columns 0, 26, then clipped read at 52; rows 0, 26 (clipped)
    let origins: Vec<(usize, usize)> = blocks.iter().map(|b| (b.row_idx, b.col_idx)).collect();
    assert_eq!(
        origins,
        vec![(0, 0), (0, 26), (0, 52), (26, 0), (26, 26), (26, 52)]
    );
    assert_eq!(blocks[2].image.size(), Size::new(32, 18));
    assert_eq!(blocks[3].image.size(), Size::new(24, 32));
    assert_eq!(blocks[5].image.size(), Size::new(24, 18));
}

#[test]
fn test_read_after_end_reports_end_of_stream() {
    let dir = TempDir::new().unwrap();
    let path = write_raster(&dir, "input.spxr", Size::new(16, 16));

    let mut stream = BlockInputStream::new(&path, Size::new(16, 16), 0.0, 0.0).unwrap();
    let block = stream.read().unwrap();
    assert_eq!(block.image.size(), Size::new(16, 16));
    assert!(stream.is_at_end());
    assert!(matches!(stream.read(), Err(IoError::EndOfStream)));
}

#[test]
fn test_zero_block_size_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_raster(&dir, "input.spxr", Size::new(16, 16));
    assert!(matches!(
        BlockInputStream::new(&path, Size::new(0, 16), 0.0, 0.0),
        Err(IoError::InvalidBlockSize(_))
    ));
}

#[test]
fn test_block_not_exceeding_shift_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_raster(&dir, "input.spxr", Size::new(64, 64));
    // stride would be zero: ceil(16.0) == block rows
    assert!(matches!(
        BlockInputStream::new(&path, Size::new(16, 32), 16.0, 0.0),
        Err(IoError::InvalidBlockSize(_))
    ));
}

#[test]
fn test_oversized_block_rejected_on_read() {
    let dir = TempDir::new().unwrap();
    let path = write_raster(&dir, "input.spxr", Size::new(16, 16));
    let mut stream = BlockInputStream::new(&path, Size::new(32, 32), 0.0, 0.0).unwrap();
    assert!(matches!(
        stream.read(),
        Err(IoError::BlockExceedsRaster { .. })
    ));
}

#[test]
fn test_output_stream_sizes_and_shifts_georeference() {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.spxr");
    let image = Image::from_data(
        Size::new(64, 64),
        (0..64 * 64).map(|v| v as f64).collect(),
    )
    .unwrap();
    let geo = GeoReference::new([1000.0, 2.0, 0.0, 2000.0, 0.0, -2.0], "EPSG:3857");
    save_image(&input_path, &image, &geo).unwrap();

    let output_path = dir.path().join("output.spxr");
    let mut output =
        ShiftedOutputStream::create(&input_path, &output_path, 10.75, -3.5).unwrap();

    // place one block so the file is valid to reopen
    let tile = Image::from_data(Size::new(4, 4), vec![1.0; 16]).unwrap();
    output
        .write(StreamBlock::new(tile, 0, 0, Padding::zero()))
        .unwrap();
    drop(output);

    let (written, out_geo) = load_image(&output_path).unwrap();
    // 64 - ceil(10.75) rows, 64 - ceil(3.5) columns
    assert_eq!(written.size(), Size::new(53, 60));
    // origin moved by the integer shift parts: col -3, row 10
    assert_eq!(out_geo.transform[0], 1000.0 + (-3.0) * 2.0);
    assert_eq!(out_geo.transform[3], 2000.0 + 10.0 * (-2.0));
    assert_eq!(out_geo.projection, "EPSG:3857");
    assert_eq!(written.get(0, 0), 1.0);
}
