//! Flat binary raster datasets.
//!
//! # File Layout
//!
//! ```text
//! offset  size  field
//! 0       4     magic "SPXR"
//! 4       2     format version (u16, currently 1)
//! 6       2     band count (u16)
//! 8       4     columns (u32)
//! 12      4     rows (u32)
//! 16      1     geo-reference initialized flag
//! 17      48    geo transform (6 x f64)
//! 65      4     projection length (u32)
//! 69      n     projection bytes (UTF-8)
//! 69+n    ...   samples, f64 little-endian, row-major
//! ```
//!
//! All multi-byte fields are little-endian. Samples follow immediately after
//! the header, so a region read seeks once per row.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use subpix_core::{GeoReference, Image, Size};
use tracing::debug;

use crate::{IoError, IoResult};

const MAGIC: [u8; 4] = *b"SPXR";
const FORMAT_VERSION: u16 = 1;
const SAMPLE_BYTES: usize = 8;

/// Handle on a single raster file, readable and writable by region.
#[derive(Debug)]
pub struct Dataset {
    file: File,
    size: Size,
    band_count: usize,
    geo_reference: GeoReference,
    data_offset: u64,
}

impl Dataset {
    /// Opens an existing raster for reading.
    ///
    /// # Errors
    ///
    /// Fails with [`IoError::InvalidFile`] on a bad magic, version, band
    /// count or truncated header.
    pub fn open(path: impl AsRef<Path>) -> IoResult<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;

        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(IoError::InvalidFile(format!(
                "{}: not a raster file",
                path.display()
            )));
        }
        let version = file.read_u16::<LittleEndian>()?;
        if version != FORMAT_VERSION {
            return Err(IoError::InvalidFile(format!(
                "{}: unsupported format version {version}",
                path.display()
            )));
        }
        let band_count = file.read_u16::<LittleEndian>()? as usize;
        if band_count != 1 {
            return Err(IoError::InvalidFile(format!(
                "{}: expected a single band, found {band_count}",
                path.display()
            )));
        }
        let cols = file.read_u32::<LittleEndian>()? as usize;
        let rows = file.read_u32::<LittleEndian>()? as usize;

        let initialized = file.read_u8()? != 0;
        let mut transform = [0.0; 6];
        file.read_f64_into::<LittleEndian>(&mut transform)?;
        let projection_len = file.read_u32::<LittleEndian>()? as usize;
        let mut projection_bytes = vec![0u8; projection_len];
        file.read_exact(&mut projection_bytes)?;
        let projection = String::from_utf8(projection_bytes).map_err(|_| {
            IoError::InvalidFile(format!("{}: projection is not UTF-8", path.display()))
        })?;

        let data_offset = file.stream_position()?;
        let geo_reference = GeoReference {
            transform,
            projection,
            is_initialized: initialized,
        };

        debug!(path = %path.display(), rows, cols, "opened raster dataset");
        Ok(Self {
            file,
            size: Size::new(rows, cols),
            band_count,
            geo_reference,
            data_offset,
        })
    }

    /// Creates a raster of the given size, pre-sized so any region can be
    /// written in any order.
    ///
    /// # Errors
    ///
    /// Fails with [`IoError::InvalidFile`] for a zero-area size or an
    /// unsupported band count.
    pub fn create(
        path: impl AsRef<Path>,
        size: Size,
        band_count: usize,
        geo_reference: GeoReference,
    ) -> IoResult<Self> {
        let path = path.as_ref();
        if size.is_empty() {
            return Err(IoError::InvalidFile(format!(
                "{}: cannot create {size} raster",
                path.display()
            )));
        }
        if band_count != 1 {
            return Err(IoError::InvalidFile(format!(
                "{}: only single-band rasters are supported",
                path.display()
            )));
        }

        let mut file = File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        file.write_all(&MAGIC)?;
        file.write_u16::<LittleEndian>(FORMAT_VERSION)?;
        file.write_u16::<LittleEndian>(band_count as u16)?;
        file.write_u32::<LittleEndian>(size.col as u32)?;
        file.write_u32::<LittleEndian>(size.row as u32)?;
        file.write_u8(geo_reference.is_initialized as u8)?;
        for coeff in geo_reference.transform {
            file.write_f64::<LittleEndian>(coeff)?;
        }
        file.write_u32::<LittleEndian>(geo_reference.projection.len() as u32)?;
        file.write_all(geo_reference.projection.as_bytes())?;

        let data_offset = file.stream_position()?;
        file.set_len(data_offset + (size.cell_count() * SAMPLE_BYTES) as u64)?;

        debug!(path = %path.display(), rows = size.row, cols = size.col, "created raster dataset");
        Ok(Self {
            file,
            size,
            band_count,
            geo_reference,
            data_offset,
        })
    }

    /// Raster width in samples.
    #[inline]
    pub fn raster_x_size(&self) -> usize {
        self.size.col
    }

    /// Raster height in lines.
    #[inline]
    pub fn raster_y_size(&self) -> usize {
        self.size.row
    }

    /// Raster dimensions.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Number of bands (always 1 on the translation path).
    #[inline]
    pub fn band_count(&self) -> usize {
        self.band_count
    }

    /// Geo-reference read from (or written to) the header.
    #[inline]
    pub fn geo_reference(&self) -> &GeoReference {
        &self.geo_reference
    }

    fn check_region(&self, x: usize, y: usize, w: usize, h: usize) -> IoResult<()> {
        if x + w > self.size.col || y + h > self.size.row {
            return Err(IoError::InvalidRegion {
                x,
                y,
                w,
                h,
                rows: self.size.row,
                cols: self.size.col,
            });
        }
        Ok(())
    }

    fn sample_offset(&self, x: usize, y: usize) -> u64 {
        self.data_offset + ((y * self.size.col + x) * SAMPLE_BYTES) as u64
    }

    /// Reads a `w x h` region with its top-left corner at `(x, y)`.
    ///
    /// Returns `w * h` samples in row-major order.
    pub fn read_region(&mut self, x: usize, y: usize, w: usize, h: usize) -> IoResult<Vec<f64>> {
        self.check_region(x, y, w, h)?;
        let mut samples = vec![0.0; w * h];
        for r in 0..h {
            self.file.seek(SeekFrom::Start(self.sample_offset(x, y + r)))?;
            self.file
                .read_f64_into::<LittleEndian>(&mut samples[r * w..(r + 1) * w])?;
        }
        Ok(samples)
    }

    /// Writes a `w x h` region with its top-left corner at `(x, y)`.
    pub fn write_region(
        &mut self,
        x: usize,
        y: usize,
        w: usize,
        h: usize,
        samples: &[f64],
    ) -> IoResult<()> {
        self.check_region(x, y, w, h)?;
        if samples.len() != w * h {
            return Err(IoError::InvalidFile(format!(
                "region buffer of {} samples does not match {w}x{h}",
                samples.len()
            )));
        }
        let mut row_bytes = vec![0u8; w * SAMPLE_BYTES];
        for r in 0..h {
            LittleEndian::write_f64_into(&samples[r * w..(r + 1) * w], &mut row_bytes);
            self.file.seek(SeekFrom::Start(self.sample_offset(x, y + r)))?;
            self.file.write_all(&row_bytes)?;
        }
        Ok(())
    }
}

/// Loads a whole raster into memory.
pub fn load_image(path: impl AsRef<Path>) -> IoResult<(Image, GeoReference)> {
    let mut dataset = Dataset::open(path)?;
    let size = dataset.size();
    let samples = dataset.read_region(0, 0, size.col, size.row)?;
    Ok((
        Image::from_data(size, samples)?,
        dataset.geo_reference().clone(),
    ))
}

/// Saves a whole in-memory image as a raster.
pub fn save_image(
    path: impl AsRef<Path>,
    image: &Image,
    geo_reference: &GeoReference,
) -> IoResult<()> {
    let size = image.size();
    let mut dataset = Dataset::create(path, size, 1, geo_reference.clone())?;
    dataset.write_region(0, 0, size.col, size.row, image.data())
}
