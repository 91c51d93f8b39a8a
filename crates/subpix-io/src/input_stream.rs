//! Block input stream: overlapping source tiles sized for a shift.
//!
//! Each tile loses `ceil(|shift|)` trailing samples per axis once the kernel
//! crops it, so successive tile origins advance by
//! `block_size - ceil(|shift|)`; the overlap makes the cropped outputs tile
//! the shrunk destination exactly.

use std::path::Path;

use subpix_core::{Image, Padding, Size, StreamBlock};
use tracing::{debug, error, info};

use crate::{Dataset, IoError, IoResult};

/// Iterator-style reader over the stream blocks of a source raster.
pub struct BlockInputStream {
    dataset: Dataset,
    block_size: Size,
    row_shift: f64,
    col_shift: f64,
    is_ended: bool,
    row_idx: usize,
    col_idx: usize,
}

impl BlockInputStream {
    /// Opens `path` and prepares the block schedule for the given shift.
    ///
    /// # Errors
    ///
    /// Fails with [`IoError::InvalidBlockSize`] if the block is zero-area or
    /// not strictly larger than the per-axis crop `ceil(|shift|)` (the
    /// stride would stop advancing).
    pub fn new(
        path: impl AsRef<Path>,
        block_size: Size,
        row_shift: f64,
        col_shift: f64,
    ) -> IoResult<Self> {
        if block_size.is_empty() {
            error!(%block_size, "invalid block size");
            return Err(IoError::InvalidBlockSize(format!(
                "block size {block_size} has a zero extent"
            )));
        }
        if block_size.row <= row_shift.abs().ceil() as usize
            || block_size.col <= col_shift.abs().ceil() as usize
        {
            error!(%block_size, row_shift, col_shift, "invalid block size");
            return Err(IoError::InvalidBlockSize(format!(
                "block size {block_size} must exceed the shift magnitude ({row_shift}, {col_shift})"
            )));
        }

        let dataset = Dataset::open(&path)?;
        info!(
            path = %path.as_ref().display(),
            rows = dataset.raster_y_size(),
            cols = dataset.raster_x_size(),
            "input raster opened"
        );

        Ok(Self {
            dataset,
            block_size,
            row_shift,
            col_shift,
            is_ended: false,
            row_idx: 0,
            col_idx: 0,
        })
    }

    /// `true` once every block has been handed out.
    pub fn is_at_end(&self) -> bool {
        self.is_ended
    }

    /// Reads the next block in row-major block order.
    ///
    /// Blocks at the bottom/right edges are clipped to the raster extent.
    ///
    /// # Errors
    ///
    /// [`IoError::EndOfStream`] once exhausted,
    /// [`IoError::BlockExceedsRaster`] if the nominal block does not fit in
    /// the raster, or the underlying read failure.
    pub fn read(&mut self) -> IoResult<StreamBlock> {
        if self.is_ended {
            return Err(IoError::EndOfStream);
        }

        let raster = self.dataset.size();
        if self.block_size.row > raster.row || self.block_size.col > raster.col {
            error!(
                block = %self.block_size,
                raster = %raster,
                "requested block is bigger than the source raster, use whole-image processing"
            );
            return Err(IoError::BlockExceedsRaster {
                block: self.block_size,
                raster,
            });
        }

        // Clip at the bottom/right edges.
        let rows_to_read = self.block_size.row.min(raster.row - self.row_idx);
        let cols_to_read = self.block_size.col.min(raster.col - self.col_idx);

        let samples =
            self.dataset
                .read_region(self.col_idx, self.row_idx, cols_to_read, rows_to_read)?;
        let image = Image::from_data(Size::new(rows_to_read, cols_to_read), samples)?;
        let block = StreamBlock::new(image, self.row_idx, self.col_idx, Padding::zero());

        if self.row_idx + self.block_size.row >= raster.row
            && self.col_idx + self.block_size.col >= raster.col
        {
            self.is_ended = true;
        }

        if self.col_idx >= raster.col - self.block_size.col {
            self.col_idx = 0;
            self.row_idx += self.block_size.row - self.row_shift.abs().ceil() as usize;
        } else {
            self.col_idx += self.block_size.col - self.col_shift.abs().ceil() as usize;
        }

        debug!(
            rows = block.image.size().row,
            cols = block.image.size().col,
            row_idx = block.row_idx,
            col_idx = block.col_idx,
            "read stream block"
        );
        Ok(block)
    }
}
