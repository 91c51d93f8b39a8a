//! Shifted output stream: destination raster sized to the shrunk extent.

use std::path::Path;

use subpix_core::{Size, StreamBlock};
use tracing::info;

use crate::{Dataset, IoResult};

/// Writes translated blocks into a destination raster.
///
/// The destination is sized `(H - ceil(|row_shift|), W - ceil(|col_shift|))`
/// relative to the source and its geo-reference is moved by the integer part
/// of the shift in source pixel units. Each block lands at its own absolute
/// coordinates; write order does not matter.
pub struct ShiftedOutputStream {
    dataset: Dataset,
}

impl ShiftedOutputStream {
    /// Sizes and creates the destination raster for `input_path` translated
    /// by `(row_shift, col_shift)`.
    pub fn create(
        input_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
        row_shift: f64,
        col_shift: f64,
    ) -> IoResult<Self> {
        let input = Dataset::open(input_path)?;
        let out_size = Size::new(
            input
                .raster_y_size()
                .saturating_sub(row_shift.abs().ceil() as usize),
            input
                .raster_x_size()
                .saturating_sub(col_shift.abs().ceil() as usize),
        );
        let geo_reference = input
            .geo_reference()
            .shifted(row_shift.trunc(), col_shift.trunc());

        let dataset = Dataset::create(&output_path, out_size, 1, geo_reference)?;
        info!(
            path = %output_path.as_ref().display(),
            rows = out_size.row,
            cols = out_size.col,
            "output raster created"
        );
        Ok(Self { dataset })
    }

    /// Places a block at `(block.row_idx, block.col_idx)` of the output.
    pub fn write(&mut self, block: StreamBlock) -> IoResult<()> {
        let size = block.image.size();
        self.dataset.write_region(
            block.col_idx,
            block.row_idx,
            size.col,
            size.row,
            block.image.data(),
        )
    }
}
