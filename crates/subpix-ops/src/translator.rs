//! One-call translation façade consumed by the streaming executor.

use subpix_core::Image;
use tracing::trace;

use crate::{Decomposition, FrequencyTranslation, OpsResult, TranslationInterpolator2D};

/// Applies a decomposition policy and the translation operators to an image.
///
/// The translator owns no mutable state: `compute` may be invoked
/// concurrently from any number of workers on distinct images.
#[derive(Debug, Clone, Copy)]
pub struct ShiftTranslator {
    decomposition: Decomposition,
    translation: FrequencyTranslation,
    interpolator: TranslationInterpolator2D,
}

impl ShiftTranslator {
    /// Creates a translator for the given policy and shift, in pixels.
    pub fn new(decomposition: Decomposition, row_shift: f64, col_shift: f64) -> Self {
        Self {
            decomposition,
            translation: FrequencyTranslation::new(row_shift, col_shift),
            interpolator: TranslationInterpolator2D::new(row_shift, col_shift),
        }
    }

    /// Returns the configured decomposition policy.
    pub fn decomposition(&self) -> Decomposition {
        self.decomposition
    }

    /// Translates `image`, returning the shifted and cropped result.
    pub fn compute(&self, image: &Image) -> OpsResult<Image> {
        trace!(policy = %self.decomposition, "compute shifted image");
        self.decomposition
            .decompose_and_process(image, &self.translation, &self.interpolator)
    }
}
