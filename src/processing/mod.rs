mod native;

pub use native::NativeConverter;

use crate::core::{ConversionResult, ConversionTask};
use crate::utils::{SequencerResult, SourceFormat};

/// Turns one source image into its numbered output file.
///
/// Implementations are called concurrently from blocking worker threads, one
/// task per call, and must only write to `task.output_path`.
pub trait ImageConverter: Send + Sync {
    fn convert(&self, task: &ConversionTask) -> SequencerResult<ConversionResult>;

    /// Whether sources of `format` can be decoded at all.
    ///
    /// Checked for every source before the output directory is touched.
    fn supports(&self, _format: SourceFormat) -> bool {
        true
    }
}
