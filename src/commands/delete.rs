use std::path::Path;
use crate::core::{CompactionSummary, delete_and_compact};
use crate::utils::{FsOutputStore, SequencerResult, validate_output_dir};

/// Deletes the numbered files, then renumbers the survivors to `1..=M`.
pub fn delete(output: &Path, numbers: &[u32]) -> SequencerResult<CompactionSummary> {
    validate_output_dir(output)?;
    delete_and_compact(&FsOutputStore::new(output), numbers)
}
