//! Appending new images after the current maximum number.

use std::path::PathBuf;
use rand::Rng;
use tracing::{debug, info};
use crate::core::{AppState, ConversionResult, ConversionTask, assign_numbers, next_start};
use crate::utils::{
    FsOutputStore, OutputStore, SequencerResult, ValidationError,
    filter_sources, scan_sources, validate_input_dir, validate_output_dir,
};

/// Where the images to append come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendSource {
    /// Files named on the command line
    Files(Vec<PathBuf>),
    /// Every recognised image inside a directory
    Directory(PathBuf),
}

/// Arguments of the `append` command.
#[derive(Debug, Clone)]
pub struct AppendOptions {
    pub output: PathBuf,
    pub source: AppendSource,
    pub threads: Option<usize>,
}

/// Adds images as a random bijection onto `max+1..=max+K`.
///
/// Existing output files are never opened, renamed or overwritten.
///
/// # Errors
/// [`ValidationError::NoImages`] when nothing survives extension filtering,
/// [`ValidationError::NumberingExhausted`] when the new range would pass
/// `u32::MAX`.
pub async fn append<R: Rng + ?Sized>(
    state: &AppState,
    options: &AppendOptions,
    rng: &mut R,
) -> SequencerResult<Vec<ConversionResult>> {
    validate_output_dir(&options.output)?;

    let sources = match &options.source {
        AppendSource::Directory(dir) => {
            validate_input_dir(dir)?;
            scan_sources(dir)?
        }
        AppendSource::Files(files) => filter_sources(files),
    };
    if sources.is_empty() {
        return Err(ValidationError::NoImages.into());
    }
    state.check_sources(&sources)?;

    let store = FsOutputStore::new(&options.output);
    let existing = store.list()?;
    let start = next_start(&existing)?;
    debug!(
        "{} existing files, appending {} starting at {}",
        existing.len(),
        sources.len(),
        start
    );

    let assignment = assign_numbers(sources, start, rng)?;
    let tasks = ConversionTask::from_assignment(&store, assignment);

    let pool = state.create_pool(options.threads);
    let results = pool.process_batch(tasks).await?;
    info!(
        "Appended {} images to {} ({} total)",
        results.len(),
        options.output.display(),
        existing.len() + results.len()
    );
    Ok(results)
}
