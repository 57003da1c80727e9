//! Full regeneration of the output set.

use std::path::PathBuf;
use rand::Rng;
use tracing::{debug, info};
use crate::core::{AppState, ConversionResult, ConversionTask, assign_numbers};
use crate::utils::{FsOutputStore, OutputStore, SequencerResult, scan_sources, validate_input_dir, validate_output_dir};

/// Arguments of the `rebuild` command.
#[derive(Debug, Clone)]
pub struct RebuildOptions {
    /// Directory receiving `<N>.webp`
    pub output: PathBuf,
    /// Directory scanned for source images
    pub input: PathBuf,
    /// Keep existing output files instead of clearing the directory first
    pub dirty: bool,
    /// Worker count, `None` for one per CPU
    pub threads: Option<usize>,
}

/// Converts every image in `input` to a random permutation of `1..=N`.
///
/// The output directory is validated before the input, and every source must
/// be decodable before anything is removed. Unless `dirty` is set, every file
/// in the output directory is removed before conversion starts; with `dirty`,
/// colliding numbers are overwritten and the rest left alone.
///
/// # Returns
/// One result per converted image, ordered by number.
pub async fn rebuild<R: Rng + ?Sized>(
    state: &AppState,
    options: &RebuildOptions,
    rng: &mut R,
) -> SequencerResult<Vec<ConversionResult>> {
    validate_output_dir(&options.output)?;
    validate_input_dir(&options.input)?;

    info!("Gathering files...");
    let mut sources = scan_sources(&options.input)?;
    state.check_sources(&sources)?;

    let store = FsOutputStore::new(&options.output);
    if options.dirty {
        debug!("Keeping existing files in {}", options.output.display());
    } else {
        info!("Clearing output directory...");
        let removed = store.clear()?;
        debug!("Removed {} files", removed);
        // Sources inside the output directory were just cleared.
        sources.retain(|path| path.is_file());
    }

    if sources.is_empty() {
        info!("No images found in {}", options.input.display());
        return Ok(Vec::new());
    }

    let assignment = assign_numbers(sources, 1, rng)?;
    let tasks = ConversionTask::from_assignment(&store, assignment);

    let pool = state.create_pool(options.threads);
    let results = pool.process_batch(tasks).await?;
    info!("Rebuilt {} with {} images", options.output.display(), results.len());
    Ok(results)
}
