//! Deletion and gap-free renumbering of the output set.

use std::collections::BTreeSet;
use tracing::{debug, info, warn};
use crate::utils::{OutputFile, OutputStore, SequencerResult};

/// A single renumbering step produced by [`plan_compaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rename {
    pub from: u32,
    pub to: u32,
}

/// Outcome of [`delete_and_compact`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompactionSummary {
    /// Numbers that were actually deleted
    pub deleted: Vec<u32>,
    /// Requested numbers that had no file
    pub missing: Vec<u32>,
    /// Renames applied, in order
    pub renames: Vec<Rename>,
    /// Files left in the output directory
    pub remaining: usize,
}

/// Renames that turn `existing` into the contiguous range `1..=len`.
///
/// Survivors keep their relative order. Every target is at most its source
/// and the plan is ascending, so applying it in order never lands on a file
/// that has yet to move.
pub fn plan_compaction(existing: &[OutputFile]) -> Vec<Rename> {
    let mut numbers: Vec<u32> = existing.iter().map(|file| file.number).collect();
    numbers.sort_unstable();

    numbers
        .into_iter()
        .zip(1u32..)
        .filter(|(from, to)| from != to)
        .map(|(from, to)| Rename { from, to })
        .collect()
}

/// Deletes the requested numbers, then compacts what is left.
///
/// Missing numbers are reported and skipped. Compaction always runs, so a
/// call with nothing to delete still closes any existing gaps.
pub fn delete_and_compact(
    store: &dyn OutputStore,
    numbers: &[u32],
) -> SequencerResult<CompactionSummary> {
    let mut summary = CompactionSummary::default();

    let requested: BTreeSet<u32> = numbers.iter().copied().collect();
    for number in requested {
        if store.remove(number)? {
            info!("Deleted {}", store.path_for(number).display());
            summary.deleted.push(number);
        } else {
            warn!("{} does not exist, skipping", store.path_for(number).display());
            summary.missing.push(number);
        }
    }

    let remaining = store.list()?;
    let plan = plan_compaction(&remaining);
    for rename in &plan {
        debug!("Renumbering {} -> {}", rename.from, rename.to);
        store.rename(rename.from, rename.to)?;
    }

    info!(
        "Compacted output: {} files, {} renamed",
        remaining.len(),
        plan.len()
    );
    summary.remaining = remaining.len();
    summary.renames = plan;
    Ok(summary)
}
