//! Random number assignment for rebuild and append.
//!
//! Both commands hand out a contiguous range of numbers and map it onto the
//! sources through a uniformly random permutation. The RNG is injected so
//! callers (and tests) decide whether the order is reproducible.

use rand::Rng;
use rand::seq::SliceRandom;
use crate::utils::{OutputFile, SequencerResult, ValidationError};

/// Pairs every item with a distinct number from `start..start + items.len()`.
///
/// The numbers are shuffled before being zipped with `items`, so the result is
/// a uniform random bijection. Item order is preserved in the output.
///
/// # Errors
/// [`ValidationError::NumberingExhausted`] when the last number would not fit
/// in a `u32`. Nothing is assigned in that case.
pub fn assign_numbers<T, R>(items: Vec<T>, start: u32, rng: &mut R) -> SequencerResult<Vec<(u32, T)>>
where
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }
    let exhausted = || ValidationError::NumberingExhausted {
        start: u64::from(start),
        count: items.len(),
    };
    let last = u32::try_from(items.len() - 1)
        .ok()
        .and_then(|offset| start.checked_add(offset))
        .ok_or_else(exhausted)?;

    let mut numbers: Vec<u32> = (start..=last).collect();
    numbers.shuffle(rng);
    Ok(numbers.into_iter().zip(items).collect())
}

/// First number free for appending after `existing`.
///
/// # Errors
/// [`ValidationError::NumberingExhausted`] when `existing` already holds
/// `u32::MAX`.
pub fn next_start(existing: &[OutputFile]) -> SequencerResult<u32> {
    let Some(max) = existing.iter().map(|file| file.number).max() else {
        return Ok(1);
    };
    max.checked_add(1).ok_or_else(|| {
        ValidationError::NumberingExhausted { start: u64::from(max) + 1, count: 1 }.into()
    })
}
