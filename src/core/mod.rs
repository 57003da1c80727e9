//! Core application types and the numbering policy.
//!
//! This module contains the fundamental types used throughout the application:
//! - [`AppState`]: Settings and converter shared by the commands
//! - [`ConversionTask`]: One source image bound to its output number
//! - [`ConvertSettings`]: Configuration for image conversion
//! - [`numbering`]: Random assignment of contiguous number ranges
//! - [`compaction`]: Deleting numbers and closing the gaps they leave

pub mod compaction;
pub mod numbering;
mod state;
mod task;
mod types;

pub use compaction::{CompactionSummary, Rename, delete_and_compact, plan_compaction};
pub use numbering::{assign_numbers, next_start};
pub use state::AppState;
pub use task::ConversionTask;
pub use types::{ConversionResult, ConvertSettings, DEFAULT_MAX_DIMENSION};
