//! Command handlers behind the CLI.
//!
//! - [`rebuild`]: Regenerate the whole output set from a directory
//! - [`append`]: Add images after the current maximum number
//! - [`delete`]: Remove numbers and compact the rest

mod append;
mod delete;
mod rebuild;

pub use append::{AppendOptions, AppendSource, append};
pub use delete::delete;
pub use rebuild::{RebuildOptions, rebuild};
