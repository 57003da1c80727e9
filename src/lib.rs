// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod processing;
pub mod worker;
pub mod commands;
pub mod cli;

// Public exports for external consumers
pub use crate::cli::{Cli, Command, run};
pub use crate::core::{AppState, ConversionResult, ConversionTask, ConvertSettings};
pub use crate::processing::{ImageConverter, NativeConverter};
pub use crate::utils::{SequencerError, SequencerResult};
pub use crate::worker::WorkerPool;
