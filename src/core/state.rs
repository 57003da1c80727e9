//! Shared application state for the command handlers.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use crate::core::ConvertSettings;
use crate::processing::{ImageConverter, NativeConverter};
use crate::utils::{SequencerResult, ValidationError, format_from_extension};
use crate::worker::WorkerPool;

/// The converter every worker pool is built around.
#[derive(Clone)]
pub struct AppState {
    converter: Arc<dyn ImageConverter>,
}

impl AppState {
    /// Creates state backed by the native `image` converter.
    pub fn new(settings: ConvertSettings) -> Self {
        debug!("Native converter ready (max dimension: {})", settings.max_dimension);
        Self::with_converter(Arc::new(NativeConverter::new(settings)))
    }

    /// Creates state around a caller-supplied converter.
    pub fn with_converter(converter: Arc<dyn ImageConverter>) -> Self {
        Self { converter }
    }

    /// Fails on the first source whose format the converter cannot decode.
    pub fn check_sources(&self, sources: &[PathBuf]) -> SequencerResult<()> {
        let undecodable = sources.iter().find(|path| {
            format_from_extension(path).is_some_and(|format| !self.converter.supports(format))
        });
        match undecodable {
            Some(path) => Err(ValidationError::undecodable_source(path).into()),
            None => Ok(()),
        }
    }

    /// Creates a worker pool with `threads` workers, or one per CPU when `None`.
    pub fn create_pool(&self, threads: Option<usize>) -> WorkerPool {
        WorkerPool::new(Arc::clone(&self.converter), threads)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ConvertSettings::default())
    }
}
