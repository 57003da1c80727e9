//! Conversion task definition and creation.

use std::path::PathBuf;
use crate::utils::OutputStore;

/// Represents a single image conversion task.
///
/// Tasks are built up front and never mutated, so workers can share nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTask {
    /// Number the output will carry
    pub number: u32,
    /// Path to the source image file
    pub source_path: PathBuf,
    /// Path where the `<N>.webp` will be written
    pub output_path: PathBuf,
}

impl ConversionTask {
    /// Creates a task writing `source` to `<number>.webp` inside `store`.
    pub fn new(store: &dyn OutputStore, number: u32, source: PathBuf) -> Self {
        Self {
            number,
            output_path: store.path_for(number),
            source_path: source,
        }
    }

    /// Builds one task per `(number, source)` pair.
    pub fn from_assignment(store: &dyn OutputStore, assignment: Vec<(u32, PathBuf)>) -> Vec<Self> {
        assignment
            .into_iter()
            .map(|(number, source)| Self::new(store, number, source))
            .collect()
    }

    /// File name of the source, for log lines.
    pub fn source_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_path.display().to_string())
    }
}
