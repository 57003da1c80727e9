//! Error types for the sequencer.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.
//! Every top-level error maps onto a distinct process exit code.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Precondition failures detected before any work is done.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Input path is missing or not a directory
    #[error("Input directory {0} does not exist or is not a directory.")]
    InputNotDirectory(PathBuf),
    /// Output path is missing or not a directory
    #[error("Output directory {0} is not a directory.")]
    OutputNotDirectory(PathBuf),
    /// Nothing left to append after extension filtering
    #[error("No valid image files found.")]
    NoImages,
    /// Extension outside the recognised source formats
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
    /// Recognised source that the active converter cannot decode
    #[error("Cannot convert {0}: this build has no decoder for the format.")]
    UndecodableSource(PathBuf),
    /// `start + count - 1` does not fit in a `u32`
    #[error("Cannot number {count} images starting at {start}: the sequence would pass {max}.", max = u32::MAX)]
    NumberingExhausted { start: u64, count: usize },
}

/// Main error type for the sequencer.
#[derive(Error, Debug)]
pub enum SequencerError {
    /// Input or output preconditions failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No subcommand was given, or the arguments could not be used
    #[error("Missing or unknown command: {0}")]
    MissingCommand(String),

    /// Decoding, resizing or encoding an image failed
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Worker pool failure that is not tied to a single image
    #[error("Worker error: {0}")]
    Worker(String),

    /// Filesystem error while clearing, deleting or renaming
    #[error("IO error: {0}")]
    IO(String),
}

/// Convenience result type for sequencer operations.
pub type SequencerResult<T> = Result<T, SequencerError>;

impl SequencerError {
    pub fn conversion<T: Into<String>>(msg: T) -> Self {
        Self::Conversion(msg.into())
    }

    pub fn worker<T: Into<String>>(msg: T) -> Self {
        Self::Worker(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::IO(msg.into())
    }

    pub fn missing_command<T: Into<String>>(msg: T) -> Self {
        Self::MissingCommand(msg.into())
    }

    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(ValidationError::InputNotDirectory(_)) => 1,
            Self::Validation(ValidationError::OutputNotDirectory(_)) => 2,
            Self::Validation(ValidationError::NoImages) => 3,
            Self::MissingCommand(_) => 4,
            Self::Conversion(_) | Self::Worker(_) => 5,
            Self::IO(_) => 6,
            Self::Validation(
                ValidationError::UnsupportedFormat(_) | ValidationError::UndecodableSource(_),
            ) => 7,
            Self::Validation(ValidationError::NumberingExhausted { .. }) => 8,
        }
    }
}

impl ValidationError {
    pub fn input_not_directory(path: impl Into<PathBuf>) -> Self {
        Self::InputNotDirectory(path.into())
    }

    pub fn output_not_directory(path: impl Into<PathBuf>) -> Self {
        Self::OutputNotDirectory(path.into())
    }

    pub fn unsupported_format<T: Into<String>>(ext: T) -> Self {
        Self::UnsupportedFormat(ext.into())
    }

    pub fn undecodable_source(path: impl Into<PathBuf>) -> Self {
        Self::UndecodableSource(path.into())
    }
}

// Convert std::io::Error to SequencerError
impl From<io::Error> for SequencerError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ValidationError::input_not_directory("in").into(), 1)]
    #[case(ValidationError::output_not_directory("out").into(), 2)]
    #[case(ValidationError::NoImages.into(), 3)]
    #[case(SequencerError::missing_command("none"), 4)]
    #[case(SequencerError::conversion("bad pixels"), 5)]
    #[case(SequencerError::worker("panicked"), 5)]
    #[case(SequencerError::io("denied"), 6)]
    #[case(ValidationError::unsupported_format("gif").into(), 7)]
    #[case(ValidationError::undecodable_source("phone.heic").into(), 7)]
    #[case(ValidationError::NumberingExhausted { start: 4_294_967_295, count: 3 }.into(), 8)]
    fn test_exit_codes(#[case] error: SequencerError, #[case] expected: u8) {
        assert_eq!(error.exit_code(), expected);
    }

    #[test]
    fn test_messages_name_the_path() {
        let error: SequencerError = ValidationError::input_not_directory("/no/such/dir").into();
        assert_eq!(
            error.to_string(),
            "Input directory /no/such/dir does not exist or is not a directory."
        );
    }

    #[test]
    fn test_exhausted_numbering_names_the_limit() {
        let error = ValidationError::NumberingExhausted { start: 4_294_967_294, count: 3 };
        assert_eq!(
            error.to_string(),
            "Cannot number 3 images starting at 4294967294: the sequence would pass 4294967295."
        );
    }
}
