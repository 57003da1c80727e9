//! Core types for conversion settings and results.

use std::path::PathBuf;

/// Longest edge, in pixels, of every output image.
pub const DEFAULT_MAX_DIMENSION: u32 = 1000;

/// Configuration settings for image conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSettings {
    /// Images whose longest edge exceeds this are scaled down to it.
    /// Smaller images are never enlarged.
    pub max_dimension: u32,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

/// Result of converting one source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// Number assigned to the image
    pub number: u32,
    /// Path to the original input file
    pub source_path: PathBuf,
    /// Path of the written `<N>.webp`
    pub output_path: PathBuf,
    /// Original file size in bytes
    pub original_size: u64,
    /// Output file size in bytes
    pub output_size: u64,
}
