// src/processing/native/executor.rs

//! Converter backed by the `image` crate.
//!
//! Each call is fully synchronous; the worker pool runs it inside
//! `tokio::task::spawn_blocking` so the async runtime is never blocked.

use image::{DynamicImage, ImageDecoder, ImageReader};
use tracing::{debug, info};

use crate::core::{ConversionResult, ConversionTask, ConvertSettings};
use crate::processing::ImageConverter;
use crate::utils::{SequencerError, SequencerResult, SourceFormat, file_size};

use super::formats::save_as_webp;
use super::resize::apply_resize;

/// Auto-orient, bound the longest edge, and re-encode as WebP.
#[derive(Debug, Clone, Default)]
pub struct NativeConverter {
    settings: ConvertSettings,
}

impl NativeConverter {
    pub fn new(settings: ConvertSettings) -> Self {
        Self { settings }
    }
}

impl ImageConverter for NativeConverter {
    /// The `image` crate ships no HEIF decoder.
    fn supports(&self, format: SourceFormat) -> bool {
        !matches!(format, SourceFormat::HEIC | SourceFormat::HEIF)
    }

    fn convert(&self, task: &ConversionTask) -> SequencerResult<ConversionResult> {
        info!("Processing {}...", task.source_name());

        let original_size = std::fs::metadata(&task.source_path)
            .map(|m| m.len())
            .map_err(|e| SequencerError::conversion(format!(
                "Cannot read '{}': {e}", task.source_path.display()
            )))?;

        let image = load_oriented(task)?;
        debug!(
            "Loaded '{}': {}×{}",
            task.source_name(),
            image.width(),
            image.height()
        );

        let image = apply_resize(image, self.settings.max_dimension);
        save_as_webp(image, &task.output_path)?;

        info!("\t- Saved to {}", task.output_path.display());

        Ok(ConversionResult {
            number: task.number,
            source_path: task.source_path.clone(),
            output_path: task.output_path.clone(),
            original_size,
            output_size: file_size(&task.output_path),
        })
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────────────

/// Decodes the source and rotates/flips it according to its EXIF orientation.
fn load_oriented(task: &ConversionTask) -> SequencerResult<DynamicImage> {
    let describe = |e: &dyn std::fmt::Display| {
        SequencerError::conversion(format!("Failed to load '{}': {e}", task.source_path.display()))
    };

    let reader = ImageReader::open(&task.source_path)
        .map_err(|e| describe(&e))?
        .with_guessed_format()
        .map_err(|e| describe(&e))?;
    let mut decoder = reader.into_decoder().map_err(|e| describe(&e))?;
    let orientation = decoder.orientation().map_err(|e| describe(&e))?;

    let mut image = DynamicImage::from_decoder(decoder).map_err(|e| describe(&e))?;
    image.apply_orientation(orientation);
    Ok(image)
}
