// src/processing/native/formats.rs

//! WebP encoding of the processed image.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use image::DynamicImage;
use image::codecs::webp::WebPEncoder;
use tracing::warn;
use crate::utils::{SequencerError, SequencerResult};

/// Normalises the pixel layout to one the WebP encoder accepts.
///
/// Images with an alpha channel become RGBA8, everything else RGB8. Higher bit
/// depths and float buffers are narrowed to 8 bits per channel.
fn to_webp_layout(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image,
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

/// Encodes `image` as WebP and writes it to `output_path`.
///
/// A failed write removes the partial file so it is never taken for a
/// numbered output.
pub fn save_as_webp(image: DynamicImage, output_path: &Path) -> SequencerResult<()> {
    let image = to_webp_layout(image);

    let file = File::create(output_path).map_err(|e| SequencerError::io(format!(
        "Cannot create '{}': {e}", output_path.display()
    )))?;

    write_webp(&image, file, output_path).inspect_err(|_| {
        if let Err(e) = std::fs::remove_file(output_path) {
            warn!("Could not remove partial '{}': {e}", output_path.display());
        }
    })
}

fn write_webp(image: &DynamicImage, file: File, output_path: &Path) -> SequencerResult<()> {
    let mut writer = BufWriter::new(file);

    image
        .write_with_encoder(WebPEncoder::new_lossless(&mut writer))
        .map_err(|e| SequencerError::conversion(format!(
            "WebP encode of '{}' failed: {e}", output_path.display()
        )))?;

    std::io::Write::flush(&mut writer).map_err(|e| SequencerError::io(format!(
        "Cannot write '{}': {e}", output_path.display()
    )))
}
