// src/processing/native/resize.rs

//! Downscale-only resize bounding the longest edge.

use image::DynamicImage;
use image::imageops::FilterType;

/// Dimensions after fitting `(width, height)` inside a `max` x `max` box.
///
/// Returns `None` when the image already fits, since images are never enlarged.
pub fn target_dimensions(width: u32, height: u32, max: u32) -> Option<(u32, u32)> {
    if max == 0 || (width <= max && height <= max) {
        return None;
    }

    let longest = width.max(height) as u64;
    let scale = |edge: u32| -> u32 {
        let scaled = (edge as u64 * max as u64 + longest / 2) / longest;
        (scaled as u32).max(1)
    };
    Some((scale(width), scale(height)))
}

/// Shrinks `image` so neither edge exceeds `max_dimension`, keeping aspect ratio.
///
/// Returns the original image unchanged when it already fits.
pub fn apply_resize(image: DynamicImage, max_dimension: u32) -> DynamicImage {
    match target_dimensions(image.width(), image.height(), max_dimension) {
        Some((width, height)) => image.resize_exact(width, height, FilterType::Lanczos3),
        None => image,
    }
}
