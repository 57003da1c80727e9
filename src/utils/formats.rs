use std::path::Path;
use std::str::FromStr;
use crate::utils::ValidationError;

/// Extension written for every numbered output file.
pub const OUTPUT_EXTENSION: &str = "webp";

/// Image formats accepted as conversion sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    PNG,
    JPEG,
    BMP,
    WebP,
    HEIC,
    HEIF,
    TIFF,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 7] = [
        Self::PNG,
        Self::JPEG,
        Self::BMP,
        Self::WebP,
        Self::HEIC,
        Self::HEIF,
        Self::TIFF,
    ];

    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            Self::PNG => &["png"],
            Self::JPEG => &["jpg", "jpeg"],
            Self::BMP => &["bmp"],
            Self::WebP => &["webp"],
            Self::HEIC => &["heic"],
            Self::HEIF => &["heif"],
            Self::TIFF => &["tiff"],
        }
    }
}

impl FromStr for SourceFormat {
    type Err = ValidationError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
            .ok_or_else(|| ValidationError::unsupported_format(ext))
    }
}

/// Get format from file extension
pub fn format_from_extension(path: impl AsRef<Path>) -> Option<SourceFormat> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|e| SourceFormat::from_str(e).ok())
}

/// Whether the file name carries one of the recognised image extensions.
pub fn is_source_image(path: impl AsRef<Path>) -> bool {
    format_from_extension(path).is_some()
}

/// File name of the output image numbered `number`.
pub fn output_file_name(number: u32) -> String {
    format!("{number}.{OUTPUT_EXTENSION}")
}

/// Parses `<N>.webp` back into `N`.
///
/// Only the canonical spelling counts: a positive integer with no sign and no
/// leading zeros, followed by the lowercase output extension.
pub fn parse_output_number(file_name: &str) -> Option<u32> {
    let stem = file_name.strip_suffix(OUTPUT_EXTENSION)?.strip_suffix('.')?;
    if stem.is_empty() || stem.starts_with('0') || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse::<u32>().ok()
}
