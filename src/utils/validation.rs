use std::path::Path;
use crate::utils::ValidationError;

/// Validates that the output path is an existing directory
pub fn validate_output_dir(path: &Path) -> Result<(), ValidationError> {
    if !path.is_dir() {
        return Err(ValidationError::output_not_directory(path));
    }
    Ok(())
}

/// Validates that the input path exists and is a directory
pub fn validate_input_dir(path: &Path) -> Result<(), ValidationError> {
    if !path.exists() || !path.is_dir() {
        return Err(ValidationError::input_not_directory(path));
    }
    Ok(())
}
