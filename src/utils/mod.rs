pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{SequencerError, SequencerResult, ValidationError};
pub use validation::{validate_input_dir, validate_output_dir};
pub use formats::{
    OUTPUT_EXTENSION,
    SourceFormat,
    format_from_extension,
    is_source_image,
    output_file_name,
    parse_output_number,
};
pub use fs::{
    FsOutputStore,
    OutputFile,
    OutputStore,
    file_size,
    filter_sources,
    scan_sources,
};
