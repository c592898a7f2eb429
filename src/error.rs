use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Missing required setting '{field}' (pass it on the command line or in the config file)")]
    MissingConfig { field: &'static str },

    #[error("Invalid value '{value}' for setting '{field}'")]
    InvalidConfig { field: &'static str, value: String },

    #[error("Source image not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error(
        "Image '{path}' is {actual_w}x{actual_h}, expected the configured tile size {expected_w}x{expected_h}"
    )]
    DimensionMismatch {
        path: PathBuf,
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },

    #[error(
        "Computed image id {image_id} for prefix '{prefix}' (frame {frame}, tile index {tile_index}) is negative"
    )]
    InvalidIndex {
        prefix: String,
        frame: u32,
        tile_index: u32,
        image_id: i64,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
