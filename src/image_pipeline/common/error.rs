use thiserror::Error;

use crate::image_pipeline::raw::types::PixelFormat;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Unsupported pixel format: {0}")]
    UnsupportedFormat(PixelFormat),

    #[error("Sample count {len} does not match dimensions {width}x{height}")]
    DimensionMismatch { width: usize, height: usize, len: usize },

    #[error("Coordinate ({col}, {row}) is outside a {width}x{height} frame")]
    OutOfBounds {
        col: usize,
        row: usize,
        width: usize,
        height: usize,
    },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode RAW image: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
