//! Pipeline conversions module
//!
//! This module contains orchestration logic for RAW frame exports.

mod raw_to_tiff;

#[cfg(test)]
mod tests;

pub use raw_to_tiff::RawToTiffPipeline;
