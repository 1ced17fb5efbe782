//! RAW frame ingest module
//!
//! This module turns captured sensor buffers and RAW files into [`RawFrame`]s.

mod reader;
mod packed_reader;
mod rawloader_reader;
pub mod types;

pub use reader::RawFrameReader;
pub use packed_reader::PackedFrameReader;
pub use rawloader_reader::RawLoaderReader;
pub use types::{CfaPattern, PixelFormat, RawFrame};
