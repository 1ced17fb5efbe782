//! Bayer decoding module
//!
//! Turns 14-bit RGGB frames into color-tagged samples.

mod decoder;
mod processor;
pub mod types;


pub use decoder::BayerDecoder;
pub use processor::FrameProcessor;
pub use types::{BayerColor, BayerSample, BayerSamples, DecodedPixel, SampleLayout, MAX_SAMPLE_VALUE, SAMPLE_MASK};
