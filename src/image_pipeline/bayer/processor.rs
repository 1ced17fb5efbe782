use crate::image_pipeline::bayer::decoder::BayerDecoder;
use crate::image_pipeline::bayer::types::BayerSamples;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::types::RawFrame;

/// Entry point a capture pipeline calls once a frame is ready.
///
/// Implementations run synchronously on the caller's thread and must not keep
/// the frame past return.
pub trait FrameProcessor {
    type Output;

    fn process_frame(&self, frame: &RawFrame<'_>) -> Result<Self::Output>;
}

impl FrameProcessor for BayerDecoder {
    type Output = BayerSamples;

    fn process_frame(&self, frame: &RawFrame<'_>) -> Result<BayerSamples> {
        self.decode(frame)
    }
}
