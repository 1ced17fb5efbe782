use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::types::RawFrame;

pub trait RawFrameReader {
    fn read_frame(&self, data: &[u8]) -> Result<RawFrame<'static>>;
}
