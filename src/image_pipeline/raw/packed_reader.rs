//! Reader for uncompressed RAW buffers as handed over by a capture pipeline.
//!
//! Samples are little-endian 16-bit words. Rows may be padded to
//! `bytes_per_row`, in which case the padding is dropped.

use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::raw::reader::RawFrameReader;
use crate::image_pipeline::raw::types::{PixelFormat, RawFrame};

const BYTES_PER_SAMPLE: usize = 2;

#[derive(Debug, Clone)]
pub struct PackedFrameReader {
    pub width: usize,
    pub height: usize,
    pub pixel_format: PixelFormat,
    /// Row stride in bytes; `None` means rows are tightly packed
    pub bytes_per_row: Option<usize>,
}

impl PackedFrameReader {
    pub fn new(width: usize, height: usize, pixel_format: PixelFormat) -> Self {
        Self {
            width,
            height,
            pixel_format,
            bytes_per_row: None,
        }
    }

    pub fn with_bytes_per_row(mut self, bytes_per_row: usize) -> Self {
        self.bytes_per_row = Some(bytes_per_row);
        self
    }

    fn stride(&self) -> Result<usize> {
        let packed = self
            .width
            .checked_mul(BYTES_PER_SAMPLE)
            .ok_or(PipelineError::InvalidDimensions(self.width, self.height))?;
        match self.bytes_per_row {
            Some(stride) if stride < packed => {
                Err(PipelineError::InvalidDimensions(self.width, self.height))
            }
            Some(stride) => Ok(stride),
            None => Ok(packed),
        }
    }
}

impl RawFrameReader for PackedFrameReader {
    fn read_frame(&self, data: &[u8]) -> Result<RawFrame<'static>> {
        let stride = self.stride()?;
        let row_bytes = self.width * BYTES_PER_SAMPLE;
        debug!(
            "Reading packed frame {}x{}, stride {} bytes, {} bytes available",
            self.width,
            self.height,
            stride,
            data.len()
        );

        if self.width == 0 && self.height > 0 {
            return Err(PipelineError::InvalidDimensions(self.width, self.height));
        }

        // The last row may or may not carry its trailing padding.
        let (required, allowed) = match self.height {
            0 => (0, 0),
            h => (h - 1)
                .checked_mul(stride)
                .and_then(|padded| Some((padded.checked_add(row_bytes)?, padded.checked_add(stride)?)))
                .ok_or(PipelineError::InvalidDimensions(self.width, self.height))?,
        };
        if data.len() < required || data.len() > allowed {
            return Err(PipelineError::DimensionMismatch {
                width: self.width,
                height: self.height,
                len: data.len() / BYTES_PER_SAMPLE,
            });
        }

        let mut samples = Vec::with_capacity(self.width * self.height);
        for row in 0..self.height {
            let start = row * stride;
            samples.extend(
                data[start..start + row_bytes]
                    .chunks_exact(BYTES_PER_SAMPLE)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]])),
            );
        }

        Ok(RawFrame::new(self.width, self.height, self.pixel_format, samples))
    }
}
