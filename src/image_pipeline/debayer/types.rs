//! Types for debayering operations

use crate::image_pipeline::bayer::types::DecodedPixel;
use crate::image_pipeline::common::error::{PipelineError, Result};

/// Interpolation used to fill in the two missing channels of each pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemosaicMethod {
    /// Copy missing channels from the pixel's 2x2 tile
    Nearest,
    /// Average same-color neighbors (cross, diagonal, or axis pair)
    #[default]
    Bilinear,
}

/// RGB image data after debayering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// RGB pixel data interleaved [R, G, B, R, G, B, ...]
    pub data: Vec<u16>,
    /// Significant bits per channel value (14 straight out of the decoder)
    pub bits_per_sample: u32,
}

impl RgbImageData {
    pub fn pixel(&self, col: usize, row: usize) -> Result<DecodedPixel> {
        if col >= self.width || row >= self.height {
            return Err(PipelineError::OutOfBounds {
                col,
                row,
                width: self.width,
                height: self.height,
            });
        }
        let idx = (row * self.width + col) * 3;
        Ok(DecodedPixel {
            r: self.data[idx],
            g: self.data[idx + 1],
            b: self.data[idx + 2],
        })
    }

    pub fn pixels(&self) -> impl Iterator<Item = DecodedPixel> + '_ {
        self.data.chunks_exact(3).map(|px| DecodedPixel {
            r: px[0],
            g: px[1],
            b: px[2],
        })
    }
}
