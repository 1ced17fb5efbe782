use tracing::{debug, instrument};

use crate::image_pipeline::bayer::types::{BayerColor, BayerSample, BayerSamples, SampleLayout, SAMPLE_MASK};
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::raw::types::{PixelFormat, RawFrame};

/// Decoder for 14-bit RGGB Bayer frames.
///
/// Decoding is a pure single pass over the borrowed frame: nothing is cached
/// and no reference to the input outlives the call.
#[derive(Debug, Clone, Copy, Default)]
pub struct BayerDecoder {
    layout: SampleLayout,
}

impl BayerDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(layout: SampleLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> SampleLayout {
        self.layout
    }

    /// Filter color at `(col, row)`.
    pub fn color_at(&self, col: usize, row: usize) -> BayerColor {
        BayerColor::at(col, row)
    }

    /// Checks the pixel format, then that the buffer holds exactly
    /// `width * height` samples.
    pub fn validate(&self, frame: &RawFrame<'_>) -> Result<()> {
        if frame.pixel_format != PixelFormat::BAYER14_RGGB {
            return Err(PipelineError::UnsupportedFormat(frame.pixel_format));
        }

        let mismatch = || PipelineError::DimensionMismatch {
            width: frame.width,
            height: frame.height,
            len: frame.data.len(),
        };
        let expected = frame.width.checked_mul(frame.height).ok_or_else(mismatch)?;
        if frame.data.len() != expected {
            return Err(mismatch());
        }

        Ok(())
    }

    /// Decodes a single sample.
    pub fn sample_at(&self, frame: &RawFrame<'_>, col: usize, row: usize) -> Result<BayerSample> {
        self.validate(frame)?;
        if col >= frame.width || row >= frame.height {
            return Err(PipelineError::OutOfBounds {
                col,
                row,
                width: frame.width,
                height: frame.height,
            });
        }

        let raw = frame.data[self.layout.index(col, row, frame.width, frame.height)];
        Ok(BayerSample {
            col,
            row,
            color: BayerColor::at(col, row),
            value: raw & SAMPLE_MASK,
        })
    }

    /// Decodes the whole frame into a row-major sample table.
    #[instrument(skip(self, frame), fields(width = frame.width, height = frame.height))]
    pub fn decode(&self, frame: &RawFrame<'_>) -> Result<BayerSamples> {
        self.validate(frame)?;

        let (width, height) = (frame.width, frame.height);
        let values: Vec<u16> = match self.layout {
            SampleLayout::RowMajor => frame.data.iter().map(|&raw| raw & SAMPLE_MASK).collect(),
            SampleLayout::ColumnMajor => {
                let mut values = Vec::with_capacity(width * height);
                for row in 0..height {
                    for col in 0..width {
                        values.push(frame.data[col * height + row] & SAMPLE_MASK);
                    }
                }
                values
            }
        };

        debug!("Decoded {} samples ({:?})", values.len(), self.layout);
        Ok(BayerSamples::from_row_major(width, height, values))
    }
}
