//! Types produced by Bayer decoding

use crate::image_pipeline::common::error::{PipelineError, Result};

/// Mask selecting the 14 data bits of a sample word.
pub const SAMPLE_MASK: u16 = 0x3FFF;

/// Largest value a decoded sample can take.
pub const MAX_SAMPLE_VALUE: u16 = SAMPLE_MASK;

/// Color filter covering a single sensor pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BayerColor {
    Red,
    Green,
    Blue,
}

impl BayerColor {
    /// RGGB parity rule.
    pub fn at(col: usize, row: usize) -> Self {
        match (col & 1, row & 1) {
            (0, 0) => BayerColor::Red,
            (1, 1) => BayerColor::Blue,
            _ => BayerColor::Green,
        }
    }

    /// Offset of this color inside an interleaved RGB pixel.
    pub fn channel_index(&self) -> usize {
        match self {
            BayerColor::Red => 0,
            BayerColor::Green => 1,
            BayerColor::Blue => 2,
        }
    }
}

/// Order of samples inside a frame's data buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleLayout {
    /// `index = row * width + col`
    #[default]
    RowMajor,
    /// `index = col * height + row`
    ColumnMajor,
}

impl SampleLayout {
    pub fn index(&self, col: usize, row: usize, width: usize, height: usize) -> usize {
        match self {
            SampleLayout::RowMajor => row * width + col,
            SampleLayout::ColumnMajor => col * height + row,
        }
    }
}

/// A single decoded sensor sample tagged with its filter color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BayerSample {
    pub col: usize,
    pub row: usize,
    pub color: BayerColor,
    /// Right-justified 14-bit value
    pub value: u16,
}

/// Decoded single-channel samples for a whole frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BayerSamples {
    /// Width of the mosaic in pixels
    pub width: usize,
    /// Height of the mosaic in pixels
    pub height: usize,
    values: Vec<u16>,
}

impl BayerSamples {
    /// `values` must be row-major and already masked.
    pub(crate) fn from_row_major(width: usize, height: usize, values: Vec<u16>) -> Self {
        debug_assert_eq!(values.len(), width * height);
        Self { width, height, values }
    }

    pub fn get(&self, col: usize, row: usize) -> Result<BayerSample> {
        if col >= self.width || row >= self.height {
            return Err(PipelineError::OutOfBounds {
                col,
                row,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.sample(col, row))
    }

    /// Unchecked lookup for callers that already iterate in bounds.
    #[inline]
    pub(crate) fn value(&self, col: usize, row: usize) -> u16 {
        self.values[row * self.width + col]
    }

    fn sample(&self, col: usize, row: usize) -> BayerSample {
        BayerSample {
            col,
            row,
            color: BayerColor::at(col, row),
            value: self.value(col, row),
        }
    }

    /// All samples in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = BayerSample> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| self.sample(col, row)))
    }

    /// Samples of one filter color, row-major.
    pub fn channel(&self, color: BayerColor) -> impl Iterator<Item = BayerSample> + '_ {
        self.iter().filter(move |s| s.color == color)
    }

    /// Masked values in row-major order.
    pub fn values(&self) -> &[u16] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A demosaiced pixel, each channel in `[0, 16383]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodedPixel {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}
