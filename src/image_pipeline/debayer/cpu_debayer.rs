//! Single-threaded RGGB demosaicing.
//!
//! Border pixels use a smaller neighborhood: only in-bounds neighbors of the
//! wanted color take part in an average. Averages round half up. A pixel's own
//! channel is always its decoded sample.

use tracing::{debug, instrument};

use crate::image_pipeline::bayer::{BayerColor, BayerDecoder, BayerSamples, FrameProcessor};
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::debayer::types::{DemosaicMethod, RgbImageData};
use crate::image_pipeline::raw::types::RawFrame;

/// Bits carried by every decoded channel value.
const DECODED_BITS: u32 = 14;

const CROSS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(isize, isize); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
const HORIZONTAL: [(isize, isize); 2] = [(-1, 0), (1, 0)];
const VERTICAL: [(isize, isize); 2] = [(0, -1), (0, 1)];

#[derive(Debug, Clone, Copy, Default)]
pub struct CpuDebayer {
    decoder: BayerDecoder,
    method: DemosaicMethod,
}

impl CpuDebayer {
    pub fn new(method: DemosaicMethod) -> Self {
        Self {
            decoder: BayerDecoder::new(),
            method,
        }
    }

    /// Uses `decoder` when processing frames directly.
    pub fn with_decoder(decoder: BayerDecoder, method: DemosaicMethod) -> Self {
        Self { decoder, method }
    }

    pub fn method(&self) -> DemosaicMethod {
        self.method
    }

    #[instrument(skip(self, samples), fields(width = samples.width, height = samples.height))]
    pub fn process(&self, samples: &BayerSamples) -> Result<RgbImageData> {
        let (width, height) = (samples.width, samples.height);
        // Every pixel needs a full RGGB tile within reach.
        if width < 2 || height < 2 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }
        debug!("Demosaicing {}x{} with {:?}", width, height, self.method);

        let mut data = Vec::with_capacity(width * height * 3);
        for row in 0..height {
            for col in 0..width {
                let rgb = match self.method {
                    DemosaicMethod::Nearest => nearest(samples, col, row),
                    DemosaicMethod::Bilinear => bilinear(samples, col, row),
                };
                data.extend_from_slice(&rgb);
            }
        }

        Ok(RgbImageData {
            width,
            height,
            data,
            bits_per_sample: DECODED_BITS,
        })
    }
}

impl FrameProcessor for CpuDebayer {
    type Output = RgbImageData;

    fn process_frame(&self, frame: &RawFrame<'_>) -> Result<RgbImageData> {
        let samples = self.decoder.decode(frame)?;
        self.process(&samples)
    }
}

/// Mean of the in-bounds neighbors at `offsets`, rounded half up.
fn average(samples: &BayerSamples, col: usize, row: usize, offsets: &[(isize, isize)]) -> u16 {
    let mut sum = 0u32;
    let mut count = 0u32;
    for &(dc, dr) in offsets {
        let (Some(c), Some(r)) = (col.checked_add_signed(dc), row.checked_add_signed(dr)) else {
            continue;
        };
        if c < samples.width && r < samples.height {
            sum += u32::from(samples.value(c, r));
            count += 1;
        }
    }
    // Frames are at least 2x2, so each offset set has an in-bounds member.
    debug_assert!(count > 0);
    ((sum + count / 2) / count.max(1)) as u16
}

fn bilinear(samples: &BayerSamples, col: usize, row: usize) -> [u16; 3] {
    let own = samples.value(col, row);
    match BayerColor::at(col, row) {
        BayerColor::Red => [
            own,
            average(samples, col, row, &CROSS),
            average(samples, col, row, &DIAGONAL),
        ],
        BayerColor::Blue => [
            average(samples, col, row, &DIAGONAL),
            average(samples, col, row, &CROSS),
            own,
        ],
        // Green on a red row: red left/right, blue above/below.
        BayerColor::Green if row % 2 == 0 => [
            average(samples, col, row, &HORIZONTAL),
            own,
            average(samples, col, row, &VERTICAL),
        ],
        BayerColor::Green => [
            average(samples, col, row, &VERTICAL),
            own,
            average(samples, col, row, &HORIZONTAL),
        ],
    }
}

/// Top-left corner of the even-aligned tile covering `pos`, moved back one
/// tile when it would hang past a trailing odd edge.
fn tile_origin(pos: usize, len: usize) -> usize {
    let origin = pos & !1;
    if origin + 1 >= len { origin - 2 } else { origin }
}

fn nearest(samples: &BayerSamples, col: usize, row: usize) -> [u16; 3] {
    let tc = tile_origin(col, samples.width);
    let tr = tile_origin(row, samples.height);
    let mut rgb = [
        samples.value(tc, tr),
        samples.value(tc + 1, tr),
        samples.value(tc + 1, tr + 1),
    ];
    let color = BayerColor::at(col, row);
    rgb[color.channel_index()] = samples.value(col, row);
    rgb
}
