//! RAW frame reader backed by the rawloader library.
//!
//! A RAW photo saved to disk ends up as a DNG (or a vendor RAW file); rawloader
//! decodes the container and hands back the sensor mosaic, which is turned
//! into a [`RawFrame`] here. Only single-component mosaics are accepted.

use std::io::Cursor;

use rawloader::RawImageData as RawloaderImageData;
use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::raw::reader::RawFrameReader;
use crate::image_pipeline::raw::types::{CfaPattern, PixelFormat, RawFrame};

/// RAW frame reader that uses the rawloader library for decoding.
pub struct RawLoaderReader;

/// Largest white level that still fits a 14-bit sample.
const MAX_14BIT_WHITE_LEVEL: u16 = 0x3FFF;

impl RawLoaderReader {
    /// Picks the frame format from the CFA layout and the sensor white level.
    fn pixel_format(cfa: &rawloader::CFA, whitelevels: &[u16]) -> Result<PixelFormat> {
        let indices = [
            cfa.color_at(0, 0),
            cfa.color_at(0, 1),
            cfa.color_at(1, 0),
            cfa.color_at(1, 1),
        ];
        let pattern = CfaPattern::from_indices(indices).ok_or_else(|| {
            PipelineError::DecodeError(format!("unsupported CFA layout {:?}", indices))
        })?;

        Ok(Self::format_for_white_level(pattern, whitelevels))
    }

    fn format_for_white_level(pattern: CfaPattern, whitelevels: &[u16]) -> PixelFormat {
        let max_white_level = whitelevels.iter().max().copied().unwrap_or(u16::MAX);
        if max_white_level <= MAX_14BIT_WHITE_LEVEL {
            PixelFormat::Bayer14(pattern)
        } else {
            PixelFormat::Bayer16(pattern)
        }
    }
}

impl RawFrameReader for RawLoaderReader {
    fn read_frame(&self, data: &[u8]) -> Result<RawFrame<'static>> {
        debug!("Decoding RAW file, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;

        if decoded.cpp != 1 {
            return Err(PipelineError::DecodeError(format!(
                "expected a single-component mosaic, got {} components per pixel",
                decoded.cpp
            )));
        }

        let pixel_format = Self::pixel_format(&decoded.cfa, &decoded.whitelevels)?;
        debug!(
            "Decoded mosaic: {}x{}, format {}",
            decoded.width, decoded.height, pixel_format
        );

        // Float mosaics are normalized 0.0-1.0; rescale into the sensor range.
        let data: Vec<u16> = match decoded.data {
            RawloaderImageData::Integer(values) => values,
            RawloaderImageData::Float(values) => {
                let scale = match pixel_format {
                    PixelFormat::Bayer14(_) => f32::from(MAX_14BIT_WHITE_LEVEL),
                    _ => f32::from(u16::MAX),
                };
                values
                    .iter()
                    .map(|&v| (v.clamp(0.0, 1.0) * scale) as u16)
                    .collect()
            }
        };

        Ok(RawFrame::new(decoded.width, decoded.height, pixel_format, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_garbage() {
        let result = RawLoaderReader.read_frame(b"definitely not a raw file");
        assert!(matches!(result.unwrap_err(), PipelineError::DecodeError(_)));
    }

    #[test]
    fn test_format_from_white_level() {
        assert_eq!(
            RawLoaderReader::format_for_white_level(CfaPattern::Rggb, &[16383, 16383, 16383, 16383]),
            PixelFormat::BAYER14_RGGB
        );
        assert_eq!(
            RawLoaderReader::format_for_white_level(CfaPattern::Rggb, &[4095, 4095, 4095, 4095]),
            PixelFormat::BAYER14_RGGB
        );
        assert_eq!(
            RawLoaderReader::format_for_white_level(CfaPattern::Bggr, &[65535, 0, 0, 0]),
            PixelFormat::Bayer16(CfaPattern::Bggr)
        );
    }
}
