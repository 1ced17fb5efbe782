use std::borrow::Cow;
use std::io::{Cursor, Write};

use tiff::encoder::colortype::{ColorType, Gray16, RGB16};
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder};
use tiff::tags::Predictor;
use tracing::debug;

use crate::image_pipeline::bayer::types::BayerSamples;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::debayer::types::RgbImageData;
use crate::image_pipeline::tiff::types::{ConversionConfig, TiffCompression};
use crate::image_pipeline::tiff::writer::TiffWriter;

/// Left shift taking a 14-bit value to the 16-bit range.
const SCALE_14_TO_16: u32 = 2;

pub struct StandardTiffWriter;

impl StandardTiffWriter {
    fn scaled<'a>(data: &'a [u16], config: &ConversionConfig) -> Cow<'a, [u16]> {
        if config.scale_to_16bit {
            Cow::Owned(data.iter().map(|&v| v << SCALE_14_TO_16).collect())
        } else {
            Cow::Borrowed(data)
        }
    }

    fn encode<C>(
        width: usize,
        height: usize,
        data: &[u16],
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()>
    where
        C: ColorType<Inner = u16>,
    {
        debug!("Encoding TIFF image: {}x{}", width, height);

        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return Err(PipelineError::InvalidDimensions(width, height)),
        };

        // The encoder needs Seek, so encode into memory first.
        let mut buffer = Vec::new();
        {
            let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
                .map_err(|e| PipelineError::EncodeError(e.to_string()))?
                .with_compression(compression);

            if let Some(predictor_val) = config.predictor {
                let predictor = match predictor_val {
                    2 => Predictor::Horizontal,
                    _ => Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }

            encoder
                .write_image::<C>(w, h, data)
                .map_err(|e| PipelineError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

impl TiffWriter for StandardTiffWriter {
    fn write_mosaic(&self, samples: &BayerSamples, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        let data = Self::scaled(samples.values(), config);
        Self::encode::<Gray16>(samples.width, samples.height, &data, output, config)
    }

    fn write_rgb(&self, image: &RgbImageData, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        let data = Self::scaled(&image.data, config);
        Self::encode::<RGB16>(image.width, image.height, &data, output, config)
    }
}
