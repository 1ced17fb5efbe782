use std::io::Write;

use crate::image_pipeline::bayer::types::BayerSamples;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::debayer::types::RgbImageData;
use crate::image_pipeline::tiff::types::ConversionConfig;

pub trait TiffWriter {
    /// Writes the single-channel mosaic as a 16-bit grayscale image.
    fn write_mosaic(&self, samples: &BayerSamples, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
    /// Writes a demosaiced image as 16-bit RGB.
    fn write_rgb(&self, image: &RgbImageData, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}
