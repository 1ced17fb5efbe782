//! Conversion configuration types

use crate::image_pipeline::bayer::types::SampleLayout;
use crate::image_pipeline::debayer::types::DemosaicMethod;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced
    DeflateBalanced,
}

/// Configuration for RAW frame to TIFF conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Compression method to use
    pub compression: TiffCompression,
    /// Predictor value for compression (2 for horizontal differencing)
    pub predictor: Option<u16>,
    /// Order of samples in the incoming buffer
    pub layout: SampleLayout,
    /// Demosaic to RGB with this method, or write the grayscale mosaic when `None`
    pub demosaic: Option<DemosaicMethod>,
    /// Shift 14-bit values up to span the full 16-bit range
    pub scale_to_16bit: bool,
    /// Whether to reject empty frames before encoding
    pub validate_dimensions: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
            predictor: None,
            layout: SampleLayout::RowMajor,
            demosaic: None,
            scale_to_16bit: false,
            validate_dimensions: true,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    layout: Option<SampleLayout>,
    demosaic: Option<Option<DemosaicMethod>>,
    scale_to_16bit: Option<bool>,
    validate_dimensions: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn layout(mut self, layout: SampleLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn demosaic(mut self, method: Option<DemosaicMethod>) -> Self {
        self.demosaic = Some(method);
        self
    }

    pub fn scale_to_16bit(mut self, enable: bool) -> Self {
        self.scale_to_16bit = Some(enable);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            layout: self.layout.unwrap_or(default.layout),
            demosaic: self.demosaic.unwrap_or(default.demosaic),
            scale_to_16bit: self.scale_to_16bit.unwrap_or(default.scale_to_16bit),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
        }
    }
}
