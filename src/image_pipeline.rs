//! Image processing pipeline module
//!
//! Decoding of 14-bit RGGB RAW frames, demosaicing, and the ingest/export
//! adapters around them. The decoding core performs no I/O.

pub mod raw;
pub mod bayer;
pub mod debayer;
pub mod tiff;
pub mod conversions;
pub mod common;

pub use common::{
    PipelineError,
    Result,
};

pub use raw::{
    CfaPattern,
    PixelFormat,
    RawFrame,
    RawFrameReader,
    PackedFrameReader,
    RawLoaderReader,
};

pub use bayer::{
    BayerColor,
    BayerDecoder,
    BayerSample,
    BayerSamples,
    DecodedPixel,
    FrameProcessor,
    SampleLayout,
};

pub use debayer::{
    CpuDebayer,
    DemosaicMethod,
    RgbImageData,
};

pub use self::tiff::{
    TiffCompression,
    ConversionConfig,
    ConversionConfigBuilder,
    TiffWriter,
    StandardTiffWriter,
};

pub use conversions::{
    RawToTiffPipeline,
};
