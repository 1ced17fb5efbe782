use tracing::{info, instrument};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    bayer::BayerDecoder,
    common::error::{PipelineError, Result},
    debayer::CpuDebayer,
    raw::{PackedFrameReader, RawFrameReader, RawLoaderReader},
    tiff::{ConversionConfig, StandardTiffWriter, TiffWriter},
};

pub struct RawToTiffPipeline<R: RawFrameReader, W: TiffWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl RawToTiffPipeline<RawLoaderReader, StandardTiffWriter> {
    /// Pipeline for RAW files on disk (DNG and other rawloader formats).
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: RawLoaderReader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl RawToTiffPipeline<PackedFrameReader, StandardTiffWriter> {
    /// Pipeline for bare sample buffers dumped from a capture pipeline.
    pub fn packed(reader: PackedFrameReader, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<R: RawFrameReader, W: TiffWriter> RawToTiffPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        info!("Starting RAW to TIFF conversion");

        let frame = {
            let _span = tracing::info_span!("read_frame").entered();
            self.reader.read_frame(input_data)?
        };

        let samples = {
            let decoder = BayerDecoder::with_layout(self.config.layout);
            let _span = tracing::info_span!("decode_bayer",
                format = %frame.pixel_format,
                layout = ?decoder.layout()
            ).entered();
            decoder.decode(&frame)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = samples.width,
                height = samples.height
            ).entered();
            self.validate_dimensions(samples.width, samples.height)?;
        }

        match self.config.demosaic {
            Some(method) => {
                let image = {
                    let debayer = CpuDebayer::new(method);
                    let _span = tracing::info_span!("demosaic", method = ?debayer.method()).entered();
                    debayer.process(&samples)?
                };
                let _span = tracing::info_span!("encode_tiff", channels = 3).entered();
                self.writer.write_rgb(&image, output, &self.config)?;
            }
            None => {
                let _span = tracing::info_span!("encode_tiff", channels = 1).entered();
                self.writer.write_mosaic(&samples, output, &self.config)?;
            }
        }

        info!(
            width = samples.width,
            height = samples.height,
            "Conversion complete"
        );
        Ok(())
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        // Output file is only created once encoding succeeded.
        let mut encoded = Vec::new();
        self.convert(&input_data, &mut encoded)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            std::fs::write(output_path, &encoded).map_err(|e| {
                PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok(())
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }
}
