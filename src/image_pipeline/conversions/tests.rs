#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};
    use std::sync::{Arc, Mutex};

    use crate::image_pipeline::bayer::{BayerSamples, SampleLayout};
    use crate::image_pipeline::common::error::{PipelineError, Result};
    use crate::image_pipeline::conversions::RawToTiffPipeline;
    use crate::image_pipeline::debayer::{DemosaicMethod, RgbImageData};
    use crate::image_pipeline::raw::{PackedFrameReader, PixelFormat, RawFrame, RawFrameReader};
    use crate::image_pipeline::tiff::{ConversionConfig, TiffCompression, TiffWriter};

    #[derive(Debug, Clone)]
    enum Written {
        Mosaic(BayerSamples),
        Rgb(RgbImageData),
    }

    struct MockReader {
        should_fail: bool,
        mock_frame: Option<RawFrame<'static>>,
    }

    impl RawFrameReader for MockReader {
        fn read_frame(&self, _data: &[u8]) -> Result<RawFrame<'static>> {
            if self.should_fail {
                return Err(PipelineError::DecodeError("Mock decode error".to_string()));
            }
            Ok(self.mock_frame.clone().unwrap_or_else(|| {
                RawFrame::new(4, 4, PixelFormat::BAYER14_RGGB, (0..16).collect())
            }))
        }
    }

    struct MockWriter {
        should_fail: bool,
        written: Arc<Mutex<Vec<Written>>>,
    }

    impl MockWriter {
        fn record(&self, entry: Written) -> Result<()> {
            if self.should_fail {
                return Err(PipelineError::EncodeError("Mock encode error".to_string()));
            }
            self.written.lock().unwrap().push(entry);
            Ok(())
        }
    }

    impl TiffWriter for MockWriter {
        fn write_mosaic(&self, samples: &BayerSamples, _output: &mut dyn Write, _config: &ConversionConfig) -> Result<()> {
            self.record(Written::Mosaic(samples.clone()))
        }

        fn write_rgb(&self, image: &RgbImageData, _output: &mut dyn Write, _config: &ConversionConfig) -> Result<()> {
            self.record(Written::Rgb(image.clone()))
        }
    }

    fn mock_pipeline(
        reader: MockReader,
        writer_fails: bool,
        config: ConversionConfig,
    ) -> (RawToTiffPipeline<MockReader, MockWriter>, Arc<Mutex<Vec<Written>>>) {
        let written = Arc::new(Mutex::new(Vec::new()));
        let writer = MockWriter { should_fail: writer_fails, written: written.clone() };
        (RawToTiffPipeline::with_custom(reader, writer, config), written)
    }

    fn le_bytes(values: &[u16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_config_builder() {
        let config = ConversionConfig::builder()
            .compression(TiffCompression::DeflateBest)
            .predictor(Some(2))
            .layout(SampleLayout::ColumnMajor)
            .demosaic(Some(DemosaicMethod::Nearest))
            .scale_to_16bit(true)
            .validate_dimensions(false)
            .build();

        assert_eq!(config.compression, TiffCompression::DeflateBest);
        assert_eq!(config.predictor, Some(2));
        assert_eq!(config.layout, SampleLayout::ColumnMajor);
        assert_eq!(config.demosaic, Some(DemosaicMethod::Nearest));
        assert!(config.scale_to_16bit);
        assert!(!config.validate_dimensions);
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = ConversionConfig::builder().build();

        assert_eq!(config.compression, TiffCompression::None);
        assert_eq!(config.predictor, None);
        assert_eq!(config.layout, SampleLayout::RowMajor);
        assert_eq!(config.demosaic, None);
        assert!(!config.scale_to_16bit);
        assert!(config.validate_dimensions);
    }

    #[test]
    fn test_mosaic_conversion() {
        let reader = MockReader { should_fail: false, mock_frame: None };
        let (pipeline, written) = mock_pipeline(reader, false, ConversionConfig::default());

        let mut output = Cursor::new(Vec::new());
        pipeline.convert(b"fake raw data", &mut output).unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        match &written[0] {
            Written::Mosaic(samples) => assert_eq!(samples.values(), (0..16).collect::<Vec<u16>>().as_slice()),
            other => panic!("expected mosaic, got {:?}", other),
        }
    }

    #[test]
    fn test_demosaic_conversion() {
        let reader = MockReader { should_fail: false, mock_frame: None };
        let config = ConversionConfig::builder().demosaic(Some(DemosaicMethod::Bilinear)).build();
        let (pipeline, written) = mock_pipeline(reader, false, config);

        pipeline.convert(b"fake raw data", &mut Cursor::new(Vec::new())).unwrap();

        let written = written.lock().unwrap();
        match &written[0] {
            Written::Rgb(image) => {
                assert_eq!((image.width, image.height), (4, 4));
                assert_eq!(image.data.len(), 4 * 4 * 3);
            }
            other => panic!("expected rgb, got {:?}", other),
        }
    }

    #[test]
    fn test_reader_failure() {
        let reader = MockReader { should_fail: true, mock_frame: None };
        let (pipeline, written) = mock_pipeline(reader, false, ConversionConfig::default());

        let result = pipeline.convert(b"fake raw data", &mut Cursor::new(Vec::new()));

        assert!(matches!(result.unwrap_err(), PipelineError::DecodeError(_)));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_writer_failure() {
        let reader = MockReader { should_fail: false, mock_frame: None };
        let (pipeline, _) = mock_pipeline(reader, true, ConversionConfig::default());

        let result = pipeline.convert(b"fake raw data", &mut Cursor::new(Vec::new()));

        assert!(matches!(result.unwrap_err(), PipelineError::EncodeError(_)));
    }

    #[test]
    fn test_unsupported_format_is_reported() {
        let frame = RawFrame::new(2, 2, PixelFormat::Other(u32::from_be_bytes(*b"BGRA")), vec![0; 4]);
        let reader = MockReader { should_fail: false, mock_frame: Some(frame) };
        let (pipeline, written) = mock_pipeline(reader, false, ConversionConfig::default());

        let result = pipeline.convert(b"fake raw data", &mut Cursor::new(Vec::new()));

        assert!(matches!(result.unwrap_err(), PipelineError::UnsupportedFormat(_)));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_dimension_validation_failure() {
        let frame = RawFrame::new(0, 0, PixelFormat::BAYER14_RGGB, Vec::new());
        let reader = MockReader { should_fail: false, mock_frame: Some(frame) };
        let (pipeline, _) = mock_pipeline(reader, false, ConversionConfig::default());

        let result = pipeline.convert(b"fake raw data", &mut Cursor::new(Vec::new()));

        assert!(matches!(result.unwrap_err(), PipelineError::InvalidDimensions(0, 0)));
    }

    #[test]
    fn test_dimension_validation_disabled() {
        let frame = RawFrame::new(0, 0, PixelFormat::BAYER14_RGGB, Vec::new());
        let reader = MockReader { should_fail: false, mock_frame: Some(frame) };
        let config = ConversionConfig::builder().validate_dimensions(false).build();
        let (pipeline, written) = mock_pipeline(reader, false, config);

        pipeline.convert(b"fake raw data", &mut Cursor::new(Vec::new())).unwrap();

        assert_eq!(written.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_mosaic_tiff_round_trip() {
        let samples: Vec<u16> = vec![0x0001, 0x0002, 0xC003, 0x3FFF, 0x0100, 0x0200];
        let reader = PackedFrameReader::new(3, 2, PixelFormat::BAYER14_RGGB);
        let pipeline = RawToTiffPipeline::packed(reader, ConversionConfig::default());

        let mut output = Cursor::new(Vec::new());
        pipeline.convert(&le_bytes(&samples), &mut output).unwrap();

        output.set_position(0);
        let mut decoder = tiff::decoder::Decoder::new(output).unwrap();
        assert_eq!(decoder.dimensions().unwrap(), (3, 2));
        assert_eq!(decoder.colortype().unwrap(), tiff::ColorType::Gray(16));
        match decoder.read_image().unwrap() {
            tiff::decoder::DecodingResult::U16(data) => {
                assert_eq!(data, vec![0x0001, 0x0002, 0x0003, 0x3FFF, 0x0100, 0x0200]);
            }
            _ => panic!("expected 16-bit samples"),
        }
    }

    #[test]
    fn test_deflate_with_predictor_round_trip() {
        let samples: Vec<u16> = (0..24u16).map(|i| (i * 683) % 16384).collect();
        let config = ConversionConfig::builder()
            .compression(TiffCompression::DeflateBest)
            .predictor(Some(2))
            .build();
        let reader = PackedFrameReader::new(6, 4, PixelFormat::BAYER14_RGGB);
        let pipeline = RawToTiffPipeline::packed(reader, config);

        let mut output = Cursor::new(Vec::new());
        pipeline.convert(&le_bytes(&samples), &mut output).unwrap();

        output.set_position(0);
        let mut decoder = tiff::decoder::Decoder::new(output).unwrap();
        assert_eq!(decoder.dimensions().unwrap(), (6, 4));
        match decoder.read_image().unwrap() {
            tiff::decoder::DecodingResult::U16(data) => assert_eq!(data, samples),
            _ => panic!("expected 16-bit samples"),
        }
    }

    #[test]
    fn test_rgb_tiff_file_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("frame.raw");
        let output = dir.path().join("frame.tiff");
        std::fs::write(&input, le_bytes(&[1, 2, 3, 4])).unwrap();

        let config = ConversionConfig::builder()
            .demosaic(Some(DemosaicMethod::Bilinear))
            .compression(TiffCompression::Lzw)
            .scale_to_16bit(true)
            .build();
        let reader = PackedFrameReader::new(2, 2, PixelFormat::BAYER14_RGGB);
        RawToTiffPipeline::packed(reader, config).convert_file(&input, &output).unwrap();

        let mut decoder = tiff::decoder::Decoder::new(std::fs::File::open(&output).unwrap()).unwrap();
        assert_eq!(decoder.colortype().unwrap(), tiff::ColorType::RGB(16));
        match decoder.read_image().unwrap() {
            tiff::decoder::DecodingResult::U16(data) => {
                let expected: Vec<u16> = [1, 3, 4, 1, 2, 4, 1, 3, 4, 1, 3, 4].iter().map(|v| v << 2).collect();
                assert_eq!(data, expected);
            }
            _ => panic!("expected 16-bit samples"),
        }
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let reader = PackedFrameReader::new(2, 2, PixelFormat::BAYER14_RGGB);
        let pipeline = RawToTiffPipeline::packed(reader, ConversionConfig::default());

        let result = pipeline.convert_file(dir.path().join("missing.raw"), dir.path().join("out.tiff"));

        assert!(matches!(result.unwrap_err(), PipelineError::InputReadError(_)));
        assert!(!dir.path().join("out.tiff").exists());
    }

    #[test]
    fn test_failed_conversion_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("short.raw");
        let output = dir.path().join("out.tiff");
        std::fs::write(&input, le_bytes(&[1, 2, 3])).unwrap();

        let reader = PackedFrameReader::new(2, 2, PixelFormat::BAYER14_RGGB);
        let result = RawToTiffPipeline::packed(reader, ConversionConfig::default()).convert_file(&input, &output);

        assert!(matches!(result.unwrap_err(), PipelineError::DimensionMismatch { .. }));
        assert!(!output.exists());
    }
}
