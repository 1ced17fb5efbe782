use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use snap_bayer_rs::image_pipeline::{
    ConversionConfig, DemosaicMethod, PackedFrameReader, PixelFormat, RawFrameReader,
    RawToTiffPipeline, SampleLayout, StandardTiffWriter, TiffCompression,
};
use snap_bayer_rs::logger;

use tracing::info;

#[derive(Parser)]
#[command(name = "snap_bayer_rs")]
#[command(about = "Decode 14-bit RGGB RAW captures and export them as TIFF")]
#[command(version)]
struct Cli {
    /// RAW file (DNG) or, with --packed, a bare sample buffer
    input: PathBuf,

    /// Output TIFF path
    output: PathBuf,

    /// Treat the input as little-endian 16-bit samples without a container
    #[arg(long, requires_all = ["width", "height"])]
    packed: bool,

    /// Frame width in pixels (packed input)
    #[arg(long)]
    width: Option<usize>,

    /// Frame height in pixels (packed input)
    #[arg(long)]
    height: Option<usize>,

    /// Row stride in bytes when rows are padded (packed input)
    #[arg(long)]
    bytes_per_row: Option<usize>,

    /// CoreVideo pixel format code of the packed buffer
    #[arg(long, default_value = "rgg4", value_parser = parse_fourcc)]
    fourcc: u32,

    /// Samples are stored column by column
    #[arg(long)]
    column_major: bool,

    #[arg(long, value_enum, default_value_t = DemosaicArg::None)]
    demosaic: DemosaicArg,

    #[arg(long, value_enum, default_value_t = CompressionArg::None)]
    compression: CompressionArg,

    /// Apply horizontal differencing before compression
    #[arg(long)]
    predictor: bool,

    /// Scale 14-bit values to the full 16-bit range
    #[arg(long)]
    scale_16bit: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DemosaicArg {
    /// Write the single-channel mosaic
    None,
    Nearest,
    Bilinear,
}

#[derive(Clone, Copy, ValueEnum)]
enum CompressionArg {
    None,
    Lzw,
    DeflateFast,
    DeflateBalanced,
    DeflateBest,
}

fn parse_fourcc(code: &str) -> Result<u32, String> {
    let bytes: [u8; 4] = code
        .as_bytes()
        .try_into()
        .map_err(|_| format!("expected four characters, got {:?}", code))?;
    Ok(u32::from_be_bytes(bytes))
}

impl Cli {
    fn config(&self) -> ConversionConfig {
        let demosaic = match self.demosaic {
            DemosaicArg::None => None,
            DemosaicArg::Nearest => Some(DemosaicMethod::Nearest),
            DemosaicArg::Bilinear => Some(DemosaicMethod::Bilinear),
        };
        let compression = match self.compression {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::DeflateFast => TiffCompression::DeflateFast,
            CompressionArg::DeflateBalanced => TiffCompression::DeflateBalanced,
            CompressionArg::DeflateBest => TiffCompression::DeflateBest,
        };
        let layout = if self.column_major {
            SampleLayout::ColumnMajor
        } else {
            SampleLayout::RowMajor
        };

        ConversionConfig::builder()
            .compression(compression)
            .predictor(self.predictor.then_some(2))
            .layout(layout)
            .demosaic(demosaic)
            .scale_to_16bit(self.scale_16bit)
            .build()
    }
}

fn run<R: RawFrameReader>(
    pipeline: RawToTiffPipeline<R, StandardTiffWriter>,
    cli: &Cli,
) -> anyhow::Result<()> {
    let config = pipeline.config();
    info!("Compression: {:?}", config.compression);
    info!(
        "Demosaic: {}",
        match config.demosaic {
            Some(method) => format!("{:?}", method),
            None => "disabled".to_string(),
        }
    );

    pipeline
        .convert_file(&cli.input, &cli.output)
        .with_context(|| format!("converting {}", cli.input.display()))?;

    info!("Conversion successful!");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(if cli.verbose { "debug" } else { "info" });

    let config = cli.config();
    if cli.packed {
        let width = cli.width.context("--packed needs --width")?;
        let height = cli.height.context("--packed needs --height")?;
        let mut reader = PackedFrameReader::new(width, height, PixelFormat::from_fourcc(cli.fourcc));
        if let Some(stride) = cli.bytes_per_row {
            reader = reader.with_bytes_per_row(stride);
        }
        run(RawToTiffPipeline::packed(reader, config), &cli)
    } else {
        run(RawToTiffPipeline::new(config), &cli)
    }
}
