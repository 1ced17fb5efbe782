//! RAW frame types

use std::borrow::Cow;
use std::fmt;

/// 2x2 color filter array layout, named from the top-left sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfaPattern {
    Rggb,
    Grbg,
    Bggr,
    Gbrg,
}

impl CfaPattern {
    /// Builds a pattern from color indices (0=R, 1=G, 2=B) laid out as
    /// `[row0_col0, row0_col1, row1_col0, row1_col1]`.
    pub fn from_indices(indices: [usize; 4]) -> Option<Self> {
        match indices {
            [0, 1, 1, 2] => Some(CfaPattern::Rggb),
            [1, 0, 2, 1] => Some(CfaPattern::Grbg),
            [2, 1, 1, 0] => Some(CfaPattern::Bggr),
            [1, 2, 0, 1] => Some(CfaPattern::Gbrg),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            CfaPattern::Rggb => "RGGB",
            CfaPattern::Grbg => "GRBG",
            CfaPattern::Bggr => "BGGR",
            CfaPattern::Gbrg => "GBRG",
        }
    }
}

/// Pixel format of a captured RAW buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 14-bit samples right-aligned in little-endian 16-bit words
    Bayer14(CfaPattern),
    /// Full 16-bit samples
    Bayer16(CfaPattern),
    /// Any other CoreVideo four-character code
    Other(u32),
}

impl PixelFormat {
    /// The only layout the decoder accepts.
    pub const BAYER14_RGGB: PixelFormat = PixelFormat::Bayer14(CfaPattern::Rggb);

    /// Maps a CoreVideo pixel format code (`'rgg4'`, `'grb4'`, ...) to a format.
    pub fn from_fourcc(code: u32) -> Self {
        match &code.to_be_bytes() {
            b"rgg4" => PixelFormat::Bayer14(CfaPattern::Rggb),
            b"grb4" => PixelFormat::Bayer14(CfaPattern::Grbg),
            b"bgg4" => PixelFormat::Bayer14(CfaPattern::Bggr),
            b"gbr4" => PixelFormat::Bayer14(CfaPattern::Gbrg),
            _ => PixelFormat::Other(code),
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelFormat::Bayer14(cfa) => write!(f, "14-bit Bayer {}", cfa.as_str()),
            PixelFormat::Bayer16(cfa) => write!(f, "16-bit Bayer {}", cfa.as_str()),
            PixelFormat::Other(code) => {
                let bytes = code.to_be_bytes();
                if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
                    write!(f, "'{}'", String::from_utf8_lossy(&bytes))
                } else {
                    write!(f, "0x{:08X}", code)
                }
            }
        }
    }
}

/// A single captured RAW frame.
///
/// The sample buffer is either borrowed from the capture pipeline for the
/// duration of a decode call, or owned when a reader had to copy it out.
#[derive(Debug, Clone)]
pub struct RawFrame<'a> {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in pixels
    pub height: usize,
    pub pixel_format: PixelFormat,
    /// One 16-bit word per sensor pixel
    pub data: Cow<'a, [u16]>,
}

impl RawFrame<'static> {
    pub fn new(width: usize, height: usize, pixel_format: PixelFormat, data: Vec<u16>) -> Self {
        Self {
            width,
            height,
            pixel_format,
            data: Cow::Owned(data),
        }
    }
}

impl<'a> RawFrame<'a> {
    pub fn borrowed(width: usize, height: usize, pixel_format: PixelFormat, data: &'a [u16]) -> Self {
        Self {
            width,
            height,
            pixel_format,
            data: Cow::Borrowed(data),
        }
    }
}
