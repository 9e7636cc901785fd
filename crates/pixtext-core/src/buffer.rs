//! The self-describing pixel buffer handed back to callers
//!
//! A [`RenderedBuffer`] is four `u16` header fields plus a payload. The
//! serialized form is the header in little-endian order (width, height,
//! bit depth, row pitch) followed directly by `row_pitch * height` payload
//! bytes. Nothing else is stored: the caller knows which tier it asked for
//! and therefore how to read the pixels.

use crate::error::{RenderError, Result};

/// Serialized header size in bytes
pub const HEADER_LEN: usize = 8;

/// Row alignment for 8-bit buffers
const INDEXED_ROW_ALIGN: u32 = 4;

/// Rendered pixels plus the header needed to interpret them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBuffer {
    width: u16,
    height: u16,
    bit_depth: u16,
    row_pitch: u16,
    pixels: Vec<u8>,
}

impl RenderedBuffer {
    /// Wraps an existing payload, checking it against the header
    pub fn new(
        width: u16,
        height: u16,
        bit_depth: u16,
        row_pitch: u16,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        check_depth(bit_depth)?;

        let min_pitch = min_row_bytes(width as u32, bit_depth);
        if (row_pitch as u32) < min_pitch {
            return Err(RenderError::InvalidHeader(format!(
                "row pitch {row_pitch} is smaller than {min_pitch} bytes needed for width {width}"
            ))
            .into());
        }

        let expected = row_pitch as usize * height as usize;
        if pixels.len() != expected {
            return Err(RenderError::PayloadMismatch {
                expected,
                actual: pixels.len(),
            }
            .into());
        }

        Ok(Self {
            width,
            height,
            bit_depth,
            row_pitch,
            pixels,
        })
    }

    /// Allocates a cleared buffer with the tier's row alignment
    pub fn zeroed(width: u32, height: u32, bit_depth: u16) -> Result<Self> {
        check_depth(bit_depth)?;
        let pitch = Self::row_pitch_for(width, bit_depth);
        if width > u16::MAX as u32 || height > u16::MAX as u32 || pitch > u16::MAX as u32 {
            return Err(RenderError::TooLarge { width, height }.into());
        }

        Ok(Self {
            width: width as u16,
            height: height as u16,
            bit_depth,
            row_pitch: pitch as u16,
            pixels: vec![0; pitch as usize * height as usize],
        })
    }

    /// Row pitch used for freshly allocated buffers
    ///
    /// 8-bit rows are padded to a multiple of four bytes; 32-bit rows are
    /// already aligned.
    pub fn row_pitch_for(width: u32, bit_depth: u16) -> u32 {
        let bytes = min_row_bytes(width, bit_depth);
        if bit_depth == 8 {
            bytes.div_ceil(INDEXED_ROW_ALIGN) * INDEXED_ROW_ALIGN
        } else {
            bytes
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn bit_depth(&self) -> u16 {
        self.bit_depth
    }

    pub fn row_pitch(&self) -> u16 {
        self.row_pitch
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bit_depth as usize / 8
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// One full row including padding
    pub fn row(&self, y: u16) -> &[u8] {
        let start = y as usize * self.row_pitch as usize;
        &self.pixels[start..start + self.row_pitch as usize]
    }

    pub fn row_mut(&mut self, y: u16) -> &mut [u8] {
        let start = y as usize * self.row_pitch as usize;
        let pitch = self.row_pitch as usize;
        &mut self.pixels[start..start + pitch]
    }

    /// Bytes of the pixel at (x, y)
    pub fn pixel(&self, x: u16, y: u16) -> &[u8] {
        let bpp = self.bytes_per_pixel();
        let start = y as usize * self.row_pitch as usize + x as usize * bpp;
        &self.pixels[start..start + bpp]
    }

    /// Header followed by payload
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.pixels.len());
        for field in [self.width, self.height, self.bit_depth, self.row_pitch] {
            out.extend_from_slice(&field.to_le_bytes());
        }
        out.extend_from_slice(&self.pixels);
        out
    }

    /// Reads a buffer produced by [`RenderedBuffer::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(RenderError::InvalidHeader(format!(
                "need {HEADER_LEN} header bytes, got {}",
                bytes.len()
            ))
            .into());
        }
        let field = |i: usize| u16::from_le_bytes([bytes[i * 2], bytes[i * 2 + 1]]);
        Self::new(
            field(0),
            field(1),
            field(2),
            field(3),
            bytes[HEADER_LEN..].to_vec(),
        )
    }
}

fn check_depth(bit_depth: u16) -> Result<()> {
    match bit_depth {
        8 | 32 => Ok(()),
        other => Err(RenderError::UnsupportedDepth(other).into()),
    }
}

fn min_row_bytes(width: u32, bit_depth: u16) -> u32 {
    (width * bit_depth as u32).div_ceil(8)
}
