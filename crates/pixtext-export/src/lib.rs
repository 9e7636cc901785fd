//! Export for rendered buffers
//!
//! Indexed buffers only mean something together with their palette, so
//! everything goes through an [`RgbaSurface`] first. Exporters then turn the
//! surface into file bytes.

use std::fs;
use std::path::Path;

use pixtext_core::{Color, Palette, RenderedBuffer};
use thiserror::Error;

pub mod png;
pub mod ppm;

pub use png::PngExporter;
pub use ppm::PpmExporter;

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{bit_depth}-bit buffer needs a palette")]
    MissingPalette { bit_depth: u16 },

    #[error("Pixel index {index} outside a {len}-entry palette")]
    IndexOutOfPalette { index: u8, len: usize },

    #[error("Unsupported bit depth: {0}")]
    UnsupportedDepth(u16),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Straight-alpha RGBA pixels without row padding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaSurface {
    /// Expands a rendered buffer to RGBA
    ///
    /// 8-bit buffers are looked up in `palette`; its color key, if any,
    /// becomes fully transparent. 32-bit buffers are copied row by row and
    /// the palette is ignored.
    pub fn from_buffer(buffer: &RenderedBuffer, palette: Option<&Palette>) -> Result<Self> {
        let width = buffer.width() as u32;
        let height = buffer.height() as u32;
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);

        match buffer.bit_depth() {
            8 => {
                let palette = palette.ok_or(ExportError::MissingPalette { bit_depth: 8 })?;
                for y in 0..buffer.height() {
                    for &index in &buffer.row(y)[..width as usize] {
                        let color = palette.get(index).ok_or(ExportError::IndexOutOfPalette {
                            index,
                            len: palette.len(),
                        })?;
                        let alpha = if palette.color_key() == Some(index) {
                            0
                        } else {
                            color.a
                        };
                        data.extend_from_slice(&[color.r, color.g, color.b, alpha]);
                    }
                }
            }
            32 => {
                for y in 0..buffer.height() {
                    data.extend_from_slice(&buffer.row(y)[..width as usize * 4]);
                }
            }
            other => return Err(ExportError::UnsupportedDepth(other)),
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Stacks surfaces top to bottom, left-aligned, on a transparent field
    pub fn vstack(surfaces: &[RgbaSurface]) -> Self {
        let width = surfaces.iter().map(|s| s.width).max().unwrap_or(0);
        let height = surfaces.iter().map(|s| s.height).sum::<u32>();
        let stride = width as usize * 4;
        let mut data = vec![0u8; stride * height as usize];
        let mut top = 0usize;
        for surface in surfaces {
            let row_len = surface.width as usize * 4;
            for y in 0..surface.height as usize {
                let src = &surface.data[y * row_len..(y + 1) * row_len];
                let start = (top + y) * stride;
                data[start..start + row_len].copy_from_slice(src);
            }
            top += surface.height as usize;
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// The surface composited over an opaque background, as RGB
    pub fn flatten(&self, background: Color) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for px in self.data.chunks_exact(4) {
            let a = px[3] as u32;
            let mix = |fg: u8, bg: u8| ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8;
            out.extend_from_slice(&[
                mix(px[0], background.r),
                mix(px[1], background.g),
                mix(px[2], background.b),
            ]);
        }
        out
    }
}

/// Turns a surface into the bytes of one file format
pub trait SurfaceExporter: Send + Sync {
    fn name(&self) -> &'static str;

    /// File extension without the dot
    fn extension(&self) -> &'static str;

    fn export(&self, surface: &RgbaSurface) -> Result<Vec<u8>>;

    /// Exports and writes the result to `path`
    fn write_file(&self, surface: &RgbaSurface, path: &Path) -> Result<()> {
        let bytes = self.export(surface)?;
        fs::write(path, &bytes)?;
        log::debug!(
            "{}: wrote {} bytes to {}",
            self.name(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }
}

/// Picks an exporter from a file extension
///
/// `background` is used by formats without an alpha channel.
pub fn exporter_for(path: &Path, background: Color) -> Option<Box<dyn SurfaceExporter>> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some(Box::new(PngExporter::new())),
        "ppm" => Some(Box::new(PpmExporter::new(background))),
        _ => None,
    }
}
