//! PNG output through the `image` crate

use image::{ImageEncoder, RgbaImage};

use crate::{ExportError, Result, RgbaSurface, SurfaceExporter};

/// Writes surfaces as 8-bit RGBA PNG, alpha preserved
#[derive(Debug, Clone, Copy, Default)]
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }
}

/// Encodes a surface as PNG bytes
pub fn encode_png(surface: &RgbaSurface) -> Result<Vec<u8>> {
    let img = RgbaImage::from_raw(surface.width(), surface.height(), surface.data().to_vec())
        .ok_or_else(|| {
            ExportError::EncodingFailed(format!(
                "{} bytes do not make a {}x{} RGBA image",
                surface.data().len(),
                surface.width(),
                surface.height()
            ))
        })?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );
    encoder
        .write_image(
            img.as_raw(),
            surface.width(),
            surface.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

impl SurfaceExporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn export(&self, surface: &RgbaSurface) -> Result<Vec<u8>> {
        encode_png(surface)
    }
}
