//! Raster renderer - from positioned glyphs to a tiered pixel buffer
//!
//! Rendering happens on an 8-bit coverage [`Canvas`]: glyphs are composited
//! at their layout positions, decoration bars are laid over each line, and
//! only then is coverage quantized for the requested tier:
//!
//! - **Solid** - 8-bit indices, 1 where coverage reaches half, else 0
//! - **Shaded** - 8-bit indices equal to coverage (palette ramp bg to fg)
//! - **Blended** - RGBA with the foreground color and coverage as alpha

pub mod canvas;
pub mod effects;

pub use canvas::Canvas;
pub use effects::{bold_overhang, GlyphEffects, ITALIC_SHEAR};

use pixtext_core::{
    buffer::RenderedBuffer,
    error::{PixtextError, RenderError, Result},
    types::{Color, Decoration, FontStyle, LineMetrics, QualityTier},
};
use pixtext_shape_kern::TextLayout;

/// Coverage at or above this is ink in Solid buffers
pub const SOLID_THRESHOLD: u8 = 128;

/// Composites layouts and encodes them per quality tier
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterRenderer;

impl RasterRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &'static str {
        "raster"
    }

    /// Renders a layout into a buffer for `tier`
    ///
    /// Fails without producing a buffer when the layout has no width or does
    /// not fit the 16-bit header. The row pitch of the tier counts too, so a
    /// layout can be small enough for Solid and still too wide for Blended.
    pub fn render(
        &self,
        layout: &TextLayout,
        metrics: &LineMetrics,
        style: FontStyle,
        tier: QualityTier,
        foreground: Color,
    ) -> Result<RenderedBuffer> {
        let width = layout.width.min(u32::from(u16::MAX));
        if !layout.is_zero_width()
            && RenderedBuffer::row_pitch_for(width, tier.bit_depth()) > u32::from(u16::MAX)
        {
            return Err(too_large(layout));
        }
        let canvas = self.composite(layout, metrics, style)?;
        log::debug!(
            "RasterRenderer: {}x{} {} buffer for {} glyphs",
            canvas.width(),
            canvas.height(),
            tier.name(),
            layout.glyph_count()
        );
        quantize(&canvas, tier, foreground)
    }

    /// Draws glyphs and decorations to a coverage canvas
    pub fn composite(
        &self,
        layout: &TextLayout,
        metrics: &LineMetrics,
        style: FontStyle,
    ) -> Result<Canvas> {
        if layout.is_zero_width() {
            return Err(RenderError::ZeroWidth.into());
        }
        if layout.width > u16::MAX as u32 || layout.height > u16::MAX as u32 {
            return Err(too_large(layout));
        }

        let mut canvas = Canvas::new(layout.width, layout.height);
        let line_height = layout.line_height as i32;
        for (index, line) in layout.lines.iter().enumerate() {
            let line_top = index as i32 * line_height;
            let baseline = line_top + metrics.baseline();
            for placed in &line.glyphs {
                let bitmap = &placed.glyph.bitmap;
                canvas.draw(bitmap, placed.x + bitmap.left, baseline - bitmap.top);
            }

            let bars = [
                (FontStyle::UNDERLINE, metrics.underline),
                (FontStyle::STRIKETHROUGH, metrics.strikeout),
            ];
            for (flag, bar) in bars {
                if style.contains(flag) {
                    let (top, thickness) =
                        bar_rows(bar, baseline, line_top, line_height, metrics.outline);
                    canvas.fill_rows(top, thickness);
                }
            }
        }
        Ok(canvas)
    }
}

fn too_large(layout: &TextLayout) -> PixtextError {
    RenderError::TooLarge {
        width: layout.width,
        height: layout.height,
    }
    .into()
}

/// Rows of a decoration bar, kept inside its line
fn bar_rows(
    bar: Decoration,
    baseline: i32,
    line_top: i32,
    line_height: i32,
    outline: i32,
) -> (i32, i32) {
    if line_height <= 0 {
        return (line_top, 0);
    }
    let thickness = (bar.thickness + 2 * outline).clamp(1, line_height);
    let top = baseline + bar.top - outline;
    let top = top.clamp(line_top, line_top + line_height - thickness);
    (top, thickness)
}

/// Encodes a coverage canvas for a tier
pub fn quantize(canvas: &Canvas, tier: QualityTier, foreground: Color) -> Result<RenderedBuffer> {
    let mut buffer = RenderedBuffer::zeroed(canvas.width(), canvas.height(), tier.bit_depth())?;
    for y in 0..canvas.height() {
        let src = canvas.row(y);
        let dst = buffer.row_mut(y as u16);
        match tier {
            QualityTier::Solid => {
                for (d, &c) in dst.iter_mut().zip(src) {
                    *d = u8::from(c >= SOLID_THRESHOLD);
                }
            }
            QualityTier::Shaded { .. } => {
                dst[..src.len()].copy_from_slice(src);
            }
            QualityTier::Blended | QualityTier::BlendedWrapped { .. } => {
                for (px, &c) in dst.chunks_exact_mut(4).zip(src) {
                    px.copy_from_slice(&[foreground.r, foreground.g, foreground.b, c]);
                }
            }
        }
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests;
