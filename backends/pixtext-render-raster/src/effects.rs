//! Synthesized glyph styles
//!
//! Passes run in a fixed order on each glyph: outline stroke, then bold,
//! then italic. Each pass returns a new glyph whose metrics move with the
//! ink so layout sees the styled extent.

use pixtext_core::types::{FontStyle, Glyph, GlyphBitmap, GlyphMetrics};

/// Horizontal shear applied for italic, in pixels per pixel of height
pub const ITALIC_SHEAR: f32 = 0.207;

/// Which passes to run on a glyph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphEffects {
    /// Stroke radius in pixels, 0 for none
    pub outline: u32,
    /// Extra pixels of horizontal weight, 0 for none
    pub bold: u32,
    pub italic: bool,
}

impl GlyphEffects {
    /// Effects for a style at a pixel size
    ///
    /// Bold widens each glyph by a tenth of the em, at least one pixel.
    pub fn for_style(style: FontStyle, outline: u32, ppem: f32) -> Self {
        let bold = if style.contains(FontStyle::BOLD) {
            bold_overhang(ppem)
        } else {
            0
        };
        Self {
            outline,
            bold,
            italic: style.contains(FontStyle::ITALIC),
        }
    }

    pub fn is_plain(&self) -> bool {
        self.outline == 0 && self.bold == 0 && !self.italic
    }

    pub fn apply(&self, glyph: Glyph) -> Glyph {
        let mut glyph = glyph;
        if self.outline > 0 {
            glyph = stroke(glyph, self.outline);
        }
        if self.bold > 0 {
            glyph = embolden(glyph, self.bold);
        }
        if self.italic {
            glyph = shear(glyph, ITALIC_SHEAR);
        }
        glyph
    }
}

/// Extra advance given to bold glyphs
pub fn bold_overhang(ppem: f32) -> u32 {
    ((ppem / 10.0) as u32).max(1)
}

/// Grows coverage by a disc of `radius` pixels
pub fn stroke(glyph: Glyph, radius: u32) -> Glyph {
    let r = radius as i32;
    let Glyph { metrics, bitmap } = glyph;
    if bitmap.is_empty() {
        return Glyph { metrics, bitmap };
    }

    let disc: Vec<(i32, i32)> = (-r..=r)
        .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
        .filter(|(dx, dy)| dx * dx + dy * dy <= r * r + r)
        .collect();

    let width = bitmap.width + 2 * radius;
    let height = bitmap.height + 2 * radius;
    let mut data = vec![0u8; (width * height) as usize];
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let mut value = 0u8;
            for &(dx, dy) in &disc {
                let sx = x - r + dx;
                let sy = y - r + dy;
                if sx >= 0 && sy >= 0 {
                    value = value.max(bitmap.coverage(sx as u32, sy as u32));
                    if value == 255 {
                        break;
                    }
                }
            }
            data[(y as u32 * width + x as u32) as usize] = value;
        }
    }

    Glyph {
        metrics: GlyphMetrics {
            min_x: metrics.min_x - r,
            max_x: metrics.max_x + r,
            min_y: metrics.min_y - r,
            max_y: metrics.max_y + r,
            advance: metrics.advance,
        },
        bitmap: GlyphBitmap {
            width,
            height,
            left: bitmap.left - r,
            top: bitmap.top + r,
            data,
        },
    }
}

/// Smears coverage `strength` pixels to the right and widens the advance
pub fn embolden(glyph: Glyph, strength: u32) -> Glyph {
    let k = strength as i32;
    let Glyph { metrics, bitmap } = glyph;
    let metrics = GlyphMetrics {
        max_x: if bitmap.is_empty() {
            metrics.max_x
        } else {
            metrics.max_x + k
        },
        advance: metrics.advance + k,
        ..metrics
    };
    if bitmap.is_empty() {
        return Glyph { metrics, bitmap };
    }

    let width = bitmap.width + strength;
    let mut data = vec![0u8; (width * bitmap.height) as usize];
    for y in 0..bitmap.height {
        for x in 0..width as i32 {
            let value = (0..=k)
                .filter_map(|j| u32::try_from(x - j).ok())
                .map(|sx| bitmap.coverage(sx, y))
                .max()
                .unwrap_or(0);
            data[(y * width + x as u32) as usize] = value;
        }
    }

    Glyph {
        metrics,
        bitmap: GlyphBitmap {
            width,
            data,
            ..bitmap
        },
    }
}

/// Leans the glyph right around the baseline
pub fn shear(glyph: Glyph, factor: f32) -> Glyph {
    let Glyph { metrics, bitmap } = glyph;
    if bitmap.is_empty() {
        return Glyph { metrics, bitmap };
    }

    // Row centers measured upward from the baseline
    let shifts: Vec<f32> = (0..bitmap.height)
        .map(|row| (bitmap.top as f32 - row as f32 - 0.5) * factor)
        .collect();
    let min_shift = shifts.iter().copied().fold(f32::INFINITY, f32::min).floor();
    let max_shift = shifts.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let grow = (max_shift - min_shift).ceil() as u32;

    let width = bitmap.width + grow;
    let mut data = vec![0u8; (width * bitmap.height) as usize];
    for (row, shift) in shifts.iter().enumerate() {
        let offset = shift - min_shift;
        for x in 0..width {
            let pos = x as f32 - offset;
            let i0 = pos.floor();
            let t = pos - i0;
            let sample = |i: f32| -> f32 {
                if i < 0.0 {
                    0.0
                } else {
                    bitmap.coverage(i as u32, row as u32) as f32
                }
            };
            let value = sample(i0) * (1.0 - t) + sample(i0 + 1.0) * t;
            data[row * width as usize + x as usize] = value.round().clamp(0.0, 255.0) as u8;
        }
    }

    let shift_left = min_shift as i32;
    Glyph {
        metrics: GlyphMetrics {
            min_x: metrics.min_x + shift_left,
            max_x: metrics.max_x + shift_left + grow as i32,
            ..metrics
        },
        bitmap: GlyphBitmap {
            width,
            left: bitmap.left + shift_left,
            data,
            ..bitmap
        },
    }
}
