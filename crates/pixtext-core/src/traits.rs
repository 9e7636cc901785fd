//! The contracts between the font backend, layout, and rasterization
//!
//! - [`GlyphSource`] - an opened face at a fixed size: metrics, coverage, kerning
//! - [`GlyphProvider`] - styled glyphs as layout and the rasterizer see them

use std::sync::Arc;

use crate::error::{PixtextError, Result};
use crate::types::{FaceInfo, Glyph, GlyphBitmap, GlyphMetrics, Hinting, LineMetrics};

/// An opened font face scaled to one point size
///
/// Implementations decode outlines and produce plain coverage. Style
/// synthesis (bold, italic, outline stroking) happens above this layer.
///
/// ```ignore
/// struct Blocks;
///
/// impl GlyphSource for Blocks {
///     fn name(&self) -> &'static str {
///         "blocks"
///     }
///     // ...
/// }
/// ```
pub trait GlyphSource: Send + Sync {
    /// Short identifier used in log messages
    fn name(&self) -> &'static str;

    /// Face-wide metrics at the opened size
    fn face_info(&self) -> &FaceInfo;

    /// Number of faces in the underlying font file
    fn face_count(&self) -> usize {
        1
    }

    /// Whether the face maps this character to a real glyph
    fn has_glyph(&self, ch: char) -> bool;

    /// Unstyled metrics, `None` when the character is not provided
    fn glyph_metrics(&self, ch: char, hinting: Hinting) -> Option<GlyphMetrics>;

    /// Unstyled coverage mask
    ///
    /// Fails with `GlyphMissing` when the character is not provided.
    fn rasterize(&self, ch: char, hinting: Hinting) -> Result<GlyphBitmap>;

    /// Signed pixel adjustment between two adjacent characters
    fn kerning(&self, left: char, right: char) -> i32;

    /// Metrics and coverage together
    ///
    /// Backends that derive one from the other should override this to draw
    /// the glyph only once.
    fn load_glyph(&self, ch: char, hinting: Hinting) -> Result<Glyph> {
        let bitmap = self.rasterize(ch, hinting)?;
        let metrics = self
            .glyph_metrics(ch, hinting)
            .ok_or(PixtextError::GlyphMissing(ch))?;
        Ok(Glyph { metrics, bitmap })
    }
}

/// Styled glyphs, ready to be positioned and composited
pub trait GlyphProvider {
    fn line_metrics(&self) -> LineMetrics;

    /// The styled glyph, or `None` if the face does not provide it
    ///
    /// Any other failure to produce the glyph is an error.
    fn glyph(&self, ch: char) -> Result<Option<Arc<Glyph>>>;

    /// Kerning delta, already zero when kerning is disabled
    fn kerning(&self, left: char, right: char) -> i32;
}
