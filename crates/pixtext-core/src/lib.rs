//! pixtext core: shared types for turning text into pixel buffers
//!
//! Every render walks the same path:
//!
//! 1. **Decoding** - Latin-1, UTF-8, or UTF-16 input becomes code points
//! 2. **Layout** - Styled glyph metrics and kerning give each glyph a position,
//!    optionally breaking long text into lines
//! 3. **Rasterization** - Coverage is composited and quantized for one of
//!    three quality tiers
//! 4. **Encoding** - Pixels are wrapped in a [`RenderedBuffer`] with a
//!    four-field header
//!
//! This crate holds the pieces the stages share: errors, value types, the
//! [`GlyphSource`](traits::GlyphSource) contract for font backends, the
//! buffer format, and the process-wide [`Context`](context::Context).

pub mod buffer;
pub mod cache;
pub mod context;
pub mod error;
pub mod palette;
pub mod traits;
pub mod types;

pub use buffer::{RenderedBuffer, HEADER_LEN};
pub use cache::{CacheStats, GlyphCache, GlyphKey};
pub use context::Context;
pub use error::{EncodingError, FontLoadError, PixtextError, RenderError, Result};
pub use palette::Palette;
pub use traits::{GlyphProvider, GlyphSource};
pub use types::{
    Color, Decoration, FaceInfo, FontConfig, FontStyle, Glyph, GlyphBitmap, GlyphMetrics, Hinting,
    LineMetrics, QualityTier, TextEncoding, TextInput,
};
