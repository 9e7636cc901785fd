//! pixtext - render text into self-describing pixel buffers
//!
//! Open a font at a point size, pick a style, and render Latin-1, UTF-8, or
//! UTF-16 text in one of three quality tiers:
//!
//! - **Solid** - 8-bit indices, 0 for background and 1 for ink
//! - **Shaded** - 8-bit indices into a 256-step ramp from background to foreground
//! - **Blended** - 32-bit RGBA pixels, optionally word-wrapped
//!
//! Every result is a [`RenderedBuffer`] that can be serialized with a
//! four-field header (width, height, bit depth, row pitch) in front of its
//! pixel rows.
//!
//! ```no_run
//! use pixtext::{Color, FontHandle, QualityTier, TextInput};
//!
//! pixtext::init();
//! let font = FontHandle::open("DejaVuSans.ttf", 24)?;
//! let (w, h) = font.size("Hello, world".into())?;
//! let buffer = font.render(
//!     TextInput::Utf8("Hello, world".as_bytes()),
//!     QualityTier::Shaded { background: Color::black() },
//!     Color::white(),
//! )?;
//! assert_eq!((buffer.width() as u32, buffer.height() as u32), (w, h));
//! let bytes = buffer.to_bytes();
//! # drop(bytes);
//! pixtext::quit();
//! # Ok::<(), pixtext::PixtextError>(())
//! ```
//!
//! # Feature flags
//!
//! - `fontdb` (default): open TrueType/OpenType files with [`FontHandle::open`]

// this_file: crates/pixtext/src/lib.rs

mod font;
mod styled;

pub use font::FontHandle;

pub use pixtext_core::{
    context, error, CacheStats, Color, Context, Decoration, EncodingError, FaceInfo, FontConfig,
    FontLoadError, FontStyle, Glyph, GlyphBitmap, GlyphMetrics, GlyphSource, Hinting, Palette,
    PixtextError, QualityTier, RenderError, RenderedBuffer, Result, TextEncoding, TextInput,
    HEADER_LEN,
};

#[cfg(feature = "fontdb")]
pub use pixtext_fontdb as fontdb;

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{
        Color, FontHandle, FontStyle, Hinting, PixtextError, QualityTier, RenderedBuffer, Result,
        TextInput,
    };
}

/// Marks the library as in use; fonts can only be opened while it is
///
/// Calls nest. Returns the number of outstanding inits.
pub fn init() -> usize {
    pixtext_core::context::global().init()
}

/// Undoes one [`init`]; the last one clears the stored error
pub fn quit() {
    pixtext_core::context::global().quit()
}

pub fn was_init() -> bool {
    pixtext_core::context::global().was_init()
}

/// Message of the most recent failure, if any
pub fn last_error() -> Option<String> {
    pixtext_core::context::global().last_error()
}

/// Byte order assumed for UTF-16 text without a byte-order mark
///
/// `true` reads such text with its bytes swapped. A mark inside the text
/// still wins for the rest of that string.
pub fn set_byte_swapped_unicode(swapped: bool) {
    pixtext_core::context::global().set_byte_swapped(swapped)
}

pub fn byte_swapped_unicode() -> bool {
    pixtext_core::context::global().is_byte_swapped()
}
