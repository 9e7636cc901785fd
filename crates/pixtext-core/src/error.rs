//! Error types for pixtext

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PixtextError>;

/// Main error type for pixtext
#[derive(Debug, Error)]
pub enum PixtextError {
    #[error("Library not initialized: {0}")]
    Initialization(String),

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Text decoding failed: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Glyph not provided by font: U+{:04X}", code_point(.0))]
    GlyphMissing(char),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Font handle used after close")]
    UseAfterClose,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn code_point(ch: &char) -> u32 {
    u32::from(*ch)
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data: {0}")]
    InvalidData(String),

    #[error("Face index {index} out of range (font has {count} faces)")]
    FaceIndexOutOfRange { index: u32, count: u32 },

    #[error("Invalid point size: {0}")]
    InvalidPointSize(u32),
}

/// Text decoding errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Invalid UTF-8 sequence at byte {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("Unpaired UTF-16 surrogate 0x{unit:04X} at unit {offset}")]
    UnpairedSurrogate { unit: u16, offset: usize },
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Text has zero width")]
    ZeroWidth,

    #[error("Rendered size {width}x{height} exceeds the 65535 pixel limit")]
    TooLarge { width: u32, height: u32 },

    #[error("Payload length {actual} does not match {expected} (pitch x height)")]
    PayloadMismatch { expected: usize, actual: usize },

    #[error("Invalid buffer header: {0}")]
    InvalidHeader(String),

    #[error("Unsupported bit depth: {0}")]
    UnsupportedDepth(u16),

    #[error("Backend error: {0}")]
    Backend(String),
}
