//! The data that moves between pipeline stages

use bitflags::bitflags;

use crate::palette::Palette;

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }
}

bitflags! {
    /// Synthesized style effects applied to every glyph of a render
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FontStyle: u8 {
        const BOLD = 0x01;
        const ITALIC = 0x02;
        const UNDERLINE = 0x04;
        const STRIKETHROUGH = 0x08;
    }
}

impl FontStyle {
    pub const NORMAL: Self = Self::empty();

    /// Builds a style from the four individual switches
    pub fn from_switches(bold: bool, italic: bool, underline: bool, strikethrough: bool) -> Self {
        let mut style = Self::NORMAL;
        style.set(Self::BOLD, bold);
        style.set(Self::ITALIC, italic);
        style.set(Self::UNDERLINE, underline);
        style.set(Self::STRIKETHROUGH, strikethrough);
        style
    }
}

impl Default for FontStyle {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Outline hinting applied when glyphs are rasterized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Hinting {
    #[default]
    Normal,
    Light,
    /// Hinted for monochrome output; coverage comes back binary
    Mono,
    None,
}

impl Hinting {
    pub fn name(&self) -> &'static str {
        match self {
            Hinting::Normal => "normal",
            Hinting::Light => "light",
            Hinting::Mono => "mono",
            Hinting::None => "none",
        }
    }
}

/// The text encodings accepted by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// One byte per character, ISO-8859-1
    Latin1,
    Utf8,
    /// 16-bit code units with optional byte-order marks
    Utf16,
}

/// Text tagged with its encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInput<'a> {
    Latin1(&'a [u8]),
    Utf8(&'a [u8]),
    Utf16(&'a [u16]),
}

impl TextInput<'_> {
    pub fn encoding(&self) -> TextEncoding {
        match self {
            TextInput::Latin1(_) => TextEncoding::Latin1,
            TextInput::Utf8(_) => TextEncoding::Utf8,
            TextInput::Utf16(_) => TextEncoding::Utf16,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TextInput::Latin1(b) | TextInput::Utf8(b) => b.is_empty(),
            TextInput::Utf16(u) => u.is_empty(),
        }
    }
}

impl<'a> From<&'a str> for TextInput<'a> {
    fn from(text: &'a str) -> Self {
        TextInput::Utf8(text.as_bytes())
    }
}

/// How a render call turns coverage into pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityTier {
    /// Binary coverage, 8-bit indexed: 0 is the color key, 1 the foreground
    Solid,
    /// 256 coverage levels, 8-bit indexed against a background-to-foreground ramp
    Shaded { background: Color },
    /// 32-bit RGBA, foreground color with coverage as straight alpha
    Blended,
    /// Blended, broken into lines no wider than `wrap_width` where possible
    BlendedWrapped { wrap_width: u32 },
}

impl QualityTier {
    pub fn name(&self) -> &'static str {
        match self {
            QualityTier::Solid => "solid",
            QualityTier::Shaded { .. } => "shaded",
            QualityTier::Blended => "blended",
            QualityTier::BlendedWrapped { .. } => "blended-wrapped",
        }
    }

    /// Bits per pixel of buffers produced by this tier
    pub fn bit_depth(&self) -> u16 {
        match self {
            QualityTier::Solid | QualityTier::Shaded { .. } => 8,
            QualityTier::Blended | QualityTier::BlendedWrapped { .. } => 32,
        }
    }

    /// Palette needed to display an indexed buffer of this tier
    ///
    /// Blended buffers carry their own color and return `None`.
    pub fn palette(&self, foreground: Color) -> Option<Palette> {
        match self {
            QualityTier::Solid => Some(Palette::solid(foreground)),
            QualityTier::Shaded { background } => Some(Palette::shaded(foreground, *background)),
            QualityTier::Blended | QualityTier::BlendedWrapped { .. } => None,
        }
    }
}

/// Per-glyph metrics in whole pixels, y-up relative to the baseline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub advance: i32,
}

/// An 8-bit coverage mask positioned relative to the pen origin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    /// Distance from the pen origin to the first column
    pub left: i32,
    /// Distance from the baseline up to the first row
    pub top: i32,
    pub data: Vec<u8>,
}

impl GlyphBitmap {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[(y * self.width + x) as usize]
    }
}

/// A glyph ready for layout and compositing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub metrics: GlyphMetrics,
    pub bitmap: GlyphBitmap,
}

/// A decoration bar, measured from the baseline with y growing downward
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoration {
    /// Row of the bar's top edge relative to the baseline; negative is above it
    pub top: i32,
    pub thickness: i32,
}

/// Face-wide data fixed when a font is opened at a given size
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceInfo {
    pub ppem: f32,
    /// Pixels above the baseline
    pub ascent: i32,
    /// Pixels below the baseline, zero or negative
    pub descent: i32,
    pub line_skip: i32,
    pub fixed_width: bool,
    pub family_name: Option<String>,
    pub style_name: Option<String>,
    pub underline: Decoration,
    pub strikeout: Decoration,
}

impl FaceInfo {
    /// Height of one line of text: ascent plus the depth of the descent
    pub fn height(&self) -> i32 {
        self.ascent - self.descent
    }
}

/// Line geometry once the outline width is known
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineMetrics {
    pub ascent: i32,
    pub descent: i32,
    pub outline: i32,
    pub line_skip: i32,
    pub underline: Decoration,
    pub strikeout: Decoration,
}

impl LineMetrics {
    pub fn from_face(face: &FaceInfo, outline: u32) -> Self {
        Self {
            ascent: face.ascent,
            descent: face.descent,
            outline: outline as i32,
            line_skip: face.line_skip,
            underline: face.underline,
            strikeout: face.strikeout,
        }
    }

    /// Height of a rendered line, outline included on both edges
    pub fn line_height(&self) -> i32 {
        self.ascent - self.descent + 2 * self.outline
    }

    /// Row of the baseline within a rendered line
    pub fn baseline(&self) -> i32 {
        self.outline + self.ascent
    }
}

/// Mutable rendering configuration carried by a font handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontConfig {
    pub style: FontStyle,
    pub outline: u32,
    pub hinting: Hinting,
    pub kerning: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            style: FontStyle::NORMAL,
            outline: 0,
            hinting: Hinting::Normal,
            kerning: true,
        }
    }
}
