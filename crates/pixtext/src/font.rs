//! Font handles: one opened face plus its rendering configuration

use std::fmt;
#[cfg(feature = "fontdb")]
use std::path::Path;
use std::sync::Arc;

use pixtext_core::{
    buffer::RenderedBuffer,
    cache::{CacheStats, GlyphCache},
    context::{self, Context},
    error::{PixtextError, Result},
    traits::{GlyphProvider, GlyphSource},
    types::{Color, FaceInfo, FontConfig, FontStyle, GlyphMetrics, Hinting, QualityTier, TextInput},
};
use pixtext_render_raster::RasterRenderer;
use pixtext_shape_kern::{KernLayout, TextLayout};
use pixtext_unicode::{CodePoint, TextNormalizer};

use crate::styled::StyledGlyphs;

/// An opened font at one point size
///
/// Style, outline, hinting, and kerning are configured per handle and apply
/// to every later call. Face metrics are read once when the handle is made.
/// After [`FontHandle::close`] every operation fails with
/// [`PixtextError::UseAfterClose`].
///
/// ```no_run
/// use pixtext::{Color, FontHandle, FontStyle, QualityTier};
///
/// pixtext::init();
/// let mut font = FontHandle::open("DejaVuSans.ttf", 18)?;
/// font.set_style(FontStyle::BOLD | FontStyle::UNDERLINE)?;
/// let buffer = font.render("Hello".into(), QualityTier::Blended, Color::white())?;
/// assert_eq!(buffer.bit_depth(), 32);
/// # Ok::<(), pixtext::PixtextError>(())
/// ```
pub struct FontHandle {
    source: Option<Arc<dyn GlyphSource>>,
    info: FaceInfo,
    config: FontConfig,
    cache: GlyphCache,
    cache_enabled: bool,
    context: &'static Context,
}

impl FontHandle {
    /// Opens the first face of a font file
    #[cfg(feature = "fontdb")]
    pub fn open(path: impl AsRef<Path>, point_size: u32) -> Result<Self> {
        Self::open_index(path, point_size, 0)
    }

    /// Opens one face of a font file
    #[cfg(feature = "fontdb")]
    pub fn open_index(path: impl AsRef<Path>, point_size: u32, face_index: u32) -> Result<Self> {
        let ctx = context::global();
        let result = require_init(ctx).and_then(|()| {
            pixtext_fontdb::TrueTypeFace::from_file_index(path, point_size, face_index)
        });
        record(ctx, result.map(|face| Self::build(ctx, Arc::new(face))))
    }

    /// Opens one face of font data already in memory
    #[cfg(feature = "fontdb")]
    pub fn from_bytes(data: Vec<u8>, point_size: u32, face_index: u32) -> Result<Self> {
        let ctx = context::global();
        let result = require_init(ctx).and_then(|()| {
            pixtext_fontdb::TrueTypeFace::from_data_index(data, point_size, face_index)
        });
        record(ctx, result.map(|face| Self::build(ctx, Arc::new(face))))
    }

    /// Wraps any glyph source
    pub fn with_source(source: Arc<dyn GlyphSource>) -> Result<Self> {
        Self::with_source_in(context::global(), source)
    }

    /// Wraps a glyph source, using `ctx` instead of the global context
    pub fn with_source_in(ctx: &'static Context, source: Arc<dyn GlyphSource>) -> Result<Self> {
        record(ctx, require_init(ctx).map(|()| Self::build(ctx, source)))
    }

    fn build(ctx: &'static Context, source: Arc<dyn GlyphSource>) -> Self {
        let info = source.face_info().clone();
        log::debug!(
            "FontHandle: {} face {:?}, height {}",
            source.name(),
            info.family_name,
            info.height()
        );
        Self {
            source: Some(source),
            info,
            config: FontConfig::default(),
            cache: GlyphCache::new(),
            cache_enabled: true,
            context: ctx,
        }
    }

    /// Releases the glyph source
    pub fn close(&mut self) -> Result<()> {
        let result = match self.source.take() {
            Some(source) => {
                log::debug!("FontHandle: closing {} face", source.name());
                self.cache.clear();
                Ok(())
            }
            None => Err(PixtextError::UseAfterClose),
        };
        self.record(result)
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    // Configuration

    pub fn set_style(&mut self, style: FontStyle) -> Result<()> {
        self.configure(|config| config.style = style)
    }

    pub fn style(&self) -> Result<FontStyle> {
        self.read(|handle| handle.config.style)
    }

    /// Outline stroke width in pixels; 0 disables it
    pub fn set_outline(&mut self, outline: u32) -> Result<()> {
        self.configure(|config| config.outline = outline)
    }

    pub fn outline(&self) -> Result<u32> {
        self.read(|handle| handle.config.outline)
    }

    pub fn set_hinting(&mut self, hinting: Hinting) -> Result<()> {
        self.configure(|config| config.hinting = hinting)
    }

    pub fn hinting(&self) -> Result<Hinting> {
        self.read(|handle| handle.config.hinting)
    }

    pub fn set_kerning(&mut self, enabled: bool) -> Result<()> {
        self.configure(|config| config.kerning = enabled)
    }

    pub fn kerning(&self) -> Result<bool> {
        self.read(|handle| handle.config.kerning)
    }

    pub fn config(&self) -> Result<FontConfig> {
        self.read(|handle| handle.config)
    }

    /// Turns the styled glyph cache on or off
    pub fn set_glyph_cache(&mut self, enabled: bool) -> Result<()> {
        self.source()?;
        self.cache_enabled = enabled;
        if !enabled {
            self.cache.clear();
        }
        Ok(())
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn configure(&mut self, change: impl FnOnce(&mut FontConfig)) -> Result<()> {
        self.source()?;
        let before = self.config;
        change(&mut self.config);
        let glyphs_changed = before.style != self.config.style
            || before.outline != self.config.outline
            || before.hinting != self.config.hinting;
        if glyphs_changed {
            self.cache.clear();
        }
        Ok(())
    }

    // Face metrics

    /// Ascent plus the depth of the descent
    pub fn height(&self) -> Result<i32> {
        self.read(|handle| handle.info.height())
    }

    pub fn ascent(&self) -> Result<i32> {
        self.read(|handle| handle.info.ascent)
    }

    pub fn descent(&self) -> Result<i32> {
        self.read(|handle| handle.info.descent)
    }

    /// Recommended distance between baselines
    pub fn line_skip(&self) -> Result<i32> {
        self.read(|handle| handle.info.line_skip)
    }

    pub fn face_is_fixed_width(&self) -> Result<bool> {
        self.read(|handle| handle.info.fixed_width)
    }

    pub fn family_name(&self) -> Result<Option<String>> {
        self.read(|handle| handle.info.family_name.clone())
    }

    pub fn style_name(&self) -> Result<Option<String>> {
        self.read(|handle| handle.info.style_name.clone())
    }

    /// Number of faces in the font file
    pub fn faces(&self) -> Result<usize> {
        let result = self.source().map(|source| source.face_count());
        self.record(result)
    }

    // Glyph queries

    pub fn glyph_is_provided(&self, ch: char) -> Result<bool> {
        let result = self.source().map(|source| source.has_glyph(ch));
        self.record(result)
    }

    /// Metrics of a glyph with the current style applied
    pub fn glyph_metrics(&self, ch: char) -> Result<GlyphMetrics> {
        let result = self.with_glyphs(|glyphs| {
            glyphs
                .glyph(ch)?
                .map(|glyph| glyph.metrics)
                .ok_or(PixtextError::GlyphMissing(ch))
        });
        self.record(result)
    }

    /// The face's kerning between two characters, in pixels
    ///
    /// This is the font's own value; it is reported even while kerning is
    /// switched off for rendering.
    pub fn kerning_size(&self, left: char, right: char) -> Result<i32> {
        let result = self.source().map(|source| source.kerning(left, right));
        self.record(result)
    }

    // Measuring and rendering

    /// Width and height a single-line render of `text` would have
    pub fn size(&self, text: TextInput<'_>) -> Result<(u32, u32)> {
        let result = self.decode(text).and_then(|code_points| {
            self.with_glyphs(|glyphs| {
                let layout = self.layouter().single_line(glyphs, &code_points)?;
                self.note_missing(&layout);
                let width = if layout.is_zero_width() { 0 } else { layout.width };
                Ok((width, layout.height))
            })
        });
        self.record(result)
    }

    /// Renders text in one quality tier
    ///
    /// `BlendedWrapped` breaks lines at whitespace once they grow wider than
    /// its `wrap_width`; a width of 0 breaks only at line-break characters.
    /// The palette for indexed tiers comes from [`QualityTier::palette`].
    pub fn render(
        &self,
        text: TextInput<'_>,
        tier: QualityTier,
        foreground: Color,
    ) -> Result<RenderedBuffer> {
        let result = self.decode(text).and_then(|code_points| {
            self.with_glyphs(|glyphs| {
                let layout = match tier {
                    QualityTier::BlendedWrapped { wrap_width } => {
                        let limit = if wrap_width == 0 { u32::MAX } else { wrap_width };
                        self.layouter().wrapped(glyphs, &code_points, limit)?
                    }
                    _ => self.layouter().single_line(glyphs, &code_points)?,
                };
                self.note_missing(&layout);
                RasterRenderer::new().render(
                    &layout,
                    &glyphs.line_metrics(),
                    self.config.style,
                    tier,
                    foreground,
                )
            })
        });
        self.record(result)
    }

    /// Renders one glyph, starting at its left ink edge
    pub fn render_glyph(
        &self,
        ch: char,
        tier: QualityTier,
        foreground: Color,
    ) -> Result<RenderedBuffer> {
        let result = self.with_glyphs(|glyphs| {
            let layout = self
                .layouter()
                .glyph(glyphs, ch)?
                .ok_or(PixtextError::GlyphMissing(ch))?;
            RasterRenderer::new().render(
                &layout,
                &glyphs.line_metrics(),
                self.config.style,
                tier,
                foreground,
            )
        });
        self.record(result)
    }

    // Internals

    fn source(&self) -> Result<&Arc<dyn GlyphSource>> {
        self.source.as_ref().ok_or(PixtextError::UseAfterClose)
    }

    fn read<T>(&self, get: impl FnOnce(&Self) -> T) -> Result<T> {
        let result = self.source().map(|_| get(self));
        self.record(result)
    }

    fn decode(&self, text: TextInput<'_>) -> Result<Vec<CodePoint>> {
        self.source()?;
        Ok(TextNormalizer::from_context(self.context).decode(text)?)
    }

    fn layouter(&self) -> KernLayout {
        KernLayout::new(self.config.kerning)
    }

    fn with_glyphs<T>(&self, f: impl FnOnce(&StyledGlyphs<'_>) -> Result<T>) -> Result<T> {
        let source = self.source()?;
        let cache = self.cache_enabled.then_some(&self.cache);
        let glyphs = StyledGlyphs::new(source.as_ref(), &self.info, self.config, cache);
        f(&glyphs)
    }

    fn note_missing(&self, layout: &TextLayout) {
        if let Some(&ch) = layout.missing.first() {
            self.context
                .set_error(PixtextError::GlyphMissing(ch).to_string());
        }
    }

    fn record<T>(&self, result: Result<T>) -> Result<T> {
        record(self.context, result)
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle")
            .field("source", &self.source.as_ref().map(|s| s.name()))
            .field("family", &self.info.family_name)
            .field("config", &self.config)
            .finish()
    }
}

fn require_init(ctx: &Context) -> Result<()> {
    if ctx.was_init() {
        Ok(())
    } else {
        Err(PixtextError::Initialization(
            "call pixtext::init() before opening fonts".to_string(),
        ))
    }
}

/// Copies a failure into the context's last-error slot
pub(crate) fn record<T>(ctx: &Context, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        log::warn!("pixtext: {}", e);
        ctx.set_error(e.to_string());
    }
    result
}
