//! Glyphs as a font handle's configuration makes them look

use std::sync::Arc;

use pixtext_core::{
    cache::{GlyphCache, GlyphKey},
    error::{PixtextError, Result},
    traits::{GlyphProvider, GlyphSource},
    types::{FaceInfo, FontConfig, Glyph, LineMetrics},
};
use pixtext_render_raster::GlyphEffects;

/// Applies style effects on top of a glyph source, caching the results
pub(crate) struct StyledGlyphs<'a> {
    source: &'a dyn GlyphSource,
    config: FontConfig,
    effects: GlyphEffects,
    line: LineMetrics,
    cache: Option<&'a GlyphCache>,
}

impl<'a> StyledGlyphs<'a> {
    pub(crate) fn new(
        source: &'a dyn GlyphSource,
        info: &FaceInfo,
        config: FontConfig,
        cache: Option<&'a GlyphCache>,
    ) -> Self {
        Self {
            source,
            config,
            effects: GlyphEffects::for_style(config.style, config.outline, info.ppem),
            line: LineMetrics::from_face(info, config.outline),
            cache,
        }
    }

    fn key(&self, ch: char) -> GlyphKey {
        GlyphKey {
            ch,
            style: self.config.style,
            outline: self.config.outline,
            hinting: self.config.hinting,
        }
    }
}

impl GlyphProvider for StyledGlyphs<'_> {
    fn line_metrics(&self) -> LineMetrics {
        self.line
    }

    fn glyph(&self, ch: char) -> Result<Option<Arc<Glyph>>> {
        let key = self.key(ch);
        if let Some(cached) = self.cache.and_then(|cache| cache.get(&key)) {
            return Ok(Some(cached));
        }

        let raw = match self.source.load_glyph(ch, self.config.hinting) {
            Ok(raw) => raw,
            Err(PixtextError::GlyphMissing(_)) => return Ok(None),
            Err(e) => {
                log::debug!("{} could not load {:?}: {}", self.source.name(), ch, e);
                return Err(e);
            }
        };
        let glyph = Arc::new(self.effects.apply(raw));
        if let Some(cache) = self.cache {
            cache.insert(key, Arc::clone(&glyph));
        }
        Ok(Some(glyph))
    }

    fn kerning(&self, left: char, right: char) -> i32 {
        if self.config.kerning {
            self.source.kerning(left, right)
        } else {
            0
        }
    }
}
