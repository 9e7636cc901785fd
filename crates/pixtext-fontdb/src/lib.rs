//! Font files as glyph sources
//!
//! [`TrueTypeFace`] opens a TrueType/OpenType face (or one face of a
//! collection) at a point size and answers the questions layout and the
//! rasterizer ask: face metrics, glyph coverage, and pair kerning.
//!
//! ## Memory Management
//!
//! Faces keep the raw font bytes and parse outlines on demand. Kerning pairs
//! are read once at open, and a hinting instance is built the first time a
//! hinting mode is used and then kept for the life of the face. Nothing
//! borrows the font data across calls, so a face can be shared freely
//! between threads.

mod kern;
mod raster;

use std::fs;
use std::io;
use std::path::Path;
use std::sync::OnceLock;

use read_fonts::FileRef;
use skrifa::instance::{LocationRef, Size};
use skrifa::metrics::Decoration as FontDecoration;
use skrifa::outline::{
    DrawSettings, Engine, HintingInstance, HintingOptions, OutlineGlyphCollection, SmoothMode,
    Target,
};
use skrifa::raw::TableProvider;
use skrifa::string::StringId;
use skrifa::{FontRef, GlyphId, MetadataProvider};

use pixtext_core::{
    error::{FontLoadError, PixtextError, RenderError, Result},
    traits::GlyphSource,
    types::{Decoration, FaceInfo, Glyph, GlyphBitmap, GlyphMetrics, Hinting},
};

/// An opened font face at a fixed size
pub struct TrueTypeFace {
    data: Vec<u8>,
    face_index: u32,
    face_count: u32,
    units_per_em: u16,
    info: FaceInfo,
    kern: kern::KernPairs,
    /// One slot per hinting mode; `None` inside means hinting failed
    hinters: [OnceLock<Option<HintingInstance>>; 3],
}

impl TrueTypeFace {
    /// Opens the first face of a font file
    pub fn from_file(path: impl AsRef<Path>, point_size: u32) -> Result<Self> {
        Self::from_file_index(path, point_size, 0)
    }

    /// Opens one face of a font file (collections hold several)
    pub fn from_file_index(path: impl AsRef<Path>, point_size: u32, face_index: u32) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| -> PixtextError {
            if e.kind() == io::ErrorKind::NotFound {
                FontLoadError::FileNotFound(path.display().to_string()).into()
            } else {
                e.into()
            }
        })?;
        Self::from_data_index(data, point_size, face_index)
    }

    /// Opens one face of in-memory font data
    pub fn from_data_index(data: Vec<u8>, point_size: u32, face_index: u32) -> Result<Self> {
        if point_size == 0 {
            return Err(FontLoadError::InvalidPointSize(point_size).into());
        }

        let face_count = match FileRef::new(&data) {
            Ok(FileRef::Font(_)) => 1,
            Ok(FileRef::Collection(collection)) => collection.len(),
            Err(e) => return Err(FontLoadError::InvalidData(e.to_string()).into()),
        };
        if face_index >= face_count {
            return Err(FontLoadError::FaceIndexOutOfRange {
                index: face_index,
                count: face_count,
            }
            .into());
        }

        let font = FontRef::from_index(&data, face_index)
            .map_err(|e| FontLoadError::InvalidData(e.to_string()))?;
        let units_per_em = font
            .head()
            .map(|head| head.units_per_em())
            .map_err(|e| FontLoadError::InvalidData(e.to_string()))?;

        // One point is one pixel (72 dpi)
        let ppem = point_size as f32;
        let info = face_info(&font, ppem);
        log::debug!(
            "Opened face {} of {} ({:?}) at {}px: ascent {}, descent {}",
            face_index,
            face_count,
            info.family_name,
            ppem,
            info.ascent,
            info.descent
        );

        let kern = kern::KernPairs::parse(&data, face_index);

        Ok(Self {
            data,
            face_index,
            face_count,
            units_per_em,
            info,
            kern,
            hinters: Default::default(),
        })
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn font_ref(&self) -> Result<FontRef<'_>> {
        FontRef::from_index(&self.data, self.face_index)
            .map_err(|e| RenderError::Backend(e.to_string()).into())
    }

    fn glyph_id(&self, font: &FontRef<'_>, ch: char) -> Option<GlyphId> {
        font.charmap().map(ch).filter(|gid| gid.to_u32() != 0)
    }

    /// The cached hinting instance for a mode, built on first use
    fn hinter(
        &self,
        outlines: &OutlineGlyphCollection<'_>,
        hinting: Hinting,
    ) -> Option<&HintingInstance> {
        let slot = hinting_slot(hinting)?;
        self.hinters[slot]
            .get_or_init(|| {
                let options = hinting_options(hinting)?;
                let size = Size::new(self.info.ppem);
                HintingInstance::new(outlines, size, LocationRef::default(), options)
                    .map_err(|e| {
                        log::warn!("{:?} hinting unavailable, drawing unhinted: {}", hinting, e)
                    })
                    .ok()
            })
            .as_ref()
    }

    /// Draws one glyph and returns its coverage plus its advance in pixels
    fn draw(&self, ch: char, hinting: Hinting) -> Result<(GlyphBitmap, i32)> {
        let font = self.font_ref()?;
        let gid = self.glyph_id(&font, ch).ok_or(PixtextError::GlyphMissing(ch))?;

        let size = Size::new(self.info.ppem);
        let location = LocationRef::default();
        let linear_advance = font
            .glyph_metrics(size, location)
            .advance_width(gid)
            .unwrap_or(0.0);

        let outlines = font.outline_glyphs();
        let Some(outline) = outlines.get(gid) else {
            // Glyphs without outlines (bitmap-only faces) still advance
            return Ok((GlyphBitmap::empty(), linear_advance.round() as i32));
        };

        let mut pen = raster::MaskPathPen::new();
        let drawn = match self.hinter(&outlines, hinting) {
            Some(instance) => outline.draw(DrawSettings::hinted(instance, false), &mut pen),
            None => outline.draw(DrawSettings::unhinted(size, location), &mut pen),
        };
        let adjusted = drawn.map_err(|e| RenderError::Backend(format!("outline of {ch:?}: {e}")))?;

        let mut bitmap = pen.rasterize();
        if hinting == Hinting::Mono {
            raster::threshold(&mut bitmap);
        }
        let advance = adjusted.advance_width.unwrap_or(linear_advance).round() as i32;
        Ok((bitmap, advance))
    }
}

impl GlyphSource for TrueTypeFace {
    fn name(&self) -> &'static str {
        "truetype"
    }

    fn face_info(&self) -> &FaceInfo {
        &self.info
    }

    fn face_count(&self) -> usize {
        self.face_count as usize
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.font_ref()
            .map(|font| self.glyph_id(&font, ch).is_some())
            .unwrap_or(false)
    }

    fn glyph_metrics(&self, ch: char, hinting: Hinting) -> Option<GlyphMetrics> {
        let (bitmap, advance) = self.draw(ch, hinting).ok()?;
        Some(metrics_of(&bitmap, advance))
    }

    fn rasterize(&self, ch: char, hinting: Hinting) -> Result<GlyphBitmap> {
        self.draw(ch, hinting).map(|(bitmap, _)| bitmap)
    }

    fn load_glyph(&self, ch: char, hinting: Hinting) -> Result<Glyph> {
        let (bitmap, advance) = self.draw(ch, hinting)?;
        Ok(Glyph {
            metrics: metrics_of(&bitmap, advance),
            bitmap,
        })
    }

    fn kerning(&self, left: char, right: char) -> i32 {
        if self.kern.is_empty() {
            return 0;
        }
        let Ok(font) = self.font_ref() else {
            return 0;
        };
        let (Some(left), Some(right)) = (self.glyph_id(&font, left), self.glyph_id(&font, right))
        else {
            return 0;
        };
        let (left, right) = (glyph_id16(left), glyph_id16(right));
        self.kern
            .units(left, right)
            .or_else(|| {
                self.kern
                    .has_class_tables()
                    .then(|| kern::class_units(&self.data, self.face_index, left, right))
                    .flatten()
            })
            .map(|units| kern::to_pixels(units, self.info.ppem, self.units_per_em))
            .unwrap_or(0)
    }
}

/// Ink bounds of a bitmap as glyph metrics
pub fn metrics_of(bitmap: &GlyphBitmap, advance: i32) -> GlyphMetrics {
    if bitmap.is_empty() {
        return GlyphMetrics {
            advance,
            ..GlyphMetrics::default()
        };
    }
    GlyphMetrics {
        min_x: bitmap.left,
        max_x: bitmap.left + bitmap.width as i32,
        min_y: bitmap.top - bitmap.height as i32,
        max_y: bitmap.top,
        advance,
    }
}

/// Legacy kerning addresses at most 65536 glyphs
fn glyph_id16(gid: GlyphId) -> u16 {
    u16::try_from(gid.to_u32()).unwrap_or(u16::MAX)
}

fn hinting_slot(hinting: Hinting) -> Option<usize> {
    match hinting {
        Hinting::Normal => Some(0),
        Hinting::Light => Some(1),
        Hinting::Mono => Some(2),
        Hinting::None => None,
    }
}

fn hinting_options(hinting: Hinting) -> Option<HintingOptions> {
    let smooth = |mode| Target::Smooth {
        mode,
        symmetric_rendering: true,
        preserve_linear_metrics: false,
    };
    let target = match hinting {
        Hinting::Normal => smooth(SmoothMode::Normal),
        Hinting::Light => smooth(SmoothMode::Light),
        Hinting::Mono => Target::Mono,
        Hinting::None => return None,
    };
    Some(HintingOptions {
        engine: Engine::AutoFallback,
        target,
    })
}

fn face_info(font: &FontRef<'_>, ppem: f32) -> FaceInfo {
    let metrics = font.metrics(Size::new(ppem), LocationRef::default());
    let ascent = metrics.ascent.ceil() as i32;
    let descent = metrics.descent.floor().min(0.0) as i32;
    let line_skip = (metrics.ascent - metrics.descent + metrics.leading).ceil() as i32;

    let fallback_thickness = (ppem / 14.0).round().max(1.0) as i32;
    let underline = metrics
        .underline
        .map(decoration)
        .unwrap_or(Decoration {
            top: fallback_thickness,
            thickness: fallback_thickness,
        });
    let strikeout = metrics.strikeout.map(decoration).unwrap_or(Decoration {
        top: -((ascent as f32 * 0.3).round() as i32),
        thickness: fallback_thickness,
    });

    FaceInfo {
        ppem,
        ascent,
        descent,
        line_skip,
        fixed_width: metrics.is_monospace,
        family_name: name_string(font, StringId::FAMILY_NAME),
        style_name: name_string(font, StringId::SUBFAMILY_NAME),
        underline,
        strikeout,
    }
}

fn decoration(d: FontDecoration) -> Decoration {
    Decoration {
        top: (-d.offset).round() as i32,
        thickness: d.thickness.round().max(1.0) as i32,
    }
}

fn name_string(font: &FontRef<'_>, id: StringId) -> Option<String> {
    font.localized_strings(id)
        .english_or_first()
        .map(|s| s.chars().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_point_size() {
        let err = TrueTypeFace::from_data_index(vec![0; 16], 0, 0)
            .err()
            .map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("Font loading failed: Invalid point size: 0")
        );
    }

    #[test]
    fn rejects_garbage() {
        let result = TrueTypeFace::from_data_index(b"definitely not a font".to_vec(), 12, 0);
        assert!(matches!(
            result,
            Err(PixtextError::FontLoad(FontLoadError::InvalidData(_)))
        ));
    }

    #[test]
    fn missing_file_is_reported_by_path() {
        let result = TrueTypeFace::from_file("/nonexistent/pixtext/font.ttf", 12);
        match result {
            Err(PixtextError::FontLoad(FontLoadError::FileNotFound(path))) => {
                assert!(path.ends_with("font.ttf"))
            }
            other => panic!("unexpected: {:?}", other.err()),
        }
    }

    #[test]
    fn metrics_follow_bitmap_extent() {
        let bitmap = GlyphBitmap {
            width: 4,
            height: 6,
            left: 1,
            top: 5,
            data: vec![255; 24],
        };
        let m = metrics_of(&bitmap, 7);
        assert_eq!(
            m,
            GlyphMetrics {
                min_x: 1,
                max_x: 5,
                min_y: -1,
                max_y: 5,
                advance: 7
            }
        );
        assert_eq!(metrics_of(&GlyphBitmap::empty(), 3).advance, 3);
    }

    #[test]
    fn each_hinting_mode_has_its_own_slot() {
        let slots: Vec<_> = [Hinting::Normal, Hinting::Light, Hinting::Mono]
            .into_iter()
            .filter_map(hinting_slot)
            .collect();
        assert_eq!(slots, vec![0, 1, 2]);
        assert_eq!(hinting_slot(Hinting::None), None);
    }

    #[test]
    fn no_hinting_means_no_instance() {
        assert!(hinting_options(Hinting::None).is_none());
        assert!(matches!(
            hinting_options(Hinting::Mono).map(|o| o.target),
            Some(Target::Mono)
        ));
    }
}
