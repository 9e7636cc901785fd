use super::*;
use pixtext_core::{
    error::PixtextError,
    traits::GlyphProvider,
    types::{Glyph, GlyphBitmap, GlyphMetrics},
};
use pixtext_shape_kern::{KernLayout, Line};
use pixtext_unicode::CodePoint;
use proptest::prelude::*;
use std::sync::Arc;

// Letters are 6x8 blocks of coverage `ink` on a 10px advance, sitting on
// the baseline; "." is a half-coverage dot.
struct BlockFont {
    ink: u8,
}

impl GlyphProvider for BlockFont {
    fn line_metrics(&self) -> LineMetrics {
        LineMetrics {
            ascent: 8,
            descent: -4,
            outline: 0,
            line_skip: 13,
            underline: Decoration {
                top: 2,
                thickness: 1,
            },
            strikeout: Decoration {
                top: -4,
                thickness: 1,
            },
        }
    }

    fn glyph(&self, ch: char) -> Result<Option<Arc<Glyph>>> {
        let (width, height, value) = match ch {
            c if c.is_ascii_alphabetic() => (6, 8, self.ink),
            '.' => (2, 2, 100),
            ' ' => (0, 0, 0),
            _ => return Ok(None),
        };
        Ok(Some(Arc::new(Glyph {
            metrics: GlyphMetrics {
                min_x: 2,
                max_x: 2 + width as i32,
                min_y: 0,
                max_y: height as i32,
                advance: 10,
            },
            bitmap: GlyphBitmap {
                width,
                height,
                left: 2,
                top: height as i32,
                data: vec![value; (width * height) as usize],
            },
        })))
    }

    fn kerning(&self, _left: char, _right: char) -> i32 {
        0
    }
}

fn cps(text: &str) -> Vec<CodePoint> {
    text.char_indices()
        .map(|(offset, ch)| CodePoint { ch, offset })
        .collect()
}

fn render(text: &str, style: FontStyle, tier: QualityTier) -> Result<RenderedBuffer> {
    let font = BlockFont { ink: 255 };
    let layout = KernLayout::new(true).single_line(&font, &cps(text)).unwrap();
    RasterRenderer::new().render(
        &layout,
        &font.line_metrics(),
        style,
        tier,
        Color::rgb(200, 10, 20),
    )
}

#[test]
fn solid_is_binary_indices() {
    let buf = render("ab", FontStyle::NORMAL, QualityTier::Solid).unwrap();
    assert_eq!((buf.width(), buf.height()), (20, 12));
    assert_eq!(buf.bit_depth(), 8);
    assert_eq!(buf.row_pitch(), 20);
    assert!(buf.pixels().iter().all(|&p| p <= 1));
    // Ink starts 2px in and fills rows 0..8 above the baseline
    assert_eq!(buf.pixel(2, 0), &[1]);
    assert_eq!(buf.pixel(1, 0), &[0]);
    assert_eq!(buf.pixel(2, 8), &[0]);
}

#[test]
fn solid_and_shaded_agree_on_binary_glyphs() {
    let shaded_tier = QualityTier::Shaded {
        background: Color::white(),
    };
    let solid = render("abc", FontStyle::NORMAL, QualityTier::Solid).unwrap();
    let shaded = render("abc", FontStyle::NORMAL, shaded_tier).unwrap();
    assert_eq!(solid.row_pitch(), shaded.row_pitch());
    for (s, h) in solid.pixels().iter().zip(shaded.pixels()) {
        assert_eq!(*s == 1, *h == 255);
    }
}

#[test]
fn shaded_keeps_partial_coverage() {
    let tier = QualityTier::Shaded {
        background: Color::black(),
    };
    let buf = render(".", FontStyle::NORMAL, tier).unwrap();
    assert_eq!(buf.pixel(2, 6), &[100]);
    let solid = render(".", FontStyle::NORMAL, QualityTier::Solid).unwrap();
    assert_eq!(solid.pixel(2, 6), &[0]);
}

#[test]
fn shaded_rows_are_padded() {
    let tier = QualityTier::Shaded {
        background: Color::black(),
    };
    // One letter is 10px wide
    let buf = render("a", FontStyle::NORMAL, tier).unwrap();
    assert_eq!(buf.width(), 10);
    assert_eq!(buf.row_pitch(), 12);
    assert_eq!(buf.pixels().len(), 12 * 12);
}

#[test]
fn blended_carries_color_and_alpha() {
    let buf = render("a", FontStyle::NORMAL, QualityTier::Blended).unwrap();
    assert_eq!(buf.bit_depth(), 32);
    assert_eq!(buf.row_pitch(), 40);
    assert_eq!(buf.pixel(3, 3), &[200, 10, 20, 255]);
    assert_eq!(buf.pixel(0, 3), &[200, 10, 20, 0]);
}

#[test]
fn underline_spans_full_width() {
    let buf = render("a a", FontStyle::UNDERLINE, QualityTier::Solid).unwrap();
    // Baseline at row 8, bar two rows under it
    assert!(buf.row(10)[..buf.width() as usize].iter().all(|&p| p == 1));
    assert!(buf.row(11)[..buf.width() as usize].iter().any(|&p| p == 0));
}

#[test]
fn strikethrough_crosses_glyphs_and_gaps() {
    let buf = render("a a", FontStyle::STRIKETHROUGH, QualityTier::Solid).unwrap();
    // Row 4 is the strike row; column 12 sits in the space
    assert_eq!(buf.pixel(12, 4), &[1]);
    assert_eq!(buf.pixel(12, 3), &[0]);
}

#[test]
fn wrapped_lines_stack() {
    let font = BlockFont { ink: 255 };
    let layout = KernLayout::new(true).wrapped(&font, &cps("ab cd"), 25).unwrap();
    let buf = RasterRenderer::new()
        .render(
            &layout,
            &font.line_metrics(),
            FontStyle::NORMAL,
            QualityTier::BlendedWrapped { wrap_width: 25 },
            Color::white(),
        )
        .unwrap();
    assert_eq!(buf.height(), 24);
    assert_eq!(buf.width(), 20);
    // Second line's first glyph at the same column as the first line's
    assert_eq!(buf.pixel(2, 12)[3], 255);
    assert_eq!(buf.pixel(2, 0)[3], 255);
}

#[test]
fn empty_text_is_an_error() {
    let err = render("", FontStyle::NORMAL, QualityTier::Blended).unwrap_err();
    assert!(matches!(err, PixtextError::Render(RenderError::ZeroWidth)));
}

#[test]
fn oversized_layout_is_rejected() {
    let layout = TextLayout {
        lines: vec![Line {
            glyphs: Vec::new(),
            width: 70_000,
            content_width: 70_000,
        }],
        width: 70_000,
        height: 12,
        line_height: 12,
        missing: Vec::new(),
    };
    let err = RasterRenderer::new()
        .render(
            &layout,
            &BlockFont { ink: 255 }.line_metrics(),
            FontStyle::NORMAL,
            QualityTier::Solid,
            Color::white(),
        )
        .unwrap_err();
    assert!(matches!(err, PixtextError::Render(RenderError::TooLarge { .. })));
}

fn wide_layout(width: u32) -> TextLayout {
    TextLayout {
        lines: vec![Line {
            glyphs: Vec::new(),
            width,
            content_width: width,
        }],
        width,
        height: 12,
        line_height: 12,
        missing: Vec::new(),
    }
}

#[test]
fn row_pitch_limit_depends_on_tier() {
    // 20_000 RGBA pixels need an 80_000 byte row
    let layout = wide_layout(20_000);
    let metrics = BlockFont { ink: 255 }.line_metrics();
    let renderer = RasterRenderer::new();

    let err = renderer
        .render(&layout, &metrics, FontStyle::NORMAL, QualityTier::Blended, Color::white())
        .unwrap_err();
    assert!(matches!(
        err,
        PixtextError::Render(RenderError::TooLarge {
            width: 20_000,
            height: 12
        })
    ));

    let solid = renderer
        .render(&layout, &metrics, FontStyle::NORMAL, QualityTier::Solid, Color::white())
        .unwrap();
    assert_eq!(solid.width(), 20_000);
    assert_eq!(solid.row_pitch(), 20_000);
}

#[test]
fn solid_threshold_is_half_coverage() {
    let font = BlockFont { ink: 127 };
    let layout = KernLayout::new(true).single_line(&font, &cps("a")).unwrap();
    let buf = RasterRenderer::new()
        .render(&layout, &font.line_metrics(), FontStyle::NORMAL, QualityTier::Solid, Color::white())
        .unwrap();
    assert!(buf.pixels().iter().all(|&p| p == 0));

    let font = BlockFont { ink: 128 };
    let layout = KernLayout::new(true).single_line(&font, &cps("a")).unwrap();
    let buf = RasterRenderer::new()
        .render(&layout, &font.line_metrics(), FontStyle::NORMAL, QualityTier::Solid, Color::white())
        .unwrap();
    assert_eq!(buf.pixel(2, 0), &[1]);
}

proptest! {
    #[test]
    fn payload_is_pitch_times_height(text in "[a-z .]{1,24}", tier_index in 0usize..3) {
        let tier = [
            QualityTier::Solid,
            QualityTier::Shaded { background: Color::black() },
            QualityTier::Blended,
        ][tier_index];
        let buf = render(&text, FontStyle::UNDERLINE, tier).unwrap();
        prop_assert_eq!(buf.pixels().len(), buf.row_pitch() as usize * buf.height() as usize);
        prop_assert_eq!(buf.width() as usize, text.chars().count() * 10);
    }
}
