use super::*;
use pixtext_core::error::{PixtextError, RenderError};
use pixtext_core::types::{GlyphBitmap, GlyphMetrics, LineMetrics};

// Block glyphs: letters advance 10 with 8px of ink starting 1px in,
// space advances 5, "AV" kerns by -3. Anything else is missing.
struct MockFont {
    outline: i32,
}

impl MockFont {
    fn new() -> Self {
        Self { outline: 0 }
    }
}

impl GlyphProvider for MockFont {
    fn line_metrics(&self) -> LineMetrics {
        LineMetrics {
            ascent: 10,
            descent: -3,
            outline: self.outline,
            line_skip: 14,
            ..LineMetrics::default()
        }
    }

    fn glyph(&self, ch: char) -> Result<Option<Arc<Glyph>>> {
        let glyph = match ch {
            ' ' => Glyph {
                metrics: GlyphMetrics {
                    advance: 5,
                    ..GlyphMetrics::default()
                },
                bitmap: GlyphBitmap::empty(),
            },
            c if c.is_ascii_alphabetic() => Glyph {
                metrics: GlyphMetrics {
                    min_x: 1,
                    max_x: 9,
                    min_y: 0,
                    max_y: 10,
                    advance: 10,
                },
                bitmap: GlyphBitmap {
                    width: 8,
                    height: 10,
                    left: 1,
                    top: 10,
                    data: vec![255; 80],
                },
            },
            _ => return Ok(None),
        };
        Ok(Some(Arc::new(glyph)))
    }

    fn kerning(&self, left: char, right: char) -> i32 {
        if (left, right) == ('A', 'V') {
            -3
        } else {
            0
        }
    }
}

fn cps(text: &str) -> Vec<CodePoint> {
    text.char_indices()
        .map(|(offset, ch)| CodePoint { ch, offset })
        .collect()
}

fn line_text(line: &Line) -> String {
    line.glyphs.iter().map(|g| g.ch).collect()
}

#[test]
fn advances_accumulate() {
    let layout = KernLayout::new(true).single_line(&MockFont::new(), &cps("ab")).unwrap();
    assert_eq!(layout.lines.len(), 1);
    assert_eq!(layout.width, 20);
    assert_eq!(layout.height, 13);
    let xs: Vec<i32> = layout.lines[0].glyphs.iter().map(|g| g.x).collect();
    assert_eq!(xs, vec![0, 10]);
}

#[test]
fn kerning_pulls_pairs_together() {
    let font = MockFont::new();
    let kerned = KernLayout::new(true).single_line(&font, &cps("AV")).unwrap();
    let plain = KernLayout::new(false).single_line(&font, &cps("AV")).unwrap();
    assert_eq!(kerned.width, 17);
    assert_eq!(plain.width, 20);
    assert!(plain.width >= kerned.width);
    assert_eq!(kerned.lines[0].glyphs[1].x, 7);
}

#[test]
fn outline_pads_both_axes() {
    let font = MockFont { outline: 2 };
    let layout = KernLayout::new(true).single_line(&font, &cps("ab")).unwrap();
    assert_eq!(layout.width, 24);
    assert_eq!(layout.height, 17);
    assert_eq!(layout.lines[0].glyphs[0].x, 2);
}

#[test]
fn missing_glyphs_take_no_space() {
    let layout = KernLayout::new(true).single_line(&MockFont::new(), &cps("a€b")).unwrap();
    assert_eq!(layout.width, 20);
    assert_eq!(layout.missing, vec!['€']);
    assert_eq!(layout.glyph_count(), 2);
    assert_eq!(layout.lines[0].glyphs[1].offset, 4);
}

#[test]
fn empty_text_is_zero_width() {
    let layout = KernLayout::new(true).single_line(&MockFont::new(), &[]).unwrap();
    assert!(layout.is_zero_width());
    let layout = KernLayout::new(true).wrapped(&MockFont::new(), &[], 100).unwrap();
    assert!(layout.lines.is_empty());
    assert!(layout.is_zero_width());
}

#[test]
fn two_words_split_at_the_space() {
    // Each word is 50px, the space 5px
    let layout = KernLayout::new(true).wrapped(&MockFont::new(), &cps("hello world"), 60).unwrap();
    let lines: Vec<String> = layout.lines.iter().map(line_text).collect();
    assert_eq!(lines, vec!["hello", "world"]);
    assert_eq!(layout.width, 50);
    assert_eq!(layout.height, 26);
}

#[test]
fn long_word_keeps_its_own_line() {
    let layout = KernLayout::new(true).wrapped(&MockFont::new(), &cps("abcdefghij"), 30).unwrap();
    assert_eq!(layout.lines.len(), 1);
    assert_eq!(layout.width, 100);
    assert!(layout.width > 30);
}

#[test]
fn long_word_between_short_ones() {
    let layout =
        KernLayout::new(true).wrapped(&MockFont::new(), &cps("ab abcdefgh cd"), 30).unwrap();
    let lines: Vec<String> = layout.lines.iter().map(line_text).collect();
    assert_eq!(lines, vec!["ab", "abcdefgh", "cd"]);
    assert_eq!(layout.width, 80);
}

#[test]
fn exact_fit_does_not_break() {
    // "ab cd" is 20 + 5 + 20 = 45px
    let font = MockFont::new();
    let fits = KernLayout::new(true).wrapped(&font, &cps("ab cd"), 45).unwrap();
    assert_eq!(fits.lines.len(), 1);
    let over = KernLayout::new(true).wrapped(&font, &cps("ab cd"), 44).unwrap();
    assert_eq!(over.lines.len(), 2);
}

#[test]
fn hard_breaks_always_break() {
    let layout = KernLayout::new(true).wrapped(&MockFont::new(), &cps("ab\r\ncd\n"), 1000).unwrap();
    let lines: Vec<String> = layout.lines.iter().map(line_text).collect();
    assert_eq!(lines, vec!["ab", "cd"]);
}

#[test]
fn blank_line_counts_toward_height() {
    let layout = KernLayout::new(true).wrapped(&MockFont::new(), &cps("ab\n\ncd"), 1000).unwrap();
    assert_eq!(layout.lines.len(), 3);
    assert_eq!(layout.height, 39);
}

#[test]
fn wrapped_lines_restart_at_origin() {
    let layout = KernLayout::new(true).wrapped(&MockFont::new(), &cps("aa bb"), 20).unwrap();
    assert_eq!(layout.lines.len(), 2);
    assert_eq!(layout.lines[1].glyphs[0].x, 0);
    assert_eq!(layout.lines[1].glyphs[0].offset, 3);
}

#[test]
fn single_glyph_starts_at_ink() {
    let layout = KernLayout::new(true)
        .glyph(&MockFont::new(), 'a')
        .unwrap()
        .unwrap_or_default();
    assert_eq!(layout.width, 9);
    assert_eq!(layout.lines[0].glyphs[0].x, -1);
    assert!(KernLayout::new(true)
        .glyph(&MockFont::new(), '€')
        .unwrap()
        .is_none());
}

fn line_texts(layout: &TextLayout) -> Vec<String> {
    layout.lines.iter().map(line_text).collect()
}

#[test]
fn whitespace_run_is_dropped_at_a_break() {
    // "ab" is 20px, each space 5px; the second space pushes past 25
    let layout = KernLayout::new(true).wrapped(&MockFont::new(), &cps("ab  cd"), 25).unwrap();
    assert_eq!(line_texts(&layout), vec!["ab", "cd"]);
    assert_eq!(layout.width, 20);
    assert_eq!(layout.lines[1].glyphs[0].offset, 4);
}

#[test]
fn spaces_after_a_break_do_not_make_a_line() {
    let layout = KernLayout::new(true).wrapped(&MockFont::new(), &cps("ab   cd"), 22).unwrap();
    assert_eq!(line_texts(&layout), vec!["ab", "cd"]);
    assert_eq!(layout.height, 26);
    assert_eq!(layout.lines[1].glyphs[0].x, 0);
}

#[test]
fn trailing_spaces_past_the_limit_end_the_paragraph() {
    let layout = KernLayout::new(true).wrapped(&MockFont::new(), &cps("ab    "), 22).unwrap();
    assert_eq!(line_texts(&layout), vec!["ab"]);
}

#[test]
fn paragraph_indent_is_not_a_break_point() {
    let layout = KernLayout::new(true).wrapped(&MockFont::new(), &cps("  abcd"), 20).unwrap();
    assert_eq!(line_texts(&layout), vec!["  abcd"]);
    assert_eq!(layout.width, 50);
}

// Letters render, 'x' fails in the backend
struct BrokenFont;

impl GlyphProvider for BrokenFont {
    fn line_metrics(&self) -> LineMetrics {
        MockFont::new().line_metrics()
    }

    fn glyph(&self, ch: char) -> Result<Option<Arc<Glyph>>> {
        if ch == 'x' {
            return Err(RenderError::Backend("outline decode failed".into()).into());
        }
        MockFont::new().glyph(ch)
    }

    fn kerning(&self, _left: char, _right: char) -> i32 {
        0
    }
}

#[test]
fn provider_failure_aborts_layout() {
    let layout = KernLayout::new(true);
    for result in [
        layout.single_line(&BrokenFont, &cps("axb")),
        layout.wrapped(&BrokenFont, &cps("ab xb"), 20),
    ] {
        assert!(matches!(
            result,
            Err(PixtextError::Render(RenderError::Backend(_)))
        ));
    }
    assert!(layout.glyph(&BrokenFont, 'x').is_err());
    assert!(layout.single_line(&BrokenFont, &cps("a€b")).is_ok());
}
