//! Kern layout - left-to-right advancement with pair kerning and word wrap
//!
//! Glyphs are placed one after another on a pen line. Between two provided
//! glyphs the pen moves by the pair's kerning delta. A line's extent runs
//! from the leftmost ink (or the origin) to the furthest of each glyph's
//! advance and right ink edge, so bold overhang and italic lean are never
//! clipped.
//!
//! Wrapped layout splits the text at hard line breaks first, then breaks a
//! paragraph at its last whitespace once a line grows wider than the limit.
//! Words are never split; a word wider than the limit gets a line to itself.
//!
//! A glyph the face does not provide is skipped and recorded in
//! [`TextLayout::missing`]. Any other failure from the provider aborts the
//! layout.

use std::sync::Arc;

use pixtext_core::{error::Result, traits::GlyphProvider, types::Glyph};
use pixtext_unicode::CodePoint;

mod wrap;

pub use wrap::{is_hard_break, paragraphs};

/// One glyph with its final horizontal position
#[derive(Debug, Clone)]
pub struct PlacedGlyph {
    pub ch: char,
    /// Offset of the character in the source text
    pub offset: usize,
    /// Pen origin relative to the left edge of the line, outline included
    pub x: i32,
    pub glyph: Arc<Glyph>,
}

/// A laid-out line of text
#[derive(Debug, Clone, Default)]
pub struct Line {
    pub glyphs: Vec<PlacedGlyph>,
    /// Full width including the outline on both sides
    pub width: u32,
    /// Extent of the glyphs alone
    pub content_width: u32,
}

/// The positioned result of a layout call
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    pub lines: Vec<Line>,
    /// Width of the widest line
    pub width: u32,
    pub height: u32,
    pub line_height: u32,
    /// Characters the face does not provide, in text order
    pub missing: Vec<char>,
}

impl TextLayout {
    /// True when there is nothing to draw horizontally
    pub fn is_zero_width(&self) -> bool {
        self.lines.iter().all(|line| line.content_width == 0)
    }

    pub fn glyph_count(&self) -> usize {
        self.lines.iter().map(|line| line.glyphs.len()).sum()
    }
}

/// Running pen state for one line
pub(crate) struct LineRun {
    kerning: bool,
    outline: i32,
    pen: i32,
    min_x: i32,
    max_x: i32,
    prev: Option<char>,
    placed: Vec<(CodePoint, i32, Arc<Glyph>)>,
}

impl LineRun {
    pub(crate) fn new(kerning: bool, outline: i32) -> Self {
        Self {
            kerning,
            outline,
            pen: 0,
            min_x: 0,
            max_x: 0,
            prev: None,
            placed: Vec::new(),
        }
    }

    /// Advances the pen over one character
    pub(crate) fn push<P>(
        &mut self,
        provider: &P,
        cp: CodePoint,
        missing: &mut Vec<char>,
    ) -> Result<()>
    where
        P: GlyphProvider + ?Sized,
    {
        let Some(glyph) = provider.glyph(cp.ch)? else {
            missing.push(cp.ch);
            self.prev = None;
            return Ok(());
        };

        if self.kerning {
            if let Some(prev) = self.prev {
                self.pen += provider.kerning(prev, cp.ch);
            }
        }

        let m = glyph.metrics;
        self.min_x = self.min_x.min(self.pen + m.min_x);
        self.max_x = self.max_x.max(self.pen + m.advance.max(m.max_x));
        self.placed.push((cp, self.pen, glyph));
        self.pen += m.advance;
        self.prev = Some(cp.ch);
        Ok(())
    }

    pub(crate) fn content_width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub(crate) fn width(&self) -> i32 {
        self.content_width() + 2 * self.outline
    }

    pub(crate) fn finish(self) -> Line {
        let shift = self.outline - self.min_x;
        let content_width = self.content_width().max(0) as u32;
        let width = self.width().max(0) as u32;
        Line {
            glyphs: self
                .placed
                .into_iter()
                .map(|(cp, pen, glyph)| PlacedGlyph {
                    ch: cp.ch,
                    offset: cp.offset,
                    x: pen + shift,
                    glyph,
                })
                .collect(),
            width,
            content_width,
        }
    }
}

/// Lays out code points with optional pair kerning
#[derive(Debug, Clone, Copy)]
pub struct KernLayout {
    kerning: bool,
}

impl KernLayout {
    pub fn new(kerning: bool) -> Self {
        Self { kerning }
    }

    pub fn kerning(&self) -> bool {
        self.kerning
    }

    /// All code points on one line; line breaks are not interpreted
    pub fn single_line<P>(&self, provider: &P, text: &[CodePoint]) -> Result<TextLayout>
    where
        P: GlyphProvider + ?Sized,
    {
        let line_metrics = provider.line_metrics();
        let mut missing = Vec::new();
        let line = self.line(provider, text, line_metrics.outline, &mut missing)?;
        log::debug!(
            "KernLayout: {} glyphs on one line, {}px wide",
            line.glyphs.len(),
            line.width
        );
        Ok(finish_layout(vec![line], line_metrics.line_height(), missing))
    }

    /// Breaks text into lines no wider than `wrap_width` where possible
    pub fn wrapped<P>(
        &self,
        provider: &P,
        text: &[CodePoint],
        wrap_width: u32,
    ) -> Result<TextLayout>
    where
        P: GlyphProvider + ?Sized,
    {
        let line_metrics = provider.line_metrics();
        let mut missing = Vec::new();
        let mut lines = Vec::new();

        for paragraph in paragraphs(text) {
            for range in wrap::break_paragraph(
                provider,
                paragraph,
                wrap_width,
                self.kerning,
                line_metrics.outline,
            )? {
                lines.push(self.line(
                    provider,
                    &paragraph[range],
                    line_metrics.outline,
                    &mut missing,
                )?);
            }
        }

        log::debug!(
            "KernLayout: wrapped {} code points into {} lines at {}px",
            text.len(),
            lines.len(),
            wrap_width
        );
        Ok(finish_layout(lines, line_metrics.line_height(), missing))
    }

    /// A single glyph, starting at its left ink edge
    ///
    /// Returns `None` when the face does not provide the character.
    pub fn glyph<P>(&self, provider: &P, ch: char) -> Result<Option<TextLayout>>
    where
        P: GlyphProvider + ?Sized,
    {
        let line_metrics = provider.line_metrics();
        let Some(glyph) = provider.glyph(ch)? else {
            return Ok(None);
        };
        let m = glyph.metrics;
        let content_width = (m.advance.max(m.max_x) - m.min_x).max(0);
        let width = content_width + 2 * line_metrics.outline;
        let line = Line {
            glyphs: vec![PlacedGlyph {
                ch,
                offset: 0,
                x: line_metrics.outline - m.min_x,
                glyph,
            }],
            width: width as u32,
            content_width: content_width as u32,
        };
        Ok(Some(finish_layout(
            vec![line],
            line_metrics.line_height(),
            Vec::new(),
        )))
    }

    fn line<P>(
        &self,
        provider: &P,
        text: &[CodePoint],
        outline: i32,
        missing: &mut Vec<char>,
    ) -> Result<Line>
    where
        P: GlyphProvider + ?Sized,
    {
        let mut run = LineRun::new(self.kerning, outline);
        for &cp in text {
            run.push(provider, cp, missing)?;
        }
        Ok(run.finish())
    }
}

impl Default for KernLayout {
    fn default() -> Self {
        Self::new(true)
    }
}

fn finish_layout(lines: Vec<Line>, line_height: i32, missing: Vec<char>) -> TextLayout {
    let line_height = line_height.max(0) as u32;
    if !missing.is_empty() {
        log::warn!(
            "{} characters not provided by the font, first is U+{:04X}",
            missing.len(),
            missing[0] as u32
        );
    }
    TextLayout {
        width: lines.iter().map(|l| l.width).max().unwrap_or(0),
        height: line_height * lines.len() as u32,
        line_height,
        lines,
        missing,
    }
}

#[cfg(test)]
mod tests;
