//! Line breaking for wrapped layout

use std::ops::Range;

use pixtext_core::{error::Result, traits::GlyphProvider};
use pixtext_unicode::CodePoint;

use crate::LineRun;

/// Code points that always end a line
pub fn is_hard_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whitespace a line may be broken at
fn is_break_space(ch: char) -> bool {
    ch.is_whitespace()
        && !is_hard_break(ch)
        && !matches!(ch, '\u{00A0}' | '\u{2007}' | '\u{202F}')
}

/// Splits text at hard line breaks, dropping the breaks
///
/// `\r\n` counts as one break. A break at the very end does not start a
/// new, empty paragraph.
pub fn paragraphs(text: &[CodePoint]) -> Vec<&[CodePoint]> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < text.len() {
        let ch = text[i].ch;
        if is_hard_break(ch) {
            out.push(&text[start..i]);
            if ch == '\r' && text.get(i + 1).map(|cp| cp.ch) == Some('\n') {
                i += 1;
            }
            start = i + 1;
        }
        i += 1;
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

/// Ranges of one paragraph that become lines
///
/// A line is broken only once its width strictly exceeds `wrap_width`, at
/// the last whitespace run that follows some non-whitespace on the line.
/// The whole run is dropped, and so is whitespace left at the start of the
/// next line. Leading whitespace of the paragraph itself is kept.
pub(crate) fn break_paragraph<P>(
    provider: &P,
    paragraph: &[CodePoint],
    wrap_width: u32,
    kerning: bool,
    outline: i32,
) -> Result<Vec<Range<usize>>>
where
    P: GlyphProvider + ?Sized,
{
    if paragraph.is_empty() {
        return Ok(vec![0..0]);
    }

    let limit = i64::from(wrap_width);
    let mut ranges = Vec::new();
    let mut ignored = Vec::new();
    let mut start = 0;

    while start < paragraph.len() {
        let mut run = LineRun::new(kerning, outline);
        // First and last index of the latest breakable whitespace run
        let mut gap: Option<(usize, usize)> = None;
        let mut seen_word = false;
        let mut end = paragraph.len();
        let mut next = paragraph.len();

        for (i, &cp) in paragraph.iter().enumerate().skip(start) {
            run.push(provider, cp, &mut ignored)?;
            if !is_break_space(cp.ch) {
                seen_word = true;
            } else if seen_word {
                gap = match gap {
                    Some((first, last)) if last + 1 == i => Some((first, i)),
                    _ => Some((i, i)),
                };
            }
            if i64::from(run.width()) > limit {
                if let Some((first, last)) = gap {
                    end = first;
                    next = last + 1;
                    break;
                }
            }
        }

        ranges.push(start..end);
        while next < paragraph.len() && is_break_space(paragraph[next].ch) {
            next += 1;
        }
        start = next;
    }
    Ok(ranges)
}
