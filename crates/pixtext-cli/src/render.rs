//! The render run: open, configure, measure, render, write

use std::path::{Path, PathBuf};

use pixtext::{Color, FontHandle, PixtextError, QualityTier, RenderedBuffer, TextInput};
use pixtext_export::{exporter_for, ExportError, PngExporter, RgbaSurface, SurfaceExporter};
use thiserror::Error;

use crate::cli::{Cli, EncodingArg};

/// Code points written by `--dump`
pub const DUMP_RANGE: std::ops::Range<u32> = 48..123;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Pixtext(#[from] PixtextError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("No exporter for {0}")]
    UnknownFormat(PathBuf),
}

/// Text in the form the chosen encoding hands to the library
enum EncodedText {
    Bytes(Vec<u8>),
    Units(Vec<u16>),
}

impl EncodedText {
    fn new(text: &str, encoding: EncodingArg) -> Self {
        match encoding {
            EncodingArg::Utf8 => EncodedText::Bytes(text.as_bytes().to_vec()),
            EncodingArg::Utf16 => EncodedText::Units(text.encode_utf16().collect()),
            EncodingArg::Latin1 => EncodedText::Bytes(
                text.chars()
                    .map(|ch| {
                        u8::try_from(u32::from(ch)).unwrap_or_else(|_| {
                            log::warn!("{:?} is outside Latin-1, using '?'", ch);
                            b'?'
                        })
                    })
                    .collect(),
            ),
        }
    }

    fn input(&self, encoding: EncodingArg) -> TextInput<'_> {
        match (self, encoding) {
            (EncodedText::Units(units), _) => TextInput::Utf16(units),
            (EncodedText::Bytes(bytes), EncodingArg::Latin1) => TextInput::Latin1(bytes),
            (EncodedText::Bytes(bytes), _) => TextInput::Utf8(bytes),
        }
    }
}

/// Runs one invocation between `init` and `quit`
pub fn run(cli: &Cli) -> Result<(), RunError> {
    pixtext::init();
    let result = render_with(cli);
    pixtext::quit();
    result
}

fn render_with(cli: &Cli) -> Result<(), RunError> {
    let mut font = FontHandle::open(&cli.font, cli.ptsize)?;
    font.set_style(cli.style())?;
    font.set_outline(cli.outline)?;
    font.set_hinting(cli.hinting.into())?;
    font.set_kerning(!cli.no_kerning)?;

    let tier = cli.quality_tier();
    let encoded = EncodedText::new(&cli.text, cli.encoding);
    let input = encoded.input(cli.encoding);

    let (_, text_height) = font.size(input)?;
    println!(
        "Font is generally {} big, and string is {} big",
        font.height()?,
        text_height
    );

    if cli.dump {
        dump_glyphs(&font, cli.fgcol, cli.bgcol)?;
    }

    let caption = format!("Font file: {}", cli.font.display());
    let caption_buffer = font.render(caption.as_str().into(), tier, cli.fgcol)?;
    let message_buffer = font.render(input, tier, cli.fgcol)?;
    log::info!(
        "Rendered {}x{} {} text",
        message_buffer.width(),
        message_buffer.height(),
        tier.name()
    );

    if let Some(path) = &cli.output {
        let surface = RgbaSurface::vstack(&[
            to_surface(&caption_buffer, tier, cli.fgcol)?,
            to_surface(&message_buffer, tier, cli.fgcol)?,
        ]);
        write_surface(&surface, path, cli.bgcol)?;
        println!(
            "Wrote {}x{} pixels to {}",
            surface.width(),
            surface.height(),
            path.display()
        );
    }

    font.close()?;
    Ok(())
}

fn to_surface(
    buffer: &RenderedBuffer,
    tier: QualityTier,
    foreground: Color,
) -> Result<RgbaSurface, ExportError> {
    RgbaSurface::from_buffer(buffer, tier.palette(foreground).as_ref())
}

fn write_surface(surface: &RgbaSurface, path: &Path, background: Color) -> Result<(), RunError> {
    let exporter = exporter_for(path, background)
        .ok_or_else(|| RunError::UnknownFormat(path.to_path_buf()))?;
    exporter.write_file(surface, path)?;
    Ok(())
}

/// Writes each provided glyph in [`DUMP_RANGE`] to `glyph-<n>.png`
fn dump_glyphs(font: &FontHandle, foreground: Color, background: Color) -> Result<(), RunError> {
    let tier = QualityTier::Shaded { background };
    let exporter = PngExporter::new();
    let mut written = 0;
    for code in DUMP_RANGE {
        let Some(ch) = char::from_u32(code) else {
            continue;
        };
        if !font.glyph_is_provided(ch)? {
            log::warn!("Skipping {:?}: not in font", ch);
            continue;
        }
        let buffer = font.render_glyph(ch, tier, foreground)?;
        let surface = to_surface(&buffer, tier, foreground)?;
        exporter.write_file(&surface, Path::new(&format!("glyph-{code}.png")))?;
        written += 1;
    }
    log::info!("Dumped {} glyphs", written);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_replaces_wide_chars() {
        let encoded = EncodedText::new("aé€", EncodingArg::Latin1);
        match encoded.input(EncodingArg::Latin1) {
            TextInput::Latin1(bytes) => assert_eq!(bytes, &[b'a', 0xE9, b'?']),
            other => panic!("unexpected input {:?}", other.encoding()),
        }
    }

    #[test]
    fn utf16_keeps_units() {
        let encoded = EncodedText::new("a\u{1F600}", EncodingArg::Utf16);
        match encoded.input(EncodingArg::Utf16) {
            TextInput::Utf16(units) => assert_eq!(units.len(), 3),
            other => panic!("unexpected input {:?}", other.encoding()),
        }
    }

    #[test]
    fn dump_range_covers_digits_to_z() {
        assert!(DUMP_RANGE.contains(&u32::from('0')));
        assert!(DUMP_RANGE.contains(&u32::from('z')));
        assert!(!DUMP_RANGE.contains(&u32::from('{')));
    }
}
