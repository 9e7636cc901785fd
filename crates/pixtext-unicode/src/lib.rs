// this_file: crates/pixtext-unicode/src/lib.rs

//! Turns encoded text into code points for layout.
//!
//! Three encodings come in, one shape goes out: a list of [`CodePoint`]s that
//! remember where in the source each character started. Decoding is
//! all-or-nothing; malformed input yields an [`EncodingError`] and no output.
//!
//! 16-bit text may carry byte-order marks anywhere. [`UNICODE_BOM_NATIVE`]
//! switches the rest of the string to native order and [`UNICODE_BOM_SWAPPED`]
//! to swapped order. The marks themselves are dropped. Without a mark the
//! normalizer's default applies, normally taken from the process-wide
//! [`Context`].

use pixtext_core::{context::Context, EncodingError, TextInput};

/// Byte-order mark as it reads in native order
pub const UNICODE_BOM_NATIVE: u16 = 0xFEFF;
/// Byte-order mark as it reads in swapped order
pub const UNICODE_BOM_SWAPPED: u16 = 0xFFFE;

/// A decoded character and its position in the source
///
/// `offset` counts bytes for Latin-1 and UTF-8 and 16-bit units for UTF-16.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePoint {
    pub ch: char,
    pub offset: usize,
}

/// Decodes any [`TextInput`] to code points
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    byte_swapped: bool,
}

impl TextNormalizer {
    /// A normalizer whose unmarked 16-bit text is native (`false`) or swapped
    pub fn new(byte_swapped: bool) -> Self {
        Self { byte_swapped }
    }

    /// Picks up the byte-order default from a context
    pub fn from_context(ctx: &Context) -> Self {
        Self::new(ctx.is_byte_swapped())
    }

    pub fn byte_swapped(&self) -> bool {
        self.byte_swapped
    }

    pub fn decode(&self, input: TextInput<'_>) -> Result<Vec<CodePoint>, EncodingError> {
        let decoded = match input {
            TextInput::Latin1(bytes) => decode_latin1(bytes),
            TextInput::Utf8(bytes) => decode_utf8(bytes)?,
            TextInput::Utf16(units) => decode_utf16(units, self.byte_swapped)?,
        };
        log::debug!(
            "Decoded {:?} input into {} code points",
            input.encoding(),
            decoded.len()
        );
        Ok(decoded)
    }

    /// Decodes and keeps only the characters
    pub fn decode_chars(&self, input: TextInput<'_>) -> Result<Vec<char>, EncodingError> {
        Ok(self.decode(input)?.into_iter().map(|cp| cp.ch).collect())
    }
}

fn decode_latin1(bytes: &[u8]) -> Vec<CodePoint> {
    bytes
        .iter()
        .enumerate()
        .map(|(offset, &b)| CodePoint {
            ch: char::from(b),
            offset,
        })
        .collect()
}

fn decode_utf8(bytes: &[u8]) -> Result<Vec<CodePoint>, EncodingError> {
    let text = std::str::from_utf8(bytes).map_err(|e| EncodingError::InvalidUtf8 {
        offset: e.valid_up_to(),
    })?;
    Ok(text
        .char_indices()
        .map(|(offset, ch)| CodePoint { ch, offset })
        .collect())
}

fn decode_utf16(units: &[u16], default_swapped: bool) -> Result<Vec<CodePoint>, EncodingError> {
    let mut swapped = default_swapped;
    let mut out = Vec::with_capacity(units.len());
    let mut pending_high: Option<(u16, usize)> = None;

    for (offset, &raw) in units.iter().enumerate() {
        if matches!(raw, UNICODE_BOM_NATIVE | UNICODE_BOM_SWAPPED) {
            // A mark cannot sit between the halves of a pair
            if let Some((unit, offset)) = pending_high {
                return Err(EncodingError::UnpairedSurrogate { unit, offset });
            }
            swapped = raw == UNICODE_BOM_SWAPPED;
            continue;
        }

        let unit = if swapped { raw.swap_bytes() } else { raw };
        match (pending_high.take(), unit) {
            (None, 0xD800..=0xDBFF) => pending_high = Some((unit, offset)),
            (None, 0xDC00..=0xDFFF) => {
                return Err(EncodingError::UnpairedSurrogate { unit, offset });
            }
            (None, _) => out.push(CodePoint {
                ch: char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER),
                offset,
            }),
            (Some((high, start)), 0xDC00..=0xDFFF) => {
                let value = 0x10000 + (((high as u32) - 0xD800) << 10) + ((unit as u32) - 0xDC00);
                out.push(CodePoint {
                    ch: char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER),
                    offset: start,
                });
            }
            (Some((high, start)), _) => {
                return Err(EncodingError::UnpairedSurrogate {
                    unit: high,
                    offset: start,
                });
            }
        }
    }

    if let Some((unit, offset)) = pending_high {
        return Err(EncodingError::UnpairedSurrogate { unit, offset });
    }
    Ok(out)
}


#[cfg(test)]
mod proptests;
