//! Pair kerning from the legacy `kern` table

use std::collections::HashMap;

use ttf_parser::kern::Format;
use ttf_parser::GlyphId;

/// Horizontal kerning pairs of one face, read once when the face opens
///
/// Pair lists (format 0) are copied into a map. Class-based subtables
/// (formats 2 and 3) are only noted; lookups that miss the map consult them
/// through [`class_units`]. Vertical and variable subtables are ignored.
#[derive(Debug, Default)]
pub(crate) struct KernPairs {
    pairs: HashMap<(u16, u16), i16>,
    class_based: bool,
}

impl KernPairs {
    pub(crate) fn parse(data: &[u8], face_index: u32) -> Self {
        let mut kern = Self::default();
        let Ok(face) = ttf_parser::Face::parse(data, face_index) else {
            return kern;
        };
        let Some(table) = face.tables().kern else {
            return kern;
        };

        for subtable in table.subtables {
            if !subtable.horizontal || subtable.variable {
                continue;
            }
            match subtable.format {
                Format::Format0(list) => kern.insert_pairs(
                    list.pairs
                        .into_iter()
                        .map(|pair| (pair.left().0, pair.right().0, pair.value)),
                ),
                Format::Format2(_) | Format::Format3(_) => kern.class_based = true,
                _ => {}
            }
        }
        log::trace!(
            "kern: {} pairs, class tables: {}",
            kern.pairs.len(),
            kern.class_based
        );
        kern
    }

    /// Adds pairs; a pair already present keeps its first value
    pub(crate) fn insert_pairs(&mut self, pairs: impl IntoIterator<Item = (u16, u16, i16)>) {
        for (left, right, value) in pairs {
            self.pairs.entry((left, right)).or_insert(value);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pairs.is_empty() && !self.class_based
    }

    pub(crate) fn has_class_tables(&self) -> bool {
        self.class_based
    }

    /// Listed value for a glyph pair, in font units
    pub(crate) fn units(&self, left: u16, right: u16) -> Option<i16> {
        self.pairs.get(&(left, right)).copied()
    }
}

/// Kerning from class-based subtables, in font units
pub(crate) fn class_units(data: &[u8], face_index: u32, left: u16, right: u16) -> Option<i16> {
    let face = ttf_parser::Face::parse(data, face_index).ok()?;
    face.tables()
        .kern?
        .subtables
        .into_iter()
        .filter(|subtable| subtable.horizontal && !subtable.variable)
        .filter(|subtable| matches!(subtable.format, Format::Format2(_) | Format::Format3(_)))
        .find_map(|subtable| subtable.glyphs_kerning(GlyphId(left), GlyphId(right)))
}

/// Scales font units to whole pixels
pub(crate) fn to_pixels(units: i16, ppem: f32, units_per_em: u16) -> i32 {
    if units_per_em == 0 {
        return 0;
    }
    (units as f32 * ppem / units_per_em as f32).round() as i32
}
