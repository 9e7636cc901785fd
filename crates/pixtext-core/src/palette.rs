//! Palettes for indexed (Solid and Shaded) buffers

use crate::types::Color;

/// Colors for the indices of an 8-bit buffer
///
/// Built fresh for each render call from the caller's colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Color>,
    color_key: Option<u8>,
}

impl Palette {
    /// Two entries: index 1 is the foreground, index 0 a transparent key
    ///
    /// The key color is the channel-wise complement of the foreground so it
    /// can never collide with it.
    pub fn solid(foreground: Color) -> Self {
        let key = Color::rgb(255 - foreground.r, 255 - foreground.g, 255 - foreground.b);
        Self {
            entries: vec![key, Color::rgb(foreground.r, foreground.g, foreground.b)],
            color_key: Some(0),
        }
    }

    /// 256 entries ramping linearly from background (0) to foreground (255)
    pub fn shaded(foreground: Color, background: Color) -> Self {
        let entries = (0..=255i32)
            .map(|i| {
                Color::rgb(
                    ramp(background.r, foreground.r, i),
                    ramp(background.g, foreground.g, i),
                    ramp(background.b, foreground.b, i),
                )
            })
            .collect();
        Self {
            entries,
            color_key: None,
        }
    }

    pub fn entries(&self) -> &[Color] {
        &self.entries
    }

    pub fn get(&self, index: u8) -> Option<Color> {
        self.entries.get(index as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index that should be treated as fully transparent, if any
    pub fn color_key(&self) -> Option<u8> {
        self.color_key
    }
}

fn ramp(bg: u8, fg: u8, i: i32) -> u8 {
    let (bg, fg) = (bg as i32, fg as i32);
    (bg + (i * (fg - bg)) / 255) as u8
}
