//! 8-bit coverage canvas that glyphs are composited onto

use pixtext_core::types::GlyphBitmap;

/// Coverage for the whole rendered text, one byte per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Draws a coverage mask with its top-left corner at (x, y)
    ///
    /// Overlapping glyphs keep the stronger coverage. Anything outside the
    /// canvas is clipped.
    pub fn draw(&mut self, bitmap: &GlyphBitmap, x: i32, y: i32) {
        for row in 0..bitmap.height {
            let dy = y + row as i32;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for col in 0..bitmap.width {
                let dx = x + col as i32;
                if dx < 0 || dx >= self.width as i32 {
                    continue;
                }
                let src = bitmap.data[(row * bitmap.width + col) as usize];
                let dst = &mut self.data[dy as usize * self.width as usize + dx as usize];
                *dst = (*dst).max(src);
            }
        }
    }

    /// Fills `thickness` full-width rows starting at `top`
    pub fn fill_rows(&mut self, top: i32, thickness: i32) {
        let start = top.max(0);
        let end = (top + thickness).min(self.height as i32);
        for y in start..end {
            let offset = y as usize * self.width as usize;
            self.data[offset..offset + self.width as usize].fill(255);
        }
    }
}
