//! Plain-text PPM (P3) output

use std::io::Write;

use pixtext_core::Color;

use crate::{Result, RgbaSurface, SurfaceExporter};

/// Writes surfaces as ASCII PPM
///
/// PPM has no alpha channel, so pixels are composited over a background
/// color first.
#[derive(Debug, Clone, Copy)]
pub struct PpmExporter {
    background: Color,
}

impl PpmExporter {
    pub fn new(background: Color) -> Self {
        Self { background }
    }

    pub fn background(&self) -> Color {
        self.background
    }
}

impl Default for PpmExporter {
    fn default() -> Self {
        Self::new(Color::white())
    }
}

impl SurfaceExporter for PpmExporter {
    fn name(&self) -> &'static str {
        "ppm"
    }

    fn extension(&self) -> &'static str {
        "ppm"
    }

    fn export(&self, surface: &RgbaSurface) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        writeln!(&mut output, "P3")?;
        writeln!(&mut output, "{} {}", surface.width(), surface.height())?;
        writeln!(&mut output, "255")?;

        let rgb = surface.flatten(self.background);
        let row_len = surface.width() as usize * 3;
        if row_len > 0 {
            for row in rgb.chunks(row_len) {
                let line: Vec<String> = row.iter().map(u8::to_string).collect();
                writeln!(&mut output, "{}", line.join(" "))?;
            }
        }
        Ok(output)
    }
}
