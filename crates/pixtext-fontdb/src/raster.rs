//! Outline to coverage mask
//!
//! Outlines are drawn into an SVG path string with y flipped to screen
//! orientation, measured with kurbo, and filled by zeno.

use kurbo::Shape;
use pixtext_core::GlyphBitmap;
use zeno::Mask;

/// Collects a glyph outline as SVG path data in y-down pixel space
pub(crate) struct MaskPathPen {
    commands: Vec<String>,
    path: kurbo::BezPath,
}

impl MaskPathPen {
    pub(crate) fn new() -> Self {
        Self {
            commands: Vec::new(),
            path: kurbo::BezPath::new(),
        }
    }

    /// Fills the collected outline
    ///
    /// The returned bitmap's `left`/`top` place it relative to the pen
    /// origin, with `top` counted upward from the baseline.
    pub(crate) fn rasterize(self) -> GlyphBitmap {
        if self.path.elements().is_empty() {
            return GlyphBitmap::empty();
        }

        let bbox = self.path.bounding_box();
        if !bbox.is_finite() || bbox.width() <= 0.0 || bbox.height() <= 0.0 {
            return GlyphBitmap::empty();
        }

        let left = bbox.x0.floor() as i32;
        let right = bbox.x1.ceil() as i32;
        let top = bbox.y0.floor() as i32;
        let bottom = bbox.y1.ceil() as i32;
        let width = (right - left).max(1) as u32;
        let height = (bottom - top).max(1) as u32;

        let data = self.commands.join(" ");
        let mut mask = vec![0u8; (width * height) as usize];
        Mask::new(data.as_str())
            .size(width, height)
            .offset((-left, -top))
            .render_into(&mut mask, None);

        GlyphBitmap {
            width,
            height,
            left,
            top: -top,
            data: mask,
        }
    }
}

impl skrifa::outline::OutlinePen for MaskPathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        let y = -y;
        self.commands.push(format!("M {:.2},{:.2}", x, y));
        self.path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let y = -y;
        self.commands.push(format!("L {:.2},{:.2}", x, y));
        self.path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let (cy, y) = (-cy, -y);
        self.commands
            .push(format!("Q {:.2},{:.2} {:.2},{:.2}", cx, cy, x, y));
        self.path
            .quad_to((cx as f64, cy as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let (cy0, cy1, y) = (-cy0, -cy1, -y);
        self.commands.push(format!(
            "C {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            cx0, cy0, cx1, cy1, x, y
        ));
        self.path.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.commands.push("Z".to_string());
        self.path.close_path();
    }
}

/// Snaps coverage to fully on or off
pub(crate) fn threshold(bitmap: &mut GlyphBitmap) {
    for px in bitmap.data.iter_mut() {
        *px = if *px >= 128 { 255 } else { 0 };
    }
}
