//! Glyph outline to path conversion

use ttf_parser::OutlineBuilder;

/// Path builder that converts ttf-parser outlines to tiny-skia paths.
///
/// Coordinates are kept in font units with the font's Y-up convention;
/// scaling and the vertical flip belong to whoever draws the path.
pub struct OutlinePath {
    builder: tiny_skia::PathBuilder,
}

impl OutlinePath {
    pub fn new() -> Self {
        Self {
            builder: tiny_skia::PathBuilder::new(),
        }
    }

    /// Finish the path. `None` when no contour was emitted.
    pub fn finish(self) -> Option<tiny_skia::Path> {
        self.builder.finish()
    }
}

impl Default for OutlinePath {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineBuilder for OutlinePath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
