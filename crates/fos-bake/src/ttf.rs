//! Capability implementations for real font files

use fos_text::{FontFace, GlyphId, HorizontalMetrics, VerticalMetrics};
use tiny_skia::IntRect;

use crate::canvas::AtlasCanvas;
use crate::packer::CellRect;
use crate::source::{FontMetricsSource, GlyphRasterizer};

impl FontMetricsSource for FontFace<'_> {
    fn units_per_em(&self) -> u16 {
        FontFace::units_per_em(self)
    }

    fn vertical_metrics(&self) -> VerticalMetrics {
        FontFace::vertical_metrics(self)
    }

    fn char_map(&self) -> Vec<(u32, GlyphId)> {
        FontFace::char_map(self)
    }

    fn horizontal_metrics(&self, glyph: GlyphId) -> Option<HorizontalMetrics> {
        FontFace::horizontal_metrics(self, glyph)
    }
}

/// Paints `COLR` glyphs in their palette colors; every other glyph (and a
/// color glyph with nothing paintable) fills its outline with the canvas
/// paint
impl GlyphRasterizer for FontFace<'_> {
    fn draw_glyph(&self, glyph: GlyphId, cell: CellRect, canvas: &mut AtlasCanvas) -> bool {
        if self.is_color_glyph(glyph) {
            if let Some(region) =
                IntRect::from_xywh(cell.x as i32, cell.y as i32, cell.width, cell.height)
            {
                let transform = canvas.transform();
                if self.paint_color_glyph(glyph, canvas.pixmap_mut(), transform, region) {
                    return true;
                }
            }
            tracing::debug!("Color glyph {} painted nothing, using its outline", glyph.0);
        }

        match self.outline(glyph) {
            Some(path) => {
                canvas.fill_path(&path);
                true
            }
            None => false,
        }
    }
}
