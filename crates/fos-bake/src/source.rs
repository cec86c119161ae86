//! Capabilities the baker is built on
//!
//! The pipeline only talks to a font, a rasterizer and an image encoder
//! through these traits. `fos_text::FontFace` implements the first two
//! (see [`crate::ttf`]); [`crate::PngEncoder`] implements the third.

use fos_text::{GlyphId, HorizontalMetrics, VerticalMetrics};

use crate::canvas::AtlasCanvas;
use crate::packer::CellRect;
use crate::Result;

/// Font-unit metrics of a single face
pub trait FontMetricsSource {
    /// Units per em, expected to be non-zero
    fn units_per_em(&self) -> u16;

    /// Face-wide ascender/descender/line gap
    fn vertical_metrics(&self) -> VerticalMetrics;

    /// Codepoint to glyph mapping. Order and duplicates are not significant.
    fn char_map(&self) -> Vec<(u32, GlyphId)>;

    /// Horizontal metrics of a glyph, `None` if the font has no entry for it
    fn horizontal_metrics(&self, glyph: GlyphId) -> Option<HorizontalMetrics>;
}

/// Draws glyphs onto an atlas canvas
pub trait GlyphRasterizer {
    /// Draw `glyph` in font units through the canvas's current transform.
    ///
    /// `cell` is the pixel region reserved for the glyph. Ink is not
    /// clipped to it; rasterizers that need scratch surfaces size them by it.
    ///
    /// Returns `false` when the glyph has nothing to draw (e.g. a space).
    fn draw_glyph(&self, glyph: GlyphId, cell: CellRect, canvas: &mut AtlasCanvas) -> bool;
}

/// Encodes a finished atlas canvas into an image file
pub trait ImageEncoder {
    /// File extension of the encoded image, without the dot
    fn extension(&self) -> &str;

    /// Encode the canvas losslessly
    fn encode(&self, canvas: &AtlasCanvas) -> Result<Vec<u8>>;
}
