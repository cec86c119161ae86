//! Font loading module

mod face;

pub use face::FontFace;

/// Face-wide vertical metrics in font units, as stored in `hhea`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerticalMetrics {
    /// Ascender (above baseline)
    pub ascender: i16,
    /// Descender (below baseline, usually negative)
    pub descender: i16,
    /// Line gap
    pub line_gap: i16,
}

/// Per-glyph horizontal metrics in font units, as stored in `hmtx`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HorizontalMetrics {
    /// Advance width
    pub advance: u16,
    /// Left side bearing (negative when ink starts left of the origin)
    pub left_side_bearing: i16,
}
