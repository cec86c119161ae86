//! Font-unit to pixel conversion
//!
//! All pixel quantities derived here are truncated toward zero from one
//! shared scale factor, so every glyph in the atlas rounds the same way.

use fos_text::GlyphId;

use crate::source::FontMetricsSource;
use crate::{BakeError, Result};

/// Face-wide metrics in pixels, computed once per bake
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontFaceMetrics {
    pub units_per_em: u16,
    /// Pixels per font unit
    pub scale_factor: f64,
    pub ascent_px: f64,
    /// Usually negative
    pub descent_px: f64,
    pub line_gap_px: f64,
    /// Height of every atlas row and glyph cell
    pub row_height_px: i32,
    /// Distance from a cell's top edge to the baseline
    pub baseline_offset_px: f64,
}

impl FontFaceMetrics {
    /// Scale a font-unit quantity to whole pixels, truncating toward zero
    pub fn to_pixels(&self, units: i32) -> i32 {
        (units as f64 * self.scale_factor) as i32
    }

    /// Baseline offset as recorded in the glyph index
    pub fn baseline_offset(&self) -> i32 {
        self.baseline_offset_px as i32
    }
}

/// One bakeable codepoint with its font-unit metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSource {
    pub codepoint: u32,
    pub glyph: GlyphId,
    pub advance_units: u16,
    pub lsb_units: i16,
}

/// Pixel layout of one glyph cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphLayout {
    pub pixel_advance: i32,
    pub pixel_lsb: i32,
    /// Extra room reserved left of the origin for ink with a negative bearing
    pub x_offset: i32,
    /// The negative bearing, or 0
    pub bearing_x: i32,
    /// `pixel_advance + x_offset`
    pub cell_width: i32,
}

impl GlyphLayout {
    pub fn new(glyph: &GlyphSource, metrics: &FontFaceMetrics) -> Self {
        let pixel_advance = metrics.to_pixels(glyph.advance_units as i32);
        let pixel_lsb = metrics.to_pixels(glyph.lsb_units as i32);

        // Saturate rather than wrap: an absurd cell comes out too wide
        // for any atlas instead of overflowing
        let (x_offset, bearing_x) = if pixel_lsb < 0 {
            (pixel_lsb.saturating_neg(), pixel_lsb)
        } else {
            (0, 0)
        };

        Self {
            pixel_advance,
            pixel_lsb,
            x_offset,
            bearing_x,
            cell_width: pixel_advance.saturating_add(x_offset),
        }
    }
}

/// Glyph list produced by [`MetricsAdapter::glyph_sources`]
#[derive(Debug, Clone, Default)]
pub struct GlyphSources {
    /// Eligible glyphs, strictly ascending by codepoint
    pub glyphs: Vec<GlyphSource>,
    /// Codepoints skipped because their glyph has no horizontal metrics
    pub missing_metrics: Vec<u32>,
}

/// Converts a font's metrics into pixel space for one font size
#[derive(Debug, Clone, Copy)]
pub struct MetricsAdapter {
    font_size_px: f64,
}

impl MetricsAdapter {
    pub fn new(font_size_px: f64) -> Self {
        Self { font_size_px }
    }

    /// Compute face metrics. Fails on a zero unit-per-em or a face whose
    /// rows would have no height.
    pub fn face_metrics<S>(&self, source: &S) -> Result<FontFaceMetrics>
    where
        S: FontMetricsSource + ?Sized,
    {
        let units_per_em = source.units_per_em();
        if units_per_em == 0 {
            return Err(BakeError::InvalidMetrics("units per em is zero".into()));
        }

        let scale_factor = self.font_size_px / units_per_em as f64;
        let vertical = source.vertical_metrics();
        let ascent_px = vertical.ascender as f64 * scale_factor;
        let descent_px = vertical.descender as f64 * scale_factor;
        let line_gap_px = vertical.line_gap as f64 * scale_factor;

        let row_height_px = (ascent_px - descent_px + line_gap_px) as i32;
        if row_height_px <= 0 {
            return Err(BakeError::InvalidMetrics(format!(
                "row height is {row_height_px}px (ascender {}, descender {}, line gap {})",
                vertical.ascender, vertical.descender, vertical.line_gap
            )));
        }

        Ok(FontFaceMetrics {
            units_per_em,
            scale_factor,
            ascent_px,
            descent_px,
            line_gap_px,
            row_height_px,
            baseline_offset_px: ascent_px,
        })
    }

    /// Enumerate bakeable glyphs in ascending codepoint order.
    ///
    /// Codepoints below `first_codepoint` are dropped silently; codepoints
    /// whose glyph lacks horizontal metrics are logged and skipped.
    pub fn glyph_sources<S>(&self, source: &S, first_codepoint: u32) -> GlyphSources
    where
        S: FontMetricsSource + ?Sized,
    {
        let mut mapping = source.char_map();
        mapping.sort_by_key(|&(codepoint, _)| codepoint);
        mapping.dedup_by_key(|&mut (codepoint, _)| codepoint);

        tracing::info!("Found {} characters in font", mapping.len());

        let mut sources = GlyphSources::default();
        for (codepoint, glyph) in mapping {
            if codepoint < first_codepoint {
                continue;
            }

            match source.horizontal_metrics(glyph) {
                Some(metrics) => sources.glyphs.push(GlyphSource {
                    codepoint,
                    glyph,
                    advance_units: metrics.advance,
                    lsb_units: metrics.left_side_bearing,
                }),
                None => {
                    tracing::warn!(
                        "Glyph {} (U+{:04X}) has no horizontal metrics, skipping",
                        glyph.0,
                        codepoint
                    );
                    sources.missing_metrics.push(codepoint);
                }
            }
        }

        sources
    }
}
