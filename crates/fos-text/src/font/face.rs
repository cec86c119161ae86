//! Font face with parsed metrics

use std::collections::BTreeMap;

use ttf_parser::{Face, GlyphId};

use super::{HorizontalMetrics, VerticalMetrics};
use crate::render::{foreground_color, ColorPainter, OutlinePath, DEFAULT_PALETTE};
use crate::{Result, TextError};

/// Parsed font face with metrics
pub struct FontFace<'a> {
    /// The underlying ttf-parser face
    face: Face<'a>,
}

impl<'a> FontFace<'a> {
    /// Parse a font face from data.
    ///
    /// ttf-parser already refuses faces without `head`/`hhea`; the baker
    /// additionally needs `cmap` and `hmtx`, so their absence is an error here
    /// rather than an empty atlas later.
    pub fn parse(data: &'a [u8], index: u32) -> Result<Self> {
        let face = Face::parse(data, index)
            .map_err(|e| TextError::FontParsing(e.to_string()))?;

        let tables = face.tables();
        if tables.cmap.is_none() {
            return Err(TextError::MissingTable("cmap"));
        }
        if tables.hmtx.is_none() {
            return Err(TextError::MissingTable("hmtx"));
        }

        tracing::debug!(
            "Parsed font face {} with {} glyphs",
            index,
            face.number_of_glyphs()
        );
        Ok(Self { face })
    }

    /// Units per em
    pub fn units_per_em(&self) -> u16 {
        self.face.units_per_em()
    }

    /// Ascender/descender/line gap from `hhea`.
    ///
    /// Read from the table directly: `Face::ascender` prefers OS/2 typo
    /// metrics when USE_TYPO_METRICS is set, which would shift the baseline.
    pub fn vertical_metrics(&self) -> VerticalMetrics {
        let hhea = self.face.tables().hhea;
        VerticalMetrics {
            ascender: hhea.ascender,
            descender: hhea.descender,
            line_gap: hhea.line_gap,
        }
    }

    /// Every mapped codepoint with its glyph, ascending by codepoint.
    ///
    /// Unicode subtables are merged; the first subtable to map a codepoint
    /// wins. Mappings to glyph 0 (`.notdef`) are dropped.
    pub fn char_map(&self) -> Vec<(u32, GlyphId)> {
        let mut map = BTreeMap::new();
        let Some(cmap) = self.face.tables().cmap else {
            return Vec::new();
        };

        for subtable in cmap.subtables {
            if !subtable.is_unicode() {
                continue;
            }
            subtable.codepoints(|codepoint| {
                if let Some(glyph) = subtable.glyph_index(codepoint) {
                    if glyph.0 != 0 {
                        map.entry(codepoint).or_insert(glyph);
                    }
                }
            });
        }

        map.into_iter().collect()
    }

    /// Advance and left side bearing from `hmtx`
    pub fn horizontal_metrics(&self, glyph_id: GlyphId) -> Option<HorizontalMetrics> {
        let advance = self.face.glyph_hor_advance(glyph_id)?;
        let left_side_bearing = self.face.glyph_hor_side_bearing(glyph_id)?;
        Some(HorizontalMetrics {
            advance,
            left_side_bearing,
        })
    }

    /// Glyph outline in font units (Y up). `None` for glyphs without contours.
    pub fn outline(&self, glyph_id: GlyphId) -> Option<tiny_skia::Path> {
        let mut builder = OutlinePath::new();
        self.face.outline_glyph(glyph_id, &mut builder)?;
        builder.finish()
    }

    /// Whether the glyph has a `COLR` definition
    pub fn is_color_glyph(&self, glyph_id: GlyphId) -> bool {
        self.face.is_color_glyph(glyph_id)
    }

    /// Paint a `COLR` glyph with the default palette into `target`.
    ///
    /// `transform` maps font units to pixels; composite layers are
    /// allocated over `region`. Returns `false` if the glyph has no color
    /// definition or nothing in it could be painted.
    pub fn paint_color_glyph(
        &self,
        glyph_id: GlyphId,
        target: &mut tiny_skia::Pixmap,
        transform: tiny_skia::Transform,
        region: tiny_skia::IntRect,
    ) -> bool {
        // Shorten the face's lifetime to the borrow so the painter can hold it
        let face: &Face<'_> = &self.face;
        let mut painter = ColorPainter::new(face, target, transform, region);
        let found = face
            .paint_color_glyph(glyph_id, DEFAULT_PALETTE, foreground_color(), &mut painter)
            .is_some();
        found && painter.painted()
    }

    /// Number of glyphs in font
    pub fn number_of_glyphs(&self) -> u16 {
        self.face.number_of_glyphs()
    }
}
