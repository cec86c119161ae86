//! Minimal TrueType font files built in memory
//!
//! Just enough of `head`, `hhea`, `maxp`, `cmap` (format 12), `hmtx`,
//! `loca`/`glyf`, and optionally `OS/2`, `COLR` (v0) and `CPAL`, for
//! ttf-parser to load a face with real outlines. Checksums are left zero;
//! ttf-parser does not verify them.

#![allow(dead_code)]

/// One glyph: horizontal metrics plus a single closed contour of on-curve
/// points. An empty contour gives a glyph without outline.
#[derive(Debug, Clone)]
pub struct TestGlyph {
    pub advance: u16,
    pub lsb: i16,
    pub contour: Vec<(i16, i16)>,
}

impl TestGlyph {
    pub fn empty(advance: u16) -> Self {
        Self {
            advance,
            lsb: 0,
            contour: Vec::new(),
        }
    }

    /// Axis-aligned box; the left side bearing is its left edge
    pub fn rect(advance: u16, x0: i16, y0: i16, x1: i16, y1: i16) -> Self {
        Self {
            advance,
            lsb: x0,
            contour: vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)],
        }
    }
}

/// A cmap subtable: platform, encoding and (codepoint, glyph) pairs
#[derive(Debug, Clone)]
pub struct CmapSubtable {
    pub platform: u16,
    pub encoding: u16,
    pub mappings: Vec<(u32, u16)>,
}

#[derive(Debug, Clone)]
pub struct FontBuilder {
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub cmaps: Vec<CmapSubtable>,
    /// Glyph 0 is `.notdef`
    pub glyphs: Vec<TestGlyph>,
    /// OS/2 typo ascender/descender/line gap, written with USE_TYPO_METRICS
    pub typo_metrics: Option<(i16, i16, i16)>,
    /// COLR v0 base glyph to (layer glyph, palette index) layers
    pub color_glyphs: Vec<(u16, Vec<(u16, u16)>)>,
    /// CPAL palette 0, RGBA
    pub palette: Vec<[u8; 4]>,
    /// Tables left out of the file
    pub omit: Vec<[u8; 4]>,
}

impl FontBuilder {
    pub fn new(units_per_em: u16, ascender: i16, descender: i16, line_gap: i16) -> Self {
        Self {
            units_per_em,
            ascender,
            descender,
            line_gap,
            cmaps: Vec::new(),
            glyphs: vec![TestGlyph::empty(500)],
            typo_metrics: None,
            color_glyphs: Vec::new(),
            palette: Vec::new(),
            omit: Vec::new(),
        }
    }

    /// Append a glyph, returning the builder; ids are assigned in order
    pub fn glyph(mut self, glyph: TestGlyph) -> Self {
        self.glyphs.push(glyph);
        self
    }

    pub fn cmap(mut self, platform: u16, encoding: u16, mappings: &[(u32, u16)]) -> Self {
        self.cmaps.push(CmapSubtable {
            platform,
            encoding,
            mappings: mappings.to_vec(),
        });
        self
    }

    pub fn typo_metrics(mut self, ascender: i16, descender: i16, line_gap: i16) -> Self {
        self.typo_metrics = Some((ascender, descender, line_gap));
        self
    }

    pub fn color_glyph(mut self, base: u16, layers: &[(u16, u16)]) -> Self {
        self.color_glyphs.push((base, layers.to_vec()));
        self
    }

    pub fn palette(mut self, colors: &[[u8; 4]]) -> Self {
        self.palette = colors.to_vec();
        self
    }

    pub fn without(mut self, tag: &[u8; 4]) -> Self {
        self.omit.push(*tag);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let (loca, glyf) = self.glyf();
        let mut tables = vec![
            (*b"head", self.head()),
            (*b"hhea", self.hhea()),
            (*b"maxp", self.maxp()),
            (*b"cmap", self.cmap_table()),
            (*b"hmtx", self.hmtx()),
            (*b"loca", loca),
            (*b"glyf", glyf),
        ];
        if let Some(metrics) = self.typo_metrics {
            tables.push((*b"OS/2", os2(metrics)));
        }
        if !self.color_glyphs.is_empty() {
            tables.push((*b"COLR", self.colr()));
            tables.push((*b"CPAL", self.cpal()));
        }
        tables.retain(|(tag, _)| !self.omit.contains(tag));
        tables.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = Vec::new();
        out.extend(0x0001_0000u32.to_be_bytes());
        out.extend((tables.len() as u16).to_be_bytes());
        out.extend([0u8; 6]); // search range, entry selector, range shift

        let mut offset = 12 + 16 * tables.len();
        let mut body = Vec::new();
        for (tag, data) in &tables {
            out.extend(tag);
            out.extend(0u32.to_be_bytes()); // checksum
            out.extend((offset as u32).to_be_bytes());
            out.extend((data.len() as u32).to_be_bytes());

            let padded = (data.len() + 3) & !3;
            body.extend(data);
            body.resize(body.len() + padded - data.len(), 0);
            offset += padded;
        }
        out.extend(body);
        out
    }

    fn head(&self) -> Vec<u8> {
        let mut t = Vec::new();
        t.extend(0x0001_0000u32.to_be_bytes()); // version
        t.extend(0x0001_0000u32.to_be_bytes()); // font revision
        t.extend(0u32.to_be_bytes()); // checksum adjustment
        t.extend(0x5F0F_3CF5u32.to_be_bytes()); // magic
        t.extend(0u16.to_be_bytes()); // flags
        t.extend(self.units_per_em.to_be_bytes());
        t.extend([0u8; 16]); // created, modified
        t.extend([0u8; 8]); // bounding box
        t.extend(0u16.to_be_bytes()); // mac style
        t.extend(8u16.to_be_bytes()); // lowest rec ppem
        t.extend(2i16.to_be_bytes()); // direction hint
        t.extend(1i16.to_be_bytes()); // long loca offsets
        t.extend(0i16.to_be_bytes()); // glyph data format
        t
    }

    fn hhea(&self) -> Vec<u8> {
        let mut t = Vec::new();
        t.extend(0x0001_0000u32.to_be_bytes());
        t.extend(self.ascender.to_be_bytes());
        t.extend(self.descender.to_be_bytes());
        t.extend(self.line_gap.to_be_bytes());
        t.extend([0u8; 8]); // advance max, min lsb, min rsb, x max extent
        t.extend(1i16.to_be_bytes()); // caret slope rise
        t.extend([0u8; 14]); // caret run/offset, reserved, metric data format
        t.extend((self.glyphs.len() as u16).to_be_bytes());
        t
    }

    fn maxp(&self) -> Vec<u8> {
        let mut t = Vec::new();
        t.extend(0x0000_5000u32.to_be_bytes());
        t.extend((self.glyphs.len() as u16).to_be_bytes());
        t
    }

    fn hmtx(&self) -> Vec<u8> {
        let mut t = Vec::new();
        for glyph in &self.glyphs {
            t.extend(glyph.advance.to_be_bytes());
            t.extend(glyph.lsb.to_be_bytes());
        }
        t
    }

    /// Long `loca` offsets and the matching `glyf` data
    fn glyf(&self) -> (Vec<u8>, Vec<u8>) {
        let mut loca = Vec::new();
        let mut glyf = Vec::new();
        for glyph in &self.glyphs {
            loca.extend((glyf.len() as u32).to_be_bytes());
            if glyph.contour.is_empty() {
                continue;
            }

            let points = &glyph.contour;
            let x_min = points.iter().map(|p| p.0).min().unwrap_or(0);
            let y_min = points.iter().map(|p| p.1).min().unwrap_or(0);
            let x_max = points.iter().map(|p| p.0).max().unwrap_or(0);
            let y_max = points.iter().map(|p| p.1).max().unwrap_or(0);

            glyf.extend(1i16.to_be_bytes()); // one contour
            for v in [x_min, y_min, x_max, y_max] {
                glyf.extend(v.to_be_bytes());
            }
            glyf.extend((points.len() as u16 - 1).to_be_bytes()); // last point of contour
            glyf.extend(0u16.to_be_bytes()); // no instructions
            glyf.extend(std::iter::repeat_n(0x01u8, points.len())); // on curve, long deltas

            let mut previous = (0i16, 0i16);
            let mut dy = Vec::new();
            for &(x, y) in points {
                glyf.extend((x - previous.0).to_be_bytes());
                dy.extend((y - previous.1).to_be_bytes());
                previous = (x, y);
            }
            glyf.extend(dy);
            if glyf.len() % 2 == 1 {
                glyf.push(0);
            }
        }
        loca.extend((glyf.len() as u32).to_be_bytes());
        (loca, glyf)
    }

    /// Every subtable in format 12, one group per mapping
    fn cmap_table(&self) -> Vec<u8> {
        let mut t = Vec::new();
        t.extend(0u16.to_be_bytes());
        t.extend((self.cmaps.len() as u16).to_be_bytes());

        let mut offset = 4 + 8 * self.cmaps.len();
        let mut subtables = Vec::new();
        for cmap in &self.cmaps {
            let mut mappings = cmap.mappings.clone();
            mappings.sort_by_key(|&(codepoint, _)| codepoint);

            let length = 16 + 12 * mappings.len();
            t.extend(cmap.platform.to_be_bytes());
            t.extend(cmap.encoding.to_be_bytes());
            t.extend((offset as u32).to_be_bytes());

            subtables.extend(12u16.to_be_bytes());
            subtables.extend(0u16.to_be_bytes());
            subtables.extend((length as u32).to_be_bytes());
            subtables.extend(0u32.to_be_bytes()); // language
            subtables.extend((mappings.len() as u32).to_be_bytes());
            for (codepoint, glyph) in mappings {
                subtables.extend(codepoint.to_be_bytes());
                subtables.extend(codepoint.to_be_bytes());
                subtables.extend((glyph as u32).to_be_bytes());
            }
            offset += length;
        }
        t.extend(subtables);
        t
    }

    fn colr(&self) -> Vec<u8> {
        let mut bases = self.color_glyphs.clone();
        bases.sort_by_key(|&(base, _)| base);

        let base_offset = 14u32;
        let layer_offset = base_offset + 6 * bases.len() as u32;
        let layer_count: usize = bases.iter().map(|(_, layers)| layers.len()).sum();

        let mut t = Vec::new();
        t.extend(0u16.to_be_bytes()); // version 0
        t.extend((bases.len() as u16).to_be_bytes());
        t.extend(base_offset.to_be_bytes());
        t.extend(layer_offset.to_be_bytes());
        t.extend((layer_count as u16).to_be_bytes());

        let mut first_layer = 0u16;
        for (base, layers) in &bases {
            t.extend(base.to_be_bytes());
            t.extend(first_layer.to_be_bytes());
            t.extend((layers.len() as u16).to_be_bytes());
            first_layer += layers.len() as u16;
        }
        for (_, layers) in &bases {
            for &(glyph, palette_index) in layers {
                t.extend(glyph.to_be_bytes());
                t.extend(palette_index.to_be_bytes());
            }
        }
        t
    }

    fn cpal(&self) -> Vec<u8> {
        let count = self.palette.len() as u16;
        let mut t = Vec::new();
        t.extend(0u16.to_be_bytes()); // version 0
        t.extend(count.to_be_bytes()); // entries per palette
        t.extend(1u16.to_be_bytes()); // palettes
        t.extend(count.to_be_bytes()); // color records
        t.extend(14u32.to_be_bytes()); // color records offset
        t.extend(0u16.to_be_bytes()); // palette 0 starts at record 0
        for &[r, g, b, a] in &self.palette {
            t.extend([b, g, r, a]);
        }
        t
    }
}

/// OS/2 version 4 with only the typo metrics and USE_TYPO_METRICS set
fn os2((ascender, descender, line_gap): (i16, i16, i16)) -> Vec<u8> {
    let mut t = vec![0u8; 96];
    t[0..2].copy_from_slice(&4u16.to_be_bytes());
    t[62..64].copy_from_slice(&(1u16 << 7).to_be_bytes());
    t[68..70].copy_from_slice(&ascender.to_be_bytes());
    t[70..72].copy_from_slice(&descender.to_be_bytes());
    t[72..74].copy_from_slice(&line_gap.to_be_bytes());
    t
}

/// 1000 upem, hhea 800/-200/0:
/// - glyph 1: 100..700 x 0..700 box, advance 800
/// - glyph 2: -50..450 x 0..500 box, advance 500 (negative bearing)
/// - glyph 3: full 0..1000 em box, advance 1000, COLR base glyph
/// - glyph 4 / 5: left / right half of the em box, its two layers
///
/// Maps 'A' -> 1, 'B' -> 2, 'C' -> 3. Palette: red, blue.
pub fn sample_font() -> FontBuilder {
    FontBuilder::new(1000, 800, -200, 0)
        .glyph(TestGlyph::rect(800, 100, 0, 700, 700))
        .glyph(TestGlyph::rect(500, -50, 0, 450, 500))
        .glyph(TestGlyph::rect(1000, 0, 0, 1000, 1000))
        .glyph(TestGlyph::rect(1000, 0, 0, 500, 1000))
        .glyph(TestGlyph::rect(1000, 500, 0, 1000, 1000))
        .cmap(3, 1, &[(65, 1), (66, 2), (67, 3)])
        .color_glyph(3, &[(4, 0), (5, 1)])
        .palette(&[[255, 0, 0, 255], [0, 0, 255, 255]])
}
