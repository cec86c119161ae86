//! Glyph baking: packing, rasterization and record building

use tiny_skia::Transform;

use crate::canvas::AtlasCanvas;
use crate::config::BakeConfig;
use crate::index::{BakedGlyph, GlyphIndex};
use crate::metrics::{FontFaceMetrics, GlyphLayout, GlyphSource, MetricsAdapter};
use crate::packer::{AtlasPacker, CellOrigin, Placement};
use crate::source::{FontMetricsSource, GlyphRasterizer};
use crate::Result;

/// What happened to one glyph handed to [`GlyphBaker::bake_glyph`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlyphOutcome {
    Baked(BakedGlyph),
    /// Zero-width cell, nothing to reserve
    Empty,
    /// Cell wider than the atlas
    TooWide,
    /// No room left; this and every later glyph is dropped
    Exhausted,
}

/// Summary of one bake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BakeReport {
    /// Records written to the index
    pub baked: usize,
    /// Codepoints whose glyph has no horizontal metrics
    pub missing_metrics: usize,
    /// Glyphs with a zero-width cell
    pub empty: usize,
    /// Glyphs wider than the atlas
    pub too_wide: usize,
    /// Eligible glyphs never reached because the atlas filled up
    pub dropped: usize,
    /// Packing stopped early because the atlas filled up
    pub exhausted: bool,
}

/// Result of a bake: the texture plus its index
#[derive(Debug)]
pub struct BakedAtlas {
    pub canvas: AtlasCanvas,
    pub index: GlyphIndex,
    pub metrics: FontFaceMetrics,
    pub report: BakeReport,
}

/// Packs glyphs one by one and draws them into the atlas canvas
pub struct GlyphBaker<'r, R: ?Sized> {
    rasterizer: &'r R,
    metrics: FontFaceMetrics,
    packer: AtlasPacker,
    canvas: AtlasCanvas,
    glyphs: Vec<BakedGlyph>,
}

impl<'r, R: GlyphRasterizer + ?Sized> GlyphBaker<'r, R> {
    pub fn new(rasterizer: &'r R, metrics: FontFaceMetrics, atlas_size: u32) -> Result<Self> {
        Ok(Self {
            rasterizer,
            metrics,
            packer: AtlasPacker::new(atlas_size, metrics.row_height_px as u32),
            canvas: AtlasCanvas::new(atlas_size)?,
            glyphs: Vec::new(),
        })
    }

    /// Pack, draw and record one glyph.
    ///
    /// Glyphs must arrive in strictly ascending codepoint order.
    pub fn bake_glyph(&mut self, glyph: &GlyphSource) -> GlyphOutcome {
        debug_assert!(
            self.glyphs.last().is_none_or(|last| last.codepoint < glyph.codepoint),
            "glyphs must be baked in ascending codepoint order"
        );

        let layout = GlyphLayout::new(glyph, &self.metrics);
        if layout.cell_width <= 0 {
            return GlyphOutcome::Empty;
        }

        let origin = match self.packer.place(layout.cell_width as u32) {
            Placement::Packed(origin) => origin,
            Placement::TooWide => return GlyphOutcome::TooWide,
            Placement::Exhausted => return GlyphOutcome::Exhausted,
        };

        self.draw(glyph, &layout, origin);

        let record = self.record(glyph.codepoint, &layout, origin);
        tracing::debug!(
            "U+{:04X} -> ({}, {}) {}x{}",
            glyph.codepoint,
            origin.x,
            origin.y,
            record.cell_width_px,
            record.cell_height_px
        );
        self.glyphs.push(record);
        GlyphOutcome::Baked(record)
    }

    /// Draw with origin at the cell's baseline, shifted right past any
    /// negative bearing, in font units flipped to Y-down.
    fn draw(&mut self, glyph: &GlyphSource, layout: &GlyphLayout, origin: CellOrigin) {
        let scale = self.metrics.scale_factor as f32;
        let transform = Transform::from_translate(
            (origin.x as i64 + layout.x_offset as i64) as f32,
            (origin.y as f64 + self.metrics.baseline_offset_px) as f32,
        )
        .pre_scale(scale, -scale);

        let cell = origin.cell(layout.cell_width as u32, self.metrics.row_height_px as u32);
        let rasterizer = self.rasterizer;
        let drawn = self.canvas.with_transform(transform, |canvas| {
            rasterizer.draw_glyph(glyph.glyph, cell, canvas)
        });
        if !drawn {
            tracing::trace!("U+{:04X} has no outline", glyph.codepoint);
        }
    }

    fn record(&self, codepoint: u32, layout: &GlyphLayout, origin: CellOrigin) -> BakedGlyph {
        let atlas_size = self.packer.atlas_size() as f64;
        let row_height = self.metrics.row_height_px;
        let right = origin.x as f64 + layout.cell_width as f64;
        let bottom = origin.y as f64 + row_height as f64;

        BakedGlyph {
            codepoint,
            cell_width_px: layout.cell_width,
            cell_height_px: row_height,
            bearing_x_px: layout.bearing_x,
            baseline_offset_px: self.metrics.baseline_offset(),
            pixel_advance: layout.pixel_advance,
            uv_min: [
                (origin.x as f64 / atlas_size) as f32,
                (origin.y as f64 / atlas_size) as f32,
            ],
            uv_max: [(right / atlas_size) as f32, (bottom / atlas_size) as f32],
        }
    }

    /// Records baked so far
    pub fn glyphs(&self) -> &[BakedGlyph] {
        &self.glyphs
    }

    pub fn canvas(&self) -> &AtlasCanvas {
        &self.canvas
    }

    /// Hand over the canvas and the finished index
    pub fn finish(self) -> (AtlasCanvas, GlyphIndex) {
        let size = self.packer.atlas_size();
        (self.canvas, GlyphIndex::new(size, size, self.glyphs))
    }
}

/// Bake every eligible glyph of `source` into a new atlas.
///
/// Stops packing (without failing) when the atlas is full; whatever was
/// baked up to that point is returned.
pub fn bake<S, R>(source: &S, rasterizer: &R, config: &BakeConfig) -> Result<BakedAtlas>
where
    S: FontMetricsSource + ?Sized,
    R: GlyphRasterizer + ?Sized,
{
    config.validate()?;

    let adapter = MetricsAdapter::new(config.font_size);
    let metrics = adapter.face_metrics(source)?;
    let sources = adapter.glyph_sources(source, config.first_codepoint);
    tracing::info!(
        "Baking {} glyphs at {}px into a {}x{} atlas (row height {}px)",
        sources.glyphs.len(),
        config.font_size,
        config.atlas_size,
        config.atlas_size,
        metrics.row_height_px
    );

    let mut baker = GlyphBaker::new(rasterizer, metrics, config.atlas_size)?;
    let mut report = BakeReport {
        missing_metrics: sources.missing_metrics.len(),
        ..BakeReport::default()
    };

    for (i, glyph) in sources.glyphs.iter().enumerate() {
        match baker.bake_glyph(glyph) {
            GlyphOutcome::Baked(_) => report.baked += 1,
            GlyphOutcome::Empty => {
                tracing::debug!("U+{:04X} has zero advance, skipping", glyph.codepoint);
                report.empty += 1;
            }
            GlyphOutcome::TooWide => {
                tracing::warn!(
                    "U+{:04X} is wider than the {}px atlas, skipping",
                    glyph.codepoint,
                    config.atlas_size
                );
                report.too_wide += 1;
            }
            GlyphOutcome::Exhausted => {
                report.exhausted = true;
                report.dropped = sources.glyphs.len() - i;
                tracing::info!(
                    "Atlas full: stopped after {} glyphs ({} dropped), try a larger atlas",
                    report.baked,
                    report.dropped
                );
                break;
            }
        }
    }

    let (canvas, index) = baker.finish();
    Ok(BakedAtlas {
        canvas,
        index,
        metrics,
        report,
    })
}
