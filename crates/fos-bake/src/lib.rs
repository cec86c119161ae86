//! fOS Bake - Glyph Atlas Baker
//!
//! Turns a vector font into a pre-rendered glyph atlas texture plus a
//! compact binary index, so text can be drawn by sampling a texture:
//! - Font-unit to pixel metrics at one scale factor
//! - Shelf packing into a fixed square atlas
//! - Rasterization under a scoped, Y-flipped transform, COLR glyphs in color
//! - Bit-exact little-endian glyph index ("BAKE")
//! - Atomic image + index output
//!
//! # Example
//! ```rust,ignore
//! use fos_bake::{bake, AtlasWriter, BakeConfig, PngEncoder};
//! use fos_text::FontFace;
//!
//! let data = std::fs::read("Inter.ttf")?;
//! let face = FontFace::parse(&data, 0)?;
//! let atlas = bake(&face, &face, &BakeConfig::default())?;
//! AtlasWriter::new("out", "Inter").write(&atlas, &PngEncoder)?;
//! ```

mod baker;
mod canvas;
mod config;
mod error;
mod index;
mod metrics;
mod packer;
mod source;
mod ttf;
mod writer;

pub use baker::{bake, BakeReport, BakedAtlas, GlyphBaker, GlyphOutcome};
pub use canvas::{AtlasCanvas, TransformScope};
pub use config::{
    BakeConfig, DEFAULT_ATLAS_SIZE, DEFAULT_FONT_SIZE, DEFAULT_OUTPUT_DIR, FIRST_VISIBLE_CODEPOINT,
    MAX_FONT_SIZE,
};
pub use error::{BakeError, IndexError, Result};
pub use index::{BakedGlyph, GlyphIndex, HEADER_LEN, MAGIC, RECORD_LEN};
pub use metrics::{FontFaceMetrics, GlyphLayout, GlyphSource, GlyphSources, MetricsAdapter};
pub use packer::{AtlasCursor, AtlasPacker, CellOrigin, CellRect, Placement, GLYPH_GUTTER};
pub use source::{FontMetricsSource, GlyphRasterizer, ImageEncoder};
pub use writer::{AtlasWriter, OutputPaths, PngEncoder, INDEX_EXTENSION};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
