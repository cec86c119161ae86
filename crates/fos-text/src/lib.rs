//! fOS Text - Font Access for the Baker
//!
//! This crate wraps a parsed font for offline atlas baking:
//! - Face-wide metrics straight from `head`/`hhea`
//! - Character map enumeration (Unicode subtables only)
//! - Per-glyph horizontal metrics from `hmtx`
//! - Glyph outlines as tiny-skia paths in font units
//! - COLR color glyphs painted straight onto a tiny-skia pixmap

pub mod font;
pub mod render;

pub use font::{FontFace, HorizontalMetrics, VerticalMetrics};
pub use render::{ColorPainter, OutlinePath};
pub use ttf_parser::GlyphId;

/// Text error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Failed to parse font: {0}")]
    FontParsing(String),

    #[error("Font is missing required table '{0}'")]
    MissingTable(&'static str),
}

pub type Result<T> = std::result::Result<T, TextError>;
