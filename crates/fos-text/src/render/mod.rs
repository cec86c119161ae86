//! Glyph outline and color glyph painting

mod color;
mod outline;

pub use color::{foreground_color, ColorPainter, DEFAULT_PALETTE};
pub use outline::OutlinePath;
