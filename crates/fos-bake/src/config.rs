//! Baker configuration

use crate::{BakeError, Result};

/// Default target font size in pixels
pub const DEFAULT_FONT_SIZE: f64 = 64.0;

/// Largest accepted font size in pixels.
///
/// Keeps every scaled 16-bit font-unit value, and the sum of an advance and
/// a bearing, inside `i32` even for a face with a single unit per em.
pub const MAX_FONT_SIZE: f64 = 16384.0;

/// Default atlas side length in pixels
pub const DEFAULT_ATLAS_SIZE: u32 = 4096;

/// Codepoints below this are control characters and never baked
pub const FIRST_VISIBLE_CODEPOINT: u32 = 32;

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "src/assets/baked_fonts";

/// Bake configuration options
#[derive(Debug, Clone, PartialEq)]
pub struct BakeConfig {
    /// Target font size in pixels (one em)
    pub font_size: f64,

    /// Side length of the square atlas texture
    pub atlas_size: u32,

    /// Lowest codepoint eligible for baking
    pub first_codepoint: u32,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            atlas_size: DEFAULT_ATLAS_SIZE,
            first_codepoint: FIRST_VISIBLE_CODEPOINT,
        }
    }
}

impl BakeConfig {
    /// Config with the given font and atlas sizes, other options default
    pub fn new(font_size: f64, atlas_size: u32) -> Self {
        Self {
            font_size,
            atlas_size,
            ..Self::default()
        }
    }

    /// Reject sizes the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(BakeError::InvalidConfig(format!(
                "font size must be a positive number, got {}",
                self.font_size
            )));
        }
        if self.font_size > MAX_FONT_SIZE {
            return Err(BakeError::InvalidConfig(format!(
                "font size must be at most {MAX_FONT_SIZE}px, got {}",
                self.font_size
            )));
        }
        // Cell widths and UV math go through i32
        if self.atlas_size == 0 || self.atlas_size > i32::MAX as u32 {
            return Err(BakeError::InvalidConfig(format!(
                "atlas size must be between 1 and {}, got {}",
                i32::MAX,
                self.atlas_size
            )));
        }
        Ok(())
    }
}
