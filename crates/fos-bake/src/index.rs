//! Binary glyph index
//!
//! Little-endian layout:
//!
//! ```text
//! 0   "BAKE"
//! 4   u32 glyph count
//! 8   u32 atlas width
//! 12  u32 atlas height
//! 16  glyph count x 40-byte records:
//!     u32 codepoint, i32 cell width, i32 cell height, i32 bearing x,
//!     i32 baseline offset, i32 advance, f32 u min, f32 v min, f32 u max, f32 v max
//! ```

use std::io::{self, Write};
use std::path::Path;

use crate::error::IndexError;

/// File magic
pub const MAGIC: [u8; 4] = *b"BAKE";

/// Header length in bytes
pub const HEADER_LEN: usize = 16;

/// Length of one glyph record in bytes
pub const RECORD_LEN: usize = 40;

/// One baked glyph as stored in the index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BakedGlyph {
    pub codepoint: u32,
    /// Reserved cell width: advance plus any negative-bearing overhang
    pub cell_width_px: i32,
    /// Always the atlas row height
    pub cell_height_px: i32,
    /// Negative left side bearing, or 0
    pub bearing_x_px: i32,
    pub baseline_offset_px: i32,
    pub pixel_advance: i32,
    /// Top-left texture coordinate of the cell
    pub uv_min: [f32; 2],
    /// Bottom-right texture coordinate of the cell
    pub uv_max: [f32; 2],
}

impl BakedGlyph {
    fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.codepoint.to_le_bytes())?;
        for v in [
            self.cell_width_px,
            self.cell_height_px,
            self.bearing_x_px,
            self.baseline_offset_px,
            self.pixel_advance,
        ] {
            out.write_all(&v.to_le_bytes())?;
        }
        for v in [self.uv_min[0], self.uv_min[1], self.uv_max[0], self.uv_max[1]] {
            out.write_all(&v.to_le_bytes())?;
        }
        Ok(())
    }

    fn read_from(reader: &mut IndexReader<'_>) -> Result<Self, IndexError> {
        Ok(Self {
            codepoint: reader.read_u32()?,
            cell_width_px: reader.read_i32()?,
            cell_height_px: reader.read_i32()?,
            bearing_x_px: reader.read_i32()?,
            baseline_offset_px: reader.read_i32()?,
            pixel_advance: reader.read_i32()?,
            uv_min: [reader.read_f32()?, reader.read_f32()?],
            uv_max: [reader.read_f32()?, reader.read_f32()?],
        })
    }
}

/// A glyph index: atlas dimensions plus records in ascending codepoint order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphIndex {
    pub atlas_width: u32,
    pub atlas_height: u32,
    pub glyphs: Vec<BakedGlyph>,
}

impl GlyphIndex {
    pub fn new(atlas_width: u32, atlas_height: u32, glyphs: Vec<BakedGlyph>) -> Self {
        Self {
            atlas_width,
            atlas_height,
            glyphs,
        }
    }

    /// Number of glyph records
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Look up a glyph by codepoint
    pub fn get(&self, codepoint: u32) -> Option<&BakedGlyph> {
        self.glyphs
            .binary_search_by_key(&codepoint, |g| g.codepoint)
            .ok()
            .map(|i| &self.glyphs[i])
    }

    /// Serialized size in bytes
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.glyphs.len() * RECORD_LEN
    }

    /// Serialize into `out`
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        // Bounded by atlas area, cannot exceed u32
        let count = self.glyphs.len() as u32;
        out.write_all(&MAGIC)?;
        out.write_all(&count.to_le_bytes())?;
        out.write_all(&self.atlas_width.to_le_bytes())?;
        out.write_all(&self.atlas_height.to_le_bytes())?;
        for glyph in &self.glyphs {
            glyph.write_to(out)?;
        }
        Ok(())
    }

    /// Serialize to a byte vector
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        // Writing to a Vec cannot fail
        let _ = self.write_to(&mut bytes);
        bytes
    }

    /// Parse an index, rejecting wrong magic, a length that disagrees with
    /// the header, and records out of codepoint order
    pub fn parse(data: &[u8]) -> Result<Self, IndexError> {
        let mut reader = IndexReader::new(data);

        let magic = reader.read_tag()?;
        if magic != MAGIC {
            return Err(IndexError::BadMagic(magic));
        }
        let count = reader.read_u32()? as usize;
        let atlas_width = reader.read_u32()?;
        let atlas_height = reader.read_u32()?;

        let expected = count
            .checked_mul(RECORD_LEN)
            .and_then(|n| n.checked_add(HEADER_LEN))
            .unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(IndexError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        let mut glyphs: Vec<BakedGlyph> = Vec::with_capacity(count);
        for i in 0..count {
            let glyph = BakedGlyph::read_from(&mut reader)?;
            if glyphs.last().is_some_and(|prev| prev.codepoint >= glyph.codepoint) {
                return Err(IndexError::Unordered(i));
            }
            glyphs.push(glyph);
        }

        Ok(Self {
            atlas_width,
            atlas_height,
            glyphs,
        })
    }

    /// Read and parse an index file
    pub fn read(path: &Path) -> Result<Self, IndexError> {
        let data = std::fs::read(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data)
    }
}

/// Little-endian reader with bounds checking
struct IndexReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> IndexReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], IndexError> {
        let bytes = self
            .data
            .get(self.pos..self.pos + N)
            .ok_or(IndexError::Truncated(self.pos))?;
        self.pos += N;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read 4-byte tag
    fn read_tag(&mut self) -> Result<[u8; 4], IndexError> {
        self.read_array()
    }

    fn read_u32(&mut self) -> Result<u32, IndexError> {
        self.read_array().map(u32::from_le_bytes)
    }

    fn read_i32(&mut self) -> Result<i32, IndexError> {
        self.read_array().map(i32::from_le_bytes)
    }

    fn read_f32(&mut self) -> Result<f32, IndexError> {
        self.read_array().map(f32::from_le_bytes)
    }
}
