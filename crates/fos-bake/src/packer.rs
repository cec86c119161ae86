//! Shelf packing of glyph cells
//!
//! Cells are laid left to right in rows of one uniform height. When a cell
//! does not fit in the remaining width the cursor wraps to the next row;
//! when the next row does not fit the atlas is exhausted and stays so.

/// Horizontal gap between neighbouring cells, keeps bilinear sampling from
/// bleeding one glyph into the next
pub const GLYPH_GUTTER: u32 = 2;

/// Top-left pixel corner of a packed cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellOrigin {
    pub x: u32,
    pub y: u32,
}

impl CellOrigin {
    /// The `width` x `height` cell starting here
    pub fn cell(self, width: u32, height: u32) -> CellRect {
        CellRect {
            x: self.x,
            y: self.y,
            width,
            height,
        }
    }
}

/// Pixel rectangle reserved for one glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Outcome of placing one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The cell was assigned this origin
    Packed(CellOrigin),
    /// No further row fits; nothing more can be packed
    Exhausted,
    /// The cell is wider than the atlas itself and can never be packed
    TooWide,
}

/// Position of the next free cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AtlasCursor {
    pub x: u32,
    pub y: u32,
}

/// Row-based packer over a fixed square atlas
#[derive(Debug, Clone)]
pub struct AtlasPacker {
    atlas_size: u32,
    row_height: u32,
    cursor: AtlasCursor,
    exhausted: bool,
}

impl AtlasPacker {
    /// Create a packer for a `atlas_size` x `atlas_size` texture
    pub fn new(atlas_size: u32, row_height: u32) -> Self {
        Self {
            atlas_size,
            row_height,
            cursor: AtlasCursor::default(),
            exhausted: false,
        }
    }

    /// Place the next cell of `cell_width` pixels.
    ///
    /// A cell ending exactly at the right edge stays on the current row.
    pub fn place(&mut self, cell_width: u32) -> Placement {
        if self.exhausted {
            return Placement::Exhausted;
        }
        if cell_width > self.atlas_size {
            return Placement::TooWide;
        }

        if self.cursor.x.saturating_add(cell_width) > self.atlas_size {
            self.cursor.x = 0;
            self.cursor.y = self.cursor.y.saturating_add(self.row_height);
        }

        if self.cursor.y.saturating_add(self.row_height) > self.atlas_size {
            self.exhausted = true;
            return Placement::Exhausted;
        }

        let origin = CellOrigin {
            x: self.cursor.x,
            y: self.cursor.y,
        };
        self.cursor.x = self
            .cursor
            .x
            .saturating_add(cell_width)
            .saturating_add(GLYPH_GUTTER)
            .min(self.atlas_size);

        Placement::Packed(origin)
    }

    pub fn cursor(&self) -> AtlasCursor {
        self.cursor
    }

    pub fn atlas_size(&self) -> u32 {
        self.atlas_size
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
