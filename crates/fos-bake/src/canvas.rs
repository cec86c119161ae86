//! Atlas canvas with a scoped transform stack

use std::ops::{Deref, DerefMut};

use tiny_skia::{Color, FillRule, Paint, Path, Pixmap, Rect, Transform};

use crate::{BakeError, Result};

/// Square RGBA pixmap glyphs are drawn into.
///
/// Starts fully transparent; glyph ink is white with anti-aliased alpha.
pub struct AtlasCanvas {
    pixmap: Pixmap,
    /// Current transform
    transform: Transform,
    /// Saved transforms (for save/restore)
    saved: Vec<Transform>,
    paint: Paint<'static>,
}

impl AtlasCanvas {
    /// Create a transparent `size` x `size` canvas
    pub fn new(size: u32) -> Result<Self> {
        let pixmap = Pixmap::new(size, size).ok_or_else(|| {
            BakeError::InvalidConfig(format!("cannot allocate a {size}x{size} atlas"))
        })?;

        let mut paint = Paint::default();
        paint.set_color(Color::WHITE);
        paint.anti_alias = true;

        Ok(Self {
            pixmap,
            transform: Transform::identity(),
            saved: Vec::new(),
            paint,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Current transform
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Number of transforms currently saved
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Push `transform` on top of the current one until the returned scope
    /// is dropped.
    ///
    /// Restoration happens in `Drop`, so it also runs on early return and
    /// unwinding.
    pub fn scoped(&mut self, transform: Transform) -> TransformScope<'_> {
        self.saved.push(self.transform);
        self.transform = self.transform.pre_concat(transform);
        TransformScope { canvas: self }
    }

    /// Run `f` with `transform` applied, restoring afterwards
    pub fn with_transform<R>(&mut self, transform: Transform, f: impl FnOnce(&mut Self) -> R) -> R {
        let mut scope = self.scoped(transform);
        f(&mut *scope)
    }

    fn restore(&mut self) {
        self.transform = self.saved.pop().unwrap_or_default();
    }

    /// Fill a path given in the current transform's coordinate space
    pub fn fill_path(&mut self, path: &Path) {
        self.pixmap
            .fill_path(path, &self.paint, FillRule::Winding, self.transform, None);
    }

    /// Fill a rectangle given in the current transform's coordinate space
    pub fn fill_rect(&mut self, rect: Rect) {
        self.pixmap.fill_rect(rect, &self.paint, self.transform, None);
    }

    /// Alpha of one pixel, `None` outside the canvas
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        self.pixmap.pixel(x, y).map(|p| p.alpha())
    }

    /// Raw premultiplied RGBA bytes
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Direct pixmap access for painters that bring their own paint.
    /// They should draw through [`Self::transform`].
    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }
}

impl std::fmt::Debug for AtlasCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtlasCanvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("transform", &self.transform)
            .field("depth", &self.saved.len())
            .finish()
    }
}

/// Guard returned by [`AtlasCanvas::scoped`]; restores the previous
/// transform when dropped
pub struct TransformScope<'a> {
    canvas: &'a mut AtlasCanvas,
}

impl Deref for TransformScope<'_> {
    type Target = AtlasCanvas;

    fn deref(&self) -> &AtlasCanvas {
        self.canvas
    }
}

impl DerefMut for TransformScope<'_> {
    fn deref_mut(&mut self) -> &mut AtlasCanvas {
        self.canvas
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}
