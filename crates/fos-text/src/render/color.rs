//! COLR color glyph painting
//!
//! ttf-parser walks a glyph's `COLR` paint graph and calls back into a
//! [`colr::Painter`]; this module turns those callbacks into tiny-skia
//! fills on a pixmap.

use tiny_skia::{
    BlendMode, Color, FillRule, GradientStop, IntRect, LinearGradient, Mask, Paint, Path,
    PathBuilder, Pixmap, PixmapPaint, Point, RadialGradient, Rect, Shader, SpreadMode, Transform,
};
use ttf_parser::colr::{self, ClipBox, CompositeMode, GradientExtend};
use ttf_parser::{Face, GlyphId, RgbaColor};

use super::OutlinePath;

/// CPAL palette used for every color glyph
pub const DEFAULT_PALETTE: u16 = 0;

/// Text color for layers that ask for the foreground, matches the
/// monochrome ink
pub fn foreground_color() -> RgbaColor {
    RgbaColor::new(255, 255, 255, 255)
}

/// Group drawn off-screen, composited onto its parent with `mode` on pop
struct Layer {
    pixmap: Pixmap,
    mode: BlendMode,
}

/// Paints `COLR` glyphs onto a pixmap.
///
/// Outlines arrive in font units and are mapped to pixels through the
/// transform given at construction combined with whatever transforms the
/// paint graph pushes. Clips are kept as device-space paths. Composite
/// layers are allocated at the size of `region`, so only composited
/// content is confined to it.
pub struct ColorPainter<'a, 'p> {
    face: &'a Face<'a>,
    target: &'p mut Pixmap,
    region: IntRect,
    transforms: Vec<Transform>,
    /// Last outline, in device space
    outline: Option<Path>,
    /// `None` clips everything away (a clip pushed without an outline)
    clips: Vec<Option<Path>>,
    layers: Vec<Layer>,
    /// Layers that could not be allocated but will still be popped
    lost_layers: usize,
    painted: bool,
}

impl<'a, 'p> ColorPainter<'a, 'p> {
    pub fn new(
        face: &'a Face<'a>,
        target: &'p mut Pixmap,
        transform: Transform,
        region: IntRect,
    ) -> Self {
        Self {
            face,
            target,
            region,
            transforms: vec![transform],
            outline: None,
            clips: Vec::new(),
            layers: Vec::new(),
            lost_layers: 0,
            painted: false,
        }
    }

    /// Whether any fill reached a surface
    pub fn painted(&self) -> bool {
        self.painted
    }

    fn transform(&self) -> Transform {
        self.transforms.last().copied().unwrap_or_default()
    }

    /// Maps device space onto the surface currently drawn to
    fn surface_offset(&self) -> Transform {
        if self.layers.is_empty() {
            Transform::identity()
        } else {
            Transform::from_translate(-self.region.x() as f32, -self.region.y() as f32)
        }
    }

    fn surface_size(&self) -> (u32, u32) {
        match self.layers.last() {
            Some(layer) => (layer.pixmap.width(), layer.pixmap.height()),
            None => (self.target.width(), self.target.height()),
        }
    }

    fn shader(&self, paint: colr::Paint<'a>) -> Option<Shader<'static>> {
        let transform = self.transform();
        let coords = self.face.variation_coordinates();

        match paint {
            colr::Paint::Solid(color) => Some(Shader::SolidColor(to_color(color))),
            colr::Paint::LinearGradient(gradient) => {
                let stops = gradient_stops(gradient.stops(DEFAULT_PALETTE, coords));
                let start = Point::from_xy(gradient.x0, gradient.y0);
                let end = linear_end(
                    start,
                    Point::from_xy(gradient.x1, gradient.y1),
                    Point::from_xy(gradient.x2, gradient.y2),
                );
                LinearGradient::new(start, end, stops, spread(gradient.extend), transform)
            }
            colr::Paint::RadialGradient(gradient) => {
                // tiny-skia's two-point conical gradient starts from a point
                let stops = gradient_stops(gradient.stops(DEFAULT_PALETTE, coords));
                RadialGradient::new(
                    Point::from_xy(gradient.x0, gradient.y0),
                    Point::from_xy(gradient.x1, gradient.y1),
                    gradient.r1,
                    stops,
                    spread(gradient.extend),
                    transform,
                )
            }
            colr::Paint::SweepGradient(gradient) => {
                // No sweep shader in tiny-skia: flat fill with the first stop
                gradient
                    .stops(DEFAULT_PALETTE, coords)
                    .next()
                    .map(|stop| Shader::SolidColor(to_color(stop.color)))
            }
        }
    }
}

impl<'a> colr::Painter<'a> for ColorPainter<'a, '_> {
    fn outline_glyph(&mut self, glyph_id: GlyphId) {
        let transform = self.transform();
        let mut builder = OutlinePath::new();
        self.outline = self
            .face
            .outline_glyph(glyph_id, &mut builder)
            .and_then(|_| builder.finish())
            .and_then(|path| path.transform(transform));
    }

    fn paint(&mut self, paint: colr::Paint<'a>) {
        let area = match self.clips.split_last() {
            Some((last, _)) => last.clone(),
            None => self.outline.clone(),
        };
        let Some(area) = area else {
            return;
        };
        if self.clips.iter().any(Option::is_none) {
            return;
        }
        let Some(shader) = self.shader(paint) else {
            return;
        };

        let offset = self.surface_offset();
        let (width, height) = self.surface_size();
        let outer = self.clips.len().saturating_sub(1);
        let mask = clip_mask(self.clips[..outer].iter().flatten(), width, height, offset);

        let paint = Paint {
            shader,
            anti_alias: true,
            ..Paint::default()
        };
        let surface = match self.layers.last_mut() {
            Some(layer) => &mut layer.pixmap,
            None => &mut *self.target,
        };
        surface.fill_path(&area, &paint, FillRule::Winding, offset, mask.as_ref());
        self.painted = true;
    }

    fn push_clip(&mut self) {
        self.clips.push(self.outline.clone());
    }

    fn push_clip_box(&mut self, clipbox: ClipBox) {
        let transform = self.transform();
        let path = Rect::from_ltrb(clipbox.x_min, clipbox.y_min, clipbox.x_max, clipbox.y_max)
            .map(PathBuilder::from_rect)
            .and_then(|path| path.transform(transform));
        self.clips.push(path);
    }

    fn pop_clip(&mut self) {
        self.clips.pop();
    }

    fn push_layer(&mut self, mode: CompositeMode) {
        match Pixmap::new(self.region.width(), self.region.height()) {
            Some(pixmap) => self.layers.push(Layer {
                pixmap,
                mode: blend_mode(mode),
            }),
            None => self.lost_layers += 1,
        }
    }

    fn pop_layer(&mut self) {
        if self.lost_layers > 0 {
            self.lost_layers -= 1;
            return;
        }
        let Some(layer) = self.layers.pop() else {
            return;
        };

        let paint = PixmapPaint {
            blend_mode: layer.mode,
            ..PixmapPaint::default()
        };
        let (surface, x, y) = match self.layers.last_mut() {
            Some(parent) => (&mut parent.pixmap, 0, 0),
            None => (&mut *self.target, self.region.x(), self.region.y()),
        };
        surface.draw_pixmap(x, y, layer.pixmap.as_ref(), &paint, Transform::identity(), None);
    }

    fn push_transform(&mut self, transform: ttf_parser::Transform) {
        let next = self.transform().pre_concat(Transform::from_row(
            transform.a,
            transform.b,
            transform.c,
            transform.d,
            transform.e,
            transform.f,
        ));
        self.transforms.push(next);
    }

    fn pop_transform(&mut self) {
        // The base transform always stays
        if self.transforms.len() > 1 {
            self.transforms.pop();
        }
    }
}

/// Coverage mask for the intersection of `clips`, `None` when unclipped
fn clip_mask<'c>(
    mut clips: impl Iterator<Item = &'c Path>,
    width: u32,
    height: u32,
    offset: Transform,
) -> Option<Mask> {
    let first = clips.next()?;
    let mut mask = Mask::new(width, height)?;
    mask.fill_path(first, FillRule::Winding, true, offset);
    for clip in clips {
        mask.intersect_path(clip, FillRule::Winding, true, offset);
    }
    Some(mask)
}

/// End point of the gradient vector: `p1` projected onto the line through
/// `p0` perpendicular to `p0 -> p2`
fn linear_end(p0: Point, p1: Point, p2: Point) -> Point {
    let normal = Point::from_xy(p2.y - p0.y, -(p2.x - p0.x));
    let length_sq = normal.x * normal.x + normal.y * normal.y;
    if length_sq == 0.0 {
        return p1;
    }
    let t = ((p1.x - p0.x) * normal.x + (p1.y - p0.y) * normal.y) / length_sq;
    Point::from_xy(p0.x + t * normal.x, p0.y + t * normal.y)
}

fn gradient_stops(stops: impl Iterator<Item = colr::ColorStop>) -> Vec<GradientStop> {
    stops
        .map(|stop| GradientStop::new(stop.stop_offset, to_color(stop.color)))
        .collect()
}

fn to_color(color: RgbaColor) -> Color {
    Color::from_rgba8(color.red, color.green, color.blue, color.alpha)
}

fn spread(extend: GradientExtend) -> SpreadMode {
    match extend {
        GradientExtend::Pad => SpreadMode::Pad,
        GradientExtend::Repeat => SpreadMode::Repeat,
        GradientExtend::Reflect => SpreadMode::Reflect,
    }
}

fn blend_mode(mode: CompositeMode) -> BlendMode {
    match mode {
        CompositeMode::Clear => BlendMode::Clear,
        CompositeMode::Source => BlendMode::Source,
        CompositeMode::Destination => BlendMode::Destination,
        CompositeMode::SourceOver => BlendMode::SourceOver,
        CompositeMode::DestinationOver => BlendMode::DestinationOver,
        CompositeMode::SourceIn => BlendMode::SourceIn,
        CompositeMode::DestinationIn => BlendMode::DestinationIn,
        CompositeMode::SourceOut => BlendMode::SourceOut,
        CompositeMode::DestinationOut => BlendMode::DestinationOut,
        CompositeMode::SourceAtop => BlendMode::SourceAtop,
        CompositeMode::DestinationAtop => BlendMode::DestinationAtop,
        CompositeMode::Xor => BlendMode::Xor,
        CompositeMode::Plus => BlendMode::Plus,
        CompositeMode::Screen => BlendMode::Screen,
        CompositeMode::Overlay => BlendMode::Overlay,
        CompositeMode::Darken => BlendMode::Darken,
        CompositeMode::Lighten => BlendMode::Lighten,
        CompositeMode::ColorDodge => BlendMode::ColorDodge,
        CompositeMode::ColorBurn => BlendMode::ColorBurn,
        CompositeMode::HardLight => BlendMode::HardLight,
        CompositeMode::SoftLight => BlendMode::SoftLight,
        CompositeMode::Difference => BlendMode::Difference,
        CompositeMode::Exclusion => BlendMode::Exclusion,
        CompositeMode::Multiply => BlendMode::Multiply,
        CompositeMode::Hue => BlendMode::Hue,
        CompositeMode::Saturation => BlendMode::Saturation,
        CompositeMode::Color => BlendMode::Color,
        CompositeMode::Luminosity => BlendMode::Luminosity,
    }
}
