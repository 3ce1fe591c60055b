//! The square raster an icon is painted onto.
//!
//! [`Canvas`] wraps a tiny-skia pixmap. It starts fully opaque and every
//! paint operation composites source-over, so the canvas stays opaque until
//! a mask is applied to the exported image.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{
    FillRule, LineCap, Paint, Path, PathBuilder, Pixmap, PremultipliedColorU8, Rect as SkiaRect,
    Stroke, Transform,
};

use crate::error::{IconError, Result};
use crate::geometry::{Ellipse, RegularPolygon, Rect, Segment, Shape};
use crate::paint::Rgba8;

// ============================================================================
// Draw operations
// ============================================================================

/// How a [`Shape`] is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ink {
    /// Fill the interior. Segments are always stroked at their own width.
    Fill(Rgba8),
    /// Outline the shape with a stroke of `width` pixels.
    Stroke { color: Rgba8, width: f32 },
}

impl Ink {
    pub fn color(&self) -> Rgba8 {
        match *self {
            Self::Fill(color) | Self::Stroke { color, .. } => color,
        }
    }
}

/// A single resolved paint step: one shape, one ink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOp {
    pub shape: Shape,
    pub ink: Ink,
}

impl DrawOp {
    pub fn fill(shape: Shape, color: Rgba8) -> Self {
        Self {
            shape,
            ink: Ink::Fill(color),
        }
    }

    pub fn stroke(shape: Shape, color: Rgba8, width: f32) -> Self {
        Self {
            shape,
            ink: Ink::Stroke { color, width },
        }
    }

    /// Stroke width in pixels, if this op draws a line.
    pub fn stroke_width(&self) -> Option<f32> {
        match (self.shape, self.ink) {
            (Shape::Segment(seg), _) => Some(seg.width),
            (_, Ink::Stroke { width, .. }) => Some(width),
            _ => None,
        }
    }
}

// ============================================================================
// Canvas
// ============================================================================

/// A mutable square RGBA raster, origin top-left.
///
/// Owned by the render call that created it; never shared.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Creates an opaque black canvas of `side × side` pixels.
    pub fn new(side: u32) -> Result<Self> {
        if side == 0 {
            return Err(IconError::InvalidInput(
                "side length must be positive".into(),
            ));
        }
        let mut pixmap = Pixmap::new(side, side).ok_or_else(|| {
            IconError::InvalidInput(format!("cannot allocate a {side}x{side} canvas"))
        })?;
        pixmap.fill(resvg::tiny_skia::Color::BLACK);
        Ok(Self { pixmap })
    }

    /// Side length in pixels.
    pub fn side(&self) -> u32 {
        self.pixmap.width()
    }

    /// Replaces every pixel with `color` (alpha forced opaque).
    pub fn fill(&mut self, color: Rgba8) {
        let c = color.with_alpha(255);
        self.pixmap
            .fill(resvg::tiny_skia::Color::from_rgba8(c.r, c.g, c.b, 255));
    }

    /// Sets every pixel to the opaque color returned by `color_at(x, y)`.
    pub fn shade(&mut self, color_at: impl Fn(u32, u32) -> Rgba8) {
        let side = self.side();
        for (i, pixel) in self.pixmap.pixels_mut().iter_mut().enumerate() {
            let x = i as u32 % side;
            let y = i as u32 / side;
            let c = color_at(x, y);
            if let Some(p) = PremultipliedColorU8::from_rgba(c.r, c.g, c.b, 255) {
                *pixel = p;
            }
        }
    }

    /// Paints a resolved draw operation.
    pub fn draw(&mut self, op: &DrawOp) {
        let color = op.ink.color();
        if color.a == 0 {
            return;
        }
        match op.shape {
            Shape::Segment(seg) => self.stroke_segment(&seg, color),
            shape => {
                let Some(path) = shape_path(&shape) else {
                    return;
                };
                let paint = solid_paint(color);
                match op.ink {
                    Ink::Fill(_) => self.pixmap.fill_path(
                        &path,
                        &paint,
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    ),
                    Ink::Stroke { width, .. } => {
                        let stroke = Stroke {
                            width,
                            ..Default::default()
                        };
                        self.pixmap
                            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                    }
                }
            }
        }
    }

    /// Paints a sequence of draw operations in order.
    pub fn draw_all<'a>(&mut self, ops: impl IntoIterator<Item = &'a DrawOp>) {
        for op in ops {
            self.draw(op);
        }
    }

    fn stroke_segment(&mut self, seg: &Segment, color: Rgba8) {
        let mut pb = PathBuilder::new();
        pb.move_to(seg.x0, seg.y0);
        pb.line_to(seg.x1, seg.y1);
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = Stroke {
            width: seg.width,
            line_cap: LineCap::Round,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &path,
            &solid_paint(color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    /// Returns the straight-alpha color at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba8::rgba(p.red(), p.green(), p.blue(), p.alpha()))
    }

    /// Converts the canvas into a straight-alpha image.
    pub fn into_image(self) -> RgbaImage {
        let side = self.side();
        let mut img = RgbaImage::new(side, side);
        for (dst, src) in img.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        img
    }
}

// ============================================================================
// Path building
// ============================================================================

fn solid_paint(color: Rgba8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn shape_path(shape: &Shape) -> Option<Path> {
    match shape {
        Shape::Ellipse(e) => ellipse_path(e),
        Shape::Polygon(p) => polygon_path(p),
        Shape::Rect(r) => rect_path(r),
        Shape::Segment(_) => None,
    }
}

fn ellipse_path(e: &Ellipse) -> Option<Path> {
    if e.rx <= 0.0 || e.ry <= 0.0 {
        return None;
    }
    let oval = SkiaRect::from_ltrb(e.cx - e.rx, e.cy - e.ry, e.cx + e.rx, e.cy + e.ry)?;
    PathBuilder::from_oval(oval)
}

fn polygon_path(p: &RegularPolygon) -> Option<Path> {
    let vertices = p.vertices();
    let (first, rest) = vertices.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.0, first.1);
    for &(x, y) in rest {
        pb.line_to(x, y);
    }
    pb.close();
    pb.finish()
}

fn rect_path(r: &Rect) -> Option<Path> {
    SkiaRect::from_ltrb(r.x0, r.y0, r.x1, r.y1).map(PathBuilder::from_rect)
}

// ============================================================================
// Tests
// ============================================================================
