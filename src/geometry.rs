//! Size-independent shape descriptions and their pixel resolution.
//!
//! Every shape is described in fractions of the canvas side so the same
//! description scales to any icon size. [`Scale`] resolves fractions to
//! whole-pixel values, flooring each size-derived length at a minimum pixel
//! count so strokes and small details never vanish at small sizes.

use serde::{Deserialize, Serialize};

/// Smallest pixel value any size-derived radius, width or offset resolves to.
pub const MIN_PIXEL: f32 = 1.0;

/// Absorbs float error so that e.g. `0.01 * 100` truncates to 1, not 0.
const EPSILON: f32 = 1e-4;

// ============================================================================
// Length / Point
// ============================================================================

/// A size-derived length: `max(min, truncate(fraction * side))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Length {
    /// Fraction of the canvas side.
    pub fraction: f32,
    /// Lower bound in pixels.
    #[serde(default = "default_min")]
    pub min: f32,
}

fn default_min() -> f32 {
    MIN_PIXEL
}

impl Length {
    /// Creates a length with an explicit pixel floor.
    pub const fn new(fraction: f32, min: f32) -> Self {
        Self { fraction, min }
    }

    /// Creates a length floored at [`MIN_PIXEL`].
    pub const fn frac(fraction: f32) -> Self {
        Self::new(fraction, MIN_PIXEL)
    }

    /// A fixed pixel length that does not grow with the canvas.
    pub const fn px(pixels: f32) -> Self {
        Self::new(0.0, pixels)
    }

    /// Scales the fractional part, keeping the floor.
    pub fn times(self, factor: f32) -> Self {
        Self::new(self.fraction * factor, self.min)
    }
}

/// A position in fractions of the canvas side, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offsets this point by `(dx, dy)` fractions.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

// ============================================================================
// Scale
// ============================================================================

/// Resolves fractional geometry against a concrete canvas side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    side: u32,
}

impl Scale {
    pub fn new(side: u32) -> Self {
        Self { side }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Resolves a coordinate fraction to a whole pixel (truncated).
    pub fn coord(&self, fraction: f32) -> f32 {
        (fraction * self.side as f32 + EPSILON).floor()
    }

    /// Resolves a length, applying its pixel floor.
    pub fn length(&self, length: Length) -> f32 {
        self.coord(length.fraction).max(length.min)
    }

    /// Resolves a point to whole-pixel coordinates.
    pub fn point(&self, point: Point) -> (f32, f32) {
        (self.coord(point.x), self.coord(point.y))
    }
}

// ============================================================================
// Shape descriptors (fractions) and resolved shapes (pixels)
// ============================================================================

/// A geometric primitive described in fractions of the canvas side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeDescriptor {
    /// Axis-aligned ellipse.
    Ellipse { center: Point, rx: Length, ry: Length },
    /// Regular n-gon inscribed in a circle of `radius`, rotated clockwise by
    /// `rotation` degrees (0 puts a vertex straight up).
    Polygon {
        center: Point,
        radius: Length,
        sides: u32,
        rotation: f32,
    },
    /// Straight line of the given width.
    Segment { from: Point, to: Point, width: Length },
    /// Axis-aligned rectangle inset from the canvas edges by `inset`.
    Frame { inset: Length },
}

impl ShapeDescriptor {
    pub fn circle(center: Point, radius: Length) -> Self {
        Self::Ellipse {
            center,
            rx: radius,
            ry: radius,
        }
    }

    /// Resolves the descriptor to pixel geometry.
    pub fn resolve(&self, scale: &Scale) -> Shape {
        match *self {
            Self::Ellipse { center, rx, ry } => {
                let (cx, cy) = scale.point(center);
                Shape::Ellipse(Ellipse {
                    cx,
                    cy,
                    rx: scale.length(rx),
                    ry: scale.length(ry),
                })
            }
            Self::Polygon {
                center,
                radius,
                sides,
                rotation,
            } => {
                let (cx, cy) = scale.point(center);
                Shape::Polygon(RegularPolygon {
                    cx,
                    cy,
                    radius: scale.length(radius),
                    sides: sides.max(3),
                    rotation,
                })
            }
            Self::Segment { from, to, width } => {
                let (x0, y0) = scale.point(from);
                let (x1, y1) = scale.point(to);
                Shape::Segment(Segment {
                    x0,
                    y0,
                    x1,
                    y1,
                    width: scale.length(width),
                })
            }
            Self::Frame { inset } => {
                let inset = scale.length(inset);
                let side = scale.side() as f32;
                Shape::Rect(Rect {
                    x0: inset,
                    y0: inset,
                    x1: side - inset,
                    y1: side - inset,
                })
            }
        }
    }
}

/// A primitive in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Ellipse(Ellipse),
    Polygon(RegularPolygon),
    Segment(Segment),
    Rect(Rect),
}

impl Shape {
    /// The smallest characteristic dimension (radius or width) of the shape.
    pub fn min_extent(&self) -> f32 {
        match self {
            Self::Ellipse(e) => e.rx.min(e.ry),
            Self::Polygon(p) => p.radius,
            Self::Segment(s) => s.width,
            Self::Rect(r) => (r.x1 - r.x0).min(r.y1 - r.y0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub cx: f32,
    pub cy: f32,
    pub rx: f32,
    pub ry: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegularPolygon {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub sides: u32,
    pub rotation: f32,
}

impl RegularPolygon {
    /// Vertex positions, clockwise from the (rotated) top vertex.
    pub fn vertices(&self) -> Vec<(f32, f32)> {
        let step = 360.0 / self.sides as f32;
        (0..self.sides)
            .map(|k| {
                let angle = (self.rotation - 90.0 + step * k as f32).to_radians();
                (
                    self.cx + self.radius * angle.cos(),
                    self.cy + self.radius * angle.sin(),
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

// ============================================================================
// Ring placement
// ============================================================================

/// One slot of a ring produced by [`ring_positions`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSlot {
    pub position: Point,
    /// Angular position in degrees, clockwise from straight up.
    pub angle: f32,
}

/// Places `count` slots evenly around a circle of radius `orbit` (a fraction
/// of the canvas side), starting at `phase` degrees clockwise from straight up.
///
/// Each slot carries its angle so a shape placed there can be rotated to
/// match its position on the ring.
pub fn ring_positions(center: Point, orbit: f32, count: u32, phase: f32) -> Vec<RingSlot> {
    if count == 0 {
        return Vec::new();
    }
    let step = 360.0 / count as f32;
    (0..count)
        .map(|i| {
            let angle = phase + step * i as f32;
            let theta = (angle - 90.0).to_radians();
            RingSlot {
                position: center.offset(orbit * theta.cos(), orbit * theta.sin()),
                angle,
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_respects_floor() {
        let scale = Scale::new(48);
        assert_eq!(scale.length(Length::new(0.01, 2.0)), 2.0);
        assert_eq!(Scale::new(400).length(Length::new(0.01, 2.0)), 4.0);
        assert_eq!(scale.length(Length::px(3.0)), 3.0);
    }

    #[test]
    fn coordinates_truncate() {
        let scale = Scale::new(96);
        // 0.55 * 96 = 52.8
        assert_eq!(scale.coord(0.55), 52.0);
        // exact products must not fall one pixel short
        assert_eq!(Scale::new(100).coord(0.01), 1.0);
    }

    #[test]
    fn ring_is_evenly_spaced() {
        let slots = ring_positions(Point::new(0.5, 0.5), 0.25, 5, 0.0);
        assert_eq!(slots.len(), 5);
        for (i, slot) in slots.iter().enumerate() {
            assert!((slot.angle - 72.0 * i as f32).abs() < 1e-4);
            let dx = slot.position.x - 0.5;
            let dy = slot.position.y - 0.5;
            assert!(((dx * dx + dy * dy).sqrt() - 0.25).abs() < 1e-4);
        }
        // first slot sits straight above the center
        assert!((slots[0].position.x - 0.5).abs() < 1e-4);
        assert!((slots[0].position.y - 0.25).abs() < 1e-4);
    }

    #[test]
    fn polygon_vertices_follow_rotation() {
        let hex = RegularPolygon {
            cx: 10.0,
            cy: 10.0,
            radius: 5.0,
            sides: 6,
            rotation: 0.0,
        };
        let verts = hex.vertices();
        assert_eq!(verts.len(), 6);
        assert!((verts[0].0 - 10.0).abs() < 1e-4);
        assert!((verts[0].1 - 5.0).abs() < 1e-4);

        let turned = RegularPolygon {
            rotation: 90.0,
            ..hex
        };
        let first = turned.vertices()[0];
        assert!((first.0 - 15.0).abs() < 1e-4);
        assert!((first.1 - 10.0).abs() < 1e-4);
    }

    #[test]
    fn frame_resolves_inside_canvas() {
        let shape = ShapeDescriptor::Frame {
            inset: Length::px(1.5),
        }
        .resolve(&Scale::new(48));
        let Shape::Rect(rect) = shape else {
            panic!("frame should resolve to a rect");
        };
        assert_eq!((rect.x0, rect.y0, rect.x1, rect.y1), (1.5, 1.5, 46.5, 46.5));
    }
}
