//! Secondary motif: the bug mascot.
//!
//! Body-relative settings are expressed in body radii: horizontal offsets
//! in units of the half-width, vertical offsets in units of the half-height.
//! Left/right features are listed once and mirrored across the vertical axis
//! through the body center.

use serde::{Deserialize, Serialize};

use super::{LayerEffect, Outline};
use crate::canvas::DrawOp;
use crate::geometry::{Ellipse, Length, MIN_PIXEL, Point, Scale, Segment, Shape};
use crate::paint::Rgba8;

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BodyFill {
    Flat { color: Rgba8 },
    /// Shrinking concentric ellipses blending from `edge` to `center`.
    Gradient { edge: Rgba8, center: Rgba8 },
}

/// Translucent copy of the body painted underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MascotShadow {
    /// Shift distance; multiplied by `direction` per axis.
    pub offset: Length,
    pub direction: Point,
    /// Extra downward shift in body half-heights.
    #[serde(default)]
    pub drop: f32,
    pub color: Rgba8,
}

/// Specular dot on the head.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shine {
    /// Offset from the head center in head radii.
    pub offset: Point,
    /// Radius in head radii.
    pub radius: f32,
    pub color: Rgba8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadConfig {
    /// Head center relative to the body center, in body radii.
    pub offset: Point,
    /// Radius in body half-widths.
    pub radius: f32,
    pub color: Rgba8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shine: Option<Shine>,
}

/// A pair of eyes on the head, each a flat ellipse with a pupil.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eyes {
    /// Horizontal distance of each eye from the head center, in head radii.
    pub spacing: f32,
    /// Eye half-width in head radii; the half-height is half of that.
    pub size: f32,
    pub color: Rgba8,
    /// Pupil size relative to the eye.
    pub pupil: f32,
    pub pupil_color: Rgba8,
}

/// Two line segments rising from the head, each capped with a round tip.
///
/// The right antenna is the left one mirrored across the body's vertical
/// axis, so an off-center head still yields a symmetric pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Antennae {
    /// Length in body half-widths.
    pub length: f32,
    /// Angle of each antenna away from vertical, in degrees.
    pub spread: f32,
    pub width: Length,
    pub tip: Length,
    pub color: Rgba8,
}

/// The bug mascot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MascotConfig {
    pub center: Point,
    /// Body half-width.
    pub radius: Length,
    /// Body half-height relative to the half-width.
    #[serde(default = "default_aspect")]
    pub aspect: f32,
    pub body: BodyFill,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<MascotShadow>,
    pub head: HeadConfig,
    /// Spot centers relative to the body center, in body radii.
    #[serde(default)]
    pub spots: Vec<Point>,
    /// Spot radius in body half-widths.
    #[serde(default)]
    pub spot_size: f32,
    #[serde(default = "default_spot_color")]
    pub spot_color: Rgba8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyes: Option<Eyes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antennae: Option<Antennae>,
}

fn default_aspect() -> f32 {
    0.5
}

fn default_spot_color() -> Rgba8 {
    Rgba8::BLACK
}

// ============================================================================
// Painting
// ============================================================================

fn ellipse(cx: f32, cy: f32, rx: f32, ry: f32) -> Shape {
    Shape::Ellipse(Ellipse { cx, cy, rx, ry })
}

/// Resolved pixel frame of the body.
struct Body {
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
}

impl Body {
    /// Pixel position of a point given in body radii.
    fn at(&self, offset: Point) -> (f32, f32) {
        (
            (self.cx + offset.x * self.rx).round(),
            (self.cy + offset.y * self.ry).round(),
        )
    }
}

impl MascotConfig {
    fn body(&self, scale: &Scale) -> Body {
        let (cx, cy) = scale.point(self.center);
        let rx = scale.length(self.radius);
        Body {
            cx,
            cy,
            rx,
            ry: (rx * self.aspect).floor().max(MIN_PIXEL),
        }
    }

    /// A body-relative size resolved with the body radius's pixel floor.
    fn relative(&self, scale: &Scale, factor: f32) -> f32 {
        scale.length(self.radius.times(factor))
    }
}

impl LayerEffect for MascotConfig {
    const NAME: &'static str = "mascot";

    /// Paint order: shadow, body, body outline, antennae, head, head outline,
    /// shine, spots, eyes.
    fn draw_ops(&self, scale: &Scale) -> Vec<DrawOp> {
        let body = self.body(scale);
        let mut ops = Vec::new();

        if let Some(shadow) = &self.shadow {
            let s = scale.length(shadow.offset);
            let sx = body.cx + shadow.direction.x * s;
            let sy = body.cy + shadow.direction.y * s + (shadow.drop * body.ry).floor();
            ops.push(DrawOp::fill(
                ellipse(sx, sy, body.rx, body.ry),
                shadow.color,
            ));
        }

        let outer = ellipse(body.cx, body.cy, body.rx, body.ry);
        match self.body {
            BodyFill::Flat { color } => ops.push(DrawOp::fill(outer, color)),
            BodyFill::Gradient { edge, center } => {
                let steps = body.rx as u32;
                ops.extend((1..=steps).rev().map(|i| {
                    let k = i as f32 / steps as f32;
                    let t = (steps - i) as f32 / steps as f32;
                    let shape = ellipse(
                        body.cx,
                        body.cy,
                        i as f32,
                        (body.ry * k).floor().max(MIN_PIXEL),
                    );
                    DrawOp::fill(shape, edge.lerp(center, t))
                }));
            }
        }
        if let Some(outline) = &self.outline {
            ops.push(DrawOp::stroke(
                outer,
                outline.color,
                scale.length(outline.width),
            ));
        }

        let (hx, hy) = body.at(self.head.offset);
        let head_radius = self.relative(scale, self.head.radius);

        if let Some(antennae) = &self.antennae {
            let length = self.relative(scale, antennae.length);
            ops.extend(antenna_ops(antennae, scale, body.cx, (hx, hy), length));
        }

        let head = ellipse(hx, hy, head_radius, head_radius);
        ops.push(DrawOp::fill(head, self.head.color));
        if let Some(outline) = &self.head.outline {
            ops.push(DrawOp::stroke(
                head,
                outline.color,
                scale.length(outline.width),
            ));
        }
        if let Some(shine) = &self.head.shine {
            let r = self.relative(scale, self.head.radius * shine.radius);
            let x = (hx + shine.offset.x * head_radius).round();
            let y = (hy + shine.offset.y * head_radius).round();
            ops.push(DrawOp::fill(ellipse(x, y, r, r), shine.color));
        }

        let spot_radius = self.relative(scale, self.spot_size);
        for &spot in &self.spots {
            let (x, y) = body.at(spot);
            ops.push(DrawOp::fill(
                ellipse(x, y, spot_radius, spot_radius),
                self.spot_color,
            ));
        }

        if let Some(eyes) = &self.eyes {
            let eye = self.relative(scale, self.head.radius * eyes.size);
            let pupil = (eye * eyes.pupil).floor().max(MIN_PIXEL);
            let spacing = (head_radius * eyes.spacing).floor();
            for x in [hx - spacing, hx + spacing] {
                let half_height = |w: f32| (w * 0.5).floor().max(MIN_PIXEL);
                ops.push(DrawOp::fill(
                    ellipse(x, hy, eye, half_height(eye)),
                    eyes.color,
                ));
                ops.push(DrawOp::fill(
                    ellipse(x, hy, pupil, half_height(pupil)),
                    eyes.pupil_color,
                ));
            }
        }

        ops
    }
}

fn antenna_ops(
    antennae: &Antennae,
    scale: &Scale,
    axis: f32,
    root: (f32, f32),
    length: f32,
) -> Vec<DrawOp> {
    let (rx, y0) = root;
    let angle = antennae.spread.to_radians();
    let dx = (angle.sin() * length).round();
    let dy = (angle.cos() * length).round();
    let width = scale.length(antennae.width);
    let tip = scale.length(antennae.tip);

    // left antenna leans away from the axis; the right one mirrors it
    let x_left = rx.min(2.0 * axis - rx);
    let left = (x_left, x_left - dx);
    let right = (2.0 * axis - left.0, 2.0 * axis - left.1);

    let mut ops = Vec::with_capacity(4);
    for (x0, x1) in [left, right] {
        let y1 = y0 - dy;
        let stalk = Shape::Segment(Segment {
            x0,
            y0,
            x1,
            y1,
            width,
        });
        ops.push(DrawOp::fill(stalk, antennae.color));
        ops.push(DrawOp::fill(ellipse(x1, y1, tip, tip), antennae.color));
    }
    ops
}

// ============================================================================
// Tests
// ============================================================================
