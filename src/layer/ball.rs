//! Primary motif: the ball.

use serde::{Deserialize, Serialize};

use super::{LayerEffect, Outline};
use crate::canvas::DrawOp;
use crate::geometry::{Ellipse, Length, Point, Scale, Shape, ShapeDescriptor, ring_positions};
use crate::paint::Rgba8;

// ============================================================================
// Settings
// ============================================================================

/// Base fill of the ball body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BallFill {
    Flat { color: Rgba8 },
    /// Concentric circles from the rim inward, moving from `edge` to `center`.
    Shaded { edge: Rgba8, center: Rgba8 },
}

/// Soft shadow faked with several offset, increasingly large and
/// increasingly transparent circles painted before the body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropShadow {
    /// Offset of the shadow center in fractions of the canvas side.
    pub offset: Point,
    /// Extra radius of the last pass over the body radius.
    pub spread: Length,
    pub passes: u32,
    /// Shadow color; its alpha is the opacity of the first pass.
    pub color: Rgba8,
    /// Vertical radius relative to horizontal radius.
    #[serde(default = "default_squash")]
    pub squash: f32,
}

fn default_squash() -> f32 {
    1.0
}

/// Specular highlight: concentric circles whose opacity peaks at an
/// off-center point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    /// Offset of the peak in fractions of the ball radius.
    pub offset: Point,
    /// Radius in fractions of the ball radius.
    pub radius: f32,
    /// Highlight color; its alpha is the peak opacity.
    pub color: Rgba8,
}

/// A ring of congruent polygons around the central one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRing {
    pub count: u32,
    /// Orbit radius in fractions of the ball radius.
    pub orbit: f32,
    /// Polygon size in fractions of the central polygon's size.
    pub size: f32,
    /// Angle of the first slot, degrees clockwise from straight up.
    #[serde(default)]
    pub phase: f32,
}

/// Surface tessellation: a central regular polygon plus an optional ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternConfig {
    pub sides: u32,
    /// Central polygon radius in fractions of the ball radius.
    pub size: f32,
    #[serde(default)]
    pub rotation: f32,
    pub color: Rgba8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring: Option<PatternRing>,
}

/// The ball motif.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallConfig {
    pub center: Point,
    pub radius: Length,
    pub fill: BallFill,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<DropShadow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternConfig>,
}

// ============================================================================
// Painting
// ============================================================================

impl LayerEffect for BallConfig {
    const NAME: &'static str = "ball";

    /// Paint order: shadow, body, highlight, pattern, outline.
    fn draw_ops(&self, scale: &Scale) -> Vec<DrawOp> {
        let (cx, cy) = scale.point(self.center);
        let radius = scale.length(self.radius);
        let mut ops = Vec::new();

        if let Some(shadow) = &self.shadow {
            ops.extend(shadow_ops(shadow, scale, self.center, radius));
        }

        let body = ShapeDescriptor::circle(self.center, self.radius).resolve(scale);
        match self.fill {
            BallFill::Flat { color } => ops.push(DrawOp::fill(body, color)),
            BallFill::Shaded { edge, center } => {
                let steps = radius as u32;
                ops.extend((1..=steps).rev().map(|i| {
                    let t = (steps - i) as f32 / steps as f32;
                    DrawOp::fill(circle(cx, cy, i as f32), edge.lerp(center, t))
                }));
            }
        }

        if let Some(highlight) = &self.highlight {
            ops.extend(highlight_ops(highlight, cx, cy, radius));
        }

        if let Some(pattern) = &self.pattern {
            ops.extend(pattern_ops(pattern, scale, self.center, self.radius));
        }

        if let Some(outline) = &self.outline {
            ops.push(DrawOp::stroke(
                body,
                outline.color,
                scale.length(outline.width),
            ));
        }

        ops
    }
}

fn circle(cx: f32, cy: f32, r: f32) -> Shape {
    Shape::Ellipse(Ellipse {
        cx,
        cy,
        rx: r,
        ry: r,
    })
}

fn shadow_ops(shadow: &DropShadow, scale: &Scale, center: Point, radius: f32) -> Vec<DrawOp> {
    let (sx, sy) = scale.point(center.offset(shadow.offset.x, shadow.offset.y));
    let spread = scale.length(shadow.spread);
    let passes = shadow.passes.max(1);
    (0..passes)
        .map(|p| {
            let rx = radius + (spread * p as f32 / passes as f32).floor();
            let ry = (rx * shadow.squash).floor().max(1.0);
            let alpha = shadow.color.a as u32 * (passes - p) / passes;
            let shape = Shape::Ellipse(Ellipse {
                cx: sx,
                cy: sy,
                rx,
                ry,
            });
            DrawOp::fill(shape, shadow.color.with_alpha(alpha as u8))
        })
        .collect()
}

fn highlight_ops(highlight: &Highlight, cx: f32, cy: f32, radius: f32) -> Vec<DrawOp> {
    let hx = (cx + highlight.offset.x * radius).round();
    let hy = (cy + highlight.offset.y * radius).round();
    let steps = (highlight.radius * radius).floor().max(1.0) as u32;
    let peak = highlight.color.a as u32;
    (1..=steps)
        .rev()
        .map(|i| {
            let alpha = peak * (steps - i + 1) / steps;
            DrawOp::fill(
                circle(hx, hy, i as f32),
                highlight.color.with_alpha(alpha as u8),
            )
        })
        .collect()
}

/// Places the central polygon, then `k` congruent polygons evenly around the
/// orbit, each rotated by its angular position.
fn pattern_ops(pattern: &PatternConfig, scale: &Scale, center: Point, radius: Length) -> Vec<DrawOp> {
    let size = radius.times(pattern.size);
    let mut ops = vec![DrawOp::fill(
        ShapeDescriptor::Polygon {
            center,
            radius: size,
            sides: pattern.sides,
            rotation: pattern.rotation,
        }
        .resolve(scale),
        pattern.color,
    )];

    if let Some(ring) = &pattern.ring {
        let orbit = radius.fraction * ring.orbit;
        for slot in ring_positions(center, orbit, ring.count, ring.phase) {
            let polygon = ShapeDescriptor::Polygon {
                center: slot.position,
                radius: size.times(ring.size),
                sides: pattern.sides,
                rotation: pattern.rotation + slot.angle,
            };
            ops.push(DrawOp::fill(polygon.resolve(scale), pattern.color));
        }
    }
    ops
}

// ============================================================================
// Tests
// ============================================================================
