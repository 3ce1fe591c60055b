//! Decorative line and glow layer painted behind the motifs.

use serde::{Deserialize, Serialize};

use super::LayerEffect;
use crate::canvas::DrawOp;
use crate::geometry::{Length, Point, Scale, ShapeDescriptor};
use crate::paint::Rgba8;

/// Decorations painted between the background and the ball.
///
/// Purely additive; never changes canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DecorConfig {
    /// Concentric ring outlines from `radius` down to 1 px. Each ring's color
    /// is `color` brightened by up to `boost`, growing linearly toward the
    /// center, which fakes a radial glow.
    #[serde(rename_all = "camelCase")]
    GlowRings {
        center: Point,
        radius: Length,
        color: Rgba8,
        boost: u8,
        width: Length,
    },
    /// Pitch markings: a center circle, optionally with a halfway line and a
    /// center spot.
    #[serde(rename_all = "camelCase")]
    FieldLines {
        center: Point,
        radius: Length,
        color: Rgba8,
        width: Length,
        halfway_line: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        center_spot: Option<Length>,
    },
}

impl LayerEffect for DecorConfig {
    const NAME: &'static str = "decor";

    fn draw_ops(&self, scale: &Scale) -> Vec<DrawOp> {
        match *self {
            Self::GlowRings {
                center,
                radius,
                color,
                boost,
                width,
            } => glow_rings(scale, center, radius, color, boost, width),
            Self::FieldLines {
                center,
                radius,
                color,
                width,
                halfway_line,
                center_spot,
            } => {
                let stroke = scale.length(width);
                let mut ops = vec![DrawOp::stroke(
                    ShapeDescriptor::circle(center, radius).resolve(scale),
                    color,
                    stroke,
                )];
                if halfway_line {
                    let line = ShapeDescriptor::Segment {
                        from: Point::new(0.0, center.y),
                        to: Point::new(1.0, center.y),
                        width,
                    };
                    ops.push(DrawOp::fill(line.resolve(scale), color));
                }
                if let Some(spot) = center_spot {
                    ops.push(DrawOp::fill(
                        ShapeDescriptor::circle(center, spot).resolve(scale),
                        color,
                    ));
                }
                ops
            }
        }
    }
}

fn glow_rings(
    scale: &Scale,
    center: Point,
    radius: Length,
    color: Rgba8,
    boost: u8,
    width: Length,
) -> Vec<DrawOp> {
    let outer = scale.length(radius) as u32;
    let stroke = scale.length(width);
    (1..=outer)
        .rev()
        .map(|i| {
            let shift = ((outer - i) * boost as u32 / outer) as u8;
            let ring = ShapeDescriptor::circle(center, Length::px(i as f32)).resolve(scale);
            DrawOp::stroke(ring, color.brighten(shift), stroke)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;

    fn rings() -> DecorConfig {
        DecorConfig::GlowRings {
            center: Point::new(0.5, 0.5),
            radius: Length::frac(0.4),
            color: Rgba8::rgb(138, 43, 226),
            boost: 60,
            width: Length::px(2.0),
        }
    }

    #[test]
    fn glow_rings_shrink_and_brighten() {
        let ops = rings().draw_ops(&Scale::new(100));
        assert_eq!(ops.len(), 40);

        let radius = |op: &DrawOp| match op.shape {
            Shape::Ellipse(e) => e.rx,
            _ => panic!("rings are ellipses"),
        };
        assert_eq!(radius(&ops[0]), 40.0);
        assert_eq!(radius(&ops[39]), 1.0);

        let first = ops[0].ink.color();
        let last = ops[39].ink.color();
        assert_eq!(first, Rgba8::rgb(138, 43, 226));
        assert!(last.r > first.r && last.g > first.g);
        assert_eq!(last.b, 255, "blue saturates");
    }

    #[test]
    fn field_lines_optional_parts() {
        let config = DecorConfig::FieldLines {
            center: Point::new(0.5, 0.5),
            radius: Length::frac(0.3),
            color: Rgba8::WHITE,
            width: Length::new(0.015, 1.0),
            halfway_line: true,
            center_spot: Some(Length::frac(0.02)),
        };
        assert_eq!(config.draw_ops(&Scale::new(96)).len(), 3);

        let bare = DecorConfig::FieldLines {
            center: Point::new(0.5, 0.5),
            radius: Length::frac(0.3),
            color: Rgba8::WHITE,
            width: Length::new(0.015, 1.0),
            halfway_line: false,
            center_spot: None,
        };
        assert_eq!(bare.draw_ops(&Scale::new(96)).len(), 1);
    }
}
