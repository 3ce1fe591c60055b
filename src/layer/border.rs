//! Frame around the canvas edge, painted last.

use serde::{Deserialize, Serialize};

use super::LayerEffect;
use crate::canvas::DrawOp;
use crate::geometry::{Length, MIN_PIXEL, Scale, ShapeDescriptor};
use crate::paint::Rgba8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BorderConfig {
    /// One rectangular stroke flush with the canvas edge.
    Single { color: Rgba8, width: Length },
    /// `strokes` concentric strokes flush with the edge, each narrower and
    /// fainter than the last, so the edge glows inward.
    Glow {
        color: Rgba8,
        strokes: u32,
        width: Length,
    },
}

/// A stroke of `width` pixels whose outer edge touches the canvas edge.
fn edge_stroke(scale: &Scale, width: f32, color: Rgba8) -> DrawOp {
    let frame = ShapeDescriptor::Frame {
        inset: Length::px(width / 2.0),
    };
    DrawOp::stroke(frame.resolve(scale), color, width)
}

impl LayerEffect for BorderConfig {
    const NAME: &'static str = "border";

    fn draw_ops(&self, scale: &Scale) -> Vec<DrawOp> {
        match *self {
            Self::Single { color, width } => vec![edge_stroke(scale, scale.length(width), color)],
            Self::Glow {
                color,
                strokes,
                width,
            } => {
                let widest = scale.length(width);
                let m = strokes.max(1);
                (0..m)
                    .map(|i| {
                        let remaining = (m - i) as f32 / m as f32;
                        let w = (widest * remaining).floor().max(MIN_PIXEL);
                        let alpha = (color.a as f32 * remaining).round() as u8;
                        edge_stroke(scale, w, color.with_alpha(alpha))
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;
    use crate::layer::RenderContext;

    #[test]
    fn single_border_hugs_the_edge() {
        let border = BorderConfig::Single {
            color: Rgba8::hex(0x8a2be2),
            width: Length::new(1.0 / 40.0, 3.0),
        };
        let ops = border.draw_ops(&Scale::new(48));
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].stroke_width(), Some(3.0));
        let Shape::Rect(rect) = ops[0].shape else {
            panic!("border is a rect");
        };
        assert_eq!(rect.x0, 1.5);

        let mut ctx = RenderContext::new(48).unwrap();
        border.paint(&mut ctx);
        assert_eq!(ctx.canvas.pixel(0, 20), Some(Rgba8::hex(0x8a2be2)));
        assert_eq!(ctx.canvas.pixel(24, 24), Some(Rgba8::BLACK));
    }

    #[test]
    fn glow_strokes_narrow_and_fade() {
        let border = BorderConfig::Glow {
            color: Rgba8::rgba(255, 215, 0, 200),
            strokes: 4,
            width: Length::frac(0.05),
        };
        let ops = border.draw_ops(&Scale::new(192));
        assert_eq!(ops.len(), 4);
        for pair in ops.windows(2) {
            assert!(pair[1].stroke_width() < pair[0].stroke_width());
            assert!(pair[1].ink.color().a < pair[0].ink.color().a);
        }
        assert!(ops.iter().all(|op| op.stroke_width() >= Some(1.0)));
    }
}
