//! Background fill layer.

use serde::{Deserialize, Serialize};

use super::{LayerEffect, RenderContext};
use crate::paint::{Gradient, Rgba8};

/// How the canvas is filled before anything else is painted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BackgroundConfig {
    /// A single flat color.
    Flat { color: Rgba8 },
    /// Top-to-bottom blend, e.g. sky to grass or purple to near-black.
    Vertical { top: Rgba8, bottom: Rgba8 },
    /// Center-to-corner blend.
    Radial { center: Rgba8, edge: Rgba8 },
}

impl BackgroundConfig {
    /// The gradient rule behind this fill, if it is not flat.
    pub fn gradient(&self) -> Option<Gradient> {
        match *self {
            Self::Flat { .. } => None,
            Self::Vertical { top, bottom } => Some(Gradient::vertical(top, bottom)),
            Self::Radial { center, edge } => Some(Gradient::radial(center, edge)),
        }
    }

    /// Color of pixel `(x, y)` on a canvas of `side` pixels.
    pub fn color_at(&self, x: u32, y: u32, side: u32) -> Rgba8 {
        self.gradient()
            .map_or(self.primary_color(), |g| g.sample(x, y, side))
    }

    /// The dominant color, used as the backdrop behind a source asset.
    pub fn primary_color(&self) -> Rgba8 {
        match *self {
            Self::Flat { color } => color,
            Self::Vertical { top, .. } => top,
            Self::Radial { center, .. } => center,
        }
    }
}

impl LayerEffect for BackgroundConfig {
    const NAME: &'static str = "background";

    fn paint(&self, ctx: &mut RenderContext) {
        if self.gradient().is_none() {
            ctx.canvas.fill(self.primary_color());
            return;
        }
        let side = ctx.canvas.side();
        ctx.canvas.shade(|x, y| self.color_at(x, y, side));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paint(config: BackgroundConfig, side: u32) -> RenderContext {
        let mut ctx = RenderContext::new(side).unwrap();
        config.paint(&mut ctx);
        ctx
    }

    #[test]
    fn flat_fill() {
        let ctx = paint(
            BackgroundConfig::Flat {
                color: Rgba8::hex(0x1a0033),
            },
            8,
        );
        assert_eq!(ctx.canvas.pixel(7, 7), Some(Rgba8::hex(0x1a0033)));
    }

    #[test]
    fn vertical_runs_top_to_bottom() {
        let config = BackgroundConfig::Vertical {
            top: Rgba8::hex(0x1a0033),
            bottom: Rgba8::hex(0x0d001a),
        };
        let ctx = paint(config, 48);
        assert_eq!(ctx.canvas.pixel(0, 0), Some(Rgba8::hex(0x1a0033)));
        let top = ctx.canvas.pixel(10, 0).unwrap();
        let bottom = ctx.canvas.pixel(10, 47).unwrap();
        assert!(bottom.b < top.b, "gradient darkens toward the bottom");
        assert_eq!(
            ctx.canvas.pixel(0, 20),
            ctx.canvas.pixel(40, 20),
            "rows are uniform"
        );
    }

    #[test]
    fn radial_is_symmetric() {
        let config = BackgroundConfig::Radial {
            center: Rgba8::WHITE,
            edge: Rgba8::BLACK,
        };
        let ctx = paint(config, 32);
        let c = |x, y| ctx.canvas.pixel(x, y).unwrap();
        assert_eq!(c(0, 0), c(31, 31));
        assert_eq!(c(0, 31), c(31, 0));
        assert!(c(16, 16).r > c(0, 0).r, "center is brighter than corners");
    }
}
