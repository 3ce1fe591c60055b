//! Layer infrastructure for the icon compositor.
//!
//! Each layer encapsulates a configuration and an enabled state. Layers are
//! stateless painters: given a [`RenderContext`] they paint onto its canvas
//! and keep nothing between renders.
//!
//! # Architecture
//!
//! Each layer config implements [`LayerEffect`], which defines:
//! - The draw operations the layer resolves to at a given [`Scale`]
//! - How the layer paints itself (by default, by drawing those operations)
//!
//! [`LayerPipeline`] owns one [`Layer`] per stage and paints them in a fixed
//! order, later layers blending over earlier ones.

pub mod background;
pub mod ball;
pub mod border;
pub mod decor;
pub mod mascot;

pub use background::BackgroundConfig;
pub use ball::{BallConfig, BallFill, DropShadow, Highlight, PatternConfig, PatternRing};
pub use border::BorderConfig;
pub use decor::DecorConfig;
pub use mascot::{Antennae, BodyFill, Eyes, HeadConfig, MascotConfig, MascotShadow, Shine};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, DrawOp};
use crate::error::Result;
use crate::geometry::{Length, Scale};
use crate::paint::Rgba8;

// ============================================================================
// Render Context
// ============================================================================

/// State that flows through the pipeline for a single render.
pub struct RenderContext {
    /// The canvas being painted.
    pub canvas: Canvas,

    /// Resolves fractional geometry for this canvas.
    pub scale: Scale,
}

impl RenderContext {
    /// Creates a context with a fresh opaque canvas of `side` pixels.
    pub fn new(side: u32) -> Result<Self> {
        Ok(Self {
            canvas: Canvas::new(side)?,
            scale: Scale::new(side),
        })
    }
}

// ============================================================================
// Shared settings
// ============================================================================

/// A colored outline drawn around a filled shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outline {
    pub color: Rgba8,
    pub width: Length,
}

impl Outline {
    pub const fn new(color: Rgba8, width: Length) -> Self {
        Self { color, width }
    }
}

// ============================================================================
// Layer Traits
// ============================================================================

/// Trait for layer configurations that know how to paint themselves.
pub trait LayerEffect {
    /// Short name used in log output.
    const NAME: &'static str;

    /// Resolves the layer to draw operations for the given scale.
    ///
    /// Layers that paint per pixel rather than with shapes return nothing.
    fn draw_ops(&self, _scale: &Scale) -> Vec<DrawOp> {
        Vec::new()
    }

    /// Paints the layer onto the context's canvas.
    fn paint(&self, ctx: &mut RenderContext) {
        let ops = self.draw_ops(&ctx.scale);
        ctx.canvas.draw_all(&ops);
    }
}

// ============================================================================
// Generic Layer
// ============================================================================

/// A pipeline stage: optional configuration plus an enabled toggle.
///
/// Disabling a layer keeps its configuration, so it can be re-enabled later.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer<C> {
    config: Option<C>,
    enabled: bool,
}

impl<C> Default for Layer<C> {
    fn default() -> Self {
        Self {
            config: None,
            enabled: true,
        }
    }
}

impl<C> Layer<C> {
    /// Creates an enabled layer with the given configuration.
    pub fn with_config(config: C) -> Self {
        Self {
            config: Some(config),
            enabled: true,
        }
    }

    /// Returns the current configuration, if any.
    pub fn config(&self) -> Option<&C> {
        self.config.as_ref()
    }

    /// Returns true if this layer is active (has config AND is enabled).
    pub fn is_active(&self) -> bool {
        self.enabled && self.config.is_some()
    }

    pub fn has_config(&self) -> bool {
        self.config.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets whether the layer is enabled. Returns true if the state changed.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let changed = self.enabled != enabled;
        self.enabled = enabled;
        changed
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: Option<C>) {
        self.config = config;
    }

    /// The configuration, only if the layer is active.
    pub fn active_config(&self) -> Option<&C> {
        self.config.as_ref().filter(|_| self.enabled)
    }
}

impl<C: LayerEffect> Layer<C> {
    /// Paints this layer if it is active; otherwise the canvas passes through.
    pub fn apply(&self, ctx: &mut RenderContext) {
        if let Some(config) = self.active_config() {
            debug!("painting {} layer at {}px", C::NAME, ctx.scale.side());
            config.paint(ctx);
        }
    }

    /// Draw operations of this layer if it is active.
    pub fn draw_ops(&self, scale: &Scale) -> Vec<DrawOp> {
        self.active_config()
            .map(|config| config.draw_ops(scale))
            .unwrap_or_default()
    }
}

// ============================================================================
// Layer Pipeline
// ============================================================================

/// The compositor's layers in strict paint order.
///
/// ```text
/// Background ─► Decor ─► Ball ─► Mascot ─► Border
/// ```
///
/// Background, ball and mascot are expected to be configured; decor and
/// border are optional decorations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerPipeline {
    /// Flat, vertical-gradient or radial-gradient fill.
    pub background: Layer<BackgroundConfig>,

    /// Glow rings or pitch markings behind the motifs.
    pub decor: Layer<DecorConfig>,

    /// The primary ball motif.
    pub ball: Layer<BallConfig>,

    /// The bug mascot.
    pub mascot: Layer<MascotConfig>,

    /// Single or glowing frame around the edge.
    pub border: Layer<BorderConfig>,
}

impl LayerPipeline {
    /// Paints every active layer onto a fresh canvas of `side` pixels.
    pub fn render(&self, side: u32) -> Result<Canvas> {
        let mut ctx = RenderContext::new(side)?;
        self.background.apply(&mut ctx);
        self.decor.apply(&mut ctx);
        self.ball.apply(&mut ctx);
        self.mascot.apply(&mut ctx);
        self.border.apply(&mut ctx);
        Ok(ctx.canvas)
    }

    /// All shape-based draw operations the pipeline resolves to at `side`,
    /// tagged with the layer they come from.
    pub fn draw_ops(&self, side: u32) -> Vec<(&'static str, DrawOp)> {
        let scale = Scale::new(side);
        let tag = |name: &'static str, ops: Vec<DrawOp>| {
            ops.into_iter().map(move |op| (name, op)).collect::<Vec<_>>()
        };
        let mut all = Vec::new();
        all.extend(tag(DecorConfig::NAME, self.decor.draw_ops(&scale)));
        all.extend(tag(BallConfig::NAME, self.ball.draw_ops(&scale)));
        all.extend(tag(MascotConfig::NAME, self.mascot.draw_ops(&scale)));
        all.extend(tag(BorderConfig::NAME, self.border.draw_ops(&scale)));
        all
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_toggle_keeps_config() {
        let mut layer = Layer::with_config(BorderConfig::Single {
            color: Rgba8::WHITE,
            width: Length::px(2.0),
        });
        assert!(layer.is_active());

        assert!(layer.set_enabled(false));
        assert!(!layer.is_active());
        assert!(layer.has_config(), "config survives disabling");

        assert!(!layer.set_enabled(false), "no change on repeated disable");
        assert!(layer.set_enabled(true));
        assert!(layer.is_active());
    }

    #[test]
    fn inactive_layer_has_no_ops() {
        let mut layer: Layer<BorderConfig> = Layer::default();
        assert!(layer.is_enabled());
        assert!(!layer.is_active(), "no config means inactive");
        assert!(layer.draw_ops(&Scale::new(48)).is_empty());

        layer.set_config(Some(BorderConfig::Single {
            color: Rgba8::WHITE,
            width: Length::px(2.0),
        }));
        assert_eq!(layer.draw_ops(&Scale::new(48)).len(), 1);
        layer.set_enabled(false);
        assert!(layer.draw_ops(&Scale::new(48)).is_empty());
    }

    #[test]
    fn empty_pipeline_renders_opaque_black() {
        let canvas = LayerPipeline::default().render(16).unwrap();
        let img = canvas.into_image();
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }
}
