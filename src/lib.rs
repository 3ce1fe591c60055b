//! bugball-icon: procedural launcher icon renderer
//!
//! This crate paints a bug mascot over a sports ball from size-independent
//! shape descriptions and exports it in every launcher density, including a
//! circle-masked round variant.
//!
//! # Example
//!
//! ```
//! use bugball_icon::{MaskSpec, StyleConfig, render};
//!
//! let icon = render(96, &StyleConfig::default())?;
//! assert_eq!(icon.dimensions(), (96, 96));
//!
//! let round = MaskSpec::Circle.apply(icon);
//! assert_eq!(round.get_pixel(0, 0)[3], 0);
//! assert_eq!(round.get_pixel(48, 48)[3], 255);
//! # Ok::<(), bugball_icon::IconError>(())
//! ```
//!
//! # Styles
//!
//! Every layer is described by a serializable [`StyleConfig`]. Presets cover
//! the common looks; a renderer can be reconfigured from JSON through the
//! [`Configurable`] trait:
//!
//! ```
//! use bugball_icon::{Configurable, IconRenderer, Preset, StyleConfig};
//!
//! let mut renderer = IconRenderer::from_style(&Preset::Neon.style());
//! renderer.pipeline.border.set_enabled(false);
//!
//! let json = renderer.export_style().to_json().unwrap();
//! let restored = StyleConfig::from_json(&json).unwrap();
//! assert!(!restored.border.unwrap().enabled);
//! ```

mod canvas;
mod compositor;
mod density;
mod error;
mod export;
mod geometry;
mod layer;
mod mask;
mod paint;
mod profile;
mod source;

pub use canvas::{Canvas, DrawOp, Ink};
pub use compositor::{Configurable, IconRenderer};
pub use density::{Density, IconImage, IconSet, IconVariant};
pub use error::{IconError, Result};
pub use export::{
    DEFAULT_RES_DIR, DEFAULT_SOURCE_ASSET, ExportConfig, ExportFailure, ExportReport, export_all,
    write_png,
};
pub use geometry::{
    Ellipse, Length, MIN_PIXEL, Point, Rect, RegularPolygon, RingSlot, Scale, Segment, Shape,
    ShapeDescriptor, ring_positions,
};
pub use layer::{
    Antennae, BackgroundConfig, BallConfig, BallFill, BodyFill, BorderConfig, DecorConfig,
    DropShadow, Eyes, HeadConfig, Highlight, Layer, LayerEffect, LayerPipeline, MascotConfig,
    MascotShadow, Outline, PatternConfig, PatternRing, RenderContext, Shine,
};
pub use mask::MaskSpec;
pub use paint::{Gradient, GradientAxis, ParseColorError, Rgba8};
pub use profile::{Preset, StyleConfig, Toggle};
pub use source::{CropWindow, SourceAsset, crop_window};

/// Renders the opaque procedural icon for `style` at `side` pixels.
///
/// Equivalent to building an [`IconRenderer`] from the style and calling
/// [`IconRenderer::render`] without a source asset.
pub fn render(side: u32, style: &StyleConfig) -> Result<image::RgbaImage> {
    IconRenderer::from_style(style).render(side)
}
