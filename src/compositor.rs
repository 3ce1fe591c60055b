//! Icon compositor: turns a style (or a source asset) into rendered icons.

use std::sync::Arc;

use image::RgbaImage;
use log::debug;

use crate::density::{Density, IconImage, IconVariant};
use crate::error::Result;
use crate::layer::{Layer, LayerPipeline};
use crate::paint::Rgba8;
use crate::profile::{StyleConfig, Toggle};
use crate::source::SourceAsset;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`StyleConfig`].
pub trait Configurable {
    /// Applies a style's settings to this instance.
    fn apply_style(&mut self, style: &StyleConfig);

    /// Exports the current settings as a style.
    fn export_style(&self) -> StyleConfig;
}

// ============================================================================
// IconRenderer
// ============================================================================

/// Main icon rendering engine.
///
/// `IconRenderer` owns a [`LayerPipeline`] describing the procedural artwork
/// and an optional [`SourceAsset`]. Access layers directly through the
/// [`pipeline`](Self::pipeline) field to configure them.
///
/// # Layer Pipeline
///
/// 1. **Background** (`pipeline.background`) - Flat or gradient fill
/// 2. **Decor** (`pipeline.decor`) - Glow rings or pitch markings
/// 3. **Ball** (`pipeline.ball`) - The primary motif
/// 4. **Mascot** (`pipeline.mascot`) - The bug
/// 5. **Border** (`pipeline.border`) - Frame around the edge
///
/// Rendering never mutates the renderer, so one renderer can serve many
/// threads at once.
///
/// # Example
///
/// ```
/// use bugball_icon::{IconRenderer, Preset};
///
/// let mut renderer = IconRenderer::from_style(&Preset::Stadium.style());
///
/// // Toggle layers without losing config
/// renderer.pipeline.decor.set_enabled(false);
///
/// let icon = renderer.render(96).unwrap();
/// assert_eq!(icon.dimensions(), (96, 96));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IconRenderer {
    /// The layer pipeline. Access layers directly to configure them.
    pub pipeline: LayerPipeline,

    /// Replaces the procedural artwork when present.
    source: Option<Arc<SourceAsset>>,

    /// Explicit backdrop behind a source asset.
    backdrop: Option<Rgba8>,
}

impl IconRenderer {
    /// Creates a renderer with an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer configured from `style`.
    pub fn from_style(style: &StyleConfig) -> Self {
        let mut renderer = Self::new();
        renderer.apply_style(style);
        renderer
    }

    /// Substitutes a source asset for the procedural artwork.
    pub fn with_source(mut self, source: impl Into<Arc<SourceAsset>>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn set_source(&mut self, source: Option<Arc<SourceAsset>>) {
        self.source = source;
    }

    pub fn source(&self) -> Option<&SourceAsset> {
        self.source.as_deref()
    }

    /// The opaque color a source asset is composited onto.
    pub fn backdrop_color(&self) -> Rgba8 {
        self.backdrop
            .or_else(|| {
                self.pipeline
                    .background
                    .config()
                    .map(|bg| bg.primary_color())
            })
            .unwrap_or(Rgba8::BLACK)
    }

    /// Renders the opaque square icon at `side` pixels.
    ///
    /// Uses the source asset when present, otherwise paints the pipeline.
    /// The same inputs always produce the same pixels.
    pub fn render(&self, side: u32) -> Result<RgbaImage> {
        match self.source() {
            Some(source) => {
                debug!("rendering {side}px icon from source asset");
                source.compose_on_backdrop(side, self.backdrop_color())
            }
            None => self.render_procedural(side),
        }
    }

    /// Paints the layer pipeline, ignoring any source asset.
    pub fn render_procedural(&self, side: u32) -> Result<RgbaImage> {
        debug!("rendering {side}px procedural icon");
        Ok(self.pipeline.render(side)?.into_image())
    }

    /// Renders one output file's image, with the variant's mask applied.
    pub fn render_variant(&self, density: Density, variant: IconVariant) -> Result<IconImage> {
        let data = self.render(density.side())?;
        let mask = variant.mask(self.source.is_some());
        Ok(IconImage::new(mask.apply(data), density, variant))
    }
}

fn apply_toggle<C: Clone>(layer: &mut Layer<C>, toggle: Option<&Toggle<C>>) {
    match toggle {
        Some(toggle) => {
            layer.set_config(Some(toggle.settings.clone()));
            layer.set_enabled(toggle.enabled);
        }
        None => layer.set_config(None),
    }
}

fn export_toggle<C: Clone>(layer: &Layer<C>) -> Option<Toggle<C>> {
    layer.config().map(|settings| Toggle {
        settings: settings.clone(),
        enabled: layer.is_enabled(),
    })
}

impl Configurable for IconRenderer {
    /// Sets the configuration and enabled state of every layer.
    ///
    /// # Example
    ///
    /// ```
    /// use bugball_icon::{Configurable, IconRenderer, Preset};
    ///
    /// let mut renderer = IconRenderer::new();
    /// renderer.apply_style(&Preset::Neon.style());
    /// assert!(renderer.pipeline.mascot.is_active());
    /// ```
    fn apply_style(&mut self, style: &StyleConfig) {
        apply_toggle(&mut self.pipeline.background, style.background.as_ref());
        apply_toggle(&mut self.pipeline.decor, style.decor.as_ref());
        apply_toggle(&mut self.pipeline.ball, style.ball.as_ref());
        apply_toggle(&mut self.pipeline.mascot, style.mascot.as_ref());
        apply_toggle(&mut self.pipeline.border, style.border.as_ref());
        self.backdrop = style.backdrop;
    }

    fn export_style(&self) -> StyleConfig {
        StyleConfig {
            background: export_toggle(&self.pipeline.background),
            decor: export_toggle(&self.pipeline.decor),
            ball: export_toggle(&self.pipeline.ball),
            mascot: export_toggle(&self.pipeline.mascot),
            border: export_toggle(&self.pipeline.border),
            backdrop: self.backdrop,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IconError;
    use crate::layer::BorderConfig;
    use crate::profile::Preset;
    use image::Rgba;

    const SIZES: [u32; 5] = [48, 72, 96, 144, 192];

    fn is_light(p: &Rgba<u8>) -> bool {
        p[0] >= 180 && p[1] >= 180 && p[2] >= 180
    }

    fn near(p: &Rgba<u8>, rgb: [u8; 3]) -> bool {
        (0..3).all(|i| p[i].abs_diff(rgb[i]) <= 2)
    }

    #[test]
    fn renders_opaque_squares_at_every_size() {
        for preset in Preset::ALL {
            let renderer = IconRenderer::from_style(&preset.style());
            for side in SIZES {
                let img = renderer.render(side).unwrap();
                assert_eq!(img.dimensions(), (side, side));
                assert!(
                    img.pixels().all(|p| p[3] == 255),
                    "{} at {side}px must be opaque",
                    preset.name()
                );
            }
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = IconRenderer::from_style(&StyleConfig::default());
        assert_eq!(renderer.render(72).unwrap(), renderer.render(72).unwrap());
    }

    #[test]
    fn zero_side_is_invalid() {
        let renderer = IconRenderer::from_style(&StyleConfig::default());
        assert!(matches!(renderer.render(0), Err(IconError::InvalidInput(_))));
    }

    #[test]
    fn every_stroke_and_radius_stays_legible() {
        for preset in Preset::ALL {
            let renderer = IconRenderer::from_style(&preset.style());
            for side in SIZES {
                for (layer, op) in renderer.pipeline.draw_ops(side) {
                    if let Some(width) = op.stroke_width() {
                        assert!(width >= 1.0, "{} {layer} stroke {width} at {side}px", preset.name());
                    }
                    assert!(
                        op.shape.min_extent() >= 1.0,
                        "{} {layer} {:?} at {side}px",
                        preset.name(),
                        op.shape
                    );
                }
            }
        }
    }

    #[test]
    fn default_style_shows_ball_and_mascot_at_96() {
        let img = IconRenderer::from_style(&StyleConfig::default())
            .render(96)
            .unwrap();

        // the ball is the widest light run across the middle row
        let light: Vec<u32> = (0..96).filter(|&x| is_light(img.get_pixel(x, 48))).collect();
        let (left, right) = (light[0], light[light.len() - 1]);
        let radius = (right + 1 - left) as f32 / 2.0 / 96.0;
        let center = (left + right + 1) as f32 / 2.0 / 96.0;
        assert!((0.35..=0.45).contains(&radius), "ball radius fraction {radius}");
        assert!((center - 0.5).abs() <= 0.05, "ball center fraction {center}");

        // dark central polygon
        let middle = img.get_pixel(48, 48);
        assert!(middle[0] < 80 && middle[1] < 80 && middle[2] < 80);

        // reddish mascot body lower right
        let body = img.get_pixel(61, 67);
        assert!(body[0] > 150 && body[0] as u32 > body[1] as u32 + 60, "{body:?}");
    }

    #[test]
    fn round_icon_masks_corners() {
        let renderer = IconRenderer::from_style(&StyleConfig::default());
        let round = renderer
            .render_variant(Density::Mdpi, IconVariant::Round)
            .unwrap();
        assert_eq!(round.data.dimensions(), (48, 48));
        for (x, y) in [(0, 0), (47, 0), (0, 47), (47, 47)] {
            assert_eq!(round.data.get_pixel(x, y)[3], 0);
        }
        assert_eq!(round.data.get_pixel(24, 24)[3], 255);

        let standard = renderer
            .render_variant(Density::Mdpi, IconVariant::Standard)
            .unwrap();
        assert!(standard.data.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn disabled_layer_is_skipped() {
        let mut renderer = IconRenderer::from_style(&Preset::Neon.style());
        let framed = renderer.render(48).unwrap();
        assert!(near(framed.get_pixel(0, 24), [0x8a, 0x2b, 0xe2]));

        assert!(renderer.pipeline.border.set_enabled(false));
        let bare = renderer.render(48).unwrap();
        assert!(!near(bare.get_pixel(0, 24), [0x8a, 0x2b, 0xe2]));
        assert!(renderer.pipeline.border.has_config());
    }

    #[test]
    fn style_apply_and_export_roundtrip() {
        let style = Preset::Stadium.style();
        let mut renderer = IconRenderer::new();
        renderer.apply_style(&style);
        assert_eq!(renderer.export_style(), style);

        renderer.pipeline.border.set_enabled(false);
        let exported = renderer.export_style();
        assert!(!exported.border.as_ref().unwrap().enabled);
        assert!(matches!(
            exported.border.unwrap().settings,
            BorderConfig::Single { .. }
        ));

        renderer.apply_style(&StyleConfig::new());
        assert!(renderer.pipeline.ball.config().is_none());
    }

    #[test]
    fn source_asset_replaces_artwork() {
        let red = RgbaImage::from_pixel(300, 200, Rgba([220, 0, 0, 255]));
        let renderer = IconRenderer::from_style(&StyleConfig::default())
            .with_source(SourceAsset::from_image(red).unwrap());

        let img = renderer.render(48).unwrap();
        assert!(img.pixels().all(|p| near(p, [220, 0, 0]) && p[3] == 255));

        let standard = renderer
            .render_variant(Density::Mdpi, IconVariant::Standard)
            .unwrap();
        assert_eq!(standard.data.get_pixel(0, 0)[3], 0, "rounded corner");
        assert_eq!(standard.data.get_pixel(24, 0)[3], 255);
    }

    #[test]
    fn foreground_is_unmasked_standard_content() {
        let mut img = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 0]));
        for x in 16..48 {
            for y in 16..48 {
                img.put_pixel(x, y, Rgba([0, 200, 0, 255]));
            }
        }
        let renderer = IconRenderer::new().with_source(SourceAsset::from_image(img).unwrap());

        let fg = renderer
            .render_variant(Density::Xhdpi, IconVariant::Foreground)
            .unwrap();
        assert_eq!(fg.data, renderer.render(96).unwrap());
        assert_eq!(fg.data.get_pixel(2, 2).0, [0, 0, 0, 255], "black backdrop");
        assert!(fg.data.pixels().all(|p| p[3] == 255));
    }
}
