//! Serializable style description for the whole icon.
//!
//! A [`StyleConfig`] captures every layer's settings in a format that can be
//! stored as JSON and fed back into an [`IconRenderer`](crate::IconRenderer).
//!
//! # Example
//!
//! ```
//! use bugball_icon::{Preset, StyleConfig};
//!
//! let style = Preset::Neon.style();
//! let json = style.to_json().unwrap();
//! let restored = StyleConfig::from_json(&json).unwrap();
//! assert_eq!(restored, style);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{Length, Point};
use crate::layer::{
    Antennae, BackgroundConfig, BallConfig, BallFill, BodyFill, BorderConfig, DecorConfig,
    DropShadow, Eyes, HeadConfig, Highlight, MascotConfig, MascotShadow, Outline, PatternConfig,
    PatternRing, Shine,
};
use crate::paint::Rgba8;

// ============================================================================
// Toggle
// ============================================================================

/// Layer settings plus an enabled flag.
///
/// The settings are flattened into the same JSON object:
///
/// ```json
/// { "kind": "single", "color": "#ffffff", "width": { "fraction": 0.02 }, "enabled": false }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toggle<C> {
    #[serde(flatten)]
    pub settings: C,

    /// Whether this layer is painted.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl<C> Toggle<C> {
    /// Enabled settings.
    pub fn on(settings: C) -> Self {
        Self {
            settings,
            enabled: true,
        }
    }

    /// Settings kept but not painted.
    pub fn off(settings: C) -> Self {
        Self {
            settings,
            enabled: false,
        }
    }
}

fn default_true() -> bool {
    true
}

// ============================================================================
// StyleConfig
// ============================================================================

/// A serializable description of every layer of the icon.
///
/// `None` means the layer has no configuration and is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Toggle<BackgroundConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decor: Option<Toggle<DecorConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ball: Option<Toggle<BallConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mascot: Option<Toggle<MascotConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Toggle<BorderConfig>>,

    /// Opaque color behind a source asset. Falls back to the background's
    /// primary color, then black.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<Rgba8>,
}

impl StyleConfig {
    /// Creates an empty style with no layers configured.
    pub fn new() -> Self {
        Self {
            background: None,
            decor: None,
            ball: None,
            mascot: None,
            border: None,
            backdrop: None,
        }
    }

    pub fn with_background(mut self, settings: BackgroundConfig) -> Self {
        self.background = Some(Toggle::on(settings));
        self
    }

    pub fn with_decor(mut self, settings: DecorConfig) -> Self {
        self.decor = Some(Toggle::on(settings));
        self
    }

    pub fn with_ball(mut self, settings: BallConfig) -> Self {
        self.ball = Some(Toggle::on(settings));
        self
    }

    pub fn with_mascot(mut self, settings: MascotConfig) -> Self {
        self.mascot = Some(Toggle::on(settings));
        self
    }

    pub fn with_border(mut self, settings: BorderConfig) -> Self {
        self.border = Some(Toggle::on(settings));
        self
    }

    pub fn with_backdrop(mut self, color: Rgba8) -> Self {
        self.backdrop = Some(color);
        self
    }

    /// The color a source asset is composited onto.
    pub fn backdrop_color(&self) -> Rgba8 {
        self.backdrop
            .or_else(|| self.background.as_ref().map(|bg| bg.settings.primary_color()))
            .unwrap_or(Rgba8::BLACK)
    }

    /// Serializes the style to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the style to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a style from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Presets
// ============================================================================

/// Named styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    /// Purple glow, white pentagon ball, ladybug with eyes.
    Neon,
    /// Sky and grass, pitch markings, flat ball, bug with antennae.
    Stadium,
    /// Radial backdrop, shaded hexagon ball, gradient bug, glowing frame.
    #[default]
    Glossy,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Neon, Preset::Stadium, Preset::Glossy];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Neon => "neon",
            Self::Stadium => "stadium",
            Self::Glossy => "glossy",
        }
    }

    /// The full style of this preset.
    pub fn style(&self) -> StyleConfig {
        match self {
            Self::Neon => neon(),
            Self::Stadium => stadium(),
            Self::Glossy => glossy(),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Preset::default().style()
    }
}

fn neon() -> StyleConfig {
    let purple = Rgba8::hex(0x8a2be2);
    StyleConfig::new()
        .with_background(BackgroundConfig::Vertical {
            top: Rgba8::hex(0x1a0033),
            bottom: Rgba8::hex(0x0d001a),
        })
        .with_decor(DecorConfig::GlowRings {
            center: Point::new(0.5, 0.5),
            radius: Length::frac(0.4),
            color: purple,
            boost: 60,
            width: Length::px(2.0),
        })
        .with_ball(BallConfig {
            center: Point::new(0.5, 0.55),
            radius: Length::frac(0.35),
            fill: BallFill::Flat {
                color: Rgba8::WHITE,
            },
            outline: Some(Outline::new(Rgba8::hex(0xcccccc), Length::new(0.01, 2.0))),
            shadow: None,
            highlight: None,
            pattern: Some(PatternConfig {
                sides: 5,
                size: 0.3,
                rotation: 0.0,
                color: Rgba8::BLACK,
                ring: Some(PatternRing {
                    count: 5,
                    orbit: 0.6,
                    size: 0.4,
                    phase: 0.0,
                }),
            }),
        })
        .with_mascot(MascotConfig {
            center: Point::new(0.5, 0.25),
            radius: Length::frac(0.25),
            aspect: 0.5,
            body: BodyFill::Flat {
                color: Rgba8::hex(0xff4444),
            },
            outline: Some(Outline::new(Rgba8::hex(0xcc0000), Length::new(1.0 / 80.0, 2.0))),
            shadow: Some(MascotShadow {
                offset: Length::new(1.0 / 60.0, 2.0),
                direction: Point::new(-1.0, -1.0),
                drop: 0.5,
                color: Rgba8::rgba(0, 0, 0, 100),
            }),
            head: HeadConfig {
                offset: Point::new(0.0, -1.0),
                radius: 0.3,
                color: Rgba8::hex(0x2d2d2d),
                outline: Some(Outline::new(Rgba8::BLACK, Length::new(0.01, 1.0))),
                shine: None,
            },
            spots: vec![
                Point::new(-0.5, -0.5),
                Point::new(0.5, -0.5),
                Point::new(-1.0 / 3.0, 1.0 / 3.0),
                Point::new(1.0 / 3.0, 1.0 / 3.0),
            ],
            spot_size: 0.15,
            spot_color: Rgba8::BLACK,
            eyes: Some(Eyes {
                spacing: 0.4,
                size: 0.4,
                color: Rgba8::WHITE,
                pupil: 0.5,
                pupil_color: Rgba8::BLACK,
            }),
            antennae: None,
        })
        .with_border(BorderConfig::Single {
            color: purple,
            width: Length::new(1.0 / 40.0, 3.0),
        })
}

fn stadium() -> StyleConfig {
    let ink = Rgba8::hex(0x212121);
    StyleConfig::new()
        .with_background(BackgroundConfig::Vertical {
            top: Rgba8::hex(0x4fa3e0),
            bottom: Rgba8::hex(0x2e8b3d),
        })
        .with_decor(DecorConfig::FieldLines {
            center: Point::new(0.5, 0.55),
            radius: Length::frac(0.3),
            color: Rgba8::rgba(255, 255, 255, 176),
            width: Length::new(0.012, 1.0),
            halfway_line: true,
            center_spot: Some(Length::frac(0.02)),
        })
        .with_ball(BallConfig {
            center: Point::new(0.5, 0.55),
            radius: Length::frac(0.3),
            fill: BallFill::Flat {
                color: Rgba8::WHITE,
            },
            outline: Some(Outline::new(Rgba8::hex(0x333333), Length::new(0.012, 1.0))),
            shadow: Some(DropShadow {
                offset: Point::new(0.02, 0.03),
                spread: Length::frac(0.03),
                passes: 4,
                color: Rgba8::rgba(0, 0, 0, 80),
                squash: 0.9,
            }),
            highlight: None,
            pattern: Some(PatternConfig {
                sides: 5,
                size: 0.32,
                rotation: 0.0,
                color: ink,
                ring: Some(PatternRing {
                    count: 5,
                    orbit: 0.65,
                    size: 0.45,
                    phase: 36.0,
                }),
            }),
        })
        .with_mascot(MascotConfig {
            center: Point::new(0.5, 0.22),
            radius: Length::frac(0.2),
            aspect: 0.5,
            body: BodyFill::Flat {
                color: Rgba8::hex(0xe53935),
            },
            outline: None,
            shadow: Some(MascotShadow {
                offset: Length::new(0.012, 1.0),
                direction: Point::new(1.0, 1.0),
                drop: 0.0,
                color: Rgba8::rgba(0, 0, 0, 80),
            }),
            head: HeadConfig {
                offset: Point::new(0.0, -1.0),
                radius: 0.35,
                color: ink,
                outline: None,
                shine: Some(Shine {
                    offset: Point::new(-0.35, -0.35),
                    radius: 0.3,
                    color: Rgba8::rgba(255, 255, 255, 180),
                }),
            },
            spots: vec![Point::new(-0.45, 0.1), Point::new(0.45, 0.1)],
            spot_size: 0.14,
            spot_color: ink,
            eyes: None,
            antennae: Some(Antennae {
                length: 0.45,
                spread: 30.0,
                width: Length::new(0.01, 1.0),
                tip: Length::new(0.015, 1.0),
                color: ink,
            }),
        })
        .with_border(BorderConfig::Single {
            color: Rgba8::WHITE,
            width: Length::new(0.02, 2.0),
        })
}

fn glossy() -> StyleConfig {
    let ink = Rgba8::hex(0x1b1b1b);
    StyleConfig::new()
        .with_background(BackgroundConfig::Radial {
            center: Rgba8::hex(0x23395d),
            edge: Rgba8::hex(0x0b1220),
        })
        .with_ball(BallConfig {
            center: Point::new(0.5, 0.5),
            radius: Length::frac(0.4),
            fill: BallFill::Shaded {
                edge: Rgba8::hex(0xc8c8c8),
                center: Rgba8::WHITE,
            },
            outline: None,
            shadow: Some(DropShadow {
                offset: Point::new(0.015, 0.025),
                spread: Length::frac(0.03),
                passes: 5,
                color: Rgba8::rgba(0, 0, 0, 120),
                squash: 1.0,
            }),
            highlight: Some(Highlight {
                offset: Point::new(-0.35, -0.4),
                radius: 0.35,
                color: Rgba8::rgba(255, 255, 255, 80),
            }),
            pattern: Some(PatternConfig {
                sides: 6,
                size: 0.28,
                rotation: 30.0,
                color: Rgba8::hex(0x1e1e1e),
                ring: Some(PatternRing {
                    count: 6,
                    orbit: 0.68,
                    size: 0.57,
                    phase: 30.0,
                }),
            }),
        })
        .with_mascot(MascotConfig {
            center: Point::new(0.64, 0.7),
            radius: Length::frac(0.2),
            aspect: 0.55,
            body: BodyFill::Gradient {
                edge: Rgba8::hex(0xb71c1c),
                center: Rgba8::hex(0xff5252),
            },
            outline: Some(Outline::new(Rgba8::hex(0x4a0000), Length::new(0.008, 1.0))),
            shadow: Some(MascotShadow {
                offset: Length::new(0.015, 1.0),
                direction: Point::new(1.0, 1.0),
                drop: 0.0,
                color: Rgba8::rgba(0, 0, 0, 96),
            }),
            head: HeadConfig {
                offset: Point::new(0.0, -1.0),
                radius: 0.35,
                color: ink,
                outline: None,
                shine: Some(Shine {
                    offset: Point::new(-0.3, -0.3),
                    radius: 0.3,
                    color: Rgba8::rgba(255, 255, 255, 192),
                }),
            },
            spots: vec![
                Point::new(-0.45, -0.2),
                Point::new(0.45, -0.2),
                Point::new(-0.3, 0.45),
                Point::new(0.3, 0.45),
            ],
            spot_size: 0.12,
            spot_color: ink,
            eyes: Some(Eyes {
                spacing: 0.4,
                size: 0.35,
                color: Rgba8::WHITE,
                pupil: 0.5,
                pupil_color: Rgba8::BLACK,
            }),
            antennae: Some(Antennae {
                length: 0.5,
                spread: 28.0,
                width: Length::new(0.008, 1.0),
                tip: Length::new(0.014, 1.0),
                color: ink,
            }),
        })
        .with_border(BorderConfig::Glow {
            color: Rgba8::rgba(255, 213, 79, 200),
            strokes: 4,
            width: Length::new(0.04, 2.0),
        })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IconError;

    #[test]
    fn style_serialization_roundtrip() {
        for preset in Preset::ALL {
            let style = preset.style();
            let json = style.to_json().unwrap();
            let restored = StyleConfig::from_json(&json).unwrap();
            assert_eq!(restored, style, "{} must survive a round trip", preset.name());
        }
    }

    #[test]
    fn style_json_format() {
        let json = Preset::Neon.style().to_json_pretty().unwrap();

        // camelCase keys, tagged layer kinds, hex colors
        assert!(json.contains("\"background\""));
        assert!(json.contains("\"kind\": \"vertical\""));
        assert!(json.contains("\"glowRings\""));
        assert!(json.contains("\"spotSize\""));
        assert!(json.contains("\"#8a2be2\""));
        assert!(json.contains("\"enabled\": true"));
    }

    #[test]
    fn disabled_layer_keeps_settings() {
        let mut style = Preset::Stadium.style();
        style.border = style.border.map(|border| Toggle::off(border.settings));
        let restored = StyleConfig::from_json(&style.to_json().unwrap()).unwrap();
        let border = restored.border.unwrap();
        assert!(!border.enabled);
        assert!(matches!(border.settings, BorderConfig::Single { .. }));
    }

    #[test]
    fn enabled_defaults_to_true() {
        let json = r##"{ "border": { "kind": "single", "color": "#ffffff", "width": { "fraction": 0.02 } } }"##;
        let style = StyleConfig::from_json(json).unwrap();
        let border = style.border.unwrap();
        assert!(border.enabled);
        assert_eq!(
            border.settings,
            BorderConfig::Single {
                color: Rgba8::WHITE,
                width: Length::frac(0.02),
            }
        );
        assert!(style.ball.is_none());
    }

    #[test]
    fn empty_style_deserializes() {
        let style = StyleConfig::from_json("{}").unwrap();
        assert_eq!(style, StyleConfig::new());
        assert_eq!(style.backdrop_color(), Rgba8::BLACK);
    }

    #[test]
    fn malformed_json_is_a_style_error() {
        let err = StyleConfig::from_json("{ \"ball\": 3 }").unwrap_err();
        assert!(matches!(err, IconError::Style(_)));
    }

    #[test]
    fn backdrop_falls_back_to_background() {
        let style = Preset::Neon.style();
        assert_eq!(style.backdrop_color(), Rgba8::hex(0x1a0033));
        let style = style.with_backdrop(Rgba8::WHITE);
        assert_eq!(style.backdrop_color(), Rgba8::WHITE);
    }

    #[test]
    fn default_style_is_glossy() {
        assert_eq!(StyleConfig::default(), Preset::Glossy.style());
    }
}
