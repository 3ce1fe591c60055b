//! Launcher icon size classes, variants and the rendered image set.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::IconError;
use crate::mask::MaskSpec;

// ============================================================================
// Density
// ============================================================================

/// A screen density bucket of the target platform.
///
/// Each bucket maps to one launcher icon side length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Mdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
}

impl Density {
    /// Every bucket, smallest first.
    pub const ALL: [Density; 5] = [
        Density::Mdpi,
        Density::Hdpi,
        Density::Xhdpi,
        Density::Xxhdpi,
        Density::Xxxhdpi,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mdpi => "mdpi",
            Self::Hdpi => "hdpi",
            Self::Xhdpi => "xhdpi",
            Self::Xxhdpi => "xxhdpi",
            Self::Xxxhdpi => "xxxhdpi",
        }
    }

    /// Icon side length in pixels.
    pub fn side(&self) -> u32 {
        match self {
            Self::Mdpi => 48,
            Self::Hdpi => 72,
            Self::Xhdpi => 96,
            Self::Xxhdpi => 144,
            Self::Xxxhdpi => 192,
        }
    }

    /// Resource directory name, e.g. `mipmap-xhdpi`.
    pub fn dir_name(&self) -> String {
        format!("mipmap-{}", self.label())
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Density {
    type Err = IconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| IconError::InvalidInput(format!("unknown density {s:?}")))
    }
}

// ============================================================================
// IconVariant
// ============================================================================

/// The files written per density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IconVariant {
    /// `ic_launcher.png`
    Standard,
    /// `ic_launcher_round.png`, circle-masked.
    Round,
    /// `ic_launcher_foreground.png`, the adaptive-icon foreground.
    Foreground,
}

impl IconVariant {
    pub const ALL: [IconVariant; 3] = [
        IconVariant::Standard,
        IconVariant::Round,
        IconVariant::Foreground,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Standard => "ic_launcher.png",
            Self::Round => "ic_launcher_round.png",
            Self::Foreground => "ic_launcher_foreground.png",
        }
    }

    /// `mipmap-<density>/<file name>`, relative to the resource directory.
    pub fn path_in(&self, density: Density) -> PathBuf {
        Path::new(&density.dir_name()).join(self.file_name())
    }

    /// Mask applied to this variant. A source-derived standard icon gets
    /// rounded corners; procedural artwork already frames itself.
    pub fn mask(&self, from_source: bool) -> MaskSpec {
        match self {
            Self::Standard if from_source => MaskSpec::rounded_rect(),
            Self::Standard | Self::Foreground => MaskSpec::None,
            Self::Round => MaskSpec::Circle,
        }
    }
}

// ============================================================================
// IconImage / IconSet
// ============================================================================

/// One rendered output image.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    /// The image data in RGBA format.
    pub data: RgbaImage,
    pub density: Density,
    pub variant: IconVariant,
}

impl IconImage {
    pub fn new(data: RgbaImage, density: Density, variant: IconVariant) -> Self {
        Self {
            data,
            density,
            variant,
        }
    }

    /// Returns the side length in pixels.
    pub fn side(&self) -> u32 {
        self.data.width()
    }

    /// Path of this image relative to the resource directory.
    pub fn relative_path(&self) -> PathBuf {
        self.variant.path_in(self.density)
    }
}

/// A batch of rendered images, consumed by the exporter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IconSet {
    pub images: Vec<IconImage>,
}

impl IconSet {
    pub fn new() -> Self {
        Self { images: Vec::new() }
    }

    pub fn add_image(&mut self, image: IconImage) {
        self.images.push(image);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl IntoIterator for IconSet {
    type Item = IconImage;
    type IntoIter = std::vec::IntoIter<IconImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_table() {
        let sides: Vec<u32> = Density::ALL.iter().map(Density::side).collect();
        assert_eq!(sides, vec![48, 72, 96, 144, 192]);
        assert_eq!(Density::Hdpi.dir_name(), "mipmap-hdpi");
    }

    #[test]
    fn density_parses_labels() {
        assert_eq!("xhdpi".parse::<Density>().unwrap(), Density::Xhdpi);
        assert_eq!("XXXHDPI".parse::<Density>().unwrap(), Density::Xxxhdpi);
        assert!("ldpi".parse::<Density>().is_err());
    }

    #[test]
    fn variant_masks() {
        assert_eq!(IconVariant::Round.mask(false), MaskSpec::Circle);
        assert_eq!(IconVariant::Standard.mask(false), MaskSpec::None);
        assert_eq!(IconVariant::Standard.mask(true), MaskSpec::rounded_rect());
        assert_eq!(IconVariant::Foreground.mask(true), MaskSpec::None);
    }

    #[test]
    fn icon_image_paths() {
        let img = IconImage::new(RgbaImage::new(144, 144), Density::Xxhdpi, IconVariant::Round);
        assert_eq!(img.side(), 144);
        assert_eq!(
            img.relative_path(),
            Path::new("mipmap-xxhdpi").join("ic_launcher_round.png")
        );
    }

    #[test]
    fn icon_set_operations() {
        let mut set = IconSet::new();
        assert!(set.is_empty());
        set.add_image(IconImage::new(RgbaImage::new(48, 48), Density::Mdpi, IconVariant::Standard));
        set.add_image(IconImage::new(RgbaImage::new(48, 48), Density::Mdpi, IconVariant::Round));
        assert_eq!(set.len(), 2);
        let variants: Vec<IconVariant> = set.into_iter().map(|img| img.variant).collect();
        assert_eq!(variants, vec![IconVariant::Standard, IconVariant::Round]);
    }
}
