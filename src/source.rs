//! Optional user-supplied source image.
//!
//! When a source asset is present it replaces the procedural artwork: it is
//! center-cropped to a square, resampled to each requested size and, for
//! opaque variants, composited onto a solid backdrop.

use std::io::ErrorKind;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageError, Rgba, Rgba32FImage, RgbaImage};
use log::{debug, warn};

use crate::error::{IconError, Result};
use crate::paint::Rgba8;

/// A decoded source image with its original alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceAsset {
    image: RgbaImage,
}

/// The largest centered square inside a `width × height` image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

/// Centered square crop; odd leftovers go to the right/bottom.
pub fn crop_window(width: u32, height: u32) -> CropWindow {
    let side = width.min(height);
    CropWindow {
        x: (width - side) / 2,
        y: (height - side) / 2,
        side,
    }
}

impl SourceAsset {
    /// Wraps an already decoded image.
    pub fn from_image(image: RgbaImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(IconError::InvalidInput(
                "source image has no pixels".into(),
            ));
        }
        Ok(Self { image })
    }

    /// Loads an asset from disk.
    ///
    /// A missing file is not an error and yields `Ok(None)`. A file that
    /// exists but cannot be read or decoded yields [`IconError::AssetDecode`].
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no source asset at {}", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(IconError::AssetDecode {
                    path: path.to_path_buf(),
                    source: ImageError::IoError(e),
                });
            }
        };
        let decoded = image::load_from_memory(&bytes).map_err(|source| IconError::AssetDecode {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "loaded source asset {} ({}x{})",
            path.display(),
            decoded.width(),
            decoded.height()
        );
        Self::from_image(decoded.into_rgba8()).map(Some)
    }

    /// Like [`load`](Self::load), but treats any failure as "no asset" so the
    /// procedural renderer takes over.
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(asset) => asset,
            Err(e) => {
                warn!("ignoring source asset {}: {e}", path.display());
                None
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// The centered square crop at full resolution.
    pub fn crop_square(&self) -> RgbaImage {
        let w = crop_window(self.width(), self.height());
        imageops::crop_imm(&self.image, w.x, w.y, w.side, w.side).to_image()
    }

    /// The square crop resampled to `side` pixels. Alpha is preserved.
    ///
    /// Resampling runs on premultiplied color so fully transparent pixels
    /// cannot bleed into the color of partially covered edge pixels.
    pub fn derive(&self, side: u32) -> Result<RgbaImage> {
        check_side(side)?;
        let square = self.crop_square();
        if square.width() == side {
            return Ok(square);
        }
        let resized = imageops::resize(&premultiply(&square), side, side, FilterType::Lanczos3);
        Ok(unpremultiply(&resized))
    }

    /// The derived image alpha-composited onto an opaque `backdrop`.
    ///
    /// Every output pixel is opaque; the backdrop's own alpha is ignored.
    pub fn compose_on_backdrop(&self, side: u32, backdrop: Rgba8) -> Result<RgbaImage> {
        let derived = self.derive(side)?;
        let bg = [backdrop.r, backdrop.g, backdrop.b];
        Ok(RgbaImage::from_fn(side, side, |x, y| {
            let p = derived.get_pixel(x, y);
            let a = p[3] as u32;
            let over = |i: usize| ((p[i] as u32 * a + bg[i] as u32 * (255 - a) + 127) / 255) as u8;
            Rgba([over(0), over(1), over(2), 255])
        }))
    }
}

/// Rejects sides that are zero or too large to allocate as RGBA.
fn check_side(side: u32) -> Result<()> {
    if side == 0 {
        return Err(IconError::InvalidInput(
            "side length must be positive".into(),
        ));
    }
    let bytes = side.checked_mul(side).and_then(|n| n.checked_mul(4));
    match bytes {
        Some(n) if n <= i32::MAX as u32 => Ok(()),
        _ => Err(IconError::InvalidInput(format!(
            "cannot allocate a {side}x{side} icon"
        ))),
    }
}

fn premultiply(image: &RgbaImage) -> Rgba32FImage {
    Rgba32FImage::from_fn(image.width(), image.height(), |x, y| {
        let p = image.get_pixel(x, y);
        let a = p[3] as f32 / 255.0;
        let c = |i: usize| p[i] as f32 / 255.0 * a;
        Rgba([c(0), c(1), c(2), a])
    })
}

fn unpremultiply(image: &Rgba32FImage) -> RgbaImage {
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let p = image.get_pixel(x, y);
        let alpha = to_u8(p[3]);
        if alpha == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let a = p[3].clamp(0.0, 1.0);
        let c = |i: usize| to_u8(p[i] / a);
        Rgba([c(0), c(1), c(2), alpha])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Left half red, right half transparent.
    fn half_transparent(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    #[test]
    fn crop_is_centered() {
        assert_eq!(
            crop_window(500, 300),
            CropWindow {
                x: 100,
                y: 0,
                side: 300
            }
        );
        assert_eq!(crop_window(300, 500).y, 100);
        assert_eq!(crop_window(64, 64), CropWindow { x: 0, y: 0, side: 64 });
    }

    #[test]
    fn crop_square_takes_the_middle() {
        let img = RgbaImage::from_fn(500, 300, |x, _| Rgba([(x / 2) as u8, 0, 0, 255]));
        let asset = SourceAsset::from_image(img).unwrap();
        let square = asset.crop_square();
        assert_eq!(square.dimensions(), (300, 300));
        assert_eq!(square.get_pixel(0, 0)[0], 50, "first column is source x=100");
    }

    #[test]
    fn derive_resamples_and_keeps_alpha() {
        let asset = SourceAsset::from_image(half_transparent(200, 200)).unwrap();
        let small = asset.derive(48).unwrap();
        assert_eq!(small.dimensions(), (48, 48));
        assert_eq!(small.get_pixel(5, 24)[3], 255);
        assert_eq!(small.get_pixel(42, 24)[3], 0);
        assert!(matches!(asset.derive(0), Err(IconError::InvalidInput(_))));
    }

    #[test]
    fn derive_keeps_edge_color_under_partial_alpha() {
        let img = RgbaImage::from_fn(200, 200, |x, y| {
            if (50..150).contains(&x) && (50..150).contains(&y) {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let small = SourceAsset::from_image(img).unwrap().derive(48).unwrap();
        let edges: Vec<_> = small
            .pixels()
            .filter(|p| p[3] > 0 && p[3] < 255)
            .collect();
        assert!(!edges.is_empty(), "downscaling should leave soft edges");
        for p in edges {
            assert_eq!([p[0], p[1], p[2]], [255, 0, 0], "{p:?}");
        }
    }

    #[test]
    fn composed_source_is_fully_opaque() {
        let mut img = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 0]));
        for x in 16..48 {
            for y in 16..48 {
                img.put_pixel(x, y, Rgba([0, 200, 0, 255]));
            }
        }
        let asset = SourceAsset::from_image(img).unwrap();
        for side in [48, 72, 96, 144, 192] {
            let composed = asset.compose_on_backdrop(side, Rgba8::BLACK).unwrap();
            assert!(composed.pixels().all(|p| p[3] == 255), "{side}px");
        }
    }

    #[test]
    fn oversized_side_is_invalid() {
        let asset = SourceAsset::from_image(half_transparent(8, 8)).unwrap();
        assert!(matches!(asset.derive(u32::MAX), Err(IconError::InvalidInput(_))));
        assert!(matches!(
            asset.compose_on_backdrop(1 << 16, Rgba8::BLACK),
            Err(IconError::InvalidInput(_))
        ));
    }

    #[test]
    fn backdrop_fills_transparent_pixels() {
        let asset = SourceAsset::from_image(half_transparent(96, 96)).unwrap();
        let composed = asset.compose_on_backdrop(96, Rgba8::hex(0x102030)).unwrap();
        assert_eq!(composed.get_pixel(80, 10).0, [0x10, 0x20, 0x30, 255]);
        assert_eq!(composed.get_pixel(10, 10).0, [255, 0, 0, 255]);
        assert!(composed.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = SourceAsset::load(dir.path().join("icon-source.png")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon-source.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"definitely not a png").unwrap();
        drop(file);

        let err = SourceAsset::load(&path).unwrap_err();
        assert!(err.is_asset_error());
        assert!(SourceAsset::load_or_fallback(&path).is_none());
    }

    #[test]
    fn png_on_disk_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon-source.png");
        half_transparent(40, 20).save(&path).unwrap();

        let asset = SourceAsset::load(&path).unwrap().unwrap();
        assert_eq!((asset.width(), asset.height()), (40, 20));
        assert_eq!(asset.image().get_pixel(39, 0)[3], 0);
    }
}
