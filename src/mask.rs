//! Alpha masks applied to finished icons.

use image::{GrayImage, Luma, RgbaImage};
use serde::{Deserialize, Serialize};

/// Corner radius of [`MaskSpec::rounded_rect`] as a fraction of the side.
pub const DEFAULT_CORNER_FRACTION: f32 = 0.1;

/// Shape that decides which pixels of an icon stay visible.
///
/// Masks have hard edges: a pixel keeps its alpha when its center lies
/// inside the shape and becomes fully transparent otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MaskSpec {
    /// Leave the image untouched.
    #[default]
    None,
    /// Inscribed circle, for round launcher icons.
    Circle,
    /// Square with rounded corners; the radius is `corner_fraction` of the
    /// shorter side, at least one pixel.
    #[serde(rename_all = "camelCase")]
    RoundedRect { corner_fraction: f32 },
}

impl MaskSpec {
    pub fn rounded_rect() -> Self {
        Self::RoundedRect {
            corner_fraction: DEFAULT_CORNER_FRACTION,
        }
    }

    /// True if the center of pixel `(x, y)` lies inside the mask.
    pub fn contains(&self, x: u32, y: u32, width: u32, height: u32) -> bool {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        let (w, h) = (width as f32, height as f32);
        match *self {
            Self::None => true,
            Self::Circle => {
                let r = w.min(h) / 2.0;
                let dx = px - w / 2.0;
                let dy = py - h / 2.0;
                dx * dx + dy * dy <= r * r
            }
            Self::RoundedRect { corner_fraction } => {
                let r = (w.min(h) * corner_fraction).max(1.0).min(w.min(h) / 2.0);
                // distance into the corner box, zero along the straight edges
                let dx = (r - px).max(px - (w - r)).max(0.0);
                let dy = (r - py).max(py - (h - r)).max(0.0);
                dx * dx + dy * dy <= r * r
            }
        }
    }

    /// The mask as a grayscale image: 255 inside, 0 outside.
    pub fn alpha_mask(&self, width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            Luma([if self.contains(x, y, width, height) {
                255
            } else {
                0
            }])
        })
    }

    /// Replaces the image's alpha channel with [`alpha_mask`](Self::alpha_mask).
    ///
    /// Icons are opaque before masking, so this keeps pixels inside the shape
    /// and clears the rest. Applying the same mask twice gives the same result
    /// as applying it once.
    pub fn apply(&self, mut image: RgbaImage) -> RgbaImage {
        if *self == Self::None {
            return image;
        }
        let mask = self.alpha_mask(image.width(), image.height());
        for (pixel, coverage) in image.pixels_mut().zip(mask.pixels()) {
            pixel[3] = coverage[0];
        }
        image
    }
}
