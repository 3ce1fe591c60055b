//! Error types for icon rendering and export.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for rendering and export operations.
pub type Result<T> = std::result::Result<T, IconError>;

/// Errors that can occur while rendering or exporting an icon.
///
/// Every failure is terminal for the single render or output it belongs to;
/// other densities and variants are unaffected.
#[derive(Error, Debug)]
pub enum IconError {
    /// The requested side length cannot be rendered (zero, or too large to allocate).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A source asset exists on disk but could not be decoded.
    #[error("failed to decode source asset {path}: {source}")]
    AssetDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Writing or moving an output file failed.
    #[error("failed to write {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PNG encoding of an output failed.
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A JSON style document could not be parsed.
    #[error("invalid style document: {0}")]
    Style(#[from] serde_json::Error),
}

impl IconError {
    /// Returns true if the error only concerns the optional source asset, so
    /// the caller can fall back to procedural rendering.
    pub fn is_asset_error(&self) -> bool {
        matches!(self, Self::AssetDecode { .. })
    }
}
