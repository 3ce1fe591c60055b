//! Writes the rendered icon set into a resource directory.
//!
//! ```text
//! <res_dir>/mipmap-<density>/ic_launcher.png
//!                           /ic_launcher_round.png
//!                           /ic_launcher_foreground.png
//! ```
//!
//! Densities are exported in parallel. A failed output is recorded in the
//! [`ExportReport`] and never stops the others.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{ImageFormat, RgbaImage};
use log::{info, warn};
use rayon::prelude::*;

use crate::compositor::IconRenderer;
use crate::density::{Density, IconSet, IconVariant};
use crate::error::{IconError, Result};
use crate::paint::Rgba8;
use crate::profile::StyleConfig;
use crate::source::SourceAsset;

/// Default resource directory of the mobile app project.
pub const DEFAULT_RES_DIR: &str = "android/app/src/main/res";

/// Default location of the optional source image.
pub const DEFAULT_SOURCE_ASSET: &str = "assets/icon-source.png";

// ============================================================================
// Configuration
// ============================================================================

/// Everything the export driver needs.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Root of the resource tree; density directories are created below it.
    pub res_dir: PathBuf,

    /// Optional source image replacing the procedural artwork. Missing or
    /// undecodable files fall back to procedural rendering.
    pub source_asset: Option<PathBuf>,

    /// Density classes to export.
    pub densities: Vec<Density>,

    pub style: StyleConfig,

    /// Overrides the style's backdrop behind a source asset.
    pub backdrop: Option<Rgba8>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            res_dir: PathBuf::from(DEFAULT_RES_DIR),
            source_asset: Some(PathBuf::from(DEFAULT_SOURCE_ASSET)),
            densities: Density::ALL.to_vec(),
            style: StyleConfig::default(),
            backdrop: None,
        }
    }
}

impl ExportConfig {
    /// Where a density/variant pair is written.
    pub fn output_path(&self, density: Density, variant: IconVariant) -> PathBuf {
        self.res_dir.join(variant.path_in(density))
    }

    /// The renderer this configuration describes, with its source asset loaded.
    pub fn renderer(&self) -> IconRenderer {
        let mut style = self.style.clone();
        if self.backdrop.is_some() {
            style.backdrop = self.backdrop;
        }
        let mut renderer = IconRenderer::from_style(&style);
        let source = self
            .source_asset
            .as_ref()
            .and_then(|path| SourceAsset::load_or_fallback(path))
            .map(Arc::new);
        if source.is_some() {
            info!("using source asset for all densities");
        }
        renderer.set_source(source);
        renderer
    }
}

// ============================================================================
// Report
// ============================================================================

/// One output that could not be produced.
#[derive(Debug)]
pub struct ExportFailure {
    pub density: Density,
    pub variant: IconVariant,
    pub path: PathBuf,
    pub error: IconError,
}

/// Outcome of [`export_all`].
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Files written, grouped by density.
    pub written: Vec<PathBuf>,
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, density: Density, variant: IconVariant, path: PathBuf, result: Result<()>) {
        match result {
            Ok(()) => self.written.push(path),
            Err(error) => self.failures.push(ExportFailure {
                density,
                variant,
                path,
                error,
            }),
        }
    }
}

// ============================================================================
// Writing
// ============================================================================

/// Encodes `image` as PNG at `path`, creating parent directories.
///
/// The file is first written to a sibling `*.png.tmp` and renamed into place,
/// so a failed write never leaves a truncated PNG behind.
pub fn write_png(path: &Path, image: &RgbaImage) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| IconError::Export {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let tmp = path.with_extension("png.tmp");
    if let Err(source) = image.save_with_format(&tmp, ImageFormat::Png) {
        let _ = fs::remove_file(&tmp);
        return Err(IconError::Encode {
            path: path.to_path_buf(),
            source,
        });
    }
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(IconError::Export {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

type Outcome = (IconVariant, PathBuf, Result<()>);

/// Renders the variants of one density into an [`IconSet`], then writes the
/// set. A variant that fails to render is reported and the rest still ship.
fn export_density(renderer: &IconRenderer, config: &ExportConfig, density: Density) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(IconVariant::ALL.len());
    let mut set = IconSet::new();
    for variant in IconVariant::ALL {
        match renderer.render_variant(density, variant) {
            Ok(icon) => set.add_image(icon),
            Err(e) => {
                let path = config.output_path(density, variant);
                warn!("skipped {}: {e}", path.display());
                outcomes.push((variant, path, Err(e)));
            }
        }
    }

    for icon in set {
        let path = config.res_dir.join(icon.relative_path());
        let result = write_png(&path, &icon.data);
        match &result {
            Ok(()) => info!("wrote {} ({}px)", path.display(), icon.side()),
            Err(e) => warn!("skipped {}: {e}", path.display()),
        }
        outcomes.push((icon.variant, path, result));
    }
    outcomes
}

/// Renders and writes every variant of every configured density.
///
/// One rayon task per density; the renderer and source asset are shared
/// read-only across tasks.
pub fn export_all(config: &ExportConfig) -> ExportReport {
    let renderer = config.renderer();

    let per_density: Vec<_> = config
        .densities
        .par_iter()
        .map(|&density| (density, export_density(&renderer, config, density)))
        .collect();

    let mut report = ExportReport::default();
    for (density, outcomes) in per_density {
        for (variant, path, result) in outcomes {
            report.record(density, variant, path, result);
        }
    }

    info!(
        "exported {} icons to {} ({} failed)",
        report.written.len(),
        config.res_dir.display(),
        report.failures.len()
    );
    report
}

// ============================================================================
// Tests
// ============================================================================
