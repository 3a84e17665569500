//! Headless still export: draws the scene on the CPU and writes it as PNG.
//!
//! The file holds the exact bytes the preview would upload, so it doubles as
//! a reference for what the image panel shows.

use std::path::{Path, PathBuf};

use raster::{to_display_order, RasterError, RasterImage};
use thiserror::Error;

use crate::sync::render_scene;
use crate::types::{CircleParameter, Scene};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export path {0} has no file extension; expected .png")]
    MissingExtension(PathBuf),
    #[error("unsupported export format '{extension}' for {path}; expected .png")]
    UnsupportedFormat { path: PathBuf, extension: String },
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("converted buffer does not cover {width}x{height}")]
    Buffer { width: u32, height: u32 },
    #[error("failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Accepts paths ending in `.png`, case-insensitively.
pub fn check_export_path(path: &Path) -> Result<(), ExportError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| ExportError::MissingExtension(path.to_path_buf()))?;
    if extension.eq_ignore_ascii_case("png") {
        Ok(())
    } else {
        Err(ExportError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: extension.to_string(),
        })
    }
}

/// Draws `scene` at `radius` into a fresh raster.
pub fn render_still(scene: &Scene, radius: CircleParameter) -> Result<RasterImage, RasterError> {
    let mut raster = RasterImage::new(scene.width, scene.height, scene.background)?;
    render_scene(&mut raster, scene, radius);
    Ok(raster)
}

/// Renders and writes one still to `path`, returning the path written.
pub fn export_still(
    path: &Path,
    scene: &Scene,
    radius: CircleParameter,
) -> Result<PathBuf, ExportError> {
    check_export_path(path)?;
    let raster = render_still(scene, radius)?;
    let (width, height) = (raster.width(), raster.height());
    let buffer = image::RgbaImage::from_raw(width, height, to_display_order(&raster))
        .ok_or(ExportError::Buffer { width, height })?;
    buffer
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| ExportError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(
        path = %path.display(),
        radius = radius.get(),
        "exported still frame"
    );
    Ok(path.to_path_buf())
}
