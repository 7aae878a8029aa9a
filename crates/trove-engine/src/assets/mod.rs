//! Model assets.
//!
//! The game only needs a model's bounding sphere (tap target size and
//! layout). Geometry is read from Wavefront OBJ vertex records. Any load
//! failure can be absorbed with [`load_or_placeholder`], which substitutes a
//! unit sphere so the game still runs.

mod error;
mod obj;

use std::path::Path;

pub use error::AssetError;
pub use obj::parse_obj;

use crate::coords::Vec3;

/// Bounding information of a loaded model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAsset {
    pub name: String,
    /// Bounding-sphere center in model space.
    pub center: Vec3,
    pub radius: f32,
    pub vertex_count: usize,
    /// True when this asset stands in for one that failed to load.
    pub placeholder: bool,
}

impl ModelAsset {
    /// Unit sphere used when the real model is unavailable.
    pub fn placeholder() -> Self {
        Self {
            name: "placeholder".to_string(),
            center: Vec3::ZERO,
            radius: 1.0,
            vertex_count: 0,
            placeholder: true,
        }
    }
}

/// Reads and parses an OBJ file. The file stem becomes the asset name.
pub fn load_model(path: &Path) -> Result<ModelAsset, AssetError> {
    let src = std::fs::read_to_string(path).map_err(|e| AssetError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());

    let asset = parse_obj(&name, &src)?;
    log::info!(
        "loaded model '{}' ({} vertices, r={:.3})",
        asset.name,
        asset.vertex_count,
        asset.radius
    );
    Ok(asset)
}

/// Loads `path`, falling back to [`ModelAsset::placeholder`] on any error.
///
/// `None` means "no model configured" and yields the placeholder silently.
pub fn load_or_placeholder(path: Option<&Path>) -> ModelAsset {
    let Some(path) = path else {
        return ModelAsset::placeholder();
    };

    match load_model(path) {
        Ok(asset) => asset,
        Err(e) => {
            log::warn!("{e}; using placeholder model");
            ModelAsset::placeholder()
        }
    }
}
