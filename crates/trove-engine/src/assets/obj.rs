use crate::coords::Vec3;

use super::{AssetError, ModelAsset};

/// Parses the vertex records of a Wavefront OBJ document.
///
/// Only `v x y z [w]` lines are interpreted; faces, normals, materials and
/// comments are skipped. The bounding sphere is centered on the AABB center.
pub fn parse_obj(name: &str, src: &str) -> Result<ModelAsset, AssetError> {
    let mut min = Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
    let mut max = Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);
    let mut vertices = Vec::new();

    for (i, raw) in src.lines().enumerate() {
        let line = raw.trim();
        let mut parts = line.split_whitespace();
        if parts.next() != Some("v") {
            continue;
        }

        let mut coord = |axis: &str| -> Result<f32, AssetError> {
            let tok = parts.next().ok_or_else(|| AssetError::Parse {
                line: i + 1,
                message: format!("vertex is missing its {axis} coordinate"),
            })?;
            let v: f32 = tok.parse().map_err(|_| AssetError::Parse {
                line: i + 1,
                message: format!("invalid {axis} coordinate `{tok}`"),
            })?;
            if !v.is_finite() {
                return Err(AssetError::Parse {
                    line: i + 1,
                    message: format!("non-finite {axis} coordinate"),
                });
            }
            Ok(v)
        };

        let p = Vec3::new(coord("x")?, coord("y")?, coord("z")?);
        min = Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
        max = Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        vertices.push(p);
    }

    if vertices.is_empty() {
        return Err(AssetError::Empty);
    }

    let center = (min + max) * 0.5;
    let radius = vertices
        .iter()
        .map(|v| (*v - center).length())
        .fold(0.0f32, f32::max);

    Ok(ModelAsset {
        name: name.to_string(),
        center,
        radius,
        vertex_count: vertices.len(),
        placeholder: false,
    })
}
