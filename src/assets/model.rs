//! glTF model loading: all triangle primitives flattened into one mesh.
//!
//! Node transforms are baked into the vertices. Materials are reduced to a
//! per-vertex base color (factor times vertex color); textures are ignored.

use std::path::Path;

use anyhow::{bail, Context, Result};
use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};
use gltf::mesh::Mode;

/// Vertex data for the prop mesh
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// CPU-side mesh ready to be uploaded to the GPU
pub struct ModelMesh {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl ModelMesh {
    /// Axis-aligned bounds (min, max); `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(|v| Vec3::from_array(v.position));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

/// Load a `.gltf` / `.glb` file and merge every triangle primitive
pub fn load_model(path: &Path) -> Result<ModelMesh> {
    let (doc, buffers, _images) = gltf::import(path)
        .with_context(|| format!("failed to import glTF: {}", path.display()))?;

    let mut mesh = ModelMesh {
        vertices: Vec::new(),
        indices: Vec::new(),
    };

    let Some(scene) = doc.default_scene().or_else(|| doc.scenes().next()) else {
        bail!("glTF has no scenes: {}", path.display());
    };

    for node in scene.nodes() {
        append_node(&node, Mat4::IDENTITY, &buffers, &mut mesh)?;
    }

    if mesh.indices.is_empty() {
        bail!("glTF contains no triangle geometry: {}", path.display());
    }

    Ok(mesh)
}

fn append_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut ModelMesh,
) -> Result<()> {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();

        for prim in mesh.primitives() {
            if prim.mode() != Mode::Triangles {
                continue;
            }

            let reader = prim.reader(|b| buffers.get(b.index()).map(|data| data.0.as_slice()));
            let positions: Vec<[f32; 3]> = match reader.read_positions() {
                Some(it) => it.collect(),
                None => continue,
            };
            let normals: Vec<[f32; 3]> = match reader.read_normals() {
                Some(it) => it.collect(),
                None => vec![[0.0, 1.0, 0.0]; positions.len()],
            };
            let colors: Vec<[f32; 3]> = match reader.read_colors(0) {
                Some(it) => it.into_rgb_f32().collect(),
                None => vec![[1.0; 3]; positions.len()],
            };
            if normals.len() != positions.len() || colors.len() != positions.len() {
                bail!(
                    "primitive {} of mesh {} has {} positions but {} normals and {} colors",
                    prim.index(),
                    mesh.index(),
                    positions.len(),
                    normals.len(),
                    colors.len()
                );
            }
            let [br, bg, bb, _] = prim.material().pbr_metallic_roughness().base_color_factor();

            let start = out.vertices.len() as u32;
            for ((pos, normal), c) in positions.iter().zip(&normals).zip(&colors) {
                let p = transform.transform_point3(Vec3::from_array(*pos));
                let n = (normal_matrix * Vec3::from_array(*normal)).normalize_or(Vec3::Y);
                out.vertices.push(ModelVertex {
                    position: p.to_array(),
                    normal: n.to_array(),
                    color: [c[0] * br, c[1] * bg, c[2] * bb],
                });
            }

            let count = positions.len() as u32;
            match reader.read_indices() {
                Some(indices) => {
                    for i in indices.into_u32() {
                        if i >= count {
                            bail!("index {} out of range for {} vertices", i, count);
                        }
                        out.indices.push(start + i);
                    }
                }
                None => out.indices.extend((0..count).map(|i| start + i)),
            }
        }
    }

    for child in node.children() {
        append_node(&child, transform, buffers, out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal embedded glTF: one triangle, translated by a node
    const TRIANGLE_GLTF: &str = r#"{
        "asset": {"version": "2.0"},
        "scene": 0,
        "scenes": [{"nodes": [0]}],
        "nodes": [{"mesh": 0, "translation": [0.0, 2.0, 0.0]}],
        "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
        "buffers": [{
            "byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAAAAAAIA/"
        }],
        "bufferViews": [{"buffer": 0, "byteLength": 36}],
        "accessors": [{
            "bufferView": 0,
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [0.0, 0.0, 0.0],
            "max": [1.0, 0.0, 1.0]
        }]
    }"#;

    #[test]
    fn test_loads_embedded_triangle() {
        let dir = std::env::temp_dir().join("ragingsea_model_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("triangle.gltf");
        std::fs::write(&path, TRIANGLE_GLTF).unwrap();

        let mesh = load_model(&path).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);

        // Node translation baked in, default normal and white color
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(hi, Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(mesh.vertices[0].normal, [0.0, 1.0, 0.0]);
        assert_eq!(mesh.vertices[0].color, [1.0, 1.0, 1.0]);
    }

    /// Three positions but only two normals
    const SHORT_NORMALS_GLTF: &str = r#"{
        "asset": {"version": "2.0"},
        "scenes": [{"nodes": [0]}],
        "nodes": [{"mesh": 0}],
        "meshes": [{"primitives": [{"attributes": {"POSITION": 0, "NORMAL": 1}}]}],
        "buffers": [{
            "byteLength": 60,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAAAAAAIA/AAAAAAAAgD8AAAAAAAAAAAAAgD8AAAAA"
        }],
        "bufferViews": [
            {"buffer": 0, "byteLength": 36},
            {"buffer": 0, "byteOffset": 36, "byteLength": 24}
        ],
        "accessors": [
            {
                "bufferView": 0,
                "componentType": 5126,
                "count": 3,
                "type": "VEC3",
                "min": [0.0, 0.0, 0.0],
                "max": [1.0, 0.0, 1.0]
            },
            {"bufferView": 1, "componentType": 5126, "count": 2, "type": "VEC3"}
        ]
    }"#;

    #[test]
    fn test_attribute_count_mismatch_is_an_error() {
        let dir = std::env::temp_dir().join("ragingsea_model_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("short_normals.gltf");
        std::fs::write(&path, SHORT_NORMALS_GLTF).unwrap();

        assert!(load_model(&path).is_err());
    }

    #[test]
    fn test_missing_model_is_an_error() {
        assert!(load_model(Path::new("missing/ship.glb")).is_err());
    }

    #[test]
    fn test_empty_bounds() {
        let mesh = ModelMesh {
            vertices: Vec::new(),
            indices: Vec::new(),
        };
        assert!(mesh.bounds().is_none());
    }
}
