//! Water plane mesh: a flat, subdivided square in the XZ plane.
//!
//! The mesh is static; all displacement happens in the vertex shader.

use bytemuck::{Pod, Zeroable};

use crate::params::WaterMesh;

/// Vertex data for water mesh (position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Water plane grid centred on the origin
pub struct WaterGrid {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    size: f32,
    segments: usize,
}

impl WaterGrid {
    /// Create a new grid with the given plane size and subdivision
    pub fn new(mesh: &WaterMesh) -> Self {
        let segments = mesh.segments.max(1);
        let spacing = mesh.size / segments as f32;
        let half_size = mesh.size / 2.0;

        let mut vertices = Vec::with_capacity((segments + 1) * (segments + 1));
        let mut indices = Vec::with_capacity(segments * segments * 6);

        // Row 0 is the far (-Z) edge, matching a plane rotated flat from XY
        for row in 0..=segments {
            for col in 0..=segments {
                let x_pos = col as f32 * spacing - half_size;
                let z_pos = row as f32 * spacing - half_size;

                vertices.push(Vertex {
                    position: [x_pos, 0.0, z_pos],
                    uv: [
                        col as f32 / segments as f32,
                        1.0 - row as f32 / segments as f32,
                    ],
                });
            }
        }

        // Two triangles per cell (counter-clockwise seen from +Y)
        for row in 0..segments {
            for col in 0..segments {
                let top_left = (row * (segments + 1) + col) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((row + 1) * (segments + 1) + col) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self {
            vertices,
            indices,
            size: mesh.size,
            segments,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Whether a world-space XZ point lies over the plane
    pub fn covers(&self, x: f32, z: f32) -> bool {
        let half = self.size / 2.0;
        x.abs() <= half && z.abs() <= half
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_mesh() -> WaterMesh {
        WaterMesh {
            size: 8.0,
            segments: 16,
        }
    }

    #[test]
    fn test_grid_counts() {
        let mesh = small_mesh();
        let grid = WaterGrid::new(&mesh);

        // (segments + 1)^2 vertices
        assert_eq!(grid.vertices.len(), (mesh.segments + 1).pow(2));

        // segments^2 * 2 triangles * 3 indices
        assert_eq!(grid.indices.len(), mesh.segments.pow(2) * 6);
    }

    #[test]
    fn test_grid_is_flat_and_centred() {
        let grid = WaterGrid::new(&small_mesh());
        let first = grid.vertices.first().unwrap().position;
        let last = grid.vertices.last().unwrap().position;
        assert_eq!(first, [-4.0, 0.0, -4.0]);
        assert_eq!(last, [4.0, 0.0, 4.0]);
        assert!(grid.vertices.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn test_indices_in_bounds() {
        let grid = WaterGrid::new(&small_mesh());
        let count = grid.vertices.len() as u32;
        assert!(grid.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_zero_segments_is_promoted_to_one() {
        let grid = WaterGrid::new(&WaterMesh {
            size: 2.0,
            segments: 0,
        });
        assert_eq!(grid.segments(), 1);
        assert_eq!(grid.vertices.len(), 4);
        assert_eq!(grid.indices.len(), 6);
    }

    #[test]
    fn test_covers() {
        let grid = WaterGrid::new(&small_mesh());
        assert!(grid.covers(0.0, 0.0));
        assert!(grid.covers(4.0, -4.0));
        assert!(!grid.covers(4.1, 0.0));
    }
}
