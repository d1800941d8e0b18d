//! Water surface: static grid plus live shader parameters.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::mesh::WaterGrid;
use super::waves::WaveField;
use crate::params::{WaterMesh, WaterParams};

/// Uniform buffer for the water shader. Layout matches `WaterUniforms` in
/// `water.wgsl` (std140-compatible, 144 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct WaterUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub big_waves_frequency: [f32; 2],
    pub time: f32,
    pub big_waves_elevation: f32,
    pub big_waves_speed: f32,
    pub small_waves_elevation: f32,
    pub small_waves_frequency: f32,
    pub small_waves_speed: f32,
    pub small_waves_iterations: f32,
    pub color_offset: f32,
    pub color_multiplier: f32,
    pub _padding: f32,
    pub depth_color: [f32; 4],
    pub surface_color: [f32; 4],
}

/// Water plane with the parameters the panel edits
pub struct WaterSurface {
    pub grid: WaterGrid,
    pub params: WaterParams,
}

impl WaterSurface {
    pub fn new(mesh: &WaterMesh, params: WaterParams) -> Self {
        Self {
            grid: WaterGrid::new(mesh),
            params,
        }
    }

    /// CPU view of the current surface
    pub fn field(&self) -> WaveField<'_> {
        WaveField::new(&self.params)
    }

    /// Pack the current parameters for upload
    ///
    /// # Arguments
    /// * `view_proj` - Camera view-projection matrix
    /// * `time_s` - Elapsed time in seconds
    pub fn uniforms(&self, view_proj: Mat4, time_s: f32) -> WaterUniforms {
        let p = &self.params;
        WaterUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            big_waves_frequency: p.big_waves_frequency,
            time: time_s,
            big_waves_elevation: p.big_waves_elevation,
            big_waves_speed: p.big_waves_speed,
            small_waves_elevation: p.small_waves_elevation,
            small_waves_frequency: p.small_waves_frequency,
            small_waves_speed: p.small_waves_speed,
            small_waves_iterations: p.small_waves_iterations,
            color_offset: p.color_offset,
            color_multiplier: p.color_multiplier,
            _padding: 0.0,
            depth_color: p.depth_color.to_vec4(),
            surface_color: p.surface_color.to_vec4(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout_size() {
        // mat4 (64) + vec2 (8) + 10 scalars (40) + 2 * vec4 (32)
        assert_eq!(std::mem::size_of::<WaterUniforms>(), 144);
        assert_eq!(std::mem::size_of::<WaterUniforms>() % 16, 0);
    }

    #[test]
    fn test_uniforms_carry_time_and_params() {
        let mesh = WaterMesh {
            size: 8.0,
            segments: 4,
        };
        let mut surface = WaterSurface::new(&mesh, WaterParams::default());
        surface.params.big_waves_speed = 2.0;

        let u = surface.uniforms(Mat4::IDENTITY, 12.5);
        assert_eq!(u.time, 12.5);
        assert_eq!(u.big_waves_speed, 2.0);
        assert_eq!(u.big_waves_frequency, [2.5, 1.6]);
        assert_eq!(u.small_waves_iterations, 3.0);
        assert_eq!(u.depth_color[3], 1.0);
        assert_eq!(u.view_proj, Mat4::IDENTITY.to_cols_array_2d());
    }
}
