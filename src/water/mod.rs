//! Animated water surface: mesh, wave model, color blend and uniforms.

mod color;
mod mesh;
mod system;
mod waves;

// Re-export public types
pub use color::{mix_strength, water_color};
pub use mesh::{Vertex, WaterGrid};
pub use system::{WaterSurface, WaterUniforms};
pub use waves::{classic_noise, WaveField};
