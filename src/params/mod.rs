//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (world units, seconds, radians, degrees)
//! - Documented ranges and meanings
//! - Type safety where possible

mod camera;
mod color;
mod render;
mod scene;
mod water;

// Re-export all types
pub use camera::CameraParams;
pub use color::Rgb;
pub use render::{RecordingConfig, RenderConfig};
pub use scene::{ScenePreset, ShipParams, StillScene, VoyageScene, DEFAULT_ENV_MAP};
pub use water::{ranges, ParamRange, WaterMesh, WaterParams};
