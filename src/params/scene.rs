//! Scene presets: which props exist and how the camera behaves.

use std::path::PathBuf;

use super::camera::CameraParams;

/// Default equirectangular environment map
pub const DEFAULT_ENV_MAP: &str = "assets/envMap3.hdr";

/// Default ship model
pub const DEFAULT_SHIP_MODEL: &str = "assets/ship.glb";

/// Floating prop parameters
#[derive(Debug, Clone)]
pub struct ShipParams {
    /// glTF / GLB file
    pub model_path: PathBuf,

    /// Uniform scale applied to the model
    pub scale: f32,

    /// Radius of the circular course around the origin (world units)
    pub orbit_radius: f32,

    /// Angular rate along the course (radians per second)
    pub angular_rate: f32,

    /// Extra yaw so the model's bow points along the course (radians)
    pub heading_offset_rad: f32,

    /// How far the hull sits below the local water elevation
    pub draft: f32,
}

impl Default for ShipParams {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_SHIP_MODEL),
            scale: 0.25,
            orbit_radius: 4.0,
            angular_rate: 0.02,
            heading_offset_rad: 0.0,
            draft: 0.02,
        }
    }
}

/// Still water: plane, background and a free orbit camera
#[derive(Debug, Clone)]
pub struct StillScene {
    pub camera: CameraParams,
    pub env_map: PathBuf,
}

impl Default for StillScene {
    fn default() -> Self {
        Self {
            camera: CameraParams::default(),
            env_map: PathBuf::from(DEFAULT_ENV_MAP),
        }
    }
}

/// Voyage: plane, background, circling ship and a horizon-locked camera
#[derive(Debug, Clone)]
pub struct VoyageScene {
    pub camera: CameraParams,
    pub env_map: PathBuf,
    pub ship: ShipParams,
}

impl Default for VoyageScene {
    fn default() -> Self {
        Self {
            camera: CameraParams::horizon_locked(),
            env_map: PathBuf::from(DEFAULT_ENV_MAP),
            ship: ShipParams::default(),
        }
    }
}

/// Scene preset selection
#[derive(Debug, Clone)]
pub enum ScenePreset {
    /// Water plane only
    Still(StillScene),

    /// Water plane with a ship circling the origin
    Voyage(VoyageScene),
}

impl Default for ScenePreset {
    fn default() -> Self {
        Self::Still(StillScene::default())
    }
}

impl ScenePreset {
    pub fn camera(&self) -> &CameraParams {
        match self {
            Self::Still(scene) => &scene.camera,
            Self::Voyage(scene) => &scene.camera,
        }
    }

    pub fn env_map(&self) -> &PathBuf {
        match self {
            Self::Still(scene) => &scene.env_map,
            Self::Voyage(scene) => &scene.env_map,
        }
    }

    pub fn env_map_mut(&mut self) -> &mut PathBuf {
        match self {
            Self::Still(scene) => &mut scene.env_map,
            Self::Voyage(scene) => &mut scene.env_map,
        }
    }

    pub fn ship(&self) -> Option<&ShipParams> {
        match self {
            Self::Still(_) => None,
            Self::Voyage(scene) => Some(&scene.ship),
        }
    }

    pub fn ship_mut(&mut self) -> Option<&mut ShipParams> {
        match self {
            Self::Still(_) => None,
            Self::Voyage(scene) => Some(&mut scene.ship),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Still(_) => "still",
            Self::Voyage(_) => "voyage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_still_scene_has_no_ship_and_free_camera() {
        let preset = ScenePreset::default();
        assert!(preset.ship().is_none());
        assert!(!preset.camera().lock_vertical);
        assert_eq!(preset.camera().position, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_voyage_scene_locks_camera_to_horizon() {
        let preset = ScenePreset::Voyage(VoyageScene::default());
        let camera = preset.camera();
        assert!(camera.lock_vertical);
        assert_eq!(camera.position[1], 0.0);
        assert_eq!(camera.target[1], 0.0);

        let ship = preset.ship().unwrap();
        assert_eq!(ship.orbit_radius, 4.0);
        assert_eq!(ship.angular_rate, 0.02);
    }
}
