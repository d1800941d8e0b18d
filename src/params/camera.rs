//! Camera projection and orbit control configuration.

/// Perspective camera and orbit controller parameters
#[derive(Debug, Clone)]
pub struct CameraParams {
    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Initial camera position
    pub position: [f32; 3],

    /// Point the camera orbits around
    pub target: [f32; 3],

    /// Inertial damping on rotate/pan
    pub enable_damping: bool,

    /// Fraction of the pending motion applied per update when damping
    pub damping_factor: f32,

    /// Drag rotation multiplier (one viewport height = one full turn)
    pub rotate_speed: f32,

    /// Wheel dolly multiplier
    pub zoom_speed: f32,

    /// Drag pan multiplier
    pub pan_speed: f32,

    /// Closest allowed orbit radius
    pub min_distance: f32,

    /// Farthest allowed orbit radius
    pub max_distance: f32,

    /// Force camera and target onto the y = 0 plane after every change
    pub lock_vertical: bool,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 100.0,
            position: [1.0, 1.0, 1.0],
            target: [0.0, 0.0, 0.0],
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            lock_vertical: false,
        }
    }
}

impl CameraParams {
    /// Horizon-level orbit used by the voyage scene
    pub fn horizon_locked() -> Self {
        Self {
            position: [5.0, 0.0, 5.0],
            min_distance: 1.0,
            max_distance: 40.0,
            lock_vertical: true,
            ..Self::default()
        }
    }
}
