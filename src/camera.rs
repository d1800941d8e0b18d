//! Perspective camera with orbit controls, optional horizon lock and
//! viewport tracking.

use std::f32::consts::PI;

use glam::{Mat4, Vec3};

use crate::params::CameraParams;

/// Motion below this (squared distance) does not count as a change
const CHANGE_EPSILON: f32 = 1e-6;

/// Keeps the polar angle off the poles so `look_at` stays well-defined
const POLE_EPSILON: f32 = 1e-6;

/// Per-step wheel dolly factor before `zoom_speed` is applied
const DOLLY_STEP: f32 = 0.95;

/// Window size and pixel density
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Physical width (pixels)
    pub width: u32,

    /// Physical height (pixels)
    pub height: u32,

    /// Physical pixels per logical pixel reported by the window system
    pub scale_factor: f64,

    /// Cap on the pixel ratio used for rendering
    pub max_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale_factor: f64, max_pixel_ratio: f32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            scale_factor,
            max_pixel_ratio,
        }
    }

    /// Apply a new window size. Zero-sized (minimized) windows are ignored.
    ///
    /// # Returns
    /// `true` when the viewport changed
    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f64) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        let changed =
            width != self.width || height != self.height || scale_factor != self.scale_factor;
        self.width = width;
        self.height = height;
        self.scale_factor = scale_factor;
        changed
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Effective device pixel ratio (`min(scale_factor, max_pixel_ratio)`)
    pub fn pixel_ratio(&self) -> f64 {
        self.scale_factor.min(self.max_pixel_ratio as f64)
    }

    /// Output resolution: logical size times the capped pixel ratio
    pub fn render_size(&self) -> (u32, u32) {
        let scale = self.pixel_ratio() / self.scale_factor;
        let w = (self.width as f64 * scale).round().max(1.0) as u32;
        let h = (self.height as f64 * scale).round().max(1.0) as u32;
        (w, h)
    }
}

/// Orbit controls: the camera circles a target, driven by drag/wheel input
/// with optional inertial damping
#[derive(Debug, Clone)]
pub struct OrbitController {
    pub position: Vec3,
    pub target: Vec3,
    params: CameraParams,

    // Pending input, consumed by `update`
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    scale: f32,

    last_position: Vec3,
    last_target: Vec3,
}

impl OrbitController {
    pub fn new(params: CameraParams) -> Self {
        let position = Vec3::from_array(params.position);
        let target = Vec3::from_array(params.target);
        Self {
            position,
            target,
            params,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            last_position: position,
            last_target: target,
        }
    }

    pub fn params(&self) -> &CameraParams {
        &self.params
    }

    /// Rotate by a drag of (dx, dy) pixels; one viewport height is a full turn
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        let speed = self.params.rotate_speed;
        self.delta_theta -= 2.0 * PI * dx * speed / height;
        self.delta_phi -= 2.0 * PI * dy * speed / height;
    }

    /// Pan by a drag of (dx, dy) pixels in the camera's screen plane
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        let offset = self.position - self.target;
        let half_fov = (self.params.fov_degrees.to_radians() / 2.0).tan();
        let target_distance = offset.length() * half_fov;

        let (right, up) = self.screen_axes();
        let speed = self.params.pan_speed;
        self.pan_offset -= right * (2.0 * dx * target_distance / height) * speed;
        self.pan_offset += up * (2.0 * dy * target_distance / height) * speed;
    }

    /// Dolly towards the target; positive steps zoom in
    pub fn dolly(&mut self, steps: f32) {
        self.scale *= DOLLY_STEP.powf(self.params.zoom_speed * steps);
    }

    /// Camera right and up vectors in world space
    fn screen_axes(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.position).normalize_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(forward);
        (right, up)
    }

    /// Apply pending input. Returns `true` when the pose changed (the
    /// "change" event). With the horizon lock the camera and target stay at
    /// y = 0 after every update, whether or not it counts as a change.
    pub fn update(&mut self) -> bool {
        let offset = self.position - self.target;
        let mut radius = offset.length();

        // Spherical angles: theta around +Y from +Z, phi down from +Y
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };

        let damping = self.params.enable_damping;
        let factor = if damping {
            self.params.damping_factor
        } else {
            1.0
        };

        let locked = self.params.lock_vertical;

        theta += self.delta_theta * factor;
        phi += self.delta_phi * factor;
        phi = phi.clamp(POLE_EPSILON, PI - POLE_EPSILON);
        if locked {
            // Vertical drag has nowhere to go; keeps the radius from shrinking
            phi = PI / 2.0;
        }

        radius = (radius * self.scale).clamp(self.params.min_distance, self.params.max_distance);

        self.target += self.pan_offset * factor;

        let sin_phi_radius = phi.sin() * radius;
        let new_offset = Vec3::new(
            sin_phi_radius * theta.sin(),
            phi.cos() * radius,
            sin_phi_radius * theta.cos(),
        );
        self.position = self.target + new_offset;

        if locked {
            self.position.y = 0.0;
            self.target.y = 0.0;
        }

        if damping {
            let decay = 1.0 - self.params.damping_factor;
            self.delta_theta *= decay;
            self.delta_phi *= decay;
            self.pan_offset *= decay;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        let zoomed = self.scale != 1.0;
        self.scale = 1.0;

        let changed = zoomed
            || self.last_position.distance_squared(self.position) > CHANGE_EPSILON
            || self.last_target.distance_squared(self.target) > CHANGE_EPSILON;

        if changed {
            self.last_position = self.position;
            self.last_target = self.target;
        }

        changed
    }

    /// View matrix looking from the camera to the target
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// View matrix with translation removed (for the background)
    pub fn rotation_only_view(&self) -> Mat4 {
        let forward = (self.target - self.position).normalize_or(Vec3::NEG_Z);
        Mat4::look_to_rh(Vec3::ZERO, forward, Vec3::Y)
    }
}

/// Camera system: projection settings, orbit controls and viewport
pub struct CameraSystem {
    pub controls: OrbitController,
    pub viewport: Viewport,
}

impl CameraSystem {
    pub fn new(params: CameraParams, viewport: Viewport) -> Self {
        Self {
            controls: OrbitController::new(params),
            viewport,
        }
    }

    /// Projection matrix for the current viewport
    pub fn projection(&self) -> Mat4 {
        let p = self.controls.params();
        Mat4::perspective_rh(
            p.fov_degrees.to_radians(),
            self.viewport.aspect_ratio(),
            p.near_plane,
            p.far_plane,
        )
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(&self) -> (Mat4, Vec3) {
        (
            self.projection() * self.controls.view(),
            self.controls.position,
        )
    }

    /// Inverse of the translation-free view-projection, for reconstructing
    /// world-space view directions in the background pass
    pub fn background_inv_view_proj(&self) -> Mat4 {
        (self.projection() * self.controls.rotation_only_view()).inverse()
    }

    /// Track a window resize
    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f64) -> bool {
        self.viewport.resize(width, height, scale_factor)
    }

    /// Mouse drag to rotate, scaled by the viewport height
    pub fn drag_rotate(&mut self, dx: f32, dy: f32) {
        let height = self.viewport.height as f32;
        self.controls.rotate(dx, dy, height);
    }

    /// Mouse drag to pan, scaled by the viewport height
    pub fn drag_pan(&mut self, dx: f32, dy: f32) {
        let height = self.viewport.height as f32;
        self.controls.pan(dx, dy, height);
    }
}
