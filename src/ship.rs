//! The floating prop: a ship that circles the origin riding the waves.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::params::ShipParams;
use crate::water::WaveField;

/// Horizontal (x, z) position on the circular course at time `t`
pub fn orbit_position(time_s: f32, radius: f32, angular_rate: f32) -> Vec2 {
    let angle = angular_rate * time_s;
    Vec2::new(radius * angle.cos(), radius * angle.sin())
}

/// Ship placement for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl ShipPose {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.position)
    }
}

/// Course-following ship
pub struct Ship {
    params: ShipParams,
}

impl Ship {
    pub fn new(params: ShipParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ShipParams {
        &self.params
    }

    /// Compute the pose at `time_s`
    ///
    /// Horizontal position follows the circular course; height and tilt follow
    /// the water surface when the ship is over the plane (flat water otherwise).
    ///
    /// # Arguments
    /// * `time_s` - Elapsed time in seconds
    /// * `field` - Current water surface
    /// * `over_water` - Whether an (x, z) point lies over the water plane
    pub fn pose(
        &self,
        time_s: f32,
        field: &WaveField<'_>,
        over_water: impl Fn(f32, f32) -> bool,
    ) -> ShipPose {
        let p = &self.params;
        let xz = orbit_position(time_s, p.orbit_radius, p.angular_rate);

        let (height, normal) = if over_water(xz.x, xz.y) {
            (
                field.elevation(xz.x, xz.y, time_s),
                field.normal(xz.x, xz.y, time_s),
            )
        } else {
            (0.0, Vec3::Y)
        };

        // Bow along the direction of travel (tangent to the circle)
        let angle = p.angular_rate * time_s;
        let heading = -(angle + std::f32::consts::FRAC_PI_2) + p.heading_offset_rad;
        let yaw = Quat::from_rotation_y(heading);
        let tilt = Quat::from_rotation_arc(Vec3::Y, normal);

        ShipPose {
            position: Vec3::new(xz.x, height - p.draft, xz.y),
            rotation: tilt * yaw,
            scale: p.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::WaterParams;

    #[test]
    fn test_orbit_matches_circle() {
        for i in 0..200 {
            let t = i as f32 * 7.3;
            let xz = orbit_position(t, 4.0, 0.02);
            assert!((xz.x - 4.0 * (0.02 * t).cos()).abs() < 1e-6);
            assert!((xz.y - 4.0 * (0.02 * t).sin()).abs() < 1e-6);
            assert!((xz.length() - 4.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_orbit_starts_on_positive_x() {
        assert_eq!(orbit_position(0.0, 4.0, 0.02), Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_pose_horizontal_position_follows_orbit() {
        let ship = Ship::new(ShipParams::default());
        let params = WaterParams::default();
        let field = WaveField::new(&params);

        let t = 42.0;
        let pose = ship.pose(t, &field, |_, _| true);
        let expected = orbit_position(t, 4.0, 0.02);
        assert!((pose.position.x - expected.x).abs() < 1e-6);
        assert!((pose.position.z - expected.y).abs() < 1e-6);
    }

    #[test]
    fn test_pose_rides_the_surface() {
        let ship = Ship::new(ShipParams::default());
        let params = WaterParams::default();
        let field = WaveField::new(&params);

        let t = 10.0;
        let pose = ship.pose(t, &field, |_, _| true);
        let xz = orbit_position(t, 4.0, 0.02);
        let expected = field.elevation(xz.x, xz.y, t) - ship.params().draft;
        assert!((pose.position.y - expected).abs() < 1e-6);
    }

    #[test]
    fn test_pose_off_the_plane_sits_level() {
        let ship = Ship::new(ShipParams::default());
        let params = WaterParams::default();
        let field = WaveField::new(&params);

        let pose = ship.pose(3.0, &field, |_, _| false);
        assert_eq!(pose.position.y, -ship.params().draft);
        let up = pose.rotation * Vec3::Y;
        assert!((up - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_bow_points_along_course() {
        let ship = Ship::new(ShipParams::default());
        let params = WaterParams::calm();
        let field = WaveField::new(&params);

        let t = 20.0;
        let pose = ship.pose(t, &field, |_, _| true);
        let bow = pose.rotation * Vec3::X;
        let angle = 0.02 * t;
        let tangent = Vec3::new(-angle.sin(), 0.0, angle.cos());
        assert!((bow - tangent).length() < 1e-4);
    }

    #[test]
    fn test_model_matrix_applies_scale() {
        let pose = ShipPose {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::IDENTITY,
            scale: 0.5,
        };
        let m = pose.model_matrix();
        assert_eq!(m.transform_point3(Vec3::X), Vec3::new(1.5, 2.0, 3.0));
    }
}
