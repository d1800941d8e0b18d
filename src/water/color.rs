//! Elevation-driven blend between depth and surface colors.
//!
//! Mirrors `fs_main` in `water.wgsl`.

use crate::params::{Rgb, WaterParams};

/// Map an elevation into the [0, 1] blend weight
pub fn mix_strength(elevation: f32, params: &WaterParams) -> f32 {
    ((elevation - params.color_offset) * params.color_multiplier).clamp(0.0, 1.0)
}

/// Final water color at a given elevation
pub fn water_color(elevation: f32, params: &WaterParams) -> Rgb {
    params
        .depth_color
        .lerp(params.surface_color, mix_strength(elevation, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_elevation_is_depth_color() {
        let params = WaterParams::default();
        assert_eq!(water_color(params.color_offset, &params), params.depth_color);
    }

    #[test]
    fn test_below_offset_is_depth_color() {
        let params = WaterParams::default();
        assert_eq!(water_color(-1.0, &params), params.depth_color);
    }

    #[test]
    fn test_well_above_offset_is_surface_color() {
        let params = WaterParams::default();
        let band = 1.0 / params.color_multiplier;
        assert_eq!(
            water_color(params.color_offset + 2.0 * band, &params),
            params.surface_color
        );
        assert_eq!(water_color(10.0, &params), params.surface_color);
    }

    #[test]
    fn test_strength_increases_through_band() {
        let params = WaterParams::default();
        let a = mix_strength(params.color_offset + 0.05, &params);
        let b = mix_strength(params.color_offset + 0.1, &params);
        assert!(a > 0.0 && a < b && b < 1.0);
    }

    #[test]
    fn test_zero_multiplier_stays_depth_color() {
        let params = WaterParams {
            color_multiplier: 0.0,
            ..WaterParams::default()
        };
        assert_eq!(water_color(5.0, &params), params.depth_color);
    }
}
