//! Water surface shading parameters and their editable ranges.

use super::color::Rgb;

/// Inclusive range and step for a live-editable parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Panel ranges for every water parameter
pub mod ranges {
    use super::ParamRange;

    pub const BIG_WAVES_ELEVATION: ParamRange = ParamRange::new(0.0, 1.0, 0.001);
    pub const BIG_WAVES_FREQUENCY: ParamRange = ParamRange::new(0.0, 10.0, 0.1);
    pub const BIG_WAVES_SPEED: ParamRange = ParamRange::new(0.0, 4.0, 0.1);

    pub const SMALL_WAVES_ELEVATION: ParamRange = ParamRange::new(0.0, 1.0, 0.001);
    pub const SMALL_WAVES_FREQUENCY: ParamRange = ParamRange::new(0.0, 10.0, 0.001);
    pub const SMALL_WAVES_SPEED: ParamRange = ParamRange::new(0.0, 1.0, 0.001);
    pub const SMALL_WAVES_ITERATIONS: ParamRange = ParamRange::new(0.0, 10.0, 1.0);

    pub const COLOR_OFFSET: ParamRange = ParamRange::new(0.0, 1.0, 0.001);
    pub const COLOR_MULTIPLIER: ParamRange = ParamRange::new(0.0, 10.0, 0.001);
}

/// Wave and color parameters fed to the water shader
#[derive(Debug, Clone)]
pub struct WaterParams {
    // === Big waves (two crossed sines) ===
    /// Peak height of the big waves (world units)
    pub big_waves_elevation: f32,

    /// Spatial frequency along X and Z (radians per world unit)
    pub big_waves_frequency: [f32; 2],

    /// Phase speed (radians per second)
    pub big_waves_speed: f32,

    // === Small waves (layered noise, always subtracted) ===
    /// Height of the first noise layer; layer `i` uses `elevation / i`
    pub small_waves_elevation: f32,

    /// Base noise frequency; layer `i` uses `frequency * i`
    pub small_waves_frequency: f32,

    /// Noise scroll speed along the time axis
    pub small_waves_speed: f32,

    /// Number of noise layers. Kept as float because it is a shader uniform
    /// and edited with a stepped slider.
    pub small_waves_iterations: f32,

    // === Coloring ===
    /// Color at and below `color_offset` elevation
    pub depth_color: Rgb,

    /// Color once elevation exceeds the blend band
    pub surface_color: Rgb,

    /// Elevation where the blend starts
    pub color_offset: f32,

    /// Blend band steepness (band width is `1 / multiplier`)
    pub color_multiplier: f32,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            big_waves_elevation: 0.1,
            big_waves_frequency: [2.5, 1.6],
            big_waves_speed: 0.6,

            small_waves_elevation: 0.15,
            small_waves_frequency: 2.0,
            small_waves_speed: 0.3,
            small_waves_iterations: 3.0,

            depth_color: Rgb::from_hex_u32(0x15577a),
            surface_color: Rgb::from_hex_u32(0x2382be),
            color_offset: 0.08,
            color_multiplier: 5.0,
        }
    }
}

impl WaterParams {
    /// Parameters describing a perfectly calm surface
    pub fn calm() -> Self {
        Self {
            big_waves_elevation: 0.0,
            small_waves_elevation: 0.0,
            ..Self::default()
        }
    }

    /// Iteration count as an integer layer count
    pub fn small_wave_layers(&self) -> u32 {
        self.small_waves_iterations.max(0.0).floor() as u32
    }
}

/// Water plane geometry
#[derive(Debug, Clone)]
pub struct WaterMesh {
    /// Side length of the square plane (world units)
    pub size: f32,

    /// Subdivisions per side
    pub segments: usize,
}

impl Default for WaterMesh {
    fn default() -> Self {
        Self {
            size: 8.0,
            segments: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_within_panel_ranges() {
        let p = WaterParams::default();
        assert!(ranges::BIG_WAVES_ELEVATION.contains(p.big_waves_elevation));
        assert!(ranges::BIG_WAVES_FREQUENCY.contains(p.big_waves_frequency[0]));
        assert!(ranges::BIG_WAVES_FREQUENCY.contains(p.big_waves_frequency[1]));
        assert!(ranges::BIG_WAVES_SPEED.contains(p.big_waves_speed));
        assert!(ranges::SMALL_WAVES_ELEVATION.contains(p.small_waves_elevation));
        assert!(ranges::SMALL_WAVES_FREQUENCY.contains(p.small_waves_frequency));
        assert!(ranges::SMALL_WAVES_SPEED.contains(p.small_waves_speed));
        assert!(ranges::SMALL_WAVES_ITERATIONS.contains(p.small_waves_iterations));
        assert!(ranges::COLOR_OFFSET.contains(p.color_offset));
        assert!(ranges::COLOR_MULTIPLIER.contains(p.color_multiplier));
    }

    #[test]
    fn test_small_wave_layers_truncates() {
        let mut p = WaterParams::default();
        assert_eq!(p.small_wave_layers(), 3);

        p.small_waves_iterations = 2.7;
        assert_eq!(p.small_wave_layers(), 2);

        p.small_waves_iterations = -1.0;
        assert_eq!(p.small_wave_layers(), 0);
    }

    #[test]
    fn test_calm_keeps_colors() {
        let calm = WaterParams::calm();
        let default = WaterParams::default();
        assert_eq!(calm.big_waves_elevation, 0.0);
        assert_eq!(calm.small_waves_elevation, 0.0);
        assert_eq!(calm.depth_color, default.depth_color);
    }
}
