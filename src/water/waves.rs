//! Wave displacement: two crossed sines minus layered gradient noise.
//!
//! This is the CPU twin of `vs_main` in `water.wgsl`. Both sides use the same
//! classic gradient noise so CPU samples (ship placement, tests) agree with
//! the surface on screen.

use glam::{Vec3, Vec4};

use crate::params::WaterParams;

/// Step used for finite-difference normals (world units)
const NORMAL_SAMPLE_STEP: f32 = 0.01;

/// Read-only view of the water surface for a given parameter set
#[derive(Debug, Clone, Copy)]
pub struct WaveField<'a> {
    params: &'a WaterParams,
}

impl<'a> WaveField<'a> {
    pub fn new(params: &'a WaterParams) -> Self {
        Self { params }
    }

    /// Vertical displacement at world position (x, z) and time `t` (seconds)
    pub fn elevation(&self, x: f32, z: f32, t: f32) -> f32 {
        let p = self.params;

        let mut elevation = (x * p.big_waves_frequency[0] + t * p.big_waves_speed).sin()
            * (z * p.big_waves_frequency[1] + t * p.big_waves_speed).sin()
            * p.big_waves_elevation;

        for layer in 1..=p.small_wave_layers() {
            let i = layer as f32;
            let sample = Vec3::new(
                x * p.small_waves_frequency * i,
                z * p.small_waves_frequency * i,
                t * p.small_waves_speed,
            );
            elevation -= (classic_noise(sample) * p.small_waves_elevation / i).abs();
        }

        elevation
    }

    /// Unit surface normal from central differences
    pub fn normal(&self, x: f32, z: f32, t: f32) -> Vec3 {
        let h = NORMAL_SAMPLE_STEP;
        let dx = self.elevation(x + h, z, t) - self.elevation(x - h, z, t);
        let dz = self.elevation(x, z + h, t) - self.elevation(x, z - h, t);
        Vec3::new(-dx, 2.0 * h, -dz).normalize()
    }
}

// GLSL-style helpers (floor-based modulo and fract, unlike Rust's `%`/`fract`)

fn mod289_3(v: Vec3) -> Vec3 {
    v - (v / 289.0).floor() * 289.0
}

fn mod289_4(v: Vec4) -> Vec4 {
    v - (v / 289.0).floor() * 289.0
}

fn fract4(v: Vec4) -> Vec4 {
    v - v.floor()
}

fn permute(v: Vec4) -> Vec4 {
    mod289_4((v * 34.0 + Vec4::ONE) * v)
}

fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.792_842_9) - r * 0.853_734_7
}

fn fade(t: Vec3) -> Vec3 {
    t * t * t * (t * (t * 6.0 - Vec3::splat(15.0)) + Vec3::splat(10.0))
}

/// `step(edge, x)`: 0 where x < edge, else 1
fn step(edge: Vec4, x: Vec4) -> Vec4 {
    Vec4::select(x.cmplt(edge), Vec4::ZERO, Vec4::ONE)
}

/// Gradient components for four lattice corners from their hashes
fn corner_gradients(hash: Vec4) -> (Vec4, Vec4, Vec4) {
    let gx = hash / 7.0;
    let gy = fract4(gx.floor() / 7.0) - Vec4::splat(0.5);
    let gx = fract4(gx);
    let gz = Vec4::splat(0.5) - gx.abs() - gy.abs();
    let sz = step(gz, Vec4::ZERO);
    let gx = gx - sz * (step(Vec4::ZERO, gx) - Vec4::splat(0.5));
    let gy = gy - sz * (step(Vec4::ZERO, gy) - Vec4::splat(0.5));
    (gx, gy, gz)
}

fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Classic 3D gradient noise, roughly in [-1, 1], zero on integer lattice points
pub fn classic_noise(p: Vec3) -> f32 {
    let cell = p.floor();
    let pi0 = mod289_3(cell);
    let pi1 = mod289_3(cell + Vec3::ONE);
    let pf0 = p - cell;
    let pf1 = pf0 - Vec3::ONE;

    let ix = Vec4::new(pi0.x, pi1.x, pi0.x, pi1.x);
    let iy = Vec4::new(pi0.y, pi0.y, pi1.y, pi1.y);
    let iz0 = Vec4::splat(pi0.z);
    let iz1 = Vec4::splat(pi1.z);

    let ixy = permute(permute(ix) + iy);
    let ixy0 = permute(ixy + iz0);
    let ixy1 = permute(ixy + iz1);

    let (gx0, gy0, gz0) = corner_gradients(ixy0);
    let (gx1, gy1, gz1) = corner_gradients(ixy1);

    let mut g000 = Vec3::new(gx0.x, gy0.x, gz0.x);
    let mut g100 = Vec3::new(gx0.y, gy0.y, gz0.y);
    let mut g010 = Vec3::new(gx0.z, gy0.z, gz0.z);
    let mut g110 = Vec3::new(gx0.w, gy0.w, gz0.w);
    let mut g001 = Vec3::new(gx1.x, gy1.x, gz1.x);
    let mut g101 = Vec3::new(gx1.y, gy1.y, gz1.y);
    let mut g011 = Vec3::new(gx1.z, gy1.z, gz1.z);
    let mut g111 = Vec3::new(gx1.w, gy1.w, gz1.w);

    let norm0 = taylor_inv_sqrt(Vec4::new(
        g000.length_squared(),
        g010.length_squared(),
        g100.length_squared(),
        g110.length_squared(),
    ));
    g000 *= norm0.x;
    g010 *= norm0.y;
    g100 *= norm0.z;
    g110 *= norm0.w;

    let norm1 = taylor_inv_sqrt(Vec4::new(
        g001.length_squared(),
        g011.length_squared(),
        g101.length_squared(),
        g111.length_squared(),
    ));
    g001 *= norm1.x;
    g011 *= norm1.y;
    g101 *= norm1.z;
    g111 *= norm1.w;

    let n000 = g000.dot(pf0);
    let n100 = g100.dot(Vec3::new(pf1.x, pf0.y, pf0.z));
    let n010 = g010.dot(Vec3::new(pf0.x, pf1.y, pf0.z));
    let n110 = g110.dot(Vec3::new(pf1.x, pf1.y, pf0.z));
    let n001 = g001.dot(Vec3::new(pf0.x, pf0.y, pf1.z));
    let n101 = g101.dot(Vec3::new(pf1.x, pf0.y, pf1.z));
    let n011 = g011.dot(Vec3::new(pf0.x, pf1.y, pf1.z));
    let n111 = g111.dot(pf1);

    let f = fade(pf0);
    let n_z = Vec4::new(n000, n100, n010, n110)
        .lerp(Vec4::new(n001, n101, n011, n111), f.z);
    let n_yz_x = mix(n_z.x, n_z.z, f.y);
    let n_yz_y = mix(n_z.y, n_z.w, f.y);
    2.2 * mix(n_yz_x, n_yz_y, f.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_zero_on_lattice_points() {
        for &(x, y, z) in &[(0.0, 0.0, 0.0), (1.0, 2.0, 3.0), (-4.0, 7.0, -1.0)] {
            let n = classic_noise(Vec3::new(x, y, z));
            assert!(n.abs() < 1e-6, "noise at lattice ({x},{y},{z}) = {n}");
        }
    }

    #[test]
    fn test_noise_bounded_and_not_constant() {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for i in 0..400 {
            let p = Vec3::new(i as f32 * 0.173, i as f32 * 0.071 - 3.0, i as f32 * 0.029);
            let n = classic_noise(p);
            assert!(n.is_finite());
            assert!(n.abs() <= 1.5, "noise out of range: {n}");
            min = min.min(n);
            max = max.max(n);
        }
        assert!(max - min > 0.2);
    }

    #[test]
    fn test_zero_elevation_is_flat() {
        let params = WaterParams::calm();
        let field = WaveField::new(&params);
        for i in 0..50 {
            let t = i as f32 * 3.7;
            let x = -4.0 + i as f32 * 0.16;
            let z = 4.0 - i as f32 * 0.13;
            assert_eq!(field.elevation(x, z, t), 0.0);
        }
    }

    #[test]
    fn test_elevation_is_deterministic() {
        let params = WaterParams::default();
        let field = WaveField::new(&params);
        let a = field.elevation(1.25, -0.5, 12.0);
        let b = WaveField::new(&params).elevation(1.25, -0.5, 12.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_elevation_continuous_in_time_and_space() {
        let params = WaterParams::default();
        let field = WaveField::new(&params);
        let eps = 1e-4;
        for i in 0..100 {
            let x = -3.0 + i as f32 * 0.061;
            let z = 2.0 - i as f32 * 0.047;
            let t = i as f32 * 0.5;
            let e = field.elevation(x, z, t);
            assert!((field.elevation(x, z, t + eps) - e).abs() < 1e-2);
            assert!((field.elevation(x + eps, z, t) - e).abs() < 1e-2);
            assert!((field.elevation(x, z + eps, t) - e).abs() < 1e-2);
        }
    }

    #[test]
    fn test_big_waves_only_matches_closed_form() {
        let params = WaterParams {
            small_waves_iterations: 0.0,
            ..WaterParams::default()
        };
        let field = WaveField::new(&params);
        let (x, z, t) = (0.3_f32, -1.1_f32, 2.0_f32);
        let expected = (x * 2.5 + t * 0.6).sin() * (z * 1.6 + t * 0.6).sin() * 0.1;
        assert!((field.elevation(x, z, t) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_small_waves_only_push_down() {
        let params = WaterParams {
            big_waves_elevation: 0.0,
            ..WaterParams::default()
        };
        let field = WaveField::new(&params);
        for i in 0..100 {
            let e = field.elevation(i as f32 * 0.07, i as f32 * -0.05, i as f32 * 0.3);
            assert!(e <= 0.0);
        }
    }

    #[test]
    fn test_calm_normal_points_up() {
        let params = WaterParams::calm();
        let n = WaveField::new(&params).normal(0.7, -2.0, 5.0);
        assert!((n - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_normal_is_unit_length() {
        let params = WaterParams::default();
        let field = WaveField::new(&params);
        let n = field.normal(1.0, 1.0, 3.0);
        assert!((n.length() - 1.0).abs() < 1e-5);
        assert!(n.y > 0.0);
    }
}
