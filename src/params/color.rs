//! RGB colors as written to shaders.
//!
//! Colors are passed through untouched (no sRGB/linear conversion), so a hex
//! value typed into the panel is exactly what lands in the framebuffer.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context};

/// RGB color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0.0, 0.0, 0.0]);

    /// Build from a packed `0xRRGGBB` value
    pub fn from_hex_u32(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Self([r, g, b])
    }

    /// Linear interpolation towards `other` (`t` is not clamped).
    /// Exact at `t == 0` and `t == 1`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let s = 1.0 - t;
        let [r0, g0, b0] = self.0;
        let [r1, g1, b1] = other.0;
        Rgb([r0 * s + r1 * t, g0 * s + g1 * t, b0 * s + b1 * t])
    }

    /// Padded to a vec4 for uniform buffers (alpha = 1)
    pub fn to_vec4(self) -> [f32; 4] {
        [self.0[0], self.0[1], self.0[2], 1.0]
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.0[0] as f64,
            g: self.0[1] as f64,
            b: self.0[2] as f64,
            a: 1.0,
        }
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    /// Parse `#rrggbb` or `rrggbb`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            bail!("expected 6 hex digits in color '{}'", s);
        }
        let hex = u32::from_str_radix(digits, 16)
            .with_context(|| format!("invalid hex color '{}'", s))?;
        Ok(Self::from_hex_u32(hex))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}
