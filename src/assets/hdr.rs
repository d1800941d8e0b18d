//! Equirectangular environment map loading.

use std::path::Path;

use anyhow::{bail, Context, Result};
use image::imageops::FilterType;

/// Decoded environment map, ready for an `Rgba8Unorm` texture
pub struct EnvironmentMap {
    pub width: u32,
    pub height: u32,
    /// sRGB-encoded RGBA8, row 0 is the top of the panorama
    pub pixels: Vec<u8>,
}

impl EnvironmentMap {
    /// Downscale (keeping the aspect ratio) so neither side exceeds
    /// `max_side`, e.g. the GPU's 2D texture limit
    pub fn fit_within(self, max_side: u32) -> Result<Self> {
        let longest = self.width.max(self.height);
        if longest <= max_side {
            return Ok(self);
        }
        if max_side == 0 {
            bail!("cannot fit a {}x{} map into zero pixels", self.width, self.height);
        }

        let scale = max_side as f64 / longest as f64;
        let width = ((self.width as f64 * scale).round() as u32).clamp(1, max_side);
        let height = ((self.height as f64 * scale).round() as u32).clamp(1, max_side);

        let (src_width, src_height) = (self.width, self.height);
        let image = image::RgbaImage::from_raw(src_width, src_height, self.pixels)
            .context("environment map pixel buffer does not match its size")?;
        let resized = image::imageops::resize(&image, width, height, FilterType::Triangle);

        log::warn!(
            "environment map {}x{} exceeds the {} px texture limit, downscaled to {}x{}",
            src_width,
            src_height,
            max_side,
            width,
            height
        );

        Ok(Self {
            width,
            height,
            pixels: resized.into_raw(),
        })
    }
}

/// Encode a linear component to sRGB, clamping to [0, 1]
pub fn linear_to_srgb(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Load a panorama (Radiance `.hdr` or any format `image` reads)
///
/// Float images hold linear radiance and are encoded to sRGB with clamping;
/// the background is displayed without tone mapping. 8-bit images are
/// already display-encoded and pass through unchanged.
pub fn load_equirect(path: &Path) -> Result<EnvironmentMap> {
    let decoded = image::open(path)
        .with_context(|| format!("failed to decode environment map: {}", path.display()))?;

    let (width, height) = (decoded.width(), decoded.height());
    let is_float = matches!(
        decoded,
        image::DynamicImage::ImageRgb32F(_) | image::DynamicImage::ImageRgba32F(_)
    );
    let pixels = if is_float {
        decoded
            .into_rgba32f()
            .pixels()
            .flat_map(|px| {
                let [r, g, b, a] = px.0;
                [
                    to_byte(linear_to_srgb(r)),
                    to_byte(linear_to_srgb(g)),
                    to_byte(linear_to_srgb(b)),
                    to_byte(a),
                ]
            })
            .collect()
    } else {
        decoded.into_rgba8().into_raw()
    };

    Ok(EnvironmentMap {
        width,
        height,
        pixels,
    })
}

fn to_byte(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_endpoints() {
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
        assert!((linear_to_srgb(0.5) - 0.7354).abs() < 1e-3);
    }

    #[test]
    fn test_srgb_clamps_hdr_values() {
        assert!((linear_to_srgb(8.0) - 1.0).abs() < 1e-6);
        assert_eq!(linear_to_srgb(-2.0), 0.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_equirect(Path::new("does/not/exist.hdr")).err().unwrap();
        assert!(err.to_string().contains("does/not/exist.hdr"));
    }

    #[test]
    fn test_loads_png_panorama() {
        let dir = std::env::temp_dir().join("ragingsea_hdr_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pano.png");
        let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let env = load_equirect(&path).unwrap();
        assert_eq!((env.width, env.height), (4, 2));
        assert_eq!(env.pixels.len(), 4 * 2 * 4);
        assert_eq!(&env.pixels[0..4], &[255, 0, 0, 255]);
    }

    fn solid(width: u32, height: u32) -> EnvironmentMap {
        EnvironmentMap {
            width,
            height,
            pixels: [10, 20, 30, 255].repeat((width * height) as usize),
        }
    }

    #[test]
    fn test_oversized_map_is_downscaled_to_limit() {
        let env = solid(64, 32).fit_within(16).unwrap();
        assert_eq!((env.width, env.height), (16, 8));
        assert_eq!(env.pixels.len(), 16 * 8 * 4);
        assert_eq!(&env.pixels[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_map_within_limit_is_untouched() {
        let env = solid(16, 8).fit_within(16).unwrap();
        assert_eq!((env.width, env.height), (16, 8));
        assert_eq!(env.pixels.len(), 16 * 8 * 4);
    }

    #[test]
    fn test_fit_rejects_inconsistent_buffer() {
        let env = EnvironmentMap {
            width: 64,
            height: 32,
            pixels: vec![0; 12],
        };
        assert!(env.fit_within(16).is_err());
        assert!(solid(4, 2).fit_within(0).is_err());
    }

    #[test]
    fn test_float_panorama_is_srgb_encoded() {
        let dir = std::env::temp_dir().join("ragingsea_hdr_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pano.hdr");
        let img = image::Rgb32FImage::from_pixel(2, 1, image::Rgb([4.0, 0.5, 0.0]));
        image::DynamicImage::ImageRgb32F(img).save(&path).unwrap();

        let env = load_equirect(&path).unwrap();
        assert_eq!(env.pixels[0], 255);
        assert!((env.pixels[1] as i32 - 188).abs() <= 2);
        assert_eq!(env.pixels[2], 0);
        assert_eq!(env.pixels[3], 255);
    }
}
