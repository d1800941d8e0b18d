//! Command-line argument parsing.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::params::{
    RecordingConfig, RenderConfig, Rgb, ScenePreset, StillScene, VoyageScene, WaterMesh,
    WaterParams,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Ragingsea")]
#[command(about = "Shader-displaced water with orbit controls", long_about = None)]
pub struct Args {
    /// Scene preset: still (default), voyage
    #[arg(long, value_name = "PRESET", default_value = "still")]
    pub scene: String,

    /// Equirectangular environment map (HDR or any image format)
    #[arg(long, value_name = "PATH")]
    pub env_map: Option<PathBuf>,

    /// Ship model for the voyage scene (glTF / GLB)
    #[arg(long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Uniform scale applied to the ship model
    #[arg(long, value_name = "FACTOR")]
    pub model_scale: Option<f32>,

    /// Water plane subdivisions per side
    #[arg(long, value_name = "N")]
    pub segments: Option<usize>,

    /// Color of the troughs (#rrggbb)
    #[arg(long, value_name = "HEX")]
    pub depth_color: Option<String>,

    /// Color of the crests (#rrggbb)
    #[arg(long, value_name = "HEX")]
    pub surface_color: Option<String>,

    /// Initial window width (logical pixels)
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Initial window height (logical pixels)
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// Start with the debug panel hidden (toggle with H)
    #[arg(long)]
    pub hide_panel: bool,

    /// Record frames to disk (duration in seconds), then exit
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,
}

impl Args {
    /// Parse scene preset from command-line arguments
    pub fn parse_scene_preset(&self) -> Result<ScenePreset> {
        let mut preset = match self.scene.to_lowercase().as_str() {
            "still" => ScenePreset::Still(StillScene::default()),
            "voyage" => ScenePreset::Voyage(VoyageScene::default()),
            other => bail!("unknown scene '{}' (expected still or voyage)", other),
        };

        if let Some(path) = &self.env_map {
            *preset.env_map_mut() = path.clone();
        }

        match preset.ship_mut() {
            Some(ship) => {
                if let Some(path) = &self.model {
                    ship.model_path = path.clone();
                }
                if let Some(scale) = self.model_scale {
                    if scale.is_nan() || scale <= 0.0 {
                        bail!("--model-scale must be positive, got {}", scale);
                    }
                    ship.scale = scale;
                }
            }
            None => {
                if self.model.is_some() || self.model_scale.is_some() {
                    log::warn!("--model/--model-scale only apply to the voyage scene");
                }
            }
        }

        Ok(preset)
    }

    /// Water parameters with color overrides applied
    pub fn water_params(&self) -> Result<WaterParams> {
        let mut params = WaterParams::default();
        if let Some(hex) = &self.depth_color {
            params.depth_color = hex.parse::<Rgb>().context("invalid --depth-color")?;
        }
        if let Some(hex) = &self.surface_color {
            params.surface_color = hex.parse::<Rgb>().context("invalid --surface-color")?;
        }
        Ok(params)
    }

    /// Water plane geometry with the segment override applied
    pub fn water_mesh(&self) -> WaterMesh {
        let mut mesh = WaterMesh::default();
        if let Some(segments) = self.segments {
            mesh.segments = segments.max(1);
        }
        mesh
    }

    /// Render configuration with window size overrides applied
    pub fn render_config(&self) -> RenderConfig {
        let mut config = RenderConfig::default();
        if let Some(width) = self.width {
            config.window_width = width.max(1);
        }
        if let Some(height) = self.height {
            config.window_height = height.max(1);
        }
        config
    }

    /// Create recording configuration if recording mode is enabled
    pub fn create_recording_config(&self) -> Result<Option<RecordingConfig>> {
        let Some(duration) = self.record else {
            return Ok(None);
        };
        if duration.is_nan() || duration <= 0.0 {
            bail!("--record needs a positive duration, got {}", duration);
        }

        let config = RecordingConfig::new(duration);

        // Create output directories
        std::fs::create_dir_all(config.frames_dir())
            .with_context(|| format!("failed to create {}", config.frames_dir()))?;

        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("ragingsea").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_to_still_scene() {
        let args = parse(&[]);
        let preset = args.parse_scene_preset().unwrap();
        assert_eq!(preset.name(), "still");
        assert!(preset.ship().is_none());
        assert!(!args.hide_panel);
        assert!(args.create_recording_config().unwrap().is_none());
    }

    #[test]
    fn test_voyage_scene_takes_model_overrides() {
        let args = parse(&[
            "--scene",
            "Voyage",
            "--model",
            "boats/dinghy.gltf",
            "--model-scale",
            "0.5",
        ]);
        let preset = args.parse_scene_preset().unwrap();
        let ship = preset.ship().unwrap();
        assert_eq!(ship.model_path, PathBuf::from("boats/dinghy.gltf"));
        assert_eq!(ship.scale, 0.5);
        assert!(preset.camera().lock_vertical);
    }

    #[test]
    fn test_unknown_scene_is_an_error() {
        let args = parse(&["--scene", "stormy"]);
        assert!(args.parse_scene_preset().is_err());
    }

    #[test]
    fn test_rejects_non_positive_model_scale() {
        let args = parse(&["--scene", "voyage", "--model-scale", "0"]);
        assert!(args.parse_scene_preset().is_err());
    }

    #[test]
    fn test_env_map_override() {
        let args = parse(&["--env-map", "sky.hdr"]);
        let preset = args.parse_scene_preset().unwrap();
        assert_eq!(preset.env_map(), &PathBuf::from("sky.hdr"));
    }

    #[test]
    fn test_color_overrides() {
        let args = parse(&["--depth-color", "#000000", "--surface-color", "ffffff"]);
        let params = args.water_params().unwrap();
        assert_eq!(params.depth_color, Rgb::BLACK);
        assert_eq!(params.surface_color, Rgb([1.0, 1.0, 1.0]));

        let bad = parse(&["--depth-color", "blue"]);
        assert!(bad.water_params().is_err());
    }

    #[test]
    fn test_mesh_and_window_overrides() {
        let args = parse(&["--segments", "0", "--width", "640", "--height", "480"]);
        assert_eq!(args.water_mesh().segments, 1);
        let config = args.render_config();
        assert_eq!((config.window_width, config.window_height), (640, 480));
    }

    #[test]
    fn test_record_rejects_non_positive_duration() {
        let args = parse(&["--record", "0"]);
        assert!(args.create_recording_config().is_err());
    }
}
