//! Rendering and recording configuration.

use super::color::Rgb;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Initial window width (logical pixels)
    pub window_width: u32,

    /// Initial window height (logical pixels)
    pub window_height: u32,

    /// Upper bound on device pixels per logical pixel
    pub max_pixel_ratio: f32,

    /// Background shown until (or instead of) the environment map
    pub background: Rgb,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            max_pixel_ratio: 2.0,
            background: Rgb::from_hex_u32(0xa8feff),
        }
    }
}

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for frames
    pub output_dir: String,

    /// Frame rate (FPS)
    pub fps: u32,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_dir: "recording".to_string(),
            fps: 60,
        }
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs * self.fps as f32).ceil().max(0.0) as usize
    }

    /// Fixed timestep between captured frames (seconds)
    pub fn frame_interval(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> String {
        format!("{}/frames", self.output_dir)
    }

    /// Path of a single captured frame
    pub fn frame_path(&self, frame_num: usize) -> String {
        format!("{}/frame_{:05}.png", self.frames_dir(), frame_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_frame_count() {
        let config = RecordingConfig::new(2.5);
        assert_eq!(config.total_frames(), 150);
        assert!((config.frame_interval() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_recording_paths() {
        let config = RecordingConfig::new(1.0);
        assert_eq!(config.frames_dir(), "recording/frames");
        assert_eq!(config.frame_path(7), "recording/frames/frame_00007.png");
    }
}
