//! Command-line argument parsing.

use clap::Parser;
use log::{info, warn};

use crate::error::Result;
use crate::params::{BeamsConfig, RecordingConfig, RenderConfig, StripLayout};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "clarion-beams")]
#[command(about = "Animated light-beam background", long_about = None)]
pub struct Args {
    /// Width of each strip (world units)
    #[arg(long, value_name = "UNITS", default_value_t = 2.0)]
    pub beam_width: f32,

    /// Height of each strip (world units)
    #[arg(long, value_name = "UNITS", default_value_t = 15.0)]
    pub beam_height: f32,

    /// Number of strips
    #[arg(long, value_name = "COUNT", default_value_t = 12)]
    pub beam_number: usize,

    /// Gap between neighbouring strips (world units)
    #[arg(long, value_name = "UNITS", default_value_t = 0.0)]
    pub spacing: f32,

    /// Vertical subdivisions per strip
    #[arg(long, value_name = "COUNT", default_value_t = 100)]
    pub segments: usize,

    /// Light colour as a CSS hex string (#rgb or #rrggbb)
    #[arg(long, value_name = "HEX", default_value = "#ffffff")]
    pub light_color: String,

    /// Animation speed multiplier
    #[arg(long, default_value_t = 2.0)]
    pub speed: f32,

    /// Strength of the anti-banding dither
    #[arg(long, default_value_t = 1.75)]
    pub noise_intensity: f32,

    /// Spatial scale of the displacement noise
    #[arg(long, default_value_t = 0.2)]
    pub scale: f32,

    /// Rotation of the strip group (degrees)
    #[arg(long, value_name = "DEGREES", default_value_t = 0.0, allow_negative_numbers = true)]
    pub rotation: f32,

    /// Seed for per-strip texture offsets (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Record frames to disk (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 1280)]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 720)]
    pub height: u32,
}

impl Args {
    /// Build and validate the beams configuration
    pub fn beams_config(&self) -> Result<BeamsConfig> {
        let config = BeamsConfig {
            layout: StripLayout {
                count: self.beam_number,
                width: self.beam_width,
                height: self.beam_height,
                spacing: self.spacing,
                segments: self.segments,
            },
            light_color: self.light_color.parse()?,
            speed: self.speed,
            noise_intensity: self.noise_intensity,
            scale: self.scale,
            rotation_degrees: self.rotation,
            seed: self.seed,
            ..Default::default()
        };
        config.validate()?;

        if config.speed <= 0.0 {
            warn!("Speed {} does not move the beams forward", config.speed);
        }
        Ok(config)
    }

    /// Window configuration
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width.max(1),
            window_height: self.height.max(1),
            ..Default::default()
        }
    }

    /// Create recording configuration if recording mode is enabled
    pub fn recording_config(&self) -> std::io::Result<Option<RecordingConfig>> {
        let Some(duration) = self.record else {
            return Ok(None);
        };
        if !duration.is_finite() || duration <= 0.0 {
            warn!("Ignoring --record {}: duration must be positive", duration);
            return Ok(None);
        }

        let config = RecordingConfig::new(duration);

        // Create output directories
        std::fs::create_dir_all(config.frames_dir())?;

        info!(
            "Recording {} frames at {} fps to {}",
            config.total_frames(),
            config.fps,
            config.frames_dir()
        );
        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BeamsError;
    use crate::params::LightColor;

    #[test]
    fn test_defaults_match_config_defaults() {
        let args = Args::parse_from(["clarion-beams"]);
        let config = args.beams_config().unwrap();
        assert_eq!(config, BeamsConfig::default());
        assert!(args.recording_config().unwrap().is_none());
    }

    #[test]
    fn test_flags_map_onto_config() {
        let args = Args::parse_from([
            "clarion-beams",
            "--beam-number",
            "4",
            "--beam-width",
            "1.5",
            "--segments",
            "10",
            "--light-color",
            "#000",
            "--rotation",
            "-30",
            "--seed",
            "7",
            "--width",
            "800",
        ]);
        let config = args.beams_config().unwrap();
        assert_eq!(config.layout.count, 4);
        assert_eq!(config.layout.width, 1.5);
        assert_eq!(config.layout.segments, 10);
        assert_eq!(config.light_color, LightColor::from_srgb8(0, 0, 0));
        assert_eq!(config.rotation_degrees, -30.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(args.render_config().window_width, 800);
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let args = Args::parse_from(["clarion-beams", "--light-color", "tomato"]);
        assert_eq!(
            args.beams_config().unwrap_err(),
            BeamsError::InvalidColor("tomato".to_string())
        );
    }

    #[test]
    fn test_zero_strips_is_rejected() {
        let args = Args::parse_from(["clarion-beams", "--beam-number", "0"]);
        assert_eq!(
            args.beams_config().unwrap_err(),
            BeamsError::InvalidStripCount(0)
        );
    }

    #[test]
    fn test_non_positive_record_duration_is_ignored() {
        let args = Args::parse_from(["clarion-beams", "--record", "0"]);
        assert!(args.recording_config().unwrap().is_none());
    }
}
