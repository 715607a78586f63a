//! Scene, rendering and recording configuration.

/// Perspective camera placement
#[derive(Debug, Clone, PartialEq)]
pub struct CameraParams {
    /// Eye position (world units)
    pub position: [f32; 3],

    /// Look-at target (world units)
    pub target: [f32; 3],

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane
    pub near_plane: f32,

    /// Far clipping plane
    pub far_plane: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 10.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 50.0,
            near_plane: 0.1,
            far_plane: 1000.0,
        }
    }
}

/// Scene lighting and atmosphere
#[derive(Debug, Clone, PartialEq)]
pub struct SceneParams {
    /// Directional light position; the light shines towards the origin
    pub light_position: [f32; 3],

    /// Fog colour (linear RGB), also used as the clear colour
    pub fog_color: [f32; 3],

    /// View depth where fog starts
    pub fog_near: f32,

    /// View depth where fog is opaque
    pub fog_far: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            light_position: [0.0, 10.0, 5.0],
            fog_color: [0.0, 0.0, 0.0],
            // Strips sit ~10 units from the eye; fog only eats the far edges
            fog_near: 20.0,
            fog_far: 60.0,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    pub camera: CameraParams,

    pub scene: SceneParams,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            camera: CameraParams::default(),
            scene: SceneParams::default(),
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
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
        (self.duration_secs * self.fps as f32).ceil() as usize
    }

    /// Fixed timestep between captured frames (seconds)
    pub fn frame_delta_s(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> String {
        format!("{}/frames", self.output_dir)
    }

    /// Path of a numbered frame
    pub fn frame_path(&self, frame_num: usize) -> String {
        format!("{}/frame_{:05}.png", self.frames_dir(), frame_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_frame_math() {
        let config = RecordingConfig::new(2.5);
        assert_eq!(config.total_frames(), 150);
        assert!((config.frame_delta_s() - 1.0 / 60.0).abs() < 1e-6);
        assert_eq!(config.frame_path(7), "recording/frames/frame_00007.png");
    }

    #[test]
    fn test_aspect_ratio_survives_zero_height() {
        let config = RenderConfig {
            window_height: 0,
            ..Default::default()
        };
        assert!(config.aspect_ratio().is_finite());
    }
}
