//! Parameter definitions with documented units and defaults.
//!
//! Defaults reproduce the dashboard background: twelve 2×15 strips,
//! speed 2, noise intensity 1.75, noise scale 0.2, white light, no rotation.

mod beams;
mod render;

// Re-export all types
pub use beams::{BeamsConfig, LightColor, MaterialParams, StripLayout};
pub use render::{CameraParams, RecordingConfig, RenderConfig, SceneParams};
