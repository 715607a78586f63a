//! Error type shared by geometry construction, shader composition and rendering.

use thiserror::Error;

/// Errors raised while building or rendering the beams.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BeamsError {
    /// Strip count must be at least one.
    #[error("strip count must be >= 1, got {0}")]
    InvalidStripCount(usize),

    /// Height segment count must be at least one.
    #[error("height segment count must be >= 1, got {0}")]
    InvalidSegmentCount(usize),

    /// A width, height, spacing or shading parameter is out of range.
    #[error("invalid {name}: {value}")]
    InvalidDimension { name: &'static str, value: f32 },

    /// Vertex indices would not fit in a 32-bit index buffer.
    #[error("mesh with {strips} strips and {segments} segments exceeds the u32 index range")]
    MeshTooLarge { strips: usize, segments: usize },

    /// Light colour string is not a CSS hex colour.
    #[error("invalid colour '{0}' (expected #rgb or #rrggbb)")]
    InvalidColor(String),

    /// Shader template has no marker line for an insertion point.
    #[error("shader template '{template}' has no '{marker}' marker")]
    MissingInsertionPoint {
        template: String,
        marker: &'static str,
    },

    /// Shader template carries a marker line more than once.
    #[error("shader template '{template}' has {count} '{marker}' markers")]
    DuplicateInsertionPoint {
        template: String,
        marker: &'static str,
        count: usize,
    },

    /// GPU setup failure (surface, adapter or device).
    #[error("render setup failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, BeamsError>;
