//! Procedural beam strips: geometry, displacement and animation.

mod displacement;
mod mesh;
mod system;

// Re-export public types
pub use displacement::{Displacement, DITHER_DIVISOR, NORMAL_EPSILON, TIME_TO_NOISE_Z};
pub use mesh::{Strip, StripMesh, Vertex, UV_OFFSET_RANGE};
pub use system::{AnimationClock, BeamsSystem, TIME_SCALE};
