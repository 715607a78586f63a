//! CLARION beams - animated light-beam background

pub mod beams;
pub mod camera;
pub mod cli;
pub mod error;
pub mod noise;
pub mod params;
pub mod rendering;
pub mod shader;

pub use error::{BeamsError, Result};
