//! CPU reference of the beam displacement program.
//!
//! Mirrors the vertex and fragment insertions built by `shader::beams`: every
//! vertex is pushed along local z by a noise sample, the normal is rebuilt
//! with forward differences, and fragments are darkened by a dither term.

use glam::{Vec2, Vec3};
use noise::NoiseFn;

use super::mesh::{StripMesh, Vertex};
use crate::noise::{value_noise, ClassicNoise};
use crate::params::BeamsConfig;

/// Finite-difference step used when rebuilding normals (both axes)
pub const NORMAL_EPSILON: f32 = 0.01;

/// Multiplier from shader time to the noise z coordinate
pub const TIME_TO_NOISE_Z: f32 = 3.0;

/// Divisor applied to the dither sample before `noise_intensity`
pub const DITHER_DIVISOR: f32 = 15.0;

/// Displacement field evaluated over the strip mesh
#[derive(Debug, Clone)]
pub struct Displacement<N = ClassicNoise> {
    noise: N,
    speed: f32,
    scale: f32,
    noise_intensity: f32,
}

impl Displacement<ClassicNoise> {
    /// Displacement with the same noise the GPU program uses
    pub fn from_config(config: &BeamsConfig) -> Self {
        Self::with_noise(
            ClassicNoise::new(),
            config.speed,
            config.scale,
            config.noise_intensity,
        )
    }
}

impl<N: NoiseFn<f64, 3>> Displacement<N> {
    pub fn with_noise(noise: N, speed: f32, scale: f32, noise_intensity: f32) -> Self {
        Self {
            noise,
            speed,
            scale,
            noise_intensity,
        }
    }

    /// Local-z offset for a vertex at `position` with texture coordinate `uv`.
    ///
    /// Noise is sampled at `(0, y - uv.y, z + time * speed * 3) * scale`, so
    /// the per-strip UV offset decides which slice of the field a strip reads.
    pub fn offset(&self, position: Vec3, uv: Vec2, time: f32) -> f32 {
        let p = Vec3::new(
            position.x * 0.0,
            position.y - uv.y,
            position.z + time * self.speed * TIME_TO_NOISE_Z,
        ) * self.scale;
        self.noise.get(p.as_dvec3().to_array()) as f32
    }

    /// Displaced position
    pub fn position(&self, position: Vec3, uv: Vec2, time: f32) -> Vec3 {
        let mut moved = position;
        moved.z += self.offset(position, uv, time);
        moved
    }

    /// Surface normal of the displaced strip, by forward differences in x and -y
    pub fn normal(&self, position: Vec3, uv: Vec2, time: f32) -> Vec3 {
        let current = self.position(position, uv, time);
        let next_x = self.position(position + Vec3::new(NORMAL_EPSILON, 0.0, 0.0), uv, time);
        let next_y = self.position(position + Vec3::new(0.0, -NORMAL_EPSILON, 0.0), uv, time);

        let tangent_x = (next_x - current).normalize();
        let tangent_y = (next_y - current).normalize();
        tangent_y.cross(tangent_x).normalize()
    }

    /// Amount subtracted from each colour channel at `frag_coord` (pixels)
    pub fn dither(&self, frag_coord: Vec2) -> f32 {
        value_noise(frag_coord) / DITHER_DIVISOR * self.noise_intensity
    }

    /// Displace every vertex of `mesh` at `time`, rebuilding normals
    pub fn displace_mesh(&self, mesh: &StripMesh, time: f32) -> Vec<Vertex> {
        mesh.vertices
            .iter()
            .map(|v| {
                let position = Vec3::from_array(v.position);
                let uv = Vec2::from_array(v.uv);
                Vertex {
                    position: self.position(position, uv, time).to_array(),
                    uv: v.uv,
                    normal: self.normal(position, uv, time).to_array(),
                }
            })
            .collect()
    }
}
