//! Noise functions shared by the displacement program.
//!
//! `ClassicNoise` is 3D gradient noise built on a 289 permutation polynomial.
//! The WGSL library in `shaders/noise.wgsl` evaluates the same function on the
//! GPU; this module is the CPU reference. It implements [`NoiseFn`] so any
//! source from the `noise` crate can stand in for it.

use glam::{DVec2, DVec3, DVec4, Vec2, Vec3};
use noise::NoiseFn;

/// Output gain applied to the raw gradient noise
const CLASSIC_NOISE_GAIN: f64 = 2.2;

/// Classic 3D gradient noise, deterministic and continuous.
///
/// Returns 0 at every integer lattice point.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicNoise;

impl ClassicNoise {
    pub fn new() -> Self {
        Self
    }

    /// Sample at a single-precision position
    pub fn sample(&self, p: Vec3) -> f32 {
        classic_noise(p.as_dvec3()) as f32
    }
}

impl NoiseFn<f64, 3> for ClassicNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        classic_noise(DVec3::from_array(point))
    }
}

fn fract3(v: DVec3) -> DVec3 {
    v - v.floor()
}

fn fract4(v: DVec4) -> DVec4 {
    v - v.floor()
}

fn mod289_3(x: DVec3) -> DVec3 {
    x - (x / 289.0).floor() * 289.0
}

fn mod289_4(x: DVec4) -> DVec4 {
    x - (x / 289.0).floor() * 289.0
}

fn permute(x: DVec4) -> DVec4 {
    mod289_4((x * 34.0 + DVec4::ONE) * x)
}

fn taylor_inv_sqrt(r: DVec4) -> DVec4 {
    DVec4::splat(1.792_842_914_001_59) - r * 0.853_734_720_953_14
}

fn fade(t: DVec3) -> DVec3 {
    t * t * t * (t * (t * 6.0 - DVec3::splat(15.0)) + DVec3::splat(10.0))
}

/// 1 where `x >= edge`, else 0
fn step4(edge: DVec4, x: DVec4) -> DVec4 {
    DVec4::select(x.cmplt(edge), DVec4::ZERO, DVec4::ONE)
}

/// Gradients for one z-layer of the lattice cell, in g00, g10, g01, g11 order
fn layer_gradients(ixy: DVec4) -> [DVec3; 4] {
    let mut gx = ixy / 7.0;
    let mut gy = fract4(gx.floor() / 7.0) - DVec4::splat(0.5);
    gx = fract4(gx);
    let gz = DVec4::splat(0.5) - gx.abs() - gy.abs();
    let sz = step4(gz, DVec4::ZERO);
    gx -= sz * (step4(DVec4::ZERO, gx) - DVec4::splat(0.5));
    gy -= sz * (step4(DVec4::ZERO, gy) - DVec4::splat(0.5));

    let g = [
        DVec3::new(gx.x, gy.x, gz.x),
        DVec3::new(gx.y, gy.y, gz.y),
        DVec3::new(gx.z, gy.z, gz.z),
        DVec3::new(gx.w, gy.w, gz.w),
    ];
    let norm = taylor_inv_sqrt(DVec4::new(
        g[0].dot(g[0]),
        g[2].dot(g[2]),
        g[1].dot(g[1]),
        g[3].dot(g[3]),
    ));
    [g[0] * norm.x, g[1] * norm.z, g[2] * norm.y, g[3] * norm.w]
}

/// Classic gradient noise at `p`, scaled by [`CLASSIC_NOISE_GAIN`]
pub fn classic_noise(p: DVec3) -> f64 {
    let pi0 = mod289_3(p.floor());
    let pi1 = mod289_3(p.floor() + DVec3::ONE);
    let pf0 = fract3(p);
    let pf1 = pf0 - DVec3::ONE;

    let ix = DVec4::new(pi0.x, pi1.x, pi0.x, pi1.x);
    let iy = DVec4::new(pi0.y, pi0.y, pi1.y, pi1.y);
    let iz0 = DVec4::splat(pi0.z);
    let iz1 = DVec4::splat(pi1.z);

    let ixy = permute(permute(ix) + iy);
    let [g000, g100, g010, g110] = layer_gradients(permute(ixy + iz0));
    let [g001, g101, g011, g111] = layer_gradients(permute(ixy + iz1));

    let n000 = g000.dot(pf0);
    let n100 = g100.dot(DVec3::new(pf1.x, pf0.y, pf0.z));
    let n010 = g010.dot(DVec3::new(pf0.x, pf1.y, pf0.z));
    let n110 = g110.dot(DVec3::new(pf1.x, pf1.y, pf0.z));
    let n001 = g001.dot(DVec3::new(pf0.x, pf0.y, pf1.z));
    let n101 = g101.dot(DVec3::new(pf1.x, pf0.y, pf1.z));
    let n011 = g011.dot(DVec3::new(pf0.x, pf1.y, pf1.z));
    let n111 = g111.dot(pf1);

    let fade_xyz = fade(pf0);
    let n_z = DVec4::new(n000, n100, n010, n110)
        .lerp(DVec4::new(n001, n101, n011, n111), fade_xyz.z);
    let n_yz = DVec2::new(n_z.x, n_z.y).lerp(DVec2::new(n_z.z, n_z.w), fade_xyz.y);
    let n_xyz = n_yz.x + (n_yz.y - n_yz.x) * fade_xyz.x;

    CLASSIC_NOISE_GAIN * n_xyz
}

/// Pseudo-random hash of a 2D coordinate in `[0, 1)`
pub fn hash_random(st: DVec2) -> f64 {
    let v = st.dot(DVec2::new(12.9898, 78.233)).sin() * 43_758.545_312_3;
    v - v.floor()
}

/// Smoothly interpolated 2D value noise in `[0, 1]`, used for dithering
pub fn value_noise(st: Vec2) -> f32 {
    let st = st.as_dvec2();
    let i = st.floor();
    let f = st - i;

    let a = hash_random(i);
    let b = hash_random(i + DVec2::new(1.0, 0.0));
    let c = hash_random(i + DVec2::new(0.0, 1.0));
    let d = hash_random(i + DVec2::new(1.0, 1.0));

    let u = f * f * (DVec2::splat(3.0) - f * 2.0);
    let value = a + (b - a) * u.x + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y;
    value as f32
}
