//! Stacked vertical strip mesh with per-strip randomized UV offsets.

use bytemuck::{Pod, Zeroable};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{BeamsError, Result};
use crate::params::StripLayout;

/// Upper bound (exclusive) of the random per-strip UV offsets
pub const UV_OFFSET_RANGE: f32 = 300.0;

/// Vertex data for the strip mesh (position + UV + construction normal)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

/// One vertical plane segment of the mesh
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Strip {
    /// Left edge of the strip (world units)
    pub x_offset: f32,
    pub width: f32,
    pub height: f32,
    /// Random UV offset pair, each component in `[0, UV_OFFSET_RANGE)`
    pub uv_offset: [f32; 2],
}

impl Strip {
    /// Right edge of the strip (world units)
    pub fn x_end(&self) -> f32 {
        self.x_offset + self.width
    }
}

/// Immutable strip mesh: vertices and indices are fixed at construction
#[derive(Debug, Clone)]
pub struct StripMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    strips: Vec<Strip>,
    segments: usize,
}

impl StripMesh {
    /// Vertex and index counts for `count` strips of `segments` height steps
    pub fn expected_counts(count: usize, segments: usize) -> Option<(usize, usize)> {
        let vertices = count.checked_mul(segments.checked_add(1)?)?.checked_mul(2)?;
        let indices = count.checked_mul(segments)?.checked_mul(6)?;
        Some((vertices, indices))
    }

    /// Build the mesh, drawing per-strip UV offsets from `rng`
    pub fn build<R: Rng + ?Sized>(layout: &StripLayout, rng: &mut R) -> Result<Self> {
        layout.validate()?;

        let too_large = || BeamsError::MeshTooLarge {
            strips: layout.count,
            segments: layout.segments,
        };
        let (vertex_count, index_count) =
            Self::expected_counts(layout.count, layout.segments).ok_or_else(too_large)?;
        if u32::try_from(vertex_count).is_err() {
            return Err(too_large());
        }

        let segments = layout.segments;
        let mut vertices = Vec::with_capacity(vertex_count);
        let mut indices = Vec::with_capacity(index_count);
        let mut strips = Vec::with_capacity(layout.count);

        // Lay strips out left to right, centred on the origin
        let x_offset_base = -layout.total_width() / 2.0;
        let normal = [0.0, 0.0, 1.0];

        for i in 0..layout.count {
            let strip = Strip {
                x_offset: x_offset_base + i as f32 * (layout.width + layout.spacing),
                width: layout.width,
                height: layout.height,
                uv_offset: [
                    rng.gen_range(0.0..UV_OFFSET_RANGE),
                    rng.gen_range(0.0..UV_OFFSET_RANGE),
                ],
            };
            let [uv_x, uv_y_offset] = strip.uv_offset;

            for j in 0..=segments {
                let t = j as f32 / segments as f32;
                let y = layout.height * (t - 0.5);
                let uv_y = t + uv_y_offset;

                let a = vertices.len() as u32;
                vertices.push(Vertex {
                    position: [strip.x_offset, y, 0.0],
                    uv: [uv_x, uv_y],
                    normal,
                });
                vertices.push(Vertex {
                    position: [strip.x_end(), y, 0.0],
                    uv: [uv_x + 1.0, uv_y],
                    normal,
                });

                // Quad between this step and the next, counter-clockwise from +Z
                if j < segments {
                    let (b, c, d) = (a + 1, a + 2, a + 3);
                    indices.extend_from_slice(&[a, b, c, c, b, d]);
                }
            }

            strips.push(strip);
        }

        debug!(
            "Built strip mesh: {} strips, {} vertices, {} indices",
            strips.len(),
            vertices.len(),
            indices.len()
        );

        Ok(Self {
            vertices,
            indices,
            strips,
            segments,
        })
    }

    /// Build with a deterministic generator seeded from `seed`
    pub fn with_seed(layout: &StripLayout, seed: u64) -> Result<Self> {
        Self::build(layout, &mut StdRng::seed_from_u64(seed))
    }

    /// Build with offsets drawn from the thread-local entropy source
    pub fn from_entropy(layout: &StripLayout) -> Result<Self> {
        Self::build(layout, &mut rand::thread_rng())
    }

    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(count: usize, segments: usize) -> StripLayout {
        StripLayout {
            count,
            segments,
            ..Default::default()
        }
    }

    #[test]
    fn test_counts_follow_strips_and_segments() {
        for count in 1..6 {
            for segments in [1, 2, 7, 100] {
                let mesh = StripMesh::with_seed(&layout(count, segments), 1).unwrap();
                assert_eq!(mesh.vertices.len(), 2 * count * (segments + 1));
                assert_eq!(mesh.indices.len(), 6 * count * segments);
                assert_eq!(mesh.triangle_count(), 2 * count * segments);
                assert_eq!(mesh.strips().len(), count);
            }
        }
    }

    #[test]
    fn test_indices_stay_in_bounds() {
        let mesh = StripMesh::with_seed(&layout(4, 9), 3).unwrap();
        let vertex_count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < vertex_count));
    }

    #[test]
    fn test_quads_never_bridge_strips() {
        let mesh = StripMesh::with_seed(&layout(3, 4), 5).unwrap();
        let per_strip = 2 * (mesh.segments() + 1) as u32;
        for tri in mesh.indices.chunks(3) {
            let strip = tri[0] / per_strip;
            assert!(tri.iter().all(|&i| i / per_strip == strip));
        }
    }

    #[test]
    fn test_winding_faces_positive_z() {
        let mesh = StripMesh::with_seed(&layout(2, 3), 9).unwrap();
        for tri in mesh.indices.chunks(3) {
            let p = |i: u32| glam::Vec3::from_array(mesh.vertices[i as usize].position);
            let n = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
            assert!(n.z > 0.0);
        }
    }

    #[test]
    fn test_layout_is_centred() {
        for (count, spacing) in [(1, 0.0), (12, 0.0), (5, 0.75)] {
            let mesh = StripMesh::with_seed(
                &StripLayout {
                    count,
                    spacing,
                    ..Default::default()
                },
                11,
            )
            .unwrap();
            let strips = mesh.strips();
            let first = strips[0].x_offset;
            let last = strips[strips.len() - 1].x_end();
            assert!((first + last).abs() < 1e-4, "{first} + {last} != 0");
        }
    }

    #[test]
    fn test_vertical_extent_and_uvs() {
        let l = StripLayout {
            count: 1,
            height: 10.0,
            segments: 4,
            ..Default::default()
        };
        let mesh = StripMesh::with_seed(&l, 2).unwrap();
        let [ux, uy] = mesh.strips()[0].uv_offset;

        let bottom = &mesh.vertices[0..2];
        let top = &mesh.vertices[8..10];
        assert_eq!(bottom[0].position[1], -5.0);
        assert_eq!(top[1].position[1], 5.0);

        assert_eq!(bottom[0].uv, [ux, uy]);
        assert_eq!(bottom[1].uv, [ux + 1.0, uy]);
        assert_eq!(top[0].uv, [ux, 1.0 + uy]);
    }

    #[test]
    fn test_uv_offsets_in_range() {
        let mesh = StripMesh::with_seed(&layout(50, 1), 77).unwrap();
        for strip in mesh.strips() {
            for c in strip.uv_offset {
                assert!((0.0..UV_OFFSET_RANGE).contains(&c));
            }
        }
    }

    #[test]
    fn test_invalid_layouts_fail_fast() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            StripMesh::build(&layout(0, 10), &mut rng).unwrap_err(),
            BeamsError::InvalidStripCount(0)
        );
        assert_eq!(
            StripMesh::build(&layout(3, 0), &mut rng).unwrap_err(),
            BeamsError::InvalidSegmentCount(0)
        );
    }

    #[test]
    fn test_oversized_mesh_is_rejected() {
        let err = StripMesh::with_seed(&layout(1 << 20, 1 << 12), 0).unwrap_err();
        assert!(matches!(err, BeamsError::MeshTooLarge { .. }));
    }
}
