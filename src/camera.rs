//! Fixed perspective camera and scene transforms for the beams background.

use glam::{Mat4, Vec3};

use crate::params::{CameraParams, SceneParams};

/// Stationary camera looking at the strip group
pub struct SceneCamera {
    params: CameraParams,
}

impl SceneCamera {
    pub fn new(params: CameraParams) -> Self {
        Self { params }
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::from_array(self.params.position)
    }

    /// Create view-projection matrix for the given aspect ratio
    pub fn view_proj(&self, aspect_ratio: f32) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye(), Vec3::from_array(self.params.target), Vec3::Y);
        let proj = Mat4::perspective_rh(
            self.params.fov_degrees.to_radians(),
            aspect_ratio,
            self.params.near_plane,
            self.params.far_plane,
        );
        proj * view
    }
}

/// Model matrix of the strip group: rotation about the view axis
pub fn group_transform(rotation_degrees: f32) -> Mat4 {
    Mat4::from_rotation_z(rotation_degrees.to_radians())
}

/// Unit vector pointing from the origin towards the directional light
pub fn light_direction(scene: &SceneParams) -> Vec3 {
    Vec3::from_array(scene.light_position)
        .try_normalize()
        .unwrap_or(Vec3::Z)
}
