//! Per-vertex coordinate pipeline.
//!
//! ```text
//! model space --Transform--> world space --Camera--> camera space
//!     --projection--> clip space --divide by w--> NDC --viewport--> screen
//! ```
//!
//! Every position in a mesh pool is pushed through once per frame. The results
//! are kept in two arrays indexed exactly like the mesh's position pool.

use crate::camera::Camera;
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::mesh::Triangle;
use crate::model::Model;
use crate::projection::{self, Viewport};

use super::rasterizer::ScreenTriangle;

/// Camera-space and screen-space positions of one model for one frame.
#[derive(Debug, Clone, Default)]
pub struct ProjectedVertices {
    /// Used for back-face culling and depth interpolation.
    pub camera_space: Vec<Vec3>,
    /// `None` where the vertex is on or behind the camera's eye plane.
    pub screen: Vec<Option<Vec2>>,
}

impl ProjectedVertices {
    /// Gathers everything the rasterizer needs for one triangle.
    ///
    /// Returns `None` if any corner failed to project.
    pub fn screen_triangle(&self, triangle: &Triangle, uvs: &[Vec2]) -> Option<ScreenTriangle> {
        let [a, b, c] = triangle.positions();
        Some(ScreenTriangle {
            points: [self.screen[a]?, self.screen[b]?, self.screen[c]?],
            depths: [
                self.camera_space[a].z,
                self.camera_space[b].z,
                self.camera_space[c].z,
            ],
            uvs: triangle.uvs().map(|i| uvs[i]),
        })
    }
}

/// Transforms every position of `model` into camera and screen space.
pub fn project_model(
    model: &Model,
    camera: &Camera,
    projection: &Mat4,
    viewport: Viewport,
) -> ProjectedVertices {
    let world = model.transform().to_matrix();
    let view = camera.view_matrix();
    let positions = model.mesh().positions();

    let mut out = ProjectedVertices {
        camera_space: Vec::with_capacity(positions.len()),
        screen: Vec::with_capacity(positions.len()),
    };

    for &position in positions {
        let v_world = world.transform_point(position);
        let v_camera = view.transform_point(v_world);
        out.camera_space.push(v_camera);
        out.screen
            .push(projection::project(projection, v_camera, viewport));
    }

    out
}
