//! Perspective projection and screen mapping.
//!
//! Takes camera-space points through clip space and perspective division to
//! pixel coordinates. The viewport size is always passed in explicitly.

use crate::camera::Camera;
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// Size of the render target in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Height over width, applied as an X scale to undo non-square pixels.
    pub fn inverse_aspect(&self) -> f32 {
        self.height as f32 / self.width as f32
    }
}

/// Builds the perspective matrix for a camera and viewport.
///
/// ```text
/// | a*f  0   0        0          |
/// | 0    f   0        0          |
/// | 0    0   zf/(zf-zn)  -zf*zn/(zf-zn) |
/// | 0    0   1        0          |
/// ```
///
/// with `f = 1 / tan(fov / 2)` and `a = height / width`. The bottom row copies
/// camera-space Z into W, which drives the perspective division.
pub fn projection_matrix(camera: &Camera, viewport: Viewport) -> Mat4 {
    let f = 1.0 / (camera.fov_degrees().to_radians() / 2.0).tan();
    let a = viewport.inverse_aspect();
    let (near, far) = (camera.z_near(), camera.z_far());
    let z_scale = far / (far - near);

    Mat4::new([
        [a * f, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, z_scale, -z_scale * near],
        [0.0, 0.0, 1.0, 0.0],
    ])
}

/// Divides x, y and z by w.
///
/// Returns `None` when `w` is not safely positive: the point sits on or
/// behind the camera's eye plane and has no meaningful projection.
#[inline]
pub fn perspective_divide(clip: Vec4) -> Option<Vec3> {
    if clip.w <= f32::EPSILON {
        return None;
    }
    Some(Vec3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w))
}

/// Maps normalized device coordinates to pixels, flipping Y so it grows downward.
#[inline]
pub fn ndc_to_screen(ndc: Vec3, viewport: Viewport) -> Vec2 {
    let x = (ndc.x + 1.0) / 2.0 * viewport.width as f32;
    let y = (1.0 - ndc.y) / 2.0 * viewport.height as f32;
    Vec2::new(x, y)
}

/// Full camera-space to screen-space projection for one point.
#[inline]
pub fn project(projection: &Mat4, camera_space: Vec3, viewport: Viewport) -> Option<Vec2> {
    perspective_divide(*projection * Vec4::point(camera_space)).map(|ndc| ndc_to_screen(ndc, viewport))
}
