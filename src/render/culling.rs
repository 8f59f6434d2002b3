//! Back-face culling in camera space.

use crate::math::vec3::Vec3;
use crate::mesh::Triangle;

/// Returns true if the triangle faces away from the camera (or has no area).
///
/// Triangles are wound clockwise when seen from the front, so
/// `(v2 - v1) x (v3 - v1)` points out of the visible side. In camera space the
/// camera sits at the origin, so the vector from the centroid to the camera is
/// just the negated centroid.
pub fn is_back_face(triangle: &Triangle, camera_space: &[Vec3]) -> bool {
    let [a, b, c] = triangle.positions().map(|i| camera_space[i]);

    let centroid = (a + b + c) / 3.0;
    let to_camera = -centroid;
    let normal = (b - a).cross(c - a);

    to_camera.dot(normal) <= 0.0
}
