//! Model placement in world space.
//!
//! Provides a [`Transform`] struct with a fluent API for managing position,
//! rotation (Euler angles) and scale.

use crate::math::{mat4::Mat4, vec3::Vec3};

/// A 3D transform with position, rotation (Euler angles) and scale.
///
/// Mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position(Vec3::new(0.0, 0.0, 12.0))
///     .rotate(Vec3::new(0.1, 0.1, 0.0))
///     .set_scale_uniform(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3, // radians, applied X then Y then Z (Rz * Ry * Rx)
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with default values (position=0, rotation=0, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    /// Get the rotation (Euler angles in radians).
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Set the rotation (Euler angles in radians).
    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Add a delta rotation (Euler angles in radians).
    pub fn rotate(&mut self, delta: Vec3) -> &mut Self {
        self.rotation = self.rotation + delta;
        self
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Set uniform scale (same value for x, y, z).
    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    /// Generate the model-to-world matrix.
    ///
    /// Order: Translation * Rotation(ZYX) * Scale
    /// (scale applied first, then rotation, then translation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.position)
            * Mat4::rotation_zyx(self.rotation)
            * Mat4::scaling(self.scale)
    }

    /// Transform a model-space point into world space.
    #[inline]
    pub fn apply(&self, v: Vec3) -> Vec3 {
        self.to_matrix().transform_point(v)
    }
}
