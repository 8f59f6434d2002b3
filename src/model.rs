//! Model instances placed in the scene.
//!
//! A [`Model`] pairs a shared, immutable [`Mesh`] with its own [`Transform`].
//! Any number of models may reference the same mesh; each one is positioned,
//! rotated and scaled independently.

use std::sync::Arc;

use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::transform::Transform;

#[derive(Debug, Clone)]
pub struct Model {
    mesh: Arc<Mesh>,
    transform: Transform,
}

impl Model {
    /// Create a model at the origin with an identity transform.
    pub fn new(mesh: Arc<Mesh>) -> Self {
        Self::with_transform(mesh, Transform::default())
    }

    pub fn with_transform(mesh: Arc<Mesh>, transform: Transform) -> Self {
        Self { mesh, transform }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Get a reference to the model's world transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Get a mutable reference to the model's world transform.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Per-frame animation step: add `delta` (radians) to the rotation.
    pub fn spin(&mut self, delta: Vec3) {
        self.transform.rotate(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn models_share_one_mesh() {
        let mesh = Arc::new(Mesh::cube());
        let a = Model::new(Arc::clone(&mesh));
        let mut b = Model::new(Arc::clone(&mesh));
        b.transform_mut().set_position(Vec3::new(3.0, 0.0, 0.0));

        assert!(std::ptr::eq(a.mesh(), b.mesh()));
        assert_eq!(a.transform().position(), Vec3::ZERO);
        assert_eq!(Arc::strong_count(&mesh), 3);
    }

    #[test]
    fn spin_accumulates_rotation() {
        let mut model = Model::new(Arc::new(Mesh::cube()));
        model.spin(Vec3::new(0.1, 0.2, 0.0));
        model.spin(Vec3::new(0.1, 0.2, 0.0));
        assert_eq!(model.transform().rotation(), Vec3::new(0.2, 0.4, 0.0));
    }
}
