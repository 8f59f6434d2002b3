//! A CPU software renderer for textured triangle meshes.
//!
//! Models are pushed through model, view and projection transforms,
//! back-face culled, and rasterized with edge functions into a color and a
//! depth buffer. Textures are sampled with perspective-correct UVs. SDL2 is
//! only used to put the finished frame on screen and read the keyboard.
//!
//! # Quick Start
//!
//! ```ignore
//! use ssr::prelude::*;
//!
//! let mesh = Arc::new(Mesh::from_obj("res/crate2.obj")?);
//! let mut model = Model::new(mesh);
//! model.transform_mut().set_position(Vec3::new(0.0, 0.0, 12.0));
//!
//! let mut renderer = Renderer::new(Texture::from_file("res/crate.png")?);
//! let mut frame = ColorBuffer::new(720, 720, 0xFFFFFFFF);
//! let stats = renderer.render_scene(&[model], &Camera::default(), &mut frame);
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod config;
pub mod error;
pub mod math;
pub mod mesh;
pub mod model;
pub mod projection;
pub mod render;
pub mod texture;
pub mod transform;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::Camera;
pub use error::{Error, Result};
pub use mesh::{Mesh, MeshError};
pub use model::Model;
pub use projection::Viewport;
pub use render::{ColorBuffer, FrameStats, RenderTarget, Renderer};
pub use texture::Texture;
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use ssr::prelude::*;
/// ```
pub mod prelude {
    pub use std::sync::Arc;

    // Scene
    pub use crate::camera::Camera;
    pub use crate::config::SceneConfig;
    pub use crate::mesh::Mesh;
    pub use crate::model::Model;
    pub use crate::texture::Texture;
    pub use crate::transform::Transform;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::projection::Viewport;
    pub use crate::render::{ColorBuffer, DepthBuffer, FrameStats, RenderTarget, Renderer};

    // Window & Input
    pub use crate::window::{FrameLimiter, InputState, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::rasterizer::edgefunction::scan_triangle;
    pub use crate::render::{ColorBuffer, DepthBuffer, Rasterizer, ScreenTriangle};
}
