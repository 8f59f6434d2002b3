//! Minimal linear algebra used by the pipeline.
//!
//! Vectors are plain `f32` structs; [`mat4::Mat4`] follows the column-vector
//! convention, so `A * B * v` applies `B` first.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;
