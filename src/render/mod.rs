//! Rendering pipeline.
//!
//! - [`pipeline`]: model space to screen space, once per vertex
//! - [`culling`]: back-face rejection in camera space
//! - [`rasterizer`]: coverage, perspective-correct texturing, depth testing
//! - [`framebuffer`]: color/depth storage and the [`RenderTarget`] trait
//! - [`renderer`]: the per-frame driver tying them together

pub mod culling;
pub mod framebuffer;
pub mod pipeline;
pub mod rasterizer;
pub mod renderer;

pub use framebuffer::{ColorBuffer, DepthBuffer, RenderTarget};
pub use rasterizer::{Rasterizer, ScreenTriangle};
pub use renderer::{FrameStats, Renderer};
