//! Frame driver.
//!
//! Provides the [`Renderer`] struct which owns the rasterizer and the depth
//! buffer and draws a whole scene into any [`RenderTarget`].

use std::fmt;

use log::debug;

use super::culling::is_back_face;
use super::framebuffer::{DepthBuffer, RenderTarget};
use super::pipeline::project_model;
use super::rasterizer::Rasterizer;
use crate::camera::Camera;
use crate::model::Model;
use crate::projection::{projection_matrix, Viewport};
use crate::texture::Texture;

/// Triangle and pixel counts for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Triangles considered, across all models.
    pub triangles: usize,
    /// Rejected by back-face culling.
    pub culled: usize,
    /// A corner was on or behind the camera's eye plane.
    pub skipped: usize,
    /// Zero area on screen.
    pub degenerate: usize,
    /// Pixels that passed the depth test.
    pub fragments: usize,
}

impl FrameStats {
    /// Triangles that reached the rasterizer and covered some area.
    pub fn rasterized(&self) -> usize {
        self.triangles - self.culled - self.skipped - self.degenerate
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} triangles ({} culled, {} skipped, {} degenerate), {} fragments",
            self.triangles, self.culled, self.skipped, self.degenerate, self.fragments
        )
    }
}

pub struct Renderer {
    rasterizer: Rasterizer,
    depth_buffer: DepthBuffer,
}

impl Renderer {
    pub fn new(texture: Texture) -> Self {
        Self {
            rasterizer: Rasterizer::new(texture),
            depth_buffer: DepthBuffer::new(0, 0),
        }
    }

    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    /// Depth values left by the most recent frame.
    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth_buffer
    }

    /// Draws every model into `target`.
    ///
    /// The depth buffer is reset (and resized to the target if needed) first.
    /// The target's color contents are left alone; clear them beforehand if
    /// a fresh frame is wanted.
    pub fn render_scene<T: RenderTarget>(
        &mut self,
        models: &[Model],
        camera: &Camera,
        target: &mut T,
    ) -> FrameStats {
        let viewport = Viewport::new(target.width(), target.height());
        self.depth_buffer.reset(viewport.width, viewport.height);

        let projection = projection_matrix(camera, viewport);
        let mut stats = FrameStats::default();

        for model in models {
            let mesh = model.mesh();
            let projected = project_model(model, camera, &projection, viewport);

            for triangle in mesh.triangles() {
                stats.triangles += 1;

                if is_back_face(triangle, &projected.camera_space) {
                    stats.culled += 1;
                    continue;
                }

                let Some(screen) = projected.screen_triangle(triangle, mesh.uvs()) else {
                    stats.skipped += 1;
                    continue;
                };

                match self
                    .rasterizer
                    .fill_triangle(&screen, &mut self.depth_buffer, target)
                {
                    Some(written) => stats.fragments += written,
                    None => stats.degenerate += 1,
                }
            }
        }

        debug!("frame: {stats}");
        stats
    }
}
