//! Triangle rasterization.
//!
//! The [`Rasterizer`] owns the color texture and turns one [`ScreenTriangle`]
//! at a time into depth-tested, textured pixels:
//!
//! - [`edgefunction`]: coverage (bounding box, edge functions, top-left rule)
//!   and barycentric weights
//! - [`shader`]: perspective-correct depth/UV interpolation and texture lookup

pub mod edgefunction;
pub mod shader;

use std::path::Path;

use self::edgefunction::scan_triangle;
use self::shader::TextureShader;
use super::framebuffer::{DepthBuffer, RenderTarget};
use crate::math::vec2::Vec2;
use crate::projection::Viewport;
use crate::texture::{Texture, TextureError};

/// A triangle ready for rasterization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTriangle {
    /// Screen-space corner positions, in winding order.
    pub points: [Vec2; 3],
    /// Camera-space z of each corner (positive, in front of the camera).
    pub depths: [f32; 3],
    /// Authored texture coordinates of each corner.
    pub uvs: [Vec2; 3],
}

/// Scan-converts textured triangles into a render target.
pub struct Rasterizer {
    texture: Texture,
}

impl Rasterizer {
    pub fn new(texture: Texture) -> Self {
        Self { texture }
    }

    /// Decodes the texture once; it lives as long as the rasterizer.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        Ok(Self::new(Texture::from_file(path)?))
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Fills one triangle, depth testing every covered pixel.
    ///
    /// Returns the number of pixels written, or `None` if the triangle has
    /// zero area on screen and was skipped.
    pub fn fill_triangle<T: RenderTarget>(
        &self,
        triangle: &ScreenTriangle,
        depth_buffer: &mut DepthBuffer,
        target: &mut T,
    ) -> Option<usize> {
        let viewport = Viewport::new(
            target.width().min(depth_buffer.width()),
            target.height().min(depth_buffer.height()),
        );
        let shader = TextureShader::new(&self.texture, triangle.depths, triangle.uvs);

        let mut written = 0;
        let rasterized = scan_triangle(triangle.points, viewport, |x, y, lambda| {
            let fragment = shader.fragment(lambda);
            if depth_buffer.test_and_set(x, y, fragment.inv_depth) {
                target.set_pixel(x, y, shader.color(&fragment));
                written += 1;
            }
        });

        rasterized.then_some(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::framebuffer::ColorBuffer;
    use approx::assert_relative_eq;

    const RED: u32 = 0xFFFF0000;
    const BLUE: u32 = 0xFF0000FF;

    fn solid(color: u32) -> Rasterizer {
        Rasterizer::new(Texture::from_pixels(1, 1, vec![color]).unwrap())
    }

    fn quad_half(depth: f32) -> ScreenTriangle {
        ScreenTriangle {
            points: [
                Vec2::new(0.0, 0.0),
                Vec2::new(8.0, 0.0),
                Vec2::new(0.0, 8.0),
            ],
            depths: [depth; 3],
            uvs: [Vec2::ZERO; 3],
        }
    }

    #[test]
    fn nearer_triangle_wins_in_any_order() {
        let near = (solid(RED), quad_half(2.0));
        let far = (solid(BLUE), quad_half(6.0));

        for order in [[&near, &far], [&far, &near]] {
            let mut color = ColorBuffer::new(8, 8, 0);
            let mut depth = DepthBuffer::new(8, 8);
            for (rasterizer, triangle) in order {
                rasterizer.fill_triangle(triangle, &mut depth, &mut color);
            }
            assert_eq!(color.get_pixel(1, 1), Some(RED));
            assert_relative_eq!(depth.get(1, 1).unwrap(), 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn reports_written_pixels() {
        let mut color = ColorBuffer::new(8, 8, 0);
        let mut depth = DepthBuffer::new(8, 8);
        let rasterizer = solid(RED);

        let first = rasterizer.fill_triangle(&quad_half(3.0), &mut depth, &mut color);
        let again = rasterizer.fill_triangle(&quad_half(3.0), &mut depth, &mut color);

        let drawn = color.pixels().iter().filter(|&&p| p == RED).count();
        assert_eq!(first, Some(drawn));
        assert_eq!(again, Some(0), "equal depth must not overwrite");
    }

    #[test]
    fn degenerate_triangle_returns_none() {
        let mut color = ColorBuffer::new(8, 8, 0);
        let mut depth = DepthBuffer::new(8, 8);
        let mut t = quad_half(3.0);
        t.points = [Vec2::new(1.0, 1.0); 3];
        assert_eq!(solid(RED).fill_triangle(&t, &mut depth, &mut color), None);
    }

    #[test]
    fn texture_is_sampled_per_pixel() {
        // Left column black, right column white; UV u runs 0 -> 1 across x.
        let texture = Texture::from_pixels(2, 1, vec![0xFF000000, 0xFFFFFFFF]).unwrap();
        let rasterizer = Rasterizer::new(texture);
        let triangle = ScreenTriangle {
            points: [
                Vec2::new(0.0, 0.0),
                Vec2::new(16.0, 0.0),
                Vec2::new(0.0, 16.0),
            ],
            depths: [4.0; 3],
            uvs: [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0)],
        };
        let mut color = ColorBuffer::new(16, 16, 0);
        let mut depth = DepthBuffer::new(16, 16);
        rasterizer.fill_triangle(&triangle, &mut depth, &mut color);

        assert_eq!(color.get_pixel(0, 0), Some(0xFF000000));
        assert_eq!(color.get_pixel(15, 0), Some(0xFF000000)); // u = 15/16 rounds down
        assert_eq!(color.get_pixel(15, 15), Some(0)); // outside
        assert_eq!(rasterizer.texture().width(), 2);
    }
}
