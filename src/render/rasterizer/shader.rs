//! Per-pixel attribute interpolation and texturing.
//!
//! Barycentric weights measured in screen space are linear in 1/z, not in z.
//! Attributes are therefore divided by their vertex depth, interpolated, and
//! multiplied back by the interpolated depth:
//!
//! ```text
//! 1/z   = w0/z0 + w1/z1 + w2/z2
//! uv    = (w0*uv0/z0 + w1*uv1/z1 + w2*uv2/z2) * z
//! ```
//!
//! Interpolating `uv` directly with the screen weights would warp the texture
//! on any surface that is not parallel to the screen.

use crate::math::vec2::Vec2;
use crate::texture::Texture;

/// Interpolated values for one covered pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    /// 1/z of the surface at this pixel; larger is closer.
    pub inv_depth: f32,
    pub uv: Vec2,
}

/// Per-triangle constants for perspective-correct interpolation.
#[derive(Clone, Copy, Debug)]
pub struct PerspectiveInterpolator {
    inv_z: [f32; 3],
    uv_over_z: [Vec2; 3],
}

impl PerspectiveInterpolator {
    /// `depths` are camera-space z values and must be positive.
    pub fn new(depths: [f32; 3], uvs: [Vec2; 3]) -> Self {
        let inv_z = depths.map(|z| 1.0 / z);
        Self {
            inv_z,
            uv_over_z: [uvs[0] * inv_z[0], uvs[1] * inv_z[1], uvs[2] * inv_z[2]],
        }
    }

    #[inline]
    pub fn fragment(&self, lambda: [f32; 3]) -> Fragment {
        let inv_depth =
            lambda[0] * self.inv_z[0] + lambda[1] * self.inv_z[1] + lambda[2] * self.inv_z[2];
        let uv_over_z = self.uv_over_z[0] * lambda[0]
            + self.uv_over_z[1] * lambda[1]
            + self.uv_over_z[2] * lambda[2];

        Fragment {
            inv_depth,
            uv: uv_over_z * (1.0 / inv_depth),
        }
    }
}

/// Samples a texture at the perspective-corrected UV of each fragment.
pub struct TextureShader<'a> {
    texture: &'a Texture,
    interpolator: PerspectiveInterpolator,
}

impl<'a> TextureShader<'a> {
    pub fn new(texture: &'a Texture, depths: [f32; 3], uvs: [Vec2; 3]) -> Self {
        Self {
            texture,
            interpolator: PerspectiveInterpolator::new(depths, uvs),
        }
    }

    #[inline]
    pub fn fragment(&self, lambda: [f32; 3]) -> Fragment {
        self.interpolator.fragment(lambda)
    }

    /// Nearest-neighbour texel for a fragment; UVs are clamped to [0, 1].
    #[inline]
    pub fn color(&self, fragment: &Fragment) -> u32 {
        self.texture.sample_nearest(fragment.uv.x, fragment.uv.y)
    }
}
