use std::path::Path;

use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to decode texture: {0}")]
    Decode(#[from] image::ImageError),
    #[error("texture must not be empty ({width}x{height})")]
    Empty { width: u32, height: u32 },
    #[error("expected {expected} pixels for the texture size, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Represents a 2D texture for texture mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    data: Vec<u32>, // The pixel data of the texture in ARGB format, row-major.
    width: u32,     // The width of the texture in pixels.
    height: u32,    // The height of the texture in pixels.
}

impl Texture {
    /// Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path.as_ref())?.to_rgba8();
        let (width, height) = img.dimensions();

        // Convert RGBA bytes to ARGB u32
        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        info!(
            "loaded texture '{}' ({}x{})",
            path.as_ref().display(),
            width,
            height
        );
        Self::from_pixels(width, height, data)
    }

    /// Wrap an already decoded row-major ARGB pixel array.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Square two-color checkerboard with `cells` squares per side.
    ///
    /// Stands in for a texture file when a scene doesn't name one.
    pub fn checkerboard(size: u32, cells: u32, light: u32, dark: u32) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let data = (0..size * size)
            .map(|i| {
                let (x, y) = (i % size / cell, i / size / cell);
                if (x + y) % 2 == 0 {
                    light
                } else {
                    dark
                }
            })
            .collect();
        Self {
            data,
            width: size,
            height: size,
        }
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// UVs are clamped to [0,1]; (0,0) is the first stored row and column.
    /// The texel is `(floor(u * (width - 1)), floor(v * (height - 1)))`.
    #[inline]
    pub fn sample_nearest(&self, u: f32, v: f32) -> u32 {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let x = (u * (self.width - 1) as f32) as u32;
        let y = (v * (self.height - 1) as f32) as u32;

        self.data[(y * self.width + x) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
