//! Color and depth buffers.
//!
//! The pipeline only ever writes pixels through the [`RenderTarget`] trait, so
//! any surface that accepts `set_pixel` calls can receive a frame. [`ColorBuffer`]
//! is the owned in-memory implementation handed to the window each frame.
//!
//! # Depth Buffer
//!
//! The [`DepthBuffer`] stores 1/z (reciprocal of camera-space depth) for each
//! pixel. Larger values are closer to the camera; 0.0 means nothing drawn yet.

/// A surface that accepts one colored pixel at a time.
pub trait RenderTarget {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Write an ARGB8888 color at (x, y). Callers stay within `width` x `height`.
    fn set_pixel(&mut self, x: u32, y: u32, color: u32);
}

/// Owned ARGB8888 pixel storage.
#[derive(Debug, Clone)]
pub struct ColorBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl ColorBuffer {
    pub fn new(width: u32, height: u32, color: u32) -> Self {
        Self {
            pixels: vec![color; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32, color: u32) {
        *self = Self::new(width, height, color);
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Raw bytes in native endianness, ready for a streaming ARGB8888 texture.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

impl RenderTarget for ColorBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn set_pixel(&mut self, x: u32, y: u32, color: u32) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
        }
    }
}

/// Per-pixel 1/z values of the closest fragment written so far.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    values: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            values: vec![0.0; width as usize * height as usize], // 0.0 = infinitely far
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Prepare for a new frame of the given size: reallocate if the size
    /// changed, otherwise clear every value back to 0.0.
    pub fn reset(&mut self, width: u32, height: u32) {
        if self.width != width || self.height != height {
            *self = Self::new(width, height);
        } else {
            self.values.fill(0.0);
        }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.values[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Depth test: store `inv_depth` and return true only if it is strictly
    /// closer (larger 1/z) than the stored value.
    #[inline]
    pub fn test_and_set(&mut self, x: u32, y: u32, inv_depth: f32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = (y * self.width + x) as usize;
        if inv_depth > self.values[idx] {
            self.values[idx] = inv_depth;
            true
        } else {
            false
        }
    }
}
