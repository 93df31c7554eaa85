//! RGBA raster buffer shared by every tile transform.

use crate::error::{PxTileError, Result};

use super::Colour;

/// A rectangular RGBA8 raster.
///
/// Pixels are stored row-major in one flat vector so kernels can run as
/// straight passes over the slice. Dimensions are always non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Colour>,
}

impl PixelBuffer {
    /// Create a buffer from row-major pixels.
    pub fn new(width: usize, height: usize, pixels: Vec<Colour>) -> Result<Self> {
        check_dimensions(width, height)?;
        if pixels.len() != width * height {
            return Err(PxTileError::config(format!(
                "Pixel count {} does not match {}x{}",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a buffer filled with a single colour.
    pub fn filled(width: usize, height: usize, colour: Colour) -> Result<Self> {
        Self::new(width, height, vec![colour; width * height])
    }

    /// Create a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Colour) -> Result<Self> {
        check_dimensions(width, height)?;
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    /// Create a buffer from packed RGBA bytes.
    pub fn from_rgba_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != width * height * 4 {
            return Err(PxTileError::config(format!(
                "Expected {} RGBA bytes for {}x{}, got {}",
                width * height * 4,
                width,
                height,
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|p| Colour::new(p[0], p[1], p[2], p[3]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Get the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get a pixel at the given position.
    pub fn get(&self, x: usize, y: usize) -> Option<Colour> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Row-major pixel slice.
    pub fn pixels(&self) -> &[Colour] {
        &self.pixels
    }

    /// Convert to a flat RGBA buffer (for image output).
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.pixels.len() * 4);
        for colour in &self.pixels {
            buffer.extend_from_slice(&colour.to_rgba());
        }
        buffer
    }

    /// Apply `f` to every pixel, producing a new buffer of the same size.
    pub fn map_pixels(&self, f: impl FnMut(Colour) -> Colour) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().copied().map(f).collect(),
        }
    }

    /// Copy out a sub-rectangle. Requests past the edge are an error.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        if x + width > self.width || y + height > self.height {
            return Err(PxTileError::Bounds {
                message: format!(
                    "Crop {}x{} at ({}, {}) exceeds {}x{} buffer",
                    width, height, x, y, self.width, self.height
                ),
                help: Some("Check the tile size, spacing and grid dimensions".to_string()),
            });
        }
        let mut pixels = Vec::with_capacity(width * height);
        for row in y..y + height {
            let start = row * self.width + x;
            pixels.extend_from_slice(&self.pixels[start..start + width]);
        }
        Self::new(width, height, pixels)
    }

    /// Copy `src` into this buffer with its top-left corner at (x, y).
    pub fn paste(&mut self, src: &PixelBuffer, x: usize, y: usize) -> Result<()> {
        if x + src.width > self.width || y + src.height > self.height {
            return Err(PxTileError::Bounds {
                message: format!(
                    "Paste of {}x{} at ({}, {}) exceeds {}x{} buffer",
                    src.width, src.height, x, y, self.width, self.height
                ),
                help: None,
            });
        }
        for row in 0..src.height {
            let dst = (y + row) * self.width + x;
            let from = row * src.width;
            self.pixels[dst..dst + src.width].copy_from_slice(&src.pixels[from..from + src.width]);
        }
        Ok(())
    }

    /// Nearest-neighbour resample to an exact size.
    ///
    /// Samples at pixel centres: destination `d` reads source
    /// `floor((d + 0.5) * src / dst)`.
    pub fn resize_nearest(&self, width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        if (width, height) == self.size() {
            return Ok(self.clone());
        }
        let xs: Vec<usize> = (0..width).map(|x| centre_sample(x, self.width, width)).collect();
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            let row = centre_sample(y, self.height, height) * self.width;
            pixels.extend(xs.iter().map(|&sx| self.pixels[row + sx]));
        }
        Self::new(width, height, pixels)
    }

    /// Mirror left-to-right.
    pub fn flip_horizontal(&self) -> Self {
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for row in self.pixels.chunks_exact(self.width) {
            pixels.extend(row.iter().rev());
        }
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Rotate 90 degrees counter-clockwise. The result is `height x width`.
    pub fn rotate90(&self) -> Self {
        let (w, h) = (self.height, self.width);
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for y in 0..h {
            for x in 0..w {
                // dst(x, y) = src(W-1-y, x)
                pixels.push(self.pixels[x * self.width + (self.width - 1 - y)]);
            }
        }
        Self {
            width: w,
            height: h,
            pixels,
        }
    }

    /// Fraction of pixels whose alpha is below `alpha_threshold`.
    pub fn transparent_ratio(&self, alpha_threshold: u8) -> f64 {
        let transparent = self.pixels.iter().filter(|p| p.a < alpha_threshold).count();
        transparent as f64 / self.pixels.len() as f64
    }
}

fn centre_sample(dst: usize, src_len: usize, dst_len: usize) -> usize {
    ((2 * dst + 1) * src_len / (2 * dst_len)).min(src_len - 1)
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PxTileError::Configuration {
            message: format!("Dimensions must be non-zero, got {}x{}", width, height),
            help: Some("Both width and height must be at least 1".to_string()),
        });
    }
    Ok(())
}
