//! Core domain types for pxtile.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Colour` - RGBA colour values
//! - `PixelBuffer` - RGBA rasters that every transform reads and produces
//! - `Palette` - Ordered RGB colour lists

mod buffer;
mod colour;
mod palette;

pub use buffer::PixelBuffer;
pub use colour::{distance_sq, luminance, manhattan, quantize_rgb, Colour, LUMA_WEIGHTS};
pub use palette::Palette;
