//! Ordered-dither transitions between two tiles.
//!
//! A gradient field over the output rectangle is compared against a wrapped
//! Bayer matrix; every output pixel is taken whole from one input or the
//! other. No pixel is ever a weighted mix of the two.

mod matrix;

use std::fmt;
use std::str::FromStr;

use crate::error::{PxTileError, Result};
use crate::types::{Colour, PixelBuffer};

pub use matrix::{DitherMatrix, ThresholdMask};

/// Gradient direction for a dithered transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
    Diagonal,
    Radial,
    CornerTopLeft,
    CornerTopRight,
    CornerBottomLeft,
    CornerBottomRight,
}

impl Direction {
    /// Directions produced by a transition set, in output order.
    pub const TRANSITIONS: [Direction; 10] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
        Direction::Diagonal,
        Direction::CornerTopLeft,
        Direction::CornerTopRight,
        Direction::CornerBottomLeft,
        Direction::CornerBottomRight,
        Direction::Radial,
    ];

    /// Directions produced by an edge set, in output order.
    pub const EDGES: [Direction; 4] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
    ];

    /// Identifier used on the command line and in file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Diagonal => "diagonal",
            Direction::Radial => "radial",
            Direction::CornerTopLeft => "corner_tl",
            Direction::CornerTopRight => "corner_tr",
            Direction::CornerBottomLeft => "corner_bl",
            Direction::CornerBottomRight => "corner_br",
        }
    }

    /// Gradient value in `[0, 1]` at (x, y) of a `width x height` field.
    pub fn gradient(self, x: usize, y: usize, width: usize, height: usize) -> f64 {
        let (xf, yf) = (x as f64, y as f64);
        let (w, h) = (width as f64, height as f64);
        match self {
            Direction::Left => ramp(x, width),
            Direction::Right => 1.0 - ramp(x, width),
            Direction::Top => ramp(y, height),
            Direction::Bottom => 1.0 - ramp(y, height),
            Direction::Diagonal => (xf + yf) / ((width + height).saturating_sub(2).max(1)) as f64,
            Direction::Radial => {
                let (cx, cy) = (w / 2.0, h / 2.0);
                let max_dist = (cx * cx + cy * cy).sqrt();
                ((xf - cx).powi(2) + (yf - cy).powi(2)).sqrt() / max_dist
            }
            Direction::CornerTopLeft
            | Direction::CornerTopRight
            | Direction::CornerBottomLeft
            | Direction::CornerBottomRight => {
                let ox = match self {
                    Direction::CornerTopLeft | Direction::CornerBottomLeft => 0.0,
                    _ => w - 1.0,
                };
                let oy = match self {
                    Direction::CornerTopLeft | Direction::CornerTopRight => 0.0,
                    _ => h - 1.0,
                };
                ((xf - ox).powi(2) + (yf - oy).powi(2)).sqrt() / (w * w + h * h).sqrt()
            }
        }
    }
}

/// Evenly spaced 0..=1 ramp; a single-pixel span is 0.
fn ramp(i: usize, len: usize) -> f64 {
    if len <= 1 {
        0.0
    } else {
        i as f64 / (len - 1) as f64
    }
}

impl FromStr for Direction {
    type Err = PxTileError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" => Ok(Direction::Top),
            "bottom" => Ok(Direction::Bottom),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "diagonal" => Ok(Direction::Diagonal),
            "radial" => Ok(Direction::Radial),
            "corner_tl" => Ok(Direction::CornerTopLeft),
            "corner_tr" => Ok(Direction::CornerTopRight),
            "corner_bl" => Ok(Direction::CornerBottomLeft),
            "corner_br" => Ok(Direction::CornerBottomRight),
            _ => Err(PxTileError::Configuration {
                message: format!("Unknown dither direction: {}", s),
                help: Some(
                    "Use top, bottom, left, right, diagonal, radial, corner_tl, corner_tr, corner_bl, or corner_br"
                        .to_string(),
                ),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the binary mask `gradient(x, y) > threshold(x, y)` for a rectangle.
pub fn build_threshold_mask(
    width: usize,
    height: usize,
    direction: Direction,
    matrix: DitherMatrix,
) -> ThresholdMask {
    let mut bits = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            bits.push(direction.gradient(x, y, width, height) > matrix.threshold(x, y));
        }
    }
    ThresholdMask::new(width, height, bits)
}

/// Take each pixel from `b` where the mask is set, otherwise from `a`.
pub fn select_with_mask(a: &PixelBuffer, b: &PixelBuffer, mask: &ThresholdMask) -> Result<PixelBuffer> {
    let size = (mask.width(), mask.height());
    if a.size() != size || b.size() != size {
        return Err(PxTileError::config(format!(
            "Mask {}x{} does not match inputs {}x{} and {}x{}",
            size.0,
            size.1,
            a.width(),
            a.height(),
            b.width(),
            b.height()
        )));
    }
    let pixels: Vec<Colour> = a
        .pixels()
        .iter()
        .zip(b.pixels())
        .zip(mask.bits())
        .map(|((&pa, &pb), &take_b)| if take_b { pb } else { pa })
        .collect();
    PixelBuffer::new(size.0, size.1, pixels)
}

/// Dithered transition from `a` into `b` along `direction`.
///
/// `b` is nearest-resized to `a`'s size when they differ; the gradient is
/// always laid out over `a`.
pub fn dither_blend(
    a: &PixelBuffer,
    b: &PixelBuffer,
    direction: Direction,
    matrix: DitherMatrix,
) -> Result<PixelBuffer> {
    let resized;
    let b = if b.size() != a.size() {
        resized = b.resize_nearest(a.width(), a.height())?;
        &resized
    } else {
        b
    };
    let mask = build_threshold_mask(a.width(), a.height(), direction, matrix);
    select_with_mask(a, b, &mask)
}

/// One blend per direction in [`Direction::TRANSITIONS`] order.
pub fn dithered_transition_set(
    a: &PixelBuffer,
    b: &PixelBuffer,
    matrix: DitherMatrix,
) -> Result<Vec<(Direction, PixelBuffer)>> {
    Direction::TRANSITIONS
        .iter()
        .map(|&direction| Ok((direction, dither_blend(a, b, direction, matrix)?)))
        .collect()
}

/// Dither `center` out into `background` along `direction`.
///
/// Without a background the centre fades into full transparency.
pub fn edge_tile(
    center: &PixelBuffer,
    background: Option<&PixelBuffer>,
    direction: Direction,
    matrix: DitherMatrix,
) -> Result<PixelBuffer> {
    match background {
        Some(bg) => dither_blend(center, bg, direction, matrix),
        None => {
            let clear = PixelBuffer::filled(center.width(), center.height(), Colour::TRANSPARENT)?;
            dither_blend(center, &clear, direction, matrix)
        }
    }
}

/// Edge tiles for [`Direction::EDGES`], in that order.
pub fn edge_set(
    center: &PixelBuffer,
    background: Option<&PixelBuffer>,
    matrix: DitherMatrix,
) -> Result<Vec<(Direction, PixelBuffer)>> {
    Direction::EDGES
        .iter()
        .map(|&direction| Ok((direction, edge_tile(center, background, direction, matrix)?)))
        .collect()
}
