//! Bayer threshold matrices and the binary masks built from them.

use std::fmt;

use crate::error::{PxTileError, Result};

const BAYER_2X2: [[u8; 2]; 2] = [[0, 2], [3, 1]];

const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

const BAYER_8X8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// An ordered-dither threshold matrix.
///
/// Thresholds are `index / n²`, so every value is unique and the set splits
/// `[0, 1)` into equal steps. The matrix wraps across larger outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherMatrix {
    Bayer2,
    #[default]
    Bayer4,
    Bayer8,
}

impl DitherMatrix {
    /// Select the matrix of the given order (2, 4 or 8).
    pub fn new(size: usize) -> Result<Self> {
        match size {
            2 => Ok(DitherMatrix::Bayer2),
            4 => Ok(DitherMatrix::Bayer4),
            8 => Ok(DitherMatrix::Bayer8),
            _ => Err(PxTileError::Configuration {
                message: format!("Unsupported dither matrix size: {}", size),
                help: Some("Use a matrix size of 2, 4, or 8".to_string()),
            }),
        }
    }

    /// Matrix order.
    pub fn size(self) -> usize {
        match self {
            DitherMatrix::Bayer2 => 2,
            DitherMatrix::Bayer4 => 4,
            DitherMatrix::Bayer8 => 8,
        }
    }

    /// Normalized threshold at an output coordinate, with wrapping.
    pub fn threshold(self, x: usize, y: usize) -> f64 {
        let n = self.size();
        let (x, y) = (x % n, y % n);
        let index = match self {
            DitherMatrix::Bayer2 => BAYER_2X2[y][x],
            DitherMatrix::Bayer4 => BAYER_4X4[y][x],
            DitherMatrix::Bayer8 => BAYER_8X8[y][x],
        };
        index as f64 / (n * n) as f64
    }
}

impl fmt::Display for DitherMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        write!(f, "{}x{}", n, n)
    }
}

/// A per-pixel binary selection mask. `true` selects the second input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdMask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl ThresholdMask {
    pub(crate) fn new(width: usize, height: usize, bits: Vec<bool>) -> Self {
        debug_assert_eq!(bits.len(), width * height);
        Self { width, height, bits }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the pixel at (x, y) selects the second input.
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    /// Row-major mask bits.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }
}
