//! Edge-preserving pixel-art scaling kernels.
//!
//! Both kernels read neighbours with edge replication (never wrapping) and
//! compare colours on all four channels.

use crate::error::Result;
use crate::types::{Colour, PixelBuffer};

/// Clamped neighbour offsets along one axis: `(prev, next)` for each index.
fn clamped_neighbours(len: usize) -> Vec<(usize, usize)> {
    (0..len)
        .map(|i| (i.saturating_sub(1), (i + 1).min(len - 1)))
        .collect()
}

/// EPX / Scale2x: doubles both dimensions.
///
/// With A above, B right, C left and D below the centre P:
/// - top-left     = C if C==A, C!=D, A!=B
/// - top-right    = A if A==B, A!=C, B!=D
/// - bottom-left  = D if D==C, D!=B, C!=A
/// - bottom-right = B if B==D, B!=A, D!=C
pub fn scale2x(src: &PixelBuffer) -> Result<PixelBuffer> {
    let (w, h) = src.size();
    let px = src.pixels();
    let cols = clamped_neighbours(w);
    let rows = clamped_neighbours(h);
    let out_w = w * 2;
    let mut out = vec![Colour::TRANSPARENT; out_w * h * 2];

    for (y, &(up, down)) in rows.iter().enumerate() {
        let (row, row_up, row_down) = (y * w, up * w, down * w);
        let top = 2 * y * out_w;
        let bottom = top + out_w;
        for (x, &(left, right)) in cols.iter().enumerate() {
            let p = px[row + x];
            let a = px[row_up + x];
            let b = px[row + right];
            let c = px[row + left];
            let d = px[row_down + x];

            out[top + 2 * x] = if c == a && c != d && a != b { c } else { p };
            out[top + 2 * x + 1] = if a == b && a != c && b != d { a } else { p };
            out[bottom + 2 * x] = if d == c && d != b && c != a { d } else { p };
            out[bottom + 2 * x + 1] = if b == d && b != a && d != c { b } else { p };
        }
    }

    PixelBuffer::new(out_w, h * 2, out)
}

/// AdvMAME3x / Scale3x: triples both dimensions.
///
/// Neighbourhood is `A B C / D E F / G H I` with E the centre.
pub fn scale3x(src: &PixelBuffer) -> Result<PixelBuffer> {
    let (w, h) = src.size();
    let px = src.pixels();
    let cols = clamped_neighbours(w);
    let rows = clamped_neighbours(h);
    let out_w = w * 3;
    let mut out = vec![Colour::TRANSPARENT; out_w * h * 3];

    for (y, &(up, down)) in rows.iter().enumerate() {
        let (r0, r1, r2) = (up * w, y * w, down * w);
        let base = 3 * y * out_w;
        for (x, &(l, r)) in cols.iter().enumerate() {
            let (a, b, c) = (px[r0 + l], px[r0 + x], px[r0 + r]);
            let (d, e, f) = (px[r1 + l], px[r1 + x], px[r1 + r]);
            let (g, hh, i) = (px[r2 + l], px[r2 + x], px[r2 + r]);

            let top_left = d == b && d != hh && b != f;
            let top_right = b == f && b != d && f != hh;
            let bottom_left = d == hh && d != b && hh != f;
            let bottom_right = f == hh && f != b && hh != d;

            let block = [
                [
                    if top_left { d } else { e },
                    if (top_left && e != c) || (top_right && e != a) { b } else { e },
                    if top_right { f } else { e },
                ],
                [
                    if (top_left && e != g) || (bottom_left && e != a) { d } else { e },
                    e,
                    if (top_right && e != i) || (bottom_right && e != c) { f } else { e },
                ],
                [
                    if bottom_left { d } else { e },
                    if (bottom_left && e != i) || (bottom_right && e != g) { hh } else { e },
                    if bottom_right { f } else { e },
                ],
            ];

            for (dy, block_row) in block.iter().enumerate() {
                let start = base + dy * out_w + 3 * x;
                out[start..start + 3].copy_from_slice(block_row);
            }
        }
    }

    PixelBuffer::new(out_w, h * 3, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Colour = Colour::rgb(20, 20, 40);
    const PAPER: Colour = Colour::rgb(240, 230, 200);

    /// 3x3 diagonal line from top-left to bottom-right.
    fn diagonal() -> PixelBuffer {
        PixelBuffer::from_fn(3, 3, |x, y| if x == y { INK } else { PAPER }).unwrap()
    }

    #[test]
    fn test_scale2x_uniform_stays_uniform() {
        let tile = PixelBuffer::filled(5, 5, INK).unwrap();
        let out = scale2x(&tile).unwrap();
        assert_eq!(out.size(), (10, 10));
        assert!(out.pixels().iter().all(|&p| p == INK));
    }

    #[test]
    fn test_scale2x_smooths_diagonal() {
        let out = scale2x(&diagonal()).unwrap();
        // Ink centre (1,1) has four paper neighbours: no rule fires.
        assert_eq!(out.get(3, 2), Some(INK));
        // Paper (1,0): C=(0,0) ink, D=(1,1) ink, B and A paper.
        // Bottom-left takes D since D==C, D!=B, C!=A.
        assert_eq!(out.get(2, 1), Some(INK));
        assert_eq!(out.get(2, 0), Some(PAPER));
        // Paper (0,1): A=(0,0) and B=(1,1) ink, C and D paper.
        assert_eq!(out.get(1, 2), Some(INK));
    }

    #[test]
    fn test_scale2x_compares_alpha() {
        let faded = Colour::new(20, 20, 40, 128);
        let tile = PixelBuffer::from_fn(3, 3, |x, y| match (x, y) {
            (0, 0) => INK,
            (1, 1) => faded,
            _ => PAPER,
        })
        .unwrap();
        let out = scale2x(&tile).unwrap();
        // Same RGB but different alpha: A != B, so paper (0,1) keeps its colour.
        assert_eq!(out.get(1, 2), Some(PAPER));
    }

    #[test]
    fn test_scale3x_uniform_and_size() {
        let tile = PixelBuffer::filled(4, 2, PAPER).unwrap();
        let out = scale3x(&tile).unwrap();
        assert_eq!(out.size(), (12, 6));
        assert!(out.pixels().iter().all(|&p| p == PAPER));
    }

    #[test]
    fn test_scale3x_centre_is_always_source() {
        let src = diagonal();
        let out = scale3x(&src).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(out.get(3 * x + 1, 3 * y + 1), src.get(x, y));
            }
        }
    }

    #[test]
    fn test_scale3x_fills_corner_of_diagonal() {
        let out = scale3x(&diagonal()).unwrap();
        // Paper pixel (0,1): B=(0,0) ink, F=(1,1) ink, D clamped paper, H=(0,2) paper.
        // B==F, B!=D, F!=H so its top-right sub-pixel takes F.
        assert_eq!(out.get(2, 3), Some(INK));
    }
}
