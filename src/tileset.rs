//! Tileset grid helpers.
//!
//! Slices a sheet into uniform cells, reassembles cells into a sheet, and
//! fills empty grid slots from their neighbours.

use std::fmt;
use std::str::FromStr;

use crate::error::{PxTileError, Result};
use crate::types::{Colour, PixelBuffer};

/// Alpha below which a pixel counts as empty when scanning for gaps.
const GAP_ALPHA: u8 = 10;

/// Fraction of empty pixels at which a cell is treated as a gap.
const GAP_RATIO: f64 = 0.95;

/// A single cell extracted from a tileset grid.
#[derive(Debug, Clone)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub tile: PixelBuffer,
}

/// Number of whole `cell`-sized cells along one axis, stepping `cell + spacing`.
pub fn grid_count(len: usize, cell: usize, spacing: usize) -> usize {
    if cell == 0 {
        return 0;
    }
    if spacing > 0 {
        len / (cell + spacing)
    } else {
        len / cell
    }
}

/// Split a sheet into square cells, row by row.
///
/// Partial cells at the right and bottom edges are ignored.
pub fn slice_grid(sheet: &PixelBuffer, cell: usize, spacing: usize) -> Result<Vec<GridCell>> {
    let cols = grid_count(sheet.width(), cell, spacing);
    let rows = grid_count(sheet.height(), cell, spacing);
    if cols == 0 || rows == 0 {
        return Err(PxTileError::Bounds {
            message: format!(
                "{}x{} sheet holds no {}x{} cells",
                sheet.width(),
                sheet.height(),
                cell,
                cell
            ),
            help: Some("Check the tile size and spacing".to_string()),
        });
    }

    let step = cell + spacing;
    let mut cells = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            let tile = sheet.crop(col * step, row * step, cell, cell)?;
            cells.push(GridCell { row, col, tile });
        }
    }
    Ok(cells)
}

/// Lay equally sized tiles out left-to-right, top-to-bottom in `cols` columns.
///
/// Unused slots in the last row stay transparent.
pub fn assemble_grid(tiles: &[PixelBuffer], cols: usize) -> Result<PixelBuffer> {
    let first = tiles
        .first()
        .ok_or_else(|| PxTileError::config("Cannot assemble an empty tile grid"))?;
    if cols == 0 {
        return Err(PxTileError::config("Grid needs at least one column"));
    }
    let (tw, th) = first.size();
    let rows = tiles.len().div_ceil(cols);

    let mut sheet = PixelBuffer::filled(cols * tw, rows * th, Colour::TRANSPARENT)?;
    for (i, tile) in tiles.iter().enumerate() {
        if tile.size() != (tw, th) {
            return Err(PxTileError::config(format!(
                "Tile {} is {}x{}, expected {}x{}",
                i,
                tile.width(),
                tile.height(),
                tw,
                th
            )));
        }
        sheet.paste(tile, (i % cols) * tw, (i / cols) * th)?;
    }
    Ok(sheet)
}

/// How an empty tileset slot is regenerated from its neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMethod {
    /// Horizontal mirror of the neighbour.
    #[default]
    Mirror,
    /// Neighbour rotated 90 degrees counter-clockwise.
    Rotate,
    /// Verbatim copy of the neighbour.
    Copy,
}

impl FromStr for FillMethod {
    type Err = PxTileError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mirror" => Ok(FillMethod::Mirror),
            "rotate" => Ok(FillMethod::Rotate),
            "copy" => Ok(FillMethod::Copy),
            _ => Err(PxTileError::Configuration {
                message: format!("Unknown fill method: {}", s),
                help: Some("Use mirror, rotate, or copy".to_string()),
            }),
        }
    }
}

impl fmt::Display for FillMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillMethod::Mirror => write!(f, "mirror"),
            FillMethod::Rotate => write!(f, "rotate"),
            FillMethod::Copy => write!(f, "copy"),
        }
    }
}

/// Result of [`fill_gaps`].
#[derive(Debug, Clone)]
pub struct FilledTileset {
    pub sheet: PixelBuffer,
    /// Number of slots that were regenerated.
    pub filled: usize,
}

/// Neighbour search order: N, W, E, S, then the diagonals.
const NEIGHBOUR_ORDER: [(isize, isize); 8] = [
    (0, -1),
    (-1, 0),
    (1, 0),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

fn is_gap(tile: &PixelBuffer) -> bool {
    tile.transparent_ratio(GAP_ALPHA) >= GAP_RATIO
}

/// Replace empty slots in a `cols`-wide tileset with a transformed copy of
/// the nearest non-empty neighbour.
///
/// `cols` is capped at the number of whole tiles across the sheet.
///
/// Neighbours are always read from the original sheet, so freshly filled
/// slots never seed other fills. Slots with no usable neighbour stay empty.
pub fn fill_gaps(
    sheet: &PixelBuffer,
    tile_size: usize,
    cols: usize,
    method: FillMethod,
) -> Result<FilledTileset> {
    if tile_size == 0 {
        return Err(PxTileError::config("Tile size must be non-zero"));
    }
    let rows = sheet.height() / tile_size;
    let cols = cols.min(sheet.width() / tile_size);

    let mut cells = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            cells.push(sheet.crop(col * tile_size, row * tile_size, tile_size, tile_size)?);
        }
    }
    let gaps: Vec<bool> = cells.iter().map(is_gap).collect();

    let mut result = sheet.clone();
    let mut filled = 0;
    for row in 0..rows {
        for col in 0..cols {
            if !gaps[row * cols + col] {
                continue;
            }
            let neighbour = NEIGHBOUR_ORDER.iter().find_map(|&(dc, dr)| {
                let nc = col.checked_add_signed(dc).filter(|&c| c < cols)?;
                let nr = row.checked_add_signed(dr).filter(|&r| r < rows)?;
                let index = nr * cols + nc;
                (!gaps[index]).then(|| &cells[index])
            });
            let Some(source) = neighbour else {
                continue;
            };

            let generated = match method {
                FillMethod::Mirror => source.flip_horizontal(),
                FillMethod::Rotate => source.rotate90(),
                FillMethod::Copy => source.clone(),
            };
            result.paste(&generated, col * tile_size, row * tile_size)?;
            filled += 1;
        }
    }

    Ok(FilledTileset {
        sheet: result,
        filled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Colour = Colour::rgb(255, 0, 0);
    const BLUE: Colour = Colour::rgb(0, 0, 255);

    #[test]
    fn test_grid_count_with_spacing() {
        assert_eq!(grid_count(64, 16, 0), 4);
        assert_eq!(grid_count(68, 16, 1), 4);
        assert_eq!(grid_count(67, 16, 1), 3);
        assert_eq!(grid_count(10, 0, 0), 0);
    }

    #[test]
    fn test_slice_grid_order_and_spacing() {
        // 2x2 cells of size 2 separated by one transparent pixel.
        let sheet = PixelBuffer::from_fn(6, 6, |x, y| {
            if x % 3 == 2 || y % 3 == 2 {
                Colour::TRANSPARENT
            } else {
                Colour::rgb((x / 3) as u8, (y / 3) as u8, 0)
            }
        })
        .unwrap();
        let cells = slice_grid(&sheet, 2, 1).unwrap();
        assert_eq!(cells.len(), 4);
        assert_eq!((cells[1].row, cells[1].col), (0, 1));
        assert_eq!(cells[1].tile.get(0, 0), Some(Colour::rgb(1, 0, 0)));
        assert_eq!(cells[2].tile.get(1, 1), Some(Colour::rgb(0, 1, 0)));
        assert!(cells.iter().all(|c| c.tile.pixels().iter().all(|p| p.a == 255)));
    }

    #[test]
    fn test_slice_grid_too_small() {
        let sheet = PixelBuffer::filled(4, 4, RED).unwrap();
        assert!(matches!(slice_grid(&sheet, 8, 0), Err(PxTileError::Bounds { .. })));
    }

    #[test]
    fn test_assemble_grid_layout() {
        let tiles = vec![
            PixelBuffer::filled(2, 2, RED).unwrap(),
            PixelBuffer::filled(2, 2, BLUE).unwrap(),
            PixelBuffer::filled(2, 2, RED).unwrap(),
        ];
        let sheet = assemble_grid(&tiles, 2).unwrap();
        assert_eq!(sheet.size(), (4, 4));
        assert_eq!(sheet.get(2, 0), Some(BLUE));
        assert_eq!(sheet.get(0, 2), Some(RED));
        assert_eq!(sheet.get(3, 3), Some(Colour::TRANSPARENT));
    }

    #[test]
    fn test_assemble_grid_rejects_mixed_sizes() {
        let tiles = vec![
            PixelBuffer::filled(2, 2, RED).unwrap(),
            PixelBuffer::filled(3, 2, RED).unwrap(),
        ];
        assert!(assemble_grid(&tiles, 2).is_err());
        assert!(assemble_grid(&[], 2).is_err());
    }

    #[test]
    fn test_fill_method_parse() {
        assert_eq!("rotate".parse::<FillMethod>().unwrap(), FillMethod::Rotate);
        assert!("noise".parse::<FillMethod>().is_err());
        assert_eq!(FillMethod::Mirror.to_string(), "mirror");
    }

    #[test]
    fn test_fill_gaps_mirrors_north_neighbour() {
        // 2x2 grid of 2x2 tiles; bottom-left slot empty.
        let sheet = PixelBuffer::from_fn(4, 4, |x, y| match (x, y) {
            (0, 0) => RED,
            (1, 0) | (0, 1) | (1, 1) => BLUE,
            (_, _) if x < 2 && y >= 2 => Colour::TRANSPARENT,
            _ => RED,
        })
        .unwrap();
        let out = fill_gaps(&sheet, 2, 2, FillMethod::Mirror).unwrap();
        assert_eq!(out.filled, 1);
        // North neighbour is the top-left tile, mirrored.
        assert_eq!(out.sheet.get(0, 2), Some(BLUE));
        assert_eq!(out.sheet.get(1, 2), Some(RED));
    }

    #[test]
    fn test_fill_gaps_leaves_isolated_slots() {
        let sheet = PixelBuffer::filled(4, 4, Colour::TRANSPARENT).unwrap();
        let out = fill_gaps(&sheet, 2, 2, FillMethod::Copy).unwrap();
        assert_eq!(out.filled, 0);
        assert_eq!(out.sheet, sheet);
    }

    #[test]
    fn test_fill_gaps_caps_columns_to_sheet_width() {
        // Two 4px tiles across, right one empty, default-style column count.
        let sheet = PixelBuffer::from_fn(8, 4, |x, _| if x < 4 { RED } else { Colour::TRANSPARENT })
            .unwrap();
        let out = fill_gaps(&sheet, 4, 8, FillMethod::Copy).unwrap();
        assert_eq!(out.filled, 1);
        assert_eq!(out.sheet.get(6, 2), Some(RED));
        assert_eq!(out.sheet.width(), 8);
    }
}
