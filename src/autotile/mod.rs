//! 47-tile blob autotile synthesis.
//!
//! Each output tile is built from four quadrants. A quadrant looks at its two
//! adjacent edges and the diagonal between them, then shows the centre
//! terrain, the background, or a dithered transition between the two.

mod bitmask;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dither::{build_threshold_mask, select_with_mask, Direction, DitherMatrix};
use crate::error::Result;
use crate::tileset::assemble_grid;
use crate::types::PixelBuffer;

pub use bitmask::{category_name, compute_bitmask, Bitmask, Neighbors, BLOB47, E, N, NE, NW, S, SE, SW, W};

/// Columns in the packed autotile sheet.
pub const SHEET_COLS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// (vertical edge, horizontal edge, diagonal) bits that border this quadrant.
    fn bits(self) -> (Bitmask, Bitmask, Bitmask) {
        match self {
            Quadrant::TopLeft => (N, W, NW),
            Quadrant::TopRight => (N, E, NE),
            Quadrant::BottomLeft => (S, W, SW),
            Quadrant::BottomRight => (S, E, SE),
        }
    }

    /// Gradient when only the vertical edge continues: background fades in
    /// from the open horizontal side.
    fn vertical_only(self) -> Direction {
        match self {
            Quadrant::TopLeft | Quadrant::BottomLeft => Direction::Right,
            Quadrant::TopRight | Quadrant::BottomRight => Direction::Left,
        }
    }

    /// Gradient when only the horizontal edge continues.
    fn horizontal_only(self) -> Direction {
        match self {
            Quadrant::TopLeft | Quadrant::TopRight => Direction::Bottom,
            Quadrant::BottomLeft | Quadrant::BottomRight => Direction::Top,
        }
    }

    fn inner_corner(self) -> Direction {
        match self {
            Quadrant::TopLeft => Direction::CornerTopLeft,
            Quadrant::TopRight => Direction::CornerTopRight,
            Quadrant::BottomLeft => Direction::CornerBottomLeft,
            Quadrant::BottomRight => Direction::CornerBottomRight,
        }
    }

    /// (x, y, width, height) inside a `width x height` tile.
    ///
    /// Right and bottom quadrants take the odd pixel.
    fn rect(self, width: usize, height: usize) -> (usize, usize, usize, usize) {
        let (hw, hh) = (width / 2, height / 2);
        match self {
            Quadrant::TopLeft => (0, 0, hw, hh),
            Quadrant::TopRight => (hw, 0, width - hw, hh),
            Quadrant::BottomLeft => (0, hh, hw, height - hh),
            Quadrant::BottomRight => (hw, hh, width - hw, height - hh),
        }
    }
}

enum Fill {
    Centre,
    Background,
    Dither(Direction),
}

fn quadrant_fill(quadrant: Quadrant, mask: Bitmask) -> Fill {
    let (vertical, horizontal, diagonal) = quadrant.bits();
    let v = mask & vertical != 0;
    let h = mask & horizontal != 0;
    let d = mask & diagonal != 0;
    match (v, h, d) {
        (true, true, true) => Fill::Centre,
        (true, true, false) => Fill::Dither(quadrant.inner_corner()),
        (true, false, _) => Fill::Dither(quadrant.vertical_only()),
        (false, true, _) => Fill::Dither(quadrant.horizontal_only()),
        (false, false, _) => Fill::Background,
    }
}

/// Compose one autotile for `mask`.
///
/// The background is nearest-resized to the centre's size. Dithered
/// quadrants show background where the mask is set and centre elsewhere.
pub fn generate_autotile47_tile(
    center: &PixelBuffer,
    background: &PixelBuffer,
    mask: Bitmask,
    matrix: DitherMatrix,
) -> Result<PixelBuffer> {
    let (width, height) = center.size();
    let background = background.resize_nearest(width, height)?;
    let mut tile = center.clone();

    for quadrant in Quadrant::ALL {
        let (x, y, qw, qh) = quadrant.rect(width, height);
        // Degenerate 1-pixel tiles have empty left/top quadrants.
        if qw == 0 || qh == 0 {
            continue;
        }
        let part = match quadrant_fill(quadrant, mask) {
            Fill::Centre => continue,
            Fill::Background => background.crop(x, y, qw, qh)?,
            Fill::Dither(direction) => {
                let c = center.crop(x, y, qw, qh)?;
                let b = background.crop(x, y, qw, qh)?;
                let threshold = build_threshold_mask(qw, qh, direction, matrix);
                select_with_mask(&c, &b, &threshold)?
            }
        };
        tile.paste(&part, x, y)?;
    }

    Ok(tile)
}

/// One generated autotile.
#[derive(Debug, Clone)]
pub struct AutotileTile {
    pub bitmask: Bitmask,
    pub name: &'static str,
    pub tile: PixelBuffer,
}

/// Sheet position and category of a bitmask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub name: String,
    pub index: usize,
}

/// Lookup table written next to the autotile sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutotileMapping {
    pub tile_size: usize,
    pub cols: usize,
    pub rows: usize,
    pub total_tiles: usize,
    pub bitmask_map: BTreeMap<Bitmask, MappingEntry>,
}

/// The complete 47-tile set.
#[derive(Debug, Clone)]
pub struct AutotileSet {
    /// Tiles in ascending bitmask order.
    pub tiles: Vec<AutotileTile>,
    pub sheet: PixelBuffer,
    pub mapping: AutotileMapping,
}

/// Generate every blob tile, the packed sheet and its mapping.
pub fn generate_autotile47_set(
    center: &PixelBuffer,
    background: &PixelBuffer,
    matrix: DitherMatrix,
) -> Result<AutotileSet> {
    let tiles = BLOB47
        .iter()
        .map(|&(bitmask, name)| {
            Ok(AutotileTile {
                bitmask,
                name,
                tile: generate_autotile47_tile(center, background, bitmask, matrix)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let buffers: Vec<PixelBuffer> = tiles.iter().map(|t| t.tile.clone()).collect();
    let sheet = assemble_grid(&buffers, SHEET_COLS)?;

    let bitmask_map = tiles
        .iter()
        .enumerate()
        .map(|(index, t)| {
            (
                t.bitmask,
                MappingEntry {
                    name: t.name.to_string(),
                    index,
                },
            )
        })
        .collect();

    let mapping = AutotileMapping {
        tile_size: center.width(),
        cols: SHEET_COLS,
        rows: tiles.len().div_ceil(SHEET_COLS),
        total_tiles: tiles.len(),
        bitmask_map,
    };

    Ok(AutotileSet {
        tiles,
        sheet,
        mapping,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;
    use pretty_assertions::assert_eq;

    const GRASS: Colour = Colour::rgb(72, 144, 56);
    const WATER: Colour = Colour::rgb(40, 88, 184);

    fn grass() -> PixelBuffer {
        PixelBuffer::filled(16, 16, GRASS).unwrap()
    }

    fn water() -> PixelBuffer {
        PixelBuffer::filled(16, 16, WATER).unwrap()
    }

    #[test]
    fn test_isolated_is_background() {
        let tile = generate_autotile47_tile(&grass(), &water(), 0, DitherMatrix::Bayer4).unwrap();
        assert!(tile.pixels().iter().all(|&p| p == WATER));
    }

    #[test]
    fn test_full_is_centre() {
        let tile = generate_autotile47_tile(&grass(), &water(), 255, DitherMatrix::Bayer4).unwrap();
        assert_eq!(tile, grass());
    }

    #[test]
    fn test_background_is_resized() {
        let small_water = PixelBuffer::filled(4, 4, WATER).unwrap();
        let tile = generate_autotile47_tile(&grass(), &small_water, 0, DitherMatrix::Bayer4).unwrap();
        assert_eq!(tile.size(), (16, 16));
        assert!(tile.pixels().iter().all(|&p| p == WATER));
    }

    #[test]
    fn test_ns_pipe_dithers_open_sides() {
        let mask = N | S;
        assert_eq!(category_name(mask), Some("ns_pipe"));
        let tile = generate_autotile47_tile(&grass(), &water(), mask, DitherMatrix::Bayer4).unwrap();

        // Every quadrant mixes both terrains.
        for quadrant in Quadrant::ALL {
            let (x, y, w, h) = quadrant.rect(16, 16);
            let part = tile.crop(x, y, w, h).unwrap();
            assert!(part.pixels().contains(&GRASS), "{:?} lacks grass", quadrant);
            assert!(part.pixels().contains(&WATER), "{:?} lacks water", quadrant);
        }
        // Open west and east edges are water; the middle columns stay grass.
        for y in 0..16 {
            assert_eq!(tile.get(0, y), Some(WATER));
            assert_eq!(tile.get(15, y), Some(WATER));
            assert_eq!(tile.get(7, y), Some(GRASS));
            assert_eq!(tile.get(8, y), Some(GRASS));
        }
    }

    #[test]
    fn test_inner_corner_only_in_missing_diagonal() {
        // Everything except the north-east diagonal.
        let mask = 255 & !NE;
        let tile = generate_autotile47_tile(&grass(), &water(), mask, DitherMatrix::Bayer4).unwrap();
        let top_right = tile.crop(8, 0, 8, 8).unwrap();
        assert!(top_right.pixels().contains(&WATER));
        let rest = [tile.crop(0, 0, 8, 8), tile.crop(0, 8, 8, 8), tile.crop(8, 8, 8, 8)];
        for part in rest {
            assert!(part.unwrap().pixels().iter().all(|&p| p == GRASS));
        }
    }

    #[test]
    fn test_odd_size_quadrants() {
        assert_eq!(Quadrant::TopLeft.rect(5, 3), (0, 0, 2, 1));
        assert_eq!(Quadrant::BottomRight.rect(5, 3), (2, 1, 3, 2));
        let centre = PixelBuffer::filled(5, 3, GRASS).unwrap();
        let tile = generate_autotile47_tile(&centre, &water(), W | E, DitherMatrix::Bayer2).unwrap();
        assert_eq!(tile.size(), (5, 3));
    }

    #[test]
    fn test_full_set() {
        let set = generate_autotile47_set(&grass(), &water(), DitherMatrix::Bayer4).unwrap();
        assert_eq!(set.tiles.len(), 47);
        assert_eq!(set.sheet.size(), (8 * 16, 6 * 16));
        assert_eq!(set.mapping.rows, 6);
        assert_eq!(set.mapping.bitmask_map[&17].name, "ns_pipe");
        assert_eq!(set.mapping.bitmask_map[&255].index, 46);

        // Unused cells after the 47th tile stay transparent.
        assert_eq!(set.sheet.get(8 * 16 - 1, 6 * 16 - 1), Some(Colour::TRANSPARENT));
        // Sheet cell 0 is the isolated tile.
        assert_eq!(set.sheet.get(0, 0), Some(WATER));
    }

    #[test]
    fn test_mapping_json() {
        let set = generate_autotile47_set(&grass(), &water(), DitherMatrix::Bayer4).unwrap();
        let json = serde_json::to_value(&set.mapping).unwrap();
        assert_eq!(json["tileSize"], 16);
        assert_eq!(json["totalTiles"], 47);
        assert_eq!(json["bitmaskMap"]["17"]["name"], "ns_pipe");
        assert_eq!(json["bitmaskMap"]["0"]["index"], 0);
    }
}
