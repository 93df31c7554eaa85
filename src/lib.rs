//! pxtile - Pixel-art tile generator
//!
//! A library for producing game-ready tile art from hand-drawn source tiles:
//! edge-preserving upscaling, palette extraction and swapping, Bayer-dithered
//! transitions and full 47-tile bitmask autotile sets.

pub mod autotile;
pub mod cli;
pub mod discovery;
pub mod dither;
pub mod error;
pub mod io;
pub mod output;
pub mod recolor;
pub mod tileset;
pub mod types;
pub mod upscale;

pub use autotile::{
    compute_bitmask, generate_autotile47_set, generate_autotile47_tile, AutotileMapping,
    AutotileSet, Bitmask, Neighbors,
};
pub use discovery::{discover, Manifest, Project};
pub use dither::{dither_blend, dithered_transition_set, edge_set, edge_tile, Direction, DitherMatrix};
pub use error::{PxTileError, Result};
pub use io::{load_palette, load_png, save_palette, write_json, write_png};
pub use recolor::{
    color_shift, compare_palettes, extract_palette, generate_palette_variants, normalize_palette,
    palette_swap, PaletteComparisonReport, PaletteStats,
};
pub use tileset::{assemble_grid, fill_gaps, slice_grid, FillMethod};
pub use types::{Colour, Palette, PixelBuffer};
pub use upscale::{batch_resize_tilemap, resize_tile, scale2x, scale3x, ResizeMethod};
