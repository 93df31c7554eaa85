pub mod autotile;
pub mod compare;
pub mod completions;
pub mod dither;
pub mod fill;
pub mod palette;
pub mod resize;
pub mod shift;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::discovery::{Manifest, Project};
use crate::dither::DitherMatrix;
use crate::error::Result;
use crate::output::Printer;

/// pxtile - Pixel-art tile generator
#[derive(Parser, Debug)]
#[command(name = "pxtile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print extra detail for each step
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resize a single tile (pixel-art safe)
    Resize(resize::ResizeArgs),

    /// Resize every tile of a tilemap sheet
    BatchResize(resize::BatchResizeArgs),

    /// Create a colour variant by shifting hue, saturation and brightness
    ColorShift(shift::ColorShiftArgs),

    /// Extract a palette from a tile or tilemap
    PaletteExtract(palette::PaletteExtractArgs),

    /// Remap a tile's colours onto a palette file
    PaletteSwap(palette::PaletteSwapArgs),

    /// Generate palette-swapped variants of a tile
    PaletteVariants(palette::PaletteVariantsArgs),

    /// Pull a tile's colours toward a reference palette
    NormalizePalette(palette::NormalizePaletteArgs),

    /// Bayer-dithered transition between two tiles
    DitherBlend(dither::DitherBlendArgs),

    /// Full set of dithered transitions between two tiles
    DitherTransitions(dither::DitherTransitionsArgs),

    /// Dithered edge tiles fading a tile into a background
    Edges(dither::EdgesArgs),

    /// Full 47-tile bitmask autotile set
    #[command(name = "autotile47")]
    Autotile47(autotile::Autotile47Args),

    /// Compare two tilemap palettes for compatibility
    ComparePalettes(compare::ComparePalettesArgs),

    /// Fill empty tileset slots from their neighbours
    FillGaps(fill::FillGapsArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Shared state for every subcommand: status output and project defaults.
#[derive(Debug, Clone)]
pub struct Context {
    pub printer: Printer,
    pub project: Project,
}

impl Context {
    pub fn new(printer: Printer, project: Project) -> Self {
        Self { printer, project }
    }

    /// The project manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.project.manifest
    }

    /// Dither matrix from the flag, falling back to the manifest.
    pub fn matrix(&self, flag: Option<usize>) -> Result<DitherMatrix> {
        match flag {
            Some(size) => DitherMatrix::new(size),
            None => self.manifest().matrix(),
        }
    }

    /// Output directory from the flag, falling back to the manifest's
    /// output directory under the project root.
    pub fn output_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.unwrap_or_else(|| self.project.root.join(&self.manifest().output))
    }
}

/// Base name for generated files: the explicit name or the input's file stem.
pub(crate) fn base_name(name: Option<String>, input: &Path) -> String {
    name.unwrap_or_else(|| {
        input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tile".to_string())
    })
}
