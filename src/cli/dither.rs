//! Dithered blend, transition set and edge commands.

use std::path::PathBuf;

use clap::Args;

use crate::dither::{dither_blend, dithered_transition_set, edge_set, Direction};
use crate::error::Result;
use crate::io::{load_png, write_png};
use crate::output::{display_path, plural};

use super::{base_name, Context};

/// Blend two tiles with an ordered-dither transition
#[derive(Args, Debug)]
pub struct DitherBlendArgs {
    /// Tile the transition starts from
    #[arg(long)]
    pub tile_a: PathBuf,

    /// Tile the transition dithers into
    #[arg(long)]
    pub tile_b: PathBuf,

    /// Output PNG path
    #[arg(long, short)]
    pub output: PathBuf,

    /// Gradient direction (top, bottom, left, right, diagonal, radial, corner_tl, ...)
    #[arg(long, default_value = "left")]
    pub direction: Direction,

    /// Bayer matrix size: 2, 4 or 8 (default: from pxtile.yaml)
    #[arg(long)]
    pub matrix_size: Option<usize>,
}

pub fn run_blend(args: DitherBlendArgs, ctx: &Context) -> Result<()> {
    let matrix = ctx.matrix(args.matrix_size)?;
    let a = load_png(&args.tile_a)?;
    let b = load_png(&args.tile_b)?;
    if a.size() != b.size() {
        ctx.printer.verbose(
            "Resizing",
            &format!("{} to {}x{}", display_path(&args.tile_b), a.width(), a.height()),
        );
    }

    ctx.printer.status(
        "Dithering",
        &format!(
            "{} -> {} ({}, {})",
            display_path(&args.tile_a),
            display_path(&args.tile_b),
            args.direction,
            matrix
        ),
    );
    let blended = dither_blend(&a, &b, args.direction, matrix)?;
    write_png(&blended, &args.output)?;
    ctx.printer.success("Finished", &display_path(&args.output));
    Ok(())
}

/// Generate every dithered transition between two tiles
#[derive(Args, Debug)]
pub struct DitherTransitionsArgs {
    /// Tile the transitions start from
    #[arg(long)]
    pub tile_a: PathBuf,

    /// Tile the transitions dither into
    #[arg(long)]
    pub tile_b: PathBuf,

    /// Output directory (default: from pxtile.yaml)
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Base name for generated files (default: tile A's file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Bayer matrix size: 2, 4 or 8 (default: from pxtile.yaml)
    #[arg(long)]
    pub matrix_size: Option<usize>,
}

pub fn run_transitions(args: DitherTransitionsArgs, ctx: &Context) -> Result<()> {
    let matrix = ctx.matrix(args.matrix_size)?;
    let output_dir = ctx.output_dir(args.output_dir);
    let base = base_name(args.name, &args.tile_a);

    let a = load_png(&args.tile_a)?;
    let b = load_png(&args.tile_b)?;
    ctx.printer.status(
        "Dithering",
        &format!("{} -> {} ({})", display_path(&args.tile_a), display_path(&args.tile_b), matrix),
    );

    let set = dithered_transition_set(&a, &b, matrix)?;
    for (direction, tile) in &set {
        let path = output_dir.join(format!("{}_dither_{}.png", base, direction));
        write_png(tile, &path)?;
        ctx.printer.info("Transition", &format!("{} {}", direction, ctx.printer.dim(&display_path(&path))));
    }
    ctx.printer.success("Finished", &plural(set.len(), "transition", "transitions"));
    Ok(())
}

/// Generate dithered edge tiles for a tile
#[derive(Args, Debug)]
pub struct EdgesArgs {
    /// Centre tile
    #[arg(long, short)]
    pub input: PathBuf,

    /// Background tile (default: fade to transparency)
    #[arg(long)]
    pub bg_tile: Option<PathBuf>,

    /// Output directory (default: from pxtile.yaml)
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Base name for generated files (default: input file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Bayer matrix size: 2, 4 or 8 (default: from pxtile.yaml)
    #[arg(long)]
    pub matrix_size: Option<usize>,
}

pub fn run_edges(args: EdgesArgs, ctx: &Context) -> Result<()> {
    let matrix = ctx.matrix(args.matrix_size)?;
    let output_dir = ctx.output_dir(args.output_dir);
    let base = base_name(args.name, &args.input);

    let center = load_png(&args.input)?;
    let background = args.bg_tile.as_deref().map(load_png).transpose()?;
    let target = match &args.bg_tile {
        Some(path) => display_path(path),
        None => "transparency".to_string(),
    };
    ctx.printer.status("Edging", &format!("{} into {}", display_path(&args.input), target));

    let edges = edge_set(&center, background.as_ref(), matrix)?;
    for (direction, tile) in &edges {
        let path = output_dir.join(format!("{}_edge_{}.png", base, direction));
        write_png(tile, &path)?;
        ctx.printer.info("Edge", &format!("{} {}", direction, ctx.printer.dim(&display_path(&path))));
    }
    ctx.printer.success("Finished", &plural(edges.len(), "edge", "edges"));
    Ok(())
}
