//! 47-tile autotile command.

use std::path::PathBuf;

use clap::Args;

use crate::autotile::generate_autotile47_set;
use crate::error::Result;
use crate::io::{load_png, write_json, write_png};
use crate::output::{display_path, plural};

use super::{base_name, Context};

/// Generate a full 47-tile bitmask autotile set
#[derive(Args, Debug)]
pub struct Autotile47Args {
    /// Centre (foreground terrain) tile
    #[arg(long, short)]
    pub input: PathBuf,

    /// Background terrain tile
    #[arg(long)]
    pub bg_tile: PathBuf,

    /// Output directory (default: from pxtile.yaml)
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Base name for generated files (default: input file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Bayer matrix size: 2, 4 or 8 (default: from pxtile.yaml)
    #[arg(long)]
    pub matrix_size: Option<usize>,

    /// Only write the sheet and mapping, not the individual tiles
    #[arg(long)]
    pub sheet_only: bool,
}

pub fn run(args: Autotile47Args, ctx: &Context) -> Result<()> {
    let matrix = ctx.matrix(args.matrix_size)?;
    let output_dir = ctx.output_dir(args.output_dir);
    let base = base_name(args.name, &args.input);

    let center = load_png(&args.input)?;
    let background = load_png(&args.bg_tile)?;
    ctx.printer.status(
        "Autotiling",
        &format!(
            "{} over {} ({})",
            display_path(&args.input),
            display_path(&args.bg_tile),
            matrix
        ),
    );

    let set = generate_autotile47_set(&center, &background, matrix)?;

    if !args.sheet_only {
        for tile in &set.tiles {
            let path = output_dir.join(format!("{}_{}_{:03}.png", base, tile.name, tile.bitmask));
            write_png(&tile.tile, &path)?;
            ctx.printer.verbose("Tile", &display_path(&path));
        }
    }

    let sheet_path = output_dir.join(format!("{}_autotile47_sheet.png", base));
    write_png(&set.sheet, &sheet_path)?;
    ctx.printer.info("Sheet", &display_path(&sheet_path));

    let map_path = output_dir.join(format!("{}_autotile47_map.json", base));
    write_json(&set.mapping, &map_path)?;
    ctx.printer.info("Mapping", &display_path(&map_path));

    ctx.printer.success("Finished", &plural(set.tiles.len(), "tile", "tiles"));
    Ok(())
}
