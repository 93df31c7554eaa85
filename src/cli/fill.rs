//! Gap-filling command for partially drawn tilesets.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::io::{load_png, write_png};
use crate::output::{display_path, plural};
use crate::tileset::{fill_gaps, FillMethod};

use super::Context;

/// Fill empty tileset slots from their neighbours
#[derive(Args, Debug)]
pub struct FillGapsArgs {
    /// Tileset sheet
    #[arg(long, short)]
    pub input: PathBuf,

    /// Output PNG path
    #[arg(long, short)]
    pub output: PathBuf,

    /// Tile edge length in pixels
    #[arg(long, default_value_t = 16)]
    pub tile_size: usize,

    /// Number of columns in the tileset grid
    #[arg(long, default_value_t = 8)]
    pub cols: usize,

    /// How a gap is derived from its neighbour: mirror, rotate or copy
    #[arg(long, default_value = "mirror")]
    pub method: FillMethod,
}

pub fn run(args: FillGapsArgs, ctx: &Context) -> Result<()> {
    let sheet = load_png(&args.input)?;
    ctx.printer.status(
        "Scanning",
        &format!(
            "{} ({} columns of {}px, {})",
            display_path(&args.input),
            args.cols,
            args.tile_size,
            args.method
        ),
    );

    let result = fill_gaps(&sheet, args.tile_size, args.cols, args.method)?;
    if result.filled == 0 {
        ctx.printer.info("Unchanged", "no fillable gaps found");
    } else {
        ctx.printer.status("Filled", &plural(result.filled, "gap", "gaps"));
    }

    write_png(&result.sheet, &args.output)?;
    ctx.printer.success("Finished", &display_path(&args.output));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_support::context;
    use crate::types::{Colour, PixelBuffer};
    use tempfile::tempdir;

    #[test]
    fn test_fill_gaps_copies_neighbour() {
        let dir = tempdir().unwrap();
        let stone = Colour::rgb(120, 120, 130);
        let mut sheet = PixelBuffer::filled(8, 4, Colour::TRANSPARENT).unwrap();
        sheet.paste(&PixelBuffer::filled(4, 4, stone).unwrap(), 0, 0).unwrap();
        let input = dir.path().join("tileset.png");
        write_png(&sheet, &input).unwrap();
        let output = dir.path().join("filled.png");

        let args = FillGapsArgs {
            input,
            output: output.clone(),
            tile_size: 4,
            cols: 8,
            method: FillMethod::Copy,
        };
        run(args, &context(dir.path())).unwrap();

        let filled = load_png(&output).unwrap();
        assert_eq!(filled.get(7, 3), Some(stone));
    }
}
