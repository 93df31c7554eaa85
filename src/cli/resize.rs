//! Resize and batch-resize commands.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::io::{load_png, write_json, write_png};
use crate::output::{display_path, plural};
use crate::upscale::{batch_resize_tilemap, resize_tile, ResizeMethod};

use super::Context;

/// Resize a single tile
#[derive(Args, Debug)]
pub struct ResizeArgs {
    /// Tile to resize
    #[arg(long, short)]
    pub input: PathBuf,

    /// Output PNG path
    #[arg(long, short)]
    pub output: PathBuf,

    /// Target edge length in pixels
    #[arg(long)]
    pub to_size: usize,

    /// nearest, scale2x, scale3x or hqx (default: from pxtile.yaml)
    #[arg(long)]
    pub method: Option<ResizeMethod>,
}

fn method(flag: Option<ResizeMethod>, ctx: &Context) -> Result<ResizeMethod> {
    match flag {
        Some(method) => Ok(method),
        None => ctx.manifest().resize_method(),
    }
}

pub fn run(args: ResizeArgs, ctx: &Context) -> Result<()> {
    let method = method(args.method, ctx)?;
    let tile = load_png(&args.input)?;
    ctx.printer.status(
        "Resizing",
        &format!(
            "{} ({}x{} -> {}x{}, {})",
            display_path(&args.input),
            tile.width(),
            tile.height(),
            args.to_size,
            args.to_size,
            method
        ),
    );

    let resized = resize_tile(&tile, args.to_size, method)?;
    write_png(&resized, &args.output)?;
    ctx.printer.success("Finished", &display_path(&args.output));
    Ok(())
}

/// Resize every tile of a tilemap sheet
#[derive(Args, Debug)]
pub struct BatchResizeArgs {
    /// Tilemap sheet to resize
    #[arg(long, short)]
    pub input: PathBuf,

    /// Output PNG path for the resized sheet
    #[arg(long, short)]
    pub output: PathBuf,

    /// Source tile edge length
    #[arg(long)]
    pub from_size: usize,

    /// Target tile edge length
    #[arg(long)]
    pub to_size: usize,

    /// Gap between source tiles in pixels
    #[arg(long, default_value_t = 0)]
    pub spacing: usize,

    /// nearest, scale2x, scale3x or hqx (default: from pxtile.yaml)
    #[arg(long)]
    pub method: Option<ResizeMethod>,

    /// Also write a JSON report of the resize
    #[arg(long)]
    pub report: Option<PathBuf>,
}

pub fn run_batch(args: BatchResizeArgs, ctx: &Context) -> Result<()> {
    let method = method(args.method, ctx)?;
    let sheet = load_png(&args.input)?;
    ctx.printer.status("Slicing", &display_path(&args.input));

    let result = batch_resize_tilemap(&sheet, args.from_size, args.to_size, args.spacing, method)?;
    let report = &result.report;
    ctx.printer.verbose(
        "Grid",
        &format!("{} cols x {} rows, spacing {}", report.cols, report.rows, args.spacing),
    );
    ctx.printer.status(
        "Resized",
        &format!(
            "{} ({} -> {}, {})",
            plural(report.total_tiles, "tile", "tiles"),
            report.from_size,
            report.to_size,
            method
        ),
    );

    write_png(&result.sheet, &args.output)?;
    if let Some(path) = &args.report {
        write_json(report, path)?;
        ctx.printer.info("Report", &display_path(path));
    }
    ctx.printer.success("Finished", &display_path(&args.output));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_support::{context, solid_png};
    use crate::types::Colour;
    use tempfile::tempdir;

    #[test]
    fn test_resize_writes_target_size() {
        let dir = tempdir().unwrap();
        let input = solid_png(dir.path(), "grass.png", 16, Colour::rgb(72, 144, 56));
        let output = dir.path().join("out/grass_32.png");

        let args = ResizeArgs {
            input,
            output: output.clone(),
            to_size: 32,
            method: Some(ResizeMethod::Scale2x),
        };
        run(args, &context(dir.path())).unwrap();

        let resized = load_png(&output).unwrap();
        assert_eq!(resized.size(), (32, 32));
    }

    #[test]
    fn test_batch_resize_with_report() {
        let dir = tempdir().unwrap();
        let input = solid_png(dir.path(), "sheet.png", 32, Colour::rgb(40, 88, 184));
        let output = dir.path().join("sheet_x2.png");
        let report = dir.path().join("sheet_x2.json");

        let args = BatchResizeArgs {
            input,
            output: output.clone(),
            from_size: 16,
            to_size: 32,
            spacing: 0,
            method: None,
            report: Some(report.clone()),
        };
        run_batch(args, &context(dir.path())).unwrap();

        assert_eq!(load_png(&output).unwrap().size(), (64, 64));
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(report).unwrap()).unwrap();
        assert_eq!(json["totalTiles"], 4);
        assert_eq!(json["method"], "nearest");
    }
}
