//! Colour shift command.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::io::{load_png, write_png};
use crate::output::display_path;
use crate::recolor::color_shift;

use super::Context;

/// Shift a tile's hue, saturation and brightness
#[derive(Args, Debug)]
pub struct ColorShiftArgs {
    /// Tile to recolour
    #[arg(long, short)]
    pub input: PathBuf,

    /// Output PNG path
    #[arg(long, short)]
    pub output: PathBuf,

    /// Hue rotation in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub hue: f64,

    /// Saturation offset (-1.0 to 1.0)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub saturation: f64,

    /// Brightness (HSV value) offset (-1.0 to 1.0)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub brightness: f64,
}

pub fn run(args: ColorShiftArgs, ctx: &Context) -> Result<()> {
    let tile = load_png(&args.input)?;
    ctx.printer.status(
        "Shifting",
        &format!(
            "{} (hue {:+}, saturation {:+}, brightness {:+})",
            display_path(&args.input),
            args.hue,
            args.saturation,
            args.brightness
        ),
    );

    let shifted = color_shift(&tile, args.hue, args.saturation, args.brightness);
    write_png(&shifted, &args.output)?;
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
    fn test_color_shift_rotates_hue() {
        let dir = tempdir().unwrap();
        let input = solid_png(dir.path(), "red.png", 4, Colour::rgb(255, 0, 0));
        let output = dir.path().join("blue.png");

        let args = ColorShiftArgs {
            input,
            output: output.clone(),
            hue: 240.0,
            saturation: 0.0,
            brightness: 0.0,
        };
        run(args, &context(dir.path())).unwrap();

        assert_eq!(load_png(&output).unwrap().get(0, 0), Some(Colour::rgb(0, 0, 255)));
    }

    #[test]
    fn test_negative_values_parse() {
        use crate::cli::{Cli, Commands};
        use clap::Parser;

        let cli = Cli::try_parse_from([
            "pxtile", "color-shift", "-i", "a.png", "-o", "b.png", "--hue", "-25", "--saturation", "-0.45",
        ])
        .unwrap();
        let Commands::ColorShift(args) = cli.command else {
            panic!("expected color-shift");
        };
        assert_eq!(args.hue, -25.0);
        assert_eq!(args.saturation, -0.45);
    }
}
