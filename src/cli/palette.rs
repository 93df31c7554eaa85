//! Palette commands: extract, swap, variants and normalize.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::collect_pngs;
use crate::error::{PxTileError, Result};
use crate::io::{load_palette, load_png, save_palette, write_png};
use crate::output::{display_path, plural};
use crate::recolor::{extract_palette, generate_palette_variants, normalize_palette, palette_swap, DEFAULT_MAX_COLORS, MIN_ALPHA};
use crate::types::Colour;

use super::{base_name, Context};

/// Extract a colour palette from a tile or tilemap
#[derive(Args, Debug)]
pub struct PaletteExtractArgs {
    /// PNG file to extract colours from
    #[arg(long, short)]
    pub input: PathBuf,

    /// Output palette JSON (omit to only print the palette)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Maximum number of colours (default: from pxtile.yaml)
    #[arg(long)]
    pub max_colors: Option<usize>,
}

pub fn run_extract(args: PaletteExtractArgs, ctx: &Context) -> Result<()> {
    let max_colors = args.max_colors.unwrap_or(ctx.manifest().max_colors);
    let tile = load_png(&args.input)?;
    let palette = extract_palette(&tile, max_colors, MIN_ALPHA);

    let display = display_path(&args.input);
    if palette.is_empty() {
        ctx.printer.warning("Warning", &format!("{} has no visible pixels", display));
    }
    ctx.printer.status(
        "Sampled",
        &format!("{} from {}", plural(palette.len(), "colour", "colours"), display),
    );

    // Palette lines go to stdout
    for (i, rgb) in palette.iter().enumerate() {
        println!("$colour-{}: {}", i + 1, Colour::rgb(rgb[0], rgb[1], rgb[2]));
    }

    if let Some(path) = &args.output {
        save_palette(&palette, path)?;
        ctx.printer.success("Saved", &display_path(path));
    }
    Ok(())
}

/// Remap a tile onto a target palette file
#[derive(Args, Debug)]
pub struct PaletteSwapArgs {
    /// Tile to recolour
    #[arg(long, short)]
    pub input: PathBuf,

    /// Target palette JSON file
    #[arg(long)]
    pub palette: PathBuf,

    /// Output PNG path
    #[arg(long, short)]
    pub output: PathBuf,

    /// Manhattan RGB tolerance (default: from pxtile.yaml)
    #[arg(long)]
    pub tolerance: Option<u32>,
}

pub fn run_swap(args: PaletteSwapArgs, ctx: &Context) -> Result<()> {
    let tolerance = args.tolerance.unwrap_or(ctx.manifest().tolerance);
    let tile = load_png(&args.input)?;
    let source = extract_palette(&tile, DEFAULT_MAX_COLORS, MIN_ALPHA);
    if source.is_empty() {
        ctx.printer.warning(
            "Warning",
            &format!("{} has no visible pixels; copying unchanged", display_path(&args.input)),
        );
    }

    let target = load_palette(&args.palette)?;
    if target.len() != source.len() {
        ctx.printer.verbose(
            "Fitting",
            &format!("{} to {}", plural(target.len(), "colour", "colours"), source.len()),
        );
    }
    let target = target.fitted_to(&source);

    ctx.printer.status(
        "Swapping",
        &format!(
            "{} onto {} (tolerance {})",
            display_path(&args.input),
            display_path(&args.palette),
            tolerance
        ),
    );
    let swapped = palette_swap(&tile, &source, &target, tolerance)?;
    write_png(&swapped, &args.output)?;
    ctx.printer.success("Finished", &display_path(&args.output));
    Ok(())
}

/// Generate palette-swapped variants of a tile
#[derive(Args, Debug)]
pub struct PaletteVariantsArgs {
    /// Tile to recolour
    #[arg(long, short)]
    pub input: PathBuf,

    /// Output directory (default: from pxtile.yaml)
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Base name for generated files (default: input file stem)
    #[arg(long)]
    pub name: Option<String>,
}

pub fn run_variants(args: PaletteVariantsArgs, ctx: &Context) -> Result<()> {
    let output_dir = ctx.output_dir(args.output_dir);
    let base = base_name(args.name, &args.input);
    let presets = ctx.manifest().variant_presets()?;

    let tile = load_png(&args.input)?;
    ctx.printer.status("Recolouring", &display_path(&args.input));

    let variants = generate_palette_variants(&tile, presets.as_deref())?;
    if variants.is_empty() {
        ctx.printer.warning(
            "Warning",
            &format!("{} has no visible pixels; no variants written", display_path(&args.input)),
        );
        return Ok(());
    }

    for (name, variant) in &variants {
        let path = output_dir.join(format!("{}_{}.png", base, name));
        write_png(variant, &path)?;
        ctx.printer.info("Variant", &format!("{} {}", name, ctx.printer.dim(&display_path(&path))));
    }
    ctx.printer.success("Finished", &plural(variants.len(), "variant", "variants"));
    Ok(())
}

/// Pull tile colours toward a reference palette
#[derive(Args, Debug)]
pub struct NormalizePaletteArgs {
    /// Tile, or directory of tiles, to normalize
    #[arg(long, short)]
    pub input: PathBuf,

    /// Reference palette JSON file
    #[arg(long, short)]
    pub reference: PathBuf,

    /// Output PNG path, or directory when the input is a directory
    #[arg(long, short)]
    pub output: PathBuf,

    /// Blend strength from 0.0 to 1.0 (default: from pxtile.yaml)
    #[arg(long)]
    pub strength: Option<f64>,
}

pub fn run_normalize(args: NormalizePaletteArgs, ctx: &Context) -> Result<()> {
    let strength = args.strength.unwrap_or(ctx.manifest().strength);
    let reference = load_palette(&args.reference)?;
    if reference.is_empty() {
        ctx.printer.warning(
            "Warning",
            &format!("{} is empty; tiles are copied unchanged", display_path(&args.reference)),
        );
    }

    let inputs = collect_pngs(&args.input);
    if inputs.is_empty() {
        return Err(PxTileError::Io {
            path: args.input.clone(),
            message: "No PNG files found".to_string(),
        });
    }

    let batch = args.input.is_dir();
    for input in &inputs {
        let output = if batch {
            mirrored_path(input, &args.input, &args.output)
        } else {
            args.output.clone()
        };
        let tile = load_png(input)?;
        let normalized = normalize_palette(&tile, &reference, strength);
        write_png(&normalized, &output)?;
        ctx.printer.status(
            "Normalized",
            &format!("{} -> {}", display_path(input), display_path(&output)),
        );
    }

    ctx.printer.success(
        "Finished",
        &format!("{} (strength {})", plural(inputs.len(), "tile", "tiles"), strength),
    );
    Ok(())
}

/// Map `file` under `from_root` to the same relative location under `to_root`.
fn mirrored_path(file: &Path, from_root: &Path, to_root: &Path) -> PathBuf {
    match file.strip_prefix(from_root) {
        Ok(relative) => to_root.join(relative),
        Err(_) => to_root.join(file.file_name().unwrap_or(file.as_os_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_support::{context, solid_png};
    use crate::types::Palette;
    use tempfile::tempdir;

    const GRASS: Colour = Colour::rgb(64, 136, 48);

    #[test]
    fn test_extract_writes_palette() {
        let dir = tempdir().unwrap();
        let input = solid_png(dir.path(), "grass.png", 8, GRASS);
        let output = dir.path().join("grass_palette.json");

        let args = PaletteExtractArgs {
            input,
            output: Some(output.clone()),
            max_colors: None,
        };
        run_extract(args, &context(dir.path())).unwrap();

        assert_eq!(load_palette(&output).unwrap(), Palette::new(vec![[64, 136, 48]]));
    }

    #[test]
    fn test_swap_pads_short_palette() {
        let dir = tempdir().unwrap();
        let input = solid_png(dir.path(), "grass.png", 4, GRASS);
        let palette_path = dir.path().join("autumn.json");
        save_palette(&Palette::new(vec![[200, 120, 40], [1, 2, 3]]), &palette_path).unwrap();
        let output = dir.path().join("autumn.png");

        let args = PaletteSwapArgs {
            input,
            palette: palette_path,
            output: output.clone(),
            tolerance: None,
        };
        run_swap(args, &context(dir.path())).unwrap();

        assert_eq!(load_png(&output).unwrap().get(2, 2), Some(Colour::rgb(200, 120, 40)));
    }

    #[test]
    fn test_variants_use_default_output_dir() {
        let dir = tempdir().unwrap();
        let input = solid_png(dir.path(), "grass.png", 4, GRASS);

        let args = PaletteVariantsArgs {
            input,
            output_dir: None,
            name: None,
        };
        run_variants(args, &context(dir.path())).unwrap();

        for season in ["spring", "summer", "autumn", "winter", "night", "desert"] {
            assert!(dir.path().join(format!("dist/grass_{}.png", season)).exists());
        }
    }

    #[test]
    fn test_normalize_directory() {
        let dir = tempdir().unwrap();
        let tiles = dir.path().join("tiles");
        solid_png(&tiles, "a.png", 2, Colour::rgb(100, 100, 100));
        solid_png(&tiles.join("deep"), "b.png", 2, Colour::rgb(100, 100, 100));
        let reference = dir.path().join("ref.json");
        save_palette(&Palette::new(vec![[0, 0, 0]]), &reference).unwrap();
        let out = dir.path().join("normalized");

        let args = NormalizePaletteArgs {
            input: tiles,
            reference,
            output: out.clone(),
            strength: Some(1.0),
        };
        run_normalize(args, &context(dir.path())).unwrap();

        assert_eq!(load_png(&out.join("a.png")).unwrap().get(0, 0), Some(Colour::BLACK));
        assert!(out.join("deep/b.png").exists());
    }

    #[test]
    fn test_normalize_missing_input() {
        let dir = tempdir().unwrap();
        let reference = dir.path().join("ref.json");
        save_palette(&Palette::new(vec![[0, 0, 0]]), &reference).unwrap();
        let args = NormalizePaletteArgs {
            input: dir.path().join("nothing"),
            reference,
            output: dir.path().join("out"),
            strength: None,
        };
        assert!(run_normalize(args, &context(dir.path())).is_err());
    }
}
