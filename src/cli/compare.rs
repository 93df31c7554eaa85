//! Palette compatibility comparison between two tilemaps.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use crate::error::Result;
use crate::io::{load_png, write_json};
use crate::output::display_path;
use crate::recolor::{compare_palettes, PaletteComparisonReport, PaletteStats};

use super::Context;

/// Colours kept in each tilemap's statistics.
const STATS_MAX_COLORS: usize = 64;

/// Compare two tilemap palettes for visual compatibility
#[derive(Args, Debug)]
pub struct ComparePalettesArgs {
    /// First tilemap
    #[arg(long)]
    pub tilemap_a: PathBuf,

    /// Second tilemap
    #[arg(long)]
    pub tilemap_b: PathBuf,

    /// Save the full report as JSON
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Per-tilemap section of the saved report.
#[derive(Debug, Serialize)]
struct TilemapPalette {
    path: PathBuf,
    stats: Option<PaletteStats>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonFile {
    palette_a: TilemapPalette,
    palette_b: TilemapPalette,
    comparison: PaletteComparisonReport,
}

fn tilemap_stats(path: &Path, ctx: &Context) -> Result<Option<PaletteStats>> {
    let sheet = load_png(path)?;
    let stats = PaletteStats::from_buffer(&sheet, STATS_MAX_COLORS);
    match &stats {
        Some(s) => ctx.printer.verbose(
            "Sampled",
            &format!(
                "{}: {} colours, luminance {:.1} +/- {:.1}",
                display_path(path),
                s.unique_colors,
                s.luminance_mean,
                s.luminance_std
            ),
        ),
        None => ctx
            .printer
            .warning("Warning", &format!("{} has no visible pixels", display_path(path))),
    }
    Ok(stats)
}

pub fn run(args: ComparePalettesArgs, ctx: &Context) -> Result<PaletteComparisonReport> {
    ctx.printer.status(
        "Comparing",
        &format!("{} with {}", display_path(&args.tilemap_a), display_path(&args.tilemap_b)),
    );
    let stats_a = tilemap_stats(&args.tilemap_a, ctx)?;
    let stats_b = tilemap_stats(&args.tilemap_b, ctx)?;

    let report = match (&stats_a, &stats_b) {
        (Some(a), Some(b)) => compare_palettes(a, b),
        _ => PaletteComparisonReport::missing(),
    };

    // Verdict goes to stdout
    println!("Palette Compatibility Score: {}/100", report.score);
    println!("Compatible: {}", if report.compatible { "Yes" } else { "No" });
    for issue in &report.issues {
        println!("  - {}", issue);
    }

    if report.compatible {
        ctx.printer.success("Compatible", &format!("score {}", report.score));
    } else {
        ctx.printer.warning("Mismatch", &format!("score {}", report.score));
    }

    if let Some(path) = &args.output {
        let file = ComparisonFile {
            palette_a: TilemapPalette {
                path: args.tilemap_a.clone(),
                stats: stats_a,
            },
            palette_b: TilemapPalette {
                path: args.tilemap_b.clone(),
                stats: stats_b,
            },
            comparison: report.clone(),
        };
        write_json(&file, path)?;
        ctx.printer.info("Report", &display_path(path));
    }

    Ok(report)
}
