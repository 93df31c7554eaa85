use clap::Parser;
use miette::{IntoDiagnostic, Result};
use pxtile::cli::{Cli, Commands, Context};
use pxtile::output::Printer;

/// Discover the project around the working directory.
fn project_context(printer: &Printer) -> Result<Context> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    let project = pxtile::discovery::discover(&cwd)?;
    if let Some(path) = &project.manifest_path {
        printer.verbose("Manifest", &pxtile::output::display_path(path));
    }
    Ok(Context::new(*printer, project))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().with_verbose(cli.verbose).with_quiet(cli.quiet);
    let ctx = || project_context(&printer);

    match cli.command {
        Commands::Completions(args) => pxtile::cli::completions::run(args)?,
        Commands::Resize(args) => pxtile::cli::resize::run(args, &ctx()?)?,
        Commands::BatchResize(args) => pxtile::cli::resize::run_batch(args, &ctx()?)?,
        Commands::ColorShift(args) => pxtile::cli::shift::run(args, &ctx()?)?,
        Commands::PaletteExtract(args) => pxtile::cli::palette::run_extract(args, &ctx()?)?,
        Commands::PaletteSwap(args) => pxtile::cli::palette::run_swap(args, &ctx()?)?,
        Commands::PaletteVariants(args) => pxtile::cli::palette::run_variants(args, &ctx()?)?,
        Commands::NormalizePalette(args) => pxtile::cli::palette::run_normalize(args, &ctx()?)?,
        Commands::DitherBlend(args) => pxtile::cli::dither::run_blend(args, &ctx()?)?,
        Commands::DitherTransitions(args) => pxtile::cli::dither::run_transitions(args, &ctx()?)?,
        Commands::Edges(args) => pxtile::cli::dither::run_edges(args, &ctx()?)?,
        Commands::Autotile47(args) => pxtile::cli::autotile::run(args, &ctx()?)?,
        Commands::ComparePalettes(args) => {
            pxtile::cli::compare::run(args, &ctx()?)?;
        }
        Commands::FillGaps(args) => pxtile::cli::fill::run(args, &ctx()?)?,
    }

    Ok(())
}
