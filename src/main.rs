//! reposync's main application entry point.
//! Parses arguments, initialises logging and dispatches to the subsystems.

use reposync::{
    cli::{get_args, Args, Command},
    config::load_config,
    embed::embed_samples,
    error::{default_error_handler, Error, Result},
    extension::validate_extensions,
    index::generate_indexes,
    pipeline::Pipeline,
};
use std::path::Path;

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn stale_error(what: &str, paths: &[&Path]) -> Error {
    let listed = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Error::ValidationError(format!("{} out of date: {listed}", what))
}

/// Executes the selected subcommand.
fn run(args: Args) -> Result<()> {
    let config = load_config(&args.project_root)?;
    let source_root = args.project_root.join(&config.index.root);

    match args.command {
        Command::Index { check } => {
            let report = generate_indexes(&source_root, &config.index, !check)?;
            let changed = report.changed();
            if check && !changed.is_empty() {
                return Err(stale_error("barrel files", &changed));
            }
            println!(
                "{} barrel file(s) checked, {} updated.",
                report.barrels.len(),
                if check { 0 } else { changed.len() }
            );
        }
        Command::Embed { check } => {
            let report = embed_samples(&args.project_root, &config.embed, !check)?;
            let changed = report.changed();
            if check && !changed.is_empty() {
                return Err(stale_error("documents", &changed));
            }
            println!(
                "{} document(s) checked, {} updated.",
                report.targets.len(),
                if check { 0 } else { changed.len() }
            );
        }
        Command::CheckExt => {
            validate_extensions(&source_root, &config.index)?;
            println!("All source files use allowed extensions.");
        }
        Command::Build { skip_checks } => {
            let steps = Pipeline::new(&config, &args.project_root, skip_checks).run()?;
            println!("Build completed successfully in {steps} step(s).");
        }
    }
    Ok(())
}
