use anyhow::Result;
use clap::ArgMatches;
use log::LevelFilter;

use mgplot_cli::cli::build_cli;
use mgplot_cli::commands::{residue, surface};
use mgplot_cli::config::{ResidueParams, SurfaceParams};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MGPLOT_LOG", "error,mgplot=info"))
        .init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("surface", sub_m)) => handle_surface(sub_m),
        Some(("residue", sub_m)) => handle_residue(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_surface(matches: &ArgMatches) -> Result<()> {
    let params = SurfaceParams::from_arguments(matches)?;
    log::info!("[mgplot::surface] Plotting {:?}", params.input);

    match surface::run_surface(&params) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Surface plot failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_residue(matches: &ArgMatches) -> Result<()> {
    let params = ResidueParams::from_arguments(matches)?;
    log::info!("[mgplot::residue] Plotting {:?}", params.input);

    match residue::run_residue(&params) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Residue plot failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
