use std::path::PathBuf;

use clap::{Arg, Command, ValueHint};

use mgplot_core::convergence::DEFAULT_RESIDUE_INPUT;
use mgplot_core::grid::{DEFAULT_MAX_GRID_LINES, DEFAULT_SURFACE_INPUT};

fn shared_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("config")
            .short('c')
            .long("config")
            .help("Path to a JSON configuration file")
            .value_parser(clap::value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath),
    )
    .arg(
        Arg::new("delimiter")
            .short('d')
            .long("delimiter")
            .help("Field separator. Defaults to comma for *.csv, tab for *.tsv, whitespace otherwise.")
            .value_parser(["whitespace", "comma", "tab"]),
    )
    .arg(
        Arg::new("output_dir")
            .short('o')
            .long("output-dir")
            .help("Write the plots as HTML files into this directory instead of opening a viewer")
            .value_parser(clap::value_parser!(PathBuf))
            .value_hint(ValueHint::DirPath),
    )
}

pub fn build_cli() -> Command {
    Command::new("mgplot")
        .version(clap::crate_version!())
        .about("Inspect multigrid solver output: solution surfaces and residual convergence")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(shared_args(
            Command::new("surface")
                .about("Render a square solution grid as a 3D surface over the unit square")
                .arg(
                    Arg::new("input")
                        .help(format!("Grid file, one row per line [default: {}]", DEFAULT_SURFACE_INPUT))
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("max_lines")
                        .short('m')
                        .long("max-lines")
                        .help(format!(
                            "Maximum number of grid lines drawn per axis [default: {}]",
                            DEFAULT_MAX_GRID_LINES
                        ))
                        .value_parser(clap::value_parser!(usize)),
                ),
        ))
        .subcommand(shared_args(
            Command::new("residue")
                .about("Plot residual norm and smoothing factor against cumulative work units")
                .arg(
                    Arg::new("input")
                        .help(format!(
                            "Convergence table: iteration, residual, work units, flag [default: {}]",
                            DEFAULT_RESIDUE_INPUT
                        ))
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        ))
}
