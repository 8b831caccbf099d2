//! Integration tests for config loading and argument resolution.

use std::path::PathBuf;

use mgplot_cli::cli::build_cli;
use mgplot_cli::config::{MgplotConfig, ResidueParams, SurfaceParams};
use mgplot_core::io::Delimiter;
use mgplot_core::report::PlotTarget;

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = build_cli().try_get_matches_from(args).unwrap();
    let (_, sub) = matches.subcommand().unwrap();
    sub.clone()
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn surface_defaults() {
    let params = SurfaceParams::from_arguments(&sub_matches(&["mgplot", "surface"])).unwrap();
    assert_eq!(params.input, PathBuf::from("out.dat"));
    assert_eq!(params.max_grid_lines, 64);
    assert_eq!(params.delimiter, Delimiter::Whitespace);
    assert_eq!(params.target, PlotTarget::Window);
}

#[test]
fn residue_defaults() {
    let params = ResidueParams::from_arguments(&sub_matches(&["mgplot", "residue"])).unwrap();
    assert_eq!(params.input, PathBuf::from("data.dat"));
    assert_eq!(params.target, PlotTarget::Window);
}

#[test]
fn positional_input_and_extension_delimiter() {
    let params =
        ResidueParams::from_arguments(&sub_matches(&["mgplot", "residue", "run.tsv"])).unwrap();
    assert_eq!(params.input, PathBuf::from("run.tsv"));
    assert_eq!(params.delimiter, Delimiter::Tab);
}

#[test]
fn delimiter_flag_overrides_extension() {
    let params = ResidueParams::from_arguments(&sub_matches(&[
        "mgplot", "residue", "run.tsv", "--delimiter", "comma",
    ]))
    .unwrap();
    assert_eq!(params.delimiter, Delimiter::Comma);
}

#[test]
fn too_many_positionals_is_rejected() {
    assert!(build_cli()
        .try_get_matches_from(["mgplot", "surface", "a.dat", "b.dat"])
        .is_err());
}

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

#[test]
fn config_serializes_to_json() {
    let json = serde_json::to_string_pretty(&MgplotConfig::default()).unwrap();
    assert!(json.contains("max_grid_lines"));
    assert!(json.contains("data.dat"));
    assert!(!json.contains("\"version\""));
}

#[test]
fn config_file_overrides_defaults_and_flags_override_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mgplot.json");
    std::fs::write(
        &path,
        r#"{
            "surface": { "input": "solution.dat", "max_grid_lines": 32 },
            "output_dir": "plots",
            "delimiter": "whitespace"
        }"#,
    )
    .unwrap();
    let config_arg = path.to_str().unwrap();

    let params =
        SurfaceParams::from_arguments(&sub_matches(&["mgplot", "surface", "-c", config_arg]))
            .unwrap();
    assert_eq!(params.input, PathBuf::from("solution.dat"));
    assert_eq!(params.max_grid_lines, 32);
    assert!(!params.style.reverse_colors);
    assert_eq!(params.target, PlotTarget::HtmlDir(PathBuf::from("plots")));

    let params = SurfaceParams::from_arguments(&sub_matches(&[
        "mgplot", "surface", "grid.dat", "-c", config_arg, "-m", "16", "-o", "elsewhere",
    ]))
    .unwrap();
    assert_eq!(params.input, PathBuf::from("grid.dat"));
    assert_eq!(params.max_grid_lines, 16);
    assert_eq!(params.target, PlotTarget::HtmlDir(PathBuf::from("elsewhere")));
}

#[test]
fn invalid_config_field_keeps_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mgplot.json");
    std::fs::write(&path, r#"{ "delimiter": "semicolon", "residue": { "input": "r.dat" } }"#)
        .unwrap();
    let config = MgplotConfig::from_file(&path).unwrap();
    assert_eq!(config.delimiter, None);
    assert_eq!(config.residue.input, "r.dat");
    assert_eq!(config.surface.input, "out.dat");
}

#[test]
fn unreadable_config_errors() {
    assert!(MgplotConfig::from_file("/nonexistent/mgplot.json").is_err());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(MgplotConfig::from_file(&path).is_err());
}
