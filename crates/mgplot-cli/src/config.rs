use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use mgplot_core::convergence::DEFAULT_RESIDUE_INPUT;
use mgplot_core::grid::{DEFAULT_MAX_GRID_LINES, DEFAULT_SURFACE_INPUT};
use mgplot_core::io::Delimiter;
use mgplot_core::report::{PlotTarget, SurfaceStyle};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SurfaceSection {
    pub input: String,
    pub max_grid_lines: usize,
    pub reverse_colors: bool,
    pub title: String,
}

impl Default for SurfaceSection {
    fn default() -> Self {
        SurfaceSection {
            input: String::from(DEFAULT_SURFACE_INPUT),
            max_grid_lines: DEFAULT_MAX_GRID_LINES,
            reverse_colors: false,
            title: SurfaceStyle::default().title,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ResidueSection {
    pub input: String,
}

impl Default for ResidueSection {
    fn default() -> Self {
        ResidueSection {
            input: String::from(DEFAULT_RESIDUE_INPUT),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MgplotConfig {
    pub surface: SurfaceSection,
    pub residue: ResidueSection,
    pub delimiter: Option<Delimiter>,
    pub output_dir: Option<String>,
}

impl Default for MgplotConfig {
    fn default() -> Self {
        MgplotConfig {
            surface: SurfaceSection::default(),
            residue: ResidueSection::default(),
            delimiter: None,
            output_dir: None,
        }
    }
}

impl MgplotConfig {
    /// Read a JSON config, keeping defaults for missing or invalid fields.
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        let config_json = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let partial: serde_json::Value = serde_json::from_str(&config_json)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        let mut config = MgplotConfig::default();

        macro_rules! load_or_default {
            ($field:ident) => {
                if let Some(val) = partial.get(stringify!($field)) {
                    if let Ok(parsed) = serde_json::from_value(val.clone()) {
                        config.$field = parsed;
                    } else {
                        log::warn!(
                            "Config Invalid value for '{}', using default: {:?}",
                            stringify!($field), config.$field
                        );
                    }
                } else {
                    log::debug!(
                        "Config Missing field '{}', using default: {:?}",
                        stringify!($field), config.$field
                    );
                }
            };
        }

        load_or_default!(surface);
        load_or_default!(residue);
        load_or_default!(delimiter);
        load_or_default!(output_dir);

        Ok(config)
    }

    /// Config file named by `--config`, or defaults.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        match matches.get_one::<PathBuf>("config") {
            Some(path) => {
                log::info!("[mgplot] Using config: {:?}", path);
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    fn resolve_delimiter(&self, matches: &ArgMatches, input: &Path) -> Result<Delimiter> {
        if let Some(name) = matches.get_one::<String>("delimiter") {
            return name.parse::<Delimiter>().map_err(anyhow::Error::msg);
        }
        Ok(self.delimiter.unwrap_or_else(|| Delimiter::from_path(input)))
    }

    fn resolve_target(&self, matches: &ArgMatches) -> PlotTarget {
        let dir = matches
            .get_one::<PathBuf>("output_dir")
            .cloned()
            .or_else(|| self.output_dir.as_ref().map(PathBuf::from));
        PlotTarget::from_output_dir(dir)
    }
}

/// Resolved parameters of `mgplot surface`.
#[derive(Debug, Clone)]
pub struct SurfaceParams {
    pub input: PathBuf,
    pub delimiter: Delimiter,
    pub max_grid_lines: usize,
    pub style: SurfaceStyle,
    pub target: PlotTarget,
}

impl SurfaceParams {
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let config = MgplotConfig::from_matches(matches)?;

        let input = matches
            .get_one::<PathBuf>("input")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(&config.surface.input));
        let max_grid_lines = matches
            .get_one::<usize>("max_lines")
            .copied()
            .unwrap_or(config.surface.max_grid_lines);
        if max_grid_lines == 0 {
            anyhow::bail!("max grid lines must be at least 1");
        }

        Ok(SurfaceParams {
            delimiter: config.resolve_delimiter(matches, &input)?,
            target: config.resolve_target(matches),
            style: SurfaceStyle {
                title: config.surface.title.clone(),
                reverse_colors: config.surface.reverse_colors,
            },
            input,
            max_grid_lines,
        })
    }
}

/// Resolved parameters of `mgplot residue`.
#[derive(Debug, Clone)]
pub struct ResidueParams {
    pub input: PathBuf,
    pub delimiter: Delimiter,
    pub target: PlotTarget,
}

impl ResidueParams {
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let config = MgplotConfig::from_matches(matches)?;

        let input = matches
            .get_one::<PathBuf>("input")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(&config.residue.input));

        Ok(ResidueParams {
            delimiter: config.resolve_delimiter(matches, &input)?,
            target: config.resolve_target(matches),
            input,
        })
    }
}
