use std::fs;
use std::path::{Path, PathBuf};

use plotly::Plot;

use crate::error::{PlotError, Result};

/// Where a finished plot goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotTarget {
    /// Open in the system viewer.
    Window,
    /// Write `<name>.html` into the directory.
    HtmlDir(PathBuf),
}

impl PlotTarget {
    pub fn from_output_dir(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) => PlotTarget::HtmlDir(dir),
            None => PlotTarget::Window,
        }
    }

    /// Present `plot`; returns the written file for `HtmlDir`.
    pub fn present(&self, plot: &Plot, name: &str) -> Result<Option<PathBuf>> {
        match self {
            PlotTarget::Window => {
                log::debug!("Opening '{}' in viewer", name);
                plot.show();
                Ok(None)
            }
            PlotTarget::HtmlDir(dir) => {
                let path = dir.join(format!("{}.html", name));
                write_html(&path, plot)?;
                log::info!("Wrote {}", path.display());
                Ok(Some(path))
            }
        }
    }
}

fn write_html(path: &Path, plot: &Plot) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PlotError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, plot.to_html()).map_err(|source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    })
}
