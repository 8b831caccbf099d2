use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating solver output.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Malformed data in {}: {reason}", .path.display())]
    DataFormat { path: PathBuf, reason: String },

    #[error("Failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl PlotError {
    pub(crate) fn data_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PlotError::DataFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for the `DataFormat` kind.
    pub fn is_data_format(&self) -> bool {
        matches!(self, PlotError::DataFormat { .. })
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
