//! mgplot-core: inspection helpers for multigrid solver output.
//!
//! Loads the plain-text grids and convergence tables the solver writes,
//! derives the work-unit and smoothing factor series, and builds plotly
//! figures for them. Presentation (viewer or HTML) is chosen by the caller.
pub mod convergence;
pub mod error;
pub mod grid;
pub mod io;
pub mod report;

pub use error::{PlotError, Result};
