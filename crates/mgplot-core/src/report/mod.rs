//! Plot construction and presentation.

pub mod output;
pub mod plots;

pub use output::PlotTarget;
pub use plots::{residue_plot, smoothing_factor_plot, surface_plot, SurfaceStyle};
