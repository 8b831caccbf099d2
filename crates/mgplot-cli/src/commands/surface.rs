use anyhow::{Context, Result};

use mgplot_core::grid::{display_stride, SurfaceGrid};
use mgplot_core::report::surface_plot;

use crate::config::SurfaceParams;

pub fn run_surface(params: &SurfaceParams) -> Result<()> {
    let grid = SurfaceGrid::load(&params.input, params.delimiter)
        .with_context(|| format!("Failed to load grid from {:?}", params.input))?;

    let n = grid.side();
    let stride = display_stride(n, params.max_grid_lines);
    log::info!(
        "[mgplot::surface] {}x{} grid, drawing every {} line(s)",
        n,
        n,
        stride
    );

    let plot = surface_plot(&grid.decimate(stride), &params.style);
    params
        .target
        .present(&plot, "surface")
        .context("Failed to present surface plot")?;
    Ok(())
}
