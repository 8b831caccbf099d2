use anyhow::{Context, Result};

use mgplot_core::convergence::{ConvergenceAnalysis, ConvergenceTable};
use mgplot_core::report::{residue_plot, smoothing_factor_plot};

use crate::config::ResidueParams;

pub fn run_residue(params: &ResidueParams) -> Result<()> {
    let table = ConvergenceTable::load(&params.input, params.delimiter)
        .with_context(|| format!("Failed to load convergence table from {:?}", params.input))?;

    let analysis = ConvergenceAnalysis::compute(&table);
    log::info!(
        "[mgplot::residue] {} iterations, {} fine-grid only, {:.3} work units total",
        table.len(),
        analysis.fine_count(),
        analysis.work_units.last().copied().unwrap_or(0.0)
    );

    params
        .target
        .present(&residue_plot(&analysis), "residue")
        .context("Failed to present residue plot")?;

    match smoothing_factor_plot(&analysis) {
        Some(plot) => {
            if let Some(mean) = analysis.mean_smoothing_factor() {
                log::info!("[mgplot::residue] Mean smoothing factor: {:.4}", mean);
            }
            params
                .target
                .present(&plot, "smoothing_factor")
                .context("Failed to present smoothing factor plot")?;
        }
        None => log::warn!(
            "[mgplot::residue] Fewer than two fine-grid rows with nonzero work; skipping smoothing factor plot"
        ),
    }
    Ok(())
}
