//! Residual convergence analysis over work units.
//!
//! A convergence table has one row per solver iteration:
//!
//! | column | meaning                                   |
//! |--------|-------------------------------------------|
//! | 0      | iteration index (unused)                  |
//! | 1      | residual norm                             |
//! | 2      | work-unit cost of the step                |
//! | 3      | flag, `0` for fine-grid-only steps        |
//!
//! Row order is iteration order and drives the cumulative work axis.
use std::path::Path;

use ndarray::{Array2, ArrayView1};

use crate::error::{PlotError, Result};
use crate::io::{read_numeric_table_with_config, Delimiter, TableReaderConfig};

/// Default input written by the solver.
pub const DEFAULT_RESIDUE_INPUT: &str = "data.dat";

pub const RESIDUAL_COLUMN: usize = 1;
pub const WORK_COLUMN: usize = 2;
pub const FLAG_COLUMN: usize = 3;
pub const MIN_COLUMNS: usize = 4;

#[derive(Debug, Clone)]
pub struct ConvergenceTable {
    data: Array2<f64>,
}

impl ConvergenceTable {
    /// Wrap a parsed table, rejecting tables with fewer than four columns.
    pub fn from_array(data: Array2<f64>) -> std::result::Result<Self, String> {
        if data.ncols() < MIN_COLUMNS {
            return Err(format!(
                "convergence table needs at least {} columns, found {}",
                MIN_COLUMNS,
                data.ncols()
            ));
        }
        if data.nrows() == 0 {
            return Err("convergence table has no rows".to_string());
        }
        Ok(Self { data })
    }

    pub fn load<P: AsRef<Path>>(path: P, delimiter: Delimiter) -> Result<Self> {
        let path = path.as_ref();
        let config = TableReaderConfig {
            delimiter,
            ..TableReaderConfig::default()
        };
        let data = read_numeric_table_with_config(path, &config)?;
        Self::from_array(data).map_err(|reason| PlotError::data_format(path, reason))
    }

    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    pub fn residuals(&self) -> ArrayView1<'_, f64> {
        self.data.column(RESIDUAL_COLUMN)
    }

    pub fn work_costs(&self) -> ArrayView1<'_, f64> {
        self.data.column(WORK_COLUMN)
    }

    pub fn flags(&self) -> ArrayView1<'_, f64> {
        self.data.column(FLAG_COLUMN)
    }
}

/// Running sum of per-step work costs.
pub fn cumulative_work(costs: &[f64]) -> Vec<f64> {
    costs
        .iter()
        .scan(0.0, |acc, &cost| {
            *acc += cost;
            Some(*acc)
        })
        .collect()
}

/// Rows whose flag is exactly zero (fine-grid-only steps).
pub fn fine_grid_mask(flags: &[f64]) -> Vec<bool> {
    flags.iter().map(|&flag| flag == 0.0).collect()
}

pub fn mask_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &keep)| keep.then_some(i))
        .collect()
}

/// Smoothing factor samples against cumulative work units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmoothingSeries {
    pub work_units: Vec<f64>,
    pub factors: Vec<f64>,
}

impl SmoothingSeries {
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Geometric mean of the factors, `None` for an empty series.
    pub fn geometric_mean(&self) -> Option<f64> {
        if self.factors.is_empty() {
            return None;
        }
        let log_sum: f64 = self.factors.iter().map(|f| f.ln()).sum();
        Some((log_sum / self.factors.len() as f64).exp())
    }
}

/// Per-work-unit residual reduction between consecutive selected rows.
///
/// Rows are selected where `mask` holds and the step cost is nonzero. For
/// each consecutive pair `(prev, cur)` of selected rows the factor is
/// `(residual[cur] / residual[prev]) ^ (1 / cost[cur])`, plotted at
/// `work_units[cur]`. Fewer than two selected rows give an empty series.
pub fn smoothing_factors(
    work_units: &[f64],
    residuals: &[f64],
    costs: &[f64],
    mask: &[bool],
) -> SmoothingSeries {
    let selected: Vec<usize> = mask
        .iter()
        .zip(costs)
        .enumerate()
        .filter_map(|(i, (&keep, &cost))| (keep && cost != 0.0).then_some(i))
        .collect();

    let mut series = SmoothingSeries::default();
    for pair in selected.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        let ratio = residuals[cur] / residuals[prev];
        series.work_units.push(work_units[cur]);
        series.factors.push(ratio.powf(1.0 / costs[cur]));
    }
    series
}

/// Derived series behind the residue and smoothing factor plots.
#[derive(Debug, Clone)]
pub struct ConvergenceAnalysis {
    pub work_units: Vec<f64>,
    pub residuals: Vec<f64>,
    pub fine_mask: Vec<bool>,
    pub fine_work_units: Vec<f64>,
    pub fine_residuals: Vec<f64>,
    pub smoothing: SmoothingSeries,
}

impl ConvergenceAnalysis {
    pub fn compute(table: &ConvergenceTable) -> Self {
        let residuals = table.residuals().to_vec();
        let costs = table.work_costs().to_vec();
        let flags = table.flags().to_vec();

        let work_units = cumulative_work(&costs);
        let fine_mask = fine_grid_mask(&flags);
        let fine = mask_indices(&fine_mask);
        let smoothing = smoothing_factors(&work_units, &residuals, &costs, &fine_mask);

        Self {
            fine_work_units: fine.iter().map(|&i| work_units[i]).collect(),
            fine_residuals: fine.iter().map(|&i| residuals[i]).collect(),
            work_units,
            residuals,
            fine_mask,
            smoothing,
        }
    }

    pub fn fine_count(&self) -> usize {
        self.fine_residuals.len()
    }

    pub fn mean_smoothing_factor(&self) -> Option<f64> {
        self.smoothing.geometric_mean()
    }
}
