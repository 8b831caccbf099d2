//! Square scalar fields sampled over the unit square.
use std::path::Path;

use itertools_num::linspace;
use ndarray::{Array2, Axis};

use crate::error::{PlotError, Result};
use crate::io::{read_numeric_table_with_config, Delimiter, TableReaderConfig};

/// Default input written by the solver.
pub const DEFAULT_SURFACE_INPUT: &str = "out.dat";

/// Upper bound on the number of grid lines drawn along each axis.
pub const DEFAULT_MAX_GRID_LINES: usize = 64;

/// A square `n x n` field, row `i` holding samples at `y = i / (n - 1)`.
#[derive(Debug, Clone)]
pub struct SurfaceGrid {
    values: Array2<f64>,
}

/// Grid restricted to the rows and columns picked by a display stride.
#[derive(Debug, Clone)]
pub struct DecimatedSurface {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Row-major: `z[row][col]` sits at `(x[col], y[row])`.
    pub z: Vec<Vec<f64>>,
}

impl SurfaceGrid {
    /// Wrap an already parsed array, rejecting non-square shapes.
    pub fn from_array(values: Array2<f64>) -> std::result::Result<Self, String> {
        let (rows, cols) = values.dim();
        if rows == 0 {
            return Err("grid is empty".to_string());
        }
        if rows != cols {
            return Err(format!("grid must be square, found {} rows and {} columns", rows, cols));
        }
        Ok(Self { values })
    }

    /// Load a grid from a text file.
    pub fn load<P: AsRef<Path>>(path: P, delimiter: Delimiter) -> Result<Self> {
        let path = path.as_ref();
        let config = TableReaderConfig {
            delimiter,
            ..TableReaderConfig::default()
        };
        let values = read_numeric_table_with_config(path, &config)?;
        Self::from_array(values).map_err(|reason| PlotError::data_format(path, reason))
    }

    /// Side length `n`.
    pub fn side(&self) -> usize {
        self.values.nrows()
    }

    /// Meshgrid of the unit axis with itself: `x` varies along columns, `y` along rows.
    pub fn coordinates(&self) -> (Array2<f64>, Array2<f64>) {
        let n = self.side();
        let axis = unit_axis(n);
        let x = Array2::from_shape_fn((n, n), |(_, j)| axis[j]);
        let y = Array2::from_shape_fn((n, n), |(i, _)| axis[i]);
        (x, y)
    }

    /// Keep every `stride`-th row and column, always including the far edge.
    pub fn decimate(&self, stride: usize) -> DecimatedSurface {
        let stride = stride.max(1);
        let axis = unit_axis(self.side());
        let indices = decimated_indices(self.side(), stride);

        let picked = self
            .values
            .select(Axis(0), &indices)
            .select(Axis(1), &indices);

        DecimatedSurface {
            x: indices.iter().map(|&i| axis[i]).collect(),
            y: indices.iter().map(|&i| axis[i]).collect(),
            z: picked.outer_iter().map(|row| row.to_vec()).collect(),
        }
    }
}

/// `n` evenly spaced points on `[0, 1]`, endpoints included.
pub fn unit_axis(n: usize) -> Vec<f64> {
    linspace(0.0, 1.0, n).collect()
}

/// Stride that keeps at most about `max_lines` grid lines: `max(1, (n - 1) / max_lines)`.
pub fn display_stride(n: usize, max_lines: usize) -> usize {
    if max_lines == 0 {
        return 1;
    }
    (n.saturating_sub(1) / max_lines).max(1)
}

/// `0, stride, 2 * stride, ...` followed by `n - 1` when the stride skips it.
pub fn decimated_indices(n: usize, stride: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let mut indices: Vec<usize> = (0..n).step_by(stride.max(1)).collect();
    if indices.last() != Some(&(n - 1)) {
        indices.push(n - 1);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ramp(n: usize) -> SurfaceGrid {
        let values = Array2::from_shape_fn((n, n), |(i, j)| (i * n + j) as f64);
        SurfaceGrid::from_array(values).unwrap()
    }

    #[test]
    fn stride_examples() {
        assert_eq!(display_stride(65, DEFAULT_MAX_GRID_LINES), 1);
        assert_eq!(display_stride(129, DEFAULT_MAX_GRID_LINES), 2);
        assert_eq!(display_stride(1, DEFAULT_MAX_GRID_LINES), 1);
        assert_eq!(display_stride(0, DEFAULT_MAX_GRID_LINES), 1);
        assert_eq!(display_stride(257, DEFAULT_MAX_GRID_LINES), 4);
        assert_eq!(display_stride(100, 0), 1);
    }

    #[test]
    fn coordinates_span_unit_square() {
        let grid = ramp(5);
        let (x, y) = grid.coordinates();
        assert_eq!(x.dim(), (5, 5));
        assert_eq!(y.dim(), (5, 5));
        assert_abs_diff_eq!(x[[0, 0]], 0.0);
        assert_abs_diff_eq!(y[[0, 0]], 0.0);
        assert_abs_diff_eq!(x[[0, 4]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y[[4, 0]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[[4, 4]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y[[4, 4]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[[2, 1]], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn single_sample_axis() {
        assert_eq!(unit_axis(1), vec![0.0]);
        let grid = ramp(1);
        let (x, _) = grid.coordinates();
        assert_eq!(x.len(), 1);
    }

    #[test]
    fn non_square_is_rejected() {
        let values = Array2::<f64>::zeros((3, 4));
        assert!(SurfaceGrid::from_array(values).is_err());
    }

    #[test]
    fn decimated_indices_keep_far_edge() {
        assert_eq!(decimated_indices(5, 2), vec![0, 2, 4]);
        assert_eq!(decimated_indices(6, 2), vec![0, 2, 4, 5]);
        assert_eq!(decimated_indices(1, 3), vec![0]);
        assert_eq!(decimated_indices(129, 2).len(), 65);
    }

    #[test]
    fn decimate_picks_rows_and_columns() {
        let grid = ramp(5);
        let surface = grid.decimate(2);
        assert_eq!(surface.x.len(), 3);
        assert_eq!(surface.z.len(), 3);
        assert_eq!(surface.z[1], vec![10.0, 12.0, 14.0]);
        assert_abs_diff_eq!(surface.y[2], 1.0, epsilon = 1e-12);
    }
}
