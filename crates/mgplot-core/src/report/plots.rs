use plotly::common::{ColorScale, ColorScalePalette, Mode};
use plotly::layout::{AspectMode, Axis, AxisType, Layout, LayoutScene};
use plotly::{Plot, Scatter, Surface};

use crate::convergence::ConvergenceAnalysis;
use crate::grid::DecimatedSurface;

pub const RESIDUE_TITLE: &str = "Plot of residue";
pub const SMOOTHING_TITLE: &str = "Smoothing Factor of residue (averaged)";

/// Appearance of the surface plot.
#[derive(Debug, Clone)]
pub struct SurfaceStyle {
    pub title: String,
    /// Flip the cool-to-warm scale so high values are blue.
    pub reverse_colors: bool,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            title: "Solution surface".to_string(),
            reverse_colors: false,
        }
    }
}

/// 3D surface of a decimated grid over the unit square.
pub fn surface_plot(surface: &DecimatedSurface, style: &SurfaceStyle) -> Plot {
    // plotly.js RdBu runs blue to red: cool at the low end.
    let trace = Surface::new(surface.z.clone())
        .x(surface.x.clone())
        .y(surface.y.clone())
        .color_scale(ColorScale::Palette(ColorScalePalette::RdBu))
        .reverse_scale(style.reverse_colors)
        .name("surface");

    let scene = LayoutScene::new()
        .aspect_mode(AspectMode::Cube)
        .x_axis(Axis::new().title("x"))
        .y_axis(Axis::new().title("y"))
        .z_axis(Axis::new().title("u"));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(Layout::new().title(style.title.as_str()).scene(scene));
    plot
}

/// Residual norm against cumulative work, full series and fine-grid overlay.
pub fn residue_plot(analysis: &ConvergenceAnalysis) -> Plot {
    let all = Scatter::new(analysis.work_units.clone(), analysis.residuals.clone())
        .mode(Mode::LinesMarkers)
        .name("residue");

    let fine = Scatter::new(
        analysis.fine_work_units.clone(),
        analysis.fine_residuals.clone(),
    )
    .mode(Mode::LinesMarkers)
    .name("residue of fine grid alone");

    let layout = Layout::new()
        .title(RESIDUE_TITLE)
        .x_axis(Axis::new().title("Work Units"))
        .y_axis(Axis::new().title("norm-2 of residue").type_(AxisType::Log));

    let mut plot = Plot::new();
    plot.add_trace(all);
    plot.add_trace(fine);
    plot.set_layout(layout);
    plot
}

/// Smoothing factor against cumulative work, or `None` when there is nothing to draw.
pub fn smoothing_factor_plot(analysis: &ConvergenceAnalysis) -> Option<Plot> {
    let series = &analysis.smoothing;
    if series.is_empty() {
        return None;
    }

    let trace = Scatter::new(series.work_units.clone(), series.factors.clone())
        .mode(Mode::LinesMarkers)
        .name("smoothing factor");

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(
        Layout::new()
            .title(SMOOTHING_TITLE)
            .x_axis(Axis::new().title("Work Units"))
            .y_axis(Axis::new().title("Smoothing Factor")),
    );
    Some(plot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convergence::ConvergenceTable;
    use crate::grid::SurfaceGrid;
    use ndarray::{array, Array2};

    fn analysis(data: Array2<f64>) -> ConvergenceAnalysis {
        ConvergenceAnalysis::compute(&ConvergenceTable::from_array(data).unwrap())
    }

    #[test]
    fn residue_plot_has_full_and_fine_traces() {
        let a = analysis(array![
            [0.0, 1.0, 1.0, 0.0],
            [1.0, 0.5, 1.0, 1.0],
            [2.0, 0.2, 1.0, 0.0],
        ]);
        let plot = residue_plot(&a);
        let html = plot.to_html();
        assert!(html.contains("residue of fine grid alone"));
        assert!(html.contains(RESIDUE_TITLE));
        assert!(html.contains("\"log\""));
    }

    #[test]
    fn smoothing_plot_is_skipped_without_pairs() {
        let a = analysis(array![[0.0, 1.0, 1.0, 0.0], [1.0, 0.5, 1.0, 1.0]]);
        assert!(smoothing_factor_plot(&a).is_none());
    }

    #[test]
    fn smoothing_plot_has_title() {
        let a = analysis(array![[0.0, 1.0, 1.0, 0.0], [1.0, 0.5, 2.0, 0.0]]);
        let plot = smoothing_factor_plot(&a).unwrap();
        assert!(plot.to_html().contains("Smoothing Factor"));
    }

    #[test]
    fn surface_plot_renders_surface_trace() {
        let grid = SurfaceGrid::from_array(Array2::zeros((3, 3))).unwrap();
        let plot = surface_plot(&grid.decimate(1), &SurfaceStyle::default());
        assert!(plot.to_html().contains("\"surface\""));
    }

    #[test]
    fn surface_colors_run_cool_to_warm_by_default() {
        let grid = SurfaceGrid::from_array(Array2::zeros((2, 2))).unwrap();
        let json = surface_plot(&grid.decimate(1), &SurfaceStyle::default()).to_json();
        assert!(json.contains("RdBu"));
        assert!(!json.contains("\"reversescale\":true"));

        let flipped = SurfaceStyle {
            reverse_colors: true,
            ..SurfaceStyle::default()
        };
        let json = surface_plot(&grid.decimate(1), &flipped).to_json();
        assert!(json.contains("\"reversescale\":true"));
    }
}
