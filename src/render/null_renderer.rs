use std::path::{Path, PathBuf};

use crate::core::{GridCell, ScaleTransform, SubplotGrid};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    BarGroup, ChartLabels, Color, FontSpec, HistogramPanel, Legend, LineTrace, PiePanel,
    RenderSurface, TraceStyle,
};

/// One call received by a `NullRenderer`.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Clear,
    SetAxisScales(ScaleTransform),
    DrawLineSeries {
        series_index: usize,
        points: usize,
        color: Color,
    },
    DrawBars {
        series_index: usize,
        bars: usize,
        color: Color,
    },
    DrawHistogramBins {
        series_index: usize,
        cell: GridCell,
        bins: usize,
    },
    DrawPieSlices {
        series_index: usize,
        cell: GridCell,
        slices: usize,
    },
    SetLabels(ChartLabels),
    DrawLegend {
        labels: Vec<String>,
    },
    SetGridVisible(bool),
}

/// Headless surface used by tests and batch hosts.
///
/// It validates every primitive and records the calls of the latest drawing
/// so tests can assert on what a real backend would have received. Exports
/// write nothing but still fail for unwritable targets.
#[derive(Debug, Default)]
pub struct NullRenderer {
    calls: Vec<SurfaceCall>,
    exports: Vec<(PathBuf, f64)>,
}

impl NullRenderer {
    /// Calls received since the last `clear`, including the `clear` itself.
    #[must_use]
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Successful exports, oldest first.
    #[must_use]
    pub fn exports(&self) -> &[(PathBuf, f64)] {
        &self.exports
    }

    #[must_use]
    pub fn draw_call_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    SurfaceCall::DrawLineSeries { .. }
                        | SurfaceCall::DrawBars { .. }
                        | SurfaceCall::DrawHistogramBins { .. }
                        | SurfaceCall::DrawPieSlices { .. }
                )
            })
            .count()
    }
}

impl RenderSurface for NullRenderer {
    fn clear(&mut self) -> ChartResult<()> {
        self.calls.clear();
        self.calls.push(SurfaceCall::Clear);
        Ok(())
    }

    fn set_axis_scales(&mut self, transform: ScaleTransform) -> ChartResult<()> {
        self.calls.push(SurfaceCall::SetAxisScales(transform));
        Ok(())
    }

    fn draw_line_series(&mut self, trace: &LineTrace, _style: &TraceStyle) -> ChartResult<()> {
        trace.validate()?;
        self.calls.push(SurfaceCall::DrawLineSeries {
            series_index: trace.series_index,
            points: trace.y.len(),
            color: trace.color,
        });
        Ok(())
    }

    fn draw_bars(&mut self, group: &BarGroup) -> ChartResult<()> {
        group.validate()?;
        self.calls.push(SurfaceCall::DrawBars {
            series_index: group.series_index,
            bars: group.values.len(),
            color: group.color,
        });
        Ok(())
    }

    fn draw_histogram_bins(
        &mut self,
        _grid: SubplotGrid,
        panel: &HistogramPanel,
    ) -> ChartResult<()> {
        panel.color.validate()?;
        self.calls.push(SurfaceCall::DrawHistogramBins {
            series_index: panel.series_index,
            cell: panel.cell,
            bins: panel.bins.counts.len(),
        });
        Ok(())
    }

    fn draw_pie_slices(&mut self, _grid: SubplotGrid, panel: &PiePanel) -> ChartResult<()> {
        for slice in &panel.slices {
            slice.color.validate()?;
        }
        self.calls.push(SurfaceCall::DrawPieSlices {
            series_index: panel.series_index,
            cell: panel.cell,
            slices: panel.slices.len(),
        });
        Ok(())
    }

    fn set_labels(&mut self, labels: &ChartLabels, _font: &FontSpec) -> ChartResult<()> {
        self.calls.push(SurfaceCall::SetLabels(labels.clone()));
        Ok(())
    }

    fn draw_legend(&mut self, legend: &Legend) -> ChartResult<()> {
        self.calls.push(SurfaceCall::DrawLegend {
            labels: legend
                .entries
                .iter()
                .map(|entry| entry.label.clone())
                .collect(),
        });
        Ok(())
    }

    fn set_grid_visible(&mut self, visible: bool) -> ChartResult<()> {
        self.calls.push(SurfaceCall::SetGridVisible(visible));
        Ok(())
    }

    fn export_image(&mut self, path: &Path, dpi: f64) -> ChartResult<()> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(ChartError::Surface(format!(
                "export dpi must be finite and > 0, got {dpi}"
            )));
        }
        if self.calls.is_empty() {
            return Err(ChartError::Surface("nothing has been drawn".to_owned()));
        }
        let directory = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        if !directory.is_dir() {
            return Err(ChartError::Surface(format!(
                "cannot write `{}`: directory does not exist",
                path.display()
            )));
        }
        self.exports.push((path.to_path_buf(), dpi));
        Ok(())
    }
}
