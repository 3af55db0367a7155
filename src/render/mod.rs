mod frame;
mod null_renderer;
mod primitives;

use std::path::Path;

pub use frame::{ChartContent, ChartScene};
pub use null_renderer::{NullRenderer, SurfaceCall};
pub use primitives::{
    AxisValues, BarGroup, ChartLabels, Color, FontSpec, HistogramPanel, Legend, LegendEntry,
    LegendPosition, LineTrace, PiePanel, PieSlice, TraceStyle,
};

use crate::core::{ScaleTransform, SubplotGrid};
use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Calls arrive in the order `draw_scene` issues them, always starting with
/// `clear`. Backends may draw immediately or buffer until `export_image`.
pub trait RenderSurface {
    fn clear(&mut self) -> ChartResult<()>;

    fn set_axis_scales(&mut self, transform: ScaleTransform) -> ChartResult<()>;

    fn draw_line_series(&mut self, trace: &LineTrace, style: &TraceStyle) -> ChartResult<()>;

    fn draw_bars(&mut self, group: &BarGroup) -> ChartResult<()>;

    fn draw_histogram_bins(
        &mut self,
        grid: SubplotGrid,
        panel: &HistogramPanel,
    ) -> ChartResult<()>;

    fn draw_pie_slices(&mut self, grid: SubplotGrid, panel: &PiePanel) -> ChartResult<()>;

    fn set_labels(&mut self, labels: &ChartLabels, font: &FontSpec) -> ChartResult<()>;

    fn draw_legend(&mut self, legend: &Legend) -> ChartResult<()>;

    fn set_grid_visible(&mut self, visible: bool) -> ChartResult<()>;

    /// Writes the current drawing to `path` rasterized at `dpi`.
    fn export_image(&mut self, path: &Path, dpi: f64) -> ChartResult<()>;
}

/// Replays a scene onto a surface.
pub fn draw_scene<S: RenderSurface + ?Sized>(
    surface: &mut S,
    scene: &ChartScene,
) -> ChartResult<()> {
    surface.clear()?;
    match &scene.content {
        ChartContent::Xy {
            transform,
            style,
            traces,
        } => {
            surface.set_axis_scales(*transform)?;
            for trace in traces {
                surface.draw_line_series(trace, style)?;
            }
        }
        ChartContent::Bar { groups } => {
            for group in groups {
                surface.draw_bars(group)?;
            }
        }
        ChartContent::Histogram { grid, panels } => {
            for panel in panels {
                surface.draw_histogram_bins(*grid, panel)?;
            }
        }
        ChartContent::Pie { grid, panels } => {
            for panel in panels {
                surface.draw_pie_slices(*grid, panel)?;
            }
        }
    }
    surface.set_labels(&scene.labels, &scene.font)?;
    if let Some(legend) = &scene.legend {
        surface.draw_legend(legend)?;
    }
    surface.set_grid_visible(scene.show_grid)
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
