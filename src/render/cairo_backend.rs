use std::f64::consts::{FRAC_PI_2, TAU};
use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::core::{AxisMapper, AxisScale, GridCell, ScaleTransform, SubplotGrid, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    BarGroup, ChartLabels, Color, FontSpec, HistogramPanel, Legend, LegendPosition, LineTrace,
    PiePanel, RenderSurface, TraceStyle,
};

/// Pixel density the viewport size is expressed in.
const BASE_DPI: f64 = 100.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 52.0;
const GRID_DIVISIONS: usize = 5;
const BAR_WIDTH: f64 = 0.8;
const MARKER_RADIUS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub traces_drawn: usize,
    pub rects_drawn: usize,
    pub wedges_drawn: usize,
    pub texts_drawn: usize,
    pub grids_drawn: usize,
}

#[derive(Debug, Clone, Default)]
struct PendingDrawing {
    transform: ScaleTransform,
    traces: Vec<(LineTrace, TraceStyle)>,
    bars: Vec<BarGroup>,
    histograms: Vec<(SubplotGrid, HistogramPanel)>,
    pies: Vec<(SubplotGrid, PiePanel)>,
    labels: ChartLabels,
    font: Option<FontSpec>,
    legend: Option<Legend>,
    show_grid: bool,
}

#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl PlotArea {
    fn width(self) -> f64 {
        self.right - self.left
    }

    fn height(self) -> f64 {
        self.bottom - self.top
    }
}

/// Cairo + Pango + PangoCairo surface.
///
/// Draw calls are buffered and rasterized onto a fresh image surface by
/// `export_image`, so axis ranges always cover every primitive of the chart.
#[derive(Debug)]
pub struct CairoRenderer {
    viewport: Viewport,
    clear_color: Color,
    pending: PendingDrawing,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    /// Creates a surface whose size is given in pixels at 100 dpi.
    pub fn new(viewport: Viewport) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(Self {
            viewport,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            pending: PendingDrawing::default(),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn plot_area(&self) -> PlotArea {
        PlotArea {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            right: f64::from(self.viewport.width) - MARGIN_RIGHT,
            bottom: f64::from(self.viewport.height) - MARGIN_BOTTOM,
        }
    }

    fn rasterize(&self, dpi: f64) -> ChartResult<(ImageSurface, CairoRenderStats)> {
        let scale = dpi / BASE_DPI;
        let width = (f64::from(self.viewport.width) * scale).round() as i32;
        let height = (f64::from(self.viewport.height) * scale).round() as i32;
        if width <= 0 || height <= 0 {
            return Err(ChartError::Surface(format!(
                "export size {width}x{height} is empty at {dpi} dpi"
            )));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let mut stats = CairoRenderStats::default();
        {
            let context = Context::new(&surface)
                .map_err(|err| map_backend_error("failed to create cairo context", err))?;
            context.scale(scale, scale);
            apply_color(&context, self.clear_color);
            context
                .paint()
                .map_err(|err| map_backend_error("failed to clear surface", err))?;

            let font = self.pending.font.clone().unwrap_or(FontSpec {
                family: "sans-serif".to_owned(),
                size: 12.0,
            });
            let area = self.plot_area();
            self.draw_xy(&context, area, &mut stats)?;
            self.draw_bar_groups(&context, area, &mut stats)?;
            for (grid, panel) in &self.pending.histograms {
                let cell = cell_area(area, *grid, panel.cell);
                let show_grid = self.pending.show_grid;
                draw_histogram_panel(&context, cell, panel, show_grid, &mut stats)?;
            }
            for (grid, panel) in &self.pending.pies {
                let cell = cell_area(area, *grid, panel.cell);
                draw_pie_panel(&context, cell, panel, &mut stats)?;
            }
            self.draw_labels(&context, area, &font, &mut stats)?;
            if let Some(legend) = &self.pending.legend {
                draw_legend(&context, area, legend, &font, &mut stats)?;
            }
        }
        Ok((surface, stats))
    }

    fn draw_xy(
        &self,
        context: &Context,
        area: PlotArea,
        stats: &mut CairoRenderStats,
    ) -> ChartResult<()> {
        if self.pending.traces.is_empty() {
            return Ok(());
        }
        let transform = self.pending.transform;
        let x_axis = AxisMapper::fit(
            self.pending
                .traces
                .iter()
                .flat_map(|(trace, _)| trace.x.positions()),
            transform.x_scale(),
        );
        let y_axis = AxisMapper::fit(
            self.pending
                .traces
                .iter()
                .flat_map(|(trace, _)| trace.y.iter().copied()),
            transform.y_scale(),
        );
        let (Some(x_axis), Some(y_axis)) = (x_axis, y_axis) else {
            return Ok(());
        };
        self.draw_frame(context, area, stats)?;

        for (trace, style) in &self.pending.traces {
            apply_color(context, trace.color);
            context.set_line_width(style.line_width.max(0.1));
            let points: Vec<Option<(f64, f64)>> = trace
                .x
                .positions()
                .into_iter()
                .zip(trace.y.iter().copied())
                .map(|(x, y)| {
                    Some((
                        x_axis.to_pixel(x, area.left, area.right)?,
                        y_axis.to_pixel(y, area.bottom, area.top)?,
                    ))
                })
                .collect();

            match line_dash(&style.shape) {
                Some(dash) => {
                    context.set_dash(dash, 0.0);
                    let mut pen_down = false;
                    for point in &points {
                        match point {
                            Some((x, y)) if pen_down => context.line_to(*x, *y),
                            Some((x, y)) => {
                                context.move_to(*x, *y);
                                pen_down = true;
                            }
                            None => pen_down = false,
                        }
                    }
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke trace", err))?;
                    context.set_dash(&[], 0.0);
                }
                None => {
                    for (x, y) in points.iter().flatten() {
                        context.new_sub_path();
                        context.arc(*x, *y, MARKER_RADIUS, 0.0, TAU);
                    }
                    context
                        .fill()
                        .map_err(|err| map_backend_error("failed to fill markers", err))?;
                }
            }
            stats.traces_drawn += 1;
        }
        Ok(())
    }

    fn draw_bar_groups(
        &self,
        context: &Context,
        area: PlotArea,
        stats: &mut CairoRenderStats,
    ) -> ChartResult<()> {
        if self.pending.bars.is_empty() {
            return Ok(());
        }
        let half = BAR_WIDTH / 2.0;
        let x_axis = AxisMapper::fit(
            self.pending.bars.iter().flat_map(|group| {
                group
                    .categories
                    .iter()
                    .flat_map(move |category| [category - half, category + half])
            }),
            AxisScale::Linear,
        );
        let y_axis = AxisMapper::fit(
            self.pending
                .bars
                .iter()
                .flat_map(|group| group.values.iter().copied())
                .chain([0.0]),
            AxisScale::Linear,
        );
        let (Some(x_axis), Some(y_axis)) = (x_axis, y_axis) else {
            return Ok(());
        };
        self.draw_frame(context, area, stats)?;

        for group in &self.pending.bars {
            apply_color(context, group.color.with_alpha(group.fill_alpha));
            for (category, value) in group.categories.iter().zip(&group.values) {
                let (Some(x0), Some(x1), Some(y0), Some(y1)) = (
                    x_axis.to_pixel(category - half, area.left, area.right),
                    x_axis.to_pixel(category + half, area.left, area.right),
                    y_axis.to_pixel(0.0, area.bottom, area.top),
                    y_axis.to_pixel(*value, area.bottom, area.top),
                ) else {
                    continue;
                };
                context.rectangle(x0, y0.min(y1), x1 - x0, (y1 - y0).abs());
                stats.rects_drawn += 1;
            }
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill bars", err))?;
        }
        Ok(())
    }

    fn draw_frame(
        &self,
        context: &Context,
        area: PlotArea,
        stats: &mut CairoRenderStats,
    ) -> ChartResult<()> {
        if self.pending.show_grid {
            draw_grid(context, area, stats)?;
        }
        draw_border(context, area)
    }

    fn draw_labels(
        &self,
        context: &Context,
        area: PlotArea,
        font: &FontSpec,
        stats: &mut CairoRenderStats,
    ) -> ChartResult<()> {
        let labels = &self.pending.labels;
        let center_x = area.left + area.width() / 2.0;
        if !labels.title.is_empty() {
            let size = font.size * 1.2;
            draw_text(context, &labels.title, font, size, center_x, area.top - 30.0)?;
            stats.texts_drawn += 1;
        }
        if !labels.x_label.is_empty() {
            let top = area.bottom + 20.0;
            draw_text(context, &labels.x_label, font, font.size, center_x, top)?;
            stats.texts_drawn += 1;
        }
        if !labels.y_label.is_empty() {
            context
                .save()
                .map_err(|err| map_backend_error("failed to save context", err))?;
            context.translate(area.left - 48.0, area.top + area.height() / 2.0);
            context.rotate(-FRAC_PI_2);
            draw_text(context, &labels.y_label, font, font.size, 0.0, 0.0)?;
            context
                .restore()
                .map_err(|err| map_backend_error("failed to restore context", err))?;
            stats.texts_drawn += 1;
        }
        Ok(())
    }
}

impl RenderSurface for CairoRenderer {
    fn clear(&mut self) -> ChartResult<()> {
        self.pending = PendingDrawing::default();
        Ok(())
    }

    fn set_axis_scales(&mut self, transform: ScaleTransform) -> ChartResult<()> {
        self.pending.transform = transform;
        Ok(())
    }

    fn draw_line_series(&mut self, trace: &LineTrace, style: &TraceStyle) -> ChartResult<()> {
        trace.validate()?;
        self.pending.traces.push((trace.clone(), style.clone()));
        Ok(())
    }

    fn draw_bars(&mut self, group: &BarGroup) -> ChartResult<()> {
        group.validate()?;
        self.pending.bars.push(group.clone());
        Ok(())
    }

    fn draw_histogram_bins(
        &mut self,
        grid: SubplotGrid,
        panel: &HistogramPanel,
    ) -> ChartResult<()> {
        self.pending.histograms.push((grid, panel.clone()));
        Ok(())
    }

    fn draw_pie_slices(&mut self, grid: SubplotGrid, panel: &PiePanel) -> ChartResult<()> {
        self.pending.pies.push((grid, panel.clone()));
        Ok(())
    }

    fn set_labels(&mut self, labels: &ChartLabels, font: &FontSpec) -> ChartResult<()> {
        self.pending.labels = labels.clone();
        self.pending.font = Some(font.clone());
        Ok(())
    }

    fn draw_legend(&mut self, legend: &Legend) -> ChartResult<()> {
        self.pending.legend = Some(legend.clone());
        Ok(())
    }

    fn set_grid_visible(&mut self, visible: bool) -> ChartResult<()> {
        self.pending.show_grid = visible;
        Ok(())
    }

    fn export_image(&mut self, path: &Path, dpi: f64) -> ChartResult<()> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(ChartError::Surface(format!(
                "export dpi must be finite and > 0, got {dpi}"
            )));
        }
        let (surface, stats) = self.rasterize(dpi)?;
        let mut file = File::create(path).map_err(|err| {
            ChartError::Surface(format!("cannot create `{}`: {err}", path.display()))
        })?;
        surface
            .write_to_png(&mut file)
            .map_err(|err| ChartError::Surface(format!("failed to write png: {err}")))?;
        self.last_stats = stats;
        Ok(())
    }
}

fn cell_area(area: PlotArea, grid: SubplotGrid, cell: GridCell) -> PlotArea {
    let cell_width = area.width() / grid.columns as f64;
    let cell_height = area.height() / grid.rows as f64;
    let left = area.left + cell_width * cell.column as f64;
    let top = area.top + cell_height * cell.row as f64;
    PlotArea {
        left: left + 8.0,
        top: top + 8.0,
        right: left + cell_width - 8.0,
        bottom: top + cell_height - 8.0,
    }
}

fn draw_grid(
    context: &Context,
    area: PlotArea,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    apply_color(context, Color::rgba(0.0, 0.0, 0.0, 0.15));
    context.set_line_width(0.5);
    for step in 1..GRID_DIVISIONS {
        let t = step as f64 / GRID_DIVISIONS as f64;
        let x = area.left + t * area.width();
        let y = area.top + t * area.height();
        context.move_to(x, area.top);
        context.line_to(x, area.bottom);
        context.move_to(area.left, y);
        context.line_to(area.right, y);
    }
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke grid", err))?;
    stats.grids_drawn += 1;
    Ok(())
}

fn draw_border(context: &Context, area: PlotArea) -> ChartResult<()> {
    apply_color(context, Color::rgb(0.0, 0.0, 0.0));
    context.set_line_width(1.0);
    context.rectangle(area.left, area.top, area.width(), area.height());
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke axes", err))
}

/// Histogram panels carry their own axes, so the grid is drawn per panel.
fn draw_histogram_panel(
    context: &Context,
    area: PlotArea,
    panel: &HistogramPanel,
    show_grid: bool,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    let (Some(x_axis), Some(y_axis)) = (
        AxisMapper::fit(panel.bins.edges.iter().copied(), AxisScale::Linear),
        AxisMapper::fit(
            panel
                .bins
                .counts
                .iter()
                .map(|count| *count as f64)
                .chain([0.0]),
            AxisScale::Linear,
        ),
    ) else {
        return Ok(());
    };
    if show_grid {
        draw_grid(context, area, stats)?;
    }

    apply_color(context, panel.color);
    for (edges, count) in panel.bins.edges.windows(2).zip(&panel.bins.counts) {
        let (Some(x0), Some(x1), Some(y0), Some(y1)) = (
            x_axis.to_pixel(edges[0], area.left, area.right),
            x_axis.to_pixel(edges[1], area.left, area.right),
            y_axis.to_pixel(0.0, area.bottom, area.top),
            y_axis.to_pixel(*count as f64, area.bottom, area.top),
        ) else {
            continue;
        };
        context.rectangle(x0, y1, x1 - x0, y0 - y1);
        stats.rects_drawn += 1;
    }
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill histogram", err))?;
    draw_border(context, area)
}

/// Pies have no axes; the grid flag does not apply to them.
fn draw_pie_panel(
    context: &Context,
    area: PlotArea,
    panel: &PiePanel,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    let center_x = area.left + area.width() / 2.0;
    let center_y = area.top + area.height() / 2.0;
    let radius = area.width().min(area.height()) * 0.45;
    // Counter-clockwise from three o'clock, y axis pointing down.
    let mut start = 0.0;
    for slice in &panel.slices {
        let end = start - slice.fraction * TAU;
        apply_color(context, slice.color);
        context.move_to(center_x, center_y);
        context.arc_negative(center_x, center_y, radius, start, end);
        context.close_path();
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill pie wedge", err))?;
        start = end;
        stats.wedges_drawn += 1;
    }
    Ok(())
}

fn draw_legend(
    context: &Context,
    area: PlotArea,
    legend: &Legend,
    font: &FontSpec,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    if legend.entries.is_empty() {
        return Ok(());
    }
    let row_height = font.size * 1.6;
    let box_width = 140.0;
    let box_height = row_height * legend.entries.len() as f64 + 8.0;
    let (left, top) = legend_origin(area, legend.position, box_width, box_height);

    apply_color(context, Color::rgba(1.0, 1.0, 1.0, 0.8));
    context.rectangle(left, top, box_width, box_height);
    context
        .fill_preserve()
        .map_err(|err| map_backend_error("failed to fill legend", err))?;
    apply_color(context, Color::rgba(0.0, 0.0, 0.0, 0.4));
    context.set_line_width(0.8);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke legend border", err))?;

    for (row, entry) in legend.entries.iter().enumerate() {
        let y = top + 4.0 + row_height * (row as f64 + 0.5);
        apply_color(context, entry.color);
        context.set_line_width(2.0);
        context.move_to(left + 6.0, y);
        context.line_to(left + 26.0, y);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke legend swatch", err))?;
        draw_text_left(context, &entry.label, font, left + 32.0, y - font.size * 0.7)?;
        stats.texts_drawn += 1;
    }
    Ok(())
}

fn legend_origin(
    area: PlotArea,
    position: LegendPosition,
    width: f64,
    height: f64,
) -> (f64, f64) {
    let pad = 8.0;
    let left = area.left + pad;
    let center_x = area.left + (area.width() - width) / 2.0;
    let right = area.right - width - pad;
    let top = area.top + pad;
    let center_y = area.top + (area.height() - height) / 2.0;
    let bottom = area.bottom - height - pad;
    match position {
        LegendPosition::Best | LegendPosition::UpperRight => (right, top),
        LegendPosition::UpperLeft => (left, top),
        LegendPosition::UpperCenter => (center_x, top),
        LegendPosition::CenterLeft => (left, center_y),
        LegendPosition::Center => (center_x, center_y),
        LegendPosition::CenterRight => (right, center_y),
        LegendPosition::LowerLeft => (left, bottom),
        LegendPosition::LowerCenter => (center_x, bottom),
        LegendPosition::LowerRight => (right, bottom),
    }
}

/// Draws `text` horizontally centred on `x` with its top at `y`.
fn draw_text(
    context: &Context,
    text: &str,
    font: &FontSpec,
    size: f64,
    x: f64,
    y: f64,
) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let description = FontDescription::from_string(&format!("{} {}", font.family, size));
    layout.set_font_description(Some(&description));
    layout.set_text(text);
    let (text_width, _) = layout.pixel_size();
    apply_color(context, Color::rgb(0.0, 0.0, 0.0));
    context.move_to(x - f64::from(text_width) / 2.0, y);
    pangocairo::functions::show_layout(context, &layout);
    Ok(())
}

fn draw_text_left(
    context: &Context,
    text: &str,
    font: &FontSpec,
    x: f64,
    y: f64,
) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let description = FontDescription::from_string(&format!("{} {}", font.family, font.size));
    layout.set_font_description(Some(&description));
    layout.set_text(text);
    apply_color(context, Color::rgb(0.0, 0.0, 0.0));
    context.move_to(x, y);
    pangocairo::functions::show_layout(context, &layout);
    Ok(())
}

const SOLID: &[f64] = &[];
const DASHED: &[f64] = &[6.0, 3.0];
const DOTTED: &[f64] = &[1.5, 2.5];
const DASH_DOT: &[f64] = &[6.0, 2.5, 1.5, 2.5];

/// Dash pattern for line-style shape tokens; `None` means markers only.
fn line_dash(shape: &str) -> Option<&'static [f64]> {
    match shape {
        "-" => Some(SOLID),
        "--" => Some(DASHED),
        ":" => Some(DOTTED),
        "-." => Some(DASH_DOT),
        _ => None,
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Surface(format!("{prefix}: {err}"))
}
