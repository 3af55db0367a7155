use tracing::{debug, trace, warn};

use crate::core::{
    CellValue, Dataset, ScaleTransform, Series, SubplotGrid, bin_values, coerce_numeric,
    wedge_fractions,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    AxisValues, BarGroup, ChartContent, ChartLabels, ChartScene, HistogramPanel, Legend,
    LegendEntry, LineTrace, PiePanel, PieSlice,
};

use super::color_assigner::{DEFAULT_SERIES_COLOR, palette_color};
use super::{ChartOptions, ChartType, ColorAssigner};

/// Alpha applied to bar fills so overlapping groups stay visible.
pub const BAR_FILL_ALPHA: f64 = 0.6;

/// Why a render produced no scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The dataset holds no series at all.
    EmptyDataset,
    /// Every series the layout would draw is empty.
    NoValues,
}

/// Outcome of one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderResult {
    NothingToDraw(EmptyReason),
    Drawn(ChartScene),
}

impl RenderResult {
    #[must_use]
    pub fn scene(&self) -> Option<&ChartScene> {
        match self {
            Self::Drawn(scene) => Some(scene),
            Self::NothingToDraw(_) => None,
        }
    }

    #[must_use]
    pub fn is_drawn(&self) -> bool {
        matches!(self, Self::Drawn(_))
    }
}

/// Selects and runs the layout for the configured chart type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartDispatcher;

impl ChartDispatcher {
    /// Lays out `snapshot` with `options`.
    ///
    /// The snapshot is the dispatcher's working copy: the X series is moved
    /// out of it for XY and bar layouts. Colors are requested from `colors`
    /// in series order so repeated calls see the same assignments.
    pub fn render(
        snapshot: Dataset,
        options: &ChartOptions,
        colors: &mut ColorAssigner,
    ) -> ChartResult<RenderResult> {
        options.validate()?;
        if snapshot.is_empty() {
            warn!("no data to plot");
            return Ok(RenderResult::NothingToDraw(EmptyReason::EmptyDataset));
        }

        debug!(
            chart_type = %options.chart_type,
            series_count = snapshot.len(),
            "dispatch chart layout"
        );
        let content = match options.chart_type {
            ChartType::Bar => layout_bars(snapshot, colors)?,
            ChartType::Xy => layout_xy(snapshot, options, colors)?,
            ChartType::Histogram => layout_histograms(snapshot, options.histogram_bins)?,
            ChartType::Pie => layout_pies(snapshot)?,
        };
        let Some((content, legend)) = content else {
            return Ok(RenderResult::NothingToDraw(EmptyReason::NoValues));
        };

        let labels = ChartLabels {
            title: options.title.clone(),
            x_label: options.x_label.clone(),
            y_label: options.y_label.clone(),
        };
        // Only XY layouts produce entries; other charts never carry a legend.
        let legend = if options.show_legend && !legend.is_empty() {
            Some(Legend {
                position: options.legend_position,
                entries: legend,
            })
        } else {
            None
        };
        Ok(RenderResult::Drawn(
            ChartScene::new(content, labels, options.font_spec())
                .with_legend(legend)
                .with_grid(options.show_grid),
        ))
    }
}

type Layout = Option<(ChartContent, Vec<LegendEntry>)>;

/// Grouped bars. More than one series: the first is the shared category
/// axis. A single series is plotted against `0..len` in the default color.
fn layout_bars(mut data: Dataset, colors: &mut ColorAssigner) -> ChartResult<Layout> {
    let mut groups = Vec::new();
    if data.len() == 1 {
        let Some(series) = data.take_first() else {
            return Ok(None);
        };
        let values = coerce_numeric(&series.values, 0)?;
        if !values.is_empty() {
            groups.push(BarGroup {
                series_index: 0,
                categories: (0..values.len()).map(|i| i as f64).collect(),
                values,
                color: DEFAULT_SERIES_COLOR,
                fill_alpha: BAR_FILL_ALPHA,
            });
        }
    } else {
        let Some(x_series) = data.take_first() else {
            return Ok(None);
        };
        let categories = coerce_numeric(&x_series.values, 0)?;
        for (i, series) in data.into_series().into_iter().enumerate() {
            let series_index = i + 1;
            let color = colors.color_for(i);
            if series.is_empty() {
                trace!(series_index, "skip empty bar series");
                continue;
            }
            let values = coerce_numeric(&series.values, series_index)?;
            ensure_same_len(categories.len(), values.len(), series_index)?;
            groups.push(BarGroup {
                series_index,
                categories: categories.clone(),
                values,
                color,
                fill_alpha: BAR_FILL_ALPHA,
            });
        }
    }

    if groups.is_empty() {
        return Ok(None);
    }
    Ok(Some((ChartContent::Bar { groups }, Vec::new())))
}

/// Line/marker traces against the first series. Unlike bars there is no
/// single-series fallback: one series cannot form an XY chart.
fn layout_xy(
    mut data: Dataset,
    options: &ChartOptions,
    colors: &mut ColorAssigner,
) -> ChartResult<Layout> {
    if data.len() < 2 {
        return Err(ChartError::InsufficientSeries {
            chart_type: ChartType::Xy.as_str(),
            required: 2,
            found: data.len(),
        });
    }
    let Some(x_series) = data.take_first() else {
        return Ok(None);
    };
    let x = axis_values(&x_series.values);

    let mut traces = Vec::new();
    let mut legend = Vec::new();
    for (i, series) in data.into_series().into_iter().enumerate() {
        let series_index = i + 1;
        let color = colors.color_for(i);
        if series.is_empty() {
            trace!(series_index, "skip empty xy series");
            continue;
        }
        let y = coerce_numeric(&series.values, series_index)?;
        ensure_same_len(x.len(), y.len(), series_index)?;
        legend.push(LegendEntry {
            trace: traces.len(),
            label: series.display_name(series_index),
            color,
        });
        traces.push(LineTrace {
            series_index,
            x: x.clone(),
            y,
            color,
        });
    }

    if traces.is_empty() {
        return Ok(None);
    }
    Ok(Some((
        ChartContent::Xy {
            transform: ScaleTransform::for_axes(options.x_scale, options.y_scale),
            style: options.trace_style(),
            traces,
        },
        legend,
    )))
}

fn layout_histograms(data: Dataset, bin_count: usize) -> ChartResult<Layout> {
    let groups = non_empty_groups(data);
    let Some(grid) = SubplotGrid::for_count(groups.len()) else {
        return Ok(None);
    };

    let mut panels = Vec::with_capacity(groups.len());
    for (ordinal, (series_index, series)) in groups.into_iter().enumerate() {
        let values = coerce_numeric(&series.values, series_index)?;
        panels.push(HistogramPanel {
            series_index,
            cell: panel_cell(grid, ordinal)?,
            bins: bin_values(&values, bin_count)?,
            color: DEFAULT_SERIES_COLOR,
        });
    }
    Ok(Some((ChartContent::Histogram { grid, panels }, Vec::new())))
}

/// One pie per non-empty series; slices cycle through the default palette.
fn layout_pies(data: Dataset) -> ChartResult<Layout> {
    let groups = non_empty_groups(data);
    let Some(grid) = SubplotGrid::for_count(groups.len()) else {
        return Ok(None);
    };

    let mut panels = Vec::with_capacity(groups.len());
    for (ordinal, (series_index, series)) in groups.into_iter().enumerate() {
        let values = coerce_numeric(&series.values, series_index)?;
        let fractions = wedge_fractions(&values, series_index)?;
        let slices = values
            .into_iter()
            .zip(fractions)
            .enumerate()
            .map(|(slice, (value, fraction))| PieSlice {
                value,
                fraction,
                color: palette_color(slice),
            })
            .collect();
        panels.push(PiePanel {
            series_index,
            cell: panel_cell(grid, ordinal)?,
            slices,
        });
    }
    Ok(Some((ChartContent::Pie { grid, panels }, Vec::new())))
}

fn non_empty_groups(data: Dataset) -> Vec<(usize, Series)> {
    data.into_series()
        .into_iter()
        .enumerate()
        .filter(|(series_index, series)| {
            if series.is_empty() {
                trace!(series_index, "skip empty series");
            }
            !series.is_empty()
        })
        .collect()
}

fn panel_cell(grid: SubplotGrid, ordinal: usize) -> ChartResult<crate::core::GridCell> {
    grid.cell(ordinal).ok_or_else(|| {
        ChartError::InvalidData(format!(
            "panel {ordinal} does not fit a {}x{} grid",
            grid.rows, grid.columns
        ))
    })
}

/// Numeric when every cell coerces, categorical otherwise.
fn axis_values(cells: &[CellValue]) -> AxisValues {
    let numeric: Option<Vec<f64>> = cells.iter().map(CellValue::as_number).collect();
    match numeric {
        Some(values) => AxisValues::Numeric(values),
        None => AxisValues::Categorical(cells.iter().map(CellValue::label).collect()),
    }
}

fn ensure_same_len(x_len: usize, y_len: usize, series_index: usize) -> ChartResult<()> {
    if x_len != y_len {
        return Err(ChartError::InvalidData(format!(
            "series {series_index} has {y_len} values but the x series has {x_len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_x_series_stays_numeric() {
        let cells = vec![CellValue::from("1"), CellValue::from(2.0)];
        assert_eq!(axis_values(&cells), AxisValues::Numeric(vec![1.0, 2.0]));
    }

    #[test]
    fn mixed_x_series_becomes_categorical() {
        let cells = vec![CellValue::from("jan"), CellValue::from(2.0)];
        assert_eq!(
            axis_values(&cells),
            AxisValues::Categorical(vec!["jan".to_owned(), "2".to_owned()])
        );
    }
}
