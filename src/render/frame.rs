use crate::core::{ScaleTransform, SubplotGrid};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    BarGroup, ChartLabels, FontSpec, HistogramPanel, Legend, LineTrace, PiePanel, TraceStyle,
};

/// Chart-type specific part of a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartContent {
    Xy {
        transform: ScaleTransform,
        style: TraceStyle,
        traces: Vec<LineTrace>,
    },
    Bar {
        groups: Vec<BarGroup>,
    },
    Histogram {
        grid: SubplotGrid,
        panels: Vec<HistogramPanel>,
    },
    Pie {
        grid: SubplotGrid,
        panels: Vec<PiePanel>,
    },
}

impl ChartContent {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Xy { .. } => "xy",
            Self::Bar { .. } => "bar",
            Self::Histogram { .. } => "histogram",
            Self::Pie { .. } => "pie",
        }
    }

    /// Number of drawable units (traces, bar groups, or panels).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Xy { traces, .. } => traces.len(),
            Self::Bar { groups } => groups.len(),
            Self::Histogram { panels, .. } => panels.len(),
            Self::Pie { panels, .. } => panels.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Backend-agnostic result of one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScene {
    pub content: ChartContent,
    pub labels: ChartLabels,
    pub font: FontSpec,
    pub legend: Option<Legend>,
    pub show_grid: bool,
}

impl ChartScene {
    #[must_use]
    pub fn new(content: ChartContent, labels: ChartLabels, font: FontSpec) -> Self {
        Self {
            content,
            labels,
            font,
            legend: None,
            show_grid: false,
        }
    }

    #[must_use]
    pub fn with_legend(mut self, legend: Option<Legend>) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    #[must_use]
    pub fn traces(&self) -> &[LineTrace] {
        match &self.content {
            ChartContent::Xy { traces, .. } => traces,
            _ => &[],
        }
    }

    #[must_use]
    pub fn bar_groups(&self) -> &[BarGroup] {
        match &self.content {
            ChartContent::Bar { groups } => groups,
            _ => &[],
        }
    }

    #[must_use]
    pub fn histogram_panels(&self) -> &[HistogramPanel] {
        match &self.content {
            ChartContent::Histogram { panels, .. } => panels,
            _ => &[],
        }
    }

    #[must_use]
    pub fn pie_panels(&self) -> &[PiePanel] {
        match &self.content {
            ChartContent::Pie { panels, .. } => panels,
            _ => &[],
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        match &self.content {
            ChartContent::Xy { traces, .. } => {
                for trace in traces {
                    trace.validate()?;
                }
            }
            ChartContent::Bar { groups } => {
                for group in groups {
                    group.validate()?;
                }
            }
            ChartContent::Histogram { grid, panels } => {
                for panel in panels {
                    validate_cell(*grid, panel.cell.row, panel.cell.column)?;
                    panel.color.validate()?;
                }
            }
            ChartContent::Pie { grid, panels } => {
                for panel in panels {
                    validate_cell(*grid, panel.cell.row, panel.cell.column)?;
                    for slice in &panel.slices {
                        slice.color.validate()?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn validate_cell(grid: SubplotGrid, row: usize, column: usize) -> ChartResult<()> {
    if row >= grid.rows || column >= grid.columns {
        return Err(ChartError::InvalidData(format!(
            "panel cell ({row}, {column}) outside {}x{} grid",
            grid.rows, grid.columns
        )));
    }
    Ok(())
}
