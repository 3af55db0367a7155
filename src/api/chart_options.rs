use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{AxisScale, DEFAULT_HISTOGRAM_BINS, MAX_HISTOGRAM_BINS};
use crate::error::{ChartError, ChartResult};
use crate::render::{FontSpec, LegendPosition, TraceStyle};

/// Marker/line tokens offered by configuration surfaces.
pub const SHAPES: [&str; 15] = [
    "o", "-", "--", ":", ".", "p", "^", "<", "s", "+", "x", "D", "1", "4", "h",
];

/// Font families offered by configuration surfaces.
pub const FONTS: [&str; 5] = ["serif", "sans-serif", "cursive", "fantasy", "monospace"];

/// Slider range for font size. Not enforced.
pub const FONT_SIZE_RANGE: (f64, f64) = (8.0, 26.0);

/// Slider range for line width. Not enforced.
pub const LINE_WIDTH_RANGE: (f64, f64) = (1.0, 10.0);

/// Layout algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Xy,
    Bar,
    Histogram,
    Pie,
}

impl ChartType {
    pub const ALL: [Self; 4] = [Self::Xy, Self::Bar, Self::Histogram, Self::Pie];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xy => "xy",
            Self::Bar => "bar",
            Self::Histogram => "histogram",
            Self::Pie => "pie",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "xy" => Ok(Self::Xy),
            "bar" => Ok(Self::Bar),
            "histogram" | "hist" => Ok(Self::Histogram),
            "pie" => Ok(Self::Pie),
            _ => Err(ChartError::Configuration(format!(
                "unknown chart type `{input}` (expected xy, bar, histogram or pie)"
            ))),
        }
    }
}

/// Committed chart configuration.
///
/// Serializable so hosts can persist it next to their own preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default = "default_shape")]
    pub shape: String,
    #[serde(default)]
    pub x_scale: AxisScale,
    #[serde(default)]
    pub y_scale: AxisScale,
    #[serde(default)]
    pub show_grid: bool,
    #[serde(default)]
    pub show_legend: bool,
    #[serde(default)]
    pub legend_position: LegendPosition,
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub x_label: String,
    #[serde(default)]
    pub y_label: String,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    #[serde(default = "default_dpi")]
    pub dpi: f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            chart_type: ChartType::default(),
            shape: default_shape(),
            x_scale: AxisScale::default(),
            y_scale: AxisScale::default(),
            show_grid: false,
            show_legend: false,
            legend_position: LegendPosition::default(),
            font: default_font(),
            font_size: default_font_size(),
            line_width: default_line_width(),
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            histogram_bins: default_histogram_bins(),
            dpi: default_dpi(),
        }
    }
}

impl ChartOptions {
    #[must_use]
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_scales(mut self, x_scale: AxisScale, y_scale: AxisScale) -> Self {
        self.x_scale = x_scale;
        self.y_scale = y_scale;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, position: LegendPosition) -> Self {
        self.show_legend = true;
        self.legend_position = position;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    #[must_use]
    pub fn with_labels(
        mut self,
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        self.title = title.into();
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    #[must_use]
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    #[must_use]
    pub fn trace_style(&self) -> TraceStyle {
        TraceStyle {
            shape: self.shape.clone(),
            line_width: self.line_width,
        }
    }

    #[must_use]
    pub fn font_spec(&self) -> FontSpec {
        FontSpec {
            family: self.font.clone(),
            size: self.font_size,
        }
    }

    /// Checks the constraints a render relies on.
    pub fn validate(&self) -> ChartResult<()> {
        if !(1..=MAX_HISTOGRAM_BINS).contains(&self.histogram_bins) {
            return Err(ChartError::Configuration(format!(
                "histogram_bins must be in 1..={MAX_HISTOGRAM_BINS}, got {}",
                self.histogram_bins
            )));
        }
        Ok(())
    }

    /// Serializes options to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Configuration(format!("failed to serialize options: {e}")))
    }

    /// Deserializes options from JSON; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let options: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::Configuration(format!("failed to parse options: {e}")))?;
        options.validate()?;
        Ok(options)
    }
}

fn default_shape() -> String {
    SHAPES[0].to_owned()
}

fn default_font() -> String {
    "sans-serif".to_owned()
}

fn default_font_size() -> f64 {
    12.0
}

fn default_line_width() -> f64 {
    1.5
}

fn default_histogram_bins() -> usize {
    DEFAULT_HISTOGRAM_BINS
}

fn default_dpi() -> f64 {
    300.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_type_tokens_are_case_insensitive() {
        assert_eq!("XY".parse::<ChartType>().expect("xy"), ChartType::Xy);
        assert_eq!("hist".parse::<ChartType>().expect("hist"), ChartType::Histogram);
        assert!(matches!(
            "scatter3d".parse::<ChartType>(),
            Err(ChartError::Configuration(_))
        ));
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let options = ChartOptions::from_json_str(r#"{"chart_type":"pie","dpi":72.0}"#)
            .expect("parse");
        assert_eq!(options.chart_type, ChartType::Pie);
        assert_eq!(options.dpi, 72.0);
        assert_eq!(options.histogram_bins, DEFAULT_HISTOGRAM_BINS);
        assert_eq!(options.font, "sans-serif");
    }

    #[test]
    fn json_rejects_unknown_chart_type() {
        assert!(ChartOptions::from_json_str(r#"{"chart_type":"radar"}"#).is_err());
    }
}
