use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{GridCell, HistogramBins};
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds an opaque color from 8-bit channels.
    #[must_use]
    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` tokens.
    pub fn from_hex(token: &str) -> ChartResult<Self> {
        let digits = token.trim().trim_start_matches('#');
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(ChartError::InvalidData(format!(
                "color token `{token}` must be #RRGGBB or #RRGGBBAA"
            )));
        }
        let channel = |offset: usize| -> ChartResult<f64> {
            u8::from_str_radix(&digits[offset..offset + 2], 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|_| ChartError::InvalidData(format!("invalid hex color `{token}`")))
        };
        let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Formats the color as `#RRGGBB`, appending alpha when not opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        let mut out = format!(
            "#{:02X}{:02X}{:02X}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        );
        if byte(self.alpha) != u8::MAX {
            out.push_str(&format!("{:02X}", byte(self.alpha)));
        }
        out
    }

    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Values along the X axis of a trace.
///
/// Columns whose cells all coerce are numeric; anything else is plotted as
/// evenly spaced categories labelled with the cell text.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisValues {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

impl AxisValues {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Categorical(labels) => labels.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_categorical(&self) -> bool {
        matches!(self, Self::Categorical(_))
    }

    /// Data-space positions; categories sit at `0, 1, 2, ...`.
    #[must_use]
    pub fn positions(&self) -> Vec<f64> {
        match self {
            Self::Numeric(values) => values.clone(),
            Self::Categorical(labels) => (0..labels.len()).map(|i| i as f64).collect(),
        }
    }
}

/// Marker/line style shared by every trace of an XY chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceStyle {
    pub shape: String,
    pub line_width: f64,
}

/// One line/marker trace of an XY chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineTrace {
    /// Position of the Y series in the dataset the trace was built from.
    pub series_index: usize,
    pub x: AxisValues,
    pub y: Vec<f64>,
    pub color: Color,
}

impl LineTrace {
    pub fn validate(&self) -> ChartResult<()> {
        if self.x.len() != self.y.len() {
            return Err(ChartError::InvalidData(format!(
                "trace for series {} has {} x values and {} y values",
                self.series_index,
                self.x.len(),
                self.y.len()
            )));
        }
        if self.y.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(
                "trace values must be finite".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Bars for one series at shared category positions.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub series_index: usize,
    pub categories: Vec<f64>,
    pub values: Vec<f64>,
    pub color: Color,
    pub fill_alpha: f64,
}

impl BarGroup {
    pub fn validate(&self) -> ChartResult<()> {
        if self.categories.len() != self.values.len() {
            return Err(ChartError::InvalidData(format!(
                "bar group for series {} has {} categories and {} values",
                self.series_index,
                self.categories.len(),
                self.values.len()
            )));
        }
        if !(0.0..=1.0).contains(&self.fill_alpha) {
            return Err(ChartError::InvalidData(
                "bar fill alpha must be in [0, 1]".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramPanel {
    pub series_index: usize,
    pub cell: GridCell,
    pub bins: HistogramBins,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub value: f64,
    /// Share of the whole pie in `[0, 1]`.
    pub fraction: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PiePanel {
    pub series_index: usize,
    pub cell: GridCell,
    pub slices: Vec<PieSlice>,
}

/// Canonical legend anchors.
///
/// Serializes as the spaced name from [`LegendPosition::as_str`], the same
/// token the option bag exports; parsing also accepts `-` and `_` separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum LegendPosition {
    #[default]
    Best,
    UpperLeft,
    UpperCenter,
    UpperRight,
    CenterLeft,
    Center,
    CenterRight,
    LowerLeft,
    LowerCenter,
    LowerRight,
}

impl LegendPosition {
    pub const ALL: [Self; 10] = [
        Self::Best,
        Self::UpperLeft,
        Self::UpperCenter,
        Self::UpperRight,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::LowerLeft,
        Self::LowerCenter,
        Self::LowerRight,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::UpperLeft => "upper left",
            Self::UpperCenter => "upper center",
            Self::UpperRight => "upper right",
            Self::CenterLeft => "center left",
            Self::Center => "center",
            Self::CenterRight => "center right",
            Self::LowerLeft => "lower left",
            Self::LowerCenter => "lower center",
            Self::LowerRight => "lower right",
        }
    }
}

impl fmt::Display for LegendPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegendPosition {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        let normalized = input.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|position| position.as_str() == normalized)
            .ok_or_else(|| {
                ChartError::Configuration(format!("unknown legend position `{input}`"))
            })
    }
}

impl From<LegendPosition> for String {
    fn from(position: LegendPosition) -> Self {
        position.as_str().to_owned()
    }
}

impl TryFrom<String> for LegendPosition {
    type Error = ChartError;

    fn try_from(value: String) -> ChartResult<Self> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Index of the trace this entry describes.
    pub trace: usize,
    pub label: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub position: LegendPosition,
    pub entries: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
}
