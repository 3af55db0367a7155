use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One table cell as handed over by the editing layer.
///
/// Cells are loosely typed: text cells are accepted as-is and only coerced to
/// numbers when a layout needs them.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Decimal(Decimal),
    Text(String),
}

impl CellValue {
    /// Returns the numeric interpretation of the cell, if it has a finite one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Decimal(value) => crate::core::primitives::decimal_to_f64(*value, "cell").ok()?,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Display text used for categorical axes and error messages.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Decimal(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<Decimal> for CellValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Ordered column of cells plotted as one visual unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub name: Option<String>,
    pub values: Vec<CellValue>,
}

impl Series {
    #[must_use]
    pub fn new<V: Into<CellValue>>(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            name: None,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Name shown in legends; falls back to the series' position in its dataset.
    #[must_use]
    pub fn display_name(&self, index: usize) -> String {
        self.name.clone().unwrap_or_else(|| index.to_string())
    }
}

/// Ordered collection of series submitted for one render pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    series: Vec<Series>,
}

impl Dataset {
    #[must_use]
    pub fn new(series: Vec<Series>) -> Self {
        Self { series }
    }

    /// Builds a dataset from raw columns, one series per column.
    #[must_use]
    pub fn from_columns<V: Into<CellValue>>(
        columns: impl IntoIterator<Item = impl IntoIterator<Item = V>>,
    ) -> Self {
        Self {
            series: columns.into_iter().map(Series::new).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn series_mut(&mut self) -> &mut [Series] {
        &mut self.series
    }

    pub fn push(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Removes and returns the first series, shifting the rest down.
    pub fn take_first(&mut self) -> Option<Series> {
        if self.series.is_empty() {
            return None;
        }
        Some(self.series.remove(0))
    }

    #[must_use]
    pub fn into_series(self) -> Vec<Series> {
        self.series
    }
}

impl From<Vec<Series>> for Dataset {
    fn from(series: Vec<Series>) -> Self {
        Self::new(series)
    }
}
