use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::MAX_HISTOGRAM_BINS;
use crate::error::{ChartError, ChartResult};

use super::ChartOptions;

/// Persistable key/value view of committed options.
pub type OptionBag = IndexMap<String, OptionValue>;

/// Addressable fields of `ChartOptions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionField {
    ChartType,
    Shape,
    XScale,
    YScale,
    ShowGrid,
    ShowLegend,
    LegendPosition,
    Font,
    FontSize,
    LineWidth,
    Title,
    XLabel,
    YLabel,
    HistogramBins,
    Dpi,
}

impl OptionField {
    pub const ALL: [Self; 15] = [
        Self::ChartType,
        Self::Shape,
        Self::XScale,
        Self::YScale,
        Self::ShowGrid,
        Self::ShowLegend,
        Self::LegendPosition,
        Self::Font,
        Self::FontSize,
        Self::LineWidth,
        Self::Title,
        Self::XLabel,
        Self::YLabel,
        Self::HistogramBins,
        Self::Dpi,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ChartType => "chart_type",
            Self::Shape => "shape",
            Self::XScale => "x_scale",
            Self::YScale => "y_scale",
            Self::ShowGrid => "show_grid",
            Self::ShowLegend => "show_legend",
            Self::LegendPosition => "legend_position",
            Self::Font => "font",
            Self::FontSize => "font_size",
            Self::LineWidth => "line_width",
            Self::Title => "title",
            Self::XLabel => "x_label",
            Self::YLabel => "y_label",
            Self::HistogramBins => "histogram_bins",
            Self::Dpi => "dpi",
        }
    }
}

impl fmt::Display for OptionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for OptionField {
    type Err = ChartError;

    /// Accepts canonical keys plus the flat names older preference files use
    /// (`graphtype`, `legendloc`, `linewidth`, ...).
    fn from_str(input: &str) -> ChartResult<Self> {
        let key = input.trim().to_ascii_lowercase();
        if let Some(field) = Self::ALL.into_iter().find(|field| field.key() == key) {
            return Ok(field);
        }
        let field = match key.as_str() {
            "graphtype" | "graph_type" => Self::ChartType,
            "symbol" => Self::Shape,
            "xscale" => Self::XScale,
            "yscale" => Self::YScale,
            "grid" => Self::ShowGrid,
            "showlegend" | "legend" => Self::ShowLegend,
            "legendloc" => Self::LegendPosition,
            "fontsize" => Self::FontSize,
            "linewidth" => Self::LineWidth,
            "plottitle" => Self::Title,
            "xlabel" | "plotxlabel" => Self::XLabel,
            "ylabel" | "plotylabel" => Self::YLabel,
            "bins" => Self::HistogramBins,
            _ => {
                return Err(ChartError::Configuration(format!(
                    "unknown option `{input}`"
                )));
            }
        };
        Ok(field)
    }
}

/// Loosely typed option value as produced by configuration surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Number(OrderedFloat<f64>),
    Text(String),
}

impl OptionValue {
    fn as_text(&self) -> String {
        match self {
            Self::Flag(flag) => flag.to_string(),
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
        }
    }

    fn as_flag(&self, field: OptionField) -> ChartResult<bool> {
        match self {
            Self::Flag(flag) => Ok(*flag),
            Self::Number(number) => Ok(number.into_inner() != 0.0),
            Self::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(true),
                "false" | "no" | "off" | "0" => Ok(false),
                _ => Err(type_mismatch(field, self, "a boolean")),
            },
        }
    }

    fn as_number(&self, field: OptionField) -> ChartResult<f64> {
        let number = match self {
            Self::Number(number) => number.into_inner(),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| type_mismatch(field, self, "a number"))?,
            Self::Flag(_) => return Err(type_mismatch(field, self, "a number")),
        };
        if !number.is_finite() {
            return Err(type_mismatch(field, self, "a finite number"));
        }
        Ok(number)
    }

    fn as_count(&self, field: OptionField, max: usize) -> ChartResult<usize> {
        let number = self.as_number(field)?;
        if number < 1.0 || number.fract() != 0.0 || number > max as f64 {
            return Err(type_mismatch(
                field,
                self,
                &format!("a whole number in 1..={max}"),
            ));
        }
        Ok(number as usize)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }
}

impl From<usize> for OptionValue {
    fn from(value: usize) -> Self {
        Self::Number(OrderedFloat(value as f64))
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

fn type_mismatch(field: OptionField, value: &OptionValue, expected: &str) -> ChartError {
    ChartError::Configuration(format!(
        "option `{field}` expects {expected}, got `{}`",
        value.as_text()
    ))
}

impl ChartOptions {
    /// Writes one field, validating enumerated values.
    pub fn set_field(&mut self, field: OptionField, value: &OptionValue) -> ChartResult<()> {
        match field {
            OptionField::ChartType => self.chart_type = value.as_text().parse()?,
            OptionField::Shape => self.shape = value.as_text(),
            OptionField::XScale => self.x_scale = value.as_text().parse()?,
            OptionField::YScale => self.y_scale = value.as_text().parse()?,
            OptionField::ShowGrid => self.show_grid = value.as_flag(field)?,
            OptionField::ShowLegend => self.show_legend = value.as_flag(field)?,
            OptionField::LegendPosition => self.legend_position = value.as_text().parse()?,
            OptionField::Font => self.font = value.as_text(),
            OptionField::FontSize => self.font_size = value.as_number(field)?,
            OptionField::LineWidth => self.line_width = value.as_number(field)?,
            OptionField::Title => self.title = value.as_text(),
            OptionField::XLabel => self.x_label = value.as_text(),
            OptionField::YLabel => self.y_label = value.as_text(),
            OptionField::HistogramBins => {
                self.histogram_bins = value.as_count(field, MAX_HISTOGRAM_BINS)?;
            }
            OptionField::Dpi => self.dpi = value.as_number(field)?,
        }
        Ok(())
    }

    #[must_use]
    pub fn field(&self, field: OptionField) -> OptionValue {
        match field {
            OptionField::ChartType => self.chart_type.as_str().into(),
            OptionField::Shape => self.shape.clone().into(),
            OptionField::XScale => self.x_scale.as_str().into(),
            OptionField::YScale => self.y_scale.as_str().into(),
            OptionField::ShowGrid => self.show_grid.into(),
            OptionField::ShowLegend => self.show_legend.into(),
            OptionField::LegendPosition => self.legend_position.as_str().into(),
            OptionField::Font => self.font.clone().into(),
            OptionField::FontSize => self.font_size.into(),
            OptionField::LineWidth => self.line_width.into(),
            OptionField::Title => self.title.clone().into(),
            OptionField::XLabel => self.x_label.clone().into(),
            OptionField::YLabel => self.y_label.clone().into(),
            OptionField::HistogramBins => self.histogram_bins.into(),
            OptionField::Dpi => self.dpi.into(),
        }
    }
}

/// Two-phase editor over `ChartOptions`.
///
/// Configuration surfaces stage edits with `set`; nothing reaches the
/// committed options until `apply` succeeds for the whole batch.
#[derive(Debug, Clone, Default)]
pub struct OptionsEditor {
    committed: ChartOptions,
    pending: IndexMap<OptionField, OptionValue>,
}

impl OptionsEditor {
    #[must_use]
    pub fn new(committed: ChartOptions) -> Self {
        Self {
            committed,
            pending: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn committed(&self) -> &ChartOptions {
        &self.committed
    }

    /// Stages an edit by option name.
    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) -> ChartResult<()> {
        let field = name.parse()?;
        self.stage(field, value);
        Ok(())
    }

    /// Stages an edit, replacing any earlier staged value for the field.
    pub fn stage(&mut self, field: OptionField, value: impl Into<OptionValue>) {
        let value = value.into();
        trace!(field = field.key(), ?value, "stage option edit");
        self.pending.insert(field, value);
    }

    /// Drops the staged edit for `field`, returning it.
    pub fn reset(&mut self, field: OptionField) -> Option<OptionValue> {
        self.pending.shift_remove(&field)
    }

    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    #[must_use]
    pub fn pending(&self) -> &IndexMap<OptionField, OptionValue> {
        &self.pending
    }

    /// Value a configuration surface should display for `field`.
    #[must_use]
    pub fn staged_value(&self, field: OptionField) -> OptionValue {
        self.pending
            .get(&field)
            .cloned()
            .unwrap_or_else(|| self.committed.field(field))
    }

    /// Commits every staged edit, or none of them.
    ///
    /// Returns the number of fields committed. On error the committed options
    /// and the staged edits are left as they were.
    pub fn apply(&mut self) -> ChartResult<usize> {
        let mut next = self.committed.clone();
        for (field, value) in &self.pending {
            next.set_field(*field, value)?;
        }
        next.validate()?;

        let applied = self.pending.len();
        self.committed = next;
        self.pending.clear();
        debug!(applied, "applied staged chart options");
        Ok(applied)
    }

    /// Replaces the committed options directly, dropping staged edits.
    pub fn replace(&mut self, options: ChartOptions) -> ChartResult<()> {
        options.validate()?;
        self.committed = options;
        self.pending.clear();
        Ok(())
    }

    #[must_use]
    pub fn export_options(&self) -> OptionBag {
        OptionField::ALL
            .into_iter()
            .map(|field| (field.key().to_owned(), self.committed.field(field)))
            .collect()
    }

    /// Loads committed options from a preferences bag.
    ///
    /// Keys that do not name an option are skipped. Staged edits are kept.
    pub fn import_options(&mut self, bag: &OptionBag) -> ChartResult<()> {
        let mut next = self.committed.clone();
        for (key, value) in bag {
            match key.parse::<OptionField>() {
                Ok(field) => next.set_field(field, value)?,
                Err(_) => debug!(key = %key, "skipping unknown option key"),
            }
        }
        next.validate()?;
        self.committed = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ChartType;

    #[test]
    fn legacy_keys_resolve_to_fields() {
        assert_eq!("graphtype".parse::<OptionField>().expect("field"), OptionField::ChartType);
        assert_eq!("legendloc".parse::<OptionField>().expect("field"), OptionField::LegendPosition);
        assert!("colour".parse::<OptionField>().is_err());
    }

    #[test]
    fn numeric_flags_treat_non_zero_as_true() {
        let mut options = ChartOptions::default();
        options
            .set_field(OptionField::ShowGrid, &OptionValue::from(1.0))
            .expect("grid");
        assert!(options.show_grid);
    }

    #[test]
    fn every_field_round_trips_through_its_value() {
        let source = ChartOptions::new(ChartType::Bar)
            .with_grid(true)
            .with_labels("t", "x", "y");
        let mut target = ChartOptions::default();
        for field in OptionField::ALL {
            target
                .set_field(field, &source.field(field))
                .expect("set field");
        }
        assert_eq!(target, source);
    }
}
