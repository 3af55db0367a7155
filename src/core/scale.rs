use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Spacing of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    /// Uniform spacing in raw units.
    #[default]
    Linear,
    /// Uniform spacing in log units (values must be > 0).
    Log,
}

impl AxisScale {
    pub const ALL: [Self; 2] = [Self::Linear, Self::Log];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log => "log",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Linear => 0,
            Self::Log => 1,
        }
    }
}

impl fmt::Display for AxisScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AxisScale {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "linear" | "norm" => Ok(Self::Linear),
            "log" => Ok(Self::Log),
            other => Err(ChartError::Configuration(format!(
                "unknown axis scale `{other}` (expected `linear` or `log`)"
            ))),
        }
    }
}

/// Plot primitive used for XY traces, one per `(x_scale, y_scale)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleTransform {
    Plot,
    SemiLogX,
    SemiLogY,
    LogLog,
}

/// Indexed `[x][y]`.
const SCALE_TRANSFORMS: [[ScaleTransform; 2]; 2] = [
    [ScaleTransform::Plot, ScaleTransform::SemiLogY],
    [ScaleTransform::SemiLogX, ScaleTransform::LogLog],
];

impl ScaleTransform {
    #[must_use]
    pub const fn for_axes(x_scale: AxisScale, y_scale: AxisScale) -> Self {
        SCALE_TRANSFORMS[x_scale.index()][y_scale.index()]
    }

    #[must_use]
    pub const fn x_scale(self) -> AxisScale {
        match self {
            Self::Plot | Self::SemiLogY => AxisScale::Linear,
            Self::SemiLogX | Self::LogLog => AxisScale::Log,
        }
    }

    #[must_use]
    pub const fn y_scale(self) -> AxisScale {
        match self {
            Self::Plot | Self::SemiLogX => AxisScale::Linear,
            Self::SemiLogY | Self::LogLog => AxisScale::Log,
        }
    }
}

impl Default for ScaleTransform {
    fn default() -> Self {
        Self::for_axes(AxisScale::Linear, AxisScale::Linear)
    }
}

/// Maps one data axis onto a pixel span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMapper {
    domain_start: f64,
    domain_end: f64,
    scale: AxisScale,
}

impl AxisMapper {
    pub fn new(domain_start: f64, domain_end: f64, scale: AxisScale) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "axis domain must be finite and non-zero".to_owned(),
            ));
        }
        if scale == AxisScale::Log && (domain_start <= 0.0 || domain_end <= 0.0) {
            return Err(ChartError::InvalidData(
                "log axis domain must be > 0".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            scale,
        })
    }

    /// Builds a mapper covering `values`, padding degenerate ranges.
    ///
    /// Non-positive values are ignored on log axes. Returns `None` when no
    /// usable value remains.
    #[must_use]
    pub fn fit(values: impl IntoIterator<Item = f64>, scale: AxisScale) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            if !value.is_finite() || (scale == AxisScale::Log && value <= 0.0) {
                continue;
            }
            min = min.min(value);
            max = max.max(value);
        }
        if min > max {
            return None;
        }
        if min == max {
            match scale {
                AxisScale::Linear => {
                    min -= 0.5;
                    max += 0.5;
                }
                AxisScale::Log => {
                    min /= 10.0;
                    max *= 10.0;
                }
            }
        }
        Self::new(min, max, scale).ok()
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn scale(self) -> AxisScale {
        self.scale
    }

    /// Normalized position of `value` in `[0, 1]` for in-domain values.
    ///
    /// Returns `None` for values a log axis cannot show.
    #[must_use]
    pub fn normalize(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self.scale {
            AxisScale::Linear => {
                Some((value - self.domain_start) / (self.domain_end - self.domain_start))
            }
            AxisScale::Log => {
                if value <= 0.0 {
                    return None;
                }
                let start = self.domain_start.ln();
                Some((value.ln() - start) / (self.domain_end.ln() - start))
            }
        }
    }

    /// Maps `value` into `[pixel_start, pixel_end]`.
    #[must_use]
    pub fn to_pixel(self, value: f64, pixel_start: f64, pixel_end: f64) -> Option<f64> {
        self.normalize(value)
            .map(|t| pixel_start + t * (pixel_end - pixel_start))
    }
}
