use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Upper bound on the bin count accepted by options and by `bin_values`.
pub const MAX_HISTOGRAM_BINS: usize = 10_000;

/// Equal-width bins over the range of one sample.
///
/// `edges` has `counts.len() + 1` entries. Every bin is half-open except the
/// last, which also holds the maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBins {
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl HistogramBins {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    #[must_use]
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.get(1)) {
            (Some(first), Some(second)) => second - first,
            _ => 0.0,
        }
    }
}

/// Bins `values` into `bin_count` equal-width bins spanning `[min, max]`.
///
/// A sample whose values are all equal is centred in a unit-wide range, or
/// in a range relative to its magnitude when half a unit is below precision.
pub fn bin_values(values: &[f64], bin_count: usize) -> ChartResult<HistogramBins> {
    if !(1..=MAX_HISTOGRAM_BINS).contains(&bin_count) {
        return Err(ChartError::InvalidData(format!(
            "histogram bin count must be in 1..={MAX_HISTOGRAM_BINS}, got {bin_count}"
        )));
    }
    if values.is_empty() {
        return Err(ChartError::InvalidData(
            "histogram requires at least one value".to_owned(),
        ));
    }
    if values.iter().any(|value| !value.is_finite()) {
        return Err(ChartError::InvalidData(
            "histogram values must be finite".to_owned(),
        ));
    }

    let (mut min, mut max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(*value), hi.max(*value))
        });
    if min == max {
        let pad = 0.5_f64.max(min.abs() * 1e-9);
        min -= pad;
        max += pad;
    }

    // Split the span when `max - min` overflows (e.g. -1e308..1e308).
    let bins = bin_count as f64;
    let span = max - min;
    let split = !span.is_finite();
    let width = if split { max / bins - min / bins } else { span / bins };
    if !width.is_finite() || width <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "histogram range [{min}, {max}] cannot be split into {bin_count} bins"
        )));
    }
    let edges: Vec<f64> = (0..=bin_count)
        .map(|i| match i {
            i if i == bin_count => max,
            i if split => {
                let t = i as f64 / bins;
                min * (1.0 - t) + max * t
            }
            i => min + width * i as f64,
        })
        .collect();

    let locate = |value: f64| -> ChartResult<usize> {
        let offset = if split {
            value / width - min / width
        } else {
            (value - min) / width
        };
        if offset.is_nan() {
            return Err(ChartError::InvalidData(format!(
                "value {value} cannot be placed in a histogram bin"
            )));
        }
        Ok((offset.floor().max(0.0) as usize).min(bin_count - 1))
    };

    #[cfg(feature = "parallel-projection")]
    let counts = values
        .par_iter()
        .try_fold(
            || vec![0_u64; bin_count],
            |mut acc, value| {
                acc[locate(*value)?] += 1;
                Ok::<_, ChartError>(acc)
            },
        )
        .try_reduce(
            || vec![0_u64; bin_count],
            |mut left, right| {
                for (slot, count) in left.iter_mut().zip(right) {
                    *slot += count;
                }
                Ok(left)
            },
        )?;

    #[cfg(not(feature = "parallel-projection"))]
    let counts = {
        let mut counts = vec![0_u64; bin_count];
        for value in values {
            counts[locate(*value)?] += 1;
        }
        counts
    };

    Ok(HistogramBins { edges, counts })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn maximum_lands_in_last_bin() {
        let bins = bin_values(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).expect("bins");
        assert_eq!(bins.counts, vec![1, 1, 1, 2]);
        assert_relative_eq!(bins.bin_width(), 1.0);
        assert_eq!(bins.edges.last().copied(), Some(4.0));
    }

    #[test]
    fn constant_sample_is_widened() {
        let bins = bin_values(&[7.0, 7.0, 7.0], DEFAULT_HISTOGRAM_BINS).expect("bins");
        assert_eq!(bins.edges.first().copied(), Some(6.5));
        assert_eq!(bins.edges.last().copied(), Some(7.5));
        assert_eq!(bins.total(), 3);
        assert_eq!(bins.counts[5], 3);
    }

    #[test]
    fn full_f64_range_splits_without_overflow() {
        let bins = bin_values(&[-1e308, 1e308], 2).expect("bins");
        assert_eq!(bins.counts, vec![1, 1]);
        assert!(bins.edges.iter().all(|edge| edge.is_finite()));
        assert_eq!(bins.edges, vec![-1e308, 0.0, 1e308]);

        let wide = bin_values(&[f64::MIN, 0.0, f64::MAX], 10).expect("bins");
        assert_eq!(wide.total(), 3);
        assert!(wide.edges.iter().all(|edge| edge.is_finite()));
        assert!(wide.edges.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn huge_constant_sample_is_widened_relative_to_magnitude() {
        let bins = bin_values(&[1e20, 1e20], DEFAULT_HISTOGRAM_BINS).expect("bins");
        assert_eq!(bins.total(), 2);
        assert!(bins.bin_width() > 0.0);
        assert!(bins.edges.iter().all(|edge| edge.is_finite()));
        assert!(bins.edges[0] < 1e20 && 1e20 < bins.edges[DEFAULT_HISTOGRAM_BINS]);
    }

    #[test]
    fn rejects_bin_counts_above_maximum() {
        let err = bin_values(&[1.0, 2.0], MAX_HISTOGRAM_BINS + 1).expect_err("too many");
        assert!(matches!(err, ChartError::InvalidData(_)));
        assert!(bin_values(&[1.0, 2.0], MAX_HISTOGRAM_BINS).is_ok());
    }

    #[test]
    fn rejects_zero_bins() {
        let err = bin_values(&[1.0], 0).expect_err("zero bins");
        assert!(format!("{err}").contains("bin count"));
    }
}
