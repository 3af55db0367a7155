use crate::error::{ChartError, ChartResult};

/// Normalizes wedge sizes into fractions of the whole pie.
///
/// Wedges must be non-negative and sum to a positive total. `series_index`
/// is only used for error reporting.
pub fn wedge_fractions(values: &[f64], series_index: usize) -> ChartResult<Vec<f64>> {
    if let Some(negative) = values.iter().find(|value| **value < 0.0) {
        return Err(ChartError::InvalidData(format!(
            "pie series {series_index} has negative wedge size {negative}"
        )));
    }
    let total: f64 = values.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "pie series {series_index} wedge sizes must sum to a positive finite value"
        )));
    }
    Ok(values.iter().map(|value| value / total).collect())
}
