use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::core::types::CellValue;
use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Coerces every cell of one series to a finite number.
///
/// `series_index` is the position of the series in the caller's dataset and
/// is reported back on the first cell that does not coerce.
pub fn coerce_numeric(values: &[CellValue], series_index: usize) -> ChartResult<Vec<f64>> {
    values
        .iter()
        .map(|cell| {
            cell.as_number().ok_or_else(|| ChartError::DataFormat {
                series: series_index,
                value: cell.label(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_numeric_text_and_decimals() {
        let values = vec![
            CellValue::from(" 2.5 "),
            CellValue::from(Decimal::new(125, 2)),
            CellValue::from(4.0),
        ];
        assert_eq!(coerce_numeric(&values, 0).expect("coerce"), vec![2.5, 1.25, 4.0]);
    }

    #[test]
    fn reports_first_offending_cell() {
        let values = vec![CellValue::from("1"), CellValue::from("x"), CellValue::from("y")];
        let err = coerce_numeric(&values, 3).expect_err("must fail");
        match err {
            ChartError::DataFormat { series, value } => {
                assert_eq!(series, 3);
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_non_finite_text() {
        let values = vec![CellValue::from("inf")];
        assert!(coerce_numeric(&values, 0).is_err());
    }
}
