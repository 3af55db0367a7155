use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Unknown chart type, scale mode, option name, or an option value that
    /// cannot be converted to the field's type.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A value that must be numeric could not be coerced.
    #[error("data format error: series {series} contains non-numeric value `{value}`")]
    DataFormat { series: usize, value: String },

    #[error("{chart_type} chart requires at least {required} series, found {found}")]
    InsufficientSeries {
        chart_type: &'static str,
        required: usize,
        found: usize,
    },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Drawing or export failure reported by a render surface.
    #[error("surface error: {0}")]
    Surface(String),
}

impl ChartError {
    /// True for errors caused by the dataset contents rather than options or
    /// the backend.
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::DataFormat { .. } | Self::InsufficientSeries { .. } | Self::InvalidData(_)
        )
    }
}
