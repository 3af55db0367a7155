pub mod grid;
pub mod histogram;
pub mod pie;
pub mod primitives;
pub mod scale;
pub mod types;

pub use grid::{GridCell, SubplotGrid};
pub use histogram::{DEFAULT_HISTOGRAM_BINS, HistogramBins, MAX_HISTOGRAM_BINS, bin_values};
pub use pie::wedge_fractions;
pub use primitives::{coerce_numeric, decimal_to_f64};
pub use scale::{AxisMapper, AxisScale, ScaleTransform};
pub use types::{CellValue, Dataset, Series, Viewport};
