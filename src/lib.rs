//! plot-rs: backend-agnostic chart dispatch for tabular data.
//!
//! A dataset of loosely typed columns is laid out as an XY, bar, histogram
//! or pie chart according to a two-phase option record, then replayed onto
//! any `RenderSurface` implementation.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartDispatcher, ChartOptions, ChartType, Plotter, RenderResult};
pub use error::{ChartError, ChartResult};
