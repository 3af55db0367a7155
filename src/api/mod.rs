mod chart_options;
mod color_assigner;
mod dispatcher;
mod option_edits;
mod plotter;
mod series_store;

pub use chart_options::{
    ChartOptions, ChartType, FONT_SIZE_RANGE, FONTS, LINE_WIDTH_RANGE, SHAPES,
};
pub use color_assigner::{
    ColorAssigner, DEFAULT_PALETTE, DEFAULT_SERIES_COLOR, palette_color,
};
pub use dispatcher::{BAR_FILL_ALPHA, ChartDispatcher, EmptyReason, RenderResult};
pub use option_edits::{OptionBag, OptionField, OptionValue, OptionsEditor};
pub use plotter::Plotter;
pub use series_store::SeriesStore;
