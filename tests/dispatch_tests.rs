use plot_rs::api::{
    BAR_FILL_ALPHA, ChartDispatcher, ChartOptions, ChartType, ColorAssigner, DEFAULT_SERIES_COLOR,
    EmptyReason, RenderResult, palette_color,
};
use plot_rs::core::{AxisScale, Dataset, GridCell, ScaleTransform, Series, SubplotGrid};
use plot_rs::render::{AxisValues, ChartContent, LegendPosition};
use plot_rs::ChartError;

fn xy_dataset() -> Dataset {
    Dataset::new(vec![
        Series::new(["a", "b", "c"]),
        Series::new([1.0, 2.0, 3.0]),
        Series::new([4.0, 5.0, 6.0]),
    ])
}

fn render(dataset: Dataset, options: &ChartOptions) -> Result<RenderResult, ChartError> {
    let mut colors = ColorAssigner::new();
    ChartDispatcher::render(dataset, options, &mut colors)
}

#[test]
fn xy_draws_one_trace_per_non_x_series() {
    let mut colors = ColorAssigner::new();
    let result = ChartDispatcher::render(
        xy_dataset(),
        &ChartOptions::new(ChartType::Xy),
        &mut colors,
    )
    .expect("xy render");

    let scene = result.scene().expect("scene drawn");
    let traces = scene.traces();
    assert_eq!(traces.len(), 2);
    assert_eq!(traces[0].series_index, 1);
    assert_eq!(traces[1].series_index, 2);
    assert_eq!(traces[0].color, colors.peek(0));
    assert_eq!(traces[1].color, colors.peek(1));
    assert_eq!(
        traces[0].x,
        AxisValues::Categorical(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
    );
    assert_eq!(traces[1].y, vec![4.0, 5.0, 6.0]);
}

#[test]
fn xy_with_numeric_text_x_stays_numeric() {
    let dataset = Dataset::new(vec![
        Series::new(["1", " 2 ", "3.5"]),
        Series::new([10.0, 20.0, 30.0]),
    ]);
    let result = render(dataset, &ChartOptions::new(ChartType::Xy)).expect("render");
    let traces = result.scene().expect("scene").traces();
    assert_eq!(traces[0].x, AxisValues::Numeric(vec![1.0, 2.0, 3.5]));
}

#[test]
fn xy_requires_two_series() {
    let dataset = Dataset::from_columns(vec![vec![1.0, 2.0, 3.0]]);
    let err = render(dataset, &ChartOptions::new(ChartType::Xy)).expect_err("single series");
    assert!(matches!(
        err,
        ChartError::InsufficientSeries {
            required: 2,
            found: 1,
            ..
        }
    ));
}

#[test]
fn xy_scale_transform_follows_axis_modes() {
    let cases = [
        (AxisScale::Linear, AxisScale::Linear, ScaleTransform::Plot),
        (AxisScale::Log, AxisScale::Linear, ScaleTransform::SemiLogX),
        (AxisScale::Linear, AxisScale::Log, ScaleTransform::SemiLogY),
        (AxisScale::Log, AxisScale::Log, ScaleTransform::LogLog),
    ];
    for (x_scale, y_scale, expected) in cases {
        let options = ChartOptions::new(ChartType::Xy).with_scales(x_scale, y_scale);
        let result = render(xy_dataset(), &options).expect("render");
        match &result.scene().expect("scene").content {
            ChartContent::Xy { transform, .. } => assert_eq!(*transform, expected),
            other => panic!("unexpected content {}", other.kind()),
        }
    }
}

#[test]
fn xy_rejects_non_numeric_y_with_series_index() {
    let dataset = Dataset::new(vec![
        Series::new([1.0, 2.0]),
        Series::new([1.0, 2.0]),
        Series::new(["3", "oops"]),
    ]);
    let err = render(dataset, &ChartOptions::new(ChartType::Xy)).expect_err("bad cell");
    match err {
        ChartError::DataFormat { series, value } => {
            assert_eq!(series, 2);
            assert_eq!(value, "oops");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn xy_length_mismatch_is_invalid_data() {
    let dataset = Dataset::new(vec![Series::new([1.0, 2.0, 3.0]), Series::new([1.0, 2.0])]);
    let err = render(dataset, &ChartOptions::new(ChartType::Xy)).expect_err("mismatch");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert!(err.is_data_error());
}

#[test]
fn empty_series_are_skipped_but_keep_their_color_slot() {
    let dataset = Dataset::new(vec![
        Series::new([1.0, 2.0]),
        Series::new(Vec::<f64>::new()),
        Series::new([3.0, 4.0]),
    ]);
    let mut colors = ColorAssigner::new();
    let result = ChartDispatcher::render(dataset, &ChartOptions::new(ChartType::Xy), &mut colors)
        .expect("render");
    let traces = result.scene().expect("scene").traces();
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].series_index, 2);
    assert_eq!(traces[0].color, palette_color(1));
}

#[test]
fn single_series_bar_uses_index_categories_and_default_color() {
    let dataset = Dataset::from_columns(vec![vec![1.0, 2.0, 3.0]]);
    let result = render(dataset, &ChartOptions::new(ChartType::Bar)).expect("bar render");
    let groups = result.scene().expect("scene").bar_groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].categories, vec![0.0, 1.0, 2.0]);
    assert_eq!(groups[0].values, vec![1.0, 2.0, 3.0]);
    assert_eq!(groups[0].color, DEFAULT_SERIES_COLOR);
    assert!((groups[0].fill_alpha - BAR_FILL_ALPHA).abs() <= 1e-12);
}

#[test]
fn grouped_bars_share_the_first_series_as_categories() {
    let dataset = Dataset::from_columns(vec![
        vec![10.0, 20.0],
        vec![1.0, 2.0],
        vec![3.0, 4.0],
    ]);
    let result = render(dataset, &ChartOptions::new(ChartType::Bar)).expect("bar render");
    let groups = result.scene().expect("scene").bar_groups();
    assert_eq!(groups.len(), 2);
    for (i, group) in groups.iter().enumerate() {
        assert_eq!(group.categories, vec![10.0, 20.0]);
        assert_eq!(group.color, palette_color(i));
    }
}

#[test]
fn histogram_rejects_text_naming_the_series() {
    let dataset = Dataset::new(vec![Series::new([1.0, 2.0]), Series::new(["x"])]);
    let err = render(dataset, &ChartOptions::new(ChartType::Histogram)).expect_err("bad");
    match err {
        ChartError::DataFormat { series, value } => {
            assert_eq!(series, 1);
            assert_eq!(value, "x");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn histogram_panels_fill_the_grid_row_major() {
    let dataset = Dataset::from_columns((0..5).map(|i| vec![f64::from(i), f64::from(i) + 1.0]));
    let options = ChartOptions::new(ChartType::Histogram).with_histogram_bins(4);
    let result = render(dataset, &options).expect("histogram render");

    let scene = result.scene().expect("scene");
    let ChartContent::Histogram { grid, panels } = &scene.content else {
        panic!("expected histogram content");
    };
    assert_eq!(*grid, SubplotGrid { rows: 2, columns: 3 });
    assert_eq!(panels.len(), 5);
    assert_eq!(panels[3].cell, GridCell { row: 1, column: 0 });
    for panel in panels {
        assert_eq!(panel.bins.counts.len(), 4);
        assert_eq!(panel.bins.total(), 2);
        assert_eq!(panel.color, DEFAULT_SERIES_COLOR);
    }
}

#[test]
fn pie_draws_one_panel_per_series_with_cycled_slice_colors() {
    let dataset = Dataset::from_columns(vec![vec![1.0, 1.0, 2.0], vec![5.0, 5.0, 0.0]]);
    let result = render(dataset, &ChartOptions::new(ChartType::Pie)).expect("pie render");
    let panels = result.scene().expect("scene").pie_panels();
    assert_eq!(panels.len(), 2);
    assert_eq!(panels[1].cell, GridCell { row: 1, column: 0 });

    let first = &panels[0];
    assert!((first.slices[2].fraction - 0.5).abs() <= 1e-12);
    for (j, slice) in first.slices.iter().enumerate() {
        assert_eq!(slice.color, palette_color(j));
    }
}

#[test]
fn pie_rejects_negative_values() {
    let dataset = Dataset::from_columns(vec![vec![1.0, -1.0]]);
    let err = render(dataset, &ChartOptions::new(ChartType::Pie)).expect_err("negative");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn empty_dataset_is_nothing_to_draw() {
    for chart_type in ChartType::ALL {
        let result = render(Dataset::default(), &ChartOptions::new(chart_type)).expect("render");
        assert_eq!(result, RenderResult::NothingToDraw(EmptyReason::EmptyDataset));
    }
}

#[test]
fn all_empty_series_is_nothing_to_draw() {
    let dataset = Dataset::new(vec![
        Series::new(Vec::<f64>::new()),
        Series::new(Vec::<f64>::new()),
    ]);
    let result = render(dataset, &ChartOptions::new(ChartType::Histogram)).expect("render");
    assert_eq!(result, RenderResult::NothingToDraw(EmptyReason::NoValues));
}

#[test]
fn legend_is_built_only_for_xy() {
    let options = ChartOptions::new(ChartType::Xy).with_legend(LegendPosition::LowerLeft);
    let dataset = Dataset::new(vec![
        Series::new([1.0, 2.0]),
        Series::new([3.0, 4.0]).with_name("temperature"),
        Series::new([5.0, 6.0]),
    ]);
    let result = render(dataset, &options).expect("render");
    let legend = result
        .scene()
        .expect("scene")
        .legend
        .clone()
        .expect("legend");
    assert_eq!(legend.position, LegendPosition::LowerLeft);
    let labels: Vec<_> = legend.entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["temperature", "2"]);

    let mut bar = options.clone();
    bar.chart_type = ChartType::Bar;
    let result = render(Dataset::from_columns(vec![vec![1.0, 2.0]]), &bar).expect("bar");
    assert!(result.scene().expect("scene").legend.is_none());
}

#[test]
fn rendering_twice_is_identical() {
    let options = ChartOptions::new(ChartType::Xy).with_grid(true);
    let mut colors = ColorAssigner::new();
    let first =
        ChartDispatcher::render(xy_dataset(), &options, &mut colors).expect("first render");
    let second =
        ChartDispatcher::render(xy_dataset(), &options, &mut colors).expect("second render");
    assert_eq!(first, second);
}

#[test]
fn invalid_bin_count_is_rejected_before_layout() {
    let mut options = ChartOptions::new(ChartType::Histogram);
    options.histogram_bins = 0;
    let err = render(xy_dataset(), &options).expect_err("zero bins");
    assert!(matches!(err, ChartError::Configuration(_)));
    assert!(!err.is_data_error());
}
