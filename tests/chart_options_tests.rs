use plot_rs::api::{ChartOptions, ChartType, FONTS, OptionField, OptionValue, OptionsEditor, SHAPES};
use plot_rs::core::{AxisScale, MAX_HISTOGRAM_BINS};
use plot_rs::render::LegendPosition;
use plot_rs::ChartError;

#[test]
fn defaults_match_documented_values() {
    let options = ChartOptions::default();
    assert_eq!(options.chart_type, ChartType::Xy);
    assert_eq!(options.shape, SHAPES[0]);
    assert_eq!(options.font, "sans-serif");
    assert!(FONTS.contains(&options.font.as_str()));
    assert_eq!(options.x_scale, AxisScale::Linear);
    assert_eq!(options.legend_position, LegendPosition::Best);
    assert_eq!(options.histogram_bins, 10);
    assert!((options.font_size - 12.0).abs() <= 1e-12);
    assert!((options.line_width - 1.5).abs() <= 1e-12);
    assert!((options.dpi - 300.0).abs() <= 1e-12);
    assert!(!options.show_grid && !options.show_legend);
}

#[test]
fn unknown_chart_type_fails_fast() {
    let err = "scatter3d".parse::<ChartType>().expect_err("unknown");
    assert!(matches!(err, ChartError::Configuration(_)));
    assert_eq!("HIST".parse::<ChartType>().expect("alias"), ChartType::Histogram);
}

#[test]
fn scale_names_accept_legacy_norm() {
    assert_eq!("norm".parse::<AxisScale>().expect("norm"), AxisScale::Linear);
    assert_eq!("log".parse::<AxisScale>().expect("log"), AxisScale::Log);
    assert!("symlog".parse::<AxisScale>().is_err());
}

#[test]
fn every_legend_position_parses_from_its_name() {
    for position in LegendPosition::ALL {
        assert_eq!(
            position.as_str().parse::<LegendPosition>().expect("position"),
            position
        );
    }
    assert_eq!(
        "lower_right".parse::<LegendPosition>().expect("underscored"),
        LegendPosition::LowerRight
    );
}

#[test]
fn legend_position_uses_one_token_in_json_and_option_bag() {
    let mut editor = OptionsEditor::default();
    editor.stage(OptionField::LegendPosition, "upper-left");
    editor.apply().expect("apply");

    let from_json = serde_json::to_value(editor.committed()).expect("serialize options");
    let from_bag = serde_json::to_value(editor.export_options()).expect("serialize bag");
    assert_eq!(from_json["legend_position"], serde_json::json!("upper left"));
    assert_eq!(from_json["legend_position"], from_bag["legend_position"]);

    let legacy = ChartOptions::from_json_str(r#"{ "legend_position": "lower-right" }"#)
        .expect("hyphenated token");
    assert_eq!(legacy.legend_position, LegendPosition::LowerRight);
    assert!(ChartOptions::from_json_str(r#"{ "legend_position": "nowhere" }"#).is_err());
}

#[test]
fn json_round_trip_keeps_every_field() {
    let options = ChartOptions::new(ChartType::Pie)
        .with_scales(AxisScale::Log, AxisScale::Linear)
        .with_legend(LegendPosition::CenterRight)
        .with_labels("Share", "", "")
        .with_histogram_bins(7);
    let json = options.to_json_pretty().expect("serialize");
    assert_eq!(ChartOptions::from_json_str(&json).expect("parse"), options);
}

#[test]
fn json_missing_fields_take_defaults() {
    let options =
        ChartOptions::from_json_str(r#"{ "chart_type": "bar", "show_grid": true }"#)
            .expect("parse");
    assert_eq!(options.chart_type, ChartType::Bar);
    assert!(options.show_grid);
    assert_eq!(options.histogram_bins, 10);
}

#[test]
fn json_rejects_zero_bins() {
    let err = ChartOptions::from_json_str(r#"{ "histogram_bins": 0 }"#).expect_err("zero");
    assert!(matches!(err, ChartError::Configuration(_)));
}

#[test]
fn editor_accepts_text_values_from_entry_widgets() {
    let mut editor = OptionsEditor::default();
    editor.set("linewidth", "2.5").expect("stage");
    editor.set("grid", "yes").expect("stage");
    editor.set("bins", "20").expect("stage");
    assert_eq!(editor.apply().expect("apply"), 3);

    let committed = editor.committed();
    assert!((committed.line_width - 2.5).abs() <= 1e-12);
    assert!(committed.show_grid);
    assert_eq!(committed.histogram_bins, 20);
    assert!(!editor.has_pending());
}

#[test]
fn editor_rejects_fractional_bin_counts() {
    let mut editor = OptionsEditor::default();
    editor.stage(OptionField::HistogramBins, 2.5);
    assert!(editor.apply().is_err());
    assert_eq!(editor.committed().histogram_bins, 10);
    editor.discard_pending();
    assert!(!editor.has_pending());
}

#[test]
fn editor_rejects_bin_counts_beyond_the_maximum() {
    let mut editor = OptionsEditor::default();
    editor.stage(OptionField::HistogramBins, 1.0e19);
    let err = editor.apply().expect_err("huge bin count");
    assert!(matches!(err, ChartError::Configuration(_)));
    assert_eq!(editor.committed().histogram_bins, 10);

    editor.discard_pending();
    editor.stage(OptionField::HistogramBins, MAX_HISTOGRAM_BINS);
    assert_eq!(editor.apply().expect("largest allowed"), 1);
    assert_eq!(editor.committed().histogram_bins, MAX_HISTOGRAM_BINS);
}

#[test]
fn json_rejects_bin_counts_beyond_the_maximum() {
    let json = format!(r#"{{ "histogram_bins": {} }}"#, MAX_HISTOGRAM_BINS + 1);
    let err = ChartOptions::from_json_str(&json).expect_err("too many bins");
    assert!(matches!(err, ChartError::Configuration(_)));
}

#[test]
fn unknown_option_name_is_rejected_when_staging() {
    let mut editor = OptionsEditor::default();
    let err = editor.set("colour", "red").expect_err("unknown");
    assert!(matches!(err, ChartError::Configuration(_)));
    assert!(!editor.has_pending());
}

#[test]
fn option_bag_serializes_untagged() {
    let mut editor = OptionsEditor::default();
    editor.stage(OptionField::ShowLegend, true);
    editor.apply().expect("apply");
    let bag = editor.export_options();
    let json = serde_json::to_value(&bag).expect("serialize bag");
    assert_eq!(json["show_legend"], serde_json::json!(true));
    assert_eq!(json["chart_type"], serde_json::json!("xy"));
    assert_eq!(bag.get("dpi"), Some(&OptionValue::from(300.0)));
}
