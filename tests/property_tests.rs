use plot_rs::api::{ChartDispatcher, ChartOptions, ChartType, ColorAssigner, palette_color};
use plot_rs::core::{Dataset, SubplotGrid, bin_values};
use proptest::prelude::*;

proptest! {
    #[test]
    fn color_for_is_independent_of_lookup_order(
        indices in prop::collection::vec(0usize..64, 1..32)
    ) {
        let mut forward = ColorAssigner::new();
        let mut reverse = ColorAssigner::new();
        let forward_colors: Vec<_> = indices.iter().map(|&i| forward.color_for(i)).collect();
        let reverse_colors: Vec<_> = indices
            .iter()
            .rev()
            .map(|&i| reverse.color_for(i))
            .collect();

        for (position, &index) in indices.iter().enumerate() {
            prop_assert_eq!(forward_colors[position], palette_color(index));
            prop_assert_eq!(reverse_colors[indices.len() - 1 - position], palette_color(index));
        }
    }

    #[test]
    fn xy_draws_one_trace_per_non_empty_y_series(
        series_count in 2usize..9,
        points in 1usize..20
    ) {
        let columns: Vec<Vec<f64>> = (0..series_count)
            .map(|s| (0..points).map(|p| (s * points + p) as f64).collect())
            .collect();
        let mut colors = ColorAssigner::new();
        let result = ChartDispatcher::render(
            Dataset::from_columns(columns),
            &ChartOptions::new(ChartType::Xy),
            &mut colors,
        )
        .expect("xy render");

        let traces = result.scene().expect("scene").traces();
        prop_assert_eq!(traces.len(), series_count - 1);
        for (i, trace) in traces.iter().enumerate() {
            prop_assert_eq!(trace.series_index, i + 1);
            prop_assert_eq!(trace.color, palette_color(i));
        }
    }

    #[test]
    fn subplot_grid_holds_every_panel(count in 1usize..200) {
        let grid = SubplotGrid::for_count(count).expect("grid");
        prop_assert_eq!(grid.columns, count.div_ceil(2));
        prop_assert_eq!(grid.rows, count.div_ceil(grid.columns));
        prop_assert!(grid.capacity() >= count);
        prop_assert!(grid.cell(count - 1).is_some());
    }

    #[test]
    fn histogram_bins_conserve_the_sample_count(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 1..500),
        bins in 1usize..64
    ) {
        let histogram = bin_values(&values, bins).expect("binning");
        prop_assert_eq!(histogram.counts.len(), bins);
        prop_assert_eq!(histogram.edges.len(), bins + 1);
        prop_assert_eq!(histogram.total(), values.len() as u64);
        prop_assert!(histogram.edges.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
