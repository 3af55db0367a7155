use tracing::debug;

use crate::core::Dataset;

/// Owner of the dataset currently bound to a chart session.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    data: Option<Dataset>,
    /// Caller-assigned names by series position; kept across `set_data`.
    names: Vec<Option<String>>,
    generation: u64,
}

impl SeriesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the dataset wholesale.
    ///
    /// Bumps the generation counter so callers holding cached render output
    /// can tell it was produced from older data.
    pub fn set_data(&mut self, dataset: Dataset) {
        debug!(series_count = dataset.len(), "set data series");
        self.data = Some(dataset);
        self.generation += 1;
    }

    pub fn clear(&mut self) {
        self.data = None;
        self.generation += 1;
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.data.as_ref().is_some_and(|data| !data.is_empty())
    }

    /// Independent deep copy of the stored dataset (empty when unset), with
    /// assigned series names applied over the names the data carried.
    #[must_use]
    pub fn snapshot(&self) -> Dataset {
        let mut dataset = self.data.clone().unwrap_or_default();
        for (series, name) in dataset.series_mut().iter_mut().zip(&self.names) {
            if let Some(name) = name {
                series.name = Some(name.clone());
            }
        }
        dataset
    }

    #[must_use]
    pub fn data(&self) -> Option<&Dataset> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Assigns `names[start..]` to the series at the same positions.
    ///
    /// Names are held apart from the data, so they also apply to datasets
    /// stored later. Positions without a matching name keep their current one.
    pub fn set_series_names<S: AsRef<str>>(&mut self, names: &[S], start: usize) {
        if names.len() > self.names.len() {
            self.names.resize(names.len(), None);
        }
        for (slot, name) in self.names.iter_mut().zip(names).skip(start) {
            *slot = Some(name.as_ref().to_owned());
        }
        debug!(
            assigned = names.len().saturating_sub(start),
            start, "set series names"
        );
    }

    pub fn clear_series_names(&mut self) {
        self.names.clear();
    }

    /// Display names for every stored series.
    #[must_use]
    pub fn series_names(&self) -> Vec<String> {
        if self.data.is_none() {
            return Vec::new();
        }
        self.snapshot()
            .series()
            .iter()
            .enumerate()
            .map(|(index, series)| series.display_name(index))
            .collect()
    }
}
