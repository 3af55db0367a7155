use std::path::Path;

use tracing::{debug, warn};

use crate::core::Dataset;
use crate::error::ChartResult;
use crate::render::{RenderSurface, draw_scene};

use super::{
    ChartDispatcher, ChartOptions, ColorAssigner, OptionBag, OptionsEditor, RenderResult,
    SeriesStore,
};

/// Chart session facade consumed by host applications.
///
/// `Plotter` owns the current dataset, the color table, the two-phase option
/// editor, and the drawing surface, and replays the current chart on demand.
pub struct Plotter<S: RenderSurface> {
    surface: S,
    store: SeriesStore,
    colors: ColorAssigner,
    editor: OptionsEditor,
    last_render: Option<RenderResult>,
}

impl<S: RenderSurface> Plotter<S> {
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            store: SeriesStore::new(),
            colors: ColorAssigner::new(),
            editor: OptionsEditor::default(),
            last_render: None,
        }
    }

    pub fn with_options(surface: S, options: ChartOptions) -> ChartResult<Self> {
        let mut plotter = Self::new(surface);
        plotter.editor.replace(options)?;
        Ok(plotter)
    }

    /// Replaces the dataset and drops the cached render.
    pub fn set_data(&mut self, dataset: Dataset) {
        self.store.set_data(dataset);
        self.last_render = None;
    }

    /// Names series `start..` for legends; `start = 1` skips the X column.
    ///
    /// The names stick to series positions and carry over to data passed in
    /// later through [`Plotter::set_data`] or [`Plotter::plot`].
    pub fn set_data_series<N: AsRef<str>>(&mut self, names: &[N], start: usize) {
        self.store.set_series_names(names, start);
        self.last_render = None;
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.store.has_data()
    }

    #[must_use]
    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    #[must_use]
    pub fn colors(&self) -> &ColorAssigner {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut ColorAssigner {
        &mut self.colors
    }

    /// Committed options used by the next render.
    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        self.editor.committed()
    }

    #[must_use]
    pub fn editor(&self) -> &OptionsEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut OptionsEditor {
        &mut self.editor
    }

    pub fn apply_options(&mut self) -> ChartResult<usize> {
        self.editor.apply()
    }

    #[must_use]
    pub fn export_options(&self) -> OptionBag {
        self.editor.export_options()
    }

    pub fn import_options(&mut self, bag: &OptionBag) -> ChartResult<()> {
        self.editor.import_options(bag)
    }

    /// Result of the latest successful render, if still valid for the data.
    #[must_use]
    pub fn last_render(&self) -> Option<&RenderResult> {
        self.last_render.as_ref()
    }

    /// Replaces the data, then renders it with the committed options.
    pub fn plot(&mut self, dataset: Dataset) -> ChartResult<RenderResult> {
        self.set_data(dataset);
        self.plot_current(false)
    }

    /// Re-renders the stored data.
    ///
    /// With `apply_staged` the staged option batch is committed first; if that
    /// fails nothing is drawn. Otherwise staged edits are ignored.
    pub fn plot_current(&mut self, apply_staged: bool) -> ChartResult<RenderResult> {
        if apply_staged {
            self.editor.apply()?;
        }

        let result = ChartDispatcher::render(
            self.store.snapshot(),
            self.editor.committed(),
            &mut self.colors,
        )
        .inspect_err(|err| {
            if err.is_data_error() {
                warn!(error = %err, "dataset rejected by chart layout");
            }
        })?;
        match &result {
            RenderResult::Drawn(scene) => draw_scene(&mut self.surface, scene)?,
            RenderResult::NothingToDraw(reason) => {
                debug!(?reason, "clearing surface, nothing to draw");
                self.surface.clear()?;
            }
        }
        self.last_render = Some(result.clone());
        Ok(result)
    }

    /// Re-runs the current render and writes it to `path`.
    ///
    /// `dpi` defaults to the committed option. Nothing is written when there
    /// is nothing to draw. An export failure keeps the fresh render cached.
    pub fn render_to_file(
        &mut self,
        path: impl AsRef<Path>,
        dpi: Option<f64>,
    ) -> ChartResult<RenderResult> {
        let result = self.plot_current(false)?;
        if !result.is_drawn() {
            warn!(path = %path.as_ref().display(), "skipping export, nothing to draw");
            return Ok(result);
        }
        let dpi = dpi.unwrap_or(self.editor.committed().dpi);
        self.surface.export_image(path.as_ref(), dpi)?;
        debug!(path = %path.as_ref().display(), dpi, "exported chart image");
        Ok(result)
    }

    /// Clears the surface and forgets the cached render.
    pub fn clear(&mut self) -> ChartResult<()> {
        self.last_render = None;
        self.surface.clear()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }
}
