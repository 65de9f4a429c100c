use crate::data::columns::selectable_columns;
use crate::data::filter::ScaleBounds;
use crate::data::marker::{Marker, classify};
use crate::data::model::Table;
use crate::data::stats::ScaleStats;
use crate::render::{Chart, RenderConfig, render, render_marker};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until user loads a file).
    pub table: Option<Table>,

    /// File name of the loaded table, for the top bar.
    pub source: Option<String>,

    /// Columns offered in the marker selector.
    pub choices: Vec<String>,

    /// Every option of the current chart.
    pub config: RenderConfig,

    /// Classification of the selected marker.
    pub marker: Option<Marker>,

    /// Result of the last render; errors are kept as display text.
    pub chart: Option<Result<Chart, String>>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            source: None,
            choices: Vec::new(),
            config: RenderConfig::default(),
            marker: None,
            chart: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table, keeping the marker when it still exists.
    pub fn set_table(&mut self, table: Table, source: String) {
        self.choices = selectable_columns(&table.column_names());
        self.table = Some(table);
        self.source = Some(source);
        self.status_message = None;

        let marker = if self.choices.contains(&self.config.marker) {
            self.config.marker.clone()
        } else {
            self.choices.first().cloned().unwrap_or_default()
        };
        if self.choices.is_empty() {
            log::warn!("No selectable marker columns in the loaded table");
        }
        self.select_marker(marker);
    }

    /// Drop the current table after a failed upload so nothing stale is
    /// drawn.
    pub fn set_load_error(&mut self, message: String) {
        self.table = None;
        self.source = None;
        self.choices.clear();
        self.marker = None;
        self.chart = None;
        self.status_message = Some(message);
    }

    /// Switch the marker column; scale overrides fall back to the new
    /// column's defaults.
    pub fn select_marker(&mut self, marker: String) {
        self.config.marker = marker;
        self.config.scale = None;
        self.reclassify();
        self.rerender();
    }

    /// Apply an edited configuration, re-rendering when anything changed.
    pub fn update_config(&mut self, config: RenderConfig) {
        if config == self.config {
            return;
        }
        let marker_changed = config.marker != self.config.marker;
        self.config = config;
        if marker_changed {
            self.config.scale = None;
            self.reclassify();
        }
        self.rerender();
    }

    /// Statistics of the current marker, when numeric.
    pub fn stats(&self) -> Option<&ScaleStats> {
        match &self.marker {
            Some(Marker::Numeric(m)) => Some(&m.stats),
            _ => None,
        }
    }

    /// Scale range in effect: the user's override or the robust defaults.
    pub fn effective_bounds(&self) -> Option<ScaleBounds> {
        let stats = self.stats()?;
        Some(self.config.scale.unwrap_or_else(|| stats.default_bounds()))
    }

    fn reclassify(&mut self) {
        self.marker = None;
        let Some(table) = &self.table else { return };
        if self.config.marker.is_empty() {
            return;
        }
        match classify(table, &self.config.marker) {
            Ok(marker) => self.marker = Some(marker),
            Err(e) => log::error!("Failed to classify '{}': {e}", self.config.marker),
        }
    }

    /// Rebuild the chart from the cached classification.
    fn rerender(&mut self) {
        let Some(table) = &self.table else { return };
        if self.config.marker.is_empty() {
            self.chart = None;
            return;
        }
        let chart = match &self.marker {
            Some(marker) => self
                .config
                .validate()
                .map(|()| render_marker(table, marker, &self.config)),
            // Nothing cached: classification failed, so the full pipeline
            // reports why.
            None => render(table, &self.config),
        };
        self.chart = Some(chart.map_err(|e| {
            log::warn!("Render failed: {e}");
            e.to_string()
        }));
    }
}
