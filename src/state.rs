use std::path::Path;

use crate::color::CountryPalette;
use crate::data::loader;
use crate::data::model::{ClimateDataset, Scenario};
use crate::pipeline::{self, ChartData, Selection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Keep the chart readable: the UI caps the country multi-select here.
pub const MAX_SELECTED_COUNTRIES: usize = 8;

/// How many countries are pre-selected right after a load.
const DEFAULT_SELECTED_COUNTRIES: usize = 5;

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the user opens a file).
    pub dataset: Option<ClimateDataset>,

    /// Current country/scenario/smoothing/year-window selection.
    pub selection: Selection,

    /// Pipeline output for the current selection (recomputed, never stale).
    pub chart: ChartData,

    /// Per-year median across the whole dataset, the overview backdrop.
    pub median_overview: Vec<[f64; 2]>,

    /// Country → swatch colour for the side panel and tooltip.
    pub country_palette: Option<CountryPalette>,

    /// Derive the y-axis upper bound from the smoothed series.
    pub y_auto: bool,

    /// Draw the all-data median backdrop line.
    pub show_median: bool,

    /// The plot should re-apply bounds from `selection.year_range`.
    pub bounds_dirty: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: Selection::default(),
            chart: ChartData::default(),
            median_overview: Vec::new(),
            country_palette: None,
            y_auto: true,
            show_median: true,
            bounds_dirty: false,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: default selection (first few countries,
    /// all scenarios, full year extent), palette, overview, chart.
    pub fn set_dataset(&mut self, dataset: ClimateDataset) {
        self.selection = Selection {
            countries: dataset
                .countries
                .iter()
                .take(DEFAULT_SELECTED_COUNTRIES)
                .cloned()
                .collect(),
            scenarios: Scenario::ALL.into_iter().collect(),
            smooth_window: 5,
            year_range: dataset.year_range,
        };
        self.country_palette = Some(CountryPalette::new(&dataset.countries));
        self.median_overview = pipeline::median_by_year(&dataset.records);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.bounds_dirty = true;
        self.recompute();
    }

    /// Load a file and ingest it, surfacing failures as a status message.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records, {} countries, years {}–{}",
                    dataset.len(),
                    dataset.countries.len(),
                    dataset.year_range.0,
                    dataset.year_range.1
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-run the pipeline after any selection change.
    pub fn recompute(&mut self) {
        if let Some(ds) = &self.dataset {
            self.chart = pipeline::build_chart_data(&ds.records, &self.selection);
        } else {
            self.chart = ChartData::default();
        }
    }

    /// Toggle one country, enforcing the selection cap.
    pub fn toggle_country(&mut self, country: &str) {
        if self.selection.countries.contains(country) {
            self.selection.countries.remove(country);
        } else if self.selection.countries.len() < MAX_SELECTED_COUNTRIES {
            self.selection.countries.insert(country.to_string());
        }
        self.recompute();
    }

    /// Toggle one scenario on or off.
    pub fn toggle_scenario(&mut self, scenario: Scenario) {
        if !self.selection.scenarios.remove(&scenario) {
            self.selection.scenarios.insert(scenario);
        }
        self.recompute();
    }

    /// Deselect every country (the empty-state path).
    pub fn select_no_countries(&mut self) {
        self.selection.countries.clear();
        self.recompute();
    }

    /// Restore the post-load default: the first few countries.
    pub fn select_default_countries(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.countries = ds
                .countries
                .iter()
                .take(DEFAULT_SELECTED_COUNTRIES)
                .cloned()
                .collect();
        }
        self.recompute();
    }

    /// Reset the visible year window to the dataset extent.
    pub fn reset_year_range(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.year_range = ds.year_range;
            self.bounds_dirty = true;
        }
    }
}
