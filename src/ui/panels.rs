use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::scenario_color;
use crate::data::model::Scenario;
use crate::state::{AppState, MAX_SELECTED_COUNTRIES};

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel: countries, scenarios, smoothing, years.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selection");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let countries = dataset.countries.clone();
    let data_year_range = dataset.year_range;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Scenario checkboxes ----
            ui.strong("Scenarios");
            for scenario in Scenario::ALL {
                let mut checked = state.selection.scenarios.contains(&scenario);
                let text = RichText::new(scenario.label()).color(scenario_color(scenario));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_scenario(scenario);
                }
            }
            ui.separator();

            // ---- Smoothing window ----
            ui.strong("Smoothing");
            let mut window = state.selection.smooth_window;
            // Odd spans keep the average centered; even ones truncate down.
            let slider = egui::Slider::new(&mut window, 1..=15).text("years");
            if ui.add(slider).changed() {
                state.selection.smooth_window = window.max(1);
                state.recompute();
            }
            ui.separator();

            // ---- Year window ----
            ui.strong("Year window");
            let (data_min, data_max) = data_year_range;
            let (mut lo, mut hi) = state.selection.year_range;
            ui.horizontal(|ui: &mut Ui| {
                let lo_resp = ui.add(egui::DragValue::new(&mut lo).range(data_min..=hi));
                ui.label("–");
                let hi_resp = ui.add(egui::DragValue::new(&mut hi).range(lo..=data_max));
                if lo_resp.changed() || hi_resp.changed() {
                    state.selection.year_range = (lo, hi);
                    state.bounds_dirty = true;
                }
            });
            if ui.small_button("Full range").clicked() {
                state.reset_year_range();
            }
            ui.separator();

            // ---- Display toggles ----
            if ui.checkbox(&mut state.y_auto, "Auto y-scale").changed() {
                state.bounds_dirty = true;
            }
            ui.checkbox(&mut state.show_median, "All-data median");
            ui.separator();

            // ---- Country multi-select ----
            let n_selected = state.selection.countries.len();
            ui.strong(format!(
                "Countries  ({n_selected}/{MAX_SELECTED_COUNTRIES} max)"
            ));
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("Default").clicked() {
                    state.select_default_countries();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_countries();
                }
            });

            for country in &countries {
                let is_selected = state.selection.countries.contains(country);
                let at_cap = !is_selected
                    && state.selection.countries.len() >= MAX_SELECTED_COUNTRIES;

                let mut text = RichText::new(country);
                if let Some(palette) = &state.country_palette {
                    text = text.color(palette.color_for(country));
                }

                let mut checked = is_selected;
                let resp = ui.add_enabled(!at_cap, egui::Checkbox::new(&mut checked, text));
                if resp.changed() {
                    state.toggle_country(country);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records, {} countries, {} selected",
                ds.len(),
                ds.countries.len(),
                state.selection.countries.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open projection table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
