use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ClimaScopeApp {
    pub state: AppState,
}

impl ClimaScopeApp {
    /// Start with a dataset already loaded (e.g. from a CLI argument).
    pub fn with_file(path: &std::path::Path) -> Self {
        let mut app = Self::default();
        app.state.load_path(path);
        app
    }
}

impl eframe::App for ClimaScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selection ----
        egui::SidePanel::left("selection_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: anomaly chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::anomaly_plot(ui, &mut self.state);
        });
    }
}
