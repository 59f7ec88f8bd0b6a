use eframe::egui::{self, Color32, Stroke, Ui};
use egui_plot::{
    HLine, Line, LineStyle, MarkerShape, Plot, PlotBounds, PlotPoints, Points, Polygon,
};

use crate::color::scenario_color;
use crate::pipeline::PARIS_THRESHOLDS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Anomaly plot (central panel)
// ---------------------------------------------------------------------------

/// Rectangle from the axis baseline up to `threshold`, spanning the visible
/// year window.  Corners in draw order.
fn threshold_band(year_range: (i32, i32), threshold: f64) -> Vec<[f64; 2]> {
    let (lo, hi) = (year_range.0 as f64, year_range.1 as f64);
    vec![[lo, 0.0], [hi, 0.0], [hi, threshold], [lo, threshold]]
}

/// Render the per-scenario anomaly chart in the central panel.
pub fn anomaly_plot(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a projection table to begin  (File → Open…)");
        });
        return;
    };

    if state.selection.countries.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Select at least one country");
        });
        return;
    }

    let chart = &state.chart;
    let (year_lo, year_hi) = state.selection.year_range;

    // Auto y-domain: max smoothed anomaly padded and rounded up to 0.1,
    // never below 2.0 so the Paris lines stay visible.
    let y_top = if state.y_auto {
        let y_max = chart.y_max().unwrap_or(2.5);
        (((y_max + 0.2) * 10.0).ceil() / 10.0).max(2.0)
    } else {
        3.5
    };

    let apply_bounds = std::mem::take(&mut state.bounds_dirty);

    let response = Plot::new("anomaly_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Anomaly (°C vs. 1850–1900)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{:.0}: {:.2} °C", value.x, value.y)
            } else {
                format!("{name}\n{:.0}: {:.2} °C", value.x, value.y)
            }
        })
        .show(ui, |plot_ui| {
            if apply_bounds {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [year_lo as f64, 0.0],
                    [year_hi as f64, y_top],
                ));
            }

            // Faint all-data median backdrop (the old context strip).
            if state.show_median && !state.median_overview.is_empty() {
                let points: PlotPoints = state.median_overview.iter().copied().collect();
                plot_ui.line(
                    Line::new(points)
                        .color(Color32::from_gray(110))
                        .width(1.0)
                        .name("median (all data)"),
                );
            }

            // Paris thresholds: translucent band from the baseline up to
            // each threshold, plus a dashed guide line on top.
            for threshold in PARIS_THRESHOLDS {
                let band: PlotPoints = threshold_band((year_lo, year_hi), threshold)
                    .into_iter()
                    .collect();
                plot_ui.polygon(
                    Polygon::new(band)
                        .fill_color(Color32::from_rgba_unmultiplied(170, 170, 170, 30))
                        .stroke(Stroke::new(0.0, Color32::TRANSPARENT)),
                );
                plot_ui.hline(
                    HLine::new(threshold)
                        .color(Color32::from_gray(130))
                        .style(LineStyle::dashed_loose())
                        .width(1.0),
                );
            }

            // One smoothed line per scenario.
            for series in &chart.series {
                let points: PlotPoints = series
                    .values
                    .iter()
                    .map(|p| [p.year as f64, p.anom])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(series.scenario.label())
                        .color(scenario_color(series.scenario))
                        .width(2.2),
                );
            }

            // First-crossing markers.
            for marker in &chart.markers {
                plot_ui.points(
                    Points::new(vec![[marker.year, marker.threshold]])
                        .shape(MarkerShape::Circle)
                        .radius(4.0)
                        .filled(true)
                        .color(scenario_color(marker.scenario)),
                );
            }

            // Snap the pointer to the nearest year for the tooltip.
            plot_ui
                .pointer_coordinate()
                .map(|p| p.x.round() as i32)
        });

    // Hover tooltip: raw per-country values at the pointer year.
    if let (Some(year), true) = (response.inner, response.response.hovered()) {
        let lines: Vec<(String, Color32)> = dataset
            .records
            .iter()
            .filter(|r| {
                r.year == year
                    && state.selection.countries.contains(&r.country)
                    && state.selection.scenarios.contains(&r.scenario)
            })
            .take(12)
            .map(|r| {
                let color = state
                    .country_palette
                    .as_ref()
                    .map(|p| p.color_for(&r.country))
                    .unwrap_or(Color32::GRAY);
                (
                    format!("{} — {}: {:.2} °C", r.country, r.scenario.label(), r.anom),
                    color,
                )
            })
            .collect();

        if !lines.is_empty() {
            egui::show_tooltip_at_pointer(
                ui.ctx(),
                response.response.layer_id,
                egui::Id::new("anomaly_hover"),
                |ui: &mut Ui| {
                    ui.strong(year.to_string());
                    for (text, color) in &lines {
                        ui.colored_label(*color, text);
                    }
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_spans_window_from_baseline_to_threshold() {
        let band = threshold_band((2015, 2100), 1.5);
        assert_eq!(
            band,
            vec![
                [2015.0, 0.0],
                [2100.0, 0.0],
                [2100.0, 1.5],
                [2015.0, 1.5],
            ]
        );
    }

    #[test]
    fn one_band_per_paris_threshold() {
        for threshold in PARIS_THRESHOLDS {
            let band = threshold_band((2030, 2050), threshold);
            assert_eq!(band.len(), 4);
            assert!(band.iter().all(|p| p[1] == 0.0 || p[1] == threshold));
        }
    }
}
