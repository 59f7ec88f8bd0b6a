/// UI layer: egui panels and the anomaly plot.  Presentation only; all
/// chart data comes precomputed from `pipeline::build_chart_data`.
pub mod panels;
pub mod plot;
