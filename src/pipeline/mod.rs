/// Chart-data pipeline: the pure computation behind every render.
///
/// ```text
///   Vec<Record> ──filter/group──▶ Vec<ScenarioSeries> ──smooth──▶ smoothed series
///        (aggregate)                                     │
///                                                        ▼
///                                              first_crossing per threshold
///                                                        │
///                                                        ▼
///                                                  Vec<CrossingMarker>
/// ```
///
/// Everything here is a pure function of its inputs: no caching, no global
/// state, recomputed from scratch on every selection change.
pub mod aggregate;
pub mod crossing;
pub mod smooth;

use std::collections::BTreeSet;

use crate::data::model::{Record, Scenario};

/// Warming thresholds from the Paris Agreement, in °C above the baseline.
pub const PARIS_THRESHOLDS: [f64; 2] = [1.5, 2.0];

// ---------------------------------------------------------------------------
// Selection – read-only input to each pipeline call
// ---------------------------------------------------------------------------

/// What the user currently wants to see.  Owned by the application state,
/// mutated only by the UI widgets, passed immutably into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub countries: BTreeSet<String>,
    pub scenarios: BTreeSet<Scenario>,
    /// Moving-average span; 1 (or 0) means no smoothing.
    pub smooth_window: usize,
    /// Visible year window; drives plot bounds only, never filters data.
    pub year_range: (i32, i32),
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            countries: BTreeSet::new(),
            scenarios: Scenario::ALL.into_iter().collect(),
            smooth_window: 5,
            year_range: (2015, 2100),
        }
    }
}

// ---------------------------------------------------------------------------
// Derived chart entities
// ---------------------------------------------------------------------------

/// Mean anomaly across the selected countries for one scenario/year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedPoint {
    pub scenario: Scenario,
    pub year: i32,
    pub anom: f64,
}

/// One plottable line: aggregated points for a scenario, years strictly
/// increasing, no duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSeries {
    pub scenario: Scenario,
    pub values: Vec<AggregatedPoint>,
}

/// First year (fractional, linearly interpolated) a smoothed series reaches
/// a threshold.  At most one per (scenario, threshold).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingMarker {
    pub year: f64,
    pub threshold: f64,
    pub scenario: Scenario,
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub series: Vec<ScenarioSeries>,
    pub markers: Vec<CrossingMarker>,
}

impl ChartData {
    /// Largest smoothed anomaly, for auto y-scaling.  `None` when empty.
    pub fn y_max(&self) -> Option<f64> {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().map(|p| p.anom))
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Run the full pipeline: filter + aggregate, smooth, find threshold
/// crossings.  An empty country selection short-circuits to an empty
/// [`ChartData`]; the UI turns that into an empty-state message.
pub fn build_chart_data(records: &[Record], selection: &Selection) -> ChartData {
    if selection.countries.is_empty() {
        return ChartData::default();
    }

    let series: Vec<ScenarioSeries> =
        aggregate::aggregate(records, &selection.countries, &selection.scenarios)
            .into_iter()
            .map(|s| ScenarioSeries {
                scenario: s.scenario,
                values: smooth::smooth(&s.values, selection.smooth_window),
            })
            .collect();

    let mut markers = Vec::new();
    for s in &series {
        for threshold in PARIS_THRESHOLDS {
            if let Some(year) = crossing::first_crossing(&s.values, threshold) {
                markers.push(CrossingMarker {
                    year,
                    threshold,
                    scenario: s.scenario,
                });
            }
        }
    }

    ChartData { series, markers }
}

/// Per-year median anomaly across the whole dataset, used as the faint
/// overview backdrop behind the chart.
pub fn median_by_year(records: &[Record]) -> Vec<[f64; 2]> {
    use std::collections::BTreeMap;

    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for r in records {
        if r.anom.is_finite() {
            by_year.entry(r.year).or_default().push(r.anom);
        }
    }

    by_year
        .into_iter()
        .map(|(year, mut vals)| {
            vals.sort_by(f64::total_cmp);
            let n = vals.len();
            let med = if n % 2 == 1 {
                vals[n / 2]
            } else {
                (vals[n / 2 - 1] + vals[n / 2]) / 2.0
            };
            [year as f64, med]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(country: &str, scenario: Scenario, year: i32, anom: f64) -> Record {
        Record {
            country: country.to_string(),
            scenario,
            year,
            anom,
        }
    }

    fn selection(countries: &[&str], window: usize) -> Selection {
        Selection {
            countries: countries.iter().map(|c| c.to_string()).collect(),
            smooth_window: window,
            ..Selection::default()
        }
    }

    #[test]
    fn empty_country_selection_short_circuits() {
        let records = vec![rec("A", Scenario::Ssp245, 2020, 1.0)];
        let chart = build_chart_data(&records, &selection(&[], 1));
        assert!(chart.series.is_empty());
        assert!(chart.markers.is_empty());
    }

    #[test]
    fn interpolated_paris_crossing() {
        // 1.0 → 1.6 across 2020→2021 crosses 1.5 at 2020 + 0.5/0.6.
        let records = vec![
            rec("A", Scenario::Ssp245, 2020, 1.0),
            rec("A", Scenario::Ssp245, 2021, 1.6),
        ];
        let chart = build_chart_data(&records, &selection(&["A"], 1));
        assert_eq!(chart.series.len(), 1);

        let markers_15: Vec<_> = chart
            .markers
            .iter()
            .filter(|m| m.threshold == 1.5)
            .collect();
        assert_eq!(markers_15.len(), 1);
        let expected = 2020.0 + (1.5 - 1.0) / (1.6 - 1.0);
        assert!((markers_15[0].year - expected).abs() < 1e-9);
        assert_eq!(markers_15[0].scenario, Scenario::Ssp245);

        // Never reaches 2.0 °C.
        assert!(chart.markers.iter().all(|m| m.threshold != 2.0));
    }

    #[test]
    fn marker_year_lies_between_bracketing_years() {
        let records: Vec<Record> = (2015..2060)
            .map(|y| rec("A", Scenario::Ssp585, y, 0.8 + 0.05 * (y - 2015) as f64))
            .collect();
        let chart = build_chart_data(&records, &selection(&["A"], 1));
        for m in &chart.markers {
            assert!(m.year >= 2015.0 && m.year <= 2059.0);
        }
        // 0.8 + 0.05k reaches 1.5 exactly at k=14, so the interpolated
        // crossing lands on 2029.
        let m15 = chart.markers.iter().find(|m| m.threshold == 1.5).unwrap();
        assert!((m15.year - 2029.0).abs() < 1e-9);
    }

    #[test]
    fn pipeline_is_deterministic() {
        let records = vec![
            rec("A", Scenario::Ssp126, 2020, 1.2),
            rec("B", Scenario::Ssp126, 2020, 1.4),
            rec("A", Scenario::Ssp126, 2021, 1.3),
            rec("B", Scenario::Ssp126, 2021, 1.7),
            rec("A", Scenario::Ssp585, 2020, 1.5),
        ];
        let sel = selection(&["A", "B"], 3);
        let first = build_chart_data(&records, &sel);
        let second = build_chart_data(&records, &sel);
        assert_eq!(first, second);
    }

    #[test]
    fn year_range_does_not_filter_series() {
        let records = vec![
            rec("A", Scenario::Ssp245, 2020, 1.0),
            rec("A", Scenario::Ssp245, 2080, 2.5),
        ];
        let mut sel = selection(&["A"], 1);
        sel.year_range = (2030, 2050);
        let chart = build_chart_data(&records, &sel);
        assert_eq!(chart.series[0].values.len(), 2);
    }

    #[test]
    fn y_max_over_all_series() {
        let records = vec![
            rec("A", Scenario::Ssp126, 2020, 1.2),
            rec("A", Scenario::Ssp585, 2020, 3.1),
        ];
        let chart = build_chart_data(&records, &selection(&["A"], 1));
        assert_eq!(chart.y_max(), Some(3.1));
        assert_eq!(ChartData::default().y_max(), None);
    }

    #[test]
    fn median_by_year_is_sorted_and_correct() {
        let records = vec![
            rec("A", Scenario::Ssp126, 2021, 2.0),
            rec("B", Scenario::Ssp126, 2020, 1.0),
            rec("A", Scenario::Ssp585, 2020, 3.0),
            rec("B", Scenario::Ssp585, 2020, 2.0),
        ];
        let med = median_by_year(&records);
        assert_eq!(med, vec![[2020.0, 2.0], [2021.0, 2.0]]);
    }
}
