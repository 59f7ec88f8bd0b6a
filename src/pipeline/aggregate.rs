use std::collections::{BTreeMap, BTreeSet};

use crate::data::model::{Record, Scenario};

use super::{AggregatedPoint, ScenarioSeries};

// ---------------------------------------------------------------------------
// Aggregator: raw records → per-scenario yearly means
// ---------------------------------------------------------------------------

/// Filter records to the selected countries/scenarios and compute the mean
/// anomaly per (scenario, year) across the matching country records.
///
/// Returns one series per scenario present in the filtered set, ordered by
/// scenario, with values sorted by ascending year (the `BTreeMap` grouping
/// guarantees both orderings and rules out duplicate years).  Records with a
/// non-finite anomaly are skipped.  Pure function of its inputs.
pub fn aggregate(
    records: &[Record],
    countries: &BTreeSet<String>,
    scenarios: &BTreeSet<Scenario>,
) -> Vec<ScenarioSeries> {
    // (scenario, year) → (sum, count)
    let mut groups: BTreeMap<Scenario, BTreeMap<i32, (f64, u32)>> = BTreeMap::new();

    for r in records {
        if !r.anom.is_finite() {
            continue;
        }
        if !countries.contains(&r.country) || !scenarios.contains(&r.scenario) {
            continue;
        }
        let (sum, count) = groups
            .entry(r.scenario)
            .or_default()
            .entry(r.year)
            .or_insert((0.0, 0));
        *sum += r.anom;
        *count += 1;
    }

    groups
        .into_iter()
        .map(|(scenario, by_year)| ScenarioSeries {
            scenario,
            values: by_year
                .into_iter()
                .map(|(year, (sum, count))| AggregatedPoint {
                    scenario,
                    year,
                    anom: sum / count as f64,
                })
                .collect(),
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

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn all_scenarios() -> BTreeSet<Scenario> {
        Scenario::ALL.into_iter().collect()
    }

    #[test]
    fn empty_country_set_yields_no_series() {
        let records = vec![rec("A", Scenario::Ssp126, 2020, 1.0)];
        assert!(aggregate(&records, &set(&[]), &all_scenarios()).is_empty());
    }

    #[test]
    fn means_across_selected_countries() {
        let records = vec![
            rec("A", Scenario::Ssp245, 2020, 1.0),
            rec("B", Scenario::Ssp245, 2020, 2.0),
            rec("C", Scenario::Ssp245, 2020, 9.0), // not selected
        ];
        let series = aggregate(&records, &set(&["A", "B"]), &all_scenarios());
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].values.len(), 1);
        assert_eq!(series[0].values[0].anom, 1.5);
        assert_eq!(series[0].values[0].year, 2020);
    }

    #[test]
    fn scenario_filter_applies() {
        let records = vec![
            rec("A", Scenario::Ssp126, 2020, 1.0),
            rec("A", Scenario::Ssp585, 2020, 2.0),
        ];
        let only_126: BTreeSet<Scenario> = [Scenario::Ssp126].into_iter().collect();
        let series = aggregate(&records, &set(&["A"]), &only_126);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].scenario, Scenario::Ssp126);
    }

    #[test]
    fn years_sorted_ascending_without_duplicates() {
        let records = vec![
            rec("A", Scenario::Ssp370, 2050, 2.0),
            rec("A", Scenario::Ssp370, 2020, 1.0),
            rec("B", Scenario::Ssp370, 2050, 3.0),
            rec("A", Scenario::Ssp370, 2035, 1.5),
        ];
        let series = aggregate(&records, &set(&["A", "B"]), &all_scenarios());
        let years: Vec<i32> = series[0].values.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2020, 2035, 2050]);
        assert_eq!(series[0].values[2].anom, 2.5);
    }

    #[test]
    fn non_finite_anomalies_are_skipped() {
        let records = vec![
            rec("A", Scenario::Ssp126, 2020, f64::NAN),
            rec("B", Scenario::Ssp126, 2020, 1.0),
        ];
        let series = aggregate(&records, &set(&["A", "B"]), &all_scenarios());
        assert_eq!(series[0].values[0].anom, 1.0);
    }
}
