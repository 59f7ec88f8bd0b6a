use super::AggregatedPoint;

// ---------------------------------------------------------------------------
// Threshold Crossing Finder
// ---------------------------------------------------------------------------

/// First year at which the series crosses from strictly below to at-or-above
/// `threshold`, linearly interpolated between the bracketing points.
///
/// Returns `None` when the series never crosses or has fewer than two
/// points.  A series that starts at or above the threshold does not count as
/// crossing until it first dips below.  The interpolation denominator cannot
/// be zero under the bracketing condition, but floating-point inputs get a
/// guard anyway: a vanishing step snaps to the at-or-above year.
pub fn first_crossing(values: &[AggregatedPoint], threshold: f64) -> Option<f64> {
    for pair in values.windows(2) {
        let (y0, y1) = (pair[0].anom, pair[1].anom);
        if y0 < threshold && y1 >= threshold {
            let (x0, x1) = (pair[0].year as f64, pair[1].year as f64);
            if (y1 - y0).abs() < f64::EPSILON {
                return Some(x1);
            }
            let t = (threshold - y0) / (y1 - y0);
            return Some(x0 + t * (x1 - x0));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Scenario;

    fn series(points: &[(i32, f64)]) -> Vec<AggregatedPoint> {
        points
            .iter()
            .map(|&(year, anom)| AggregatedPoint {
                scenario: Scenario::Ssp370,
                year,
                anom,
            })
            .collect()
    }

    #[test]
    fn interpolates_between_bracketing_years() {
        let s = series(&[(2020, 1.0), (2021, 1.6)]);
        let year = first_crossing(&s, 1.5).unwrap();
        assert!((year - (2020.0 + 0.5 / 0.6)).abs() < 1e-9);
        assert!(year > 2020.0 && year < 2021.0);
    }

    #[test]
    fn only_first_crossing_is_reported() {
        // Crosses 1.5 twice; the earlier one wins.
        let s = series(&[(2020, 1.0), (2021, 2.0), (2022, 1.0), (2023, 2.0)]);
        let year = first_crossing(&s, 1.5).unwrap();
        assert!((year - 2020.5).abs() < 1e-9);
    }

    #[test]
    fn exact_hit_lands_on_the_grid_year() {
        let s = series(&[(2020, 1.0), (2021, 1.5)]);
        assert_eq!(first_crossing(&s, 1.5), Some(2021.0));
    }

    #[test]
    fn none_when_never_crossing() {
        assert_eq!(first_crossing(&series(&[(2020, 0.5), (2021, 0.9)]), 1.5), None);
    }

    #[test]
    fn none_for_short_series() {
        assert_eq!(first_crossing(&series(&[(2020, 2.0)]), 1.5), None);
        assert_eq!(first_crossing(&series(&[]), 1.5), None);
    }

    #[test]
    fn starting_above_is_not_a_crossing() {
        let s = series(&[(2020, 1.8), (2021, 2.2)]);
        assert_eq!(first_crossing(&s, 1.5), None);
    }
}
