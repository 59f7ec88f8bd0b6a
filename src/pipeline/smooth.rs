use super::AggregatedPoint;

// ---------------------------------------------------------------------------
// Smoother: centered moving average
// ---------------------------------------------------------------------------

/// Apply a centered moving average of span `window` to a chronologically
/// ordered series.  Output has the same length and the same `year`/`scenario`
/// fields; only `anom` is replaced.
///
/// * `window <= 1` returns the input unchanged.
/// * The one-sided radius is `(window - 1) / 2`, integer division: an even
///   window truncates down to the next smaller symmetric span (e.g. 4 and 3
///   both give radius 1).  Callers should pass odd windows.
/// * Boundary windows shrink to the available range rather than wrap or pad.
pub fn smooth(values: &[AggregatedPoint], window: usize) -> Vec<AggregatedPoint> {
    if window <= 1 {
        return values.to_vec();
    }
    let radius = (window - 1) / 2;

    values
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius).min(values.len() - 1);
            let span = &values[lo..=hi];
            let mean = span.iter().map(|q| q.anom).sum::<f64>() / span.len() as f64;
            AggregatedPoint { anom: mean, ..*p }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Scenario;

    fn series(anoms: &[f64]) -> Vec<AggregatedPoint> {
        anoms
            .iter()
            .enumerate()
            .map(|(i, &anom)| AggregatedPoint {
                scenario: Scenario::Ssp245,
                year: 2020 + i as i32,
                anom,
            })
            .collect()
    }

    #[test]
    fn window_one_is_identity() {
        let s = series(&[1.0, 2.0, 3.0]);
        assert_eq!(smooth(&s, 1), s);
        assert_eq!(smooth(&s, 0), s);
    }

    #[test]
    fn window_three_averages_with_shrinking_boundaries() {
        let out = smooth(&series(&[1.0, 2.0, 3.0]), 3);
        // index 0: mean of [1, 2]; index 1: mean of all three; index 2: [2, 3]
        assert_eq!(out[0].anom, 1.5);
        assert_eq!(out[1].anom, 2.0);
        assert_eq!(out[2].anom, 2.5);
    }

    #[test]
    fn even_window_truncates_radius() {
        let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(smooth(&s, 4), smooth(&s, 3));
    }

    #[test]
    fn preserves_length_years_and_scenario() {
        let s = series(&[0.5, 1.5, 0.5, 2.5, 1.0, 3.0]);
        let out = smooth(&s, 5);
        assert_eq!(out.len(), s.len());
        for (a, b) in s.iter().zip(&out) {
            assert_eq!(a.year, b.year);
            assert_eq!(a.scenario, b.scenario);
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let s = series(&[1.0, 5.0, 1.0]);
        let before = s.clone();
        let _ = smooth(&s, 3);
        assert_eq!(s, before);
    }
}
