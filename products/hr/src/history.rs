use chrono::{Datelike, Months, NaiveDate};
use rand::Rng;
use serde::Serialize;

/// Length of the synthetic performance series.
pub const HISTORY_MONTHS: usize = 12;

/// One synthetic monthly sample. No real historical data exists; this is
/// presentation scaffolding for the detail-view chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    /// Calendar month of the sample, formatted `YYYY-MM`.
    pub month: String,
    pub rating: f64,
}

/// A pseudo-random rating in [3, 5], rounded to one decimal place. Shared by
/// the history series, seed generation, and manual creation.
pub fn random_rating<R: Rng>(rng: &mut R) -> f64 {
    let raw: f64 = rng.gen_range(3.0..=5.0);
    (raw * 10.0).round() / 10.0
}

/// The trailing twelve months ending at `today`'s month, oldest first, one
/// random rating per month. Generic over the RNG so tests can inject a
/// seeded generator.
pub fn performance_history<R: Rng>(rng: &mut R, today: NaiveDate) -> Vec<HistoryPoint> {
    let anchor = today.with_day(1).unwrap_or(today);
    (0..HISTORY_MONTHS as u32)
        .rev()
        .map(|back| {
            let month = anchor - Months::new(back);
            HistoryPoint {
                month: month.format("%Y-%m").to_string(),
                rating: random_rating(rng),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 23).unwrap()
    }

    #[test]
    fn series_covers_the_trailing_year_oldest_first() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = performance_history(&mut rng, anchor());
        assert_eq!(series.len(), HISTORY_MONTHS);
        assert_eq!(series.first().unwrap().month, "2025-09");
        assert_eq!(series.last().unwrap().month, "2026-08");
        let months: Vec<&str> = series.iter().map(|point| point.month.as_str()).collect();
        let mut sorted = months.clone();
        sorted.sort_unstable();
        assert_eq!(months, sorted);
    }

    #[test]
    fn ratings_stay_in_range_with_one_decimal() {
        let mut rng = StdRng::seed_from_u64(42);
        for point in performance_history(&mut rng, anchor()) {
            assert!((3.0..=5.0).contains(&point.rating), "{}", point.rating);
            let scaled = point.rating * 10.0;
            assert_eq!(scaled, scaled.round());
        }
    }

    #[test]
    fn seeded_generators_reproduce_the_series() {
        let mut first = StdRng::seed_from_u64(99);
        let mut second = StdRng::seed_from_u64(99);
        assert_eq!(
            performance_history(&mut first, anchor()),
            performance_history(&mut second, anchor())
        );
    }

    #[test]
    fn year_boundary_rolls_over_cleanly() {
        let mut rng = StdRng::seed_from_u64(1);
        let january = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let series = performance_history(&mut rng, january);
        assert_eq!(series.first().unwrap().month, "2025-02");
        assert_eq!(series.last().unwrap().month, "2026-01");
    }
}
