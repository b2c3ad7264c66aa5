//! Maps a calendar date onto the daily series and builds the opening window.

use crate::domain::error::GameError;
use crate::domain::price::{PricePoint, Series};
use chrono::NaiveDate;

/// Number of closes shown before the first prediction.
pub const LOOKBACK: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Index of the first close to be revealed.
    pub start_index: usize,
    /// `series[start_index - LOOKBACK .. start_index]`; never contains the
    /// point at `start_index`.
    pub initial_window: Vec<PricePoint>,
}

/// Finds the close on `target`, or the closest one before it, and returns it
/// together with the [`LOOKBACK`] closes that precede it.
pub fn align(series: &Series, target: NaiveDate) -> Result<Alignment, GameError> {
    let start_index = match series.binary_search_by_key(&target, |p| p.date) {
        Ok(exact) => exact,
        Err(_) => series
            .iter()
            .rposition(|p| p.date <= target)
            .ok_or(GameError::InsufficientHistory { target })?,
    };

    if start_index < LOOKBACK {
        return Err(GameError::InsufficientHistory { target });
    }

    Ok(Alignment {
        start_index,
        initial_window: series[start_index - LOOKBACK..start_index].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// `n` consecutive calendar days starting at `start`, closes 100, 101, ...
    fn daily_series(start: &str, n: usize) -> Series {
        let start = d(start);
        Series::from_points(
            (0..n)
                .map(|i| PricePoint::new(start + Duration::days(i as i64), 100.0 + i as f64))
                .collect(),
        )
    }

    #[test]
    fn exact_match_uses_that_index() {
        let series = daily_series("2024-01-01", 20);
        let a = align(&series, d("2024-01-11")).unwrap();
        assert_eq!(a.start_index, 10);
        assert_eq!(a.initial_window.len(), LOOKBACK);
        assert_eq!(a.initial_window.first().unwrap().date, d("2024-01-04"));
        assert_eq!(a.initial_window.last().unwrap().date, d("2024-01-10"));
    }

    #[test]
    fn window_excludes_start_point() {
        let series = daily_series("2024-01-01", 20);
        let a = align(&series, d("2024-01-11")).unwrap();
        assert!(a.initial_window.iter().all(|p| p.date < d("2024-01-11")));
    }

    #[test]
    fn missing_date_falls_back_to_previous_close() {
        let mut points: Vec<_> = daily_series("2024-01-01", 20).to_vec();
        // drop 2024-01-13 and 2024-01-14 as if they were a weekend
        points.retain(|p| p.date != d("2024-01-13") && p.date != d("2024-01-14"));
        let series = Series::from_points(points);

        let a = align(&series, d("2024-01-14")).unwrap();
        assert_eq!(series[a.start_index].date, d("2024-01-12"));
    }

    #[test]
    fn target_after_last_close_uses_last_close() {
        let series = daily_series("2024-01-01", 20);
        let a = align(&series, d("2024-03-01")).unwrap();
        assert_eq!(a.start_index, 19);
    }

    #[test]
    fn target_before_history_is_insufficient() {
        let series = daily_series("2024-01-01", 20);
        let err = align(&series, d("2023-12-01")).unwrap_err();
        assert!(matches!(err, GameError::InsufficientHistory { .. }));
    }

    #[test]
    fn fewer_than_seven_prior_closes_is_insufficient() {
        let series = daily_series("2024-01-01", 20);
        // index 6 has only six closes before it
        assert!(matches!(
            align(&series, d("2024-01-07")),
            Err(GameError::InsufficientHistory { .. })
        ));
        assert_eq!(align(&series, d("2024-01-08")).unwrap().start_index, 7);
    }

    #[test]
    fn empty_series_is_insufficient() {
        assert!(matches!(
            align(&Series::default(), d("2024-01-07")),
            Err(GameError::InsufficientHistory { .. })
        ));
    }
}
