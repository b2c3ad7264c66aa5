//! Trading-day classification and random start-date draws.
//!
//! The holiday set is deliberately small: New Year's Day, Independence Day,
//! Christmas Day and an approximate Thanksgiving (any Thursday from Nov 22 to
//! Nov 28). Moving holidays and observed-date shifts are not modelled.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::Rng;

pub const MIN_DAYS_AGO: i64 = 7;
pub const MAX_DAYS_AGO: i64 = 100;
pub const MAX_DATE_ATTEMPTS: usize = 50;

pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_holiday(date: NaiveDate) -> bool {
    match (date.month(), date.day()) {
        (1, 1) | (7, 4) | (12, 25) => true,
        (11, 22..=28) => date.weekday() == Weekday::Thu,
        _ => false,
    }
}

pub fn is_trading_day(date: NaiveDate) -> bool {
    is_weekday(date) && !is_holiday(date)
}

/// Draws a date between [`MIN_DAYS_AGO`] and [`MAX_DAYS_AGO`] days before
/// `today`, redrawing while it is not a trading day.
///
/// After [`MAX_DATE_ATTEMPTS`] draws the last candidate is returned even if it
/// falls on a weekend or holiday; alignment then snaps it to the previous
/// available close.
pub fn random_historical_date<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> NaiveDate {
    let mut candidate = today;
    for _ in 0..MAX_DATE_ATTEMPTS {
        let days_ago = rng.gen_range(MIN_DAYS_AGO..=MAX_DAYS_AGO);
        candidate = today - Duration::days(days_ago);
        if is_trading_day(candidate) {
            break;
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weekends_are_not_trading_days() {
        // 2024-01-06 is a Saturday
        assert!(!is_trading_day(d(2024, 1, 6)));
        assert!(!is_trading_day(d(2024, 1, 7)));
        assert!(is_trading_day(d(2024, 1, 8)));
    }

    #[test]
    fn fixed_holidays_are_not_trading_days() {
        // all three fall on weekdays in 2024
        assert!(!is_trading_day(d(2024, 1, 1)));
        assert!(!is_trading_day(d(2024, 7, 4)));
        assert!(!is_trading_day(d(2024, 12, 25)));
    }

    #[test]
    fn thanksgiving_is_thursday_between_22_and_28() {
        assert!(is_holiday(d(2024, 11, 28)));
        assert!(is_holiday(d(2023, 11, 23)));
        // Thursday but too early in the month
        assert!(!is_holiday(d(2024, 11, 21)));
        // in range but a Friday
        assert!(!is_holiday(d(2024, 11, 29)));
        assert!(!is_holiday(d(2024, 11, 22)));
    }

    #[test]
    fn observed_holidays_are_not_recognized() {
        // 2022-12-26 is the observed Christmas holiday; only the fixed date counts
        assert!(is_trading_day(d(2022, 12, 26)));
        // Memorial Day is not in the set
        assert!(is_trading_day(d(2024, 5, 27)));
    }

    #[test]
    fn random_date_is_within_window() {
        let today = d(2024, 6, 14);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let date = random_historical_date(today, &mut rng);
            let days_ago = (today - date).num_days();
            assert!((MIN_DAYS_AGO..=MAX_DAYS_AGO).contains(&days_ago));
            assert!(is_trading_day(date));
        }
    }

    #[test]
    fn random_date_is_reproducible_for_a_seed() {
        let today = d(2024, 6, 14);
        let a = random_historical_date(today, &mut StdRng::seed_from_u64(42));
        let b = random_historical_date(today, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    /// Always yields the same value, so every draw lands on the same day.
    struct FixedRng(u64);

    impl rand::RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.0 as u32
        }
        fn next_u64(&mut self) -> u64 {
            self.0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            dest.fill(0);
            Ok(())
        }
    }

    #[test]
    fn falls_back_to_last_candidate_after_all_attempts_fail() {
        let mut rng = FixedRng(0);
        let today = d(2024, 6, 14);
        let probe = random_historical_date(today, &mut FixedRng(0));
        // Shift `today` so that the constant draw lands on a Sunday.
        let shift = (probe.weekday().num_days_from_sunday()) as i64;
        let today = today - Duration::days(shift);
        let date = random_historical_date(today, &mut rng);
        assert_eq!(date.weekday(), Weekday::Sun);
        assert!(!is_trading_day(date));
        let days_ago = (today - date).num_days();
        assert!((MIN_DAYS_AGO..=MAX_DAYS_AGO).contains(&days_ago));
    }
}
