//! Forecast cycle resolution
//!
//! Picks the most recent cycle whose files should already be published,
//! given the current time and the publication lag of the distribution service.

use chrono::{DateTime, Duration, Timelike, Utc};

use crate::app::models::{Cycle, CycleHour};
use crate::errors::{ConfigError, ConfigResult};

/// Resolve the cycle to fetch at `now`, allowing `delay_hours` for publication
///
/// The delay is subtracted first; the cycle hour is then the latest of
/// 00/06/12/18 not after the effective hour, on the effective UTC date.
/// Effective hours before 06 map to 00Z of the same date.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if `now - delay_hours` is outside the
/// representable date range.
pub fn resolve_cycle(now: DateTime<Utc>, delay_hours: i64) -> ConfigResult<Cycle> {
    let effective = Duration::try_hours(delay_hours)
        .and_then(|delay| now.checked_sub_signed(delay))
        .ok_or_else(|| ConfigError::InvalidValue {
            field: "gfs_api.availability_delay_hours".to_string(),
            value: delay_hours.to_string(),
            reason: "Delay moves the current time out of range".to_string(),
        })?;

    Ok(Cycle::new(
        effective.date_naive(),
        CycleHour::latest_at_or_before(effective.hour()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_every_hour_selects_largest_canonical_value() {
        for hour in 0..24 {
            let cycle = resolve_cycle(at(2024, 3, 15, hour, 30), 0).unwrap();
            assert_eq!(cycle.hour.as_u32(), hour - hour % 6, "hour {}", hour);
            assert_eq!(cycle.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        }
    }

    #[test]
    fn test_delay_is_subtracted() {
        // 21:10 minus 4h is 17:10, inside the 12Z window
        let cycle = resolve_cycle(at(2024, 3, 15, 21, 10), 4).unwrap();
        assert_eq!(cycle.hour, CycleHour::H12);

        // 09:00 minus 4h is exactly 05:00
        let cycle = resolve_cycle(at(2024, 3, 15, 9, 0), 4).unwrap();
        assert_eq!(cycle.hour, CycleHour::H00);

        // 10:00 minus 4h lands on the 06Z boundary
        let cycle = resolve_cycle(at(2024, 1, 1, 10, 0), 4).unwrap();
        assert_eq!(cycle.hour, CycleHour::H06);
        assert_eq!(cycle.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_delay_across_midnight_uses_effective_date() {
        // 02:00 minus 4h is 22:00 the previous day
        let cycle = resolve_cycle(at(2024, 1, 1, 2, 0), 4).unwrap();
        assert_eq!(cycle.date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(cycle.hour, CycleHour::H18);
    }

    #[test]
    fn test_early_hours_stay_on_same_date() {
        // 07:00 minus 4h is 03:00: 00Z of the same day, no rollback
        let cycle = resolve_cycle(at(2024, 1, 1, 7, 0), 4).unwrap();
        assert_eq!(cycle.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(cycle.hour, CycleHour::H00);
    }

    #[test]
    fn test_out_of_range_delay_is_error() {
        let result = resolve_cycle(at(2024, 1, 1, 10, 0), 1_000_000_000_000);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        let result = resolve_cycle(at(2024, 1, 1, 10, 0), i64::MIN);
        assert!(result.is_err());
    }
}
