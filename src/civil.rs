//! The civil-time and time-zone collaborators named in §6: calendar
//! construction/normalization, zone lookup, and zone-aware conversion in
//! both directions. This module is the only place `chrono`/`chrono-tz`
//! appear; everything else in the crate works with plain field values.

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{AnalysisError, EvaluationError};

/// Lower bound of the absolute range this engine supports (§4.E, §10.2).
pub const MIN_YEAR: i32 = 1;
/// Upper bound of the absolute range this engine supports. `10999` rather
/// than `9999` so that the `Y,YYY` element's documented ceiling (a high part
/// up to `10`, e.g. `"10,999"`) falls inside the supported range.
pub const MAX_YEAR: i32 = 10_999;

/// A caller-supplied civil time, mirroring the field accessors the
/// formatter and week-number math need. Implemented here for
/// [`chrono::NaiveDateTime`]; any other calendar library's wrapper type
/// could implement it the same way.
pub trait CivilClock {
    /// Proleptic Gregorian year.
    fn year(&self) -> i32;
    /// Month, 1..=12.
    fn month(&self) -> u32;
    /// Day of month, 1..=31.
    fn day(&self) -> u32;
    /// Hour of the 24-hour clock, 0..=23.
    fn hour(&self) -> u32;
    /// Minute, 0..=59.
    fn minute(&self) -> u32;
    /// Second, 0..=59.
    fn second(&self) -> u32;
    /// Nanoseconds within the second, 0..=999_999_999.
    fn subsecond_nanos(&self) -> u32;
    /// Day of week, Sunday = 0 .. Saturday = 6.
    fn day_of_week(&self) -> u32;
    /// Day of year, 1..=366.
    fn day_of_year(&self) -> u32;
}

impl CivilClock for NaiveDateTime {
    fn year(&self) -> i32 {
        Datelike::year(self)
    }

    fn month(&self) -> u32 {
        Datelike::month(self)
    }

    fn day(&self) -> u32 {
        Datelike::day(self)
    }

    fn hour(&self) -> u32 {
        Timelike::hour(self)
    }

    fn minute(&self) -> u32 {
        Timelike::minute(self)
    }

    fn second(&self) -> u32 {
        Timelike::second(self)
    }

    fn subsecond_nanos(&self) -> u32 {
        Timelike::nanosecond(self)
    }

    fn day_of_week(&self) -> u32 {
        Datelike::weekday(self).num_days_from_sunday()
    }

    fn day_of_year(&self) -> u32 {
        Datelike::ordinal(self)
    }
}

/// Resolve a time zone name through the IANA database (§6.3).
pub fn resolve_zone(name: &str) -> Result<Tz, AnalysisError> {
    name.parse::<Tz>()
        .map_err(|_| AnalysisError::UnresolvableTimeZone {
            name: name.to_string(),
        })
}

/// `true` if `(year, month, day)` is a real calendar date — the civil-time
/// library's normalization check (§4.E "construct a civil-second...
/// require that calendar normalization is a no-op").
#[must_use]
pub fn is_valid_calendar_date(year: i32, month: u32, day: u32) -> bool {
    NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// `true` if `(hour, minute, second)` is a real wall-clock time.
#[must_use]
pub fn is_valid_time_of_day(hour: u32, minute: u32, second: u32) -> bool {
    NaiveTime::from_hms_opt(hour, minute, second).is_some()
}

/// Convert a wall-clock civil time to an absolute instant through `zone`,
/// resolving a fold with the *pre* rule (the earlier of two candidates) and
/// treating a spring-forward gap as an evaluation error (§4.E, §10.3).
pub fn civil_to_instant(naive: NaiveDateTime, zone: Tz) -> Result<DateTime<Utc>, EvaluationError> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _latest) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(EvaluationError::InvalidCivilResult),
    }
}

/// Convert an absolute instant to the wall-clock civil time in `zone`.
#[must_use]
pub fn instant_to_civil(instant: DateTime<Utc>, zone: Tz) -> DateTime<Tz> {
    instant.with_timezone(&zone)
}

/// `true` if `instant`'s year in UTC falls inside the supported range.
#[must_use]
pub fn is_in_supported_range(instant: &DateTime<Utc>) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&instant.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn february_29_is_invalid_in_a_non_leap_year() {
        assert!(!is_valid_calendar_date(2021, 2, 29));
        assert!(is_valid_calendar_date(2020, 2, 29));
    }

    #[test]
    fn resolve_zone_accepts_iana_names() {
        assert!(resolve_zone("America/New_York").is_ok());
        assert!(resolve_zone("Not/AZone").is_err());
    }

    #[test]
    fn civil_to_instant_picks_earliest_candidate_on_fold() {
        // 2020-11-01 01:30:00 local time occurs twice in America/New_York
        // (DST fall-back); the pre rule picks the earlier (EDT) instant.
        let zone: Tz = "America/New_York".parse().unwrap();
        let naive = NaiveDate::from_ymd_opt(2020, 11, 1)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        let instant = civil_to_instant(naive, zone).unwrap();
        let reconverted = instant_to_civil(instant, zone);
        assert_eq!(reconverted.naive_local(), naive);
    }

    #[test]
    fn out_of_range_year_is_rejected() {
        let far_future = Utc.with_ymd_and_hms(20000, 1, 1, 0, 0, 0).single();
        if let Some(instant) = far_future {
            assert!(!is_in_supported_range(&instant));
        }
    }
}
