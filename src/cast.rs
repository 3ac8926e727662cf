//! Public cast entry points (§4.G): the thin dispatch layer that ties
//! tokenization, validation, parsing, and formatting together for each SQL
//! `CAST ... FORMAT` direction.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::civil;
use crate::error::{AnalysisError, CastError};
use crate::formatter;
use crate::parser;
use crate::target::{Mode, TargetType};
use crate::tokenizer::tokenize;
use crate::validator::validate;

/// Validate `format` for use when parsing an input string into `target`.
pub fn validate_format_string_for_parsing(
    format: &str,
    target: TargetType,
) -> Result<(), AnalysisError> {
    let elements = tokenize(format)?;
    validate(&elements, target, Mode::ParseOnly)
}

/// Validate `format` for use when rendering a civil time of type `target`.
pub fn validate_format_string_for_formatting(
    format: &str,
    target: TargetType,
) -> Result<(), AnalysisError> {
    let elements = tokenize(format)?;
    validate(&elements, target, Mode::Format)
}

/// `CAST(input AS TIMESTAMP FORMAT format)`.
///
/// `zone_name` resolves the default zone both for defaulting unset fields
/// from `now` and for interpreting a format string with no explicit
/// `TZH`/`TZM` elements.
pub fn cast_string_to_timestamp(
    format: &str,
    input: &str,
    zone_name: &str,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, CastError> {
    let elements = tokenize(format)?;
    validate(&elements, TargetType::Timestamp, Mode::ParseOnly)?;
    let zone = civil::resolve_zone(zone_name)?;
    Ok(parser::parse(&elements, input, zone, now)?)
}

/// `CAST(input AS DATETIME FORMAT format)`, evaluated in a zone-free civil
/// calendar (defaults to UTC for "now"-seeded fields).
pub fn cast_string_to_datetime(
    format: &str,
    input: &str,
    now: DateTime<Utc>,
) -> Result<NaiveDateTime, CastError> {
    let elements = tokenize(format)?;
    validate(&elements, TargetType::Datetime, Mode::ParseOnly)?;
    let instant = parser::parse(&elements, input, chrono_tz::UTC, now)?;
    Ok(instant.naive_utc())
}

/// `CAST(input AS DATE FORMAT format)`.
pub fn cast_string_to_date(
    format: &str,
    input: &str,
    now: DateTime<Utc>,
) -> Result<NaiveDate, CastError> {
    let elements = tokenize(format)?;
    validate(&elements, TargetType::Date, Mode::ParseOnly)?;
    let instant = parser::parse(&elements, input, chrono_tz::UTC, now)?;
    Ok(instant.naive_utc().date())
}

/// `CAST(input AS TIME FORMAT format)`.
pub fn cast_string_to_time(
    format: &str,
    input: &str,
    now: DateTime<Utc>,
) -> Result<NaiveTime, CastError> {
    let elements = tokenize(format)?;
    validate(&elements, TargetType::Time, Mode::ParseOnly)?;
    let instant = parser::parse(&elements, input, chrono_tz::UTC, now)?;
    Ok(instant.naive_utc().time())
}

/// `CAST(date AS STRING FORMAT format)`.
pub fn cast_format_date_to_string(format: &str, date: NaiveDate) -> Result<String, CastError> {
    let elements = tokenize(format)?;
    validate(&elements, TargetType::Date, Mode::Format)?;
    let naive = NaiveDateTime::new(date, NaiveTime::default());
    Ok(formatter::format(&elements, &naive, None))
}

/// `CAST(time AS STRING FORMAT format)`.
pub fn cast_format_time_to_string(format: &str, time: NaiveTime) -> Result<String, CastError> {
    let elements = tokenize(format)?;
    validate(&elements, TargetType::Time, Mode::Format)?;
    let naive = NaiveDateTime::new(NaiveDate::default(), time);
    Ok(formatter::format(&elements, &naive, None))
}

/// `CAST(datetime AS STRING FORMAT format)`.
pub fn cast_format_datetime_to_string(
    format: &str,
    datetime: NaiveDateTime,
) -> Result<String, CastError> {
    let elements = tokenize(format)?;
    validate(&elements, TargetType::Datetime, Mode::Format)?;
    Ok(formatter::format(&elements, &datetime, None))
}

/// `CAST(timestamp AS STRING FORMAT format)`, rendered in `zone_name`.
pub fn cast_format_timestamp_to_string(
    format: &str,
    instant: DateTime<Utc>,
    zone_name: &str,
) -> Result<String, CastError> {
    let elements = tokenize(format)?;
    validate(&elements, TargetType::Timestamp, Mode::Format)?;
    let zone: Tz = civil::resolve_zone(zone_name)?;
    let local = civil::instant_to_civil(instant, zone);
    let offset_seconds = local.offset().fix().local_minus_utc();
    Ok(formatter::format(
        &elements,
        &local.naive_local(),
        Some(offset_seconds),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn cast_format_date_to_string_basic() {
        let date = NaiveDate::from_ymd_opt(2021, 7, 4).unwrap();
        assert_eq!(
            cast_format_date_to_string("YYYY-MM-DD", date).unwrap(),
            "2021-07-04"
        );
    }

    #[test]
    fn cast_string_to_timestamp_round_trip_feb_29() {
        let now = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let result =
            cast_string_to_timestamp("YYYYMMDD", "20200229", "UTC", now).unwrap();
        assert_eq!(result.naive_utc().date(), NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());

        let err = cast_string_to_timestamp("YYYYMMDD", "20210229", "UTC", now).unwrap_err();
        assert!(matches!(
            err,
            CastError::Evaluation(crate::error::EvaluationError::InvalidCivilResult)
        ));
    }

    #[test]
    fn validate_for_parsing_rejects_missing_meridian() {
        let err =
            validate_format_string_for_parsing("HH12:MI", TargetType::Timestamp).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MissingCoexistencePartner { .. }
        ));
    }
}
