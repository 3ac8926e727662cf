//! Property-based tests for tokenizer/validator/round-trip invariants.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use quickcheck_macros::quickcheck;
use sql_format_elements::cast::{
    cast_format_date_to_string, cast_format_time_to_string, cast_string_to_date,
    cast_string_to_time, validate_format_string_for_parsing,
};
use sql_format_elements::target::TargetType;
use sql_format_elements::tokenizer::tokenize;

/// Tokenizing a format string never drops or duplicates source bytes: the
/// sum of each element's `length_in_source` equals the format string's
/// total byte length.
#[quickcheck]
fn tokenize_accounts_for_every_byte(format: String) -> bool {
    match tokenize(&format) {
        Ok(elements) => {
            let total: usize = elements.iter().map(|e| e.length_in_source).sum();
            total == format.len()
        }
        Err(_) => true,
    }
}

/// Tokenizing is deterministic: running it twice on the same input yields
/// the same element sequence.
#[quickcheck]
fn tokenize_is_deterministic(format: String) -> bool {
    tokenize(&format) == tokenize(&format)
}

/// Lower-casing an all-uppercase recognized format string changes the
/// rendered casing but never the set of recognized element types.
#[quickcheck]
fn case_does_not_change_tokenized_element_types() -> bool {
    let upper = tokenize("YYYY-MM-DD").unwrap();
    let lower = tokenize("yyyy-mm-dd").unwrap();
    let mixed = tokenize("YyYy-Mm-Dd").unwrap();

    let types = |v: &[sql_format_elements::element::FormatElement]| {
        v.iter().map(|e| e.element_type.clone()).collect::<Vec<_>>()
    };
    types(&upper) == types(&lower) && types(&lower) == types(&mixed)
}

/// `DATE` round-trips through `YYYY-MM-DD` for any in-range calendar date.
#[quickcheck]
fn date_round_trips_through_format_and_parse(year: u16, month: u8, day: u8) -> bool {
    let year = 1 + (i32::from(year) % 9999);
    let month = 1 + (u32::from(month) % 12);
    let day = 1 + (u32::from(day) % 31);

    let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
        return true;
    };

    let rendered = cast_format_date_to_string("YYYY-MM-DD", date).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let reparsed = cast_string_to_date("YYYY-MM-DD", &rendered, now).unwrap();
    reparsed == date
}

/// `TIME` round-trips through `HH24:MI:SS` for any wall-clock time.
#[quickcheck]
fn time_round_trips_through_format_and_parse(hour: u8, minute: u8, second: u8) -> bool {
    let hour = u32::from(hour) % 24;
    let minute = u32::from(minute) % 60;
    let second = u32::from(second) % 60;

    let Some(time) = NaiveTime::from_hms_opt(hour, minute, second) else {
        return true;
    };

    let rendered = cast_format_time_to_string("HH24:MI:SS", time).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let reparsed = cast_string_to_time("HH24:MI:SS", &rendered, now).unwrap();
    reparsed == time
}

/// Validating the same format string for the same target/mode twice gives
/// the same answer (no hidden global state leaks between calls).
#[quickcheck]
fn validation_is_idempotent(format: String) -> bool {
    let first = validate_format_string_for_parsing(&format, TargetType::Timestamp);
    let second = validate_format_string_for_parsing(&format, TargetType::Timestamp);
    first == second
}
