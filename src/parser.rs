//! Consumes an input string under a validated element list to produce an
//! absolute instant (§4.E).

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::civil;
use crate::element::{ElementType, FormatElement};
use crate::error::EvaluationError;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

struct InputCursor<'a> {
    original: &'a str,
    remaining: &'a str,
}

impl<'a> InputCursor<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            original: s,
            remaining: s,
        }
    }

    fn offset(&self) -> usize {
        self.original.len() - self.remaining.len()
    }

    fn advance(&mut self, byte_len: usize) {
        self.remaining = &self.remaining[byte_len..];
    }

    fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    fn read_optional_sign(&mut self) -> i32 {
        if let Some(rest) = self.remaining.strip_prefix('-') {
            self.remaining = rest;
            -1
        } else if let Some(rest) = self.remaining.strip_prefix('+') {
            self.remaining = rest;
            1
        } else {
            1
        }
    }

    fn read_digits(&mut self, max_width: usize) -> Option<(u32, usize)> {
        let digit_count = self
            .remaining
            .chars()
            .take(max_width)
            .take_while(char::is_ascii_digit)
            .count();
        if digit_count == 0 {
            return None;
        }
        let digits = &self.remaining[..digit_count];
        let value: u32 = digits.parse().ok()?;
        self.advance(digit_count);
        Some((value, digit_count))
    }

    fn read_exact_digits(&mut self, width: usize) -> Option<u32> {
        let digit_count = self
            .remaining
            .chars()
            .take(width)
            .take_while(char::is_ascii_digit)
            .count();
        if digit_count != width {
            return None;
        }
        let digits = &self.remaining[..width];
        let value: u32 = digits.parse().ok()?;
        self.advance(width);
        Some(value)
    }

    fn consume_whitespace(&mut self) -> usize {
        let char_count = self.remaining.chars().take_while(|c| c.is_whitespace()).count();
        let byte_len: usize = self.remaining.chars().take(char_count).map(char::len_utf8).sum();
        self.advance(byte_len);
        char_count
    }

    fn eat_literal(&mut self, text: &str) -> bool {
        if let Some(rest) = self.remaining.strip_prefix(text) {
            self.remaining = rest;
            true
        } else {
            false
        }
    }

    fn eat_case_insensitive(&mut self, text: &str) -> bool {
        let byte_len = text.len();
        if self.remaining.len() < byte_len {
            return false;
        }
        let candidate = &self.remaining[..byte_len];
        if candidate.eq_ignore_ascii_case(text) {
            self.advance(byte_len);
            true
        } else {
            false
        }
    }
}

#[derive(Default)]
struct ParseState {
    year: i32,
    month: u32,
    day: u32,
    day_of_year: Option<u32>,
    hour24: u32,
    hour12: Option<u32>,
    minute: u32,
    second: u32,
    seconds_of_day: Option<u32>,
    subsecond_nanos: u32,
    meridian_pm: Option<bool>,
    tz_offset_seconds: Option<i32>,
}

/// Parse `input` under `elements`, defaulting unset fields from `now`'s
/// civil reading in `zone`, and resolve the result to an absolute instant.
pub fn parse(
    elements: &[FormatElement],
    input: &str,
    zone: Tz,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, EvaluationError> {
    let now_civil = civil::instant_to_civil(now, zone).naive_local();
    let mut state = ParseState {
        year: now_civil.year(),
        month: now_civil.month(),
        day: 1,
        ..ParseState::default()
    };

    let mut cursor = InputCursor::new(input);
    cursor.consume_whitespace();

    for element in elements {
        if cursor.is_empty() && !matches_empty_input(&element.element_type) {
            return Err(EvaluationError::UnconsumedElement {
                element: element.debug_name(),
            });
        }
        apply_element(element, &mut cursor, &mut state)?;
    }

    cursor.consume_whitespace();
    if !cursor.is_empty() {
        return Err(EvaluationError::TrailingData {
            data: cursor.remaining.to_string(),
        });
    }

    resolve(state, zone)
}

fn matches_empty_input(element_type: &ElementType) -> bool {
    matches!(element_type, ElementType::DoubleQuotedLiteral(text) if text.is_empty())
}

fn apply_element(
    element: &FormatElement,
    cursor: &mut InputCursor<'_>,
    state: &mut ParseState,
) -> Result<(), EvaluationError> {
    let mismatch = |cursor: &InputCursor<'_>| EvaluationError::ParseMismatch {
        offset: cursor.offset(),
        element: element.debug_name(),
    };

    match &element.element_type {
        ElementType::SimpleLiteral(c) => {
            let mut buf = [0u8; 4];
            let text = c.encode_utf8(&mut buf);
            if !cursor.eat_literal(text) {
                return Err(mismatch(cursor));
            }
        }
        ElementType::DoubleQuotedLiteral(text) => {
            if !cursor.eat_literal(text) {
                return Err(mismatch(cursor));
            }
        }
        ElementType::Whitespace => {
            if cursor.consume_whitespace() == 0 {
                return Err(mismatch(cursor));
            }
        }
        ElementType::Yyyy | ElementType::Rrrr => {
            let (value, _) = cursor.read_digits(5).ok_or_else(|| mismatch(cursor))?;
            if value >= 10_000 {
                return Err(mismatch(cursor));
            }
            state.year = value as i32;
        }
        ElementType::Yyy => {
            let (value, _) = cursor.read_digits(3).ok_or_else(|| mismatch(cursor))?;
            state.year = state.year - state.year.rem_euclid(1000) + value as i32;
        }
        ElementType::Yy => {
            let (value, _) = cursor.read_digits(2).ok_or_else(|| mismatch(cursor))?;
            state.year = state.year - state.year.rem_euclid(100) + value as i32;
        }
        ElementType::Y => {
            let (value, _) = cursor.read_digits(1).ok_or_else(|| mismatch(cursor))?;
            state.year = state.year - state.year.rem_euclid(10) + value as i32;
        }
        ElementType::Rr => {
            let (yy, _) = cursor.read_digits(2).ok_or_else(|| mismatch(cursor))?;
            let cc = state.year.div_euclid(100);
            let ccy = state.year.rem_euclid(100);
            let cc = if (yy as i32) < 50 && ccy >= 50 {
                cc + 1
            } else if (yy as i32) >= 50 && ccy < 50 {
                cc - 1
            } else {
                cc
            };
            state.year = cc * 100 + yy as i32;
        }
        ElementType::YCommaYyy => {
            let (high, _) = cursor.read_digits(2).ok_or_else(|| mismatch(cursor))?;
            if high > 10 {
                return Err(mismatch(cursor));
            }
            if !cursor.eat_literal(",") {
                return Err(mismatch(cursor));
            }
            let low = cursor.read_exact_digits(3).ok_or_else(|| mismatch(cursor))?;
            state.year = (high * 1000 + low) as i32;
        }
        ElementType::Mm => {
            let (value, _) = cursor.read_digits(2).ok_or_else(|| mismatch(cursor))?;
            if !(1..=12).contains(&value) {
                return Err(mismatch(cursor));
            }
            state.month = value;
        }
        ElementType::Mon => {
            state.month = match_month_name(cursor, true).ok_or_else(|| mismatch(cursor))?;
        }
        ElementType::Month => {
            state.month = match_month_name(cursor, false).ok_or_else(|| mismatch(cursor))?;
        }
        ElementType::Dd => {
            let (value, _) = cursor.read_digits(2).ok_or_else(|| mismatch(cursor))?;
            if !(1..=31).contains(&value) {
                return Err(mismatch(cursor));
            }
            state.day = value;
        }
        ElementType::Ddd => {
            let (value, _) = cursor.read_digits(3).ok_or_else(|| mismatch(cursor))?;
            if !(1..=366).contains(&value) {
                return Err(mismatch(cursor));
            }
            state.day_of_year = Some(value);
        }
        ElementType::Hh | ElementType::Hh12 => {
            let (value, _) = cursor.read_digits(2).ok_or_else(|| mismatch(cursor))?;
            if !(1..=12).contains(&value) {
                return Err(mismatch(cursor));
            }
            state.hour12 = Some(value);
        }
        ElementType::Hh24 => {
            let (value, _) = cursor.read_digits(2).ok_or_else(|| mismatch(cursor))?;
            if value > 23 {
                return Err(mismatch(cursor));
            }
            state.hour24 = value;
        }
        ElementType::Mi => {
            let (value, _) = cursor.read_digits(2).ok_or_else(|| mismatch(cursor))?;
            if value > 59 {
                return Err(mismatch(cursor));
            }
            state.minute = value;
        }
        ElementType::Ss => {
            let (value, _) = cursor.read_digits(2).ok_or_else(|| mismatch(cursor))?;
            if value > 59 {
                return Err(mismatch(cursor));
            }
            state.second = value;
        }
        ElementType::Sssss => {
            let (value, _) = cursor.read_digits(5).ok_or_else(|| mismatch(cursor))?;
            if value > 86_399 {
                return Err(mismatch(cursor));
            }
            state.seconds_of_day = Some(value);
        }
        ElementType::Ff(n) => {
            let digits = cursor.read_exact_digits(*n as usize).ok_or_else(|| mismatch(cursor))?;
            state.subsecond_nanos = digits * 10u32.pow(9 - u32::from(*n));
        }
        ElementType::Am => {
            if !cursor.eat_case_insensitive("AM") {
                return Err(mismatch(cursor));
            }
            state.meridian_pm = Some(false);
        }
        ElementType::Pm => {
            if !cursor.eat_case_insensitive("PM") {
                return Err(mismatch(cursor));
            }
            state.meridian_pm = Some(true);
        }
        ElementType::AmDotted => {
            if !cursor.eat_case_insensitive("A.M.") {
                return Err(mismatch(cursor));
            }
            state.meridian_pm = Some(false);
        }
        ElementType::PmDotted => {
            if !cursor.eat_case_insensitive("P.M.") {
                return Err(mismatch(cursor));
            }
            state.meridian_pm = Some(true);
        }
        ElementType::Tzh => {
            let sign = cursor.read_optional_sign();
            let (value, _) = cursor.read_digits(2).ok_or_else(|| mismatch(cursor))?;
            if value > 14 {
                return Err(mismatch(cursor));
            }
            let base = state.tz_offset_seconds.unwrap_or(0);
            state.tz_offset_seconds = Some(base + sign * value as i32 * 3600);
        }
        ElementType::Tzm => {
            let (value, _) = cursor.read_digits(2).ok_or_else(|| mismatch(cursor))?;
            if value > 59 {
                return Err(mismatch(cursor));
            }
            let base = state.tz_offset_seconds.unwrap_or(0);
            let sign = if base < 0 { -1 } else { 1 };
            state.tz_offset_seconds = Some(base + sign * value as i32 * 60);
        }
        _ => unreachable!("validator rejects non-parseable element types before the parser runs"),
    }
    Ok(())
}

fn match_month_name(cursor: &mut InputCursor<'_>, abbreviated: bool) -> Option<u32> {
    for (idx, name) in MONTH_NAMES.iter().enumerate() {
        let candidate = if abbreviated { &name[..3] } else { name };
        if cursor.eat_case_insensitive(candidate) {
            return Some(idx as u32 + 1);
        }
    }
    None
}

fn resolve(mut state: ParseState, zone: Tz) -> Result<DateTime<Utc>, EvaluationError> {
    if let Some(ordinal) = state.day_of_year {
        let date =
            NaiveDate::from_yo_opt(state.year, ordinal).ok_or(EvaluationError::InvalidCivilResult)?;
        state.month = date.month();
        state.day = date.day();
    }

    if let Some(seconds_of_day) = state.seconds_of_day {
        state.hour24 = seconds_of_day / 3600;
        state.minute = (seconds_of_day % 3600) / 60;
        state.second = seconds_of_day % 60;
    } else if let Some(hour12) = state.hour12 {
        let pm = state.meridian_pm.unwrap_or(false);
        state.hour24 = match (hour12, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
    }

    if !civil::is_valid_calendar_date(state.year, state.month, state.day) {
        return Err(EvaluationError::InvalidCivilResult);
    }
    if !civil::is_valid_time_of_day(state.hour24, state.minute, state.second) {
        return Err(EvaluationError::InvalidCivilResult);
    }

    let date = NaiveDate::from_ymd_opt(state.year, state.month, state.day)
        .ok_or(EvaluationError::InvalidCivilResult)?;
    let time = NaiveTime::from_hms_nano_opt(state.hour24, state.minute, state.second, state.subsecond_nanos)
        .ok_or(EvaluationError::InvalidCivilResult)?;
    let naive = NaiveDateTime::new(date, time);

    let instant = if let Some(offset_seconds) = state.tz_offset_seconds {
        let offset = FixedOffset::east_opt(offset_seconds).ok_or(EvaluationError::InvalidCivilResult)?;
        offset
            .from_local_datetime(&naive)
            .single()
            .ok_or(EvaluationError::InvalidCivilResult)?
            .with_timezone(&Utc)
    } else {
        civil::civil_to_instant(naive, zone)?
    };

    if !civil::is_in_supported_range(&instant) {
        return Err(EvaluationError::OutOfRange);
    }

    Ok(instant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use chrono::TimeZone as _;

    fn parse_str(format: &str, input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, EvaluationError> {
        let elements = tokenize(format).unwrap();
        let zone: Tz = chrono_tz::UTC;
        parse(&elements, input, zone, now)
    }

    fn utc_now(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn rr_pivot_before_midpoint() {
        let result = parse_str("RR", "12", utc_now(2002)).unwrap();
        assert_eq!(chrono::Datelike::year(&result.naive_utc()), 2012);
    }

    #[test]
    fn rr_pivot_after_midpoint() {
        let result = parse_str("RR", "51", utc_now(2002)).unwrap();
        assert_eq!(chrono::Datelike::year(&result.naive_utc()), 1951);
    }

    #[test]
    fn rr_pivot_far_future_century() {
        assert_eq!(
            chrono::Datelike::year(&parse_str("RR", "12", utc_now(2299)).unwrap().naive_utc()),
            2312
        );
        assert_eq!(
            chrono::Datelike::year(&parse_str("RR", "51", utc_now(2299)).unwrap().naive_utc()),
            2251
        );
    }

    #[test]
    fn y_comma_yyy_parses_with_separator() {
        let result = parse_str("Y,YYY", "10,000", utc_now(2000)).unwrap();
        assert_eq!(chrono::Datelike::year(&result.naive_utc()), 10_000);
    }

    #[test]
    fn invalid_calendar_date_is_rejected() {
        let err = parse_str("YYYYMMDD", "20210229", utc_now(2021)).unwrap_err();
        assert_eq!(err, EvaluationError::InvalidCivilResult);
    }

    #[test]
    fn valid_leap_day_parses() {
        assert!(parse_str("YYYYMMDD", "20200229", utc_now(2020)).is_ok());
    }

    #[test]
    fn trailing_data_is_rejected() {
        let err = parse_str("YYYY", "2021extra", utc_now(2021)).unwrap_err();
        assert!(matches!(err, EvaluationError::TrailingData { .. }));
    }
}
