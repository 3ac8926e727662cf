//! Renders a civil time through a validated element list (§4.F).

use crate::civil::CivilClock;
use crate::element::{ElementType, FormatElement};
use crate::strftime_like::{render as strftime_render, Conversion};
use crate::week::{iso_8601_year_and_week_number, week_number, WeekStart};

const ROMAN_MONTHS: [&str; 12] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
];

/// Render `elements` against `clock`.
///
/// `tz_offset_seconds` supplies the zone offset for `TZH`/`TZM`; it is
/// `None` for target types that never carry a time zone (the validator
/// already rejects `TimeZone`-category elements for those targets, so this
/// is only consulted when it's actually populated).
#[must_use]
pub fn format(
    elements: &[FormatElement],
    clock: &dyn CivilClock,
    tz_offset_seconds: Option<i32>,
) -> String {
    let mut out = String::new();
    for element in elements {
        let rendered = render_element(element, clock, tz_offset_seconds);
        if element.element_type.is_literal() {
            out.push_str(&rendered);
        } else {
            out.push_str(&element.casing_policy.apply(&rendered));
        }
    }
    out
}

fn render_element(
    element: &FormatElement,
    clock: &dyn CivilClock,
    tz_offset_seconds: Option<i32>,
) -> String {
    match &element.element_type {
        ElementType::SimpleLiteral(c) => c.to_string(),
        ElementType::DoubleQuotedLiteral(text) => text.clone(),
        ElementType::Whitespace => " ".repeat(element.length_in_source),

        ElementType::Y => format!("{}", clock.year().rem_euclid(10)),
        ElementType::Yy => format!("{:02}", clock.year().rem_euclid(100)),
        ElementType::Yyy => format!("{:03}", clock.year().rem_euclid(1000)),
        ElementType::Yyyy | ElementType::Rrrr => format!("{:04}", clock.year()),
        ElementType::Rr => format!("{:02}", clock.year().rem_euclid(100)),
        ElementType::YCommaYyy => {
            let year = clock.year();
            format!("{},{:03}", year / 1000, year.rem_euclid(1000))
        }
        ElementType::Iyyy | ElementType::Syyyy => format!("{:04}", iso_year(clock)),
        ElementType::Iyy => format!("{:03}", iso_year(clock).rem_euclid(1000)),
        ElementType::Iy => format!("{:02}", iso_year(clock).rem_euclid(100)),
        ElementType::I => format!("{}", iso_year(clock).rem_euclid(10)),
        ElementType::YearWord | ElementType::SyearWord => format!("{}", clock.year()),

        ElementType::Mm => strftime_render(Conversion::MonthNumber, clock),
        ElementType::Mon => strftime_render(Conversion::MonthAbbr, clock),
        ElementType::Month => strftime_render(Conversion::MonthFull, clock),
        ElementType::Rm => ROMAN_MONTHS[(clock.month() - 1) as usize].to_string(),

        ElementType::Ddd => strftime_render(Conversion::DayOfYear, clock),
        ElementType::Dd => strftime_render(Conversion::DayOfMonth, clock),
        ElementType::D => format!("{}", clock.day_of_week() + 1),
        ElementType::Day => strftime_render(Conversion::WeekdayFull, clock),
        ElementType::Dy => strftime_render(Conversion::WeekdayAbbr, clock),
        ElementType::J => {
            format!("{}", julian_day_number(clock.year(), clock.month(), clock.day()))
        }

        ElementType::Hh | ElementType::Hh12 => strftime_render(Conversion::Hour12, clock),
        ElementType::Hh24 => strftime_render(Conversion::Hour24, clock),

        ElementType::Mi => strftime_render(Conversion::Minute, clock),

        ElementType::Ss => strftime_render(Conversion::Second, clock),
        ElementType::Sssss => {
            let seconds_of_day = clock.hour() * 3600 + clock.minute() * 60 + clock.second();
            format!("{seconds_of_day:05}")
        }
        ElementType::Ff(n) => strftime_render(Conversion::FractionalSeconds(*n), clock),

        ElementType::Am | ElementType::Pm => meridian_word(clock.hour()).to_string(),
        ElementType::AmDotted | ElementType::PmDotted => dotted_meridian(clock.hour()).to_string(),

        ElementType::Tzh => {
            let offset = tz_offset_seconds.unwrap_or(0);
            let hours = offset.abs() / 3600;
            let sign = if offset < 0 { '-' } else { '+' };
            format!("{sign}{hours:02}")
        }
        ElementType::Tzm => {
            let offset = tz_offset_seconds.unwrap_or(0);
            let minutes = (offset.abs() / 60) % 60;
            format!("{minutes:02}")
        }

        ElementType::Cc | ElementType::Scc => {
            let century = (clock.year() - 1) / 100 + 1;
            format!("{century:02}")
        }
        ElementType::Q => format!("{}", (clock.month() - 1) / 3 + 1),
        ElementType::Iw => {
            let (_, week) = iso_8601_year_and_week_number(
                i64::from(clock.year()),
                i64::from(clock.day_of_week()),
                i64::from(clock.day_of_year()),
            );
            format!("{week:02}")
        }
        ElementType::Ww => {
            let week = week_number(
                i64::from(clock.day_of_week()),
                i64::from(clock.day_of_year()),
                WeekStart::Sunday,
            ) + 1;
            format!("{week:02}")
        }
        ElementType::W => format!("{}", (clock.day() - 1) / 7 + 1),

        ElementType::Ad | ElementType::Bc => "AD".to_string(),
        ElementType::AdDotted | ElementType::BcDotted => "A.D.".to_string(),

        // Spelled-out/ordinal-suffix numeral modifiers and fill-mode have no
        // natural-language numeral facility named as a collaborator (§10.3);
        // they render as a no-op rather than a silently wrong guess.
        ElementType::Sp | ElementType::Th | ElementType::Spth | ElementType::Thsp | ElementType::Fm => {
            String::new()
        }
    }
}

fn iso_year(clock: &dyn CivilClock) -> i32 {
    let (year, _) = iso_8601_year_and_week_number(
        i64::from(clock.year()),
        i64::from(clock.day_of_week()),
        i64::from(clock.day_of_year()),
    );
    year as i32
}

/// `AM` if `hour <= 12` else `PM`. This intentionally preserves the source
/// behavior where `hour == 12` (noon) renders as `AM` (§9 Open Question).
fn meridian_word(hour24: u32) -> &'static str {
    if hour24 > 12 {
        "PM"
    } else {
        "AM"
    }
}

fn dotted_meridian(hour24: u32) -> &'static str {
    if hour24 > 12 {
        "P.M."
    } else {
        "A.M."
    }
}

/// Julian day number for a proleptic Gregorian calendar date.
fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let a = (14 - i64::from(month)) / 12;
    let y = i64::from(year) + 4800 - a;
    let m = i64::from(month) + 12 * a - 3;
    i64::from(day) + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use chrono::NaiveDate;

    fn fmt(format_str: &str, naive: chrono::NaiveDateTime) -> String {
        let elements = tokenize(format_str).unwrap();
        format(&elements, &naive, None)
    }

    #[test]
    fn basic_date_format() {
        let naive = NaiveDate::from_ymd_opt(2021, 7, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(fmt("YYYY-MM-DD", naive), "2021-07-04");
    }

    #[test]
    fn month_word_with_first_letter_upper_casing() {
        let naive = NaiveDate::from_ymd_opt(2021, 7, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(fmt("Month", naive), "July");
        assert_eq!(fmt("MONTH", naive), "JULY");
        assert_eq!(fmt("month", naive), "july");
    }

    #[test]
    fn meridian_boundary_quirk_is_preserved() {
        let noon = NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let one_pm = NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();
        assert_eq!(fmt("AM", noon), "AM");
        assert_eq!(fmt("AM", one_pm), "PM");
    }

    #[test]
    fn y_comma_yyy_formats_with_separator() {
        let naive = NaiveDate::from_ymd_opt(10000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(fmt("Y,YYY", naive), "10,000");
    }

    #[test]
    fn fractional_seconds_truncate() {
        let naive = NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_nano_opt(0, 0, 0, 999_999_999)
            .unwrap();
        assert_eq!(fmt("FF3", naive), "999");
    }

    #[test]
    fn timezone_offset_renders_sign_and_padding() {
        let naive = NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let elements = tokenize("TZH:TZM").unwrap();
        assert_eq!(format(&elements, &naive, Some(-5 * 3600)), "-05:00");
        assert_eq!(format(&elements, &naive, Some(9 * 3600 + 30 * 60)), "+09:30");
    }
}
