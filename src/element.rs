//! The closed vocabulary of format elements and the categories they group
//! into.
//!
//! Every recognized element string maps to exactly one [`ElementType`], and
//! every [`ElementType`] maps to exactly one [`Category`] (see
//! [`ElementType::category`]). Both mappings are total: there is no
//! "unknown" variant, because the tokenizer only ever produces elements from
//! this closed set.

use std::fmt;

/// A single recognized directive in the format-element vocabulary.
///
/// Literal and whitespace elements carry their matched text alongside the
/// tag; numbered fractional-second elements carry their digit count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// One of the punctuation characters `- . / , ' ; :`, passed through
    /// verbatim.
    SimpleLiteral(char),
    /// Text between a pair of double quotes, with `\\` and `\"` unescaped.
    DoubleQuotedLiteral(String),
    /// A run of one or more ASCII spaces in the format string.
    Whitespace,

    /// `Y` - last digit of the year.
    Y,
    /// `YY` - last two digits of the year.
    Yy,
    /// `YYY` - last three digits of the year.
    Yyy,
    /// `YYYY` - four (or more) digit year.
    Yyyy,
    /// `RR` - two-digit year with the century pivoted around "now".
    Rr,
    /// `RRRR` - behaves like `YYYY` for parsing purposes.
    Rrrr,
    /// `Y,YYY` - year with a thousands separator.
    YCommaYyy,
    /// `IYYY` - ISO 8601 week-numbering year, four digits.
    Iyyy,
    /// `IYY` - last three digits of the ISO week-numbering year.
    Iyy,
    /// `IY` - last two digits of the ISO week-numbering year.
    Iy,
    /// `I` - last digit of the ISO week-numbering year.
    I,
    /// `SYYYY` - signed four-digit year (BC years negative).
    Syyyy,
    /// `YEAR` - year spelled out.
    YearWord,
    /// `SYEAR` - signed year spelled out.
    SyearWord,

    /// `MM` - two-digit month.
    Mm,
    /// `MON` - abbreviated month name.
    Mon,
    /// `MONTH` - full month name.
    Month,
    /// `RM` - month as a roman numeral.
    Rm,

    /// `DDD` - day of year, zero-padded to three digits.
    Ddd,
    /// `DD` - day of month, zero-padded to two digits.
    Dd,
    /// `D` - day of week, Sunday = 1 .. Saturday = 7.
    D,
    /// `DAY` - full weekday name.
    Day,
    /// `DY` - abbreviated weekday name.
    Dy,
    /// `J` - Julian day number.
    J,

    /// `HH` - hour of the 12-hour clock, zero-padded.
    Hh,
    /// `HH12` - same as `HH`.
    Hh12,
    /// `HH24` - hour of the 24-hour clock, zero-padded.
    Hh24,

    /// `MI` - minute, zero-padded.
    Mi,

    /// `SS` - second, zero-padded.
    Ss,
    /// `SSSSS` - second of the day, zero-padded to five digits.
    Sssss,
    /// `FFn` - `n` digits (1..=9) of fractional second.
    Ff(u8),

    /// `AM` - meridian indicator, no periods.
    Am,
    /// `PM` - meridian indicator, no periods.
    Pm,
    /// `A.M.` - meridian indicator, with periods.
    AmDotted,
    /// `P.M.` - meridian indicator, with periods.
    PmDotted,

    /// `TZH` - signed time zone hour offset.
    Tzh,
    /// `TZM` - time zone minute offset.
    Tzm,

    /// `CC` - century.
    Cc,
    /// `SCC` - signed century.
    Scc,
    /// `Q` - quarter of the year, 1..=4.
    Q,
    /// `IW` - ISO 8601 week of the year.
    Iw,
    /// `WW` - week of the year, Sunday-start.
    Ww,
    /// `W` - week of the month, Sunday-start.
    W,
    /// `AD` - era indicator, no periods.
    Ad,
    /// `BC` - era indicator, no periods.
    Bc,
    /// `A.D.` - era indicator, with periods.
    AdDotted,
    /// `B.C.` - era indicator, with periods.
    BcDotted,

    /// `SP` - spelled-out numeral modifier (no-op pass-through; see
    /// crate-level notes on unsupported locale features).
    Sp,
    /// `TH` - ordinal-suffix numeral modifier.
    Th,
    /// `SPTH` - combination of `SP` and `TH`.
    Spth,
    /// `THSP` - combination of `TH` and `SP`.
    Thsp,
    /// `FM` - fill-mode modifier (suppresses padding on the next element).
    Fm,
}

/// The coarse grouping used by the validator to find duplicate or
/// contradictory elements.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// Literal text: simple punctuation, quoted strings, whitespace runs.
    Literal,
    /// Year-bearing elements.
    Year,
    /// Month-bearing elements.
    Month,
    /// Day-bearing elements.
    Day,
    /// Hour-bearing elements.
    Hour,
    /// Minute-bearing elements.
    Minute,
    /// Second-bearing elements.
    Second,
    /// AM/PM indicators.
    Meridian,
    /// Time zone offset elements.
    TimeZone,
    /// Century elements.
    Century,
    /// Quarter-of-year elements.
    Quarter,
    /// Week-of-year/month elements.
    Week,
    /// Era indicators.
    Era,
    /// Modifiers that do not themselves carry a field value.
    Misc,
}

impl Category {
    /// The stable diagnostic name for this category, as it appears in error
    /// messages (e.g. `"MERIDIAN_INDICATOR"`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Literal => "LITERAL",
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
            Self::Meridian => "MERIDIAN_INDICATOR",
            Self::TimeZone => "TIME_ZONE",
            Self::Century => "CENTURY",
            Self::Quarter => "QUARTER",
            Self::Week => "WEEK",
            Self::Era => "ERA",
            Self::Misc => "MISC",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ElementType {
    /// The category this element type belongs to. Total over the whole
    /// enum.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::SimpleLiteral(_) | Self::DoubleQuotedLiteral(_) | Self::Whitespace => {
                Category::Literal
            }
            Self::Y
            | Self::Yy
            | Self::Yyy
            | Self::Yyyy
            | Self::Rr
            | Self::Rrrr
            | Self::YCommaYyy
            | Self::Iyyy
            | Self::Iyy
            | Self::Iy
            | Self::I
            | Self::Syyyy
            | Self::YearWord
            | Self::SyearWord => Category::Year,
            Self::Mm | Self::Mon | Self::Month | Self::Rm => Category::Month,
            Self::Ddd | Self::Dd | Self::D | Self::Day | Self::Dy | Self::J => Category::Day,
            Self::Hh | Self::Hh12 | Self::Hh24 => Category::Hour,
            Self::Mi => Category::Minute,
            Self::Ss | Self::Sssss | Self::Ff(_) => Category::Second,
            Self::Am | Self::Pm | Self::AmDotted | Self::PmDotted => Category::Meridian,
            Self::Tzh | Self::Tzm => Category::TimeZone,
            Self::Cc | Self::Scc => Category::Century,
            Self::Q => Category::Quarter,
            Self::Iw | Self::Ww | Self::W => Category::Week,
            Self::Ad | Self::Bc | Self::AdDotted | Self::BcDotted => Category::Era,
            Self::Sp | Self::Th | Self::Spth | Self::Thsp | Self::Fm => Category::Misc,
        }
    }

    /// The canonical uppercase spelling of this element type, as used in
    /// diagnostics (`"YYYY"`, `"A.M."`, `"Y,YYY"`, ...). Literal and
    /// whitespace elements render their own matched text instead.
    #[must_use]
    pub fn canonical_name(&self) -> String {
        match self {
            Self::SimpleLiteral(c) => c.to_string(),
            Self::DoubleQuotedLiteral(text) => format!("\"{text}\""),
            Self::Whitespace => " ".to_string(),
            Self::Y => "Y".to_string(),
            Self::Yy => "YY".to_string(),
            Self::Yyy => "YYY".to_string(),
            Self::Yyyy => "YYYY".to_string(),
            Self::Rr => "RR".to_string(),
            Self::Rrrr => "RRRR".to_string(),
            Self::YCommaYyy => "Y,YYY".to_string(),
            Self::Iyyy => "IYYY".to_string(),
            Self::Iyy => "IYY".to_string(),
            Self::Iy => "IY".to_string(),
            Self::I => "I".to_string(),
            Self::Syyyy => "SYYYY".to_string(),
            Self::YearWord => "YEAR".to_string(),
            Self::SyearWord => "SYEAR".to_string(),
            Self::Mm => "MM".to_string(),
            Self::Mon => "MON".to_string(),
            Self::Month => "MONTH".to_string(),
            Self::Rm => "RM".to_string(),
            Self::Ddd => "DDD".to_string(),
            Self::Dd => "DD".to_string(),
            Self::D => "D".to_string(),
            Self::Day => "DAY".to_string(),
            Self::Dy => "DY".to_string(),
            Self::J => "J".to_string(),
            Self::Hh => "HH".to_string(),
            Self::Hh12 => "HH12".to_string(),
            Self::Hh24 => "HH24".to_string(),
            Self::Mi => "MI".to_string(),
            Self::Ss => "SS".to_string(),
            Self::Sssss => "SSSSS".to_string(),
            Self::Ff(n) => format!("FF{n}"),
            Self::Am => "AM".to_string(),
            Self::Pm => "PM".to_string(),
            Self::AmDotted => "A.M.".to_string(),
            Self::PmDotted => "P.M.".to_string(),
            Self::Tzh => "TZH".to_string(),
            Self::Tzm => "TZM".to_string(),
            Self::Cc => "CC".to_string(),
            Self::Scc => "SCC".to_string(),
            Self::Q => "Q".to_string(),
            Self::Iw => "IW".to_string(),
            Self::Ww => "WW".to_string(),
            Self::W => "W".to_string(),
            Self::Ad => "AD".to_string(),
            Self::Bc => "BC".to_string(),
            Self::AdDotted => "A.D.".to_string(),
            Self::BcDotted => "B.C.".to_string(),
            Self::Sp => "SP".to_string(),
            Self::Th => "TH".to_string(),
            Self::Spth => "SPTH".to_string(),
            Self::Thsp => "THSP".to_string(),
            Self::Fm => "FM".to_string(),
        }
    }

    /// `true` for the literal/whitespace variants, which skip casing
    /// inference and per-target-type category checks that only apply to
    /// semantic elements.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::SimpleLiteral(_) | Self::DoubleQuotedLiteral(_) | Self::Whitespace
        )
    }

    /// The element is eligible for the casing rule that treats
    /// single-character canonical names as always-uppercase (`Y`, `D`, `I`,
    /// `Q`, `W`).
    #[must_use]
    pub fn is_single_character(&self) -> bool {
        matches!(self, Self::Y | Self::D | Self::I | Self::Q | Self::W)
    }

    /// Whether this type is accepted by the parser (§4.D rule 1). The
    /// literal/whitespace elements are always parseable and are excluded
    /// from this check; callers test semantic elements only.
    #[must_use]
    pub fn is_parseable(&self) -> bool {
        matches!(
            self,
            Self::Y
                | Self::Yy
                | Self::Yyy
                | Self::Yyyy
                | Self::Rr
                | Self::Rrrr
                | Self::YCommaYyy
                | Self::Mm
                | Self::Mon
                | Self::Month
                | Self::Dd
                | Self::Ddd
                | Self::Hh
                | Self::Hh12
                | Self::Hh24
                | Self::Mi
                | Self::Ss
                | Self::Sssss
                | Self::Ff(_)
                | Self::Am
                | Self::Pm
                | Self::AmDotted
                | Self::PmDotted
                | Self::Tzh
                | Self::Tzm
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

/// How the original surface form of an element should influence the casing
/// of its rendered output (§4.C).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CasingPolicy {
    /// Literal elements: emit exactly what was matched.
    PreserveCase,
    /// Emit the rendered text fully uppercased.
    AllUpper,
    /// Emit the rendered text fully lowercased.
    AllLower,
    /// Uppercase only the first letter, lowercase the rest.
    OnlyFirstLetterUpper,
}

impl CasingPolicy {
    /// Apply this policy to a rendered field value.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::PreserveCase => text.to_string(),
            Self::AllUpper => text.to_uppercase(),
            Self::AllLower => text.to_lowercase(),
            Self::OnlyFirstLetterUpper => {
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            }
        }
    }
}

/// A single tokenized unit of a format string (§3 "Format Element").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatElement {
    /// The element's type.
    pub element_type: ElementType,
    /// Number of source bytes this element consumed from the format string.
    pub length_in_source: usize,
    /// Byte offset into the format string where this element starts.
    pub source_offset: usize,
    /// How to re-case the rendered output of this element.
    pub casing_policy: CasingPolicy,
}

impl FormatElement {
    /// The diagnostic name used in error messages: literal elements render
    /// quoted, everything else renders as `'TYPE_NAME'`.
    #[must_use]
    pub fn debug_name(&self) -> String {
        match &self.element_type {
            ElementType::SimpleLiteral(c) => format!("'{c}'"),
            ElementType::DoubleQuotedLiteral(text) => format!("'\"{text}\"'"),
            ElementType::Whitespace => format!("'{}'", " ".repeat(self.length_in_source)),
            other => format!("'{}'", other.canonical_name()),
        }
    }

    /// The category of the underlying element type.
    #[must_use]
    pub fn category(&self) -> Category {
        self.element_type.category()
    }
}
