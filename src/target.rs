//! The SQL target types a format string can be validated and evaluated
//! against, and the two validation modes from §4.D.

/// The SQL type a cast is targeting.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TargetType {
    /// `DATE`: year, month, day only.
    Date,
    /// `TIME`: hour, minute, second, meridian only.
    Time,
    /// `DATETIME`: date fields plus time fields, no time zone.
    Datetime,
    /// `TIMESTAMP`: every category, including time zone and era.
    Timestamp,
}

impl TargetType {
    /// The stable diagnostic name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Datetime => "DATETIME",
            Self::Timestamp => "TIMESTAMP",
        }
    }
}

/// Which direction a format string is being validated for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// The format string will be used to parse an input string.
    ParseOnly,
    /// The format string will be used to render a civil time.
    Format,
}
