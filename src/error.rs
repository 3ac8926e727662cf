//! Error taxonomy for the format-element engine.
//!
//! Every fallible operation in this crate returns one of the two channels
//! described here: an [`AnalysisError`] for anything wrong with the format
//! string itself (tokenization, validation, zone lookup), or an
//! [`EvaluationError`] for anything wrong with a concrete parse against a
//! concrete input. [`CastError`] joins the two for the entry points in
//! [`crate::cast`].

use std::fmt;

/// An error raised while tokenizing or validating a format string, or while
/// resolving a time zone name. Maps to `INVALID_ARGUMENT` at the SQL layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No format element could be matched at the given byte offset.
    NoMatchingElement {
        /// Byte offset into the format string.
        offset: usize,
    },
    /// A `\` escape inside a double-quoted literal was not `\\` or `\"`.
    UnsupportedEscapeSequence {
        /// Byte offset of the offending escape.
        offset: usize,
        /// The character that followed the backslash.
        character: char,
    },
    /// A double-quoted literal was never closed before the end of the
    /// format string.
    UnterminatedQuotedLiteral {
        /// Byte offset of the opening quote.
        offset: usize,
    },
    /// An element is syntactically valid but not in the parseable subset.
    NotSupportedForParsing {
        /// Debug name of the offending element, e.g. `'DAY'`.
        element: String,
    },
    /// The same element type appears more than once in the format string.
    DuplicateElement {
        /// Debug name of the offending element.
        element: String,
    },
    /// Two elements from a category that must appear at most once both
    /// appear in the format string.
    DuplicateCategory {
        /// Name of the category, e.g. `"YEAR"`.
        category: &'static str,
    },
    /// Two mutually exclusive elements (or an element and a category) were
    /// both present.
    MutuallyExclusive {
        /// Debug name of the element that triggered the exclusion.
        element: String,
        /// Name of the category it excludes.
        excluded_category: &'static str,
    },
    /// An element requires a coexisting element from another category that
    /// is missing.
    MissingCoexistencePartner {
        /// Name of the required category, e.g. `"MERIDIAN_INDICATOR"`.
        category: &'static str,
        /// Debug name of the element that requires it.
        element: String,
    },
    /// An element's category is not allowed for the requested target type.
    DisallowedForTargetType {
        /// Debug name of the offending element.
        element: String,
        /// Name of the target type, e.g. `"DATE"`.
        target: &'static str,
    },
    /// The time zone name could not be resolved.
    UnresolvableTimeZone {
        /// The name as supplied by the caller.
        name: String,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatchingElement { offset } => {
                write!(f, "Cannot find matched format element at offset {offset}")
            }
            Self::UnsupportedEscapeSequence { offset, character } => {
                write!(
                    f,
                    "Unsupported escape sequence '\\{character}' in text at offset {offset}"
                )
            }
            Self::UnterminatedQuotedLiteral { offset } => {
                write!(
                    f,
                    "Cannot find matching '\"' for quoted literal starting at offset {offset}"
                )
            }
            Self::NotSupportedForParsing { element } => {
                write!(f, "Format element {element} is not supported for parsing")
            }
            Self::DuplicateElement { element } => {
                write!(f, "Duplicate format element {element}")
            }
            Self::DuplicateCategory { category } => {
                write!(f, "Duplicate format element in category {category}")
            }
            Self::MutuallyExclusive {
                element,
                excluded_category,
            } => write!(
                f,
                "Format element {element} cannot coexist with a format element in category {excluded_category}"
            ),
            Self::MissingCoexistencePartner { category, element } => write!(
                f,
                "Format element in category {category} is required when format element {element} exists"
            ),
            Self::DisallowedForTargetType { element, target } => write!(
                f,
                "Format element {element} is not allowed for target type {target}"
            ),
            Self::UnresolvableTimeZone { name } => {
                write!(f, "Unrecognized time zone name {name:?}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

/// An error raised while evaluating a validated format string against a
/// concrete input string or civil time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// The input string did not match the expected format element at the
    /// given offset.
    ParseMismatch {
        /// Byte offset into the input string.
        offset: usize,
        /// Debug name of the format element that failed to match.
        element: String,
    },
    /// Input remained after every format element was consumed.
    TrailingData {
        /// The non-whitespace data that was left over.
        data: String,
    },
    /// Format elements remained after the input string was exhausted.
    UnconsumedElement {
        /// Debug name of the first unconsumed element.
        element: String,
    },
    /// The parsed year/month/day/hour/minute/second fields do not form a
    /// valid civil time (e.g. February 29 in a non-leap year).
    InvalidCivilResult,
    /// The resulting instant falls outside the range this engine supports.
    OutOfRange,
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseMismatch { offset, element } => write!(
                f,
                "Failed to parse input timestamp string at {offset} with format element {element}"
            ),
            Self::TrailingData { data } => write!(
                f,
                "Illegal non-space trailing data {data:?} in timestamp string"
            ),
            Self::UnconsumedElement { element } => write!(
                f,
                "Entire timestamp string has been parsed before dealing with format element {element}"
            ),
            Self::InvalidCivilResult => {
                write!(f, "Invalid result from year, month, day values after parsing")
            }
            Self::OutOfRange => write!(f, "Parsed timestamp is out of the supported range"),
        }
    }
}

impl std::error::Error for EvaluationError {}

/// The union of both error channels, returned at the public cast entry
/// points in [`crate::cast`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastError {
    /// Something was wrong with the format string or zone name.
    Analysis(AnalysisError),
    /// The format string was fine, but evaluation against the input failed.
    Evaluation(EvaluationError),
}

impl From<AnalysisError> for CastError {
    fn from(err: AnalysisError) -> Self {
        Self::Analysis(err)
    }
}

impl From<EvaluationError> for CastError {
    fn from(err: EvaluationError) -> Self {
        Self::Evaluation(err)
    }
}

impl fmt::Display for CastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Analysis(err) => fmt::Display::fmt(err, f),
            Self::Evaluation(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for CastError {}
