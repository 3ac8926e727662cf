#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(unknown_lints)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_op_in_unsafe_fn)]
#![warn(unused_qualifications)]
// Enable feature callouts in generated documentation:
// https://doc.rust-lang.org/beta/unstable-book/language-features/doc-cfg.html
//
// This approach is borrowed from tokio.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, feature(doc_alias))]

/*!
This crate implements the tokenizer, validator, parser, and formatter for SQL
`CAST(... AS ... FORMAT fmt)` date and time format elements.

A format string such as `"YYYY-MM-DD"` or `"HH12:MI AM"` is built out of a
closed vocabulary of format elements (see [`element::ElementType`]). This
crate's job is to:

1. [Tokenize](tokenizer::tokenize) a format string into a sequence of
   [`element::FormatElement`]s using maximal munch, honoring double-quoted
   literals and whitespace runs.
2. [Validate](validator::validate) that sequence against the target SQL type
   and the direction (parsing an input string, or formatting a civil time)
   the format string will be used for.
3. Either [parse](parser::parse) an input string into an absolute instant, or
   [format](formatter::format) a civil time into a string, driven by the
   validated element sequence.

The [`cast`] module exposes the public entry points that chain these steps
together for each `CAST` direction a caller needs.

## Example

```
use chrono::{TimeZone, Utc};
use sql_format_elements::cast::{cast_format_timestamp_to_string, cast_string_to_timestamp};

let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
let parsed = cast_string_to_timestamp("YYYY-MM-DD HH24:MI:SS", "2021-07-04 13:30:00", "UTC", now)?;
let rendered = cast_format_timestamp_to_string("MONTH DD, YYYY", parsed, "UTC")?;
assert_eq!(rendered, "JULY 04, 2021");
# Ok::<(), sql_format_elements::error::CastError>(())
```
*/

pub mod cast;
pub mod casing;
pub mod civil;
pub mod element;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod strftime_like;
pub mod target;
pub mod tokenizer;
pub mod validator;
mod week;

pub use cast::{
    cast_format_date_to_string, cast_format_datetime_to_string,
    cast_format_time_to_string, cast_format_timestamp_to_string, cast_string_to_date,
    cast_string_to_datetime, cast_string_to_time, cast_string_to_timestamp,
    validate_format_string_for_formatting, validate_format_string_for_parsing,
};
pub use civil::CivilClock;
pub use element::{Category, CasingPolicy, ElementType, FormatElement};
pub use error::{AnalysisError, CastError, EvaluationError};
pub use target::{Mode, TargetType};
