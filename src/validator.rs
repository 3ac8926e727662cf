//! Structural validation of a tokenized element list against a target type
//! and mode (§4.D).

use std::collections::HashSet;

use crate::element::{Category, ElementType, FormatElement};
use crate::error::AnalysisError;
use crate::target::{Mode, TargetType};

/// Validate `elements` for use with `target` in `mode`.
///
/// Runs the mode-independent structural checks first (duplicate elements,
/// duplicate categories, mutual exclusions, coexistence requirements), then
/// the mode-specific checks (parseability in [`Mode::ParseOnly`],
/// per-target-type category restrictions in [`Mode::Format`]).
pub fn validate(
    elements: &[FormatElement],
    target: TargetType,
    mode: Mode,
) -> Result<(), AnalysisError> {
    if mode == Mode::ParseOnly {
        check_parseable(elements)?;
    }

    check_no_duplicate_elements(elements)?;
    check_no_duplicate_categories(elements)?;
    check_mutual_exclusions(elements)?;
    check_coexistence(elements)?;

    if mode == Mode::Format {
        check_target_type_restrictions(elements, target)?;
    }

    Ok(())
}

fn check_parseable(elements: &[FormatElement]) -> Result<(), AnalysisError> {
    for element in elements {
        if element.element_type.is_literal() {
            continue;
        }
        if !element.element_type.is_parseable() {
            return Err(AnalysisError::NotSupportedForParsing {
                element: element.debug_name(),
            });
        }
    }
    Ok(())
}

fn check_no_duplicate_elements(elements: &[FormatElement]) -> Result<(), AnalysisError> {
    let mut seen: HashSet<&ElementType> = HashSet::new();
    for element in elements {
        if element.element_type.is_literal() {
            continue;
        }
        if !seen.insert(&element.element_type) {
            return Err(AnalysisError::DuplicateElement {
                element: element.debug_name(),
            });
        }
    }
    Ok(())
}

const DEDUPLICATED_CATEGORIES: &[Category] = &[
    Category::Meridian,
    Category::Year,
    Category::Month,
    Category::Day,
    Category::Hour,
    Category::Minute,
];

fn check_no_duplicate_categories(elements: &[FormatElement]) -> Result<(), AnalysisError> {
    for &category in DEDUPLICATED_CATEGORIES {
        let count = elements
            .iter()
            .filter(|e| !e.element_type.is_literal() && e.category() == category)
            .count();
        if count > 1 {
            return Err(AnalysisError::DuplicateCategory {
                category: category.name(),
            });
        }
    }
    Ok(())
}

fn has_category(elements: &[FormatElement], category: Category) -> bool {
    elements
        .iter()
        .any(|e| !e.element_type.is_literal() && e.category() == category)
}

fn find(elements: &[FormatElement], element_type: &ElementType) -> Option<&FormatElement> {
    elements
        .iter()
        .find(|e| &e.element_type == element_type)
}

fn check_mutual_exclusions(elements: &[FormatElement]) -> Result<(), AnalysisError> {
    if let Some(ddd) = find(elements, &ElementType::Ddd) {
        if has_category(elements, Category::Month) {
            return Err(AnalysisError::MutuallyExclusive {
                element: ddd.debug_name(),
                excluded_category: Category::Month.name(),
            });
        }
    }

    if let Some(hh24) = find(elements, &ElementType::Hh24) {
        if has_category(elements, Category::Meridian) {
            return Err(AnalysisError::MutuallyExclusive {
                element: hh24.debug_name(),
                excluded_category: Category::Meridian.name(),
            });
        }
    }

    if let Some(sssss) = find(elements, &ElementType::Sssss) {
        if has_category(elements, Category::Hour) {
            return Err(AnalysisError::MutuallyExclusive {
                element: sssss.debug_name(),
                excluded_category: Category::Hour.name(),
            });
        }
        if has_category(elements, Category::Minute) {
            return Err(AnalysisError::MutuallyExclusive {
                element: sssss.debug_name(),
                excluded_category: Category::Minute.name(),
            });
        }
        if find(elements, &ElementType::Ss).is_some() {
            return Err(AnalysisError::MutuallyExclusive {
                element: sssss.debug_name(),
                excluded_category: Category::Second.name(),
            });
        }
    }

    Ok(())
}

fn check_coexistence(elements: &[FormatElement]) -> Result<(), AnalysisError> {
    let hh_like = find(elements, &ElementType::Hh).or_else(|| find(elements, &ElementType::Hh12));
    let meridian = elements
        .iter()
        .find(|e| !e.element_type.is_literal() && e.category() == Category::Meridian);

    if let Some(hh) = hh_like {
        if meridian.is_none() {
            return Err(AnalysisError::MissingCoexistencePartner {
                category: Category::Meridian.name(),
                element: hh.debug_name(),
            });
        }
    }

    if let Some(meridian) = meridian {
        if hh_like.is_none() {
            return Err(AnalysisError::MissingCoexistencePartner {
                category: Category::Hour.name(),
                element: meridian.debug_name(),
            });
        }
    }

    Ok(())
}

fn allowed_categories(target: TargetType) -> &'static [Category] {
    match target {
        TargetType::Date => &[Category::Literal, Category::Year, Category::Month, Category::Day],
        TargetType::Time => &[
            Category::Literal,
            Category::Hour,
            Category::Minute,
            Category::Second,
            Category::Meridian,
        ],
        TargetType::Datetime => &[
            Category::Literal,
            Category::Year,
            Category::Month,
            Category::Day,
            Category::Hour,
            Category::Minute,
            Category::Second,
            Category::Meridian,
        ],
        TargetType::Timestamp => &[
            Category::Literal,
            Category::Year,
            Category::Month,
            Category::Day,
            Category::Hour,
            Category::Minute,
            Category::Second,
            Category::Meridian,
            Category::TimeZone,
            Category::Century,
            Category::Quarter,
            Category::Week,
            Category::Era,
            Category::Misc,
        ],
    }
}

fn check_target_type_restrictions(
    elements: &[FormatElement],
    target: TargetType,
) -> Result<(), AnalysisError> {
    let allowed = allowed_categories(target);
    for element in elements {
        let category = element.category();
        if !allowed.contains(&category) {
            return Err(AnalysisError::DisallowedForTargetType {
                element: element.debug_name(),
                target: target.name(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn validate_str(
        format: &str,
        target: TargetType,
        mode: Mode,
    ) -> Result<(), AnalysisError> {
        let elements = tokenize(format).unwrap();
        validate(&elements, target, mode)
    }

    #[test]
    fn full_timestamp_format_is_valid_for_parsing() {
        assert!(validate_str(
            "YYYY-MM-DD HH24:MI:SS",
            TargetType::Timestamp,
            Mode::ParseOnly
        )
        .is_ok());
    }

    #[test]
    fn hh12_without_meridian_requires_partner() {
        let err = validate_str("HH12:MI", TargetType::Timestamp, Mode::ParseOnly).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MissingCoexistencePartner {
                category: "MERIDIAN_INDICATOR",
                element: "'HH12'".to_string(),
            }
        );
    }

    #[test]
    fn meridian_without_hh12_requires_partner() {
        let err = validate_str("AM:MI", TargetType::Timestamp, Mode::ParseOnly).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MissingCoexistencePartner {
                category: "HOUR",
                element: "'AM'".to_string(),
            }
        );
    }

    #[test]
    fn hh24_with_meridian_is_mutually_exclusive() {
        let err = validate_str("HH24 AM", TargetType::Timestamp, Mode::ParseOnly).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MutuallyExclusive {
                element: "'HH24'".to_string(),
                excluded_category: "MERIDIAN_INDICATOR",
            }
        );
    }

    #[test]
    fn date_target_rejects_hour_elements_in_format_mode() {
        let err = validate_str("YYYY-MM-DD HH24", TargetType::Date, Mode::Format).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::DisallowedForTargetType { .. }
        ));
    }

    #[test]
    fn duplicate_element_is_rejected_case_insensitively() {
        let err = validate_str("MI YY MI", TargetType::Timestamp, Mode::Format).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::DuplicateElement {
                element: "'MI'".to_string()
            }
        );
    }

    #[test]
    fn ddd_excludes_month_category() {
        let err = validate_str("DDD MM", TargetType::Timestamp, Mode::Format).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MutuallyExclusive {
                element: "'DDD'".to_string(),
                excluded_category: "MONTH",
            }
        );
    }

    #[test]
    fn sssss_excludes_hour_minute_and_ss() {
        let err = validate_str("SSSSS HH24", TargetType::Timestamp, Mode::Format).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MutuallyExclusive {
                element: "'SSSSS'".to_string(),
                excluded_category: "HOUR",
            }
        );
    }
}
