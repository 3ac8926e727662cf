//! Derives the casing policy (§4.C) for a tokenized element from the
//! original bytes of its surface form in the format string.

use crate::element::{Category, CasingPolicy, ElementType};

/// Infer the casing policy for a non-literal element from the original
/// (not upper-cased) text it matched.
///
/// `original` is the exact slice of the format string the element
/// consumed, before any case-folding performed for matching purposes.
#[must_use]
pub fn infer_casing_policy(original: &str, element_type: &ElementType) -> CasingPolicy {
    if element_type.is_literal() {
        return CasingPolicy::PreserveCase;
    }

    let mut chars = original.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return CasingPolicy::AllUpper,
    };

    if first.is_lowercase() {
        return CasingPolicy::AllLower;
    }

    let always_upper = matches!(
        element_type.category(),
        Category::Meridian | Category::Era
    ) || element_type.is_single_character()
        || matches!(element_type, ElementType::YCommaYyy);

    if always_upper {
        return CasingPolicy::AllUpper;
    }

    match chars.next() {
        Some(second) if second.is_lowercase() => CasingPolicy::OnlyFirstLetterUpper,
        _ => CasingPolicy::AllUpper,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_surface_form_is_all_lower() {
        assert_eq!(
            infer_casing_policy("month", &ElementType::Month),
            CasingPolicy::AllLower
        );
    }

    #[test]
    fn mixed_case_surface_form_is_first_letter_upper() {
        assert_eq!(
            infer_casing_policy("Month", &ElementType::Month),
            CasingPolicy::OnlyFirstLetterUpper
        );
    }

    #[test]
    fn all_caps_surface_form_is_all_upper() {
        assert_eq!(
            infer_casing_policy("MONTH", &ElementType::Month),
            CasingPolicy::AllUpper
        );
    }

    #[test]
    fn meridian_is_always_all_upper_even_with_lowercase_second_letter() {
        assert_eq!(
            infer_casing_policy("Am", &ElementType::Am),
            CasingPolicy::AllUpper
        );
    }

    #[test]
    fn single_character_element_is_always_all_upper() {
        assert_eq!(
            infer_casing_policy("Y", &ElementType::Y),
            CasingPolicy::AllUpper
        );
    }

    #[test]
    fn y_comma_yyy_is_always_all_upper() {
        assert_eq!(
            infer_casing_policy("Y,yyy", &ElementType::YCommaYyy),
            CasingPolicy::AllUpper
        );
    }

    #[test]
    fn literal_elements_preserve_case() {
        assert_eq!(
            infer_casing_policy("-", &ElementType::SimpleLiteral('-')),
            CasingPolicy::PreserveCase
        );
    }
}
