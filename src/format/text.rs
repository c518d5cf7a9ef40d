//! Text normalization helpers

use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Upper-case the first character of the trimmed text and lower-case the
/// rest.
///
/// ```
/// use docx_restyle::format::sentence_case;
///
/// assert_eq!(sentence_case("  SEMESTER I "), "Semester i");
/// ```
pub fn sentence_case(text: &str) -> String {
    let mut chars = text.trim().chars();
    match chars.next() {
        Some(first) => {
            let mut result: String = first.to_uppercase().collect();
            result.push_str(&chars.as_str().to_lowercase());
            result
        }
        None => String::new(),
    }
}

/// Whether the trimmed text is a number, date or time: non-empty and made
/// only of decimal digits (any script) and `.`, `-`, `/`, `:`
pub fn is_numeric_only(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty()
        && text.chars().all(|c| {
            matches!(c, '.' | '-' | '/' | ':')
                || c.general_category() == GeneralCategory::DecimalNumber
        })
}
