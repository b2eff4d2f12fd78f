//! Locale-aware ordering for key names.
//!
//! Approximates root-locale collation for the identifiers that appear in
//! config keys: letters compare case-insensitively first, punctuation sorts
//! before digits, digits before letters. Ties fall back to lower case before
//! upper case, then to code point order.

use std::cmp::Ordering;

/// Punctuation in root collation order.
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Primary weight: character class, then position within the class.
fn primary_weight(c: char) -> (u8, u32) {
    if c.is_whitespace() {
        return (0, 0);
    }
    if let Some(pos) = PUNCTUATION_ORDER.find(c) {
        return (1, pos as u32);
    }
    if let Some(digit) = c.to_digit(10) {
        return (2, digit);
    }
    if c.is_alphabetic() {
        let folded = c.to_lowercase().next().unwrap_or(c);
        return (3, folded as u32);
    }
    (4, c as u32)
}

/// Compare two strings the way a reader browsing the reference expects.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_weight)
        .cmp(b.chars().map(primary_weight))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}
