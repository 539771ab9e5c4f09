//! Initials extraction for avatar placeholders.

use crate::card::CardData;
use crate::color::hsl_to_hex;

/// Fallback initials when no usable name exists.
pub const DEFAULT_INITIALS: &str = "UN";

/// Append the uppercase form of the first character, including multi-char
/// Unicode mappings.
fn push_first_upper(initials: &mut String, s: &str) {
    if let Some(c) = s.chars().next() {
        initials.extend(c.to_uppercase());
    }
}

/// Extract initials from first and last name (at most two characters).
///
/// Returns [`DEFAULT_INITIALS`] when both inputs are empty or whitespace.
pub fn get_initials(first_name: &str, last_name: &str) -> String {
    let first = first_name.trim();
    let last = last_name.trim();

    if first.is_empty() && last.is_empty() {
        return DEFAULT_INITIALS.to_string();
    }

    let mut initials = String::new();
    push_first_upper(&mut initials, first);
    push_first_upper(&mut initials, last);
    initials
}

/// Extract initials from a single full-name string.
///
/// A single word yields its first two characters; multiple words yield the
/// first character of the first and last word.
pub fn initials_from_full_name(full_name: &str) -> String {
    let parts: Vec<&str> = full_name.split_whitespace().collect();

    match parts.as_slice() {
        [] => DEFAULT_INITIALS.to_string(),
        [only] => only.chars().take(2).flat_map(char::to_uppercase).collect(),
        [first, .., last] => {
            let mut initials = String::new();
            push_first_upper(&mut initials, first);
            push_first_upper(&mut initials, last);
            initials
        }
    }
}

/// Initials with the full fallback chain: personal name, then the flattened
/// `name` field, then company name.
pub fn initials_with_fallback(card: &CardData) -> String {
    let first = card.first_name.as_deref().unwrap_or_default();
    let last = card.last_name.as_deref().unwrap_or_default();
    if !first.trim().is_empty() || !last.trim().is_empty() {
        return get_initials(first, last);
    }

    if let Some(name) = card.extra.get("name").and_then(|v| v.as_str()) {
        if !name.trim().is_empty() {
            return initials_from_full_name(name);
        }
    }

    if let Some(company) = card.company.as_deref() {
        if !company.trim().is_empty() {
            return initials_from_full_name(company);
        }
    }

    DEFAULT_INITIALS.to_string()
}

/// Deterministic background color for an initials avatar.
///
/// Same name always yields the same color; distinct names spread over the
/// HSL hue circle at fixed saturation and lightness.
pub fn initials_background_color(name: &str) -> String {
    if name.is_empty() {
        return "#007bff".to_string();
    }

    // Classic `c + (h << 5) - h` string hash; cheap and stable.
    let mut hash: i32 = 0;
    for c in name.chars() {
        hash = (c as i32).wrapping_add((hash << 5).wrapping_sub(hash));
    }

    let hue = hash.unsigned_abs() % 360;
    hsl_to_hex(hue, 65, 50)
}
