//! Card data validation and sanitization.
//!
//! Validation reports problems, it never fails: the renderer degrades to
//! whatever data is usable instead of refusing to draw. Sanitization is
//! defense-in-depth before markup insertion, not a substitute for output
//! encoding at render time.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde_json::Value;

use crate::card::{CardData, ContactEntry};

/// Structural validation outcome. `valid` is false iff `errors` is non-empty.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([A-Fa-f0-9]{3}){1,2}$").expect("hex color pattern")
});
static RGB_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*\d+\s*,\s*\d+\s*,\s*\d+\s*(,\s*[\d.]+)?\s*\)$")
        .expect("rgb color pattern")
});
static HSL_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^hsla?\(\s*\d+\s*,\s*\d+%\s*,\s*\d+%\s*(,\s*[\d.]+)?\s*\)$")
        .expect("hsl color pattern")
});
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern")
});
// Any scheme followed by a non-space body, with or without `//`: covers
// https://, mailto:, tel:, data: alike.
static ABSOLUTE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:\S+$").expect("absolute url pattern")
});
static RELATIVE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(//|/|\./)").expect("relative url pattern")
});
static BARE_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{1,61}[a-zA-Z0-9]\.[a-zA-Z]{2,}")
        .expect("bare domain pattern")
});
static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script>").expect("script block pattern")
});
static JS_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("javascript scheme pattern"));
static INLINE_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)on\w+\s*=").expect("inline handler pattern"));

const NAMED_COLORS: &[&str] = &[
    "black", "white", "red", "green", "blue", "yellow", "orange", "purple", "pink", "brown",
    "gray", "grey", "cyan", "magenta", "lime", "navy", "maroon", "olive", "teal", "silver",
    "aqua", "fuchsia", "transparent",
];

/// Accepts 3/6-digit hex, `rgb[a]()`, `hsl[a]()`, and a small named set.
pub fn is_valid_color(color: &str) -> bool {
    if color.is_empty() {
        return false;
    }
    HEX_COLOR.is_match(color)
        || RGB_COLOR.is_match(color)
        || HSL_COLOR.is_match(color)
        || NAMED_COLORS.contains(&color.to_lowercase().as_str())
}

/// Syntactic URL check: absolute with scheme (slashes optional, so
/// `mailto:` and `data:` URIs pass), protocol-relative, relative path, or
/// bare domain.
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    ABSOLUTE_URL.is_match(url) || RELATIVE_URL.is_match(url) || BARE_DOMAIN.is_match(url)
}

/// Loose email shape check; intentionally not RFC-complete.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// A phone number is plausible when it has 7-15 digits after stripping
/// separators.
pub fn is_valid_phone(phone: &str) -> bool {
    if phone.is_empty() {
        return false;
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits)
}

fn check_entries(field: &str, entries: &[ContactEntry], errors: &mut Vec<String>) {
    for (index, entry) in entries.iter().enumerate() {
        if entry.value.trim().is_empty() {
            errors.push(format!("{field}[{index}] must have a value property"));
        }
    }
}

/// Structural validation of a card record.
///
/// Never fails: callers decide whether to warn or block on the report.
pub fn validate_card_data(data: &CardData) -> ValidationReport {
    let mut errors = Vec::new();

    if !data.has_any_name() {
        errors.push(
            "At least one name field (first_name, last_name, or name) is required".to_string(),
        );
    }

    check_entries("phone_v2", &data.phone_v2, &mut errors);
    check_entries("email_v2", &data.email_v2, &mut errors);
    check_entries("website_v2", &data.website_v2, &mut errors);
    check_entries("custom_fields", &data.custom_fields, &mut errors);

    let colors = [
        ("background_color", &data.customizations.background_color),
        ("icon_color", &data.customizations.icon_color),
        ("button_color", &data.customizations.button_color),
    ];
    for (field, color) in colors {
        if let Some(color) = color.as_deref() {
            if !color.is_empty() && !is_valid_color(color) {
                errors.push(format!("Invalid color format for {field}: {color}"));
            }
        }
    }

    let urls = [
        ("logo_url", &data.logo_url),
        ("user_image_url", &data.user_image_url),
    ];
    for (field, url) in urls {
        if let Some(url) = url.as_deref() {
            if !url.is_empty() && !is_valid_url(url) {
                errors.push(format!("Invalid URL format for {field}: {url}"));
            }
        }
    }

    for (index, email) in data.email_v2.iter().enumerate() {
        let value = email.value.trim();
        if !value.is_empty() && !is_valid_email(value) {
            errors.push(format!("Invalid email format in email_v2[{index}]: {value}"));
        }
    }

    ValidationReport::from_errors(errors)
}

/// Validation entry point for untyped JSON: rejects non-object top-level
/// input, then defers to the typed check.
pub fn validate_card_json(value: &Value) -> ValidationReport {
    let Value::Object(_) = value else {
        return ValidationReport::from_errors(vec![
            "Card data must be a valid object".to_string(),
        ]);
    };
    match serde_json::from_value::<CardData>(value.clone()) {
        Ok(card) => validate_card_data(&card),
        Err(err) => ValidationReport::from_errors(vec![format!("Malformed card data: {err}")]),
    }
}

fn sanitize_string(input: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(input, "");
    let without_scheme = JS_SCHEME.replace_all(&without_scripts, "");
    INLINE_HANDLER.replace_all(&without_scheme, "").into_owned()
}

fn sanitize_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_string(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, sanitize_value(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Deep-clone the card and strip script blocks, `javascript:` prefixes, and
/// inline event-handler patterns from every string value, including unknown
/// `extra` fields.
pub fn sanitize_card_data(data: &CardData) -> CardData {
    let Ok(value) = serde_json::to_value(data) else {
        return data.clone();
    };
    let sanitized = sanitize_value(value);
    serde_json::from_value(sanitized).unwrap_or_else(|_| data.clone())
}
