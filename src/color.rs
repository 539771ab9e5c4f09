//! Color utilities for layout styling.
//!
//! Invalid input never errors: non-hex strings pass through unchanged so a
//! caller holding `rgba(...)` or a named color can feed it straight back
//! into a style sheet.

/// RGB channel triple parsed from a hex color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Check whether a string is a 3- or 6-digit hex color code (leading `#` required).
pub fn is_hex_color_code(hex: &str) -> bool {
    let Some(digits) = hex.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn expand_shorthand(digits: &str) -> String {
    if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    }
}

/// Parse a hex color into its channels. Invalid input yields black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    if !is_hex_color_code(hex) {
        return Rgb::default();
    }
    let digits = expand_shorthand(hex.trim_start_matches('#'));
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).unwrap_or_default()
    };
    Rgb {
        r: channel(0..2),
        g: channel(2..4),
        b: channel(4..6),
    }
}

/// Convert a hex color to an `rgba(r, g, b, opacity)` string.
///
/// Non-hex input is returned unchanged (it may already be a named color or
/// an `rgba()` value). Opacity is clamped to `[0, 1]`.
pub fn hex_to_rgba(hex: &str, opacity: f64) -> String {
    let hex = hex.trim();
    if hex.is_empty() {
        return "rgba(0, 0, 0, 0)".to_string();
    }
    if !is_hex_color_code(hex) {
        return hex.to_string();
    }
    let Rgb { r, g, b } = hex_to_rgb(hex);
    let opacity = opacity.clamp(0.0, 1.0);
    format!("rgba({}, {}, {}, {})", r, g, b, opacity)
}

/// Pick black or white text for a given background color.
///
/// Uses the standard 0.299/0.587/0.114 perceptual luminance weighting.
pub fn contrast_color(background: &str) -> &'static str {
    let Rgb { r, g, b } = hex_to_rgb(background);
    let luminance = (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0;
    if luminance > 0.5 {
        "#000000"
    } else {
        "#ffffff"
    }
}

/// Lighten (positive amount) or darken (negative amount) a hex color.
///
/// Channels clamp at 0 and 255. Non-hex input passes through unchanged.
pub fn adjust_brightness(hex: &str, amount: i32) -> String {
    if !is_hex_color_code(hex) {
        return hex.to_string();
    }
    let Rgb { r, g, b } = hex_to_rgb(hex);
    let adjust = |value: u8| (i32::from(value) + amount).clamp(0, 255) as u8;
    format!("#{:02x}{:02x}{:02x}", adjust(r), adjust(g), adjust(b))
}

/// Convert HSL (h in degrees, s/l in percent) to a hex color string.
pub fn hsl_to_hex(h: u32, s: u32, l: u32) -> String {
    let h = f64::from(h % 360);
    let l = f64::from(l) / 100.0;
    let a = f64::from(s) * l.min(1.0 - l) / 100.0;
    let f = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        let color = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * color).round() as u8
    };
    format!("#{:02x}{:02x}{:02x}", f(0.0), f(8.0), f(4.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_detection() {
        assert!(is_hex_color_code("#fff"));
        assert!(is_hex_color_code("#00FF00"));
        assert!(!is_hex_color_code("fff"));
        assert!(!is_hex_color_code("#ffff"));
        assert!(!is_hex_color_code("#ggg"));
    }

    #[test]
    fn test_hex_to_rgba_roundtrip() {
        assert_eq!(hex_to_rgba("#ff0000", 0.5), "rgba(255, 0, 0, 0.5)");
        assert_eq!(hex_to_rgba("#f00", 1.0), "rgba(255, 0, 0, 1)");
    }

    #[test]
    fn test_hex_to_rgba_passthrough() {
        // Not hex: assumed to already be a usable CSS color
        assert_eq!(hex_to_rgba("rebeccapurple", 0.2), "rebeccapurple");
        assert_eq!(hex_to_rgba("", 0.2), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn test_opacity_clamped() {
        assert_eq!(hex_to_rgba("#000000", 7.0), "rgba(0, 0, 0, 1)");
        assert_eq!(hex_to_rgba("#000000", -1.0), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn test_contrast_color() {
        assert_eq!(contrast_color("#ffffff"), "#000000");
        assert_eq!(contrast_color("#000000"), "#ffffff");
        assert_eq!(contrast_color("#007bff"), "#ffffff");
    }

    #[test]
    fn test_adjust_brightness_clamps() {
        assert_eq!(adjust_brightness("#000000", -10), "#000000");
        assert_eq!(adjust_brightness("#ffffff", 10), "#ffffff");
        assert_eq!(adjust_brightness("#808080", 16), "#909090");
        assert_eq!(adjust_brightness("not-a-color", 16), "not-a-color");
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_hex(0, 100, 50), "#ff0000");
        assert_eq!(hsl_to_hex(120, 100, 50), "#00ff00");
        assert_eq!(hsl_to_hex(240, 100, 50), "#0000ff");
    }
}
