//! Color value normalization shared by the extraction and mapping stages.
//!
//! Every color literal that enters the pipeline goes through
//! [`normalize_color`]; anything it rejects is dropped at the extraction
//! site and never propagated.

/// CSS-wide keywords and paint values that carry no concrete color.
const NON_COLOR_KEYWORDS: [&str; 8] = [
    "none",
    "inherit",
    "currentcolor",
    "initial",
    "unset",
    "revert",
    "transparent",
    "auto",
];

/// Normalize a CSS color literal to canonical uppercase `#RRGGBB`.
///
/// Accepts 3/6-digit hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`, and named
/// colors. Returns `None` for non-color paint keywords, `var()`
/// references, gradients, and anything the parser rejects.
#[must_use]
pub fn normalize_color(raw: &str) -> Option<String> {
    let mut trimmed = raw.trim().trim_end_matches(';').trim();
    if trimmed.to_lowercase().ends_with("!important") {
        trimmed = trimmed[..trimmed.len() - "!important".len()].trim();
    }
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_lowercase();
    if NON_COLOR_KEYWORDS.contains(&lowered.as_str()) {
        return None;
    }
    if lowered.contains("var(") || lowered.contains("gradient") || lowered.contains("url(") {
        return None;
    }
    let parsed = csscolorparser::parse(trimmed).ok()?;
    let [r, g, b, _] = parsed.to_rgba8();
    Some(format!("#{r:02X}{g:02X}{b:02X}"))
}

/// Whether a literal would survive [`normalize_color`].
#[must_use]
pub fn is_color_value(raw: &str) -> bool {
    normalize_color(raw).is_some()
}

/// Parse a normalized `#RRGGBB` string into channels.
#[must_use]
pub fn hex_channels(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Perceptual luminance of a normalized hex color, in [0, 1].
#[must_use]
pub fn luminance(hex: &str) -> f64 {
    let Some((r, g, b)) = hex_channels(hex) else {
        return 0.0;
    };
    (0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b)) / 255.0
}

/// Whether a normalized hex color reads as dark.
#[must_use]
pub fn is_dark(hex: &str) -> bool {
    luminance(hex) < 0.5
}

/// Euclidean distance between two normalized hex colors in RGB space.
///
/// Returns `f64::MAX` when either side fails to parse, so malformed input
/// never wins a nearest-color comparison.
#[must_use]
pub fn rgb_distance(lhs: &str, rhs: &str) -> f64 {
    let (Some(a), Some(b)) = (hex_channels(lhs), hex_channels(rhs)) else {
        return f64::MAX;
    };
    let dr = f64::from(a.0) - f64::from(b.0);
    let dg = f64::from(a.1) - f64::from(b.1);
    let db = f64::from(a.2) - f64::from(b.2);
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Absolute chroma in [0, 1]: the RGB max/min spread over the full range.
///
/// Unlike [`saturation`], dark near-grays stay near zero here, which is
/// what accent detection needs.
#[must_use]
pub fn chroma(hex: &str) -> f64 {
    let Some((r, g, b)) = hex_channels(hex) else {
        return 0.0;
    };
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    f64::from(max - min) / 255.0
}

/// Whether a color is vivid enough to be treated as an accent source.
#[must_use]
pub fn is_accent_like(hex: &str) -> bool {
    chroma(hex) >= 0.15
}

/// Color saturation in [0, 1], from the RGB max/min spread.
///
/// Near-gray values map to the neutral tiers rather than an accent.
#[must_use]
pub fn saturation(hex: &str) -> f64 {
    let Some((r, g, b)) = hex_channels(hex) else {
        return 0.0;
    };
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == 0 {
        return 0.0;
    }
    f64::from(max - min) / f64::from(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_common_forms() {
        assert_eq!(normalize_color("#1a73e8"), Some("#1A73E8".to_string()));
        assert_eq!(normalize_color("#abc"), Some("#AABBCC".to_string()));
        assert_eq!(
            normalize_color("rgb(255, 0, 0)"),
            Some("#FF0000".to_string())
        );
        assert_eq!(
            normalize_color("rgba(0, 128, 0, 0.5)"),
            Some("#008000".to_string())
        );
        assert_eq!(normalize_color("rebeccapurple"), Some("#663399".to_string()));
        assert_eq!(
            normalize_color("#fff !important"),
            Some("#FFFFFF".to_string())
        );
    }

    #[test]
    fn rejects_non_colors() {
        assert_eq!(normalize_color("none"), None);
        assert_eq!(normalize_color("inherit"), None);
        assert_eq!(normalize_color("currentColor"), None);
        assert_eq!(normalize_color("transparent"), None);
        assert_eq!(normalize_color("var(--brand)"), None);
        assert_eq!(normalize_color("linear-gradient(#fff, #000)"), None);
        assert_eq!(normalize_color("url(#pattern)"), None);
        assert_eq!(normalize_color("not-a-color"), None);
        assert_eq!(normalize_color(""), None);
    }

    #[test]
    fn luminance_orders_light_over_dark() {
        assert!(luminance("#FFFFFF") > 0.99);
        assert!(luminance("#000000") < 0.01);
        assert!(is_dark("#11111B"));
        assert!(!is_dark("#EFF1F5"));
    }

    #[test]
    fn distance_is_zero_on_identity() {
        assert_eq!(rgb_distance("#89B4FA", "#89B4FA"), 0.0);
        assert!(rgb_distance("#FF0000", "#00FF00") > 100.0);
        assert_eq!(rgb_distance("#FF0000", "oops"), f64::MAX);
    }

    #[test]
    fn saturation_separates_gray_from_accent() {
        assert!(saturation("#808080") < 0.05);
        assert!(saturation("#F38BA8") > 0.3);
    }

    #[test]
    fn chroma_keeps_dark_grays_neutral() {
        // High HSV saturation but visually near-black: not an accent.
        assert!(!is_accent_like("#0D1117"));
        assert!(is_accent_like("#1A73E8"));
        assert!(!is_accent_like("#9399B2"));
    }
}
