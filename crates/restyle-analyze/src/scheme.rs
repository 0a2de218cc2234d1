//! Page-level color-scheme detection and dominant/accent color extraction.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::debug;

use restyle_model::ColorScheme;
use restyle_model::color::{is_accent_like, is_dark, normalize_color};

use crate::css::{scan_rule_blocks, strip_comments};

/// Dominant colors reported per page.
const DOMINANT_LIMIT: usize = 8;

/// Accent candidates reported per page.
const ACCENT_LIMIT: usize = 6;

/// Decide whether the page presents as dark or light.
///
/// Signals, strongest first: an explicit `color-scheme` declaration or
/// meta tag, a `dark` class on the root element, and finally a vote over
/// root/body background luminance.
#[must_use]
pub fn detect_color_scheme(html: &str, css: &str) -> ColorScheme {
    let css = strip_comments(css);
    let scheme_decl = Regex::new(r"color-scheme\s*:\s*([a-z\s]+)").expect("scheme regex");
    if let Some(capture) = scheme_decl.captures(&css) {
        let value = capture[1].trim();
        if value.starts_with("dark") {
            return ColorScheme::Dark;
        }
        if value.starts_with("light") && !value.contains("dark") {
            return ColorScheme::Light;
        }
    }
    let meta = Regex::new(r#"name=["']color-scheme["']\s+content=["']([^"']+)"#)
        .expect("meta regex");
    if let Some(capture) = meta.captures(html) {
        if capture[1].contains("dark") {
            return ColorScheme::Dark;
        }
        return ColorScheme::Light;
    }
    let root_tag = Regex::new(r#"<(?:html|body)[^>]*class\s*=\s*["']([^"']*)["']"#)
        .expect("root class regex");
    if let Some(capture) = root_tag.captures(html)
        && capture[1]
            .split_whitespace()
            .any(|class| class == "dark" || class.contains("dark-"))
    {
        return ColorScheme::Dark;
    }

    let mut dark_votes = 0usize;
    let mut light_votes = 0usize;
    for block in scan_rule_blocks(&css) {
        let selector = block.selector.to_lowercase();
        let is_root = selector.contains(":root")
            || selector.split(',').any(|part| {
                let part = part.trim();
                part == "html" || part == "body"
            });
        if !is_root {
            continue;
        }
        let background =
            Regex::new(r"(?:^|[;{\s])background(?:-color)?\s*:\s*([^;}]+)").expect("bg regex");
        for capture in background.captures_iter(&block.body) {
            if let Some(hex) = normalize_color(&capture[1]) {
                if is_dark(&hex) {
                    dark_votes += 1;
                } else {
                    light_votes += 1;
                }
            }
        }
    }
    let scheme = if dark_votes > light_votes {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    };
    debug!(dark_votes, light_votes, "page scheme voted");
    scheme
}

/// Most frequent page colors, with branding hints prepended, plus the
/// saturated subset that reads as accent colors.
#[must_use]
pub fn extract_palette_signals(
    css: &str,
    branding: &[String],
) -> (Vec<String>, Vec<String>) {
    let css = strip_comments(css);
    let literal = Regex::new(
        r"#[0-9a-fA-F]{3,8}\b|rgba?\([^)]*\)|hsla?\([^)]*\)",
    )
    .expect("literal regex");
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for found in literal.find_iter(&css) {
        if let Some(hex) = normalize_color(found.as_str()) {
            *counts.entry(hex).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut dominant: Vec<String> = Vec::new();
    for hint in branding {
        if let Some(hex) = normalize_color(hint)
            && !dominant.contains(&hex)
        {
            dominant.push(hex);
        }
    }
    for (hex, _) in &ranked {
        if dominant.len() >= DOMINANT_LIMIT {
            break;
        }
        if !dominant.contains(hex) {
            dominant.push(hex.clone());
        }
    }

    let accents: Vec<String> = ranked
        .iter()
        .filter(|(hex, _)| is_accent_like(hex))
        .take(ACCENT_LIMIT)
        .map(|(hex, _)| hex.clone())
        .collect();

    (dominant, accents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_scheme_declaration_wins() {
        assert_eq!(
            detect_color_scheme("", ":root { color-scheme: dark light; }"),
            ColorScheme::Dark
        );
        assert_eq!(
            detect_color_scheme("", ":root { color-scheme: light; }"),
            ColorScheme::Light
        );
    }

    #[test]
    fn dark_root_class_wins() {
        let html = r#"<html class="dark js-enabled"><body></body></html>"#;
        assert_eq!(detect_color_scheme(html, ""), ColorScheme::Dark);
    }

    #[test]
    fn background_luminance_votes() {
        assert_eq!(
            detect_color_scheme("", "body { background: #0d1117; }"),
            ColorScheme::Dark
        );
        assert_eq!(
            detect_color_scheme("", "body { background: #ffffff; }"),
            ColorScheme::Light
        );
        assert_eq!(detect_color_scheme("", ""), ColorScheme::Light);
    }

    #[test]
    fn branding_hints_lead_dominant_colors() {
        let css = ".a { color: #333333; } .b { color: #333333; } .c { color: #ff0066; }";
        let (dominant, accents) =
            extract_palette_signals(css, &["#00aaff".to_string()]);
        assert_eq!(dominant[0], "#00AAFF");
        assert!(dominant.contains(&"#333333".to_string()));
        assert!(accents.contains(&"#FF0066".to_string()));
        assert!(!accents.contains(&"#333333".to_string()));
    }
}
