//! Inline and CSS-embedded SVG color extraction.

use std::collections::BTreeSet;

use regex::Regex;
use tracing::debug;

use restyle_model::color::normalize_color;
use restyle_model::{SvgColorFact, SvgInfo, SvgLocation, SvgPaint, SvgPurpose};

use crate::css::{scan_rule_blocks, strip_comments};

/// How far back to look for an owning `class="..."` attribute.
const OWNER_WINDOW: usize = 500;

/// Structural-prefix length used for deduplication fingerprints.
const FINGERPRINT_PREFIX: usize = 100;

/// Find every SVG on the page and extract its paint colors.
///
/// Covers inline `<svg>` elements and URL-encoded `data:image/svg+xml`
/// payloads in CSS backgrounds. Base64 payloads are skipped: the source
/// convention is percent-encoding, and an undecodable payload is just an
/// absent fact.
#[must_use]
pub fn analyze_svgs(html: &str, css: &str) -> Vec<SvgInfo> {
    let mut svgs = Vec::new();
    collect_inline(html, &mut svgs);
    collect_background(css, &mut svgs);
    let deduped = dedupe(svgs);
    debug!(count = deduped.len(), "extracted svg facts");
    deduped
}

fn collect_inline(html: &str, svgs: &mut Vec<SvgInfo>) {
    let svg_block = Regex::new(r"(?s)<svg\b[^>]*>.*?</svg>").expect("svg regex");
    for found in svg_block.find_iter(html) {
        let markup = found.as_str();
        let colors = extract_colors(markup);
        if colors.is_empty() {
            continue;
        }
        let owner = owner_guess(html, found.start());
        let purpose = classify_purpose(owner.as_deref(), markup);
        let (width, height) = dimensions(markup);
        svgs.push(SvgInfo {
            location: SvgLocation::Inline,
            owner,
            purpose,
            markup: markup.to_string(),
            colors,
            width,
            height,
        });
    }
}

fn collect_background(css: &str, svgs: &mut Vec<SvgInfo>) {
    let css = strip_comments(css);
    let data_uri = Regex::new(
        r#"background(?:-image)?\s*:\s*url\(\s*["']?data:image/svg\+xml([^"')]*)"#,
    )
    .expect("data uri regex");
    for block in scan_rule_blocks(&css) {
        for capture in data_uri.captures_iter(&block.body) {
            let payload = &capture[1];
            let Some(markup) = decode_payload(payload) else {
                continue;
            };
            let colors = extract_colors(&markup);
            if colors.is_empty() {
                continue;
            }
            let purpose = classify_purpose(Some(&block.selector), &markup);
            let (width, height) = dimensions(&markup);
            svgs.push(SvgInfo {
                location: SvgLocation::Background,
                owner: Some(block.selector.clone()),
                purpose,
                markup,
                colors,
                width,
                height,
            });
        }
    }
}

/// Decode the tail of a `data:image/svg+xml...` URI into markup.
fn decode_payload(payload: &str) -> Option<String> {
    let (encoding, data) = payload.split_once(',')?;
    if encoding.contains("base64") {
        return None;
    }
    let decoded = urlencoding::decode(data).ok()?;
    let unescaped = decoded.replace("\\\"", "\"").replace("\\'", "'");
    if !unescaped.contains("<svg") {
        return None;
    }
    Some(unescaped)
}

/// Pull fill/stroke/stop-color attribute values, dropping paint keywords
/// and anything that fails color normalization.
fn extract_colors(markup: &str) -> Vec<SvgColorFact> {
    let attribute =
        Regex::new(r#"(fill|stroke|stop-color)\s*=\s*["']([^"']+)["']"#).expect("paint regex");
    let mut colors = Vec::new();
    for capture in attribute.captures_iter(markup) {
        let literal = capture[2].trim().to_string();
        let Some(color) = normalize_color(&literal) else {
            continue;
        };
        let paint = match &capture[1] {
            "fill" => SvgPaint::Fill,
            "stroke" => SvgPaint::Stroke,
            _ => SvgPaint::StopColor,
        };
        colors.push(SvgColorFact {
            paint,
            color,
            literal,
        });
    }
    colors
}

/// Nearest preceding `class="..."` in the surrounding text window.
fn owner_guess(html: &str, svg_start: usize) -> Option<String> {
    let mut window_start = svg_start.saturating_sub(OWNER_WINDOW);
    while window_start > 0 && !html.is_char_boundary(window_start) {
        window_start -= 1;
    }
    let window = &html[window_start..svg_start];
    let class_attr = Regex::new(r#"class\s*=\s*["']([^"']+)["']"#).expect("class regex");
    let last = class_attr.captures_iter(window).last()?;
    let first_class = last[1].split_whitespace().next()?;
    Some(format!(".{first_class}"))
}

fn classify_purpose(owner: Option<&str>, markup: &str) -> SvgPurpose {
    let haystack = format!(
        "{} {}",
        owner.unwrap_or_default().to_lowercase(),
        markup
            .get(..markup.len().min(200))
            .unwrap_or_default()
            .to_lowercase()
    );
    const SOCIAL: [&str; 6] = [
        "social", "twitter", "facebook", "github", "linkedin", "instagram",
    ];
    if haystack.contains("logo") || haystack.contains("brand") {
        SvgPurpose::Logo
    } else if SOCIAL.iter().any(|needle| haystack.contains(needle)) {
        SvgPurpose::Social
    } else if haystack.contains("nav") || haystack.contains("menu") {
        SvgPurpose::Nav
    } else if haystack.contains("arrow") || haystack.contains("chevron") || haystack.contains("caret")
    {
        SvgPurpose::Arrow
    } else if haystack.contains("icon") {
        SvgPurpose::Icon
    } else {
        SvgPurpose::Other
    }
}

fn dimensions(markup: &str) -> (Option<String>, Option<String>) {
    let width = Regex::new(r#"width\s*=\s*["']([^"']+)["']"#)
        .expect("width regex")
        .captures(markup)
        .map(|c| c[1].to_string());
    let height = Regex::new(r#"height\s*=\s*["']([^"']+)["']"#)
        .expect("height regex")
        .captures(markup)
        .map(|c| c[1].to_string());
    (width, height)
}

/// Two SVGs are duplicates when their sorted color fingerprint and a
/// structurally normalized markup prefix both match.
fn dedupe(svgs: Vec<SvgInfo>) -> Vec<SvgInfo> {
    let mut seen = BTreeSet::new();
    let mut unique = Vec::new();
    for svg in svgs {
        let mut colors: Vec<&str> = svg.colors.iter().map(|c| c.color.as_str()).collect();
        colors.sort_unstable();
        let normalized: String = svg
            .markup
            .chars()
            .map(|ch| if ch.is_ascii_digit() { '#' } else { ch })
            .filter(|ch| !ch.is_whitespace())
            .take(FINGERPRINT_PREFIX)
            .collect();
        let fingerprint = format!("{}|{normalized}", colors.join(","));
        if seen.insert(fingerprint) {
            unique.push(svg);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    const INLINE: &str = r##"<div class="site-logo main"><svg width="24" height="24">
        <path fill="#ff0000" stroke="rgb(0, 0, 255)"/>
        <stop stop-color="#00ff00"/>
        <path fill="none" stroke="currentColor"/>
    </svg></div>"##;

    #[test]
    fn extracts_inline_paints() {
        let svgs = analyze_svgs(INLINE, "");
        assert_eq!(svgs.len(), 1);
        let svg = &svgs[0];
        assert_eq!(svg.location, SvgLocation::Inline);
        assert_eq!(svg.owner.as_deref(), Some(".site-logo"));
        assert_eq!(svg.purpose, SvgPurpose::Logo);
        assert_eq!(svg.width.as_deref(), Some("24"));
        let colors: Vec<&str> = svg.colors.iter().map(|c| c.color.as_str()).collect();
        assert_eq!(colors, vec!["#FF0000", "#0000FF", "#00FF00"]);
    }

    #[test]
    fn filters_paint_keywords() {
        let html = r#"<svg><path fill="none" stroke="inherit"/><g fill="currentColor"/></svg>"#;
        assert!(analyze_svgs(html, "").is_empty());
    }

    #[test]
    fn decodes_background_payloads() {
        let css = ".arrow-next { background-image: \
                   url(\"data:image/svg+xml,%3Csvg%3E%3Cpath%20fill%3D%22%23ff00aa%22%2F%3E%3C%2Fsvg%3E\"); }";
        let svgs = analyze_svgs("", css);
        assert_eq!(svgs.len(), 1);
        assert_eq!(svgs[0].location, SvgLocation::Background);
        assert_eq!(svgs[0].owner.as_deref(), Some(".arrow-next"));
        assert_eq!(svgs[0].purpose, SvgPurpose::Arrow);
        assert_eq!(svgs[0].colors[0].color, "#FF00AA");
    }

    #[test]
    fn skips_base64_payloads() {
        let css = ".x { background: url(data:image/svg+xml;base64,PHN2Zz48L3N2Zz4=); }";
        assert!(analyze_svgs("", css).is_empty());
    }

    #[test]
    fn dedupes_structural_twins() {
        let html = r##"<svg viewBox="0 0 10 10"><path fill="#123456"/></svg>
                       <svg viewBox="0 0 24 24"><path fill="#123456"/></svg>"##;
        let svgs = analyze_svgs(html, "");
        assert_eq!(svgs.len(), 1);
    }

    #[test]
    fn distinct_colors_survive_dedup() {
        let html = r##"<svg><path fill="#111111"/></svg><svg><path fill="#222222"/></svg>"##;
        let svgs = analyze_svgs(html, "");
        assert_eq!(svgs.len(), 2);
    }
}
