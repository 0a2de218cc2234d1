//! Framework fingerprinting from class names, variable prefixes, and CSS
//! markers.

use std::collections::BTreeMap;

use tracing::debug;

use restyle_model::{DesignSystem, DesignSystemProfile, ThemeToggle, VariableFact};

/// Minimum winning confidence before falling back to the custom classifier.
const DETECTION_FLOOR: f64 = 0.3;

/// Confidence assigned to a custom-prefix classification.
const CUSTOM_CONFIDENCE: f64 = 0.5;

/// Variable-prefix matches required before the prefix signal counts.
const PREFIX_THRESHOLD: usize = 3;

struct FrameworkSignals {
    system: DesignSystem,
    /// Class-name fragments looked up in the HTML (weight 0.3–0.4).
    class_markers: &'static [&'static str],
    class_weight: f64,
    /// Custom-property prefixes counted across extracted variables
    /// (weight 0.4).
    var_prefixes: &'static [&'static str],
    /// Framework-specific fragments looked up in the CSS (weight 0.1–0.2).
    css_markers: &'static [&'static str],
    css_weight: f64,
    /// Theme-toggle convention for this framework.
    toggle: ToggleConvention,
}

enum ToggleConvention {
    Class(&'static str),
    Attribute(&'static str, &'static str),
}

const VAR_PREFIX_WEIGHT: f64 = 0.4;

const FRAMEWORKS: [FrameworkSignals; 5] = [
    FrameworkSignals {
        system: DesignSystem::Material,
        class_markers: &["mdc-", "mat-", "material-icons"],
        class_weight: 0.4,
        var_prefixes: &["--mdc-", "--mat-", "--md-"],
        css_markers: &[".mdc-button", ".mat-mdc-", "--mdc-theme"],
        css_weight: 0.2,
        toggle: ToggleConvention::Class("dark-theme"),
    },
    FrameworkSignals {
        system: DesignSystem::Bootstrap,
        class_markers: &["navbar", "btn-primary", "container-fluid", "col-md-"],
        class_weight: 0.3,
        var_prefixes: &["--bs-"],
        css_markers: &["--bs-body-bg", ".btn-outline-", "bootstrap"],
        css_weight: 0.2,
        toggle: ToggleConvention::Attribute("data-bs-theme", "dark"),
    },
    FrameworkSignals {
        system: DesignSystem::Tailwind,
        class_markers: &["flex ", "text-gray-", "bg-white", "rounded-lg", "px-4"],
        class_weight: 0.3,
        var_prefixes: &["--tw-"],
        css_markers: &["--tw-ring", "--tw-shadow", "tailwind"],
        css_weight: 0.2,
        toggle: ToggleConvention::Class("dark"),
    },
    FrameworkSignals {
        system: DesignSystem::Antd,
        class_markers: &["ant-btn", "ant-layout", "ant-menu"],
        class_weight: 0.4,
        var_prefixes: &["--ant-", "--antd-"],
        css_markers: &[".ant-btn-primary", "--ant-primary-color"],
        css_weight: 0.1,
        toggle: ToggleConvention::Attribute("data-theme", "dark"),
    },
    FrameworkSignals {
        system: DesignSystem::Chakra,
        class_markers: &["chakra-button", "chakra-stack", "chakra-text"],
        class_weight: 0.4,
        var_prefixes: &["--chakra-"],
        css_markers: &["--chakra-colors", "--chakra-ring"],
        css_weight: 0.1,
        toggle: ToggleConvention::Attribute("data-theme", "dark"),
    },
];

/// Generic theme-toggle conventions tried on the custom/unknown path.
const GENERIC_TOGGLES: [&str; 2] = ["dark", "dark-theme"];
const GENERIC_TOGGLE_ATTRS: [&str; 2] = ["data-theme", "data-color-scheme"];

/// Fingerprint the page against the known framework conventions.
#[must_use]
pub fn detect_design_system(
    html: &str,
    css: &str,
    variables: &[VariableFact],
) -> DesignSystemProfile {
    let html_lower = html.to_lowercase();
    let css_lower = css.to_lowercase();

    let mut best: Option<DesignSystemProfile> = None;
    for framework in &FRAMEWORKS {
        let profile = score_framework(framework, &html_lower, &css_lower, variables);
        let is_better = best
            .as_ref()
            .is_none_or(|current| profile.confidence > current.confidence);
        if is_better {
            best = Some(profile);
        }
    }

    let best = best.expect("at least one framework scored");
    if best.confidence >= DETECTION_FLOOR {
        debug!(system = best.system.as_str(), confidence = best.confidence, "framework detected");
        return best;
    }
    custom_profile(&html_lower, variables)
}

fn score_framework(
    framework: &FrameworkSignals,
    html: &str,
    css: &str,
    variables: &[VariableFact],
) -> DesignSystemProfile {
    let mut confidence = 0.0;
    if framework
        .class_markers
        .iter()
        .any(|marker| html.contains(marker))
    {
        confidence += framework.class_weight;
    }

    let mut prefixes = Vec::new();
    let mut prefix_hits = 0usize;
    for prefix in framework.var_prefixes {
        let count = variables
            .iter()
            .filter(|fact| fact.name.starts_with(prefix))
            .count();
        if count > 0 {
            prefixes.push((*prefix).to_string());
        }
        prefix_hits += count;
    }
    if prefix_hits >= PREFIX_THRESHOLD {
        confidence += VAR_PREFIX_WEIGHT;
    }

    if framework
        .css_markers
        .iter()
        .any(|marker| css.contains(marker))
    {
        confidence += framework.css_weight;
    }
    confidence = confidence.min(1.0);

    let tokens = token_map(variables, &prefixes);
    let theme_toggle = detect_toggle(&framework.toggle, html, css);

    DesignSystemProfile {
        system: framework.system,
        confidence,
        prefixes,
        tokens,
        theme_toggle,
    }
}

/// Resolved colors for variables under the detected prefixes.
fn token_map(variables: &[VariableFact], prefixes: &[String]) -> BTreeMap<String, String> {
    let mut tokens = BTreeMap::new();
    for fact in variables {
        let matches = prefixes.is_empty()
            || prefixes.iter().any(|prefix| fact.name.starts_with(prefix));
        if !matches {
            continue;
        }
        if let Some(computed) = &fact.computed {
            tokens.insert(fact.name.clone(), computed.clone());
        }
    }
    tokens
}

fn detect_toggle(convention: &ToggleConvention, html: &str, css: &str) -> Option<ThemeToggle> {
    match convention {
        ToggleConvention::Class(name) => {
            let as_selector = format!(".{name}");
            if css.contains(&as_selector) || html.contains(&format!("class=\"{name}")) {
                Some(ThemeToggle::Class {
                    name: (*name).to_string(),
                })
            } else {
                None
            }
        }
        ToggleConvention::Attribute(name, value) => {
            if html.contains(name) || css.contains(&format!("[{name}")) {
                Some(ThemeToggle::Attribute {
                    name: (*name).to_string(),
                    value: (*value).to_string(),
                })
            } else {
                None
            }
        }
    }
}

/// Fallback classifier: the single most frequent two-or-three-segment
/// custom-property prefix becomes the signature.
fn custom_profile(html: &str, variables: &[VariableFact]) -> DesignSystemProfile {
    let mut prefix_counts: BTreeMap<String, usize> = BTreeMap::new();
    for fact in variables {
        if let Some(prefix) = signature_prefix(&fact.name) {
            *prefix_counts.entry(prefix).or_insert(0) += 1;
        }
    }
    let winner = prefix_counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)));

    let theme_toggle = generic_toggle(html);
    match winner {
        Some((prefix, _)) => {
            let prefixes = vec![prefix];
            let tokens = token_map(variables, &prefixes);
            DesignSystemProfile {
                system: DesignSystem::Custom,
                confidence: CUSTOM_CONFIDENCE,
                prefixes,
                tokens,
                theme_toggle,
            }
        }
        None => DesignSystemProfile {
            theme_toggle,
            ..DesignSystemProfile::unknown()
        },
    }
}

/// First two segments of `--seg1-seg2-rest`, as `--seg1-seg2-`; falls back
/// to one segment for short names.
fn signature_prefix(name: &str) -> Option<String> {
    let body = name.strip_prefix("--")?;
    let segments: Vec<&str> = body.split('-').filter(|s| !s.is_empty()).collect();
    match segments.len() {
        0 | 1 => None,
        2 => Some(format!("--{}-", segments[0])),
        _ => Some(format!("--{}-{}-", segments[0], segments[1])),
    }
}

fn generic_toggle(html: &str) -> Option<ThemeToggle> {
    for attr in GENERIC_TOGGLE_ATTRS {
        if html.contains(attr) {
            return Some(ThemeToggle::Attribute {
                name: attr.to_string(),
                value: "dark".to_string(),
            });
        }
    }
    for class in GENERIC_TOGGLES {
        if html.contains(&format!("class=\"{class}")) {
            return Some(ThemeToggle::Class {
                name: class.to_string(),
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use restyle_model::VariableScope;

    fn var_fact(name: &str, computed: Option<&str>) -> VariableFact {
        VariableFact {
            name: name.to_string(),
            literal: computed.unwrap_or("0").to_string(),
            computed: computed.map(String::from),
            scope: VariableScope::Root,
            usage: Default::default(),
            frequency: 1,
        }
    }

    #[test]
    fn detects_bootstrap_from_combined_signals() {
        let html = r#"<nav class="navbar navbar-dark" data-bs-theme="dark">"#;
        let css = ":root { --bs-body-bg: #fff; }";
        let variables = vec![
            var_fact("--bs-body-bg", Some("#FFFFFF")),
            var_fact("--bs-primary", Some("#0D6EFD")),
            var_fact("--bs-secondary", Some("#6C757D")),
        ];
        let profile = detect_design_system(html, css, &variables);
        assert_eq!(profile.system, DesignSystem::Bootstrap);
        assert!(profile.confidence >= 0.7);
        assert_eq!(
            profile.theme_toggle,
            Some(ThemeToggle::Attribute {
                name: "data-bs-theme".to_string(),
                value: "dark".to_string(),
            })
        );
        assert_eq!(profile.tokens.get("--bs-primary").map(String::as_str), Some("#0D6EFD"));
    }

    #[test]
    fn weak_signals_fall_back_to_custom_prefix() {
        let variables = vec![
            var_fact("--acme-ui-primary", Some("#112233")),
            var_fact("--acme-ui-surface", Some("#445566")),
            var_fact("--acme-ui-radius", None),
            var_fact("--other-thing", None),
        ];
        let profile = detect_design_system("<div class=\"page\">", "", &variables);
        assert_eq!(profile.system, DesignSystem::Custom);
        assert_eq!(profile.confidence, CUSTOM_CONFIDENCE);
        assert_eq!(profile.prefixes, vec!["--acme-ui-".to_string()]);
        assert!(profile.tokens.contains_key("--acme-ui-primary"));
        assert!(!profile.tokens.contains_key("--acme-ui-radius"));
    }

    #[test]
    fn no_prefixes_at_all_is_unknown() {
        let profile = detect_design_system("<p>hello</p>", "p { color: red; }", &[]);
        assert_eq!(profile.system, DesignSystem::Unknown);
        assert_eq!(profile.confidence, 0.0);
    }

    #[test]
    fn generic_toggle_found_on_custom_path() {
        let variables = vec![
            var_fact("--site-theme-bg", Some("#000000")),
            var_fact("--site-theme-fg", Some("#FFFFFF")),
        ];
        let profile =
            detect_design_system(r#"<html data-color-scheme="dark">"#, "", &variables);
        assert_eq!(
            profile.theme_toggle,
            Some(ThemeToggle::Attribute {
                name: "data-color-scheme".to_string(),
                value: "dark".to_string(),
            })
        );
    }

    #[test]
    fn confidence_is_capped_at_one() {
        let html = "<div class=\"mdc-button mat-toolbar material-icons\">";
        let css = ".mdc-button { } .mat-mdc-card { } --mdc-theme-primary: red;";
        let variables: Vec<VariableFact> = (0..5)
            .map(|i| var_fact(&format!("--mdc-theme-color-{i}"), Some("#FF0000")))
            .collect();
        let profile = detect_design_system(html, css, &variables);
        assert_eq!(profile.system, DesignSystem::Material);
        assert!(profile.confidence <= 1.0);
    }
}
