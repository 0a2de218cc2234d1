//! Structural validation of the generated theme document.
//!
//! Pure function of the document text: running it twice on the same
//! theme yields the same issue list.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use tracing::debug;

use restyle_model::{
    GeneratedTheme, IssueSeverity, PaletteToken, ValidationIssue, ValidationReport,
};

/// At-rule names that are legitimate `@` references in CSS/LESS.
const AT_RULE_KEYWORDS: [&str; 13] = [
    "media",
    "import",
    "supports",
    "keyframes",
    "font-face",
    "charset",
    "namespace",
    "page",
    "document",
    "layer",
    "container",
    "scope",
    "plugin",
];

/// Validate a generated theme's structure.
///
/// Errors: unbalanced braces, unknown `@` references, malformed property
/// names. Warnings: duplicate top-level selectors, empty property values,
/// double semicolons, and a zero-coverage document.
#[must_use]
pub fn validate_theme(theme: &GeneratedTheme) -> ValidationReport {
    let text = strip_comments(&theme.text);
    let mut issues = Vec::new();

    check_brace_balance(&text, &mut issues);
    check_token_references(&text, &mut issues);
    check_duplicate_top_level(&text, &mut issues);
    check_declarations(&text, &mut issues);
    check_coverage(theme, &mut issues);

    debug!(
        errors = issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Error)
            .count(),
        warnings = issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
            .count(),
        "output validation finished"
    );
    ValidationReport { issues }
}

/// Remove `/* */` and `//` comments.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if ch == '/' {
            match chars.peek() {
                Some((_, '*')) => {
                    chars.next();
                    let rest = &text[index + 2..];
                    let Some(end) = rest.find("*/") else {
                        return out;
                    };
                    // Skip to the character after the terminator.
                    while let Some((i, _)) = chars.peek().copied() {
                        if i >= index + 2 + end + 2 {
                            break;
                        }
                        chars.next();
                    }
                    continue;
                }
                Some((_, '/')) => {
                    while let Some((_, c)) = chars.peek().copied() {
                        if c == '\n' {
                            break;
                        }
                        chars.next();
                    }
                    continue;
                }
                _ => {}
            }
        }
        out.push(ch);
    }
    out
}

fn check_brace_balance(text: &str, issues: &mut Vec<ValidationIssue>) {
    let mut depth = 0i64;
    let mut negative = false;
    for ch in text.chars() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    negative = true;
                }
            }
            _ => {}
        }
    }
    if depth != 0 || negative {
        issues.push(ValidationIssue {
            code: "BRACE_BALANCE".to_string(),
            message: format!("unbalanced braces: net depth {depth}"),
            severity: IssueSeverity::Error,
            subject: None,
            count: None,
        });
    }
}

/// Every `@name` must be an at-rule keyword, a palette token, or a
/// variable the document itself defines.
fn check_token_references(text: &str, issues: &mut Vec<ValidationIssue>) {
    let definition = Regex::new(r"@([A-Za-z][A-Za-z0-9_-]*)\s*:").expect("definition regex");
    let defined: BTreeSet<String> = definition
        .captures_iter(text)
        .map(|capture| capture[1].to_string())
        .collect();

    let reference = Regex::new(r"@([A-Za-z][A-Za-z0-9_-]*)").expect("reference regex");
    let mut flagged = BTreeSet::new();
    for capture in reference.captures_iter(text) {
        let name = &capture[1];
        if AT_RULE_KEYWORDS.contains(&name)
            || PaletteToken::parse(name).is_some()
            || defined.contains(name)
            || !flagged.insert(name.to_string())
        {
            continue;
        }
        issues.push(ValidationIssue {
            code: "TOKEN_UNKNOWN".to_string(),
            message: format!("unknown token reference @{name}"),
            severity: IssueSeverity::Error,
            subject: Some(name.to_string()),
            count: None,
        });
    }
}

fn check_duplicate_top_level(text: &str, issues: &mut Vec<ValidationIssue>) {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut depth = 0i64;
    let mut run = String::new();
    for ch in text.chars() {
        match ch {
            '{' => {
                if depth == 0 {
                    let selector = run.rsplit([';', '}']).next().unwrap_or("").trim();
                    if !selector.is_empty() && !selector.starts_with('@') {
                        *counts.entry(selector.to_string()).or_insert(0) += 1;
                    }
                    run.clear();
                }
                depth += 1;
            }
            '}' => depth = (depth - 1).max(0),
            _ if depth == 0 => run.push(ch),
            _ => {}
        }
    }
    for (selector, count) in counts {
        if count > 1 {
            issues.push(ValidationIssue {
                code: "SELECTOR_DUPLICATE".to_string(),
                message: format!("top-level selector repeated {count} times: {selector}"),
                severity: IssueSeverity::Warning,
                subject: Some(selector),
                count: Some(count),
            });
        }
    }
}

/// Inspect leaf declarations in every block for empty values and
/// malformed property names.
fn check_declarations(text: &str, issues: &mut Vec<ValidationIssue>) {
    if text.contains(";;") {
        issues.push(ValidationIssue {
            code: "DOUBLE_SEMICOLON".to_string(),
            message: "document contains ';;'".to_string(),
            severity: IssueSeverity::Warning,
            subject: None,
            count: Some(text.matches(";;").count() as u64),
        });
    }

    for body in leaf_bodies(text) {
        for declaration in body.split(';') {
            let declaration = declaration.trim();
            if declaration.is_empty() {
                continue;
            }
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() {
                continue;
            }
            if name.split_whitespace().count() > 1 {
                issues.push(ValidationIssue {
                    code: "PROPERTY_MALFORMED".to_string(),
                    message: format!("property name contains whitespace: '{name}'"),
                    severity: IssueSeverity::Error,
                    subject: Some(name.to_string()),
                    count: None,
                });
            }
            if value.is_empty() {
                issues.push(ValidationIssue {
                    code: "VALUE_EMPTY".to_string(),
                    message: format!("empty value for property '{name}'"),
                    severity: IssueSeverity::Warning,
                    subject: Some(name.to_string()),
                    count: None,
                });
            }
        }
    }
}

/// Declaration text per block, with nested sub-blocks (and their
/// selector preambles) cut out.
fn leaf_bodies(text: &str) -> Vec<String> {
    let mut bodies: Vec<String> = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    for ch in text.chars() {
        match ch {
            '{' => {
                if let Some(top) = stack.last_mut() {
                    // Drop the nested block's selector text from this run.
                    let cut = top.rfind(';').map_or(0, |index| index + 1);
                    top.truncate(cut);
                }
                stack.push(String::new());
            }
            '}' => {
                if let Some(body) = stack.pop() {
                    bodies.push(body);
                }
            }
            _ => {
                if let Some(top) = stack.last_mut() {
                    top.push(ch);
                }
            }
        }
    }
    bodies
}

fn check_coverage(theme: &GeneratedTheme, issues: &mut Vec<ValidationIssue>) {
    let sections = &theme.sections;
    if sections.variables.trim().is_empty()
        && sections.svgs.trim().is_empty()
        && sections.selectors.trim().is_empty()
    {
        issues.push(ValidationIssue {
            code: "COVERAGE_EMPTY".to_string(),
            message: "no variables, svgs, or selectors were mapped; degenerate run".to_string(),
            severity: IssueSeverity::Warning,
            subject: None,
            count: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restyle_model::{
        AccentColor, ColorScheme, CoverageSummary, DesignSystem, Flavor, GeneratorVariant,
        ThemeMetadata, ThemeSections,
    };

    fn theme_with(text: &str, selectors_section: &str) -> GeneratedTheme {
        GeneratedTheme {
            text: text.to_string(),
            metadata: ThemeMetadata {
                source_url: "https://acme.example".to_string(),
                generated_at: "2026-01-01T00:00:00Z".to_string(),
                color_scheme: ColorScheme::Dark,
                design_system: DesignSystem::Unknown,
                flavor: Flavor::Mocha,
                accent: AccentColor::Blue,
                variant: GeneratorVariant::Dynamic,
                generator: "restyle/0.1.0".to_string(),
            },
            sections: ThemeSections {
                selectors: selectors_section.to_string(),
                ..ThemeSections::default()
            },
            coverage: CoverageSummary::default(),
        }
    }

    #[test]
    fn well_formed_document_is_valid() {
        let text = "@import \"palette\";\n.btn { color: @blue; }\n";
        let report = validate_theme(&theme_with(text, ".btn"));
        assert!(report.is_valid());
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn removed_closing_brace_is_an_error() {
        let good = ".a { color: @text; } .b { color: @blue; }";
        assert!(validate_theme(&theme_with(good, "x")).is_valid());
        let bad = ".a { color: @text; } .b { color: @blue; ";
        let report = validate_theme(&theme_with(bad, "x"));
        assert!(!report.is_valid());
        assert!(
            report
                .issues
                .iter()
                .any(|issue| issue.code == "BRACE_BALANCE")
        );
    }

    #[test]
    fn unknown_token_reference_is_an_error() {
        let text = ".a { color: @nonsuch; }";
        let report = validate_theme(&theme_with(text, "x"));
        assert!(!report.is_valid());
        let issue = &report.issues[0];
        assert_eq!(issue.code, "TOKEN_UNKNOWN");
        assert_eq!(issue.subject.as_deref(), Some("nonsuch"));
    }

    #[test]
    fn document_defined_variables_resolve() {
        let text = "@chosen: @blue;\n.a { color: @chosen; }";
        let report = validate_theme(&theme_with(text, "x"));
        assert!(report.is_valid());
    }

    #[test]
    fn at_rules_are_recognized() {
        let text = "@media (prefers-color-scheme: light) { .a { color: @latte-ish; } }";
        // "latte-ish" is not a token; "media" is fine.
        let report = validate_theme(&theme_with(text, "x"));
        let unknown: Vec<&str> = report
            .issues
            .iter()
            .filter(|i| i.code == "TOKEN_UNKNOWN")
            .filter_map(|i| i.subject.as_deref())
            .collect();
        assert_eq!(unknown, vec!["latte-ish"]);
    }

    #[test]
    fn duplicate_top_level_selectors_warn() {
        let text = ".a { color: @text; } .a { color: @blue; }";
        let report = validate_theme(&theme_with(text, "x"));
        assert!(report.is_valid());
        assert!(
            report
                .issues
                .iter()
                .any(|issue| issue.code == "SELECTOR_DUPLICATE")
        );
    }

    #[test]
    fn declaration_shape_checks() {
        let text = ".a { color: ; bad name: @text;; }";
        let report = validate_theme(&theme_with(text, "x"));
        let codes: BTreeSet<&str> = report
            .issues
            .iter()
            .map(|issue| issue.code.as_str())
            .collect();
        assert!(codes.contains("VALUE_EMPTY"));
        assert!(codes.contains("PROPERTY_MALFORMED"));
        assert!(codes.contains("DOUBLE_SEMICOLON"));
        assert!(!report.is_valid());
    }

    #[test]
    fn nested_blocks_do_not_leak_selector_text() {
        let text = "@media (prefers-color-scheme: light) { body { color: @text; } }\n\
                    .outer { color: @blue; .inner { color: @teal; } }";
        let report = validate_theme(&theme_with(text, "x"));
        assert!(report.is_valid(), "issues: {:?}", report.issues);
    }

    #[test]
    fn comments_never_count_toward_balance() {
        let text = "/* { { { */\n.a { color: @text; } // }}}\n";
        let report = validate_theme(&theme_with(text, "x"));
        assert!(report.is_valid());
    }

    #[test]
    fn zero_coverage_warns_but_stays_valid() {
        let report = validate_theme(&theme_with(".host {}", ""));
        assert!(report.is_valid());
        assert!(
            report
                .issues
                .iter()
                .any(|issue| issue.code == "COVERAGE_EMPTY")
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let theme = theme_with(".a { color: @nonsuch; } .a { color: ; }", "x");
        assert_eq!(validate_theme(&theme), validate_theme(&theme));
    }
}
