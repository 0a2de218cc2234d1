//! Custom-property extraction (declarations, usage attribution, inline
//! styles).

use std::collections::BTreeMap;

use regex::Regex;
use tracing::debug;

use restyle_model::color::normalize_color;
use restyle_model::{VariableFact, VariableScope};

use crate::css::{enclosing_selector, scan_rule_blocks, strip_comments};

/// Extract every custom property declared in the CSS or in inline `style`
/// attributes, with usage counts attributed to their enclosing selectors.
///
/// Records are deduplicated by name and sorted by descending usage
/// frequency. Malformed declarations are skipped; this never fails.
#[must_use]
pub fn extract_variables(html: &str, css: &str) -> Vec<VariableFact> {
    let css = strip_comments(css);
    let mut facts: BTreeMap<String, VariableFact> = BTreeMap::new();

    for block in scan_rule_blocks(&css) {
        let scope = scope_for_selector(&block.selector);
        for (name, literal) in declarations(&block.body) {
            merge_declaration(&mut facts, &name, &literal, scope);
        }
    }

    // Inline style="" attributes declare element-scoped variables.
    let style_attr = Regex::new(r#"style\s*=\s*["']([^"']*)["']"#).expect("style regex");
    for capture in style_attr.captures_iter(html) {
        for (name, literal) in declarations(&capture[1]) {
            merge_declaration(&mut facts, &name, &literal, VariableScope::Element);
        }
    }

    attribute_usage(&mut facts, &css, html);

    let mut ordered: Vec<VariableFact> = facts.into_values().collect();
    ordered.sort_by(|a, b| b.frequency.cmp(&a.frequency).then(a.name.cmp(&b.name)));
    debug!(count = ordered.len(), "extracted custom properties");
    ordered
}

/// Parse `--name: value` declarations out of a declaration list.
fn declarations(body: &str) -> Vec<(String, String)> {
    let mut found = Vec::new();
    for declaration in body.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim();
        let value = value.trim();
        if !property.starts_with("--") || property.len() <= 2 || value.is_empty() {
            continue;
        }
        if property[2..]
            .chars()
            .any(|ch| !ch.is_ascii_alphanumeric() && ch != '-' && ch != '_')
        {
            continue;
        }
        found.push((property.to_string(), value.to_string()));
    }
    found
}

fn scope_for_selector(selector: &str) -> VariableScope {
    let lowered = selector.to_lowercase();
    if lowered.contains(":root") || lowered.split(',').any(|part| part.trim() == "html") {
        VariableScope::Root
    } else if lowered.contains('.') {
        VariableScope::Class
    } else {
        VariableScope::Element
    }
}

fn merge_declaration(
    facts: &mut BTreeMap<String, VariableFact>,
    name: &str,
    literal: &str,
    scope: VariableScope,
) {
    facts
        .entry(name.to_string())
        .and_modify(|existing| {
            // Re-declarations keep the first literal; a root-scope sighting
            // upgrades the recorded scope.
            if scope == VariableScope::Root {
                existing.scope = VariableScope::Root;
            }
        })
        .or_insert_with(|| VariableFact {
            name: name.to_string(),
            literal: literal.to_string(),
            computed: normalize_color(literal),
            scope,
            usage: Default::default(),
            frequency: 0,
        });
}

/// Count `var()` references across CSS and markup, attributing each CSS
/// reference to its enclosing selector.
fn attribute_usage(facts: &mut BTreeMap<String, VariableFact>, css: &str, html: &str) {
    let reference = Regex::new(r"var\(\s*(--[A-Za-z0-9_-]+)").expect("var regex");
    for capture in reference.captures_iter(css) {
        let name = &capture[1];
        let Some(fact) = facts.get_mut(name) else {
            continue;
        };
        fact.frequency += 1;
        let position = capture.get(0).map_or(0, |m| m.start());
        if let Some(selector) = enclosing_selector(css, position) {
            fact.usage.insert(selector);
        }
    }
    for capture in reference.captures_iter(html) {
        if let Some(fact) = facts.get_mut(&capture[1]) {
            fact.frequency += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_declaration_with_usage() {
        let css = ":root { --brand-accent: #1a73e8; } .cta { color: var(--brand-accent); }";
        let facts = extract_variables("", css);
        assert_eq!(facts.len(), 1);
        let fact = &facts[0];
        assert_eq!(fact.name, "--brand-accent");
        assert_eq!(fact.computed.as_deref(), Some("#1A73E8"));
        assert_eq!(fact.scope, VariableScope::Root);
        assert_eq!(fact.frequency, 1);
        assert!(fact.usage.contains(".cta"));
    }

    #[test]
    fn keeps_declared_but_unused_variables() {
        let facts = extract_variables("", ".theme { --unused: #fff; }");
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].frequency, 0);
        assert_eq!(facts[0].scope, VariableScope::Class);
    }

    #[test]
    fn merges_redeclarations_and_sums_usage() {
        let css = ":root { --c: red; } .dark { --c: blue; } \
                   .a { color: var(--c); } .b { background: var(--c); }";
        let facts = extract_variables("", css);
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].frequency, 2);
        assert_eq!(facts[0].scope, VariableScope::Root);
        assert!(facts[0].usage.contains(".a"));
        assert!(facts[0].usage.contains(".b"));
    }

    #[test]
    fn reads_inline_style_attributes() {
        let html = r#"<div style="--spot: rgb(255, 0, 0); color: var(--spot)">x</div>"#;
        let facts = extract_variables(html, "");
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].scope, VariableScope::Element);
        assert_eq!(facts[0].computed.as_deref(), Some("#FF0000"));
        assert_eq!(facts[0].frequency, 1);
    }

    #[test]
    fn skips_malformed_declarations() {
        let css = ":root { --: #fff; --ok: #000; -- broken; --bad name: red; }";
        let facts = extract_variables("", css);
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].name, "--ok");
    }

    #[test]
    fn non_color_variables_have_no_computed_value() {
        let facts = extract_variables("", ":root { --spacing: 4px; }");
        assert_eq!(facts[0].computed, None);
    }

    #[test]
    fn sorts_by_descending_frequency() {
        let css = ":root { --a: #111; --b: #222; } \
                   .x { color: var(--b); } .y { color: var(--b); } .z { color: var(--a); }";
        let facts = extract_variables("", css);
        assert_eq!(facts[0].name, "--b");
        assert_eq!(facts[1].name, "--a");
    }
}
