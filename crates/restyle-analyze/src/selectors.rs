//! Selector discovery: parsing, specificity, flags, and semantic
//! categorization.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::debug;

use restyle_model::color::normalize_color;
use restyle_model::{SelectorCategory, SelectorFact, SelectorGroup, SelectorStyles};

use crate::css::{scan_rule_blocks, strip_comments};

/// Category keyword cascade, in precedence order. The first matching
/// category wins, so overlapping names (`.nav-badge`) resolve the same
/// way on every run. This ordering is a contract; do not re-sort.
///
/// Known overlaps, resolved by position: `nav`+`badge` -> navigation,
/// `btn`+`icon` -> button, `header`+`nav` -> header, `tab`+`table` kept
/// apart by exact-token matching.
const CATEGORY_CASCADE: [(SelectorCategory, &[&str], &[&str]); 20] = [
    (
        SelectorCategory::Button,
        &["btn", "button", "cta"],
        &["button"],
    ),
    (SelectorCategory::Link, &["link"], &["a"]),
    (SelectorCategory::Card, &["card", "tile", "panel"], &[]),
    (
        SelectorCategory::Sidebar,
        &["sidebar", "sidenav", "drawer", "aside"],
        &["aside"],
    ),
    (
        SelectorCategory::Header,
        &["header", "masthead", "topbar"],
        &["header"],
    ),
    (SelectorCategory::Footer, &["footer"], &["footer"]),
    (
        SelectorCategory::Navigation,
        &["nav", "navbar", "menu", "breadcrumb"],
        &["nav"],
    ),
    (
        SelectorCategory::Input,
        &["input", "field", "form", "textarea", "checkbox", "radio"],
        &["input", "textarea", "select", "form"],
    ),
    (
        SelectorCategory::Modal,
        &["modal", "dialog", "popup", "lightbox", "overlay"],
        &["dialog"],
    ),
    (
        SelectorCategory::Alert,
        &["alert", "toast", "notification", "banner"],
        &[],
    ),
    (
        SelectorCategory::Badge,
        &["badge", "chip", "tag", "pill", "label"],
        &["label"],
    ),
    (SelectorCategory::Tab, &["tab", "tabs", "tablist"], &[]),
    (SelectorCategory::Switch, &["switch", "toggle"], &[]),
    (
        SelectorCategory::Dropdown,
        &["dropdown", "combobox", "select"],
        &[],
    ),
    (
        SelectorCategory::Code,
        &["code", "snippet", "syntax"],
        &["code", "pre", "kbd"],
    ),
    (
        SelectorCategory::Table,
        &["table", "thead", "tbody", "cell", "row"],
        &["table", "tr", "td", "th"],
    ),
    (
        SelectorCategory::Background,
        &["background", "backdrop", "wrapper", "container", "section", "hero", "page"],
        &["body", "html", "main", "section"],
    ),
    (
        SelectorCategory::Border,
        &["border", "divider", "separator"],
        &["hr"],
    ),
    (
        SelectorCategory::Icon,
        &["icon", "svg", "glyph", "logo"],
        &["svg", "i"],
    ),
    (
        SelectorCategory::Text,
        &["text", "title", "heading", "paragraph", "caption", "subtitle"],
        &[
            "h1", "h2", "h3", "h4", "h5", "h6", "p", "span", "em", "strong", "small",
            "blockquote",
        ],
    ),
];

/// Parse all CSS rules into categorized selector groups.
///
/// Repeated occurrences of the same selector string merge (first style
/// value wins, frequency accumulates), then frequency is re-estimated
/// against DOM occurrences in the HTML, and every selector receives
/// exactly one category from the cascade.
#[must_use]
pub fn discover_selectors(css: &str, html: &str) -> Vec<SelectorGroup> {
    let css = strip_comments(css);
    let mut facts: BTreeMap<String, SelectorFact> = BTreeMap::new();

    for block in scan_rule_blocks(&css) {
        let styles = extract_styles(&block.body);
        let body_interactive = interactive_body(&block.body);
        let gradient = has_gradient_background(&block.body);
        let bordered = has_border(&block.body);
        for raw in block.selector.split(',') {
            let selector = raw.trim();
            if selector.is_empty() || selector.contains('@') || selector.contains("::") {
                continue;
            }
            let entry = facts.entry(selector.to_string()).or_insert_with(|| {
                let category = categorize(selector);
                SelectorFact {
                    selector: selector.to_string(),
                    specificity: specificity(selector),
                    category,
                    frequency: 0,
                    is_interactive: false,
                    has_visible_background: false,
                    has_border: false,
                    is_text_only: false,
                    has_gradient_background: false,
                    styles: SelectorStyles::default(),
                }
            });
            entry.frequency += 1;
            entry.styles.merge(&styles);
            entry.is_interactive |= body_interactive || interactive_selector(selector);
            entry.has_gradient_background |= gradient;
            entry.has_border |= bordered;
        }
    }

    let mut all: Vec<SelectorFact> = facts.into_values().collect();
    for fact in &mut all {
        fact.frequency = fact.frequency.max(dom_frequency(&fact.selector, html));
        fact.has_visible_background = fact.styles.background_color.is_some();
        fact.has_border |= fact.styles.border_color.is_some();
        fact.is_text_only =
            fact.styles.color.is_some() && !fact.has_visible_background && !fact.has_border;
    }
    debug!(count = all.len(), "discovered selectors");
    group_by_category(all)
}

/// Drop selectors carrying no color signal. Applied before mapping.
#[must_use]
pub fn filter_colored(groups: Vec<SelectorGroup>) -> Vec<SelectorGroup> {
    groups
        .into_iter()
        .filter_map(|group| {
            let selectors: Vec<SelectorFact> = group
                .selectors
                .into_iter()
                .filter(|fact| !fact.styles.is_empty())
                .collect();
            if selectors.is_empty() {
                None
            } else {
                Some(SelectorGroup {
                    category: group.category,
                    selectors,
                })
            }
        })
        .collect()
}

fn group_by_category(facts: Vec<SelectorFact>) -> Vec<SelectorGroup> {
    let mut by_category: BTreeMap<SelectorCategory, Vec<SelectorFact>> = BTreeMap::new();
    for fact in facts {
        by_category.entry(fact.category).or_default().push(fact);
    }
    SelectorCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let mut selectors = by_category.remove(&category)?;
            selectors.sort_by(|a, b| {
                b.frequency
                    .cmp(&a.frequency)
                    .then(a.selector.cmp(&b.selector))
            });
            Some(SelectorGroup {
                category,
                selectors,
            })
        })
        .collect()
}

/// Assign exactly one category by the fixed keyword precedence.
#[must_use]
pub fn categorize(selector: &str) -> SelectorCategory {
    let lowered = selector.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect();
    let elements = element_tokens(&lowered);
    for (category, keywords, element_names) in CATEGORY_CASCADE {
        let keyword_hit = tokens.iter().any(|token| {
            keywords.iter().any(|keyword| {
                token == keyword || (keyword.len() >= 4 && token.starts_with(keyword))
            })
        });
        if keyword_hit || elements.iter().any(|el| element_names.contains(&el.as_str())) {
            return category;
        }
    }
    SelectorCategory::Other
}

/// Bare element names appearing in the selector (outside `.`/`#`/`:`
/// compounds).
fn element_tokens(selector: &str) -> Vec<String> {
    let mut elements = Vec::new();
    for compound in selector.split([' ', '>', '+', '~']) {
        let compound = compound.trim();
        if compound.is_empty() {
            continue;
        }
        let head: String = compound
            .chars()
            .take_while(|ch| ch.is_ascii_alphanumeric())
            .collect();
        if !head.is_empty() && compound.starts_with(|ch: char| ch.is_ascii_alphabetic()) {
            elements.push(head);
        }
    }
    elements
}

/// Specificity per the fixed formula: ids x100, classes/attributes/
/// pseudo-classes x10, elements x1.
#[must_use]
pub fn specificity(selector: &str) -> u32 {
    let attribute = Regex::new(r"\[[^\]]*\]").expect("attribute regex");
    let attributes = attribute.find_iter(selector).count() as u32;
    let stripped = attribute.replace_all(selector, " ");

    let mut ids = 0u32;
    let mut classes = 0u32;
    let mut pseudo_classes = 0u32;
    let mut elements = 0u32;
    for compound in stripped.split([' ', '>', '+', '~', ',']) {
        let compound = compound.trim();
        if compound.is_empty() {
            continue;
        }
        let mut chars = compound.char_indices().peekable();
        let mut expect_element = true;
        while let Some((index, ch)) = chars.next() {
            match ch {
                '#' => {
                    ids += 1;
                    expect_element = false;
                }
                '.' => {
                    classes += 1;
                    expect_element = false;
                }
                ':' => {
                    // Double-colon selectors are skipped upstream.
                    pseudo_classes += 1;
                    expect_element = false;
                }
                _ if expect_element && index == 0 && ch.is_ascii_alphabetic() => {
                    elements += 1;
                    expect_element = false;
                }
                _ => {}
            }
        }
    }
    ids * 100 + (classes + attributes + pseudo_classes) * 10 + elements
}

/// The five tracked color properties, via targeted patterns.
fn extract_styles(body: &str) -> SelectorStyles {
    let color = Regex::new(r"(?:^|[;{\s])color\s*:\s*([^;}]+)").expect("color regex");
    let background =
        Regex::new(r"(?:^|[;{\s])background(?:-color)?\s*:\s*([^;}]+)").expect("background regex");
    let border_color = Regex::new(
        r"(?:^|[;{\s])border(?:-(?:top|right|bottom|left))?(?:-color)?\s*:\s*([^;}]+)",
    )
    .expect("border regex");
    let fill = Regex::new(r"(?:^|[;{\s])fill\s*:\s*([^;}]+)").expect("fill regex");
    let stroke = Regex::new(r"(?:^|[;{\s])stroke\s*:\s*([^;}]+)").expect("stroke regex");

    SelectorStyles {
        color: first_color(&color, body),
        background_color: first_color(&background, body),
        border_color: border_color
            .captures_iter(body)
            .find_map(|capture| color_token(&capture[1])),
        fill: first_color(&fill, body),
        stroke: first_color(&stroke, body),
    }
}

fn first_color(pattern: &Regex, body: &str) -> Option<String> {
    pattern
        .captures_iter(body)
        .find_map(|capture| color_token(&capture[1]))
}

/// Normalize a declaration value, or the first normalizable token of a
/// shorthand. Gradient and image values never yield a flat color.
fn color_token(value: &str) -> Option<String> {
    let value = value.trim();
    if value.contains("gradient") || value.contains("url(") {
        return None;
    }
    normalize_color(value).or_else(|| value.split_whitespace().find_map(normalize_color))
}

fn interactive_selector(selector: &str) -> bool {
    selector.contains(":hover") || selector.contains(":focus") || selector.contains(":active")
}

fn interactive_body(body: &str) -> bool {
    Regex::new(r"cursor\s*:\s*pointer")
        .expect("cursor regex")
        .is_match(body)
}

fn has_gradient_background(body: &str) -> bool {
    Regex::new(r"background[^;}]*(?:gradient\(|url\()")
        .expect("gradient regex")
        .is_match(body)
}

fn has_border(body: &str) -> bool {
    let border = Regex::new(
        r"(?:^|[;{\s])border(?:-(?:top|right|bottom|left))?(?:-color|-width|-style)?\s*:\s*([^;}]+)",
    )
    .expect("border decl regex");
    border.captures_iter(body).any(|capture| {
        let value = capture[1].trim().to_lowercase();
        value != "none" && value != "0"
    })
}

/// DOM-occurrence estimate: count literal class/id/tag appearances in the
/// HTML text.
fn dom_frequency(selector: &str, html: &str) -> usize {
    if let Some(class) = leading_name(selector, '.') {
        return count_occurrences(html, &class);
    }
    if let Some(id) = leading_name(selector, '#') {
        return count_occurrences(html, &format!("id=\"{id}\""));
    }
    let elements = element_tokens(&selector.to_lowercase());
    if let Some(tag) = elements.first() {
        return count_occurrences(html, &format!("<{tag}"));
    }
    0
}

fn leading_name(selector: &str, sigil: char) -> Option<String> {
    let start = selector.find(sigil)?;
    let name: String = selector[start + 1..]
        .chars()
        .take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '_')
        .collect();
    if name.is_empty() { None } else { Some(name) }
}

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_badge_resolves_to_navigation() {
        // Precedence pin: nav outranks badge in the cascade, always.
        for _ in 0..3 {
            assert_eq!(
                categorize(".nav-badge-primary"),
                SelectorCategory::Navigation
            );
        }
        assert_eq!(categorize(".badge-pill"), SelectorCategory::Badge);
    }

    #[test]
    fn cascade_overlaps_are_pinned() {
        // btn + icon -> button wins by position.
        assert_eq!(categorize(".btn-icon"), SelectorCategory::Button);
        // header + nav -> header wins by position.
        assert_eq!(categorize(".header-nav"), SelectorCategory::Header);
        // table is not swallowed by the tab keywords.
        assert_eq!(categorize(".table-striped"), SelectorCategory::Table);
        assert_eq!(categorize(".tabs"), SelectorCategory::Tab);
    }

    #[test]
    fn elements_categorize_without_keywords() {
        assert_eq!(categorize("a:hover"), SelectorCategory::Link);
        assert_eq!(categorize("pre"), SelectorCategory::Code);
        assert_eq!(categorize("h2"), SelectorCategory::Text);
        assert_eq!(categorize("div.widget"), SelectorCategory::Other);
    }

    #[test]
    fn specificity_formula() {
        assert_eq!(specificity("#main"), 100);
        assert_eq!(specificity(".card"), 10);
        assert_eq!(specificity("div"), 1);
        assert_eq!(specificity("#main .card a:hover"), 121);
        assert_eq!(specificity("input[type=\"text\"]"), 11);
    }

    #[test]
    fn discovers_styles_and_flags() {
        let css = ".cta { color: #fff; background-color: #1a73e8; cursor: pointer; } \
                   .muted { color: rgb(100, 100, 100); }";
        let groups = discover_selectors(css, "");
        let cta = groups
            .iter()
            .flat_map(|g| &g.selectors)
            .find(|f| f.selector == ".cta")
            .expect("cta discovered");
        assert_eq!(cta.category, SelectorCategory::Button);
        assert_eq!(cta.styles.color.as_deref(), Some("#FFFFFF"));
        assert_eq!(cta.styles.background_color.as_deref(), Some("#1A73E8"));
        assert!(cta.is_interactive);
        assert!(cta.has_visible_background);
        assert!(!cta.is_text_only);

        let muted = groups
            .iter()
            .flat_map(|g| &g.selectors)
            .find(|f| f.selector == ".muted")
            .expect("muted discovered");
        assert!(muted.is_text_only);
        assert!(!muted.is_interactive);
    }

    #[test]
    fn gradient_backgrounds_never_become_flat_colors() {
        let css = ".fancy { background: linear-gradient(45deg, #ff0000, #0000ff); }";
        let groups = discover_selectors(css, "");
        let fancy = &groups[0].selectors[0];
        assert_eq!(fancy.styles.background_color, None);
        assert!(fancy.has_gradient_background);
    }

    #[test]
    fn transparent_background_is_not_visible() {
        let css = ".ghost { background-color: transparent; color: #000; }";
        let groups = discover_selectors(css, "");
        let ghost = &groups[0].selectors[0];
        assert!(!ghost.has_visible_background);
        assert!(ghost.is_text_only);
    }

    #[test]
    fn merges_repeated_selectors() {
        let css = ".btn { color: #111111; } .btn { background-color: #222222; }";
        let groups = discover_selectors(css, "");
        let all: Vec<&SelectorFact> = groups.iter().flat_map(|g| &g.selectors).collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].styles.color.as_deref(), Some("#111111"));
        assert_eq!(all[0].styles.background_color.as_deref(), Some("#222222"));
        assert_eq!(all[0].frequency, 2);
    }

    #[test]
    fn dom_occurrences_raise_frequency() {
        let css = ".pill { color: #333; }";
        let html = r#"<span class="pill">a</span><span class="pill">b</span><span class="pill">c</span>"#;
        let groups = discover_selectors(css, html);
        assert_eq!(groups[0].selectors[0].frequency, 3);
    }

    #[test]
    fn skips_pseudo_elements_and_at_rules() {
        let css = ".a::before { color: #fff; } .b { color: #000; }";
        let groups = discover_selectors(css, "");
        let all: Vec<&str> = groups
            .iter()
            .flat_map(|g| &g.selectors)
            .map(|f| f.selector.as_str())
            .collect();
        assert_eq!(all, vec![".b"]);
    }

    #[test]
    fn comma_lists_split_into_individuals() {
        let css = "h1, h2, .title { color: #eee; }";
        let groups = discover_selectors(css, "");
        let count: usize = groups.iter().map(|g| g.selectors.len()).sum();
        assert_eq!(count, 3);
    }

    #[test]
    fn filter_colored_drops_empty_styles() {
        let css = ".plain { margin: 0; } .tinted { color: #123123; }";
        let groups = filter_colored(discover_selectors(css, ""));
        let all: Vec<&str> = groups
            .iter()
            .flat_map(|g| &g.selectors)
            .map(|f| f.selector.as_str())
            .collect();
        assert_eq!(all, vec![".tinted"]);
    }
}
