use restyle_analyze::{PageInput, analyze_page};
use restyle_model::{ColorScheme, DesignSystem, SelectorCategory, VariableScope};

const HTML: &str = r##"<!doctype html>
<html class="dark">
<head><title>Acme</title></head>
<body>
  <nav class="navbar"><a class="nav-link" href="/">Home</a></nav>
  <div class="site-logo"><svg width="32" height="32"><path fill="#1a73e8"/></svg></div>
  <button class="btn btn-primary">Go</button>
  <button class="btn btn-primary">Stop</button>
  <p class="lead" style="--inline-spot: #ff8800">hello</p>
</body>
</html>"##;

const CSS: &str = r##"
:root {
  --bs-primary: #1a73e8;
  --bs-body-bg: #0d1117;
  --bs-body-color: #e6edf3;
}
body { background-color: var(--bs-body-bg); color: var(--bs-body-color); }
.btn-primary {
  color: #ffffff;
  background-color: var(--bs-primary);
  cursor: pointer;
}
.btn-primary:hover { background-color: #1557b0; }
.nav-link { color: #58a6ff; }
.navbar { background-color: #161b22; border-bottom-color: #30363d; }
@media (max-width: 600px) {
  .navbar { background-color: #0d1117; }
}
.decoration::after { color: #ff0000; }
"##;

fn snapshot() -> restyle_model::AnalysisSnapshot {
    analyze_page(&PageInput {
        url: "https://acme.example/app".to_string(),
        html: HTML.to_string(),
        css: CSS.to_string(),
        branding_colors: vec!["#1a73e8".to_string()],
    })
}

#[test]
fn full_page_analysis_composes_all_stages() {
    let snapshot = snapshot();

    assert_eq!(snapshot.counts.variables, 4);
    assert_eq!(snapshot.counts.svgs, 1);
    assert!(snapshot.counts.selectors >= 4);
    assert_eq!(snapshot.color_scheme, ColorScheme::Dark);
    assert_eq!(snapshot.design_system.system, DesignSystem::Bootstrap);
    assert_eq!(snapshot.dominant_colors[0], "#1A73E8");
}

#[test]
fn variables_carry_scope_and_usage() {
    let snapshot = snapshot();
    let primary = snapshot
        .variables
        .iter()
        .find(|fact| fact.name == "--bs-primary")
        .expect("primary variable");
    assert_eq!(primary.scope, VariableScope::Root);
    assert_eq!(primary.computed.as_deref(), Some("#1A73E8"));
    assert!(primary.usage.contains(".btn-primary"));

    let inline = snapshot
        .variables
        .iter()
        .find(|fact| fact.name == "--inline-spot")
        .expect("inline variable");
    assert_eq!(inline.scope, VariableScope::Element);
    assert_eq!(inline.frequency, 0);
}

#[test]
fn selector_groups_are_categorized_and_colored_only() {
    let snapshot = snapshot();
    let categories: Vec<SelectorCategory> = snapshot
        .selector_groups
        .iter()
        .map(|group| group.category)
        .collect();
    assert!(categories.contains(&SelectorCategory::Button));
    assert!(categories.contains(&SelectorCategory::Navigation));

    // Pseudo-element rules never survive discovery.
    assert!(
        snapshot
            .selectors()
            .all(|fact| !fact.selector.contains("::"))
    );
    // The colored filter leaves no style-less selectors behind.
    assert!(snapshot.selectors().all(|fact| !fact.styles.is_empty()));
}

#[test]
fn media_query_rules_merge_into_existing_selectors() {
    let snapshot = snapshot();
    let navbar_count = snapshot
        .selectors()
        .filter(|fact| fact.selector == ".navbar")
        .count();
    assert_eq!(navbar_count, 1);
}

#[test]
fn zero_signal_page_yields_empty_snapshot() {
    let snapshot = analyze_page(&PageInput {
        url: "https://blank.example".to_string(),
        html: "<p>plain</p>".to_string(),
        css: String::new(),
        branding_colors: Vec::new(),
    });
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.counts, restyle_model::DiscoveryCounts::default());
    assert_eq!(snapshot.design_system.system, DesignSystem::Unknown);
}
