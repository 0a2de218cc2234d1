use restyle_analyze::{PageInput, analyze_page};
use restyle_map::MapperEngine;
use restyle_model::{
    AccentColor, AnalysisSnapshot, Flavor, GeneratorOptions, GeneratorVariant, MapperOptions,
    MappingResult, PaletteToken,
};
use restyle_render::{PLACEHOLDER_HOST, render_theme};
use restyle_validate::validate_theme;

const CSS: &str = r#"
:root { --brand: #1a73e8; --ink: #222222; }
.buy-button { background-color: #89b4fa; color: #11111b; cursor: pointer; }
.nav-badge-primary { color: #89b4fa; }
.muted { color: #777777; }
"#;

const HTML: &str = r##"<div class="site-logo"><svg><path fill="#1a73e8"/></svg></div>"##;

fn mapped(css: &str, html: &str) -> (AnalysisSnapshot, MappingResult) {
    let snapshot = analyze_page(&PageInput {
        url: "https://acme.example/shop".to_string(),
        html: html.to_string(),
        css: css.to_string(),
        branding_colors: Vec::new(),
    });
    let engine = MapperEngine::new(
        MapperOptions::heuristic_only(),
        Flavor::Mocha,
        AccentColor::Blue,
    );
    let result = engine.map(&snapshot);
    (snapshot, result)
}

fn options(variant: GeneratorVariant) -> GeneratorOptions {
    GeneratorOptions {
        variant,
        ..GeneratorOptions::new("https://acme.example/shop")
    }
}

#[test]
fn dynamic_theme_is_structurally_valid() {
    let (snapshot, mapping) = mapped(CSS, HTML);
    let theme = render_theme(&snapshot, &mapping, &options(GeneratorVariant::Dynamic));

    assert!(theme.text.contains("domain(\"acme.example\")"));
    assert!(theme.text.contains("@import \"restyle-palette\";"));
    assert!(theme.text.contains("--brand: @blue;"));
    assert!(!theme.sections.variables.is_empty());
    assert!(!theme.sections.selectors.is_empty());
    assert!(!theme.sections.fallbacks.is_empty());

    let report = validate_theme(&theme);
    assert!(report.is_valid(), "issues: {:?}", report.issues);
}

#[test]
fn every_variant_renders_and_validates() {
    let (snapshot, mapping) = mapped(CSS, HTML);
    for variant in [
        GeneratorVariant::Baked,
        GeneratorVariant::Dynamic,
        GeneratorVariant::Refined,
    ] {
        let theme = render_theme(&snapshot, &mapping, &options(variant));
        assert_eq!(theme.metadata.variant, variant);
        let report = validate_theme(&theme);
        assert!(
            report.is_valid(),
            "{} variant issues: {:?}",
            variant.as_str(),
            report.issues
        );
    }
}

#[test]
fn baked_variant_inlines_the_flavor_hex_table() {
    let (snapshot, mapping) = mapped(CSS, HTML);
    let theme = render_theme(&snapshot, &mapping, &options(GeneratorVariant::Baked));
    assert!(theme.text.contains("@base: #1e1e2e;"));
    assert!(theme.text.contains("@blue: #89b4fa;"));
    // The dynamic mode procedure does not exist in the baked output.
    assert!(!theme.text.contains(".restyle-mode"));
}

#[test]
fn refined_variant_avoids_accent_on_accent_text() {
    let css = ".cta-button { background-color: #89b4fa; color: #f5c2e7; cursor: pointer; }";
    let (snapshot, mapping) = mapped(css, "");
    let refined = render_theme(&snapshot, &mapping, &options(GeneratorVariant::Refined));
    let rule_start = refined
        .sections
        .selectors
        .find(".cta-button")
        .expect("cta rule");
    let rule = &refined.sections.selectors[rule_start..];
    let rule = &rule[..rule.find('}').expect("rule end")];
    assert!(rule.contains("background-color: @blue"));
    assert!(rule.contains("color: @base"));
}

#[test]
fn unbalanced_selectors_are_dropped_not_emitted() {
    let css = "div:not(.valid { color: #ff0000; } .ok { color: #00ff00; }";
    let (snapshot, mapping) = mapped(css, "");
    let theme = render_theme(&snapshot, &mapping, &options(GeneratorVariant::Dynamic));
    assert!(!theme.text.contains("div:not(.valid"));
    let report = validate_theme(&theme);
    assert!(report.is_valid(), "issues: {:?}", report.issues);
}

#[test]
fn svg_rules_reference_tokens_not_hex() {
    let (snapshot, mapping) = mapped("", HTML);
    let theme = render_theme(&snapshot, &mapping, &options(GeneratorVariant::Dynamic));
    assert!(theme.sections.svgs.contains(".site-logo"));
    // The source hex is gone; a token interpolation took its place.
    let token = format!("@{{{}}}", mapping.svgs[0].token.as_str());
    assert!(theme.sections.svgs.contains(&token));
    assert!(!theme.sections.svgs.to_lowercase().contains("1a73e8"));
}

#[test]
fn hover_gradient_rules_appear_for_interactive_accents() {
    let (snapshot, mapping) = mapped(CSS, "");
    let theme = render_theme(&snapshot, &mapping, &options(GeneratorVariant::Dynamic));
    assert!(
        theme
            .sections
            .gradients
            .contains("linear-gradient(135deg, @blue, @pink)")
    );
}

#[test]
fn invalid_target_urls_scope_to_the_placeholder() {
    let (snapshot, mapping) = mapped(CSS, "");
    let theme = render_theme(
        &snapshot,
        &mapping,
        &GeneratorOptions::new("file:///tmp/saved-page.html"),
    );
    assert!(theme.text.contains(&format!("domain(\"{PLACEHOLDER_HOST}\")")));
    assert!(validate_theme(&theme).is_valid());
}

#[test]
fn zero_signal_page_yields_valid_theme_with_coverage_warning() {
    let (snapshot, mapping) = mapped("", "");
    assert_eq!(mapping.variable_stats.total, 0);
    let theme = render_theme(&snapshot, &mapping, &options(GeneratorVariant::Dynamic));
    let report = validate_theme(&theme);
    assert!(report.is_valid());
    assert!(
        report
            .issues
            .iter()
            .any(|issue| issue.code == "COVERAGE_EMPTY")
    );
    assert_eq!(theme.coverage.variables_pct, 100.0);
}

#[test]
fn coverage_summary_reflects_mapping_stats() {
    let (snapshot, mapping) = mapped(CSS, HTML);
    let theme = render_theme(&snapshot, &mapping, &options(GeneratorVariant::Dynamic));
    assert_eq!(theme.coverage.variables_pct, 100.0);
    assert_eq!(theme.coverage.selectors_pct, 100.0);
    assert_eq!(theme.metadata.flavor, Flavor::Mocha);
    assert_eq!(theme.metadata.generator, "restyle/0.1.0");
    // The document references only palette members or local aliases.
    assert!(theme.text.contains(&format!("@accent: @{};", PaletteToken::Blue.as_str())));
}
