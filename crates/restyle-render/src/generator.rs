//! Theme document rendering.
//!
//! One renderer drives all emission variants; the variant only changes
//! how the palette is bound (baked hex table vs. imported library) and
//! whether per-property accent logic is applied. Section order is fixed:
//! palette application, variables, svgs, selectors, gradients, fallbacks.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use tracing::{debug, warn};

use restyle_analyze::css::selector_is_balanced;
use restyle_model::{
    AnalysisSnapshot, CoverageSummary, GeneratedTheme, GeneratorOptions, GeneratorVariant,
    MappingResult, PaletteToken, SelectorMapping, ThemeMetadata, ThemeSections,
};

use crate::scope::sanitized_host;

/// Generator version tag recorded in theme metadata.
const GENERATOR_TAG: &str = "restyle/0.1.0";

/// Class-name fragments that indicate a gradient-clipped text effect the
/// theme must not repaint.
const GRADIENT_TEXT_GUARDS: [&str; 3] = ["gradient-text", "text-gradient", "gradient-heading"];

/// Render the theme document for one mapping result.
#[must_use]
pub fn render_theme(
    snapshot: &AnalysisSnapshot,
    mapping: &MappingResult,
    options: &GeneratorOptions,
) -> GeneratedTheme {
    let host = sanitized_host(&options.url);
    let sections = ThemeSections {
        variables: variables_section(mapping, options),
        svgs: svgs_section(snapshot, mapping, options),
        selectors: selectors_section(mapping, options),
        gradients: gradients_section(mapping, options),
        fallbacks: fallbacks_section(options),
    };

    let mut text = String::new();
    push_header(&mut text, &host, snapshot, options);
    text.push_str("@import \"restyle-palette\";\n\n");
    let _ = writeln!(text, "@-moz-document domain(\"{host}\") {{");
    push_palette_binding(&mut text, options);
    for (name, body) in [
        ("variables", &sections.variables),
        ("svgs", &sections.svgs),
        ("selectors", &sections.selectors),
        ("gradients", &sections.gradients),
        ("fallbacks", &sections.fallbacks),
    ] {
        if body.is_empty() {
            continue;
        }
        let _ = writeln!(text, "  /* section: {name} */");
        text.push_str(body);
        text.push('\n');
    }
    text.push_str("}\n");

    let coverage = CoverageSummary {
        variables_pct: mapping.variable_stats.coverage(),
        svgs_pct: mapping.svg_stats.coverage(),
        selectors_pct: mapping.selector_stats.coverage(),
    };
    debug!(
        host = %host,
        variant = options.variant.as_str(),
        bytes = text.len(),
        "theme rendered"
    );
    GeneratedTheme {
        text,
        metadata: ThemeMetadata {
            source_url: options.url.clone(),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            color_scheme: snapshot.color_scheme,
            design_system: snapshot.design_system.system,
            flavor: options.flavor,
            accent: options.accent,
            variant: options.variant,
            generator: GENERATOR_TAG.to_string(),
        },
        sections,
        coverage,
    }
}

/// Render and write the document text to disk.
pub fn write_theme(output_path: &Path, theme: &GeneratedTheme) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(output_path, &theme.text)
        .with_context(|| format!("write {}", output_path.display()))
}

fn push_header(text: &mut String, host: &str, snapshot: &AnalysisSnapshot, options: &GeneratorOptions) {
    let _ = writeln!(text, "/* ==UserStyle==");
    let _ = writeln!(text, "@name           Restyle - {host}");
    let _ = writeln!(text, "@namespace      restyle");
    let _ = writeln!(text, "@version        0.1.0");
    let _ = writeln!(text, "@author         restyle contributors");
    let _ = writeln!(
        text,
        "@description    Generated {} {} theme ({} variant, detected {})",
        options.flavor.as_str(),
        options.accent.as_str(),
        options.variant.as_str(),
        snapshot.design_system.system.as_str()
    );
    let _ = writeln!(text, "@updateURL      about:blank");
    let _ = writeln!(text, "==/UserStyle== */");
}

/// Bind the palette for the chosen variant: inline hex for `Baked`, the
/// imported library plus a mode procedure for the dynamic variants. Also
/// defines the accent aliases every later section references.
fn push_palette_binding(text: &mut String, options: &GeneratorOptions) {
    let (bi_first, bi_second) = options.accent.bi_accents();
    if options.variant == GeneratorVariant::Baked {
        let _ = writeln!(text, "  /* palette: {} (baked) */", options.flavor.as_str());
        for token in PaletteToken::ALL {
            let _ = writeln!(
                text,
                "  @{}: {};",
                token.as_str(),
                token.hex(options.flavor)
            );
        }
    }
    let _ = writeln!(text, "  @accent: @{};", options.accent.as_str());
    let _ = writeln!(text, "  @accent2: @{};", bi_first.as_str());
    let _ = writeln!(text, "  @accent3: @{};", bi_second.as_str());
    text.push('\n');

    if options.variant == GeneratorVariant::Baked {
        let _ = writeln!(
            text,
            "  body {{ background-color: @base; color: @text; color-scheme: {}; }}",
            if options.flavor.is_dark() { "dark" } else { "light" }
        );
    } else {
        text.push_str("  .restyle-mode() {\n");
        text.push_str("    background-color: @base;\n");
        text.push_str("    color: @text;\n");
        text.push_str("  }\n");
        text.push_str("  body { .restyle-mode(); color-scheme: dark; }\n");
        text.push_str("  @media (prefers-color-scheme: light) {\n");
        text.push_str("    body { .restyle-mode(); color-scheme: light; }\n");
        text.push_str("  }\n");
    }
    text.push('\n');
}

/// (d) One rule overriding every mapped custom property.
fn variables_section(mapping: &MappingResult, options: &GeneratorOptions) -> String {
    if mapping.variables.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    out.push_str("  :root {\n");
    for variable in &mapping.variables {
        if options.verbose_comments {
            let _ = writeln!(out, "    /* {} */", variable.justification);
        }
        let _ = writeln!(out, "    {}: @{};", variable.name, variable.token.as_str());
    }
    out.push_str("  }\n");
    out
}

/// (e) Re-colored copies of each mapped SVG, scoped to their owners.
fn svgs_section(
    snapshot: &AnalysisSnapshot,
    mapping: &MappingResult,
    options: &GeneratorOptions,
) -> String {
    let mut out = String::new();
    for (svg_index, svg) in snapshot.svgs.iter().enumerate() {
        let substitutions: Vec<_> = mapping
            .svgs
            .iter()
            .filter(|m| m.svg_index == svg_index)
            .collect();
        if substitutions.is_empty() {
            continue;
        }
        let Some(owner) = svg.owner.as_deref() else {
            continue;
        };
        if !selector_is_balanced(owner) {
            warn!(owner, "dropping svg rule with unbalanced owner selector");
            continue;
        }
        let collapsed = svg.markup.split_whitespace().collect::<Vec<_>>().join(" ");
        let mut markup = encode_svg(&collapsed);
        for substitution in &substitutions {
            markup = markup.replace(
                &encode_svg(&substitution.literal),
                &format!("@{{{}}}", substitution.token.as_str()),
            );
        }
        if options.verbose_comments {
            let _ = writeln!(out, "  /* {:?} svg, {} colors */", svg.purpose, substitutions.len());
        }
        let _ = writeln!(out, "  {owner} {{");
        let _ = writeln!(
            out,
            "    background-image: url('data:image/svg+xml;utf8,{markup}') !important;"
        );
        out.push_str("  }\n");
    }
    out
}

/// Percent-encode the characters that would break the surrounding CSS
/// (quotes, braces, semicolons) or the data-URI grammar. Token
/// interpolations are substituted after encoding, so they stay literal.
fn encode_svg(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    for ch in markup.chars() {
        match ch {
            '#' => out.push_str("%23"),
            ';' => out.push_str("%3B"),
            ':' => out.push_str("%3A"),
            '{' => out.push_str("%7B"),
            '}' => out.push_str("%7D"),
            '\'' => out.push_str("%27"),
            '"' => out.push_str("%22"),
            '%' => out.push_str("%25"),
            _ => out.push(ch),
        }
    }
    out
}

/// (f) One rule block per selector mapping.
fn selectors_section(mapping: &MappingResult, options: &GeneratorOptions) -> String {
    let mut out = String::new();
    for selector in &mapping.selectors {
        if !selector_is_balanced(&selector.selector) {
            warn!(
                selector = %selector.selector,
                "dropping unbalanced selector from emission"
            );
            continue;
        }
        let entries = resolved_entries(selector, options.variant);
        if entries.is_empty() {
            continue;
        }
        if options.verbose_comments {
            let _ = writeln!(out, "  /* {} */", selector.justification);
        }
        let _ = writeln!(out, "  {} {{", selector.selector);
        let priority = if selector.important { " !important" } else { "" };
        for (property, token) in entries {
            let _ = writeln!(out, "    {property}: @{}{priority};", token.as_str());
        }
        out.push_str("  }\n");
    }
    out
}

/// Per-property tokens, with the refined variant's accent-on-accent
/// avoidance: when both background and text landed on accents, the text
/// falls back to `base` for contrast.
fn resolved_entries(
    selector: &SelectorMapping,
    variant: GeneratorVariant,
) -> Vec<(&'static str, PaletteToken)> {
    let mut entries = selector.entries();
    if variant == GeneratorVariant::Refined
        && selector.accent_role.is_some()
        && selector.background_color.is_some_and(|t| t.is_accent())
    {
        for entry in &mut entries {
            if entry.0 == "color" && entry.1.is_accent() {
                entry.1 = PaletteToken::Base;
            }
        }
    }
    entries
}

/// (g) Hover gradients for interactive accent-bearing selectors.
fn gradients_section(mapping: &MappingResult, options: &GeneratorOptions) -> String {
    let mut out = String::new();
    for selector in &mapping.selectors {
        let Some(gradient) = &selector.hover_gradient else {
            continue;
        };
        if !selector_is_balanced(&selector.selector) {
            continue;
        }
        if options.verbose_comments {
            let _ = writeln!(
                out,
                "  /* hover gradient {} -> {} */",
                gradient.from.as_str(),
                gradient.to.as_str()
            );
        }
        let hover_selector = if selector.selector.contains(":hover") {
            selector.selector.clone()
        } else {
            format!("{}:hover", selector.selector)
        };
        let _ = writeln!(out, "  {hover_selector} {{");
        let _ = writeln!(
            out,
            "    background: linear-gradient({}deg, @{}, @{}) !important;",
            gradient.angle_deg,
            gradient.from.as_str(),
            gradient.to.as_str()
        );
        out.push_str("  }\n");
    }
    out
}

/// (h) Defensive guards: gradient-text reverts plus generic defaults for
/// elements no explicit mapping covered.
fn fallbacks_section(options: &GeneratorOptions) -> String {
    let mut out = String::new();

    let guards: Vec<String> = GRADIENT_TEXT_GUARDS
        .iter()
        .map(|fragment| format!("[class*=\"{fragment}\"]"))
        .collect();
    if options.verbose_comments {
        out.push_str("  /* keep gradient-clipped text effects intact */\n");
    }
    let _ = writeln!(out, "  {} {{", guards.join(", "));
    out.push_str("    color: revert !important;\n");
    out.push_str("    background: revert !important;\n");
    out.push_str("    background-clip: revert !important;\n");
    out.push_str("    -webkit-background-clip: revert !important;\n");
    out.push_str("    -webkit-text-fill-color: revert !important;\n");
    out.push_str("  }\n");

    out.push_str("  h1, h2, h3, h4, h5, h6 { color: @text; }\n");
    out.push_str("  a:not([class]) { color: @accent; }\n");
    out.push_str(
        "  button:not([class]) { background-color: @accent; color: @base; border-color: @accent2; }\n",
    );
    out.push_str(
        "  input:not([class]), textarea:not([class]), select:not([class]) {\n    background-color: @surface0; color: @text; border-color: @overlay0;\n  }\n",
    );
    out.push_str("  .badge { background-color: @accent2; color: @base; }\n");
    out
}
