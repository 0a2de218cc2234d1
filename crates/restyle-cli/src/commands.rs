//! Command implementations for the restyle binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use restyle_analyze::{PageInput, analyze_page};
use restyle_cli::{PipelineRequest, run_pipeline};
use restyle_model::{
    ACCENT_WHEEL, AccentUsage, CoverageSummary, DiscoveryCounts, KindStats, MapperOptions,
    ValidationIssue,
};
use restyle_render::write_theme;

use crate::cli::{AnalyzeArgs, ThemeArgs};
use crate::types::ThemeRunResult;

const REPORT_SCHEMA: &str = "restyle.theme-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct ThemeReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    url: &'a str,
    flavor: &'a str,
    accent: &'a str,
    variant: &'a str,
    design_system: &'a str,
    coverage: CoverageSummary,
    counts: DiscoveryCounts,
    variable_stats: KindStats,
    svg_stats: KindStats,
    selector_stats: KindStats,
    accent_usage: AccentUsage,
    mapping_issues: &'a [ValidationIssue],
    output_issues: &'a [ValidationIssue],
}

/// Run the full pipeline over local page files and write the outputs.
pub fn run_theme(args: &ThemeArgs) -> Result<ThemeRunResult> {
    let html = read_file(&args.html)?;
    let css = read_css(&args.css)?;

    let request = PipelineRequest {
        url: args.url.clone(),
        html,
        css,
        branding_colors: args.branding_colors.clone(),
        flavor: args.flavor,
        accent: args.accent,
        mapper: MapperOptions {
            map_variables: !args.no_variables,
            map_svgs: !args.no_svgs,
            map_selectors: !args.no_selectors,
            selector_limit: args.selector_limit,
            ..MapperOptions::heuristic_only()
        },
        variant: args.variant.into(),
        verbose_comments: args.verbose_comments,
    };
    let outcome = run_pipeline(&request, None);

    let theme_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("restyle.theme.less"));
    let report_path = args.report.clone().unwrap_or_else(|| {
        theme_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("theme_report.json")
    });

    if args.dry_run {
        info!("dry run; skipping output files");
        return Ok(ThemeRunResult {
            url: args.url.clone(),
            outcome,
            theme_path: None,
            report_path: None,
        });
    }

    write_theme(&theme_path, &outcome.theme)?;
    write_report(&report_path, &args.url, &outcome)?;
    info!(
        theme = %theme_path.display(),
        report = %report_path.display(),
        "outputs written"
    );
    Ok(ThemeRunResult {
        url: args.url.clone(),
        outcome,
        theme_path: Some(theme_path),
        report_path: Some(report_path),
    })
}

/// Analyze a page and emit the snapshot JSON.
pub fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let html = read_file(&args.html)?;
    let css = read_css(&args.css)?;
    let snapshot = analyze_page(&PageInput {
        url: args.url.clone(),
        html,
        css,
        branding_colors: Vec::new(),
    });
    let json = serde_json::to_string_pretty(&snapshot).context("serialize snapshot")?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("write {}", path.display()))?;
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Print the palette vocabulary.
pub fn run_palette() -> Result<()> {
    println!("Accent wheel (bi-accents sit three steps apart):");
    let wheel: Vec<&str> = ACCENT_WHEEL.iter().map(|accent| accent.as_str()).collect();
    println!("  {}", wheel.join(" -> "));
    println!();
    crate::summary::print_palette_table();
    Ok(())
}

fn write_report(path: &Path, url: &str, outcome: &restyle_cli::PipelineOutcome) -> Result<()> {
    let metadata = &outcome.theme.metadata;
    let payload = ThemeReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        url,
        flavor: metadata.flavor.as_str(),
        accent: metadata.accent.as_str(),
        variant: metadata.variant.as_str(),
        design_system: metadata.design_system.as_str(),
        coverage: outcome.theme.coverage,
        counts: outcome.analysis.counts,
        variable_stats: outcome.mappings.variable_stats,
        svg_stats: outcome.mappings.svg_stats,
        selector_stats: outcome.mappings.selector_stats,
        accent_usage: outcome.mappings.accent_usage,
        mapping_issues: &outcome.mapping_check.report.issues,
        output_issues: &outcome.output_report.issues,
    };
    let json = serde_json::to_string_pretty(&payload).context("serialize report")?;
    std::fs::write(path, format!("{json}\n")).with_context(|| format!("write {}", path.display()))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn read_css(paths: &[PathBuf]) -> Result<String> {
    let mut combined = String::new();
    for path in paths {
        combined.push_str(&read_file(path)?);
        combined.push('\n');
    }
    Ok(combined)
}
