//! Terminal summary tables for pipeline runs and the palette listing.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Color, Table};

use restyle_model::{Flavor, IssueSeverity, PaletteToken, ValidationIssue};

use crate::types::ThemeRunResult;

pub fn print_summary(result: &ThemeRunResult) {
    println!("Page: {}", result.url);
    let metadata = &result.outcome.theme.metadata;
    println!(
        "Theme: {} / {} ({} variant), detected {} {:?} page",
        metadata.flavor.as_str(),
        metadata.accent.as_str(),
        metadata.variant.as_str(),
        metadata.design_system.as_str(),
        metadata.color_scheme,
    );
    if let Some(path) = &result.theme_path {
        println!("Output: {}", path.display());
    }
    if let Some(path) = &result.report_path {
        println!("Report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Discovered"),
        header_cell("Mapped"),
        header_cell("Coverage"),
    ]);
    apply_table_style(&mut table);
    for index in 1..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mappings = &result.outcome.mappings;
    let rows = [
        ("variables", mappings.variable_stats),
        ("svgs", mappings.svg_stats),
        ("selectors", mappings.selector_stats),
    ];
    for (kind, stats) in rows {
        table.add_row(vec![
            Cell::new(kind).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(stats.total),
            Cell::new(stats.mapped),
            coverage_cell(stats.coverage()),
        ]);
    }
    println!("{table}");

    let usage = mappings.accent_usage;
    if usage.total() > 0 {
        println!(
            "Accent roles: {} main / {} secondary / {} tertiary",
            usage.main, usage.secondary, usage.tertiary
        );
    }
    print_issue_table(result);
}

fn print_issue_table(result: &ThemeRunResult) {
    let mut issues: Vec<(&str, &ValidationIssue)> = Vec::new();
    for issue in &result.outcome.mapping_check.report.issues {
        issues.push(("mapping", issue));
    }
    for issue in &result.outcome.output_report.issues {
        issues.push(("output", issue));
    }
    if issues.is_empty() {
        return;
    }
    issues.sort_by_key(|(_, issue)| match issue.severity {
        IssueSeverity::Error => 0,
        IssueSeverity::Warning => 1,
    });

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Subject"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for (stage, issue) in issues {
        table.add_row(vec![
            Cell::new(stage),
            severity_cell(issue.severity),
            Cell::new(&issue.code),
            Cell::new(issue.subject.as_deref().unwrap_or("-")),
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

/// Palette listing for the `palette` subcommand: every token's hex value
/// per flavor.
pub fn print_palette_table() {
    let mut table = Table::new();
    let mut header = vec![header_cell("Token")];
    for flavor in Flavor::ALL {
        header.push(header_cell(flavor.as_str()));
    }
    table.set_header(header);
    apply_table_style(&mut table);
    for token in PaletteToken::ALL {
        let name_cell = if token.is_accent() {
            Cell::new(token.as_str())
                .fg(Color::Magenta)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(token.as_str())
        };
        let mut row = vec![name_cell];
        for flavor in Flavor::ALL {
            row.push(Cell::new(token.hex(flavor)));
        }
        table.add_row(row);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn coverage_cell(percentage: f64) -> Cell {
    let label = format!("{percentage:.0}%");
    if percentage >= 100.0 {
        Cell::new(label).fg(Color::Green)
    } else if percentage >= 50.0 {
        Cell::new(label).fg(Color::Yellow)
    } else {
        Cell::new(label).fg(Color::Red)
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR").fg(Color::Red),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
