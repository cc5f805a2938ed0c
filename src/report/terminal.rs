use std::collections::BTreeMap;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{Diagnostic, DiagnosticKind, Severity};

/// Print each diagnostic: info and warnings to stdout, errors to stderr.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let tag = label(diagnostic.severity);
        match diagnostic.severity {
            Severity::Info => print!("\n{} {}", tag.cyan(), diagnostic.message),
            Severity::Warning => print!("\n{} {}", tag.yellow(), diagnostic.message),
            Severity::Error => eprint!("\n{} {}", tag.red().bold(), diagnostic.message),
        }
    }
    if !diagnostics.is_empty() {
        println!();
        eprintln!();
    }
}

fn label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info::",
        Severity::Warning => "warn::",
        Severity::Error => "err ::",
    }
}

/// Print a count of diagnostics per kind to stderr.
pub fn render_summary(diagnostics: &[Diagnostic], packages: usize) {
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();

    eprintln!(
        "\n {} {} packages audited, {} errors",
        "pkg-license-audit".bold(),
        packages,
        if errors > 0 {
            errors.to_string().red()
        } else {
            errors.to_string().green()
        }
    );
    if diagnostics.is_empty() {
        return;
    }
    eprintln!("{}", summary_table(diagnostics));
}

fn summary_table(diagnostics: &[Diagnostic]) -> Table {
    let mut counts: BTreeMap<(DiagnosticKind, Severity), usize> = BTreeMap::new();
    for d in diagnostics {
        *counts.entry((d.kind, d.severity)).or_insert(0) += 1;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Finding").add_attribute(Attribute::Bold),
            Cell::new("Severity").add_attribute(Attribute::Bold),
            Cell::new("Count").add_attribute(Attribute::Bold),
        ]);

    for ((kind, severity), count) in counts {
        let color = match severity {
            Severity::Info => Color::Cyan,
            Severity::Warning => Color::Yellow,
            Severity::Error => Color::Red,
        };
        table.add_row(vec![
            Cell::new(kind.to_string()),
            Cell::new(severity.to_string()).fg(color),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}
