//! Display formatting for CLI output
//!
//! Everything here goes to stderr: stdout may carry the converted document.

use console::style;
use dark_convert::{Conversion, ConversionWarning, WarningCategory, WarningSeverity};
use std::collections::BTreeMap;

/// How much of the conversion report to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

/// Print the notes and summary of a conversion
pub fn print_report(conversion: &Conversion, source: &str, destination: &str, verbosity: Verbosity) {
    if verbosity == Verbosity::Quiet {
        return;
    }

    print_header(source, destination);
    print_warnings(conversion, verbosity == Verbosity::Verbose);
    print_summary(conversion);
}

fn print_header(source: &str, destination: &str) {
    eprintln!();
    eprintln!(
        "  {} {} {}",
        style("Dark Converter").bold().cyan(),
        style("─").dim(),
        style("Grafana → Dark").dim()
    );
    eprintln!();
    eprintln!(
        "  {} {} {}",
        style("Source:").dim(),
        style(source).cyan(),
        style("(dashboard export)").dim()
    );
    eprintln!("  {} {}", style("Target:").dim(), style(destination).green());
    eprintln!();
}

fn print_warnings(conversion: &Conversion, verbose: bool) {
    let shown: Vec<_> = conversion
        .warnings
        .iter()
        .filter(|w| verbose || w.severity != WarningSeverity::Info)
        .collect();

    let hidden = if verbose {
        0
    } else {
        conversion.count(WarningSeverity::Info)
    };
    if hidden > 0 {
        eprintln!(
            "  {} {} {} {}",
            style("ℹ").cyan(),
            hidden,
            style(pluralize(hidden, "value defaulted", "values defaulted")).dim(),
            style("(use --verbose to see details)").dim()
        );
        eprintln!();
    }

    if shown.is_empty() {
        return;
    }

    eprintln!("  {}", style("Conversion Notes").bold());
    eprintln!("  {}", style("────────────────").dim());
    eprintln!();

    // Group warnings by category, in declaration order
    let mut by_category: BTreeMap<WarningCategory, Vec<&ConversionWarning>> = BTreeMap::new();
    for warning in shown {
        by_category.entry(warning.category).or_default().push(warning);
    }

    for (category, warnings) in &by_category {
        eprintln!("  {}", style(category.label()).bold());
        for warning in warnings {
            print_warning(warning);
        }
        eprintln!();
    }
}

fn print_warning(warning: &ConversionWarning) {
    let icon = style(warning.severity.icon()).fg(severity_color(warning.severity));

    let subject = if warning.subject.is_empty() {
        "(unnamed)"
    } else {
        warning.subject.as_str()
    };

    eprintln!("    {} {}", icon, style(subject).bold());
    eprintln!("      {}", style(&warning.message).dim());

    if let Some(ref suggestion) = warning.suggestion {
        eprintln!("      {} {}", style("→").green(), suggestion);
    }
}

fn print_summary(conversion: &Conversion) {
    let dashboard = &conversion.dashboard;
    let rows = dashboard.rows.len();
    let panels = dashboard.panels().count();

    eprintln!("  {}", style("Summary").bold());
    eprintln!("  {}", style("───────").dim());
    eprintln!(
        "  {} {} in {} {}",
        style(format!("{:>3}", panels)).green().bold(),
        pluralize(panels, "panel", "panels"),
        rows,
        pluralize(rows, "row", "rows"),
    );

    if !dashboard.variables.is_empty() {
        eprintln!(
            "  {} {}",
            style(format!("{:>3}", dashboard.variables.len())).blue().bold(),
            pluralize(dashboard.variables.len(), "variable", "variables")
        );
    }

    for (severity, label, hint) in [
        (WarningSeverity::Error, "malformed item", "(skipped)"),
        (WarningSeverity::Unsupported, "unsupported item", "(skipped)"),
        (WarningSeverity::Warning, "warning", "(review recommended)"),
    ] {
        let count = conversion.count(severity);
        if count == 0 {
            continue;
        }

        eprintln!(
            "  {} {}{} {}",
            style(format!("{:>3}", count)).fg(severity_color(severity)).bold(),
            label,
            if count == 1 { "" } else { "s" },
            style(hint).dim()
        );
    }

    eprintln!();
}

fn severity_color(severity: WarningSeverity) -> console::Color {
    match severity {
        WarningSeverity::Info => console::Color::Cyan,
        WarningSeverity::Warning => console::Color::Yellow,
        WarningSeverity::Unsupported => console::Color::Magenta,
        WarningSeverity::Error => console::Color::Red,
    }
}

/// Pluralize a word based on count
pub fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
