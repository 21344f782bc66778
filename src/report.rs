//! Output formatting for goanalyze results.
//!
//! Supports two output formats:
//! - JSON: the analysis records, compact or indented
//! - Pretty: colored terminal summary of a project run

use colored::*;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::{self, Write};

use crate::analysis::{FailedAnalysis, FileAnalysis, ProjectAnalysis};

// =============================================================================
// JSON Format
// =============================================================================

/// Serialize any result record to JSON text.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

/// Write a result record as one JSON document on stdout.
pub fn write_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let text = to_json(value, pretty)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", text)?;
    Ok(())
}

/// Write the failure record for a run that produced no analysis.
pub fn write_failure(failure: &FailedAnalysis, pretty: bool) -> anyhow::Result<()> {
    write_json(failure, pretty)
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write a project summary in human-readable form.
pub fn write_pretty(root: &str, project: &ProjectAnalysis) {
    print!("{}", format_pretty(root, project));
}

/// Build the human-readable project summary.
pub fn format_pretty(root: &str, project: &ProjectAnalysis) -> String {
    let mut out = String::new();
    let summary = &project.summary;

    // Header
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {} v{}",
        "goanalyze".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}{}", "Analyzing: ".dimmed(), root);
    let _ = writeln!(out);

    // Per-file lines
    if project.files.is_empty() {
        let _ = writeln!(out, "  {}", "No Go files found".yellow());
        let _ = writeln!(out);
    } else {
        let _ = writeln!(out, "  {} ({}):", "Files".bold(), project.files.len());
        for file in &project.files {
            write_file_line(&mut out, file);
        }
        let _ = writeln!(out);
    }

    // Totals
    let _ = writeln!(out, "  {}", "Summary:".bold());
    let rows = [
        ("structs", summary.total_classes),
        ("interfaces", summary.total_interfaces),
        ("functions", summary.total_functions),
    ];
    for (label, count) in rows {
        let _ = writeln!(out, "    {:<12} {}", label, count);
    }
    let _ = writeln!(
        out,
        "    {:<12} {}",
        "doc coverage",
        colored_coverage(summary.overall_doc_coverage)
    );
    let _ = writeln!(out);

    out
}

fn write_file_line(out: &mut String, file: &FileAnalysis) {
    let methods: usize = file.classes.iter().map(|s| s.methods.len()).sum();
    let _ = writeln!(
        out,
        "    {}  {} structs, {} methods, {} interfaces, {} functions, {} imports  {}",
        file.path,
        file.classes.len(),
        methods,
        file.interfaces.len(),
        file.functions.len(),
        file.imports.len(),
        colored_coverage(file.documentation.coverage),
    );
}

fn colored_coverage(coverage: f64) -> ColoredString {
    let text = format!("{:.1}%", coverage);
    match coverage {
        c if c >= 80.0 => text.green().bold(),
        c if c >= 50.0 => text.green(),
        c if c >= 25.0 => text.yellow(),
        _ => text.red(),
    }
}
