//! Rendering of lint results for the terminal, JSON consumers and editors.

use anyhow::Result;
use import_fence_core::{LintResult, Severity};
use std::io::IsTerminal;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(result, std::io::stdout().is_terminal()),
        OutputFormat::Json => serde_json::to_string_pretty(result)? + "\n",
        OutputFormat::Compact => render_compact(result),
    };
    print!("{rendered}");
    Ok(())
}

/// One [`Violation::format`](import_fence_core::Violation::format) block per
/// violation followed by the summary. Headers and the summary are tinted by
/// severity when `color` is set.
fn render_text(result: &LintResult, color: bool) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        let block = violation.format();
        match block.split_once('\n') {
            Some((header, rest)) if color => {
                out.push_str(&paint(header, Some(violation.severity)));
                out.push('\n');
                out.push_str(rest);
            }
            _ => out.push_str(&block),
        }
        out.push('\n');
    }

    let summary = result.summary();
    if color {
        out.push_str(&paint(&summary, result.worst_severity()));
    } else {
        out.push_str(&summary);
    }
    out.push('\n');
    out
}

fn render_compact(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(|violation| format!("{violation}\n"))
        .collect()
}

fn paint(text: &str, severity: Option<Severity>) -> String {
    let code = match severity {
        Some(Severity::Error) => "31",
        Some(Severity::Warning) => "33",
        Some(Severity::Info) => "34",
        None => "32",
    };
    format!("\x1b[{code}m{text}\x1b[0m")
}
