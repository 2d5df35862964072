use crate::diagnostic::{Diagnostic, Severity};

/// Format diagnostics as plain text, one event per line.
pub fn format_text(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|diag| format!("{} {diag}", label(diag.severity)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn label(severity: Severity) -> &'static str {
    match severity {
        Severity::Debug => "DEBUG",
        Severity::Info => "INFO",
        Severity::Warning => "WARN",
        Severity::Error => "ERROR",
    }
}
