use crate::diagnostic::Diagnostic;

/// Format diagnostics as JSON.
pub fn format_json(diagnostics: &[Diagnostic]) -> String {
    serde_json::to_string_pretty(diagnostics).unwrap_or_else(|_| "[]".to_string())
}
