use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// How serious a [`Diagnostic`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

/// A single event raised while converting a classic file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// 1-based source line, when the event is tied to one.
    pub line: Option<usize>,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Ordered collector for the diagnostics of one conversion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, line: Option<usize>, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity,
            line,
            message: message.into(),
        });
    }

    pub fn debug(&mut self, line: Option<usize>, message: impl Into<String>) {
        self.push(Severity::Debug, line, message);
    }

    pub fn info(&mut self, line: Option<usize>, message: impl Into<String>) {
        self.push(Severity::Info, line, message);
    }

    pub fn warning(&mut self, line: Option<usize>, message: impl Into<String>) {
        self.push(Severity::Warning, line, message);
    }

    pub fn error(&mut self, line: Option<usize>, message: impl Into<String>) {
        self.push(Severity::Error, line, message);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when at least one error-severity event was recorded.
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_line_when_known() {
        let mut diags = Diagnostics::new();
        diags.error(Some(7), "cannot process attribute: foo");
        diags.info(None, "merged");

        let rendered: Vec<String> = diags.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["line 7: cannot process attribute: foo", "merged"]);
        assert!(diags.has_errors());
    }
}
