use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use colored::Colorize;
use flb_classic_core::{format_text, Diagnostic, Severity};

use crate::conversion_summary::{render as render_summary_line, ConversionSummary};

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Render diagnostics for terminal output.
///
/// Debug events are only shown when `debug` is set.
pub fn render_diagnostics(diagnostics: &[Diagnostic], debug: bool) -> String {
    let visible: Vec<Diagnostic> = diagnostics
        .iter()
        .filter(|diag| debug || diag.severity != Severity::Debug)
        .cloned()
        .collect();
    if visible.is_empty() {
        return "no diagnostics".dimmed().to_string();
    }

    let raw = format_text(&visible);
    raw.lines()
        .map(|line| {
            if line.starts_with("ERROR") {
                line.red().to_string()
            } else if line.starts_with("WARN") {
                line.yellow().to_string()
            } else if line.starts_with("DEBUG") {
                line.dimmed().to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render block counts for terminal output.
pub fn render_summary(summary: ConversionSummary) -> String {
    render_summary_line(summary).cyan().to_string()
}

/// Plain-text audit log written next to a converted file.
pub struct ReportFile {
    path: PathBuf,
    writer: BufWriter<File>,
    debug: bool,
}

impl ReportFile {
    /// Create (or truncate) the report and stamp it with the current time.
    pub fn create(path: &Path, debug: bool) -> io::Result<Self> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "Execution date:{}", Local::now().format(DATE_FORMAT))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer,
            debug,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one message; debug messages are dropped unless debug is on.
    pub fn record(&mut self, severity: Severity, message: &str) -> io::Result<()> {
        if severity == Severity::Debug && !self.debug {
            return Ok(());
        }
        writeln!(self.writer, "{}{message}", label(severity))
    }

    pub fn record_diagnostics(&mut self, diagnostics: &[Diagnostic]) -> io::Result<()> {
        for diag in diagnostics {
            self.record(diag.severity, &diag.to_string())?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

fn label(severity: Severity) -> &'static str {
    match severity {
        Severity::Debug => "DEBUG:",
        Severity::Info => "info:",
        Severity::Warning => "warn:",
        Severity::Error => "ERROR:",
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use flb_classic_core::Diagnostics;

    use super::*;

    #[test]
    fn report_skips_debug_lines_unless_enabled() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.yaml.report");

        let mut diags = Diagnostics::new();
        diags.debug(Some(1), "stored input block");
        diags.error(Some(4), "cannot process attribute: x");
        let diags = diags.into_vec();

        let mut report = ReportFile::create(&path, false).expect("create report");
        report.record_diagnostics(&diags).expect("record");
        report.finish().expect("finish");

        let text = fs::read_to_string(&path).expect("read report");
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Execution date:"));
        assert_eq!(lines[1..], ["ERROR:line 4: cannot process attribute: x"]);
    }

    #[test]
    fn terminal_rendering_hides_debug_events() {
        colored::control::set_override(false);
        let mut diags = Diagnostics::new();
        diags.debug(None, "stored output block");
        diags.warning(Some(2), "@include found, kept as a comment: @include a.conf");
        let diags = diags.into_vec();

        assert_eq!(
            render_diagnostics(&diags, false),
            "WARN line 2: @include found, kept as a comment: @include a.conf"
        );
        assert!(render_diagnostics(&diags, true).contains("DEBUG stored output block"));
    }
}
