use std::path::PathBuf;

use flb_classic_core::{Conversion, Diagnostic, Severity};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub inputs: usize,
    pub filters: usize,
    pub outputs: usize,
    pub service_attributes: usize,
    pub includes: usize,
    pub errors: usize,
    pub warnings: usize,
}

pub fn summarize(conversion: &Conversion) -> ConversionSummary {
    let counts = conversion.document.counts();
    let count_of = |severity: Severity| {
        conversion
            .diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    };
    ConversionSummary {
        inputs: counts.inputs,
        filters: counts.filters,
        outputs: counts.outputs,
        service_attributes: counts.service_attributes,
        includes: counts.includes,
        errors: count_of(Severity::Error),
        warnings: count_of(Severity::Warning),
    }
}

pub fn render(summary: ConversionSummary) -> String {
    format!(
        "inputs={} filters={} outputs={} service_attributes={} includes={} errors={} warnings={}",
        summary.inputs,
        summary.filters,
        summary.outputs,
        summary.service_attributes,
        summary.includes,
        summary.errors,
        summary.warnings
    )
}

/// What happened to one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    /// Written YAML path; `None` when nothing was written.
    pub output: Option<PathBuf>,
    pub summary: Option<ConversionSummary>,
    pub diagnostics: Vec<Diagnostic>,
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn succeeded(input: PathBuf, output: Option<PathBuf>, conversion: &Conversion) -> Self {
        Self {
            input,
            output,
            summary: Some(summarize(conversion)),
            diagnostics: conversion.diagnostics.iter().cloned().collect(),
            error: None,
        }
    }

    pub fn failed(input: PathBuf, error: String) -> Self {
        Self {
            input,
            output: None,
            summary: None,
            diagnostics: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use flb_classic_core::{parse_str, ConvertOptions};

    use super::*;

    #[test]
    fn summary_counts_blocks_and_problems() {
        let conversion = parse_str(
            "stray line\n[SERVICE]\nflush 1\n@include a.conf\n[INPUT]\nname cpu\n[OUTPUT]\nname stdout\n",
            &ConvertOptions::default(),
        );
        let summary = summarize(&conversion);

        assert_eq!(
            render(summary),
            "inputs=1 filters=0 outputs=1 service_attributes=1 includes=1 errors=1 warnings=1"
        );
    }
}
