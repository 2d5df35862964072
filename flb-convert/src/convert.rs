//! Batch conversion of classic files to YAML.
//!
//! Every source gets a fresh engine pass. A file that cannot be read or
//! written is logged and skipped, and the batch carries on; the command only
//! fails once all files have been attempted.

use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use flb_classic_core::{parse_file, write_file, Conversion, ConvertOptions, Severity};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::cli::{ConvertArgs, OutputFormat};
use crate::logging::emit_diagnostics;
use crate::path_guard::ensure_output_not_source;
use flb_convert::batch::{
    output_path_for, report_path_for, resolve_sources, SourceOrigin, ENV_CLASSIC_FILE,
};
use flb_convert::conversion_summary::{render as render_summary, summarize, FileOutcome};
use flb_convert::report::ReportFile;
use flb_convert::settings::Settings;

#[derive(Debug, Serialize)]
struct BatchReport<'a> {
    origin: &'a SourceOrigin,
    files: &'a [FileOutcome],
}

/// Convert every resolved source file.
///
/// # Errors
///
/// Returns an error when no source can be resolved, when `--output` is used
/// with more than one source, or when at least one file failed.
pub fn run_convert(args: ConvertArgs, settings: &Settings) -> Result<()> {
    let env_file = std::env::var(ENV_CLASSIC_FILE).ok();
    let sources = resolve_sources(
        args.list.as_deref(),
        &args.files,
        env_file,
        &settings.path_prefix,
    )?;
    if args.output.is_some() && sources.files.len() != 1 {
        bail!(
            "--output requires exactly one source file, got {}",
            sources.files.len()
        );
    }
    debug!(origin = ?sources.origin, files = sources.files.len(), "resolved sources");

    let options = settings.convert_options();
    let mut outcomes = Vec::with_capacity(sources.files.len());
    for input in &sources.files {
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| output_path_for(input));
        let outcome = match convert_one(input, &output, settings, &options) {
            Ok(conversion) => FileOutcome::succeeded(input.clone(), Some(output), &conversion),
            Err(err) => {
                error!(file = %input.display(), "{err:#}");
                FileOutcome::failed(input.clone(), format!("{err:#}"))
            }
        };
        outcomes.push(outcome);
    }

    match args.format {
        OutputFormat::Text => {
            for outcome in &outcomes {
                println!("{}", render_outcome(outcome));
            }
        }
        OutputFormat::Json => {
            let report = BatchReport {
                origin: &sources.origin,
                files: &outcomes,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    let failed = outcomes.iter().filter(|o| o.is_failure()).count();
    if failed > 0 {
        bail!("{failed} of {} conversions failed", outcomes.len());
    }
    Ok(())
}

fn convert_one(
    input: &Path,
    output: &Path,
    settings: &Settings,
    options: &ConvertOptions,
) -> Result<Conversion> {
    ensure_output_not_source(output, input)?;

    let report = if settings.report_file {
        let path = report_path_for(output);
        let report = ReportFile::create(&path, settings.debug)
            .with_context(|| format!("failed to create report file {}", path.display()))?;
        Some(report)
    } else {
        None
    };

    info!("input file: {} --> {}", input.display(), output.display());
    let result = convert_and_write(input, output, options);

    if let Some(mut report) = report {
        match &result {
            Ok(conversion) => {
                let diagnostics: Vec<_> = conversion.diagnostics.iter().cloned().collect();
                report.record_diagnostics(&diagnostics)?;
                report.record(Severity::Info, &render_summary(summarize(conversion)))?;
            }
            Err(err) => report.record(Severity::Error, &format!("{err:#}"))?,
        }
        let path = report.path().to_path_buf();
        report
            .finish()
            .with_context(|| format!("failed to write report file {}", path.display()))?;
    }

    result
}

fn convert_and_write(input: &Path, output: &Path, options: &ConvertOptions) -> Result<Conversion> {
    let conversion = parse_file(input, options)
        .with_context(|| format!("failed to convert {}", input.display()))?;

    let diagnostics: Vec<_> = conversion.diagnostics.iter().cloned().collect();
    emit_diagnostics(&input.display().to_string(), &diagnostics);

    let counts = conversion.document.counts();
    info!(
        inputs = counts.inputs,
        filters = counts.filters,
        outputs = counts.outputs,
        "parsed {}",
        input.display()
    );

    write_file(&conversion.document, output)
        .with_context(|| format!("failed to write output YAML {}", output.display()))?;
    Ok(conversion)
}

fn render_outcome(outcome: &FileOutcome) -> String {
    match (&outcome.output, outcome.summary, &outcome.error) {
        (Some(output), Some(summary), None) => format!(
            "converted {} -> {} {}",
            outcome.input.display(),
            output.display(),
            render_summary(summary)
        )
        .green()
        .to_string(),
        (_, _, error) => format!(
            "failed {}: {}",
            outcome.input.display(),
            error.as_deref().unwrap_or("unknown error")
        )
        .red()
        .to_string(),
    }
}
