use anyhow::{bail, Result};
use flb_classic_core::parse_file;
use tracing::error;

use crate::cli::{CheckArgs, OutputFormat};
use flb_convert::batch::with_prefix;
use flb_convert::conversion_summary::FileOutcome;
use flb_convert::report::{render_diagnostics, render_summary};
use flb_convert::settings::Settings;

pub fn run_check(args: CheckArgs, settings: &Settings) -> Result<()> {
    let options = settings.convert_options();
    let mut outcomes = Vec::with_capacity(args.files.len());

    for file in &args.files {
        let input = with_prefix(&settings.path_prefix, file);
        let outcome = match parse_file(&input, &options) {
            Ok(conversion) => FileOutcome::succeeded(input, None, &conversion),
            Err(err) => {
                error!(file = %input.display(), "{err}");
                FileOutcome::failed(input, err.to_string())
            }
        };
        outcomes.push(outcome);
    }

    match args.format {
        OutputFormat::Text => {
            for outcome in &outcomes {
                println!("{}", outcome.input.display());
                if let Some(error) = &outcome.error {
                    println!("  {error}");
                    continue;
                }
                println!("{}", render_diagnostics(&outcome.diagnostics, settings.debug));
                if let Some(summary) = outcome.summary {
                    println!("{}", render_summary(summary));
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcomes)?),
    }

    let unreadable = outcomes.iter().filter(|o| o.is_failure()).count();
    if unreadable > 0 {
        bail!("{unreadable} of {} files could not be read", outcomes.len());
    }

    let errors: usize = outcomes
        .iter()
        .filter_map(|o| o.summary)
        .map(|summary| summary.errors)
        .sum();
    if args.strict && errors > 0 {
        bail!("strict mode failed: {errors} error diagnostics reported");
    }
    Ok(())
}
