use anyhow::{Context, Result};
use clap::Parser;
use flb_convert::settings::{load_settings_file, Overrides, Settings};
use tracing::{debug, info};

mod check_cmd;
mod cli;
mod convert;
mod logging;
mod path_guard;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_settings = cli
        .config
        .as_deref()
        .map(load_settings_file)
        .transpose()
        .context("failed to load settings")?;

    let overrides = match &cli.command {
        Command::Convert(args) => Overrides {
            debug: cli.debug,
            report_file: args.report_file,
            idiomatic_naming: args.idiomatic,
            path_prefix: args.path_prefix.clone(),
        },
        Command::Check(args) => Overrides {
            debug: cli.debug,
            idiomatic_naming: args.idiomatic,
            path_prefix: args.path_prefix.clone(),
            ..Overrides::default()
        },
    };
    let settings = Settings::from_process_env(&overrides, file_settings.as_ref());

    logging::init(settings.debug);
    info!("Fluent Bit classic converter starting");
    debug!(?settings, "resolved settings");

    match cli.command {
        Command::Convert(args) => convert::run_convert(args, &settings),
        Command::Check(args) => check_cmd::run_check(args, &settings),
    }
}
