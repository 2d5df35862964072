use std::path::PathBuf;

use clap::{Parser, ValueEnum};

const ENV_HELP: &str = "\
Environment:
  FLB_CONVERT_DEBUG   'true' enables debug logging
  FLB_REPORT_FILE     'true' writes <output>.report next to every converted file
  FLB_IDIOMATICFORM   'true' rewrites snake_case keys to camelCase
  FLB_PATH_PREFIX     directory joined in front of every source path
  FLBClassicFN        single source file used when no file or conversion list is given

conversion.list:
  When <prefix>/conversion.list exists, every non-blank line names a classic
  file to convert; it takes precedence over file arguments.";

#[derive(Parser, Debug)]
#[command(name = "flb-convert")]
#[command(about = "Convert Fluent Bit classic configuration files to YAML")]
#[command(after_help = ENV_HELP)]
pub struct Cli {
    /// Optional TOML settings file (debug, report_file, idiomatic_naming, path_prefix).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Convert classic files and write YAML next to them.
    Convert(ConvertArgs),
    /// Parse classic files and report problems without writing anything.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Classic files to convert (ignored when a conversion list is found).
    pub files: Vec<PathBuf>,
    /// Conversion list naming one classic file per line.
    #[arg(long)]
    pub list: Option<PathBuf>,
    /// Output file path (single source only).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Rewrite snake_case keys to camelCase.
    #[arg(long)]
    pub idiomatic: bool,
    /// Write an <output>.report audit file for every conversion.
    #[arg(long)]
    pub report_file: bool,
    /// Directory joined in front of every source path.
    #[arg(long)]
    pub path_prefix: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Classic files to check.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Rewrite snake_case keys to camelCase before checking.
    #[arg(long)]
    pub idiomatic: bool,
    /// Directory joined in front of every source path.
    #[arg(long)]
    pub path_prefix: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Fail when any error diagnostic is reported.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
