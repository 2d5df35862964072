use std::fs;
use std::path::{Path, PathBuf};

use flb_classic_core::ConvertOptions;
use serde::Deserialize;
use thiserror::Error;

pub const ENV_DEBUG: &str = "FLB_CONVERT_DEBUG";
pub const ENV_REPORT_FILE: &str = "FLB_REPORT_FILE";
pub const ENV_IDIOMATIC: &str = "FLB_IDIOMATICFORM";
pub const ENV_PATH_PREFIX: &str = "FLB_PATH_PREFIX";

/// Effective settings for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Emit debug level logs and keep debug lines in report files.
    pub debug: bool,
    /// Write a `.report` file next to every output.
    pub report_file: bool,
    /// Rewrite `snake_case` keys to `camelCase`.
    pub idiomatic_naming: bool,
    /// Directory joined in front of every source path.
    pub path_prefix: PathBuf,
}

/// Values set explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub debug: bool,
    pub report_file: bool,
    pub idiomatic_naming: bool,
    pub path_prefix: Option<PathBuf>,
}

/// Optional TOML settings file (`--config`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub debug: Option<bool>,
    pub report_file: Option<bool>,
    pub idiomatic_naming: Option<bool>,
    pub path_prefix: Option<PathBuf>,
}

/// Errors returned when loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load a TOML settings file.
pub fn load_settings_file(path: &Path) -> Result<SettingsFile, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| SettingsError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// True only for the literal `true`, ignoring case and surrounding space.
pub fn env_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

impl Settings {
    /// Resolve settings with precedence CLI flag > environment > file > default.
    ///
    /// `env` looks up a variable by name so callers and tests can supply
    /// their own environment.
    pub fn resolve<F>(overrides: &Overrides, file: Option<&SettingsFile>, env: F) -> Settings
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.cloned().unwrap_or_default();
        let flag = |cli: bool, name: &str, from_file: Option<bool>| {
            if cli {
                return true;
            }
            match env(name) {
                Some(value) => env_flag(&value),
                None => from_file.unwrap_or(false),
            }
        };

        let path_prefix = overrides
            .path_prefix
            .clone()
            .or_else(|| {
                env(ENV_PATH_PREFIX)
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
                    .map(PathBuf::from)
            })
            .or(file.path_prefix)
            .unwrap_or_default();

        Settings {
            debug: flag(overrides.debug, ENV_DEBUG, file.debug),
            report_file: flag(overrides.report_file, ENV_REPORT_FILE, file.report_file),
            idiomatic_naming: flag(
                overrides.idiomatic_naming,
                ENV_IDIOMATIC,
                file.idiomatic_naming,
            ),
            path_prefix,
        }
    }

    /// Resolve against the process environment.
    pub fn from_process_env(overrides: &Overrides, file: Option<&SettingsFile>) -> Settings {
        Self::resolve(overrides, file, |name| std::env::var(name).ok())
    }

    /// Engine options derived from these settings.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            idiomatic_naming: self.idiomatic_naming,
        }
    }
}
