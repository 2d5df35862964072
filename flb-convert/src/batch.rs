use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

pub const CONVERSION_LIST: &str = "conversion.list";
pub const ENV_CLASSIC_FILE: &str = "FLBClassicFN";

const CLASSIC_EXTENSION: &str = "conf";
const YAML_EXTENSION: &str = "yaml";
const REPORT_SUFFIX: &str = ".report";

/// Where the batch's source files were taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum SourceOrigin {
    ConversionList(PathBuf),
    Arguments,
    Environment,
}

/// The files one run will convert, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub origin: SourceOrigin,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to read conversion list {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("conversion list {0} names no files")]
    EmptyList(String),
    #[error(
        "no classic configuration file supplied (pass a file, create conversion.list or set FLBClassicFN)"
    )]
    NoSources,
}

/// Decide which files to convert.
///
/// An explicit `list` wins, then `conversion.list` under `prefix`, then the
/// command line `files`, then `env_file`. Every entry is joined onto
/// `prefix`; the explicit list path itself is used as given.
pub fn resolve_sources(
    list: Option<&Path>,
    files: &[PathBuf],
    env_file: Option<String>,
    prefix: &Path,
) -> Result<SourceSet, BatchError> {
    let default_list = with_prefix(prefix, Path::new(CONVERSION_LIST));
    let list_path = match list {
        Some(path) => Some(path.to_path_buf()),
        None if default_list.is_file() => Some(default_list),
        None => None,
    };

    if let Some(list_path) = list_path {
        let entries = read_conversion_list(&list_path)?;
        if entries.is_empty() {
            return Err(BatchError::EmptyList(list_path.display().to_string()));
        }
        return Ok(SourceSet {
            files: entries.iter().map(|entry| with_prefix(prefix, entry)).collect(),
            origin: SourceOrigin::ConversionList(list_path),
        });
    }

    if !files.is_empty() {
        return Ok(SourceSet {
            origin: SourceOrigin::Arguments,
            files: files.iter().map(|file| with_prefix(prefix, file)).collect(),
        });
    }

    match env_file.map(|value| value.trim().to_string()) {
        Some(value) if !value.is_empty() => Ok(SourceSet {
            origin: SourceOrigin::Environment,
            files: vec![with_prefix(prefix, Path::new(&value))],
        }),
        _ => Err(BatchError::NoSources),
    }
}

/// Read a conversion list file.
pub fn read_conversion_list(path: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let raw = fs::read_to_string(path).map_err(|source| BatchError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_conversion_list(&raw))
}

/// One path per line; blank lines and `#` comments are skipped.
pub fn parse_conversion_list(raw: &str) -> Vec<PathBuf> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect()
}

/// Output path for a classic source: `x.conf` becomes `x.yaml`, anything
/// else gets `.yaml` appended.
pub fn output_path_for(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == CLASSIC_EXTENSION) {
        return input.with_extension(YAML_EXTENSION);
    }
    append_suffix(input, &format!(".{YAML_EXTENSION}"))
}

/// Audit report path that sits next to `output`.
pub fn report_path_for(output: &Path) -> PathBuf {
    append_suffix(output, REPORT_SUFFIX)
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = OsString::from(path.as_os_str());
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Join `path` onto `prefix`; an empty prefix leaves `path` untouched.
pub fn with_prefix(prefix: &Path, path: &Path) -> PathBuf {
    if prefix.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        prefix.join(path)
    }
}
