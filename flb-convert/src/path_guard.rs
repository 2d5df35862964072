use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Refuse to write the YAML output over its own classic source.
pub fn ensure_output_not_source(output: &Path, source: &Path) -> Result<()> {
    let out_abs = absolute(output)
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;
    let src_abs = absolute(source)
        .with_context(|| format!("failed to resolve source path {}", source.display()))?;

    if out_abs == src_abs {
        bail!(
            "refusing to overwrite source file: output {} matches input {}",
            output.display(),
            source.display()
        );
    }
    Ok(())
}

// Outputs usually do not exist yet, so only existing paths are canonicalized;
// the rest are anchored on the current directory without resolving `..`.
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir().context("current_dir")?.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("fluent-bit.conf");
        std::fs::write(&source, "[INPUT]\n").expect("write source");

        assert!(ensure_output_not_source(&source, &source).is_err());
        assert!(ensure_output_not_source(&dir.path().join("fluent-bit.yaml"), &source).is_ok());
    }
}
