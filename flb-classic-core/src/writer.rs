use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::block::BlockKind;
use crate::document::Document;

const SERVICE_HEADER: &str = "service:";
const INCLUDES_HEADER: &str = "# includes:";
const PIPELINE_HEADER: &str = "pipeline:";
const PIPELINE_ORDER: [BlockKind; 3] = [BlockKind::Input, BlockKind::Filter, BlockKind::Output];

/// Errors that can occur while writing a rendered document.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to write the output file.
    #[error("failed to write YAML file: {0}")]
    Io(#[from] std::io::Error),
}

/// Render a [`Document`] as YAML lines.
///
/// Order is fixed: service, includes (as comments), then the pipeline with
/// inputs, filters and outputs. Empty sections are left out; blocks keep
/// their source order and each is followed by a blank line.
pub fn render(document: &Document) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(service) = document.service.populated() {
        lines.push(SERVICE_HEADER.to_string());
        lines.extend(service.render());
    }

    if let Some(includes) = document.includes.populated() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(INCLUDES_HEADER.to_string());
        lines.extend(includes.render());
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(PIPELINE_HEADER.to_string());

    for kind in PIPELINE_ORDER {
        let blocks = document.pipeline(kind);
        let Some(label) = kind.section_label() else {
            continue;
        };
        if blocks.is_empty() {
            continue;
        }
        lines.push(format!("  {label}:"));
        for block in blocks {
            lines.extend(block.render());
            lines.push(String::new());
        }
    }

    lines
}

/// Render a [`Document`] into YAML text with a trailing newline.
pub fn write(document: &Document) -> String {
    let mut out = render(document).join("\n");
    out.push('\n');
    out
}

/// Render a [`Document`] and write it to `path`.
pub fn write_file(document: &Document, path: &Path) -> Result<(), WriteError> {
    fs::write(path, write(document))?;
    Ok(())
}
