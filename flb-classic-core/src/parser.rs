use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::block::{BlockKind, DirectiveBlock, INCLUDE_MARKER};
use crate::diagnostic::Diagnostics;
use crate::document::Document;
use crate::singleton::Absorbed;

/// Behaviour switches for one conversion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Rewrite `snake_case` keys to `camelCase`.
    pub idiomatic_naming: bool,
}

/// Result of parsing one classic source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    pub document: Document,
    pub diagnostics: Diagnostics,
}

/// Errors that stop a single file from being parsed.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the source file.
    #[error("failed to read classic config file: {0}")]
    Io(#[from] std::io::Error),
}

enum State {
    NoOpenBlock,
    BlockOpen {
        block: DirectiveBlock,
        opened_at: usize,
    },
}

/// Parse a sequence of classic configuration lines.
///
/// Section markers open a new block and flush the previous one.
/// `@include` lines are collected into the document-wide includes block
/// regardless of the open section. Lines seen before any section marker
/// are reported and dropped.
pub fn parse<I, S>(lines: I, options: &ConvertOptions) -> Conversion
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut document = Document::new();
    let mut diagnostics = Diagnostics::new();
    let mut state = State::NoOpenBlock;
    let mut includes: Option<(DirectiveBlock, usize)> = None;

    for (idx, raw) in lines.into_iter().enumerate() {
        let line_number = idx + 1;
        let line = raw.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        if let Some(kind) = BlockKind::from_marker(line) {
            let next = State::BlockOpen {
                block: DirectiveBlock::new(kind),
                opened_at: line_number,
            };
            if let State::BlockOpen { block, opened_at } = std::mem::replace(&mut state, next) {
                store_block(&mut document, block, opened_at, &mut diagnostics);
            }
            continue;
        }

        if is_inclusion_line(line) {
            let (block, _) = includes
                .get_or_insert_with(|| (DirectiveBlock::new(BlockKind::Includes), line_number));
            if !block.attributes.is_empty() {
                diagnostics.info(Some(line_number), "include directive added to includes block");
            }
            block.ingest(line, line_number, options, &mut diagnostics);
            continue;
        }

        match &mut state {
            State::BlockOpen { block, .. } => {
                block.ingest(line, line_number, options, &mut diagnostics);
            }
            State::NoOpenBlock => diagnostics.error(
                Some(line_number),
                format!("cannot allocate, process line: {line}"),
            ),
        }
    }

    if let State::BlockOpen { block, opened_at } = state {
        store_block(&mut document, block, opened_at, &mut diagnostics);
    }
    if let Some((block, opened_at)) = includes.filter(|(block, _)| !block.attributes.is_empty()) {
        store_block(&mut document, block, opened_at, &mut diagnostics);
    }

    Conversion {
        document,
        diagnostics,
    }
}

/// Parse classic configuration text. A leading byte order mark is ignored.
pub fn parse_str(source: &str, options: &ConvertOptions) -> Conversion {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    parse(source.lines(), options)
}

/// Read and parse a classic configuration file.
pub fn parse_file(path: &Path, options: &ConvertOptions) -> Result<Conversion, ParseError> {
    let source = fs::read_to_string(path)?;
    Ok(parse_str(&source, options))
}

fn is_inclusion_line(line: &str) -> bool {
    line.get(..INCLUDE_MARKER.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(INCLUDE_MARKER))
}

fn store_block(
    document: &mut Document,
    block: DirectiveBlock,
    opened_at: usize,
    diagnostics: &mut Diagnostics,
) {
    let kind = block.kind;
    match kind {
        BlockKind::Input => document.inputs.push(block),
        BlockKind::Filter => document.filters.push(block),
        BlockKind::Output => document.outputs.push(block),
        BlockKind::Service => {
            if document.service.absorb(block) == Absorbed::Merged {
                diagnostics.info(
                    Some(opened_at),
                    "additional [SERVICE] section merged into the first one",
                );
                return;
            }
        }
        BlockKind::Includes => {
            document.includes.absorb(block);
        }
    }
    diagnostics.debug(Some(opened_at), format!("stored {kind} block"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;

    #[test]
    fn inclusion_prefix_detection() {
        assert!(is_inclusion_line("@INCLUDE outputs.conf"));
        assert!(is_inclusion_line("@include"));
        assert!(!is_inclusion_line("path @include"));
        assert!(!is_inclusion_line("@inc"));
    }

    #[test]
    fn orphan_lines_are_reported() {
        let conversion = parse_str("flush 1\n[SERVICE]\nflush 2\n", &ConvertOptions::default());
        let errors: Vec<_> = conversion
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, Some(1));
        assert!(errors[0].message.contains("cannot allocate"));
        assert!(conversion.document.service.has_attributes());
    }

    #[test]
    fn include_does_not_close_open_block() {
        let source = "[INPUT]\nname cpu\n@include extra.conf\ntag cpu.local\n";
        let conversion = parse_str(source, &ConvertOptions::default());
        let doc = conversion.document;

        assert_eq!(doc.inputs.len(), 1);
        assert_eq!(doc.inputs[0].attributes.get("tag"), Some(&["cpu.local".to_string()][..]));
        let includes = doc.includes.block().expect("includes collected");
        assert_eq!(
            includes.attributes.get("#@include"),
            Some(&["extra.conf".to_string()][..])
        );
    }
}
